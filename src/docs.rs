// src/docs.rs

use utoipa::OpenApi;

use crate::{
    handlers::{self, questions, quizzes, users},
    models::{
        question::{CreateQuestionRequest, Difficulty, PublicQuestion, Question, UpdateQuestionRequest},
        quiz::{CreateQuizRequest, PublicQuiz, Quiz, QuizDetail, UpdateQuizRequest},
        user::{CreateUserRequest, LoginRequest, Role, UpdateUserRequest, User},
    },
};

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health_check,
        users::create_user,
        users::register,
        users::login,
        users::list_users,
        users::get_user,
        users::update_user,
        users::delete_user,
        questions::create_question,
        questions::list_questions,
        questions::get_question,
        questions::update_question,
        questions::delete_question,
        questions::list_by_difficulty,
        questions::list_by_topic,
        quizzes::create_quiz,
        quizzes::list_quizzes,
        quizzes::get_quiz,
        quizzes::get_quiz_by_access_code,
        quizzes::update_quiz,
        quizzes::delete_quiz,
        quizzes::lock_quiz,
        quizzes::take_quiz,
    ),
    components(schemas(
        Role,
        User,
        CreateUserRequest,
        UpdateUserRequest,
        LoginRequest,
        Difficulty,
        Question,
        PublicQuestion,
        CreateQuestionRequest,
        UpdateQuestionRequest,
        Quiz,
        QuizDetail,
        PublicQuiz,
        CreateQuizRequest,
        UpdateQuizRequest,
    )),
    tags(
        (name = "users", description = "Accounts and login"),
        (name = "questions", description = "Question bank"),
        (name = "quizzes", description = "Quiz assembly, locking and scoring"),
        (name = "system", description = "Liveness")
    )
)]
pub struct ApiDoc;
