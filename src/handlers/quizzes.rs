// src/handlers/quizzes.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    error::AppError,
    models::quiz::{Answers, CreateQuizRequest, PublicQuiz, Quiz, QuizDetail, UpdateQuizRequest},
    services::{
        QuizService,
        quiz_service::{ERROR_INVALID_ACCESS_CODE, ERROR_QUIZ_NOT_FOUND},
    },
};

/// Assembles a quiz from existing question ids.
#[utoipa::path(
    post,
    path = "/quizzes",
    tag = "quizzes",
    request_body = CreateQuizRequest,
    responses(
        (status = 201, description = "Quiz created", body = Quiz),
        (status = 400, description = "Missing title or questions"),
        (status = 404, description = "A referenced question does not exist")
    )
)]
pub async fn create_quiz(
    State(quizzes): State<QuizService>,
    Json(payload): Json<CreateQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    let quiz = quizzes.create(payload).await?;
    Ok((StatusCode::CREATED, Json(quiz)))
}

#[utoipa::path(
    get,
    path = "/quizzes",
    tag = "quizzes",
    responses((status = 200, description = "All quizzes", body = [Quiz]))
)]
pub async fn list_quizzes(State(quizzes): State<QuizService>) -> Result<impl IntoResponse, AppError> {
    Ok(Json(quizzes.get_all().await?))
}

/// Retrieves a quiz by ID with its questions resolved.
#[utoipa::path(
    get,
    path = "/quizzes/{id}",
    tag = "quizzes",
    params(("id" = String, Path, description = "Quiz id")),
    responses(
        (status = 200, description = "Quiz found", body = QuizDetail),
        (status = 404, description = "Quiz not found")
    )
)]
pub async fn get_quiz(
    State(quizzes): State<QuizService>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let quiz = quizzes
        .get_by_id(&id)
        .await?
        .ok_or(AppError::NotFound(ERROR_QUIZ_NOT_FOUND.to_string()))?;
    let questions = quizzes.questions_of(&quiz).await?;

    Ok(Json(QuizDetail::new(quiz, questions)))
}

/// Retrieves the test-taker view of a quiz. Correct options are not included.
#[utoipa::path(
    get,
    path = "/quizzes/access/{access_code}",
    tag = "quizzes",
    params(("access_code" = String, Path, description = "Six-character access code")),
    responses(
        (status = 200, description = "Quiz found", body = PublicQuiz),
        (status = 404, description = "No quiz has this access code")
    )
)]
pub async fn get_quiz_by_access_code(
    State(quizzes): State<QuizService>,
    Path(access_code): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let quiz = quizzes
        .get_by_access_code(&access_code)
        .await?
        .ok_or(AppError::NotFound(ERROR_INVALID_ACCESS_CODE.to_string()))?;
    let questions = quizzes.questions_of(&quiz).await?;

    Ok(Json(PublicQuiz::new(quiz, questions)))
}

#[utoipa::path(
    put,
    path = "/quizzes/{id}",
    tag = "quizzes",
    params(("id" = String, Path, description = "Quiz id")),
    request_body = UpdateQuizRequest,
    responses(
        (status = 200, description = "Quiz updated", body = Quiz),
        (status = 404, description = "Quiz or referenced question not found"),
        (status = 423, description = "Quiz is locked")
    )
)]
pub async fn update_quiz(
    State(quizzes): State<QuizService>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    let quiz = quizzes.update(&id, payload).await?;
    Ok(Json(quiz))
}

#[utoipa::path(
    delete,
    path = "/quizzes/{id}",
    tag = "quizzes",
    params(("id" = String, Path, description = "Quiz id")),
    responses(
        (status = 204, description = "Quiz deleted"),
        (status = 404, description = "Quiz not found")
    )
)]
pub async fn delete_quiz(
    State(quizzes): State<QuizService>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if !quizzes.delete(&id).await? {
        return Err(AppError::NotFound(ERROR_QUIZ_NOT_FOUND.to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Locks a quiz against further updates.
#[utoipa::path(
    post,
    path = "/quizzes/{id}/lock",
    tag = "quizzes",
    params(("id" = String, Path, description = "Quiz id")),
    responses(
        (status = 200, description = "Quiz locked", body = Quiz),
        (status = 404, description = "Quiz not found")
    )
)]
pub async fn lock_quiz(
    State(quizzes): State<QuizService>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let quiz = quizzes.lock(&id).await?;
    Ok(Json(quiz))
}

/// Scores an attempt. The body is one option index per question, in order.
#[utoipa::path(
    post,
    path = "/quizzes/{access_code}/take",
    tag = "quizzes",
    params(("access_code" = String, Path, description = "Six-character access code")),
    request_body = Vec<i32>,
    responses(
        (status = 200, description = "Score", body = i32),
        (status = 400, description = "Answer count does not match question count"),
        (status = 404, description = "No quiz has this access code")
    )
)]
pub async fn take_quiz(
    State(quizzes): State<QuizService>,
    Path(access_code): Path<String>,
    Json(answers): Json<Answers>,
) -> Result<impl IntoResponse, AppError> {
    let score = quizzes.take_quiz(&access_code, &answers).await?;
    Ok(Json(score))
}
