// src/models/quiz.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    error::AppError,
    models::{
        is_blank,
        question::{PublicQuestion, Question},
        rule_error,
    },
};

pub const ERROR_QUIZ_NOT_MODIFIABLE: &str = "This quiz is no longer modifiable.";

/// A titled, ordered set of questions opened by its access code.
///
/// Questions are held by id and resolved when the quiz is read or taken.
/// `total_marks` is fixed when the question list is set and is not
/// recomputed if a referenced question's marks change later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Quiz {
    pub id: String,
    pub title: String,
    pub question_ids: Vec<String>,
    pub total_marks: i32,
    /// Six upper-case alphanumeric characters, unique across quizzes.
    pub access_code: String,
    /// Starts `true`; locking sets it to `false` for good.
    pub modifiable: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Quiz {
    pub fn lock(&mut self) {
        self.modifiable = false;
    }

    pub fn ensure_modifiable(&self) -> Result<(), AppError> {
        if !self.modifiable {
            return Err(AppError::Locked(ERROR_QUIZ_NOT_MODIFIABLE.to_string()));
        }
        Ok(())
    }
}

/// Validated quiz data handed to a repository; the repository assigns the id.
/// New quizzes are always stored as modifiable.
#[derive(Debug, Clone, PartialEq)]
pub struct NewQuiz {
    pub title: String,
    pub question_ids: Vec<String>,
    pub total_marks: i32,
    pub access_code: String,
}

/// Admin view: the quiz with its questions resolved.
#[derive(Debug, Serialize, ToSchema)]
pub struct QuizDetail {
    pub id: String,
    pub title: String,
    pub questions: Vec<Question>,
    pub total_marks: i32,
    pub access_code: String,
    pub modifiable: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl QuizDetail {
    pub fn new(quiz: Quiz, questions: Vec<Question>) -> Self {
        Self {
            id: quiz.id,
            title: quiz.title,
            questions,
            total_marks: quiz.total_marks,
            access_code: quiz.access_code,
            modifiable: quiz.modifiable,
            created_at: quiz.created_at,
        }
    }
}

/// Test-taker view: questions without their correct option.
#[derive(Debug, Serialize, ToSchema)]
pub struct PublicQuiz {
    pub id: String,
    pub title: String,
    pub questions: Vec<PublicQuestion>,
    pub total_marks: i32,
    pub access_code: String,
}

impl PublicQuiz {
    pub fn new(quiz: Quiz, questions: Vec<Question>) -> Self {
        Self {
            id: quiz.id,
            title: quiz.title,
            questions: questions.into_iter().map(PublicQuestion::from).collect(),
            total_marks: quiz.total_marks,
            access_code: quiz.access_code,
        }
    }
}

fn validate_quiz_title(title: &str) -> Result<(), validator::ValidationError> {
    if is_blank(title) {
        return Err(rule_error("empty_quiz_title", "Quiz title cannot be empty"));
    }
    Ok(())
}

/// DTO for assembling a quiz from existing questions.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateQuizRequest {
    #[serde(default)]
    #[validate(custom(function = validate_quiz_title))]
    pub title: String,
    #[serde(default, alias = "questionIds")]
    #[validate(length(min = 1, message = "Quiz must contain at least one question"))]
    pub question_ids: Vec<String>,
}

/// DTO for updating a quiz. Fields are optional.
/// `modifiable` is not settable here.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateQuizRequest {
    pub title: Option<String>,
    #[serde(alias = "questionIds")]
    pub question_ids: Option<Vec<String>>,
}

impl UpdateQuizRequest {
    pub fn merge_into(self, current: &Quiz) -> CreateQuizRequest {
        CreateQuizRequest {
            title: self.title.unwrap_or_else(|| current.title.clone()),
            question_ids: self
                .question_ids
                .unwrap_or_else(|| current.question_ids.clone()),
        }
    }
}

/// Body of `POST /quizzes/{accessCode}/take`: one option index per question, in quiz order.
pub type Answers = Vec<i32>;
