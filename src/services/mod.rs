// src/services/mod.rs

//! Domain services. Each one validates its input, then talks to the
//! repository traits; none of them knows which backing store is in use.

use crate::error::AppError;

pub mod question_service;
pub mod quiz_service;
pub mod user_service;

pub use question_service::QuestionService;
pub use quiz_service::QuizService;
pub use user_service::UserService;

/// Rejects blank identifiers before they reach storage.
pub(crate) fn require_id<'a>(id: &'a str, message: &str) -> Result<&'a str, AppError> {
    if id.trim().is_empty() {
        return Err(AppError::BadRequest(message.to_string()));
    }
    Ok(id)
}
