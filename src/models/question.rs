// src/models/question.rs

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    config::MIN_QUESTION_OPTIONS,
    error::AppError,
    models::{is_blank, rule_error},
};

pub const ERROR_INVALID_DIFFICULTY: &str = "Difficulty is not valid.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "EASY",
            Difficulty::Medium => "MEDIUM",
            Difficulty::Hard => "HARD",
        }
    }
}

/// Case-insensitive: `easy`, `Easy` and `EASY` are all accepted.
impl FromStr for Difficulty {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "EASY" => Ok(Difficulty::Easy),
            "MEDIUM" => Ok(Difficulty::Medium),
            "HARD" => Ok(Difficulty::Hard),
            _ => Err(AppError::BadRequest(ERROR_INVALID_DIFFICULTY.to_string())),
        }
    }
}

/// A multiple-choice question with a single correct option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Question {
    pub id: String,

    /// The text of the question.
    pub title: String,

    /// Choices in display order (e.g., ["Option A", "Option B"]).
    pub options: Vec<String>,

    /// Zero-based position of the correct choice within `options`.
    pub correct_option_index: i32,

    pub difficulty: Difficulty,

    pub topics: Vec<String>,

    /// Points awarded for a correct answer.
    pub marks: i32,

    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// DTO for sending a question to a test-taker (excludes the correct option).
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PublicQuestion {
    pub id: String,
    pub title: String,
    pub options: Vec<String>,
    pub difficulty: Difficulty,
    pub topics: Vec<String>,
    pub marks: i32,
}

impl From<Question> for PublicQuestion {
    fn from(q: Question) -> Self {
        Self {
            id: q.id,
            title: q.title,
            options: q.options,
            difficulty: q.difficulty,
            topics: q.topics,
            marks: q.marks,
        }
    }
}

/// Validated question data handed to a repository; the repository assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewQuestion {
    pub title: String,
    pub options: Vec<String>,
    pub correct_option_index: i32,
    pub difficulty: Difficulty,
    pub topics: Vec<String>,
    pub marks: i32,
}

/// DTO for creating a new question.
/// Missing fields default to empty values so they fail with the rule's own message.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[validate(schema(function = validate_correct_option))]
pub struct CreateQuestionRequest {
    #[serde(default)]
    #[validate(custom(function = validate_title))]
    pub title: String,
    #[serde(default)]
    #[validate(custom(function = validate_options))]
    pub options: Vec<String>,
    #[serde(default, alias = "correctOptionIndex")]
    pub correct_option_index: i32,
    #[serde(default)]
    #[validate(custom(function = validate_difficulty))]
    pub difficulty: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Topics cannot be null or empty"))]
    pub topics: Vec<String>,
    #[serde(default)]
    #[validate(range(min = 1, message = "Marks must be greater than zero"))]
    pub marks: i32,
}

fn validate_title(title: &str) -> Result<(), validator::ValidationError> {
    if is_blank(title) {
        return Err(rule_error(
            "empty_title",
            "Question title cannot be null or empty",
        ));
    }
    Ok(())
}

fn validate_options(options: &[String]) -> Result<(), validator::ValidationError> {
    if options.len() < MIN_QUESTION_OPTIONS {
        return Err(rule_error(
            "too_few_options",
            "Question must have at least two options",
        ));
    }
    Ok(())
}

fn validate_difficulty(difficulty: &str) -> Result<(), validator::ValidationError> {
    if difficulty.parse::<Difficulty>().is_err() {
        return Err(rule_error("invalid_difficulty", ERROR_INVALID_DIFFICULTY));
    }
    Ok(())
}

/// The correct option must point inside `options`.
fn validate_correct_option(req: &CreateQuestionRequest) -> Result<(), validator::ValidationError> {
    let in_range = usize::try_from(req.correct_option_index)
        .is_ok_and(|index| index < req.options.len());

    if !in_range {
        return Err(rule_error(
            "invalid_correct_option_index",
            "Invalid correct option index",
        ));
    }
    Ok(())
}

impl CreateQuestionRequest {
    pub fn into_new_question(self) -> Result<NewQuestion, AppError> {
        self.validate()?;
        let difficulty = self.difficulty.parse::<Difficulty>()?;

        Ok(NewQuestion {
            title: self.title,
            options: self.options,
            correct_option_index: self.correct_option_index,
            difficulty,
            topics: self.topics,
            marks: self.marks,
        })
    }
}

/// DTO for updating a question. Fields are optional.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateQuestionRequest {
    pub title: Option<String>,
    pub options: Option<Vec<String>>,
    #[serde(alias = "correctOptionIndex")]
    pub correct_option_index: Option<i32>,
    pub difficulty: Option<String>,
    pub topics: Option<Vec<String>>,
    pub marks: Option<i32>,
}

impl UpdateQuestionRequest {
    /// Overlays the present fields on the stored question.
    /// The result is re-validated as a whole, so an index that no longer fits is caught.
    pub fn merge_into(self, current: &Question) -> CreateQuestionRequest {
        CreateQuestionRequest {
            title: self.title.unwrap_or_else(|| current.title.clone()),
            options: self.options.unwrap_or_else(|| current.options.clone()),
            correct_option_index: self
                .correct_option_index
                .unwrap_or(current.correct_option_index),
            difficulty: self
                .difficulty
                .unwrap_or_else(|| current.difficulty.as_str().to_string()),
            topics: self.topics.unwrap_or_else(|| current.topics.clone()),
            marks: self.marks.unwrap_or(current.marks),
        }
    }
}
