use std::sync::Arc;

use validator::Validate;

use super::{
    question_service::{ERROR_EMPTY_QUESTION_ID, ERROR_QUESTION_NOT_FOUND},
    require_id,
};
use crate::{
    config::ACCESS_CODE_MAX_ATTEMPTS,
    error::AppError,
    models::{
        question::Question,
        quiz::{CreateQuizRequest, NewQuiz, Quiz, UpdateQuizRequest},
    },
    repository::{QuestionRepository, QuizRepository},
    utils::access_code::{generate_access_code, is_well_formed},
};

pub const ERROR_EMPTY_QUIZ_ID: &str = "Quiz Id cannot be empty.";
pub const ERROR_EMPTY_ACCESS_CODE: &str = "Access code cannot be Empty";
pub const ERROR_QUIZ_NOT_FOUND: &str = "Quiz not found";
pub const ERROR_INVALID_ACCESS_CODE: &str = "Quiz not found Check the access code";
pub const ERROR_MARKS_OVERFLOW: &str = "Total marks exceed the supported range";

/// Scores an attempt by position: the i-th answer is checked against the
/// i-th question. An exact index match earns the question's marks, anything
/// else earns nothing.
pub fn calculate_score(questions: &[Question], answers: &[i32]) -> Result<i32, AppError> {
    if answers.len() != questions.len() {
        return Err(AppError::BadRequest(format!(
            "Expected {} answers but received {}",
            questions.len(),
            answers.len()
        )));
    }

    sum_marks(
        questions
            .iter()
            .zip(answers)
            .filter(|(question, answer)| question.correct_option_index == **answer)
            .map(|(question, _)| question.marks),
    )
}

/// Adds marks without wrapping; an overflowing sum is rejected.
fn sum_marks(marks: impl IntoIterator<Item = i32>) -> Result<i32, AppError> {
    marks
        .into_iter()
        .try_fold(0i32, |total, mark| total.checked_add(mark))
        .ok_or_else(|| AppError::BadRequest(ERROR_MARKS_OVERFLOW.to_string()))
}

#[derive(Clone)]
pub struct QuizService {
    quizzes: Arc<dyn QuizRepository>,
    questions: Arc<dyn QuestionRepository>,
}

impl QuizService {
    pub fn new(quizzes: Arc<dyn QuizRepository>, questions: Arc<dyn QuestionRepository>) -> Self {
        Self { quizzes, questions }
    }

    /// Assembles a quiz from existing question ids.
    ///
    /// * Every id must resolve, otherwise nothing is stored.
    /// * `total_marks` is the sum of the resolved questions' marks.
    /// * The quiz starts modifiable with a fresh access code.
    pub async fn create(&self, req: CreateQuizRequest) -> Result<Quiz, AppError> {
        req.validate()?;

        let questions = self.resolve(&req.question_ids).await?;
        let access_code = self.unique_access_code().await?;

        let quiz = self
            .quizzes
            .create(NewQuiz {
                title: req.title,
                question_ids: req.question_ids,
                total_marks: total_marks(&questions)?,
                access_code,
            })
            .await?;
        tracing::info!(
            "Created quiz {} with {} questions, access code {}",
            quiz.id,
            quiz.question_ids.len(),
            quiz.access_code
        );
        Ok(quiz)
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<Quiz>, AppError> {
        let id = require_id(id, ERROR_EMPTY_QUIZ_ID)?;
        self.quizzes.get_by_id(id).await
    }

    pub async fn get_all(&self) -> Result<Vec<Quiz>, AppError> {
        self.quizzes.get_all().await
    }

    pub async fn get_by_access_code(&self, access_code: &str) -> Result<Option<Quiz>, AppError> {
        let access_code = require_id(access_code, ERROR_EMPTY_ACCESS_CODE)?;
        if !is_well_formed(access_code) {
            return Ok(None);
        }
        self.quizzes.get_by_access_code(access_code).await
    }

    /// The quiz's questions in stored order, looked up by id.
    pub async fn questions_of(&self, quiz: &Quiz) -> Result<Vec<Question>, AppError> {
        self.resolve(&quiz.question_ids).await
    }

    /// Freezes a quiz. There is no way back.
    pub async fn lock(&self, id: &str) -> Result<Quiz, AppError> {
        let id = require_id(id, ERROR_EMPTY_QUIZ_ID)?;
        let mut quiz = self
            .quizzes
            .get_by_id(id)
            .await?
            .ok_or(AppError::NotFound(ERROR_QUIZ_NOT_FOUND.to_string()))?;

        quiz.lock();
        let quiz = self.quizzes.update(quiz).await?;
        tracing::info!("Locked quiz {}", quiz.id);
        Ok(quiz)
    }

    /// Updates title and/or question list of a modifiable quiz.
    /// A new question list is resolved and `total_marks` recomputed from it.
    pub async fn update(&self, id: &str, req: UpdateQuizRequest) -> Result<Quiz, AppError> {
        let id = require_id(id, ERROR_EMPTY_QUIZ_ID)?;
        let current = self
            .quizzes
            .get_by_id(id)
            .await?
            .ok_or(AppError::NotFound(ERROR_QUIZ_NOT_FOUND.to_string()))?;

        if let Err(err) = current.ensure_modifiable() {
            tracing::warn!("Rejected update of locked quiz {}", current.id);
            return Err(err);
        }

        let merged = req.merge_into(&current);
        merged.validate()?;

        let total_marks = if merged.question_ids == current.question_ids {
            current.total_marks
        } else {
            total_marks(&self.resolve(&merged.question_ids).await?)?
        };

        let quiz = self
            .quizzes
            .update(Quiz {
                title: merged.title,
                question_ids: merged.question_ids,
                total_marks,
                ..current
            })
            .await?;
        tracing::info!("Updated quiz {}", quiz.id);
        Ok(quiz)
    }

    pub async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let id = require_id(id, ERROR_EMPTY_QUIZ_ID)?;
        let deleted = self.quizzes.delete(id).await?;
        if deleted {
            tracing::info!("Deleted quiz {}", id);
        }
        Ok(deleted)
    }

    /// Scores one attempt at the quiz behind `access_code`.
    ///
    /// The answer count is checked before any question is looked up, so a
    /// mismatched attempt computes nothing.
    pub async fn take_quiz(&self, access_code: &str, answers: &[i32]) -> Result<i32, AppError> {
        let quiz = self
            .get_by_access_code(access_code)
            .await?
            .ok_or(AppError::NotFound(ERROR_INVALID_ACCESS_CODE.to_string()))?;

        if answers.len() != quiz.question_ids.len() {
            return Err(AppError::BadRequest(format!(
                "Expected {} answers but received {}",
                quiz.question_ids.len(),
                answers.len()
            )));
        }

        let questions = self.resolve(&quiz.question_ids).await?;
        let score = calculate_score(&questions, answers)?;
        tracing::info!(
            "Quiz {} taken: {}/{}",
            quiz.access_code,
            score,
            quiz.total_marks
        );
        Ok(score)
    }

    async fn resolve(&self, ids: &[String]) -> Result<Vec<Question>, AppError> {
        let mut questions = Vec::with_capacity(ids.len());
        for id in ids {
            let id = require_id(id, ERROR_EMPTY_QUESTION_ID)?;
            let question = self
                .questions
                .get_by_id(id)
                .await?
                .ok_or_else(|| AppError::NotFound(ERROR_QUESTION_NOT_FOUND.to_string()))?;
            questions.push(question);
        }
        Ok(questions)
    }

    async fn unique_access_code(&self) -> Result<String, AppError> {
        for _ in 0..ACCESS_CODE_MAX_ATTEMPTS {
            let code = generate_access_code();
            if self.quizzes.get_by_access_code(&code).await?.is_none() {
                return Ok(code);
            }
            tracing::warn!("Access code collision on {}, retrying", code);
        }
        Err(AppError::Conflict(
            "Could not generate a unique access code".to_string(),
        ))
    }
}

fn total_marks(questions: &[Question]) -> Result<i32, AppError> {
    sum_marks(questions.iter().map(|q| q.marks))
}
