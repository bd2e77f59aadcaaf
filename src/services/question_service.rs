use std::sync::Arc;

use super::require_id;
use crate::{
    error::AppError,
    models::question::{CreateQuestionRequest, Difficulty, Question, UpdateQuestionRequest},
    repository::QuestionRepository,
};

pub const ERROR_EMPTY_QUESTION_ID: &str = "Question Id cannot be empty or null.";
pub const ERROR_QUESTION_NOT_FOUND: &str = "Question not found";

#[derive(Clone)]
pub struct QuestionService {
    repo: Arc<dyn QuestionRepository>,
}

impl QuestionService {
    pub fn new(repo: Arc<dyn QuestionRepository>) -> Self {
        Self { repo }
    }

    pub async fn create(&self, req: CreateQuestionRequest) -> Result<Question, AppError> {
        let new_question = req.into_new_question()?;
        let question = self.repo.create(new_question).await?;
        tracing::info!("Created question {}: {}", question.id, question.title);
        Ok(question)
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<Question>, AppError> {
        let id = require_id(id, ERROR_EMPTY_QUESTION_ID)?;
        self.repo.get_by_id(id).await
    }

    pub async fn get_all(&self) -> Result<Vec<Question>, AppError> {
        self.repo.get_all().await
    }

    /// Applies a partial update to an existing question and re-validates it.
    pub async fn update(&self, id: &str, req: UpdateQuestionRequest) -> Result<Question, AppError> {
        let id = require_id(id, ERROR_EMPTY_QUESTION_ID)?;
        let current = self
            .repo
            .get_by_id(id)
            .await?
            .ok_or(AppError::NotFound(ERROR_QUESTION_NOT_FOUND.to_string()))?;

        let merged = req.merge_into(&current).into_new_question()?;

        let question = self
            .repo
            .update(Question {
                id: current.id,
                title: merged.title,
                options: merged.options,
                correct_option_index: merged.correct_option_index,
                difficulty: merged.difficulty,
                topics: merged.topics,
                marks: merged.marks,
                created_at: current.created_at,
            })
            .await?;
        tracing::info!("Updated question {}", question.id);
        Ok(question)
    }

    pub async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let id = require_id(id, ERROR_EMPTY_QUESTION_ID)?;
        let deleted = self.repo.delete(id).await?;
        if deleted {
            tracing::info!("Deleted question {}", id);
        }
        Ok(deleted)
    }

    /// `difficulty` is matched case-insensitively; unknown values are a `BadRequest`.
    pub async fn get_by_difficulty(&self, difficulty: &str) -> Result<Vec<Question>, AppError> {
        let difficulty = difficulty.parse::<Difficulty>()?;
        self.repo.get_by_difficulty(difficulty).await
    }

    pub async fn get_by_topic(&self, topic: &str) -> Result<Vec<Question>, AppError> {
        let topic = require_id(topic, "Topic cannot be empty")?;
        self.repo.get_by_topic(topic).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MemoryStore;

    fn service() -> QuestionService {
        QuestionService::new(Arc::new(MemoryStore::new()))
    }

    fn req(title: &str, difficulty: &str, topics: &[&str]) -> CreateQuestionRequest {
        CreateQuestionRequest {
            title: title.to_string(),
            options: vec!["yes".to_string(), "no".to_string()],
            correct_option_index: 0,
            difficulty: difficulty.to_string(),
            topics: topics.iter().map(|t| t.to_string()).collect(),
            marks: 1,
        }
    }

    #[tokio::test]
    async fn test_create_generates_unique_ids() {
        let questions = service();
        let a = questions.create(req("a", "EASY", &["x"])).await.unwrap();
        let b = questions.create(req("b", "easy", &["x"])).await.unwrap();

        assert!(!a.id.is_empty());
        assert_ne!(a.id, b.id);
        assert_eq!(b.difficulty, Difficulty::Easy);
    }

    #[tokio::test]
    async fn test_rejected_question_is_not_stored() {
        let questions = service();
        let mut bad = req("bad", "EASY", &["x"]);
        bad.marks = -5;

        let err = questions.create(bad).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
        assert!(questions.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_keeps_unspecified_fields() {
        let questions = service();
        let q = questions.create(req("old", "MEDIUM", &["x"])).await.unwrap();

        let updated = questions
            .update(
                &q.id,
                UpdateQuestionRequest {
                    title: Some("new".to_string()),
                    marks: Some(4),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.id, q.id);
        assert_eq!(updated.title, "new");
        assert_eq!(updated.marks, 4);
        assert_eq!(updated.options, q.options);
        assert_eq!(updated.difficulty, Difficulty::Medium);
    }

    #[tokio::test]
    async fn test_update_missing_question() {
        let questions = service();
        let err = questions
            .update("nope", UpdateQuestionRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err, AppError::NotFound(ERROR_QUESTION_NOT_FOUND.to_string()));
    }

    #[tokio::test]
    async fn test_filters() {
        let questions = service();
        questions.create(req("a", "EASY", &["rust"])).await.unwrap();
        questions.create(req("b", "HARD", &["rust", "async"])).await.unwrap();

        assert_eq!(questions.get_by_difficulty("hard").await.unwrap().len(), 1);
        assert_eq!(questions.get_by_topic("rust").await.unwrap().len(), 2);
        assert_eq!(questions.get_by_topic("async").await.unwrap().len(), 1);
        assert!(questions.get_by_difficulty("brutal").await.is_err());
    }
}
