// src/repository/mod.rs

//! Persistence contracts, one trait per entity.
//!
//! Identifiers are assigned by `create`, never by the caller. `update` is
//! strict: it fails with `NotFound` when the id is not stored.

use async_trait::async_trait;

use crate::{
    error::AppError,
    models::{
        question::{Difficulty, NewQuestion, Question},
        quiz::{NewQuiz, Quiz},
        user::{NewUser, User},
    },
};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: NewUser) -> Result<User, AppError>;
    async fn get_by_id(&self, id: &str) -> Result<Option<User>, AppError>;
    async fn get_by_username(&self, username: &str) -> Result<Option<User>, AppError>;
    async fn get_all(&self) -> Result<Vec<User>, AppError>;
    async fn update(&self, user: User) -> Result<User, AppError>;
    async fn delete(&self, id: &str) -> Result<bool, AppError>;
}

#[async_trait]
pub trait QuestionRepository: Send + Sync {
    async fn create(&self, question: NewQuestion) -> Result<Question, AppError>;
    async fn get_by_id(&self, id: &str) -> Result<Option<Question>, AppError>;
    async fn get_all(&self) -> Result<Vec<Question>, AppError>;
    async fn update(&self, question: Question) -> Result<Question, AppError>;
    async fn delete(&self, id: &str) -> Result<bool, AppError>;
    async fn get_by_difficulty(&self, difficulty: Difficulty) -> Result<Vec<Question>, AppError>;
    /// Questions whose topic list contains `topic` exactly.
    async fn get_by_topic(&self, topic: &str) -> Result<Vec<Question>, AppError>;
}

#[async_trait]
pub trait QuizRepository: Send + Sync {
    async fn create(&self, quiz: NewQuiz) -> Result<Quiz, AppError>;
    async fn get_by_id(&self, id: &str) -> Result<Option<Quiz>, AppError>;
    async fn get_all(&self) -> Result<Vec<Quiz>, AppError>;
    async fn update(&self, quiz: Quiz) -> Result<Quiz, AppError>;
    async fn delete(&self, id: &str) -> Result<bool, AppError>;
    async fn get_by_access_code(&self, access_code: &str) -> Result<Option<Quiz>, AppError>;
}

pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
