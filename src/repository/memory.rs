// src/repository/memory.rs

//! In-memory backing for the repository traits.
//!
//! One `MemoryStore` is owned by the composition root and shared with the
//! services through `Arc`. Rows keep insertion order.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{QuestionRepository, QuizRepository, UserRepository, new_id};
use crate::{
    error::AppError,
    models::{
        question::{Difficulty, NewQuestion, Question},
        quiz::{NewQuiz, Quiz},
        user::{ERROR_USER_EXISTS, ERROR_USER_NOT_FOUND, NewUser, User},
    },
};

trait Record: Clone + Send + Sync {
    fn id(&self) -> &str;
}

impl Record for User {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Question {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Quiz {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Insertion-ordered rows behind a single lock.
struct Table<T> {
    rows: RwLock<Vec<T>>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
        }
    }
}

impl<T: Record> Table<T> {
    /// Appends `row` unless an existing row satisfies `conflicts`.
    async fn insert_unique<F>(&self, row: T, conflicts: F) -> Result<T, AppError>
    where
        F: Fn(&T) -> Option<String> + Send,
    {
        let mut rows = self.rows.write().await;
        if let Some(message) = rows.iter().find_map(|existing| conflicts(existing)) {
            return Err(AppError::Conflict(message));
        }
        rows.push(row.clone());
        Ok(row)
    }

    async fn find<F>(&self, predicate: F) -> Option<T>
    where
        F: Fn(&T) -> bool + Send,
    {
        self.rows.read().await.iter().find(|row| predicate(row)).cloned()
    }

    async fn filter<F>(&self, predicate: F) -> Vec<T>
    where
        F: Fn(&T) -> bool + Send,
    {
        self.rows
            .read()
            .await
            .iter()
            .filter(|row| predicate(row))
            .cloned()
            .collect()
    }

    async fn get(&self, id: &str) -> Option<T> {
        self.find(|row| row.id() == id).await
    }

    async fn all(&self) -> Vec<T> {
        self.rows.read().await.clone()
    }

    /// Replaces the row with the same id in place.
    async fn replace_unique<F>(&self, row: T, conflicts: F, missing: &str) -> Result<T, AppError>
    where
        F: Fn(&T) -> Option<String> + Send,
    {
        let mut rows = self.rows.write().await;
        let slot = rows
            .iter()
            .position(|existing| existing.id() == row.id())
            .ok_or_else(|| AppError::NotFound(missing.to_string()))?;

        if let Some(message) = rows
            .iter()
            .filter(|existing| existing.id() != row.id())
            .find_map(|existing| conflicts(existing))
        {
            return Err(AppError::Conflict(message));
        }

        rows[slot] = row.clone();
        Ok(row)
    }

    async fn remove(&self, id: &str) -> bool {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|row| row.id() != id);
        rows.len() != before
    }
}

fn no_conflict<T>(_: &T) -> Option<String> {
    None
}

#[derive(Default)]
pub struct MemoryStore {
    users: Table<User>,
    questions: Table<Question>,
    quizzes: Table<Quiz>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn username_taken(username: &str) -> impl Fn(&User) -> Option<String> + Send + '_ {
    move |existing: &User| {
        (existing.username == username).then(|| ERROR_USER_EXISTS.to_string())
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, user: NewUser) -> Result<User, AppError> {
        let row = User {
            id: new_id(),
            username: user.username,
            password: user.password,
            role: user.role,
            created_at: Utc::now(),
        };
        let username = row.username.clone();
        self.users.insert_unique(row, username_taken(&username)).await
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        Ok(self.users.get(id).await)
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        Ok(self.users.find(|user| user.username == username).await)
    }

    async fn get_all(&self) -> Result<Vec<User>, AppError> {
        Ok(self.users.all().await)
    }

    async fn update(&self, user: User) -> Result<User, AppError> {
        let username = user.username.clone();
        self.users
            .replace_unique(user, username_taken(&username), ERROR_USER_NOT_FOUND)
            .await
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        Ok(self.users.remove(id).await)
    }
}

#[async_trait]
impl QuestionRepository for MemoryStore {
    async fn create(&self, question: NewQuestion) -> Result<Question, AppError> {
        let row = Question {
            id: new_id(),
            title: question.title,
            options: question.options,
            correct_option_index: question.correct_option_index,
            difficulty: question.difficulty,
            topics: question.topics,
            marks: question.marks,
            created_at: Utc::now(),
        };
        self.questions.insert_unique(row, no_conflict).await
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Question>, AppError> {
        Ok(self.questions.get(id).await)
    }

    async fn get_all(&self) -> Result<Vec<Question>, AppError> {
        Ok(self.questions.all().await)
    }

    async fn update(&self, question: Question) -> Result<Question, AppError> {
        self.questions
            .replace_unique(question, no_conflict, "Question not found")
            .await
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        Ok(self.questions.remove(id).await)
    }

    async fn get_by_difficulty(&self, difficulty: Difficulty) -> Result<Vec<Question>, AppError> {
        Ok(self.questions.filter(|q| q.difficulty == difficulty).await)
    }

    async fn get_by_topic(&self, topic: &str) -> Result<Vec<Question>, AppError> {
        Ok(self
            .questions
            .filter(|q| q.topics.iter().any(|t| t == topic))
            .await)
    }
}

#[async_trait]
impl QuizRepository for MemoryStore {
    async fn create(&self, quiz: NewQuiz) -> Result<Quiz, AppError> {
        let row = Quiz {
            id: new_id(),
            title: quiz.title,
            question_ids: quiz.question_ids,
            total_marks: quiz.total_marks,
            access_code: quiz.access_code,
            modifiable: true,
            created_at: Utc::now(),
        };
        let code = row.access_code.clone();
        self.quizzes
            .insert_unique(row, |existing: &Quiz| {
                (existing.access_code == code).then(|| "Access code already in use".to_string())
            })
            .await
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Quiz>, AppError> {
        Ok(self.quizzes.get(id).await)
    }

    async fn get_all(&self) -> Result<Vec<Quiz>, AppError> {
        Ok(self.quizzes.all().await)
    }

    async fn update(&self, quiz: Quiz) -> Result<Quiz, AppError> {
        self.quizzes
            .replace_unique(quiz, no_conflict, "Quiz not found")
            .await
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        Ok(self.quizzes.remove(id).await)
    }

    async fn get_by_access_code(&self, access_code: &str) -> Result<Option<Quiz>, AppError> {
        Ok(self
            .quizzes
            .find(|quiz| quiz.access_code == access_code)
            .await)
    }
}
