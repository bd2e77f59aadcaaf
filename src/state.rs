use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::PgPool;

use crate::{
    config::Config,
    repository::{MemoryStore, PgStore},
    services::{QuestionService, QuizService, UserService},
};

/// Composition root: owns the store and the services wired to it.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub users: UserService,
    pub questions: QuestionService,
    pub quizzes: QuizService,
}

impl AppState {
    /// Services backed by a fresh in-memory store.
    pub fn in_memory(config: Config) -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            config,
            users: UserService::new(store.clone()),
            questions: QuestionService::new(store.clone()),
            quizzes: QuizService::new(store.clone(), store),
        }
    }

    /// Services backed by Postgres.
    pub fn postgres(config: Config, pool: PgPool) -> Self {
        let store = Arc::new(PgStore::new(pool));
        Self {
            config,
            users: UserService::new(store.clone()),
            questions: QuestionService::new(store.clone()),
            quizzes: QuizService::new(store.clone(), store),
        }
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for UserService {
    fn from_ref(state: &AppState) -> Self {
        state.users.clone()
    }
}

impl FromRef<AppState> for QuestionService {
    fn from_ref(state: &AppState) -> Self {
        state.questions.clone()
    }
}

impl FromRef<AppState> for QuizService {
    fn from_ref(state: &AppState) -> Self {
        state.quizzes.clone()
    }
}
