// src/repository/postgres.rs

//! Postgres backing for the repository traits.
//!
//! Option, topic and question-id lists are stored as JSONB arrays.
//! Schema lives in `migrations/`.

use async_trait::async_trait;
use sqlx::{FromRow, PgPool, types::Json};

use super::{QuestionRepository, QuizRepository, UserRepository, new_id};
use crate::{
    error::AppError,
    models::{
        question::{Difficulty, NewQuestion, Question},
        quiz::{NewQuiz, Quiz},
        user::{ERROR_USER_EXISTS, ERROR_USER_NOT_FOUND, NewUser, Role, User},
    },
};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Rewrites a unique-constraint `Conflict` into a readable message.
fn conflict_as(message: &'static str) -> impl Fn(sqlx::Error) -> AppError {
    move |e| match AppError::from(e) {
        AppError::Conflict(_) => AppError::Conflict(message.to_string()),
        other => {
            tracing::error!("Database error: {}", other);
            other
        }
    }
}

/// Logs and converts a storage failure.
fn db_error(e: sqlx::Error) -> AppError {
    tracing::error!("Database error: {:?}", e);
    AppError::from(e)
}

/// Helper struct for reading the 'users' table.
#[derive(FromRow)]
struct UserRow {
    id: String,
    username: String,
    password: String,
    role: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = AppError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role = row.role.parse::<Role>().map_err(|_| {
            AppError::InternalServerError(format!("Stored role '{}' is not valid", row.role))
        })?;

        Ok(User {
            id: row.id,
            username: row.username,
            password: row.password,
            role,
            created_at: row.created_at,
        })
    }
}

/// Helper struct for reading the 'questions' table.
#[derive(FromRow)]
struct QuestionRow {
    id: String,
    title: String,
    options: Json<Vec<String>>,
    correct_option_index: i32,
    difficulty: String,
    topics: Json<Vec<String>>,
    marks: i32,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl TryFrom<QuestionRow> for Question {
    type Error = AppError;

    fn try_from(row: QuestionRow) -> Result<Self, Self::Error> {
        let difficulty = row.difficulty.parse::<Difficulty>().map_err(|_| {
            AppError::InternalServerError(format!(
                "Stored difficulty '{}' is not valid",
                row.difficulty
            ))
        })?;

        Ok(Question {
            id: row.id,
            title: row.title,
            options: row.options.0,
            correct_option_index: row.correct_option_index,
            difficulty,
            topics: row.topics.0,
            marks: row.marks,
            created_at: row.created_at,
        })
    }
}

/// Helper struct for reading the 'quizzes' table.
#[derive(FromRow)]
struct QuizRow {
    id: String,
    title: String,
    question_ids: Json<Vec<String>>,
    total_marks: i32,
    access_code: String,
    modifiable: bool,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<QuizRow> for Quiz {
    fn from(row: QuizRow) -> Self {
        Quiz {
            id: row.id,
            title: row.title,
            question_ids: row.question_ids.0,
            total_marks: row.total_marks,
            access_code: row.access_code,
            modifiable: row.modifiable,
            created_at: row.created_at,
        }
    }
}

fn collect<R, T>(rows: Vec<R>) -> Result<Vec<T>, AppError>
where
    T: TryFrom<R, Error = AppError>,
{
    rows.into_iter().map(T::try_from).collect()
}

#[async_trait]
impl UserRepository for PgStore {
    async fn create(&self, user: NewUser) -> Result<User, AppError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (id, username, password, role)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, password, role, created_at
            "#,
        )
        .bind(new_id())
        .bind(&user.username)
        .bind(&user.password)
        .bind(user.role.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(conflict_as(ERROR_USER_EXISTS))?;

        User::try_from(row)
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, UserRow>(
            "SELECT id, username, password, role, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?
        .map(User::try_from)
        .transpose()
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, UserRow>(
            "SELECT id, username, password, role, created_at FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?
        .map(User::try_from)
        .transpose()
    }

    async fn get_all(&self) -> Result<Vec<User>, AppError> {
        let rows = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, password, role, created_at FROM users ORDER BY created_at, id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        collect(rows)
    }

    async fn update(&self, user: User) -> Result<User, AppError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users SET username = $2, password = $3, role = $4
            WHERE id = $1
            RETURNING id, username, password, role, created_at
            "#,
        )
        .bind(&user.id)
        .bind(&user.username)
        .bind(&user.password)
        .bind(user.role.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(conflict_as(ERROR_USER_EXISTS))?
        .ok_or(AppError::NotFound(ERROR_USER_NOT_FOUND.to_string()))?;

        User::try_from(row)
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl QuestionRepository for PgStore {
    async fn create(&self, question: NewQuestion) -> Result<Question, AppError> {
        let row = sqlx::query_as::<_, QuestionRow>(
            r#"
            INSERT INTO questions
            (id, title, options, correct_option_index, difficulty, topics, marks)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, title, options, correct_option_index, difficulty, topics, marks, created_at
            "#,
        )
        .bind(new_id())
        .bind(&question.title)
        .bind(Json(&question.options))
        .bind(question.correct_option_index)
        .bind(question.difficulty.as_str())
        .bind(Json(&question.topics))
        .bind(question.marks)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error)?;

        Question::try_from(row)
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Question>, AppError> {
        sqlx::query_as::<_, QuestionRow>(
            r#"
            SELECT id, title, options, correct_option_index, difficulty, topics, marks, created_at
            FROM questions
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?
        .map(Question::try_from)
        .transpose()
    }

    async fn get_all(&self) -> Result<Vec<Question>, AppError> {
        let rows = sqlx::query_as::<_, QuestionRow>(
            r#"
            SELECT id, title, options, correct_option_index, difficulty, topics, marks, created_at
            FROM questions
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        collect(rows)
    }

    async fn update(&self, question: Question) -> Result<Question, AppError> {
        let row = sqlx::query_as::<_, QuestionRow>(
            r#"
            UPDATE questions
            SET title = $2, options = $3, correct_option_index = $4,
                difficulty = $5, topics = $6, marks = $7
            WHERE id = $1
            RETURNING id, title, options, correct_option_index, difficulty, topics, marks, created_at
            "#,
        )
        .bind(&question.id)
        .bind(&question.title)
        .bind(Json(&question.options))
        .bind(question.correct_option_index)
        .bind(question.difficulty.as_str())
        .bind(Json(&question.topics))
        .bind(question.marks)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?
        .ok_or(AppError::NotFound("Question not found".to_string()))?;

        Question::try_from(row)
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn get_by_difficulty(&self, difficulty: Difficulty) -> Result<Vec<Question>, AppError> {
        let rows = sqlx::query_as::<_, QuestionRow>(
            r#"
            SELECT id, title, options, correct_option_index, difficulty, topics, marks, created_at
            FROM questions
            WHERE difficulty = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(difficulty.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        collect(rows)
    }

    async fn get_by_topic(&self, topic: &str) -> Result<Vec<Question>, AppError> {
        let rows = sqlx::query_as::<_, QuestionRow>(
            r#"
            SELECT id, title, options, correct_option_index, difficulty, topics, marks, created_at
            FROM questions
            WHERE topics @> jsonb_build_array($1::TEXT)
            ORDER BY created_at, id
            "#,
        )
        .bind(topic)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        collect(rows)
    }
}

#[async_trait]
impl QuizRepository for PgStore {
    async fn create(&self, quiz: NewQuiz) -> Result<Quiz, AppError> {
        let row = sqlx::query_as::<_, QuizRow>(
            r#"
            INSERT INTO quizzes (id, title, question_ids, total_marks, access_code, modifiable)
            VALUES ($1, $2, $3, $4, $5, TRUE)
            RETURNING id, title, question_ids, total_marks, access_code, modifiable, created_at
            "#,
        )
        .bind(new_id())
        .bind(&quiz.title)
        .bind(Json(&quiz.question_ids))
        .bind(quiz.total_marks)
        .bind(&quiz.access_code)
        .fetch_one(&self.pool)
        .await
        .map_err(conflict_as("Access code already in use"))?;

        Ok(Quiz::from(row))
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Quiz>, AppError> {
        let row = sqlx::query_as::<_, QuizRow>(
            r#"
            SELECT id, title, question_ids, total_marks, access_code, modifiable, created_at
            FROM quizzes
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(row.map(Quiz::from))
    }

    async fn get_all(&self) -> Result<Vec<Quiz>, AppError> {
        let rows = sqlx::query_as::<_, QuizRow>(
            r#"
            SELECT id, title, question_ids, total_marks, access_code, modifiable, created_at
            FROM quizzes
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(rows.into_iter().map(Quiz::from).collect())
    }

    async fn update(&self, quiz: Quiz) -> Result<Quiz, AppError> {
        let row = sqlx::query_as::<_, QuizRow>(
            r#"
            UPDATE quizzes
            SET title = $2, question_ids = $3, total_marks = $4, modifiable = $5
            WHERE id = $1
            RETURNING id, title, question_ids, total_marks, access_code, modifiable, created_at
            "#,
        )
        .bind(&quiz.id)
        .bind(&quiz.title)
        .bind(Json(&quiz.question_ids))
        .bind(quiz.total_marks)
        .bind(quiz.modifiable)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?
        .ok_or(AppError::NotFound("Quiz not found".to_string()))?;

        Ok(Quiz::from(row))
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM quizzes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn get_by_access_code(&self, access_code: &str) -> Result<Option<Quiz>, AppError> {
        let row = sqlx::query_as::<_, QuizRow>(
            r#"
            SELECT id, title, question_ids, total_marks, access_code, modifiable, created_at
            FROM quizzes
            WHERE access_code = $1
            "#,
        )
        .bind(access_code)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(row.map(Quiz::from))
    }
}
