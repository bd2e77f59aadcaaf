// src/handlers/questions.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    error::AppError,
    models::question::{CreateQuestionRequest, Question, UpdateQuestionRequest},
    services::{QuestionService, question_service::ERROR_QUESTION_NOT_FOUND},
};

/// Creates a new quiz question.
#[utoipa::path(
    post,
    path = "/questions",
    tag = "questions",
    request_body = CreateQuestionRequest,
    responses(
        (status = 201, description = "Question created", body = Question),
        (status = 400, description = "A field rule was violated")
    )
)]
pub async fn create_question(
    State(questions): State<QuestionService>,
    Json(payload): Json<CreateQuestionRequest>,
) -> Result<impl IntoResponse, AppError> {
    let question = questions.create(payload).await?;
    Ok((StatusCode::CREATED, Json(question)))
}

#[utoipa::path(
    get,
    path = "/questions",
    tag = "questions",
    responses((status = 200, description = "All questions", body = [Question]))
)]
pub async fn list_questions(
    State(questions): State<QuestionService>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(questions.get_all().await?))
}

#[utoipa::path(
    get,
    path = "/questions/{id}",
    tag = "questions",
    params(("id" = String, Path, description = "Question id")),
    responses(
        (status = 200, description = "Question found", body = Question),
        (status = 404, description = "Question not found")
    )
)]
pub async fn get_question(
    State(questions): State<QuestionService>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let question = questions
        .get_by_id(&id)
        .await?
        .ok_or(AppError::NotFound(ERROR_QUESTION_NOT_FOUND.to_string()))?;

    Ok(Json(question))
}

/// Updates a question by ID. Absent fields keep their stored value.
#[utoipa::path(
    put,
    path = "/questions/{id}",
    tag = "questions",
    params(("id" = String, Path, description = "Question id")),
    request_body = UpdateQuestionRequest,
    responses(
        (status = 200, description = "Question updated", body = Question),
        (status = 400, description = "A field rule was violated"),
        (status = 404, description = "Question not found")
    )
)]
pub async fn update_question(
    State(questions): State<QuestionService>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateQuestionRequest>,
) -> Result<impl IntoResponse, AppError> {
    let question = questions.update(&id, payload).await?;
    Ok(Json(question))
}

#[utoipa::path(
    delete,
    path = "/questions/{id}",
    tag = "questions",
    params(("id" = String, Path, description = "Question id")),
    responses(
        (status = 204, description = "Question deleted"),
        (status = 404, description = "Question not found")
    )
)]
pub async fn delete_question(
    State(questions): State<QuestionService>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if !questions.delete(&id).await? {
        return Err(AppError::NotFound(ERROR_QUESTION_NOT_FOUND.to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Lists questions of one difficulty (EASY, MEDIUM or HARD, any case).
#[utoipa::path(
    get,
    path = "/questions/difficulty/{difficulty}",
    tag = "questions",
    params(("difficulty" = String, Path, description = "EASY, MEDIUM or HARD")),
    responses(
        (status = 200, description = "Matching questions", body = [Question]),
        (status = 400, description = "Difficulty is not valid")
    )
)]
pub async fn list_by_difficulty(
    State(questions): State<QuestionService>,
    Path(difficulty): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(questions.get_by_difficulty(&difficulty).await?))
}

/// Lists questions tagged with a topic.
#[utoipa::path(
    get,
    path = "/questions/topic/{topic}",
    tag = "questions",
    params(("topic" = String, Path, description = "Exact topic name")),
    responses((status = 200, description = "Matching questions", body = [Question]))
)]
pub async fn list_by_topic(
    State(questions): State<QuestionService>,
    Path(topic): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(questions.get_by_topic(&topic).await?))
}
