// src/handlers/users.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    error::AppError,
    models::user::{
        CreateUserRequest, ERROR_USER_NOT_FOUND, LoginRequest, UpdateUserRequest, User,
    },
    services::UserService,
};

/// Creates a user with the given role.
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Invalid username, password or role"),
        (status = 409, description = "Username already exists")
    )
)]
pub async fn create_user(
    State(users): State<UserService>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = users.register(payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Registers a new user. Role defaults to `USER`.
#[utoipa::path(
    post,
    path = "/users/register",
    tag = "users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User registered", body = User),
        (status = 400, description = "Invalid username, password or role"),
        (status = 409, description = "Username already exists")
    )
)]
pub async fn register(
    State(users): State<UserService>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = users.register(payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Checks credentials and returns the matching user.
#[utoipa::path(
    post,
    path = "/users/login",
    tag = "users",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credentials accepted", body = User),
        (status = 401, description = "Invalid username or password")
    )
)]
pub async fn login(
    State(users): State<UserService>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = users.login(payload).await?;
    Ok(Json(user))
}

#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    responses((status = 200, description = "All users", body = [User]))
)]
pub async fn list_users(State(users): State<UserService>) -> Result<impl IntoResponse, AppError> {
    Ok(Json(users.get_all().await?))
}

#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(users): State<UserService>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user = users
        .get_by_id(&id)
        .await?
        .ok_or(AppError::NotFound(ERROR_USER_NOT_FOUND.to_string()))?;

    Ok(Json(user))
}

#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "users",
    params(("id" = String, Path, description = "User id")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = User),
        (status = 404, description = "User not found"),
        (status = 409, description = "Username already exists")
    )
)]
pub async fn update_user(
    State(users): State<UserService>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = users.update(&id, payload).await?;
    Ok(Json(user))
}

#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "users",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    State(users): State<UserService>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if !users.delete(&id).await? {
        return Err(AppError::NotFound(ERROR_USER_NOT_FOUND.to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
