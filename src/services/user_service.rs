use std::sync::Arc;

use validator::Validate;

use super::require_id;
use crate::{
    error::AppError,
    models::user::{
        CreateUserRequest, ERROR_EMPTY_USERNAME, ERROR_USER_NOT_FOUND, LoginRequest,
        UpdateUserRequest, User,
    },
    repository::UserRepository,
};

pub const ERROR_EMPTY_USER_ID: &str = "User ID cannot be empty";
pub use crate::models::user::ERROR_USER_EXISTS;
pub const ERROR_INVALID_CREDENTIALS: &str = "Invalid username or password";

#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    /// Registers a new user.
    ///
    /// Fails with `Conflict` when the username is taken and with
    /// `InvalidRole` when the role is not exactly `ADMIN` or `USER`.
    pub async fn register(&self, req: CreateUserRequest) -> Result<User, AppError> {
        let new_user = req.into_new_user()?;

        if self.repo.get_by_username(&new_user.username).await?.is_some() {
            tracing::warn!("Registration rejected, username taken: {}", new_user.username);
            return Err(AppError::Conflict(ERROR_USER_EXISTS.to_string()));
        }

        let user = self.repo.create(new_user).await?;
        tracing::info!("Registered user {} ({})", user.username, user.role.as_str());
        Ok(user)
    }

    /// Checks credentials verbatim. Any mismatch is an `AuthError`.
    pub async fn login(&self, req: LoginRequest) -> Result<User, AppError> {
        req.validate()?;

        match self.repo.get_by_username(&req.username).await? {
            Some(user) if user.password == req.password => {
                tracing::info!("User {} logged in", user.username);
                Ok(user)
            }
            _ => {
                tracing::warn!("Login failed for username: {}", req.username);
                Err(AppError::AuthError(ERROR_INVALID_CREDENTIALS.to_string()))
            }
        }
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        let id = require_id(id, ERROR_EMPTY_USER_ID)?;
        self.repo.get_by_id(id).await
    }

    pub async fn get_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let username = require_id(username, ERROR_EMPTY_USERNAME)?;
        self.repo.get_by_username(username).await
    }

    pub async fn get_all(&self) -> Result<Vec<User>, AppError> {
        self.repo.get_all().await
    }

    /// Applies a partial update. The merged user is validated like a new one.
    pub async fn update(&self, id: &str, req: UpdateUserRequest) -> Result<User, AppError> {
        let id = require_id(id, ERROR_EMPTY_USER_ID)?;
        let current = self
            .repo
            .get_by_id(id)
            .await?
            .ok_or(AppError::NotFound(ERROR_USER_NOT_FOUND.to_string()))?;

        let merged = req.merge_into(&current).into_new_user()?;

        if merged.username != current.username
            && let Some(other) = self.repo.get_by_username(&merged.username).await?
            && other.id != current.id
        {
            return Err(AppError::Conflict(ERROR_USER_EXISTS.to_string()));
        }

        let user = self
            .repo
            .update(User {
                id: current.id,
                username: merged.username,
                password: merged.password,
                role: merged.role,
                created_at: current.created_at,
            })
            .await?;
        tracing::info!("Updated user {}", user.id);
        Ok(user)
    }

    pub async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let id = require_id(id, ERROR_EMPTY_USER_ID)?;
        let deleted = self.repo.delete(id).await?;
        if deleted {
            tracing::info!("Deleted user {}", id);
        }
        Ok(deleted)
    }
}
