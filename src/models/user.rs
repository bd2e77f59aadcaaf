// src/models/user.rs

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    error::AppError,
    models::{is_blank, rule_error},
};

pub const ERROR_INVALID_ROLE: &str = "Invalid role. Must be either ADMIN or USER";
pub const ERROR_EMPTY_USERNAME: &str = "Username cannot be empty";
pub const ERROR_USER_EXISTS: &str = "Username already exists";
pub const ERROR_USER_NOT_FOUND: &str = "User not found";

/// Closed set of roles. Authorization is decided by role alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::User => "USER",
        }
    }
}

/// Exact, case-sensitive match on `ADMIN` / `USER`.
impl FromStr for Role {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Role::Admin),
            "USER" => Ok(Role::User),
            _ => Err(AppError::InvalidRole(ERROR_INVALID_ROLE.to_string())),
        }
    }
}

/// A registered account.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct User {
    pub id: String,

    /// Unique username.
    pub username: String,

    /// Stored exactly as supplied and compared verbatim on login.
    /// Skipped during serialization to prevent leaking it.
    #[serde(skip)]
    pub password: String,

    pub role: Role,

    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Validated user data handed to a repository; the repository assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub role: Role,
}

fn default_role() -> String {
    Role::User.as_str().to_string()
}

fn validate_username(username: &str) -> Result<(), validator::ValidationError> {
    if is_blank(username) {
        return Err(rule_error("empty_username", ERROR_EMPTY_USERNAME));
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<(), validator::ValidationError> {
    if is_blank(password) {
        return Err(rule_error("empty_password", "Password cannot be empty"));
    }
    Ok(())
}

/// DTO for creating a user (registration or admin creation).
/// A missing role registers a plain `USER`.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[serde(default)]
    #[validate(custom(function = validate_username))]
    pub username: String,
    #[serde(default)]
    #[validate(custom(function = validate_password))]
    pub password: String,
    #[serde(default = "default_role")]
    pub role: String,
}

impl CreateUserRequest {
    /// Runs the field rules, then the role check, and yields storable data.
    pub fn into_new_user(self) -> Result<NewUser, AppError> {
        self.validate()?;
        let role = self.role.parse::<Role>()?;

        Ok(NewUser {
            username: self.username,
            password: self.password,
            role,
        })
    }
}

/// DTO for updating a user. Fields are optional.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

impl UpdateUserRequest {
    /// Overlays the present fields on the stored user.
    pub fn merge_into(self, current: &User) -> CreateUserRequest {
        CreateUserRequest {
            username: self.username.unwrap_or_else(|| current.username.clone()),
            password: self.password.unwrap_or_else(|| current.password.clone()),
            role: self.role.unwrap_or_else(|| current.role.as_str().to_string()),
        }
    }
}

/// DTO for user login.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(custom(function = validate_username))]
    pub username: String,
    #[serde(default)]
    #[validate(custom(function = validate_password))]
    pub password: String,
}
