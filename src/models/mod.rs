// src/models/mod.rs

use std::borrow::Cow;

use validator::ValidationError;

pub mod question;
pub mod quiz;
pub mod user;

/// Builds a rule failure that carries its own user-facing message.
pub(crate) fn rule_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
