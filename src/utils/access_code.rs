use uuid::Uuid;

use crate::config::ACCESS_CODE_LENGTH;

/// Generates a quiz access code: the leading characters of a random UUID, upper-cased.
///
/// The result is always `ACCESS_CODE_LENGTH` characters from `[0-9A-F]`.
/// Uniqueness is not guaranteed here; callers check against stored quizzes.
pub fn generate_access_code() -> String {
    Uuid::new_v4().simple().to_string()[..ACCESS_CODE_LENGTH].to_uppercase()
}

/// Whether `code` has the shape of a generated access code.
pub fn is_well_formed(code: &str) -> bool {
    code.len() == ACCESS_CODE_LENGTH
        && code
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase())
}
