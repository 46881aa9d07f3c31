//! Payload field checks. Failures become 400 responses.

use crate::{AppError, AppResult};

pub const NAME_MAX_LEN: usize = 25;
pub const TEXT_MAX_LEN: usize = 1024;

pub fn required<T>(field: &str, value: Option<T>) -> AppResult<T> {
    value.ok_or_else(|| AppError::Validation(format!("{field}: This field is required.")))
}

/// Trimmed, non-blank string of at most `max_len` characters.
pub fn char_field(field: &str, value: Option<String>, max_len: usize) -> AppResult<String> {
    let value = required(field, value)?;
    let value = value.trim();

    if value.is_empty() {
        return Err(AppError::Validation(format!("{field}: This field may not be blank.")));
    }
    if value.chars().count() > max_len {
        return Err(AppError::Validation(format!(
            "{field}: Ensure this field has no more than {max_len} characters."
        )));
    }

    Ok(value.to_owned())
}
