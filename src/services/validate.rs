//! 提交前的内容校验

use super::config::ComposerConfig;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty,
    TooShort { min: usize },
    TooLong { max: usize },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Empty => write!(f, "message content is required"),
            ValidationError::TooShort { min } => {
                write!(f, "message must be at least {} characters", min)
            }
            ValidationError::TooLong { max } => {
                write!(f, "message exceeds character limit of {}", max)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// The trimmed text must be non-empty and reach `min_length`; the raw text
/// must not exceed `max_length`. Lengths count chars of canonical text.
pub fn validate_content(text: &str, config: &ComposerConfig) -> Result<(), ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty);
    }
    if trimmed.chars().count() < config.min_length {
        return Err(ValidationError::TooShort {
            min: config.min_length,
        });
    }
    if text.chars().count() > config.max_length {
        return Err(ValidationError::TooLong {
            max: config.max_length,
        });
    }
    Ok(())
}

/// Chars left before `max_length`; negative when over the limit.
pub fn remaining_chars(text: &str, config: &ComposerConfig) -> i64 {
    config.max_length as i64 - text.chars().count() as i64
}

#[cfg(test)]
#[path = "../../tests/unit/services/validate.rs"]
mod tests;
