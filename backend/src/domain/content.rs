//! Validated user-supplied text fields.

/// Validation errors for free-text fields such as titles and bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ContentValidationError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
}

impl ContentValidationError {
    /// Name of the offending field, as exposed to clients.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::Empty { field } | Self::TooLong { field, .. } => field,
        }
    }
}

/// Trim `raw` and check it is non-empty and at most `max` characters.
pub(crate) fn required_text(
    raw: &str,
    field: &'static str,
    max: usize,
) -> Result<String, ContentValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ContentValidationError::Empty { field });
    }
    if trimmed.chars().count() > max {
        return Err(ContentValidationError::TooLong { field, max });
    }
    Ok(trimmed.to_owned())
}
