//! Shared validation helpers for inbound HTTP adapters.
//!
//! Domain constructors report what went wrong; these helpers translate those
//! failures into `invalid_request` errors whose `details` name the offending
//! request field and a stable code.

use serde_json::json;

use crate::domain::{
    ContentValidationError, Error, IdValidationError, Page, PageValidationError,
    UserValidationError,
};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    EmptyField,
    FieldTooLong,
    InvalidId,
    InvalidUsername,
    InvalidPage,
}

impl ErrorCode {
    const fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::EmptyField => "empty_field",
            Self::FieldTooLong => "field_too_long",
            Self::InvalidId => "invalid_id",
            Self::InvalidUsername => "invalid_username",
            Self::InvalidPage => "invalid_page",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    const fn as_str(self) -> &'static str {
        self.0
    }
}

/// Builder for validation errors with field context.
struct ValidationError {
    field: String,
    message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }

    fn with_value(self, code: ErrorCode, value: impl Into<serde_json::Value>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("missing required field: {field}"))
        .with_code(ErrorCode::MissingField)
}

/// Map a text validation failure; the domain error already names its field.
pub(crate) fn content_error(err: ContentValidationError) -> Error {
    let code = match err {
        ContentValidationError::Empty { .. } => ErrorCode::EmptyField,
        ContentValidationError::TooLong { .. } => ErrorCode::FieldTooLong,
    };
    ValidationError::new(err.field(), err.to_string()).with_code(code)
}

pub(crate) fn username_error(err: &UserValidationError) -> Error {
    ValidationError::new("username", err.to_string()).with_code(ErrorCode::InvalidUsername)
}

pub(crate) fn page_error(err: PageValidationError) -> Error {
    ValidationError::new("limit", err.to_string()).with_code(ErrorCode::InvalidPage)
}

/// Validate a raw path or body identifier into one of the typed ids.
///
/// # Examples
/// ```ignore
/// let post_id: PostId = parse_id(path.into_inner(), FieldName::new("id"))?;
/// ```
pub(crate) fn parse_id<T>(raw: i64, field: FieldName) -> Result<T, Error>
where
    T: TryFrom<i64, Error = IdValidationError>,
{
    T::try_from(raw).map_err(|err| {
        ValidationError::new(field.as_str(), err.to_string()).with_value(ErrorCode::InvalidId, raw)
    })
}

pub(crate) fn parse_page(limit: Option<u32>, offset: Option<u32>) -> Result<Option<Page>, Error> {
    Page::from_params(limit, offset).map_err(page_error)
}
