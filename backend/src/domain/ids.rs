//! Strongly typed identifiers for forum entities.
//!
//! Every persisted entity uses a positive 64-bit database key. Wrapping the raw
//! integer keeps post ids from being passed where comment ids are expected.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Validation errors returned when constructing identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IdValidationError {
    /// Identifiers start at one.
    #[error("{kind} must be a positive integer, got {value}")]
    NotPositive { kind: &'static str, value: i64 },
}

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident => $kind:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
            ToSchema,
        )]
        #[serde(try_from = "i64", into = "i64")]
        #[schema(value_type = i64, example = 42)]
        pub struct $name(i64);

        impl $name {
            /// Validate and wrap a raw identifier.
            ///
            /// # Errors
            /// Returns [`IdValidationError::NotPositive`] for zero or negative values.
            pub fn new(value: i64) -> Result<Self, IdValidationError> {
                if value <= 0 {
                    return Err(IdValidationError::NotPositive { kind: $kind, value });
                }
                Ok(Self(value))
            }

            /// Access the raw database key.
            #[must_use]
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl TryFrom<i64> for $name {
            type Error = IdValidationError;

            fn try_from(value: i64) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i64 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id!(
    /// Identifier of a registered user.
    UserId => "user id"
);
define_id!(
    /// Identifier of a topic.
    TopicId => "topic id"
);
define_id!(
    /// Identifier of a post.
    PostId => "post id"
);
define_id!(
    /// Identifier of a comment.
    CommentId => "comment id"
);
