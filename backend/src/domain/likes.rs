//! Like toggling for posts and comments.
//!
//! A like is a `(entity, user)` row in the relation for that entity kind. The
//! entity's `likes` counter always equals the number of such rows; both are
//! changed together inside one transaction by the [`LikeRepository`]
//! implementation.
//!
//! [`LikeRepository`]: crate::domain::ports::LikeRepository

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{CommentId, PostId};

/// The entity a like applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LikeTarget {
    Post(PostId),
    Comment(CommentId),
}

impl LikeTarget {
    /// Entity kind, as used in log fields and messages.
    #[must_use]
    pub const fn kind(self) -> &'static str {
        match self {
            Self::Post(_) => "post",
            Self::Comment(_) => "comment",
        }
    }

    /// Raw database key of the target entity.
    #[must_use]
    pub const fn entity_id(self) -> i64 {
        match self {
            Self::Post(id) => id.get(),
            Self::Comment(id) => id.get(),
        }
    }
}

impl std::fmt::Display for LikeTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.kind(), self.entity_id())
    }
}

/// Result of a toggle: the requester's new like state and the new count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LikeToggle {
    pub liked_by_user: bool,
    pub likes: i64,
}

impl LikeToggle {
    /// Outcome after inserting a like on an entity that had `prior` likes.
    #[must_use]
    pub const fn liked(prior: i64) -> Self {
        Self {
            liked_by_user: true,
            likes: prior + 1,
        }
    }

    /// Outcome after removing a like from an entity that had `prior` likes.
    #[must_use]
    pub const fn unliked(prior: i64) -> Self {
        Self {
            liked_by_user: false,
            likes: prior - 1,
        }
    }
}
