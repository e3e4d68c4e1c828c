//! Comments on posts, their soft-delete policy, and reply threads.
//!
//! Deleting a comment only sets its `deleted` flag. The stored row keeps its
//! original content so ownership checks keep working, while every
//! reader-facing view goes through [`CommentView::redacted`], which masks the
//! content and author and reports zero likes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::content::{ContentValidationError, required_text};
use super::ownership::Owned;
use super::{CommentId, PostId, UserId};

mod thread;

pub use thread::CommentThread;

/// Content shown in place of a deleted comment's body.
pub const REDACTED_CONTENT: &str = "this content has been removed";
/// Author name shown in place of a deleted comment's author.
pub const REDACTED_AUTHOR: &str = "identity withheld";
/// Longest accepted comment body.
pub const COMMENT_CONTENT_MAX: usize = 10_000;

/// Validated comment body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentDraft {
    content: String,
}

impl CommentDraft {
    /// Validate a comment body.
    ///
    /// # Errors
    /// Returns [`ContentValidationError`] for blank or oversized content.
    pub fn new(content: &str) -> Result<Self, ContentValidationError> {
        Ok(Self {
            content: required_text(content, "content", COMMENT_CONTENT_MAX)?,
        })
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// A stored comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Comment {
    pub id: CommentId,
    pub post_id: PostId,
    pub user_id: UserId,
    pub parent_comment_id: Option<CommentId>,
    pub content: String,
    pub likes: i64,
    pub deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    /// Mask the body and like count of a deleted comment.
    ///
    /// Live comments are returned unchanged.
    ///
    /// # Examples
    /// ```
    /// # use chrono::Utc;
    /// use forum_backend::domain::{Comment, CommentId, PostId, UserId, REDACTED_CONTENT};
    ///
    /// let comment = Comment {
    ///     id: CommentId::new(1).expect("valid id"),
    ///     post_id: PostId::new(1).expect("valid id"),
    ///     user_id: UserId::new(1).expect("valid id"),
    ///     parent_comment_id: None,
    ///     content: "hello".to_owned(),
    ///     likes: 3,
    ///     deleted: true,
    ///     created_at: Utc::now(),
    ///     updated_at: Utc::now(),
    /// };
    /// let redacted = comment.redacted();
    /// assert_eq!(redacted.content, REDACTED_CONTENT);
    /// assert_eq!(redacted.likes, 0);
    /// ```
    #[must_use]
    pub fn redacted(self) -> Self {
        if !self.deleted {
            return self;
        }
        Self {
            content: REDACTED_CONTENT.to_owned(),
            likes: 0,
            ..self
        }
    }
}

impl Owned for Comment {
    fn owner(&self) -> UserId {
        self.user_id
    }
}

/// A comment as presented to a particular viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CommentView {
    #[serde(flatten)]
    pub comment: Comment,
    pub username: String,
    /// Whether the viewer likes this comment; always `false` for anonymous viewers.
    pub liked_by_user: bool,
}

impl CommentView {
    /// Apply the soft-delete policy for readers.
    ///
    /// Deleted comments lose their content, author name, and like count. The
    /// identifiers, timestamps, parent link, and the viewer's own like state
    /// are preserved.
    #[must_use]
    pub fn redacted(self) -> Self {
        if !self.comment.deleted {
            return self;
        }
        Self {
            comment: self.comment.redacted(),
            username: REDACTED_AUTHOR.to_owned(),
            liked_by_user: self.liked_by_user,
        }
    }
}

impl Owned for CommentView {
    fn owner(&self) -> UserId {
        self.comment.owner()
    }
}

/// Every comment on a post, redacted, with the reply structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PostComments {
    pub comments: Vec<CommentView>,
    pub thread: CommentThread,
}

impl PostComments {
    /// Redact `comments` and index their reply structure.
    #[must_use]
    pub fn new(comments: Vec<CommentView>) -> Self {
        let comments: Vec<CommentView> = comments.into_iter().map(CommentView::redacted).collect();
        let thread = CommentThread::build(comments.iter().map(|view| &view.comment));
        Self { comments, thread }
    }
}
