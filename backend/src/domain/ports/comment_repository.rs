//! Port for comment persistence, including the soft-delete primitive.
//!
//! Views returned here are unredacted. Services apply
//! [`CommentView::redacted`](crate::domain::CommentView::redacted) before
//! anything reaches a reader.

use async_trait::async_trait;

use crate::domain::{Comment, CommentDraft, CommentId, CommentView, PostId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by comment repository adapters.
    pub enum CommentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "comment repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "comment repository query failed: {message}",
        /// The comment does not exist.
        NotFound { comment_id: i64 } => "comment not found: {comment_id}",
        /// The referenced post does not exist.
        PostNotFound { post_id: i64 } => "post not found: {post_id}",
    }
}

/// Fields fixed when a comment is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewComment {
    pub post_id: PostId,
    pub user_id: UserId,
    pub parent_comment_id: Option<CommentId>,
}

/// Storage for comments.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Fetch a comment, unredacted, as seen by `viewer`.
    async fn find_by_id(
        &self,
        id: CommentId,
        viewer: Option<UserId>,
    ) -> Result<Option<CommentView>, CommentRepositoryError>;

    /// Every comment on a post, deleted ones included, oldest first.
    async fn list_by_post(
        &self,
        post_id: PostId,
        viewer: Option<UserId>,
    ) -> Result<Vec<CommentView>, CommentRepositoryError>;

    /// Insert a live comment with zero likes.
    ///
    /// Fails with [`CommentRepositoryError::PostNotFound`] when the post is
    /// removed concurrently.
    async fn create(
        &self,
        comment: NewComment,
        draft: &CommentDraft,
    ) -> Result<Comment, CommentRepositoryError>;

    /// Replace the body of a live comment and bump `updated_at`.
    ///
    /// Returns `None` when the comment is missing or already deleted.
    async fn update_content(
        &self,
        id: CommentId,
        draft: &CommentDraft,
    ) -> Result<Option<Comment>, CommentRepositoryError>;

    /// Set `deleted = true` without touching the stored content.
    ///
    /// Idempotent: marking an already deleted comment succeeds. Fails with
    /// [`CommentRepositoryError::NotFound`] when no such row exists.
    async fn mark_deleted(&self, id: CommentId) -> Result<(), CommentRepositoryError>;
}
