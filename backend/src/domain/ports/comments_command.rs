//! Driving port for comment mutations and comment likes.

use async_trait::async_trait;

use crate::domain::{Comment, CommentDraft, CommentId, Error, LikeToggle, PostId, UserId};

/// Request to comment on a post, optionally as a reply.
#[derive(Debug, Clone)]
pub struct CreateCommentRequest {
    /// The authenticated user, who becomes the owner.
    pub requester: UserId,
    pub post_id: PostId,
    /// Must reference a comment on the same post.
    pub parent_comment_id: Option<CommentId>,
    pub draft: CommentDraft,
}

/// Request to replace a comment's content.
#[derive(Debug, Clone)]
pub struct UpdateCommentRequest {
    /// Must own the comment.
    pub requester: UserId,
    pub comment_id: CommentId,
    pub draft: CommentDraft,
}

/// Request to soft-delete a comment.
#[derive(Debug, Clone, Copy)]
pub struct DeleteCommentRequest {
    /// Must own the comment.
    pub requester: UserId,
    pub comment_id: CommentId,
}

/// Comment write use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentsCommand: Send + Sync {
    async fn create_comment(&self, request: CreateCommentRequest) -> Result<Comment, Error>;

    async fn update_comment(&self, request: UpdateCommentRequest) -> Result<Comment, Error>;

    /// Mark the comment deleted. Repeating the call succeeds.
    async fn delete_comment(&self, request: DeleteCommentRequest) -> Result<(), Error>;

    /// Like the comment if `requester` has not, otherwise unlike it.
    async fn toggle_comment_like(
        &self,
        requester: UserId,
        comment_id: CommentId,
    ) -> Result<LikeToggle, Error>;
}
