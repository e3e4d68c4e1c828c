//! Driving port for comment reads.
//!
//! Everything returned through this port has already been redacted.

use async_trait::async_trait;

use crate::domain::{CommentId, CommentView, Error, PostComments, PostId, UserId};

/// Comment read use-cases. `viewer` is `None` for anonymous readers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentsQuery: Send + Sync {
    async fn get_comment(
        &self,
        viewer: Option<UserId>,
        id: CommentId,
    ) -> Result<CommentView, Error>;

    /// All comments on an existing post with their reply thread.
    async fn list_post_comments(
        &self,
        viewer: Option<UserId>,
        post_id: PostId,
    ) -> Result<PostComments, Error>;
}
