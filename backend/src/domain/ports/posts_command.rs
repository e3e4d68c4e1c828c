//! Driving port for post mutations and post likes.

use async_trait::async_trait;

use crate::domain::{Error, LikeToggle, Post, PostDraft, PostId, TopicId, UserId};

/// Request to create a post in a topic.
#[derive(Debug, Clone)]
pub struct CreatePostRequest {
    /// The authenticated user, who becomes the owner.
    pub requester: UserId,
    pub topic_id: TopicId,
    pub draft: PostDraft,
}

/// Request to replace a post's title and content.
#[derive(Debug, Clone)]
pub struct UpdatePostRequest {
    /// Must own the post.
    pub requester: UserId,
    pub post_id: PostId,
    pub draft: PostDraft,
}

/// Request to hard-delete a post.
#[derive(Debug, Clone, Copy)]
pub struct DeletePostRequest {
    /// Must own the post.
    pub requester: UserId,
    pub post_id: PostId,
}

/// Post write use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostsCommand: Send + Sync {
    async fn create_post(&self, request: CreatePostRequest) -> Result<Post, Error>;

    async fn update_post(&self, request: UpdatePostRequest) -> Result<Post, Error>;

    async fn delete_post(&self, request: DeletePostRequest) -> Result<(), Error>;

    /// Like the post if `requester` has not, otherwise unlike it.
    async fn toggle_post_like(
        &self,
        requester: UserId,
        post_id: PostId,
    ) -> Result<LikeToggle, Error>;
}
