//! Port for post persistence.
//!
//! Read methods take the viewer explicitly so adapters can compute
//! `liked_by_user`; `None` means an anonymous reader who likes nothing.

use async_trait::async_trait;

use crate::domain::{Page, Post, PostDraft, PostId, PostView, SearchTerm, TopicId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by post repository adapters.
    pub enum PostRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "post repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "post repository query failed: {message}",
        /// The referenced topic does not exist.
        TopicNotFound { topic_id: i64 } => "topic not found: {topic_id}",
    }
}

/// Storage for posts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Fetch a post as seen by `viewer`.
    async fn find_by_id(
        &self,
        id: PostId,
        viewer: Option<UserId>,
    ) -> Result<Option<PostView>, PostRepositoryError>;

    /// Posts in a topic, newest first.
    async fn list_by_topic(
        &self,
        topic_id: TopicId,
        viewer: Option<UserId>,
    ) -> Result<Vec<PostView>, PostRepositoryError>;

    /// Posts across all topics, newest first.
    async fn list_recent(
        &self,
        page: Option<Page>,
        viewer: Option<UserId>,
    ) -> Result<Vec<PostView>, PostRepositoryError>;

    /// Insert a post with zero likes.
    ///
    /// Fails with [`PostRepositoryError::TopicNotFound`] when the topic is
    /// removed concurrently.
    async fn create(
        &self,
        owner: UserId,
        topic_id: TopicId,
        draft: &PostDraft,
    ) -> Result<Post, PostRepositoryError>;

    /// Replace title and content and bump `updated_at`.
    async fn update(
        &self,
        id: PostId,
        draft: &PostDraft,
    ) -> Result<Option<Post>, PostRepositoryError>;

    /// Physically remove a post with its comments and likes.
    async fn delete(&self, id: PostId) -> Result<bool, PostRepositoryError>;

    /// Posts whose title or content contains `term`, newest first.
    async fn search(
        &self,
        term: &SearchTerm,
        limit: u32,
        viewer: Option<UserId>,
    ) -> Result<Vec<PostView>, PostRepositoryError>;
}
