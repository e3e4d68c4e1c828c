//! Driving port for post reads.

use async_trait::async_trait;

use crate::domain::{Error, Page, PostId, PostView, TopicId, UserId};

/// Post read use-cases. `viewer` is `None` for anonymous readers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostsQuery: Send + Sync {
    async fn get_post(&self, viewer: Option<UserId>, id: PostId) -> Result<PostView, Error>;

    /// Posts of an existing topic, newest first.
    async fn list_topic_posts(
        &self,
        viewer: Option<UserId>,
        topic_id: TopicId,
    ) -> Result<Vec<PostView>, Error>;

    /// Posts across all topics, newest first.
    async fn list_recent_posts(
        &self,
        viewer: Option<UserId>,
        page: Option<Page>,
    ) -> Result<Vec<PostView>, Error>;
}
