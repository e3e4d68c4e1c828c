//! Driving port for topic reads.

use async_trait::async_trait;

use crate::domain::{Error, Page, TopicId, TopicSummary};

/// Topic read use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TopicsQuery: Send + Sync {
    /// Topics newest first, paged when `page` is given.
    async fn list_topics(&self, page: Option<Page>) -> Result<Vec<TopicSummary>, Error>;

    /// A single topic, failing with not-found when absent.
    async fn get_topic(&self, id: TopicId) -> Result<TopicSummary, Error>;
}
