//! Port for topic persistence.

use async_trait::async_trait;

use crate::domain::{Page, SearchTerm, Topic, TopicDraft, TopicId, TopicSummary, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by topic repository adapters.
    pub enum TopicRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "topic repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "topic repository query failed: {message}",
    }
}

/// Storage for topics and their derived post counts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TopicRepository: Send + Sync {
    /// List topics newest first; `None` returns every topic.
    async fn list(&self, page: Option<Page>) -> Result<Vec<TopicSummary>, TopicRepositoryError>;

    /// Fetch one topic with its aggregates.
    async fn find_by_id(&self, id: TopicId)
    -> Result<Option<TopicSummary>, TopicRepositoryError>;

    /// Insert a topic owned by `owner`.
    async fn create(&self, owner: UserId, draft: &TopicDraft)
    -> Result<Topic, TopicRepositoryError>;

    /// Replace title and description. Returns `None` if the topic vanished.
    async fn update(
        &self,
        id: TopicId,
        draft: &TopicDraft,
    ) -> Result<Option<Topic>, TopicRepositoryError>;

    /// Physically remove a topic and everything under it.
    ///
    /// Returns `false` if no row was removed.
    async fn delete(&self, id: TopicId) -> Result<bool, TopicRepositoryError>;

    /// Topics whose title or description contains `term`, newest first.
    async fn search(
        &self,
        term: &SearchTerm,
        limit: u32,
    ) -> Result<Vec<TopicSummary>, TopicRepositoryError>;
}
