//! Topic use-cases.
//!
//! Mutations follow fetch, ownership check, write. Deleting a topic removes
//! its posts, their comments, and every like beneath them in one statement.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{
    CreateTopicRequest, DeleteTopicRequest, TopicRepository, TopicRepositoryError, TopicsCommand,
    TopicsQuery, UpdateTopicRequest,
};
use crate::domain::{Error, Page, Topic, TopicId, TopicSummary, ensure_owner};

/// Service implementing [`TopicsCommand`] and [`TopicsQuery`].
#[derive(Clone)]
pub struct TopicService<T> {
    topics: Arc<T>,
}

impl<T> TopicService<T> {
    /// Create a new service backed by the given topic repository.
    pub fn new(topics: Arc<T>) -> Self {
        Self { topics }
    }
}

pub(crate) fn map_topic_error(error: TopicRepositoryError) -> Error {
    match error {
        TopicRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("topic repository unavailable: {message}"))
        }
        TopicRepositoryError::Query { message } => {
            Error::internal(format!("topic repository error: {message}"))
        }
    }
}

pub(crate) fn topic_not_found(id: TopicId) -> Error {
    Error::not_found(format!("topic {id} not found"))
}

impl<T> TopicService<T>
where
    T: TopicRepository,
{
    async fn fetch(&self, id: TopicId) -> Result<TopicSummary, Error> {
        self.topics
            .find_by_id(id)
            .await
            .map_err(map_topic_error)?
            .ok_or_else(|| topic_not_found(id))
    }
}

#[async_trait]
impl<T> TopicsCommand for TopicService<T>
where
    T: TopicRepository,
{
    async fn create_topic(&self, request: CreateTopicRequest) -> Result<Topic, Error> {
        let topic = self
            .topics
            .create(request.requester, &request.draft)
            .await
            .map_err(map_topic_error)?;
        info!(topic_id = %topic.id, user_id = %topic.created_by, "created topic");
        Ok(topic)
    }

    async fn update_topic(&self, request: UpdateTopicRequest) -> Result<Topic, Error> {
        let existing = self.fetch(request.topic_id).await?;
        ensure_owner(&existing, request.requester, "edit this topic")?;

        self.topics
            .update(request.topic_id, &request.draft)
            .await
            .map_err(map_topic_error)?
            .ok_or_else(|| topic_not_found(request.topic_id))
    }

    async fn delete_topic(&self, request: DeleteTopicRequest) -> Result<(), Error> {
        let existing = self.fetch(request.topic_id).await?;
        ensure_owner(&existing, request.requester, "delete this topic")?;

        let removed = self
            .topics
            .delete(request.topic_id)
            .await
            .map_err(map_topic_error)?;
        if !removed {
            return Err(topic_not_found(request.topic_id));
        }
        info!(topic_id = %request.topic_id, "deleted topic");
        Ok(())
    }
}

#[async_trait]
impl<T> TopicsQuery for TopicService<T>
where
    T: TopicRepository,
{
    async fn list_topics(&self, page: Option<Page>) -> Result<Vec<TopicSummary>, Error> {
        self.topics.list(page).await.map_err(map_topic_error)
    }

    async fn get_topic(&self, id: TopicId) -> Result<TopicSummary, Error> {
        self.fetch(id).await
    }
}

#[cfg(test)]
#[path = "topics_service_tests.rs"]
mod tests;
