//! Driving port for topic mutations.

use async_trait::async_trait;

use crate::domain::{Error, Topic, TopicDraft, TopicId, UserId};

/// Request to create a topic.
#[derive(Debug, Clone)]
pub struct CreateTopicRequest {
    /// The authenticated user, who becomes the owner.
    pub requester: UserId,
    pub draft: TopicDraft,
}

/// Request to replace a topic's title and description.
#[derive(Debug, Clone)]
pub struct UpdateTopicRequest {
    /// Must own the topic.
    pub requester: UserId,
    pub topic_id: TopicId,
    pub draft: TopicDraft,
}

/// Request to delete a topic along with its posts.
#[derive(Debug, Clone, Copy)]
pub struct DeleteTopicRequest {
    /// Must own the topic.
    pub requester: UserId,
    pub topic_id: TopicId,
}

/// Topic write use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TopicsCommand: Send + Sync {
    async fn create_topic(&self, request: CreateTopicRequest) -> Result<Topic, Error>;

    async fn update_topic(&self, request: UpdateTopicRequest) -> Result<Topic, Error>;

    async fn delete_topic(&self, request: DeleteTopicRequest) -> Result<(), Error>;
}
