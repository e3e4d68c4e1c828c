//! Topics group posts under a shared subject.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::content::{ContentValidationError, required_text};
use super::ownership::Owned;
use super::{TopicId, UserId};

/// Longest accepted topic title.
pub const TOPIC_TITLE_MAX: usize = 200;
/// Longest accepted topic description.
pub const TOPIC_DESCRIPTION_MAX: usize = 2_000;

/// Validated title and description for creating or replacing a topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicDraft {
    title: String,
    description: String,
}

impl TopicDraft {
    /// Validate a draft. Both fields are required.
    ///
    /// # Errors
    /// Returns [`ContentValidationError`] naming the first invalid field.
    pub fn new(title: &str, description: &str) -> Result<Self, ContentValidationError> {
        Ok(Self {
            title: required_text(title, "title", TOPIC_TITLE_MAX)?,
            description: required_text(description, "description", TOPIC_DESCRIPTION_MAX)?,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// A stored topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Topic {
    pub id: TopicId,
    pub title: String,
    pub description: String,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
}

impl Owned for Topic {
    fn owner(&self) -> UserId {
        self.created_by
    }
}

/// A topic together with its read-side aggregates.
///
/// `post_count` is derived at query time from the posts table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TopicSummary {
    #[serde(flatten)]
    pub topic: Topic,
    pub created_by_username: String,
    pub post_count: i64,
}

impl Owned for TopicSummary {
    fn owner(&self) -> UserId {
        self.topic.owner()
    }
}
