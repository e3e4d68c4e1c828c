//! Posts live inside a topic and carry a denormalised like counter.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::content::{ContentValidationError, required_text};
use super::ownership::Owned;
use super::{PostId, TopicId, UserId};

/// Longest accepted post title.
pub const POST_TITLE_MAX: usize = 200;
/// Longest accepted post body.
pub const POST_CONTENT_MAX: usize = 20_000;

/// Validated title and body for creating or replacing a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    title: String,
    content: String,
}

impl PostDraft {
    /// Validate a draft. Both fields are required.
    ///
    /// # Errors
    /// Returns [`ContentValidationError`] naming the first invalid field.
    pub fn new(title: &str, content: &str) -> Result<Self, ContentValidationError> {
        Ok(Self {
            title: required_text(title, "title", POST_TITLE_MAX)?,
            content: required_text(content, "content", POST_CONTENT_MAX)?,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// A stored post.
///
/// `likes` mirrors the number of rows in the post like relation and is only
/// changed by the toggle-like engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Post {
    pub id: PostId,
    pub topic_id: TopicId,
    pub user_id: UserId,
    pub title: String,
    pub content: String,
    pub likes: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Owned for Post {
    fn owner(&self) -> UserId {
        self.user_id
    }
}

/// A post as presented to a particular viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PostView {
    #[serde(flatten)]
    pub post: Post,
    pub username: String,
    pub topic_title: String,
    /// Whether the viewer likes this post; always `false` for anonymous viewers.
    pub liked_by_user: bool,
}

impl Owned for PostView {
    fn owner(&self) -> UserId {
        self.post.owner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn draft_trims_fields() {
        let draft = PostDraft::new(" Hello ", "\nWorld\n").expect("valid draft");
        assert_eq!(draft.title(), "Hello");
        assert_eq!(draft.content(), "World");
    }

    #[rstest]
    fn draft_rejects_long_titles() {
        let title = "x".repeat(POST_TITLE_MAX + 1);
        assert_eq!(
            PostDraft::new(&title, "body"),
            Err(ContentValidationError::TooLong {
                field: "title",
                max: POST_TITLE_MAX
            })
        );
    }
}
