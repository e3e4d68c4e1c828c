//! Free-text search across topics and posts.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{PostRepository, SearchQuery, TopicRepository};
use crate::domain::posts_service::map_post_error;
use crate::domain::topics_service::map_topic_error;
use crate::domain::{Error, SEARCH_RESULT_LIMIT, SearchResults, SearchTerm, UserId};

/// Service implementing [`SearchQuery`].
#[derive(Clone)]
pub struct SearchService<P, T> {
    posts: Arc<P>,
    topics: Arc<T>,
}

impl<P, T> SearchService<P, T> {
    /// Create a new service from its repositories.
    pub fn new(posts: Arc<P>, topics: Arc<T>) -> Self {
        Self { posts, topics }
    }
}

#[async_trait]
impl<P, T> SearchQuery for SearchService<P, T>
where
    P: PostRepository,
    T: TopicRepository,
{
    async fn search(
        &self,
        viewer: Option<UserId>,
        term: SearchTerm,
    ) -> Result<SearchResults, Error> {
        let posts = self
            .posts
            .search(&term, SEARCH_RESULT_LIMIT, viewer)
            .await
            .map_err(map_post_error)?;
        let topics = self
            .topics
            .search(&term, SEARCH_RESULT_LIMIT)
            .await
            .map_err(map_topic_error)?;
        Ok(SearchResults { posts, topics })
    }
}

#[cfg(test)]
#[path = "search_service_tests.rs"]
mod tests;
