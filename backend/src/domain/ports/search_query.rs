//! Driving port for free-text search.

use async_trait::async_trait;

use crate::domain::{Error, SearchResults, SearchTerm, UserId};

/// Search use-case. `viewer` is `None` for anonymous readers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SearchQuery: Send + Sync {
    async fn search(&self, viewer: Option<UserId>, term: SearchTerm)
    -> Result<SearchResults, Error>;
}
