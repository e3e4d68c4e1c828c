//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AccountsCommand, CommentsCommand, CommentsQuery, PostsCommand, PostsQuery, SearchQuery,
    TopicsCommand, TopicsQuery, UsersQuery,
};

/// Dependency bundle for HTTP handlers.
///
/// # Examples
/// ```ignore
/// let state = HttpState {
///     accounts: Arc::new(account_service.clone()),
///     users: Arc::new(account_service),
///     // one entry per driving port
///     ..
/// };
/// App::new().app_data(web::Data::new(state));
/// ```
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<dyn AccountsCommand>,
    pub users: Arc<dyn UsersQuery>,
    pub topics: Arc<dyn TopicsCommand>,
    pub topics_query: Arc<dyn TopicsQuery>,
    pub posts: Arc<dyn PostsCommand>,
    pub posts_query: Arc<dyn PostsQuery>,
    pub comments: Arc<dyn CommentsCommand>,
    pub comments_query: Arc<dyn CommentsQuery>,
    pub search: Arc<dyn SearchQuery>,
}
