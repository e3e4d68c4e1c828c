//! Wiring of Diesel repositories into domain services and [`HttpState`].

use std::sync::Arc;

use actix_web::web;

use forum_backend::domain::{
    AccountService, CommentService, PostService, SearchService, TopicService,
};
use forum_backend::inbound::http::state::HttpState;
use forum_backend::outbound::persistence::{
    DbPool, DieselCommentRepository, DieselLikeRepository, DieselPostRepository,
    DieselTopicRepository, DieselUserRepository,
};

/// Build the shared HTTP state from a database pool.
///
/// Each repository is constructed once and shared between the services that
/// need it; command and query ports backed by the same service share one
/// `Arc`.
pub(crate) fn build_http_state(pool: &DbPool) -> web::Data<HttpState> {
    let users = Arc::new(DieselUserRepository::new(pool.clone()));
    let topics = Arc::new(DieselTopicRepository::new(pool.clone()));
    let posts = Arc::new(DieselPostRepository::new(pool.clone()));
    let comments = Arc::new(DieselCommentRepository::new(pool.clone()));
    let likes = Arc::new(DieselLikeRepository::new(pool.clone()));

    let accounts = Arc::new(AccountService::new(users));
    let topic_service = Arc::new(TopicService::new(topics.clone()));
    let post_service = Arc::new(PostService::new(
        posts.clone(),
        topics.clone(),
        likes.clone(),
    ));
    let comment_service = Arc::new(CommentService::new(comments, posts.clone(), likes));
    let search = Arc::new(SearchService::new(posts, topics));

    web::Data::new(HttpState {
        accounts: accounts.clone(),
        users: accounts,
        topics: topic_service.clone(),
        topics_query: topic_service,
        posts: post_service.clone(),
        posts_query: post_service,
        comments: comment_service.clone(),
        comments_query: comment_service,
        search,
    })
}
