//! HTTP inbound adapter exposing REST endpoints.
//!
//! Handlers stay thin: they pull identity from the session, validate the
//! request shape, call a driving port from [`state::HttpState`], and map the
//! outcome to a response. Everything below `/api/v1` is registered by
//! [`configure_api`].

use actix_web::web;

pub mod comments;
pub mod error;
pub mod health;
pub mod pagination;
pub mod posts;
pub mod search;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod topics;
pub mod users;
pub mod validation;

pub use error::ApiResult;

/// Register extractor error handlers and every API handler on `cfg`.
///
/// Literal segments are registered before `{id}` patterns that would
/// otherwise capture them.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .app_data(web::PathConfig::default().error_handler(error::path_error_handler))
        .app_data(web::QueryConfig::default().error_handler(error::query_error_handler))
        .service(users::register)
        .service(users::login)
        .service(users::logout)
        .service(users::current_user)
        .service(users::get_user)
        .service(topics::list_topics)
        .service(topics::create_topic)
        .service(posts::list_topic_posts)
        .service(topics::get_topic)
        .service(topics::update_topic)
        .service(topics::delete_topic)
        .service(posts::list_recent_posts)
        .service(posts::create_post)
        .service(posts::toggle_post_like)
        .service(comments::list_post_comments)
        .service(posts::get_post)
        .service(posts::update_post)
        .service(posts::delete_post)
        .service(comments::create_comment)
        .service(comments::toggle_comment_like)
        .service(comments::get_comment)
        .service(comments::update_comment)
        .service(comments::delete_comment)
        .service(search::search);
}
