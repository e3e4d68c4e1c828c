//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] collects every handler under `/api/v1` plus the health probes,
//! the domain schemas they exchange, and the session cookie security scheme.
//! Swagger UI serves it in debug builds and `cargo run --bin openapi-dump`
//! prints it for external tooling.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{
    Comment, CommentThread, CommentView, Error, ErrorCode, LikeToggle, Post, PostComments,
    PostView, SearchResults, Topic, TopicSummary, User,
};
use crate::inbound::http::comments::{CreateCommentBody, UpdateCommentBody};
use crate::inbound::http::health::ProbeStatus;
use crate::inbound::http::posts::{CreatePostBody, UpdatePostBody};
use crate::inbound::http::topics::TopicRequest;
use crate::inbound::http::users::UsernameRequest;

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/users/register or /api/v1/users/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Forum backend API",
        description = "Forum topics with threaded discussion behind cookie sessions."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::users::current_user,
        crate::inbound::http::users::get_user,
        crate::inbound::http::topics::list_topics,
        crate::inbound::http::topics::create_topic,
        crate::inbound::http::topics::get_topic,
        crate::inbound::http::topics::update_topic,
        crate::inbound::http::topics::delete_topic,
        crate::inbound::http::posts::list_topic_posts,
        crate::inbound::http::posts::list_recent_posts,
        crate::inbound::http::posts::create_post,
        crate::inbound::http::posts::get_post,
        crate::inbound::http::posts::update_post,
        crate::inbound::http::posts::delete_post,
        crate::inbound::http::posts::toggle_post_like,
        crate::inbound::http::comments::list_post_comments,
        crate::inbound::http::comments::create_comment,
        crate::inbound::http::comments::get_comment,
        crate::inbound::http::comments::update_comment,
        crate::inbound::http::comments::delete_comment,
        crate::inbound::http::comments::toggle_comment_like,
        crate::inbound::http::search::search,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        User,
        Topic,
        TopicSummary,
        Post,
        PostView,
        Comment,
        CommentView,
        CommentThread,
        PostComments,
        LikeToggle,
        SearchResults,
        ProbeStatus,
        UsernameRequest,
        TopicRequest,
        CreatePostBody,
        UpdatePostBody,
        CreateCommentBody,
        UpdateCommentBody,
    )),
    tags(
        (name = "users", description = "Accounts and sessions"),
        (name = "topics", description = "Discussion topics"),
        (name = "posts", description = "Posts within topics and post likes"),
        (name = "comments", description = "Threaded comments and comment likes"),
        (name = "search", description = "Search across posts and topics"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
