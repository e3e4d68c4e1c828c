//! Post handlers, including the post like toggle.
//!
//! ```text
//! GET /api/v1/posts?limit=20&offset=0
//! POST /api/v1/posts {"topic_id":1,"title":"Hello","content":"First post"}
//! GET /api/v1/posts/{id}
//! PUT /api/v1/posts/{id}
//! DELETE /api/v1/posts/{id}
//! POST /api/v1/posts/{id}/like
//! GET /api/v1/topics/{id}/posts
//! ```
//!
//! Reads accept an optional session; when present, `liked_by_user` reflects
//! the signed-in user.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{CreatePostRequest, DeletePostRequest, UpdatePostRequest};
use crate::domain::{Error, LikeToggle, Post, PostDraft, PostId, PostView, TopicId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::pagination::PageQuery;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, content_error, missing_field_error, parse_id};

/// Body for `POST /posts`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreatePostBody {
    #[schema(example = 1)]
    pub topic_id: Option<i64>,
    #[schema(example = "Hello")]
    pub title: Option<String>,
    #[schema(example = "First post")]
    pub content: Option<String>,
}

/// Body for `PUT /posts/{id}`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdatePostBody {
    pub title: Option<String>,
    pub content: Option<String>,
}

fn post_draft(title: Option<String>, content: Option<String>) -> Result<PostDraft, Error> {
    let title = title.ok_or_else(|| missing_field_error(FieldName::new("title")))?;
    let content = content.ok_or_else(|| missing_field_error(FieldName::new("content")))?;
    PostDraft::new(&title, &content).map_err(content_error)
}

fn post_id(path: web::Path<i64>) -> Result<PostId, Error> {
    parse_id(path.into_inner(), FieldName::new("id"))
}

/// Recent posts across all topics.
#[utoipa::path(
    get,
    path = "/api/v1/posts",
    params(PageQuery),
    responses(
        (status = 200, description = "Posts, newest first", body = [PostView]),
        (status = 400, description = "Invalid paging parameters", body = Error)
    ),
    tags = ["posts"],
    operation_id = "listRecentPosts",
    security((), ("SessionCookie" = []))
)]
#[get("/posts")]
pub async fn list_recent_posts(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<PageQuery>,
) -> ApiResult<web::Json<Vec<PostView>>> {
    let viewer = session.user_id()?;
    let page = query.page()?;
    Ok(web::Json(state.posts_query.list_recent_posts(viewer, page).await?))
}

/// Posts of one topic.
#[utoipa::path(
    get,
    path = "/api/v1/topics/{id}/posts",
    params(("id" = i64, Path, description = "Topic id")),
    responses(
        (status = 200, description = "Posts, newest first", body = [PostView]),
        (status = 404, description = "Topic not found", body = Error)
    ),
    tags = ["posts"],
    operation_id = "listTopicPosts",
    security((), ("SessionCookie" = []))
)]
#[get("/topics/{id}/posts")]
pub async fn list_topic_posts(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<web::Json<Vec<PostView>>> {
    let viewer = session.user_id()?;
    let topic_id: TopicId = parse_id(path.into_inner(), FieldName::new("id"))?;
    Ok(web::Json(
        state.posts_query.list_topic_posts(viewer, topic_id).await?,
    ))
}

/// Create a post in an existing topic.
#[utoipa::path(
    post,
    path = "/api/v1/posts",
    request_body = CreatePostBody,
    responses(
        (status = 201, description = "Created", body = Post),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Not signed in", body = Error),
        (status = 404, description = "Topic not found", body = Error)
    ),
    tags = ["posts"],
    operation_id = "createPost"
)]
#[post("/posts")]
pub async fn create_post(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreatePostBody>,
) -> ApiResult<HttpResponse> {
    let requester = session.require_user_id()?;
    let CreatePostBody {
        topic_id,
        title,
        content,
    } = payload.into_inner();
    let raw_topic = topic_id.ok_or_else(|| missing_field_error(FieldName::new("topic_id")))?;
    let topic_id: TopicId = parse_id(raw_topic, FieldName::new("topic_id"))?;
    let draft = post_draft(title, content)?;

    let post = state
        .posts
        .create_post(CreatePostRequest {
            requester,
            topic_id,
            draft,
        })
        .await?;
    Ok(HttpResponse::Created().json(post))
}

/// Fetch one post.
#[utoipa::path(
    get,
    path = "/api/v1/posts/{id}",
    params(("id" = i64, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post", body = PostView),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["posts"],
    operation_id = "getPost",
    security((), ("SessionCookie" = []))
)]
#[get("/posts/{id}")]
pub async fn get_post(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<web::Json<PostView>> {
    let viewer = session.user_id()?;
    let id = post_id(path)?;
    Ok(web::Json(state.posts_query.get_post(viewer, id).await?))
}

/// Replace a post's title and content. Owner only.
#[utoipa::path(
    put,
    path = "/api/v1/posts/{id}",
    params(("id" = i64, Path, description = "Post id")),
    request_body = UpdatePostBody,
    responses(
        (status = 200, description = "Updated", body = Post),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Not signed in", body = Error),
        (status = 403, description = "Not the owner", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["posts"],
    operation_id = "updatePost"
)]
#[put("/posts/{id}")]
pub async fn update_post(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
    payload: web::Json<UpdatePostBody>,
) -> ApiResult<web::Json<Post>> {
    let requester = session.require_user_id()?;
    let post_id = post_id(path)?;
    let UpdatePostBody { title, content } = payload.into_inner();
    let draft = post_draft(title, content)?;
    let post = state
        .posts
        .update_post(UpdatePostRequest {
            requester,
            post_id,
            draft,
        })
        .await?;
    Ok(web::Json(post))
}

/// Delete a post with its comments and likes. Owner only.
#[utoipa::path(
    delete,
    path = "/api/v1/posts/{id}",
    params(("id" = i64, Path, description = "Post id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 401, description = "Not signed in", body = Error),
        (status = 403, description = "Not the owner", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["posts"],
    operation_id = "deletePost"
)]
#[delete("/posts/{id}")]
pub async fn delete_post(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let requester = session.require_user_id()?;
    let post_id = post_id(path)?;
    state
        .posts
        .delete_post(DeletePostRequest { requester, post_id })
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Like the post, or remove the like if the user already likes it.
#[utoipa::path(
    post,
    path = "/api/v1/posts/{id}/like",
    params(("id" = i64, Path, description = "Post id")),
    responses(
        (status = 200, description = "New like state and count", body = LikeToggle),
        (status = 401, description = "Not signed in", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 409, description = "Concurrent toggle, retry", body = Error)
    ),
    tags = ["posts"],
    operation_id = "togglePostLike"
)]
#[post("/posts/{id}/like")]
pub async fn toggle_post_like(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<web::Json<LikeToggle>> {
    let requester = session.require_user_id()?;
    let post_id = post_id(path)?;
    Ok(web::Json(
        state.posts.toggle_post_like(requester, post_id).await?,
    ))
}
