//! Comment handlers, including the comment like toggle.
//!
//! ```text
//! POST /api/v1/comments {"post_id":1,"parent_comment_id":null,"content":"Nice"}
//! GET /api/v1/comments/{id}
//! PUT /api/v1/comments/{id}
//! DELETE /api/v1/comments/{id}
//! POST /api/v1/comments/{id}/like
//! GET /api/v1/posts/{id}/comments
//! ```
//!
//! Deleted comments stay listed but arrive redacted; they can no longer be
//! edited or liked.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{CreateCommentRequest, DeleteCommentRequest, UpdateCommentRequest};
use crate::domain::{
    Comment, CommentDraft, CommentId, CommentView, Error, LikeToggle, PostComments, PostId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, content_error, missing_field_error, parse_id};

/// Body for `POST /comments`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateCommentBody {
    #[schema(example = 1)]
    pub post_id: Option<i64>,
    /// Comment being replied to; must belong to the same post.
    pub parent_comment_id: Option<i64>,
    #[schema(example = "Nice post")]
    pub content: Option<String>,
}

/// Body for `PUT /comments/{id}`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateCommentBody {
    pub content: Option<String>,
}

fn comment_draft(content: Option<String>) -> Result<CommentDraft, Error> {
    let content = content.ok_or_else(|| missing_field_error(FieldName::new("content")))?;
    CommentDraft::new(&content).map_err(content_error)
}

fn comment_id(path: web::Path<i64>) -> Result<CommentId, Error> {
    parse_id(path.into_inner(), FieldName::new("id"))
}

/// Comment on a post, optionally as a reply.
#[utoipa::path(
    post,
    path = "/api/v1/comments",
    request_body = CreateCommentBody,
    responses(
        (status = 201, description = "Created", body = Comment),
        (status = 400, description = "Invalid request or parent", body = Error),
        (status = 401, description = "Not signed in", body = Error),
        (status = 404, description = "Post not found", body = Error)
    ),
    tags = ["comments"],
    operation_id = "createComment"
)]
#[post("/comments")]
pub async fn create_comment(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateCommentBody>,
) -> ApiResult<HttpResponse> {
    let requester = session.require_user_id()?;
    let CreateCommentBody {
        post_id,
        parent_comment_id,
        content,
    } = payload.into_inner();
    let raw_post = post_id.ok_or_else(|| missing_field_error(FieldName::new("post_id")))?;
    let post_id: PostId = parse_id(raw_post, FieldName::new("post_id"))?;
    let parent_comment_id: Option<CommentId> = parent_comment_id
        .map(|raw| parse_id(raw, FieldName::new("parent_comment_id")))
        .transpose()?;
    let draft = comment_draft(content)?;

    let comment = state
        .comments
        .create_comment(CreateCommentRequest {
            requester,
            post_id,
            parent_comment_id,
            draft,
        })
        .await?;
    Ok(HttpResponse::Created().json(comment))
}

/// Every comment on a post with the reply index.
#[utoipa::path(
    get,
    path = "/api/v1/posts/{id}/comments",
    params(("id" = i64, Path, description = "Post id")),
    responses(
        (status = 200, description = "Comments, oldest first, redacted", body = PostComments),
        (status = 404, description = "Post not found", body = Error)
    ),
    tags = ["comments"],
    operation_id = "listPostComments",
    security((), ("SessionCookie" = []))
)]
#[get("/posts/{id}/comments")]
pub async fn list_post_comments(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<web::Json<PostComments>> {
    let viewer = session.user_id()?;
    let post_id: PostId = parse_id(path.into_inner(), FieldName::new("id"))?;
    Ok(web::Json(
        state.comments_query.list_post_comments(viewer, post_id).await?,
    ))
}

/// Fetch one comment, redacted when deleted.
#[utoipa::path(
    get,
    path = "/api/v1/comments/{id}",
    params(("id" = i64, Path, description = "Comment id")),
    responses(
        (status = 200, description = "Comment", body = CommentView),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["comments"],
    operation_id = "getComment",
    security((), ("SessionCookie" = []))
)]
#[get("/comments/{id}")]
pub async fn get_comment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<web::Json<CommentView>> {
    let viewer = session.user_id()?;
    let id = comment_id(path)?;
    Ok(web::Json(state.comments_query.get_comment(viewer, id).await?))
}

/// Replace a comment's content. Owner only.
#[utoipa::path(
    put,
    path = "/api/v1/comments/{id}",
    params(("id" = i64, Path, description = "Comment id")),
    request_body = UpdateCommentBody,
    responses(
        (status = 200, description = "Updated", body = Comment),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Not signed in", body = Error),
        (status = 403, description = "Not the owner", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 409, description = "Comment has been deleted", body = Error)
    ),
    tags = ["comments"],
    operation_id = "updateComment"
)]
#[put("/comments/{id}")]
pub async fn update_comment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
    payload: web::Json<UpdateCommentBody>,
) -> ApiResult<web::Json<Comment>> {
    let requester = session.require_user_id()?;
    let comment_id = comment_id(path)?;
    let draft = comment_draft(payload.into_inner().content)?;
    let comment = state
        .comments
        .update_comment(UpdateCommentRequest {
            requester,
            comment_id,
            draft,
        })
        .await?;
    Ok(web::Json(comment))
}

/// Soft-delete a comment. Owner only; repeating succeeds.
#[utoipa::path(
    delete,
    path = "/api/v1/comments/{id}",
    params(("id" = i64, Path, description = "Comment id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 401, description = "Not signed in", body = Error),
        (status = 403, description = "Not the owner", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["comments"],
    operation_id = "deleteComment"
)]
#[delete("/comments/{id}")]
pub async fn delete_comment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let requester = session.require_user_id()?;
    let comment_id = comment_id(path)?;
    state
        .comments
        .delete_comment(DeleteCommentRequest {
            requester,
            comment_id,
        })
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Like the comment, or remove the like if the user already likes it.
#[utoipa::path(
    post,
    path = "/api/v1/comments/{id}/like",
    params(("id" = i64, Path, description = "Comment id")),
    responses(
        (status = 200, description = "New like state and count", body = LikeToggle),
        (status = 401, description = "Not signed in", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 409, description = "Comment deleted or concurrent toggle", body = Error)
    ),
    tags = ["comments"],
    operation_id = "toggleCommentLike"
)]
#[post("/comments/{id}/like")]
pub async fn toggle_comment_like(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<web::Json<LikeToggle>> {
    let requester = session.require_user_id()?;
    let comment_id = comment_id(path)?;
    Ok(web::Json(
        state.comments.toggle_comment_like(requester, comment_id).await?,
    ))
}
