//! Comment use-cases: replies, edits, soft deletion, likes, and reads.
//!
//! The repository hands back unredacted rows so that ownership and the
//! deleted flag can be checked. Everything leaving this service through
//! [`CommentsQuery`] is redacted.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{
    CommentRepository, CommentRepositoryError, CommentsCommand, CommentsQuery,
    CreateCommentRequest, DeleteCommentRequest, LikeRepository, NewComment, PostRepository,
    UpdateCommentRequest,
};
use crate::domain::posts_service::{map_like_error, map_post_error, post_not_found};
use crate::domain::{
    Comment, CommentId, CommentView, Error, LikeTarget, LikeToggle, PostComments, PostId, UserId,
    ensure_owner,
};

/// Service implementing [`CommentsCommand`] and [`CommentsQuery`].
#[derive(Clone)]
pub struct CommentService<C, P, L> {
    comments: Arc<C>,
    posts: Arc<P>,
    likes: Arc<L>,
}

impl<C, P, L> CommentService<C, P, L> {
    /// Create a new service from its repositories.
    pub fn new(comments: Arc<C>, posts: Arc<P>, likes: Arc<L>) -> Self {
        Self {
            comments,
            posts,
            likes,
        }
    }
}

fn map_comment_error(error: CommentRepositoryError) -> Error {
    match error {
        CommentRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("comment repository unavailable: {message}"))
        }
        CommentRepositoryError::Query { message } => {
            Error::internal(format!("comment repository error: {message}"))
        }
        CommentRepositoryError::NotFound { comment_id } => {
            Error::not_found(format!("comment {comment_id} not found"))
        }
        CommentRepositoryError::PostNotFound { post_id } => {
            Error::not_found(format!("post {post_id} not found"))
        }
    }
}

fn comment_not_found(id: CommentId) -> Error {
    Error::not_found(format!("comment {id} not found"))
}

fn comment_deleted() -> Error {
    Error::conflict("comment has been deleted")
}

impl<C, P, L> CommentService<C, P, L>
where
    C: CommentRepository,
    P: PostRepository,
    L: LikeRepository,
{
    async fn fetch(&self, id: CommentId, viewer: Option<UserId>) -> Result<CommentView, Error> {
        self.comments
            .find_by_id(id, viewer)
            .await
            .map_err(map_comment_error)?
            .ok_or_else(|| comment_not_found(id))
    }

    async fn ensure_post_exists(&self, id: PostId) -> Result<(), Error> {
        self.posts
            .find_by_id(id, None)
            .await
            .map_err(map_post_error)?
            .map(|_| ())
            .ok_or_else(|| post_not_found(id))
    }

    async fn ensure_parent_on_post(&self, parent: CommentId, post_id: PostId) -> Result<(), Error> {
        let found = self
            .comments
            .find_by_id(parent, None)
            .await
            .map_err(map_comment_error)?;
        match found {
            Some(view) if view.comment.post_id == post_id => Ok(()),
            Some(_) => Err(Error::invalid_request(
                "parent comment belongs to a different post",
            )),
            None => Err(Error::invalid_request(format!(
                "parent comment {parent} does not exist"
            ))),
        }
    }
}

#[async_trait]
impl<C, P, L> CommentsCommand for CommentService<C, P, L>
where
    C: CommentRepository,
    P: PostRepository,
    L: LikeRepository,
{
    async fn create_comment(&self, request: CreateCommentRequest) -> Result<Comment, Error> {
        self.ensure_post_exists(request.post_id).await?;
        if let Some(parent) = request.parent_comment_id {
            self.ensure_parent_on_post(parent, request.post_id).await?;
        }

        let comment = self
            .comments
            .create(
                NewComment {
                    post_id: request.post_id,
                    user_id: request.requester,
                    parent_comment_id: request.parent_comment_id,
                },
                &request.draft,
            )
            .await
            .map_err(map_comment_error)?;
        info!(comment_id = %comment.id, post_id = %comment.post_id, "created comment");
        Ok(comment)
    }

    async fn update_comment(&self, request: UpdateCommentRequest) -> Result<Comment, Error> {
        let existing = self
            .fetch(request.comment_id, Some(request.requester))
            .await?;
        ensure_owner(&existing, request.requester, "edit this comment")?;
        if existing.comment.deleted {
            return Err(comment_deleted());
        }

        // A concurrent delete between the read and the write also lands here.
        self.comments
            .update_content(request.comment_id, &request.draft)
            .await
            .map_err(map_comment_error)?
            .ok_or_else(comment_deleted)
    }

    async fn delete_comment(&self, request: DeleteCommentRequest) -> Result<(), Error> {
        let existing = self
            .fetch(request.comment_id, Some(request.requester))
            .await?;
        ensure_owner(&existing, request.requester, "delete this comment")?;

        self.comments
            .mark_deleted(request.comment_id)
            .await
            .map_err(map_comment_error)?;
        info!(comment_id = %request.comment_id, "soft-deleted comment");
        Ok(())
    }

    async fn toggle_comment_like(
        &self,
        requester: UserId,
        comment_id: CommentId,
    ) -> Result<LikeToggle, Error> {
        // The adapter rejects deleted comments under the row lock.
        let outcome = self
            .likes
            .toggle(LikeTarget::Comment(comment_id), requester)
            .await
            .map_err(map_like_error)?;
        debug!(%comment_id, user_id = %requester, liked = outcome.liked_by_user, "toggled comment like");
        Ok(outcome)
    }
}

#[async_trait]
impl<C, P, L> CommentsQuery for CommentService<C, P, L>
where
    C: CommentRepository,
    P: PostRepository,
    L: LikeRepository,
{
    async fn get_comment(
        &self,
        viewer: Option<UserId>,
        id: CommentId,
    ) -> Result<CommentView, Error> {
        self.fetch(id, viewer).await.map(CommentView::redacted)
    }

    async fn list_post_comments(
        &self,
        viewer: Option<UserId>,
        post_id: PostId,
    ) -> Result<PostComments, Error> {
        self.ensure_post_exists(post_id).await?;
        let comments = self
            .comments
            .list_by_post(post_id, viewer)
            .await
            .map_err(map_comment_error)?;
        Ok(PostComments::new(comments))
    }
}

#[cfg(test)]
#[path = "comments_service_tests.rs"]
mod tests;
