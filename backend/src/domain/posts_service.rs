//! Post use-cases, including the post half of toggle-like.
//!
//! Writes go through fetch, ownership check, mutate. Reads carry the viewer so
//! that `liked_by_user` reflects the requester; anonymous viewers like nothing.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{
    CreatePostRequest, DeletePostRequest, LikeRepository, LikeRepositoryError, PostRepository,
    PostRepositoryError, PostsCommand, PostsQuery, TopicRepository, UpdatePostRequest,
};
use crate::domain::topics_service::{map_topic_error, topic_not_found};
use crate::domain::{
    Error, LikeTarget, LikeToggle, Page, Post, PostId, PostView, TopicId, UserId, ensure_owner,
};

/// Service implementing [`PostsCommand`] and [`PostsQuery`].
#[derive(Clone)]
pub struct PostService<P, T, L> {
    posts: Arc<P>,
    topics: Arc<T>,
    likes: Arc<L>,
}

impl<P, T, L> PostService<P, T, L> {
    /// Create a new service from its repositories.
    pub fn new(posts: Arc<P>, topics: Arc<T>, likes: Arc<L>) -> Self {
        Self {
            posts,
            topics,
            likes,
        }
    }
}

pub(crate) fn map_post_error(error: PostRepositoryError) -> Error {
    match error {
        PostRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("post repository unavailable: {message}"))
        }
        PostRepositoryError::Query { message } => {
            Error::internal(format!("post repository error: {message}"))
        }
        PostRepositoryError::TopicNotFound { topic_id } => {
            Error::not_found(format!("topic {topic_id} not found"))
        }
    }
}

pub(crate) fn map_like_error(error: LikeRepositoryError) -> Error {
    match error {
        LikeRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("like repository unavailable: {message}"))
        }
        LikeRepositoryError::Query { message } => {
            Error::internal(format!("like repository error: {message}"))
        }
        LikeRepositoryError::TargetNotFound { target } => {
            Error::not_found(format!("{target} not found"))
        }
        LikeRepositoryError::TargetDeleted { target } => {
            Error::conflict(format!("{target} has been deleted"))
        }
        LikeRepositoryError::Conflict { target } => {
            Error::conflict(format!("concurrent like update on {target}, please retry"))
        }
    }
}

pub(crate) fn post_not_found(id: PostId) -> Error {
    Error::not_found(format!("post {id} not found"))
}

impl<P, T, L> PostService<P, T, L>
where
    P: PostRepository,
    T: TopicRepository,
    L: LikeRepository,
{
    async fn fetch(&self, id: PostId, viewer: Option<UserId>) -> Result<PostView, Error> {
        self.posts
            .find_by_id(id, viewer)
            .await
            .map_err(map_post_error)?
            .ok_or_else(|| post_not_found(id))
    }

    async fn ensure_topic_exists(&self, id: TopicId) -> Result<(), Error> {
        self.topics
            .find_by_id(id)
            .await
            .map_err(map_topic_error)?
            .map(|_| ())
            .ok_or_else(|| topic_not_found(id))
    }
}

#[async_trait]
impl<P, T, L> PostsCommand for PostService<P, T, L>
where
    P: PostRepository,
    T: TopicRepository,
    L: LikeRepository,
{
    async fn create_post(&self, request: CreatePostRequest) -> Result<Post, Error> {
        self.ensure_topic_exists(request.topic_id).await?;
        let post = self
            .posts
            .create(request.requester, request.topic_id, &request.draft)
            .await
            .map_err(map_post_error)?;
        info!(post_id = %post.id, topic_id = %post.topic_id, "created post");
        Ok(post)
    }

    async fn update_post(&self, request: UpdatePostRequest) -> Result<Post, Error> {
        let existing = self.fetch(request.post_id, Some(request.requester)).await?;
        ensure_owner(&existing, request.requester, "edit this post")?;

        self.posts
            .update(request.post_id, &request.draft)
            .await
            .map_err(map_post_error)?
            .ok_or_else(|| post_not_found(request.post_id))
    }

    async fn delete_post(&self, request: DeletePostRequest) -> Result<(), Error> {
        let existing = self.fetch(request.post_id, Some(request.requester)).await?;
        ensure_owner(&existing, request.requester, "delete this post")?;

        let removed = self
            .posts
            .delete(request.post_id)
            .await
            .map_err(map_post_error)?;
        if !removed {
            return Err(post_not_found(request.post_id));
        }
        info!(post_id = %request.post_id, "deleted post");
        Ok(())
    }

    async fn toggle_post_like(
        &self,
        requester: UserId,
        post_id: PostId,
    ) -> Result<LikeToggle, Error> {
        let outcome = self
            .likes
            .toggle(LikeTarget::Post(post_id), requester)
            .await
            .map_err(map_like_error)?;
        debug!(%post_id, user_id = %requester, liked = outcome.liked_by_user, "toggled post like");
        Ok(outcome)
    }
}

#[async_trait]
impl<P, T, L> PostsQuery for PostService<P, T, L>
where
    P: PostRepository,
    T: TopicRepository,
    L: LikeRepository,
{
    async fn get_post(&self, viewer: Option<UserId>, id: PostId) -> Result<PostView, Error> {
        self.fetch(id, viewer).await
    }

    async fn list_topic_posts(
        &self,
        viewer: Option<UserId>,
        topic_id: TopicId,
    ) -> Result<Vec<PostView>, Error> {
        self.ensure_topic_exists(topic_id).await?;
        self.posts
            .list_by_topic(topic_id, viewer)
            .await
            .map_err(map_post_error)
    }

    async fn list_recent_posts(
        &self,
        viewer: Option<UserId>,
        page: Option<Page>,
    ) -> Result<Vec<PostView>, Error> {
        self.posts
            .list_recent(page, viewer)
            .await
            .map_err(map_post_error)
    }
}

#[cfg(test)]
#[path = "posts_service_tests.rs"]
mod tests;
