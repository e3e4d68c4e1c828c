//! PostgreSQL-backed `PostRepository` implementation using Diesel ORM.
//!
//! Read queries join the author and topic, then resolve `liked_by_user` for
//! the viewer with one lookup over `post_likes`. The `likes` column is read as
//! stored; this adapter never writes it.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::{PostRepository, PostRepositoryError};
use crate::domain::{
    Page, Post, PostDraft, PostId, PostView, SearchTerm, TopicId, UserId,
};

use super::diesel_helpers::{
    collect_rows, foreign_key_constraint, liked_post_ids, map_basic_diesel_error,
    map_pool_error_message, stored_id,
};
use super::models::{NewPostRow, PostRow, PostUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::{posts, topics, users};

/// Diesel-backed implementation of the `PostRepository` port.
#[derive(Clone)]
pub struct DieselPostRepository {
    pool: DbPool,
}

impl DieselPostRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> PostRepositoryError {
    PostRepositoryError::connection(map_pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> PostRepositoryError {
    map_basic_diesel_error(
        error,
        PostRepositoryError::query,
        PostRepositoryError::connection,
    )
}

fn row_to_post(row: PostRow) -> Result<Post, String> {
    Ok(Post {
        id: stored_id(row.id, PostId::new)?,
        topic_id: stored_id(row.topic_id, TopicId::new)?,
        user_id: stored_id(row.user_id, UserId::new)?,
        title: row.title,
        content: row.content,
        likes: row.likes,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

/// A post row with its author's username and topic title.
type PostWithContext = (PostRow, String, String);

/// Columns selected by every post read.
macro_rules! post_view_query {
    () => {
        posts::table
            .inner_join(users::table)
            .inner_join(topics::table)
            .select((PostRow::as_select(), users::username, topics::title))
    };
}

async fn into_views(
    conn: &mut AsyncPgConnection,
    rows: Vec<PostWithContext>,
    viewer: Option<UserId>,
) -> Result<Vec<PostView>, PostRepositoryError> {
    let ids: Vec<i64> = rows.iter().map(|(row, _, _)| row.id).collect();
    let liked = liked_post_ids(conn, viewer, &ids)
        .await
        .map_err(map_diesel_error)?;

    collect_rows(
        rows.into_iter().map(|(row, username, topic_title)| {
            let liked_by_user = liked.contains(&row.id);
            row_to_post(row).map(|post| PostView {
                post,
                username,
                topic_title,
                liked_by_user,
            })
        }),
        PostRepositoryError::query,
    )
}

#[async_trait]
impl PostRepository for DieselPostRepository {
    async fn find_by_id(
        &self,
        id: PostId,
        viewer: Option<UserId>,
    ) -> Result<Option<PostView>, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<PostWithContext> = post_view_query!()
            .filter(posts::id.eq(id.get()))
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        let Some(row) = row else {
            return Ok(None);
        };
        Ok(into_views(&mut conn, vec![row], viewer).await?.pop())
    }

    async fn list_by_topic(
        &self,
        topic_id: TopicId,
        viewer: Option<UserId>,
    ) -> Result<Vec<PostView>, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<PostWithContext> = post_view_query!()
            .filter(posts::topic_id.eq(topic_id.get()))
            .order_by((posts::created_at.desc(), posts::id.desc()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        into_views(&mut conn, rows, viewer).await
    }

    async fn list_recent(
        &self,
        page: Option<Page>,
        viewer: Option<UserId>,
    ) -> Result<Vec<PostView>, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = post_view_query!()
            .order_by((posts::created_at.desc(), posts::id.desc()))
            .into_boxed();
        if let Some(page) = page {
            query = query
                .limit(i64::from(page.limit()))
                .offset(i64::from(page.offset()));
        }

        let rows: Vec<PostWithContext> = query.load(&mut conn).await.map_err(map_diesel_error)?;
        into_views(&mut conn, rows, viewer).await
    }

    async fn create(
        &self,
        owner: UserId,
        topic_id: TopicId,
        draft: &PostDraft,
    ) -> Result<Post, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: PostRow = diesel::insert_into(posts::table)
            .values(&NewPostRow {
                topic_id: topic_id.get(),
                user_id: owner.get(),
                title: draft.title(),
                content: draft.content(),
            })
            .returning(PostRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| match foreign_key_constraint(&err) {
                Some(constraint) if constraint.contains("topic_id") => {
                    PostRepositoryError::topic_not_found(topic_id.get())
                }
                _ => map_diesel_error(err),
            })?;

        row_to_post(row).map_err(PostRepositoryError::query)
    }

    async fn update(
        &self,
        id: PostId,
        draft: &PostDraft,
    ) -> Result<Option<Post>, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<PostRow> = diesel::update(posts::table.find(id.get()))
            .set(&PostUpdate {
                title: draft.title(),
                content: draft.content(),
                updated_at: Utc::now(),
            })
            .returning(PostRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_post)
            .transpose()
            .map_err(PostRepositoryError::query)
    }

    async fn delete(&self, id: PostId) -> Result<bool, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let removed = diesel::delete(posts::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(removed > 0)
    }

    async fn search(
        &self,
        term: &SearchTerm,
        limit: u32,
        viewer: Option<UserId>,
    ) -> Result<Vec<PostView>, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let pattern = term.contains_pattern();

        let rows: Vec<PostWithContext> = post_view_query!()
            .filter(
                posts::title
                    .ilike(&pattern)
                    .or(posts::content.ilike(&pattern)),
            )
            .order_by((posts::created_at.desc(), posts::id.desc()))
            .limit(i64::from(limit))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        into_views(&mut conn, rows, viewer).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn row_to_post_keeps_stored_counter() {
        let now = Utc::now();
        let row = PostRow {
            id: 2,
            topic_id: 1,
            user_id: 5,
            title: "Traits".to_owned(),
            content: "Object safety".to_owned(),
            likes: 12,
            created_at: now,
            updated_at: now,
        };
        let post = row_to_post(row).expect("valid row");
        assert_eq!(post.likes, 12);
        assert_eq!(post.user_id.get(), 5);
    }
}
