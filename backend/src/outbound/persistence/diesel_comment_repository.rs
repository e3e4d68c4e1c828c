//! PostgreSQL-backed `CommentRepository` implementation using Diesel ORM.
//!
//! Rows are returned exactly as stored. Redaction of deleted comments is a
//! domain concern applied by the comment service.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::{CommentRepository, CommentRepositoryError, NewComment};
use crate::domain::{Comment, CommentDraft, CommentId, CommentView, PostId, UserId};

use super::diesel_helpers::{
    collect_rows, foreign_key_constraint, liked_comment_ids, map_basic_diesel_error,
    map_pool_error_message, stored_id,
};
use super::models::{CommentRow, CommentUpdate, NewCommentRow};
use super::pool::{DbPool, PoolError};
use super::schema::{comments, users};

/// Diesel-backed implementation of the `CommentRepository` port.
#[derive(Clone)]
pub struct DieselCommentRepository {
    pool: DbPool,
}

impl DieselCommentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CommentRepositoryError {
    CommentRepositoryError::connection(map_pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> CommentRepositoryError {
    map_basic_diesel_error(
        error,
        CommentRepositoryError::query,
        CommentRepositoryError::connection,
    )
}

fn row_to_comment(row: CommentRow) -> Result<Comment, String> {
    let parent_comment_id = row
        .parent_comment_id
        .map(|raw| stored_id(raw, CommentId::new))
        .transpose()?;
    Ok(Comment {
        id: stored_id(row.id, CommentId::new)?,
        post_id: stored_id(row.post_id, PostId::new)?,
        user_id: stored_id(row.user_id, UserId::new)?,
        parent_comment_id,
        content: row.content,
        likes: row.likes,
        deleted: row.deleted,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

type CommentWithAuthor = (CommentRow, String);

async fn into_views(
    conn: &mut AsyncPgConnection,
    rows: Vec<CommentWithAuthor>,
    viewer: Option<UserId>,
) -> Result<Vec<CommentView>, CommentRepositoryError> {
    let ids: Vec<i64> = rows.iter().map(|(row, _)| row.id).collect();
    let liked = liked_comment_ids(conn, viewer, &ids)
        .await
        .map_err(map_diesel_error)?;

    collect_rows(
        rows.into_iter().map(|(row, username)| {
            let liked_by_user = liked.contains(&row.id);
            row_to_comment(row).map(|comment| CommentView {
                comment,
                username,
                liked_by_user,
            })
        }),
        CommentRepositoryError::query,
    )
}

#[async_trait]
impl CommentRepository for DieselCommentRepository {
    async fn find_by_id(
        &self,
        id: CommentId,
        viewer: Option<UserId>,
    ) -> Result<Option<CommentView>, CommentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<CommentWithAuthor> = comments::table
            .inner_join(users::table)
            .filter(comments::id.eq(id.get()))
            .select((CommentRow::as_select(), users::username))
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        let Some(row) = row else {
            return Ok(None);
        };
        Ok(into_views(&mut conn, vec![row], viewer).await?.pop())
    }

    async fn list_by_post(
        &self,
        post_id: PostId,
        viewer: Option<UserId>,
    ) -> Result<Vec<CommentView>, CommentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<CommentWithAuthor> = comments::table
            .inner_join(users::table)
            .filter(comments::post_id.eq(post_id.get()))
            .select((CommentRow::as_select(), users::username))
            .order_by((comments::created_at.asc(), comments::id.asc()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        into_views(&mut conn, rows, viewer).await
    }

    async fn create(
        &self,
        comment: NewComment,
        draft: &CommentDraft,
    ) -> Result<Comment, CommentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: CommentRow = diesel::insert_into(comments::table)
            .values(&NewCommentRow {
                post_id: comment.post_id.get(),
                user_id: comment.user_id.get(),
                parent_comment_id: comment.parent_comment_id.map(CommentId::get),
                content: draft.content(),
            })
            .returning(CommentRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| match foreign_key_constraint(&err) {
                Some(constraint) if constraint.contains("parent_comment_id") => {
                    let parent = comment.parent_comment_id.map_or(0, CommentId::get);
                    CommentRepositoryError::not_found(parent)
                }
                Some(constraint) if constraint.contains("post_id") => {
                    CommentRepositoryError::post_not_found(comment.post_id.get())
                }
                _ => map_diesel_error(err),
            })?;

        row_to_comment(row).map_err(CommentRepositoryError::query)
    }

    async fn update_content(
        &self,
        id: CommentId,
        draft: &CommentDraft,
    ) -> Result<Option<Comment>, CommentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<CommentRow> = diesel::update(
            comments::table
                .filter(comments::id.eq(id.get()))
                .filter(comments::deleted.eq(false)),
        )
        .set(&CommentUpdate {
            content: draft.content(),
            updated_at: Utc::now(),
        })
        .returning(CommentRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;

        row.map(row_to_comment)
            .transpose()
            .map_err(CommentRepositoryError::query)
    }

    async fn mark_deleted(&self, id: CommentId) -> Result<(), CommentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // Already deleted rows still match, so repeats succeed.
        let updated = diesel::update(comments::table.find(id.get()))
            .set(comments::deleted.eq(true))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        if updated == 0 {
            return Err(CommentRepositoryError::not_found(id.get()));
        }
        Ok(())
    }
}
