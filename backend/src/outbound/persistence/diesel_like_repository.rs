//! PostgreSQL-backed toggle-like engine.
//!
//! Each toggle runs in one transaction: lock the target row with
//! `SELECT ... FOR UPDATE` (refusing soft-deleted comments), check for the
//! `(target, user)` like row, delete or insert it, and move the target's
//! `likes` counter by one in the same direction. The row lock serialises
//! toggles on one target, so the counter and the relation cannot drift apart.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::AsyncConnection as _;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::ports::{LikeRepository, LikeRepositoryError};
use crate::domain::{LikeTarget, LikeToggle, UserId};

use super::diesel_helpers::{is_unique_violation, map_basic_diesel_error, map_pool_error_message};
use super::models::{NewCommentLikeRow, NewPostLikeRow};
use super::pool::{DbPool, PoolError};
use super::schema::{comment_likes, comments, post_likes, posts};

/// Diesel-backed implementation of the `LikeRepository` port.
#[derive(Clone)]
pub struct DieselLikeRepository {
    pool: DbPool,
}

impl DieselLikeRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Failure inside the toggle transaction.
#[derive(Debug, thiserror::Error)]
enum ToggleError {
    #[error("like target not found")]
    Missing,
    #[error("like target has been deleted")]
    Deleted,
    #[error(transparent)]
    Diesel(#[from] diesel::result::Error),
}

fn map_pool_error(error: PoolError) -> LikeRepositoryError {
    LikeRepositoryError::connection(map_pool_error_message(error))
}

fn map_toggle_error(error: ToggleError, target: LikeTarget) -> LikeRepositoryError {
    match error {
        ToggleError::Missing => LikeRepositoryError::target_not_found(target.to_string()),
        ToggleError::Deleted => LikeRepositoryError::target_deleted(target.to_string()),
        ToggleError::Diesel(err) if is_unique_violation(&err) => {
            debug!(%target, "concurrent like insert lost the race");
            LikeRepositoryError::conflict(target.to_string())
        }
        ToggleError::Diesel(err) => map_basic_diesel_error(
            err,
            LikeRepositoryError::query,
            LikeRepositoryError::connection,
        ),
    }
}

/// Lock a post row and return its current counter.
async fn lock_post(conn: &mut AsyncPgConnection, post_id: i64) -> Result<i64, ToggleError> {
    posts::table
        .find(post_id)
        .select(posts::likes)
        .for_update()
        .first(conn)
        .await
        .optional()?
        .ok_or(ToggleError::Missing)
}

/// Lock a comment row and return its current counter.
///
/// The deleted flag is read under the same lock, so a delete that commits
/// first always wins over a like.
async fn lock_comment(conn: &mut AsyncPgConnection, comment_id: i64) -> Result<i64, ToggleError> {
    let (likes, deleted): (i64, bool) = comments::table
        .find(comment_id)
        .select((comments::likes, comments::deleted))
        .for_update()
        .first(conn)
        .await
        .optional()?
        .ok_or(ToggleError::Missing)?;
    if deleted {
        return Err(ToggleError::Deleted);
    }
    Ok(likes)
}

/// Toggle body shared by both target kinds, run after the target row is locked.
///
/// `$entity` is the counted table, `$likes` its like relation, `$fk` the
/// relation column referencing `$entity`, and `$prior` the locked counter.
macro_rules! toggle_locked {
    (
        $conn:expr,
        $entity_id:expr,
        $user_id:expr,
        prior: $prior:expr,
        entity: $entity:ident,
        likes: $likes:ident,
        fk: $fk:ident,
        new_row: $new_row:expr
    ) => {{
        let conn: &mut AsyncPgConnection = $conn;
        let entity_id: i64 = $entity_id;
        let user_id: i64 = $user_id;
        let prior: i64 = $prior;

        let already_liked: bool = diesel::select(diesel::dsl::exists(
            $likes::table
                .filter($likes::$fk.eq(entity_id))
                .filter($likes::user_id.eq(user_id)),
        ))
        .get_result(conn)
        .await?;

        let outcome = if already_liked {
            diesel::delete(
                $likes::table
                    .filter($likes::$fk.eq(entity_id))
                    .filter($likes::user_id.eq(user_id)),
            )
            .execute(conn)
            .await?;
            LikeToggle::unliked(prior)
        } else {
            diesel::insert_into($likes::table)
                .values(&$new_row)
                .execute(conn)
                .await?;
            LikeToggle::liked(prior)
        };

        diesel::update($entity::table.find(entity_id))
            .set($entity::likes.eq(outcome.likes))
            .execute(conn)
            .await?;

        Ok(outcome)
    }};
}

async fn toggle_post(
    conn: &mut AsyncPgConnection,
    post_id: i64,
    user_id: i64,
) -> Result<LikeToggle, ToggleError> {
    let prior = lock_post(conn, post_id).await?;
    toggle_locked!(
        conn,
        post_id,
        user_id,
        prior: prior,
        entity: posts,
        likes: post_likes,
        fk: post_id,
        new_row: NewPostLikeRow { post_id, user_id }
    )
}

async fn toggle_comment(
    conn: &mut AsyncPgConnection,
    comment_id: i64,
    user_id: i64,
) -> Result<LikeToggle, ToggleError> {
    let prior = lock_comment(conn, comment_id).await?;
    toggle_locked!(
        conn,
        comment_id,
        user_id,
        prior: prior,
        entity: comments,
        likes: comment_likes,
        fk: comment_id,
        new_row: NewCommentLikeRow { comment_id, user_id }
    )
}

#[async_trait]
impl LikeRepository for DieselLikeRepository {
    async fn toggle(
        &self,
        target: LikeTarget,
        user: UserId,
    ) -> Result<LikeToggle, LikeRepositoryError> {
        let mut pooled = self.pool.get().await.map_err(map_pool_error)?;
        let conn: &mut AsyncPgConnection = &mut pooled;
        let user_id = user.get();

        let outcome = conn
            .transaction(|conn| {
                async move {
                    match target {
                        LikeTarget::Post(id) => toggle_post(conn, id.get(), user_id).await,
                        LikeTarget::Comment(id) => toggle_comment(conn, id.get(), user_id).await,
                    }
                }
                .scope_boxed()
            })
            .await
            .map_err(|err| map_toggle_error(err, target))?;

        debug!(%target, user_id, liked = outcome.liked_by_user, likes = outcome.likes, "like toggled");
        Ok(outcome)
    }
}
