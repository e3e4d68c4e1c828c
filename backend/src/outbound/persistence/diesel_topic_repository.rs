//! PostgreSQL-backed `TopicRepository` implementation using Diesel ORM.
//!
//! Topic summaries are assembled from two queries: the topics joined to their
//! creators, then one grouped count over `posts` for the loaded ids.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::dsl::count_star;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::{TopicRepository, TopicRepositoryError};
use crate::domain::{
    Page, SearchTerm, Topic, TopicDraft, TopicId, TopicSummary, UserId,
};

use super::diesel_helpers::{
    collect_rows, map_basic_diesel_error, map_pool_error_message, stored_id,
};
use super::models::{NewTopicRow, TopicRow, TopicUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::{posts, topics, users};

/// Diesel-backed implementation of the `TopicRepository` port.
#[derive(Clone)]
pub struct DieselTopicRepository {
    pool: DbPool,
}

impl DieselTopicRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> TopicRepositoryError {
    TopicRepositoryError::connection(map_pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> TopicRepositoryError {
    map_basic_diesel_error(
        error,
        TopicRepositoryError::query,
        TopicRepositoryError::connection,
    )
}

fn row_to_topic(row: TopicRow) -> Result<Topic, String> {
    Ok(Topic {
        id: stored_id(row.id, TopicId::new)?,
        title: row.title,
        description: row.description,
        created_by: stored_id(row.created_by, UserId::new)?,
        created_at: row.created_at,
    })
}

type TopicWithCreator = (TopicRow, String);

/// Attach post counts to loaded topics, preserving their order.
async fn summarise(
    conn: &mut AsyncPgConnection,
    rows: Vec<TopicWithCreator>,
) -> Result<Vec<TopicSummary>, TopicRepositoryError> {
    let ids: Vec<i64> = rows.iter().map(|(row, _)| row.id).collect();
    let counts: HashMap<i64, i64> = if ids.is_empty() {
        HashMap::new()
    } else {
        posts::table
            .filter(posts::topic_id.eq_any(&ids))
            .group_by(posts::topic_id)
            .select((posts::topic_id, count_star()))
            .load::<(i64, i64)>(conn)
            .await
            .map_err(map_diesel_error)?
            .into_iter()
            .collect()
    };

    collect_rows(
        rows.into_iter().map(|(row, username)| {
            let post_count = counts.get(&row.id).copied().unwrap_or(0);
            row_to_topic(row).map(|topic| TopicSummary {
                topic,
                created_by_username: username,
                post_count,
            })
        }),
        TopicRepositoryError::query,
    )
}

#[async_trait]
impl TopicRepository for DieselTopicRepository {
    async fn list(&self, page: Option<Page>) -> Result<Vec<TopicSummary>, TopicRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = topics::table
            .inner_join(users::table)
            .select((TopicRow::as_select(), users::username))
            .order_by((topics::created_at.desc(), topics::id.desc()))
            .into_boxed();
        if let Some(page) = page {
            query = query
                .limit(i64::from(page.limit()))
                .offset(i64::from(page.offset()));
        }

        let rows: Vec<TopicWithCreator> = query.load(&mut conn).await.map_err(map_diesel_error)?;
        summarise(&mut conn, rows).await
    }

    async fn find_by_id(
        &self,
        id: TopicId,
    ) -> Result<Option<TopicSummary>, TopicRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<TopicWithCreator> = topics::table
            .inner_join(users::table)
            .filter(topics::id.eq(id.get()))
            .select((TopicRow::as_select(), users::username))
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        let Some(row) = row else {
            return Ok(None);
        };
        Ok(summarise(&mut conn, vec![row]).await?.pop())
    }

    async fn create(
        &self,
        owner: UserId,
        draft: &TopicDraft,
    ) -> Result<Topic, TopicRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: TopicRow = diesel::insert_into(topics::table)
            .values(&NewTopicRow {
                title: draft.title(),
                description: draft.description(),
                created_by: owner.get(),
            })
            .returning(TopicRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_topic(row).map_err(TopicRepositoryError::query)
    }

    async fn update(
        &self,
        id: TopicId,
        draft: &TopicDraft,
    ) -> Result<Option<Topic>, TopicRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<TopicRow> = diesel::update(topics::table.find(id.get()))
            .set(&TopicUpdate {
                title: draft.title(),
                description: draft.description(),
            })
            .returning(TopicRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_topic)
            .transpose()
            .map_err(TopicRepositoryError::query)
    }

    async fn delete(&self, id: TopicId) -> Result<bool, TopicRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let removed = diesel::delete(topics::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(removed > 0)
    }

    async fn search(
        &self,
        term: &SearchTerm,
        limit: u32,
    ) -> Result<Vec<TopicSummary>, TopicRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let pattern = term.contains_pattern();

        let rows: Vec<TopicWithCreator> = topics::table
            .inner_join(users::table)
            .filter(
                topics::title
                    .ilike(&pattern)
                    .or(topics::description.ilike(&pattern)),
            )
            .select((TopicRow::as_select(), users::username))
            .order_by((topics::created_at.desc(), topics::id.desc()))
            .limit(i64::from(limit))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        summarise(&mut conn, rows).await
    }
}
