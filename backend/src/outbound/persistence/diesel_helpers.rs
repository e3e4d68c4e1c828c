//! Shared helpers for Diesel repository implementations.
//!
//! This module provides common utilities for database access including:
//! - Error mapping from pool and Diesel errors to port error constructors
//! - Constraint violation classification
//! - Row conversion helpers
//! - Viewer like lookups shared by the post and comment adapters

use std::collections::HashSet;

use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use tracing::{debug, warn};

use crate::domain::UserId;

use super::pool::PoolError;
use super::schema::{comment_likes, post_likes};

/// Extract a readable message from a pool error.
pub fn map_pool_error_message(error: PoolError) -> String {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    }
}

/// Map common Diesel error variants into query/connection constructors.
///
/// `NotFound` and query-builder failures map to query errors; a closed
/// connection maps to a connection error.
pub fn map_basic_diesel_error<E, Q, C>(error: DieselError, query: Q, connection: C) -> E
where
    Q: Fn(&'static str) -> E,
    C: Fn(&'static str) -> E,
{
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::SerializationFailure, _) => {
            query("transaction serialisation failure")
        }
        DieselError::DatabaseError(_, _) => query("database error"),
        _ => query("database error"),
    }
}

/// Whether the error is a unique or primary key violation.
pub fn is_unique_violation(error: &DieselError) -> bool {
    matches!(
        error,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)
    )
}

/// Name of the violated foreign key constraint, if `error` is one.
///
/// Falls back to the message text when the driver does not report a
/// constraint name. Violations that carry neither are logged.
pub fn foreign_key_constraint(error: &DieselError) -> Option<String> {
    let DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) = error else {
        return None;
    };
    if let Some(name) = info.constraint_name() {
        return Some(name.to_owned());
    }
    warn!(
        message = info.message(),
        "foreign key violation without constraint name"
    );
    Some(info.message().to_owned())
}

/// Collect row conversion results, mapping the first error through `map_err`.
pub fn collect_rows<T, E>(
    results: impl Iterator<Item = Result<T, String>>,
    map_err: impl FnOnce(String) -> E,
) -> Result<Vec<T>, E> {
    results.collect::<Result<Vec<_>, _>>().map_err(map_err)
}

/// Validate a stored key into a domain identifier.
pub fn stored_id<T, E>(raw: i64, convert: impl FnOnce(i64) -> Result<T, E>) -> Result<T, String>
where
    E: std::fmt::Display,
{
    convert(raw).map_err(|err| format!("invalid stored identifier: {err}"))
}

/// Post ids among `post_ids` that `viewer` likes. Empty for anonymous viewers.
pub async fn liked_post_ids(
    conn: &mut AsyncPgConnection,
    viewer: Option<UserId>,
    post_ids: &[i64],
) -> Result<HashSet<i64>, DieselError> {
    let Some(viewer) = viewer else {
        return Ok(HashSet::new());
    };
    if post_ids.is_empty() {
        return Ok(HashSet::new());
    }
    let liked: Vec<i64> = post_likes::table
        .filter(post_likes::user_id.eq(viewer.get()))
        .filter(post_likes::post_id.eq_any(post_ids))
        .select(post_likes::post_id)
        .load(conn)
        .await?;
    Ok(liked.into_iter().collect())
}

/// Comment ids among `comment_ids` that `viewer` likes. Empty for anonymous viewers.
pub async fn liked_comment_ids(
    conn: &mut AsyncPgConnection,
    viewer: Option<UserId>,
    comment_ids: &[i64],
) -> Result<HashSet<i64>, DieselError> {
    let Some(viewer) = viewer else {
        return Ok(HashSet::new());
    };
    if comment_ids.is_empty() {
        return Ok(HashSet::new());
    }
    let liked: Vec<i64> = comment_likes::table
        .filter(comment_likes::user_id.eq(viewer.get()))
        .filter(comment_likes::comment_id.eq_any(comment_ids))
        .select(comment_likes::comment_id)
        .load(conn)
        .await?;
    Ok(liked.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PostId;
    use rstest::rstest;

    #[derive(Debug, PartialEq, Eq)]
    enum Mapped {
        Query(&'static str),
        Connection(&'static str),
    }

    fn map(error: DieselError) -> Mapped {
        map_basic_diesel_error(error, Mapped::Query, Mapped::Connection)
    }

    #[rstest]
    fn not_found_maps_to_query() {
        assert_eq!(map(DieselError::NotFound), Mapped::Query("record not found"));
    }

    #[rstest]
    fn closed_connection_maps_to_connection() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new("connection reset".to_owned()),
        );
        assert_eq!(map(error), Mapped::Connection("database connection error"));
    }

    #[rstest]
    fn unique_violation_is_detected() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key".to_owned()),
        );
        assert!(is_unique_violation(&error));
        assert!(!is_unique_violation(&DieselError::NotFound));
    }

    #[rstest]
    fn foreign_key_violation_falls_back_to_message() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::ForeignKeyViolation,
            Box::new("violates posts_topic_id_fkey".to_owned()),
        );
        assert_eq!(
            foreign_key_constraint(&error).as_deref(),
            Some("violates posts_topic_id_fkey")
        );
        assert_eq!(foreign_key_constraint(&DieselError::NotFound), None);
    }

    #[rstest]
    fn stored_id_rejects_non_positive_keys() {
        assert!(stored_id(0, PostId::new).is_err());
        assert_eq!(
            stored_id(4, PostId::new).map(PostId::get),
            Ok(4)
        );
    }

    #[rstest]
    fn collect_rows_reports_first_failure() {
        let rows = vec![Ok(1), Err("bad row".to_owned()), Err("later".to_owned())];
        let result: Result<Vec<i32>, String> = collect_rows(rows.into_iter(), |err| err);
        assert_eq!(result, Err("bad row".to_owned()));
    }
}
