//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{comment_likes, comments, post_likes, posts, topics, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub username: &'a str,
}

// ---------------------------------------------------------------------------
// Topic models
// ---------------------------------------------------------------------------

/// Row struct for reading from the topics table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = topics)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TopicRow {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating topic records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = topics)]
pub(crate) struct NewTopicRow<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub created_by: i64,
}

/// Changeset for replacing a topic's text fields.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = topics)]
pub(crate) struct TopicUpdate<'a> {
    pub title: &'a str,
    pub description: &'a str,
}

// ---------------------------------------------------------------------------
// Post models
// ---------------------------------------------------------------------------

/// Row struct for reading from the posts table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = posts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PostRow {
    pub id: i64,
    pub topic_id: i64,
    pub user_id: i64,
    pub title: String,
    pub content: String,
    pub likes: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating post records. `likes` starts at zero.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = posts)]
pub(crate) struct NewPostRow<'a> {
    pub topic_id: i64,
    pub user_id: i64,
    pub title: &'a str,
    pub content: &'a str,
}

/// Changeset for editing a post. Never touches `likes`.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = posts)]
pub(crate) struct PostUpdate<'a> {
    pub title: &'a str,
    pub content: &'a str,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Comment models
// ---------------------------------------------------------------------------

/// Row struct for reading from the comments table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CommentRow {
    pub id: i64,
    pub post_id: i64,
    pub user_id: i64,
    pub parent_comment_id: Option<i64>,
    pub content: String,
    pub likes: i64,
    pub deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating comment records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = comments)]
pub(crate) struct NewCommentRow<'a> {
    pub post_id: i64,
    pub user_id: i64,
    pub parent_comment_id: Option<i64>,
    pub content: &'a str,
}

/// Changeset for editing a comment body.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = comments)]
pub(crate) struct CommentUpdate<'a> {
    pub content: &'a str,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Like relation models
// ---------------------------------------------------------------------------

/// Insertable like on a post.
#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = post_likes)]
pub(crate) struct NewPostLikeRow {
    pub post_id: i64,
    pub user_id: i64,
}

/// Insertable like on a comment.
#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = comment_likes)]
pub(crate) struct NewCommentLikeRow {
    pub comment_id: i64,
    pub user_id: i64,
}
