//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are used
//! by Diesel for compile-time query validation and type-safe SQL generation.
//!
//! # Maintenance
//!
//! When migrations change the schema, this file should be regenerated or
//! manually updated to reflect those changes. The `diesel print-schema`
//! command can generate these definitions from a live database.

diesel::table! {
    /// Registered forum users.
    users (id) {
        /// Primary key: `BIGSERIAL`.
        id -> Int8,
        /// Unique login name (7 to 15 characters).
        username -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Discussion topics grouping posts.
    topics (id) {
        id -> Int8,
        title -> Varchar,
        description -> Text,
        /// Owning user.
        created_by -> Int8,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Posts within a topic.
    posts (id) {
        id -> Int8,
        topic_id -> Int8,
        /// Owning user.
        user_id -> Int8,
        title -> Varchar,
        content -> Text,
        /// Denormalised count of `post_likes` rows for this post.
        likes -> Int8,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Comments on posts, optionally replying to another comment.
    comments (id) {
        id -> Int8,
        post_id -> Int8,
        /// Owning user.
        user_id -> Int8,
        parent_comment_id -> Nullable<Int8>,
        content -> Text,
        /// Denormalised count of `comment_likes` rows for this comment.
        likes -> Int8,
        /// Soft-delete flag; the row and its content are kept.
        deleted -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// One row per user liking a post.
    post_likes (post_id, user_id) {
        post_id -> Int8,
        user_id -> Int8,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// One row per user liking a comment.
    comment_likes (comment_id, user_id) {
        comment_id -> Int8,
        user_id -> Int8,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(topics -> users (created_by));
diesel::joinable!(posts -> topics (topic_id));
diesel::joinable!(posts -> users (user_id));
diesel::joinable!(comments -> posts (post_id));
diesel::joinable!(comments -> users (user_id));
diesel::joinable!(post_likes -> posts (post_id));
diesel::joinable!(post_likes -> users (user_id));
diesel::joinable!(comment_likes -> comments (comment_id));
diesel::joinable!(comment_likes -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    topics,
    posts,
    comments,
    post_likes,
    comment_likes,
);
