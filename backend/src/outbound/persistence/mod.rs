//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! This module provides concrete implementations of the forum repository
//! ports backed by PostgreSQL via the Diesel ORM with async support through
//! `diesel-async` and `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: Repository implementations only translate between
//!   Diesel models and domain types. Ownership checks and redaction live in
//!   the domain services.
//! - **Internal models**: Diesel row structs (`models.rs`) and schema
//!   definitions (`schema.rs`) are internal implementation details, never
//!   exposed to the domain layer.
//! - **Transactional counters**: `posts.likes` and `comments.likes` are only
//!   written by [`DieselLikeRepository`], inside the toggle transaction.
//!
//! # Example
//!
//! ```ignore
//! use forum_backend::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/forum")).await?;
//! let users = DieselUserRepository::new(pool.clone());
//! ```

mod diesel_comment_repository;
pub(crate) mod diesel_helpers;
mod diesel_like_repository;
mod diesel_post_repository;
mod diesel_topic_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_comment_repository::DieselCommentRepository;
pub use diesel_like_repository::DieselLikeRepository;
pub use diesel_post_repository::DieselPostRepository;
pub use diesel_topic_repository::DieselTopicRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DEFAULT_CONNECTION_TIMEOUT, DEFAULT_MAX_SIZE, DbPool, PoolConfig, PoolError};
