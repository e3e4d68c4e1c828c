//! Port for the toggle-like engine.
//!
//! Adapters must perform the whole toggle as one unit of work:
//!
//! 1. lock the target row, failing with `TargetNotFound` if it is absent and
//!    `TargetDeleted` if it is a soft-deleted comment;
//! 2. check whether the `(target, user)` like row exists;
//! 3. delete it and decrement the counter, or insert it and increment;
//! 4. commit.
//!
//! Any failure rolls everything back, so the counter never drifts from the
//! number of like rows.

use async_trait::async_trait;

use crate::domain::{LikeTarget, LikeToggle, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by like repository adapters.
    pub enum LikeRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "like repository connection failed: {message}",
        /// Query or mutation failed; the toggle was rolled back.
        Query { message: String } => "like repository query failed: {message}",
        /// The post or comment does not exist.
        TargetNotFound { target: String } => "{target} not found",
        /// The comment was soft-deleted and no longer accepts likes.
        TargetDeleted { target: String } => "{target} has been deleted",
        /// A concurrent toggle for the same pair won; the caller may retry.
        Conflict { target: String } => "concurrent like update on {target}",
    }
}

/// Atomic like/unlike toggling with counter maintenance.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LikeRepository: Send + Sync {
    /// Flip whether `user` likes `target` and return the new state.
    async fn toggle(
        &self,
        target: LikeTarget,
        user: UserId,
    ) -> Result<LikeToggle, LikeRepositoryError>;
}
