//! Driving port for user lookups.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Read-side use-cases for users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Fetch a user by id, failing with not-found when absent.
    async fn get_user(&self, id: UserId) -> Result<User, Error>;
}
