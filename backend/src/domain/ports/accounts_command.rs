//! Driving port for registration and login.
//!
//! The forum authenticates by username alone; there are no passwords. HTTP
//! handlers call this port and then store the returned user id in the session.

use async_trait::async_trait;

use crate::domain::{Error, User, Username};

/// Use-cases that establish who the requester is.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountsCommand: Send + Sync {
    /// Create an account. A taken username yields a conflict.
    async fn register(&self, username: Username) -> Result<User, Error>;

    /// Resolve an existing account. An unknown username yields not-found.
    async fn login(&self, username: Username) -> Result<User, Error>;
}
