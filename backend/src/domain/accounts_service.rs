//! Account registration, login, and user lookup.
//!
//! Identity is a username alone. Registration checks for an existing name
//! before inserting, and the repository's uniqueness error covers the race
//! where two registrations for the same name interleave.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{AccountsCommand, UserRepository, UserRepositoryError, UsersQuery};
use crate::domain::{Error, User, UserId, Username};

/// Service implementing [`AccountsCommand`] and [`UsersQuery`].
#[derive(Clone)]
pub struct AccountService<U> {
    users: Arc<U>,
}

impl<U> AccountService<U> {
    /// Create a new service backed by the given user repository.
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }
}

fn map_user_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserRepositoryError::DuplicateUsername { .. } => username_taken(),
    }
}

fn username_taken() -> Error {
    Error::conflict("username already taken")
}

#[async_trait]
impl<U> AccountsCommand for AccountService<U>
where
    U: UserRepository,
{
    async fn register(&self, username: Username) -> Result<User, Error> {
        let existing = self
            .users
            .find_by_username(&username)
            .await
            .map_err(map_user_error)?;
        if existing.is_some() {
            return Err(username_taken());
        }

        let user = self
            .users
            .create(&username)
            .await
            .map_err(map_user_error)?;
        info!(user_id = %user.id, "registered user");
        Ok(user)
    }

    async fn login(&self, username: Username) -> Result<User, Error> {
        self.users
            .find_by_username(&username)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::not_found("user not found, please register"))
    }
}

#[async_trait]
impl<U> UsersQuery for AccountService<U>
where
    U: UserRepository,
{
    async fn get_user(&self, id: UserId) -> Result<User, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::not_found(format!("user {id} not found")))
    }
}

#[cfg(test)]
#[path = "accounts_service_tests.rs"]
mod tests;
