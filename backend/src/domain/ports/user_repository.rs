//! Driven port for user account storage and its errors.
use async_trait::async_trait;

use crate::domain::{PasswordHash, User, UserId, UserProfileUpdate};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
    }
}

/// Login material stored for an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCredentials {
    pub user_id: UserId,
    pub password_hash: PasswordHash,
}

/// Storage for user accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Every user, oldest first, ties broken by email.
    async fn list_all(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Overwrite the profile of the row matching both `id` and `email`.
    ///
    /// Returns `None` when no row matches.
    async fn update_profile(
        &self,
        update: &UserProfileUpdate,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Look up login material by email.
    async fn find_credentials(
        &self,
        email: &str,
    ) -> Result<Option<StoredCredentials>, UserPersistenceError>;

    /// Insert `user` unless an account with the same email exists.
    ///
    /// Returns `true` when a row was written.
    async fn insert_if_absent(
        &self,
        user: &User,
        password_hash: &PasswordHash,
    ) -> Result<bool, UserPersistenceError>;
}
