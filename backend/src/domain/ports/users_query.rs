//! Driving port for reading user accounts.
//!
//! Admin pages load users through this port so handlers never touch the
//! persistence layer directly.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Read-side use cases of the admin panel.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// All users in repository order.
    async fn list_users(&self) -> Result<Vec<User>, Error>;

    /// A single user, or `None` when the id is unknown.
    async fn find_user(&self, id: &UserId) -> Result<Option<User>, Error>;
}
