//! User administration service.
//!
//! Implements the read and write driving ports of the admin panel on top of
//! a [`UserRepository`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{UserPersistenceError, UserProfileCommand, UserRepository, UsersQuery};
use crate::domain::{Error, User, UserId, UserProfileUpdate};

/// Translate repository failures into domain errors.
pub(crate) fn map_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

/// Service behind the admin user pages.
#[derive(Clone)]
pub struct UserAdminService<R> {
    repository: Arc<R>,
}

impl<R> UserAdminService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> UsersQuery for UserAdminService<R>
where
    R: UserRepository,
{
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        let users = self
            .repository
            .list_all()
            .await
            .map_err(map_persistence_error)?;
        debug!(count = users.len(), "listed users");
        Ok(users)
    }

    async fn find_user(&self, id: &UserId) -> Result<Option<User>, Error> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(map_persistence_error)
    }
}

#[async_trait]
impl<R> UserProfileCommand for UserAdminService<R>
where
    R: UserRepository,
{
    async fn update_user(&self, update: UserProfileUpdate) -> Result<User, Error> {
        let updated = self
            .repository
            .update_profile(&update)
            .await
            .map_err(map_persistence_error)?;
        match updated {
            Some(user) => {
                info!(user_id = %user.id(), "user profile updated");
                Ok(user)
            }
            None => Err(Error::not_found("User not found")),
        }
    }
}
