//! Password-based `LoginService` built on the user repository.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error};

use crate::domain::ports::{LoginService, UserRepository};
use crate::domain::user_admin_service::map_persistence_error;
use crate::domain::{Error, LoginCredentials, UserId};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Authenticates email/password pairs against stored bcrypt hashes.
#[derive(Clone)]
pub struct PasswordLoginService<R> {
    repository: Arc<R>,
}

impl<R> PasswordLoginService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> LoginService for PasswordLoginService<R>
where
    R: UserRepository,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        let Some(stored) = self
            .repository
            .find_credentials(credentials.email())
            .await
            .map_err(map_persistence_error)?
        else {
            debug!("login attempt for unknown email");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };

        // bcrypt is deliberately slow; keep it off the async workers.
        let password = credentials.password().to_owned();
        let hash = stored.password_hash.clone();
        let matches = tokio::task::spawn_blocking(move || hash.verify(&password))
            .await
            .map_err(|err| {
                error!(error = %err, "password verification task failed");
                Error::internal("password verification failed")
            })?;

        if matches {
            Ok(stored.user_id)
        } else {
            debug!(user_id = %stored.user_id, "login attempt with wrong password");
            Err(Error::unauthorized(INVALID_CREDENTIALS))
        }
    }
}
