//! Driving port for editing user profiles.

use async_trait::async_trait;

use crate::domain::{Error, User, UserProfileUpdate};

/// Write-side use case behind the user edit form.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserProfileCommand: Send + Sync {
    /// Apply a validated profile change and return the stored user.
    ///
    /// Fails with [`crate::domain::ErrorCode::NotFound`] when no account
    /// matches both the id and email of `update`.
    async fn update_user(&self, update: UserProfileUpdate) -> Result<User, Error>;
}
