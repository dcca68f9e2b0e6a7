//! Startup provisioning of the first administrator account.

use tracing::info;
use zeroize::Zeroizing;

use crate::domain::ports::UserRepository;
use crate::domain::user_admin_service::map_persistence_error;
use crate::domain::{EmailAddress, Error, PasswordHash, Role, User, UserId, UserProfile};

/// Credentials of the administrator created at startup.
#[derive(Debug, Clone)]
pub struct BootstrapAdmin {
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl BootstrapAdmin {
    pub fn new(email: EmailAddress, password: impl Into<String>) -> Self {
        Self {
            email,
            password: Zeroizing::new(password.into()),
        }
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }
}

/// Create the bootstrap administrator unless its email is already taken.
///
/// Returns `true` when a new account was written. An existing account is left
/// untouched, including its roles and password.
pub async fn ensure_bootstrap_admin<R>(
    repository: &R,
    admin: &BootstrapAdmin,
    hash_cost: u32,
) -> Result<bool, Error>
where
    R: UserRepository + ?Sized,
{
    let hash = PasswordHash::create(&admin.password, hash_cost)
        .map_err(|err| Error::internal(err.to_string()))?;
    let user = User::new(
        UserId::random(),
        admin.email.clone(),
        UserProfile::default(),
        [Role::Admin],
    );
    let inserted = repository
        .insert_if_absent(&user, &hash)
        .await
        .map_err(map_persistence_error)?;
    if inserted {
        info!(email = %admin.email, user_id = %user.id(), "bootstrap administrator created");
    } else {
        info!(email = %admin.email, "bootstrap administrator already present");
    }
    Ok(inserted)
}
