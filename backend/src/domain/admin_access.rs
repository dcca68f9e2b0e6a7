//! Admin area access decision.
//!
//! Resolves a session identity to one of three outcomes before any admin page
//! loads data: sign in first, go away, or proceed as the resolved admin.

use crate::domain::ports::UsersQuery;
use crate::domain::{Error, Role, User, UserId};

/// Why an identified caller was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDenial {
    /// The session names a user that no longer exists.
    UnknownUser,
    /// The user exists but lacks the admin role.
    MissingRole,
}

/// Outcome of the admin gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminAccess {
    Granted(User),
    SignInRequired,
    Denied(AccessDenial),
}

impl AdminAccess {
    /// Decide access for an already loaded user record.
    pub fn for_user(user: Option<User>) -> Self {
        match user {
            None => Self::Denied(AccessDenial::UnknownUser),
            Some(user) if user.has_role(Role::Admin) => Self::Granted(user),
            Some(_) => Self::Denied(AccessDenial::MissingRole),
        }
    }

    /// Resolve the session identity through `users`.
    ///
    /// No lookup happens when the caller has no identity.
    pub async fn resolve(users: &dyn UsersQuery, identity: Option<UserId>) -> Result<Self, Error> {
        let Some(id) = identity else {
            return Ok(Self::SignInRequired);
        };
        let user = users.find_user(&id).await?;
        Ok(Self::for_user(user))
    }
}
