//! Validation of submitted user edit forms.
//!
//! A submission arrives with every field optional. Checks run in a fixed
//! order and stop at the first failure: email, then id, then the profile
//! fields as a whole.

use std::fmt;

use super::{UserId, UserProfile};

/// Raw user edit form as received from the browser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserUpdateSubmission {
    pub id: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub about: Option<String>,
}

/// Validated profile change ready for the persistence layer.
///
/// `id` and `email` select the row; only `profile` is written. The email is
/// trimmed and matches the stored address regardless of case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfileUpdate {
    pub id: UserId,
    pub email: String,
    pub profile: UserProfile,
}

impl UserProfileUpdate {
    /// Whether `stored` is the address this update was submitted for.
    pub fn matches_email(&self, stored: &str) -> bool {
        stored.trim().to_lowercase() == self.email.trim().to_lowercase()
    }
}

/// Reason a submission was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserUpdateRejection {
    EmptyEmail,
    EmptyId,
    InvalidId,
    IdMismatch,
    IncompleteForm,
}

impl UserUpdateRejection {
    /// Form field the rejection belongs to, or `None` for form-level errors.
    pub fn field(self) -> Option<&'static str> {
        match self {
            Self::EmptyEmail => Some("email"),
            Self::EmptyId | Self::InvalidId | Self::IdMismatch => Some("id"),
            Self::IncompleteForm => None,
        }
    }
}

impl fmt::Display for UserUpdateRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Self::EmptyEmail => "Email is empty",
            Self::EmptyId => "User Id is empty",
            Self::InvalidId => "User Id is invalid",
            Self::IdMismatch => "User Id does not match the edited user",
            Self::IncompleteForm => "Form not submitted correctly.",
        };
        f.write_str(message)
    }
}

impl std::error::Error for UserUpdateRejection {}

impl UserUpdateSubmission {
    /// Validate the submission for the user addressed by the route.
    ///
    /// # Examples
    /// ```
    /// use admin_panel::domain::{UserId, UserUpdateRejection, UserUpdateSubmission};
    ///
    /// let route = UserId::random();
    /// let missing_email = UserUpdateSubmission {
    ///     id: Some(route.to_string()),
    ///     ..UserUpdateSubmission::default()
    /// };
    /// assert_eq!(missing_email.validate(&route), Err(UserUpdateRejection::EmptyEmail));
    /// ```
    pub fn validate(self, route_id: &UserId) -> Result<UserProfileUpdate, UserUpdateRejection> {
        let email = self
            .email
            .filter(|email| !email.is_empty())
            .ok_or(UserUpdateRejection::EmptyEmail)?;

        let raw_id = self
            .id
            .filter(|id| !id.is_empty())
            .ok_or(UserUpdateRejection::EmptyId)?;
        let id = UserId::new(&raw_id).map_err(|_| UserUpdateRejection::InvalidId)?;
        if &id != route_id {
            return Err(UserUpdateRejection::IdMismatch);
        }

        let (Some(first_name), Some(last_name), Some(about)) =
            (self.first_name, self.last_name, self.about)
        else {
            return Err(UserUpdateRejection::IncompleteForm);
        };

        Ok(UserProfileUpdate {
            id,
            email: email.trim().to_owned(),
            profile: UserProfile {
                first_name,
                last_name,
                about,
            },
        })
    }
}
