//! User account model.
//!
//! `id` and `email` are the immutable keys of an account; only the profile
//! (names and about text) is editable through the admin panel.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Validation errors raised by the user value constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyId,
    InvalidId,
    EmptyEmail,
    InvalidEmail,
    UnknownRole(String),
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
            Self::InvalidId => write!(f, "user id must be a valid UUID"),
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::InvalidEmail => write!(f, "email must contain a single '@'"),
            Self::UnknownRole(label) => write!(f, "unknown role label: {label}"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
pub struct UserId(Uuid);

impl UserId {
    /// Parse an identifier from its textual form.
    ///
    /// Surrounding whitespace is rejected rather than trimmed.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let raw = id.as_ref();
        if raw.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if raw.trim() != raw {
            return Err(UserValidationError::InvalidId);
        }
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for UserId {
    type Err = UserValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Login email of an account.
///
/// ## Invariants
/// - Trimmed and non-empty.
/// - Contains exactly one `@` with text on both sides.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String, example = "ada@example.com")]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn new(email: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = email.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        match trimmed.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {
                Ok(Self(trimmed.to_owned()))
            }
            _ => Err(UserValidationError::InvalidEmail),
        }
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Authorization level attached to an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    /// Stored label, e.g. `ADMIN`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::User => "USER",
        }
    }

    /// Lower-case label used when rendering role badges.
    pub fn label(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UserValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ADMIN" => Ok(Self::Admin),
            "USER" => Ok(Self::User),
            _ => Err(UserValidationError::UnknownRole(s.to_owned())),
        }
    }
}

/// Editable profile fields of an account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub first_name: String,
    pub last_name: String,
    pub about: String,
}

/// Application user.
///
/// ## Invariants
/// - `roles` keeps insertion order and holds no duplicates.
///
/// # Examples
/// ```
/// use admin_panel::domain::{EmailAddress, Role, User, UserId, UserProfile};
///
/// let user = User::new(
///     UserId::random(),
///     EmailAddress::new("ada@example.com").unwrap(),
///     UserProfile {
///         first_name: "Ada".into(),
///         last_name: "Lovelace".into(),
///         about: String::new(),
///     },
///     [Role::Admin, Role::Admin],
/// );
/// assert_eq!(user.roles(), &[Role::Admin]);
/// assert_eq!(user.display_name(), "Ada Lovelace");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: UserId,
    email: EmailAddress,
    #[serde(flatten)]
    profile: UserProfile,
    roles: Vec<Role>,
}

impl User {
    pub fn new(
        id: UserId,
        email: EmailAddress,
        profile: UserProfile,
        roles: impl IntoIterator<Item = Role>,
    ) -> Self {
        let mut unique = Vec::new();
        for role in roles {
            if !unique.contains(&role) {
                unique.push(role);
            }
        }
        Self {
            id,
            email,
            profile,
            roles: unique,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }

    /// Full name, or the email when both name fields are blank.
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.profile.first_name.trim(), self.profile.last_name.trim());
        let full = full.trim();
        if full.is_empty() {
            self.email.to_string()
        } else {
            full.to_owned()
        }
    }

    /// Copy of this user carrying a replacement profile.
    pub fn with_profile(mut self, profile: UserProfile) -> Self {
        self.profile = profile;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    const ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

    fn user(first: &str, last: &str) -> User {
        User::new(
            UserId::new(ID).expect("fixture id"),
            EmailAddress::new("ada@example.com").expect("fixture email"),
            UserProfile {
                first_name: first.to_owned(),
                last_name: last.to_owned(),
                about: "Analyst".to_owned(),
            },
            [Role::User, Role::Admin, Role::User],
        )
    }

    #[rstest]
    #[case("", UserValidationError::EmptyId)]
    #[case("not-a-uuid", UserValidationError::InvalidId)]
    #[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6", UserValidationError::InvalidId)]
    fn user_id_rejects_bad_input(#[case] raw: &str, #[case] expected: UserValidationError) {
        assert_eq!(UserId::new(raw), Err(expected));
    }

    #[rstest]
    #[case("", UserValidationError::EmptyEmail)]
    #[case("   ", UserValidationError::EmptyEmail)]
    #[case("ada.example.com", UserValidationError::InvalidEmail)]
    #[case("@example.com", UserValidationError::InvalidEmail)]
    #[case("ada@", UserValidationError::InvalidEmail)]
    #[case("a@b@c", UserValidationError::InvalidEmail)]
    fn email_rejects_bad_input(#[case] raw: &str, #[case] expected: UserValidationError) {
        assert_eq!(EmailAddress::new(raw), Err(expected));
    }

    #[rstest]
    fn email_is_trimmed() {
        let email = EmailAddress::new("  ada@example.com ").expect("valid email");
        assert_eq!(email.as_ref(), "ada@example.com");
    }

    #[rstest]
    #[case("ADMIN", Role::Admin)]
    #[case("admin", Role::Admin)]
    #[case("USER", Role::User)]
    fn role_parses_labels(#[case] raw: &str, #[case] expected: Role) {
        assert_eq!(raw.parse::<Role>(), Ok(expected));
    }

    #[rstest]
    fn role_rejects_unknown_label() {
        assert!(matches!(
            "OWNER".parse::<Role>(),
            Err(UserValidationError::UnknownRole(label)) if label == "OWNER"
        ));
    }

    #[rstest]
    fn roles_are_deduplicated_in_order() {
        let user = user("Ada", "Lovelace");
        assert_eq!(user.roles(), &[Role::User, Role::Admin]);
        assert!(user.is_admin());
    }

    #[rstest]
    #[case("Ada", "Lovelace", "Ada Lovelace")]
    #[case("Ada", "", "Ada")]
    #[case(" ", "Lovelace", "Lovelace")]
    #[case("", "  ", "ada@example.com")]
    fn display_name_falls_back_to_email(
        #[case] first: &str,
        #[case] last: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(user(first, last).display_name(), expected);
    }

    #[rstest]
    fn serialises_flat_camel_case_record() {
        let value = serde_json::to_value(user("Ada", "Lovelace")).expect("serialise user");
        assert_eq!(
            value,
            json!({
                "id": ID,
                "email": "ada@example.com",
                "firstName": "Ada",
                "lastName": "Lovelace",
                "about": "Analyst",
                "roles": ["USER", "ADMIN"],
            })
        );
    }
}
