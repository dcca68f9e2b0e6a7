//! Domain primitives, services and ports.
//!
//! Purpose: keep the user administration rules free of HTTP and SQL
//! concerns. Inbound adapters call the driving ports implemented here;
//! outbound adapters implement [`ports::UserRepository`].
//!
//! Public surface:
//! - [`User`], [`UserId`], [`EmailAddress`], [`Role`], [`UserProfile`].
//! - [`UserUpdateSubmission`] and its validation into [`UserProfileUpdate`].
//! - [`AdminAccess`], the admin gate decision.
//! - [`UserAdminService`], [`PasswordLoginService`] and the bootstrap step.
//! - [`Error`] / [`ErrorCode`] with the request [`TraceId`].

pub mod admin_access;
pub mod auth;
pub mod bootstrap;
pub mod error;
pub mod password_login_service;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod user_admin_service;
pub mod user_update;

pub use self::admin_access::{AccessDenial, AdminAccess};
pub use self::auth::{LoginCredentials, LoginValidationError, PasswordHash, PasswordHashError};
pub use self::bootstrap::{BootstrapAdmin, ensure_bootstrap_admin};
pub use self::error::{Error, ErrorCode};
pub use self::password_login_service::PasswordLoginService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{EmailAddress, Role, User, UserId, UserProfile, UserValidationError};
pub use self::user_admin_service::UserAdminService;
pub use self::user_update::{UserProfileUpdate, UserUpdateRejection, UserUpdateSubmission};
