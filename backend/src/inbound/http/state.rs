//! Shared HTTP adapter state.
//!
//! Handlers receive this via `web::Data` and depend only on domain ports plus
//! the compiled templates, so they stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{LoginService, UserProfileCommand, UsersQuery};

use super::views::Views;

/// Port implementations used by the HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub login: Arc<dyn LoginService>,
    pub users: Arc<dyn UsersQuery>,
    pub profiles: Arc<dyn UserProfileCommand>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub users: Arc<dyn UsersQuery>,
    pub profiles: Arc<dyn UserProfileCommand>,
    pub views: Arc<Views>,
}

impl HttpState {
    /// Bundle ports with the compiled templates.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use admin_panel::domain::{PasswordLoginService, UserAdminService};
    /// use admin_panel::inbound::http::state::{HttpState, HttpStatePorts};
    /// use admin_panel::inbound::http::views::Views;
    /// use admin_panel::outbound::memory::InMemoryUserRepository;
    ///
    /// let repo = Arc::new(InMemoryUserRepository::new());
    /// let admin = Arc::new(UserAdminService::new(repo.clone()));
    /// let state = HttpState::new(
    ///     HttpStatePorts {
    ///         login: Arc::new(PasswordLoginService::new(repo)),
    ///         users: admin.clone(),
    ///         profiles: admin,
    ///     },
    ///     Arc::new(Views::new().expect("templates")),
    /// );
    /// let _users = state.users.clone();
    /// ```
    pub fn new(ports: HttpStatePorts, views: Arc<Views>) -> Self {
        let HttpStatePorts {
            login,
            users,
            profiles,
        } = ports;
        Self {
            login,
            users,
            profiles,
            views,
        }
    }
}
