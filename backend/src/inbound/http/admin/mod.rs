//! Admin area: access gate, layout chrome and user management pages.
//!
//! Every route under `/admin` takes an [`AdminUser`], so the gate runs before
//! any loader or action.

pub mod access;
pub mod navigation;
pub mod users;

use actix_web::web;
use serde::Serialize;

pub use access::{AdminGateRejection, AdminUser};
use navigation::{NavLink, navigation_for};

/// Shared chrome for every admin page.
#[derive(Debug, Clone, Serialize)]
pub struct AdminLayout {
    pub title: String,
    pub user_name: String,
    pub user_email: String,
    pub nav: Vec<NavLink>,
}

impl AdminLayout {
    /// Layout for `admin` viewing the page at `path`.
    pub fn new(title: impl Into<String>, admin: &AdminUser, path: &str) -> Self {
        let user = admin.user();
        Self {
            title: title.into(),
            user_name: user.display_name(),
            user_email: user.email().to_string(),
            nav: navigation_for(path),
        }
    }
}

/// Register the `/admin` scope.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use admin_panel::inbound::http::admin;
///
/// let _app = App::new().configure(admin::configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .app_data(web::FormConfig::default().error_handler(users::form_error_handler))
            .service(web::resource(["", "/"]).route(web::get().to(users::dashboard)))
            .service(users::list_users)
            .service(users::edit_user)
            .service(users::update_user),
    );
}
