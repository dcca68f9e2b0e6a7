//! HTTP inbound adapter: server-rendered pages plus the JSON edit action.

pub mod admin;
pub mod auth;
pub mod error;
pub mod home;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod views;

use actix_web::web;

pub use error::ApiResult;

/// Register every page and action.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use admin_panel::inbound::http;
///
/// let _app = App::new().configure(http::configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(home::home)
        .service(auth::login_form)
        .service(auth::login)
        .service(auth::logout)
        .configure(admin::configure);
}
