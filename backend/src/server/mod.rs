//! Server construction and middleware wiring.

mod config;

pub use config::ServerSettings;

use std::net::SocketAddr;
use std::sync::Arc;

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use color_eyre::eyre::{Result, WrapErr};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use admin_panel::Trace;
#[cfg(debug_assertions)]
use admin_panel::doc::ApiDoc;
use admin_panel::domain::ports::UserRepository;
use admin_panel::domain::{PasswordLoginService, UserAdminService, ensure_bootstrap_admin};
use admin_panel::inbound::http;
use admin_panel::inbound::http::session_config::SessionSettings;
use admin_panel::inbound::http::state::{HttpState, HttpStatePorts};
use admin_panel::inbound::http::views::Views;

/// Wire the domain services over `repository` into handler state.
pub fn build_http_state<R>(repository: Arc<R>, views: Arc<Views>) -> HttpState
where
    R: UserRepository + 'static,
{
    let admin = Arc::new(UserAdminService::new(Arc::clone(&repository)));
    HttpState::new(
        HttpStatePorts {
            login: Arc::new(PasswordLoginService::new(repository)),
            users: admin.clone(),
            profiles: admin,
        },
        views,
    )
}

/// Create the bootstrap administrator when the settings name one.
pub async fn bootstrap<R>(repository: &R, settings: &ServerSettings) -> Result<()>
where
    R: UserRepository,
{
    let Some(admin) = settings
        .bootstrap_admin()
        .wrap_err("invalid bootstrap administrator settings")?
    else {
        return Ok(());
    };
    ensure_bootstrap_admin(repository, &admin, settings.password_hash_cost())
        .await
        .wrap_err("failed to create bootstrap administrator")?;
    Ok(())
}

fn build_app(
    http_state: web::Data<HttpState>,
    session: SessionSettings,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let SessionSettings {
        key,
        cookie_secure,
        same_site,
    } = session;
    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(
            PersistentSession::default().session_ttl(actix_web::cookie::time::Duration::hours(2)),
        )
        .build();

    let app = App::new()
        .app_data(http_state)
        .wrap(session)
        .wrap(Trace)
        .configure(http::configure);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Bind the HTTP server to `bind_addr`.
///
/// The returned [`Server`] must be awaited to serve requests.
pub fn create_server(
    http_state: HttpState,
    session: SessionSettings,
    bind_addr: SocketAddr,
) -> std::io::Result<Server> {
    let http_state = web::Data::new(http_state);
    let server = HttpServer::new(move || build_app(http_state.clone(), session.clone()))
        .bind(bind_addr)?
        .run();
    Ok(server)
}
