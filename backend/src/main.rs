//! Admin panel entry-point: loads settings, prepares storage and serves HTTP.

mod server;

use std::sync::Arc;

use color_eyre::eyre::{Result, WrapErr};
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use admin_panel::inbound::http::session_config::{BuildMode, session_settings_from_env};
use admin_panel::inbound::http::state::HttpState;
use admin_panel::inbound::http::views::Views;
use admin_panel::outbound::memory::InMemoryUserRepository;
use admin_panel::outbound::persistence::{
    DbPool, DieselUserRepository, PoolConfig, run_migrations,
};

use server::{ServerSettings, bootstrap, build_http_state, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load().wrap_err("failed to load server settings")?;
    let env = DefaultEnv::new();
    let session = session_settings_from_env(&env, BuildMode::from_debug_assertions())
        .wrap_err("invalid session configuration")?;
    let views = Arc::new(Views::new().wrap_err("failed to load templates")?);
    let http_state = build_state(&settings, views).await?;
    let bind_addr = settings.bind_addr().wrap_err("invalid bind address")?;

    info!(%bind_addr, "admin panel listening");
    create_server(http_state, session, bind_addr)?.await?;
    Ok(())
}

async fn build_state(settings: &ServerSettings, views: Arc<Views>) -> Result<HttpState> {
    match settings.database_url.as_deref() {
        Some(database_url) => {
            run_migrations(database_url)
                .await
                .wrap_err("failed to apply database migrations")?;
            let pool = DbPool::new(PoolConfig::new(database_url))
                .await
                .wrap_err("failed to create database pool")?;
            let repository = Arc::new(DieselUserRepository::new(pool));
            bootstrap(repository.as_ref(), settings).await?;
            Ok(build_http_state(repository, views))
        }
        None => {
            warn!("no database URL configured; users are kept in memory");
            let repository = Arc::new(InMemoryUserRepository::new());
            bootstrap(repository.as_ref(), settings).await?;
            Ok(build_http_state(repository, views))
        }
    }
}
