//! Server settings loaded via OrthoConfig.
//!
//! Every value can come from the command line or an `ADMIN_PANEL_*`
//! environment variable.

use std::net::SocketAddr;

use admin_panel::domain::{BootstrapAdmin, EmailAddress, UserValidationError};
use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_HOST: &str = "0.0.0.0";

/// Process-level configuration for the admin panel server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ADMIN_PANEL")]
pub struct ServerSettings {
    /// Interface to bind.
    pub host: Option<String>,
    /// Port to bind.
    #[ortho_config(default = 8080)]
    pub port: u16,
    /// PostgreSQL connection string. Without it users live in memory.
    pub database_url: Option<String>,
    /// Email of the administrator created at startup when missing.
    pub bootstrap_admin_email: Option<String>,
    /// Password of the bootstrap administrator.
    pub bootstrap_admin_password: Option<String>,
    /// bcrypt cost used when hashing the bootstrap password.
    pub password_hash_cost: Option<u32>,
}

/// Bootstrap values were only partly configured or are malformed.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapSettingsError {
    #[error("bootstrap admin email and password must be set together")]
    Incomplete,
    #[error("invalid bootstrap admin email: {0}")]
    InvalidEmail(#[from] UserValidationError),
}

impl ServerSettings {
    /// Socket address to bind, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        let host = self.host.as_deref().unwrap_or(DEFAULT_HOST);
        format!("{host}:{}", self.port).parse()
    }

    pub fn password_hash_cost(&self) -> u32 {
        self.password_hash_cost.unwrap_or(bcrypt::DEFAULT_COST)
    }

    /// Configured bootstrap administrator, if any.
    pub fn bootstrap_admin(&self) -> Result<Option<BootstrapAdmin>, BootstrapSettingsError> {
        match (
            self.bootstrap_admin_email.as_deref(),
            self.bootstrap_admin_password.as_deref(),
        ) {
            (None, None) => Ok(None),
            (Some(email), Some(password)) if !password.is_empty() => {
                let email = EmailAddress::new(email)?;
                Ok(Some(BootstrapAdmin::new(email, password)))
            }
            _ => Err(BootstrapSettingsError::Incomplete),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 6] = [
        "ADMIN_PANEL_HOST",
        "ADMIN_PANEL_PORT",
        "ADMIN_PANEL_DATABASE_URL",
        "ADMIN_PANEL_BOOTSTRAP_ADMIN_EMAIL",
        "ADMIN_PANEL_BOOTSTRAP_ADMIN_PASSWORD",
        "ADMIN_PANEL_PASSWORD_HASH_COST",
    ];

    fn load_with(overrides: &[(&'static str, &str)]) -> ServerSettings {
        let vars = VARS.map(|name| {
            let value = overrides
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value).to_owned());
            (name, value)
        });
        let _guard = lock_env(vars);
        ServerSettings::load_from_iter([OsString::from("admin-panel")])
            .expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let settings = load_with(&[]);
        assert_eq!(
            settings.bind_addr().expect("default address"),
            "0.0.0.0:8080".parse().expect("socket address")
        );
        assert_eq!(settings.port, 8080);
        assert!(settings.database_url.is_none());
        assert_eq!(settings.password_hash_cost(), bcrypt::DEFAULT_COST);
        assert!(settings.bootstrap_admin().expect("no bootstrap").is_none());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let settings = load_with(&[
            ("ADMIN_PANEL_HOST", "127.0.0.1"),
            ("ADMIN_PANEL_PORT", "9000"),
            ("ADMIN_PANEL_DATABASE_URL", "postgres://localhost/admin"),
            ("ADMIN_PANEL_BOOTSTRAP_ADMIN_EMAIL", "root@example.com"),
            ("ADMIN_PANEL_BOOTSTRAP_ADMIN_PASSWORD", "changeme"),
            ("ADMIN_PANEL_PASSWORD_HASH_COST", "6"),
        ]);
        assert_eq!(
            settings.bind_addr().expect("address"),
            "127.0.0.1:9000".parse().expect("socket address")
        );
        assert_eq!(
            settings.database_url.as_deref(),
            Some("postgres://localhost/admin")
        );
        assert_eq!(settings.password_hash_cost(), 6);
        let admin = settings
            .bootstrap_admin()
            .expect("valid bootstrap")
            .expect("bootstrap configured");
        assert_eq!(admin.email().as_ref(), "root@example.com");
    }

    #[rstest]
    #[case(&[("ADMIN_PANEL_BOOTSTRAP_ADMIN_EMAIL", "root@example.com")])]
    #[case(&[("ADMIN_PANEL_BOOTSTRAP_ADMIN_PASSWORD", "changeme")])]
    fn half_configured_bootstrap_is_rejected(#[case] overrides: &[(&'static str, &str)]) {
        let settings = load_with(overrides);
        assert!(matches!(
            settings.bootstrap_admin(),
            Err(BootstrapSettingsError::Incomplete)
        ));
    }

    #[rstest]
    fn malformed_bootstrap_email_is_rejected() {
        let settings = load_with(&[
            ("ADMIN_PANEL_BOOTSTRAP_ADMIN_EMAIL", "not-an-email"),
            ("ADMIN_PANEL_BOOTSTRAP_ADMIN_PASSWORD", "changeme"),
        ]);
        assert!(matches!(
            settings.bootstrap_admin(),
            Err(BootstrapSettingsError::InvalidEmail(_))
        ));
    }
}
