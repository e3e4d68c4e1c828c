//! Server settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `FORUM_*` environment variables, and config
//! files, in increasing order of precedence from file to CLI.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::inbound::http::session_config::SessionToggles;
use crate::outbound::persistence::{DEFAULT_CONNECTION_TIMEOUT, DEFAULT_MAX_SIZE, PoolConfig};

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_PORT: u16 = 8080;

/// Errors raised when loaded settings are unusable.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("database url is not configured (set FORUM_DATABASE_URL)")]
    MissingDatabaseUrl,
    #[error("invalid bind host {value:?}")]
    InvalidHost { value: String },
}

/// Configuration values for the forum server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "FORUM")]
pub struct ForumSettings {
    /// Address to bind; defaults to all interfaces.
    pub host: Option<String>,
    /// Port to bind; defaults to 8080.
    pub port: Option<u16>,
    /// PostgreSQL connection string.
    pub database_url: Option<String>,
    /// Maximum pooled connections.
    pub pool_max_size: Option<u32>,
    /// Seconds to wait for a pooled connection.
    pub pool_timeout_secs: Option<u64>,
    /// Apply pending migrations before serving.
    #[ortho_config(default = true)]
    pub run_migrations: bool,
    /// Path to the session signing key.
    pub session_key_file: Option<PathBuf>,
    /// Mark the session cookie `Secure`.
    pub session_cookie_secure: Option<bool>,
    /// `Strict`, `Lax`, or `None`.
    pub session_same_site: Option<String>,
    /// Generate a throwaway key when the key file is missing.
    pub session_allow_ephemeral: Option<bool>,
}

impl ForumSettings {
    /// Socket address assembled from `host` and `port`.
    ///
    /// # Errors
    /// Returns [`SettingsError::InvalidHost`] when `host` is not an IP address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let host = match self.host.as_deref() {
            Some(raw) => raw.trim().parse().map_err(|_| SettingsError::InvalidHost {
                value: raw.to_owned(),
            })?,
            None => DEFAULT_HOST,
        };
        Ok(SocketAddr::new(host, self.port.unwrap_or(DEFAULT_PORT)))
    }

    /// Pool configuration for the configured database.
    ///
    /// # Errors
    /// Returns [`SettingsError::MissingDatabaseUrl`] when no URL is set.
    pub fn pool_config(&self) -> Result<PoolConfig, SettingsError> {
        let url = self
            .database_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or(SettingsError::MissingDatabaseUrl)?;
        let timeout = self
            .pool_timeout_secs
            .map_or(DEFAULT_CONNECTION_TIMEOUT, Duration::from_secs);
        Ok(PoolConfig::new(url)
            .with_max_size(self.pool_max_size.unwrap_or(DEFAULT_MAX_SIZE))
            .with_connection_timeout(timeout))
    }

    /// Session options for [`crate::inbound::http::session_config::session_settings`].
    #[must_use]
    pub fn session_toggles(&self) -> SessionToggles {
        SessionToggles {
            key_file: self.session_key_file.clone(),
            cookie_secure: self.session_cookie_secure,
            same_site: self.session_same_site.clone(),
            allow_ephemeral: self.session_allow_ephemeral,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for server settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 10] = [
        "FORUM_HOST",
        "FORUM_PORT",
        "FORUM_DATABASE_URL",
        "FORUM_POOL_MAX_SIZE",
        "FORUM_POOL_TIMEOUT_SECS",
        "FORUM_RUN_MIGRATIONS",
        "FORUM_SESSION_KEY_FILE",
        "FORUM_SESSION_COOKIE_SECURE",
        "FORUM_SESSION_SAME_SITE",
        "FORUM_SESSION_ALLOW_EPHEMERAL",
    ];

    fn load_from_empty_args() -> ForumSettings {
        ForumSettings::load_from_iter([OsString::from("forum-backend")])
            .expect("config should load")
    }

    /// Every variable cleared except `overrides`.
    fn env_with(overrides: &[(&str, &str)]) -> Vec<(&'static str, Option<String>)> {
        VARS.iter()
            .map(|name| {
                let value = overrides
                    .iter()
                    .find(|(key, _)| key == name)
                    .map(|(_, value)| (*value).to_owned());
                (*name, value)
            })
            .collect()
    }

    #[rstest]
    fn defaults_apply_when_nothing_is_set() {
        let _guard = lock_env(env_with(&[]));

        let settings = load_from_empty_args();
        assert!(settings.run_migrations);
        assert_eq!(
            settings.bind_addr(),
            Ok(SocketAddr::new(DEFAULT_HOST, DEFAULT_PORT))
        );
        assert_eq!(
            settings.pool_config().err(),
            Some(SettingsError::MissingDatabaseUrl)
        );
        let toggles = settings.session_toggles();
        assert!(toggles.key_file.is_none());
        assert!(toggles.cookie_secure.is_none());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env(env_with(&[
            ("FORUM_HOST", "127.0.0.1"),
            ("FORUM_PORT", "9090"),
            ("FORUM_DATABASE_URL", "postgres://localhost/forum"),
            ("FORUM_POOL_MAX_SIZE", "4"),
            ("FORUM_POOL_TIMEOUT_SECS", "5"),
            ("FORUM_RUN_MIGRATIONS", "false"),
            ("FORUM_SESSION_SAME_SITE", "Strict"),
            ("FORUM_SESSION_COOKIE_SECURE", "true"),
        ]));

        let settings = load_from_empty_args();
        assert!(!settings.run_migrations);
        assert_eq!(
            settings.bind_addr(),
            Ok(SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 9090))
        );
        let pool = settings.pool_config().expect("pool config");
        assert_eq!(pool.database_url(), "postgres://localhost/forum");
        assert_eq!(pool.max_size(), 4);
        assert_eq!(pool.connection_timeout(), Duration::from_secs(5));
        let toggles = settings.session_toggles();
        assert_eq!(toggles.same_site.as_deref(), Some("Strict"));
        assert_eq!(toggles.cookie_secure, Some(true));
    }

    #[rstest]
    fn rejects_hostnames_that_are_not_addresses() {
        let _guard = lock_env(env_with(&[("FORUM_HOST", "not an address")]));

        let settings = load_from_empty_args();
        assert!(matches!(
            settings.bind_addr(),
            Err(SettingsError::InvalidHost { .. })
        ));
    }
}
