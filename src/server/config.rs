//! Server configuration: environment settings and the server builder input.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use actix_web::cookie::{Key, SameSite};
use url::Url;

use crate::domain::RecordAccessService;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_SESSION_KEY_FILE: &str = "/var/run/secrets/session_key";
const DEFAULT_POOL_SIZE: u32 = 10;

/// Errors raised while reading the process environment.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// A required environment variable was not set.
    #[error("required environment variable {name} is not set")]
    Missing { name: &'static str },

    /// An environment variable was set to a value that does not parse.
    #[error("environment variable {name} is invalid: {message}")]
    Invalid { name: &'static str, message: String },
}

impl SettingsError {
    fn missing(name: &'static str) -> Self {
        Self::Missing { name }
    }

    fn invalid(name: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            name,
            message: message.into(),
        }
    }
}

fn required(name: &'static str) -> Result<String, SettingsError> {
    std::env::var(name).map_err(|_| SettingsError::missing(name))
}

/// Deployment settings read from the environment at startup.
#[derive(Debug, Clone)]
pub struct PortalSettings {
    /// PostgreSQL connection string.
    pub database_url: String,
    /// Maximum connections in the database pool.
    pub pool_size: u32,
    /// Base URL of the hosted identity provider's auth API.
    pub identity_url: Url,
    /// Project API key for the identity provider.
    pub identity_api_key: String,
    /// File holding the session key material.
    pub session_key_file: PathBuf,
    /// Permit an ephemeral session key when the key file is unreadable.
    pub session_allow_ephemeral: bool,
    /// Whether session cookies carry the `Secure` attribute.
    pub cookie_secure: bool,
    /// Socket address the HTTP listener binds to.
    pub bind_addr: SocketAddr,
}

impl PortalSettings {
    /// Read settings from the process environment.
    ///
    /// `DATABASE_URL`, `IDENTITY_URL` and `IDENTITY_API_KEY` are required.
    /// `PORTAL_BIND_ADDR` defaults to `0.0.0.0:8080`, `SESSION_KEY_FILE`
    /// to `/var/run/secrets/session_key`, and `SESSION_COOKIE_SECURE` is
    /// on unless set to `0`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when a required variable is absent or a
    /// value fails to parse.
    pub fn from_env() -> Result<Self, SettingsError> {
        let database_url = required("DATABASE_URL")?;

        let pool_size = match std::env::var("DATABASE_POOL_SIZE") {
            Ok(raw) => raw
                .parse::<u32>()
                .map_err(|e| SettingsError::invalid("DATABASE_POOL_SIZE", e.to_string()))?,
            Err(_) => DEFAULT_POOL_SIZE,
        };

        let identity_url = Url::parse(&required("IDENTITY_URL")?)
            .map_err(|e| SettingsError::invalid("IDENTITY_URL", e.to_string()))?;
        let identity_api_key = required("IDENTITY_API_KEY")?;

        let session_key_file = std::env::var("SESSION_KEY_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_SESSION_KEY_FILE));
        let session_allow_ephemeral =
            std::env::var("SESSION_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
        let cookie_secure = std::env::var("SESSION_COOKIE_SECURE")
            .map(|v| v != "0")
            .unwrap_or(true);

        let bind_addr = std::env::var("PORTAL_BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.into())
            .parse::<SocketAddr>()
            .map_err(|e| SettingsError::invalid("PORTAL_BIND_ADDR", e.to_string()))?;

        Ok(Self {
            database_url,
            pool_size,
            identity_url,
            identity_api_key,
            session_key_file,
            session_allow_ephemeral,
            cookie_secure,
            bind_addr,
        })
    }

    /// Timeout applied to pool checkouts; generous because readiness gating
    /// keeps traffic away until the pool is warm.
    pub fn pool_checkout_timeout(&self) -> Duration {
        Duration::from_secs(30)
    }
}

/// Pre-built inputs for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) access: Arc<RecordAccessService>,
}

impl ServerConfig {
    /// Assemble a server configuration from resolved parts.
    #[must_use]
    pub fn new(
        key: Key,
        cookie_secure: bool,
        same_site: SameSite,
        bind_addr: SocketAddr,
        access: Arc<RecordAccessService>,
    ) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            access,
        }
    }

    /// Socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
