//! Configuration for OpenVerse services.
//!
//! All configuration is driven by environment variables. Required values
//! fail at startup rather than defaulting silently: a missing service port
//! is a deployment fault, not something to discover on the first request.

use std::env;
use std::time::Duration;

use crate::error::{OpenverseError, OpenverseResult};

/// Default per-call request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Process-wide settings shared by every OpenVerse service.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Settings {
    /// Name of the running service, reported in logs only.
    pub project_name: Option<String>,
    /// Common base host (or URL) for all cooperating services.
    pub base_url: String,
    /// Port of the users service.
    pub port_service_users: u16,
    /// Port of the authentication service.
    pub port_service_auth: u16,
    /// Default timeout applied to outbound requests.
    pub request_timeout: Duration,
}

impl Settings {
    /// Create settings from explicit values, using the default timeout.
    #[must_use]
    pub fn new(base_url: impl Into<String>, port_service_users: u16, port_service_auth: u16) -> Self {
        Self {
            project_name: None,
            base_url: base_url.into(),
            port_service_users,
            port_service_auth,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    /// Load settings from environment variables.
    ///
    /// | Variable | Required | Meaning |
    /// |----------|----------|---------|
    /// | `BASE_URL` | yes | common base host for all services |
    /// | `PORT_SERVICE_USERS` | yes | users service port |
    /// | `PORT_SERVICE_AUTH` | yes | authentication service port |
    /// | `REQUEST_TIMEOUT_SECS` | no (default 10) | outbound request timeout |
    /// | `PROJECT_NAME` | no | service name for logging |
    ///
    /// # Errors
    /// Returns an error if a required variable is missing or empty, or if a
    /// numeric value does not parse.
    pub fn from_env() -> OpenverseResult<Self> {
        let settings = Self {
            project_name: env::var("PROJECT_NAME").ok().filter(|v| !v.is_empty()),
            base_url: require_env("BASE_URL")?,
            port_service_users: parse_port("PORT_SERVICE_USERS", &require_env("PORT_SERVICE_USERS")?)?,
            port_service_auth: parse_port("PORT_SERVICE_AUTH", &require_env("PORT_SERVICE_AUTH")?)?,
            request_timeout: timeout_from_env("REQUEST_TIMEOUT_SECS")?,
        };

        tracing::debug!(
            base_url = %settings.base_url,
            users_port = settings.port_service_users,
            auth_port = settings.port_service_auth,
            timeout_secs = settings.request_timeout.as_secs(),
            "loaded settings from environment"
        );
        Ok(settings)
    }
}

/// Read a required environment variable, rejecting empty values.
fn require_env(key: &str) -> OpenverseResult<String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(OpenverseError::MissingConfig(key.to_owned())),
    }
}

/// Parse a port value into a `u16`.
fn parse_port(key: &str, value: &str) -> OpenverseResult<u16> {
    value
        .trim()
        .parse()
        .map_err(|_| OpenverseError::InvalidConfig {
            key: key.to_owned(),
            value: value.to_owned(),
            reason: "expected a TCP port number".to_owned(),
        })
}

/// Parse an optional timeout variable, falling back to the default.
fn timeout_from_env(key: &str) -> OpenverseResult<Duration> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => {
            let secs: u64 = value
                .trim()
                .parse()
                .map_err(|_| OpenverseError::InvalidConfig {
                    key: key.to_owned(),
                    value,
                    reason: "expected a whole number of seconds".to_owned(),
                })?;
            Ok(Duration::from_secs(secs))
        }
        _ => Ok(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)),
    }
}
