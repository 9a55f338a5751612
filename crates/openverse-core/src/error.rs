//! Error types for the OpenVerse core.

/// Core error type for OpenVerse shared infrastructure.
///
/// These are startup-time faults: a process that cannot assemble its
/// [`Settings`](crate::Settings) should exit rather than limp along with
/// defaults.
#[derive(Debug, thiserror::Error)]
pub enum OpenverseError {
    /// Required configuration is missing or empty.
    #[error("configuration error: missing required environment variable {0}")]
    MissingConfig(String),

    /// A configuration value could not be parsed.
    #[error("configuration error: {key}={value} ({reason})")]
    InvalidConfig {
        /// The environment variable name.
        key: String,
        /// The raw value that failed to parse.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// Internal error with context.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Convenience result type for OpenVerse core operations.
pub type OpenverseResult<T> = Result<T, OpenverseError>;
