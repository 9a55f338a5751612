//! Shared foundation for the OpenVerse service tooling.
//!
//! This crate provides the building blocks used by every OpenVerse
//! microservice: environment-driven configuration with fail-fast
//! validation, and the common error type for configuration faults.

mod config;
mod error;

pub use config::{DEFAULT_REQUEST_TIMEOUT_SECS, Settings};
pub use error::{OpenverseError, OpenverseResult};
