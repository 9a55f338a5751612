//! HTTP dispatch client for inter-service calls between OpenVerse services.
//!
//! This crate is the transport layer on top of the
//! [`openverse_routes`] catalog:
//!
//! - **Port registry**: maps a service identifier to its network port
//! - **URL construction**: base-URL normalization and `base:port/path`
//!   assembly
//! - **Envelopes**: the request input shape and the normalized
//!   Success/Error response shape
//! - **Dispatch client**: verb validation, route resolution, the network
//!   call, and multi-stage error mapping

pub mod client;
pub mod envelope;
pub mod registry;
pub mod url;

pub use client::DispatchClient;
pub use envelope::{RequestEnvelope, ResponseEnvelope};
pub use registry::PortRegistry;
