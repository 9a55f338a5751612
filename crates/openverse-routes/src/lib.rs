//! Typed route catalog for the OpenVerse microservices.
//!
//! This crate is the model layer of the inter-service request plumbing:
//!
//! - **Catalog**: per-service route enums, each bound to a URL template and
//!   exactly one HTTP verb, fixed at compile time
//! - **Resolver**: template lookup and placeholder substitution
//! - **Method validator**: asserts a caller-supplied verb matches the verb
//!   the catalog records for a route
//! - **Error model**: the `DispatchError` taxonomy shared with the HTTP
//!   dispatch layer

pub mod catalog;
pub mod error;
pub mod method;
pub mod resolve;
pub mod service;

pub use catalog::{AuthRoute, Route, RouteKey, UsersRoute};
pub use error::{DispatchError, DispatchErrorCode};
pub use method::HttpMethod;
pub use resolve::{resolve_route, resolve_service, validate_http_method};
pub use service::ServiceId;
