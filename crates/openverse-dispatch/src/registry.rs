//! Service endpoint registry.

use std::collections::HashMap;

use openverse_core::Settings;
use openverse_routes::{DispatchError, ServiceId};

/// Maps each service to its network port.
///
/// Populated once from [`Settings`] at startup (or explicitly via
/// [`with_port`](Self::with_port)) and read-only afterwards, so concurrent
/// lookups need no synchronization.
#[derive(Debug, Clone, Default)]
pub struct PortRegistry {
    ports: HashMap<ServiceId, u16>,
}

impl PortRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the registry from process settings.
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new()
            .with_port(ServiceId::Users, settings.port_service_users)
            .with_port(ServiceId::Authentication, settings.port_service_auth)
    }

    /// Register a port for a service.
    #[must_use]
    pub fn with_port(mut self, service: ServiceId, port: u16) -> Self {
        self.ports.insert(service, port);
        self
    }

    /// Look up the port for a service.
    ///
    /// # Errors
    /// Returns `ServiceUnavailable` when the service identifier itself is
    /// valid but no port was registered for it. This is a configuration
    /// fault, distinct from an unknown service.
    pub fn port_for(&self, service: ServiceId) -> Result<u16, DispatchError> {
        self.ports
            .get(&service)
            .copied()
            .ok_or_else(|| DispatchError::service_unavailable(service))
    }
}
