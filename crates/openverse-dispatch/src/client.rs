//! The dispatch client: verb validation, route resolution, the network
//! call, and response normalization.

use std::time::Duration;

use parking_lot::Mutex;
use serde_json::{Map, Value};

use openverse_core::Settings;
use openverse_routes::{
    DispatchError, HttpMethod, RouteKey, ServiceId, resolve_route, validate_http_method,
};

use crate::envelope::{RequestEnvelope, ResponseEnvelope, normalize_response};
use crate::registry::PortRegistry;
use crate::url::build_url;

/// Typed HTTP client for calls between OpenVerse services.
///
/// One instance is meant to be shared: the catalog and port registry are
/// read-only, and the underlying [`reqwest::Client`] is created lazily on
/// first use and reused across calls until [`close`](Self::close) drops it.
/// Any number of [`send`](Self::send) calls may run concurrently.
#[derive(Debug)]
pub struct DispatchClient {
    base_url: String,
    registry: PortRegistry,
    timeout: Duration,
    // Guards lazy creation only; the client is cloned out and the lock is
    // never held across an await point.
    http: Mutex<Option<reqwest::Client>>,
}

impl DispatchClient {
    /// Create a client from process settings.
    #[must_use]
    pub fn new(settings: &Settings) -> Self {
        Self::from_parts(
            settings.base_url.clone(),
            PortRegistry::from_settings(settings),
            settings.request_timeout,
        )
    }

    /// Create a client from explicit parts.
    #[must_use]
    pub fn from_parts(
        base_url: impl Into<String>,
        registry: PortRegistry,
        timeout: Duration,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            registry,
            timeout,
            http: Mutex::new(None),
        }
    }

    /// The default per-call timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Drop the underlying HTTP client. The next call recreates it.
    pub fn close(&self) {
        *self.http.lock() = None;
    }

    /// Resolve the absolute URL for a route without performing a call.
    ///
    /// # Errors
    /// Returns the same catalog, parameter, and registry faults as
    /// [`send`](Self::send) raises before I/O.
    pub fn url_for(
        &self,
        service: ServiceId,
        key: impl Into<RouteKey>,
        envelope: &RequestEnvelope,
    ) -> Result<String, DispatchError> {
        let path = resolve_route(service, key, envelope.path_params.as_ref())?;
        let port = self.registry.port_for(service)?;
        Ok(build_url(&self.base_url, port, &path))
    }

    /// Dispatch a request to `(service, route)` with the given verb.
    ///
    /// The verb is validated against the catalog, the route template is
    /// resolved, the service port is looked up, and exactly one HTTP call is
    /// performed; no retries. A remote rejection (status >= 400 or an error
    /// field in the body) is a normal [`ResponseEnvelope::Error`] return;
    /// only catalog, validation, transport, and parse faults are raised.
    ///
    /// # Errors
    /// `MethodMismatch`, `UnknownService`/`UnknownRoute`,
    /// `MissingParameter`, and `ServiceUnavailable` before any I/O;
    /// `RequestTimeout` (504 hint), `RequestFailed` (500 hint), and
    /// `ResponseParse` (original status) afterwards.
    pub async fn send(
        &self,
        service: ServiceId,
        key: impl Into<RouteKey>,
        method: HttpMethod,
        envelope: RequestEnvelope,
    ) -> Result<ResponseEnvelope, DispatchError> {
        let key = key.into();
        let route = validate_http_method(service, key, method)?;
        let url = self.url_for(service, route, &envelope)?;

        tracing::info!(%service, route = route.name(), %method, %url, "dispatching request");

        let client = self.http_client()?;
        let mut request = client
            .request(to_reqwest_method(method), &url)
            .timeout(envelope.timeout.unwrap_or(self.timeout));

        if !envelope.headers.is_empty() {
            request = request.headers(envelope.headers.clone());
        }

        let query = collect_query(method, &envelope);
        if !query.is_empty() {
            request = request.query(&query);
        }

        if method.has_request_body() {
            if let Some(body) = &envelope.body {
                request = if envelope.form_encoded {
                    request.form(&to_form_fields(body))
                } else {
                    request.json(body)
                };
            }
        }

        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        tracing::debug!(%url, status = status.as_u16(), "received response");

        let bytes = response.bytes().await.map_err(map_transport_error)?;
        let value: Value = serde_json::from_slice(&bytes).map_err(|e| {
            tracing::error!(%url, status = status.as_u16(), error = %e, "unparsable response body");
            DispatchError::response_parse(status, e.to_string()).with_source(e)
        })?;

        let normalized = normalize_response(status, value);
        if let Some(message) = normalized.message() {
            tracing::warn!(%url, status = status.as_u16(), message, "remote returned error envelope");
        }
        Ok(normalized)
    }

    /// Validate a verb against the catalog without dispatching.
    ///
    /// # Errors
    /// Same faults as [`validate_http_method`].
    pub fn validate(
        &self,
        service: ServiceId,
        key: impl Into<RouteKey>,
        method: HttpMethod,
    ) -> Result<(), DispatchError> {
        validate_http_method(service, key, method).map(|_| ())
    }

    /// Get or lazily create the shared HTTP client. First creator wins;
    /// concurrent callers reuse the same instance.
    fn http_client(&self) -> Result<reqwest::Client, DispatchError> {
        let mut guard = self.http.lock();
        if let Some(client) = guard.as_ref() {
            return Ok(client.clone());
        }
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| DispatchError::request_failed("failed to build HTTP client").with_source(e))?;
        *guard = Some(client.clone());
        tracing::debug!("created shared HTTP client");
        Ok(client)
    }
}

/// Assemble the effective query string: explicit parameters always, plus
/// the body fields when the verb cannot carry a body.
fn collect_query(method: HttpMethod, envelope: &RequestEnvelope) -> Vec<(String, String)> {
    let mut query = envelope.query.clone();
    if method == HttpMethod::Get {
        if let Some(body) = &envelope.body {
            for (key, value) in body {
                query.push((key.clone(), value_to_string(value)));
            }
        }
    }
    query
}

/// Flatten a JSON body into form fields.
fn to_form_fields(body: &Map<String, Value>) -> Vec<(String, String)> {
    body.iter()
        .map(|(key, value)| (key.clone(), value_to_string(value)))
        .collect()
}

/// Render a JSON value as a plain string for query/form transmission.
fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Patch => reqwest::Method::PATCH,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

/// Map a transport failure to a typed fault: timeouts surface with a 504
/// hint, everything else with a 500 hint.
fn map_transport_error(error: reqwest::Error) -> DispatchError {
    if error.is_timeout() {
        tracing::error!(error = %error, "request timed out");
        DispatchError::timeout(error.to_string()).with_source(error)
    } else {
        tracing::error!(error = %error, "request failed");
        DispatchError::request_failed(error.to_string()).with_source(error)
    }
}
