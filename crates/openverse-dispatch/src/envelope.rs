//! Request and response envelopes.

use std::collections::HashMap;
use std::time::Duration;

use serde_json::{Map, Value};

/// Input shape for a dispatched call.
///
/// The body is a JSON object; how it travels depends on the verb. For
/// POST/PUT/PATCH it is sent as a JSON body, or form-encoded when
/// [`form_encoded`](Self::form_encoded) is set. For GET it degrades to
/// query-string parameters. Path parameters are independent of both and
/// only feed template substitution.
#[derive(Debug, Clone, Default)]
pub struct RequestEnvelope {
    /// Structured request body.
    pub body: Option<Map<String, Value>>,
    /// Values for `{placeholder}` substitution in the route template.
    pub path_params: Option<HashMap<String, String>>,
    /// Explicit query parameters, appended for every verb.
    pub query: Vec<(String, String)>,
    /// Extra request headers.
    pub headers: http::HeaderMap,
    /// Send the body as `application/x-www-form-urlencoded` instead of JSON.
    pub form_encoded: bool,
    /// Per-call timeout override.
    pub timeout: Option<Duration>,
}

impl RequestEnvelope {
    /// Create an empty envelope.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the structured body.
    #[must_use]
    pub fn with_body(mut self, body: Map<String, Value>) -> Self {
        self.body = Some(body);
        self
    }

    /// Add a single body field.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.body
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }

    /// Add a path-substitution parameter.
    #[must_use]
    pub fn with_path_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.path_params
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Add a query parameter.
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Add a request header.
    #[must_use]
    pub fn with_header(mut self, name: http::HeaderName, value: http::HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Transmit the body form-encoded instead of as JSON.
    #[must_use]
    pub fn form_encoded(mut self) -> Self {
        self.form_encoded = true;
        self
    }

    /// Override the client's default timeout for this call.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Normalized outcome of a dispatched call.
///
/// Exactly one variant is populated and the status code is always present.
/// The `Error` variant is a *normal* remote rejection (status >= 400 or an
/// error field in the body), not a plumbing fault; those are raised as
/// [`DispatchError`](openverse_routes::DispatchError) instead.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum ResponseEnvelope {
    /// The remote accepted the request.
    Success {
        /// Parsed JSON payload.
        payload: Map<String, Value>,
        /// HTTP status code of the response.
        status_code: u16,
    },
    /// The remote rejected the request.
    Error {
        /// The extracted error message.
        message: String,
        /// HTTP status code of the response.
        status_code: u16,
    },
}

impl ResponseEnvelope {
    /// Whether this is the success variant.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The HTTP status code of the response.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Success { status_code, .. } | Self::Error { status_code, .. } => *status_code,
        }
    }

    /// The success payload, if any.
    #[must_use]
    pub fn payload(&self) -> Option<&Map<String, Value>> {
        match self {
            Self::Success { payload, .. } => Some(payload),
            Self::Error { .. } => None,
        }
    }

    /// The error message, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Error { message, .. } => Some(message),
        }
    }
}

/// Fold a parsed response body and status code into an envelope.
///
/// A non-empty `detail` or `error` field in the body always wins; a status
/// >= 400 without one falls back to the status line's canonical reason.
#[must_use]
pub fn normalize_response(status: http::StatusCode, value: Value) -> ResponseEnvelope {
    let status_code = status.as_u16();

    if let Some(message) = extract_error_message(&value) {
        return ResponseEnvelope::Error {
            message,
            status_code,
        };
    }

    if status.is_client_error() || status.is_server_error() {
        return ResponseEnvelope::Error {
            message: status
                .canonical_reason()
                .unwrap_or("request rejected")
                .to_owned(),
            status_code,
        };
    }

    ResponseEnvelope::Success {
        payload: into_payload(value),
        status_code,
    }
}

/// Extract a non-empty `detail` or `error` field from the body.
fn extract_error_message(value: &Value) -> Option<String> {
    let field = value.get("detail").or_else(|| value.get("error"))?;
    match field {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Null | Value::String(_) => None,
        other => Some(other.to_string()),
    }
}

/// Coerce an arbitrary JSON value into the payload mapping. Non-object
/// bodies are wrapped under a `data` key so the payload is always a map.
fn into_payload(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => {
            let mut map = Map::new();
            map.insert("data".to_owned(), other);
            map
        }
    }
}
