//! Dispatch error taxonomy.
//!
//! Every fault the dispatch pipeline can raise carries a code and an HTTP
//! status hint so callers sitting inside an HTTP handler can surface it
//! without translation. Remote application rejections (status >= 400 with a
//! well-formed body) are deliberately *not* errors here; those fold into
//! the ordinary response envelope.

use std::fmt;

/// Well-known dispatch error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum DispatchErrorCode {
    /// The service identifier is not in the catalog.
    UnknownService,
    /// The route key is not in the service's route set.
    UnknownRoute,
    /// The supplied verb does not match the verb bound to the route.
    MethodMismatch,
    /// A template placeholder has no matching parameter.
    MissingParameter,
    /// The service is known but has no registered port.
    ServiceUnavailable,
    /// The call exceeded its timeout budget.
    RequestTimeout,
    /// The call failed in transport before a response arrived.
    #[default]
    RequestFailed,
    /// The response body was not valid JSON.
    ResponseParse,
}

impl DispatchErrorCode {
    /// Returns the short error code string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnknownService => "UnknownService",
            Self::UnknownRoute => "UnknownRoute",
            Self::MethodMismatch => "MethodMismatch",
            Self::MissingParameter => "MissingParameter",
            Self::ServiceUnavailable => "ServiceUnavailable",
            Self::RequestTimeout => "RequestTimeout",
            Self::RequestFailed => "RequestFailed",
            Self::ResponseParse => "ResponseParse",
        }
    }

    /// Returns the default HTTP status hint for this error.
    #[must_use]
    pub fn default_status_code(&self) -> http::StatusCode {
        match self {
            Self::UnknownService | Self::UnknownRoute => http::StatusCode::NOT_FOUND,
            Self::MethodMismatch => http::StatusCode::METHOD_NOT_ALLOWED,
            Self::MissingParameter => http::StatusCode::BAD_REQUEST,
            Self::ServiceUnavailable => http::StatusCode::SERVICE_UNAVAILABLE,
            Self::RequestTimeout => http::StatusCode::GATEWAY_TIMEOUT,
            Self::RequestFailed => http::StatusCode::INTERNAL_SERVER_ERROR,
            Self::ResponseParse => http::StatusCode::BAD_GATEWAY,
        }
    }
}

impl fmt::Display for DispatchErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A dispatch pipeline fault.
#[derive(Debug)]
pub struct DispatchError {
    /// The error code.
    pub code: DispatchErrorCode,
    /// A human-readable error message.
    pub message: String,
    /// The HTTP status hint.
    pub status_code: http::StatusCode,
    /// The underlying source error, if any.
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DispatchError({}): {}", self.code, self.message)
    }
}

impl std::error::Error for DispatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

impl DispatchError {
    /// Create a new `DispatchError` from an error code.
    #[must_use]
    pub fn new(code: DispatchErrorCode) -> Self {
        Self {
            status_code: code.default_status_code(),
            message: code.as_str().to_owned(),
            code,
            source: None,
        }
    }

    /// Create a new `DispatchError` with a custom message.
    #[must_use]
    pub fn with_message(code: DispatchErrorCode, message: impl Into<String>) -> Self {
        Self {
            status_code: code.default_status_code(),
            message: message.into(),
            code,
            source: None,
        }
    }

    /// Override the HTTP status hint.
    #[must_use]
    pub fn with_status(mut self, status_code: http::StatusCode) -> Self {
        self.status_code = status_code;
        self
    }

    /// Set the source error.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    // -- Convenience constructors --

    /// The service identifier is not in the catalog.
    #[must_use]
    pub fn unknown_service(name: &str) -> Self {
        Self::with_message(
            DispatchErrorCode::UnknownService,
            format!("unknown service: {name}"),
        )
    }

    /// The route key is not in the service's route set.
    #[must_use]
    pub fn unknown_route(service: impl fmt::Display, route: impl fmt::Display) -> Self {
        Self::with_message(
            DispatchErrorCode::UnknownRoute,
            format!("unknown route {route} in service {service}"),
        )
    }

    /// The supplied verb does not match the verb bound to the route.
    #[must_use]
    pub fn method_mismatch(
        route: impl fmt::Display,
        expected: impl fmt::Display,
        got: impl fmt::Display,
    ) -> Self {
        Self::with_message(
            DispatchErrorCode::MethodMismatch,
            format!("invalid HTTP method {got} for route {route}: expected {expected}"),
        )
    }

    /// A template placeholder has no matching parameter.
    #[must_use]
    pub fn missing_parameter(route: impl fmt::Display, key: &str) -> Self {
        Self::with_message(
            DispatchErrorCode::MissingParameter,
            format!("missing parameter {key} for route {route}"),
        )
    }

    /// The service is known but has no registered port.
    #[must_use]
    pub fn service_unavailable(service: impl fmt::Display) -> Self {
        Self::with_message(
            DispatchErrorCode::ServiceUnavailable,
            format!("no port registered for service {service}"),
        )
    }

    /// The call exceeded its timeout budget.
    #[must_use]
    pub fn timeout(detail: impl Into<String>) -> Self {
        Self::with_message(
            DispatchErrorCode::RequestTimeout,
            format!("request timed out: {}", detail.into()),
        )
    }

    /// The call failed in transport before a response arrived.
    #[must_use]
    pub fn request_failed(detail: impl Into<String>) -> Self {
        Self::with_message(
            DispatchErrorCode::RequestFailed,
            format!("request failed: {}", detail.into()),
        )
    }

    /// The response body was not valid JSON. Carries the status code the
    /// remote actually returned.
    #[must_use]
    pub fn response_parse(status_code: http::StatusCode, detail: impl Into<String>) -> Self {
        Self::with_message(
            DispatchErrorCode::ResponseParse,
            format!("failed to parse response JSON: {}", detail.into()),
        )
        .with_status(status_code)
    }
}

/// Create a `DispatchError` from an error code.
///
/// # Examples
///
/// ```
/// use openverse_routes::dispatch_error;
/// use openverse_routes::error::DispatchErrorCode;
///
/// let err = dispatch_error!(UnknownRoute);
/// assert_eq!(err.code, DispatchErrorCode::UnknownRoute);
///
/// let err = dispatch_error!(RequestFailed, "connection refused");
/// assert_eq!(err.message, "connection refused");
/// ```
#[macro_export]
macro_rules! dispatch_error {
    ($code:ident) => {
        $crate::error::DispatchError::new($crate::error::DispatchErrorCode::$code)
    };
    ($code:ident, $msg:expr) => {
        $crate::error::DispatchError::with_message($crate::error::DispatchErrorCode::$code, $msg)
    };
}
