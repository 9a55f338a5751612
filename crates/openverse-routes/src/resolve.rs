//! Route resolution and method validation.
//!
//! Both operations are local and synchronous: they consult only the static
//! catalog and always run before any URL construction or network I/O.

use std::collections::HashMap;

use crate::catalog::{Route, RouteKey};
use crate::error::DispatchError;
use crate::method::HttpMethod;
use crate::service::ServiceId;

/// Resolve a raw service name into a [`ServiceId`].
///
/// # Errors
/// Returns `UnknownService` if the name is not in the catalog.
pub fn resolve_service(name: &str) -> Result<ServiceId, DispatchError> {
    ServiceId::from_name(name).ok_or_else(|| DispatchError::unknown_service(name))
}

/// Look a route key up within a service's route set.
///
/// A typed key belonging to a different service is an unknown route, not a
/// silent cross-service dispatch.
///
/// # Errors
/// Returns `UnknownRoute` on a lookup miss.
pub fn lookup_route(service: ServiceId, key: &RouteKey) -> Result<Route, DispatchError> {
    match key {
        RouteKey::Typed(route) if route.service() == service => Ok(*route),
        RouteKey::Typed(route) => Err(DispatchError::unknown_route(service, route)),
        RouteKey::Named(name) => {
            Route::from_name(service, name).ok_or_else(|| DispatchError::unknown_route(service, name))
        }
    }
}

/// Resolve a route into a concrete path, substituting template placeholders
/// from `params`.
///
/// Substitution is literal string formatting; reserved characters in
/// parameter values are not URL-encoded and must be pre-encoded by the
/// caller. Templates without placeholders ignore `params` entirely.
///
/// # Errors
/// Returns `UnknownRoute` on a lookup miss and `MissingParameter` (naming
/// the absent key) when a placeholder has no matching parameter.
pub fn resolve_route(
    service: ServiceId,
    key: impl Into<RouteKey>,
    params: Option<&HashMap<String, String>>,
) -> Result<String, DispatchError> {
    let key = key.into();
    let route = lookup_route(service, &key)?;
    let path = substitute(route, params)?;
    tracing::debug!(%service, route = route.name(), %path, "resolved route");
    Ok(path)
}

/// Validate that `method` is the verb the catalog binds to the given route.
///
/// Returns the resolved [`Route`] so callers can continue with the typed
/// entry. This check never touches the network.
///
/// # Errors
/// Returns `UnknownService`/`UnknownRoute` on a lookup miss and
/// `MethodMismatch` (naming both verbs) when the verb differs.
pub fn validate_http_method(
    service: ServiceId,
    key: impl Into<RouteKey>,
    method: HttpMethod,
) -> Result<Route, DispatchError> {
    let key = key.into();
    let route = lookup_route(service, &key)?;
    let expected = route.method();
    if expected != method {
        tracing::debug!(%route, %expected, got = %method, "HTTP method validation failed");
        return Err(DispatchError::method_mismatch(route, expected, method));
    }
    Ok(route)
}

/// Substitute `{name}` placeholders in the route's template.
fn substitute(
    route: Route,
    params: Option<&HashMap<String, String>>,
) -> Result<String, DispatchError> {
    let template = route.template();
    if !template.contains('{') {
        return Ok(template.to_owned());
    }

    let mut path = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        path.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            // Unbalanced brace: no placeholder to substitute, keep literal.
            path.push_str(&rest[open..]);
            return Ok(path);
        };
        let name = &after[..close];
        let value = params
            .and_then(|p| p.get(name))
            .ok_or_else(|| DispatchError::missing_parameter(route, name))?;
        path.push_str(value);
        rest = &after[close + 1..];
    }
    path.push_str(rest);
    Ok(path)
}
