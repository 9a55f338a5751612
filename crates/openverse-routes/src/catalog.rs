//! The route catalog: per-service route enums bound to URL templates and
//! HTTP verbs.
//!
//! Templates may contain named placeholders (`{id}`, `{user_login}`) that
//! are substituted by [`crate::resolve::resolve_route`]. Each route carries
//! exactly one verb, fixed here at definition time; the whole catalog is
//! read-only for the process lifetime.

use std::fmt;

use crate::method::HttpMethod;
use crate::service::ServiceId;

/// Routes exposed by the users service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UsersRoute {
    /// Create a new user.
    CreateUser,
    /// Fetch a user by id.
    GetUserById,
    /// Fetch a user by login.
    GetUserByLogin,
    /// Update an existing user.
    UpdateUser,
    /// Delete a user by id.
    DeleteUserById,
    /// Delete a user by login.
    DeleteUserByLogin,
    /// Authenticate a user with credentials.
    LogIn,
    /// Liveness probe.
    Health,
}

impl UsersRoute {
    /// All users routes.
    pub const ALL: [Self; 8] = [
        Self::CreateUser,
        Self::GetUserById,
        Self::GetUserByLogin,
        Self::UpdateUser,
        Self::DeleteUserById,
        Self::DeleteUserByLogin,
        Self::LogIn,
        Self::Health,
    ];

    /// Returns the canonical route key.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreateUser => "CREATE_USER",
            Self::GetUserById => "GET_USER_BY_ID",
            Self::GetUserByLogin => "GET_USER_BY_LOGIN",
            Self::UpdateUser => "UPDATE_USER",
            Self::DeleteUserById => "DELETE_USER_BY_ID",
            Self::DeleteUserByLogin => "DELETE_USER_BY_LOGIN",
            Self::LogIn => "LOG_IN",
            Self::Health => "HEALTH",
        }
    }

    /// Parse a route key into a `UsersRoute`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_uppercase().as_str() {
            "CREATE_USER" => Some(Self::CreateUser),
            "GET_USER_BY_ID" => Some(Self::GetUserById),
            "GET_USER_BY_LOGIN" => Some(Self::GetUserByLogin),
            "UPDATE_USER" => Some(Self::UpdateUser),
            "DELETE_USER_BY_ID" => Some(Self::DeleteUserById),
            "DELETE_USER_BY_LOGIN" => Some(Self::DeleteUserByLogin),
            "LOG_IN" => Some(Self::LogIn),
            "HEALTH" => Some(Self::Health),
            _ => None,
        }
    }

    /// Returns the URL template for this route.
    #[must_use]
    pub fn template(&self) -> &'static str {
        match self {
            Self::CreateUser => "/users/create",
            Self::GetUserById => "/users/{id}",
            Self::GetUserByLogin => "/users/login/{user_login}",
            Self::UpdateUser => "/users/update",
            Self::DeleteUserById => "/users/delete/{user_id}",
            Self::DeleteUserByLogin => "/users/delete/login/{user_login}",
            Self::LogIn => "/users/log_in",
            Self::Health => "/health",
        }
    }

    /// Returns the single verb this route accepts.
    #[must_use]
    pub fn method(&self) -> HttpMethod {
        match self {
            Self::CreateUser | Self::LogIn => HttpMethod::Post,
            Self::GetUserById | Self::GetUserByLogin | Self::Health => HttpMethod::Get,
            Self::UpdateUser => HttpMethod::Put,
            Self::DeleteUserById | Self::DeleteUserByLogin => HttpMethod::Delete,
        }
    }
}

/// Routes exposed by the authentication service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthRoute {
    /// Issue an access token.
    GetAccessToken,
    /// Issue a refresh token.
    GetRefreshToken,
    /// Resolve the user behind a token.
    GetUserInfo,
}

impl AuthRoute {
    /// All authentication routes.
    pub const ALL: [Self; 3] = [Self::GetAccessToken, Self::GetRefreshToken, Self::GetUserInfo];

    /// Returns the canonical route key.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GetAccessToken => "GET_ACCESS_TOKEN",
            Self::GetRefreshToken => "GET_REFRESH_TOKEN",
            Self::GetUserInfo => "GET_USER_INFO",
        }
    }

    /// Parse a route key into an `AuthRoute`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_uppercase().as_str() {
            "GET_ACCESS_TOKEN" => Some(Self::GetAccessToken),
            "GET_REFRESH_TOKEN" => Some(Self::GetRefreshToken),
            "GET_USER_INFO" => Some(Self::GetUserInfo),
            _ => None,
        }
    }

    /// Returns the URL template for this route.
    #[must_use]
    pub fn template(&self) -> &'static str {
        match self {
            Self::GetAccessToken => "/auth/token",
            Self::GetRefreshToken => "/auth/refresh",
            Self::GetUserInfo => "/auth/user/info",
        }
    }

    /// Returns the single verb this route accepts.
    #[must_use]
    pub fn method(&self) -> HttpMethod {
        match self {
            Self::GetAccessToken | Self::GetRefreshToken | Self::GetUserInfo => HttpMethod::Get,
        }
    }
}

/// A route tagged with the service that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// A users service route.
    Users(UsersRoute),
    /// An authentication service route.
    Authentication(AuthRoute),
}

impl Route {
    /// The service this route belongs to.
    #[must_use]
    pub fn service(&self) -> ServiceId {
        match self {
            Self::Users(_) => ServiceId::Users,
            Self::Authentication(_) => ServiceId::Authentication,
        }
    }

    /// Returns the canonical route key (e.g. `CREATE_USER`).
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Users(route) => route.as_str(),
            Self::Authentication(route) => route.as_str(),
        }
    }

    /// Returns the URL template for this route.
    #[must_use]
    pub fn template(&self) -> &'static str {
        match self {
            Self::Users(route) => route.template(),
            Self::Authentication(route) => route.template(),
        }
    }

    /// Returns the single verb this route accepts.
    #[must_use]
    pub fn method(&self) -> HttpMethod {
        match self {
            Self::Users(route) => route.method(),
            Self::Authentication(route) => route.method(),
        }
    }

    /// Look a route key up within a service's route set.
    #[must_use]
    pub fn from_name(service: ServiceId, name: &str) -> Option<Self> {
        match service {
            ServiceId::Users => UsersRoute::from_name(name).map(Self::Users),
            ServiceId::Authentication => AuthRoute::from_name(name).map(Self::Authentication),
        }
    }

    /// Every route in the catalog, across all services.
    #[must_use]
    pub fn catalog() -> Vec<Self> {
        let mut routes: Vec<Self> = UsersRoute::ALL.into_iter().map(Self::Users).collect();
        routes.extend(AuthRoute::ALL.into_iter().map(Self::Authentication));
        routes
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.service(), self.name())
    }
}

impl From<UsersRoute> for Route {
    fn from(route: UsersRoute) -> Self {
        Self::Users(route)
    }
}

impl From<AuthRoute> for Route {
    fn from(route: AuthRoute) -> Self {
        Self::Authentication(route)
    }
}

/// A route reference as supplied by a caller: either a typed catalog entry
/// or a raw key to be looked up within the target service.
///
/// Both forms resolve to the same template; the raw form exists for call
/// sites that receive the route name from configuration or another wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteKey {
    /// A strongly-typed catalog entry.
    Typed(Route),
    /// A raw route key, resolved against the service's route set.
    Named(String),
}

impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Typed(route) => write!(f, "{route}"),
            Self::Named(name) => f.write_str(name),
        }
    }
}

impl From<Route> for RouteKey {
    fn from(route: Route) -> Self {
        Self::Typed(route)
    }
}

impl From<UsersRoute> for RouteKey {
    fn from(route: UsersRoute) -> Self {
        Self::Typed(route.into())
    }
}

impl From<AuthRoute> for RouteKey {
    fn from(route: AuthRoute) -> Self {
        Self::Typed(route.into())
    }
}

impl From<&str> for RouteKey {
    fn from(name: &str) -> Self {
        Self::Named(name.to_owned())
    }
}

impl From<String> for RouteKey {
    fn from(name: String) -> Self {
        Self::Named(name)
    }
}
