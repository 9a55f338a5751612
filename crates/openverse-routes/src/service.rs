//! Service identifiers.

use std::fmt;

/// The cooperating OpenVerse services a request can be dispatched to.
///
/// The set is closed; adding a service means adding a variant here and a
/// route enum in [`crate::catalog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceId {
    /// The users service (account CRUD and login).
    Users,
    /// The authentication service (token issuing and introspection).
    Authentication,
}

impl ServiceId {
    /// All known services.
    pub const ALL: [Self; 2] = [Self::Users, Self::Authentication];

    /// Returns the canonical service name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Users => "USERS",
            Self::Authentication => "AUTHENTICATION",
        }
    }

    /// Parse a service name into a `ServiceId`. Case-insensitive.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_uppercase().as_str() {
            "USERS" => Some(Self::Users),
            "AUTHENTICATION" => Some(Self::Authentication),
            _ => None,
        }
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
