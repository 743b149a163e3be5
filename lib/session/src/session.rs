//! The token/role pair held for a signed-in user.
//!
//! A session is either anonymous or carries both a bearer token and a role.
//! The pair lives in a single `Option`, so one half can never outlive the
//! other.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::role::Role;

/// Opaque bearer credential issued by the server at login.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthToken(String);

impl AuthToken {
    /// Wraps a token string.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the raw token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for the `Authorization` header.
    #[must_use]
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

// Tokens end up in log fields; keep them out of Debug output.
impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(..)")
    }
}

impl From<String> for AuthToken {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for AuthToken {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// The two states a session can be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// Nobody is signed in.
    Anonymous,
    /// A user with the given role is signed in.
    Authenticated(Role),
}

impl SessionState {
    /// Returns the role when authenticated.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(role) => Some(*role),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Credentials {
    token: AuthToken,
    role: Role,
}

/// Current session value as read by views.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    credentials: Option<Credentials>,
}

impl Session {
    /// A session with nobody signed in.
    #[must_use]
    pub fn anonymous() -> Self {
        Self { credentials: None }
    }

    /// A session for a signed-in user.
    #[must_use]
    pub fn authenticated(token: AuthToken, role: Role) -> Self {
        Self {
            credentials: Some(Credentials { token, role }),
        }
    }

    /// Returns the bearer token, if signed in.
    #[must_use]
    pub fn token(&self) -> Option<&AuthToken> {
        self.credentials.as_ref().map(|c| &c.token)
    }

    /// Returns the role, if signed in.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.credentials.as_ref().map(|c| c.role)
    }

    /// Returns true if a user is signed in.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.credentials.is_some()
    }

    /// Returns the state machine view of this session.
    #[must_use]
    pub fn state(&self) -> SessionState {
        match &self.credentials {
            None => SessionState::Anonymous,
            Some(c) => SessionState::Authenticated(c.role),
        }
    }
}
