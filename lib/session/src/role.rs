//! Roles issued by the library API.
//!
//! The server answers a successful login with one of two role strings. The
//! client keeps them as a closed enum so every gate decision is a `match`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SessionError;

/// Coarse permission class of a signed-in user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// A library client: searches, borrows and manages their account.
    #[serde(rename = "ROLE_CLIENT")]
    Reader,
    /// Library staff: manages the catalog and client accounts.
    #[serde(rename = "ROLE_LIBRARIAN")]
    Librarian,
}

impl Role {
    /// Wire name, as stored under `authRole`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Reader => "ROLE_CLIENT",
            Self::Librarian => "ROLE_LIBRARIAN",
        }
    }

    /// Badge text shown in the navigation bar.
    #[must_use]
    pub fn badge(&self) -> &'static str {
        self.as_str().trim_start_matches("ROLE_")
    }

    /// How the home page addresses the user.
    #[must_use]
    pub const fn greeting_name(&self) -> &'static str {
        match self {
            Self::Reader => "Reader",
            Self::Librarian => "Librarian",
        }
    }

    /// Returns true for library staff.
    #[must_use]
    pub fn is_librarian(&self) -> bool {
        matches!(self, Self::Librarian)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ROLE_CLIENT" => Ok(Self::Reader),
            "ROLE_LIBRARIAN" => Ok(Self::Librarian),
            other => Err(SessionError::UnknownRole {
                value: other.to_string(),
            }),
        }
    }
}
