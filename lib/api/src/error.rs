//! Error types for the API crate.
//!
//! Errors are designed for layered context using rootcause. `ApiError` is the
//! taxonomy views react to:
//! - `Transport`: the request never produced a response
//! - `Unauthorized`: the server rejected the credentials (401)
//! - `Validation`: the server rejected the input (400, or a 200 carrying an
//!   `error` field)
//! - `Status`: any other non-success status
//! - `Decode`: a success response whose body did not match the model

use std::fmt;

/// Errors from a call to the library API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Network or transport failure.
    Transport { reason: String },
    /// Credentials missing, wrong or expired.
    Unauthorized { message: Option<String> },
    /// Input rejected by the server.
    Validation { message: Option<String> },
    /// Any other non-success response.
    Status { status: u16, message: Option<String> },
    /// Response body could not be decoded.
    Decode { reason: String },
}

impl ApiError {
    /// Classifies a non-success response.
    #[must_use]
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = extract_message(body);
        match status {
            401 => Self::Unauthorized { message },
            400 => Self::Validation { message },
            _ => Self::Status { status, message },
        }
    }

    /// Message provided by the server, if any.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Unauthorized { message }
            | Self::Validation { message }
            | Self::Status { message, .. } => message.as_deref(),
            Self::Transport { .. } | Self::Decode { .. } => None,
        }
    }

    /// Text for an inline error: the server's own message when it sent one,
    /// otherwise `fallback`.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_string()
    }

    /// HTTP status of the failed response, if there was one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { .. } => Some(401),
            Self::Validation { .. } => Some(400),
            Self::Status { status, .. } => Some(*status),
            Self::Transport { .. } | Self::Decode { .. } => None,
        }
    }

    /// Returns true for a 401.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// Returns true for a 400 or an in-body error.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

/// Pulls a human-readable message out of an error body.
///
/// The API answers with plain text on most failures and with a JSON object
/// carrying `message` or `error` on others.
pub(crate) fn extract_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str(trimmed) {
        return ["message", "error"]
            .iter()
            .filter_map(|key| map.get(*key).and_then(|v| v.as_str()))
            .map(str::trim)
            .find(|msg| !msg.is_empty())
            .map(str::to_string);
    }
    Some(trimmed.to_string())
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport { reason } => write!(f, "request failed: {reason}"),
            Self::Unauthorized { message: None } => write!(f, "unauthorized"),
            Self::Unauthorized { message: Some(m) } => write!(f, "unauthorized: {m}"),
            Self::Validation { message: None } => write!(f, "request rejected"),
            Self::Validation { message: Some(m) } => write!(f, "request rejected: {m}"),
            Self::Status {
                status,
                message: None,
            } => write!(f, "unexpected status {status}"),
            Self::Status {
                status,
                message: Some(m),
            } => write!(f, "unexpected status {status}: {m}"),
            Self::Decode { reason } => write!(f, "invalid response body: {reason}"),
        }
    }
}

impl std::error::Error for ApiError {}
