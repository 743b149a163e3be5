//! Error types for the session crate.
//!
//! Errors are designed for layered context using rootcause:
//! - `SessionError`: values that cannot form a session (unknown role)
//! - `StorageError`: failures of a durable storage backend

use std::fmt;
use std::path::PathBuf;

/// Errors from building a session out of untrusted values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The role string is not one the client knows how to gate.
    UnknownRole { value: String },
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownRole { value } => write!(f, "unknown role: {value:?}"),
        }
    }
}

impl std::error::Error for SessionError {}

/// Errors from a storage backend.
///
/// Callers of [`KeyValueStorage`](crate::KeyValueStorage) never see these:
/// backends log them and carry on. They surface only when opening a backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The backing file could not be read.
    ReadFailed { path: PathBuf, reason: String },
    /// The backing file could not be written.
    WriteFailed { path: PathBuf, reason: String },
    /// The backing file does not hold a JSON string map.
    Corrupt { path: PathBuf, reason: String },
    /// The browser storage area is not reachable.
    Unavailable { reason: String },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadFailed { path, reason } => {
                write!(f, "failed to read {}: {reason}", path.display())
            }
            Self::WriteFailed { path, reason } => {
                write!(f, "failed to write {}: {reason}", path.display())
            }
            Self::Corrupt { path, reason } => {
                write!(f, "corrupt storage file {}: {reason}", path.display())
            }
            Self::Unavailable { reason } => write!(f, "storage unavailable: {reason}"),
        }
    }
}

impl std::error::Error for StorageError {}
