//! Client-side session and authorization model for deLib.
//!
//! This crate provides:
//! - Roles as issued by the library API (`Role`)
//! - The token/role pair held for a signed-in user (`Session`, `AuthToken`)
//! - Durable key-value persistence (`KeyValueStorage` and its backends)
//! - The single writer of session state (`SessionStore`)
//! - The navigation gate deciding what a session may see (`gate`)
//!
//! The gate only hides UI. The server remains the authority on every call.
//!
//! # Example
//!
//! ```
//! use delib_session::{AuthToken, MemoryStorage, Role, SessionState, SessionStore};
//!
//! let mut store = SessionStore::new(MemoryStorage::default());
//! store.login(AuthToken::new("abc123"), Role::Reader);
//! assert_eq!(store.session().state(), SessionState::Authenticated(Role::Reader));
//!
//! // A fresh store over the same storage sees the persisted pair.
//! let mut reopened = SessionStore::new(store.into_storage());
//! reopened.restore();
//! assert_eq!(reopened.session().token().map(AuthToken::as_str), Some("abc123"));
//!
//! let redirect = reopened.logout();
//! assert_eq!(redirect.path, "/login");
//! assert!(!reopened.session().is_authenticated());
//! ```

pub mod error;
pub mod gate;
pub mod role;
pub mod session;
pub mod storage;
pub mod store;

pub use error::{SessionError, StorageError};
pub use gate::{NavLink, Navigation, Page, can_view};
pub use role::Role;
pub use session::{AuthToken, Session, SessionState};
pub use storage::{JsonFileStorage, KeyValueStorage, MemoryStorage};
pub use store::{LOGOUT_REDIRECT_DELAY, LogoutRedirect, ROLE_KEY, SessionStore, TOKEN_KEY};
