//! The single writer of session state.
//!
//! `SessionStore` owns the persisted token/role pair. Only [`login`] and
//! [`logout`] change it; everything else reads through [`session`].
//!
//! [`login`]: SessionStore::login
//! [`logout`]: SessionStore::logout
//! [`session`]: SessionStore::session

use std::time::Duration;
use tracing::{debug, warn};

use crate::gate::Page;
use crate::role::Role;
use crate::session::{AuthToken, Session};
use crate::storage::KeyValueStorage;

/// Storage key holding the bearer token.
pub const TOKEN_KEY: &str = "authToken";

/// Storage key holding the role wire name.
pub const ROLE_KEY: &str = "authRole";

/// Pause between clearing the session and leaving the page.
pub const LOGOUT_REDIRECT_DELAY: Duration = Duration::from_secs(1);

/// Navigation the UI must schedule after a logout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogoutRedirect {
    /// Route to navigate to.
    pub path: &'static str,
    /// How long to wait before navigating.
    pub delay: Duration,
}

impl Default for LogoutRedirect {
    fn default() -> Self {
        Self {
            path: Page::Login.path(),
            delay: LOGOUT_REDIRECT_DELAY,
        }
    }
}

/// Session state backed by durable storage.
#[derive(Debug)]
pub struct SessionStore<S> {
    storage: S,
    session: Session,
}

impl<S: KeyValueStorage> SessionStore<S> {
    /// Creates an anonymous store. Call [`restore`](Self::restore) to load
    /// a persisted session.
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            session: Session::anonymous(),
        }
    }

    /// Loads the persisted pair.
    ///
    /// The session becomes authenticated only when both keys hold non-empty
    /// values and the role is known. Otherwise it is anonymous; stored
    /// values are left untouched.
    pub fn restore(&mut self) -> &Session {
        let token = self.storage.get(TOKEN_KEY).filter(|t| !t.is_empty());
        let role = self.storage.get(ROLE_KEY).filter(|r| !r.is_empty());

        self.session = match (token, role) {
            (Some(token), Some(role)) => match role.parse::<Role>() {
                Ok(role) => {
                    debug!(%role, "restored persisted session");
                    Session::authenticated(AuthToken::new(token), role)
                }
                Err(e) => {
                    warn!(error = %e, "ignoring persisted session with unknown role");
                    Session::anonymous()
                }
            },
            _ => Session::anonymous(),
        };
        &self.session
    }

    /// Signs a user in, replacing any current session.
    pub fn login(&mut self, token: AuthToken, role: Role) -> &Session {
        self.storage.set(TOKEN_KEY, token.as_str());
        self.storage.set(ROLE_KEY, role.as_str());
        self.session = Session::authenticated(token, role);
        debug!(%role, "session started");
        &self.session
    }

    /// Signs the user out and returns the redirect to schedule.
    pub fn logout(&mut self) -> LogoutRedirect {
        self.session = Session::anonymous();
        self.storage.remove(TOKEN_KEY);
        self.storage.remove(ROLE_KEY);
        debug!("session cleared");
        LogoutRedirect::default()
    }

    /// Current session value.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Backing storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Consumes the store, returning its storage.
    pub fn into_storage(self) -> S {
        self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionState;
    use crate::storage::{JsonFileStorage, MemoryStorage};

    fn storage_with(entries: &[(&str, &str)]) -> MemoryStorage {
        let mut storage = MemoryStorage::default();
        for (k, v) in entries {
            storage.set(k, v);
        }
        storage
    }

    #[test]
    fn new_store_is_anonymous_until_restored() {
        let storage = storage_with(&[(TOKEN_KEY, "abc"), (ROLE_KEY, "ROLE_CLIENT")]);
        let store = SessionStore::new(storage);
        assert_eq!(store.session().state(), SessionState::Anonymous);
    }

    #[test]
    fn restore_with_both_keys_is_authenticated() {
        let storage = storage_with(&[(TOKEN_KEY, "abc"), (ROLE_KEY, "ROLE_LIBRARIAN")]);
        let mut store = SessionStore::new(storage);
        let session = store.restore();
        assert_eq!(session.state(), SessionState::Authenticated(Role::Librarian));
        assert_eq!(session.token().map(AuthToken::as_str), Some("abc"));
    }

    #[test]
    fn restore_with_either_key_missing_is_anonymous() {
        for entries in [
            vec![(TOKEN_KEY, "abc")],
            vec![(ROLE_KEY, "ROLE_CLIENT")],
            vec![],
        ] {
            let mut store = SessionStore::new(storage_with(&entries));
            assert_eq!(store.restore().state(), SessionState::Anonymous);
        }
    }

    #[test]
    fn restore_treats_empty_values_as_missing() {
        let storage = storage_with(&[(TOKEN_KEY, ""), (ROLE_KEY, "ROLE_CLIENT")]);
        let mut store = SessionStore::new(storage);
        assert!(!store.restore().is_authenticated());
    }

    #[test]
    fn restore_with_unknown_role_is_anonymous_and_keeps_storage() {
        let storage = storage_with(&[(TOKEN_KEY, "abc"), (ROLE_KEY, "ROLE_ADMIN")]);
        let mut store = SessionStore::new(storage);
        assert!(!store.restore().is_authenticated());
        assert_eq!(store.storage().get(ROLE_KEY).as_deref(), Some("ROLE_ADMIN"));
    }

    #[test]
    fn login_then_restore_round_trips() {
        let mut store = SessionStore::new(MemoryStorage::default());
        store.login(AuthToken::new("abc123"), Role::Reader);

        let mut reopened = SessionStore::new(store.into_storage());
        let session = reopened.restore();
        assert_eq!(session.token().map(AuthToken::as_str), Some("abc123"));
        assert_eq!(session.role(), Some(Role::Reader));
    }

    #[test]
    fn login_reads_back_pair_immediately() {
        let mut store = SessionStore::new(MemoryStorage::default());
        store.login(AuthToken::new("abc123"), Role::Reader);

        let session = store.session();
        assert_eq!(session.token().map(AuthToken::as_str), Some("abc123"));
        assert_eq!(session.role().map(|r| r.as_str()), Some("ROLE_CLIENT"));
        assert_eq!(store.storage().get(TOKEN_KEY).as_deref(), Some("abc123"));
        assert_eq!(store.storage().get(ROLE_KEY).as_deref(), Some("ROLE_CLIENT"));
    }

    #[test]
    fn login_replaces_previous_session() {
        let mut store = SessionStore::new(MemoryStorage::default());
        store.login(AuthToken::new("first"), Role::Reader);
        store.login(AuthToken::new("second"), Role::Librarian);

        assert_eq!(
            store.session().state(),
            SessionState::Authenticated(Role::Librarian)
        );
        assert_eq!(store.storage().get(TOKEN_KEY).as_deref(), Some("second"));
    }

    #[test]
    fn logout_clears_both_fields_and_storage() {
        let mut store = SessionStore::new(MemoryStorage::default());
        store.login(AuthToken::new("abc123"), Role::Reader);

        let redirect = store.logout();
        assert_eq!(redirect.path, "/login");
        assert_eq!(redirect.delay, Duration::from_secs(1));

        assert!(store.session().token().is_none());
        assert!(store.session().role().is_none());
        assert!(store.storage().is_empty());

        assert_eq!(store.restore().state(), SessionState::Anonymous);
    }

    #[test]
    fn logout_when_anonymous_is_harmless() {
        let mut store = SessionStore::new(MemoryStorage::default());
        store.logout();
        assert!(!store.session().is_authenticated());
    }

    #[test]
    fn file_backed_store_survives_restart() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("session.json");

        let mut store = SessionStore::new(JsonFileStorage::open(&path).expect("open"));
        store.login(AuthToken::new("abc123"), Role::Librarian);
        drop(store);

        let mut restarted = SessionStore::new(JsonFileStorage::open(&path).expect("reopen"));
        assert_eq!(
            restarted.restore().state(),
            SessionState::Authenticated(Role::Librarian)
        );

        restarted.logout();
        let mut after_logout = SessionStore::new(JsonFileStorage::open(&path).expect("reopen"));
        assert_eq!(after_logout.restore().state(), SessionState::Anonymous);
    }
}
