//! Browser session context.
//!
//! Wraps a [`SessionStore`] over `localStorage` and mirrors its session into
//! a signal so every view re-renders when the user signs in or out. Only
//! [`SessionContext::login`] and [`SessionContext::logout`] write.

use delib_api::LoginResponse;
use delib_session::{
    AuthToken, KeyValueStorage, LogoutRedirect, Session, SessionState, SessionStore,
    StorageError,
};
use leptos::prelude::*;
use rootcause::prelude::Report;
use std::fmt;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

/// `window.localStorage`. Without a browser every read misses and every
/// write is dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

/// Builds the report logged when `localStorage` cannot be used.
#[cfg_attr(not(feature = "hydrate"), allow(dead_code))]
fn unavailable(action: &str, key: &str, reason: impl fmt::Display) -> Report<StorageError> {
    StorageError::Unavailable {
        reason: format!("{action} {key}: {reason}"),
    }
    .into()
}

#[cfg(feature = "hydrate")]
fn local_storage() -> Result<web_sys::Storage, Report<StorageError>> {
    let window =
        web_sys::window().ok_or_else(|| unavailable("open", "localStorage", "no window"))?;
    match window.local_storage() {
        Ok(Some(storage)) => Ok(storage),
        Ok(None) => Err(unavailable("open", "localStorage", "disabled")),
        Err(e) => Err(unavailable("open", "localStorage", format!("{e:?}"))),
    }
}

#[cfg(feature = "hydrate")]
impl KeyValueStorage for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        local_storage().ok()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) {
        let result = local_storage().and_then(|storage| {
            storage
                .set_item(key, value)
                .map_err(|e| unavailable("persist", key, format!("{e:?}")))
        });
        if let Err(report) = result {
            leptos::logging::warn!("{report}");
        }
    }

    fn remove(&mut self, key: &str) {
        let result = local_storage().and_then(|storage| {
            storage
                .remove_item(key)
                .map_err(|e| unavailable("remove", key, format!("{e:?}")))
        });
        if let Err(report) = result {
            leptos::logging::warn!("{report}");
        }
    }
}

#[cfg(not(feature = "hydrate"))]
impl KeyValueStorage for BrowserStorage {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&mut self, _key: &str, _value: &str) {}

    fn remove(&mut self, _key: &str) {}
}

/// Shared session handle. Cheap to copy into closures.
#[derive(Clone, Copy)]
pub struct SessionContext {
    session: RwSignal<Session>,
    restored: RwSignal<bool>,
    redirect: RwSignal<Option<LogoutRedirect>>,
    store: StoredValue<SessionStore<BrowserStorage>>,
}

impl SessionContext {
    /// An anonymous, not yet restored session.
    pub fn new() -> Self {
        Self {
            session: RwSignal::new(Session::anonymous()),
            restored: RwSignal::new(false),
            redirect: RwSignal::new(None),
            store: StoredValue::new(SessionStore::new(BrowserStorage)),
        }
    }

    /// Loads the persisted pair. Runs once in the browser after hydration.
    pub fn restore(&self) {
        let restored = self
            .store
            .try_update_value(|store| store.restore().clone())
            .unwrap_or_default();
        self.session.set(restored);
        self.restored.set(true);
    }

    /// Starts a session from a successful login.
    pub fn login(&self, response: LoginResponse) {
        let LoginResponse { access_token, role } = response;
        let session = self
            .store
            .try_update_value(|store| store.login(access_token, role).clone())
            .unwrap_or_default();
        self.session.set(session);
        self.restored.set(true);
    }

    /// Ends the session and asks the router to leave for the login page.
    pub fn logout(&self) {
        let redirect = self
            .store
            .try_update_value(|store| store.logout())
            .unwrap_or_default();
        self.session.set(Session::anonymous());
        self.redirect.set(Some(redirect));
    }

    /// Current session state (tracked).
    pub fn state(&self) -> SessionState {
        self.session.with(Session::state)
    }

    /// Current session state without subscribing.
    pub fn state_untracked(&self) -> SessionState {
        self.session.with_untracked(Session::state)
    }

    /// Returns true once the persisted session has been read.
    pub fn is_restored(&self) -> bool {
        self.restored.get()
    }

    /// Bearer token as of now, for attaching to a request.
    pub fn token_untracked(&self) -> Option<AuthToken> {
        self.session.with_untracked(|s| s.token().cloned())
    }

    /// Pending post-logout navigation (tracked).
    pub fn pending_redirect(&self) -> Option<LogoutRedirect> {
        self.redirect.get()
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Creates the session context, provides it, and schedules the restore.
pub fn provide_session_context() -> SessionContext {
    let context = SessionContext::new();
    provide_context(context);
    Effect::new(move || context.restore());
    context
}

pub fn use_session() -> SessionContext {
    expect_context::<SessionContext>()
}

/// Performs the delayed navigation requested by a logout.
#[component]
pub fn LogoutRedirector() -> impl IntoView {
    let session = use_session();
    let navigate = use_navigate();

    Effect::new(move || {
        if let Some(redirect) = session.pending_redirect() {
            let navigate = navigate.clone();
            set_timeout(
                move || navigate(redirect.path, NavigateOptions::default()),
                redirect.delay,
            );
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use delib_session::Role;

    fn reader_login() -> LoginResponse {
        serde_json::from_str(r#"{"accessToken": "abc123", "role": "ROLE_CLIENT"}"#)
            .expect("decode login")
    }

    #[test]
    fn starts_anonymous_and_unrestored() {
        let owner = Owner::new();
        owner.with(|| {
            let session = SessionContext::new();
            assert_eq!(session.state_untracked(), SessionState::Anonymous);
            assert!(!session.restored.get_untracked());
            assert!(session.token_untracked().is_none());
        });
    }

    #[test]
    fn login_then_logout_round_trip() {
        let owner = Owner::new();
        owner.with(|| {
            let session = SessionContext::new();
            session.login(reader_login());
            assert_eq!(
                session.state_untracked(),
                SessionState::Authenticated(Role::Reader)
            );
            assert_eq!(
                session.token_untracked().as_ref().map(AuthToken::as_str),
                Some("abc123")
            );

            session.logout();
            assert_eq!(session.state_untracked(), SessionState::Anonymous);
            assert!(session.token_untracked().is_none());
            let redirect = session.redirect.get_untracked().expect("redirect queued");
            assert_eq!(redirect.path, "/login");
            assert_eq!(redirect.delay.as_millis(), 1000);
        });
    }

    #[test]
    fn unavailable_storage_report_names_the_key() {
        let report = unavailable("persist", "authToken", "QuotaExceededError");
        assert_eq!(
            report.current_context(),
            &StorageError::Unavailable {
                reason: "persist authToken: QuotaExceededError".to_string()
            }
        );
        assert!(report.to_string().contains("storage unavailable"));
    }

    #[test]
    fn restore_without_browser_storage_stays_anonymous() {
        let owner = Owner::new();
        owner.with(|| {
            let session = SessionContext::new();
            session.restore();
            assert!(session.restored.get_untracked());
            assert_eq!(session.state_untracked(), SessionState::Anonymous);
        });
    }
}
