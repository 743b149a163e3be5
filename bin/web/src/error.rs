//! Turning API failures into inline messages.

use delib_api::ApiError;
use rootcause::prelude::Report;

use crate::session::SessionContext;

/// Shown when the server rejects the token of a signed-in user.
pub const SESSION_EXPIRED: &str = "Your session has expired. Please sign in again.";

/// Shown when a protected call is attempted without a session.
pub const SIGNED_OUT: &str = "Please sign in to continue.";

/// Shown when the browser could not learn where the API lives.
pub const CONFIG_UNAVAILABLE: &str = "The library service is unavailable. Please try again.";

/// Returns true if `error` means the current session is no longer valid.
pub fn ends_session(error: &ApiError, authenticated: bool) -> bool {
    authenticated && error.is_unauthorized()
}

/// Message for a failed call.
///
/// A 401 for a signed-in user logs them out. Any other failure is passed
/// to `describe`.
pub fn failure_message(
    session: SessionContext,
    report: &Report<ApiError>,
    describe: impl FnOnce(&ApiError) -> String,
) -> String {
    let error = report.current_context();
    leptos::logging::warn!("api call failed: {error}");

    if ends_session(error, session.token_untracked().is_some()) {
        session.logout();
        return SESSION_EXPIRED.to_string();
    }
    describe(error)
}

/// Message for a failed login. Server text is never shown here.
pub fn login_failure_message(error: &ApiError) -> &'static str {
    if error.is_unauthorized() {
        "Invalid email or password"
    } else {
        "An error occurred during login"
    }
}
