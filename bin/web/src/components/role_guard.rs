//! Page guard driven by the authorization gate.

use delib_session::{Navigation, Page, can_view};
use leptos::prelude::*;

use crate::session::use_session;

/// Renders `children` only when the session may view `page`.
///
/// Until the persisted session has been read nothing is decided, so a
/// signed-in user reloading a page does not see the notice flash.
#[component]
pub fn RequireRole(page: Page, children: ChildrenFn) -> impl IntoView {
    let session = use_session();

    move || {
        if !session.is_restored() {
            return view! { <p>"Loading..."</p> }.into_any();
        }
        let state = session.state();
        if can_view(state, page) {
            return children().into_any();
        }
        let landing = Navigation::for_state(state).landing();
        view! {
            <div class="notice">
                <p>"This page is not available for your role."</p>
                <a href=landing.path() class="link-button">"Continue"</a>
            </div>
        }
        .into_any()
    }
}
