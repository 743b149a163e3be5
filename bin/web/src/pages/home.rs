//! Home page component.

use delib_session::{NavLink, Navigation, SessionState};
use leptos::prelude::*;

use crate::session::use_session;

/// Landing page with a role-specific greeting and call to action.
#[component]
pub fn HomePage() -> impl IntoView {
    let session = use_session();

    view! {
        <div class="home-page">
            {move || match session.state() {
                SessionState::Authenticated(role) => {
                    let cta = landing_link(SessionState::Authenticated(role)).and_then(|link| {
                        link.page().map(|page| view! {
                            <a href=page.path() class="cta-button">{link.label()}</a>
                        })
                    });
                    view! {
                        <section class="hero">
                            <h1>"Welcome Back, " <span class="highlight">{role.greeting_name()}</span></h1>
                            <p>{INTRO}</p>
                            {cta}
                        </section>
                    }.into_any()
                }
                SessionState::Anonymous => view! {
                    <section class="hero">
                        <h1>"Welcome to Modern Library Management"</h1>
                        <p>{INTRO}</p>
                    </section>
                    <section class="get-started">
                        <h2>"Get Started Today"</h2>
                        <p>"Join our library community to access thousands of resources"</p>
                        <a href="/register" class="cta-button">"Create Account"</a>
                        <a href="/login" class="link-button">"Login"</a>
                    </section>
                }.into_any(),
            }}

            <section class="features">
                <h2>"System Features"</h2>
                <div class="feature">
                    <h3>"Secure Access"</h3>
                    <p>"Role-based sign-in keeps reader and librarian tools apart."</p>
                </div>
                <div class="feature">
                    <h3>"Comprehensive Management"</h3>
                    <p>"Books, magazines and journals, client accounts and loans in one place."</p>
                </div>
                <div class="feature">
                    <h3>"Advanced Search"</h3>
                    <p>"Search the catalog by title, ISBN, year and publisher."</p>
                </div>
            </section>
        </div>
    }
}

const INTRO: &str = "Efficiently manage library resources, streamline transactions, and \
    provide seamless access to knowledge with our integrated platform.";

/// The navigation link leading to the session's landing page, if it is not
/// the home page itself.
fn landing_link(state: SessionState) -> Option<NavLink> {
    let navigation = Navigation::for_state(state);
    let landing = navigation.landing();
    navigation
        .links()
        .iter()
        .copied()
        .filter(|link| *link != NavLink::Home)
        .find(|link| link.page() == Some(landing))
}

#[cfg(test)]
mod tests {
    use super::*;
    use delib_session::{Page, Role};

    #[test]
    fn call_to_action_follows_the_landing_page() {
        let reader = landing_link(SessionState::Authenticated(Role::Reader));
        assert_eq!(reader, Some(NavLink::Search));
        assert_eq!(reader.and_then(|l| l.page()), Some(Page::Search));

        let librarian = landing_link(SessionState::Authenticated(Role::Librarian));
        assert_eq!(librarian.map(|l| l.label()), Some("Dashboard"));

        assert_eq!(landing_link(SessionState::Anonymous), None);
    }
}
