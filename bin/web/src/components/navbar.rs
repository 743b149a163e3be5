//! Top navigation bar.

use delib_session::{NavLink, Navigation};
use leptos::prelude::*;

use crate::session::use_session;

/// Navigation links for the current session, plus the role badge.
#[component]
pub fn Navbar() -> impl IntoView {
    let session = use_session();
    let navigation = Memo::new(move |_| Navigation::for_state(session.state()));

    view! {
        <header class="navbar">
            <div class="navbar-left">
                <a href="/" class="logo">"deLib"</a>
                {move || navigation.get().badge().map(|badge| view! {
                    <span class="role-badge">{badge}</span>
                })}
            </div>
            <nav class="navbar-right">
                {move || navigation.with(|nav| {
                    nav.links().iter().map(|link| match link.page() {
                        Some(page) => {
                            let class = if *link == NavLink::GetStarted { "nav-cta" } else { "nav-link" };
                            view! { <a href=page.path() class=class>{link.label()}</a> }.into_any()
                        }
                        None => view! {
                            <button class="nav-link logout-button" on:click=move |_| session.logout()>
                                {link.label()}
                            </button>
                        }.into_any(),
                    }).collect_view()
                })}
            </nav>
        </header>
    }
}
