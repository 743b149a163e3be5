//! Main Leptos application component and routing.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    components::{Route, Router, Routes},
    path,
};

use crate::api::provide_api_context;
use crate::components::Navbar;
use crate::pages::{
    AccountPage, DashboardPage, HomePage, LoginPage, NotFoundPage, RegisterPage, SearchPage,
};
use crate::session::{LogoutRedirector, provide_session_context};

/// The main application component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    let session = provide_session_context();
    provide_api_context(session);

    view! {
        <Title text="deLib"/>
        <Router>
            <LogoutRedirector/>
            <Navbar/>
            <main class="container">
                <Routes fallback=|| view! { <NotFoundPage/> }>
                    <Route path=path!("/") view=HomePage/>
                    <Route path=path!("/login") view=LoginPage/>
                    <Route path=path!("/register") view=RegisterPage/>
                    <Route path=path!("/search") view=SearchPage/>
                    <Route path=path!("/account") view=AccountPage/>
                    <Route path=path!("/dashboard") view=DashboardPage/>
                </Routes>
            </main>
            <Footer/>
        </Router>
    }
}

#[component]
fn Footer() -> impl IntoView {
    view! {
        <footer class="footer">
            <p>"© 2025 deLib Library Management System"</p>
        </footer>
    }
}
