use leptos::prelude::*;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="not-found-page">
            <h1>"404"</h1>
            <p>"Sorry, the page you are looking for does not exist."</p>
            <a href="/" class="link-button">"Back to home"</a>
        </div>
    }
}
