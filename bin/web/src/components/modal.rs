use leptos::prelude::*;

/// Overlay dialog with a title; closes via the caller's buttons.
#[component]
pub fn Modal(title: &'static str, children: Children) -> impl IntoView {
    view! {
        <div class="modal-overlay">
            <div class="modal">
                <h2>{title}</h2>
                {children()}
            </div>
        </div>
    }
}
