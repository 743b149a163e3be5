//! Login page component.

use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::api::use_api;
use crate::error::login_failure_message;
use crate::session::use_session;

/// Email/password sign-in. On success the session is stored and the user
/// lands on the home page.
#[component]
pub fn LoginPage() -> impl IntoView {
    let session = use_session();
    let api = use_api();
    let navigate = use_navigate();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error, set_error) = signal(Option::<String>::None);
    let (submitting, set_submitting) = signal(false);

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let email = email.get();
        let password = password.get();
        let navigate = navigate.clone();

        set_submitting.set(true);
        set_error.set(None);
        spawn_local(async move {
            let result = match api.client().await {
                Ok(client) => client
                    .login(&email, &password)
                    .await
                    .map_err(|report| login_failure_message(report.current_context()).to_string()),
                Err(message) => Err(message),
            };
            match result {
                Ok(response) => {
                    session.login(response);
                    navigate("/", NavigateOptions::default());
                }
                Err(message) => set_error.set(Some(message)),
            }
            set_submitting.set(false);
        });
    };

    view! {
        <div class="login-page">
            <div class="form-box">
                <h1>"Login"</h1>
                <form on:submit=on_submit>
                    <div class="form-row">
                        <label for="email">"Email"</label>
                        <input
                            type="email"
                            id="email"
                            required
                            prop:value=move || email.get()
                            on:input=move |ev| set_email.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="form-row">
                        <label for="password">"Password"</label>
                        <input
                            type="password"
                            id="password"
                            required
                            prop:value=move || password.get()
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                        />
                    </div>
                    {move || error.get().map(|msg| view! { <p class="error-message">{msg}</p> })}
                    <button type="submit" class="primary-btn" disabled=move || submitting.get()>
                        {move || if submitting.get() { "Signing in..." } else { "Login" }}
                    </button>
                </form>
                <p class="form-footer">
                    "Don't have an account? " <a href="/register">"Register"</a>
                </p>
            </div>
        </div>
    }
}
