//! Self-registration page.

use delib_api::{Registration, RegistrationRole, StaffDetails};
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;

const FALLBACK: &str = "Error registering. Please try again.";

/// Builds the request from raw form values.
fn registration(
    name: String,
    email: String,
    password: String,
    password2: String,
    role: &str,
    ssn: String,
    salary: &str,
) -> Result<Registration, String> {
    let role: RegistrationRole = role
        .parse()
        .map_err(|_| "Please select a role.".to_string())?;
    let staff = match role {
        RegistrationRole::Librarian => Some(StaffDetails {
            ssn,
            salary: salary.trim().parse().unwrap_or(0.0),
        }),
        RegistrationRole::Client => None,
    };
    Ok(Registration {
        name,
        email,
        password,
        password2,
        role,
        staff,
    })
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let api = use_api();

    let (name, set_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (password2, set_password2) = signal(String::new());
    let (role, set_role) = signal(String::new());
    let (ssn, set_ssn) = signal(String::new());
    let (salary, set_salary) = signal("0".to_string());
    let (error, set_error) = signal(Option::<String>::None);
    let (registered, set_registered) = signal(false);

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let request = match registration(
            name.get(),
            email.get(),
            password.get(),
            password2.get(),
            &role.get(),
            ssn.get(),
            &salary.get(),
        ) {
            Ok(request) => request,
            Err(message) => {
                set_error.set(Some(message));
                return;
            }
        };

        set_error.set(None);
        spawn_local(async move {
            let result = match api.client().await {
                Ok(client) => client
                    .register(&request)
                    .await
                    .map_err(|report| report.current_context().user_message(FALLBACK)),
                Err(message) => Err(message),
            };
            match result {
                Ok(()) => set_registered.set(true),
                Err(message) => set_error.set(Some(message)),
            }
        });
    };

    view! {
        <div class="register-page">
            <div class="form-box">
                <h1>"Registration"</h1>
                <Show
                    when=move || !registered.get()
                    fallback=|| view! {
                        <p class="success-message">"Registration successful. You can now sign in."</p>
                        <a href="/login" class="link-button">"Sign in"</a>
                    }
                >
                    <form on:submit=on_submit>
                        <div class="form-row">
                            <label for="name">"Name"</label>
                            <input type="text" id="name" required
                                prop:value=move || name.get()
                                on:input=move |ev| set_name.set(event_target_value(&ev))
                            />
                        </div>
                        <div class="form-row">
                            <label for="email">"Email"</label>
                            <input type="email" id="email" required
                                prop:value=move || email.get()
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                            />
                        </div>
                        <div class="form-row">
                            <label for="password">"Password"</label>
                            <input type="password" id="password" required
                                prop:value=move || password.get()
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                            />
                        </div>
                        <div class="form-row">
                            <label for="confirmPassword">"Confirm Password"</label>
                            <input type="password" id="confirmPassword" required
                                prop:value=move || password2.get()
                                on:input=move |ev| set_password2.set(event_target_value(&ev))
                            />
                        </div>
                        <div class="form-row">
                            <label for="role">"Role"</label>
                            <select id="role" required
                                prop:value=move || role.get()
                                on:change=move |ev| set_role.set(event_target_value(&ev))
                            >
                                <option value="">"Select Role"</option>
                                <option value="client">"Client"</option>
                                <option value="librarian">"Librarian"</option>
                            </select>
                        </div>
                        <Show when=move || role.get() == "librarian">
                            <div class="form-row">
                                <label for="ssn">"SSN"</label>
                                <input type="text" id="ssn" required
                                    prop:value=move || ssn.get()
                                    on:input=move |ev| set_ssn.set(event_target_value(&ev))
                                />
                            </div>
                            <div class="form-row">
                                <label for="salary">"Salary"</label>
                                <input type="number" id="salary" required
                                    prop:value=move || salary.get()
                                    on:input=move |ev| set_salary.set(event_target_value(&ev))
                                />
                            </div>
                        </Show>
                        {move || error.get().map(|msg| view! { <p class="error-message">{msg}</p> })}
                        <button type="submit" class="primary-btn">"Register"</button>
                    </form>
                </Show>
                <p class="form-footer">
                    "Already have an account? " <a href="/login">"Login"</a>
                </p>
            </div>
        </div>
    }
}
