//! Librarian-side client registration.

use delib_api::{ApiError, NewClient};
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;

fn registration_failure(error: &ApiError) -> String {
    if error.is_validation() {
        "Client already registered!".to_string()
    } else {
        "An error occurred. Please try again.".to_string()
    }
}

#[component]
pub fn RegisterClient() -> impl IntoView {
    let api = use_api();

    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let address = RwSignal::new(String::new());
    let city = RwSignal::new(String::new());
    let state = RwSignal::new(String::new());
    let zipcode = RwSignal::new(String::new());
    let fields = [name, email, password, address, city, state, zipcode];
    let (error, set_error) = signal(Option::<String>::None);
    let (notice, set_notice) = signal(Option::<String>::None);
    let (submitting, set_submitting) = signal(false);

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let new_client = NewClient {
            name: name.get(),
            email: email.get().trim().to_string(),
            password: password.get(),
            address: address.get(),
            city: city.get(),
            state: state.get(),
            zipcode: zipcode.get(),
        };
        set_submitting.set(true);
        set_error.set(None);
        set_notice.set(None);
        spawn_local(async move {
            let result = api
                .authorized_as(
                    |client, token| async move {
                        client.register_client(&token, &new_client).await
                    },
                    registration_failure,
                )
                .await;
            match result {
                Ok(()) => {
                    for field in fields {
                        field.set(String::new());
                    }
                    set_notice.set(Some("Client registered successfully!".to_string()));
                }
                Err(message) => set_error.set(Some(message)),
            }
            set_submitting.set(false);
        });
    };

    let input = |id: &'static str,
                 label: &'static str,
                 input_type: &'static str,
                 field: RwSignal<String>| {
        view! {
            <div class="form-row">
                <label for=id>{label}</label>
                <input type=input_type id=id required
                    prop:value=move || field.get()
                    on:input=move |ev| field.set(event_target_value(&ev))
                />
            </div>
        }
    };

    view! {
        <div class="register-client">
            <h2>"Register Client"</h2>
            <form on:submit=on_submit>
                {input("name", "Name", "text", name)}
                {input("email", "Email", "email", email)}
                {input("password", "Password", "password", password)}
                {input("address", "Address", "text", address)}
                {input("city", "City", "text", city)}
                {input("state", "State", "text", state)}
                {input("zipcode", "Zip code", "text", zipcode)}
                {move || error.get().map(|msg| view! { <p class="error-message">{msg}</p> })}
                {move || notice.get().map(|msg| view! { <p class="success-message">{msg}</p> })}
                <button type="submit" class="primary-btn" disabled=move || submitting.get()>
                    "Register"
                </button>
            </form>
        </div>
    }
}
