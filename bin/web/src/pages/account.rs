//! Reader account summary and payment card.

use delib_api::CreditCard;
use delib_session::Page;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::components::RequireRole;

const ACCOUNT_FAILED: &str = "Error loading account information.";
const CARD_FAILED: &str = "Error loading payment information.";
const SAVE_FAILED: &str = "Error saving the card. Please try again.";
const DELETE_FAILED: &str = "Error deleting the card. Please try again.";

#[component]
pub fn AccountPage() -> impl IntoView {
    view! {
        <RequireRole page=Page::Account>
            <AccountInfo/>
        </RequireRole>
    }
}

#[component]
fn AccountInfo() -> impl IntoView {
    let api = use_api();

    // Both requests start together.
    let account = LocalResource::new(move || async move {
        api.authorized(ACCOUNT_FAILED, |client, token| async move {
            client.account_info(&token).await
        })
        .await
    });
    let stored_card = LocalResource::new(move || async move {
        api.authorized(CARD_FAILED, |client, token| async move {
            client.credit_card(&token).await
        })
        .await
    });

    view! {
        <div class="account-page">
            <section class="panel">
                <h2>"Account Information"</h2>
                <Suspense fallback=move || view! { <p>"Loading..."</p> }>
                    {move || account.get().map(|result| match result {
                        Ok(info) => {
                            let borrowed = info.documents_borrowed.clone();
                            view! {
                                <dl class="details">
                                    <dt>"Name"</dt><dd>{info.name.clone().unwrap_or_default()}</dd>
                                    <dt>"Email"</dt><dd>{info.email.clone().unwrap_or_default()}</dd>
                                    <dt>"Address"</dt><dd>{info.address.clone().unwrap_or_default()}</dd>
                                    <dt>"Overdue fees"</dt><dd>{info.overdue_fees()}</dd>
                                </dl>
                                <h3>"Borrowed documents"</h3>
                                {if borrowed.is_empty() {
                                    view! { <p>"No documents borrowed."</p> }.into_any()
                                } else {
                                    view! {
                                        <ul class="borrowed-list">
                                            {borrowed.into_iter().map(|doc| view! { <li>{doc}</li> }).collect_view()}
                                        </ul>
                                    }.into_any()
                                }}
                            }.into_any()
                        }
                        Err(message) => view! { <p class="error-message">{message}</p> }.into_any(),
                    })}
                </Suspense>
            </section>

            <section class="panel">
                <h2>"Payment Information"</h2>
                <Suspense fallback=move || view! { <p>"Loading..."</p> }>
                    {move || stored_card.get().map(|result| match result {
                        Ok(card) => view! { <PaymentCard initial=card/> }.into_any(),
                        Err(message) => view! { <p class="error-message">{message}</p> }.into_any(),
                    })}
                </Suspense>
            </section>
        </div>
    }
}

/// Card on file with add/edit/delete.
#[component]
fn PaymentCard(initial: Option<CreditCard>) -> impl IntoView {
    let api = use_api();

    let card = RwSignal::new(initial);
    let (editing, set_editing) = signal(false);
    let (card_no, set_card_no) = signal(String::new());
    let (holder, set_holder) = signal(String::new());
    let (busy, set_busy) = signal(false);
    let (error, set_error) = signal(Option::<String>::None);

    let start_edit = move |_| {
        let current = card.get().unwrap_or_default();
        set_card_no.set(current.card_no);
        set_holder.set(current.card_holder_name);
        set_error.set(None);
        set_editing.set(true);
    };

    let on_save = move |_| {
        let draft = CreditCard {
            card_no: card_no.get().trim().to_string(),
            card_holder_name: holder.get().trim().to_string(),
        };
        if draft.is_blank() {
            set_error.set(Some("Card number and holder name are required.".to_string()));
            return;
        }
        set_busy.set(true);
        spawn_local(async move {
            let saved = api
                .authorized(SAVE_FAILED, |client, token| async move {
                    client.save_credit_card(&token, &draft).await
                })
                .await;
            match saved {
                Ok(saved) => {
                    card.set(Some(saved));
                    set_editing.set(false);
                }
                Err(message) => set_error.set(Some(message)),
            }
            set_busy.set(false);
        });
    };

    let on_delete = move |_| {
        set_busy.set(true);
        spawn_local(async move {
            let deleted = api
                .authorized(DELETE_FAILED, |client, token| async move {
                    client.delete_credit_card(&token).await
                })
                .await;
            match deleted {
                Ok(()) => card.set(None),
                Err(message) => set_error.set(Some(message)),
            }
            set_busy.set(false);
        });
    };

    view! {
        <div class="payment-card">
            {move || if editing.get() {
                view! {
                    <div class="card-form">
                        <div class="form-row">
                            <label for="cardNo">"Card number"</label>
                            <input type="text" id="cardNo"
                                prop:value=move || card_no.get()
                                on:input=move |ev| set_card_no.set(event_target_value(&ev))
                            />
                        </div>
                        <div class="form-row">
                            <label for="cardHolderName">"Card holder name"</label>
                            <input type="text" id="cardHolderName"
                                prop:value=move || holder.get()
                                on:input=move |ev| set_holder.set(event_target_value(&ev))
                            />
                        </div>
                        <button class="primary-btn" disabled=move || busy.get() on:click=on_save>"Save"</button>
                        <button class="secondary-btn" on:click=move |_| set_editing.set(false)>"Cancel"</button>
                    </div>
                }.into_any()
            } else {
                match card.get() {
                    Some(current) => view! {
                        <dl class="details">
                            <dt>"Card number"</dt><dd>{current.card_no}</dd>
                            <dt>"Card holder"</dt><dd>{current.card_holder_name}</dd>
                        </dl>
                        <button class="primary-btn" on:click=start_edit>"Edit"</button>
                        <button class="danger-btn" disabled=move || busy.get() on:click=on_delete>"Delete"</button>
                    }.into_any(),
                    None => view! {
                        <p>"No card on file."</p>
                        <button class="primary-btn" on:click=start_edit>"Add card"</button>
                    }.into_any(),
                }
            }}
            {move || error.get().map(|msg| view! { <p class="error-message">{msg}</p> })}
        </div>
    }
}
