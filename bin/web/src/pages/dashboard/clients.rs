//! Client listing with returns, updates and deletion.

use delib_api::{ClientRecord, filter_clients};
use delib_core::{ClientEmail, DocumentId};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::components::{Modal, SearchBar};

const LIST_FAILED: &str = "Error fetching clients.";
const RETURN_FAILED: &str = "Error returning document.";
const UPDATE_FAILED: &str = "Error updating client.";
const DELETE_FAILED: &str = "Error deleting client.";

#[derive(Debug, Clone, PartialEq)]
enum Dialog {
    Update(ClientRecord),
    Delete(ClientRecord),
}

#[component]
pub fn SearchClients() -> impl IntoView {
    let api = use_api();

    let clients = RwSignal::new(Vec::<ClientRecord>::new());
    let (term, set_term) = signal(String::new());
    let (error, set_error) = signal(Option::<String>::None);
    let (notice, set_notice) = signal(Option::<String>::None);
    let dialog = RwSignal::new(Option::<Dialog>::None);

    let (name, set_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (address, set_address) = signal(String::new());
    let (city, set_city) = signal(String::new());
    let (state, set_state) = signal(String::new());
    let (zipcode, set_zipcode) = signal(String::new());

    let listing = LocalResource::new(move || async move {
        api.authorized(LIST_FAILED, |client, token| async move {
            client.list_clients(&token).await
        })
        .await
    });

    Effect::new(move || {
        if let Some(result) = listing.get() {
            match result {
                Ok(list) => clients.set(list),
                Err(message) => set_error.set(Some(message)),
            }
        }
    });

    let visible = Memo::new(move |_| clients.with(|list| filter_clients(list, &term.get())));

    let open_update = move |record: ClientRecord| {
        set_name.set(record.name.clone());
        set_email.set(record.email.to_string());
        set_address.set(record.address.clone());
        set_city.set(record.city.clone());
        set_state.set(record.state.clone());
        set_zipcode.set(record.zipcode.clone());
        dialog.set(Some(Dialog::Update(record)));
    };

    let return_document = move |email: ClientEmail, document_id: DocumentId| {
        set_error.set(None);
        spawn_local(async move {
            let result = api
                .authorized(RETURN_FAILED, |client, token| {
                    let (email, document_id) = (email.clone(), document_id.clone());
                    async move { client.return_document(&token, &email, &document_id).await }
                })
                .await;
            match result {
                Ok(()) => {
                    clients.update(|list| {
                        if let Some(record) = list.iter_mut().find(|c| c.email == email) {
                            record.record_return(&document_id);
                        }
                    });
                    set_notice.set(Some(format!(
                        "Document {document_id} returned successfully for {email}"
                    )));
                }
                Err(message) => set_error.set(Some(message)),
            }
        });
    };

    let confirm = move |_| {
        let Some(action) = dialog.get() else {
            return;
        };
        set_error.set(None);
        match action {
            Dialog::Update(original) => {
                let updated = ClientRecord {
                    name: name.get(),
                    email: ClientEmail::new(email.get().trim()),
                    address: address.get(),
                    city: city.get(),
                    state: state.get(),
                    zipcode: zipcode.get(),
                    documents_borrowed: original.documents_borrowed.clone(),
                };
                spawn_local(async move {
                    let result = api
                        .authorized(UPDATE_FAILED, |client, token| {
                            let (original, updated) = (original.clone(), updated.clone());
                            async move {
                                client.update_client(&token, &original.email, &updated).await
                            }
                        })
                        .await;
                    match result {
                        Ok(()) => {
                            clients.update(|list| {
                                if let Some(record) =
                                    list.iter_mut().find(|c| c.email == original.email)
                                {
                                    *record = updated;
                                }
                            });
                            dialog.set(None);
                            set_notice.set(Some("Client updated successfully!".to_string()));
                        }
                        Err(message) => set_error.set(Some(message)),
                    }
                });
            }
            Dialog::Delete(record) => {
                spawn_local(async move {
                    let email = record.email;
                    let result = api
                        .authorized(DELETE_FAILED, |client, token| {
                            let email = email.clone();
                            async move { client.delete_client(&token, &email).await }
                        })
                        .await;
                    match result {
                        Ok(()) => {
                            clients.update(|list| list.retain(|c| c.email != email));
                            dialog.set(None);
                            set_notice.set(Some("Client deleted successfully!".to_string()));
                        }
                        Err(message) => set_error.set(Some(message)),
                    }
                });
            }
        }
    };

    view! {
        <div class="search-clients">
            <div class="toolbar">
                <SearchBar on_search=Callback::new(move |value: String| set_term.set(value))/>
            </div>

            {move || error.get().map(|msg| view! { <p class="error-message">{msg}</p> })}
            {move || notice.get().map(|msg| view! { <p class="success-message">{msg}</p> })}

            <Suspense fallback=move || view! { <p>"Loading..."</p> }>
                {move || listing.get().map(|_| visible.get().into_iter().map(|record| {
                    let for_update = record.clone();
                    let for_delete = record.clone();
                    let email = record.email.clone();
                    view! {
                        <div class="list-row">
                            <div>
                                <h2>{record.name.clone()}</h2>
                                <p>{record.email.to_string()}</p>
                                <p>{format!("{}, {}, {} {}", record.address, record.city, record.state, record.zipcode)}</p>
                                <h3>"Borrowed documents"</h3>
                                <ul class="borrowed-list">
                                    {record.documents_borrowed.iter().cloned().map(|document_id| {
                                        let email = email.clone();
                                        let label = document_id.to_string();
                                        view! {
                                            <li>
                                                {label}
                                                <button
                                                    class="secondary-btn"
                                                    on:click=move |_| return_document(email.clone(), document_id.clone())
                                                >"Return"</button>
                                            </li>
                                        }
                                    }).collect_view()}
                                </ul>
                            </div>
                            <div class="row-actions">
                                <button class="secondary-btn" on:click=move |_| open_update(for_update.clone())>"Update"</button>
                                <button class="danger-btn" on:click=move |_| dialog.set(Some(Dialog::Delete(for_delete.clone())))>"Delete"</button>
                            </div>
                        </div>
                    }
                }).collect_view())}
            </Suspense>

            {move || match dialog.get() {
                Some(Dialog::Update(_)) => view! {
                    <Modal title="Update Client">
                        <div class="form-row">
                            <label for="name">"Name"</label>
                            <input type="text" id="name"
                                prop:value=move || name.get()
                                on:input=move |ev| set_name.set(event_target_value(&ev))
                            />
                        </div>
                        <div class="form-row">
                            <label for="email">"Email"</label>
                            <input type="email" id="email"
                                prop:value=move || email.get()
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                            />
                        </div>
                        <div class="form-row">
                            <label for="address">"Address"</label>
                            <input type="text" id="address"
                                prop:value=move || address.get()
                                on:input=move |ev| set_address.set(event_target_value(&ev))
                            />
                        </div>
                        <div class="form-row">
                            <label for="city">"City"</label>
                            <input type="text" id="city"
                                prop:value=move || city.get()
                                on:input=move |ev| set_city.set(event_target_value(&ev))
                            />
                        </div>
                        <div class="form-row">
                            <label for="state">"State"</label>
                            <input type="text" id="state"
                                prop:value=move || state.get()
                                on:input=move |ev| set_state.set(event_target_value(&ev))
                            />
                        </div>
                        <div class="form-row">
                            <label for="zipcode">"Zip code"</label>
                            <input type="text" id="zipcode"
                                prop:value=move || zipcode.get()
                                on:input=move |ev| set_zipcode.set(event_target_value(&ev))
                            />
                        </div>
                        <button class="primary-btn" on:click=confirm>"Save"</button>
                        <button class="secondary-btn" on:click=move |_| dialog.set(None)>"Cancel"</button>
                    </Modal>
                }.into_any(),
                Some(Dialog::Delete(record)) => view! {
                    <Modal title="Delete Client">
                        <p>{format!("Delete {} ({})? This cannot be undone.", record.name, record.email)}</p>
                        <button class="danger-btn" on:click=confirm>"Delete"</button>
                        <button class="secondary-btn" on:click=move |_| dialog.set(None)>"Cancel"</button>
                    </Modal>
                }.into_any(),
                None => ().into_any(),
            }}
        </div>
    }
}
