//! Catalog listing by kind with edit, copies and delete.

use delib_api::{DocumentKind, DocumentUpdate, ShelfDocument, filter_shelf};
use delib_core::DocumentId;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::form::{DocumentFields, FieldInputs, edit_fields};
use crate::api::use_api;
use crate::components::{Modal, SearchBar};

const LIST_FAILED: &str = "Error fetching documents.";
const UPDATE_FAILED: &str = "Error updating document.";
const COPIES_FAILED: &str = "Error updating copies.";
const DELETE_FAILED: &str = "Error deleting document.";

/// Open dialog, if any.
#[derive(Debug, Clone, PartialEq)]
enum Dialog {
    Edit(DocumentId),
    Copies(DocumentId),
}

#[component]
pub fn SearchDocuments() -> impl IntoView {
    let api = use_api();

    let (kind, set_kind) = signal(DocumentKind::Book);
    let (term, set_term) = signal(String::new());
    let documents = RwSignal::new(Vec::<ShelfDocument>::new());
    let (error, set_error) = signal(Option::<String>::None);
    let (notice, set_notice) = signal(Option::<String>::None);
    let dialog = RwSignal::new(Option::<Dialog>::None);
    let edit_values = RwSignal::new(DocumentFields::default());
    let (copies, set_copies) = signal(String::new());

    // Refetches whenever the kind changes.
    let listing = LocalResource::new(move || {
        let kind = kind.get();
        async move {
            api.authorized(LIST_FAILED, |client, token| async move {
                client.list_documents(&token, kind).await
            })
            .await
        }
    });

    Effect::new(move || {
        if let Some(result) = listing.get() {
            match result {
                Ok(list) => {
                    documents.set(list);
                    set_error.set(None);
                }
                Err(message) => {
                    documents.set(Vec::new());
                    set_error.set(Some(message));
                }
            }
        }
    });

    let visible = Memo::new(move |_| documents.with(|docs| filter_shelf(docs, &term.get())));

    let open_edit = move |doc: &ShelfDocument| {
        let update = DocumentUpdate::from_shelf(kind.get_untracked(), doc);
        edit_values.set(DocumentFields::from_update(&update));
        dialog.set(Some(Dialog::Edit(doc.document_id.clone())));
    };

    let open_copies = move |doc: &ShelfDocument| {
        set_copies.set(doc.available_copies.max(0).to_string());
        dialog.set(Some(Dialog::Copies(doc.document_id.clone())));
    };

    let save_edit = move |_| {
        let Some(Dialog::Edit(document_id)) = dialog.get() else {
            return;
        };
        let update = edit_values.get().to_update(kind.get_untracked());
        spawn_local(async move {
            let result = api
                .authorized(UPDATE_FAILED, |client, token| {
                    let document_id = document_id.clone();
                    async move { client.update_document(&token, &document_id, &update).await }
                })
                .await;
            match result {
                Ok(()) => {
                    dialog.set(None);
                    set_notice.set(Some("Document updated successfully".to_string()));
                    listing.refetch();
                }
                Err(message) => set_error.set(Some(message)),
            }
        });
    };

    let save_copies = move |_| {
        let Some(Dialog::Copies(document_id)) = dialog.get() else {
            return;
        };
        let Ok(count) = copies.get().trim().parse::<u32>() else {
            set_error.set(Some("Copies must be a whole number.".to_string()));
            return;
        };
        let kind = kind.get_untracked();
        spawn_local(async move {
            let result = api
                .authorized(COPIES_FAILED, |client, token| {
                    let document_id = document_id.clone();
                    async move { client.update_copies(&token, kind, &document_id, count).await }
                })
                .await;
            match result {
                Ok(()) => {
                    documents.update(|docs| {
                        if let Some(doc) = docs.iter_mut().find(|d| d.document_id == document_id) {
                            doc.available_copies = i32::try_from(count).unwrap_or(i32::MAX);
                        }
                    });
                    dialog.set(None);
                    set_notice.set(Some("Copies updated successfully".to_string()));
                }
                Err(message) => set_error.set(Some(message)),
            }
        });
    };

    let delete = move |document_id: DocumentId| {
        let kind = kind.get_untracked();
        spawn_local(async move {
            let result = api
                .authorized(DELETE_FAILED, |client, token| {
                    let document_id = document_id.clone();
                    async move { client.delete_document(&token, kind, &document_id).await }
                })
                .await;
            match result {
                Ok(()) => {
                    documents.update(|docs| docs.retain(|d| d.document_id != document_id));
                    set_notice.set(Some("Document deleted successfully".to_string()));
                }
                Err(message) => set_error.set(Some(message)),
            }
        });
    };

    view! {
        <div class="search-documents">
            <div class="toolbar">
                <select
                    prop:value=move || kind.get().as_str()
                    on:change=move |ev| {
                        if let Ok(selected) = event_target_value(&ev).parse() {
                            set_kind.set(selected);
                        }
                    }
                >
                    {DocumentKind::ALL.into_iter().map(|k| view! {
                        <option value=k.as_str()>{k.label()}</option>
                    }).collect_view()}
                </select>
                <SearchBar on_search=Callback::new(move |value: String| set_term.set(value))/>
            </div>

            {move || error.get().map(|msg| view! { <p class="error-message">{msg}</p> })}
            {move || notice.get().map(|msg| view! { <p class="success-message">{msg}</p> })}

            <Suspense fallback=move || view! { <p>"Loading..."</p> }>
                {move || listing.get().map(|_| visible.get().into_iter().map(|doc| {
                    let for_edit = doc.clone();
                    let for_copies = doc.clone();
                    let id = doc.document_id.clone();
                    view! {
                        <div class="list-row">
                            <div>
                                <h2>{doc.display_title().to_string()}</h2>
                                <p>"Publisher: " {doc.publisher.clone().unwrap_or_default()}</p>
                                <p>"Year: " {doc.year.map(|y| y.to_string()).unwrap_or_default()}</p>
                                <p>"Available copies: " {doc.available_copies}</p>
                            </div>
                            <div class="row-actions">
                                <button class="secondary-btn" on:click=move |_| open_edit(&for_edit)>"Update"</button>
                                <button class="secondary-btn" on:click=move |_| open_copies(&for_copies)>"Change Copies"</button>
                                <button class="danger-btn" on:click=move |_| delete(id.clone())>"Delete"</button>
                            </div>
                        </div>
                    }
                }).collect_view())}
            </Suspense>

            {move || match dialog.get() {
                Some(Dialog::Edit(_)) => view! {
                    <Modal title="Update Document">
                        <FieldInputs values=edit_values fields=edit_fields(kind.get_untracked()).to_vec()/>
                        <button class="primary-btn" on:click=save_edit>"Save"</button>
                        <button class="secondary-btn" on:click=move |_| dialog.set(None)>"Cancel"</button>
                    </Modal>
                }.into_any(),
                Some(Dialog::Copies(_)) => view! {
                    <Modal title="Change Copies">
                        <div class="form-row">
                            <label>"Available copies"</label>
                            <input type="number" min="0"
                                prop:value=move || copies.get()
                                on:input=move |ev| set_copies.set(event_target_value(&ev))
                            />
                        </div>
                        <button class="primary-btn" on:click=save_copies>"Save"</button>
                        <button class="secondary-btn" on:click=move |_| dialog.set(None)>"Cancel"</button>
                    </Modal>
                }.into_any(),
                None => ().into_any(),
            }}
        </div>
    }
}
