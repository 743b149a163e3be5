//! Add-document form with optional cover upload.

use delib_api::DocumentKind;
use leptos::ev::SubmitEvent;
use leptos::html::Input;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::form::{DocumentFields, FieldInputs, add_fields};
use crate::api::{ApiContext, use_api};

const UPLOAD_FAILED: &str = "Error uploading the image. Please try again.";
const ADD_FAILED: &str = "Error adding document. Please try again.";

/// Cover image picked in the form.
#[cfg_attr(not(feature = "hydrate"), allow(dead_code))]
struct CoverImage {
    file_name: String,
    content_type: String,
    bytes: Vec<u8>,
}

#[cfg(feature = "hydrate")]
async fn selected_cover(input: NodeRef<Input>) -> Result<Option<CoverImage>, String> {
    use wasm_bindgen_futures::JsFuture;

    let Some(file) = input
        .get_untracked()
        .and_then(|el| el.files())
        .and_then(|files| files.get(0))
    else {
        return Ok(None);
    };
    let buffer = JsFuture::from(file.array_buffer()).await.map_err(|e| {
        leptos::logging::error!("failed to read {}: {e:?}", file.name());
        "Could not read the selected image.".to_string()
    })?;
    let content_type = match file.type_() {
        t if t.is_empty() => "application/octet-stream".to_string(),
        t => t,
    };
    Ok(Some(CoverImage {
        file_name: file.name(),
        content_type,
        bytes: js_sys::Uint8Array::new(&buffer).to_vec(),
    }))
}

#[cfg(not(feature = "hydrate"))]
async fn selected_cover(_input: NodeRef<Input>) -> Result<Option<CoverImage>, String> {
    Ok(None)
}

#[cfg(feature = "hydrate")]
fn clear_cover(input: NodeRef<Input>) {
    if let Some(el) = input.get_untracked() {
        el.set_value("");
    }
}

#[cfg(not(feature = "hydrate"))]
fn clear_cover(_input: NodeRef<Input>) {}

/// Uploads the cover, if any, then creates the document.
async fn submit(
    api: ApiContext,
    kind: DocumentKind,
    fields: DocumentFields,
    cover_input: NodeRef<Input>,
) -> Result<(), String> {
    let image_url = match selected_cover(cover_input).await? {
        Some(cover) => {
            let container = api.config().await?.image_container;
            let url = api
                .authorized(UPLOAD_FAILED, |client, token| async move {
                    client
                        .upload_image(
                            &token,
                            &container,
                            &cover.file_name,
                            &cover.content_type,
                            cover.bytes,
                        )
                        .await
                })
                .await?;
            Some(url)
        }
        None => None,
    };

    let document = fields.to_new_document(kind, image_url);
    api.authorized(ADD_FAILED, |client, token| async move {
        client.add_document(&token, &document).await
    })
    .await
}

#[component]
pub fn AddDocument() -> impl IntoView {
    let api = use_api();

    let (kind, set_kind) = signal(Option::<DocumentKind>::None);
    let values = RwSignal::new(DocumentFields::default());
    let cover_input = NodeRef::<Input>::new();
    let (submitting, set_submitting) = signal(false);
    let (error, set_error) = signal(Option::<String>::None);
    let (notice, set_notice) = signal(Option::<String>::None);

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let Some(kind) = kind.get() else {
            set_error.set(Some("Please select a document type.".to_string()));
            return;
        };
        let fields = values.get();
        set_submitting.set(true);
        set_error.set(None);
        set_notice.set(None);
        spawn_local(async move {
            match submit(api, kind, fields, cover_input).await {
                Ok(()) => {
                    set_kind.set(None);
                    values.set(DocumentFields::default());
                    clear_cover(cover_input);
                    set_notice.set(Some("Document added successfully!".to_string()));
                }
                Err(message) => set_error.set(Some(message)),
            }
            set_submitting.set(false);
        });
    };

    view! {
        <div class="add-document">
            <h2>"Add Document"</h2>
            <form on:submit=on_submit>
                <div class="form-row">
                    <label for="documentType">"Document type"</label>
                    <select
                        id="documentType"
                        prop:value=move || kind.get().map(|k| k.as_str()).unwrap_or_default()
                        on:change=move |ev| {
                            // A new type starts from a blank form.
                            set_kind.set(event_target_value(&ev).parse().ok());
                            values.set(DocumentFields::default());
                        }
                    >
                        <option value="">"Select type"</option>
                        {DocumentKind::ALL.into_iter().map(|k| view! {
                            <option value=k.as_str()>{k.label()}</option>
                        }).collect_view()}
                    </select>
                </div>
                {move || kind.get().map(|k| view! { <FieldInputs values=values fields=add_fields(k)/> })}
                <div class="form-row">
                    <label for="cover">"Cover image"</label>
                    <input type="file" id="cover" accept="image/*" node_ref=cover_input/>
                </div>
                {move || error.get().map(|msg| view! { <p class="error-message">{msg}</p> })}
                {move || notice.get().map(|msg| view! { <p class="success-message">{msg}</p> })}
                <button type="submit" class="primary-btn" disabled=move || submitting.get()>
                    {move || if submitting.get() { "Adding..." } else { "Add Document" }}
                </button>
            </form>
        </div>
    }
}
