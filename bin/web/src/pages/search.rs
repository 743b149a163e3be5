//! Reader catalog search and borrowing.

use delib_api::{BorrowDuration, CatalogDocument, SearchCriteria, SearchForm};
use delib_core::DocumentId;
use delib_session::Page;
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::components::RequireRole;

const SEARCH_FAILED: &str = "Error retrieving documents. Please try again.";
const BORROW_FAILED: &str = "Error borrowing the document. Please try again.";

#[component]
pub fn SearchPage() -> impl IntoView {
    view! {
        <RequireRole page=Page::Search>
            <DocumentSearch/>
        </RequireRole>
    }
}

#[component]
fn DocumentSearch() -> impl IntoView {
    let api = use_api();

    let (title, set_title) = signal(String::new());
    let (isbn, set_isbn) = signal(String::new());
    let (year, set_year) = signal(String::new());
    let (publisher, set_publisher) = signal(String::new());
    let (sort_by, set_sort_by) = signal(String::new());
    let (sort_direction, set_sort_direction) = signal("asc".to_string());
    let (only_available, set_only_available) = signal(false);

    // Criteria of the last submitted search; paging reuses them.
    let criteria = StoredValue::new(SearchCriteria::default());
    let results = RwSignal::new(Option::<delib_api::Page<CatalogDocument>>::None);
    let (searching, set_searching) = signal(false);
    let (error, set_error) = signal(Option::<String>::None);
    let (notice, set_notice) = signal(Option::<String>::None);

    let run_search = move |page: u32| {
        let criteria = criteria.get_value();
        set_searching.set(true);
        set_error.set(None);
        spawn_local(async move {
            let found = api
                .authorized(SEARCH_FAILED, |client, token| async move {
                    client.search_documents(&token, &criteria, page).await
                })
                .await;
            match found {
                Ok(found) => results.set(Some(found)),
                Err(message) => set_error.set(Some(message)),
            }
            set_searching.set(false);
        });
    };

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let form = SearchForm {
            title: title.get(),
            isbn: isbn.get(),
            year: year.get(),
            publisher: publisher.get(),
            sort_by: sort_by.get(),
            sort_direction: sort_direction.get(),
            only_available: only_available.get(),
        };
        criteria.set_value(SearchCriteria::from(&form));
        set_notice.set(None);
        run_search(0);
    };

    let on_borrow = Callback::new(move |(document_id, duration): (DocumentId, BorrowDuration)| {
        set_error.set(None);
        set_notice.set(None);
        spawn_local(async move {
            let borrowed = api
                .authorized(BORROW_FAILED, |client, token| {
                    let document_id = document_id.clone();
                    async move { client.borrow_document(&token, &document_id, duration).await }
                })
                .await;
            match borrowed {
                Ok(borrowed) => {
                    results.update(|page| {
                        if let Some(doc) = page
                            .as_mut()
                            .and_then(|p| p.content.iter_mut().find(|d| d.document_id == document_id))
                        {
                            doc.record_borrow();
                        }
                    });
                    set_notice.set(Some(format!(
                        "Document borrowed successfully for {duration}: {}",
                        borrowed.title().unwrap_or("document")
                    )));
                }
                Err(message) => set_error.set(Some(message)),
            }
        });
    });

    view! {
        <div class="search-page">
            <h1>"Search Documents"</h1>
            <form class="search-form" on:submit=on_submit>
                <input type="text" placeholder="Title"
                    prop:value=move || title.get()
                    on:input=move |ev| set_title.set(event_target_value(&ev))
                />
                <input type="text" placeholder="ISBN"
                    prop:value=move || isbn.get()
                    on:input=move |ev| set_isbn.set(event_target_value(&ev))
                />
                <input type="number" placeholder="Year"
                    prop:value=move || year.get()
                    on:input=move |ev| set_year.set(event_target_value(&ev))
                />
                <input type="text" placeholder="Publisher"
                    prop:value=move || publisher.get()
                    on:input=move |ev| set_publisher.set(event_target_value(&ev))
                />
                <select
                    prop:value=move || sort_by.get()
                    on:change=move |ev| set_sort_by.set(event_target_value(&ev))
                >
                    <option value="">"Sort by"</option>
                    <option value="title">"Title"</option>
                    <option value="year">"Year"</option>
                    <option value="publisher">"Publisher"</option>
                    <option value="availableCopies">"Available copies"</option>
                </select>
                <select
                    prop:value=move || sort_direction.get()
                    on:change=move |ev| set_sort_direction.set(event_target_value(&ev))
                >
                    <option value="asc">"Ascending"</option>
                    <option value="desc">"Descending"</option>
                </select>
                <label class="checkbox">
                    <input type="checkbox"
                        prop:checked=move || only_available.get()
                        on:change=move |ev| set_only_available.set(event_target_checked(&ev))
                    />
                    "Only available"
                </label>
                <button type="submit" class="primary-btn" disabled=move || searching.get()>
                    "Search"
                </button>
            </form>

            {move || error.get().map(|msg| view! { <p class="error-message">{msg}</p> })}
            {move || notice.get().map(|msg| view! { <p class="success-message">{msg}</p> })}

            {move || results.get().map(|page| {
                if page.content.is_empty() {
                    return view! { <p>"No documents found."</p> }.into_any();
                }
                let pager = page.is_paged().then(|| {
                    let number = page.number;
                    view! {
                        <div class="pager">
                            <button
                                disabled=!page.has_previous()
                                on:click=move |_| run_search(number.saturating_sub(1))
                            >"Previous"</button>
                            <span>{page.position()}</span>
                            <button
                                disabled=!page.has_next()
                                on:click=move |_| run_search(number + 1)
                            >"Next"</button>
                        </div>
                    }
                });
                view! {
                    <div class="document-grid">
                        {page.content.into_iter().map(|document| view! {
                            <DocumentCard document=document on_borrow=on_borrow/>
                        }).collect_view()}
                    </div>
                    {pager}
                }.into_any()
            })}
        </div>
    }
}

#[component]
fn DocumentCard(
    document: CatalogDocument,
    on_borrow: Callback<(DocumentId, BorrowDuration)>,
) -> impl IntoView {
    let (duration, set_duration) = signal(BorrowDuration::default().to_string());
    let available = document.is_available();
    let title = document.variants.title().unwrap_or("Untitled").to_string();
    let publisher = document.variants.publisher().unwrap_or_default().to_string();
    let year = document
        .variants
        .year()
        .map(|y| y.to_string())
        .unwrap_or_default();
    let image = document.variants.image_url().map(str::to_string);
    let copies = document.copies();
    let document_id = document.document_id;

    view! {
        <div class="document-card">
            {image.map(|src| view! { <img class="cover" src=src alt=title.clone()/> })}
            <h3>{title.clone()}</h3>
            <p>"Publisher: " {publisher}</p>
            <p>"Year: " {year}</p>
            <p>"Available copies: " {copies}</p>
            <div class="borrow-row">
                <select
                    prop:value=move || duration.get()
                    on:change=move |ev| set_duration.set(event_target_value(&ev))
                >
                    {BorrowDuration::CHOICES.into_iter().map(|choice| view! {
                        <option value=choice>{choice}</option>
                    }).collect_view()}
                </select>
                <button
                    class="primary-btn"
                    disabled=!available
                    on:click=move |_| {
                        let duration = duration.get().parse().unwrap_or_default();
                        on_borrow.run((document_id.clone(), duration));
                    }
                >
                    {if available { "Borrow" } else { "Unavailable" }}
                </button>
            </div>
        </div>
    }
}
