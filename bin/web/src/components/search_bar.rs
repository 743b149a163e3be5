use leptos::prelude::*;

/// Free-text filter box. The term is applied when Search is pressed.
#[component]
pub fn SearchBar(on_search: Callback<String>) -> impl IntoView {
    let (term, set_term) = signal(String::new());

    view! {
        <div class="search-bar">
            <input
                type="text"
                placeholder="Search..."
                prop:value=move || term.get()
                on:input=move |ev| set_term.set(event_target_value(&ev))
            />
            <button class="primary-btn" on:click=move |_| on_search.run(term.get())>
                "Search"
            </button>
        </div>
    }
}
