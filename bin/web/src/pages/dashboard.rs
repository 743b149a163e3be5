//! Librarian dashboard: catalog and client administration.

pub mod add_document;
pub mod clients;
pub mod documents;
mod form;
pub mod register_client;

use delib_session::Page;
use leptos::prelude::*;

use crate::components::RequireRole;
use add_document::AddDocument;
use clients::SearchClients;
use documents::SearchDocuments;
use register_client::RegisterClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    SearchDocuments,
    SearchClients,
    AddDocument,
    RegisterClient,
}

impl Tab {
    const ALL: [Tab; 4] = [
        Tab::SearchDocuments,
        Tab::SearchClients,
        Tab::AddDocument,
        Tab::RegisterClient,
    ];

    fn label(&self) -> &'static str {
        match self {
            Tab::SearchDocuments => "Search Documents",
            Tab::SearchClients => "Search Clients",
            Tab::AddDocument => "Add Document",
            Tab::RegisterClient => "Register Client",
        }
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    view! {
        <RequireRole page=Page::Dashboard>
            <Dashboard/>
        </RequireRole>
    }
}

#[component]
fn Dashboard() -> impl IntoView {
    let (active, set_active) = signal(Tab::SearchDocuments);

    view! {
        <div class="dashboard-page">
            <div class="tabs">
                {Tab::ALL.into_iter().map(|tab| view! {
                    <button
                        class=move || if active.get() == tab { "tab active" } else { "tab" }
                        on:click=move |_| set_active.set(tab)
                    >
                        {tab.label()}
                    </button>
                }).collect_view()}
            </div>
            <div class="tab-content">
                {move || match active.get() {
                    Tab::SearchDocuments => view! { <SearchDocuments/> }.into_any(),
                    Tab::SearchClients => view! { <SearchClients/> }.into_any(),
                    Tab::AddDocument => view! { <AddDocument/> }.into_any(),
                    Tab::RegisterClient => view! { <RegisterClient/> }.into_any(),
                }}
            </div>
        </div>
    }
}
