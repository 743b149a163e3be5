//! Typed client for the deLib library REST API.
//!
//! One [`ApiClient`] method per server endpoint. Authenticated calls take the
//! session's [`AuthToken`](delib_session::AuthToken) and send it as
//! `Authorization: Bearer <token>`. There is no retry, caching or batching:
//! each call is a single request whose failure is returned to the caller as
//! a [`Report<ApiError>`](rootcause::prelude::Report).
//!
//! Endpoints are grouped by audience:
//! - [`auth`]: login and self-registration (no token)
//! - [`reader`]: catalog search, borrowing, account and payment card
//! - [`librarian`]: catalog and client administration, image upload

pub mod auth;
pub mod client;
pub mod error;
pub mod librarian;
pub mod reader;
mod wire;

pub use auth::{LoginResponse, Registration, RegistrationRole, StaffDetails};
pub use client::ApiClient;
pub use error::ApiError;
pub use librarian::{
    ClientRecord, DocumentDetails, DocumentKind, DocumentUpdate, NewClient, NewDocument,
    ShelfDocument, filter_clients, filter_shelf,
};
pub use reader::{
    AccountInfo, BorrowDuration, CatalogDocument, CatalogEntry, CreditCard, DocumentVariants,
    Page, SEARCH_PAGE_SIZE, SearchCriteria, SearchForm, SortDirection, SortField,
};
