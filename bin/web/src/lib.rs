//! deLib web client.
//!
//! This crate provides the Leptos interface for the deLib library
//! management system: role-gated reader and librarian screens over the
//! library REST API.

#![allow(non_snake_case)]

pub mod api;
pub mod app;
pub mod components;
pub mod config;
pub mod error;
pub mod pages;
pub mod session;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::App;
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(App);
}
