//! Components shared between pages.

pub mod modal;
pub mod navbar;
pub mod role_guard;
pub mod search_bar;

pub use modal::Modal;
pub use navbar::Navbar;
pub use role_guard::RequireRole;
pub use search_bar::SearchBar;
