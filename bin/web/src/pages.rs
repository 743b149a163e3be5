//! Page components for the application.
//!
//! Each page is a Leptos component that renders a specific route. Reader
//! and librarian pages are wrapped in [`RequireRole`](crate::components::RequireRole).

pub mod account;
pub mod dashboard;
pub mod home;
pub mod login;
pub mod not_found;
pub mod register;
pub mod search;

// Re-export all page components for convenient access
pub use account::AccountPage;
pub use dashboard::DashboardPage;
pub use home::HomePage;
pub use login::LoginPage;
pub use not_found::NotFoundPage;
pub use register::RegisterPage;
pub use search::SearchPage;
