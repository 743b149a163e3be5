//! Role-based navigation gate.
//!
//! A pure function of the session state: which links the navigation bar
//! shows, where a user lands after signing in, and which pages render their
//! content. It hides UI only; the API enforces access on every call.

use crate::role::Role;
use crate::session::SessionState;

/// Routed pages of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Home,
    Login,
    Register,
    /// Reader document search and borrowing.
    Search,
    /// Reader account and payment card.
    Account,
    /// Librarian catalog and client administration.
    Dashboard,
}

impl Page {
    /// Route path.
    #[must_use]
    pub const fn path(&self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Login => "/login",
            Self::Register => "/register",
            Self::Search => "/search",
            Self::Account => "/account",
            Self::Dashboard => "/dashboard",
        }
    }

    /// The role a page is reserved for, if any.
    #[must_use]
    pub const fn required_role(&self) -> Option<Role> {
        match self {
            Self::Search | Self::Account => Some(Role::Reader),
            Self::Dashboard => Some(Role::Librarian),
            Self::Home | Self::Login | Self::Register => None,
        }
    }
}

/// Entries of the navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavLink {
    Home,
    Search,
    Account,
    Dashboard,
    SignIn,
    GetStarted,
    /// Rendered as a button rather than a link.
    Logout,
}

impl NavLink {
    /// Visible text.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Search => "Search",
            Self::Account => "Account",
            Self::Dashboard => "Dashboard",
            Self::SignIn => "Sign In",
            Self::GetStarted => "Get Started",
            Self::Logout => "Logout",
        }
    }

    /// Target page, `None` for actions.
    #[must_use]
    pub const fn page(&self) -> Option<Page> {
        match self {
            Self::Home => Some(Page::Home),
            Self::Search => Some(Page::Search),
            Self::Account => Some(Page::Account),
            Self::Dashboard => Some(Page::Dashboard),
            Self::SignIn => Some(Page::Login),
            Self::GetStarted => Some(Page::Register),
            Self::Logout => None,
        }
    }
}

/// What the navigation bar shows for a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    links: Vec<NavLink>,
    landing: Page,
    badge: Option<&'static str>,
}

impl Navigation {
    /// Computes the navigation for a session state.
    #[must_use]
    pub fn for_state(state: SessionState) -> Self {
        match state {
            SessionState::Anonymous => Self {
                links: vec![NavLink::Home, NavLink::SignIn, NavLink::GetStarted],
                landing: Page::Home,
                badge: None,
            },
            SessionState::Authenticated(Role::Reader) => Self {
                links: vec![
                    NavLink::Home,
                    NavLink::Search,
                    NavLink::Account,
                    NavLink::Logout,
                ],
                landing: Page::Search,
                badge: Some(Role::Reader.badge()),
            },
            SessionState::Authenticated(Role::Librarian) => Self {
                links: vec![NavLink::Home, NavLink::Dashboard, NavLink::Logout],
                landing: Page::Dashboard,
                badge: Some(Role::Librarian.badge()),
            },
        }
    }

    /// Links in display order.
    #[must_use]
    pub fn links(&self) -> &[NavLink] {
        &self.links
    }

    /// Returns true if `link` is shown.
    #[must_use]
    pub fn shows(&self, link: NavLink) -> bool {
        self.links.contains(&link)
    }

    /// Default page for this session.
    #[must_use]
    pub fn landing(&self) -> Page {
        self.landing
    }

    /// Role badge text, when signed in.
    #[must_use]
    pub fn badge(&self) -> Option<&'static str> {
        self.badge
    }
}

/// Returns true if `page` renders its content for `state`.
#[must_use]
pub fn can_view(state: SessionState, page: Page) -> bool {
    match page.required_role() {
        None => true,
        Some(required) => state.role() == Some(required),
    }
}
