//! Routes and the sidebar around authenticated pages.

/// Form action that ends the session.
pub const LOGOUT_PATH: &str = "/logout";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Students,
}

impl Route {
    pub const ALL: [Route; 2] = [Route::Login, Route::Students];

    pub const fn path(self) -> &'static str {
        match self {
            Route::Login => "/",
            Route::Students => "/students",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|route| route.path() == path)
    }

    pub const fn title(self) -> &'static str {
        match self {
            Route::Login => "Login",
            Route::Students => "Students",
        }
    }

    /// Whether the page is only reachable with a session.
    pub const fn requires_session(self) -> bool {
        matches!(self, Route::Students)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub route: Route,
    pub label: &'static str,
    pub active: bool,
}

/// Sidebar links, with the one for `current` marked active.
pub fn sidebar_links(current: Route) -> Vec<NavLink> {
    [(Route::Students, "Students Page")]
        .into_iter()
        .map(|(route, label)| NavLink {
            route,
            label,
            active: route == current,
        })
        .collect()
}
