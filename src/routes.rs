//! Route table and session-gated navigation.
//!
//! # Route Structure
//!
//! - `/`          - Login page (public)
//! - `/homepage`  - Authenticated area (session required)
//! - `/about`     - Informational page (public)
//! - `/contact`   - Informational page (public)
//!
//! # Gating
//!
//! Anonymous visitors of a gated route are redirected to the login page.
//! Authenticated visitors of the login page are sent on to `/homepage`.
//! [`RouteGuard`] reads the shared session through a [`SessionReader`] and
//! never mutates it.

use std::fmt;

use crate::application::services::SessionReader;
use crate::domain::entities::AuthSession;

/// A page of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Homepage,
    About,
    Contact,
}

impl Route {
    pub const ALL: [Route; 4] = [Route::Login, Route::Homepage, Route::About, Route::Contact];

    pub fn path(self) -> &'static str {
        match self {
            Route::Login => "/",
            Route::Homepage => "/homepage",
            Route::About => "/about",
            Route::Contact => "/contact",
        }
    }

    /// Looks up a route by path. A trailing slash is ignored.
    pub fn from_path(path: &str) -> Option<Self> {
        let trimmed = path.trim_end_matches('/');
        let normalized = if trimmed.is_empty() { "/" } else { trimmed };

        Route::ALL.into_iter().find(|route| route.path() == normalized)
    }

    /// Whether the page is reachable only with an authenticated session.
    pub fn requires_auth(self) -> bool {
        matches!(self, Route::Homepage)
    }

    pub fn title(self) -> &'static str {
        match self {
            Route::Login => "Log in",
            Route::Homepage => "Home",
            Route::About => "About",
            Route::Contact => "Contact",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// What the router should do for a requested page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Show the requested page.
    Render(Route),
    /// Send the user elsewhere.
    Redirect(Route),
}

impl Navigation {
    /// The page that ends up on screen.
    pub fn target(self) -> Route {
        match self {
            Navigation::Render(route) | Navigation::Redirect(route) => route,
        }
    }
}

/// Decides page reachability from the current session.
pub struct RouteGuard {
    session: SessionReader,
}

impl RouteGuard {
    pub fn new(session: SessionReader) -> Self {
        Self { session }
    }

    /// Resolves `route` against the session as it is right now.
    pub fn resolve(&self, route: Route) -> Navigation {
        decide(route, &self.session.current())
    }

    /// Waits for the next session change and resolves `current` against it.
    ///
    /// Returns `None` once the auth context has been shut down.
    pub async fn follow(&mut self, current: Route) -> Option<Navigation> {
        let session = self.session.changed().await?;
        let navigation = decide(current, &session);
        tracing::debug!(
            route = %current,
            target = %navigation.target(),
            "Session changed, route re-resolved"
        );
        Some(navigation)
    }
}

fn decide(route: Route, session: &AuthSession) -> Navigation {
    match (route, session.is_authenticated()) {
        (route, false) if route.requires_auth() => Navigation::Redirect(Route::Login),
        (Route::Login, true) => Navigation::Redirect(Route::Homepage),
        (route, _) => Navigation::Render(route),
    }
}
