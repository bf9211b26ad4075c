//! Navigation for StoryTime
//!
//! This module provides:
//! - Route definitions with router paths
//! - Bottom tab definitions
//! - A navigation stack
//! - [`Router`], which turns form outcomes into stack changes

use app_core::auth::{Destination, Navigator};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

// =============================================================================
// Route Definitions
// =============================================================================

/// All screens in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum Route {
    /// Onboarding / landing screen
    #[default]
    Onboarding,
    /// Sign-in form
    SignIn,
    /// Sign-up form
    SignUp,

    // Main tabs
    /// Home feed
    Home,
    /// Stories list
    Stories,
    /// Trending stories
    Trending,
    /// Own profile
    Profile,
}

impl Route {
    /// Get the router path for this route
    pub fn to_path(&self) -> &'static str {
        match self {
            Route::Onboarding => "/",
            Route::SignIn => "/auth/signIn",
            Route::SignUp => "/auth/signUp",
            Route::Home => "/(tabs)/home",
            Route::Stories => "/(tabs)/stories",
            Route::Trending => "/(tabs)/trending",
            Route::Profile => "/(tabs)/profile",
        }
    }

    /// Parse a router path
    ///
    /// Trailing slashes are ignored.
    pub fn from_path(path: &str) -> Option<Route> {
        let trimmed = path.trim_end_matches('/');
        let normalized = if trimmed.is_empty() { "/" } else { trimmed };

        [
            Route::Onboarding,
            Route::SignIn,
            Route::SignUp,
            Route::Home,
            Route::Stories,
            Route::Trending,
            Route::Profile,
        ]
        .into_iter()
        .find(|route| route.to_path() == normalized)
    }

    /// Whether the route lives behind sign-in
    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            Route::Home | Route::Stories | Route::Trending | Route::Profile
        )
    }

    /// Screen title
    pub fn title(&self) -> &'static str {
        match self {
            Route::Onboarding => "StoryTime",
            Route::SignIn => "Sign In",
            Route::SignUp => "Sign Up",
            Route::Home => "Home",
            Route::Stories => "Stories",
            Route::Trending => "Trending",
            Route::Profile => "Profile",
        }
    }
}

impl From<Destination> for Route {
    fn from(destination: Destination) -> Self {
        match destination {
            Destination::Home => Route::Home,
            Destination::SignIn => Route::SignIn,
        }
    }
}

// =============================================================================
// Navigation Tabs
// =============================================================================

/// Bottom tabs shown after sign-in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NavigationTab {
    /// Home tab
    #[default]
    Home,
    /// Stories tab
    Stories,
    /// Trending tab
    Trending,
    /// Profile tab
    Profile,
}

impl NavigationTab {
    /// Get the root route for this tab
    pub fn root_route(&self) -> Route {
        match self {
            NavigationTab::Home => Route::Home,
            NavigationTab::Stories => Route::Stories,
            NavigationTab::Trending => Route::Trending,
            NavigationTab::Profile => Route::Profile,
        }
    }

    /// Get icon name for this tab
    pub fn icon(&self) -> &'static str {
        match self {
            NavigationTab::Home => "home",
            NavigationTab::Stories => "book",
            NavigationTab::Trending => "trending-up",
            NavigationTab::Profile => "person",
        }
    }

    /// Get label for this tab
    pub fn label(&self) -> &'static str {
        self.root_route().title()
    }

    /// Get all tabs in order
    pub fn all() -> [NavigationTab; 4] {
        [
            NavigationTab::Home,
            NavigationTab::Stories,
            NavigationTab::Trending,
            NavigationTab::Profile,
        ]
    }
}

// =============================================================================
// Navigation Stack
// =============================================================================

/// A navigation stack entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackEntry {
    /// The route
    pub route: Route,
    /// Unique key for this entry
    pub key: String,
}

impl StackEntry {
    /// Create a new stack entry
    pub fn new(route: Route) -> Self {
        Self {
            route,
            key: uuid::Uuid::new_v4().to_string(),
        }
    }
}

/// Navigation stack (bottom to top, never empty)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationStack {
    root: StackEntry,
    above: Vec<StackEntry>,
}

impl NavigationStack {
    /// Create a new navigation stack with a root route
    pub fn new(root: Route) -> Self {
        Self {
            root: StackEntry::new(root),
            above: Vec::new(),
        }
    }

    /// Push a route onto the stack
    pub fn push(&mut self, route: Route) {
        self.above.push(StackEntry::new(route));
    }

    /// Pop the top route (returns true if popped, false if at root)
    pub fn pop(&mut self) -> bool {
        self.above.pop().is_some()
    }

    /// Pop back to the topmost entry showing `route`
    ///
    /// Returns false, leaving the stack untouched, when the route is not on it.
    pub fn pop_to(&mut self, route: Route) -> bool {
        if let Some(index) = self.above.iter().rposition(|e| e.route == route) {
            self.above.truncate(index + 1);
            true
        } else if self.root.route == route {
            self.above.clear();
            true
        } else {
            false
        }
    }

    /// Replace the top route
    pub fn replace(&mut self, route: Route) {
        match self.above.last_mut() {
            Some(last) => *last = StackEntry::new(route),
            None => self.root = StackEntry::new(route),
        }
    }

    /// Get the current (top) entry
    pub fn current_entry(&self) -> &StackEntry {
        self.above.last().unwrap_or(&self.root)
    }

    /// Get the current (top) route
    pub fn current(&self) -> Route {
        self.current_entry().route
    }

    /// Check if we can go back
    pub fn can_go_back(&self) -> bool {
        !self.above.is_empty()
    }

    /// Get stack depth
    pub fn depth(&self) -> usize {
        self.above.len() + 1
    }

    /// Routes from bottom to top
    pub fn routes(&self) -> Vec<Route> {
        std::iter::once(&self.root)
            .chain(self.above.iter())
            .map(|e| e.route)
            .collect()
    }

    /// Reset to a new root
    pub fn reset(&mut self, route: Route) {
        self.root = StackEntry::new(route);
        self.above.clear();
    }
}

impl Default for NavigationStack {
    fn default() -> Self {
        Self::new(Route::default())
    }
}

// =============================================================================
// Router
// =============================================================================

#[derive(Debug, Default)]
struct RouterState {
    stack: NavigationStack,
    history: Vec<Destination>,
}

/// Shared navigation state for the running app
///
/// Implements [`Navigator`] for the credential forms:
/// - [`Destination::Home`] replaces the whole stack with the home tab, so the
///   auth screens cannot be reached with "back"
/// - [`Destination::SignIn`] returns to a sign-in screen already on the
///   stack, or pushes one
#[derive(Debug, Default)]
pub struct Router {
    state: Mutex<RouterState>,
}

impl Router {
    /// Create a router starting at the onboarding screen
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a router starting at a given route
    pub fn with_root(root: Route) -> Self {
        Self {
            state: Mutex::new(RouterState {
                stack: NavigationStack::new(root),
                history: Vec::new(),
            }),
        }
    }

    /// Push a screen (view-initiated navigation)
    pub fn push(&self, route: Route) {
        self.state.lock().stack.push(route);
    }

    /// Go back one screen
    pub fn go_back(&self) -> bool {
        self.state.lock().stack.pop()
    }

    /// Switch to a bottom tab, dropping anything above it
    pub fn switch_tab(&self, tab: NavigationTab) {
        self.state.lock().stack.reset(tab.root_route());
    }

    /// Current screen
    pub fn current_route(&self) -> Route {
        self.state.lock().stack.current()
    }

    /// Copy of the navigation stack
    pub fn stack(&self) -> NavigationStack {
        self.state.lock().stack.clone()
    }

    /// Destinations requested through [`Navigator`], oldest first
    pub fn history(&self) -> Vec<Destination> {
        self.state.lock().history.clone()
    }
}

impl Navigator for Router {
    fn navigate(&self, destination: Destination) {
        let mut state = self.state.lock();
        state.history.push(destination);

        let route = Route::from(destination);
        match destination {
            Destination::Home => state.stack.reset(route),
            Destination::SignIn => {
                if !state.stack.pop_to(route) {
                    state.stack.push(route);
                }
            }
        }

        tracing::debug!(path = route.to_path(), depth = state.stack.depth(), "navigated");
    }
}
