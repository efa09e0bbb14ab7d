//! The application's route table.

use std::collections::HashSet;
use std::fmt;

use socdist_core::error::{Error, InvalidInputError};
use socdist_core::RoutePath;

/// The screens a route can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Home,
    Login,
    UserSearch,
    Profile,
    PostCreate,
}

impl View {
    /// Component name of the view.
    pub fn component(&self) -> &'static str {
        match self {
            View::Home => "HomeView",
            View::Login => "LoginView",
            View::UserSearch => "UserSearch",
            View::Profile => "ProfileView",
            View::PostCreate => "PostCreateView",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.component())
    }
}

/// A path bound to a view under a unique name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    path: String,
    view: View,
    name: String,
}

impl Route {
    pub fn new(path: impl Into<String>, view: View, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            view,
            name: name.into(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Ordered, immutable list of routes. The first exact path match wins.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// Build a table, rejecting invalid paths and duplicate paths or names.
    pub fn new(routes: Vec<Route>) -> Result<Self, Error> {
        let mut paths = HashSet::new();
        let mut names = HashSet::new();

        for route in &routes {
            let path = RoutePath::new(route.path.as_str())?;
            if path.path() != route.path {
                return Err(invalid(&route.path, "route paths cannot carry a query"));
            }
            if !paths.insert(route.path.as_str()) {
                return Err(invalid(&route.path, "duplicate route path"));
            }
            if !names.insert(route.name.as_str()) {
                return Err(invalid(&route.path, "duplicate route name"));
            }
        }

        Ok(Self { routes })
    }

    /// The social distribution client's routes.
    pub fn app() -> Self {
        Self {
            routes: vec![
                Route::new("/", View::Home, "home"),
                Route::new("/login", View::Login, "login"),
                Route::new("/search", View::UserSearch, "search"),
                Route::new("/profile", View::Profile, "profile"),
                Route::new("/create-post", View::PostCreate, "create-post"),
                Route::new("/settings", View::Home, "settings"),
            ],
        }
    }

    /// Find the route for a location, ignoring its query and fragment.
    pub fn match_path(&self, location: &RoutePath) -> Option<&Route> {
        self.routes.iter().find(|r| r.path == location.path())
    }

    /// Find a route by name.
    pub fn by_name(&self, name: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

fn invalid(path: &str, reason: &str) -> Error {
    InvalidInputError::RoutePath {
        value: path.to_string(),
        reason: reason.to_string(),
    }
    .into()
}
