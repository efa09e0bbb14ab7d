//! Guarded in-process router.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, instrument};

use socdist_core::error::{Error, NavigationError};
use socdist_core::{Navigation, Navigator, Result, RoutePath};

use crate::guard::{GuardDecision, NavigationGuard};
use crate::routes::{Route, RouteTable};

/// Class reported by [`Router::link_class`] for the current route's links.
pub const ACTIVE_LINK_CLASS: &str = "active";

/// Guard redirects followed before giving up on a navigation.
const MAX_REDIRECTS: usize = 8;

/// Route table plus history, with a guard consulted before each transition.
pub struct Router {
    routes: RouteTable,
    guard: Arc<dyn NavigationGuard>,
    history: Mutex<Vec<RoutePath>>,
}

impl Router {
    pub fn new(routes: RouteTable, guard: Arc<dyn NavigationGuard>) -> Self {
        Self {
            routes,
            guard,
            history: Mutex::new(Vec::new()),
        }
    }

    /// Move to `to`, following guard redirects.
    ///
    /// Navigating to the current location is a no-op that still reports
    /// [`Navigation::Committed`].
    ///
    /// # Errors
    ///
    /// [`NavigationError::NoMatch`] if the target (or a redirect target) has
    /// no route, [`NavigationError::RedirectLoop`] if the guard keeps
    /// redirecting.
    #[instrument(skip_all, fields(to = %to))]
    pub fn navigate(&self, to: &RoutePath) -> Result<Navigation> {
        let from = self.current();
        let mut target = to.clone();

        for _ in 0..=MAX_REDIRECTS {
            if self.routes.match_path(&target).is_none() {
                return Err(Error::Navigation(NavigationError::NoMatch {
                    path: target.to_string(),
                }));
            }

            match self.guard.check(&target, from.as_ref()) {
                GuardDecision::Proceed => {
                    self.commit(&target);
                    return Ok(if target == *to {
                        Navigation::Committed { to: target }
                    } else {
                        info!(requested = %to, landed = %target, "Navigation redirected");
                        Navigation::Redirected {
                            requested: to.clone(),
                            to: target,
                        }
                    });
                }
                GuardDecision::Redirect { to: next } => {
                    debug!(from = %target, to = %next, "Guard redirect");
                    target = next;
                }
            }
        }

        Err(Error::Navigation(NavigationError::RedirectLoop {
            path: to.to_string(),
        }))
    }

    /// The current location, if any navigation has happened.
    pub fn current(&self) -> Option<RoutePath> {
        self.entries().last().cloned()
    }

    /// The route rendered at the current location.
    pub fn current_route(&self) -> Option<&Route> {
        let current = self.current()?;
        self.routes.match_path(&current)
    }

    /// Every committed location, oldest first.
    pub fn history(&self) -> Vec<RoutePath> {
        self.entries().clone()
    }

    /// Look up a route by name.
    pub fn resolve(&self, name: &str) -> Option<&Route> {
        self.routes.by_name(name)
    }

    /// [`ACTIVE_LINK_CLASS`] if a link to `path` points at the current route.
    pub fn link_class(&self, path: &str) -> Option<&'static str> {
        let current = self.current()?;
        (current.path() == path).then_some(ACTIVE_LINK_CLASS)
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    fn entries(&self) -> MutexGuard<'_, Vec<RoutePath>> {
        self.history.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn commit(&self, target: &RoutePath) {
        let mut history = self.entries();
        if history.last() != Some(target) {
            history.push(target.clone());
        }
    }
}

impl Navigator for Router {
    fn navigate(&self, to: &RoutePath) -> Result<Navigation> {
        Router::navigate(self, to)
    }
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.routes.len())
            .field("current", &self.current())
            .finish()
    }
}
