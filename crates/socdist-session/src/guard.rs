//! Pre-navigation guard.

use tracing::debug;

use socdist_core::RoutePath;

use crate::state::SessionState;

/// Whether the auth guard enforces its policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GuardMode {
    /// Every navigation proceeds regardless of session state.
    Permissive,
    /// Paths outside the public list require a session.
    #[default]
    Enforce,
}

/// The guard's verdict on a pending navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Proceed,
    Redirect { to: RoutePath },
}

/// Runs before every navigation the [`Router`](crate::Router) performs.
pub trait NavigationGuard: Send + Sync {
    fn check(&self, to: &RoutePath, from: Option<&RoutePath>) -> GuardDecision;
}

/// Sends anonymous users to the login page and remembers where they were going.
#[derive(Debug, Clone)]
pub struct AuthGuard {
    session: SessionState,
    mode: GuardMode,
    login_path: RoutePath,
    public_paths: Vec<String>,
}

impl AuthGuard {
    pub fn new(
        session: SessionState,
        mode: GuardMode,
        login_path: RoutePath,
        public_paths: Vec<String>,
    ) -> Self {
        Self {
            session,
            mode,
            login_path,
            public_paths,
        }
    }

    fn is_public(&self, to: &RoutePath) -> bool {
        self.public_paths.iter().any(|p| p == to.path())
    }
}

impl NavigationGuard for AuthGuard {
    fn check(&self, to: &RoutePath, from: Option<&RoutePath>) -> GuardDecision {
        if self.mode == GuardMode::Permissive || self.is_public(to) || self.session.authenticated()
        {
            return GuardDecision::Proceed;
        }

        debug!(%to, from = ?from.map(RoutePath::as_str), "Login required, redirecting");
        self.session.set_return_url(Some(to.clone()));
        GuardDecision::Redirect {
            to: self.login_path.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use socdist_core::{AccessToken, RefreshToken, TokenPair};

    fn path(s: &str) -> RoutePath {
        RoutePath::new(s).unwrap()
    }

    fn guard(mode: GuardMode) -> (AuthGuard, SessionState) {
        let state = SessionState::new();
        let guard = AuthGuard::new(state.clone(), mode, path("/login"), vec!["/login".into()]);
        (guard, state)
    }

    #[test]
    fn anonymous_private_navigation_redirects_and_remembers() {
        let (guard, state) = guard(GuardMode::Enforce);
        let decision = guard.check(&path("/search?q=bob"), None);
        assert_eq!(decision, GuardDecision::Redirect { to: path("/login") });
        assert_eq!(state.return_url().unwrap().as_str(), "/search?q=bob");
    }

    #[test]
    fn public_path_proceeds_without_session() {
        let (guard, state) = guard(GuardMode::Enforce);
        assert_eq!(guard.check(&path("/login?next=1"), None), GuardDecision::Proceed);
        assert!(state.return_url().is_none());
    }

    #[test]
    fn authenticated_navigation_proceeds() {
        let (guard, state) = guard(GuardMode::Enforce);
        state.set_credentials(Some(TokenPair::new(
            AccessToken::new("T1"),
            RefreshToken::new("R1"),
        )));
        assert_eq!(guard.check(&path("/profile"), None), GuardDecision::Proceed);
    }

    #[test]
    fn permissive_mode_never_redirects() {
        let (guard, state) = guard(GuardMode::Permissive);
        assert_eq!(guard.check(&path("/settings"), None), GuardDecision::Proceed);
        assert!(state.return_url().is_none());
    }
}
