//! Session layer configuration.

use std::time::Duration;

use socdist_core::RoutePath;
use socdist_core::claims::DEFAULT_EXPIRY_LEEWAY;

use crate::guard::GuardMode;

/// How often the refresh task checks the access token.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(60);

/// Tunables for [`SessionStore`](crate::SessionStore) and the router guard.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Period between access token expiry checks.
    pub refresh_interval: Duration,
    /// Refresh once this much lifetime or less remains.
    pub expiry_leeway: Duration,
    /// Whether the guard enforces authentication.
    pub guard_mode: GuardMode,
    /// Where logout and guard redirects land.
    pub login_path: RoutePath,
    /// Where login lands when no return path is remembered.
    pub home_path: RoutePath,
    /// Paths reachable without a session.
    pub public_paths: Vec<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            expiry_leeway: DEFAULT_EXPIRY_LEEWAY,
            guard_mode: GuardMode::default(),
            login_path: RoutePath::login(),
            home_path: RoutePath::root(),
            public_paths: vec![RoutePath::login().path().to_string()],
        }
    }
}
