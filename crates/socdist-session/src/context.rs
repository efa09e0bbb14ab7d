//! Explicitly constructed session context.

use std::sync::Arc;

use tracing::debug;

use socdist_core::{AuthApi, LocalStorage, Navigation, Result, RoutePath};

use crate::config::SessionConfig;
use crate::guard::AuthGuard;
use crate::router::Router;
use crate::routes::RouteTable;
use crate::state::SessionState;
use crate::store::SessionStore;

/// The router and session store wired to one shared [`SessionState`].
///
/// Built once at startup and handed to whatever needs it; there is no
/// global instance.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub router: Arc<Router>,
    pub store: SessionStore,
}

impl SessionContext {
    /// Wire the app route table, the auth guard and a store restored from
    /// `storage`.
    pub fn create(
        api: Arc<dyn AuthApi>,
        storage: Arc<dyn LocalStorage>,
        config: SessionConfig,
    ) -> Self {
        Self::with_routes(RouteTable::app(), api, storage, config)
    }

    /// Like [`create`](Self::create) with a custom route table.
    pub fn with_routes(
        routes: RouteTable,
        api: Arc<dyn AuthApi>,
        storage: Arc<dyn LocalStorage>,
        config: SessionConfig,
    ) -> Self {
        let state = SessionState::new();
        let guard = AuthGuard::new(
            state.clone(),
            config.guard_mode,
            config.login_path.clone(),
            config.public_paths.clone(),
        );
        let router = Arc::new(Router::new(routes, Arc::new(guard)));
        let store = SessionStore::create(state, api, storage, router.clone(), config);

        debug!(authenticated = store.authenticated(), "Session context created");
        Self { router, store }
    }

    /// Navigate through the guarded router.
    pub fn navigate(&self, to: &RoutePath) -> Result<Navigation> {
        self.router.navigate(to)
    }

    /// Stop background work. Persisted credentials are kept.
    pub fn teardown(self) {
        self.store.teardown();
    }
}
