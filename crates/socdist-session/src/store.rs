//! Session store: credentials, persistence and proactive refresh.

use std::sync::{Arc, Weak};

use chrono::Utc;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, error, info, instrument, warn};

use socdist_core::claims;
use socdist_core::error::{AuthError, Error, StorageError};
use socdist_core::{
    AccessToken, AuthApi, LocalStorage, LoginCredentials, Navigation, Navigator, Result,
    RoutePath, TokenPair,
};

use crate::config::SessionConfig;
use crate::refresh::RefreshTask;
use crate::state::SessionState;

/// Storage key holding the serialized [`TokenPair`].
pub const CREDENTIALS_KEY: &str = "credentials";

/// What a call to [`SessionStore::refresh_token`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The access token was replaced and persisted.
    Refreshed,
    /// The refresh failed and the session was logged out.
    LoggedOut,
    /// The session ended or was replaced while the request was in flight;
    /// the result was dropped and the current session left untouched.
    Superseded,
}

/// Owner of the session's credentials.
///
/// Whenever credentials are present, storage holds an identical serialized
/// copy under [`CREDENTIALS_KEY`]: every mutation persists first and only
/// then updates memory.
///
/// Cheap to clone; clones share the same session.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    state: SessionState,
    api: Arc<dyn AuthApi>,
    storage: Arc<dyn LocalStorage>,
    navigator: Arc<dyn Navigator>,
    config: SessionConfig,
    refresh_task: RefreshTask,
}

impl SessionStore {
    /// Build a store and restore any credentials persisted by a previous run.
    ///
    /// An unreadable or corrupt persisted value is discarded and the store
    /// starts logged out. The refresh task is not started here.
    pub fn create(
        state: SessionState,
        api: Arc<dyn AuthApi>,
        storage: Arc<dyn LocalStorage>,
        navigator: Arc<dyn Navigator>,
        config: SessionConfig,
    ) -> Self {
        let store = Self {
            inner: Arc::new(StoreInner {
                state,
                api,
                storage,
                navigator,
                config,
                refresh_task: RefreshTask::new(),
            }),
        };
        store.restore();
        store
    }

    fn restore(&self) {
        let storage = &self.inner.storage;
        let persisted = match storage.get_item(CREDENTIALS_KEY) {
            Ok(Some(json)) => json,
            Ok(None) => {
                debug!("No persisted session");
                return;
            }
            Err(e @ Error::Storage(StorageError::Corrupt { .. })) => {
                warn!(error = %e, "Discarding unreadable persisted session");
                self.discard_persisted();
                return;
            }
            Err(e) => {
                warn!(error = %e, "Failed to read persisted session");
                return;
            }
        };

        match serde_json::from_str::<TokenPair>(&persisted) {
            Ok(credentials) => {
                info!("Restored persisted session");
                self.inner.state.set_credentials(Some(credentials));
            }
            Err(e) => {
                warn!(error = %e, "Discarding corrupt persisted session");
                self.discard_persisted();
            }
        }
    }

    fn discard_persisted(&self) {
        if let Err(e) = self.inner.storage.remove_item(CREDENTIALS_KEY) {
            warn!(error = %e, "Failed to remove corrupt session");
        }
    }

    /// Exchange a username and password for credentials.
    ///
    /// On success the pair is persisted and stored, the refresh task is
    /// started, and the router moves to the remembered return path (or the
    /// home path). The returned [`Navigation`] says where it landed.
    ///
    /// # Errors
    ///
    /// Whatever the token endpoint raised, unchanged, or a storage error if
    /// the pair could not be persisted. Either way the session is unchanged.
    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> Result<Navigation> {
        info!("Logging in");

        let credentials = LoginCredentials::new(username, password);
        let pair = self.inner.api.obtain_token(&credentials).await?;

        self.persist(&pair)?;
        self.inner.state.set_credentials(Some(pair));
        self.start_refresh_timer();

        let target = self
            .inner
            .state
            .take_return_url()
            .unwrap_or_else(|| self.inner.config.home_path.clone());

        match self.inner.navigator.navigate(&target) {
            Ok(navigation) => Ok(navigation),
            Err(e) if target != self.inner.config.home_path => {
                warn!(error = %e, %target, "Return path unreachable, going home");
                self.inner.navigator.navigate(&self.inner.config.home_path)
            }
            Err(e) => Err(e),
        }
    }

    /// Swap the access token for a fresh one using the refresh token.
    ///
    /// The refresh token is kept. Any failure (no session, endpoint error,
    /// storage error) is logged and ends the session via
    /// [`logout`](Self::logout); it is never returned. A result that arrives
    /// after the session was ended or replaced is dropped and leaves the
    /// current session alone.
    #[instrument(skip(self))]
    pub async fn refresh_token(&self) -> RefreshOutcome {
        let Some(current) = self.inner.state.credentials() else {
            error!(error = %Error::from(AuthError::NotLoggedIn), "Error refreshing token");
            self.end_session();
            return RefreshOutcome::LoggedOut;
        };

        match self.try_refresh(&current).await {
            Ok(outcome) => outcome,
            Err(e) if self.is_superseded(&current) => {
                debug!(error = %e, "Refresh failed for a replaced session, ignoring");
                RefreshOutcome::Superseded
            }
            Err(e) => {
                error!(error = %e, "Error refreshing token");
                self.end_session();
                RefreshOutcome::LoggedOut
            }
        }
    }

    async fn try_refresh(&self, current: &TokenPair) -> Result<RefreshOutcome> {
        let access = self.inner.api.refresh_access(&current.refresh).await?;

        if self.is_superseded(current) {
            debug!("Session replaced during refresh, discarding result");
            return Ok(RefreshOutcome::Superseded);
        }

        let refreshed = current.with_access(access);
        self.persist(&refreshed)?;
        self.inner.state.set_credentials(Some(refreshed));

        debug!("Access token refreshed");
        Ok(RefreshOutcome::Refreshed)
    }

    /// True if the session `current` was read from has since ended or been
    /// replaced by another login.
    fn is_superseded(&self, current: &TokenPair) -> bool {
        self.inner
            .state
            .credentials()
            .is_none_or(|latest| latest.refresh != current.refresh)
    }

    fn end_session(&self) {
        if let Err(e) = self.logout() {
            warn!(error = %e, "Failed to navigate after logout");
        }
    }

    /// Start the periodic expiry check, replacing any running one.
    ///
    /// Every `refresh_interval` (first check one interval from now) the task
    /// calls [`refresh_token`](Self::refresh_token) if
    /// [`is_access_token_almost_expired`](Self::is_access_token_almost_expired).
    /// Each refresh completes before the next tick is considered.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn start_refresh_timer(&self) {
        let period = self.inner.config.refresh_interval;
        let weak: Weak<StoreInner> = Arc::downgrade(&self.inner);

        debug!(?period, "Starting refresh task");
        self.inner.refresh_task.replace(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;

                let Some(inner) = weak.upgrade() else {
                    break;
                };
                let store = SessionStore { inner };

                if store.is_access_token_almost_expired() {
                    store.refresh_token().await;
                }
            }
        });
    }

    /// True while the refresh task is running.
    pub fn refresh_timer_active(&self) -> bool {
        self.inner.refresh_task.is_active()
    }

    /// Local, unverified check of the access token's `exp` claim.
    ///
    /// True if no session exists, the token is unreadable, or no more than
    /// `expiry_leeway` remains. No network call is made.
    pub fn is_access_token_almost_expired(&self) -> bool {
        let credentials = self.inner.state.credentials();
        claims::is_almost_expired(
            credentials.as_ref().map(|c| &c.access),
            Utc::now(),
            self.inner.config.expiry_leeway,
        )
    }

    /// End the session.
    ///
    /// Clears credentials, removes the persisted copy, cancels the refresh
    /// task, then navigates to the login path. The session is torn down even
    /// if the navigation fails.
    #[instrument(skip(self))]
    pub fn logout(&self) -> Result<Navigation> {
        self.inner.state.set_credentials(None);

        if let Err(e) = self.inner.storage.remove_item(CREDENTIALS_KEY) {
            warn!(error = %e, "Failed to remove persisted session");
        }

        self.inner.refresh_task.cancel();
        info!("Logged out");

        self.inner.navigator.navigate(&self.inner.config.login_path)
    }

    /// Stop background work without ending the session.
    ///
    /// Persisted credentials stay in place so the next [`create`](Self::create)
    /// restores them.
    pub fn teardown(&self) {
        if self.inner.refresh_task.cancel() {
            debug!("Refresh task stopped");
        }
    }

    /// True iff credentials are present. Expiry is not checked.
    pub fn authenticated(&self) -> bool {
        self.inner.state.authenticated()
    }

    /// Snapshot of the current credentials.
    pub fn credentials(&self) -> Option<TokenPair> {
        self.inner.state.credentials()
    }

    /// The bearer token for API requests, if logged in.
    pub fn access_token(&self) -> Option<AccessToken> {
        self.inner.state.credentials().map(|c| c.access)
    }

    pub fn return_url(&self) -> Option<RoutePath> {
        self.inner.state.return_url()
    }

    pub fn set_return_url(&self, url: Option<RoutePath>) {
        self.inner.state.set_return_url(url);
    }

    /// The state shared with the router guard.
    pub fn state(&self) -> &SessionState {
        &self.inner.state
    }

    pub fn config(&self) -> &SessionConfig {
        &self.inner.config
    }

    fn persist(&self, credentials: &TokenPair) -> Result<()> {
        let json = serde_json::to_string(credentials).map_err(|e| {
            Error::Storage(StorageError::Corrupt {
                key: CREDENTIALS_KEY.to_string(),
                message: e.to_string(),
            })
        })?;
        self.inner.storage.set_item(CREDENTIALS_KEY, &json)
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("authenticated", &self.authenticated())
            .field("refresh_timer_active", &self.refresh_timer_active())
            .field("tokens", &"[REDACTED]")
            .finish()
    }
}
