//! Shared session state.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use socdist_core::{RoutePath, TokenPair};

#[derive(Debug, Default)]
struct StateInner {
    credentials: Option<TokenPair>,
    return_url: Option<RoutePath>,
}

/// Credentials and return path, shared between the store and the guard.
///
/// Cheap to clone; clones observe the same state. Only the
/// [`SessionStore`](crate::SessionStore) mutates credentials.
#[derive(Clone, Debug, Default)]
pub struct SessionState {
    inner: Arc<RwLock<StateInner>>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// True iff credentials are present. Expiry is not checked.
    pub fn authenticated(&self) -> bool {
        self.read().credentials.is_some()
    }

    /// Snapshot of the current credentials.
    pub fn credentials(&self) -> Option<TokenPair> {
        self.read().credentials.clone()
    }

    pub(crate) fn set_credentials(&self, credentials: Option<TokenPair>) {
        self.write().credentials = credentials;
    }

    /// The location to resume after login, if one was remembered.
    pub fn return_url(&self) -> Option<RoutePath> {
        self.read().return_url.clone()
    }

    pub fn set_return_url(&self, url: Option<RoutePath>) {
        self.write().return_url = url;
    }

    pub(crate) fn take_return_url(&self) -> Option<RoutePath> {
        self.write().return_url.take()
    }

    // Fields are only ever replaced wholesale; poisoning is ignored.
    fn read(&self) -> RwLockReadGuard<'_, StateInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StateInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}
