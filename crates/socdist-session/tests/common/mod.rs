//! Shared helpers for session integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use socdist_core::error::ProtocolError;
use socdist_core::{
    AccessToken, AuthApi, LocalStorage, LoginCredentials, RefreshToken, Result, RoutePath,
    TokenPair,
};
use socdist_session::{CREDENTIALS_KEY, MemoryStorage, SessionConfig, SessionContext};

/// An unsigned JWT expiring `expires_in` seconds from now.
pub fn jwt(id: &str, expires_in: i64) -> String {
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
    let exp = chrono::Utc::now().timestamp() + expires_in;
    let payload = URL_SAFE_NO_PAD.encode(format!(
        r#"{{"token_type":"access","exp":{exp},"jti":"{id}","user_id":1}}"#
    ));
    format!("{header}.{payload}.signature")
}

pub fn pair(access: &str, refresh: &str) -> TokenPair {
    TokenPair::new(AccessToken::new(access), RefreshToken::new(refresh))
}

pub fn path(s: &str) -> RoutePath {
    RoutePath::new(s).unwrap()
}

/// The persisted credentials, decoded.
pub fn persisted(storage: &dyn LocalStorage) -> Option<TokenPair> {
    storage
        .get_item(CREDENTIALS_KEY)
        .unwrap()
        .map(|json| serde_json::from_str(&json).unwrap())
}

/// In-process token endpoints with scripted answers.
#[derive(Default)]
pub struct FakeApi {
    login: Mutex<Option<TokenPair>>,
    refreshes: Mutex<VecDeque<Option<AccessToken>>>,
    refresh_calls: AtomicUsize,
    last_refresh_token: Mutex<Option<RefreshToken>>,
    refresh_gate: Mutex<Option<Arc<Notify>>>,
}

impl FakeApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Answer the next logins with `pair`.
    pub fn issue(&self, pair: TokenPair) {
        *self.login.lock().unwrap() = Some(pair);
    }

    /// Queue a successful refresh answer.
    pub fn refresh_with(&self, access: &str) {
        self.refreshes
            .lock()
            .unwrap()
            .push_back(Some(AccessToken::new(access)));
    }

    /// Queue a rejected refresh.
    pub fn reject_refresh(&self) {
        self.refreshes.lock().unwrap().push_back(None);
    }

    /// Hold every refresh until the returned gate is notified.
    pub fn gate_refresh(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.refresh_gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    pub fn refresh_calls(&self) -> usize {
        self.refresh_calls.load(Ordering::SeqCst)
    }

    pub fn last_refresh_token(&self) -> Option<RefreshToken> {
        self.last_refresh_token.lock().unwrap().clone()
    }
}

#[async_trait]
impl AuthApi for FakeApi {
    async fn obtain_token(&self, _credentials: &LoginCredentials) -> Result<TokenPair> {
        self.login.lock().unwrap().clone().ok_or_else(|| {
            ProtocolError::new(
                401,
                Some("No active account found with the given credentials".into()),
                Some("no_active_account".into()),
            )
            .into()
        })
    }

    async fn refresh_access(&self, refresh: &RefreshToken) -> Result<AccessToken> {
        self.refresh_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_refresh_token.lock().unwrap() = Some(refresh.clone());

        let gate = self.refresh_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        match self.refreshes.lock().unwrap().pop_front() {
            Some(Some(access)) => Ok(access),
            _ => Err(ProtocolError::new(
                401,
                Some("Token is invalid or expired".into()),
                Some("token_not_valid".into()),
            )
            .into()),
        }
    }
}

/// A context over `api` with fresh in-memory storage.
pub fn context(api: Arc<FakeApi>) -> (SessionContext, Arc<MemoryStorage>) {
    let storage = Arc::new(MemoryStorage::new());
    let ctx = SessionContext::create(api, storage.clone(), SessionConfig::default());
    (ctx, storage)
}
