//! socdist-session - Client session layer for the social distribution app.
//!
//! A [`SessionContext`] ties together the three pieces a client needs:
//!
//! - [`SessionStore`] holds the bearer token pair, mirrors it into
//!   [`LocalStorage`](socdist_core::LocalStorage), and keeps the access token
//!   fresh with a background [`RefreshTask`].
//! - [`Router`] maps paths to views and runs a [`NavigationGuard`] before
//!   every transition.
//! - [`AuthGuard`] consults the shared [`SessionState`] to send anonymous
//!   users to `/login`, remembering where they were headed.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use socdist_core::{ApiUrl, RoutePath};
//! use socdist_http::HttpAuthApi;
//! use socdist_session::{MemoryStorage, SessionConfig, SessionContext};
//!
//! # async fn example() -> socdist_core::Result<()> {
//! let api = HttpAuthApi::new(ApiUrl::new("http://localhost:8000")?)?;
//! let ctx = SessionContext::create(
//!     Arc::new(api),
//!     Arc::new(MemoryStorage::new()),
//!     SessionConfig::default(),
//! );
//!
//! ctx.navigate(&RoutePath::new("/profile")?)?; // redirected to /login
//! ctx.store.login("alice", "pw").await?; // lands on /profile
//! ctx.teardown();
//! # Ok(())
//! # }
//! ```

mod config;
mod context;
mod guard;
mod refresh;
mod router;
mod routes;
mod state;
mod storage;
mod store;

pub use config::SessionConfig;
pub use context::SessionContext;
pub use guard::{AuthGuard, GuardDecision, GuardMode, NavigationGuard};
pub use refresh::RefreshTask;
pub use router::{ACTIVE_LINK_CLASS, Router};
pub use routes::{Route, RouteTable, View};
pub use state::SessionState;
pub use storage::{FileStorage, MemoryStorage};
pub use store::{CREDENTIALS_KEY, RefreshOutcome, SessionStore};
