//! Background refresh task tests.
//!
//! Tokio time is paused so the 60 second cadence runs instantly. Token expiry
//! is wall-clock based, so tokens are minted relative to `Utc::now()`.

mod common;

use std::time::Duration;

use socdist_core::LocalStorage;
use socdist_session::CREDENTIALS_KEY;

use common::{FakeApi, pair, path, persisted};

const TICK: Duration = Duration::from_secs(60);

async fn advance(by: Duration) {
    tokio::time::sleep(by).await;
}

#[tokio::test(start_paused = true)]
async fn test_tick_refreshes_near_expiry_token() {
    let api = FakeApi::new();
    let t1 = common::jwt("t1", 60);
    let t2 = common::jwt("t2", 3600);
    api.issue(pair(&t1, "R1"));
    api.refresh_with(&t2);

    let (ctx, storage) = common::context(api.clone());
    ctx.store.login("alice", "pw").await.unwrap();

    advance(TICK - Duration::from_secs(1)).await;
    assert_eq!(api.refresh_calls(), 0);

    advance(Duration::from_secs(2)).await;
    assert_eq!(api.refresh_calls(), 1);
    assert_eq!(api.last_refresh_token().unwrap().as_str(), "R1");
    assert_eq!(ctx.store.credentials(), Some(pair(&t2, "R1")));
    assert_eq!(persisted(storage.as_ref()), Some(pair(&t2, "R1")));
    assert!(ctx.store.refresh_timer_active());

    // The fresh token is far from expiry, so later ticks do nothing.
    advance(TICK * 3).await;
    assert_eq!(api.refresh_calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_tick_skips_fresh_token() {
    let api = FakeApi::new();
    api.issue(pair(&common::jwt("t1", 3600), "R1"));

    let (ctx, _) = common::context(api.clone());
    ctx.store.login("alice", "pw").await.unwrap();

    advance(TICK * 5 + Duration::from_secs(1)).await;
    assert_eq!(api.refresh_calls(), 0);
    assert!(ctx.store.authenticated());
}

#[tokio::test(start_paused = true)]
async fn test_tick_refresh_failure_logs_out() {
    let api = FakeApi::new();
    api.issue(pair(&common::jwt("t1", 30), "R1"));
    api.reject_refresh();

    let (ctx, storage) = common::context(api.clone());
    ctx.store.login("alice", "pw").await.unwrap();

    advance(TICK + Duration::from_secs(1)).await;

    assert_eq!(api.refresh_calls(), 1);
    assert!(!ctx.store.authenticated());
    assert!(ctx.store.credentials().is_none());
    assert_eq!(storage.get_item(CREDENTIALS_KEY).unwrap(), None);
    assert!(!ctx.store.refresh_timer_active());
    assert_eq!(ctx.router.current(), Some(path("/login")));

    advance(TICK * 3).await;
    assert_eq!(api.refresh_calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_starting_timer_twice_runs_one_task() {
    let api = FakeApi::new();
    // Stays near expiry after every refresh, so each tick refreshes once.
    api.issue(pair(&common::jwt("t1", 10), "R1"));
    api.refresh_with(&common::jwt("t2", 10));
    api.refresh_with(&common::jwt("t3", 10));

    let (ctx, _) = common::context(api.clone());
    ctx.store.login("alice", "pw").await.unwrap();

    ctx.store.start_refresh_timer();
    ctx.store.start_refresh_timer();
    assert!(ctx.store.refresh_timer_active());

    advance(TICK + Duration::from_secs(1)).await;
    assert_eq!(api.refresh_calls(), 1);

    advance(TICK).await;
    assert_eq!(api.refresh_calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_logout_stops_ticks() {
    let api = FakeApi::new();
    api.issue(pair(&common::jwt("t1", 10), "R1"));
    api.refresh_with(&common::jwt("t2", 10));

    let (ctx, _) = common::context(api.clone());
    ctx.store.login("alice", "pw").await.unwrap();
    ctx.store.logout().unwrap();

    advance(TICK * 3).await;
    assert_eq!(api.refresh_calls(), 0);
    assert!(!ctx.store.refresh_timer_active());
}

#[tokio::test(start_paused = true)]
async fn test_dropping_the_context_ends_the_task() {
    let api = FakeApi::new();
    api.issue(pair(&common::jwt("t1", 10), "R1"));
    api.refresh_with(&common::jwt("t2", 10));

    let (ctx, _) = common::context(api.clone());
    ctx.store.login("alice", "pw").await.unwrap();
    drop(ctx);

    advance(TICK * 3).await;
    assert_eq!(api.refresh_calls(), 0);
}
