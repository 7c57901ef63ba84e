use std::sync::Arc;
use std::time::Duration;

use dashboard::{ProfileMirror, ProfileService, ProfileSnapshot, SessionProvider, SessionUser};
use tokio::sync::{watch, Notify};
use tokio_util::sync::CancellationToken;

use crate::support::fake_store::{db_unavailable, FakeStore, Op};

fn mirror_over(store: &Arc<FakeStore>, session: &SessionProvider) -> Arc<ProfileMirror> {
    ProfileMirror::new(ProfileService::new(store.clone()), session.clone())
}

async fn wait_until(
    rx: &mut watch::Receiver<ProfileSnapshot>,
    pred: impl FnMut(&ProfileSnapshot) -> bool,
) -> ProfileSnapshot {
    tokio::time::timeout(Duration::from_secs(5), rx.wait_for(pred))
        .await
        .expect("snapshot condition reached in time")
        .expect("mirror alive")
        .clone()
}

/// Give a spawned refetch the chance to run up to its gated account lookup.
async fn park() {
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test]
async fn test_initial_snapshot_is_loading() {
    let store = FakeStore::new();
    let mirror = mirror_over(&store, &SessionProvider::signed_out());

    let snap = mirror.snapshot();
    assert!(snap.is_loading);
    assert!(snap.game_stats.is_none());
    assert!(snap.wallet.is_none());
    assert!(snap.error.is_none());
}

#[tokio::test]
async fn test_refetch_signed_out_stops_loading_without_data() {
    let store = FakeStore::new();
    let mirror = mirror_over(&store, &SessionProvider::signed_out());

    mirror.refetch().await;

    let snap = mirror.snapshot();
    assert!(!snap.is_loading);
    assert!(snap.game_stats.is_none());
    assert!(snap.wallet.is_none());
    assert!(snap.error.is_none());
    assert!(store.calls().is_empty());
}

#[tokio::test]
async fn test_refetch_signed_in_publishes_profile() {
    let store = FakeStore::new();
    let session = SessionProvider::new(Some(SessionUser::new("u1", "u1@example.com")));
    let mirror = mirror_over(&store, &session);

    mirror.refetch().await;

    let snap = mirror.snapshot();
    assert!(!snap.is_loading);
    assert_eq!(snap.game_stats.as_ref().map(|s| s.hp), Some(100));
    assert_eq!(snap.wallet.as_ref().map(|w| w.coins), Some(0));
    assert!(snap.error.is_none());
}

#[tokio::test]
async fn test_failed_refetch_sets_error_and_clears_on_success() {
    let store = FakeStore::new();
    store.fail(Op::FindAccount, db_unavailable());
    let session = SessionProvider::new(Some(SessionUser::new("u1", "")));
    let mirror = mirror_over(&store, &session);
    let mut rx = mirror.watch();

    mirror.refetch().await;
    let snap = mirror.snapshot();
    assert!(!snap.is_loading);
    assert_eq!(
        snap.error.as_deref(),
        Some("Failed to load account: Database unavailable")
    );
    assert!(snap.wallet.is_none());

    store.recover(Op::FindAccount);
    let retry = tokio::spawn({
        let mirror = mirror.clone();
        async move { mirror.refetch().await }
    });

    // the retry clears the old error before its load completes
    let loading = wait_until(&mut rx, |s| s.is_loading || s.wallet.is_some()).await;
    assert!(loading.error.is_none());
    retry.await.unwrap();

    let snap = mirror.snapshot();
    assert!(!snap.is_loading);
    assert!(snap.error.is_none());
    assert_eq!(snap.game_stats.as_ref().map(|s| s.hp), Some(100));
    assert_eq!(snap.wallet.as_ref().map(|w| w.coins), Some(0));
}

#[tokio::test]
async fn test_partial_profile_reaches_mirror() {
    let store = FakeStore::new();
    store.fail(Op::CreateGameStats, db_unavailable());
    let session = SessionProvider::new(Some(SessionUser::new("u1", "")));
    let mirror = mirror_over(&store, &session);

    mirror.refetch().await;

    let snap = mirror.snapshot();
    assert!(snap.game_stats.is_none());
    assert!(snap.wallet.is_some());
    assert!(snap.error.is_none());
}

#[tokio::test]
async fn test_superseded_refetch_result_is_discarded() {
    let store = FakeStore::new();
    store.provision("slow", 111);
    store.provision("fast", 222);
    let gate = Arc::new(Notify::new());
    store.gate_account_lookup("slow", gate.clone());

    let session = SessionProvider::new(Some(SessionUser::new("slow", "")));
    let mirror = mirror_over(&store, &session);

    let stale = tokio::spawn({
        let mirror = mirror.clone();
        async move { mirror.refetch().await }
    });
    park().await;

    session.sign_in(SessionUser::new("fast", ""));
    mirror.refetch().await;
    assert_eq!(mirror.snapshot().wallet.map(|w| w.coins), Some(222));

    gate.notify_one();
    stale.await.unwrap();

    let snap = mirror.snapshot();
    assert_eq!(snap.wallet.map(|w| w.coins), Some(222));
    assert!(!snap.is_loading);
}

#[tokio::test]
async fn test_results_after_close_are_discarded() {
    let store = FakeStore::new();
    store.provision("u1", 500);
    let gate = Arc::new(Notify::new());
    store.gate_account_lookup("u1", gate.clone());

    let session = SessionProvider::new(Some(SessionUser::new("u1", "")));
    let mirror = mirror_over(&store, &session);

    let pending = tokio::spawn({
        let mirror = mirror.clone();
        async move { mirror.refetch().await }
    });
    park().await;

    mirror.close();
    gate.notify_one();
    pending.await.unwrap();

    let snap = mirror.snapshot();
    assert!(snap.wallet.is_none());
    assert!(mirror.is_closed());

    // closed mirrors ignore further refetches
    mirror.refetch().await;
    assert!(mirror.snapshot().wallet.is_none());
}

#[tokio::test]
async fn test_run_follows_sign_in_and_stops_on_cancel() {
    let store = FakeStore::new();
    store.provision("u1", 10);
    store.provision("u2", 20);
    let session = SessionProvider::signed_out();
    let mirror = mirror_over(&store, &session);
    let mut rx = mirror.watch();
    let cancel = CancellationToken::new();

    let runner = tokio::spawn(mirror.clone().run(cancel.clone()));

    let snap = wait_until(&mut rx, |s| !s.is_loading).await;
    assert!(snap.wallet.is_none());

    session.sign_in(SessionUser::new("u1", ""));
    let snap = wait_until(&mut rx, |s| s.wallet.as_ref().map(|w| w.coins) == Some(10)).await;
    assert!(!snap.is_loading);

    session.sign_in(SessionUser::new("u2", ""));
    wait_until(&mut rx, |s| s.wallet.as_ref().map(|w| w.coins) == Some(20)).await;

    assert_eq!(session.listener_count(), 1);
    cancel.cancel();
    tokio::time::timeout(Duration::from_secs(5), runner)
        .await
        .expect("runner stops after cancel")
        .unwrap();
    assert_eq!(session.listener_count(), 0);
}

#[tokio::test]
async fn test_run_stops_when_every_provider_is_dropped() {
    let store = FakeStore::new();
    store.provision("u1", 10);
    let session = SessionProvider::new(Some(SessionUser::new("u1", "")));
    let mirror = mirror_over(&store, &session);
    let mut rx = mirror.watch();

    let runner = tokio::spawn(mirror.clone().run(CancellationToken::new()));
    wait_until(&mut rx, |s| s.wallet.as_ref().map(|w| w.coins) == Some(10)).await;

    drop(session);
    tokio::time::timeout(Duration::from_secs(2), runner)
        .await
        .expect("runner stops once the session provider is gone")
        .unwrap();

    // last data stays; a later refetch sees nobody signed in
    store.clear_calls();
    mirror.refetch().await;
    let snap = mirror.snapshot();
    assert!(!snap.is_loading);
    assert_eq!(snap.wallet.map(|w| w.coins), Some(10));
    assert!(store.calls().is_empty());
}

#[tokio::test]
async fn test_run_returns_immediately_without_provider() {
    let store = FakeStore::new();
    let mirror = mirror_over(&store, &SessionProvider::signed_out());

    tokio::time::timeout(Duration::from_secs(2), mirror.clone().run(CancellationToken::new()))
        .await
        .expect("run returns when no provider is left");
    assert!(store.calls().is_empty());
}

#[tokio::test]
async fn test_sign_out_keeps_last_data_and_stops_loading() {
    let store = FakeStore::new();
    store.provision("u1", 10);
    let session = SessionProvider::new(Some(SessionUser::new("u1", "")));
    let mirror = mirror_over(&store, &session);

    mirror.refetch().await;
    session.sign_out();
    mirror.refetch().await;

    let snap = mirror.snapshot();
    assert!(!snap.is_loading);
    assert_eq!(snap.wallet.map(|w| w.coins), Some(10));
}
