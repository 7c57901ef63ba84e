//! Transient copy of the signed-in player's stats and wallet.
//!
//! The store stays authoritative; the mirror is re-fetched on demand and on
//! every session change. Overlapping refetches each run their own load, and
//! only the most recently started one may publish.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::repos::{GameStats, Wallet};
use crate::services::profiles::{ProfileLoad, ProfileService};
use crate::session::provider::{SessionProvider, WeakSessionProvider};

/// What the dashboard renders.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileSnapshot {
    pub game_stats: Option<GameStats>,
    pub wallet: Option<Wallet>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl Default for ProfileSnapshot {
    fn default() -> Self {
        Self {
            game_stats: None,
            wallet: None,
            is_loading: true,
            error: None,
        }
    }
}

/// Holds only a weak session handle: once the caller drops every
/// `SessionProvider`, `run` returns and later refetches see no user.
#[derive(Debug)]
pub struct ProfileMirror {
    service: ProfileService,
    session: WeakSessionProvider,
    state: watch::Sender<ProfileSnapshot>,
    generation: AtomicU64,
    closed: AtomicBool,
}

impl ProfileMirror {
    pub fn new(service: ProfileService, session: SessionProvider) -> Arc<Self> {
        let (state, _rx) = watch::channel(ProfileSnapshot::default());
        Arc::new(Self {
            service,
            session: session.downgrade(),
            state,
            generation: AtomicU64::new(0),
            closed: AtomicBool::new(false),
        })
    }

    pub fn snapshot(&self) -> ProfileSnapshot {
        self.state.borrow().clone()
    }

    pub fn watch(&self) -> watch::Receiver<ProfileSnapshot> {
        self.state.subscribe()
    }

    /// Reload using whoever is signed in right now.
    pub async fn refetch(&self) {
        if self.is_closed() {
            return;
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let user = self.session.upgrade().and_then(|session| session.current());

        if user.is_some() {
            self.publish(generation, |snap| {
                snap.is_loading = true;
                snap.error = None;
            });
        }

        let outcome = self.service.load_profile(user.as_ref()).await;

        let published = self.publish(generation, |snap| {
            snap.is_loading = false;
            match outcome {
                ProfileLoad::SignedOut => {}
                ProfileLoad::Loaded(profile) => {
                    snap.game_stats = profile.game_stats;
                    snap.wallet = profile.wallet;
                }
                ProfileLoad::Failed(err) => {
                    warn!(error = %err, "profile refetch failed");
                    snap.error = Some(err.message());
                }
            }
        });

        if !published {
            debug!(generation, "discarding superseded profile load");
        }
    }

    /// Reload now and again after every session change, until `cancel`
    /// fires or the session provider goes away.
    pub async fn run(self: Arc<Self>, cancel: CancellationToken) {
        let Some(mut subscription) = self.session.upgrade().map(|session| session.subscribe())
        else {
            debug!("session provider already gone; profile mirror not started");
            return;
        };
        self.refetch().await;

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                changed = subscription.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    self.refetch().await;
                }
            }
        }
        debug!("profile mirror stopped following session");
    }

    /// Stop accepting results. Loads still in flight finish but are dropped.
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Apply `update` only if `generation` is still the latest and the mirror
    /// is open. The check runs under the channel lock.
    fn publish(&self, generation: u64, update: impl FnOnce(&mut ProfileSnapshot)) -> bool {
        self.state.send_if_modified(|snap| {
            if self.is_closed() || self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            update(snap);
            true
        })
    }
}
