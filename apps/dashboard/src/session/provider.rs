//! Observable "who is signed in" state.
//!
//! There is no process-wide session: callers construct a `SessionProvider` and
//! hand clones to whoever needs it. Subscriptions unregister themselves on drop.

use std::sync::{Arc, Weak};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::watch;
use tracing::debug;

use crate::logging::pii::Redacted;

/// The authenticated user as reported by the auth provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    /// Stable user id (`auth_id` on the account).
    pub id: String,
    /// May be empty when the provider has none.
    #[serde(default)]
    pub email: String,
}

impl SessionUser {
    pub fn new(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("session provider dropped")]
pub struct SessionClosed;

#[derive(Debug, Clone)]
pub struct SessionProvider {
    tx: Arc<watch::Sender<Option<SessionUser>>>,
}

impl SessionProvider {
    pub fn new(initial: Option<SessionUser>) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx: Arc::new(tx) }
    }

    pub fn signed_out() -> Self {
        Self::new(None)
    }

    pub fn current(&self) -> Option<SessionUser> {
        self.tx.borrow().clone()
    }

    pub fn sign_in(&self, user: SessionUser) {
        debug!(user_id = %user.id, email = %Redacted(&user.email), "session: signed in");
        self.tx.send_replace(Some(user));
    }

    pub fn sign_out(&self) {
        debug!("session: signed out");
        self.tx.send_replace(None);
    }

    /// Register a listener. It sees changes made after this call.
    pub fn subscribe(&self) -> SessionSubscription {
        SessionSubscription {
            rx: self.tx.subscribe(),
        }
    }

    /// Number of live subscriptions.
    pub fn listener_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Handle that does not keep the provider alive.
    pub fn downgrade(&self) -> WeakSessionProvider {
        WeakSessionProvider {
            tx: Arc::downgrade(&self.tx),
        }
    }
}

/// Non-owning [`SessionProvider`] handle. Subscriptions see `SessionClosed`
/// once every strong handle is gone, even while weak ones remain.
#[derive(Debug, Clone)]
pub struct WeakSessionProvider {
    tx: Weak<watch::Sender<Option<SessionUser>>>,
}

impl WeakSessionProvider {
    pub fn upgrade(&self) -> Option<SessionProvider> {
        self.tx.upgrade().map(|tx| SessionProvider { tx })
    }
}

impl Default for SessionProvider {
    fn default() -> Self {
        Self::signed_out()
    }
}

#[derive(Debug)]
pub struct SessionSubscription {
    rx: watch::Receiver<Option<SessionUser>>,
}

impl SessionSubscription {
    /// Wait for the next sign-in or sign-out and return the new session.
    ///
    /// Changes that land while nobody is waiting collapse into the latest value.
    pub async fn changed(&mut self) -> Result<Option<SessionUser>, SessionClosed> {
        self.rx.changed().await.map_err(|_| SessionClosed)?;
        Ok(self.rx.borrow_and_update().clone())
    }

    pub fn current(&self) -> Option<SessionUser> {
        self.rx.borrow().clone()
    }
}
