//! Fetch-or-provision of a player's profile: Account, then GameStats, then Wallet.
//!
//! Each step runs only after the previous one finished. The Account is the
//! anchor: without it nothing else can be read, so any Account failure ends
//! the load. GameStats and Wallet inserts may fail without failing the load;
//! the field is left empty instead.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::errors::domain::DomainError;
use crate::logging::pii::Redacted;
use crate::repos::{Account, GameStats, GameStatsDefaults, NewAccount, Wallet, WalletDefaults};
use crate::services::store::ProfileStore;
use crate::session::SessionUser;

/// The three records the dashboard renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Profile {
    pub account: Account,
    pub game_stats: Option<GameStats>,
    pub wallet: Option<Wallet>,
}

/// Which step of the sequence failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileStep {
    Account,
    GameStats,
    Wallet,
}

impl fmt::Display for ProfileStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProfileStep::Account => "account",
            ProfileStep::GameStats => "game stats",
            ProfileStep::Wallet => "wallet",
        };
        f.write_str(name)
    }
}

/// A fatal load failure. Carries no partial data.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Failed to load {step}: {}", .source.detail())]
pub struct ProfileError {
    pub step: ProfileStep,
    #[source]
    pub source: DomainError,
}

impl ProfileError {
    fn new(step: ProfileStep, source: DomainError) -> Self {
        Self { step, source }
    }

    /// Single human-readable message suitable for display.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// Outcome of one load.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileLoad {
    /// No session: not loading, nothing to show.
    SignedOut,
    Loaded(Profile),
    Failed(ProfileError),
}

impl ProfileLoad {
    pub fn profile(&self) -> Option<&Profile> {
        match self {
            ProfileLoad::Loaded(profile) => Some(profile),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ProfileError> {
        match self {
            ProfileLoad::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// Runs `create`; on a uniqueness conflict re-reads once and uses the row
/// another writer inserted. If the re-read finds nothing, the conflict stands.
async fn create_or_reread<T, C, R, RF>(create: C, reread: R) -> Result<T, DomainError>
where
    C: Future<Output = Result<T, DomainError>>,
    R: FnOnce() -> RF,
    RF: Future<Output = Result<Option<T>, DomainError>>,
{
    match create.await {
        Ok(created) => Ok(created),
        Err(conflict) if conflict.is_conflict() => {
            debug!("insert lost a race; re-reading");
            match reread().await? {
                Some(existing) => Ok(existing),
                None => Err(conflict),
            }
        }
        Err(e) => Err(e),
    }
}

#[derive(Clone)]
pub struct ProfileService {
    store: Arc<dyn ProfileStore>,
}

impl fmt::Debug for ProfileService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProfileService").finish_non_exhaustive()
    }
}

impl ProfileService {
    pub fn new(store: Arc<dyn ProfileStore>) -> Self {
        Self { store }
    }

    /// Fetch the session user's profile, creating whatever rows are missing.
    ///
    /// Calling it again on a provisioned user performs no inserts.
    pub async fn load_profile(&self, session: Option<&SessionUser>) -> ProfileLoad {
        let user = match session {
            Some(user) if !user.id.is_empty() => user,
            _ => return ProfileLoad::SignedOut,
        };

        let account = match self.ensure_account(user).await {
            Ok(account) => account,
            Err(e) => {
                error!(auth_id = %user.id, error = %e, "profile load failed at account step");
                return ProfileLoad::Failed(ProfileError::new(ProfileStep::Account, e));
            }
        };

        let game_stats = match self.ensure_game_stats(&account).await {
            Ok(stats) => stats,
            Err(err) => {
                error!(account_id = %account.id, error = %err, "profile load failed at game stats step");
                return ProfileLoad::Failed(err);
            }
        };

        let wallet = match self.ensure_wallet(&account).await {
            Ok(wallet) => wallet,
            Err(err) => {
                error!(account_id = %account.id, error = %err, "profile load failed at wallet step");
                return ProfileLoad::Failed(err);
            }
        };

        ProfileLoad::Loaded(Profile {
            account,
            game_stats,
            wallet,
        })
    }

    async fn ensure_account(&self, user: &SessionUser) -> Result<Account, DomainError> {
        if let Some(account) = self.store.find_account_by_auth_id(&user.id).await? {
            return Ok(account);
        }

        info!(auth_id = %user.id, email = %Redacted(&user.email), "provisioning account");
        let account = create_or_reread(
            self.store
                .create_account(NewAccount::new(user.id.clone(), user.email.clone())),
            || self.store.find_account_by_auth_id(&user.id),
        )
        .await?;
        info!(account_id = %account.id, "account ready");
        Ok(account)
    }

    /// `Err` only when the lookup fails; a failed insert yields `Ok(None)`.
    async fn ensure_game_stats(&self, account: &Account) -> Result<Option<GameStats>, ProfileError> {
        let existing = self
            .store
            .find_game_stats(account.id)
            .await
            .map_err(|e| ProfileError::new(ProfileStep::GameStats, e))?;
        if existing.is_some() {
            return Ok(existing);
        }

        info!(account_id = %account.id, "provisioning game stats");
        let created = create_or_reread(
            self.store
                .create_game_stats(account.id, GameStatsDefaults::default()),
            || self.store.find_game_stats(account.id),
        )
        .await;

        match created {
            Ok(stats) => Ok(Some(stats)),
            Err(e) => {
                warn!(account_id = %account.id, error = %e, "game stats insert failed; continuing without them");
                Ok(None)
            }
        }
    }

    async fn ensure_wallet(&self, account: &Account) -> Result<Option<Wallet>, ProfileError> {
        let existing = self
            .store
            .find_wallet(account.id)
            .await
            .map_err(|e| ProfileError::new(ProfileStep::Wallet, e))?;
        if existing.is_some() {
            return Ok(existing);
        }

        info!(account_id = %account.id, "provisioning wallet");
        let created = create_or_reread(
            self.store.create_wallet(account.id, WalletDefaults::default()),
            || self.store.find_wallet(account.id),
        )
        .await;

        match created {
            Ok(wallet) => Ok(Some(wallet)),
            Err(e) => {
                warn!(account_id = %account.id, error = %e, "wallet insert failed; continuing without it");
                Ok(None)
            }
        }
    }
}
