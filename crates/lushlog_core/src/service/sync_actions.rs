//! Pessimistic CRUD orchestration over the release store.
//!
//! # Responsibility
//! - Run each intent as "call remote, then mutate the store on success".
//! - Return the server-confirmed entity so callers can drive UI feedback.
//!
//! # Invariants
//! - The store is mutated only after the awaited remote call returns `Ok`.
//! - Failed calls leave the store untouched and surface a `SyncError`.
//! - No store borrow is held across an await point.
//! - Concurrent actions apply their mutations in completion order.

use crate::model::release::{
    InputValidationError, NewRelease, NewReleaseItem, Release, ReleaseId, ReleaseItem,
};
use crate::remote::release_api::{RemoteError, RemoteReleaseService};
use crate::store::release_store::{ReleaseStore, StoreError};
use log::{info, warn};
use std::cell::{RefCell, RefMut};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

pub type SyncResult<T> = Result<T, SyncError>;

/// Failure of one sync action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncError {
    /// Input rejected before any request was sent.
    InvalidInput(InputValidationError),
    /// Remote call failed; no local mutation happened.
    Remote(RemoteError),
    /// Remote call succeeded but the local mutation was rejected, which
    /// means client and server state diverged.
    Store(StoreError),
    /// Remote call succeeded but the store was borrowed elsewhere when the
    /// response arrived; the mutation was skipped.
    StoreBusy,
}

impl Display for SyncError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(err) => write!(f, "{err}"),
            Self::Remote(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::StoreBusy => write!(f, "release store is borrowed; mutation skipped"),
        }
    }
}

impl Error for SyncError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidInput(err) => Some(err),
            Self::Remote(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::StoreBusy => None,
        }
    }
}

impl From<InputValidationError> for SyncError {
    fn from(value: InputValidationError) -> Self {
        Self::InvalidInput(value)
    }
}

impl From<RemoteError> for SyncError {
    fn from(value: RemoteError) -> Self {
        Self::Remote(value)
    }
}

impl From<StoreError> for SyncError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// CRUD entry points binding a remote service to a caller-owned store.
///
/// Readers running alongside in-flight actions should take a
/// `ReleaseStore::snapshot()` instead of holding a `Ref` across an await;
/// a borrow still held when a response lands yields `SyncError::StoreBusy`.
pub struct SyncActions<'s, R: RemoteReleaseService> {
    remote: R,
    store: &'s RefCell<ReleaseStore>,
}

impl<'s, R: RemoteReleaseService> SyncActions<'s, R> {
    pub fn new(remote: R, store: &'s RefCell<ReleaseStore>) -> Self {
        Self { remote, store }
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    pub fn store(&self) -> &'s RefCell<ReleaseStore> {
        self.store
    }

    /// Loads every release and replaces the local collection.
    ///
    /// Returns the installed snapshot in server order.
    pub async fn fetch_all(&self) -> SyncResult<Vec<Arc<Release>>> {
        let outcome: SyncResult<Vec<Arc<Release>>> = async {
            let releases = self.remote.list_releases().await?;
            let mut store = self.store_mut()?;
            store.replace_all(releases)?;
            Ok(store.snapshot())
        }
        .await;

        if let Ok(releases) = &outcome {
            info!(
                "event=releases_fetch module=sync status=ok count={}",
                releases.len()
            );
        }
        log_failure("releases_fetch", outcome)
    }

    /// Creates a release remotely and appends the confirmed record.
    ///
    /// # Errors
    /// - `InvalidInput` when `input.title` is blank; nothing is sent.
    /// - `Remote` when the call fails.
    /// - `Store` when the returned id is already cached.
    pub async fn create(&self, input: &NewRelease) -> SyncResult<Arc<Release>> {
        let outcome: SyncResult<Arc<Release>> = async {
            input.validate()?;
            let created = self.remote.create_release(input).await?;
            Ok(self.store_mut()?.append(created)?)
        }
        .await;

        if let Ok(release) = &outcome {
            info!(
                "event=release_create module=sync status=ok release_id={}",
                release.id
            );
        }
        log_failure("release_create", outcome)
    }

    /// Deletes a release remotely, then removes it locally by `release_id`.
    ///
    /// The local removal always uses `release_id`; an id echoed by the
    /// service is only compared and logged.
    ///
    /// # Errors
    /// - `Remote` when the call fails.
    /// - `Store(NotFound)` when the release is not cached (including a
    ///   second delete of the same id that settled after the first).
    pub async fn delete(&self, release_id: &ReleaseId) -> SyncResult<Arc<Release>> {
        let outcome: SyncResult<Arc<Release>> = async {
            let ack = self.remote.delete_release(release_id).await?;
            if let Some(echoed) = ack.echoed_id.as_ref().filter(|echoed| *echoed != release_id) {
                warn!(
                    "event=release_delete module=sync status=echo_mismatch release_id={} echoed_id={}",
                    release_id, echoed
                );
            }
            Ok(self.store_mut()?.remove(release_id)?)
        }
        .await;

        if outcome.is_ok() {
            info!("event=release_delete module=sync status=ok release_id={release_id}");
        }
        log_failure("release_delete", outcome)
    }

    /// Appends an item remotely, then appends the confirmed item locally.
    ///
    /// On failure the caller still owns `input` for retry or re-edit.
    ///
    /// # Errors
    /// - `InvalidInput` when text is blank or the type is unrecognized.
    /// - `Remote` when the call fails.
    /// - `Store(NotFound)` when the release is no longer cached.
    pub async fn add_item(
        &self,
        release_id: &ReleaseId,
        input: &NewReleaseItem,
    ) -> SyncResult<ReleaseItem> {
        let outcome: SyncResult<ReleaseItem> = async {
            input.validate()?;
            let item = self.remote.add_item(release_id, input).await?;
            self.store_mut()?.append_item(release_id, item.clone())?;
            Ok(item)
        }
        .await;

        if let Ok(item) = &outcome {
            info!(
                "event=release_item_add module=sync status=ok release_id={} item_id={} type={}",
                release_id, item.id, item.kind
            );
        }
        log_failure("release_item_add", outcome)
    }

    fn store_mut(&self) -> SyncResult<RefMut<'s, ReleaseStore>> {
        self.store
            .try_borrow_mut()
            .map_err(|_| SyncError::StoreBusy)
    }
}

fn log_failure<T>(event: &'static str, outcome: SyncResult<T>) -> SyncResult<T> {
    if let Err(err) = &outcome {
        let kind = match err {
            SyncError::InvalidInput(_) => "invalid_input",
            SyncError::Remote(_) => "remote",
            SyncError::Store(_) => "store",
            SyncError::StoreBusy => "store_busy",
        };
        warn!("event={event} module=sync status=error kind={kind} error={err}");
    }
    outcome
}
