//! In-memory release store.
//!
//! # Responsibility
//! - Own the collection of releases confirmed by the remote service.
//! - Apply bulk replace, append, item append and remove mutations.
//!
//! # Invariants
//! - No two stored releases share an id; violating writes are rejected.
//! - `append_item` is copy-on-write: snapshots taken earlier keep the old
//!   release value.
//! - `remove` keeps the relative order of the remaining releases.
//! - Missing ids on `append_item`/`remove` are reported as `NotFound`.

use crate::model::release::{Release, ReleaseId, ReleaseItem};
use log::debug;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

pub type StoreResult<T> = Result<T, StoreError>;

/// Store mutation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No release with this id is cached locally.
    NotFound(ReleaseId),
    /// A release with this id is already cached (or repeated in a batch).
    DuplicateId(ReleaseId),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "release not found: {id}"),
            Self::DuplicateId(id) => write!(f, "duplicate release id: {id}"),
        }
    }
}

impl Error for StoreError {}

/// Canonical client-side collection of releases.
///
/// Releases are shared behind `Arc` so snapshots are cheap and stay valid
/// after later mutations.
#[derive(Debug, Clone, Default)]
pub struct ReleaseStore {
    releases: Vec<Arc<Release>>,
}

impl ReleaseStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discards the current collection and installs `releases` in order.
    ///
    /// # Errors
    /// - `DuplicateId` when the batch repeats an id; the store is untouched.
    pub fn replace_all(&mut self, releases: Vec<Release>) -> StoreResult<()> {
        let mut seen = HashSet::with_capacity(releases.len());
        for release in &releases {
            if !seen.insert(&release.id) {
                return Err(StoreError::DuplicateId(release.id.clone()));
            }
        }

        self.releases = releases.into_iter().map(Arc::new).collect();
        debug!(
            "event=store_replace_all module=store status=ok count={}",
            self.releases.len()
        );
        Ok(())
    }

    /// Adds one confirmed release at the end of the collection.
    ///
    /// # Errors
    /// - `DuplicateId` when a release with the same id is already stored.
    pub fn append(&mut self, release: Release) -> StoreResult<Arc<Release>> {
        if self.position(&release.id).is_some() {
            return Err(StoreError::DuplicateId(release.id));
        }

        let release = Arc::new(release);
        self.releases.push(Arc::clone(&release));
        debug!(
            "event=store_append module=store status=ok release_id={}",
            release.id
        );
        Ok(release)
    }

    /// Appends `item` to the release `release_id` and returns the new value.
    ///
    /// The release keeps its position in the collection.
    ///
    /// # Errors
    /// - `NotFound` when no release has `release_id`.
    pub fn append_item(
        &mut self,
        release_id: &ReleaseId,
        item: ReleaseItem,
    ) -> StoreResult<Arc<Release>> {
        let index = self
            .position(release_id)
            .ok_or_else(|| StoreError::NotFound(release_id.clone()))?;

        let updated = Arc::new(self.releases[index].with_item(item));
        self.releases[index] = Arc::clone(&updated);
        debug!(
            "event=store_append_item module=store status=ok release_id={} item_count={}",
            release_id,
            updated.items.len()
        );
        Ok(updated)
    }

    /// Removes the release `release_id` and returns it.
    ///
    /// # Errors
    /// - `NotFound` when no release has `release_id`.
    pub fn remove(&mut self, release_id: &ReleaseId) -> StoreResult<Arc<Release>> {
        let index = self
            .position(release_id)
            .ok_or_else(|| StoreError::NotFound(release_id.clone()))?;

        let removed = self.releases.remove(index);
        debug!(
            "event=store_remove module=store status=ok release_id={} remaining={}",
            release_id,
            self.releases.len()
        );
        Ok(removed)
    }

    /// Returns the release with `release_id`, if cached.
    pub fn lookup_by_id(&self, release_id: &ReleaseId) -> Option<Arc<Release>> {
        self.position(release_id)
            .map(|index| Arc::clone(&self.releases[index]))
    }

    /// Returns the current collection in store order.
    pub fn releases(&self) -> &[Arc<Release>] {
        &self.releases
    }

    /// Returns an owned snapshot sharing the current release values.
    pub fn snapshot(&self) -> Vec<Arc<Release>> {
        self.releases.clone()
    }

    pub fn len(&self) -> usize {
        self.releases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.releases.is_empty()
    }

    fn position(&self, release_id: &ReleaseId) -> Option<usize> {
        self.releases
            .iter()
            .position(|release| &release.id == release_id)
    }
}
