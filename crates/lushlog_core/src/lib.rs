//! Client-side release changelog core.
//! Keeps a local release cache consistent with the remote release service.

pub mod logging;
pub mod model;
pub mod remote;
pub mod service;
pub mod store;
pub mod view;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::release::{
    InputValidationError, ItemId, ItemLink, ItemType, NewRelease, NewReleaseItem, Release,
    ReleaseId, ReleaseItem, RemoteId,
};
pub use remote::config::{ApiConfig, ConfigError, DEFAULT_BASE_URL};
pub use remote::release_api::{
    DeleteAck, HttpReleaseService, RemoteError, RemoteReleaseService, RemoteResult,
};
pub use service::sync_actions::{SyncActions, SyncError, SyncResult};
pub use store::release_store::{ReleaseStore, StoreError, StoreResult};
pub use view::projections::{
    display_date, group_by_category, release_by_id, sorted_by_date_descending, CategoryGroup,
    CategoryGroups, RELEASE_CATEGORIES,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
