//! Client-side release cache.
//!
//! # Responsibility
//! - Hold the authoritative local snapshot of confirmed releases.
//! - Expose synchronous mutation primitives and read-only selectors.
//!
//! # Invariants
//! - Release ids are unique within the store.
//! - Mutations either fully apply or leave the collection untouched.

pub mod release_store;
