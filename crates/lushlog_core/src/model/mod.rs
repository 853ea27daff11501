//! Changelog domain model.
//!
//! # Responsibility
//! - Define the release/item records cached by the client store.
//! - Define request inputs sent to the remote release service.
//!
//! # Invariants
//! - Entity ids are assigned by the remote service, never generated locally.
//! - Optional item attributes are explicit `Option` fields.

pub mod release;
mod wire;
