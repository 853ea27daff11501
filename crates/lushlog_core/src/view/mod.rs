//! Read-only derived views over release snapshots.
//!
//! # Responsibility
//! - Compute display order, category grouping and id lookup on demand.
//!
//! # Invariants
//! - Projections never mutate their input and are deterministic.

pub mod projections;
