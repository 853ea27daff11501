//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate remote calls and local store mutations into CRUD actions.
//! - Keep callers decoupled from transport details.

pub mod sync_actions;
