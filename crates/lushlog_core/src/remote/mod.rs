//! Remote release service contract and HTTP implementation.
//!
//! # Responsibility
//! - Define the four-operation contract the sync layer depends on.
//! - Map the contract onto the `/api/v1/releases` HTTP surface.
//!
//! # Invariants
//! - Non-2xx statuses and undecodable 2xx bodies are errors, never empty
//!   successes.

pub mod config;
pub mod release_api;
