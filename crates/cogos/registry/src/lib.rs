//! # Cogos Registry - Concurrent Hook Registry
//!
//! Stores hook handles keyed by id and answers category and tag queries.
//!
//! Every listing is a snapshot: the returned `Vec` owns its `Arc` handles, so
//! registrations that race with an in-flight orchestration pass cannot
//! disturb its iteration. Snapshots are ordered by first registration.

pub mod error;
mod memory;

pub use error::{RegistryError, Result};
pub use memory::HookRegistry;
