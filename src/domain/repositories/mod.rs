//! Store trait definitions for the domain layer.
//!
//! The [`LinkStore`] trait abstracts the TTL-capable key-value store that holds
//! URL records and their companion stats records. Implementations live in
//! `crate::infrastructure::store`; a mock is generated via `mockall` for tests.

pub mod link_store;

pub use link_store::{KeyExpiry, LinkStore, ScannedStats, StoreError, StoreResult};

#[cfg(test)]
pub use link_store::MockLinkStore;
