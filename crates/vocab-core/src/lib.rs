#![deny(warnings)]
#![allow(missing_docs)]
//! Dense bidirectional index store for vocabulary and feature interning.
//!
//! An [`IndexStore`] hands out stable integer identifiers in first-insertion
//! order and can derive compacted copies of itself after a batch of values is
//! removed, keeping the surviving identifiers dense and order-preserving.

use tracing::{debug, instrument};

/// Construction-time configuration for index stores
pub mod config;
/// Structured error types for store operations
pub mod error;
/// The index store and its iterators
pub mod index_store;
/// Size and compaction statistics
pub mod stats;

pub use config::StoreConfig;
pub use error::{Result, StoreError};
pub use index_store::{IndexStore, Items};
pub use stats::{CompactionStats, StoreStats};

/// Dense identifier assigned to an interned value.
pub type Index = usize;

/// Initialize the vocab core components
#[instrument]
pub fn init() -> Result<()> {
    debug!(version = env!("CARGO_PKG_VERSION"), "Initializing vocab core");
    Ok(())
}
