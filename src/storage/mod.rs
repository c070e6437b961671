//! Local key-value persistence for the catalog.
//!
//! The interpreter itself keeps everything in memory; this module only
//! stores and restores snapshots of it.

pub mod kv;
pub mod snapshot;

pub use kv::{FileStore, KeyValueStore, MemoryStore, WriteBatch};
pub use snapshot::{load_state, save_state, CATALOG_KEY, SELECTED_DATABASE_KEY};
