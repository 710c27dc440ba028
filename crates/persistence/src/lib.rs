//! Persistence layer for the greenhouse dashboard.
//!
//! This crate contains:
//! - The key-value persistence area and its backends
//! - Entity definitions (persisted record mappings)
//! - Repository implementations
//! - Store metrics

pub mod entities;
pub mod metrics;
pub mod repositories;
pub mod store;

pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};
