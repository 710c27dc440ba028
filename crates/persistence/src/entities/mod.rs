//! Persisted entity definitions.
//!
//! Entities are direct mappings to persisted records.

pub mod user;

pub use user::UserEntity;
