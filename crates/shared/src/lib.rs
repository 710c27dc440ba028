//! Shared utilities for the greenhouse dashboard.
//!
//! This crate provides functionality used across the other crates:
//! - Email and password validation rules
//! - Identifier generation

pub mod ids;
pub mod validation;
