//! Domain layer for the greenhouse dashboard.
//!
//! This crate contains:
//! - Domain models (User, Device, Telemetry, preferences, dashboard views)
//! - Auth error taxonomy and form-level checks
//! - Sensor simulation and dashboard/report builders

pub mod models;
pub mod services;
