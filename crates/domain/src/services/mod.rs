//! Domain services for the greenhouse dashboard.
//!
//! Pure logic over domain models: sensor simulation and view builders.

pub mod dashboard;
pub mod simulation;

pub use dashboard::{build_home_view, build_report_view, select_device};
pub use simulation::simulate_series;
