//! Application services shared by the routes.

pub mod controls;
pub mod devices;
pub mod preferences;
pub mod session;

pub use controls::{ControlError, ControlPanel, ControlUpdate};
pub use devices::DeviceRegistry;
pub use preferences::PreferenceService;
pub use session::SessionManager;
