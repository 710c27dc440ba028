//! Domain models for the greenhouse dashboard.

pub mod auth;
pub mod dashboard;
pub mod device;
pub mod preferences;
pub mod user;

pub use auth::{AuthError, LoginForm, RegistrationForm};
pub use dashboard::{
    ChartPeriod, ControlSettings, DeviceOption, FleetAggregates, HomeView, ReportView,
    SensorSeries, StatCard, UsageShare, WeeklyAverages,
};
pub use device::{Device, DeviceStatus, NewDevice, Telemetry, TelemetryPatch};
pub use preferences::{Language, PasswordChange, ProfileForm, SettingsView, Theme};
pub use user::User;
