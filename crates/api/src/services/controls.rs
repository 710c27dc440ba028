//! Watering and fan control panel.
//!
//! There is no hardware behind the panel. Settings are kept in memory and
//! the "run" actions are only logged.

use domain::models::ControlSettings;
use serde::Deserialize;
use std::sync::RwLock;
use thiserror::Error;

use crate::middleware::metrics::record_control_action;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControlError {
    #[error("Manual watering is unavailable while auto-watering is on")]
    AutoWateringActive,
}

/// Partial control panel update. Percentages outside 0-100 are clamped.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlUpdate {
    pub auto_watering: Option<bool>,
    pub water_amount: Option<f64>,
    pub fan_enabled: Option<bool>,
    pub fan_speed: Option<f64>,
}

fn clamp_percent(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 100.0) as u8
}

#[derive(Debug, Default)]
pub struct ControlPanel {
    settings: RwLock<ControlSettings>,
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn settings(&self) -> ControlSettings {
        *self.settings.read().unwrap_or_else(|e| e.into_inner())
    }

    pub fn update(&self, update: &ControlUpdate) -> ControlSettings {
        let mut settings = self.settings.write().unwrap_or_else(|e| e.into_inner());
        if let Some(auto) = update.auto_watering {
            settings.auto_watering = auto;
        }
        if let Some(amount) = update.water_amount {
            settings.water_amount = clamp_percent(amount);
        }
        if let Some(enabled) = update.fan_enabled {
            settings.fan_enabled = enabled;
        }
        if let Some(speed) = update.fan_speed {
            settings.fan_speed = clamp_percent(speed);
        }
        tracing::debug!(settings = ?*settings, "Control settings updated");
        *settings
    }

    /// Starts a manual watering run with the configured amount.
    pub fn water_now(&self) -> Result<u8, ControlError> {
        let settings = self.settings();
        if settings.auto_watering {
            return Err(ControlError::AutoWateringActive);
        }
        record_control_action("manual_watering");
        tracing::info!(water_amount = settings.water_amount, "Manual watering started");
        Ok(settings.water_amount)
    }

    /// Sends the current fan settings.
    pub fn apply_fan_settings(&self) -> ControlSettings {
        let settings = self.settings();
        record_control_action("fan_settings");
        tracing::info!(
            fan_enabled = settings.fan_enabled,
            fan_speed = settings.fan_speed,
            "Fan settings saved"
        );
        settings
    }
}
