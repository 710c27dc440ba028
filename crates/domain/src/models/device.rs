//! Device domain model.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default device type tag for greenhouse nodes.
pub const ARDUINO_DEVICE_TYPE: &str = "Arduino";

/// Operational status of a device.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceStatus {
    #[default]
    Active,
    Inactive,
}

impl DeviceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceStatus::Active => "active",
            DeviceStatus::Inactive => "inactive",
        }
    }

    /// The opposite status.
    pub fn toggled(self) -> Self {
        match self {
            DeviceStatus::Active => DeviceStatus::Inactive,
            DeviceStatus::Inactive => DeviceStatus::Active,
        }
    }
}

impl FromStr for DeviceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(DeviceStatus::Active),
            "inactive" => Ok(DeviceStatus::Inactive),
            _ => Err(format!("Invalid device status: {}", s)),
        }
    }
}

impl fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Latest sensor readings reported by a device.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Telemetry {
    /// Air temperature in °C.
    pub temperature: f64,
    /// Relative humidity in %.
    pub humidity: f64,
    /// CO2 concentration in ppm.
    pub co2: f64,
    /// Soil moisture in %.
    pub soil_moisture: f64,
}

/// A partial telemetry update; absent fields are left untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub humidity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub co2: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soil_moisture: Option<f64>,
}

impl TelemetryPatch {
    /// Merges the present fields into `data`.
    pub fn apply(&self, data: &mut Telemetry) {
        if let Some(temperature) = self.temperature {
            data.temperature = temperature;
        }
        if let Some(humidity) = self.humidity {
            data.humidity = humidity;
        }
        if let Some(co2) = self.co2 {
            data.co2 = co2;
        }
        if let Some(soil_moisture) = self.soil_moisture {
            data.soil_moisture = soil_moisture;
        }
    }
}

/// A greenhouse sensor/controller node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub device_type: String,
    pub status: DeviceStatus,
    pub last_seen: DateTime<Utc>,
    pub arduino_id: String,
    pub data: Telemetry,
}

impl Device {
    /// Builds a device from its id-less description.
    pub fn from_new(id: String, new: NewDevice) -> Self {
        Self {
            id,
            name: new.name,
            device_type: new.device_type,
            status: new.status,
            last_seen: new.last_seen,
            arduino_id: new.arduino_id,
            data: new.data,
        }
    }

    /// Moves `last_seen` forward to now, strictly past its previous value.
    pub fn touch(&mut self) {
        let now = Utc::now();
        self.last_seen = if now > self.last_seen {
            now
        } else {
            self.last_seen + Duration::microseconds(1)
        };
    }

    pub fn is_active(&self) -> bool {
        self.status == DeviceStatus::Active
    }
}

/// Everything needed to add a device except its identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDevice {
    pub name: String,
    #[serde(rename = "type", default = "default_device_type")]
    pub device_type: String,
    #[serde(default)]
    pub status: DeviceStatus,
    #[serde(default = "Utc::now")]
    pub last_seen: DateTime<Utc>,
    pub arduino_id: String,
    #[serde(default)]
    pub data: Telemetry,
}

impl NewDevice {
    /// An active Arduino node with zeroed telemetry, seen now.
    pub fn arduino(name: impl Into<String>, arduino_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            device_type: default_device_type(),
            status: DeviceStatus::Active,
            last_seen: Utc::now(),
            arduino_id: arduino_id.into(),
            data: Telemetry::default(),
        }
    }

    pub fn with_data(mut self, data: Telemetry) -> Self {
        self.data = data;
        self
    }
}

fn default_device_type() -> String {
    ARDUINO_DEVICE_TYPE.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Device {
        Device::from_new(
            "1".to_string(),
            NewDevice::arduino("Arduino UNO", "ARD001").with_data(Telemetry {
                temperature: 25.0,
                humidity: 65.0,
                co2: 800.0,
                soil_moisture: 70.0,
            }),
        )
    }

    #[test]
    fn test_status_toggle() {
        assert_eq!(DeviceStatus::Active.toggled(), DeviceStatus::Inactive);
        assert_eq!(DeviceStatus::Inactive.toggled(), DeviceStatus::Active);
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!(DeviceStatus::from_str("ACTIVE").unwrap(), DeviceStatus::Active);
        assert_eq!(
            DeviceStatus::from_str("inactive").unwrap(),
            DeviceStatus::Inactive
        );
        assert!(DeviceStatus::from_str("broken").is_err());
    }

    #[test]
    fn test_patch_applies_only_present_fields() {
        let mut device = sample();
        let patch = TelemetryPatch {
            temperature: Some(30.0),
            ..Default::default()
        };
        patch.apply(&mut device.data);
        assert_eq!(device.data.temperature, 30.0);
        assert_eq!(device.data.humidity, 65.0);
        assert_eq!(device.data.co2, 800.0);
        assert_eq!(device.data.soil_moisture, 70.0);
    }

    #[test]
    fn test_patch_deserializes_partial_reading() {
        let patch: TelemetryPatch = serde_json::from_str(r#"{"soilMoisture": 40}"#).unwrap();
        assert_eq!(patch.soil_moisture, Some(40.0));
        assert_eq!(patch.temperature, None);
    }

    #[test]
    fn test_touch_strictly_advances() {
        let mut device = sample();
        device.last_seen = Utc::now() + Duration::hours(1);
        let before = device.last_seen;
        device.touch();
        assert!(device.last_seen > before);
    }

    #[test]
    fn test_device_json_shape() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["type"], "Arduino");
        assert_eq!(json["status"], "active");
        assert_eq!(json["arduinoId"], "ARD001");
        assert_eq!(json["data"]["soilMoisture"], 70.0);
        assert!(json.get("lastSeen").is_some());
    }

    #[test]
    fn test_new_device_defaults_from_json() {
        let new: NewDevice =
            serde_json::from_str(r#"{"name":"Sensor A","arduinoId":"ARD2"}"#).unwrap();
        assert_eq!(new.device_type, "Arduino");
        assert_eq!(new.status, DeviceStatus::Active);
        assert_eq!(new.data, Telemetry::default());
    }
}
