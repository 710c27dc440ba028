//! Home dashboard and reports view models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

use super::device::{Device, DeviceStatus, Telemetry};

/// Chart aggregation period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartPeriod {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl ChartPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartPeriod::Daily => "daily",
            ChartPeriod::Weekly => "weekly",
            ChartPeriod::Monthly => "monthly",
        }
    }

    /// Number of chart points for this period.
    pub fn points(&self) -> usize {
        match self {
            ChartPeriod::Daily => 24,
            ChartPeriod::Weekly => 7,
            ChartPeriod::Monthly => 30,
        }
    }

    /// X-axis label for point `index`.
    pub fn label(&self, index: usize) -> String {
        match self {
            ChartPeriod::Daily => format!("{}:00", index),
            ChartPeriod::Weekly => WEEKDAYS[index % WEEKDAYS.len()].to_string(),
            ChartPeriod::Monthly => format!("Day {}", index + 1),
        }
    }
}

impl FromStr for ChartPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" => Ok(ChartPeriod::Daily),
            "weekly" => Ok(ChartPeriod::Weekly),
            "monthly" => Ok(ChartPeriod::Monthly),
            _ => Err(format!("Invalid chart period: {}", s)),
        }
    }
}

impl fmt::Display for ChartPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

pub const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Line-chart series for temperature, humidity and CO2.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorSeries {
    pub labels: Vec<String>,
    pub temperature: Vec<f64>,
    pub humidity: Vec<f64>,
    pub co2: Vec<f64>,
}

/// Device entry in a picker.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceOption {
    pub id: String,
    pub name: String,
    pub status: DeviceStatus,
}

impl From<&Device> for DeviceOption {
    fn from(device: &Device) -> Self {
        Self {
            id: device.id.clone(),
            name: device.name.clone(),
            status: device.status,
        }
    }
}

/// A single stat card on the home page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatCard {
    pub key: String,
    pub value: f64,
    pub unit: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl StatCard {
    fn new(key: &str, value: f64, unit: &str) -> Self {
        Self {
            key: key.to_string(),
            value,
            unit: unit.to_string(),
            min: None,
            max: None,
        }
    }

    fn with_range(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    /// Cards for a device's telemetry; zeros when no device is selected.
    pub fn for_telemetry(data: Option<&Telemetry>) -> Vec<StatCard> {
        let data = data.copied().unwrap_or_default();
        vec![
            StatCard::new("soilMoisture", data.soil_moisture, "%"),
            StatCard::new("temperature", data.temperature, "°C").with_range(18.0, 28.0),
            StatCard::new("co2Level", data.co2, "PPM"),
            StatCard::new("humidity", data.humidity, "%"),
        ]
    }
}

/// Watering and fan control panel state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ControlSettings {
    pub auto_watering: bool,

    #[validate(range(max = 100, message = "Water amount must be between 0 and 100"))]
    pub water_amount: u8,

    pub fan_enabled: bool,

    #[validate(range(max = 100, message = "Fan speed must be between 0 and 100"))]
    pub fan_speed: u8,
}

impl Default for ControlSettings {
    fn default() -> Self {
        Self {
            auto_watering: true,
            water_amount: 50,
            fan_enabled: false,
            fan_speed: 30,
        }
    }
}

/// Everything the home page shows.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeView {
    pub devices: Vec<DeviceOption>,
    pub selected: Option<Device>,
    pub last_update: Option<DateTime<Utc>>,
    pub stats: Vec<StatCard>,
    pub period: ChartPeriod,
    pub chart: SensorSeries,
    pub controls: ControlSettings,
}

/// Share of actuator usage, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageShare {
    pub watering: u32,
    pub fan: u32,
}

impl Default for UsageShare {
    fn default() -> Self {
        Self {
            watering: 35,
            fan: 65,
        }
    }
}

/// Per-weekday averages for the bar chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyAverages {
    pub labels: Vec<String>,
    pub temperature: Vec<f64>,
    pub humidity: Vec<f64>,
}

impl Default for WeeklyAverages {
    fn default() -> Self {
        Self {
            labels: WEEKDAYS.iter().map(|d| d.to_string()).collect(),
            temperature: vec![23.0, 24.0, 25.0, 23.0, 24.0, 25.0, 26.0],
            humidity: vec![65.0, 63.0, 64.0, 65.0, 66.0, 62.0, 63.0],
        }
    }
}

/// Aggregates over the whole device registry.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetAggregates {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    /// Mean telemetry over active devices; `None` when no device is active.
    pub average: Option<Telemetry>,
}

impl FleetAggregates {
    pub fn from_devices(devices: &[Device]) -> Self {
        let active: Vec<&Device> = devices.iter().filter(|d| d.is_active()).collect();

        let average = if active.is_empty() {
            None
        } else {
            let n = active.len() as f64;
            let mut sum = Telemetry::default();
            for device in &active {
                sum.temperature += device.data.temperature;
                sum.humidity += device.data.humidity;
                sum.co2 += device.data.co2;
                sum.soil_moisture += device.data.soil_moisture;
            }
            Some(Telemetry {
                temperature: sum.temperature / n,
                humidity: sum.humidity / n,
                co2: sum.co2 / n,
                soil_moisture: sum.soil_moisture / n,
            })
        };

        Self {
            total: devices.len(),
            active: active.len(),
            inactive: devices.len() - active.len(),
            average,
        }
    }
}

/// Everything the reports page shows.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportView {
    pub devices: Vec<DeviceOption>,
    pub selected_device_id: Option<String>,
    pub period: ChartPeriod,
    pub chart: SensorSeries,
    pub usage: UsageShare,
    pub weekly: WeeklyAverages,
    pub aggregates: FleetAggregates,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::device::NewDevice;

    fn device(id: &str, status: DeviceStatus, temperature: f64) -> Device {
        let mut new = NewDevice::arduino(format!("Sera {}", id), format!("ARD{}", id));
        new.status = status;
        new.data.temperature = temperature;
        new.data.humidity = 60.0;
        Device::from_new(id.to_string(), new)
    }

    #[test]
    fn test_chart_period_points_and_labels() {
        assert_eq!(ChartPeriod::Daily.points(), 24);
        assert_eq!(ChartPeriod::Daily.label(13), "13:00");
        assert_eq!(ChartPeriod::Weekly.label(6), "Sunday");
        assert_eq!(ChartPeriod::Monthly.label(0), "Day 1");
        assert_eq!(ChartPeriod::from_str("WEEKLY").unwrap(), ChartPeriod::Weekly);
        assert!(ChartPeriod::from_str("yearly").is_err());
    }

    #[test]
    fn test_stat_cards_without_device_are_zero() {
        let cards = StatCard::for_telemetry(None);
        assert_eq!(cards.len(), 4);
        assert!(cards.iter().all(|c| c.value == 0.0));
        let temperature = cards.iter().find(|c| c.key == "temperature").unwrap();
        assert_eq!(temperature.min, Some(18.0));
        assert_eq!(temperature.max, Some(28.0));
    }

    #[test]
    fn test_control_defaults_and_validation() {
        let controls = ControlSettings::default();
        assert!(controls.auto_watering);
        assert_eq!(controls.water_amount, 50);
        assert!(!controls.fan_enabled);
        assert_eq!(controls.fan_speed, 30);
        assert!(controls.validate().is_ok());

        let too_fast = ControlSettings {
            fan_speed: 101,
            ..controls
        };
        assert!(too_fast.validate().is_err());
    }

    #[test]
    fn test_fleet_aggregates_average_active_only() {
        let devices = vec![
            device("1", DeviceStatus::Active, 20.0),
            device("2", DeviceStatus::Active, 30.0),
            device("3", DeviceStatus::Inactive, 100.0),
        ];
        let aggregates = FleetAggregates::from_devices(&devices);
        assert_eq!(aggregates.total, 3);
        assert_eq!(aggregates.active, 2);
        assert_eq!(aggregates.inactive, 1);
        let average = aggregates.average.unwrap();
        assert_eq!(average.temperature, 25.0);
        assert_eq!(average.humidity, 60.0);
    }

    #[test]
    fn test_fleet_aggregates_empty() {
        let aggregates = FleetAggregates::from_devices(&[]);
        assert_eq!(aggregates.total, 0);
        assert!(aggregates.average.is_none());
    }

    #[test]
    fn test_weekly_defaults_line_up() {
        let weekly = WeeklyAverages::default();
        assert_eq!(weekly.labels.len(), 7);
        assert_eq!(weekly.temperature.len(), 7);
        assert_eq!(weekly.humidity.len(), 7);
    }
}
