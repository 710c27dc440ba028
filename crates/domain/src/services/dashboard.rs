//! Builders for the home and reports views.

use rand::Rng;

use crate::models::dashboard::{
    ChartPeriod, ControlSettings, DeviceOption, FleetAggregates, HomeView, ReportView, StatCard,
    UsageShare, WeeklyAverages,
};
use crate::models::device::Device;
use crate::services::simulation::simulate_series;

/// Picks the requested device, falling back to the first one.
pub fn select_device<'a>(devices: &'a [Device], requested: Option<&str>) -> Option<&'a Device> {
    match requested {
        Some(id) => devices
            .iter()
            .find(|d| d.id == id)
            .or_else(|| devices.first()),
        None => devices.first(),
    }
}

pub fn build_home_view<R: Rng + ?Sized>(
    devices: &[Device],
    requested: Option<&str>,
    period: ChartPeriod,
    controls: ControlSettings,
    rng: &mut R,
) -> HomeView {
    let selected = select_device(devices, requested).cloned();

    HomeView {
        devices: devices.iter().map(DeviceOption::from).collect(),
        last_update: selected.as_ref().map(|d| d.last_seen),
        stats: StatCard::for_telemetry(selected.as_ref().map(|d| &d.data)),
        selected,
        period,
        chart: simulate_series(period, rng),
        controls,
    }
}

pub fn build_report_view<R: Rng + ?Sized>(
    devices: &[Device],
    requested: Option<&str>,
    period: ChartPeriod,
    rng: &mut R,
) -> ReportView {
    ReportView {
        devices: devices.iter().map(DeviceOption::from).collect(),
        selected_device_id: select_device(devices, requested).map(|d| d.id.clone()),
        period,
        chart: simulate_series(period, rng),
        usage: UsageShare::default(),
        weekly: WeeklyAverages::default(),
        aggregates: FleetAggregates::from_devices(devices),
    }
}
