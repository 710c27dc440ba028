//! In-memory device registry.

use domain::models::{Device, NewDevice, Telemetry, TelemetryPatch};
use shared::ids::MonotonicIdGenerator;
use tokio::sync::watch;

use crate::middleware::metrics::{record_device_count, record_device_mutation};

/// Identifier of the device every registry starts with.
pub const SEED_DEVICE_ID: &str = "1";

/// The device present on every fresh start.
pub fn seed_device() -> Device {
    Device::from_new(
        SEED_DEVICE_ID.to_string(),
        NewDevice::arduino("Arduino UNO", "ARD001").with_data(Telemetry {
            temperature: 25.0,
            humidity: 65.0,
            co2: 800.0,
            soil_moisture: 70.0,
        }),
    )
}

/// Authoritative list of device records for the running process.
///
/// Mutations addressed to an unknown id change nothing and return `None`.
/// Subscribers are only woken when a mutation actually changed the list.
pub struct DeviceRegistry {
    ids: MonotonicIdGenerator,
    devices: watch::Sender<Vec<Device>>,
}

impl Default for DeviceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceRegistry {
    /// A registry holding only the seeded device.
    pub fn new() -> Self {
        Self::with_devices(vec![seed_device()])
    }

    pub fn with_devices(devices: Vec<Device>) -> Self {
        let registry = Self {
            ids: MonotonicIdGenerator::new(),
            devices: watch::Sender::new(devices),
        };
        registry.publish_counts();
        registry
    }

    /// Snapshot of every device, in insertion order.
    pub fn devices(&self) -> Vec<Device> {
        self.devices.borrow().clone()
    }

    pub fn get(&self, id: &str) -> Option<Device> {
        self.devices.borrow().iter().find(|d| d.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.devices.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.borrow().is_empty()
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<Device>> {
        self.devices.subscribe()
    }

    /// Assigns a fresh id and appends the device.
    pub fn add_device(&self, new: NewDevice) -> Device {
        let device = Device::from_new(self.ids.next_id(), new);
        self.devices.send_modify(|devices| devices.push(device.clone()));

        record_device_mutation("add");
        self.publish_counts();
        tracing::info!(device_id = %device.id, name = %device.name, "Device added");
        device
    }

    /// Removes the device; returns what was removed.
    pub fn delete_device(&self, id: &str) -> Option<Device> {
        let mut removed = None;
        self.devices.send_if_modified(|devices| {
            let index = devices.iter().position(|d| d.id == id);
            removed = index.map(|i| devices.remove(i));
            removed.is_some()
        });
        self.finish("delete", id, removed)
    }

    pub fn update_device_name(&self, id: &str, name: &str) -> Option<Device> {
        let updated = self.modify(id, |device| {
            if device.name == name {
                return false;
            }
            device.name = name.to_string();
            true
        });
        self.finish("rename", id, updated)
    }

    /// Flips the device between active and inactive.
    pub fn update_device_status(&self, id: &str) -> Option<Device> {
        let updated = self.modify(id, |device| {
            device.status = device.status.toggled();
            true
        });
        self.finish("toggle_status", id, updated)
    }

    /// Merges the given readings and moves `last_seen` forward.
    pub fn update_device_data(&self, id: &str, patch: &TelemetryPatch) -> Option<Device> {
        let updated = self.modify(id, |device| {
            patch.apply(&mut device.data);
            device.touch();
            true
        });
        self.finish("update_data", id, updated)
    }

    /// Applies `change` to the matching device. `change` returns whether it
    /// modified anything; the post-change device is returned either way.
    fn modify<F>(&self, id: &str, change: F) -> Option<Device>
    where
        F: FnOnce(&mut Device) -> bool,
    {
        let mut result = None;
        self.devices.send_if_modified(|devices| {
            let Some(device) = devices.iter_mut().find(|d| d.id == id) else {
                return false;
            };
            let changed = change(device);
            result = Some(device.clone());
            changed
        });
        result
    }

    fn finish(&self, operation: &'static str, id: &str, outcome: Option<Device>) -> Option<Device> {
        match &outcome {
            Some(_) => {
                record_device_mutation(operation);
                self.publish_counts();
                tracing::info!(device_id = %id, operation, "Device updated");
            }
            None => tracing::debug!(device_id = %id, operation, "No device with this id, ignoring"),
        }
        outcome
    }

    fn publish_counts(&self) {
        let devices = self.devices.borrow();
        let active = devices.iter().filter(|d| d.is_active()).count();
        record_device_count(devices.len(), active);
    }
}
