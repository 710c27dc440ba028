//! Store metrics collection.
//!
//! Provides functions for recording persistence-related metrics.

use metrics::{counter, histogram};
use std::time::Instant;

/// Record the duration of a store operation.
pub fn record_store_duration(operation: &str, duration_secs: f64) {
    histogram!(
        "store_operation_duration_seconds",
        "operation" => operation.to_string()
    )
    .record(duration_secs);
}

/// Record a value that failed to decode.
pub fn record_corrupt_value(key: &str) {
    counter!("store_corrupt_values_total", "key" => key.to_string()).increment(1);
}

/// A helper to time store operations and record metrics.
///
/// Usage:
/// ```ignore
/// let timer = StoreTimer::new("persist");
/// write_file(...)?;
/// timer.record();
/// ```
pub struct StoreTimer {
    operation: String,
    start: Instant,
}

impl StoreTimer {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            start: Instant::now(),
        }
    }

    /// Record the elapsed duration to metrics.
    pub fn record(self) {
        let duration = self.start.elapsed().as_secs_f64();
        record_store_duration(&self.operation, duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_timer_creation() {
        let timer = StoreTimer::new("persist");
        assert_eq!(timer.operation, "persist");
    }

    #[test]
    fn test_store_timer_records_without_recorder() {
        // No global recorder installed; recording is a no-op.
        StoreTimer::new(String::from("open")).record();
        record_corrupt_value("user");
    }
}
