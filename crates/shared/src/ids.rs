//! Identifier generation.

use chrono::Utc;
use std::sync::atomic::{AtomicI64, Ordering};

/// Produces timestamp-derived identifiers that never repeat within a process.
///
/// Each id is the current Unix time in milliseconds, bumped past the previous
/// id when two calls land in the same millisecond (or the clock steps back).
#[derive(Debug, Default)]
pub struct MonotonicIdGenerator {
    last: AtomicI64,
}

impl MonotonicIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next identifier as a raw integer.
    pub fn next_value(&self) -> i64 {
        let now = Utc::now().timestamp_millis();
        let mut prev = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = if now > prev { now } else { prev + 1 };
            match self
                .last
                .compare_exchange_weak(prev, candidate, Ordering::AcqRel, Ordering::Relaxed)
            {
                Ok(_) => return candidate,
                Err(actual) => prev = actual,
            }
        }
    }

    /// Next identifier rendered as a decimal string.
    pub fn next_id(&self) -> String {
        self.next_value().to_string()
    }
}
