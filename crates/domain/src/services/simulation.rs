//! Simulated sensor readings.
//!
//! The dashboard has no live hardware feed; chart series are drawn from
//! uniform ranges typical for a greenhouse.

use rand::Rng;
use std::ops::Range;

use crate::models::dashboard::{ChartPeriod, SensorSeries};

pub const TEMPERATURE_RANGE: Range<f64> = 22.0..27.0;
pub const HUMIDITY_RANGE: Range<f64> = 60.0..70.0;
pub const CO2_RANGE: Range<f64> = 700.0..900.0;

/// Generates one chart series for `period`.
pub fn simulate_series<R: Rng + ?Sized>(period: ChartPeriod, rng: &mut R) -> SensorSeries {
    let points = period.points();
    let mut series = SensorSeries {
        labels: Vec::with_capacity(points),
        temperature: Vec::with_capacity(points),
        humidity: Vec::with_capacity(points),
        co2: Vec::with_capacity(points),
    };

    for i in 0..points {
        series.labels.push(period.label(i));
        series.temperature.push(round1(rng.gen_range(TEMPERATURE_RANGE)));
        series.humidity.push(round1(rng.gen_range(HUMIDITY_RANGE)));
        series.co2.push(round1(rng.gen_range(CO2_RANGE)));
    }

    series
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_daily_series_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let series = simulate_series(ChartPeriod::Daily, &mut rng);
        assert_eq!(series.labels.len(), 24);
        assert_eq!(series.temperature.len(), 24);
        assert_eq!(series.humidity.len(), 24);
        assert_eq!(series.co2.len(), 24);
        assert_eq!(series.labels[0], "0:00");
        assert_eq!(series.labels[23], "23:00");
    }

    #[test]
    fn test_series_values_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for period in [ChartPeriod::Daily, ChartPeriod::Weekly, ChartPeriod::Monthly] {
            let series = simulate_series(period, &mut rng);
            assert_eq!(series.labels.len(), period.points());
            assert!(series.temperature.iter().all(|v| (22.0..=27.0).contains(v)));
            assert!(series.humidity.iter().all(|v| (60.0..=70.0).contains(v)));
            assert!(series.co2.iter().all(|v| (700.0..=900.0).contains(v)));
        }
    }

    #[test]
    fn test_same_seed_same_series() {
        let a = simulate_series(ChartPeriod::Weekly, &mut StdRng::seed_from_u64(1));
        let b = simulate_series(ChartPeriod::Weekly, &mut StdRng::seed_from_u64(1));
        assert_eq!(a, b);
    }
}
