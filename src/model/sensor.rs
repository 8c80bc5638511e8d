//! Field sensor readings

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::random::RandomDataGenerator;

/// Quality below this flags a sensor for maintenance.
pub const MAINTENANCE_QUALITY_THRESHOLD: f64 = 0.9;

/// One snapshot of a sensor's channels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorMeasurements {
    /// Temperature in degrees Celsius.
    pub temperature: f64,
    /// Relative humidity in percent.
    pub humidity: f64,
    /// Volumetric soil moisture fraction, in `[0, 1]`.
    pub soil_moisture: f64,
    /// Light intensity in lux.
    pub light_intensity: f64,
}

/// A reading from a field sensor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    /// Reading ID.
    pub id: String,
    /// Physical sensor ID.
    pub sensor_id: String,
    /// When the reading was taken.
    pub timestamp: DateTime<Utc>,
    /// Channel values.
    pub measurements: SensorMeasurements,
    /// Data quality in `[0, 1]`.
    pub quality_indicator: f64,
}

impl SensorReading {
    /// Whether the reading's quality is below
    /// [`MAINTENANCE_QUALITY_THRESHOLD`].
    #[must_use]
    pub fn needs_maintenance(&self) -> bool {
        self.quality_indicator < MAINTENANCE_QUALITY_THRESHOLD
    }

    /// A later reading from the same sensor.
    ///
    /// Temperature and humidity drift by up to 0.5, soil moisture by up to
    /// 0.05 (clamped to `[0, 1]`), light intensity by up to 25 lux.
    #[must_use]
    pub fn refreshed(&self, gen: &mut RandomDataGenerator) -> Self {
        let m = self.measurements;
        Self {
            id: self.id.clone(),
            sensor_id: self.sensor_id.clone(),
            timestamp: Utc::now(),
            measurements: SensorMeasurements {
                temperature: gen.jitter(m.temperature, 0.5),
                humidity: gen.jitter(m.humidity, 0.5),
                soil_moisture: gen.jitter(m.soil_moisture, 0.05).clamp(0.0, 1.0),
                light_intensity: gen.jitter(m.light_intensity, 25.0),
            },
            quality_indicator: self.quality_indicator,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_needs_maintenance_threshold() {
        let mut r = reading(0.42);
        assert!(!r.needs_maintenance());
        r.quality_indicator = MAINTENANCE_QUALITY_THRESHOLD;
        assert!(!r.needs_maintenance());
        r.quality_indicator = 0.89;
        assert!(r.needs_maintenance());
        // Refreshing keeps the quality indicator.
        assert!(r.refreshed(&mut RandomDataGenerator::seeded(23)).needs_maintenance());
    }

    fn reading(soil_moisture: f64) -> SensorReading {
        SensorReading {
            id: "1".into(),
            sensor_id: "FIELD-001-TEMP".into(),
            timestamp: Utc::now(),
            measurements: SensorMeasurements {
                temperature: 25.4,
                humidity: 65.2,
                soil_moisture,
                light_intensity: 850.0,
            },
            quality_indicator: 0.95,
        }
    }

    #[test]
    fn test_refresh_stays_within_drift() {
        let mut gen = RandomDataGenerator::seeded(21);
        let base = reading(0.42);
        for _ in 0..200 {
            let next = base.refreshed(&mut gen);
            assert_eq!(next.sensor_id, base.sensor_id);
            assert!((next.measurements.temperature - 25.4).abs() <= 0.5);
            assert!((next.measurements.humidity - 65.2).abs() <= 0.5);
            assert!((next.measurements.light_intensity - 850.0).abs() <= 25.0);
        }
    }

    #[test]
    fn test_refresh_clamps_soil_moisture() {
        let mut gen = RandomDataGenerator::seeded(22);
        for base in [reading(0.0), reading(1.0)] {
            for _ in 0..200 {
                let m = base.refreshed(&mut gen).measurements.soil_moisture;
                assert!((0.0..=1.0).contains(&m));
            }
        }
    }
}
