//! Built-in seed data
//!
//! State is volatile; every process starts from these fixed lists.

use chrono::{DateTime, TimeZone, Utc};

use crate::model::{
    EnvironmentalParams, ExperimentConfig, GeneAssembly, PredictedPerformance, SensorMeasurements,
    SensorReading, ValidationStatus,
};

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap_or_default()
}

/// The built-in gene assemblies.
#[must_use]
pub fn gene_assemblies() -> Vec<GeneAssembly> {
    vec![
        GeneAssembly::builder("1", "Enhanced Drought Assembly v1")
            .components(["DREB1A", "HSF3", "ABA1"])
            .predicted_performance(PredictedPerformance::new(0.85, 0.92, 0.88))
            .validation_status(ValidationStatus::Validated)
            .created_at(at(2025, 2, 28, 10, 0))
            .updated_at(at(2025, 2, 28, 14, 30))
            .build(),
        GeneAssembly::builder("2", "Salt Resistance Assembly v2")
            .components(["SOS1", "NHX1", "HKT1"])
            .predicted_performance(PredictedPerformance::new(0.78, 0.85, 0.82))
            .validation_status(ValidationStatus::InProgress)
            .created_at(at(2025, 2, 28, 11, 0))
            .updated_at(at(2025, 2, 28, 15, 30))
            .build(),
    ]
}

/// The built-in experiment configurations.
#[must_use]
pub fn experiment_configs() -> Vec<ExperimentConfig> {
    vec![
        ExperimentConfig::builder("1", "Drought Resistance Study")
            .environmental_params(EnvironmentalParams::new(30.0, 45.0, "Sandy loam"))
            .duration_days(30)
            .sampling_frequency(24)
            .baseline_genotypes(["WT-Col-0", "drought-1"])
            .target_traits(["water-use-efficiency", "root-depth"])
            .build(),
        ExperimentConfig::builder("2", "Salt Tolerance Analysis")
            .environmental_params(EnvironmentalParams::new(28.0, 60.0, "Saline"))
            .duration_days(45)
            .sampling_frequency(12)
            .baseline_genotypes(["WT-Col-0", "salt-1"])
            .target_traits(["ion-homeostasis", "growth-rate"])
            .build(),
    ]
}

/// The built-in field sensor readings, stamped now.
#[must_use]
pub fn sensor_readings() -> Vec<SensorReading> {
    let now = Utc::now();
    vec![
        SensorReading {
            id: "1".into(),
            sensor_id: "FIELD-001-TEMP".into(),
            timestamp: now,
            measurements: SensorMeasurements {
                temperature: 25.4,
                humidity: 65.2,
                soil_moisture: 0.42,
                light_intensity: 850.0,
            },
            quality_indicator: 0.95,
        },
        SensorReading {
            id: "2".into(),
            sensor_id: "FIELD-002-TEMP".into(),
            timestamp: now,
            measurements: SensorMeasurements {
                temperature: 26.1,
                humidity: 62.8,
                soil_moisture: 0.38,
                light_intensity: 820.0,
            },
            quality_indicator: 0.92,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_assemblies() {
        let assemblies = gene_assemblies();
        assert_eq!(assemblies.len(), 2);
        assert_eq!(assemblies[0].components(), ["DREB1A", "HSF3", "ABA1"]);
        assert!(assemblies.iter().all(|a| a.predicted_performance().is_normalized()));
        assert!(assemblies[0].updated_at() > assemblies[0].created_at());
    }

    #[test]
    fn test_seed_configs_are_simulatable() {
        for config in experiment_configs() {
            assert!(crate::pipeline::validate_config(&config).is_ok());
        }
    }

    #[test]
    fn test_seed_sensors_are_healthy() {
        let readings = sensor_readings();
        assert_eq!(readings.len(), 2);
        assert!(readings.iter().all(|r| !r.needs_maintenance()));
    }
}
