//! Pipeline configuration
//!
//! Latencies stand in for future backend calls; they serialize as
//! milliseconds so configs stay readable as JSON.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// How the two analysis stages are scheduled within one experiment run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageMode {
    /// Genomic analysis, then quantum simulation.
    #[default]
    Sequential,
    /// Both stages run as joined tasks. Result layout does not depend on
    /// completion order.
    Concurrent,
}

/// Configuration for the orchestrator and its stages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Simulated latency of the genomic analysis stage.
    #[serde(with = "duration_ms")]
    pub genomic_latency: Duration,
    /// Simulated latency of the quantum simulation stage.
    #[serde(with = "duration_ms")]
    pub simulation_latency: Duration,
    /// Latency of the monitor and stop control calls.
    #[serde(with = "duration_ms")]
    pub control_latency: Duration,
    /// Stage scheduling.
    pub stage_mode: StageMode,
    /// Seed for the random source. `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// Upper bound on concurrently running experiments.
    pub max_in_flight: Option<usize>,
    /// Upper bound on experiment results kept by the store.
    pub retention_limit: Option<usize>,
    /// Probability that a stage reports a simulated transient fault.
    pub fault_injection_rate: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            genomic_latency: Duration::from_millis(2000),
            simulation_latency: Duration::from_millis(3000),
            control_latency: Duration::from_millis(1000),
            stage_mode: StageMode::Sequential,
            seed: None,
            max_in_flight: None,
            retention_limit: None,
            fault_injection_rate: 0.0,
        }
    }
}

impl PipelineConfig {
    /// Create a builder starting from the defaults.
    #[must_use]
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }

    /// Zero-latency configuration with a fixed seed, for tests and demos.
    #[must_use]
    pub fn instant(seed: u64) -> Self {
        Self::builder()
            .genomic_latency(Duration::ZERO)
            .simulation_latency(Duration::ZERO)
            .control_latency(Duration::ZERO)
            .seed(seed)
            .build_unchecked()
    }

    /// Parse and validate a JSON configuration.
    ///
    /// Missing fields take their default values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] on malformed JSON and [`Error::Config`] if
    /// validation fails.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read, otherwise as
    /// [`PipelineConfig::from_json_str`].
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the fault rate is outside `[0, 1]` or a
    /// bound is zero.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.fault_injection_rate) {
            return Err(Error::Config(format!(
                "fault_injection_rate must be within [0, 1], got {}",
                self.fault_injection_rate
            )));
        }
        if self.max_in_flight == Some(0) {
            return Err(Error::Config("max_in_flight must be at least 1".into()));
        }
        if self.retention_limit == Some(0) {
            return Err(Error::Config("retention_limit must be at least 1".into()));
        }
        Ok(())
    }
}

/// Builder for `PipelineConfig`.
#[derive(Debug, Default)]
pub struct PipelineConfigBuilder {
    config: PipelineConfig,
}

impl PipelineConfigBuilder {
    /// Set the genomic stage latency.
    #[must_use]
    pub const fn genomic_latency(mut self, latency: Duration) -> Self {
        self.config.genomic_latency = latency;
        self
    }

    /// Set the simulation stage latency.
    #[must_use]
    pub const fn simulation_latency(mut self, latency: Duration) -> Self {
        self.config.simulation_latency = latency;
        self
    }

    /// Set the monitor/stop latency.
    #[must_use]
    pub const fn control_latency(mut self, latency: Duration) -> Self {
        self.config.control_latency = latency;
        self
    }

    /// Set the stage scheduling mode.
    #[must_use]
    pub const fn stage_mode(mut self, mode: StageMode) -> Self {
        self.config.stage_mode = mode;
        self
    }

    /// Seed the random source.
    #[must_use]
    pub const fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Bound the number of concurrently running experiments.
    #[must_use]
    pub const fn max_in_flight(mut self, limit: usize) -> Self {
        self.config.max_in_flight = Some(limit);
        self
    }

    /// Bound the number of stored experiment results.
    #[must_use]
    pub const fn retention_limit(mut self, limit: usize) -> Self {
        self.config.retention_limit = Some(limit);
        self
    }

    /// Set the simulated transient fault probability.
    #[must_use]
    pub const fn fault_injection_rate(mut self, rate: f64) -> Self {
        self.config.fault_injection_rate = rate;
        self
    }

    /// Validate and build the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if validation fails.
    pub fn build(self) -> Result<PipelineConfig> {
        self.config.validate()?;
        Ok(self.config)
    }

    fn build_unchecked(self) -> PipelineConfig {
        self.config
    }
}

mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documented_latencies() {
        let config = PipelineConfig::default();
        assert_eq!(config.genomic_latency, Duration::from_millis(2000));
        assert_eq!(config.simulation_latency, Duration::from_millis(3000));
        assert_eq!(config.control_latency, Duration::from_millis(1000));
        assert_eq!(config.stage_mode, StageMode::Sequential);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_json_partial_config() {
        let config =
            PipelineConfig::from_json_str(r#"{"genomic_latency": 5, "stage_mode": "concurrent"}"#)
                .unwrap();
        assert_eq!(config.genomic_latency, Duration::from_millis(5));
        assert_eq!(config.simulation_latency, Duration::from_millis(3000));
        assert_eq!(config.stage_mode, StageMode::Concurrent);
    }

    #[test]
    fn test_invalid_fault_rate_rejected() {
        let err = PipelineConfig::builder()
            .fault_injection_rate(1.5)
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_zero_bounds_rejected() {
        assert!(PipelineConfig::builder().max_in_flight(0).build().is_err());
        assert!(PipelineConfig::builder().retention_limit(0).build().is_err());
    }
}
