//! Experiment Config - parameters governing one pipeline run

use serde::{Deserialize, Serialize};

/// Baseline environmental conditions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentalParams {
    /// Temperature in degrees Celsius.
    pub temperature: f64,
    /// Relative humidity in percent.
    pub humidity: f64,
    /// Free-form soil description.
    pub soil_conditions: String,
}

impl EnvironmentalParams {
    /// Build a parameter set.
    #[must_use]
    pub fn new(temperature: f64, humidity: f64, soil_conditions: impl Into<String>) -> Self {
        Self {
            temperature,
            humidity,
            soil_conditions: soil_conditions.into(),
        }
    }
}

impl Default for EnvironmentalParams {
    fn default() -> Self {
        Self::new(25.0, 60.0, "Loam")
    }
}

/// Experiment configuration, immutable once submitted to the orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentConfig {
    id: String,
    name: String,
    environmental_params: EnvironmentalParams,
    duration_days: u32,
    sampling_frequency: u32,
    baseline_genotypes: Vec<String>,
    target_traits: Vec<String>,
}

impl ExperimentConfig {
    /// Create a config with default environment, 30 days, daily sampling.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        ExperimentConfigBuilder::new(id, name).build()
    }

    /// Create a builder for a config with optional fields.
    #[must_use]
    pub fn builder(id: impl Into<String>, name: impl Into<String>) -> ExperimentConfigBuilder {
        ExperimentConfigBuilder::new(id, name)
    }

    /// Get the experiment ID.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the experiment name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the baseline environment.
    #[must_use]
    pub const fn environmental_params(&self) -> &EnvironmentalParams {
        &self.environmental_params
    }

    /// Get the duration in days.
    #[must_use]
    pub const fn duration_days(&self) -> u32 {
        self.duration_days
    }

    /// Get the sampling frequency (samples per day).
    #[must_use]
    pub const fn sampling_frequency(&self) -> u32 {
        self.sampling_frequency
    }

    /// Get the baseline genotypes.
    #[must_use]
    pub fn baseline_genotypes(&self) -> &[String] {
        &self.baseline_genotypes
    }

    /// Get the target traits.
    #[must_use]
    pub fn target_traits(&self) -> &[String] {
        &self.target_traits
    }
}

/// Builder for `ExperimentConfig`.
#[derive(Debug)]
pub struct ExperimentConfigBuilder {
    id: String,
    name: String,
    environmental_params: EnvironmentalParams,
    duration_days: u32,
    sampling_frequency: u32,
    baseline_genotypes: Vec<String>,
    target_traits: Vec<String>,
}

impl ExperimentConfigBuilder {
    /// Create a new builder with required fields.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            environmental_params: EnvironmentalParams::default(),
            duration_days: 30,
            sampling_frequency: 24,
            baseline_genotypes: Vec::new(),
            target_traits: Vec::new(),
        }
    }

    /// Set the baseline environment.
    #[must_use]
    pub fn environmental_params(mut self, params: EnvironmentalParams) -> Self {
        self.environmental_params = params;
        self
    }

    /// Set the duration in days.
    #[must_use]
    pub const fn duration_days(mut self, days: u32) -> Self {
        self.duration_days = days;
        self
    }

    /// Set the sampling frequency.
    #[must_use]
    pub const fn sampling_frequency(mut self, frequency: u32) -> Self {
        self.sampling_frequency = frequency;
        self
    }

    /// Set the baseline genotypes.
    #[must_use]
    pub fn baseline_genotypes<I, S>(mut self, genotypes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.baseline_genotypes = genotypes.into_iter().map(Into::into).collect();
        self
    }

    /// Set the target traits.
    #[must_use]
    pub fn target_traits<I, S>(mut self, traits: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.target_traits = traits.into_iter().map(Into::into).collect();
        self
    }

    /// Build the `ExperimentConfig`.
    #[must_use]
    pub fn build(self) -> ExperimentConfig {
        ExperimentConfig {
            id: self.id,
            name: self.name,
            environmental_params: self.environmental_params,
            duration_days: self.duration_days,
            sampling_frequency: self.sampling_frequency,
            baseline_genotypes: self.baseline_genotypes,
            target_traits: self.target_traits,
        }
    }
}
