//! Quantum Simulation Result - output of the quantum simulation stage

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Hardware-style quantum metrics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuantumMetrics {
    /// Coherence time in microseconds.
    pub coherence_time: f64,
    /// Gate error rate.
    pub gate_errors: f64,
    /// Quantum volume.
    pub quantum_volume: u32,
    /// Circuit depth in gates.
    pub circuit_depth: u32,
}

/// Optimizer metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationMetrics {
    /// Convergence rate.
    pub convergence_rate: f64,
    /// Energy landscape samples.
    pub energy_landscape: Vec<f64>,
    /// Speedup over a classical baseline.
    pub quantum_speedup: f64,
}

/// Predicted value for one trait.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraitPrediction {
    /// Trait name.
    #[serde(rename = "trait")]
    pub trait_name: String,
    /// Normalized value.
    pub value: f64,
    /// Uncertainty of the value.
    pub uncertainty: f64,
}

/// Trait predictions at one timepoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationTimepoint {
    /// Hours since experiment start.
    pub timepoint: u32,
    /// One prediction per simulated trait.
    pub predictions: Vec<TraitPrediction>,
}

impl SimulationTimepoint {
    /// Look up a trait prediction by name.
    #[must_use]
    pub fn prediction(&self, trait_name: &str) -> Option<&TraitPrediction> {
        self.predictions.iter().find(|p| p.trait_name == trait_name)
    }
}

/// Result of simulating one experiment configuration. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantumSimulationResult {
    id: String,
    experiment_id: String,
    timestamp: DateTime<Utc>,
    quantum_metrics: QuantumMetrics,
    optimization_metrics: OptimizationMetrics,
    results: Vec<SimulationTimepoint>,
}

impl QuantumSimulationResult {
    /// Assemble a result.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        experiment_id: impl Into<String>,
        timestamp: DateTime<Utc>,
        quantum_metrics: QuantumMetrics,
        optimization_metrics: OptimizationMetrics,
        results: Vec<SimulationTimepoint>,
    ) -> Self {
        Self {
            id: id.into(),
            experiment_id: experiment_id.into(),
            timestamp,
            quantum_metrics,
            optimization_metrics,
            results,
        }
    }

    /// Get the result ID.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the simulated experiment's ID.
    #[must_use]
    pub fn experiment_id(&self) -> &str {
        &self.experiment_id
    }

    /// Get the simulation timestamp.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Get the quantum metrics.
    #[must_use]
    pub const fn quantum_metrics(&self) -> QuantumMetrics {
        self.quantum_metrics
    }

    /// Get the optimization metrics.
    #[must_use]
    pub const fn optimization_metrics(&self) -> &OptimizationMetrics {
        &self.optimization_metrics
    }

    /// Get the per-timepoint predictions, ordered by timepoint.
    #[must_use]
    pub fn results(&self) -> &[SimulationTimepoint] {
        &self.results
    }

    /// Values of one trait across all timepoints.
    #[must_use]
    pub fn trait_series(&self, trait_name: &str) -> Vec<(u32, f64)> {
        self.results
            .iter()
            .filter_map(|t| t.prediction(trait_name).map(|p| (t.timepoint, p.value)))
            .collect()
    }
}
