//! Quantum simulation stage

use std::time::Duration;

use chrono::Utc;
use tokio::time::sleep;
use tracing::debug;

use super::SimulationStage;
use crate::config::PipelineConfig;
use crate::error::StageKind;
use crate::model::{
    ExperimentConfig, OptimizationMetrics, QuantumMetrics, QuantumSimulationResult,
    SimulationTimepoint, TraitPrediction,
};
use crate::random::RandomDataGenerator;
use crate::{Error, Result};

/// Simulated timepoints, in hours.
pub const TIMEPOINTS: [u32; 5] = [0, 24, 48, 72, 96];

/// Traits predicted at every timepoint, in report order.
pub const SIMULATED_TRAITS: [&str; 3] = ["growth_rate", "stress_tolerance", "nutrient_efficiency"];

/// Number of energy landscape samples.
pub const ENERGY_LANDSCAPE_LEN: usize = 10;

/// Simulates experiment configurations after a fixed simulated latency.
#[derive(Debug, Clone)]
pub struct QuantumSimulationStage {
    latency: Duration,
    fault_injection_rate: f64,
}

impl QuantumSimulationStage {
    /// Stage with the given latency and no fault injection.
    #[must_use]
    pub const fn new(latency: Duration) -> Self {
        Self {
            latency,
            fault_injection_rate: 0.0,
        }
    }

    /// Stage configured from the pipeline settings.
    #[must_use]
    pub const fn from_config(config: &PipelineConfig) -> Self {
        Self {
            latency: config.simulation_latency,
            fault_injection_rate: config.fault_injection_rate,
        }
    }

    /// Get the simulated latency.
    #[must_use]
    pub const fn latency(&self) -> Duration {
        self.latency
    }
}

impl Default for QuantumSimulationStage {
    fn default() -> Self {
        Self::from_config(&PipelineConfig::default())
    }
}

impl SimulationStage for QuantumSimulationStage {
    async fn simulate(
        &self,
        config: &ExperimentConfig,
        mut gen: RandomDataGenerator,
    ) -> Result<QuantumSimulationResult> {
        validate_config(config)?;
        debug!(experiment_id = config.id(), latency = ?self.latency, "quantum simulation started");
        sleep(self.latency).await;

        if gen.chance(self.fault_injection_rate) {
            return Err(Error::stage(
                StageKind::QuantumSimulation,
                "simulated transient fault",
            ));
        }

        Ok(generate_simulation(config.id(), &mut gen))
    }
}

/// Reject configurations the stage cannot simulate.
///
/// # Errors
///
/// Returns a quantum-simulation stage error for an empty ID or a zero
/// duration.
pub fn validate_config(config: &ExperimentConfig) -> Result<()> {
    if config.id().trim().is_empty() {
        return Err(Error::stage(
            StageKind::QuantumSimulation,
            "experiment config has an empty id",
        ));
    }
    if config.duration_days() == 0 {
        return Err(Error::stage(
            StageKind::QuantumSimulation,
            format!("experiment {} has a zero duration", config.id()),
        ));
    }
    Ok(())
}

/// Synthesize a simulation for `experiment_id` without waiting.
pub fn generate_simulation(
    experiment_id: &str,
    gen: &mut RandomDataGenerator,
) -> QuantumSimulationResult {
    let id = gen.identifier();

    let quantum_metrics = QuantumMetrics {
        coherence_time: gen.coherence_time(),
        gate_errors: gen.gate_error(),
        quantum_volume: gen.quantum_volume(),
        circuit_depth: gen.circuit_depth(),
    };

    let optimization_metrics = OptimizationMetrics {
        convergence_rate: gen.convergence_rate(),
        energy_landscape: gen.series(ENERGY_LANDSCAPE_LEN, RandomDataGenerator::energy),
        quantum_speedup: gen.speedup(),
    };

    let results = TIMEPOINTS
        .iter()
        .map(|&timepoint| SimulationTimepoint {
            timepoint,
            predictions: SIMULATED_TRAITS
                .iter()
                .map(|name| TraitPrediction {
                    trait_name: (*name).to_string(),
                    value: gen.trait_value(),
                    uncertainty: gen.uncertainty(),
                })
                .collect(),
        })
        .collect();

    QuantumSimulationResult::new(
        id,
        experiment_id,
        Utc::now(),
        quantum_metrics,
        optimization_metrics,
        results,
    )
}
