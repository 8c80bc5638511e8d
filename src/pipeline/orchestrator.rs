//! Experiment orchestrator
//!
//! Runs the genomic and simulation stages, synthesizes the environmental
//! series and folds everything into one [`ExperimentResult`].

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tokio::sync::Semaphore;
use tokio::time::sleep;
use tracing::{debug, info, instrument, warn};

use super::{AnalysisStage, GenomicAnalysisStage, QuantumSimulationStage, SimulationStage};
use crate::config::{PipelineConfig, StageMode};
use crate::model::{
    EnvironmentalData, EnvironmentalMeasurements, ExperimentConfig, ExperimentResult, GeneAssembly,
};
use crate::random::RandomDataGenerator;
use crate::{Error, Result};

/// Hourly samples per environmental channel.
pub const ENVIRONMENTAL_SAMPLES: usize = 24;

const TEMPERATURE_NOISE: f64 = 1.0;
const HUMIDITY_NOISE: f64 = 2.5;
const SOIL_MOISTURE_BASE: f64 = 0.4;
const SOIL_MOISTURE_NOISE: f64 = 0.05;
const LIGHT_INTENSITY_BASE: f64 = 800.0;
const LIGHT_INTENSITY_NOISE: f64 = 50.0;

/// Sequences the pipeline stages into experiment results.
///
/// # Example
///
/// ```rust
/// use genomic_pipeline::config::PipelineConfig;
/// use genomic_pipeline::model::{ExperimentConfig, ExperimentStatus, GeneAssembly};
/// use genomic_pipeline::pipeline::ExperimentOrchestrator;
///
/// # async fn example() -> genomic_pipeline::Result<()> {
/// let orchestrator = ExperimentOrchestrator::new(PipelineConfig::instant(7))?;
/// let assembly = GeneAssembly::builder("1", "Drought v1")
///     .components(["DREB1A"])
///     .build();
/// let config = ExperimentConfig::new("exp-1", "Drought Study");
///
/// let result = orchestrator.run_experiment(&config, &assembly).await;
/// assert_eq!(result.status(), ExperimentStatus::Completed);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ExperimentOrchestrator<G = GenomicAnalysisStage, Q = QuantumSimulationStage> {
    genomic: G,
    simulation: Q,
    config: PipelineConfig,
    rng: Mutex<RandomDataGenerator>,
    permits: Option<Semaphore>,
}

impl ExperimentOrchestrator {
    /// Orchestrator with the built-in stages configured from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `config` fails validation.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        let genomic = GenomicAnalysisStage::from_config(&config);
        let simulation = QuantumSimulationStage::from_config(&config);
        Self::with_stages(config, genomic, simulation)
    }
}

impl<G: AnalysisStage, Q: SimulationStage> ExperimentOrchestrator<G, Q> {
    /// Orchestrator with caller-supplied stages.
    ///
    /// Stage latencies and fault rates are the stages' own; `config`
    /// supplies scheduling, seed, back-pressure and control latency.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `config` fails validation.
    pub fn with_stages(config: PipelineConfig, genomic: G, simulation: Q) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            genomic,
            simulation,
            rng: Mutex::new(RandomDataGenerator::from_seed_option(config.seed)),
            permits: config.max_in_flight.map(Semaphore::new),
            config,
        })
    }

    /// Get the pipeline configuration.
    #[must_use]
    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run one experiment, returning the structured stage error on failure.
    ///
    /// With `max_in_flight` set, waits for a free slot first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Stage`] naming the first failing stage. In
    /// concurrent mode a genomic failure takes precedence over a simulation
    /// failure.
    #[instrument(skip_all, fields(experiment_id = config.id(), assembly_id = assembly.id()))]
    pub async fn try_run_experiment(
        &self,
        config: &ExperimentConfig,
        assembly: &GeneAssembly,
    ) -> Result<ExperimentResult> {
        self.execute(config, assembly, Utc::now()).await
    }

    /// Run one experiment, never failing.
    ///
    /// A stage failure becomes a `Failed` result carrying the error's
    /// message; inspect [`ExperimentResult::status`] to tell them apart.
    #[instrument(skip_all, fields(experiment_id = config.id(), assembly_id = assembly.id()))]
    pub async fn run_experiment(
        &self,
        config: &ExperimentConfig,
        assembly: &GeneAssembly,
    ) -> ExperimentResult {
        let start = Utc::now();
        match self.execute(config, assembly, start).await {
            Ok(result) => result,
            Err(err) => self.failure_result(config, assembly, start, &err),
        }
    }

    /// Build the `Failed` result recorded for `err`.
    #[must_use]
    pub fn failure_result(
        &self,
        config: &ExperimentConfig,
        assembly: &GeneAssembly,
        start: DateTime<Utc>,
        err: &Error,
    ) -> ExperimentResult {
        warn!(experiment_id = config.id(), error = %err, "experiment failed");
        let id = self.rng.lock().identifier();
        ExperimentResult::failed(id, config.clone(), assembly.clone(), start, err.to_string())
    }

    /// Wait for the monitoring interval of experiment `id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for an empty ID.
    #[instrument(skip(self))]
    pub async fn monitor_experiment(&self, id: &str) -> Result<()> {
        require_id(id)?;
        sleep(self.config.control_latency).await;
        debug!("monitor interval elapsed");
        Ok(())
    }

    /// Wait for the stop interval of experiment `id`.
    ///
    /// In-flight stages are not cancelled; the caller applies the stop to
    /// its stored result afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for an empty ID.
    #[instrument(skip(self))]
    pub async fn stop_experiment(&self, id: &str) -> Result<()> {
        require_id(id)?;
        sleep(self.config.control_latency).await;
        debug!("stop interval elapsed");
        Ok(())
    }

    async fn execute(
        &self,
        config: &ExperimentConfig,
        assembly: &GeneAssembly,
        start: DateTime<Utc>,
    ) -> Result<ExperimentResult> {
        let _permit = match &self.permits {
            Some(permits) => Some(
                permits
                    .acquire()
                    .await
                    .map_err(|e| Error::Other(format!("experiment slots closed: {e}")))?,
            ),
            None => None,
        };

        // Fork in a fixed order so seeded runs are reproducible.
        let (mut id_gen, genomic_gen, simulation_gen, mut env_gen) = {
            let mut rng = self.rng.lock();
            (rng.fork(), rng.fork(), rng.fork(), rng.fork())
        };

        let (genomic, simulation) = match self.config.stage_mode {
            StageMode::Sequential => {
                let genomic = self.genomic.analyze(assembly, genomic_gen).await?;
                let simulation = self.simulation.simulate(config, simulation_gen).await?;
                (genomic, simulation)
            }
            StageMode::Concurrent => {
                let (genomic, simulation) = tokio::join!(
                    self.genomic.analyze(assembly, genomic_gen),
                    self.simulation.simulate(config, simulation_gen),
                );
                (genomic?, simulation?)
            }
        };

        let environmental = environmental_series(config, &mut env_gen);
        let result = ExperimentResult::completed(
            id_gen.identifier(),
            config.clone(),
            assembly.clone(),
            genomic,
            simulation,
            environmental,
            start,
        );
        info!(result_id = result.id(), "experiment completed");
        Ok(result)
    }
}

fn require_id(id: &str) -> Result<()> {
    if id.trim().is_empty() {
        return Err(Error::InvalidInput("experiment id must not be empty".into()));
    }
    Ok(())
}

/// Hourly environmental series around the config's baseline.
///
/// Temperature varies by up to 1.0 and humidity by up to 2.5 around the
/// configured values; soil moisture varies by up to 0.05 around 0.4 and
/// light intensity by up to 50 around 800.
pub fn environmental_series(
    config: &ExperimentConfig,
    gen: &mut RandomDataGenerator,
) -> EnvironmentalData {
    let params = config.environmental_params();
    let temperature = gen.series(ENVIRONMENTAL_SAMPLES, |g| {
        g.jitter(params.temperature, TEMPERATURE_NOISE)
    });
    let humidity = gen.series(ENVIRONMENTAL_SAMPLES, |g| {
        g.jitter(params.humidity, HUMIDITY_NOISE)
    });
    let soil_moisture = gen.series(ENVIRONMENTAL_SAMPLES, |g| {
        g.jitter(SOIL_MOISTURE_BASE, SOIL_MOISTURE_NOISE)
    });
    let light_intensity = gen.series(ENVIRONMENTAL_SAMPLES, |g| {
        g.jitter(LIGHT_INTENSITY_BASE, LIGHT_INTENSITY_NOISE)
    });

    EnvironmentalData {
        timestamp: Utc::now(),
        measurements: EnvironmentalMeasurements {
            temperature,
            humidity,
            soil_moisture,
            light_intensity,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EnvironmentalParams, ExperimentStatus};

    fn assembly() -> GeneAssembly {
        GeneAssembly::builder("1", "Enhanced Drought Assembly v1")
            .components(["DREB1A", "HSF3", "ABA1"])
            .build()
    }

    fn experiment() -> ExperimentConfig {
        ExperimentConfig::builder("exp-1", "Drought Resistance Study")
            .environmental_params(EnvironmentalParams::new(30.0, 45.0, "Sandy loam"))
            .duration_days(30)
            .build()
    }

    #[test]
    fn test_environmental_series_bounds() {
        let mut gen = RandomDataGenerator::seeded(30);
        let data = environmental_series(&experiment(), &mut gen);
        let m = &data.measurements;

        for channel in m.channels() {
            assert_eq!(channel.len(), ENVIRONMENTAL_SAMPLES);
        }
        assert!(m.temperature.iter().all(|t| (t - 30.0).abs() <= 1.0));
        assert!(m.humidity.iter().all(|h| (h - 45.0).abs() <= 2.5));
        assert!(m.soil_moisture.iter().all(|s| (s - 0.4).abs() <= 0.05));
        assert!(m.light_intensity.iter().all(|l| (l - 800.0).abs() <= 50.0));
    }

    #[tokio::test]
    async fn test_run_completes_with_linked_sub_results() {
        let orchestrator = ExperimentOrchestrator::new(PipelineConfig::instant(1)).unwrap();
        let result = orchestrator.run_experiment(&experiment(), &assembly()).await;

        assert_eq!(result.status(), ExperimentStatus::Completed);
        assert_eq!(result.genomic_analysis().unwrap().assembly_id(), "1");
        assert_eq!(result.simulation().unwrap().experiment_id(), "exp-1");
        assert!(result.error().is_none());
        assert!(result.end_time().unwrap() >= result.start_time());
    }

    #[tokio::test]
    async fn test_stage_failure_becomes_failed_result() {
        let orchestrator = ExperimentOrchestrator::new(PipelineConfig::instant(2)).unwrap();
        let result = orchestrator
            .run_experiment(&experiment(), &GeneAssembly::new("", "Nameless"))
            .await;

        assert_eq!(result.status(), ExperimentStatus::Failed);
        assert!(result.genomic_analysis().is_none());
        assert!(result.simulation().is_none());
        assert!(result.environmental_data().measurements.is_empty());
        assert!(result.error().unwrap().starts_with("genomic_analysis stage failed"));
    }

    #[tokio::test]
    async fn test_empty_id_rejected_by_controls() {
        let orchestrator = ExperimentOrchestrator::new(PipelineConfig::instant(3)).unwrap();
        assert!(matches!(
            orchestrator.monitor_experiment("").await,
            Err(Error::InvalidInput(_))
        ));
        assert!(orchestrator.stop_experiment("exp-1").await.is_ok());
    }
}
