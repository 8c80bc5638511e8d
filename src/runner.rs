//! Pipeline runner - binds an orchestrator to a shared store
//!
//! Presentation code holds a runner and reads the store it exposes; the
//! runner is the only writer of pipeline outcomes.

use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info};

use crate::config::PipelineConfig;
use crate::model::{ExperimentConfig, ExperimentResult, GeneAssembly};
use crate::pipeline::{
    AnalysisStage, ExperimentOrchestrator, GenomicAnalysisStage, QuantumSimulationStage,
    SimulationStage,
};
use crate::store::PipelineStateStore;
use crate::Result;

/// Drives experiments through an orchestrator and records outcomes.
#[derive(Debug)]
pub struct PipelineRunner<G = GenomicAnalysisStage, Q = QuantumSimulationStage> {
    orchestrator: Arc<ExperimentOrchestrator<G, Q>>,
    store: Arc<PipelineStateStore>,
}

impl<G, Q> Clone for PipelineRunner<G, Q> {
    fn clone(&self) -> Self {
        Self {
            orchestrator: Arc::clone(&self.orchestrator),
            store: Arc::clone(&self.store),
        }
    }
}

impl PipelineRunner {
    /// Runner with the built-in stages and a fresh store honouring the
    /// configured retention limit.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Config`] if `config` fails validation.
    pub fn from_config(config: PipelineConfig) -> Result<Self> {
        let store = Arc::new(PipelineStateStore::with_retention_limit(
            config.retention_limit,
        ));
        let orchestrator = Arc::new(ExperimentOrchestrator::new(config)?);
        Ok(Self::new(orchestrator, store))
    }
}

impl<G: AnalysisStage, Q: SimulationStage> PipelineRunner<G, Q> {
    /// Runner over an existing orchestrator and store.
    #[must_use]
    pub const fn new(
        orchestrator: Arc<ExperimentOrchestrator<G, Q>>,
        store: Arc<PipelineStateStore>,
    ) -> Self {
        Self {
            orchestrator,
            store,
        }
    }

    /// Shared store written by this runner.
    #[must_use]
    pub const fn store(&self) -> &Arc<PipelineStateStore> {
        &self.store
    }

    /// Orchestrator used by this runner.
    #[must_use]
    pub const fn orchestrator(&self) -> &Arc<ExperimentOrchestrator<G, Q>> {
        &self.orchestrator
    }

    /// Run one experiment and record it, then monitor it.
    ///
    /// A stage failure is stored as a `Failed` result and its message
    /// becomes the store error. Monitoring runs after failed runs too. A
    /// monitor failure sets the store error to
    /// `Failed to monitor experiment: <reason>` unless a stage error is
    /// already recorded for this run. The returned result is the one that
    /// was stored.
    pub async fn start_pipeline(
        &self,
        config: &ExperimentConfig,
        assembly: &GeneAssembly,
    ) -> ExperimentResult {
        self.store.begin();
        let start = Utc::now();

        let (result, stage_failed) =
            match self.orchestrator.try_run_experiment(config, assembly).await {
                Ok(result) => {
                    self.store.succeed(result.clone());
                    (result, false)
                }
                Err(err) => {
                    let result = self.orchestrator.failure_result(config, assembly, start, &err);
                    self.store.fail_run(result.clone(), err.to_string());
                    (result, true)
                }
            };

        if let Err(err) = self.orchestrator.monitor_experiment(config.id()).await {
            error!(experiment_id = config.id(), error = %err, "monitoring failed");
            if !stage_failed {
                self.store.fail(format!("Failed to monitor experiment: {err}"));
            }
        }
        result
    }

    /// Stop experiment `id` and record it as `Stopped`.
    ///
    /// Returns whether the stored status changed; unknown IDs and results
    /// already in a terminal status leave the store untouched.
    ///
    /// # Errors
    ///
    /// Returns the orchestrator's error for an unusable ID; the store is
    /// unchanged in that case.
    pub async fn stop_pipeline(&self, id: &str) -> Result<bool> {
        self.orchestrator.stop_experiment(id).await?;
        let changed = self.store.mark_stopped(id);
        info!(experiment_id = id, changed, "stop applied");
        Ok(changed)
    }

    /// Dismiss the last error.
    pub fn clear_error(&self) {
        self.store.clear_error();
    }
}
