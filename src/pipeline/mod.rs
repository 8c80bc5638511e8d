//! Pipeline stages and the orchestrator that sequences them
//!
//! ```text
//! ExperimentOrchestrator
//!   ├── AnalysisStage    (GeneAssembly     -> GenomicAnalysisResult)
//!   ├── SimulationStage  (ExperimentConfig -> QuantumSimulationResult)
//!   └── environmental series (24 hourly samples)
//!                        => ExperimentResult
//! ```
//!
//! Stages receive their own forked [`RandomDataGenerator`], so a seeded
//! orchestrator yields the same results whether stages run sequentially or
//! concurrently.

mod genomic;
mod orchestrator;
mod simulation;

use std::future::Future;

use crate::model::{ExperimentConfig, GeneAssembly, GenomicAnalysisResult, QuantumSimulationResult};
use crate::random::RandomDataGenerator;
use crate::Result;

pub use genomic::{
    generate_analysis, validate_assembly, GenomicAnalysisStage, GENE_EXPRESSION_COUNT, PATHWAYS,
    PHENOTYPES, REGULATORY_ELEMENTS, STRUCTURAL_VARIANT_COUNT,
};
pub use orchestrator::{environmental_series, ExperimentOrchestrator, ENVIRONMENTAL_SAMPLES};
pub use simulation::{
    generate_simulation, validate_config, QuantumSimulationStage, ENERGY_LANDSCAPE_LEN,
    SIMULATED_TRAITS, TIMEPOINTS,
};

/// Produces a genomic analysis for a gene assembly.
pub trait AnalysisStage: Send + Sync {
    /// Analyze `assembly`, drawing synthetic values from `gen`.
    fn analyze(
        &self,
        assembly: &GeneAssembly,
        gen: RandomDataGenerator,
    ) -> impl Future<Output = Result<GenomicAnalysisResult>> + Send;
}

/// Produces a quantum simulation for an experiment configuration.
pub trait SimulationStage: Send + Sync {
    /// Simulate `config`, drawing synthetic values from `gen`.
    fn simulate(
        &self,
        config: &ExperimentConfig,
        gen: RandomDataGenerator,
    ) -> impl Future<Output = Result<QuantumSimulationResult>> + Send;
}
