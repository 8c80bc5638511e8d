//! # genomic-pipeline: Mock Genomic Analysis and Simulation Pipeline
//!
//! Orchestrates a genomic analysis stage and a quantum simulation stage
//! into experiment results, and keeps them in an in-memory state store for
//! presentation code to read.
//!
//! Every value is synthetic: stages wait a fixed latency standing in for a
//! backend call, then draw results from a seedable random source.
//!
//! ## Components
//!
//! - [`random::RandomDataGenerator`]: ranged synthetic values per domain
//! - [`pipeline::GenomicAnalysisStage`] / [`pipeline::QuantumSimulationStage`]
//! - [`pipeline::ExperimentOrchestrator`]: stages + environmental series
//!   into one [`model::ExperimentResult`]
//! - [`store::PipelineStateStore`]: results, processing flag, last error
//! - [`runner::PipelineRunner`]: records orchestrator outcomes in the store
//!
//! ## Example Usage
//!
//! ```rust
//! use genomic_pipeline::config::PipelineConfig;
//! use genomic_pipeline::runner::PipelineRunner;
//! use genomic_pipeline::seed;
//!
//! # async fn example() -> genomic_pipeline::Result<()> {
//! let runner = PipelineRunner::from_config(PipelineConfig::instant(42))?;
//! let assembly = &seed::gene_assemblies()[0];
//! let config = &seed::experiment_configs()[0];
//!
//! let result = runner.start_pipeline(config, assembly).await;
//! assert_eq!(runner.store().experiments()[0].id(), result.id());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod random;
pub mod runner;
pub mod seed;
pub mod store;

pub use error::{Error, Result, StageKind};
