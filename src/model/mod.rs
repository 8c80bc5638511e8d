//! Pipeline data model
//!
//! ## Schema Overview
//!
//! ```text
//! ExperimentResult ──┬── ExperimentConfig   (by value)
//!                    ├── GeneAssembly       (by value)
//!                    ├── GenomicAnalysisResult?    [completed only]
//!                    ├── QuantumSimulationResult?  [completed only]
//!                    └── EnvironmentalData  [24 hourly samples per channel]
//! ```
//!
//! Sub-results are owned by value, never shared between experiments.

mod artifact;
mod assembly;
mod experiment_config;
mod experiment_result;
mod genomic;
mod sensor;
mod simulation;

pub use artifact::{ChartPoint, ChartSeries, PipelineArtifact};
pub use assembly::{GeneAssembly, GeneAssemblyBuilder, PredictedPerformance, ValidationStatus};
pub use experiment_config::{EnvironmentalParams, ExperimentConfig, ExperimentConfigBuilder};
pub use experiment_result::{
    EnvironmentalData, EnvironmentalMeasurements, ExperimentResult, ExperimentStatus, Transition,
    UNKNOWN_ERROR,
};
pub use genomic::{
    GenomicAnalysisResult, GenomicMetrics, PathwayScore, PhenotypePrediction, StructuralVariant,
    VariantType,
};
pub use sensor::{SensorMeasurements, SensorReading, MAINTENANCE_QUALITY_THRESHOLD};
pub use simulation::{
    OptimizationMetrics, QuantumMetrics, QuantumSimulationResult, SimulationTimepoint,
    TraitPrediction,
};
