//! Error types for the genomic pipeline
//!
//! Stage failures carry a structured cause (which stage, what went wrong)
//! so the orchestrator boundary never has to stringify an opaque error.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Pipeline stage that produced a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    /// Genomic analysis of a gene assembly
    GenomicAnalysis,
    /// Quantum simulation of an experiment configuration
    QuantumSimulation,
}

impl StageKind {
    /// Stable snake_case name used in logs and error messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GenomicAnalysis => "genomic_analysis",
            Self::QuantumSimulation => "quantum_simulation",
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Genomic pipeline error types
#[derive(Error, Debug)]
pub enum Error {
    /// A pipeline stage failed
    #[error("{stage} stage failed: {message}")]
    Stage {
        /// Stage that failed
        stage: StageKind,
        /// Human-readable cause
        message: String,
    },

    /// Caller supplied an unusable value
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration rejected by validation
    #[error("Invalid pipeline configuration: {0}")]
    Config(String),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Build a stage failure.
    pub fn stage(stage: StageKind, message: impl Into<String>) -> Self {
        Self::Stage {
            stage,
            message: message.into(),
        }
    }

    /// Whether this error originated inside a pipeline stage.
    #[must_use]
    pub const fn is_stage_failure(&self) -> bool {
        matches!(self, Self::Stage { .. })
    }

    /// The failing stage, if this is a stage failure.
    #[must_use]
    pub const fn failed_stage(&self) -> Option<StageKind> {
        match self {
            Self::Stage { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}
