//! Genomic Analysis Result - output of the genomic analysis stage

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of structural variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VariantType {
    /// Inserted sequence.
    Insertion,
    /// Deleted sequence.
    Deletion,
    /// Inverted sequence.
    Inversion,
}

impl VariantType {
    /// All variant types, in declaration order.
    pub const ALL: [Self; 3] = [Self::Insertion, Self::Deletion, Self::Inversion];
}

/// Enrichment score for a named pathway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathwayScore {
    /// Pathway name.
    pub pathway: String,
    /// Score in `[0.5, 1.0)`.
    pub score: f64,
}

/// A structural variant record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuralVariant {
    /// Variant kind.
    #[serde(rename = "type")]
    pub variant_type: VariantType,
    /// Position in `[0, 1_000_000)`.
    pub position: u64,
    /// Impact in `[0, 1)`.
    pub impact: f64,
}

/// Probability and confidence for one phenotype.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhenotypePrediction {
    /// Phenotype name.
    pub phenotype: String,
    /// Probability the phenotype is expressed.
    pub probability: f64,
    /// Confidence in the probability.
    pub confidence: f64,
}

/// Metric bundle of a genomic analysis.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GenomicMetrics {
    /// Gene expression fold-change values.
    pub gene_expression: Vec<f64>,
    /// Regulatory element labels.
    pub regulatory_elements: Vec<String>,
    /// Pathway enrichment scores.
    pub pathway_enrichment: Vec<PathwayScore>,
    /// Structural variants.
    pub structural_variants: Vec<StructuralVariant>,
}

/// Result of analyzing one gene assembly. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenomicAnalysisResult {
    id: String,
    assembly_id: String,
    timestamp: DateTime<Utc>,
    metrics: GenomicMetrics,
    predictions: Vec<PhenotypePrediction>,
}

impl GenomicAnalysisResult {
    /// Assemble a result.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        assembly_id: impl Into<String>,
        timestamp: DateTime<Utc>,
        metrics: GenomicMetrics,
        predictions: Vec<PhenotypePrediction>,
    ) -> Self {
        Self {
            id: id.into(),
            assembly_id: assembly_id.into(),
            timestamp,
            metrics,
            predictions,
        }
    }

    /// Get the result ID.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the analyzed assembly's ID.
    #[must_use]
    pub fn assembly_id(&self) -> &str {
        &self.assembly_id
    }

    /// Get the analysis timestamp.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Get the metric bundle.
    #[must_use]
    pub const fn metrics(&self) -> &GenomicMetrics {
        &self.metrics
    }

    /// Get the phenotype predictions.
    #[must_use]
    pub fn predictions(&self) -> &[PhenotypePrediction] {
        &self.predictions
    }

    /// Look up a pathway score by name.
    #[must_use]
    pub fn pathway_score(&self, pathway: &str) -> Option<f64> {
        self.metrics
            .pathway_enrichment
            .iter()
            .find(|p| p.pathway == pathway)
            .map(|p| p.score)
    }
}
