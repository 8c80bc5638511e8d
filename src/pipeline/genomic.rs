//! Genomic analysis stage

use std::time::Duration;

use chrono::Utc;
use tokio::time::sleep;
use tracing::debug;

use super::AnalysisStage;
use crate::config::PipelineConfig;
use crate::error::StageKind;
use crate::model::{
    GeneAssembly, GenomicAnalysisResult, GenomicMetrics, PathwayScore, PhenotypePrediction,
    StructuralVariant, VariantType,
};
use crate::random::RandomDataGenerator;
use crate::{Error, Result};

/// Number of gene expression fold-change values per analysis.
pub const GENE_EXPRESSION_COUNT: usize = 10;

/// Number of structural variants per analysis.
pub const STRUCTURAL_VARIANT_COUNT: usize = 3;

/// Regulatory elements reported for every assembly.
pub const REGULATORY_ELEMENTS: [&str; 4] = [
    "Promoter_Region_1",
    "Enhancer_Element_A",
    "Silencer_Region_B",
    "TATA_Box_Modified",
];

/// Pathways scored for every assembly, in report order.
pub const PATHWAYS: [&str; 5] = [
    "Photosynthesis",
    "Stress Response",
    "Growth Regulation",
    "Nutrient Uptake",
    "Secondary Metabolism",
];

/// Predicted phenotypes with their probability and confidence floors.
/// Both values are drawn from `[floor, 1.0)`.
pub const PHENOTYPES: [(&str, f64, f64); 3] = [
    ("Drought Resistance", 0.7, 0.8),
    ("Growth Rate", 0.6, 0.7),
    ("Yield Improvement", 0.5, 0.6),
];

/// Analyzes gene assemblies after a fixed simulated latency.
#[derive(Debug, Clone)]
pub struct GenomicAnalysisStage {
    latency: Duration,
    fault_injection_rate: f64,
}

impl GenomicAnalysisStage {
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
            latency: config.genomic_latency,
            fault_injection_rate: config.fault_injection_rate,
        }
    }

    /// Get the simulated latency.
    #[must_use]
    pub const fn latency(&self) -> Duration {
        self.latency
    }
}

impl Default for GenomicAnalysisStage {
    fn default() -> Self {
        Self::from_config(&PipelineConfig::default())
    }
}

impl AnalysisStage for GenomicAnalysisStage {
    async fn analyze(
        &self,
        assembly: &GeneAssembly,
        mut gen: RandomDataGenerator,
    ) -> Result<GenomicAnalysisResult> {
        validate_assembly(assembly)?;
        debug!(assembly_id = assembly.id(), latency = ?self.latency, "genomic analysis started");
        sleep(self.latency).await;

        if gen.chance(self.fault_injection_rate) {
            return Err(Error::stage(
                StageKind::GenomicAnalysis,
                "simulated transient fault",
            ));
        }

        Ok(generate_analysis(assembly.id(), &mut gen))
    }
}

/// Reject assemblies the stage cannot analyze.
///
/// # Errors
///
/// Returns a genomic-analysis stage error for an empty ID or component list.
pub fn validate_assembly(assembly: &GeneAssembly) -> Result<()> {
    if assembly.id().trim().is_empty() {
        return Err(Error::stage(
            StageKind::GenomicAnalysis,
            "gene assembly has an empty id",
        ));
    }
    if assembly.components().is_empty() {
        return Err(Error::stage(
            StageKind::GenomicAnalysis,
            format!("gene assembly {} has no components", assembly.id()),
        ));
    }
    Ok(())
}

/// Synthesize an analysis for `assembly_id` without waiting.
pub fn generate_analysis(assembly_id: &str, gen: &mut RandomDataGenerator) -> GenomicAnalysisResult {
    let id = gen.identifier();
    let gene_expression = gen.series(GENE_EXPRESSION_COUNT, RandomDataGenerator::gene_expression);

    let pathway_enrichment = PATHWAYS
        .iter()
        .map(|pathway| PathwayScore {
            pathway: (*pathway).to_string(),
            score: gen.pathway_score(),
        })
        .collect();

    let structural_variants = (0..STRUCTURAL_VARIANT_COUNT)
        .map(|_| StructuralVariant {
            variant_type: *gen.pick(&VariantType::ALL),
            position: gen.variant_position(),
            impact: gen.variant_impact(),
        })
        .collect();

    let predictions = PHENOTYPES
        .iter()
        .map(|&(phenotype, probability_floor, confidence_floor)| PhenotypePrediction {
            phenotype: phenotype.to_string(),
            probability: gen.uniform(probability_floor..1.0),
            confidence: gen.uniform(confidence_floor..1.0),
        })
        .collect();

    GenomicAnalysisResult::new(
        id,
        assembly_id,
        Utc::now(),
        GenomicMetrics {
            gene_expression,
            regulatory_elements: REGULATORY_ELEMENTS.iter().map(|s| (*s).to_string()).collect(),
            pathway_enrichment,
            structural_variants,
        },
        predictions,
    )
}
