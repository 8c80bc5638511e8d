//! Tagged union over the three result shapes, projected into chart series
//! for presentation code.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ExperimentResult, GenomicAnalysisResult, QuantumSimulationResult};

/// A point on a chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    /// Horizontal coordinate (index or hour).
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

/// A labelled series of points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    /// Series label.
    pub label: String,
    /// Points in x order.
    pub points: Vec<ChartPoint>,
}

impl ChartSeries {
    #[allow(clippy::cast_precision_loss)]
    fn indexed(label: impl Into<String>, values: &[f64]) -> Self {
        Self {
            label: label.into(),
            points: values
                .iter()
                .enumerate()
                .map(|(i, &y)| ChartPoint { x: i as f64, y })
                .collect(),
        }
    }
}

/// Any pipeline-produced result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "result", rename_all = "snake_case")]
pub enum PipelineArtifact {
    /// Output of the genomic analysis stage.
    GenomicAnalysis(GenomicAnalysisResult),
    /// Output of the quantum simulation stage.
    QuantumSimulation(QuantumSimulationResult),
    /// Output of a full orchestrator run.
    Experiment(ExperimentResult),
}

impl PipelineArtifact {
    /// ID of the wrapped result.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::GenomicAnalysis(r) => r.id(),
            Self::QuantumSimulation(r) => r.id(),
            Self::Experiment(r) => r.id(),
        }
    }

    /// When the wrapped result was produced.
    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::GenomicAnalysis(r) => r.timestamp(),
            Self::QuantumSimulation(r) => r.timestamp(),
            Self::Experiment(r) => r.end_time().unwrap_or_else(|| r.start_time()),
        }
    }

    /// Chartable series for the wrapped result.
    ///
    /// Genomic analyses chart expression and pathway scores by index,
    /// simulations chart each trait by hour plus the energy landscape, and
    /// experiments chart their four environmental channels by hour.
    #[must_use]
    pub fn chart_series(&self) -> Vec<ChartSeries> {
        match self {
            Self::GenomicAnalysis(r) => {
                let metrics = r.metrics();
                let scores: Vec<f64> = metrics.pathway_enrichment.iter().map(|p| p.score).collect();
                vec![
                    ChartSeries::indexed("gene_expression", &metrics.gene_expression),
                    ChartSeries::indexed("pathway_enrichment", &scores),
                ]
            }
            Self::QuantumSimulation(r) => {
                let mut labels: Vec<&str> = Vec::new();
                for timepoint in r.results() {
                    for p in &timepoint.predictions {
                        if !labels.contains(&p.trait_name.as_str()) {
                            labels.push(&p.trait_name);
                        }
                    }
                }
                let mut series: Vec<ChartSeries> = labels
                    .into_iter()
                    .map(|label| ChartSeries {
                        label: label.to_string(),
                        points: r
                            .trait_series(label)
                            .into_iter()
                            .map(|(hour, y)| ChartPoint {
                                x: f64::from(hour),
                                y,
                            })
                            .collect(),
                    })
                    .collect();
                series.push(ChartSeries::indexed(
                    "energy_landscape",
                    &r.optimization_metrics().energy_landscape,
                ));
                series
            }
            Self::Experiment(r) => {
                let m = &r.environmental_data().measurements;
                ["temperature", "humidity", "soil_moisture", "light_intensity"]
                    .into_iter()
                    .zip(m.channels())
                    .map(|(label, values)| ChartSeries::indexed(label, values))
                    .collect()
            }
        }
    }
}

impl From<GenomicAnalysisResult> for PipelineArtifact {
    fn from(result: GenomicAnalysisResult) -> Self {
        Self::GenomicAnalysis(result)
    }
}

impl From<QuantumSimulationResult> for PipelineArtifact {
    fn from(result: QuantumSimulationResult) -> Self {
        Self::QuantumSimulation(result)
    }
}

impl From<ExperimentResult> for PipelineArtifact {
    fn from(result: ExperimentResult) -> Self {
        Self::Experiment(result)
    }
}
