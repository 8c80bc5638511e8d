//! Experiment Result - terminal artifact of one orchestrator run

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ExperimentConfig, GeneAssembly, GenomicAnalysisResult, QuantumSimulationResult};

/// Message used when a failure carries no description.
pub const UNKNOWN_ERROR: &str = "Unknown error occurred";

/// Status of an experiment result.
///
/// Allowed transitions: `Running -> {Completed, Failed, Stopped}`. A
/// transition to the current status is a no-op; every other transition is
/// rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperimentStatus {
    /// Stages still in flight.
    Running,
    /// Both stages produced results.
    Completed,
    /// A stage failed.
    Failed,
    /// Stopped on request before completing.
    Stopped,
}

impl ExperimentStatus {
    /// Whether no further transition is allowed out of this status.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Running)
    }

    /// Whether `self -> next` is in the transition table (self-loops excluded).
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Running, Self::Completed | Self::Failed | Self::Stopped)
        )
    }
}

impl fmt::Display for ExperimentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Stopped => "stopped",
        };
        f.write_str(name)
    }
}

/// Outcome of a status transition request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Status changed and the end timestamp was stamped.
    Applied,
    /// Already in the requested status; nothing changed.
    Unchanged,
    /// Not in the transition table; nothing changed.
    Rejected {
        /// Status at the time of the request.
        from: ExperimentStatus,
    },
}

impl Transition {
    /// Whether the status actually changed.
    #[must_use]
    pub const fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Hourly environmental measurement channels.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EnvironmentalMeasurements {
    /// Temperature in degrees Celsius.
    pub temperature: Vec<f64>,
    /// Relative humidity in percent.
    pub humidity: Vec<f64>,
    /// Volumetric soil moisture fraction.
    pub soil_moisture: Vec<f64>,
    /// Light intensity in lux.
    pub light_intensity: Vec<f64>,
}

impl EnvironmentalMeasurements {
    /// Whether every channel is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.channels().iter().all(|c| c.is_empty())
    }

    /// The four channels in a fixed order: temperature, humidity, soil
    /// moisture, light intensity.
    #[must_use]
    pub fn channels(&self) -> [&[f64]; 4] {
        [
            self.temperature.as_slice(),
            self.humidity.as_slice(),
            self.soil_moisture.as_slice(),
            self.light_intensity.as_slice(),
        ]
    }
}

/// Environmental time series attached to an experiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentalData {
    /// When the series was generated.
    pub timestamp: DateTime<Utc>,
    /// Measurement channels.
    pub measurements: EnvironmentalMeasurements,
}

impl EnvironmentalData {
    /// A series with no samples.
    #[must_use]
    pub fn empty(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            measurements: EnvironmentalMeasurements::default(),
        }
    }
}

/// Aggregate result of one experiment run.
///
/// A `Completed` result carries both sub-results and no error. A `Failed`
/// result carries neither sub-result, an empty environmental series and a
/// non-empty error message. Only the status and end timestamp change after
/// creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentResult {
    id: String,
    experiment_config: ExperimentConfig,
    gene_assembly: GeneAssembly,
    genomic_analysis: Option<GenomicAnalysisResult>,
    simulation: Option<QuantumSimulationResult>,
    environmental_data: EnvironmentalData,
    status: ExperimentStatus,
    start_time: DateTime<Utc>,
    end_time: Option<DateTime<Utc>>,
    error: Option<String>,
}

impl ExperimentResult {
    /// A completed result, stamped with the current time as end time.
    #[must_use]
    pub fn completed(
        id: impl Into<String>,
        experiment_config: ExperimentConfig,
        gene_assembly: GeneAssembly,
        genomic_analysis: GenomicAnalysisResult,
        simulation: QuantumSimulationResult,
        environmental_data: EnvironmentalData,
        start_time: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            experiment_config,
            gene_assembly,
            genomic_analysis: Some(genomic_analysis),
            simulation: Some(simulation),
            environmental_data,
            status: ExperimentStatus::Completed,
            start_time,
            end_time: Some(Utc::now()),
            error: None,
        }
    }

    /// A failed result. An empty `message` is replaced by [`UNKNOWN_ERROR`].
    #[must_use]
    pub fn failed(
        id: impl Into<String>,
        experiment_config: ExperimentConfig,
        gene_assembly: GeneAssembly,
        start_time: DateTime<Utc>,
        message: impl Into<String>,
    ) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            UNKNOWN_ERROR.to_string()
        } else {
            message
        };
        Self {
            id: id.into(),
            experiment_config,
            gene_assembly,
            genomic_analysis: None,
            simulation: None,
            environmental_data: EnvironmentalData::empty(start_time),
            status: ExperimentStatus::Failed,
            start_time,
            end_time: Some(Utc::now()),
            error: Some(message),
        }
    }

    /// A result whose stages have not settled yet.
    #[must_use]
    pub fn running(
        id: impl Into<String>,
        experiment_config: ExperimentConfig,
        gene_assembly: GeneAssembly,
        start_time: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            experiment_config,
            gene_assembly,
            genomic_analysis: None,
            simulation: None,
            environmental_data: EnvironmentalData::empty(start_time),
            status: ExperimentStatus::Running,
            start_time,
            end_time: None,
            error: None,
        }
    }

    /// Attach settled stage outputs to a running result.
    ///
    /// Completing a result requires them; see [`Self::is_completable`].
    #[must_use]
    pub fn with_stage_results(
        mut self,
        genomic_analysis: GenomicAnalysisResult,
        simulation: QuantumSimulationResult,
        environmental_data: EnvironmentalData,
    ) -> Self {
        self.genomic_analysis = Some(genomic_analysis);
        self.simulation = Some(simulation);
        self.environmental_data = environmental_data;
        self
    }

    /// Whether both sub-results and a non-empty environmental series are
    /// present.
    #[must_use]
    pub fn is_completable(&self) -> bool {
        self.genomic_analysis.is_some()
            && self.simulation.is_some()
            && !self.environmental_data.measurements.is_empty()
    }

    /// Get the result ID.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the originating configuration.
    #[must_use]
    pub const fn experiment_config(&self) -> &ExperimentConfig {
        &self.experiment_config
    }

    /// Get the analyzed assembly.
    #[must_use]
    pub const fn gene_assembly(&self) -> &GeneAssembly {
        &self.gene_assembly
    }

    /// Get the genomic analysis, absent until the stages settle.
    #[must_use]
    pub const fn genomic_analysis(&self) -> Option<&GenomicAnalysisResult> {
        self.genomic_analysis.as_ref()
    }

    /// Get the simulation, absent until the stages settle.
    #[must_use]
    pub const fn simulation(&self) -> Option<&QuantumSimulationResult> {
        self.simulation.as_ref()
    }

    /// Get the environmental series.
    #[must_use]
    pub const fn environmental_data(&self) -> &EnvironmentalData {
        &self.environmental_data
    }

    /// Get the current status.
    #[must_use]
    pub const fn status(&self) -> ExperimentStatus {
        self.status
    }

    /// Get the start timestamp.
    #[must_use]
    pub const fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    /// Get the end timestamp, once terminal.
    #[must_use]
    pub const fn end_time(&self) -> Option<DateTime<Utc>> {
        self.end_time
    }

    /// Get the failure message, if failed.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Request a status change under the transition table.
    ///
    /// The end timestamp is stamped only when the change is applied, so
    /// repeating a request never moves it. `Completed` is rejected unless
    /// the result [is completable](Self::is_completable).
    pub fn transition_to(&mut self, next: ExperimentStatus) -> Transition {
        if self.status == next {
            return Transition::Unchanged;
        }
        if !self.status.can_transition_to(next)
            || (next == ExperimentStatus::Completed && !self.is_completable())
        {
            return Transition::Rejected { from: self.status };
        }
        self.status = next;
        self.end_time = Some(Utc::now());
        if next == ExperimentStatus::Failed && self.error.is_none() {
            self.error = Some(UNKNOWN_ERROR.to_string());
        }
        Transition::Applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running() -> ExperimentResult {
        ExperimentResult::running(
            "r-1",
            ExperimentConfig::new("exp-1", "Study"),
            GeneAssembly::new("a-1", "Assembly"),
            Utc::now(),
        )
    }

    #[test]
    fn test_transition_table() {
        use super::ExperimentStatus::{Completed, Failed, Running, Stopped};
        for next in [Completed, Failed, Stopped] {
            assert!(Running.can_transition_to(next));
            assert!(!next.can_transition_to(Running));
        }
        assert!(!Failed.can_transition_to(Completed));
        assert!(!Completed.can_transition_to(Stopped));
        assert!(!Running.can_transition_to(Running));
    }

    #[test]
    fn test_stop_running_result() {
        let mut result = running();
        assert!(result.end_time().is_none());
        assert_eq!(result.transition_to(ExperimentStatus::Stopped), Transition::Applied);
        assert_eq!(result.status(), ExperimentStatus::Stopped);
        assert!(result.end_time().is_some());
    }

    fn running_with_stage_results() -> ExperimentResult {
        use crate::pipeline::{environmental_series, generate_analysis, generate_simulation};
        use crate::random::RandomDataGenerator;

        let mut gen = RandomDataGenerator::seeded(11);
        let result = running();
        let analysis = generate_analysis(result.gene_assembly().id(), &mut gen);
        let simulation = generate_simulation(result.experiment_config().id(), &mut gen);
        let environmental = environmental_series(result.experiment_config(), &mut gen);
        result.with_stage_results(analysis, simulation, environmental)
    }

    #[test]
    fn test_running_without_stage_results_cannot_complete() {
        let mut result = running();
        assert!(!result.is_completable());
        assert_eq!(
            result.transition_to(ExperimentStatus::Completed),
            Transition::Rejected {
                from: ExperimentStatus::Running
            }
        );
        assert_eq!(result.status(), ExperimentStatus::Running);
        assert!(result.end_time().is_none());
    }

    #[test]
    fn test_repeated_completion_keeps_end_time() {
        let mut result = running_with_stage_results();
        assert!(result.is_completable());
        assert!(result.transition_to(ExperimentStatus::Completed).is_applied());
        let first = result.end_time();
        assert_eq!(
            result.transition_to(ExperimentStatus::Completed),
            Transition::Unchanged
        );
        assert_eq!(result.end_time(), first);
    }

    #[test]
    fn test_failed_cannot_complete() {
        let mut result = ExperimentResult::failed(
            "r-2",
            ExperimentConfig::new("exp-1", "Study"),
            GeneAssembly::new("a-1", "Assembly"),
            Utc::now(),
            "boom",
        );
        assert_eq!(
            result.transition_to(ExperimentStatus::Completed),
            Transition::Rejected {
                from: ExperimentStatus::Failed
            }
        );
        assert_eq!(result.status(), ExperimentStatus::Failed);
    }

    #[test]
    fn test_failed_blank_message_replaced() {
        let result = ExperimentResult::failed(
            "r-3",
            ExperimentConfig::new("exp-1", "Study"),
            GeneAssembly::new("a-1", "Assembly"),
            Utc::now(),
            "  ",
        );
        assert_eq!(result.error(), Some(UNKNOWN_ERROR));
        assert!(result.environmental_data().measurements.is_empty());
        assert!(result.genomic_analysis().is_none());
    }

    #[test]
    fn test_running_to_failed_gets_message() {
        let mut result = running();
        result.transition_to(ExperimentStatus::Failed);
        assert_eq!(result.error(), Some(UNKNOWN_ERROR));
    }
}
