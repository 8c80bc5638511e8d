//! Pipeline State Store - in-memory aggregate of pipeline results
//!
//! Holds experiment results, the genomic analyses and simulations they
//! carried, a processing flag and the last error. All mutations go through
//! one critical section, so `begin`/`succeed`/`fail` never interleave.
//! Readers get cloned projections and may subscribe to a revision counter
//! that is bumped after every change.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::model::{
    ExperimentResult, ExperimentStatus, GenomicAnalysisResult, PipelineArtifact,
    QuantumSimulationResult, Transition,
};

/// Point-in-time copy of the store contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineSnapshot {
    /// Experiment results in insertion order.
    pub experiments: Vec<ExperimentResult>,
    /// Genomic analyses in insertion order.
    pub genomic_analyses: Vec<GenomicAnalysisResult>,
    /// Simulations in insertion order.
    pub simulations: Vec<QuantumSimulationResult>,
    /// Whether a run is in flight.
    pub is_processing: bool,
    /// Last error, until cleared.
    pub error: Option<String>,
}

/// In-memory store for pipeline results.
///
/// ## Design
///
/// Lists are append-only apart from [`remove`](Self::remove), the status
/// transitions and the optional retention limit, which evicts the oldest
/// entries of each list once it is exceeded.
///
/// ## Example
///
/// ```rust
/// use genomic_pipeline::store::PipelineStateStore;
///
/// let store = PipelineStateStore::new();
/// store.begin();
/// assert!(store.is_processing());
/// store.fail("Failed to run experiment");
/// assert!(!store.is_processing());
/// assert_eq!(store.error().as_deref(), Some("Failed to run experiment"));
/// store.clear_error();
/// assert!(store.error().is_none());
/// ```
#[derive(Debug)]
pub struct PipelineStateStore {
    state: Mutex<PipelineSnapshot>,
    revision: watch::Sender<u64>,
    retention_limit: Option<usize>,
}

impl PipelineStateStore {
    /// Create a new empty store without a retention limit.
    #[must_use]
    pub fn new() -> Self {
        Self::with_retention_limit(None)
    }

    /// Create a new empty store keeping at most `limit` entries per list.
    #[must_use]
    pub fn with_retention_limit(limit: Option<usize>) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            state: Mutex::new(PipelineSnapshot::default()),
            revision,
            retention_limit: limit,
        }
    }

    /// Mark a run as started: processing on, error cleared.
    pub fn begin(&self) {
        self.mutate(|state| {
            state.is_processing = true;
            state.error = None;
            true
        });
    }

    /// Record a settled run: processing off, `result` appended together
    /// with whichever sub-results it carries.
    pub fn succeed(&self, result: ExperimentResult) {
        let limit = self.retention_limit;
        self.mutate(|state| {
            state.is_processing = false;
            append(state, result, limit);
            true
        });
    }

    /// Record a failed run without a result: processing off, error set.
    pub fn fail(&self, message: impl Into<String>) {
        let message = message.into();
        self.mutate(|state| {
            state.is_processing = false;
            state.error = Some(message);
            true
        });
    }

    /// Record a failed run and its `Failed` result in one step.
    pub fn fail_run(&self, result: ExperimentResult, message: impl Into<String>) {
        let message = message.into();
        let limit = self.retention_limit;
        self.mutate(|state| {
            state.is_processing = false;
            append(state, result, limit);
            state.error = Some(message);
            true
        });
    }

    /// Move experiment `id` to `Completed`.
    ///
    /// Returns `true` only if the status changed. Unknown IDs, results
    /// already completed, results missing stage output and transitions
    /// outside the table are no-ops; the end timestamp is set by the first
    /// successful call only.
    pub fn mark_completed(&self, id: &str) -> bool {
        self.transition(id, ExperimentStatus::Completed)
    }

    /// Move experiment `id` to `Stopped`. Same rules as
    /// [`mark_completed`](Self::mark_completed).
    pub fn mark_stopped(&self, id: &str) -> bool {
        self.transition(id, ExperimentStatus::Stopped)
    }

    /// Clear the last error.
    pub fn clear_error(&self) {
        self.mutate(|state| state.error.take().is_some());
    }

    /// Remove experiment `id`. Returns whether anything was removed.
    ///
    /// The sub-results it contributed stay in their lists.
    pub fn remove(&self, id: &str) -> bool {
        self.mutate(|state| {
            let before = state.experiments.len();
            state.experiments.retain(|exp| exp.id() != id);
            state.experiments.len() != before
        })
    }

    /// Experiment results in insertion order.
    #[must_use]
    pub fn experiments(&self) -> Vec<ExperimentResult> {
        self.state.lock().experiments.clone()
    }

    /// Experiment `id`, if stored.
    #[must_use]
    pub fn experiment(&self, id: &str) -> Option<ExperimentResult> {
        self.state
            .lock()
            .experiments
            .iter()
            .find(|exp| exp.id() == id)
            .cloned()
    }

    /// Genomic analyses in insertion order.
    #[must_use]
    pub fn genomic_analyses(&self) -> Vec<GenomicAnalysisResult> {
        self.state.lock().genomic_analyses.clone()
    }

    /// Simulations in insertion order.
    #[must_use]
    pub fn simulations(&self) -> Vec<QuantumSimulationResult> {
        self.state.lock().simulations.clone()
    }

    /// Whether a run is in flight.
    #[must_use]
    pub fn is_processing(&self) -> bool {
        self.state.lock().is_processing
    }

    /// Last error, if any.
    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.state.lock().error.clone()
    }

    /// Number of stored experiment results.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.lock().experiments.len()
    }

    /// Whether no experiment results are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.lock().experiments.is_empty()
    }

    /// Consistent copy of the whole store.
    #[must_use]
    pub fn snapshot(&self) -> PipelineSnapshot {
        self.state.lock().clone()
    }

    /// Every stored result as a tagged artifact: analyses, then
    /// simulations, then experiments.
    #[must_use]
    pub fn artifacts(&self) -> Vec<PipelineArtifact> {
        let state = self.state.lock();
        state
            .genomic_analyses
            .iter()
            .cloned()
            .map(PipelineArtifact::from)
            .chain(state.simulations.iter().cloned().map(PipelineArtifact::from))
            .chain(state.experiments.iter().cloned().map(PipelineArtifact::from))
            .collect()
    }

    /// Current revision; bumped after every change.
    #[must_use]
    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    /// Receiver notified after every change. Dropping it ends the
    /// subscription.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    fn transition(&self, id: &str, next: ExperimentStatus) -> bool {
        self.mutate(|state| {
            let Some(exp) = state.experiments.iter_mut().find(|exp| exp.id() == id) else {
                debug!(experiment_id = id, %next, "transition on unknown experiment ignored");
                return false;
            };
            match exp.transition_to(next) {
                Transition::Applied => true,
                Transition::Unchanged => false,
                Transition::Rejected { from } => {
                    warn!(experiment_id = id, %from, to = %next, "status transition rejected");
                    false
                }
            }
        })
    }

    /// Apply `f` under the lock; bump the revision if it reports a change.
    fn mutate(&self, f: impl FnOnce(&mut PipelineSnapshot) -> bool) -> bool {
        let changed = {
            let mut state = self.state.lock();
            f(&mut state)
        };
        if changed {
            self.revision.send_modify(|rev| *rev += 1);
        }
        changed
    }
}

impl Default for PipelineStateStore {
    fn default() -> Self {
        Self::new()
    }
}

fn append(state: &mut PipelineSnapshot, result: ExperimentResult, limit: Option<usize>) {
    if let Some(analysis) = result.genomic_analysis() {
        state.genomic_analyses.push(analysis.clone());
    }
    if let Some(simulation) = result.simulation() {
        state.simulations.push(simulation.clone());
    }
    state.experiments.push(result);

    if let Some(limit) = limit {
        evict_oldest(&mut state.experiments, limit);
        evict_oldest(&mut state.genomic_analyses, limit);
        evict_oldest(&mut state.simulations, limit);
    }
}

fn evict_oldest<T>(items: &mut Vec<T>, limit: usize) {
    if items.len() > limit {
        let excess = items.len() - limit;
        items.drain(..excess);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ExperimentConfig, GeneAssembly};
    use chrono::Utc;

    fn running(id: &str) -> ExperimentResult {
        ExperimentResult::running(
            id,
            ExperimentConfig::new("exp-1", "Study"),
            GeneAssembly::new("a-1", "Assembly"),
            Utc::now(),
        )
    }

    #[test]
    fn test_store_default() {
        let store = PipelineStateStore::new();
        assert!(store.is_empty());
        assert!(!store.is_processing());
        assert!(store.error().is_none());
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn test_begin_clears_error() {
        let store = PipelineStateStore::new();
        store.fail("boom");
        store.begin();
        assert!(store.is_processing());
        assert!(store.error().is_none());
    }

    #[test]
    fn test_running_result_has_no_sub_results_to_append() {
        let store = PipelineStateStore::new();
        store.succeed(running("r-1"));
        assert_eq!(store.len(), 1);
        assert!(store.genomic_analyses().is_empty());
        assert!(store.simulations().is_empty());
    }

    #[test]
    fn test_mark_stopped_then_completed_rejected() {
        let store = PipelineStateStore::new();
        store.succeed(running("r-1"));
        assert!(store.mark_stopped("r-1"));
        assert!(!store.mark_completed("r-1"));
        assert_eq!(
            store.experiment("r-1").unwrap().status(),
            ExperimentStatus::Stopped
        );
    }

    #[test]
    fn test_retention_limit_evicts_oldest() {
        let store = PipelineStateStore::with_retention_limit(Some(2));
        for id in ["r-1", "r-2", "r-3"] {
            store.succeed(running(id));
        }
        let ids: Vec<String> = store
            .experiments()
            .iter()
            .map(|exp| exp.id().to_string())
            .collect();
        assert_eq!(ids, ["r-2", "r-3"]);
    }

    #[test]
    fn test_noop_does_not_bump_revision() {
        let store = PipelineStateStore::new();
        store.succeed(running("r-1"));
        let rev = store.revision();
        assert!(!store.remove("missing"));
        assert!(!store.mark_completed("missing"));
        store.clear_error();
        assert_eq!(store.revision(), rev);
    }
}
