//! State store integration tests

use std::sync::Arc;

use genomic_pipeline::config::PipelineConfig;
use genomic_pipeline::model::{ExperimentResult, ExperimentStatus, PipelineArtifact};
use genomic_pipeline::pipeline::ExperimentOrchestrator;
use genomic_pipeline::seed;
use genomic_pipeline::store::PipelineStateStore;

async fn completed(seed_value: u64) -> ExperimentResult {
    let orchestrator = ExperimentOrchestrator::new(PipelineConfig::instant(seed_value)).unwrap();
    orchestrator
        .run_experiment(&seed::experiment_configs()[0], &seed::gene_assemblies()[0])
        .await
}

fn running(id: &str) -> ExperimentResult {
    ExperimentResult::running(
        id,
        seed::experiment_configs()[1].clone(),
        seed::gene_assemblies()[1].clone(),
        chrono::Utc::now(),
    )
}

#[tokio::test]
async fn test_succeed_appends_sub_results() {
    let store = PipelineStateStore::new();
    let result = completed(200).await;

    store.begin();
    store.succeed(result.clone());

    assert!(!store.is_processing());
    assert_eq!(store.experiments(), vec![result.clone()]);
    assert_eq!(
        store.genomic_analyses(),
        vec![result.genomic_analysis().unwrap().clone()]
    );
    assert_eq!(
        store.simulations(),
        vec![result.simulation().unwrap().clone()]
    );
}

#[test]
fn test_fail_sets_error_and_stops_processing() {
    let store = PipelineStateStore::new();
    store.begin();
    store.fail("Failed to run experiment");

    assert!(!store.is_processing());
    assert_eq!(store.error().as_deref(), Some("Failed to run experiment"));
    assert!(store.is_empty());
}

#[test]
fn test_clear_error_twice() {
    let store = PipelineStateStore::new();
    store.fail("boom");

    store.clear_error();
    assert!(store.error().is_none());
    store.clear_error();
    assert!(store.error().is_none());
}

/// A running result whose stages have settled, borrowing the stage output
/// of a completed orchestrator run.
async fn settled(id: &str, seed_value: u64) -> ExperimentResult {
    let done = completed(seed_value).await;
    running(id).with_stage_results(
        done.genomic_analysis().unwrap().clone(),
        done.simulation().unwrap().clone(),
        done.environmental_data().clone(),
    )
}

#[tokio::test]
async fn test_mark_completed_is_idempotent() {
    let store = PipelineStateStore::new();
    store.succeed(settled("r-1", 206).await);

    assert!(store.mark_completed("r-1"));
    let first = store.experiment("r-1").unwrap();
    assert_eq!(first.status(), ExperimentStatus::Completed);
    assert!(first.end_time().is_some());

    assert!(!store.mark_completed("r-1"));
    let second = store.experiment("r-1").unwrap();
    assert_eq!(second.status(), ExperimentStatus::Completed);
    assert_eq!(second.end_time(), first.end_time());
}

#[test]
fn test_mark_completed_requires_stage_results() {
    let store = PipelineStateStore::new();
    store.succeed(running("r-1"));
    let rev = store.revision();

    assert!(!store.mark_completed("r-1"));
    let r = store.experiment("r-1").unwrap();
    assert_eq!(r.status(), ExperimentStatus::Running);
    assert!(r.end_time().is_none());
    assert_eq!(store.revision(), rev);

    // Stopping needs no stage output.
    assert!(store.mark_stopped("r-1"));
}

#[tokio::test]
async fn test_completed_results_carry_stage_output() {
    let store = PipelineStateStore::new();
    store.succeed(running("r-1"));
    store.succeed(settled("r-2", 207).await);
    store.mark_completed("r-1");
    store.mark_completed("r-2");

    for r in store
        .experiments()
        .iter()
        .filter(|r| r.status() == ExperimentStatus::Completed)
    {
        assert!(r.genomic_analysis().is_some());
        assert!(r.simulation().is_some());
        assert!(!r.environmental_data().measurements.is_empty());
    }
    assert_eq!(
        store.experiment("r-2").unwrap().status(),
        ExperimentStatus::Completed
    );
}

#[tokio::test]
async fn test_failed_result_is_not_completed() {
    let store = PipelineStateStore::new();
    let orchestrator = ExperimentOrchestrator::new(PipelineConfig::instant(201)).unwrap();
    let failed = orchestrator
        .run_experiment(
            &seed::experiment_configs()[0],
            &genomic_pipeline::model::GeneAssembly::new("", "Nameless"),
        )
        .await;
    let id = failed.id().to_string();
    store.succeed(failed);

    assert!(!store.mark_completed(&id));
    assert!(!store.mark_stopped(&id));
    assert_eq!(store.experiment(&id).unwrap().status(), ExperimentStatus::Failed);
    assert!(store.genomic_analyses().is_empty());
}

#[tokio::test]
async fn test_unknown_id_leaves_experiments_unchanged() {
    let store = PipelineStateStore::new();
    store.succeed(completed(202).await);
    store.succeed(running("r-2"));
    let before = store.experiments();

    assert!(!store.mark_completed("missing"));
    assert!(!store.mark_stopped("missing"));
    assert!(!store.remove("missing"));

    assert_eq!(store.experiments(), before);
}

#[tokio::test]
async fn test_remove_keeps_sub_results() {
    let store = PipelineStateStore::new();
    let result = completed(203).await;
    let id = result.id().to_string();
    store.succeed(result);

    assert!(store.remove(&id));
    assert!(store.is_empty());
    assert_eq!(store.genomic_analyses().len(), 1);
    assert_eq!(store.simulations().len(), 1);
}

#[tokio::test]
async fn test_artifacts_cover_every_list() {
    let store = PipelineStateStore::new();
    store.succeed(completed(204).await);

    let kinds: Vec<&str> = store
        .artifacts()
        .iter()
        .map(|a| match a {
            PipelineArtifact::GenomicAnalysis(_) => "genomic",
            PipelineArtifact::QuantumSimulation(_) => "simulation",
            PipelineArtifact::Experiment(_) => "experiment",
        })
        .collect();
    assert_eq!(kinds, ["genomic", "simulation", "experiment"]);

    for artifact in store.artifacts() {
        assert!(!artifact.chart_series().is_empty());
    }
}

#[tokio::test]
async fn test_snapshot_serializes() {
    let store = PipelineStateStore::new();
    store.succeed(completed(205).await);

    let json = serde_json::to_string(&store.snapshot()).unwrap();
    let back: genomic_pipeline::store::PipelineSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back, store.snapshot());
}

#[tokio::test]
async fn test_subscribers_see_each_change() {
    let store = Arc::new(PipelineStateStore::new());
    let mut rx = store.subscribe();

    let writer = Arc::clone(&store);
    tokio::spawn(async move {
        writer.begin();
        writer.fail("boom");
    })
    .await
    .unwrap();

    rx.changed().await.unwrap();
    assert_eq!(*rx.borrow_and_update(), 2);
    assert_eq!(store.error().as_deref(), Some("boom"));
}

#[test]
fn test_concurrent_writers_keep_every_result() {
    let store = Arc::new(PipelineStateStore::new());
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = Arc::clone(&store);
            std::thread::spawn(move || {
                for j in 0..25 {
                    store.begin();
                    store.succeed(running(&format!("r-{i}-{j}")));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(store.len(), 200);
    assert!(!store.is_processing());
}
