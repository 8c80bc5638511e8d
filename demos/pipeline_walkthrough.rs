//! Pipeline Walkthrough
//!
//! Seeds the pipeline, runs both built-in experiments, stops one, and
//! prints what the store holds.
//!
//! Run with: cargo run --example pipeline_walkthrough
//! Verbose:  RUST_LOG=genomic_pipeline=debug cargo run --example pipeline_walkthrough

use std::time::Duration;

use genomic_pipeline::config::{PipelineConfig, StageMode};
use genomic_pipeline::logging::init_tracing;
use genomic_pipeline::model::ExperimentConfig;
use genomic_pipeline::random::RandomDataGenerator;
use genomic_pipeline::runner::PipelineRunner;
use genomic_pipeline::seed;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing("info");
    println!("=== Genomic Pipeline Walkthrough ===\n");

    let config = PipelineConfig::builder()
        .genomic_latency(Duration::from_millis(200))
        .simulation_latency(Duration::from_millis(300))
        .control_latency(Duration::from_millis(100))
        .stage_mode(StageMode::Concurrent)
        .seed(2025)
        .max_in_flight(2)
        .build()?;
    let runner = PipelineRunner::from_config(config)?;

    // -------------------------------------------------------------------------
    // 1. Run the seeded experiments
    // -------------------------------------------------------------------------
    println!("1. Running seeded experiments...");

    let assemblies = seed::gene_assemblies();
    for (config, assembly) in seed::experiment_configs().iter().zip(&assemblies) {
        let result = runner.start_pipeline(config, assembly).await;
        println!(
            "   {} x {} -> {} ({})",
            config.name(),
            assembly.name(),
            result.status(),
            result.id()
        );
    }

    // -------------------------------------------------------------------------
    // 2. A run that fails validation
    // -------------------------------------------------------------------------
    println!("\n2. Running an experiment with no duration...");

    let broken = ExperimentConfig::builder("3", "Empty Study")
        .duration_days(0)
        .build();
    let failed = runner.start_pipeline(&broken, &assemblies[0]).await;
    println!("   Status: {}", failed.status());
    println!("   Store error: {:?}", runner.store().error());
    runner.clear_error();

    // -------------------------------------------------------------------------
    // 3. Stop the first experiment
    // -------------------------------------------------------------------------
    println!("\n3. Stopping the first experiment...");

    let first = runner.store().experiments()[0].clone();
    let changed = runner.stop_pipeline(first.id()).await?;
    println!("   Status changed: {changed} (already {})", first.status());

    // -------------------------------------------------------------------------
    // 4. Store projections
    // -------------------------------------------------------------------------
    println!("\n4. Store contents:");

    let snapshot = runner.store().snapshot();
    println!("   Experiments:       {}", snapshot.experiments.len());
    println!("   Genomic analyses:  {}", snapshot.genomic_analyses.len());
    println!("   Simulations:       {}", snapshot.simulations.len());
    println!("   Processing:        {}", snapshot.is_processing);

    for artifact in runner.store().artifacts() {
        let labels: Vec<String> = artifact
            .chart_series()
            .into_iter()
            .map(|s| format!("{}[{}]", s.label, s.points.len()))
            .collect();
        println!("   {:<10} {}", artifact.id(), labels.join(", "));
    }

    // -------------------------------------------------------------------------
    // 5. Field sensors
    // -------------------------------------------------------------------------
    println!("\n5. Refreshing field sensors...");

    let mut gen = RandomDataGenerator::seeded(7);
    for reading in seed::sensor_readings() {
        let next = reading.refreshed(&mut gen);
        println!(
            "   {}: {:.1} C, {:.1} %RH, soil {:.2}, {:.0} lx",
            next.sensor_id,
            next.measurements.temperature,
            next.measurements.humidity,
            next.measurements.soil_moisture,
            next.measurements.light_intensity
        );
    }

    println!("\n6. Snapshot JSON size: {} bytes", serde_json::to_string(&snapshot)?.len());
    Ok(())
}
