//! Run command implementation
//!
//! Runs a parallel batch of independent trials and reports wall time, summed
//! setup time, summed evolution time and mean terminal price per asset.

use std::path::Path;

use pathsim_engine::mc::run_batch;
use tracing::info;

use crate::settings::SimulationSettings;
use crate::Result;

/// Run the batch command
pub fn run(config: Option<&Path>, trials: Option<usize>, seed: Option<u64>) -> Result<()> {
    let mut settings = SimulationSettings::load(config)?;
    if let Some(trials) = trials {
        settings.run.trials = trials;
    }
    if let Some(seed) = seed {
        settings.run.seed = Some(seed);
    }

    let seed = settings.run.seed.unwrap_or_else(rand::random);
    let times = settings.schedule.evaluation_times()?;
    let engine = settings.engine();

    info!("Starting batch...");
    info!("  Model: {}", settings.model.kind());
    info!("  Assets: {}", engine.dimension());
    info!("  Evaluation times: {}", times.len());
    info!("  Trials: {}", settings.run.trials);
    info!("  Seed: {}", seed);

    let summary = run_batch(&engine, &times, settings.run.trials, seed)?;

    info!("Batch complete");
    info!("  Wall time: {:.6}s", summary.wall.as_secs_f64());
    info!("  Setup time (sum): {:.6}s", summary.setup_total.as_secs_f64());
    info!(
        "  Evolution time (sum): {:.6}s",
        summary.evolution_total.as_secs_f64()
    );
    for (asset, mean) in summary.terminal_mean.iter().enumerate() {
        info!("  Terminal mean [{}]: {:.6}", asset, mean);
    }

    Ok(())
}
