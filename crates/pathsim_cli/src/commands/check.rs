//! Check command implementation
//!
//! Validates settings and factorises the correlation matrix without drawing
//! any paths.

use std::path::Path;

use pathsim_core::types::SimulationError;
use tracing::info;

use crate::settings::SimulationSettings;
use crate::Result;

/// Run the check command
pub fn run(config: Option<&Path>) -> Result<()> {
    let settings = SimulationSettings::load(config)?;
    let engine = settings.engine();

    let times = settings.schedule.evaluation_times()?;
    times.time_deltas().map_err(SimulationError::from)?;
    let factor = engine.correlation_factor()?;

    info!("Model: {}", settings.model.kind());
    info!("  Assets: {}", engine.dimension());
    info!("  Initial price: {}", settings.model.initial_price());
    info!("  Evaluation times: {}", times.len());
    info!("  Identity correlation: {}", factor.is_identity());

    println!("configuration OK");
    Ok(())
}
