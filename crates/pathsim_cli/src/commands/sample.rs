//! Sample command implementation
//!
//! Simulates one set of paths and writes it to stdout.

use std::io::{self, Write};
use std::path::Path;

use clap::ValueEnum;
use pathsim_engine::mc::{EvaluationTimes, SimulationOutput};
use pathsim_engine::rng::SimRng;
use pathsim_engine::stats::log_return_correlation_matrix;
use serde::Serialize;
use tracing::info;

use crate::settings::SimulationSettings;
use crate::Result;

/// Output format for sampled paths
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned columns
    Table,
    /// Single JSON document
    Json,
    /// One CSV record per evaluation time
    Csv,
}

#[derive(Serialize)]
struct SampleReport<'a> {
    model: String,
    seed: Option<u64>,
    times: &'a [f64],
    paths: Vec<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    log_return_correlation: Option<Vec<Vec<f64>>>,
    setup_us: u64,
    evolution_us: u64,
}

/// Run the sample command
pub fn run(config: Option<&Path>, seed: Option<u64>, format: OutputFormat) -> Result<()> {
    let settings = SimulationSettings::load(config)?;
    let seed = seed.or(settings.run.seed);
    let times = settings.schedule.evaluation_times()?;
    let engine = settings.engine();

    let mut rng = match seed {
        Some(seed) => SimRng::from_seed(seed),
        None => SimRng::from_entropy(),
    };
    let output = engine.simulate_with_rng(&times, &mut rng)?;
    info!(
        "Sampled {} x {} paths in {:?} (setup {:?}, evolution {:?})",
        output.paths.n_steps(),
        output.paths.n_assets(),
        output.timings.total(),
        output.timings.setup,
        output.timings.evolution
    );

    let s0 = settings.model.initial_price();
    let correlations = if output.paths.n_assets() > 1 && output.paths.n_steps() > 1 {
        Some(log_return_correlation_matrix(&output.paths, s0))
    } else {
        None
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Table => write_table(&mut out, &times, &output, correlations.as_deref())?,
        OutputFormat::Csv => write_csv(&mut out, &times, &output)?,
        OutputFormat::Json => {
            let report = SampleReport {
                model: settings.model.kind().to_string(),
                seed,
                times: times.as_slice(),
                paths: output.paths.to_rows(),
                log_return_correlation: correlations,
                setup_us: output.timings.setup.as_micros() as u64,
                evolution_us: output.timings.evolution.as_micros() as u64,
            };
            serde_json::to_writer_pretty(&mut out, &report)?;
            writeln!(out)?;
        }
    }

    Ok(())
}

fn write_table<W: Write>(
    out: &mut W,
    times: &EvaluationTimes,
    output: &SimulationOutput,
    correlations: Option<&[Vec<f64>]>,
) -> Result<()> {
    write!(out, "{:>12}", "time")?;
    for asset in 0..output.paths.n_assets() {
        write!(out, " {:>14}", format!("asset_{}", asset))?;
    }
    writeln!(out)?;

    for (t, row) in times.as_slice().iter().zip(output.paths.rows()) {
        write!(out, "{:>12.6}", t)?;
        for price in row {
            write!(out, " {:>14.6}", price)?;
        }
        writeln!(out)?;
    }

    if let Some(matrix) = correlations {
        writeln!(out)?;
        writeln!(out, "log-return correlation")?;
        for row in matrix {
            for value in row {
                write!(out, " {:>8.4}", value)?;
            }
            writeln!(out)?;
        }
    }

    Ok(())
}

fn write_csv<W: Write>(out: &mut W, times: &EvaluationTimes, output: &SimulationOutput) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);

    let header = std::iter::once("time".to_string())
        .chain((0..output.paths.n_assets()).map(|asset| format!("asset_{}", asset)));
    writer.write_record(header)?;

    for (t, row) in times.as_slice().iter().zip(output.paths.rows()) {
        let record = std::iter::once(t.to_string()).chain(row.iter().map(f64::to_string));
        writer.write_record(record)?;
    }

    writer.flush()?;
    Ok(())
}
