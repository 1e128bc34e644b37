//! CLI error types.

use pathsim_core::types::SimulationError;
use thiserror::Error;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Settings file not found
    #[error("Settings file not found: {0}")]
    FileNotFound(String),

    /// Settings could not be loaded or deserialised
    #[error("Settings error: {0}")]
    Settings(#[from] config::ConfigError),

    /// Schedule section is inconsistent
    #[error("Invalid schedule: {0}")]
    InvalidSchedule(String),

    /// Simulation failed
    #[error(transparent)]
    Simulation(#[from] SimulationError),

    /// CSV output failed
    #[error("CSV output error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON output failed
    #[error("JSON output error: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing to stdout failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
