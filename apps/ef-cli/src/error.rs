//! CLI error type.

use ef_props::{DatabaseError, PropsError};
use ef_scenario::ScenarioError;
use ef_sim::SimError;
use std::path::PathBuf;
use thiserror::Error;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to load property database {path}: {source}")]
    Database {
        path: PathBuf,
        source: DatabaseError,
    },

    #[error("Failed to load scenario {path}: {source}")]
    Scenario {
        path: PathBuf,
        source: ScenarioError,
    },

    #[error("Unknown chemical: {0}")]
    UnknownChemical(String),

    #[error("Unknown property code: {0} (expected VP, LDN, ST, LVS, LCP, ICP, HVP)")]
    UnknownProperty(String),

    #[error("Property evaluation failed: {0}")]
    Props(#[from] PropsError),

    #[error("Simulation failed: {0}")]
    Sim(#[from] SimError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
