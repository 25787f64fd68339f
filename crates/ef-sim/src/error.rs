//! Error types for simulation operations.

use thiserror::Error;

/// Errors encountered while preparing or running an evaporation estimate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    /// A required request field is absent.
    #[error("Missing input: {what}")]
    MissingInput { what: &'static str },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Non-physical condition: {what}")]
    NonPhysical { what: &'static str },

    /// Wall-clock limit exceeded before the run finished.
    #[error("Simulation timed out after {limit_s} s wall clock (simulated time {t_sim_s} s)")]
    Timeout { limit_s: f64, t_sim_s: f64 },

    #[error("Backend error: {message}")]
    Backend { message: String },
}

pub type SimResult<T> = Result<T, SimError>;

impl From<ef_props::PropsError> for SimError {
    fn from(e: ef_props::PropsError) -> Self {
        match e {
            ef_props::PropsError::InvalidArg { what } => SimError::InvalidArg { what },
            ef_props::PropsError::NonPhysical { what } => SimError::NonPhysical { what },
            other => SimError::Backend {
                message: other.to_string(),
            },
        }
    }
}

impl From<ef_core::EfError> for SimError {
    fn from(e: ef_core::EfError) -> Self {
        match e {
            ef_core::EfError::InvalidArg { what } => SimError::InvalidArg { what },
            ef_core::EfError::NonFinite { what, .. } => SimError::NonPhysical { what },
        }
    }
}
