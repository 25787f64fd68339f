//! Property evaluation errors.

use crate::property::PropertyId;
use thiserror::Error;

/// Result type for property operations.
pub type PropsResult<T> = Result<T, PropsError>;

/// Errors that can occur while evaluating correlations or mixing rules.
///
/// None of these are fatal to a calculation: the public `evaluate` surface turns
/// them into `None`, and the substitution helper replaces the value with water's.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PropsError {
    /// No coefficient rows for the chemical/property pair.
    #[error("No correlation for {property} of chemical {chemical}")]
    NoCorrelation {
        chemical: String,
        property: PropertyId,
    },

    /// Row references an equation form id this crate does not implement.
    #[error("Unknown equation form id {form_id}")]
    UnknownEquationForm { form_id: u16 },

    /// The form needs a constant (critical temperature) that is not in the table.
    #[error("Missing constant {property} for chemical {chemical}")]
    MissingConstant {
        chemical: String,
        property: PropertyId,
    },

    /// Formula left its numeric domain (log of non-positive, division by zero, overflow).
    #[error("Numeric domain error in {what}")]
    Domain { what: &'static str },

    /// The form has no integrated variant.
    #[error("Equation form {form_id} has no integrated variant")]
    NoIntegratedForm { form_id: u16 },

    /// Invalid argument.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// Non-physical values (negative amount, zero molar mass, etc.).
    #[error("Non-physical value for {what}")]
    NonPhysical { what: &'static str },
}
