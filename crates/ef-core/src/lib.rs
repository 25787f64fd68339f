//! ef-core: stable foundation for evapflow.
//!
//! Contains:
//! - units (uom SI types + constructors for SI and hood-side units)
//! - numeric (Real + tolerances + float helpers)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{EfError, EfResult};
pub use numeric::*;
pub use units::*;
