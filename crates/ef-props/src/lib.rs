//! ef-props: physical property correlations and mixing rules for evapflow.
//!
//! Provides:
//! - Chemical records and property identifiers
//! - The immutable correlation table and its file loader
//! - Equation-form evaluation with nearest-range fallback
//! - Water substitution for missing property data
//! - Mixture mole fractions, Raoult's-law vapor pressure and liquid density
//!
//! # Architecture
//!
//! Callers depend on the [`PropertyProvider`] trait rather than on the table, so the
//! mixture layer and the simulator can be driven by any property source.
//!
//! # Example
//!
//! ```no_run
//! use ef_props::{ChemicalId, CorrelationEvaluator, PropertyId, database};
//! use std::path::Path;
//!
//! let table = database::load(Path::new("data/chemicals.yaml")).unwrap();
//! let eval = CorrelationEvaluator::new(&table);
//! let vp = eval.evaluate(&ChemicalId::water(), PropertyId::VaporPressure, 298.15, false);
//! println!("Water vapor pressure: {vp:?} Pa");
//! ```

pub mod chemical;
pub mod database;
pub mod equation;
pub mod error;
pub mod evaluator;
pub mod mixture;
pub mod property;
pub mod provider;
pub mod substitution;
pub mod table;

pub use chemical::{CAS_WATER, ChemicalId, ChemicalRecord};
pub use database::{DatabaseError, DatabaseFile, DatabaseResult};
pub use equation::{Coefficients, EquationForm};
pub use error::{PropsError, PropsResult};
pub use evaluator::{CorrelationEvaluator, RowMatch, SelectedRow};
pub use mixture::{
    AmountBasis, Mixture, MixtureComponent, average_liquid_density, average_molecular_weight,
    mixture_vapor_pressure, to_mole_fractions,
};
pub use property::PropertyId;
pub use provider::PropertyProvider;
pub use substitution::{
    Resolved, SubstituteSource, Substitution, WaterReference, resolve_liquid_mass_density,
    resolve_molar_mass, resolve_vapor_pressure, resolve_with_water, substituted_categories,
    water_liquid_density,
};
pub use table::{ConstantRow, CorrelationRow, CorrelationTable, MAX_COEFFICIENTS};
