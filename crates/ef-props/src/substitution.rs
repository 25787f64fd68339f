//! Water substitution for unresolvable properties.
//!
//! Every property lookup used by the mixture layer and the simulator goes through
//! this module. When a chemical's value cannot be obtained, water's correlation at
//! the same temperature is used; if that is unavailable too, the built-in
//! [`WaterReference`] constants are used. Lookups never fail, and each
//! replacement is recorded as a [`Substitution`] so the caller can report it.

use crate::chemical::ChemicalId;
use crate::property::PropertyId;
use crate::provider::PropertyProvider;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Where a substituted value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubstituteSource {
    /// Water's correlation evaluated at the same temperature.
    WaterCorrelation,
    /// Built-in water constants at 298.15 K.
    WaterReference,
}

/// Record of one replaced property value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Substitution {
    /// Chemical whose value was replaced; `None` for mixture-level values
    /// (no components to derive the property from).
    pub chemical: Option<ChemicalId>,
    pub property: PropertyId,
    pub source: SubstituteSource,
}

impl fmt::Display for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = match self.source {
            SubstituteSource::WaterCorrelation => "water correlation",
            SubstituteSource::WaterReference => "water reference value",
        };
        match &self.chemical {
            Some(chemical) => write!(
                f,
                "{} of {} replaced by {}",
                self.property.display_name(),
                chemical,
                source
            ),
            None => write!(
                f,
                "mixture {} replaced by {}",
                self.property.display_name(),
                source
            ),
        }
    }
}

/// Property categories that were substituted at least once.
pub fn substituted_categories(substitutions: &[Substitution]) -> BTreeSet<PropertyId> {
    substitutions.iter().map(|s| s.property).collect()
}

/// A value together with the substitutions made to obtain it.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<T> {
    pub value: T,
    pub substitutions: Vec<Substitution>,
}

impl<T> Resolved<T> {
    pub fn exact(value: T) -> Self {
        Self {
            value,
            substitutions: Vec::new(),
        }
    }

    pub fn is_substituted(&self) -> bool {
        !self.substitutions.is_empty()
    }

    /// Chemicals that had at least one value replaced, in first-seen order.
    pub fn substituted_chemicals(&self) -> Vec<&ChemicalId> {
        let mut out: Vec<&ChemicalId> = Vec::new();
        for chemical in self.substitutions.iter().filter_map(|s| s.chemical.as_ref()) {
            if !out.contains(&chemical) {
                out.push(chemical);
            }
        }
        out
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Resolved<U> {
        Resolved {
            value: f(self.value),
            substitutions: self.substitutions,
        }
    }
}

/// System-default water properties at 298.15 K.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaterReference {
    /// [kg/kmol]
    pub molar_mass: f64,
    /// [Pa]
    pub vapor_pressure_pa: f64,
    /// [kg/m³]
    pub liquid_density_kg_m3: f64,
}

impl WaterReference {
    pub const STANDARD: WaterReference = WaterReference {
        molar_mass: 18.015,
        vapor_pressure_pa: 3169.9,
        liquid_density_kg_m3: 997.05,
    };

    /// Reference value in table units (LDN as kmol/m³). `None` only for
    /// [`PropertyId::Other`].
    pub fn value(&self, property: PropertyId) -> Option<f64> {
        match property {
            PropertyId::VaporPressure => Some(self.vapor_pressure_pa),
            PropertyId::LiquidDensity => Some(self.liquid_density_kg_m3 / self.molar_mass),
            PropertyId::MolecularWeight => Some(self.molar_mass),
            PropertyId::SurfaceTension => Some(0.071_97),
            PropertyId::LiquidViscosity => Some(8.9e-4),
            PropertyId::LiquidHeatCapacity => Some(75_300.0),
            PropertyId::IdealGasHeatCapacity => Some(33_580.0),
            PropertyId::HeatOfVaporization => Some(4.399e7),
            PropertyId::CriticalTemperature => Some(647.096),
            PropertyId::Other => None,
        }
    }
}

impl Default for WaterReference {
    fn default() -> Self {
        Self::STANDARD
    }
}

fn usable(v: Option<f64>) -> Option<f64> {
    v.filter(|v| v.is_finite() && *v > 0.0)
}

/// The single substitution policy: own value, then water correlation, then reference.
fn substitute(
    chemical: &ChemicalId,
    property: PropertyId,
    own: Option<f64>,
    water_correlation: impl FnOnce() -> Option<f64>,
    reference: f64,
) -> Resolved<f64> {
    if let Some(value) = usable(own) {
        return Resolved::exact(value);
    }

    let water = if chemical.is_water() {
        None
    } else {
        usable(water_correlation())
    };
    let (value, source) = match water {
        Some(value) => (value, SubstituteSource::WaterCorrelation),
        None => (reference, SubstituteSource::WaterReference),
    };

    record(Some(chemical.clone()), property, source, value)
}

fn record(
    chemical: Option<ChemicalId>,
    property: PropertyId,
    source: SubstituteSource,
    value: f64,
) -> Resolved<f64> {
    let substitution = Substitution {
        chemical,
        property,
        source,
    };
    tracing::warn!(%property, ?source, value, "{substitution}");

    Resolved {
        value,
        substitutions: vec![substitution],
    }
}

/// Temperature-dependent property in table units, substituting water when needed.
///
/// `None` only for [`PropertyId::Other`], which has no water reference.
pub fn resolve_with_water(
    provider: &dyn PropertyProvider,
    chemical: &ChemicalId,
    property: PropertyId,
    t_k: f64,
) -> Option<Resolved<f64>> {
    let reference = WaterReference::STANDARD.value(property)?;
    Some(substitute(
        chemical,
        property,
        provider.property(chemical, property, t_k),
        || provider.property(&ChemicalId::water(), property, t_k),
        reference,
    ))
}

/// Pure-component vapor pressure [Pa], substituting water's when needed.
pub fn resolve_vapor_pressure(
    provider: &dyn PropertyProvider,
    chemical: &ChemicalId,
    t_k: f64,
) -> Resolved<f64> {
    substitute(
        chemical,
        PropertyId::VaporPressure,
        provider.property(chemical, PropertyId::VaporPressure, t_k),
        || provider.property(&ChemicalId::water(), PropertyId::VaporPressure, t_k),
        WaterReference::STANDARD.vapor_pressure_pa,
    )
}

/// Pure liquid mass density [kg/m³], substituting water's density when needed.
pub fn resolve_liquid_mass_density(
    provider: &dyn PropertyProvider,
    chemical: &ChemicalId,
    t_k: f64,
) -> Resolved<f64> {
    substitute(
        chemical,
        PropertyId::LiquidDensity,
        provider.liquid_mass_density(chemical, t_k),
        || provider.liquid_mass_density(&ChemicalId::water(), t_k),
        WaterReference::STANDARD.liquid_density_kg_m3,
    )
}

/// Molecular weight [kg/kmol], substituting water's when unknown.
pub fn resolve_molar_mass(provider: &dyn PropertyProvider, chemical: &ChemicalId) -> Resolved<f64> {
    substitute(
        chemical,
        PropertyId::MolecularWeight,
        provider.molar_mass(chemical),
        || provider.molar_mass(&ChemicalId::water()),
        WaterReference::STANDARD.molar_mass,
    )
}

/// Liquid density [kg/m³] for a liquid with no known components: water's
/// correlation at `t_k`, else the reference value. Always recorded as a
/// mixture-level substitution.
pub fn water_liquid_density(provider: &dyn PropertyProvider, t_k: f64) -> Resolved<f64> {
    let (value, source) = match usable(provider.liquid_mass_density(&ChemicalId::water(), t_k)) {
        Some(value) => (value, SubstituteSource::WaterCorrelation),
        None => (
            WaterReference::STANDARD.liquid_density_kg_m3,
            SubstituteSource::WaterReference,
        ),
    };
    record(None, PropertyId::LiquidDensity, source, value)
}
