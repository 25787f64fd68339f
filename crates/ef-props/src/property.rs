//! Physical property identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Property identifiers as they appear in correlation and constant tables.
///
/// Temperature-dependent properties carry coefficient rows; scalar properties
/// (`CriticalTemperature`, `MolecularWeight`) carry constant rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PropertyId {
    /// Vapor pressure [Pa]
    #[serde(rename = "VP")]
    VaporPressure,
    /// Liquid density [kmol/m³]
    #[serde(rename = "LDN")]
    LiquidDensity,
    /// Surface tension [N/m]
    #[serde(rename = "ST")]
    SurfaceTension,
    /// Liquid viscosity [Pa·s]
    #[serde(rename = "LVS")]
    LiquidViscosity,
    /// Liquid heat capacity [J/(kmol·K)]
    #[serde(rename = "LCP")]
    LiquidHeatCapacity,
    /// Ideal gas heat capacity [J/(kmol·K)]
    #[serde(rename = "ICP")]
    IdealGasHeatCapacity,
    /// Heat of vaporization [J/kmol]
    #[serde(rename = "HVP")]
    HeatOfVaporization,
    /// Critical temperature [K]
    #[serde(rename = "TC")]
    CriticalTemperature,
    /// Molecular weight [kg/kmol]
    #[serde(rename = "MW")]
    MolecularWeight,
    /// Any code this crate does not interpret. Never selected by lookups.
    #[serde(other)]
    Other,
}

impl PropertyId {
    pub const ALL: [PropertyId; 10] = [
        PropertyId::VaporPressure,
        PropertyId::LiquidDensity,
        PropertyId::SurfaceTension,
        PropertyId::LiquidViscosity,
        PropertyId::LiquidHeatCapacity,
        PropertyId::IdealGasHeatCapacity,
        PropertyId::HeatOfVaporization,
        PropertyId::CriticalTemperature,
        PropertyId::MolecularWeight,
        PropertyId::Other,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            PropertyId::VaporPressure => "VP",
            PropertyId::LiquidDensity => "LDN",
            PropertyId::SurfaceTension => "ST",
            PropertyId::LiquidViscosity => "LVS",
            PropertyId::LiquidHeatCapacity => "LCP",
            PropertyId::IdealGasHeatCapacity => "ICP",
            PropertyId::HeatOfVaporization => "HVP",
            PropertyId::CriticalTemperature => "TC",
            PropertyId::MolecularWeight => "MW",
            PropertyId::Other => "OTHER",
        }
    }

    /// Parse a table code (case-insensitive). Unknown codes return `None`.
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::ALL
            .into_iter()
            .filter(|p| *p != PropertyId::Other)
            .find(|p| p.key().eq_ignore_ascii_case(key))
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PropertyId::VaporPressure => "vapor pressure",
            PropertyId::LiquidDensity => "liquid density",
            PropertyId::SurfaceTension => "surface tension",
            PropertyId::LiquidViscosity => "liquid viscosity",
            PropertyId::LiquidHeatCapacity => "liquid heat capacity",
            PropertyId::IdealGasHeatCapacity => "ideal gas heat capacity",
            PropertyId::HeatOfVaporization => "heat of vaporization",
            PropertyId::CriticalTemperature => "critical temperature",
            PropertyId::MolecularWeight => "molecular weight",
            PropertyId::Other => "other",
        }
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
