//! Scenario schema definitions.
//!
//! Quantities are stored in the units the hood form uses: feet, feet per minute,
//! millilitres. Liquid overrides are SI.

use serde::{Deserialize, Serialize};

fn default_ambient_k() -> f64 {
    ef_core::units::constants::AMBIENT_K
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scenario {
    /// Missing in files written before versioning; read as 0.
    #[serde(default)]
    pub version: u32,
    pub name: String,
    #[serde(default = "default_ambient_k")]
    pub ambient_temperature_k: f64,
    pub hood: HoodDef,
    pub spill: SpillDef,
    #[serde(default)]
    pub components: Vec<ComponentDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manual: Option<ManualDef>,
    #[serde(default)]
    pub run: RunDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HoodDef {
    pub length_ft: f64,
    pub depth_ft: f64,
    pub face_velocity_fpm: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sash: Option<SashDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SashDef {
    pub height_ft: f64,
    pub width_ft: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpillDef {
    pub volume_ml: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum BasisDef {
    #[default]
    Mass,
    Molar,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComponentDef {
    /// CAS number
    pub chemical: String,
    pub amount: f64,
    #[serde(default)]
    pub basis: BasisDef,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ManualDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub molar_mass: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vapor_pressure_pa: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub density_kg_m3: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunDef {
    #[serde(default = "RunDef::default_dt")]
    pub dt_s: f64,
    #[serde(default = "RunDef::default_max_duration")]
    pub max_duration_s: f64,
    #[serde(default = "RunDef::default_spill_duration")]
    pub spill_duration_s: f64,
    #[serde(default)]
    pub record_every: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_s: Option<f64>,
}

impl RunDef {
    fn default_dt() -> f64 {
        1.0
    }

    fn default_max_duration() -> f64 {
        3600.0
    }

    fn default_spill_duration() -> f64 {
        10.0
    }
}

impl Default for RunDef {
    fn default() -> Self {
        Self {
            dt_s: Self::default_dt(),
            max_duration_s: Self::default_max_duration(),
            spill_duration_s: Self::default_spill_duration(),
            record_every: 0,
            timeout_s: None,
        }
    }
}
