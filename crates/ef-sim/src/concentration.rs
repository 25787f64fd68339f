//! Breathing-zone concentration estimate at the sash opening.
//!
//! The evaporated vapor is assumed fully mixed into the hood exhaust flow,
//! which equals the sash opening area times the face velocity.

use crate::error::{SimError, SimResult};
use ef_core::units::constants::{ATMOSPHERE_PA, R_UNIVERSAL};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SashOpening {
    /// [m]
    pub height_m: f64,
    /// [m]
    pub width_m: f64,
}

impl SashOpening {
    pub fn new(height_m: f64, width_m: f64) -> Self {
        Self { height_m, width_m }
    }

    pub fn area_m2(&self) -> f64 {
        self.height_m * self.width_m
    }

    pub fn validate(&self) -> SimResult<()> {
        if !self.height_m.is_finite() || self.height_m <= 0.0 {
            return Err(SimError::InvalidArg {
                what: "sash height must be positive",
            });
        }
        if !self.width_m.is_finite() || self.width_m <= 0.0 {
            return Err(SimError::InvalidArg {
                what: "sash width must be positive",
            });
        }
        Ok(())
    }
}

/// Hood exhaust flow [m³/s].
pub fn exhaust_flow_m3_s(sash: &SashOpening, face_velocity_mps: f64) -> f64 {
    sash.area_m2() * face_velocity_mps
}

/// Vapor concentration in the exhaust stream [ppm by volume].
pub fn hood_concentration_ppm(
    rate_kg_s: f64,
    molar_mass: f64,
    sash: &SashOpening,
    face_velocity_mps: f64,
    t_k: f64,
) -> SimResult<f64> {
    sash.validate()?;
    if !face_velocity_mps.is_finite() || face_velocity_mps <= 0.0 {
        return Err(SimError::InvalidArg {
            what: "face velocity must be positive",
        });
    }
    if !molar_mass.is_finite() || molar_mass <= 0.0 {
        return Err(SimError::NonPhysical {
            what: "molar mass must be positive",
        });
    }
    if !rate_kg_s.is_finite() || rate_kg_s < 0.0 {
        return Err(SimError::NonPhysical {
            what: "evaporation rate must be non-negative",
        });
    }
    if !t_k.is_finite() || t_k <= 0.0 {
        return Err(SimError::NonPhysical {
            what: "temperature must be positive",
        });
    }

    let vapor_flow_m3_s = rate_kg_s / molar_mass * R_UNIVERSAL * t_k / ATMOSPHERE_PA;
    Ok(1e6 * vapor_flow_m3_s / exhaust_flow_m3_s(sash, face_velocity_mps))
}
