//! Physical inputs shared by the transient and steady-state calculators.
//!
//! Values are SI and carried as plain `f64` with the unit in the field name;
//! conversion from hood-side units happens at the request boundary.

use crate::error::{SimError, SimResult};
use ef_core::units::constants::AMBIENT_K;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Liquid properties evaluated at the ambient temperature.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LiquidProperties {
    /// Molecular weight [kg/kmol]
    pub molar_mass: f64,
    /// Vapor pressure [Pa]
    pub vapor_pressure_pa: f64,
    /// Liquid density [kg/m³]
    pub density_kg_m3: f64,
}

impl LiquidProperties {
    pub fn validate(&self) -> SimResult<()> {
        if !self.molar_mass.is_finite() || self.molar_mass <= 0.0 {
            return Err(SimError::NonPhysical {
                what: "molar mass must be positive",
            });
        }
        if !self.vapor_pressure_pa.is_finite() || self.vapor_pressure_pa < 0.0 {
            return Err(SimError::NonPhysical {
                what: "vapor pressure must be non-negative",
            });
        }
        if !self.density_kg_m3.is_finite() || self.density_kg_m3 <= 0.0 {
            return Err(SimError::NonPhysical {
                what: "liquid density must be positive",
            });
        }
        Ok(())
    }
}

/// Fume hood work surface and face velocity.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hood {
    /// Work surface length [m]
    pub length_m: f64,
    /// Work surface depth [m]
    pub depth_m: f64,
    /// Face velocity [m/s]
    pub face_velocity_mps: f64,
}

impl Hood {
    pub fn new(length_m: f64, depth_m: f64, face_velocity_mps: f64) -> Self {
        Self {
            length_m,
            depth_m,
            face_velocity_mps,
        }
    }

    /// Footprint area [m²]
    pub fn area_m2(&self) -> f64 {
        self.length_m * self.depth_m
    }

    /// Radius of the circle with the footprint's area [m].
    pub fn max_pool_radius_m(&self) -> f64 {
        (self.area_m2() / PI).sqrt()
    }

    /// Diameter of the circle with the footprint's area [m].
    pub fn effective_diameter_m(&self) -> f64 {
        (4.0 * self.area_m2() / PI).sqrt()
    }

    /// Face velocity may be zero (still air); dimensions must be positive.
    pub fn validate(&self) -> SimResult<()> {
        if !self.length_m.is_finite() || self.length_m <= 0.0 {
            return Err(SimError::InvalidArg {
                what: "hood length must be positive",
            });
        }
        if !self.depth_m.is_finite() || self.depth_m <= 0.0 {
            return Err(SimError::InvalidArg {
                what: "hood depth must be positive",
            });
        }
        if !self.face_velocity_mps.is_finite() || self.face_velocity_mps < 0.0 {
            return Err(SimError::InvalidArg {
                what: "face velocity must be non-negative",
            });
        }
        Ok(())
    }
}

pub(crate) fn validate_temperature(t_k: f64) -> SimResult<()> {
    if !t_k.is_finite() || t_k <= 0.0 {
        return Err(SimError::NonPhysical {
            what: "ambient temperature must be positive",
        });
    }
    Ok(())
}

/// Inputs of one pool simulation.
#[derive(Clone, Debug, PartialEq)]
pub struct PoolInputs {
    pub liquid: LiquidProperties,
    pub hood: Hood,
    /// Total spilled volume [m³]
    pub spill_volume_m3: f64,
    /// Ambient temperature [K]
    pub ambient_temperature_k: f64,
}

impl PoolInputs {
    /// Inputs at the model's reference temperature.
    pub fn new(liquid: LiquidProperties, hood: Hood, spill_volume_m3: f64) -> Self {
        Self {
            liquid,
            hood,
            spill_volume_m3,
            ambient_temperature_k: AMBIENT_K,
        }
    }

    pub fn with_ambient_temperature(mut self, t_k: f64) -> Self {
        self.ambient_temperature_k = t_k;
        self
    }

    pub fn validate(&self) -> SimResult<()> {
        self.liquid.validate()?;
        self.hood.validate()?;
        validate_temperature(self.ambient_temperature_k)?;
        if !self.spill_volume_m3.is_finite() || self.spill_volume_m3 <= 0.0 {
            return Err(SimError::InvalidArg {
                what: "spill volume must be positive",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn water() -> LiquidProperties {
        LiquidProperties {
            molar_mass: 18.015,
            vapor_pressure_pa: 3169.9,
            density_kg_m3: 997.05,
        }
    }

    #[test]
    fn footprint_geometry() {
        let hood = Hood::new(2.0, PI / 2.0, 0.5);
        assert!((hood.area_m2() - PI).abs() < 1e-12);
        assert!((hood.max_pool_radius_m() - 1.0).abs() < 1e-12);
        assert!((hood.effective_diameter_m() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn still_air_is_valid_but_negative_velocity_is_not() {
        assert!(Hood::new(1.0, 1.0, 0.0).validate().is_ok());
        assert!(Hood::new(1.0, 1.0, -0.1).validate().is_err());
        assert!(Hood::new(0.0, 1.0, 0.5).validate().is_err());
    }

    #[test]
    fn pool_inputs_validation() {
        let ok = PoolInputs::new(water(), Hood::new(1.0, 1.0, 0.5), 1e-3);
        assert!(ok.validate().is_ok());
        assert_eq!(ok.ambient_temperature_k, AMBIENT_K);

        let no_spill = PoolInputs::new(water(), Hood::new(1.0, 1.0, 0.5), 0.0);
        assert!(matches!(
            no_spill.validate(),
            Err(SimError::InvalidArg { .. })
        ));

        let cold = ok.clone().with_ambient_temperature(-1.0);
        assert!(matches!(cold.validate(), Err(SimError::NonPhysical { .. })));

        let mut bad_liquid = ok;
        bad_liquid.liquid.density_kg_m3 = f64::NAN;
        assert!(bad_liquid.validate().is_err());
    }
}
