//! Steady-state evaporation over the whole hood footprint.
//!
//! Simplified legacy mode: the liquid covers the full work surface and evaporates
//! at a constant rate. No spreading and no rate floor.

use crate::error::SimResult;
use crate::inputs::{Hood, LiquidProperties, validate_temperature};
use crate::mass_transfer::{mass_transfer_coefficient, schmidt_number, vapor_mass_flux};
use crate::sim::CheckpointTotals;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SteadyStateRate {
    /// Evaporation rate [kg/s]
    pub rate_kg_s: f64,
    /// [m/s]
    pub mass_transfer_coefficient_m_s: f64,
    /// Diameter of the circle with the footprint's area [m]
    pub effective_diameter_m: f64,
    pub schmidt_number: f64,
    /// Constant-rate totals at the report times
    pub totals: CheckpointTotals,
}

impl SteadyStateRate {
    pub fn rate_g_s(&self) -> f64 {
        self.rate_kg_s * 1000.0
    }
}

/// rate = A · Km(u, d_eff, Sc) · MW · VP / (R · T)
pub fn steady_state_rate(
    liquid: &LiquidProperties,
    hood: &Hood,
    t_k: f64,
) -> SimResult<SteadyStateRate> {
    liquid.validate()?;
    hood.validate()?;
    validate_temperature(t_k)?;

    let effective_diameter_m = hood.effective_diameter_m();
    let sc = schmidt_number(liquid.molar_mass);
    let km = mass_transfer_coefficient(hood.face_velocity_mps, effective_diameter_m, sc);
    let rate_kg_s = hood.area_m2()
        * vapor_mass_flux(km, liquid.molar_mass, liquid.vapor_pressure_pa, t_k);

    tracing::debug!(rate_kg_s, km, effective_diameter_m, "steady-state rate");

    Ok(SteadyStateRate {
        rate_kg_s,
        mass_transfer_coefficient_m_s: km,
        effective_diameter_m,
        schmidt_number: sc,
        totals: CheckpointTotals::from_constant_rate(rate_kg_s),
    })
}
