//! Mass-transfer correlations for evaporation into a moving air stream.
//!
//! Diffusivity is scaled from water's value by the square root of the molecular
//! weight ratio. The coefficient is the empirical pool correlation
//!
//! ```text
//! Km = 0.0048 · u^(7/9) · d^(-1/9) · Sc^(-2/3)        [m/s]
//! ```
//!
//! with `u` the air velocity [m/s] and `d` a characteristic pool diameter [m].

use ef_core::units::constants::R_UNIVERSAL;

/// Diffusivity of water vapor in air [m²/s].
pub const WATER_DIFFUSIVITY_M2_S: f64 = 2.4e-5;

/// Molecular weight of water used for diffusivity scaling [kg/kmol].
pub const WATER_MOLAR_MASS: f64 = 18.015;

/// Kinematic viscosity of air [m²/s].
pub const AIR_KINEMATIC_VISCOSITY_M2_S: f64 = 1.5e-5;

const KM_PREFACTOR: f64 = 0.0048;

/// Vapor diffusivity in air [m²/s].
pub fn diffusivity_m2_s(molar_mass: f64) -> f64 {
    WATER_DIFFUSIVITY_M2_S * (WATER_MOLAR_MASS / molar_mass).sqrt()
}

pub fn schmidt_number(molar_mass: f64) -> f64 {
    AIR_KINEMATIC_VISCOSITY_M2_S / diffusivity_m2_s(molar_mass)
}

/// Mass-transfer coefficient [m/s]. Zero for still air.
pub fn mass_transfer_coefficient(velocity_mps: f64, diameter_m: f64, schmidt: f64) -> f64 {
    if velocity_mps <= 0.0 {
        return 0.0;
    }
    KM_PREFACTOR
        * velocity_mps.powf(7.0 / 9.0)
        * diameter_m.powf(-1.0 / 9.0)
        * schmidt.powf(-2.0 / 3.0)
}

/// Evaporative mass flux per unit area [kg/(m²·s)]: Km·MW·VP/(R·T).
pub fn vapor_mass_flux(km_m_s: f64, molar_mass: f64, vapor_pressure_pa: f64, t_k: f64) -> f64 {
    km_m_s * molar_mass * vapor_pressure_pa / (R_UNIVERSAL * t_k)
}
