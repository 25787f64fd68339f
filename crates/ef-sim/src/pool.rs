//! Spreading, evaporating liquid pool on a hood work surface.
//!
//! The spill pours in at a constant rate for the spill duration. Each step the
//! pool evaporates from its current area, receives any remaining inflow, settles
//! to a height no thinner than the surface roughness, spreads under gravity and is
//! finally limited to the hood footprint.

use crate::error::SimResult;
use crate::inputs::PoolInputs;
use crate::mass_transfer::{mass_transfer_coefficient, schmidt_number, vapor_mass_flux};
use crate::sim::{PoolOptions, TIME_EPS};
use ef_core::units::constants::G0_MPS2;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Minimum pool height (surface roughness) [m].
pub const ROUGHNESS_HEIGHT_M: f64 = 0.01;

/// Evaporation rate floor applied while liquid remains [kg/s].
pub const MIN_EVAPORATION_RATE_KG_S: f64 = 4e-5;

/// Pool state at the end of a step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    /// Elapsed time [s]
    pub t_s: f64,
    /// Pool radius [m]
    pub radius_m: f64,
    /// Pool height [m]
    pub height_m: f64,
    /// Liquid volume in the pool [m³]
    pub volume_m3: f64,
    /// Evaporation rate during the last step [kg/s]
    pub flux_kg_s: f64,
    /// Rate of the previous step, `None` before the first step
    pub prev_flux_kg_s: Option<f64>,
    /// Cumulative evaporated mass [kg]
    pub evaporated_kg: f64,
    /// Cumulative volume poured into the pool [m³]
    pub deposited_m3: f64,
}

/// Result of advancing the pool by one step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Continue,
    /// All liquid evaporated during the step.
    Depleted,
}

/// Fixed-step pool model. Construct once per run; stepping never fails.
#[derive(Clone, Debug)]
pub struct PoolEvaporationSimulator {
    inputs: PoolInputs,
    opts: PoolOptions,
    inflow_m3_s: f64,
    /// (32·g·Q/(9π))^(1/4), the inflow spreading scale
    spread_scale: f64,
    max_radius_m: f64,
    schmidt: f64,
}

impl PoolEvaporationSimulator {
    pub fn new(inputs: PoolInputs, opts: PoolOptions) -> SimResult<Self> {
        inputs.validate()?;
        opts.validate()?;

        let inflow_m3_s = inputs.spill_volume_m3 / opts.spill_duration_s;
        let spread_scale = (32.0 * G0_MPS2 * inflow_m3_s / (9.0 * PI)).powf(0.25);
        let max_radius_m = inputs.hood.max_pool_radius_m();
        let schmidt = schmidt_number(inputs.liquid.molar_mass);

        Ok(Self {
            inputs,
            opts,
            inflow_m3_s,
            spread_scale,
            max_radius_m,
            schmidt,
        })
    }

    pub fn inputs(&self) -> &PoolInputs {
        &self.inputs
    }

    pub fn options(&self) -> &PoolOptions {
        &self.opts
    }

    /// Constant pour rate [m³/s].
    pub fn inflow_rate_m3_s(&self) -> f64 {
        self.inflow_m3_s
    }

    pub fn max_radius_m(&self) -> f64 {
        self.max_radius_m
    }

    /// Evaporation rate of a pool of radius `radius_m` [kg/s], never below
    /// [`MIN_EVAPORATION_RATE_KG_S`].
    pub fn evaporation_rate_kg_s(&self, radius_m: f64) -> f64 {
        let liquid = &self.inputs.liquid;
        let km = mass_transfer_coefficient(
            self.inputs.hood.face_velocity_mps,
            2.0 * radius_m,
            self.schmidt,
        );
        let flux = vapor_mass_flux(
            km,
            liquid.molar_mass,
            liquid.vapor_pressure_pa,
            self.inputs.ambient_temperature_k,
        );
        // f64::max ignores a NaN operand
        (PI * radius_m * radius_m * flux).max(MIN_EVAPORATION_RATE_KG_S)
    }

    /// State at t = 0: the first pour increment, spread and clamped.
    pub fn initial_state(&self) -> SimulationState {
        let dt = self.opts.dt;
        let deposit = (self.inflow_m3_s * dt).min(self.inputs.spill_volume_m3);
        let mut state = SimulationState {
            radius_m: self.spread_scale * dt.powf(0.75),
            volume_m3: deposit,
            deposited_m3: deposit,
            ..Default::default()
        };
        self.settle_height(&mut state);
        self.clamp_to_footprint(&mut state);
        state
    }

    /// Advance `state` by one step of `dt`.
    pub fn step(&self, state: &mut SimulationState) -> StepOutcome {
        let dt = self.opts.dt;
        let rho = self.inputs.liquid.density_kg_m3;
        let t = state.t_s + dt;

        let flux = self.evaporation_rate_kg_s(state.radius_m);
        let previous = state.prev_flux_kg_s.unwrap_or(flux);
        let mass = 0.5 * (previous + flux) * dt;
        let available_kg = state.volume_m3 * rho;

        state.t_s = t;
        state.flux_kg_s = flux;
        state.prev_flux_kg_s = Some(flux);

        if mass >= available_kg {
            state.evaporated_kg += available_kg;
            state.volume_m3 = 0.0;
            return StepOutcome::Depleted;
        }
        state.evaporated_kg += mass;
        state.volume_m3 = (state.volume_m3 - mass / rho).max(0.0);

        if t < self.opts.spill_duration_s - TIME_EPS {
            let remaining = self.inputs.spill_volume_m3 - state.deposited_m3;
            let deposit = (self.inflow_m3_s * dt).min(remaining);
            if deposit > 0.0 {
                state.volume_m3 += deposit;
                state.deposited_m3 += deposit;
                state.radius_m += 0.75 * self.spread_scale * dt.powf(0.75);
            }
        }

        self.settle_height(state);
        state.radius_m += (2.0 * G0_MPS2 * (state.height_m - ROUGHNESS_HEIGHT_M)).sqrt() * dt;
        self.clamp_to_footprint(state);

        StepOutcome::Continue
    }

    /// Height from volume and radius; a pool thinner than the roughness height
    /// is redrawn at that height with a smaller radius.
    fn settle_height(&self, state: &mut SimulationState) {
        state.height_m = state.volume_m3 / (PI * state.radius_m * state.radius_m);
        if state.height_m < ROUGHNESS_HEIGHT_M {
            state.height_m = ROUGHNESS_HEIGHT_M;
            state.radius_m = (state.volume_m3 / (PI * ROUGHNESS_HEIGHT_M)).sqrt();
        }
    }

    /// Liquid beyond the footprint is not tracked.
    fn clamp_to_footprint(&self, state: &mut SimulationState) {
        if state.radius_m > self.max_radius_m {
            state.radius_m = self.max_radius_m;
            let capacity = PI * self.max_radius_m * self.max_radius_m * state.height_m;
            state.volume_m3 = state.volume_m3.min(capacity);
        }
    }
}
