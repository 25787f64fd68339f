//! Conversion from a scenario file to a simulation request.

use crate::schema::{BasisDef, Scenario};
use ef_core::units::{fpm, ft, k, kg_per_kmol, kg_per_m3, ml, pa};
use ef_props::AmountBasis;
use ef_sim::{ManualOverrides, PoolOptions, SimulationRequest};
use std::time::Duration;

impl From<BasisDef> for AmountBasis {
    fn from(basis: BasisDef) -> Self {
        match basis {
            BasisDef::Mass => AmountBasis::Mass,
            BasisDef::Molar => AmountBasis::Molar,
        }
    }
}

impl Scenario {
    /// Build the request. Validation happens on load; the request layer checks
    /// its own preconditions again before running.
    pub fn to_request(&self) -> SimulationRequest {
        let mut request = SimulationRequest {
            ambient_temperature: k(self.ambient_temperature_k),
            options: PoolOptions {
                dt: self.run.dt_s,
                max_duration_s: self.run.max_duration_s,
                spill_duration_s: self.run.spill_duration_s,
                record_every: self.run.record_every,
                timeout: self
                    .run
                    .timeout_s
                    .and_then(|t| Duration::try_from_secs_f64(t).ok()),
            },
            ..SimulationRequest::default()
        }
        .with_hood(
            ft(self.hood.length_ft),
            ft(self.hood.depth_ft),
            fpm(self.hood.face_velocity_fpm),
        )
        .with_spill_volume(ml(self.spill.volume_ml));

        if let Some(sash) = &self.hood.sash {
            request = request.with_sash(ft(sash.height_ft), ft(sash.width_ft));
        }

        for component in &self.components {
            request = request.with_component(
                component.chemical.as_str(),
                component.amount,
                component.basis.into(),
            );
        }

        if let Some(manual) = &self.manual {
            request = request.with_manual(ManualOverrides {
                molar_mass: manual.molar_mass.map(kg_per_kmol),
                vapor_pressure: manual.vapor_pressure_pa.map(pa),
                density: manual.density_kg_m3.map(kg_per_m3),
            });
        }

        request
    }
}
