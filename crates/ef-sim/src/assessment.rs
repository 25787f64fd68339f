//! Request-level entry points.
//!
//! A [`SimulationRequest`] carries hood-side quantities (feet, feet per minute,
//! millilitres) as `uom` values. Liquid properties are resolved from the mixture
//! through a [`PropertyProvider`], manual overrides win per property, and every
//! water substitution made on the way is returned in the report.

use crate::concentration::{SashOpening, hood_concentration_ppm};
use crate::error::{SimError, SimResult};
use crate::inputs::{Hood, LiquidProperties, PoolInputs};
use crate::pool::PoolEvaporationSimulator;
use crate::sim::{CheckpointTotals, PoolOptions, SimRecord};
use crate::steady::steady_state_rate;
use ef_core::numeric::ensure_positive;
use ef_core::units::constants::ambient;
use ef_core::units::{
    Density, Length, MolarMass, Pressure, Temperature, Velocity, Volume, in_kg_per_kmol,
};
use ef_props::{
    AmountBasis, ChemicalId, Mixture, MixtureComponent, PropertyProvider, Resolved, Substitution,
    water_liquid_density,
};
use serde::Serialize;

/// One mixture component as entered.
#[derive(Clone, Debug, PartialEq)]
pub struct ComponentSpec {
    pub chemical: ChemicalId,
    pub amount: f64,
    pub basis: AmountBasis,
}

impl ComponentSpec {
    pub fn new(chemical: impl Into<ChemicalId>, amount: f64, basis: AmountBasis) -> Self {
        Self {
            chemical: chemical.into(),
            amount,
            basis,
        }
    }
}

/// Liquid properties entered by hand. Each one replaces the mixture-derived value.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ManualOverrides {
    pub molar_mass: Option<MolarMass>,
    pub vapor_pressure: Option<Pressure>,
    pub density: Option<Density>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SimulationRequest {
    pub components: Vec<ComponentSpec>,
    pub ambient_temperature: Temperature,
    pub spill_volume: Option<Volume>,
    pub face_velocity: Option<Velocity>,
    pub hood_length: Option<Length>,
    pub hood_depth: Option<Length>,
    pub sash_height: Option<Length>,
    pub sash_width: Option<Length>,
    pub manual: ManualOverrides,
    pub options: PoolOptions,
}

impl Default for SimulationRequest {
    fn default() -> Self {
        Self {
            components: Vec::new(),
            ambient_temperature: ambient(),
            spill_volume: None,
            face_velocity: None,
            hood_length: None,
            hood_depth: None,
            sash_height: None,
            sash_width: None,
            manual: ManualOverrides::default(),
            options: PoolOptions::default(),
        }
    }
}

fn required_positive(value: Option<f64>, what: &'static str) -> SimResult<f64> {
    let value = value.ok_or(SimError::MissingInput { what })?;
    ensure_positive(value, what).map_err(|_| SimError::InvalidArg { what })
}

impl SimulationRequest {
    pub fn with_component(
        mut self,
        chemical: impl Into<ChemicalId>,
        amount: f64,
        basis: AmountBasis,
    ) -> Self {
        self.components
            .push(ComponentSpec::new(chemical, amount, basis));
        self
    }

    pub fn with_hood(mut self, length: Length, depth: Length, face_velocity: Velocity) -> Self {
        self.hood_length = Some(length);
        self.hood_depth = Some(depth);
        self.face_velocity = Some(face_velocity);
        self
    }

    pub fn with_spill_volume(mut self, volume: Volume) -> Self {
        self.spill_volume = Some(volume);
        self
    }

    pub fn with_sash(mut self, height: Length, width: Length) -> Self {
        self.sash_height = Some(height);
        self.sash_width = Some(width);
        self
    }

    pub fn with_manual(mut self, manual: ManualOverrides) -> Self {
        self.manual = manual;
        self
    }

    /// Hood geometry and face velocity in SI; all three must be present and positive.
    pub fn hood(&self) -> SimResult<Hood> {
        let length_m = required_positive(self.hood_length.map(|l| l.value), "hood length")?;
        let depth_m = required_positive(self.hood_depth.map(|d| d.value), "hood depth")?;
        let face_velocity_mps =
            required_positive(self.face_velocity.map(|u| u.value), "face velocity")?;
        Ok(Hood::new(length_m, depth_m, face_velocity_mps))
    }

    /// Sash opening, if both dimensions are given.
    pub fn sash(&self) -> SimResult<Option<SashOpening>> {
        match (self.sash_height, self.sash_width) {
            (None, None) => Ok(None),
            (height, width) => {
                let height_m = required_positive(height.map(|h| h.value), "sash height")?;
                let width_m = required_positive(width.map(|w| w.value), "sash width")?;
                Ok(Some(SashOpening::new(height_m, width_m)))
            }
        }
    }

    fn concentration_ppm(&self, rate_kg_s: f64, liquid: &LiquidProperties, hood: &Hood) -> SimResult<Option<f64>> {
        self.sash()?
            .map(|sash| {
                hood_concentration_ppm(
                    rate_kg_s,
                    liquid.molar_mass,
                    &sash,
                    hood.face_velocity_mps,
                    self.ambient_temperature.value,
                )
            })
            .transpose()
    }
}

/// Liquid properties of the spill at the request's ambient temperature.
///
/// With components, molecular weight, vapor pressure and density come from the
/// mixing rules unless overridden. Without components, manual molecular weight
/// and vapor pressure are required and a missing density falls back to water's.
pub fn resolve_liquid(
    request: &SimulationRequest,
    provider: &dyn PropertyProvider,
) -> SimResult<Resolved<LiquidProperties>> {
    let t_k = request.ambient_temperature.value;
    let manual = &request.manual;
    let mut substitutions = Vec::new();

    let liquid = if request.components.is_empty() {
        let molar_mass =
            manual
                .molar_mass
                .map(in_kg_per_kmol)
                .ok_or(SimError::MissingInput {
                    what: "molecular weight (no components given)",
                })?;
        let vapor_pressure = manual.vapor_pressure.ok_or(SimError::MissingInput {
            what: "vapor pressure (no components given)",
        })?;
        let density_kg_m3 = match manual.density {
            Some(rho) => rho.value,
            None => {
                let rho = water_liquid_density(provider, t_k);
                substitutions.extend(rho.substitutions);
                rho.value
            }
        };
        LiquidProperties {
            molar_mass,
            vapor_pressure_pa: vapor_pressure.value,
            density_kg_m3,
        }
    } else {
        let mut components = Vec::with_capacity(request.components.len());
        for spec in &request.components {
            let comp = MixtureComponent::from_provider(
                provider,
                spec.chemical.clone(),
                spec.amount,
                spec.basis,
            );
            substitutions.extend(comp.substitutions);
            components.push(comp.value);
        }
        let mixture = Mixture::new(components)?;

        let molar_mass = manual
            .molar_mass
            .map(in_kg_per_kmol)
            .unwrap_or_else(|| mixture.average_molecular_weight());
        let vapor_pressure_pa = match manual.vapor_pressure {
            Some(vp) => vp.value,
            None => {
                let vp = mixture.vapor_pressure(provider, t_k);
                substitutions.extend(vp.substitutions);
                vp.value
            }
        };
        let density_kg_m3 = match manual.density {
            Some(rho) => rho.value,
            None => {
                let rho = mixture.liquid_density(provider, t_k);
                substitutions.extend(rho.substitutions);
                rho.value
            }
        };
        LiquidProperties {
            molar_mass,
            vapor_pressure_pa,
            density_kg_m3,
        }
    };

    liquid.validate()?;
    Ok(Resolved {
        value: liquid,
        substitutions,
    })
}

/// Cumulative evaporated mass at the report times [g].
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Checkpoints {
    pub at_10_s_g: f64,
    pub at_60_s_g: f64,
    pub at_3600_s_g: f64,
}

impl From<CheckpointTotals> for Checkpoints {
    fn from(kg: CheckpointTotals) -> Self {
        Self {
            at_10_s_g: kg.at_10_s_kg * 1000.0,
            at_60_s_g: kg.at_60_s_kg * 1000.0,
            at_3600_s_g: kg.at_3600_s_kg * 1000.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EvaporationReport {
    pub peak_rate_g_per_s: f64,
    pub peak_time_s: f64,
    pub checkpoints: Checkpoints,
    pub time_to_full_evaporation_s: Option<f64>,
    pub substituted_properties: Vec<Substitution>,
    /// Properties the run used
    pub liquid: LiquidProperties,
    pub spill_mass_g: f64,
    /// Breathing-zone estimate at the peak rate, when a sash opening was given
    pub concentration_ppm: Option<f64>,
    pub history: SimRecord,
}

/// Resolve properties and run the transient pool model.
pub fn run_simulation(
    request: &SimulationRequest,
    provider: &dyn PropertyProvider,
) -> SimResult<EvaporationReport> {
    let hood = request.hood()?;
    let spill_volume_m3 =
        required_positive(request.spill_volume.map(|v| v.value), "spill volume")?;
    let liquid = resolve_liquid(request, provider)?;

    let inputs = PoolInputs::new(liquid.value, hood, spill_volume_m3)
        .with_ambient_temperature(request.ambient_temperature.value);
    let sim = PoolEvaporationSimulator::new(inputs, request.options.clone())?;
    let run = sim.run()?;

    let concentration_ppm = request.concentration_ppm(run.peak_flux_kg_s, &liquid.value, &hood)?;

    Ok(EvaporationReport {
        peak_rate_g_per_s: run.peak_flux_kg_s * 1000.0,
        peak_time_s: run.peak_time_s,
        checkpoints: run.checkpoints.into(),
        time_to_full_evaporation_s: run.time_to_full_evaporation_s,
        substituted_properties: liquid.substitutions,
        liquid: liquid.value,
        spill_mass_g: spill_volume_m3 * liquid.value.density_kg_m3 * 1000.0,
        concentration_ppm,
        history: run.history,
    })
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SteadyStateReport {
    pub rate_g_per_s: f64,
    /// Constant-rate totals at the report times
    pub checkpoints: Checkpoints,
    /// [m/s]
    pub mass_transfer_coefficient_m_s: f64,
    pub substituted_properties: Vec<Substitution>,
    pub liquid: LiquidProperties,
    pub concentration_ppm: Option<f64>,
}

/// Resolve properties and evaluate the steady-state rate. The spill volume is
/// not used.
pub fn run_steady_state(
    request: &SimulationRequest,
    provider: &dyn PropertyProvider,
) -> SimResult<SteadyStateReport> {
    let hood = request.hood()?;
    let liquid = resolve_liquid(request, provider)?;
    let rate = steady_state_rate(&liquid.value, &hood, request.ambient_temperature.value)?;
    let concentration_ppm = request.concentration_ppm(rate.rate_kg_s, &liquid.value, &hood)?;

    Ok(SteadyStateReport {
        rate_g_per_s: rate.rate_g_s(),
        checkpoints: rate.totals.into(),
        mass_transfer_coefficient_m_s: rate.mass_transfer_coefficient_m_s,
        substituted_properties: liquid.substitutions,
        liquid: liquid.value,
        concentration_ppm,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ef_core::units::{fpm, ft, kg_per_kmol, kg_per_m3, ml, pa};
    use ef_props::{PropertyId, SubstituteSource};

    /// Water and one organic; "unknown" has a molecular weight and nothing else.
    struct TwoLiquids;

    impl PropertyProvider for TwoLiquids {
        fn name(&self) -> &str {
            "two-liquids"
        }

        fn property(&self, chemical: &ChemicalId, property: PropertyId, _t_k: f64) -> Option<f64> {
            match (chemical.as_str(), property) {
                ("7732-18-5", PropertyId::VaporPressure) => Some(3170.0),
                ("7732-18-5", PropertyId::LiquidDensity) => Some(55.35),
                ("67-64-1", PropertyId::VaporPressure) => Some(30_800.0),
                ("67-64-1", PropertyId::LiquidDensity) => Some(13.5),
                _ => None,
            }
        }

        fn molar_mass(&self, chemical: &ChemicalId) -> Option<f64> {
            match chemical.as_str() {
                "7732-18-5" => Some(18.015),
                "67-64-1" => Some(58.08),
                "unknown" => Some(100.0),
                _ => None,
            }
        }
    }

    fn hooded() -> SimulationRequest {
        SimulationRequest::default()
            .with_hood(ft(6.0), ft(2.5), fpm(100.0))
            .with_spill_volume(ml(500.0))
    }

    #[test]
    fn missing_hood_dimension_is_reported_before_the_run() {
        let request = SimulationRequest {
            hood_depth: None,
            ..hooded().with_component("67-64-1", 1.0, AmountBasis::Molar)
        };
        let err = run_simulation(&request, &TwoLiquids).unwrap_err();
        assert_eq!(err, SimError::MissingInput { what: "hood depth" });
    }

    #[test]
    fn zero_face_velocity_is_rejected_at_request_level() {
        let request = hooded()
            .with_hood(ft(6.0), ft(2.5), fpm(0.0))
            .with_component("67-64-1", 1.0, AmountBasis::Molar);
        let err = run_simulation(&request, &TwoLiquids).unwrap_err();
        assert_eq!(err, SimError::InvalidArg { what: "face velocity" });
    }

    #[test]
    fn no_components_requires_manual_mw_and_vp() {
        let err = resolve_liquid(&hooded(), &TwoLiquids).unwrap_err();
        assert!(matches!(err, SimError::MissingInput { .. }));

        let request = hooded().with_manual(ManualOverrides {
            molar_mass: Some(kg_per_kmol(50.0)),
            vapor_pressure: None,
            density: None,
        });
        assert!(matches!(
            resolve_liquid(&request, &TwoLiquids),
            Err(SimError::MissingInput { .. })
        ));
    }

    #[test]
    fn manual_liquid_without_density_borrows_water() {
        let request = hooded().with_manual(ManualOverrides {
            molar_mass: Some(kg_per_kmol(50.0)),
            vapor_pressure: Some(pa(2000.0)),
            density: None,
        });
        let liquid = resolve_liquid(&request, &TwoLiquids).unwrap();
        assert!((liquid.value.molar_mass - 50.0).abs() < 1e-9);
        assert!((liquid.value.density_kg_m3 - 55.35 * 18.015).abs() < 1e-9);
        assert_eq!(liquid.substitutions.len(), 1);
        assert_eq!(liquid.substitutions[0].chemical, None);
        assert_eq!(liquid.substitutions[0].source, SubstituteSource::WaterCorrelation);
    }

    #[test]
    fn manual_values_override_mixture_per_property() {
        let request = hooded()
            .with_component("67-64-1", 1.0, AmountBasis::Molar)
            .with_manual(ManualOverrides {
                molar_mass: None,
                vapor_pressure: Some(pa(1000.0)),
                density: Some(kg_per_m3(700.0)),
            });
        let liquid = resolve_liquid(&request, &TwoLiquids).unwrap().value;
        assert_eq!(liquid.molar_mass, 58.08);
        assert_eq!(liquid.vapor_pressure_pa, 1000.0);
        assert_eq!(liquid.density_kg_m3, 700.0);
    }

    #[test]
    fn component_without_data_is_listed_in_report() {
        let request = hooded()
            .with_component("67-64-1", 50.0, AmountBasis::Molar)
            .with_component("unknown", 50.0, AmountBasis::Molar);
        let report = run_simulation(&request, &TwoLiquids).unwrap();
        let unknown = ChemicalId::from("unknown");
        let listed: Vec<_> = report
            .substituted_properties
            .iter()
            .filter(|s| s.chemical.as_ref() == Some(&unknown))
            .map(|s| s.property)
            .collect();
        assert_eq!(listed, vec![PropertyId::VaporPressure, PropertyId::LiquidDensity]);
        assert_eq!(report.liquid.molar_mass, 0.5 * 58.08 + 0.5 * 100.0);
    }

    #[test]
    fn concentration_needs_both_sash_dimensions() {
        let base = hooded().with_component("67-64-1", 1.0, AmountBasis::Molar);
        let report = run_simulation(&base, &TwoLiquids).unwrap();
        assert_eq!(report.concentration_ppm, None);

        let with_sash = base.clone().with_sash(ft(1.5), ft(5.0));
        let report = run_simulation(&with_sash, &TwoLiquids).unwrap();
        assert!(report.concentration_ppm.unwrap() > 0.0);

        let half = SimulationRequest {
            sash_width: None,
            ..with_sash
        };
        assert_eq!(
            run_simulation(&half, &TwoLiquids).unwrap_err(),
            SimError::MissingInput { what: "sash width" }
        );
    }

    #[test]
    fn steady_state_ignores_spill_volume() {
        let request = SimulationRequest {
            spill_volume: None,
            ..hooded().with_component("7732-18-5", 1.0, AmountBasis::Mass)
        };
        let report = run_steady_state(&request, &TwoLiquids).unwrap();
        assert!(report.rate_g_per_s > 0.0);
        assert!(report.substituted_properties.is_empty());
        assert!((report.checkpoints.at_60_s_g - 60.0 * report.rate_g_per_s).abs() < 1e-9);
    }
}
