//! Mixture composition and mixing rules.

use crate::chemical::ChemicalId;
use crate::error::{PropsError, PropsResult};
use crate::provider::PropertyProvider;
use crate::substitution::{
    Resolved, resolve_liquid_mass_density, resolve_molar_mass, resolve_vapor_pressure,
};
use ef_core::numeric::{Tolerances, nearly_equal};
use serde::{Deserialize, Serialize};

/// How a component amount was entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmountBasis {
    /// Amount is a mass (or mass percentage).
    #[default]
    Mass,
    /// Amount is a mole count (or mole percentage).
    Molar,
}

/// One mixture component with its derived mole fraction.
#[derive(Debug, Clone, PartialEq)]
pub struct MixtureComponent {
    pub chemical: ChemicalId,
    /// Molecular weight [kg/kmol]
    pub molar_mass: f64,
    /// Raw amount as entered
    pub amount: f64,
    pub basis: AmountBasis,
    /// Mole fraction; 0.0 until the component passes through [`to_mole_fractions`].
    pub mole_fraction: f64,
}

impl MixtureComponent {
    pub fn new(
        chemical: impl Into<ChemicalId>,
        molar_mass: f64,
        amount: f64,
        basis: AmountBasis,
    ) -> Self {
        Self {
            chemical: chemical.into(),
            molar_mass,
            amount,
            basis,
            mole_fraction: 0.0,
        }
    }

    /// Build a component taking its molecular weight from `provider`, with water
    /// substituted when the chemical has none.
    pub fn from_provider(
        provider: &dyn PropertyProvider,
        chemical: ChemicalId,
        amount: f64,
        basis: AmountBasis,
    ) -> Resolved<Self> {
        let mw = resolve_molar_mass(provider, &chemical);
        mw.map(|molar_mass| Self::new(chemical, molar_mass, amount, basis))
    }

    /// Amount expressed on a molar basis.
    pub fn moles(&self) -> f64 {
        match self.basis {
            AmountBasis::Molar => self.amount,
            AmountBasis::Mass => self.amount / self.molar_mass,
        }
    }
}

/// Normalize component amounts to mole fractions.
///
/// Mass amounts are divided by molecular weight; molar amounts are used as-is.
/// Raw amounts are preserved, so applying this twice gives identical fractions.
pub fn to_mole_fractions(components: &[MixtureComponent]) -> PropsResult<Vec<MixtureComponent>> {
    if components.is_empty() {
        return Err(PropsError::InvalidArg {
            what: "empty mixture",
        });
    }

    let mut total = 0.0;
    for comp in components {
        if !comp.molar_mass.is_finite() || comp.molar_mass <= 0.0 {
            return Err(PropsError::NonPhysical {
                what: "component molar mass must be positive",
            });
        }
        if !comp.amount.is_finite() {
            return Err(PropsError::NonPhysical {
                what: "non-finite component amount",
            });
        }
        if comp.amount < 0.0 {
            return Err(PropsError::NonPhysical {
                what: "negative component amount",
            });
        }
        total += comp.moles();
    }

    if total <= 0.0 || !total.is_finite() {
        return Err(PropsError::NonPhysical {
            what: "component amounts sum to zero or non-finite",
        });
    }

    Ok(components
        .iter()
        .map(|comp| MixtureComponent {
            mole_fraction: comp.moles() / total,
            ..comp.clone()
        })
        .collect())
}

/// Σ xᵢ·MWᵢ [kg/kmol].
pub fn average_molecular_weight(components: &[MixtureComponent]) -> f64 {
    components
        .iter()
        .map(|comp| comp.mole_fraction * comp.molar_mass)
        .sum()
}

/// Raoult's law: Σ xᵢ·VPᵢ(T) [Pa].
pub fn mixture_vapor_pressure(
    components: &[MixtureComponent],
    provider: &dyn PropertyProvider,
    t_k: f64,
) -> Resolved<f64> {
    let mut out = Resolved::exact(0.0);
    for comp in components {
        let vp = resolve_vapor_pressure(provider, &comp.chemical, t_k);
        out.value += comp.mole_fraction * vp.value;
        out.substitutions.extend(vp.substitutions);
    }
    out
}

/// Volume-additive liquid density [kg/m³]: Σ massᵢ / Σ (massᵢ/ρᵢ).
///
/// Components without density data use water's density at the same temperature;
/// their ids appear in the returned substitutions.
pub fn average_liquid_density(
    components: &[MixtureComponent],
    provider: &dyn PropertyProvider,
    t_k: f64,
) -> Resolved<f64> {
    let mut total_mass = 0.0;
    let mut total_volume = 0.0;
    let mut substitutions = Vec::new();

    for comp in components {
        let mass = comp.mole_fraction * comp.molar_mass;
        let rho = resolve_liquid_mass_density(provider, &comp.chemical, t_k);
        total_mass += mass;
        total_volume += mass / rho.value;
        substitutions.extend(rho.substitutions);
    }

    Resolved {
        value: total_mass / total_volume,
        substitutions,
    }
}

/// A normalized mixture.
#[derive(Debug, Clone, PartialEq)]
pub struct Mixture {
    components: Vec<MixtureComponent>,
}

impl Mixture {
    /// Normalize `components` into a mixture.
    pub fn new(components: Vec<MixtureComponent>) -> PropsResult<Self> {
        Ok(Self {
            components: to_mole_fractions(&components)?,
        })
    }

    /// Single-component mixture.
    pub fn pure(chemical: impl Into<ChemicalId>, molar_mass: f64) -> PropsResult<Self> {
        Self::new(vec![MixtureComponent::new(
            chemical,
            molar_mass,
            1.0,
            AmountBasis::Molar,
        )])
    }

    pub fn components(&self) -> &[MixtureComponent] {
        &self.components
    }

    /// Mole fraction of a chemical (0.0 if absent; duplicates are summed).
    pub fn mole_fraction(&self, chemical: &ChemicalId) -> f64 {
        self.components
            .iter()
            .filter(|comp| &comp.chemical == chemical)
            .map(|comp| comp.mole_fraction)
            .sum()
    }

    /// Returns `Some(chemical)` if one chemical makes up the whole mixture.
    pub fn is_pure(&self) -> Option<&ChemicalId> {
        let first = &self.components.first()?.chemical;
        let tol = Tolerances {
            abs: 1e-10,
            rel: 1e-10,
        };
        nearly_equal(self.mole_fraction(first), 1.0, tol).then_some(first)
    }

    pub fn average_molecular_weight(&self) -> f64 {
        average_molecular_weight(&self.components)
    }

    pub fn vapor_pressure(&self, provider: &dyn PropertyProvider, t_k: f64) -> Resolved<f64> {
        mixture_vapor_pressure(&self.components, provider, t_k)
    }

    pub fn liquid_density(&self, provider: &dyn PropertyProvider, t_k: f64) -> Resolved<f64> {
        average_liquid_density(&self.components, provider, t_k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::PropertyId;
    use crate::substitution::WaterReference;

    struct FixedProvider;

    impl PropertyProvider for FixedProvider {
        fn name(&self) -> &str {
            "fixed"
        }

        fn property(&self, chemical: &ChemicalId, property: PropertyId, _t_k: f64) -> Option<f64> {
            match (chemical.as_str(), property) {
                ("water", PropertyId::VaporPressure) => Some(3000.0),
                ("ethanol", PropertyId::VaporPressure) => Some(8000.0),
                ("water", PropertyId::LiquidDensity) => Some(1000.0 / 18.0),
                ("ethanol", PropertyId::LiquidDensity) => Some(800.0 / 46.0),
                _ => None,
            }
        }

        fn molar_mass(&self, chemical: &ChemicalId) -> Option<f64> {
            match chemical.as_str() {
                "water" => Some(18.0),
                "ethanol" => Some(46.0),
                _ => None,
            }
        }
    }

    fn tol() -> Tolerances {
        Tolerances::FRACTION
    }

    #[test]
    fn equimolar_average_molecular_weight_is_exact() {
        let mix = Mixture::new(vec![
            MixtureComponent::new("water", 18.0, 50.0, AmountBasis::Molar),
            MixtureComponent::new("ethanol", 46.0, 50.0, AmountBasis::Molar),
        ])
        .unwrap();
        assert_eq!(mix.average_molecular_weight(), 32.0);
        assert_eq!(mix.is_pure(), None);
    }

    #[test]
    fn mass_basis_divides_by_molecular_weight() {
        // 18 g water = 1 mol, 46 g ethanol = 1 mol
        let comps = to_mole_fractions(&[
            MixtureComponent::new("water", 18.0, 18.0, AmountBasis::Mass),
            MixtureComponent::new("ethanol", 46.0, 46.0, AmountBasis::Mass),
        ])
        .unwrap();
        assert!(nearly_equal(comps[0].mole_fraction, 0.5, tol()));
        assert!(nearly_equal(comps[1].mole_fraction, 0.5, tol()));
    }

    #[test]
    fn mixed_bases_share_one_mole_total() {
        let comps = to_mole_fractions(&[
            MixtureComponent::new("water", 18.0, 36.0, AmountBasis::Mass),
            MixtureComponent::new("ethanol", 46.0, 2.0, AmountBasis::Molar),
        ])
        .unwrap();
        assert!(nearly_equal(comps[0].mole_fraction, 0.5, tol()));
        assert!(nearly_equal(comps[1].mole_fraction, 0.5, tol()));
    }

    #[test]
    fn normalization_is_idempotent() {
        let once = to_mole_fractions(&[
            MixtureComponent::new("water", 18.0, 3.0, AmountBasis::Mass),
            MixtureComponent::new("ethanol", 46.0, 7.0, AmountBasis::Molar),
        ])
        .unwrap();
        let twice = to_mole_fractions(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn invalid_inputs_are_rejected() {
        assert!(to_mole_fractions(&[]).is_err());
        assert!(
            to_mole_fractions(&[MixtureComponent::new("x", 10.0, -1.0, AmountBasis::Mass)])
                .is_err()
        );
        assert!(
            to_mole_fractions(&[MixtureComponent::new("x", 0.0, 1.0, AmountBasis::Mass)]).is_err()
        );
        assert!(
            to_mole_fractions(&[MixtureComponent::new("x", 10.0, 0.0, AmountBasis::Molar)])
                .is_err()
        );
        assert!(
            to_mole_fractions(&[MixtureComponent::new("x", 10.0, f64::NAN, AmountBasis::Molar)])
                .is_err()
        );
    }

    #[test]
    fn raoult_vapor_pressure() {
        let mix = Mixture::new(vec![
            MixtureComponent::new("water", 18.0, 1.0, AmountBasis::Molar),
            MixtureComponent::new("ethanol", 46.0, 3.0, AmountBasis::Molar),
        ])
        .unwrap();
        let vp = mix.vapor_pressure(&FixedProvider, 298.15);
        assert!(nearly_equal(vp.value, 0.25 * 3000.0 + 0.75 * 8000.0, tol()));
        assert!(!vp.is_substituted());
    }

    #[test]
    fn volume_additive_density() {
        let mix = Mixture::new(vec![
            MixtureComponent::new("water", 18.0, 1.0, AmountBasis::Molar),
            MixtureComponent::new("ethanol", 46.0, 1.0, AmountBasis::Molar),
        ])
        .unwrap();
        let rho = mix.liquid_density(&FixedProvider, 298.15);
        let (m1, m2) = (0.5 * 18.0, 0.5 * 46.0);
        let expected = (m1 + m2) / (m1 / 1000.0 + m2 / 800.0);
        assert!(nearly_equal(rho.value, expected, tol()));
    }

    #[test]
    fn missing_density_substitutes_water_and_reports_component() {
        let mix = Mixture::new(vec![
            MixtureComponent::new("ethanol", 46.0, 1.0, AmountBasis::Molar),
            MixtureComponent::new("mystery", 60.0, 1.0, AmountBasis::Molar),
        ])
        .unwrap();
        let rho = mix.liquid_density(&FixedProvider, 298.15);
        assert!(rho.is_substituted());
        assert_eq!(rho.substituted_chemicals(), vec![&ChemicalId::from("mystery")]);
        // FixedProvider has no CAS-keyed water, so the reference density is used.
        let (m1, m2) = (0.5 * 46.0, 0.5 * 60.0);
        let expected =
            (m1 + m2) / (m1 / 800.0 + m2 / WaterReference::STANDARD.liquid_density_kg_m3);
        assert!(nearly_equal(rho.value, expected, tol()));
    }

    #[test]
    fn from_provider_substitutes_unknown_molar_mass() {
        let comp = MixtureComponent::from_provider(
            &FixedProvider,
            "mystery".into(),
            10.0,
            AmountBasis::Mass,
        );
        assert_eq!(comp.value.molar_mass, 18.015);
        assert_eq!(comp.substitutions[0].property, PropertyId::MolecularWeight);

        let known =
            MixtureComponent::from_provider(&FixedProvider, "ethanol".into(), 10.0, AmountBasis::Mass);
        assert_eq!(known.value.molar_mass, 46.0);
        assert!(!known.is_substituted());
    }

    #[test]
    fn pure_mixture() {
        let mix = Mixture::pure("water", 18.0).unwrap();
        assert_eq!(mix.is_pure(), Some(&ChemicalId::from("water")));
        assert_eq!(mix.mole_fraction(&"water".into()), 1.0);
        assert_eq!(mix.mole_fraction(&"ethanol".into()), 0.0);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn basis(molar: bool) -> AmountBasis {
        if molar {
            AmountBasis::Molar
        } else {
            AmountBasis::Mass
        }
    }

    fn component() -> impl Strategy<Value = MixtureComponent> {
        (1e-6_f64..1000.0, 2.0_f64..500.0, any::<bool>())
            .prop_map(|(amount, mw, molar)| MixtureComponent::new("c", mw, amount, basis(molar)))
    }

    fn empty_component() -> impl Strategy<Value = MixtureComponent> {
        (2.0_f64..500.0, any::<bool>())
            .prop_map(|(mw, molar)| MixtureComponent::new("c", mw, 0.0, basis(molar)))
    }

    proptest! {
        #[test]
        fn normalized_sum_is_one(comps in prop::collection::vec(component(), 1..6)) {
            let normalized = to_mole_fractions(&comps).unwrap();
            let sum: f64 = normalized.iter().map(|c| c.mole_fraction).sum();
            prop_assert!(nearly_equal(sum, 1.0, Tolerances::FRACTION));
            for comp in &normalized {
                prop_assert!((0.0..=1.0).contains(&comp.mole_fraction));
            }

            let again = to_mole_fractions(&normalized).unwrap();
            prop_assert_eq!(normalized, again);
        }

        #[test]
        fn all_zero_amounts_are_rejected(comps in prop::collection::vec(empty_component(), 1..6)) {
            prop_assert!(matches!(
                to_mole_fractions(&comps),
                Err(PropsError::NonPhysical { .. })
            ), "expected NonPhysical error for all-zero amounts");
        }
    }
}
