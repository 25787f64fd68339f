//! Property provider trait.

use crate::chemical::ChemicalId;
use crate::property::PropertyId;

/// Source of pure-component properties for the mixture layer and the simulator.
///
/// Implementations must be thread-safe (Send + Sync) so independent runs can share
/// one provider. Every lookup is total: missing or invalid data is `None`, and
/// callers decide how to substitute.
pub trait PropertyProvider: Send + Sync {
    /// Get the provider name (for logging).
    fn name(&self) -> &str;

    /// Temperature-dependent property at `t_k`, in table units
    /// (VP in Pa, LDN in kmol/m³).
    fn property(&self, chemical: &ChemicalId, property: PropertyId, t_k: f64) -> Option<f64>;

    /// Molecular weight [kg/kmol].
    fn molar_mass(&self, chemical: &ChemicalId) -> Option<f64>;

    /// Pure liquid mass density [kg/m³] from the molar density correlation.
    fn liquid_mass_density(&self, chemical: &ChemicalId, t_k: f64) -> Option<f64> {
        let molar_density = self.property(chemical, PropertyId::LiquidDensity, t_k)?;
        let mw = self.molar_mass(chemical)?;
        let rho = molar_density * mw;
        (rho.is_finite() && rho > 0.0).then_some(rho)
    }
}
