//! `uom` quantity aliases and constructors.

use uom::si::f64::{
    Length as UomLength, MassDensity as UomMassDensity, MolarMass as UomMolarMass,
    Pressure as UomPressure,
    ThermodynamicTemperature as UomThermodynamicTemperature, Velocity as UomVelocity,
    Volume as UomVolume,
};

// Canonical SI quantity types used at request boundaries
pub type Length = UomLength;
pub type Density = UomMassDensity;
pub type MolarMass = UomMolarMass;
pub type Pressure = UomPressure;
pub type Temperature = UomThermodynamicTemperature;
pub type Velocity = UomVelocity;
pub type Volume = UomVolume;

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn kg_per_m3(v: f64) -> Density {
    use uom::si::mass_density::kilogram_per_cubic_meter;
    Density::new::<kilogram_per_cubic_meter>(v)
}

/// Molecular weight in kg/kmol (numerically g/mol).
#[inline]
pub fn kg_per_kmol(v: f64) -> MolarMass {
    use uom::si::molar_mass::gram_per_mole;
    MolarMass::new::<gram_per_mole>(v)
}

/// Molecular weight as the kg/kmol number the correlations use.
#[inline]
pub fn in_kg_per_kmol(mw: MolarMass) -> f64 {
    use uom::si::molar_mass::gram_per_mole;
    mw.get::<gram_per_mole>()
}

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn m3(v: f64) -> Volume {
    use uom::si::volume::cubic_meter;
    Volume::new::<cubic_meter>(v)
}

#[inline]
pub fn mps(v: f64) -> Velocity {
    use uom::si::velocity::meter_per_second;
    Velocity::new::<meter_per_second>(v)
}

// Hood-side units. Hood dimensions are entered in feet, face velocity in
// feet per minute and spill volume in millilitres.

#[inline]
pub fn ft(v: f64) -> Length {
    use uom::si::length::foot;
    Length::new::<foot>(v)
}

#[inline]
pub fn fpm(v: f64) -> Velocity {
    use uom::si::velocity::foot_per_minute;
    Velocity::new::<foot_per_minute>(v)
}

#[inline]
pub fn ml(v: f64) -> Volume {
    use uom::si::volume::milliliter;
    Volume::new::<milliliter>(v)
}

pub mod constants {
    use super::*;

    /// Standard gravity [m/s²]
    pub const G0_MPS2: f64 = 9.806_65;

    /// Universal gas constant as used by the evaporation correlations [J/(kmol·K)].
    pub const R_UNIVERSAL: f64 = 8314.0;

    /// Reference ambient temperature of the evaporation model [K].
    pub const AMBIENT_K: f64 = 298.15;

    pub const ATMOSPHERE_PA: f64 = 101_325.0;

    #[inline]
    pub fn ambient() -> Temperature {
        k(AMBIENT_K)
    }
}
