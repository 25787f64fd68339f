//! Temperature-dependent correlation templates.
//!
//! Forms follow the DIPPR numbering used by the coefficient tables. Each variant
//! evaluates the property itself and, where a closed form exists, its
//! antiderivative in T (used for heat-capacity style integrals).
//!
//! ```text
//! 100  a + bT + cT² + dT³ + eT⁴
//! 101  exp(a + b/T + c·ln T + d·T^e)
//! 105  a / b^(1 + (1 - T/c)^d)
//! 106  a·(1 - Tr)^(b + c·Tr + d·Tr² + e·Tr³)          Tr = T/Tc
//! 107  a + b·[(c/T)/sinh(c/T)]² + d·[(e/T)/cosh(e/T)]²
//! 114  a²/τ + b - 2acτ - adτ² - c²τ³/3 - cdτ⁴/2 - d²τ⁵/5   τ = 1 - T/Tc
//! 124  a + b/τ + cτ + dτ² + eτ³
//! 127  a + Σ k·(θ/T)²·e^(θ/T)/(e^(θ/T) - 1)²         (k, θ) = (b, c), (d, e), (f, g)
//! ```

use crate::error::{PropsError, PropsResult};
use crate::table::MAX_COEFFICIENTS;

/// Coefficients a..g of a correlation row.
pub type Coefficients = [f64; MAX_COEFFICIENTS];

/// Supported equation forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EquationForm {
    /// DIPPR 100
    Polynomial,
    /// DIPPR 101
    ExponentialLog,
    /// DIPPR 105; coefficient c plays the role of the critical temperature
    RationalPower,
    /// DIPPR 106
    ReducedTemperaturePower,
    /// DIPPR 107
    Hyperbolic,
    /// DIPPR 114
    SingularRational,
    /// DIPPR 124
    TauSeries,
    /// DIPPR 127
    Einstein,
}

impl EquationForm {
    pub const ALL: [EquationForm; 8] = [
        EquationForm::Polynomial,
        EquationForm::ExponentialLog,
        EquationForm::RationalPower,
        EquationForm::ReducedTemperaturePower,
        EquationForm::Hyperbolic,
        EquationForm::SingularRational,
        EquationForm::TauSeries,
        EquationForm::Einstein,
    ];

    /// Map a table form id to a variant. Unknown ids return `None`.
    pub fn from_id(id: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|form| form.id() == id)
    }

    pub fn id(&self) -> u16 {
        match self {
            EquationForm::Polynomial => 100,
            EquationForm::ExponentialLog => 101,
            EquationForm::RationalPower => 105,
            EquationForm::ReducedTemperaturePower => 106,
            EquationForm::Hyperbolic => 107,
            EquationForm::SingularRational => 114,
            EquationForm::TauSeries => 124,
            EquationForm::Einstein => 127,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EquationForm::Polynomial => "polynomial",
            EquationForm::ExponentialLog => "exponential-log",
            EquationForm::RationalPower => "rational power",
            EquationForm::ReducedTemperaturePower => "reduced-temperature power",
            EquationForm::Hyperbolic => "hyperbolic",
            EquationForm::SingularRational => "singular rational",
            EquationForm::TauSeries => "tau series",
            EquationForm::Einstein => "einstein",
        }
    }

    /// Whether the form reads the chemical's critical temperature.
    pub fn needs_critical_temperature(&self) -> bool {
        matches!(
            self,
            EquationForm::ReducedTemperaturePower
                | EquationForm::SingularRational
                | EquationForm::TauSeries
        )
    }

    pub fn has_integrated(&self) -> bool {
        matches!(
            self,
            EquationForm::Polynomial
                | EquationForm::Hyperbolic
                | EquationForm::SingularRational
                | EquationForm::TauSeries
                | EquationForm::Einstein
        )
    }

    /// Evaluate the form at `t_k`.
    ///
    /// `tc` must be `Some` for forms that need the critical temperature. Any
    /// non-finite result is reported as `PropsError::Domain`.
    pub fn evaluate(
        &self,
        coeffs: &Coefficients,
        t_k: f64,
        tc: Option<f64>,
        integrated: bool,
    ) -> PropsResult<f64> {
        if integrated && !self.has_integrated() {
            return Err(PropsError::NoIntegratedForm { form_id: self.id() });
        }
        if !t_k.is_finite() {
            return Err(PropsError::Domain {
                what: "temperature is not finite",
            });
        }

        let value = match self {
            EquationForm::Polynomial => polynomial(coeffs, t_k, integrated),
            EquationForm::ExponentialLog => exponential_log(coeffs, t_k)?,
            EquationForm::RationalPower => rational_power(coeffs, t_k),
            EquationForm::ReducedTemperaturePower => {
                reduced_temperature_power(coeffs, t_k, critical(tc)?)
            }
            EquationForm::Hyperbolic => hyperbolic(coeffs, t_k, integrated)?,
            EquationForm::SingularRational => {
                singular_rational(coeffs, t_k, critical(tc)?, integrated)
            }
            EquationForm::TauSeries => tau_series(coeffs, t_k, critical(tc)?, integrated),
            EquationForm::Einstein => einstein(coeffs, t_k, integrated)?,
        };

        if value.is_finite() {
            Ok(value)
        } else {
            Err(PropsError::Domain { what: self.name() })
        }
    }
}

fn critical(tc: Option<f64>) -> PropsResult<f64> {
    match tc {
        Some(tc) if tc.is_finite() && tc > 0.0 => Ok(tc),
        Some(_) => Err(PropsError::Domain {
            what: "critical temperature must be positive",
        }),
        None => Err(PropsError::InvalidArg {
            what: "critical temperature required",
        }),
    }
}

fn polynomial(c: &Coefficients, t: f64, integrated: bool) -> f64 {
    let [a, b, cc, d, e, ..] = *c;
    if integrated {
        a * t + b * t.powi(2) / 2.0 + cc * t.powi(3) / 3.0 + d * t.powi(4) / 4.0
            + e * t.powi(5) / 5.0
    } else {
        a + b * t + cc * t.powi(2) + d * t.powi(3) + e * t.powi(4)
    }
}

fn exponential_log(c: &Coefficients, t: f64) -> PropsResult<f64> {
    if t <= 0.0 {
        return Err(PropsError::Domain {
            what: "ln(T) with non-positive T",
        });
    }
    let [a, b, cc, d, e, ..] = *c;
    Ok((a + b / t + cc * t.ln() + d * t.powf(e)).exp())
}

fn rational_power(c: &Coefficients, t: f64) -> f64 {
    let [a, b, cc, d, ..] = *c;
    a / b.powf(1.0 + (1.0 - t / cc).powf(d))
}

fn reduced_temperature_power(c: &Coefficients, t: f64, tc: f64) -> f64 {
    let [a, b, cc, d, e, ..] = *c;
    let tr = t / tc;
    if tr >= 1.0 {
        return 0.0;
    }
    a * (1.0 - tr).powf(b + cc * tr + d * tr.powi(2) + e * tr.powi(3))
}

fn hyperbolic(c: &Coefficients, t: f64, integrated: bool) -> PropsResult<f64> {
    if t == 0.0 {
        return Err(PropsError::Domain {
            what: "hyperbolic form at T = 0",
        });
    }
    let [a, b, cc, d, e, ..] = *c;
    let x = cc / t;
    let y = e / t;
    if integrated {
        // c·coth(c/T) tends to T as c -> 0
        let coth_term = if x == 0.0 { t } else { cc / x.tanh() };
        Ok(a * t + b * coth_term - d * e * y.tanh())
    } else {
        let x_over_sinh = if x == 0.0 { 1.0 } else { x / x.sinh() };
        Ok(a + b * x_over_sinh.powi(2) + d * (y / y.cosh()).powi(2))
    }
}

fn singular_rational(c: &Coefficients, t: f64, tc: f64, integrated: bool) -> f64 {
    let [a, b, cc, d, ..] = *c;
    if integrated {
        let dt = t - tc;
        -(a * a) * tc * dt.abs().ln() + b * t - 2.0 * a * cc * (t - t * t / 2.0 / tc)
            - a * d / 3.0 / tc.powi(2) * dt.powi(3)
            + cc * cc / 12.0 / tc.powi(3) * dt.powi(4)
            - cc * d / 10.0 / tc.powi(4) * dt.powi(5)
            + d * d / 30.0 / tc.powi(5) * dt.powi(6)
    } else {
        let tau = 1.0 - t / tc;
        a * a / tau + b
            - 2.0 * a * cc * tau
            - a * d * tau.powi(2)
            - cc * cc * tau.powi(3) / 3.0
            - cc * d * tau.powi(4) / 2.0
            - d * d * tau.powi(5) / 5.0
    }
}

fn tau_series(c: &Coefficients, t: f64, tc: f64, integrated: bool) -> f64 {
    let [a, b, cc, d, e, ..] = *c;
    let tr = t / tc;
    if integrated {
        a * t - b * tc * (tc - t).abs().ln()
            + cc * t * (1.0 - tr / 2.0)
            + d * t * (1.0 - tr + tr.powi(2) / 3.0)
            + e * t * (1.0 - 1.5 * tr + tr.powi(2) - tr.powi(3) / 4.0)
    } else {
        let tau = 1.0 - tr;
        a + b / tau + cc * tau + d * tau.powi(2) + e * tau.powi(3)
    }
}

fn einstein(c: &Coefficients, t: f64, integrated: bool) -> PropsResult<f64> {
    if t == 0.0 {
        return Err(PropsError::Domain {
            what: "einstein form at T = 0",
        });
    }
    let [a, b, cc, d, e, f, g] = *c;
    let oscillators = [(b, cc), (d, e), (f, g)];
    let value = if integrated {
        a * t
            + oscillators
                .iter()
                .map(|&(k, theta)| k * planck_integral(theta, t))
                .sum::<f64>()
    } else {
        a + oscillators
            .iter()
            .map(|&(k, theta)| k * einstein_term(theta / t))
            .sum::<f64>()
    };
    Ok(value)
}

/// x²·eˣ/(eˣ - 1)², written with e^-x so large x stays finite. Limit 1 at x = 0.
fn einstein_term(x: f64) -> f64 {
    if x == 0.0 {
        return 1.0;
    }
    let em = (-x).exp();
    let denom = -(-x).exp_m1();
    x * x * em / (denom * denom)
}

/// θ/(e^(θ/T) - 1). Limit T at θ = 0.
fn planck_integral(theta: f64, t: f64) -> f64 {
    if theta == 0.0 {
        return t;
    }
    theta / (theta / t).exp_m1()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
    }

    fn coeffs(v: &[f64]) -> Coefficients {
        let mut out = [0.0; MAX_COEFFICIENTS];
        out[..v.len()].copy_from_slice(v);
        out
    }

    #[test]
    fn ids_round_trip() {
        for form in EquationForm::ALL {
            assert_eq!(EquationForm::from_id(form.id()), Some(form));
        }
        assert_eq!(EquationForm::from_id(102), None);
    }

    #[test]
    fn polynomial_and_antiderivative() {
        let c = coeffs(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let t = 2.0;
        let v = EquationForm::Polynomial.evaluate(&c, t, None, false).unwrap();
        assert!(close(v, 1.0 + 4.0 + 12.0 + 32.0 + 80.0));
        let i = EquationForm::Polynomial.evaluate(&c, t, None, true).unwrap();
        assert!(close(i, 2.0 + 4.0 + 8.0 + 16.0 + 32.0));
    }

    #[test]
    fn exponential_log_matches_closed_form() {
        let c = coeffs(&[5.0, -1000.0, 0.0, 0.0, 0.0]);
        let v = EquationForm::ExponentialLog.evaluate(&c, 300.0, None, false).unwrap();
        assert!(close(v, (5.0_f64 - 1000.0 / 300.0).exp()));

        // Water vapor pressure at 298.15 K, DIPPR 101 coefficients.
        let water = coeffs(&[73.649, -7258.2, -7.3037, 4.1653e-6, 2.0]);
        let vp = EquationForm::ExponentialLog
            .evaluate(&water, 298.15, None, false)
            .unwrap();
        assert!(vp > 3000.0 && vp < 3300.0, "vp = {vp}");
    }

    #[test]
    fn exponential_log_rejects_non_positive_t() {
        let c = coeffs(&[5.0, -1000.0]);
        let err = EquationForm::ExponentialLog.evaluate(&c, 0.0, None, false);
        assert!(matches!(err, Err(PropsError::Domain { .. })));
    }

    #[test]
    fn rational_power_matches_closed_form() {
        let c = coeffs(&[5.459, 0.30542, 647.13, 0.081]);
        let t = 298.15;
        let v = EquationForm::RationalPower.evaluate(&c, t, None, false).unwrap();
        let expected = 5.459 / 0.30542_f64.powf(1.0 + (1.0 - t / 647.13).powf(0.081));
        assert!(close(v, expected));
        // kmol/m³ for water is about 55.3
        assert!(v > 54.0 && v < 57.0, "ldn = {v}");
    }

    #[test]
    fn rational_power_domain_error_above_c_with_fractional_d() {
        let c = coeffs(&[5.459, 0.30542, 647.13, 0.081]);
        let err = EquationForm::RationalPower.evaluate(&c, 700.0, None, false);
        assert!(matches!(err, Err(PropsError::Domain { .. })));
    }

    #[test]
    fn reduced_temperature_power_matches_and_vanishes_above_tc() {
        let c = coeffs(&[0.18548, 2.717, -3.554, 2.047, 0.0]);
        let tc = 647.096;
        let t = 300.0;
        let tr: f64 = t / tc;
        let expected = 0.18548 * (1.0 - tr).powf(2.717 - 3.554 * tr + 2.047 * tr * tr);
        let v = EquationForm::ReducedTemperaturePower
            .evaluate(&c, t, Some(tc), false)
            .unwrap();
        assert!(close(v, expected));

        let above = EquationForm::ReducedTemperaturePower
            .evaluate(&c, 700.0, Some(tc), false)
            .unwrap();
        assert_eq!(above, 0.0);
    }

    #[test]
    fn reduced_temperature_power_requires_tc() {
        let c = coeffs(&[1.0, 1.0]);
        assert!(
            EquationForm::ReducedTemperaturePower
                .evaluate(&c, 300.0, None, false)
                .is_err()
        );
    }

    #[test]
    fn hyperbolic_and_integrated_form() {
        let c = coeffs(&[33363.0, 26790.0, 2610.5, 8896.0, 1169.0]);
        let t = 300.0_f64;
        let x = 2610.5 / t;
        let y = 1169.0 / t;
        let expected =
            33363.0 + 26790.0 * (x / x.sinh()).powi(2) + 8896.0 * (y / y.cosh()).powi(2);
        let v = EquationForm::Hyperbolic.evaluate(&c, t, None, false).unwrap();
        assert!(close(v, expected));

        let expected_int = 33363.0 * t + 26790.0 * 2610.5 / x.tanh() - 1169.0 * 8896.0 * y.tanh();
        let i = EquationForm::Hyperbolic.evaluate(&c, t, None, true).unwrap();
        assert!(close(i, expected_int));
    }

    #[test]
    fn hyperbolic_integral_differentiates_to_value() {
        let c = coeffs(&[33363.0, 26790.0, 2610.5, 8896.0, 1169.0]);
        let h = 1e-3;
        let f = |t: f64| EquationForm::Hyperbolic.evaluate(&c, t, None, true).unwrap();
        let numeric = (f(300.0 + h) - f(300.0 - h)) / (2.0 * h);
        let v = EquationForm::Hyperbolic.evaluate(&c, 300.0, None, false).unwrap();
        assert!((numeric - v).abs() / v < 1e-6);
    }

    #[test]
    fn singular_rational_matches_closed_form() {
        let c = coeffs(&[0.2, 80.0, 1.1, -0.5]);
        let (t, tc) = (300.0_f64, 500.0_f64);
        let tau = 1.0 - t / tc;
        let expected = 0.04 / tau + 80.0 - 2.0 * 0.2 * 1.1 * tau - 0.2 * -0.5 * tau.powi(2)
            - 1.21 * tau.powi(3) / 3.0
            - 1.1 * -0.5 * tau.powi(4) / 2.0
            - 0.25 * tau.powi(5) / 5.0;
        let v = EquationForm::SingularRational
            .evaluate(&c, t, Some(tc), false)
            .unwrap();
        assert!(close(v, expected));

        let h = 1e-3;
        let f = |t: f64| {
            EquationForm::SingularRational
                .evaluate(&c, t, Some(tc), true)
                .unwrap()
        };
        let numeric = (f(t + h) - f(t - h)) / (2.0 * h);
        assert!((numeric - v).abs() / v.abs() < 1e-6);
    }

    #[test]
    fn singular_rational_at_tc_is_domain_error() {
        let c = coeffs(&[0.2, 80.0, 1.1, -0.5]);
        let err = EquationForm::SingularRational.evaluate(&c, 500.0, Some(500.0), false);
        assert!(matches!(err, Err(PropsError::Domain { .. })));
    }

    #[test]
    fn tau_series_matches_closed_form() {
        let c = coeffs(&[100.0, 2.0, 30.0, -4.0, 0.5]);
        let (t, tc) = (350.0_f64, 560.0_f64);
        let tau = 1.0 - t / tc;
        let expected = 100.0 + 2.0 / tau + 30.0 * tau - 4.0 * tau.powi(2) + 0.5 * tau.powi(3);
        let v = EquationForm::TauSeries.evaluate(&c, t, Some(tc), false).unwrap();
        assert!(close(v, expected));

        let h = 1e-3;
        let f = |t: f64| EquationForm::TauSeries.evaluate(&c, t, Some(tc), true).unwrap();
        let numeric = (f(t + h) - f(t - h)) / (2.0 * h);
        assert!((numeric - v).abs() / v.abs() < 1e-6);
    }

    #[test]
    fn einstein_matches_closed_form() {
        let c = coeffs(&[4.0, 1.5, 900.0, 2.5, 1800.0, 0.7, 3500.0]);
        let t = 400.0_f64;
        let term = |k: f64, theta: f64| {
            let x = theta / t;
            k * x * x * x.exp() / (x.exp() - 1.0).powi(2)
        };
        let expected = 4.0 + term(1.5, 900.0) + term(2.5, 1800.0) + term(0.7, 3500.0);
        let v = EquationForm::Einstein.evaluate(&c, t, None, false).unwrap();
        assert!(close(v, expected));

        let int = |k: f64, theta: f64| k * theta / ((theta / t).exp() - 1.0);
        let expected_int = 4.0 * t + int(1.5, 900.0) + int(2.5, 1800.0) + int(0.7, 3500.0);
        let i = EquationForm::Einstein.evaluate(&c, t, None, true).unwrap();
        assert!(close(i, expected_int));
    }

    #[test]
    fn einstein_unused_oscillators_contribute_nothing() {
        let c = coeffs(&[4.0, 1.5, 900.0]);
        let full = EquationForm::Einstein.evaluate(&c, 400.0, None, false).unwrap();
        let x: f64 = 900.0 / 400.0;
        let expected = 4.0 + 1.5 * x * x * x.exp() / (x.exp() - 1.0).powi(2);
        assert!(close(full, expected));
    }

    #[test]
    fn forms_without_integrated_variant_refuse() {
        let c = coeffs(&[5.0, -1000.0]);
        for form in [
            EquationForm::ExponentialLog,
            EquationForm::RationalPower,
            EquationForm::ReducedTemperaturePower,
        ] {
            let err = form.evaluate(&c, 300.0, Some(600.0), true);
            assert_eq!(err, Err(PropsError::NoIntegratedForm { form_id: form.id() }));
        }
    }
}
