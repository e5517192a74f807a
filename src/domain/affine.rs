//! Affine arithmetic domain
//!
//! # Representation
//!
//! An affine form is
//!
//! ```text
//! x̂ = c + Σ cᵢ·εᵢ        εᵢ ∈ [-1, 1]
//! ```
//!
//! where every `εᵢ` is a [`NoiseSymbol`] shared by all forms that depend on
//! the same source of uncertainty. Because shared symbols cancel, linear
//! operations are exact (`x̂ - x̂ == 0`), which is what makes affine forms
//! much tighter than plain intervals over long recurrences.
//!
//! # Non-linear operations
//!
//! Every non-affine function is linearised through
//! [`AffineForm::approximate_affine_form`]:
//!
//! ```text
//! f(x̂) ≈ α·x̂ + ζ ± δ
//! ```
//!
//! with the residual `δ` attached to a fresh noise symbol. Multiplication
//! bounds its quadratic cross term the same way, with `δ = rad(a)·rad(b)`.
//! The reciprocal uses the mini-range approximation.
//!
//! # Invariants
//!
//! - `radius() = Σ|cᵢ| ≥ 0`
//! - `to_interval() = [center − radius, center + radius]`
//! - Forms are values: no operation mutates its operands.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use num::traits::{One, Zero};
use serde::{Deserialize, Serialize};

use crate::domain::noise::NoiseSymbol;
use crate::domain::{Interval, Numeric};

/// Center plus sparse noise-symbol coefficients
///
/// Serialised as `{"center": c, "terms": [[symbol, coeff], ...]}` with terms
/// ordered by symbol.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AffineForm {
    center: f64,
    #[serde(with = "term_pairs")]
    terms: BTreeMap<NoiseSymbol, f64>,
}

impl AffineForm {
    /// Build a form from its center and an explicit term map.
    pub fn new(center: f64, terms: BTreeMap<NoiseSymbol, f64>) -> Self {
        Self { center, terms }
    }

    /// Exact form without any uncertainty
    pub fn constant(center: f64) -> Self {
        Self { center, terms: BTreeMap::new() }
    }

    /// Enclose an interval with one brand-new noise symbol.
    ///
    /// The coefficient is `(lo − hi) / 2`. Its sign does not matter since the
    /// symbol is referenced nowhere else.
    ///
    /// ```rust
    /// use pdenclose_rs::domain::{AffineForm, Interval};
    ///
    /// let x = AffineForm::from_interval(&Interval::new(1.0, 3.0));
    /// assert_eq!(x.center(), 2.0);
    /// assert_eq!(x.radius(), 1.0);
    /// assert_eq!(x.to_interval(), Interval::new(1.0, 3.0));
    /// ```
    pub fn from_interval(interval: &Interval) -> Self {
        let lo = interval.lo();
        let hi = interval.hi();
        let mut terms = BTreeMap::new();
        terms.insert(NoiseSymbol::fresh(), (lo - hi) / 2.0);
        Self { center: (lo + hi) / 2.0, terms }
    }

    pub fn center(&self) -> f64 {
        self.center
    }

    /// Total deviation, `Σ|cᵢ|`
    pub fn radius(&self) -> f64 {
        self.terms.values().map(|c| c.abs()).sum()
    }

    /// Coefficient attached to `symbol`, `NaN` when the form does not depend on it.
    pub fn coefficient_of(&self, symbol: NoiseSymbol) -> f64 {
        self.terms.get(&symbol).copied().unwrap_or(f64::NAN)
    }

    /// `(symbol, coefficient)` pairs ordered by symbol
    pub fn terms(&self) -> impl Iterator<Item = (NoiseSymbol, f64)> + '_ {
        self.terms.iter().map(|(s, c)| (*s, *c))
    }

    /// Number of noise symbols the form depends on
    pub fn noise_count(&self) -> usize {
        self.terms.len()
    }

    /// Concretisation `[center − radius, center + radius]`
    pub fn to_interval(&self) -> Interval {
        let radius = self.radius();
        Interval::new(self.center - radius, self.center + radius)
    }

    /// Multi-line report of the form and its concretisation
    pub fn describe(&self) -> String {
        let interval = self.to_interval();
        let symbols: Vec<String> = self
            .terms
            .iter()
            .map(|(s, c)| format!("({}: {:.6})", s, c))
            .collect();
        format!(
            "Interval concretization: [{:.6}, {:.6}]\nCenter: {:.6}\nRadius: {:.6}\nNoise symbols: {}",
            interval.lo(),
            interval.hi(),
            self.center,
            self.radius(),
            symbols.join(", ")
        )
    }

    /// Linearise a unary function as `α·x̂ + ζ ± δ`.
    ///
    /// Every existing coefficient is scaled by `alpha`, the center becomes
    /// `alpha·center + zeta`, and a fresh noise symbol with coefficient
    /// `delta` carries the approximation residual.
    pub fn approximate_affine_form(&self, alpha: f64, zeta: f64, delta: f64) -> Self {
        let mut terms: BTreeMap<NoiseSymbol, f64> = self
            .terms
            .iter()
            .map(|(s, c)| (*s, alpha * c))
            .collect();
        terms.insert(NoiseSymbol::fresh(), delta);
        Self { center: alpha * self.center + zeta, terms }
    }

    /// Reciprocal by mini-range approximation.
    ///
    /// When the concretisation contains zero the reciprocal is unbounded; the
    /// result is then a fresh form built from the concretisation, without any
    /// correlation to `self`.
    pub fn inv(&self) -> Self {
        let interval = self.to_interval();
        if interval.contains_zero() {
            return AffineForm::from_interval(&interval);
        }

        let magnitude = interval.abs();
        let a = magnitude.lo();
        let b = magnitude.hi();

        let alpha = -1.0 / (b * b);
        let range = Interval::new(1.0 / a - alpha * a, 2.0 / b);
        let zeta = if interval.lo() < 0.0 { -range.midpoint() } else { range.midpoint() };

        self.approximate_affine_form(alpha, zeta, range.radius())
    }

    fn combine(mut self, rhs: &AffineForm, sign: f64) -> Self {
        self.center += sign * rhs.center;
        for (symbol, coeff) in &rhs.terms {
            *self.terms.entry(*symbol).or_insert(0.0) += sign * coeff;
        }
        self
    }

    fn product(&self, rhs: &AffineForm) -> Self {
        let mut terms = BTreeMap::new();
        for (symbol, coeff) in &self.terms {
            *terms.entry(*symbol).or_insert(0.0) += rhs.center * coeff;
        }
        for (symbol, coeff) in &rhs.terms {
            *terms.entry(*symbol).or_insert(0.0) += self.center * coeff;
        }
        // second-order cross term
        terms.insert(NoiseSymbol::fresh(), self.radius() * rhs.radius());

        Self { center: self.center * rhs.center, terms }
    }

    fn scale(mut self, factor: f64) -> Self {
        self.center *= factor;
        for coeff in self.terms.values_mut() {
            *coeff *= factor;
        }
        self
    }
}

impl From<Interval> for AffineForm {
    fn from(interval: Interval) -> Self {
        AffineForm::from_interval(&interval)
    }
}

impl fmt::Display for AffineForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_interval())
    }
}

mod term_pairs {
    use std::collections::BTreeMap;

    use serde::{Deserialize, Deserializer, Serializer};

    use crate::domain::noise::NoiseSymbol;

    pub fn serialize<S: Serializer>(
        terms: &BTreeMap<NoiseSymbol, f64>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(terms.iter())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<NoiseSymbol, f64>, D::Error> {
        let pairs = Vec::<(NoiseSymbol, f64)>::deserialize(deserializer)?;
        Ok(pairs.into_iter().collect())
    }
}

// =================================================================================================
// Arithmetic
// =================================================================================================

impl Neg for AffineForm {
    type Output = AffineForm;

    fn neg(self) -> AffineForm {
        self.scale(-1.0)
    }
}

impl Add for AffineForm {
    type Output = AffineForm;

    fn add(self, rhs: AffineForm) -> AffineForm {
        self.combine(&rhs, 1.0)
    }
}

impl Sub for AffineForm {
    type Output = AffineForm;

    fn sub(self, rhs: AffineForm) -> AffineForm {
        self.combine(&rhs, -1.0)
    }
}

impl Mul for AffineForm {
    type Output = AffineForm;

    fn mul(self, rhs: AffineForm) -> AffineForm {
        self.product(&rhs)
    }
}

impl Div for AffineForm {
    type Output = AffineForm;

    fn div(self, rhs: AffineForm) -> AffineForm {
        self.product(&rhs.inv())
    }
}

impl Add<f64> for AffineForm {
    type Output = AffineForm;

    fn add(mut self, rhs: f64) -> AffineForm {
        self.center += rhs;
        self
    }
}

impl Sub<f64> for AffineForm {
    type Output = AffineForm;

    fn sub(mut self, rhs: f64) -> AffineForm {
        self.center -= rhs;
        self
    }
}

impl Mul<f64> for AffineForm {
    type Output = AffineForm;

    fn mul(self, rhs: f64) -> AffineForm {
        self.scale(rhs)
    }
}

impl Div<f64> for AffineForm {
    type Output = AffineForm;

    fn div(self, rhs: f64) -> AffineForm {
        if rhs == 0.0 {
            return AffineForm::zero();
        }
        self.scale(1.0 / rhs)
    }
}

impl Zero for AffineForm {
    fn zero() -> Self {
        AffineForm::constant(0.0)
    }

    fn is_zero(&self) -> bool {
        self.center == 0.0 && self.terms.values().all(|c| *c == 0.0)
    }
}

impl One for AffineForm {
    fn one() -> Self {
        AffineForm::constant(1.0)
    }
}

impl Numeric for AffineForm {
    fn domain_name() -> &'static str {
        "affine"
    }

    fn from_real(value: f64) -> Self {
        AffineForm::constant(value)
    }

    /// Exponentiation by squaring.
    ///
    /// Odd exponents take one final multiply by `self`. Each squaring of an
    /// approximate form compounds its enclosure error.
    ///
    /// This always computes `xⁿ`. A loop that keeps squaring the running
    /// result while the exponent exceeds 1 agrees for `n ≤ 5` but yields `x⁴`
    /// for `n = 6`; that behaviour is not reproduced.
    fn pow(&self, power: u32) -> Self {
        match power {
            0 => AffineForm::one(),
            1 => self.clone(),
            p if p % 2 == 1 => self.pow(p - 1).product(self),
            p => {
                let half = self.pow(p / 2);
                half.product(&half)
            }
        }
    }

    /// Three-way split on the concretisation.
    ///
    /// A form straddling zero maps to `|center/2| + Σ(cᵢ/2)·εᵢ`.
    fn abs(&self) -> Self {
        if self.lt_scalar(0.0) {
            return -self.clone();
        }
        if self.gt_scalar(0.0) {
            return self.clone();
        }
        let mut halved = self.clone().scale(0.5);
        halved.center = halved.center.abs();
        halved
    }

    fn lt_scalar(&self, value: f64) -> bool {
        self.to_interval().lt_scalar(value)
    }

    fn le_scalar(&self, value: f64) -> bool {
        self.to_interval().le_scalar(value)
    }

    fn gt_scalar(&self, value: f64) -> bool {
        self.to_interval().gt_scalar(value)
    }

    fn ge_scalar(&self, value: f64) -> bool {
        self.to_interval().ge_scalar(value)
    }

    fn enclosure(&self) -> (f64, f64) {
        self.to_interval().enclosure()
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn form(lo: f64, hi: f64) -> AffineForm {
        AffineForm::from_interval(&Interval::new(lo, hi))
    }

    fn new_symbols(before: &AffineForm, after: &AffineForm) -> Vec<(NoiseSymbol, f64)> {
        after
            .terms()
            .filter(|(s, _)| before.coefficient_of(*s).is_nan())
            .collect()
    }

    // ====== Construction ======

    #[test]
    fn test_from_interval_coefficient_sign() {
        let x = form(1.0, 3.0);
        let (symbol, coeff) = x.terms().next().unwrap();
        assert!(symbol.is_valid());
        assert_eq!(coeff, -1.0);
        assert_eq!(x.noise_count(), 1);
    }

    #[test]
    fn test_coefficient_of_missing_symbol_is_nan() {
        let x = form(0.0, 1.0);
        let y = form(0.0, 1.0);
        let (foreign, _) = y.terms().next().unwrap();
        assert!(x.coefficient_of(foreign).is_nan());
    }

    #[test]
    fn test_constant_has_no_terms() {
        let c = AffineForm::constant(4.0);
        assert_eq!(c.radius(), 0.0);
        assert_eq!(c.to_interval(), Interval::point(4.0));
    }

    // ====== Linear operations ======

    #[test]
    fn test_self_subtraction_cancels() {
        let x = form(1.0, 2.0);
        let d = x.clone() - x.clone();
        assert_eq!(d.center(), 0.0);
        assert_eq!(d.radius(), 0.0);
    }

    #[test]
    fn test_add_merges_shared_symbols() {
        let x = form(1.0, 2.0);
        let y = form(5.0, 9.0);
        let (sx, cx) = x.terms().next().unwrap();
        let (sy, cy) = y.terms().next().unwrap();

        let z = x.clone() * 2.0 + y.clone() + x.clone();
        assert_relative_eq!(z.center(), 3.0 * 1.5 + 7.0);
        assert_relative_eq!(z.coefficient_of(sx), 3.0 * cx);
        assert_relative_eq!(z.coefficient_of(sy), cy);
    }

    #[test]
    fn test_scalar_shift_keeps_coefficients() {
        let x = form(1.0, 2.0);
        let shifted = x.clone() + 10.0 - 3.0;
        assert_relative_eq!(shifted.center(), 8.5);
        assert_eq!(shifted.radius(), x.radius());
    }

    #[test]
    fn test_scalar_division_by_zero_is_degenerate() {
        let x = form(1.0, 2.0) / 0.0;
        assert_eq!(x.center(), 0.0);
        assert_eq!(x.noise_count(), 0);
    }

    #[test]
    fn test_negation() {
        let x = form(1.0, 2.0);
        let n = -x.clone();
        assert_eq!(n.center(), -1.5);
        assert_eq!(n.to_interval(), Interval::new(-2.0, -1.0));
    }

    // ====== Multiplication ======

    #[test]
    fn test_mul_adds_exactly_one_symbol() {
        let x = form(1.0, 2.0);
        let y = form(3.0, 5.0);
        let p = x.clone() * y.clone();

        let mut union = x.clone() + y.clone();
        union.center = 0.0;
        let fresh = new_symbols(&union, &p);
        assert_eq!(fresh.len(), 1);
        assert_relative_eq!(fresh[0].1, x.radius() * y.radius());
        assert_relative_eq!(p.center(), 1.5 * 4.0);
    }

    #[test]
    fn test_mul_outer_product_coefficients() {
        let x = form(1.0, 2.0);
        let y = form(3.0, 5.0);
        let (sx, cx) = x.terms().next().unwrap();
        let (sy, cy) = y.terms().next().unwrap();
        let p = x.clone() * y.clone();

        assert_relative_eq!(p.coefficient_of(sx), y.center() * cx);
        assert_relative_eq!(p.coefficient_of(sy), x.center() * cy);
    }

    #[test]
    fn test_square_encloses_true_range() {
        let x = form(1.0, 2.0);
        let sq = x.pow(2).to_interval();
        assert!(sq.lo() <= 1.0 && sq.hi() >= 4.0);
    }

    // ====== Power ======

    #[test]
    fn test_pow_zero_is_exact_unit() {
        let x = form(-3.0, 7.0);
        let p = x.pow(0);
        assert_eq!(p.center(), 1.0);
        assert_eq!(p.noise_count(), 0);
    }

    #[test]
    fn test_pow_one_is_identity() {
        let x = form(1.0, 2.0);
        assert_eq!(x.pow(1), x);
    }

    #[test]
    fn test_cube_matches_square_times_self() {
        let x = form(1.0, 2.0);
        let cube = x.pow(3);
        let manual = x.clone() * x.clone() * x.clone();
        assert_relative_eq!(cube.center(), manual.center());
        assert_relative_eq!(cube.radius(), manual.radius(), epsilon = 1e-12);
    }

    #[test]
    fn test_high_powers_are_exact_on_constants() {
        let two = AffineForm::constant(2.0);
        assert_eq!(two.pow(6).center(), 64.0);
        assert_eq!(two.pow(7).center(), 128.0);
        assert_eq!(two.pow(6).radius(), 0.0);
    }

    // ====== abs ======

    #[test]
    fn test_abs_negative_is_negation() {
        let x = form(-3.0, -1.0);
        assert_eq!(x.abs().to_interval(), Interval::new(1.0, 3.0));
    }

    #[test]
    fn test_abs_positive_is_identity() {
        let x = form(1.0, 3.0);
        assert_eq!(x.abs(), x);
    }

    #[test]
    fn test_abs_straddle_halves_everything() {
        let x = form(-3.0, 1.0);
        let (s, c) = x.terms().next().unwrap();
        let a = x.abs();
        assert_eq!(a.center(), 0.5);
        assert_eq!(a.coefficient_of(s), c / 2.0);
    }

    // ====== Reciprocal ======

    #[test]
    fn test_inv_positive_values() {
        let x = form(1.0, 2.0);
        let r = x.inv().to_interval();
        assert!(r.lo() <= 0.5 && r.hi() >= 1.0);
    }

    #[test]
    fn test_inv_negative_values_mirror() {
        let pos = form(1.0, 2.0).inv().to_interval();
        let neg = form(-2.0, -1.0).inv().to_interval();
        assert_relative_eq!(neg.lo(), -pos.hi(), epsilon = 1e-12);
        assert_relative_eq!(neg.hi(), -pos.lo(), epsilon = 1e-12);
    }

    #[test]
    fn test_inv_zero_straddle_decorrelates() {
        let x = form(-1.0, 2.0);
        let (s, _) = x.terms().next().unwrap();
        let r = x.inv();
        assert!(r.coefficient_of(s).is_nan());
        assert_eq!(r.noise_count(), 1);
        assert_eq!(r.to_interval(), x.to_interval());
    }

    #[test]
    fn test_inv_sampling_soundness() {
        let mut rng = StdRng::seed_from_u64(0x5EED_AFF1);
        for _ in 0..200 {
            let lo = rng.gen_range(0.05..10.0);
            let hi = lo + rng.gen_range(0.0..5.0);
            let sign = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
            let x = form(sign * lo, sign * hi);
            let enclosure = x.inv().to_interval();
            for _ in 0..20 {
                let v = sign * rng.gen_range(lo..=hi);
                let r = 1.0 / v;
                let tol = 1e-9 * (1.0 + r.abs());
                assert!(
                    enclosure.lo() - tol <= r && r <= enclosure.hi() + tol,
                    "1/{} = {} escapes {}",
                    v, r, enclosure
                );
            }
        }
    }

    #[test]
    fn test_division_uses_reciprocal() {
        let x = form(2.0, 4.0);
        let y = form(1.0, 2.0);
        let q = (x / y).to_interval();
        assert!(q.lo() <= 1.0 && q.hi() >= 4.0);
    }

    // ====== Comparisons ======

    #[test]
    fn test_comparisons_use_concretisation() {
        let x = form(0.5, 1.5);
        assert!(!x.lt_scalar(1.0));
        assert!(!x.ge_scalar(1.0));
        assert!(x.lt_scalar(2.0));
        assert!(x.gt_scalar(0.0));
    }

    // ====== Formatting and serde ======

    #[test]
    fn test_display_is_concretisation() {
        let x = AffineForm::constant(2.0);
        assert_eq!(x.to_string(), "[2, 2]");
    }

    #[test]
    fn test_describe_report() {
        let x = form(1.0, 3.0);
        let report = x.describe();
        assert!(report.starts_with("Interval concretization: [1.000000, 3.000000]\n"));
        assert!(report.contains("Center: 2.000000"));
        assert!(report.contains("Radius: 1.000000"));
        assert!(report.contains(": -1.000000)"));
    }

    #[test]
    fn test_serde_wire_format() {
        let mut terms = BTreeMap::new();
        terms.insert(NoiseSymbol::restore(3).unwrap(), 0.5);
        terms.insert(NoiseSymbol::restore(1).unwrap(), -0.25);
        let x = AffineForm::new(2.0, terms);

        let json = serde_json::to_string(&x).unwrap();
        assert_eq!(json, r#"{"center":2.0,"terms":[[1,-0.25],[3,0.5]]}"#);

        let back: AffineForm = serde_json::from_str(&json).unwrap();
        assert_eq!(back, x);
    }

    // ====== Algebraic properties ======

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(128))]

        #[test]
        fn prop_interval_matches_center_radius(lo in -50.0f64..50.0, w in 0.0f64..20.0, k in -3.0f64..3.0) {
            let x = form(lo, lo + w) * k + 1.0;
            let i = x.to_interval();
            prop_assert!(x.radius() >= 0.0);
            prop_assert_eq!(i.lo(), x.center() - x.radius());
            prop_assert_eq!(i.hi(), x.center() + x.radius());
        }

        #[test]
        fn prop_add_negation_cancels(lo in -50.0f64..50.0, w in 0.0f64..20.0) {
            let x = form(lo, lo + w);
            let sum = x.clone() + (-x.clone());
            prop_assert_eq!(sum.center(), 0.0);
            for (symbol, _) in x.terms() {
                prop_assert_eq!(sum.coefficient_of(symbol), 0.0);
            }
        }

        #[test]
        fn prop_add_centers_and_coefficients(a in -50.0f64..50.0, b in -50.0f64..50.0, w in 0.0f64..5.0) {
            let x = form(a, a + w);
            let y = form(b, b + w) + x.clone();
            let (shared, cx) = x.terms().next().unwrap();
            let cy = y.coefficient_of(shared);
            let s = x.clone() + y.clone();
            prop_assert_eq!(s.center(), x.center() + y.center());
            prop_assert_eq!(s.coefficient_of(shared), cx + cy);
        }

        #[test]
        fn prop_product_contains_samples(
            a in -5.0f64..5.0, wa in 0.0f64..3.0,
            b in -5.0f64..5.0, wb in 0.0f64..3.0,
            e1 in -1.0f64..=1.0, e2 in -1.0f64..=1.0,
        ) {
            let x = form(a, a + wa);
            let y = form(b, b + wb);
            let (s1, c1) = x.terms().next().unwrap();
            let (s2, c2) = y.terms().next().unwrap();
            prop_assume!(s1 != s2);
            let vx = x.center() + c1 * e1;
            let vy = y.center() + c2 * e2;
            let p = (x * y).to_interval();
            let tol = 1e-9 * (1.0 + (vx * vy).abs());
            prop_assert!(p.lo() - tol <= vx * vy && vx * vy <= p.hi() + tol);
        }
    }
}
