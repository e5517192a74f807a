//! Mixed domain: reduced product of intervals and affine forms
//!
//! Each value carries both an [`Interval`] and an [`AffineForm`]. Every
//! operation runs on the two components independently, then the interval is
//! intersected with the affine concretisation. The result is never wider
//! than either domain alone: affine forms win on correlated expressions,
//! intervals win after non-linear steps that inflate affine radii.

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use num::traits::{One, Zero};
use serde::{Deserialize, Serialize};

use crate::domain::{AffineForm, Interval, Numeric};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MixedForm {
    interval: Interval,
    affine: AffineForm,
}

impl MixedForm {
    /// Pair both components and apply the reduction.
    pub fn new(interval: Interval, affine: AffineForm) -> Self {
        let reduced = match interval.intersect(&affine.to_interval()) {
            Some(common) => common,
            // disjoint only through rounding; keep the affine bound
            None => affine.to_interval(),
        };
        Self { interval: reduced, affine }
    }

    /// Seed both components from the same interval.
    pub fn from_interval(interval: &Interval) -> Self {
        Self::new(*interval, AffineForm::from_interval(interval))
    }

    pub fn interval(&self) -> &Interval {
        &self.interval
    }

    pub fn affine(&self) -> &AffineForm {
        &self.affine
    }

    /// Reduced enclosure
    pub fn to_interval(&self) -> Interval {
        self.interval
    }
}

impl From<Interval> for MixedForm {
    fn from(interval: Interval) -> Self {
        MixedForm::from_interval(&interval)
    }
}

impl fmt::Display for MixedForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.interval)
    }
}

impl Neg for MixedForm {
    type Output = MixedForm;

    fn neg(self) -> MixedForm {
        MixedForm::new(-self.interval, -self.affine)
    }
}

impl Add for MixedForm {
    type Output = MixedForm;

    fn add(self, rhs: MixedForm) -> MixedForm {
        MixedForm::new(self.interval + rhs.interval, self.affine + rhs.affine)
    }
}

impl Sub for MixedForm {
    type Output = MixedForm;

    fn sub(self, rhs: MixedForm) -> MixedForm {
        MixedForm::new(self.interval - rhs.interval, self.affine - rhs.affine)
    }
}

impl Mul for MixedForm {
    type Output = MixedForm;

    fn mul(self, rhs: MixedForm) -> MixedForm {
        MixedForm::new(self.interval * rhs.interval, self.affine * rhs.affine)
    }
}

impl Div for MixedForm {
    type Output = MixedForm;

    fn div(self, rhs: MixedForm) -> MixedForm {
        MixedForm::new(self.interval / rhs.interval, self.affine / rhs.affine)
    }
}

impl Add<f64> for MixedForm {
    type Output = MixedForm;

    fn add(self, rhs: f64) -> MixedForm {
        MixedForm::new(self.interval + rhs, self.affine + rhs)
    }
}

impl Sub<f64> for MixedForm {
    type Output = MixedForm;

    fn sub(self, rhs: f64) -> MixedForm {
        MixedForm::new(self.interval - rhs, self.affine - rhs)
    }
}

impl Mul<f64> for MixedForm {
    type Output = MixedForm;

    fn mul(self, rhs: f64) -> MixedForm {
        MixedForm::new(self.interval * rhs, self.affine * rhs)
    }
}

impl Div<f64> for MixedForm {
    type Output = MixedForm;

    fn div(self, rhs: f64) -> MixedForm {
        MixedForm::new(self.interval / rhs, self.affine / rhs)
    }
}

impl Zero for MixedForm {
    fn zero() -> Self {
        MixedForm::new(Interval::zero(), AffineForm::zero())
    }

    fn is_zero(&self) -> bool {
        self.interval.is_zero() && self.affine.is_zero()
    }
}

impl One for MixedForm {
    fn one() -> Self {
        MixedForm::new(Interval::one(), AffineForm::one())
    }
}

impl Numeric for MixedForm {
    fn domain_name() -> &'static str {
        "mixed"
    }

    fn from_real(value: f64) -> Self {
        MixedForm::new(Interval::point(value), AffineForm::constant(value))
    }

    fn pow(&self, power: u32) -> Self {
        MixedForm::new(self.interval.pow(power), self.affine.pow(power))
    }

    fn abs(&self) -> Self {
        MixedForm::new(self.interval.abs(), self.affine.abs())
    }

    fn lt_scalar(&self, value: f64) -> bool {
        self.interval.lt_scalar(value)
    }

    fn le_scalar(&self, value: f64) -> bool {
        self.interval.le_scalar(value)
    }

    fn gt_scalar(&self, value: f64) -> bool {
        self.interval.gt_scalar(value)
    }

    fn ge_scalar(&self, value: f64) -> bool {
        self.interval.ge_scalar(value)
    }

    fn enclosure(&self) -> (f64, f64) {
        self.interval.enclosure()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn mixed(lo: f64, hi: f64) -> MixedForm {
        MixedForm::from_interval(&Interval::new(lo, hi))
    }

    #[test]
    fn test_self_subtraction_reduced_by_affine() {
        let x = mixed(1.0, 2.0);
        let d = x.clone() - x;
        // the interval part alone would give [-1, 1]
        assert_eq!(d.to_interval(), Interval::point(0.0));
    }

    #[test]
    fn test_reduction_never_wider_than_components() {
        let x = mixed(-1.0, 2.0);
        let y = mixed(0.5, 1.5);
        let p = (x.clone() * y.clone()).pow(2) + x * 3.0;
        let reduced = p.to_interval();
        let from_affine = p.affine().to_interval();
        assert!(reduced.width() <= from_affine.width() + 1e-12);
        assert!(reduced.lo() >= from_affine.lo() - 1e-12);
    }

    #[test]
    fn test_square_uses_tighter_interval() {
        // affine squaring of [0, 1] overshoots below zero, the interval does not
        let x = mixed(0.0, 1.0);
        let sq = x.pow(2);
        assert!(sq.affine().to_interval().lo() < 0.0);
        assert_relative_eq!(sq.to_interval().lo(), 0.0);
    }

    #[test]
    fn test_from_real_is_exact() {
        let x = MixedForm::from_real(3.0);
        assert_eq!(x.to_interval(), Interval::point(3.0));
        assert_eq!(x.affine().noise_count(), 0);
    }

    #[test]
    fn test_serde_roundtrip() {
        let x = mixed(1.0, 2.0) * 2.0;
        let json = serde_json::to_string(&x).unwrap();
        assert!(json.starts_with(r#"{"interval":[2.0,4.0],"affine":{"center":3.0"#));
        let back: MixedForm = serde_json::from_str(&json).unwrap();
        assert_eq!(back, x);
    }
}
