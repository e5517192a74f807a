//! Interval domain
//!
//! Closed intervals `[lo, hi]` with outward-sound arithmetic. This is the
//! simplest set-valued domain: every operation returns an interval containing
//! all results of applying the operation to members of its operands, at the
//! price of losing any correlation between operands (`x - x` is not `0`).
//!
//! Intervals are also the concretisation target of the affine and mixed
//! domains, so they double as the exchange type for bounds.

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use num::traits::{One, Zero};
use serde::{Deserialize, Serialize};

use crate::domain::Numeric;

/// Closed real interval `[lo, hi]`
///
/// Serialised as a two-element array `[lo, hi]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(into = "[f64; 2]", from = "[f64; 2]")]
pub struct Interval {
    lo: f64,
    hi: f64,
}

impl Interval {
    /// Create an interval; bounds are sorted so `new(3, 1) == new(1, 3)`.
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            Self { lo: a, hi: b }
        } else {
            Self { lo: b, hi: a }
        }
    }

    /// Degenerate interval `[value, value]`
    pub fn point(value: f64) -> Self {
        Self { lo: value, hi: value }
    }

    /// `[-inf, +inf]`
    pub fn entire() -> Self {
        Self { lo: f64::NEG_INFINITY, hi: f64::INFINITY }
    }

    pub fn lo(&self) -> f64 {
        self.lo
    }

    pub fn hi(&self) -> f64 {
        self.hi
    }

    pub fn width(&self) -> f64 {
        self.hi - self.lo
    }

    /// Half the width
    pub fn radius(&self) -> f64 {
        self.width() / 2.0
    }

    pub fn midpoint(&self) -> f64 {
        (self.lo + self.hi) / 2.0
    }

    pub fn contains(&self, value: f64) -> bool {
        self.lo <= value && value <= self.hi
    }

    pub fn contains_zero(&self) -> bool {
        self.contains(0.0)
    }

    /// Common part of both intervals, `None` when they are disjoint.
    pub fn intersect(&self, other: &Interval) -> Option<Interval> {
        let lo = self.lo.max(other.lo);
        let hi = self.hi.min(other.hi);
        if lo <= hi { Some(Interval { lo, hi }) } else { None }
    }

    /// Smallest interval containing both operands
    pub fn hull(&self, other: &Interval) -> Interval {
        Interval {
            lo: self.lo.min(other.lo),
            hi: self.hi.max(other.hi),
        }
    }
}

/// Bound product with `0 * inf = 0`, the convention of interval arithmetic.
fn bound_mul(x: f64, y: f64) -> f64 {
    if x == 0.0 || y == 0.0 { 0.0 } else { x * y }
}

impl From<[f64; 2]> for Interval {
    fn from(bounds: [f64; 2]) -> Self {
        Interval::new(bounds[0], bounds[1])
    }
}

impl From<Interval> for [f64; 2] {
    fn from(interval: Interval) -> Self {
        [interval.lo, interval.hi]
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lo, self.hi)
    }
}

// =================================================================================================
// Arithmetic
// =================================================================================================

impl Add for Interval {
    type Output = Interval;

    fn add(self, rhs: Interval) -> Interval {
        Interval { lo: self.lo + rhs.lo, hi: self.hi + rhs.hi }
    }
}

impl Sub for Interval {
    type Output = Interval;

    fn sub(self, rhs: Interval) -> Interval {
        Interval { lo: self.lo - rhs.hi, hi: self.hi - rhs.lo }
    }
}

impl Mul for Interval {
    type Output = Interval;

    fn mul(self, rhs: Interval) -> Interval {
        let products = [
            bound_mul(self.lo, rhs.lo),
            bound_mul(self.lo, rhs.hi),
            bound_mul(self.hi, rhs.lo),
            bound_mul(self.hi, rhs.hi),
        ];
        let lo = products.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = products.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Interval { lo, hi }
    }
}

impl Div for Interval {
    type Output = Interval;

    fn div(self, rhs: Interval) -> Interval {
        if rhs.contains_zero() {
            return Interval::entire();
        }
        self * Interval { lo: 1.0 / rhs.hi, hi: 1.0 / rhs.lo }
    }
}

impl Neg for Interval {
    type Output = Interval;

    fn neg(self) -> Interval {
        Interval { lo: -self.hi, hi: -self.lo }
    }
}

impl Add<f64> for Interval {
    type Output = Interval;

    fn add(self, rhs: f64) -> Interval {
        Interval { lo: self.lo + rhs, hi: self.hi + rhs }
    }
}

impl Sub<f64> for Interval {
    type Output = Interval;

    fn sub(self, rhs: f64) -> Interval {
        Interval { lo: self.lo - rhs, hi: self.hi - rhs }
    }
}

impl Mul<f64> for Interval {
    type Output = Interval;

    fn mul(self, rhs: f64) -> Interval {
        Interval::new(bound_mul(self.lo, rhs), bound_mul(self.hi, rhs))
    }
}

impl Div<f64> for Interval {
    type Output = Interval;

    fn div(self, rhs: f64) -> Interval {
        if rhs == 0.0 {
            return Interval::zero();
        }
        self * (1.0 / rhs)
    }
}

impl Zero for Interval {
    fn zero() -> Self {
        Interval::point(0.0)
    }

    fn is_zero(&self) -> bool {
        self.lo == 0.0 && self.hi == 0.0
    }
}

impl One for Interval {
    fn one() -> Self {
        Interval::point(1.0)
    }
}

impl Numeric for Interval {
    fn domain_name() -> &'static str {
        "interval"
    }

    fn from_real(value: f64) -> Self {
        Interval::point(value)
    }

    fn pow(&self, power: u32) -> Self {
        if power == 0 {
            return Interval::one();
        }
        let n = power.min(i32::MAX as u32) as i32;
        if power % 2 == 1 {
            // odd powers are monotone
            return Interval { lo: self.lo.powi(n), hi: self.hi.powi(n) };
        }
        if self.lo >= 0.0 {
            Interval { lo: self.lo.powi(n), hi: self.hi.powi(n) }
        } else if self.hi <= 0.0 {
            Interval { lo: self.hi.powi(n), hi: self.lo.powi(n) }
        } else {
            Interval { lo: 0.0, hi: (-self.lo).max(self.hi).powi(n) }
        }
    }

    fn abs(&self) -> Self {
        if self.lo >= 0.0 {
            *self
        } else if self.hi <= 0.0 {
            -*self
        } else {
            Interval { lo: 0.0, hi: (-self.lo).max(self.hi) }
        }
    }

    fn lt_scalar(&self, value: f64) -> bool {
        self.hi < value
    }

    fn le_scalar(&self, value: f64) -> bool {
        self.hi <= value
    }

    fn gt_scalar(&self, value: f64) -> bool {
        self.lo > value
    }

    fn ge_scalar(&self, value: f64) -> bool {
        self.lo >= value
    }

    fn enclosure(&self) -> (f64, f64) {
        (self.lo, self.hi)
    }

    fn max(&self, other: &Self) -> Self {
        Interval {
            lo: self.lo.max(other.lo),
            hi: self.hi.max(other.hi),
        }
    }
}

// =================================================================================================
// Tests
// =================================================================================================
