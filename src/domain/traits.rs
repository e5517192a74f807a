//! The numeric domain contract
//!
//! # Design
//!
//! [`Numeric`] is the single polymorphism boundary of the crate: flux
//! functions, meshes and solvers are written once against it and are
//! monomorphised for every concrete domain:
//!
//! | Domain     | Type                                  | Meaning                              |
//! |------------|---------------------------------------|--------------------------------------|
//! | Real       | `f64`                                 | plain floating point                 |
//! | Interval   | [`Interval`](crate::domain::Interval) | sound `[lo, hi]` enclosure           |
//! | Affine     | [`AffineForm`](crate::domain::AffineForm) | center + noise-symbol coefficients |
//! | Mixed      | [`MixedForm`](crate::domain::MixedForm) | reduced product of the two above   |
//!
//! # Comparisons
//!
//! Ordering against a real number is not total for set-valued domains. The
//! `*_scalar` predicates are answered on the concretised interval and hold only
//! when they hold for *every* value of the enclosure. A straddling value is
//! therefore neither `< x` nor `>= x`.

use std::fmt::{Debug, Display};
use std::ops::{Add, Div, Mul, Neg, Sub};

use num::traits::{One, Zero};

/// Capability set required from any simulation value type
///
/// # Example
///
/// ```rust
/// use pdenclose_rs::domain::Numeric;
///
/// fn kinetic<T: Numeric>(u: &T) -> T {
///     u.pow(2) * 0.5
/// }
///
/// assert_eq!(kinetic(&4.0_f64), 8.0);
/// ```
pub trait Numeric:
    Clone
    + Debug
    + Display
    + PartialEq
    + Send
    + Sync
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + Add<f64, Output = Self>
    + Sub<f64, Output = Self>
    + Mul<f64, Output = Self>
    + Div<f64, Output = Self>
    + Zero
    + One
{
    /// `false` only for domains whose values are single points
    const SET_VALUED: bool = true;

    /// Short lowercase name of the domain (`"real"`, `"interval"`, ...)
    fn domain_name() -> &'static str;

    /// Embed an exact real number into the domain
    fn from_real(value: f64) -> Self;

    /// Integer power
    fn pow(&self, power: u32) -> Self;

    /// Absolute value
    fn abs(&self) -> Self;

    /// `self < value` for every represented value
    fn lt_scalar(&self, value: f64) -> bool;

    /// `self <= value` for every represented value
    fn le_scalar(&self, value: f64) -> bool;

    /// `self > value` for every represented value
    fn gt_scalar(&self, value: f64) -> bool;

    /// `self >= value` for every represented value
    fn ge_scalar(&self, value: f64) -> bool;

    /// Lower and upper bound of the concretised value
    fn enclosure(&self) -> (f64, f64);

    /// Pointwise maximum, `(a + b + |a - b|) / 2`
    fn max(&self, other: &Self) -> Self {
        let gap = (self.clone() - other.clone()).abs();
        (self.clone() + other.clone() + gap) * 0.5
    }

    /// Both bounds of the enclosure are finite
    fn is_finite(&self) -> bool {
        let (lo, hi) = self.enclosure();
        lo.is_finite() && hi.is_finite()
    }
}

// =================================================================================================
// Real domain
// =================================================================================================

impl Numeric for f64 {
    const SET_VALUED: bool = false;

    fn domain_name() -> &'static str {
        "real"
    }

    fn from_real(value: f64) -> Self {
        value
    }

    fn pow(&self, power: u32) -> Self {
        // powi takes i32; exponents above i32::MAX overflow to inf anyway
        self.powi(power.min(i32::MAX as u32) as i32)
    }

    fn abs(&self) -> Self {
        f64::abs(*self)
    }

    fn lt_scalar(&self, value: f64) -> bool {
        *self < value
    }

    fn le_scalar(&self, value: f64) -> bool {
        *self <= value
    }

    fn gt_scalar(&self, value: f64) -> bool {
        *self > value
    }

    fn ge_scalar(&self, value: f64) -> bool {
        *self >= value
    }

    fn enclosure(&self) -> (f64, f64) {
        (*self, *self)
    }

    fn max(&self, other: &Self) -> Self {
        f64::max(*self, *other)
    }
}
