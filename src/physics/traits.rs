//! Flux function trait
//!
//! This module defines the core API for conservation laws:
//! - `FluxFunction`: the flux `f(u)` of `∂u/∂t + ∂f(u)/∂x = 0` and its derivative

use std::fmt::Debug;

use crate::domain::Numeric;

// =================================================================================================
// Flux Function
// =================================================================================================

/// Flux term of a 1-D scalar conservation law
///
/// A flux function is a stateless pure mapping from a domain value to a
/// domain value, paired with its derivative (the characteristic wave speed).
/// Implementations must be written only in terms of [`Numeric`] operations
/// so that a single implementation serves every numeric domain.
///
/// # Thread Safety
///
/// Flux functions are `Send + Sync`: solvers may evaluate them from several
/// threads during a parallel spatial sweep.
///
/// # Example
///
/// ```rust
/// use pdenclose_rs::domain::Numeric;
/// use pdenclose_rs::physics::FluxFunction;
///
/// /// Linear advection with unit speed
/// #[derive(Debug)]
/// struct Advection;
///
/// impl<T: Numeric> FluxFunction<T> for Advection {
///     fn flux(&self, value: &T) -> T { value.clone() }
///     fn derivative_flux(&self, _value: &T) -> T { T::one() }
///     fn name(&self) -> &str { "advection" }
/// }
///
/// let f: &dyn FluxFunction<f64> = &Advection;
/// assert_eq!(f.flux(&2.0), 2.0);
/// assert_eq!(f.derivative_flux(&2.0), 1.0);
/// ```
pub trait FluxFunction<T: Numeric>: Debug + Send + Sync {
    /// Evaluate `f(value)`
    fn flux(&self, value: &T) -> T;

    /// Evaluate `f'(value)`
    fn derivative_flux(&self, value: &T) -> T;

    /// Name of the conservation law (used in logs and result metadata)
    fn name(&self) -> &str;
}

impl<T: Numeric, F: FluxFunction<T> + ?Sized> FluxFunction<T> for Box<F> {
    fn flux(&self, value: &T) -> T {
        (**self).flux(value)
    }

    fn derivative_flux(&self, value: &T) -> T {
        (**self).derivative_flux(value)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
