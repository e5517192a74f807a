//! Mock flux functions for testing
//!
//! These laws have known analytical solutions, making them ideal for
//! validating the accuracy of the schemes.

use pdenclose_rs::domain::Numeric;
use pdenclose_rs::physics::FluxFunction;

// =================================================================================================
// Linear advection: f(u) = a·u
// =================================================================================================

/// Linear advection `∂u/∂t + a·∂u/∂x = 0`
///
/// Analytical solution: `u(x, t) = u₀(x − a·t)`, a pure translation.
#[derive(Debug, Clone, Copy)]
pub struct LinearAdvection {
    pub speed: f64,
}

impl LinearAdvection {
    pub fn new(speed: f64) -> Self {
        Self { speed }
    }

    /// Exact solution on a periodic unit domain
    pub fn analytical_solution(&self, u0: impl Fn(f64) -> f64, x: f64, t: f64) -> f64 {
        u0((x - self.speed * t).rem_euclid(1.0))
    }
}

impl<T: Numeric> FluxFunction<T> for LinearAdvection {
    fn flux(&self, value: &T) -> T {
        value.clone() * self.speed
    }

    fn derivative_flux(&self, _value: &T) -> T {
        T::from_real(self.speed)
    }

    fn name(&self) -> &str {
        "linear_advection"
    }
}

// =================================================================================================
// Zero flux: f(u) = 0
// =================================================================================================

/// Nothing moves: `∂u/∂t = 0`
///
/// Lax-Friedrichs reduces to neighbour averaging and leapfrog to
/// `u[t+1] = u[t−1]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroFlux;

impl<T: Numeric> FluxFunction<T> for ZeroFlux {
    fn flux(&self, _value: &T) -> T {
        T::zero()
    }

    fn derivative_flux(&self, _value: &T) -> T {
        T::zero()
    }

    fn name(&self) -> &str {
        "zero"
    }
}
