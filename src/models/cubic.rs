//! Cubic flux `f(u) = u³`

use crate::domain::Numeric;
use crate::physics::FluxFunction;

/// Cubic conservation law
///
/// - `f(u) = u³`
/// - `f'(u) = 3u²`
#[derive(Debug, Clone, Copy, Default)]
pub struct CubicFlux;

impl CubicFlux {
    pub fn new() -> Self {
        Self
    }
}

impl<T: Numeric> FluxFunction<T> for CubicFlux {
    fn flux(&self, value: &T) -> T {
        value.pow(3)
    }

    fn derivative_flux(&self, value: &T) -> T {
        value.pow(2) * 3.0
    }

    fn name(&self) -> &str {
        "cubic"
    }
}
