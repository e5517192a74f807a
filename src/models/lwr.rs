//! Lighthill-Whitham-Richards traffic flow

use crate::domain::Numeric;
use crate::physics::FluxFunction;

/// LWR traffic model in normalised density
///
/// - `f(u) = u(u − 1)`
/// - `f'(u) = −2u + 1`
#[derive(Debug, Clone, Copy, Default)]
pub struct LwrFlux;

impl LwrFlux {
    pub fn new() -> Self {
        Self
    }
}

impl<T: Numeric> FluxFunction<T> for LwrFlux {
    fn flux(&self, value: &T) -> T {
        value.clone() * (value.clone() - 1.0)
    }

    fn derivative_flux(&self, value: &T) -> T {
        value.clone() * -2.0 + 1.0
    }

    fn name(&self) -> &str {
        "lwr"
    }
}
