//! Inviscid Burgers flux `f(u) = u²/2`

use crate::domain::Numeric;
use crate::physics::FluxFunction;

/// Inviscid Burgers equation
///
/// - `f(u) = u²/2`
/// - `f'(u) = u`
///
/// The canonical model of shock formation: characteristics travel at the
/// local value of `u`, so faster parts of a profile overtake slower ones.
#[derive(Debug, Clone, Copy, Default)]
pub struct BurgersFlux;

impl BurgersFlux {
    pub fn new() -> Self {
        Self
    }
}

impl<T: Numeric> FluxFunction<T> for BurgersFlux {
    fn flux(&self, value: &T) -> T {
        value.pow(2) * 0.5
    }

    fn derivative_flux(&self, value: &T) -> T {
        value.clone()
    }

    fn name(&self) -> &str {
        "burgers"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AffineForm;

    #[test]
    fn test_burgers_values() {
        let f = BurgersFlux::new();
        assert_eq!(FluxFunction::<f64>::flux(&f, &3.0), 4.5);
        assert_eq!(FluxFunction::<f64>::derivative_flux(&f, &-3.0), -3.0);
    }

    #[test]
    fn test_derivative_keeps_affine_correlation() {
        let f = BurgersFlux::new();
        let x = AffineForm::from_real(1.5);
        assert_eq!(f.derivative_flux(&x), x);
    }
}
