//! Buckley-Leverett two-phase flow
//!
//! Water saturation `u` displacing oil in a porous medium, with a viscosity
//! ratio of 1/4:
//!
//! ```text
//! f(u)  = u² / (u² + ¼(1 − u)²)
//! f'(u) = (−8u² − u) / (25u⁴ − 20u³ + 14u² − 4u + 1)
//! ```
//!
//! The flux is S-shaped (non-convex), so solutions combine shocks and
//! rarefactions.
//!
//! `f'` is the characteristic speed used by the CFL check and the Rusanov
//! viscosity, in exactly the form above. It is not the analytic derivative
//! of `f`: at `u = 0.5` it gives `−1.6`.

use crate::domain::Numeric;
use crate::physics::FluxFunction;

#[derive(Debug, Clone, Copy, Default)]
pub struct BuckleyLeverettFlux;

impl BuckleyLeverettFlux {
    pub fn new() -> Self {
        Self
    }
}

impl<T: Numeric> FluxFunction<T> for BuckleyLeverettFlux {
    fn flux(&self, value: &T) -> T {
        let squared = value.pow(2);
        squared.clone() / (squared + (value.clone() * -1.0 + 1.0).pow(2) * 0.25)
    }

    fn derivative_flux(&self, value: &T) -> T {
        // powers built by hand rather than through pow() so that no power is
        // squared twice in the affine domain
        let squared = value.clone() * value.clone();
        let cubed = squared.clone() * value.clone();
        let fourth = cubed.clone() * value.clone();

        let numerator = squared.clone() * -8.0 - value.clone();
        let denominator = fourth * 25.0 - cubed * 20.0 + squared * 14.0 - value.clone() * 4.0 + 1.0;

        numerator / denominator
    }

    fn name(&self) -> &str {
        "buckley_leverett"
    }
}
