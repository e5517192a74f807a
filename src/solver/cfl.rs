//! Courant-Friedrichs-Lewy stability check
//!
//! # Mathematical Background
//!
//! An explicit scheme for `∂u/∂t + ∂f(u)/∂x = 0` is only stable when no
//! characteristic travels further than one cell per timestep:
//!
//! ```text
//! ν = |f'(u)| · Δt / Δx < C_max        (C_max = 1)
//! ```
//!
//! Over set-valued domains `ν` is itself an enclosure; a cell is stable only
//! when the *whole* enclosure lies below `C_max`. An enclosure that straddles
//! the bound is reported as a violation.
//!
//! # Reporting
//!
//! A violation is a diagnostic, never a process exit: each one is logged at
//! `warn` level and returned to the caller, who decides whether to abort.

use std::fmt;

use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};

use crate::domain::Numeric;
use crate::physics::FluxFunction;
use crate::solver::Spacing;

/// Stability bound for explicit hyperbolic schemes
pub const C_MAX: f64 = 1.0;

/// Location of a cell whose CFL number reached [`C_MAX`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CflViolation {
    pub timestep: usize,
    pub point: usize,
}

impl fmt::Display for CflViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timestep {} point {}", self.timestep, self.point)
    }
}

/// CFL number `|f'(u)| · Δt / Δx` in the domain of `u`
pub fn cfl_value<T: Numeric>(
    flux: &dyn FluxFunction<T>,
    value: &T,
    delta_t: f64,
    delta_x: f64,
) -> T {
    flux.derivative_flux(value).abs() * delta_t / delta_x
}

/// `true` when the cell is stable, i.e. its CFL number is below [`C_MAX`].
///
/// # Example
///
/// ```rust
/// use pdenclose_rs::models::BurgersFlux;
/// use pdenclose_rs::solver::is_cfl_stable;
///
/// // Burgers: f'(u) = u
/// assert!(is_cfl_stable(&BurgersFlux, &0.5_f64, 1.0, 1.0));
/// assert!(!is_cfl_stable(&BurgersFlux, &1.0_f64, 1.0, 1.0));
/// ```
pub fn is_cfl_stable<T: Numeric>(
    flux: &dyn FluxFunction<T>,
    value: &T,
    delta_t: f64,
    delta_x: f64,
) -> bool {
    cfl_value(flux, value, delta_t, delta_x).lt_scalar(C_MAX)
}

/// Check every cell of one mesh row and return the unstable ones.
pub fn cfl_check<T: Numeric>(
    flux: &dyn FluxFunction<T>,
    row: ArrayView1<'_, T>,
    timestep: usize,
    delta_t: f64,
    spacing: &Spacing,
) -> Vec<CflViolation> {
    let mut violations = Vec::new();

    for (point, value) in row.iter().enumerate() {
        let delta_x = spacing.width(point);
        if !is_cfl_stable(flux, value, delta_t, delta_x) {
            log::warn!(
                "CFL check failed at timestep {} point {} with value {}",
                timestep,
                point,
                cfl_value(flux, value, delta_t, delta_x)
            );
            violations.push(CflViolation { timestep, point });
        }
    }

    violations
}

// =================================================================================================
// Tests
// =================================================================================================
