//! Leapfrog difference solver
//!
//! # Mathematical Background
//!
//! Leapfrog is a three-level centred scheme: row `t+1` is built from the
//! value two levels back and the flux difference one level back,
//!
//! ```text
//! u[t+1][x] = u[t−1][x] − Δt/Δx · (f(u[t][x+1]) − f(u[t][x−1]))
//! ```
//!
//! The recurrence needs two prior rows, so row 1 is *primed* with a single
//! [Lax-Friedrichs](super::lax_friedrichs) step from the initial row.
//!
//! # Characteristics
//!
//! - **Order**: Second-order accurate in time and space
//! - **Stability**: Conditionally stable, `|f'(u)|·Δt/Δx < 1`
//! - **Dissipation**: none, which leaves odd-even decoupling visible on
//!   rough initial data
//! - **Requirement**: at least two timesteps

use ndarray::ArrayView1;

use crate::domain::Numeric;
use crate::mesh::RectangularMesh;
use crate::physics::FluxFunction;
use crate::solver::methods::lax_friedrichs::lax_friedrichs_step;
use crate::solver::{
    cfl_check, sweep_row, PeriodicBoundary, Scenario, SimulationResult, Solver,
    SolverConfiguration, SolverError, SolverType,
};

/// Leapfrog update of one cell
///
/// `k` is `Δt / Δx`.
pub fn leapfrog_stencil<T: Numeric>(
    flux: &dyn FluxFunction<T>,
    previous: &T,
    left: &T,
    right: &T,
    k: f64,
) -> T {
    previous.clone() - (flux.flux(right) - flux.flux(left)) * k
}

/// One full leapfrog step from rows `t−1` and `t`
pub fn leapfrog_step<T: Numeric>(
    flux: &dyn FluxFunction<T>,
    previous: ArrayView1<'_, T>,
    current: ArrayView1<'_, T>,
    delta_t: f64,
    delta_x: f64,
) -> Vec<T> {
    let boundary = PeriodicBoundary::new(current.len());
    let k = delta_t / delta_x;

    sweep_row(boundary, |x| {
        let (left, right) = boundary.neighbours(x);
        leapfrog_stencil(flux, &previous[x], &current[left], &current[right], k)
    })
}

/// Second-order leapfrog solver, primed with one Lax-Friedrichs step
///
/// # Example
///
/// ```rust
/// use pdenclose_rs::models::CubicFlux;
/// use pdenclose_rs::solver::{LeapfrogSolver, Scenario, Solver, SolverConfiguration};
///
/// let scenario = Scenario::from_vec(Box::new(CubicFlux), vec![1.0, 2.0, 3.0, 4.0]);
/// let config = SolverConfiguration::leapfrog(4, 4, 0.02, 1.0);
///
/// let result = LeapfrogSolver::new().solve(&scenario, &config)?;
/// // row 1 is the Lax-Friedrichs primer
/// assert!((result.mesh.get(1, 0)? - 3.56).abs() < 1e-9);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LeapfrogSolver;

impl LeapfrogSolver {
    /// Create a new leapfrog solver
    pub fn new() -> Self {
        Self
    }
}

impl<T: Numeric> Solver<T> for LeapfrogSolver {
    fn solve(
        &self,
        scenario: &Scenario<T>,
        config: &SolverConfiguration,
    ) -> Result<SimulationResult<T>, SolverError> {
        // ====== Step 1: Validation ======

        if config.solver_type != SolverType::Leapfrog {
            return Err(SolverError::SolverMismatch {
                solver: Solver::<T>::name(self),
                requested: config.solver_type,
            });
        }
        config.validate()?;
        scenario.validate(config.discretization_size)?;

        let delta_x = config
            .spacing
            .uniform()
            .ok_or_else(|| SolverError::invalid_config("Leapfrog needs a uniform delta_x"))?;
        let delta_t = config.delta_t;
        let flux = scenario.flux.as_ref();

        // ====== Step 2: Setup ======

        let mut mesh = RectangularMesh::<T>::new(config.discretization_size, config.num_timesteps);
        mesh.copy_initial_conditions(scenario.initial_values())?;

        let mut violations = cfl_check(flux, mesh.row(0)?, 0, delta_t, &config.spacing);

        // ====== Step 3: Lax-Friedrichs primer ======

        let primer = lax_friedrichs_step(flux, mesh.row(0)?, delta_t, delta_x);
        mesh.set_row(1, primer)?;
        violations.extend(cfl_check(flux, mesh.row(1)?, 1, delta_t, &config.spacing));

        log::debug!(
            "Leapfrog: primed row 1 for {} over {} cells ({} domain)",
            flux.name(),
            config.discretization_size,
            T::domain_name()
        );

        // ====== Step 4: Time Integration ======

        for t in 1..config.num_timesteps - 1 {
            let next = leapfrog_step(flux, mesh.row(t - 1)?, mesh.row(t)?, delta_t, delta_x);
            mesh.set_row(t + 1, next)?;

            violations.extend(cfl_check(flux, mesh.row(t + 1)?, t + 1, delta_t, &config.spacing));
        }

        // ====== Step 5: Build Result ======

        let violation_count = violations.len();
        let mut result = SimulationResult::new(mesh, violations);

        result.add_metadata("solver", Solver::<T>::name(self));
        result.add_metadata("flux", flux.name());
        result.add_metadata("domain", T::domain_name());
        result.add_metadata("time steps", &config.num_timesteps.to_string());
        result.add_metadata("dt", &delta_t.to_string());
        result.add_metadata("dx", &delta_x.to_string());
        result.add_metadata("cfl violations", &violation_count.to_string());

        Ok(result)
    }

    fn name(&self) -> &'static str {
        "Leapfrog"
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AffineForm, Interval, MixedForm};
    use crate::models::{BurgersFlux, CubicFlux};
    use crate::solver::LaxFriedrichsSolver;
    use approx::assert_abs_diff_eq;

    fn unit_intervals() -> Vec<Interval> {
        (0..4).map(|i| Interval::new(i as f64, i as f64 + 1.0)).collect()
    }

    fn assert_enclosures<T: Numeric>(result: &SimulationResult<T>, t: usize, expected: &[(f64, f64)]) {
        let row = result.mesh.row(t).unwrap();
        for (got, (lo, hi)) in row.iter().zip(expected) {
            let (got_lo, got_hi) = got.enclosure();
            assert_abs_diff_eq!(got_lo, *lo, epsilon = 1e-5);
            assert_abs_diff_eq!(got_hi, *hi, epsilon = 1e-5);
        }
    }

    const AFFINE_ROW_2: [(f64, f64); 4] = [
        (-0.076409, 1.160407),
        (0.924492, 2.672938),
        (1.918658, 2.997344),
        (2.728068, 3.674502),
    ];

    #[test]
    fn test_stencil() {
        // previous = 1, left = 2, right = 3, k = 0.1
        let value = leapfrog_stencil(&BurgersFlux, &1.0, &2.0, &3.0, 0.1);
        assert_abs_diff_eq!(value, 1.0 - (4.5 - 2.0) * 0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_real_cubic_fixture() {
        let scenario = Scenario::from_vec(Box::new(CubicFlux), vec![1.0, 2.0, 3.0, 4.0]);
        let config = SolverConfiguration::leapfrog(4, 4, 0.02, 1.0);
        let result = LeapfrogSolver::new().solve(&scenario, &config).unwrap();

        let row = result.mesh.row(2).unwrap();
        for (got, want) in row.iter().zip([1.125503, 2.611825, 2.874497, 3.388175]) {
            assert_abs_diff_eq!(*got, want, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_primer_matches_lax_friedrichs() {
        let initial = vec![1.0, 2.0, 3.0, 4.0];
        let leapfrog = LeapfrogSolver::new()
            .solve(
                &Scenario::from_vec(Box::new(CubicFlux), initial.clone()),
                &SolverConfiguration::leapfrog(4, 3, 0.02, 1.0),
            )
            .unwrap();
        let friedrichs = LaxFriedrichsSolver::new()
            .solve(
                &Scenario::from_vec(Box::new(CubicFlux), initial),
                &SolverConfiguration::lax_friedrichs(4, 2, 0.02, 1.0),
            )
            .unwrap();

        assert_eq!(leapfrog.mesh.row(1).unwrap(), friedrichs.mesh.row(1).unwrap());
    }

    #[test]
    fn test_interval_primer_matches_lax_friedrichs() {
        let leapfrog = LeapfrogSolver::new()
            .solve(
                &Scenario::from_vec(Box::new(CubicFlux), unit_intervals()),
                &SolverConfiguration::leapfrog(4, 3, 0.02, 1.0),
            )
            .unwrap();
        let friedrichs = LaxFriedrichsSolver::new()
            .solve(
                &Scenario::from_vec(Box::new(CubicFlux), unit_intervals()),
                &SolverConfiguration::lax_friedrichs(4, 2, 0.02, 1.0),
            )
            .unwrap();

        assert_eq!(leapfrog.mesh.row(1).unwrap(), friedrichs.mesh.row(1).unwrap());
    }

    #[test]
    fn test_affine_primer_matches_lax_friedrichs() {
        // every product draws fresh symbols, so compare against a step taken
        // from the same row 0 by center and radius
        let initial: Vec<AffineForm> = unit_intervals().iter().map(AffineForm::from_interval).collect();
        let leapfrog = LeapfrogSolver::new()
            .solve(
                &Scenario::from_vec(Box::new(CubicFlux), initial),
                &SolverConfiguration::leapfrog(4, 3, 0.02, 1.0),
            )
            .unwrap();

        let expected = lax_friedrichs_step(&CubicFlux, leapfrog.mesh.row(0).unwrap(), 0.02, 1.0);
        for (got, want) in leapfrog.mesh.row(1).unwrap().iter().zip(&expected) {
            assert_abs_diff_eq!(got.center(), want.center(), epsilon = 1e-12);
            assert_abs_diff_eq!(got.radius(), want.radius(), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_mixed_primer_matches_lax_friedrichs() {
        let initial: Vec<MixedForm> = unit_intervals().iter().map(MixedForm::from_interval).collect();
        let leapfrog = LeapfrogSolver::new()
            .solve(
                &Scenario::from_vec(Box::new(CubicFlux), initial),
                &SolverConfiguration::leapfrog(4, 3, 0.02, 1.0),
            )
            .unwrap();

        let expected = lax_friedrichs_step(&CubicFlux, leapfrog.mesh.row(0).unwrap(), 0.02, 1.0);
        for (got, want) in leapfrog.mesh.row(1).unwrap().iter().zip(&expected) {
            let (got_lo, got_hi) = got.enclosure();
            let (want_lo, want_hi) = want.enclosure();
            assert_abs_diff_eq!(got_lo, want_lo, epsilon = 1e-12);
            assert_abs_diff_eq!(got_hi, want_hi, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_interval_cubic_fixture() {
        let scenario = Scenario::from_vec(Box::new(CubicFlux), unit_intervals());
        let config = SolverConfiguration::leapfrog(4, 4, 0.02, 1.0);
        let result = LeapfrogSolver::new().solve(&scenario, &config).unwrap();

        assert_enclosures(
            &result,
            2,
            &[(-0.119280, 1.226161), (0.766308, 2.905216), (1.773839, 3.119280), (2.094784, 4.233692)],
        );
    }

    #[test]
    fn test_affine_cubic_fixture() {
        let initial: Vec<AffineForm> = unit_intervals().iter().map(AffineForm::from_interval).collect();
        let scenario = Scenario::from_vec(Box::new(CubicFlux), initial);
        let config = SolverConfiguration::leapfrog(4, 4, 0.02, 1.0);
        let result = LeapfrogSolver::new().solve(&scenario, &config).unwrap();

        assert_enclosures(&result, 2, &AFFINE_ROW_2);
    }

    #[test]
    fn test_mixed_matches_affine() {
        let initial: Vec<MixedForm> = unit_intervals().iter().map(MixedForm::from_interval).collect();
        let scenario = Scenario::from_vec(Box::new(CubicFlux), initial);
        let config = SolverConfiguration::leapfrog(4, 4, 0.02, 1.0);
        let result = LeapfrogSolver::new().solve(&scenario, &config).unwrap();

        assert_enclosures(&result, 2, &AFFINE_ROW_2);
    }

    #[test]
    fn test_needs_two_timesteps() {
        let scenario = Scenario::from_vec(Box::new(CubicFlux), vec![1.0, 2.0, 3.0, 4.0]);
        let config = SolverConfiguration::leapfrog(4, 1, 0.02, 1.0);
        let err = LeapfrogSolver::new().solve(&scenario, &config).unwrap_err();
        assert!(matches!(err, SolverError::TooFewTimesteps { required: 2, found: 1, .. }));
    }

    #[test]
    fn test_two_timesteps_is_primer_only() {
        let scenario = Scenario::from_vec(Box::new(BurgersFlux), vec![0.1, 0.2, 0.3]);
        let config = SolverConfiguration::leapfrog(3, 2, 0.1, 1.0);
        let result = LeapfrogSolver::new().solve(&scenario, &config).unwrap();
        assert_eq!(result.mesh.num_timesteps(), 2);
        assert!(result.is_stable());
    }

    #[test]
    fn test_primer_row_is_cfl_checked() {
        let scenario = Scenario::from_vec(Box::new(CubicFlux), vec![1.0, 2.0, 3.0, 4.0]);
        let config = SolverConfiguration::leapfrog(4, 2, 0.5, 1.0);
        let result = LeapfrogSolver::new().solve(&scenario, &config).unwrap();

        assert!(result.cfl_violations.iter().any(|v| v.timestep == 0));
        assert!(result.cfl_violations.iter().any(|v| v.timestep == 1));
        assert!(result.cfl_violations.iter().all(|v| v.timestep <= 1));
    }
}
