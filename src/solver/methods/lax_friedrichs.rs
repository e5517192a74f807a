//! Lax-Friedrichs difference solver
//!
//! # Mathematical Background
//!
//! The Lax-Friedrichs scheme replaces the cell value by the average of its
//! neighbours before applying a centred flux difference:
//!
//! ```text
//! u[t+1][x] = (u[t][x+1] + u[t][x−1]) / 2 − Δt/(2Δx) · (f(u[t][x+1]) − f(u[t][x−1]))
//! ```
//!
//! Indices wrap periodically.
//!
//! # Characteristics
//!
//! - **Order**: First-order accurate in time and space
//! - **Stability**: Conditionally stable, `|f'(u)|·Δt/Δx < 1`
//! - **Memory**: two rows of the mesh are read per step
//! - **Dissipation**: strong numerical diffusion, which makes it a robust
//!   primer for the leapfrog scheme
//!
//! # Example
//!
//! ```rust
//! use pdenclose_rs::models::CubicFlux;
//! use pdenclose_rs::solver::{LaxFriedrichsSolver, Scenario, Solver, SolverConfiguration};
//!
//! let scenario = Scenario::from_vec(Box::new(CubicFlux), vec![1.0, 2.0, 3.0, 4.0]);
//! let config = SolverConfiguration::lax_friedrichs(4, 4, 0.02, 1.0);
//!
//! let result = LaxFriedrichsSolver::new().solve(&scenario, &config)?;
//! assert!((result.mesh.get(1, 0)? - 3.56).abs() < 1e-9);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use ndarray::ArrayView1;

use crate::domain::Numeric;
use crate::mesh::RectangularMesh;
use crate::physics::FluxFunction;
use crate::solver::{
    cfl_check, sweep_row, PeriodicBoundary, Scenario, SimulationResult, Solver,
    SolverConfiguration, SolverError, SolverType,
};

// =================================================================================================
// Stencil
// =================================================================================================

/// Lax-Friedrichs update of one cell from its two neighbours
///
/// `k` is `Δt / (2Δx)`.
pub fn lax_friedrichs_stencil<T: Numeric>(
    flux: &dyn FluxFunction<T>,
    left: &T,
    right: &T,
    k: f64,
) -> T {
    (right.clone() + left.clone()) * 0.5 - (flux.flux(right) - flux.flux(left)) * k
}

/// One full Lax-Friedrichs step over a periodic row
pub fn lax_friedrichs_step<T: Numeric>(
    flux: &dyn FluxFunction<T>,
    row: ArrayView1<'_, T>,
    delta_t: f64,
    delta_x: f64,
) -> Vec<T> {
    let boundary = PeriodicBoundary::new(row.len());
    let k = delta_t / delta_x / 2.0;

    sweep_row(boundary, |x| {
        let (left, right) = boundary.neighbours(x);
        lax_friedrichs_stencil(flux, &row[left], &row[right], k)
    })
}

// =================================================================================================
// Lax-Friedrichs Solver
// =================================================================================================

/// Lax-Friedrichs time-stepping solver
///
/// # Algorithm
///
/// 1. Copy the initial conditions into row 0 and CFL-check it
/// 2. For each step `t = 0, 1, ..., N−2`:
///    - compute row `t+1` from row `t` with [`lax_friedrichs_step`]
///    - CFL-check row `t+1`
/// 3. Return the mesh together with every CFL violation found
#[derive(Debug, Clone, Copy, Default)]
pub struct LaxFriedrichsSolver;

impl LaxFriedrichsSolver {
    /// Create a new Lax-Friedrichs solver
    ///
    /// # Example
    ///
    /// ```rust
    /// use pdenclose_rs::solver::{LaxFriedrichsSolver, Solver};
    ///
    /// let solver = LaxFriedrichsSolver::new();
    /// assert_eq!(Solver::<f64>::name(&solver), "Lax-Friedrichs");
    /// ```
    pub fn new() -> Self {
        Self
    }
}

impl<T: Numeric> Solver<T> for LaxFriedrichsSolver {
    fn solve(
        &self,
        scenario: &Scenario<T>,
        config: &SolverConfiguration,
    ) -> Result<SimulationResult<T>, SolverError> {
        // ====== Step 1: Validation ======

        if config.solver_type != SolverType::LaxFriedrichs {
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
            .ok_or_else(|| SolverError::invalid_config("Lax-Friedrichs needs a uniform delta_x"))?;
        let delta_t = config.delta_t;
        let flux = scenario.flux.as_ref();

        // ====== Step 2: Setup ======

        let mut mesh = RectangularMesh::<T>::new(config.discretization_size, config.num_timesteps);
        mesh.copy_initial_conditions(scenario.initial_values())?;

        let mut violations = cfl_check(flux, mesh.row(0)?, 0, delta_t, &config.spacing);

        log::debug!(
            "Lax-Friedrichs: {} over {} cells x {} timesteps ({} domain)",
            flux.name(),
            config.discretization_size,
            config.num_timesteps,
            T::domain_name()
        );

        // ====== Step 3: Time Integration ======

        for t in 0..config.num_timesteps - 1 {
            let next = lax_friedrichs_step(flux, mesh.row(t)?, delta_t, delta_x);
            mesh.set_row(t + 1, next)?;

            violations.extend(cfl_check(flux, mesh.row(t + 1)?, t + 1, delta_t, &config.spacing));
        }

        // ====== Step 4: Build Result ======

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
        "Lax-Friedrichs"
    }
}

// =================================================================================================
// Tests
// =================================================================================================
