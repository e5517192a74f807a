//! Numerical solvers
//!
//! This module provides the traits and implementations of the explicit
//! schemes that advance a conservation law `∂u/∂t + ∂f(u)/∂x = 0` on a
//! periodic 1-D grid, generically over every [`Numeric`](crate::domain::Numeric)
//! domain.
//!
//! # Core Concepts
//!
//! ## The Architecture (WHAT vs HOW)
//!
//! The solver architecture separates concerns into three layers:
//!
//! 1. **Scenario** (`Scenario`) - WHAT to solve
//!    - Flux function (the conservation law)
//!    - Initial row of domain values
//!
//! 2. **Configuration** (`SolverConfiguration`) - HOW to solve
//!    - Scheme (`SolverType`)
//!    - Discretisation: cells, timesteps, Δt, Δx or per-cell widths
//!
//! 3. **Solver** (`Solver` trait) - The numerical method
//!    - Validates every precondition before touching the mesh
//!    - Fills the mesh row by row
//!    - CFL-checks each row it produces
//!
//! # Module Organization
//!
//! - **`traits`**: `Solver`, `SolverType`, `SolverConfiguration`, `Spacing`,
//!   `SimulationResult`
//! - **`boundary`**: periodic neighbour lookup
//! - **`scenario`**: flux + initial conditions
//! - **`cfl`**: Courant-Friedrichs-Lewy stability check
//! - **`error`**: `SolverError`
//! - **Solver implementations**:
//!   - `LaxFriedrichsSolver`: first-order difference scheme
//!   - `LeapfrogSolver`: second-order three-level difference scheme
//!   - `LocalLaxFriedrichsSolver`: conservative Rusanov finite-volume scheme
//!
//! # Quick Start Example
//!
//! ```rust
//! use pdenclose_rs::domain::Interval;
//! use pdenclose_rs::models::CubicFlux;
//! use pdenclose_rs::solver::{LaxFriedrichsSolver, Scenario, Solver, SolverConfiguration};
//!
//! // 1. Create scenario (WHAT to solve)
//! let initial = vec![
//!     Interval::new(0.0, 1.0),
//!     Interval::new(1.0, 2.0),
//!     Interval::new(2.0, 3.0),
//!     Interval::new(3.0, 4.0),
//! ];
//! let scenario = Scenario::from_vec(Box::new(CubicFlux), initial);
//!
//! // 2. Create configuration (HOW to solve)
//! let config = SolverConfiguration::lax_friedrichs(4, 4, 0.02, 1.0);
//!
//! // 3. Solve
//! let result = LaxFriedrichsSolver::new().solve(&scenario, &config)?;
//!
//! // 4. Inspect
//! assert_eq!(result.mesh.num_timesteps(), 4);
//! for violation in &result.cfl_violations {
//!     println!("unstable at {}", violation);
//! }
//! # Ok::<(), pdenclose_rs::solver::SolverError>(())
//! ```
//!
//! # Error Handling
//!
//! Preconditions (initial length, timestep count, non-positive steps,
//! mismatched cell widths) are returned as [`SolverError`] before any mesh is
//! allocated. A CFL violation is *not* an error: it is logged, recorded in
//! [`SimulationResult::cfl_violations`] and the run continues. Callers that
//! want to abort use [`SimulationResult::into_checked`].

// =================================================================================================
// Module Declarations
// =================================================================================================
mod traits;
mod boundary;
mod scenario;
mod error;
pub mod cfl;
pub mod methods;

// =================================================================================================
// Parallel Execution Threshold
// =================================================================================================
//
// Read once per row sweep; Relaxed is enough since the value only picks the
// iteration strategy and never changes a computed cell.
// =================================================================================================

use std::sync::atomic::{AtomicUsize, Ordering};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Default number of interior cells above which a row sweep switches to
/// parallel iteration.
///
/// Below that point the overhead of Rayon's thread-pool dispatch outweighs
/// the per-cell stencil work, even for affine forms.
const DEFAULT_PARALLEL_THRESHOLD: usize = 999;

/// Runtime-configurable parallel-execution threshold.
///
/// Read via [`parallel_threshold()`], written via [`set_parallel_threshold()`].
static PARALLEL_THRESHOLD: AtomicUsize = AtomicUsize::new(DEFAULT_PARALLEL_THRESHOLD);

/// Return the current parallel-execution threshold.
///
/// A row sweep is sequential when the row has at most this many interior
/// cells, and switches to Rayon above it, but only when the crate is
/// compiled with the `parallel` feature.
///
/// # Example
///
/// ```rust
/// use pdenclose_rs::solver::parallel_threshold;
///
/// assert!(parallel_threshold() > 0);
/// ```
pub fn parallel_threshold() -> usize {
    PARALLEL_THRESHOLD.load(Ordering::Relaxed)
}

/// Set the parallel-execution threshold to a new value.
///
/// # Panics
///
/// Panics when `threshold == 0`.
///
/// # Example
///
/// ```rust
/// use pdenclose_rs::solver::{parallel_threshold, set_parallel_threshold};
///
/// let previous = parallel_threshold();
/// set_parallel_threshold(2048);
/// assert_eq!(parallel_threshold(), 2048);
///
/// // Restore so other tests are not affected.
/// set_parallel_threshold(previous);
/// ```
pub fn set_parallel_threshold(threshold: usize) {
    assert!(threshold > 0, "parallel threshold must be at least 1");
    PARALLEL_THRESHOLD.store(threshold, Ordering::Relaxed);
}

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use traits::{
    SimulationResult,
    Solver,
    SolverConfiguration,
    SolverType,
    Spacing,
};

pub use boundary::PeriodicBoundary;
pub use scenario::Scenario;
pub use error::SolverError;
pub use cfl::{cfl_check, cfl_value, is_cfl_stable, CflViolation, C_MAX};

pub use methods::{
    solver_for,
    LaxFriedrichsSolver,
    LeapfrogSolver,
    LocalLaxFriedrichsSolver,
};

// =================================================================================================
// Helper Functions
// =================================================================================================

/// Compute one mesh row, cell by cell
///
/// Interior cells are evaluated first (in parallel above the threshold when
/// the `parallel` feature is on), then the two wrapped edge cells. The
/// returned vector is in cell order.
pub(crate) fn sweep_row<T, F>(boundary: PeriodicBoundary, cell: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize) -> T + Sync,
{
    let size = boundary.size();
    let interior = boundary.interior();

    let inner: Vec<T> = if interior.len() > parallel_threshold() {
        #[cfg(feature = "parallel")]
        {
            interior.into_par_iter().map(&cell).collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            interior.map(&cell).collect()
        }
    } else {
        interior.map(&cell).collect()
    };

    let mut row = Vec::with_capacity(size);
    match size {
        0 => {}
        1 => row.push(cell(0)),
        _ => {
            let first = cell(0);
            let last = cell(size - 1);
            row.push(first);
            row.extend(inner);
            row.push(last);
        }
    }
    row
}

// =================================================================================================
// Tests
// =================================================================================================
