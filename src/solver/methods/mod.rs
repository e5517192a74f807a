//! Explicit schemes for 1-D conservation laws
//!
//! This module contains concrete implementations of the [`Solver`](crate::solver::Solver) trait.
//!
//! # Architecture
//!
//! The separation between abstract solver interface (`solver::traits`) and concrete
//! implementations (`solver::methods`) follows the Open-Closed Principle:
//! - **Open** for extension: Add new schemes without modifying existing code
//! - **Closed** for modification: The `Solver` trait is stable
//!
//! # Available Methods
//!
//! ## Difference schemes (uniform grid)
//!
//! - **[`LaxFriedrichsSolver`]**: first-order, strongly dissipative
//!   - Cost: 2 flux evaluations per cell and step
//!   - Use: robust reference runs, wide enclosures
//!
//! - **[`LeapfrogSolver`]**: second-order, non-dissipative
//!   - Cost: 2 flux evaluations per cell and step, plus one Lax-Friedrichs primer
//!   - Use: smooth data where numerical diffusion would hide the physics
//!
//! ## Volume schemes (per-cell widths)
//!
//! - **[`LocalLaxFriedrichsSolver`]**: conservative Rusanov finite volumes
//!   - Cost: 2 flux and 2 derivative evaluations per interface and step
//!   - Use: shocks, non-uniform grids, anything where `Σ wᵢuᵢ` must hold
//!
//! # Example
//!
//! ```rust
//! use pdenclose_rs::domain::AffineForm;
//! use pdenclose_rs::models::BurgersFlux;
//! use pdenclose_rs::solver::{solver_for, Scenario, SolverConfiguration, SolverType};
//!
//! let initial: Vec<AffineForm> = [0.1, 0.2, 0.3].iter().map(|v| AffineForm::constant(*v)).collect();
//! let scenario = Scenario::from_vec(Box::new(BurgersFlux), initial);
//!
//! let config = SolverConfiguration::leapfrog(3, 5, 0.1, 1.0);
//! let solver = solver_for::<AffineForm>(SolverType::Leapfrog);
//! let result = solver.solve(&scenario, &config)?;
//!
//! assert_eq!(result.mesh.num_timesteps(), 5);
//! assert!(result.is_stable());
//! # Ok::<(), pdenclose_rs::solver::SolverError>(())
//! ```
//!
//! # Design Philosophy
//!
//! Each solver is:
//! - **Self-contained**: No shared mutable state
//! - **Stateless**: Can be reused for multiple simulations
//! - **Generic**: one implementation serves every numeric domain
//!
//! # Performance Considerations
//!
//! All solvers benefit from:
//! - **Rayon parallelization** (feature `parallel`) for large spatial grids
//! - **Configurable threshold** via `set_parallel_threshold()`

pub mod lax_friedrichs;
pub mod leapfrog;
pub mod local_lax_friedrichs;

// Re-exports for convenience
pub use lax_friedrichs::LaxFriedrichsSolver;
pub use leapfrog::LeapfrogSolver;
pub use local_lax_friedrichs::LocalLaxFriedrichsSolver;

use crate::domain::Numeric;
use crate::solver::{Solver, SolverType};

/// Boxed solver implementing `solver_type`
pub fn solver_for<T: Numeric>(solver_type: SolverType) -> Box<dyn Solver<T>> {
    match solver_type {
        SolverType::LaxFriedrichs => Box::new(LaxFriedrichsSolver::new()),
        SolverType::Leapfrog => Box::new(LeapfrogSolver::new()),
        SolverType::LocalLaxFriedrichs => Box::new(LocalLaxFriedrichsSolver::new()),
    }
}
