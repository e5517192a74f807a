//! pdenclose-rs: Enclosing Solutions of 1-D Conservation Laws
//!
//! Explicit finite-difference and finite-volume solvers for scalar hyperbolic
//! conservation laws `∂u/∂t + ∂f(u)/∂x = 0`, run over plain reals or over
//! set-valued domains that carry initial uncertainty through every step.
//!
//! # Architecture
//!
//! pdenclose-rs is built on two core principles:
//!
//! 1. **Separation of Physics and Numerics**
//!    - Flux functions define the law (what to solve)
//!    - Solvers provide the scheme (how to solve)
//!
//! 2. **One implementation, every domain**
//!    - Fluxes, meshes and solvers are generic over [`domain::Numeric`]
//!    - Real, interval, affine and mixed arithmetic plug in unchanged
//!
//! # Quick Start
//!
//! ```rust
//! use pdenclose_rs::domain::{AffineForm, Interval};
//! use pdenclose_rs::models::BurgersFlux;
//! use pdenclose_rs::solver::{LaxFriedrichsSolver, Scenario, Solver, SolverConfiguration};
//!
//! // 1. Uncertain initial row: every cell known to ±0.05
//! let initial: Vec<AffineForm> = [0.2, 0.5, 0.8, 0.5]
//!     .iter()
//!     .map(|v| AffineForm::from_interval(&Interval::new(v - 0.05, v + 0.05)))
//!     .collect();
//! let scenario = Scenario::from_vec(Box::new(BurgersFlux), initial);
//!
//! // 2. Configure solver: 4 cells, 20 timesteps, Δt = 0.1, Δx = 1
//! let config = SolverConfiguration::lax_friedrichs(4, 20, 0.1, 1.0);
//!
//! // 3. Run simulation
//! let result = LaxFriedrichsSolver::new().solve(&scenario, &config)?;
//!
//! // 4. Access results
//! assert!(result.is_stable());
//! for value in result.final_row().unwrap() {
//!     println!("{}", value.to_interval());
//! }
//! # Ok::<(), pdenclose_rs::solver::SolverError>(())
//! ```
//!
//! # Modules
//!
//! - [`domain`]: Numeric contract and the real/interval/affine/mixed domains
//! - [`physics`]: Flux function trait
//! - [`models`]: Concrete flux laws
//! - [`mesh`]: Space-time solution storage
//! - [`solver`]: Schemes, CFL checking, configuration
//! - [`simulation`]: Configuration files, initial conditions, configured runs
//! - [`output`]: JSON and CSV export

// Core modules
pub mod domain;
pub mod physics;

pub mod models;
pub mod mesh;
pub mod solver;

pub mod simulation;
pub mod output;

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //! use pdenclose_rs::prelude::*;
    //! ```
    pub use crate::domain::{AffineForm, Interval, MixedForm, Numeric};
    pub use crate::mesh::RectangularMesh;
    pub use crate::models::{BuckleyLeverettFlux, BurgersFlux, CubicFlux, FluxKind, LwrFlux};
    pub use crate::physics::FluxFunction;
    pub use crate::simulation::{run_simulation, DomainKind, SimulationConfig};
    pub use crate::solver::{
        LaxFriedrichsSolver,
        LeapfrogSolver,
        LocalLaxFriedrichsSolver,
        Scenario,
        SimulationResult,
        Solver,
        SolverConfiguration,
        SolverType,
        Spacing,
    };
}
