//! Numerical solver traits and types
//!
//! # Design Philosophy
//!
//! - Central enum `SolverType` names the scheme a configuration is meant for
//! - `SolverConfiguration` carries the discretisation parameters shared by
//!   every scheme (size, steps, Δt, cell spacing)
//! - `SimulationResult` carries the filled mesh, the CFL diagnostics and a
//!   free-form metadata map
//!
//! # Stability Guarantee
//!
//! - `Solver` trait: one entry point, `solve(scenario, config)`
//! - `SolverType` enum: EXTENSIBLE (new schemes can be added)

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use nalgebra::DVector;
use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};

use crate::domain::Numeric;
use crate::mesh::RectangularMesh;
use crate::simulation::ConfigError;
use crate::solver::cfl::CflViolation;
use crate::solver::error::SolverError;
use crate::solver::Scenario;

// =================================================================================================
// Central Solver Type Enumeration
// =================================================================================================

/// Explicit scheme used to advance the conservation law
///
/// # Examples
///
/// ```rust
/// use pdenclose_rs::solver::SolverType;
///
/// let solver: SolverType = "leapfrog".parse()?;
/// assert_eq!(solver, SolverType::Leapfrog);
/// assert_eq!(solver.min_timesteps(), 2);
/// # Ok::<(), pdenclose_rs::simulation::ConfigError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolverType {
    /// First-order difference scheme on a uniform grid
    #[default]
    LaxFriedrichs,

    /// Second-order three-level difference scheme, primed with one
    /// Lax-Friedrichs step
    Leapfrog,

    /// Conservative finite-volume scheme with Rusanov interface fluxes
    LocalLaxFriedrichs,
}

impl SolverType {
    /// Every supported scheme
    pub const ALL: [SolverType; 3] = [
        SolverType::LaxFriedrichs,
        SolverType::Leapfrog,
        SolverType::LocalLaxFriedrichs,
    ];

    /// Configuration name
    pub fn name(&self) -> &'static str {
        match self {
            SolverType::LaxFriedrichs => "lax_friedrichs",
            SolverType::Leapfrog => "leapfrog",
            SolverType::LocalLaxFriedrichs => "local_lax_friedrichs",
        }
    }

    /// Smallest mesh height the scheme can fill
    pub fn min_timesteps(&self) -> usize {
        match self {
            SolverType::Leapfrog => 2,
            SolverType::LaxFriedrichs | SolverType::LocalLaxFriedrichs => 1,
        }
    }

    /// Whether the scheme accepts per-cell widths
    pub fn supports_cell_widths(&self) -> bool {
        matches!(self, SolverType::LocalLaxFriedrichs)
    }
}

impl fmt::Display for SolverType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SolverType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SolverType::ALL
            .into_iter()
            .find(|solver| solver.name() == s)
            .ok_or_else(|| ConfigError::UnknownName {
                field: "solver",
                name: s.to_string(),
            })
    }
}

// =================================================================================================
// Spatial spacing
// =================================================================================================

/// Width of the spatial cells
#[derive(Clone, Debug, PartialEq)]
pub enum Spacing {
    /// Every cell is `Δx` wide
    Uniform(f64),

    /// Cell `i` is `widths[i]` wide
    Cells(DVector<f64>),
}

impl Spacing {
    /// Per-cell widths from a plain vector
    pub fn cells(widths: Vec<f64>) -> Self {
        Spacing::Cells(DVector::from_vec(widths))
    }

    /// Width of cell `point`
    ///
    /// Callers validate the configuration first, so `point` is always inside
    /// the width vector.
    pub fn width(&self, point: usize) -> f64 {
        match self {
            Spacing::Uniform(delta_x) => *delta_x,
            Spacing::Cells(widths) => widths[point],
        }
    }

    /// `Δx` for difference schemes, `None` for per-cell widths
    pub fn uniform(&self) -> Option<f64> {
        match self {
            Spacing::Uniform(delta_x) => Some(*delta_x),
            Spacing::Cells(_) => None,
        }
    }

    fn validate(&self, discretization_size: usize) -> Result<(), SolverError> {
        match self {
            Spacing::Uniform(delta_x) => check_step("delta_x", *delta_x),
            Spacing::Cells(widths) => {
                if widths.len() != discretization_size {
                    return Err(SolverError::CellWidths {
                        expected: discretization_size,
                        found: widths.len(),
                    });
                }
                widths.iter().try_for_each(|w| check_step("cell width", *w))
            }
        }
    }
}

impl fmt::Display for Spacing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Spacing::Uniform(delta_x) => write!(f, "uniform({})", delta_x),
            Spacing::Cells(widths) => write!(f, "cells({})", widths.len()),
        }
    }
}

fn check_step(name: &'static str, value: f64) -> Result<(), SolverError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SolverError::InvalidStep { name, value })
    }
}

// =================================================================================================
// Solver configuration
// =================================================================================================

/// Discretisation parameters handed to a [`Solver`]
///
/// # Examples
///
/// ```rust
/// use pdenclose_rs::solver::{SolverConfiguration, Spacing};
///
/// let config = SolverConfiguration::lax_friedrichs(4, 4, 0.02, 1.0);
/// assert!(config.validate().is_ok());
///
/// let bad = SolverConfiguration::leapfrog(4, 1, 0.02, 1.0);
/// assert!(bad.validate().is_err());
///
/// let volume = SolverConfiguration::local_lax_friedrichs(
///     3, 10, 0.01, Spacing::cells(vec![1.0, 0.5, 1.0]),
/// );
/// assert!(volume.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SolverConfiguration {
    /// Scheme the configuration is meant for
    pub solver_type: SolverType,

    /// Number of spatial cells per row
    pub discretization_size: usize,

    /// Number of mesh rows, including the initial one
    pub num_timesteps: usize,

    /// Time step Δt
    pub delta_t: f64,

    /// Spatial step(s)
    pub spacing: Spacing,
}

impl SolverConfiguration {
    /// Create a new configuration
    pub fn new(
        solver_type: SolverType,
        discretization_size: usize,
        num_timesteps: usize,
        delta_t: f64,
        spacing: Spacing,
    ) -> Self {
        Self {
            solver_type,
            discretization_size,
            num_timesteps,
            delta_t,
            spacing,
        }
    }

    /// Create a Lax-Friedrichs configuration
    pub fn lax_friedrichs(
        discretization_size: usize,
        num_timesteps: usize,
        delta_t: f64,
        delta_x: f64,
    ) -> Self {
        Self::new(
            SolverType::LaxFriedrichs,
            discretization_size,
            num_timesteps,
            delta_t,
            Spacing::Uniform(delta_x),
        )
    }

    /// Create a Leapfrog configuration
    pub fn leapfrog(
        discretization_size: usize,
        num_timesteps: usize,
        delta_t: f64,
        delta_x: f64,
    ) -> Self {
        Self::new(
            SolverType::Leapfrog,
            discretization_size,
            num_timesteps,
            delta_t,
            Spacing::Uniform(delta_x),
        )
    }

    /// Create a finite-volume configuration
    pub fn local_lax_friedrichs(
        discretization_size: usize,
        num_timesteps: usize,
        delta_t: f64,
        spacing: Spacing,
    ) -> Self {
        Self::new(
            SolverType::LocalLaxFriedrichs,
            discretization_size,
            num_timesteps,
            delta_t,
            spacing,
        )
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), SolverError> {
        if self.discretization_size == 0 {
            return Err(SolverError::invalid_config(
                "discretization size must be at least 1",
            ));
        }

        let required = self.solver_type.min_timesteps();
        if self.num_timesteps < required {
            return Err(SolverError::TooFewTimesteps {
                solver: self.solver_type.name(),
                required,
                found: self.num_timesteps,
            });
        }

        check_step("delta_t", self.delta_t)?;

        if !self.solver_type.supports_cell_widths() && self.spacing.uniform().is_none() {
            return Err(SolverError::invalid_config(format!(
                "{} needs a uniform delta_x",
                self.solver_type
            )));
        }

        self.spacing.validate(self.discretization_size)
    }
}

// =================================================================================================
// Simulation result
// =================================================================================================

/// Output of a solver run
///
/// The mesh is always complete: a CFL violation is recorded, never fatal.
/// Use [`into_checked`](Self::into_checked) to turn violations into an error.
#[derive(Clone, Debug)]
pub struct SimulationResult<T> {
    /// Filled `num_timesteps × discretization_size` mesh
    pub mesh: RectangularMesh<T>,

    /// Every cell that failed the CFL check, in time order
    pub cfl_violations: Vec<CflViolation>,

    /// Free-form run description
    pub metadata: HashMap<String, String>,
}

impl<T: Numeric> SimulationResult<T> {
    /// Create a result without metadata
    pub fn new(mesh: RectangularMesh<T>, cfl_violations: Vec<CflViolation>) -> Self {
        Self {
            mesh,
            cfl_violations,
            metadata: HashMap::new(),
        }
    }

    /// Attach a metadata entry
    pub fn add_metadata(&mut self, key: &str, value: &str) {
        self.metadata.insert(key.to_string(), value.to_string());
    }

    /// `true` when no cell violated the CFL condition
    pub fn is_stable(&self) -> bool {
        self.cfl_violations.is_empty()
    }

    /// Fail with [`SolverError::Unstable`] if any cell violated the CFL condition
    pub fn into_checked(self) -> Result<Self, SolverError> {
        match self.cfl_violations.first() {
            None => Ok(self),
            Some(first) => Err(SolverError::Unstable {
                count: self.cfl_violations.len(),
                first: *first,
            }),
        }
    }

    /// Last computed row
    pub fn final_row(&self) -> Option<ArrayView1<'_, T>> {
        self.mesh.last_row()
    }
}

// =================================================================================================
// Solver trait
// =================================================================================================

/// Explicit time-stepping scheme over a numeric domain
///
/// Implementations validate every precondition before allocating the mesh,
/// then fill it row by row and CFL-check each row they produce.
pub trait Solver<T: Numeric> {
    /// Run the scheme on `scenario`
    fn solve(
        &self,
        scenario: &Scenario<T>,
        config: &SolverConfiguration,
    ) -> Result<SimulationResult<T>, SolverError>;

    /// Human readable scheme name
    fn name(&self) -> &'static str;
}

// =================================================================================================
// Tests
// =================================================================================================
