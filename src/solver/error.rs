//! Error types for the solver engine

use thiserror::Error;

use crate::mesh::MeshError;
use crate::solver::cfl::CflViolation;
use crate::solver::SolverType;

/// Errors raised by solver configuration, preconditions and execution.
///
/// Every precondition is checked before the mesh is allocated, so an error
/// never leaves a partially written mesh behind.
#[derive(Error, Debug)]
pub enum SolverError {
    /// Initial state length differs from the discretisation size.
    #[error("Initial state has {found} values, discretization size is {expected}")]
    InitialLength { expected: usize, found: usize },

    /// Not enough timesteps for the scheme.
    #[error("{solver} needs at least {required} timesteps, got {found}")]
    TooFewTimesteps {
        solver: &'static str,
        required: usize,
        found: usize,
    },

    /// Δt, Δx or a cell width is zero, negative or not finite.
    #[error("{name} must be positive and finite, got {value}")]
    InvalidStep { name: &'static str, value: f64 },

    /// Per-cell widths do not cover the discretisation.
    #[error("Expected {expected} cell widths, got {found}")]
    CellWidths { expected: usize, found: usize },

    /// Configuration inconsistent with the solver it is handed to.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The configuration names a different scheme than the solver implements.
    #[error("{solver} cannot run a {requested} configuration")]
    SolverMismatch {
        solver: &'static str,
        requested: SolverType,
    },

    /// Raised by [`SimulationResult::into_checked`](crate::solver::SimulationResult::into_checked).
    #[error("CFL condition violated at {count} cell(s), first at {first}")]
    Unstable { count: usize, first: CflViolation },

    /// Mesh access failed.
    #[error(transparent)]
    Mesh(#[from] MeshError),
}

impl SolverError {
    /// Create an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}
