//! Simulation scenario definition
//!
//! A scenario combines a flux function with the initial row of the mesh.
use nalgebra::DVector;

use crate::domain::Numeric;
use crate::physics::FluxFunction;
use crate::solver::error::SolverError;

/// Simulation scenario
///
/// Defines a specific case to simulate:
/// - Conservation law (flux function)
/// - Initial conditions (one domain value per cell)
///
/// # Design
///
/// The same scenario can be solved with different numerical methods.
/// This is the "WHAT to solve" (not "HOW to solve").
///
/// # Examples
///
/// ```rust
/// use nalgebra::DVector;
/// use pdenclose_rs::models::CubicFlux;
/// use pdenclose_rs::solver::Scenario;
///
/// let scenario = Scenario::new(
///     Box::new(CubicFlux),
///     DVector::from_vec(vec![1.0_f64, 2.0, 3.0, 4.0]),
/// );
/// assert_eq!(scenario.size(), 4);
/// assert_eq!(scenario.get_flux_name(), "cubic");
/// assert!(scenario.validate(4).is_ok());
/// assert!(scenario.validate(5).is_err());
/// ```
pub struct Scenario<T: Numeric> {
    /// Conservation law
    pub flux: Box<dyn FluxFunction<T>>,

    /// Row 0 of the mesh
    pub initial: DVector<T>,
}

impl<T: Numeric> Scenario<T> {
    /// Create a scenario
    pub fn new(flux: Box<dyn FluxFunction<T>>, initial: DVector<T>) -> Self {
        Self { flux, initial }
    }

    /// Create a scenario from a plain vector of initial values
    pub fn from_vec(flux: Box<dyn FluxFunction<T>>, initial: Vec<T>) -> Self {
        Self::new(flux, DVector::from_vec(initial))
    }

    /// Check the initial row against the requested discretisation size
    pub fn validate(&self, discretization_size: usize) -> Result<(), SolverError> {
        if self.initial.len() != discretization_size {
            return Err(SolverError::InitialLength {
                expected: discretization_size,
                found: self.initial.len(),
            });
        }
        Ok(())
    }

    /// Get flux name
    pub fn get_flux_name(&self) -> &str {
        self.flux.name()
    }

    /// Number of cells in the initial row
    pub fn size(&self) -> usize {
        self.initial.len()
    }

    /// Initial row as a slice
    pub fn initial_values(&self) -> &[T] {
        self.initial.as_slice()
    }
}

impl<T: Numeric> std::fmt::Debug for Scenario<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scenario")
            .field("flux", &self.get_flux_name())
            .field("domain", &T::domain_name())
            .field("size", &self.size())
            .finish()
    }
}

// ================================================================================================
// Tests
// ================================================================================================
