//! End-to-end run of a [`SimulationConfig`]

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::domain::{AffineForm, Interval, MixedForm, Numeric};
use crate::mesh::MeshError;
use crate::simulation::{parse_initial_conditions, ConfigError, DomainKind, SimulationConfig};
use crate::solver::{solver_for, CflViolation, Scenario, SolverError};

/// Anything that can stop a configured run
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Solver(#[from] SolverError),

    #[error(transparent)]
    Mesh(#[from] MeshError),
}

/// Domain-erased result of [`run_simulation`]
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub config: SimulationConfig,

    /// Text rendering, one `T{t}: ...` line per timestep
    pub rendered: String,

    /// Mesh in its JSON wire format
    pub mesh_json: String,

    pub cfl_violations: Vec<CflViolation>,

    pub metadata: HashMap<String, String>,
}

impl RunOutcome {
    pub fn is_stable(&self) -> bool {
        self.cfl_violations.is_empty()
    }
}

/// Run `config` on initial conditions given as a JSON array in the
/// configured domain.
///
/// # Example
///
/// ```rust
/// use pdenclose_rs::simulation::{run_simulation, SimulationConfig};
///
/// let outcome = run_simulation(&SimulationConfig::sanity(), "[1.0, 2.0, 3.0, 4.0]")?;
/// assert!(outcome.is_stable());
/// assert_eq!(outcome.rendered.lines().count(), 4);
/// # Ok::<(), pdenclose_rs::simulation::SimulationError>(())
/// ```
pub fn run_simulation(
    config: &SimulationConfig,
    initial_json: &str,
) -> Result<RunOutcome, SimulationError> {
    config.validate()?;

    match config.domain {
        DomainKind::Real => run_in::<f64>(config, initial_json),
        DomainKind::Interval => run_in::<Interval>(config, initial_json),
        DomainKind::Affine => run_in::<AffineForm>(config, initial_json),
        DomainKind::Mixed => run_in::<MixedForm>(config, initial_json),
    }
}

/// Load a configuration and its initial conditions from disk, then run.
pub fn run_files<P: AsRef<Path>, Q: AsRef<Path>>(
    config_path: P,
    conditions_path: Q,
) -> Result<RunOutcome, SimulationError> {
    let config = SimulationConfig::load(config_path)?;
    let conditions_path = conditions_path.as_ref();
    let initial_json =
        fs::read_to_string(conditions_path).map_err(|err| ConfigError::io(conditions_path, err))?;
    run_simulation(&config, &initial_json)
}

fn run_in<T>(config: &SimulationConfig, initial_json: &str) -> Result<RunOutcome, SimulationError>
where
    T: Numeric + Serialize + DeserializeOwned,
{
    let initial: Vec<T> = parse_initial_conditions(initial_json)?;
    let scenario = Scenario::from_vec(config.flux.dispatch::<T>(), initial);
    let solver = solver_for::<T>(config.solver);

    let result = solver.solve(&scenario, &config.solver_configuration())?;

    log::info!(
        "{} / {} / {}: {} cells x {} timesteps, {} CFL violations",
        solver.name(),
        config.flux,
        T::domain_name(),
        config.discretization_size,
        config.num_timesteps,
        result.cfl_violations.len()
    );

    Ok(RunOutcome {
        config: config.clone(),
        rendered: result.mesh.render_system(),
        mesh_json: result.mesh.to_json()?,
        cfl_violations: result.cfl_violations,
        metadata: result.metadata,
    })
}
