//! Simulation configuration record
//!
//! A [`SimulationConfig`] names a numeric domain, a flux law and a solver,
//! plus the grid sizes and steps. It is persisted as a flat JSON object:
//!
//! ```text
//! {
//!   "domain": "affine",
//!   "flux": "burgers",
//!   "solver": "leapfrog",
//!   "discretization_size": 20,
//!   "num_timesteps": 25,
//!   "delta_x": 2.0,
//!   "delta_t": 1.0
//! }
//! ```
//!
//! `timesteps` is accepted in place of `num_timesteps` when reading. An
//! optional `cell_widths` array hands per-cell widths to the volume solver.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::FluxKind;
use crate::solver::{SolverConfiguration, SolverType, Spacing};

// =================================================================================================
// Errors
// =================================================================================================

/// Errors raised while reading, writing or validating configuration records
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown {field} '{name}'")]
    UnknownName { field: &'static str, name: String },

    #[error("invalid configuration: {reason}")]
    Invalid { reason: String },

    #[error("cannot access {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConfigError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        ConfigError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

// =================================================================================================
// Domain selection
// =================================================================================================

/// Numeric domain the simulation runs in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainKind {
    #[default]
    Real,
    Interval,
    Affine,
    Mixed,
}

impl DomainKind {
    pub const ALL: [DomainKind; 4] = [
        DomainKind::Real,
        DomainKind::Interval,
        DomainKind::Affine,
        DomainKind::Mixed,
    ];

    /// Configuration name, identical to [`Numeric::domain_name`](crate::domain::Numeric::domain_name)
    pub fn name(&self) -> &'static str {
        match self {
            DomainKind::Real => "real",
            DomainKind::Interval => "interval",
            DomainKind::Affine => "affine",
            DomainKind::Mixed => "mixed",
        }
    }
}

impl fmt::Display for DomainKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DomainKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DomainKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| ConfigError::UnknownName {
                field: "domain",
                name: s.to_string(),
            })
    }
}

// =================================================================================================
// Configuration record
// =================================================================================================

/// Everything needed to run one simulation, minus the initial conditions
///
/// # Example
///
/// ```rust
/// use pdenclose_rs::simulation::{DomainKind, SimulationConfig};
///
/// let config = SimulationConfig::from_json(
///     r#"{"domain": "interval", "flux": "lwr", "solver": "lax_friedrichs",
///         "discretization_size": 20, "timesteps": 25, "delta_x": 2.0, "delta_t": 25.0}"#,
/// )?;
/// assert_eq!(config.domain, DomainKind::Interval);
/// assert_eq!(config.num_timesteps, 25);
///
/// assert!(SimulationConfig::from_json(r#"{"domain": "complex"}"#).is_err());
/// # Ok::<(), pdenclose_rs::simulation::ConfigError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ConfigRecord", into = "ConfigRecord")]
pub struct SimulationConfig {
    pub domain: DomainKind,
    pub flux: FluxKind,
    pub solver: SolverType,
    pub discretization_size: usize,
    pub num_timesteps: usize,
    pub delta_x: f64,
    pub delta_t: f64,
    pub cell_widths: Option<Vec<f64>>,
}

/// Wire shape: names stay strings until they are resolved, so an unknown
/// name surfaces as [`ConfigError::UnknownName`] rather than a serde message.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigRecord {
    domain: String,
    flux: String,
    solver: String,
    discretization_size: usize,
    #[serde(alias = "timesteps")]
    num_timesteps: usize,
    delta_x: f64,
    delta_t: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cell_widths: Option<Vec<f64>>,
}

impl TryFrom<ConfigRecord> for SimulationConfig {
    type Error = ConfigError;

    fn try_from(record: ConfigRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            domain: record.domain.parse()?,
            flux: record.flux.parse()?,
            solver: record.solver.parse()?,
            discretization_size: record.discretization_size,
            num_timesteps: record.num_timesteps,
            delta_x: record.delta_x,
            delta_t: record.delta_t,
            cell_widths: record.cell_widths,
        })
    }
}

impl From<SimulationConfig> for ConfigRecord {
    fn from(config: SimulationConfig) -> Self {
        Self {
            domain: config.domain.name().to_string(),
            flux: config.flux.name().to_string(),
            solver: config.solver.name().to_string(),
            discretization_size: config.discretization_size,
            num_timesteps: config.num_timesteps,
            delta_x: config.delta_x,
            delta_t: config.delta_t,
            cell_widths: config.cell_widths,
        }
    }
}

impl SimulationConfig {
    pub fn new(
        domain: DomainKind,
        flux: FluxKind,
        solver: SolverType,
        discretization_size: usize,
        num_timesteps: usize,
        delta_x: f64,
        delta_t: f64,
    ) -> Self {
        Self {
            domain,
            flux,
            solver,
            discretization_size,
            num_timesteps,
            delta_x,
            delta_t,
            cell_widths: None,
        }
    }

    /// Attach per-cell widths for the volume solver.
    pub fn with_cell_widths(mut self, widths: Vec<f64>) -> Self {
        self.cell_widths = Some(widths);
        self
    }

    /// Four-cell Burgers smoke test: real domain, Lax-Friedrichs, Δx 1, Δt 0.01
    ///
    /// Pairs with [`sanity_conditions`](crate::simulation::sanity_conditions).
    pub fn sanity() -> Self {
        Self::new(
            DomainKind::Real,
            FluxKind::Burgers,
            SolverType::LaxFriedrichs,
            4,
            4,
            1.0,
            0.01,
        )
    }

    /// Every domain × flux × difference-solver combination on the
    /// 20-cell, 25-step experiment grid with Δx = 2.
    pub fn experiment_grid() -> Vec<Self> {
        let mut grid = Vec::new();
        for domain in DomainKind::ALL {
            for flux in FluxKind::ALL {
                for solver in [SolverType::LaxFriedrichs, SolverType::Leapfrog] {
                    grid.push(Self::new(
                        domain,
                        flux,
                        solver,
                        20,
                        25,
                        2.0,
                        experiment_timestep(flux),
                    ));
                }
            }
        }
        grid
    }

    /// `{domain}_{flux}_{solver}_config.json`
    pub fn file_name(&self) -> String {
        format!("{}_{}_{}_config.json", self.domain, self.flux, self.solver)
    }

    /// Solver-level view of this record.
    ///
    /// Cell widths, when present, replace the uniform `delta_x`.
    pub fn solver_configuration(&self) -> SolverConfiguration {
        let spacing = match &self.cell_widths {
            Some(widths) => Spacing::cells(widths.clone()),
            None => Spacing::Uniform(self.delta_x),
        };
        SolverConfiguration::new(
            self.solver,
            self.discretization_size,
            self.num_timesteps,
            self.delta_t,
            spacing,
        )
    }

    /// Check grid sizes and steps against what the selected solver accepts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.delta_x.is_finite() || self.delta_x <= 0.0 {
            return Err(ConfigError::Invalid {
                reason: format!("delta_x must be positive and finite, got {}", self.delta_x),
            });
        }
        self.solver_configuration()
            .validate()
            .map_err(|err| ConfigError::Invalid {
                reason: err.to_string(),
            })
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let record: ConfigRecord = serde_json::from_str(json)?;
        Self::try_from(record)
    }

    /// Pretty-printed JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|err| ConfigError::io(path, err))?;
        Self::from_json(&json)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?).map_err(|err| ConfigError::io(path, err))
    }
}

/// Time step used by the experiment grid for each flux law
pub fn experiment_timestep(flux: FluxKind) -> f64 {
    match flux {
        FluxKind::Burgers => 1.0,
        FluxKind::Lwr => 25.0,
        FluxKind::Cubic => 0.01,
        FluxKind::BuckleyLeverett => 0.35,
    }
}

/// Save the whole [`experiment_grid`](SimulationConfig::experiment_grid) into `dir`.
///
/// Returns the written paths in grid order.
pub fn write_experiment_configs<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>, ConfigError> {
    let dir = dir.as_ref();
    let mut written = Vec::new();
    for config in SimulationConfig::experiment_grid() {
        let path = dir.join(config.file_name());
        config.save(&path)?;
        written.push(path);
    }
    log::info!("wrote {} experiment configurations to {:?}", written.len(), dir);
    Ok(written)
}

// =================================================================================================
// Tests
// =================================================================================================
