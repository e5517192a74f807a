//! Configured simulation runs
//!
//! This layer sits on top of the generic solver engine and resolves the
//! names found in configuration files (`"domain": "affine"`, `"flux": "lwr"`,
//! `"solver": "leapfrog"`) into concrete types.
//!
//! # Architecture
//!
//! ```text
//! simulation/
//! ├── config.rs              ← SimulationConfig record, DomainKind, experiment grid
//! ├── initial_conditions.rs  ← JSON condition files and real-to-set converters
//! └── runner.rs              ← run_simulation: dispatch on the domain, solve, render
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use pdenclose_rs::simulation::{run_simulation, write_condition_set, SimulationConfig};
//! use pdenclose_rs::models::FluxKind;
//!
//! let dir = tempfile::tempdir()?;
//! write_condition_set(dir.path(), FluxKind::Burgers, 20)?;
//!
//! let config = SimulationConfig::from_json(
//!     r#"{"domain": "mixed", "flux": "burgers", "solver": "lax_friedrichs",
//!         "discretization_size": 20, "timesteps": 25, "delta_x": 2.0, "delta_t": 1.0}"#,
//! )?;
//! let conditions = std::fs::read_to_string(dir.path().join("burgers_mixed_conds.json"))?;
//!
//! let outcome = run_simulation(&config, &conditions)?;
//! println!("{}", outcome.rendered);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod initial_conditions;
pub mod runner;

pub use config::{
    experiment_timestep, write_experiment_configs, ConfigError, DomainKind, SimulationConfig,
};
pub use initial_conditions::{
    base_conditions, condition_file_name, parse_initial_conditions, read_initial_conditions,
    sanity_conditions, to_affine_conditions, to_interval_conditions, to_mixed_conditions,
    write_condition_set, write_initial_conditions, write_sanity_files,
};
pub use runner::{run_files, run_simulation, RunOutcome, SimulationError};
