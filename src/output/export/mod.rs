//! Export module for simulation results.
//!
//! # Architecture
//!
//! This module defines the [`Exporter`] trait that abstracts the export format.
//! Each format is an independent implementation in its own sub-module, so a
//! new format means a new file and no change to the existing ones.
//!
//! # Available formats
//!
//! | Format  | Module     | Content                                          |
//! |---------|------------|--------------------------------------------------|
//! | JSON    | [`json`]   | mesh wire format, readable by `RectangularMesh::from_json` |
//! | CSV     | [`csv`]    | one row per timestep, one column (or lo/hi pair) per cell |
//!
//! # Usage example
//!
//! ```rust
//! use pdenclose_rs::domain::Interval;
//! use pdenclose_rs::models::BurgersFlux;
//! use pdenclose_rs::output::export::{CsvExporter, Exporter, JsonExporter};
//! use pdenclose_rs::solver::{LaxFriedrichsSolver, Scenario, Solver, SolverConfiguration};
//!
//! let initial: Vec<Interval> = (0..8).map(|i| Interval::new(i as f64 * 0.1, i as f64 * 0.1 + 0.05)).collect();
//! let scenario = Scenario::from_vec(Box::new(BurgersFlux), initial);
//! let result = LaxFriedrichsSolver::new().solve(&scenario, &SolverConfiguration::lax_friedrichs(8, 50, 0.1, 1.0))?;
//!
//! let dir = tempfile::tempdir()?;
//!
//! // Full export (all timesteps)
//! JsonExporter::default().export(&result, None, dir.path().join("burgers.json"))?;
//!
//! // Downsampled export to 10 timesteps
//! CsvExporter::default().export(&result, Some(10), dir.path().join("burgers.csv"))?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod csv;
pub mod json;

pub use csv::{CsvConfig, CsvExporter, CsvMetadata};
pub use json::JsonExporter;

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::domain::Numeric;
use crate::mesh::MeshError;
use crate::solver::SimulationResult;

/// Errors shared by the built-in export formats
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("nothing to export: the mesh has no cells")]
    Empty,

    #[error("cannot downsample to {requested} timesteps, at least 2 are needed")]
    SampleCount { requested: usize },

    #[error("cannot write {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Mesh(#[from] MeshError),

    #[error("formatting failed")]
    Format(#[from] std::fmt::Error),
}

/// Abstraction trait for all export formats.
///
/// # Associated type `Error`
///
/// Each format manages its own errors via the associated type, so callers
/// can match on them without going through `Box<dyn Error>`.
///
/// # Parameter `n_rows`
///
/// - `None`: exports every timestep
/// - `Some(n)`: keeps `n` uniformly spaced timesteps, always including the
///   first and the last one
pub trait Exporter {
    /// Error type specific to this export format.
    type Error: std::error::Error;

    /// Write `result` to `path`.
    fn export<T, P>(
        &self,
        result: &SimulationResult<T>,
        n_rows: Option<usize>,
        path: P,
    ) -> Result<(), Self::Error>
    where
        T: Numeric + Serialize,
        P: AsRef<Path>;
}

/// Timesteps kept when downsampling `total` rows to `n_rows`
///
/// ```rust
/// use pdenclose_rs::output::export::sample_rows;
///
/// assert_eq!(sample_rows(5, None)?, vec![0, 1, 2, 3, 4]);
/// assert_eq!(sample_rows(101, Some(3))?, vec![0, 50, 100]);
/// # Ok::<(), pdenclose_rs::output::export::ExportError>(())
/// ```
pub fn sample_rows(total: usize, n_rows: Option<usize>) -> Result<Vec<usize>, ExportError> {
    match n_rows {
        None => Ok((0..total).collect()),
        Some(requested) if requested < 2 => Err(ExportError::SampleCount { requested }),
        Some(requested) if requested >= total => Ok((0..total).collect()),
        Some(requested) => {
            let last = total - 1;
            let mut rows: Vec<usize> = (0..requested)
                .map(|k| (k * last + (requested - 1) / 2) / (requested - 1))
                .collect();
            rows.dedup();
            Ok(rows)
        }
    }
}

pub(crate) fn write_file(path: &Path, contents: &str) -> Result<(), ExportError> {
    std::fs::write(path, contents).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}
