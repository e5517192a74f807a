//! Output module for simulation results
//!
//! # Architecture
//!
//! ```text
//! output/
//! ├── mod.rs              ← This file
//! └── export/             ← Data export
//!     ├── mod.rs          ← Exporter trait, ExportError, row sampling
//!     ├── json.rs         ← mesh wire format
//!     └── csv.rs          ← spreadsheet-friendly table
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use pdenclose_rs::models::LwrFlux;
//! use pdenclose_rs::output::{CsvExporter, Exporter};
//! use pdenclose_rs::solver::{LaxFriedrichsSolver, Scenario, Solver, SolverConfiguration};
//!
//! let scenario = Scenario::from_vec(Box::new(LwrFlux), vec![0.2, 0.4, 0.6, 0.4]);
//! let result = LaxFriedrichsSolver::new().solve(&scenario, &SolverConfiguration::lax_friedrichs(4, 10, 0.1, 1.0))?;
//!
//! let dir = tempfile::tempdir()?;
//! CsvExporter::default().export(&result, None, dir.path().join("lwr.csv"))?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! The text rendering of a mesh (`T{t}: v v v`) lives on
//! [`RectangularMesh::render_system`](crate::mesh::RectangularMesh::render_system).

pub mod export;

pub use export::{CsvConfig, CsvExporter, CsvMetadata, ExportError, Exporter, JsonExporter};
