//! CSV export functionality for solution meshes
//!
//! This module exports a [`SimulationResult`] to CSV (Comma-Separated Values),
//! readable by spreadsheets, pandas and most data analysis tools.
//!
//! # Layout
//!
//! One line per timestep, the timestep index first, then one column per cell.
//! Set-valued domains (interval, affine, mixed) are concretised with
//! [`Numeric::enclosure`] and give a `lo`/`hi` column pair per cell.
//!
//! **Real domain**:
//! ```text
//! t,x0,x1,x2,x3
//! 0,1.000000,2.000000,3.000000,4.000000
//! 1,3.560000,1.740000,2.440000,2.260000
//! ```
//!
//! **Interval domain**:
//! ```text
//! t,x0_lo,x0_hi,x1_lo,x1_hi
//! 0,0.950000,1.050000,1.950000,2.050000
//! ```
//!
//! # With Metadata
//!
//! ```rust
//! use pdenclose_rs::models::BurgersFlux;
//! use pdenclose_rs::output::export::{CsvConfig, CsvExporter, CsvMetadata, Exporter};
//! use pdenclose_rs::solver::{LaxFriedrichsSolver, Scenario, Solver, SolverConfiguration};
//!
//! let scenario = Scenario::from_vec(Box::new(BurgersFlux), vec![1.0, 2.0, 3.0, 4.0]);
//! let result = LaxFriedrichsSolver::new().solve(&scenario, &SolverConfiguration::lax_friedrichs(4, 4, 0.01, 1.0))?;
//!
//! let config = CsvConfig::default().with_metadata(CsvMetadata::from_result(&result));
//! let dir = tempfile::tempdir()?;
//! CsvExporter::new(config).export(&result, None, dir.path().join("burgers.csv"))?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! **Output**:
//! ```text
//! # Conservation Law Simulation Data
//! # Generated: 2026-02-11T15:30:00+00:00
//! # Solver: Lax-Friedrichs
//! # Flux: burgers
//! # Domain: real
//! # Time Steps: 4
//! # dt: 0.01
//! # dx: 1
//! # CFL Violations: 0
//! #
//! t,x0,x1,x2,x3
//! ...
//! ```

use std::fmt::Write as _;
use std::path::Path;

use serde::Serialize;

use crate::domain::Numeric;
use crate::output::export::{sample_rows, write_file, ExportError, Exporter};
use crate::solver::SimulationResult;

// =============================================================================
// Configuration Structures
// =============================================================================

/// Configuration for CSV export
///
/// # Example
///
/// ```rust
/// use pdenclose_rs::output::export::CsvConfig;
///
/// let config = CsvConfig {
///     delimiter: ';',
///     precision: 10,
///     ..Default::default()
/// };
/// assert!(!config.include_metadata);
/// ```
#[derive(Clone, Debug)]
pub struct CsvConfig {
    /// Column delimiter (default: ',')
    pub delimiter: char,

    /// Decimal separator (default: '.')
    pub decimal_separator: char,

    /// Number of decimal places for floating-point values (default: 6)
    pub precision: usize,

    /// Include metadata header comments (default: false)
    pub include_metadata: bool,

    /// Metadata to include in header
    pub metadata: Option<CsvMetadata>,

    /// Header of the timestep column (default: "t")
    pub time_header: String,

    /// Prefix of the cell columns (default: "x")
    pub cell_prefix: String,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            decimal_separator: '.',
            precision: 6,
            include_metadata: false,
            metadata: None,
            time_header: "t".to_string(),
            cell_prefix: "x".to_string(),
        }
    }
}

impl CsvConfig {
    /// European CSV format (semicolon, comma for decimal)
    pub fn european() -> Self {
        Self {
            delimiter: ';',
            decimal_separator: ',',
            ..Default::default()
        }
    }

    /// 12 decimal places
    pub fn high_precision() -> Self {
        Self {
            precision: 12,
            ..Default::default()
        }
    }

    /// Builder pattern: set delimiter
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Builder pattern: set precision
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Builder pattern: enable metadata
    pub fn with_metadata(mut self, metadata: CsvMetadata) -> Self {
        self.include_metadata = true;
        self.metadata = Some(metadata);
        self
    }
}

/// Metadata for CSV header comments
///
/// Only fields that are set end up in the header.
#[derive(Clone, Debug, Default)]
pub struct CsvMetadata {
    pub solver_name: Option<String>,
    pub flux_name: Option<String>,
    pub domain_name: Option<String>,
    pub time_steps: Option<usize>,
    pub delta_t: Option<f64>,

    /// Uniform Δx, or a spacing description for the volume solver
    pub spacing: Option<String>,

    pub cfl_violations: Option<usize>,

    /// Additional custom parameters
    pub custom: Vec<(String, String)>,
}

impl CsvMetadata {
    /// Collect what the solver recorded about its run.
    pub fn from_result<T: Numeric>(result: &SimulationResult<T>) -> Self {
        let get = |key: &str| result.metadata.get(key).cloned();

        Self {
            solver_name: get("solver"),
            flux_name: get("flux"),
            domain_name: Some(T::domain_name().to_string()),
            time_steps: Some(result.mesh.num_timesteps()),
            delta_t: get("dt").and_then(|dt| dt.parse().ok()),
            spacing: get("dx").or_else(|| get("spacing")),
            cfl_violations: Some(result.cfl_violations.len()),
            custom: Vec::new(),
        }
    }

    /// Add custom parameter
    pub fn add_custom(&mut self, key: String, value: String) {
        self.custom.push((key, value));
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn write_metadata_header(out: &mut String, metadata: &CsvMetadata) -> std::fmt::Result {
    writeln!(out, "# Conservation Law Simulation Data")?;

    let now = chrono::Utc::now();
    writeln!(out, "# Generated: {}", now.to_rfc3339())?;

    if let Some(solver) = &metadata.solver_name {
        writeln!(out, "# Solver: {}", solver)?;
    }
    if let Some(flux) = &metadata.flux_name {
        writeln!(out, "# Flux: {}", flux)?;
    }
    if let Some(domain) = &metadata.domain_name {
        writeln!(out, "# Domain: {}", domain)?;
    }

    if let Some(time_steps) = metadata.time_steps {
        writeln!(out, "# Time Steps: {}", time_steps)?;
    }
    if let Some(dt) = metadata.delta_t {
        writeln!(out, "# dt: {}", dt)?;
    }
    if let Some(spacing) = &metadata.spacing {
        writeln!(out, "# dx: {}", spacing)?;
    }
    if let Some(count) = metadata.cfl_violations {
        writeln!(out, "# CFL Violations: {}", count)?;
    }

    for (key, value) in &metadata.custom {
        writeln!(out, "# {}: {}", key, value)?;
    }

    writeln!(out, "#")
}

/// Format number with configured precision and decimal separator
fn format_number(value: f64, config: &CsvConfig) -> String {
    let formatted = format!("{:.prec$}", value, prec = config.precision);

    if config.decimal_separator != '.' {
        formatted.replace('.', &config.decimal_separator.to_string())
    } else {
        formatted
    }
}

// =============================================================================
// Exporter
// =============================================================================

/// CSV exporter, one line per exported timestep
#[derive(Clone, Debug, Default)]
pub struct CsvExporter {
    pub config: CsvConfig,
}

impl CsvExporter {
    pub fn new(config: CsvConfig) -> Self {
        Self { config }
    }

    /// Render the CSV text without touching the filesystem.
    pub fn render<T: Numeric>(
        &self,
        result: &SimulationResult<T>,
        n_rows: Option<usize>,
    ) -> Result<String, ExportError> {
        let mesh = &result.mesh;
        let config = &self.config;

        // ============================= Validation =============================

        if mesh.discretization_size() == 0 || mesh.num_timesteps() == 0 {
            return Err(ExportError::Empty);
        }
        let rows = sample_rows(mesh.num_timesteps(), n_rows)?;

        // ============================= Write Metadata =========================

        let mut out = String::new();
        if config.include_metadata {
            if let Some(metadata) = &config.metadata {
                write_metadata_header(&mut out, metadata)?;
            }
        }

        // ============================= Write Header ===========================

        let mut header = vec![config.time_header.clone()];
        for x in 0..mesh.discretization_size() {
            if T::SET_VALUED {
                header.push(format!("{}{}_lo", config.cell_prefix, x));
                header.push(format!("{}{}_hi", config.cell_prefix, x));
            } else {
                header.push(format!("{}{}", config.cell_prefix, x));
            }
        }
        out.push_str(&header.join(&config.delimiter.to_string()));
        out.push('\n');

        // ============================= Write Data =============================

        for t in rows {
            out.push_str(&t.to_string());
            for value in mesh.row(t)?.iter() {
                let (lo, hi) = value.enclosure();
                out.push(config.delimiter);
                out.push_str(&format_number(lo, config));
                if T::SET_VALUED {
                    out.push(config.delimiter);
                    out.push_str(&format_number(hi, config));
                }
            }
            out.push('\n');
        }

        Ok(out)
    }
}

impl Exporter for CsvExporter {
    type Error = ExportError;

    fn export<T, P>(
        &self,
        result: &SimulationResult<T>,
        n_rows: Option<usize>,
        path: P,
    ) -> Result<(), ExportError>
    where
        T: Numeric + Serialize,
        P: AsRef<Path>,
    {
        let csv = self.render(result, n_rows)?;
        write_file(path.as_ref(), &csv)
    }
}

// =================================================================================================
// Tests
// =================================================================================================
