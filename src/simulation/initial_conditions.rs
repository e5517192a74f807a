//! Initial-condition files and generators
//!
//! Initial conditions are stored as a JSON array of domain values, using each
//! domain's own serde form (`1.5`, `[1.45, 1.55]`, `{"center": .., "terms": ..}`).
//!
//! Set-valued conditions are derived from a real profile by widening every
//! value `v` into `[v − |ε|, v + |ε|]`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::{AffineForm, Interval, MixedForm};
use crate::models::FluxKind;
use crate::simulation::{ConfigError, DomainKind, SimulationConfig};

/// Parse a JSON array of domain values.
pub fn parse_initial_conditions<T: DeserializeOwned>(json: &str) -> Result<Vec<T>, ConfigError> {
    Ok(serde_json::from_str(json)?)
}

pub fn read_initial_conditions<T: DeserializeOwned, P: AsRef<Path>>(
    path: P,
) -> Result<Vec<T>, ConfigError> {
    let path = path.as_ref();
    let json = fs::read_to_string(path).map_err(|err| ConfigError::io(path, err))?;
    parse_initial_conditions(&json)
}

pub fn write_initial_conditions<T: Serialize, P: AsRef<Path>>(
    path: P,
    values: &[T],
) -> Result<(), ConfigError> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(values)?;
    fs::write(path, json).map_err(|err| ConfigError::io(path, err))
}

fn widen(value: f64, epsilon: f64) -> Interval {
    let epsilon = epsilon.abs();
    Interval::new(value - epsilon, value + epsilon)
}

pub fn to_interval_conditions(real: &[f64], epsilon: f64) -> Vec<Interval> {
    real.iter().map(|v| widen(*v, epsilon)).collect()
}

/// Each cell gets its own fresh noise symbol.
pub fn to_affine_conditions(real: &[f64], epsilon: f64) -> Vec<AffineForm> {
    real.iter()
        .map(|v| AffineForm::from_interval(&widen(*v, epsilon)))
        .collect()
}

pub fn to_mixed_conditions(real: &[f64], epsilon: f64) -> Vec<MixedForm> {
    real.iter()
        .map(|v| MixedForm::from_interval(&widen(*v, epsilon)))
        .collect()
}

/// Parabolic bump on `x = 2i`, zero past `x = 15`
///
/// `v(x) = −0.015·x·(x − 15)` for `x < 15.01`.
pub fn base_conditions(size: usize) -> Vec<f64> {
    (0..size)
        .map(|i| {
            let x = 2.0 * i as f64;
            if x < 15.01 { -0.015 * x * (x - 15.0) } else { 0.0 }
        })
        .collect()
}

/// Initial row paired with [`SimulationConfig::sanity`]
pub fn sanity_conditions() -> Vec<f64> {
    vec![1.0, 2.0, 3.0, 4.0]
}

/// `{flux}_{domain}_conds.json`
pub fn condition_file_name(flux: FluxKind, domain: DomainKind) -> String {
    format!("{}_{}_conds.json", flux, domain)
}

/// Write [`base_conditions`] in all four domains, widened by the flux's
/// default tolerance.
pub fn write_condition_set<P: AsRef<Path>>(
    dir: P,
    flux: FluxKind,
    size: usize,
) -> Result<Vec<PathBuf>, ConfigError> {
    let dir = dir.as_ref();
    let base = base_conditions(size);
    let tolerance = flux.default_tolerance();

    let mut written = Vec::with_capacity(DomainKind::ALL.len());
    for domain in DomainKind::ALL {
        let path = dir.join(condition_file_name(flux, domain));
        match domain {
            DomainKind::Real => write_initial_conditions(&path, &base)?,
            DomainKind::Interval => {
                write_initial_conditions(&path, &to_interval_conditions(&base, tolerance))?
            }
            DomainKind::Affine => {
                write_initial_conditions(&path, &to_affine_conditions(&base, tolerance))?
            }
            DomainKind::Mixed => {
                write_initial_conditions(&path, &to_mixed_conditions(&base, tolerance))?
            }
        }
        written.push(path);
    }

    log::debug!("wrote {} condition files for {} to {:?}", written.len(), flux, dir);
    Ok(written)
}

/// Write `sanity_config.json` and `sanity_conditions.json` into `dir`.
pub fn write_sanity_files<P: AsRef<Path>>(dir: P) -> Result<(PathBuf, PathBuf), ConfigError> {
    let dir = dir.as_ref();
    let config_path = dir.join("sanity_config.json");
    let conditions_path = dir.join("sanity_conditions.json");

    SimulationConfig::sanity().save(&config_path)?;
    write_initial_conditions(&conditions_path, &sanity_conditions())?;

    Ok((config_path, conditions_path))
}
