//! Dense rectangular mesh over any numeric domain

use std::fmt::Display;

use ndarray::{Array2, ArrayView1, Axis};
use serde::de::Error as _;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::domain::Numeric;

/// Errors raised by mesh access and (de)serialisation
#[derive(Debug, Error)]
pub enum MeshError {
    #[error("cell (t={timestep}, x={point}) outside mesh of {num_timesteps} timesteps x {discretization_size} points")]
    OutOfBounds {
        timestep: usize,
        point: usize,
        num_timesteps: usize,
        discretization_size: usize,
    },

    #[error("row of {found} values does not fit a mesh of {expected} points")]
    RowLength { expected: usize, found: usize },

    #[error("system holds {found} values, expected {expected} ({num_timesteps} x {discretization_size})")]
    Shape {
        expected: usize,
        found: usize,
        num_timesteps: usize,
        discretization_size: usize,
    },

    #[error("invalid mesh JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Dense `num_timesteps × discretization_size` buffer of domain values
///
/// Cells are owned values, so copying a mesh or a row deep-copies every
/// affine form it holds.
///
/// # Example
///
/// ```rust
/// use pdenclose_rs::mesh::RectangularMesh;
///
/// let mut mesh = RectangularMesh::<f64>::new(4, 3);
/// mesh.copy_initial_conditions(&[1.0, 2.0, 3.0, 4.0])?;
/// mesh.set(1, 0, 0.5)?;
///
/// assert_eq!(*mesh.get(0, 3)?, 4.0);
/// assert_eq!(*mesh.get(1, 0)?, 0.5);
/// assert!(mesh.get(3, 0).is_err());
/// # Ok::<(), pdenclose_rs::mesh::MeshError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct RectangularMesh<T> {
    system: Array2<T>,
}

impl<T: Numeric> RectangularMesh<T> {
    /// Zero-filled mesh
    pub fn new(discretization_size: usize, num_timesteps: usize) -> Self {
        Self {
            system: Array2::from_elem((num_timesteps, discretization_size), T::zero()),
        }
    }
}

impl<T: Clone> RectangularMesh<T> {
    /// Number of spatial cells per row
    pub fn discretization_size(&self) -> usize {
        self.system.ncols()
    }

    /// Number of rows
    pub fn num_timesteps(&self) -> usize {
        self.system.nrows()
    }

    fn check(&self, timestep: usize, point: usize) -> Result<(), MeshError> {
        if timestep < self.num_timesteps() && point < self.discretization_size() {
            Ok(())
        } else {
            Err(MeshError::OutOfBounds {
                timestep,
                point,
                num_timesteps: self.num_timesteps(),
                discretization_size: self.discretization_size(),
            })
        }
    }

    /// Bounds-checked read
    pub fn get(&self, timestep: usize, point: usize) -> Result<&T, MeshError> {
        self.check(timestep, point)?;
        Ok(&self.system[[timestep, point]])
    }

    /// Bounds-checked write
    pub fn set(&mut self, timestep: usize, point: usize, value: T) -> Result<(), MeshError> {
        self.check(timestep, point)?;
        self.system[[timestep, point]] = value;
        Ok(())
    }

    /// Seed row 0 with a copy of `initial`
    pub fn copy_initial_conditions(&mut self, initial: &[T]) -> Result<(), MeshError> {
        self.check(0, 0)?;
        self.set_row(0, initial.to_vec())
    }

    /// Overwrite a whole row
    pub fn set_row(&mut self, timestep: usize, values: Vec<T>) -> Result<(), MeshError> {
        self.check(timestep, 0)?;
        if values.len() != self.discretization_size() {
            return Err(MeshError::RowLength {
                expected: self.discretization_size(),
                found: values.len(),
            });
        }
        for (cell, value) in self.system.row_mut(timestep).iter_mut().zip(values) {
            *cell = value;
        }
        Ok(())
    }

    /// View of row `timestep`
    pub fn row(&self, timestep: usize) -> Result<ArrayView1<'_, T>, MeshError> {
        self.check(timestep, 0)?;
        Ok(self.system.row(timestep))
    }

    /// Final row, `None` for a mesh without rows
    pub fn last_row(&self) -> Option<ArrayView1<'_, T>> {
        self.num_timesteps()
            .checked_sub(1)
            .map(|t| self.system.row(t))
    }

    /// Iterate rows in time order
    pub fn rows(&self) -> impl Iterator<Item = ArrayView1<'_, T>> + '_ {
        self.system.axis_iter(Axis(0))
    }

    /// Underlying `ndarray` storage
    pub fn as_array(&self) -> &Array2<T> {
        &self.system
    }

    /// Rebuild a mesh from its flat row-major wire representation.
    pub fn from_system(
        discretization_size: usize,
        num_timesteps: usize,
        system: Vec<T>,
    ) -> Result<Self, MeshError> {
        // a shape whose product overflows can never match a real buffer
        let product = discretization_size.checked_mul(num_timesteps);
        if product != Some(system.len()) {
            return Err(MeshError::Shape {
                expected: product.unwrap_or(usize::MAX),
                found: system.len(),
                num_timesteps,
                discretization_size,
            });
        }
        let expected = system.len();
        let system = Array2::from_shape_vec((num_timesteps, discretization_size), system).map_err(|_| {
            MeshError::Shape {
                expected,
                found: expected,
                num_timesteps,
                discretization_size,
            }
        })?;
        Ok(Self { system })
    }
}

impl<T: Clone + Display> RectangularMesh<T> {
    /// One line per timestep, `T{t}: v v v`
    pub fn render_system(&self) -> String {
        let mut out = String::new();
        for (t, row) in self.rows().enumerate() {
            let cells: Vec<String> = row.iter().map(|v| v.to_string()).collect();
            out.push_str(&format!("T{}: {}\n", t, cells.join(" ")));
        }
        out
    }

    /// Print [`render_system`](Self::render_system) to stdout
    pub fn print_system(&self) {
        print!("{}", self.render_system());
    }
}

impl<T: Clone + Serialize> RectangularMesh<T> {
    /// Serialise to the `{discretization_size, num_timesteps, system}` wire format.
    pub fn to_json(&self) -> Result<String, MeshError> {
        Ok(serde_json::to_string(self)?)
    }
}

impl<T: Clone + for<'de> Deserialize<'de>> RectangularMesh<T> {
    /// Parse the wire format; rejects a `system` whose length does not match.
    pub fn from_json(json: &str) -> Result<Self, MeshError> {
        Ok(serde_json::from_str(json)?)
    }
}

// =================================================================================================
// Serde
// =================================================================================================

struct RowMajor<'a, T>(&'a Array2<T>);

impl<T: Serialize> Serialize for RowMajor<'_, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter())
    }
}

impl<T: Clone + Serialize> Serialize for RectangularMesh<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("RectangularMesh", 3)?;
        state.serialize_field("discretization_size", &self.discretization_size())?;
        state.serialize_field("num_timesteps", &self.num_timesteps())?;
        state.serialize_field("system", &RowMajor(&self.system))?;
        state.end()
    }
}

#[derive(Deserialize)]
struct MeshRecord<T> {
    discretization_size: usize,
    num_timesteps: usize,
    system: Vec<T>,
}

impl<'de, T: Clone + Deserialize<'de>> Deserialize<'de> for RectangularMesh<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let record = MeshRecord::<T>::deserialize(deserializer)?;
        RectangularMesh::from_system(record.discretization_size, record.num_timesteps, record.system)
            .map_err(D::Error::custom)
    }
}

// =================================================================================================
// Tests
// =================================================================================================
