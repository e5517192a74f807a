//! JSON export of the solution mesh
//!
//! The file holds the mesh wire format
//! `{"discretization_size": n, "num_timesteps": m, "system": [...]}` and can be
//! read back with [`RectangularMesh::from_json`].

use std::path::Path;

use serde::Serialize;

use crate::domain::Numeric;
use crate::mesh::{MeshError, RectangularMesh};
use crate::output::export::{sample_rows, write_file, ExportError, Exporter};
use crate::solver::SimulationResult;

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonExporter {
    /// Indented output instead of a single line
    pub pretty: bool,
}

impl JsonExporter {
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl Exporter for JsonExporter {
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
        let mesh = &result.mesh;
        if mesh.discretization_size() == 0 || mesh.num_timesteps() == 0 {
            return Err(ExportError::Empty);
        }

        let rows = sample_rows(mesh.num_timesteps(), n_rows)?;
        let json = if rows.len() == mesh.num_timesteps() {
            self.render(mesh)?
        } else {
            let mut system = Vec::with_capacity(rows.len() * mesh.discretization_size());
            for t in &rows {
                system.extend(mesh.row(*t)?.iter().cloned());
            }
            let sampled = RectangularMesh::from_system(mesh.discretization_size(), rows.len(), system)?;
            self.render(&sampled)?
        };

        write_file(path.as_ref(), &json)
    }
}

impl JsonExporter {
    fn render<T: Clone + Serialize>(&self, mesh: &RectangularMesh<T>) -> Result<String, MeshError> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(mesh)?)
        } else {
            mesh.to_json()
        }
    }
}
