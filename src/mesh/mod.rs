//! Space-time meshes
//!
//! A mesh is the dense `num_timesteps × discretization_size` buffer a solver
//! fills row by row. Row `t` holds the state at time `t·Δt`, column `x` the
//! cell at position `x`.
//!
//! ```text
//!            x = 0   x = 1   ...   x = n-1
//!   t = 0  [ u₀₀     u₀₁     ...   u₀,n-1 ]   ← initial conditions
//!   t = 1  [ u₁₀     u₁₁     ...   u₁,n-1 ]
//!    ...
//! ```
//!
//! Storage is row-major, which is also the order of the `system` array of the
//! JSON wire format.

pub mod rectangular;

pub use rectangular::{MeshError, RectangularMesh};
