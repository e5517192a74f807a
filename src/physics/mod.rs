//! Conservation-law physics
//!
//! This module provides the trait every flux function implements. A flux
//! function encapsulates the physics of a scalar conservation law
//!
//! ```text
//! ∂u/∂t + ∂f(u)/∂x = 0
//! ```
//!
//! # Architecture
//!
//! Physics is **separate from numerical solvers**:
//! - The flux function provides the **equation** (`f` and `f'`)
//! - The solver provides the **method** to advance it in time
//!
//! This separation allows:
//! - Same flux with different solvers (Lax-Friedrichs, Leapfrog, Rusanov)
//! - Same solver with different fluxes (Burgers, LWR, ...)
//! - Same code over every numeric domain
//!
//! # Available Flux Functions
//!
//! See [`crate::models`] for the concrete laws: cubic, Burgers, LWR traffic
//! flow and Buckley-Leverett two-phase flow.

pub mod traits;

pub use traits::FluxFunction;
