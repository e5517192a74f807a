//! Common utilities for integration tests

#![allow(dead_code)]

pub mod mock_fluxes;
pub mod test_helpers;

// Re-export commonly used items
pub use mock_fluxes::{LinearAdvection, ZeroFlux};
pub use test_helpers::{
    assert_encloses,
    assert_rows_close,
    max_error,
    relative_error,
    row_mass,
    sine_profile,
};
