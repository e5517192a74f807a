//! Flux functions for 1-D conservation laws
//!
//! All models implement the [`FluxFunction`](crate::physics::FluxFunction)
//! trait, generically over every [`Numeric`] domain. The solver evaluates
//! `flux` inside its stencil and `derivative_flux` for the CFL check and the
//! Rusanov viscosity.
//!
//! # Available Models
//!
//! | Model                    | `f(u)`                    | `f'(u)`            |
//! |--------------------------|---------------------------|--------------------|
//! | [`CubicFlux`]            | `u³`                      | `3u²`              |
//! | [`BurgersFlux`]          | `u²/2`                    | `u`                |
//! | [`LwrFlux`]              | `u(u − 1)`                | `−2u + 1`          |
//! | [`BuckleyLeverettFlux`]  | `u²/(u² + ¼(1 − u)²)`     | see module docs    |
//!
//! # Selection by name
//!
//! [`FluxKind`] is the closed set of laws a configuration file can name. It
//! turns into a boxed flux function for any domain with [`FluxKind::dispatch`].

// =================================================================================================
// Module Declarations
// =================================================================================================

pub mod cubic;
pub mod burgers;
pub mod lwr;
pub mod buckley_leverett;

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use cubic::CubicFlux;
pub use burgers::BurgersFlux;
pub use lwr::LwrFlux;
pub use buckley_leverett::BuckleyLeverettFlux;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::Numeric;
use crate::physics::FluxFunction;
use crate::simulation::ConfigError;

// =================================================================================================
// Flux selection
// =================================================================================================

/// Named flux function, as it appears in a simulation configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FluxKind {
    #[default]
    Cubic,
    Burgers,
    Lwr,
    BuckleyLeverett,
}

impl FluxKind {
    /// Every supported law
    pub const ALL: [FluxKind; 4] = [
        FluxKind::Cubic,
        FluxKind::Burgers,
        FluxKind::Lwr,
        FluxKind::BuckleyLeverett,
    ];

    /// Configuration name
    pub fn name(&self) -> &'static str {
        match self {
            FluxKind::Cubic => "cubic",
            FluxKind::Burgers => "burgers",
            FluxKind::Lwr => "lwr",
            FluxKind::BuckleyLeverett => "buckley_leverett",
        }
    }

    /// Instantiate the flux function for domain `T`
    pub fn dispatch<T: Numeric>(&self) -> Box<dyn FluxFunction<T>> {
        match self {
            FluxKind::Cubic => Box::new(CubicFlux),
            FluxKind::Burgers => Box::new(BurgersFlux),
            FluxKind::Lwr => Box::new(LwrFlux),
            FluxKind::BuckleyLeverett => Box::new(BuckleyLeverettFlux),
        }
    }

    /// Half-width of the uncertainty put on generated initial conditions
    pub fn default_tolerance(&self) -> f64 {
        match self {
            FluxKind::Cubic => 0.1,
            FluxKind::Burgers => 0.05,
            FluxKind::Lwr => 0.07,
            FluxKind::BuckleyLeverett => 0.05,
        }
    }
}

impl fmt::Display for FluxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FluxKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FluxKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| ConfigError::UnknownName {
                field: "flux",
                name: s.to_string(),
            })
    }
}
