//! Numeric domains
//!
//! A numeric domain is a value type the solvers can run over. All of them
//! implement the [`Numeric`] contract, so the same Lax-Friedrichs code
//! produces a plain approximation over `f64`, a guaranteed enclosure over
//! [`Interval`], and a correlated enclosure over [`AffineForm`].
//!
//! # Module Organization
//!
//! - **`traits`**: the [`Numeric`] contract and its `f64` (Real) implementation
//! - **`noise`**: [`NoiseSymbol`] and the process-wide symbol allocator
//! - **`interval`**: [`Interval`] arithmetic
//! - **`affine`**: [`AffineForm`] arithmetic (outer-product multiply, mini-range reciprocal)
//! - **`mixed`**: [`MixedForm`], the interval × affine reduced product
//!
//! # Example
//!
//! ```rust
//! use pdenclose_rs::domain::{AffineForm, Interval, Numeric};
//!
//! let x = AffineForm::from_interval(&Interval::new(1.0, 2.0));
//!
//! // correlated terms cancel in the affine domain...
//! let zero = x.clone() - x.clone();
//! assert_eq!(zero.radius(), 0.0);
//!
//! // ...but not in the interval domain
//! let i = Interval::new(1.0, 2.0);
//! assert_eq!(i - i, Interval::new(-1.0, 1.0));
//! ```

pub mod traits;
pub mod noise;
pub mod interval;
pub mod affine;
pub mod mixed;

pub use traits::Numeric;
pub use noise::NoiseSymbol;
pub use interval::Interval;
pub use affine::AffineForm;
pub use mixed::MixedForm;
