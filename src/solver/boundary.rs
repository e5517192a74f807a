//! Periodic boundary convention for 1-D grids
//!
//! # Design Philosophy
//!
//! Every scheme in this crate works on a ring of cells: index `−1` is the
//! last cell and index `size` is the first one. Stencils ask this module for
//! neighbour indices instead of wrapping by hand, so the interior sweep and
//! the two edge cells share one rule.
//!
//! ```text
//!   ... [n-1] | [0] [1] ... [n-2] [n-1] | [0] ...
//!        ▲                                ▲
//!        └── left of 0          right of n-1
//! ```

use std::fmt;

// =================================================================================================
// Periodic Boundary
// =================================================================================================

/// Neighbour lookup on a ring of `size` cells
///
/// # Examples
///
/// ```rust
/// use pdenclose_rs::solver::PeriodicBoundary;
///
/// let ring = PeriodicBoundary::new(4);
/// assert_eq!(ring.neighbours(0), (3, 1));
/// assert_eq!(ring.neighbours(3), (2, 0));
/// assert_eq!(ring.neighbours(1), (0, 2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodicBoundary {
    size: usize,
}

impl PeriodicBoundary {
    /// Ring of `size` cells
    ///
    /// A ring of one cell is its own left and right neighbour.
    pub fn new(size: usize) -> Self {
        Self { size }
    }

    /// Number of cells on the ring
    pub fn size(&self) -> usize {
        self.size
    }

    /// Index of the cell left of `point`
    pub fn left(&self, point: usize) -> usize {
        if point == 0 { self.size - 1 } else { point - 1 }
    }

    /// Index of the cell right of `point`
    pub fn right(&self, point: usize) -> usize {
        if point + 1 == self.size { 0 } else { point + 1 }
    }

    /// `(left, right)` neighbour indices of `point`
    pub fn neighbours(&self, point: usize) -> (usize, usize) {
        (self.left(point), self.right(point))
    }

    /// Whether `point` is one of the two wrapped edge cells
    pub fn is_edge(&self, point: usize) -> bool {
        point == 0 || point + 1 == self.size
    }

    /// Cells whose neighbours do not wrap, `1..size-1`
    pub fn interior(&self) -> std::ops::Range<usize> {
        1..self.size.saturating_sub(1).max(1)
    }

    /// Edge cells, written after the interior sweep
    pub fn edges(&self) -> Vec<usize> {
        match self.size {
            0 => vec![],
            1 => vec![0],
            n => vec![0, n - 1],
        }
    }
}

impl fmt::Display for PeriodicBoundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "periodic({})", self.size)
    }
}

// =================================================================================================
// Tests
// =================================================================================================
