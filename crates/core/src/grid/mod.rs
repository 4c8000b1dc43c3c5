//! Grid math layer
//!
//! A [`Grid`] is a dense `rows × cols` array of `f64` backed by `nalgebra`.
//! Rows run along the X axis (index `i`) and columns along the Y axis
//! (index `j`), so `grid[(i, j)]` is the value at `(x, y) = (i, j)`.
//!
//! The operators here are stateless: finite differences with periodic wrap,
//! the skew-symmetric advective term, bilinear interpolation, and the
//! constraint mask that pins cells to fixed values after each solve.

pub mod difference;
pub mod interpolation;
pub mod mask;

pub use difference::{advective_term, difference, DiffKind};
pub use interpolation::{clamp_position, sample, sample_clamped, wrap_index};
pub use mask::ConstraintMask;

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

/// Dense 2D scalar field.
pub type Grid = DMatrix<f64>;

/// Grid axis a difference is taken along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// Along rows (index `i`)
    X,
    /// Along columns (index `j`)
    Y,
}

/// Cell spacing of a grid in physical units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spacing {
    /// Spacing between rows (m)
    pub dx: f64,
    /// Spacing between columns (m)
    pub dy: f64,
}

impl Spacing {
    #[must_use]
    pub const fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    /// Step size along `axis`
    #[must_use]
    pub const fn step(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.dx,
            Axis::Y => self.dy,
        }
    }
}

impl Default for Spacing {
    fn default() -> Self {
        Self { dx: 0.01, dy: 0.01 }
    }
}

/// Frobenius (L2) norm of a grid
#[must_use]
pub fn grid_norm(grid: &Grid) -> f64 {
    grid.norm()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_spacing_step() {
        let spacing = Spacing::new(0.5, 0.25);
        assert_eq!(spacing.step(Axis::X), 0.5);
        assert_eq!(spacing.step(Axis::Y), 0.25);
    }

    #[test]
    fn test_grid_norm() {
        let grid = Grid::from_row_slice(2, 2, &[3.0, 0.0, 0.0, 4.0]);
        assert_relative_eq!(grid_norm(&grid), 5.0, epsilon = 1e-12);
    }
}
