//! Finite-difference operators with periodic boundaries
//!
//! Every operator returns a new grid of the same shape as its input. The
//! neighbour of the last row (column) is the first row (column) and vice versa,
//! so the result is defined for any grid with at least two cells along the
//! differentiated axis.

use super::{Axis, Grid, Spacing};
use serde::{Deserialize, Serialize};

/// Finite-difference stencil
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiffKind {
    /// `(f(i+1) - f(i)) / h`
    Forward,
    /// `(f(i) - f(i-1)) / h`
    Backward,
    /// `(f(i+1) - f(i-1)) / 2h`
    Center,
}

/// Derivative of `grid` along `axis`
///
/// # Panics
///
/// Panics if the grid has fewer than two cells along `axis`.
#[must_use]
pub fn difference(grid: &Grid, axis: Axis, kind: DiffKind, spacing: Spacing) -> Grid {
    let step = spacing.step(axis);
    match axis {
        Axis::X => difference_rows(grid, kind, step),
        Axis::Y => difference_rows(&grid.transpose(), kind, step).transpose(),
    }
}

/// Differences between rows, wrapping the first and last row onto each other.
fn difference_rows(a: &Grid, kind: DiffKind, step: f64) -> Grid {
    let n = a.nrows();
    assert!(
        n >= 2,
        "difference needs at least 2 cells along the axis, got {n}"
    );

    let mut out = Grid::zeros(n, a.ncols());
    match kind {
        DiffKind::Forward => {
            out.rows_mut(0, n - 1)
                .copy_from(&((a.rows(1, n - 1) - a.rows(0, n - 1)) / step));
            out.row_mut(n - 1)
                .copy_from(&((a.row(0) - a.row(n - 1)) / step));
        }
        DiffKind::Backward => {
            out.rows_mut(1, n - 1)
                .copy_from(&((a.rows(1, n - 1) - a.rows(0, n - 1)) / step));
            out.row_mut(0)
                .copy_from(&((a.row(0) - a.row(n - 1)) / step));
        }
        DiffKind::Center => {
            let two_step = 2.0 * step;
            if n > 2 {
                out.rows_mut(1, n - 2)
                    .copy_from(&((a.rows(2, n - 2) - a.rows(0, n - 2)) / two_step));
            }
            out.row_mut(0)
                .copy_from(&((a.row(1) - a.row(n - 1)) / two_step));
            out.row_mut(n - 1)
                .copy_from(&((a.row(0) - a.row(n - 2)) / two_step));
        }
    }
    out
}

/// Energy-conserving (skew-symmetric) advection of `phi` by `(u, v)`
///
/// ```text
/// S = ½ (u ∂φ/∂x + v ∂φ/∂y + ∂(uφ)/∂x + ∂(vφ)/∂y)
/// ```
///
/// All derivatives are periodic central differences.
///
/// # Panics
///
/// Panics if `u`, `v` and `phi` do not share the same shape.
#[must_use]
pub fn advective_term(u: &Grid, v: &Grid, phi: &Grid, spacing: Spacing) -> Grid {
    assert!(
        u.shape() == phi.shape() && v.shape() == phi.shape(),
        "advective term shape mismatch: u {:?}, v {:?}, phi {:?}",
        u.shape(),
        v.shape(),
        phi.shape()
    );

    let dphi_dx = difference(phi, Axis::X, DiffKind::Center, spacing);
    let dphi_dy = difference(phi, Axis::Y, DiffKind::Center, spacing);
    let duphi_dx = difference(&u.component_mul(phi), Axis::X, DiffKind::Center, spacing);
    let dvphi_dy = difference(&v.component_mul(phi), Axis::Y, DiffKind::Center, spacing);

    (u.component_mul(&dphi_dx) + v.component_mul(&dphi_dy) + duphi_dx + dvphi_dy) * 0.5
}
