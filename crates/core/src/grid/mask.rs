//! Constraint mask: cells pinned to fixed values
//!
//! Sources, sinks and obstacles are modelled by overwriting a set of cells
//! after every solve. Shapes are given in normalised coordinates, `x` along
//! rows and `y` along columns, both in `[0, 1]`. Later shapes overwrite
//! earlier ones where they overlap.

use super::Grid;
use nalgebra::DMatrix;

/// Pinned cells and their values for a grid of fixed shape
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintMask {
    mask: DMatrix<bool>,
    delta: Grid,
}

impl ConstraintMask {
    /// Empty mask for a `rows × cols` grid
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            mask: DMatrix::from_element(rows, cols, false),
            delta: Grid::zeros(rows, cols),
        }
    }

    /// Empty mask shaped like `grid`
    #[must_use]
    pub fn for_grid(grid: &Grid) -> Self {
        Self::new(grid.nrows(), grid.ncols())
    }

    /// `(rows, cols)` of the grids this mask applies to
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        self.delta.shape()
    }

    /// Unpin every cell
    pub fn clear(&mut self) {
        self.mask.fill(false);
        self.delta.fill(0.0);
    }

    #[must_use]
    pub fn is_masked(&self, i: usize, j: usize) -> bool {
        self.mask[(i, j)]
    }

    /// Pinned value of cell `(i, j)`, if any
    #[must_use]
    pub fn value(&self, i: usize, j: usize) -> Option<f64> {
        self.mask[(i, j)].then_some(self.delta[(i, j)])
    }

    /// Number of pinned cells
    #[must_use]
    pub fn masked_count(&self) -> usize {
        self.mask.iter().filter(|&&pinned| pinned).count()
    }

    /// Pin the inclusive box `[x0, x1] × [y0, y1]` to `value`
    ///
    /// Corners are truncated to cell indices and clamped into the grid, so a
    /// box reaching past the border covers the edge cells.
    pub fn set_box(&mut self, x0: f64, x1: f64, y0: f64, y1: f64, value: f64) {
        let (n, m) = self.dimensions();
        if n == 0 || m == 0 {
            return;
        }
        let i0 = normalized_to_index(x0, n);
        let i1 = normalized_to_index(x1, n);
        let j0 = normalized_to_index(y0, m);
        let j1 = normalized_to_index(y1, m);

        for i in i0..=i1 {
            for j in j0..=j1 {
                self.pin(i, j, value);
            }
        }
    }

    /// Pin every cell inside the ellipse centred at `(cx, cy)` with
    /// semi-axes `a` (along x) and `b` (along y)
    ///
    /// A degenerate ellipse (`a <= 0` or `b <= 0`) pins nothing.
    pub fn set_ellipse(&mut self, cx: f64, cy: f64, a: f64, b: f64, value: f64) {
        if a <= 0.0 || b <= 0.0 {
            return;
        }
        let (n, m) = self.dimensions();
        let (a2, b2) = (a * a, b * b);

        for i in 0..n {
            for j in 0..m {
                let dx = i as f64 / n as f64 - cx;
                let dy = j as f64 / m as f64 - cy;
                if dx * dx * b2 + dy * dy * a2 <= a2 * b2 {
                    self.pin(i, j, value);
                }
            }
        }
    }

    /// Pin a disc that is round in cell space
    ///
    /// `radius` is measured in the normalised x (row) unit; the y semi-axis is
    /// rescaled by the grid's aspect ratio.
    pub fn set_circle(&mut self, cx: f64, cy: f64, radius: f64, value: f64) {
        let (n, m) = self.dimensions();
        if m == 0 {
            return;
        }
        let aspect = n as f64 / m as f64;
        self.set_ellipse(cx, cy, radius, radius * aspect, value);
    }

    /// Overwrite every pinned cell of `grid` with its recorded value
    ///
    /// # Panics
    ///
    /// Panics if `grid` and the mask have different shapes.
    pub fn apply(&self, grid: &mut Grid) {
        assert!(
            grid.shape() == self.dimensions(),
            "constraint mask size {:?} does not match grid size {:?}",
            self.dimensions(),
            grid.shape()
        );
        for (cell, (&pinned, &value)) in grid
            .iter_mut()
            .zip(self.mask.iter().zip(self.delta.iter()))
        {
            if pinned {
                *cell = value;
            }
        }
    }

    fn pin(&mut self, i: usize, j: usize, value: f64) {
        self.mask[(i, j)] = true;
        self.delta[(i, j)] = value;
    }
}

/// Truncate a normalised coordinate to an index in `[0, len)`.
fn normalized_to_index(t: f64, len: usize) -> usize {
    let raw = (t * len as f64).trunc();
    raw.max(0.0).min((len - 1) as f64) as usize
}
