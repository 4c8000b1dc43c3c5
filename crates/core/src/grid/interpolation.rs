//! Bilinear interpolation and coordinate helpers
//!
//! Coordinates are in array-index units: `(x, y) = (2.5, 1.0)` lies halfway
//! between rows 2 and 3 on column 1.

use super::Grid;

/// Bilinearly interpolated value of `grid` at `(x, y)`
///
/// Both `floor(x)` and `floor(x) + 1` must be valid row indices, and likewise
/// for `y` and columns. Use [`clamp_position`] first when the coordinates come
/// from a back-traced particle.
///
/// # Panics
///
/// Panics if any of the four corner cells lies outside the grid, or if the
/// interpolated value is NaN (the field was already corrupted).
#[must_use]
pub fn sample(grid: &Grid, x: f64, y: f64) -> f64 {
    let (n, m) = grid.shape();
    let x0 = x.floor();
    let y0 = y.floor();

    assert!(
        x0 >= 0.0 && x0 + 1.0 < n as f64,
        "interpolation row {x} out of range for {n} rows"
    );
    assert!(
        y0 >= 0.0 && y0 + 1.0 < m as f64,
        "interpolation column {y} out of range for {m} columns"
    );

    let xi = x0 as usize;
    let yi = y0 as usize;
    let fx = x - x0;
    let fy = y - y0;

    let value = grid[(xi, yi)] * (1.0 - fx) * (1.0 - fy)
        + grid[(xi, yi + 1)] * (1.0 - fx) * fy
        + grid[(xi + 1, yi)] * fx * (1.0 - fy)
        + grid[(xi + 1, yi + 1)] * fx * fy;

    assert!(
        !value.is_nan(),
        "interpolated value at ({x}, {y}) is NaN"
    );
    value
}

/// Clamp `(x, y)` into `[0.5, dim - 1.5]` so that [`sample`] stays in bounds
#[must_use]
pub fn clamp_position(grid: &Grid, x: f64, y: f64) -> (f64, f64) {
    let (n, m) = grid.shape();
    let x_max = n as f64 - 1.5;
    let y_max = m as f64 - 1.5;
    // Not `f64::clamp`: it panics when the grid is too small for a valid range.
    (x.max(0.5).min(x_max), y.max(0.5).min(y_max))
}

/// Clamp then sample
///
/// # Panics
///
/// Panics if the grid has fewer than 2 rows or columns, or if the result is NaN.
#[must_use]
pub fn sample_clamped(grid: &Grid, x: f64, y: f64) -> f64 {
    let (cx, cy) = clamp_position(grid, x, y);
    sample(grid, cx, cy)
}

/// Reduce signed indices onto the grid with periodic wrap
///
/// # Panics
///
/// Panics if the grid is empty.
#[must_use]
pub fn wrap_index(grid: &Grid, i: isize, j: isize) -> (usize, usize) {
    let (n, m) = grid.shape();
    assert!(n > 0 && m > 0, "cannot wrap indices on an empty grid");
    (
        i.rem_euclid(n as isize) as usize,
        j.rem_euclid(m as isize) as usize,
    )
}
