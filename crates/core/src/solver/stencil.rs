//! Stencil assembly for the two implicit systems of a fluid step
//!
//! Both systems are the 5-point discrete Laplacian over the interior, shifted
//! or scaled:
//!
//! ```text
//! diffusion:  (I − k∇²) u = u₀          k = ν·dt
//! pressure:   −(dt/ρ) ∇² p = −∇·u
//! ```
//!
//! Couplings to the border are left out of `A` (the solver treats outside
//! neighbours as zero). Known border values enter through
//! [`fold_dirichlet_border`].

use super::mfpcg::MfPcg;
use crate::grid::{Grid, Spacing};

/// Fill `solver` with `diag_shift·I − scale·∇²`
fn assemble_scaled_laplacian(solver: &mut MfPcg, spacing: Spacing, scale: f64, diag_shift: f64) {
    let (n, m) = solver.interior_dimensions();
    let inv_dx2 = 1.0 / (spacing.dx * spacing.dx);
    let inv_dy2 = 1.0 / (spacing.dy * spacing.dy);
    let diag = diag_shift + scale * (2.0 * inv_dx2 + 2.0 * inv_dy2);

    for i in 0..n {
        for j in 0..m {
            // The last row/column couples to the border, which is not an unknown.
            let plus_i = if i + 1 < n { -scale * inv_dx2 } else { 0.0 };
            let plus_j = if j + 1 < m { -scale * inv_dy2 } else { 0.0 };
            solver.set_stencil(i, j, diag, plus_i, plus_j);
        }
    }
}

/// Backward-Euler diffusion: `(I − k∇²) u = u₀` with `k = coefficient·dt`
pub fn assemble_implicit_diffusion(solver: &mut MfPcg, coefficient: f64, spacing: Spacing, dt: f64) {
    assemble_scaled_laplacian(solver, spacing, coefficient * dt, 1.0);
}

/// Pressure projection: `−(dt/ρ) ∇² p = rhs`
pub fn assemble_pressure_poisson(solver: &mut MfPcg, spacing: Spacing, dt: f64, density: f64) {
    assemble_scaled_laplacian(solver, spacing, dt / density, 0.0);
}

/// Move known border values of `grid` to the right-hand side
///
/// For a system assembled with Laplacian scale `scale`, each interior cell
/// next to the border gains `scale/dx²` (or `scale/dy²`) times the border value.
///
/// # Panics
///
/// Panics if `grid` does not match the solver's full grid size.
pub fn fold_dirichlet_border(solver: &mut MfPcg, grid: &Grid, spacing: Spacing, scale: f64) {
    let (n, m) = solver.interior_dimensions();
    assert!(
        grid.shape() == (n + 2, m + 2),
        "border grid size {:?} does not match solver interior {}x{}",
        grid.shape(),
        n,
        m
    );
    let wx = scale / (spacing.dx * spacing.dx);
    let wy = scale / (spacing.dy * spacing.dy);

    for j in 0..m {
        let top = solver.idx(0, j);
        let bottom = solver.idx(n - 1, j);
        solver.rhs_mut()[top] += wx * grid[(0, j + 1)];
        solver.rhs_mut()[bottom] += wx * grid[(n + 1, j + 1)];
    }
    for i in 0..n {
        let left = solver.idx(i, 0);
        let right = solver.idx(i, m - 1);
        solver.rhs_mut()[left] += wy * grid[(i + 1, 0)];
        solver.rhs_mut()[right] += wy * grid[(i + 1, m + 1)];
    }
}
