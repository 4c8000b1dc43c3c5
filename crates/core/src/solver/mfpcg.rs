//! Matrix-free preconditioned conjugate gradient solver
//!
//! Solves `A p = b` over the interior of a grid, where `A` is a symmetric
//! 5-point stencil stored as three coefficient arrays:
//!
//! ```text
//! (A x)(i,j) = Adiag(i,j)   x(i,j)
//!            + Aplusi(i-1,j) x(i-1,j) + Aplusi(i,j) x(i+1,j)
//!            + Aplusj(i,j-1) x(i,j-1) + Aplusj(i,j) x(i,j+1)
//! ```
//!
//! The coupling to `i-1` is read from the neighbour's `Aplusi` entry, so each
//! off-diagonal is stored once. Neighbours outside the interior contribute
//! nothing, which makes the border an implicit homogeneous Dirichlet boundary.
//!
//! The interior of an `H × W` grid is `(H-2) × (W-2)`; interior cell `(i, j)`
//! corresponds to grid cell `(i+1, j+1)` and to vector index `i * (W-2) + j`.

use super::numeric::{add_scaled, dot, norm_inf, scale_and_add};
use super::preconditioner::{Preconditioner, PreconditionerKind};
use crate::config::SimulationConfig;
use crate::error::ConfigError;
use crate::grid::Grid;
use rayon::prelude::*;
use std::fmt;
use tracing::{debug, info, warn};

/// How a solve ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolveStatus {
    /// `‖r‖∞ <= tolerance`
    Converged,
    /// Iteration cap reached; the solution is the last iterate
    MaxIterations,
    /// The search direction became degenerate (`sᵀAs == 0` or non-finite)
    /// before the residual met the tolerance, or the residual itself became
    /// non-finite (NaN or overflow in the system)
    Breakdown,
}

/// Outcome of one [`MfPcg::solve`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolveReport {
    /// Why the iteration stopped
    pub status: SolveStatus,
    /// Iterations performed
    pub iterations: usize,
    /// ∞-norm of the final recursive residual
    pub residual_norm: f64,
}

impl SolveReport {
    #[must_use]
    pub fn is_converged(&self) -> bool {
        self.status == SolveStatus::Converged
    }
}

/// Stencil system and PCG workspace for one fixed grid size
///
/// Every vector is allocated once in the constructor and reused by every
/// solve. The caller refreshes the coefficients and right-hand side before
/// each [`solve`](Self::solve).
pub struct MfPcg {
    n: usize,
    m: usize,
    adiag: Vec<f64>,
    aplusi: Vec<f64>,
    aplusj: Vec<f64>,
    b: Vec<f64>,
    p: Vec<f64>,
    r: Vec<f64>,
    z: Vec<f64>,
    s: Vec<f64>,
    preconditioner: Box<dyn Preconditioner>,
    max_iterations: usize,
    warm_start: bool,
}

impl MfPcg {
    /// Solver for the interior of a `grid_height × grid_width` grid
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyInterior`] if either dimension is below 3
    /// and [`ConfigError::ZeroIterations`] if `max_iterations` is zero.
    pub fn new(
        grid_height: usize,
        grid_width: usize,
        max_iterations: usize,
        preconditioner: PreconditionerKind,
    ) -> Result<Self, ConfigError> {
        let n = grid_height.saturating_sub(2);
        let m = grid_width.saturating_sub(2);
        if n == 0 || m == 0 {
            return Err(ConfigError::EmptyInterior {
                height: grid_height,
                width: grid_width,
            });
        }
        if max_iterations == 0 {
            return Err(ConfigError::ZeroIterations);
        }

        let size = n * m;
        let preconditioner = preconditioner.build();
        info!(
            "PCG solver allocated: {}x{} interior ({} unknowns), {} preconditioner",
            n,
            m,
            size,
            preconditioner.name()
        );

        Ok(Self {
            n,
            m,
            adiag: vec![0.0; size],
            aplusi: vec![0.0; size],
            aplusj: vec![0.0; size],
            b: vec![0.0; size],
            p: vec![0.0; size],
            r: vec![0.0; size],
            z: vec![0.0; size],
            s: vec![0.0; size],
            preconditioner,
            max_iterations,
            warm_start: false,
        })
    }

    /// Solver sized and tuned from a validated configuration
    ///
    /// # Errors
    ///
    /// Returns the first problem reported by [`SimulationConfig::validate`].
    pub fn from_config(config: &SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let solver = Self::new(
            config.grid_height,
            config.grid_width,
            config.max_pcg_iterations,
            config.preconditioner,
        )?;
        Ok(solver.with_warm_start(config.warm_start))
    }

    /// Start each solve from the current solution instead of zero
    #[must_use]
    pub fn with_warm_start(mut self, warm_start: bool) -> Self {
        self.warm_start = warm_start;
        self
    }

    /// Replace the preconditioner
    #[must_use]
    pub fn with_preconditioner(mut self, preconditioner: Box<dyn Preconditioner>) -> Self {
        self.preconditioner = preconditioner;
        self
    }

    /// Interior `(rows, cols)`
    #[must_use]
    pub fn interior_dimensions(&self) -> (usize, usize) {
        (self.n, self.m)
    }

    /// Number of unknowns
    #[must_use]
    pub fn len(&self) -> usize {
        self.n * self.m
    }

    /// Always false; an empty interior is rejected at construction
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Vector index of interior cell `(i, j)`
    #[inline]
    #[must_use]
    pub fn idx(&self, i: usize, j: usize) -> usize {
        i * self.m + j
    }

    #[must_use]
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    #[must_use]
    pub fn diagonal(&self) -> &[f64] {
        &self.adiag
    }

    pub fn diagonal_mut(&mut self) -> &mut [f64] {
        &mut self.adiag
    }

    /// Coupling of each cell to its `i+1` neighbour
    #[must_use]
    pub fn plus_i(&self) -> &[f64] {
        &self.aplusi
    }

    pub fn plus_i_mut(&mut self) -> &mut [f64] {
        &mut self.aplusi
    }

    /// Coupling of each cell to its `j+1` neighbour
    #[must_use]
    pub fn plus_j(&self) -> &[f64] {
        &self.aplusj
    }

    pub fn plus_j_mut(&mut self) -> &mut [f64] {
        &mut self.aplusj
    }

    #[must_use]
    pub fn rhs(&self) -> &[f64] {
        &self.b
    }

    pub fn rhs_mut(&mut self) -> &mut [f64] {
        &mut self.b
    }

    /// Result of the last solve (or the warm-start guess)
    #[must_use]
    pub fn solution(&self) -> &[f64] {
        &self.p
    }

    pub fn solution_mut(&mut self) -> &mut [f64] {
        &mut self.p
    }

    /// Set all three stencil coefficients of interior cell `(i, j)`
    pub fn set_stencil(&mut self, i: usize, j: usize, diag: f64, plus_i: f64, plus_j: f64) {
        let t = self.idx(i, j);
        self.adiag[t] = diag;
        self.aplusi[t] = plus_i;
        self.aplusj[t] = plus_j;
    }

    /// Copy the interior of `grid` into the right-hand side
    ///
    /// # Panics
    ///
    /// Panics if `grid` is not `(n+2) × (m+2)`.
    pub fn load_rhs(&mut self, grid: &Grid) {
        self.check_grid_shape(grid);
        let m = self.m;
        self.b
            .par_chunks_mut(m)
            .enumerate()
            .for_each(|(i, row)| {
                for (j, value) in row.iter_mut().enumerate() {
                    *value = grid[(i + 1, j + 1)];
                }
            });
    }

    /// Write the solution into the interior of `grid`, leaving the border as is
    ///
    /// # Panics
    ///
    /// Panics if `grid` is not `(n+2) × (m+2)`.
    pub fn store_solution(&self, grid: &mut Grid) {
        self.check_grid_shape(grid);
        for i in 0..self.n {
            for j in 0..self.m {
                grid[(i + 1, j + 1)] = self.p[self.idx(i, j)];
            }
        }
    }

    fn check_grid_shape(&self, grid: &Grid) {
        assert!(
            grid.shape() == (self.n + 2, self.m + 2),
            "grid size {:?} does not match solver interior {}x{} (expected {:?})",
            grid.shape(),
            self.n,
            self.m,
            (self.n + 2, self.m + 2)
        );
    }

    /// `out = A x`
    ///
    /// # Panics
    ///
    /// Panics if `x` or `out` does not have [`len`](Self::len) entries.
    pub fn apply_stencil(&self, x: &[f64], out: &mut [f64]) {
        assert!(
            x.len() == self.len() && out.len() == self.len(),
            "stencil operand length mismatch: x {}, out {}, expected {}",
            x.len(),
            out.len(),
            self.len()
        );
        stencil_product(self.n, self.m, &self.adiag, &self.aplusi, &self.aplusj, x, out);
    }

    /// `‖A p − b‖∞` recomputed from scratch
    #[must_use]
    pub fn true_residual_norm(&self) -> f64 {
        let mut ap = vec![0.0; self.len()];
        self.apply_stencil(&self.p, &mut ap);
        add_scaled(&mut ap, -1.0, &self.b);
        norm_inf(&ap)
    }

    /// Run PCG until `‖r‖∞ <= tolerance` or the iteration cap
    ///
    /// The solution is left in [`solution`](Self::solution). Reaching the cap
    /// or a degenerate search direction is not an error: the last iterate is
    /// kept and the report says why the loop stopped.
    pub fn solve(&mut self, tolerance: f64) -> SolveReport {
        let Self {
            n,
            m,
            adiag,
            aplusi,
            aplusj,
            b,
            p,
            r,
            z,
            s,
            preconditioner,
            max_iterations,
            warm_start,
        } = self;
        let (n, m) = (*n, *m);

        if *warm_start {
            stencil_product(n, m, adiag, aplusi, aplusj, p, z);
            r.par_iter_mut()
                .zip(b.par_iter().zip(z.par_iter()))
                .for_each(|(ri, (&bi, &ap))| *ri = bi - ap);
        } else {
            p.fill(0.0);
            r.copy_from_slice(b);
        }

        preconditioner.apply(adiag, r, z);
        s.copy_from_slice(z);
        let mut sigma = dot(z, r);

        let mut status = SolveStatus::MaxIterations;
        let mut iterations = 0;
        let mut residual_norm = norm_inf(r);

        for _ in 0..*max_iterations {
            iterations += 1;

            stencil_product(n, m, adiag, aplusi, aplusj, s, z);
            let curvature = dot(z, s);
            if curvature == 0.0 || !curvature.is_finite() {
                status = if residual_norm <= tolerance {
                    SolveStatus::Converged
                } else {
                    SolveStatus::Breakdown
                };
                break;
            }

            let alpha = sigma / curvature;
            add_scaled(p, alpha, s);
            add_scaled(r, -alpha, z);

            residual_norm = norm_inf(r);
            if !residual_norm.is_finite() {
                status = SolveStatus::Breakdown;
                break;
            }
            if residual_norm <= tolerance {
                status = SolveStatus::Converged;
                break;
            }

            preconditioner.apply(adiag, r, z);
            let sigma_next = dot(z, r);
            let beta = sigma_next / sigma;
            scale_and_add(s, beta, z);
            sigma = sigma_next;
        }

        let report = SolveReport {
            status,
            iterations,
            residual_norm,
        };
        match status {
            SolveStatus::Converged => debug!(
                "PCG converged in {} iterations (residual {:.3e})",
                iterations, residual_norm
            ),
            SolveStatus::MaxIterations => warn!(
                "PCG hit the {} iteration cap, residual {:.3e} > tolerance {:.3e}",
                iterations, residual_norm, tolerance
            ),
            SolveStatus::Breakdown => warn!(
                "PCG search direction degenerated after {} iterations, residual {:.3e}",
                iterations, residual_norm
            ),
        }
        report
    }
}

impl fmt::Debug for MfPcg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MfPcg")
            .field("n", &self.n)
            .field("m", &self.m)
            .field("preconditioner", &self.preconditioner.name())
            .field("max_iterations", &self.max_iterations)
            .field("warm_start", &self.warm_start)
            .finish_non_exhaustive()
    }
}

/// 5-point stencil product, one interior row per rayon task
fn stencil_product(
    n: usize,
    m: usize,
    adiag: &[f64],
    aplusi: &[f64],
    aplusj: &[f64],
    x: &[f64],
    out: &mut [f64],
) {
    out.par_chunks_mut(m).enumerate().for_each(|(i, row)| {
        for (j, value) in row.iter_mut().enumerate() {
            let t = i * m + j;
            let mut acc = adiag[t] * x[t];
            if i > 0 {
                acc += aplusi[t - m] * x[t - m];
            }
            if i + 1 < n {
                acc += aplusi[t] * x[t + m];
            }
            if j > 0 {
                acc += aplusj[t - 1] * x[t - 1];
            }
            if j + 1 < m {
                acc += aplusj[t] * x[t + 1];
            }
            *value = acc;
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::preconditioner::InverseDiagonal;
    use approx::assert_relative_eq;

    fn diagonal_system(d: f64, kind: PreconditionerKind) -> MfPcg {
        let mut solver = MfPcg::new(6, 5, 50, kind).expect("valid size");
        solver.diagonal_mut().fill(d);
        for (t, b) in solver.rhs_mut().iter_mut().enumerate() {
            *b = t as f64 - 4.0;
        }
        solver
    }

    /// Diagonally dominant stencil with symmetric negative couplings
    fn laplacian_like(solver: &mut MfPcg) {
        let (n, m) = solver.interior_dimensions();
        for i in 0..n {
            for j in 0..m {
                let plus_i = if i + 1 < n { -1.0 } else { 0.0 };
                let plus_j = if j + 1 < m { -1.0 } else { 0.0 };
                solver.set_stencil(i, j, 4.5, plus_i, plus_j);
            }
        }
    }

    #[test]
    fn test_rejects_empty_interior() {
        assert_eq!(
            MfPcg::new(2, 10, 10, PreconditionerKind::Diagonal).unwrap_err(),
            ConfigError::EmptyInterior {
                height: 2,
                width: 10
            }
        );
        assert!(MfPcg::new(10, 1, 10, PreconditionerKind::Identity).is_err());
    }

    #[test]
    fn test_rejects_zero_iterations() {
        assert_eq!(
            MfPcg::new(5, 5, 0, PreconditionerKind::Diagonal).unwrap_err(),
            ConfigError::ZeroIterations
        );
    }

    #[test]
    fn test_dimensions_and_indexing() {
        let solver = MfPcg::new(6, 5, 10, PreconditionerKind::Diagonal).expect("valid size");
        assert_eq!(solver.interior_dimensions(), (4, 3));
        assert_eq!(solver.len(), 12);
        assert!(!solver.is_empty());
        assert_eq!(solver.idx(2, 1), 7);
        assert_eq!(solver.solution().len(), 12);
    }

    #[test]
    fn test_apply_stencil_matches_dense_product() {
        let mut solver =
            MfPcg::new(5, 6, 10, PreconditionerKind::Identity).expect("valid size");
        let (n, m) = solver.interior_dimensions();
        for i in 0..n {
            for j in 0..m {
                let t = (i * m + j) as f64;
                solver.set_stencil(i, j, 3.0 + t, -0.5 - 0.1 * t, -0.25 + 0.05 * t);
            }
        }
        let x: Vec<f64> = (0..n * m).map(|t| (t as f64 * 0.7).sin()).collect();
        let mut out = vec![0.0; n * m];
        solver.apply_stencil(&x, &mut out);

        // Dense symmetric matrix assembled from the same coefficients
        let size = n * m;
        let mut dense = nalgebra::DMatrix::<f64>::zeros(size, size);
        for i in 0..n {
            for j in 0..m {
                let t = solver.idx(i, j);
                dense[(t, t)] = solver.diagonal()[t];
                if i + 1 < n {
                    let u = solver.idx(i + 1, j);
                    dense[(t, u)] = solver.plus_i()[t];
                    dense[(u, t)] = solver.plus_i()[t];
                }
                if j + 1 < m {
                    let u = solver.idx(i, j + 1);
                    dense[(t, u)] = solver.plus_j()[t];
                    dense[(u, t)] = solver.plus_j()[t];
                }
            }
        }
        let expected = dense * nalgebra::DVector::from_column_slice(&x);
        for t in 0..size {
            assert_relative_eq!(out[t], expected[t], epsilon = 1e-12);
        }
    }

    #[test]
    fn test_diagonal_only_converges_in_one_iteration() {
        for kind in [
            PreconditionerKind::Diagonal,
            PreconditionerKind::InverseDiagonal,
            PreconditionerKind::Identity,
        ] {
            let mut solver = diagonal_system(2.5, kind);
            let report = solver.solve(1e-10);
            assert_eq!(report.status, SolveStatus::Converged, "{kind:?}");
            assert_eq!(report.iterations, 1, "{kind:?}");
            for (p, b) in solver.solution().iter().zip(solver.rhs()) {
                assert_relative_eq!(*p, b / 2.5, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_inverse_diagonal_solves_varying_diagonal_in_one_iteration() {
        let mut solver =
            MfPcg::new(6, 6, 50, PreconditionerKind::InverseDiagonal).expect("valid size");
        for (t, d) in solver.diagonal_mut().iter_mut().enumerate() {
            *d = 1.0 + t as f64;
        }
        solver.rhs_mut().fill(3.0);
        let report = solver.solve(1e-10);
        assert!(report.is_converged());
        assert_eq!(report.iterations, 1);
        for (t, p) in solver.solution().iter().enumerate() {
            assert_relative_eq!(*p, 3.0 / (1.0 + t as f64), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_literal_diagonal_still_converges_on_varying_diagonal() {
        let mut solver =
            MfPcg::new(6, 6, 200, PreconditionerKind::Diagonal).expect("valid size");
        for (t, d) in solver.diagonal_mut().iter_mut().enumerate() {
            *d = 1.0 + (t % 4) as f64;
        }
        solver.rhs_mut().fill(1.0);
        let report = solver.solve(1e-9);
        assert!(report.is_converged(), "{report:?}");
        assert!(report.iterations > 1);
        assert!(solver.true_residual_norm() <= 1e-9 + 1e-12);
    }

    #[test]
    fn test_zero_rhs_gives_zero_solution() {
        let mut solver =
            MfPcg::new(7, 7, 20, PreconditionerKind::Diagonal).expect("valid size");
        laplacian_like(&mut solver);
        solver.solution_mut().fill(9.0);
        let report = solver.solve(1e-12);
        assert_eq!(report.status, SolveStatus::Converged);
        assert_eq!(report.iterations, 1);
        assert!(solver.solution().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_converged_solution_satisfies_system() {
        for kind in [
            PreconditionerKind::Diagonal,
            PreconditionerKind::InverseDiagonal,
            PreconditionerKind::Identity,
        ] {
            let mut solver = MfPcg::new(12, 10, 500, kind).expect("valid size");
            laplacian_like(&mut solver);
            for (t, b) in solver.rhs_mut().iter_mut().enumerate() {
                *b = ((t * 7) % 5) as f64 - 2.0;
            }
            let tol = 1e-8;
            let report = solver.solve(tol);
            assert!(report.is_converged(), "{kind:?}: {report:?}");
            assert!(report.residual_norm <= tol);
            assert!(solver.true_residual_norm() <= tol + 1e-12, "{kind:?}");
        }
    }

    #[test]
    fn test_iteration_cap_is_soft_failure() {
        let mut solver =
            MfPcg::new(20, 20, 2, PreconditionerKind::Identity).expect("valid size");
        laplacian_like(&mut solver);
        solver.rhs_mut()[0] = 1.0;
        let report = solver.solve(1e-14);
        assert_eq!(report.status, SolveStatus::MaxIterations);
        assert_eq!(report.iterations, 2);
        assert!(report.residual_norm > 1e-14);
        assert!(solver.solution().iter().any(|&v| v != 0.0));
    }

    #[test]
    fn test_singular_system_reports_breakdown() {
        // A = 0: every search direction has zero curvature.
        let mut solver =
            MfPcg::new(5, 5, 10, PreconditionerKind::Identity).expect("valid size");
        solver.rhs_mut().fill(1.0);
        let report = solver.solve(1e-6);
        assert_eq!(report.status, SolveStatus::Breakdown);
        assert_eq!(report.iterations, 1);
        assert!(solver.solution().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_nan_rhs_reports_breakdown() {
        let mut solver =
            MfPcg::new(6, 6, 10, PreconditionerKind::Identity).expect("valid size");
        solver.diagonal_mut().fill(4.0);
        solver.rhs_mut().fill(1.0);
        solver.rhs_mut()[5] = f64::NAN;
        let report = solver.solve(1e-8);
        assert_eq!(report.status, SolveStatus::Breakdown);
        assert!(!report.is_converged());
        assert!(report.residual_norm.is_nan());
        assert!(solver.true_residual_norm().is_nan());
    }

    #[test]
    fn test_nan_coefficient_reports_breakdown() {
        let mut solver =
            MfPcg::new(6, 6, 10, PreconditionerKind::InverseDiagonal).expect("valid size");
        laplacian_like(&mut solver);
        let t = solver.idx(1, 2);
        solver.plus_i_mut()[t] = f64::NAN;
        solver.rhs_mut().fill(1.0);
        let report = solver.solve(1e-8);
        assert_eq!(report.status, SolveStatus::Breakdown, "{report:?}");
        assert_eq!(report.iterations, 1);
    }

    #[test]
    fn test_overflowing_curvature_reports_breakdown() {
        // sᵀAs = 4·Σ(1e200)² overflows to infinity on the first iteration.
        let mut solver =
            MfPcg::new(5, 5, 10, PreconditionerKind::Identity).expect("valid size");
        solver.diagonal_mut().fill(4.0);
        solver.rhs_mut().fill(1e200);
        let report = solver.solve(1e-8);
        assert_eq!(report.status, SolveStatus::Breakdown, "{report:?}");
        assert_eq!(report.iterations, 1);
        assert_eq!(report.residual_norm, 1e200);
        assert!(solver.solution().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_repeated_solves_reuse_workspace() {
        let mut solver = diagonal_system(4.0, PreconditionerKind::Identity);
        let first = solver.solve(1e-12);
        let first_solution = solver.solution().to_vec();
        solver.rhs_mut().iter_mut().for_each(|b| *b *= 2.0);
        let second = solver.solve(1e-12);
        assert!(first.is_converged() && second.is_converged());
        for (a, b) in first_solution.iter().zip(solver.solution()) {
            assert_relative_eq!(2.0 * a, *b, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_warm_start_from_converged_solution() {
        let mut solver = MfPcg::new(9, 9, 200, PreconditionerKind::InverseDiagonal)
            .expect("valid size")
            .with_warm_start(true);
        laplacian_like(&mut solver);
        solver.rhs_mut().fill(1.0);
        let cold = solver.solve(1e-10);
        assert!(cold.is_converged());

        // Second solve starts at the answer; the first update is negligible.
        let warm = solver.solve(1e-8);
        assert!(warm.is_converged());
        assert!(warm.iterations <= cold.iterations);
        assert!(solver.true_residual_norm() <= 1e-8 + 1e-12);
    }

    #[test]
    fn test_custom_preconditioner() {
        let mut solver = diagonal_system(0.5, PreconditionerKind::Identity)
            .with_preconditioner(Box::new(InverseDiagonal));
        let report = solver.solve(1e-12);
        assert_eq!(report.iterations, 1);
        assert!(format!("{solver:?}").contains("inverse-diagonal"));
    }

    #[test]
    fn test_load_and_store_interior() {
        let mut solver =
            MfPcg::new(5, 4, 10, PreconditionerKind::Identity).expect("valid size");
        let grid = Grid::from_fn(5, 4, |i, j| (i * 10 + j) as f64);
        solver.load_rhs(&grid);
        assert_eq!(solver.rhs()[solver.idx(0, 0)], 11.0);
        assert_eq!(solver.rhs()[solver.idx(2, 1)], 32.0);

        solver.diagonal_mut().fill(1.0);
        let report = solver.solve(1e-12);
        assert!(report.is_converged());

        let mut out = Grid::from_element(5, 4, -1.0);
        solver.store_solution(&mut out);
        for i in 0..5 {
            for j in 0..4 {
                let interior = (1..4).contains(&i) && (1..3).contains(&j);
                let expected = if interior { grid[(i, j)] } else { -1.0 };
                assert_relative_eq!(out[(i, j)], expected, epsilon = 1e-12);
            }
        }
    }

    #[test]
    #[should_panic(expected = "does not match solver interior")]
    fn test_load_rhs_shape_mismatch_panics() {
        let mut solver =
            MfPcg::new(5, 5, 10, PreconditionerKind::Identity).expect("valid size");
        solver.load_rhs(&Grid::zeros(5, 6));
    }
}
