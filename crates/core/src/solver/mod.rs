//! Implicit linear solver for the pressure and diffusion steps
//!
//! The system matrix is always a symmetric 5-point stencil over the grid
//! interior, so it is never stored as a sparse matrix: [`MfPcg`] keeps the
//! three coefficient arrays and applies the stencil on the fly.
//!
//! # Example
//!
//! ```rust
//! use stableflow_core::grid::{Grid, Spacing};
//! use stableflow_core::solver::{assemble_implicit_diffusion, MfPcg, PreconditionerKind};
//!
//! let mut solver = MfPcg::new(16, 16, 200, PreconditionerKind::InverseDiagonal)?;
//! let dye = Grid::from_element(16, 16, 1.0);
//!
//! assemble_implicit_diffusion(&mut solver, 0.01, Spacing::new(0.1, 0.1), 0.1);
//! solver.load_rhs(&dye);
//! let report = solver.solve(1e-8);
//! assert!(report.is_converged());
//! # Ok::<(), stableflow_core::ConfigError>(())
//! ```

mod mfpcg;
pub mod numeric;
mod preconditioner;
mod stencil;

pub use mfpcg::{MfPcg, SolveReport, SolveStatus};
pub use numeric::{clip, combine, dot, norm_inf};
pub use preconditioner::{Diagonal, Identity, InverseDiagonal, Preconditioner, PreconditionerKind};
pub use stencil::{assemble_implicit_diffusion, assemble_pressure_poisson, fold_dirichlet_border};
