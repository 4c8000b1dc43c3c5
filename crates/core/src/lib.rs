//! Stable-fluids core library
//!
//! Numeric core of a 2D stable-fluids simulator: the matrix-free preconditioned
//! conjugate gradient solver for the implicit pressure and diffusion steps, and
//! the grid math it relies on.
//!
//! - [`grid`]: finite differences with periodic wrap, the skew-symmetric
//!   advective term, bilinear interpolation, and constraint masks
//! - [`solver`]: the 5-point stencil PCG solver and stencil assembly
//! - [`config`]: validated, serialisable simulation settings

pub mod config;
pub mod error;
pub mod grid;
pub mod solver;

pub use config::SimulationConfig;
pub use error::ConfigError;
pub use grid::{Axis, ConstraintMask, DiffKind, Grid, Spacing};
pub use solver::{MfPcg, PreconditionerKind, SolveReport, SolveStatus};
