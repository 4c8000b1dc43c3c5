//! Preconditioners for the matrix-free PCG solver
//!
//! A preconditioner maps the residual `r` to `z ≈ M⁻¹ r`. The solver owns one
//! as a trait object, chosen once at construction from [`PreconditionerKind`].

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Residual preconditioning step of the PCG iteration
pub trait Preconditioner: Send + Sync {
    /// Write the preconditioned `residual` into `out`
    ///
    /// `diagonal` is the current stencil diagonal, one entry per unknown.
    fn apply(&self, diagonal: &[f64], residual: &[f64], out: &mut [f64]);

    /// Short name for logs
    fn name(&self) -> &'static str;
}

/// Scales the residual by the stencil diagonal: `zᵢ = rᵢ · Aᵢᵢ`
///
/// This multiplies by the diagonal rather than dividing by it, so it is not
/// a Jacobi approximation of `A⁻¹`. It converges for a constant diagonal and
/// is the default to keep results identical to existing runs; see
/// [`InverseDiagonal`] for the true Jacobi form.
#[derive(Debug, Clone, Copy, Default)]
pub struct Diagonal;

impl Preconditioner for Diagonal {
    fn apply(&self, diagonal: &[f64], residual: &[f64], out: &mut [f64]) {
        out.par_iter_mut()
            .zip(residual.par_iter().zip(diagonal.par_iter()))
            .for_each(|(z, (&r, &d))| *z = r * d);
    }

    fn name(&self) -> &'static str {
        "diagonal"
    }
}

/// Jacobi preconditioner: `zᵢ = rᵢ / Aᵢᵢ`
///
/// Rows with a zero diagonal pass the residual through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct InverseDiagonal;

impl Preconditioner for InverseDiagonal {
    fn apply(&self, diagonal: &[f64], residual: &[f64], out: &mut [f64]) {
        out.par_iter_mut()
            .zip(residual.par_iter().zip(diagonal.par_iter()))
            .for_each(|(z, (&r, &d))| *z = if d == 0.0 { r } else { r / d });
    }

    fn name(&self) -> &'static str {
        "inverse-diagonal"
    }
}

/// No preconditioning, which reduces PCG to plain CG
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl Preconditioner for Identity {
    fn apply(&self, _diagonal: &[f64], residual: &[f64], out: &mut [f64]) {
        out.copy_from_slice(residual);
    }

    fn name(&self) -> &'static str {
        "identity"
    }
}

/// Preconditioner selection for configuration files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PreconditionerKind {
    /// [`Diagonal`]
    #[default]
    Diagonal,
    /// [`InverseDiagonal`]
    InverseDiagonal,
    /// [`Identity`]
    Identity,
}

impl PreconditionerKind {
    /// Instantiate the selected preconditioner
    #[must_use]
    pub fn build(self) -> Box<dyn Preconditioner> {
        match self {
            Self::Diagonal => Box::new(Diagonal),
            Self::InverseDiagonal => Box::new(InverseDiagonal),
            Self::Identity => Box::new(Identity),
        }
    }
}
