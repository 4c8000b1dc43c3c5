//! Simulation configuration
//!
//! Grid size, spacing, time step, fluid constants and solver settings are fixed
//! for the lifetime of a solver; changing them means building a new one.

use crate::error::ConfigError;
use crate::grid::Spacing;
use crate::solver::PreconditionerKind;
use serde::{Deserialize, Serialize};

/// Configuration for the grid operators and the pressure/diffusion solver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Full grid width in cells, border included (columns, Y axis)
    pub grid_width: usize,

    /// Full grid height in cells, border included (rows, X axis)
    pub grid_height: usize,

    /// Row spacing in meters
    pub dx: f64,

    /// Column spacing in meters
    pub dy: f64,

    /// Time step in seconds
    pub dt: f64,

    /// Fluid density (kg/m³)
    pub density: f64,

    /// Kinematic viscosity used by the implicit diffusion step
    pub viscosity: f64,

    /// Iteration cap for one PCG solve
    pub max_pcg_iterations: usize,

    /// Convergence threshold on the ∞-norm of the residual
    pub pcg_tolerance: f64,

    /// Residual preconditioner
    pub preconditioner: PreconditionerKind,

    /// Start each solve from the previous solution instead of zero
    pub warm_start: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            grid_width: 8,
            grid_height: 8,
            dx: 0.01,
            dy: 0.01,
            dt: 0.1,
            density: 1.0,
            viscosity: 0.01,
            max_pcg_iterations: 200,
            pcg_tolerance: 1e-8,
            preconditioner: PreconditionerKind::Diagonal,
            warm_start: false,
        }
    }
}

impl SimulationConfig {
    /// Cell spacing
    #[must_use]
    pub fn spacing(&self) -> Spacing {
        Spacing::new(self.dx, self.dy)
    }

    /// Interior `(rows, cols)` solved by the PCG solver
    #[must_use]
    pub fn interior_dimensions(&self) -> (usize, usize) {
        (
            self.grid_height.saturating_sub(2),
            self.grid_width.saturating_sub(2),
        )
    }

    /// Check that every parameter is usable
    ///
    /// # Errors
    ///
    /// Returns the first problem found: an empty interior, a non-positive
    /// spacing, time step, density, viscosity or tolerance, or a zero
    /// iteration cap.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (n, m) = self.interior_dimensions();
        if n == 0 || m == 0 {
            return Err(ConfigError::EmptyInterior {
                height: self.grid_height,
                width: self.grid_width,
            });
        }

        for (name, value) in [
            ("dx", self.dx),
            ("dy", self.dy),
            ("dt", self.dt),
            ("density", self.density),
            ("viscosity", self.viscosity),
            ("pcg_tolerance", self.pcg_tolerance),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositive { name, value });
            }
        }

        if self.max_pcg_iterations == 0 {
            return Err(ConfigError::ZeroIterations);
        }
        Ok(())
    }
}
