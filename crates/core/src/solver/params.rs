//! Solver configuration
//!
//! Every tunable of the solver in one serde-friendly struct. Missing fields in
//! a JSON document fall back to the defaults below.

use serde::{Deserialize, Serialize};

use crate::error::FluidError;
use crate::grid::{BoundaryPolicy, ColorMode, GridDimensions};

/// Configuration for a [`crate::FluidSolver`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FluidParams {
    /// Interior cells along x
    pub nx: usize,
    /// Interior cells along y
    pub ny: usize,
    /// Time step per update
    pub dt: f32,
    /// Velocity diffusion coefficient
    pub viscosity: f32,
    /// Color diffusion coefficient (0 skips the color diffusion solve)
    pub color_diffusion: f32,
    /// Fraction of color removed per step, in `[0, 1]`
    pub fade_speed: f32,
    /// Gauss-Seidel sweeps per linear solve
    pub solver_iterations: usize,
    /// One grey channel or three RGB channels
    pub color_mode: ColorMode,
    /// Enable vorticity confinement
    pub vorticity_confinement: bool,
    /// Connect the left and right walls
    pub wrap_x: bool,
    /// Connect the top and bottom walls
    pub wrap_y: bool,
    /// Seed for `randomize_color`; `None` draws from OS entropy
    pub seed: Option<u64>,
}

impl Default for FluidParams {
    fn default() -> Self {
        Self {
            nx: 100,
            ny: 100,
            dt: 0.04,
            viscosity: 0.0001,
            color_diffusion: 0.0,
            fade_speed: 0.03,
            solver_iterations: 10,
            color_mode: ColorMode::Rgb,
            vorticity_confinement: false,
            wrap_x: false,
            wrap_y: false,
            seed: None,
        }
    }
}

impl FluidParams {
    /// Default parameters on an `nx` x `ny` grid.
    pub fn with_size(nx: usize, ny: usize) -> Self {
        Self {
            nx,
            ny,
            ..Self::default()
        }
    }

    /// Check grid size and scalar ranges.
    ///
    /// # Errors
    ///
    /// Returns [`FluidError::InvalidDimensions`] for an empty grid and
    /// [`FluidError::InvalidParameter`] for a non-finite or negative `dt`,
    /// `viscosity` or `color_diffusion`, or a `fade_speed` outside `[0, 1]`.
    pub fn validate(&self) -> Result<(), FluidError> {
        self.dimensions()?;
        check_non_negative("dt", self.dt)?;
        check_non_negative("viscosity", self.viscosity)?;
        check_non_negative("color_diffusion", self.color_diffusion)?;
        if !(0.0..=1.0).contains(&self.fade_speed) {
            return Err(FluidError::InvalidParameter {
                name: "fade_speed",
                value: self.fade_speed,
            });
        }
        Ok(())
    }

    /// Grid dimensions described by `nx`/`ny`.
    ///
    /// # Errors
    ///
    /// Returns [`FluidError::InvalidDimensions`] when either axis is zero.
    pub fn dimensions(&self) -> Result<GridDimensions, FluidError> {
        GridDimensions::new(self.nx, self.ny)
    }

    /// Border policy described by the wrap switches.
    pub fn boundary(&self) -> BoundaryPolicy {
        BoundaryPolicy::new(self.wrap_x, self.wrap_y)
    }
}

/// Reject non-finite or negative coefficients.
pub(crate) fn check_non_negative(name: &'static str, value: f32) -> Result<(), FluidError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(FluidError::InvalidParameter { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = FluidParams::default();
        assert_eq!(params.nx, 100);
        assert_eq!(params.ny, 100);
        assert_eq!(params.dt, 0.04);
        assert_eq!(params.viscosity, 0.0001);
        assert_eq!(params.fade_speed, 0.03);
        assert_eq!(params.solver_iterations, 10);
        assert_eq!(params.color_mode, ColorMode::Rgb);
        assert!(!params.vorticity_confinement);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let params = FluidParams::with_size(0, 5);
        assert_eq!(
            params.validate(),
            Err(FluidError::InvalidDimensions { nx: 0, ny: 5 })
        );

        let params = FluidParams {
            dt: f32::NAN,
            ..FluidParams::default()
        };
        assert!(matches!(
            params.validate(),
            Err(FluidError::InvalidParameter { name: "dt", .. })
        ));

        let params = FluidParams {
            viscosity: -1.0,
            ..FluidParams::default()
        };
        assert!(params.validate().is_err());

        let params = FluidParams {
            fade_speed: 1.5,
            ..FluidParams::default()
        };
        assert_eq!(
            params.validate(),
            Err(FluidError::InvalidParameter {
                name: "fade_speed",
                value: 1.5
            })
        );
    }

    #[test]
    fn test_boundary_policy() {
        let params = FluidParams {
            wrap_y: true,
            ..FluidParams::default()
        };
        assert_eq!(params.boundary(), BoundaryPolicy::new(false, true));
    }
}
