//! Per-step kernel context
//!
//! Bundles the values every kernel needs so their signatures stay short.

use crate::grid::{BoundaryPolicy, GridDimensions};

/// Grid, border policy and step constants shared by the kernels of one tick.
#[derive(Debug, Clone, Copy)]
pub struct StepContext {
    /// Grid geometry
    pub dims: GridDimensions,
    /// Wrap switches for the border pass
    pub boundary: BoundaryPolicy,
    /// Gauss-Seidel sweeps per linear solve
    pub iterations: usize,
    /// Time step
    pub dt: f32,
}

impl StepContext {
    /// Create a context
    pub const fn new(
        dims: GridDimensions,
        boundary: BoundaryPolicy,
        iterations: usize,
        dt: f32,
    ) -> Self {
        Self {
            dims,
            boundary,
            iterations,
            dt,
        }
    }
}
