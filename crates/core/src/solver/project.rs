//! Pressure projection
//!
//! Removes the divergent part of the velocity field: compute the discrete
//! divergence, relax the pressure Poisson equation, then subtract the pressure
//! gradient. The two scratch buffers are overwritten.

use super::{linear_solve, StepContext};
use crate::grid::Bound;

/// Project `(u, v)` towards a divergence-free field using `p` and `div` as scratch.
pub fn project(ctx: &StepContext, u: &mut [f32], v: &mut [f32], p: &mut [f32], div: &mut [f32]) {
    let dims = ctx.dims;
    let (nx, ny) = (dims.nx(), dims.ny());
    let stride = dims.width();
    let h = -0.5 / nx as f32;

    for j in (1..=ny).rev() {
        for i in (1..=nx).rev() {
            let idx = dims.index(i, j);
            div[idx] = h * (u[idx + 1] - u[idx - 1] + v[idx + stride] - v[idx - stride]);
            p[idx] = 0.0;
        }
    }
    ctx.boundary.apply(Bound::Scalar, div, dims);
    ctx.boundary.apply(Bound::Scalar, p, dims);

    linear_solve(ctx, Bound::Scalar, p, div, 1.0, 4.0);

    let fx = 0.5 * nx as f32;
    let fy = 0.5 * ny as f32;
    for j in (1..=ny).rev() {
        for i in (1..=nx).rev() {
            let idx = dims.index(i, j);
            u[idx] -= fx * (p[idx + 1] - p[idx - 1]);
            v[idx] -= fy * (p[idx + stride] - p[idx - stride]);
        }
    }
    ctx.boundary.apply(Bound::VelocityX, u, dims);
    ctx.boundary.apply(Bound::VelocityY, v, dims);
}
