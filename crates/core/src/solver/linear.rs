//! Gauss-Seidel relaxation and implicit diffusion
//!
//! Solves `c * x[i,j] - a * (x[i-1,j] + x[i+1,j] + x[i,j-1] + x[i,j+1]) = x0[i,j]`
//! with a fixed number of in-place sweeps. Cells are visited from the top-right
//! of the interior down to `(1, 1)`, and the border ring is refreshed after each
//! sweep.

use super::StepContext;
use crate::grid::Bound;

/// Relax `x` towards the solution of the 5-point system with weights `a`, `c`.
///
/// `x` holds the initial guess on entry. `c` must be non-zero.
pub fn linear_solve(ctx: &StepContext, bound: Bound, x: &mut [f32], x0: &[f32], a: f32, c: f32) {
    if a == 1.0 && c == 4.0 {
        poisson_solve(ctx, bound, x, x0);
        return;
    }

    let dims = ctx.dims;
    let stride = dims.width();
    let inv_c = 1.0 / c;

    for _ in 0..ctx.iterations {
        for j in (1..=dims.ny()).rev() {
            for i in (1..=dims.nx()).rev() {
                let idx = dims.index(i, j);
                let neighbours = x[idx - 1] + x[idx + 1] + x[idx - stride] + x[idx + stride];
                x[idx] = (neighbours * a + x0[idx]) * inv_c;
            }
        }
        ctx.boundary.apply(bound, x, dims);
    }
}

/// Specialised sweep for the pressure equation (`a = 1`, `c = 4`).
fn poisson_solve(ctx: &StepContext, bound: Bound, x: &mut [f32], x0: &[f32]) {
    let dims = ctx.dims;
    let stride = dims.width();

    for _ in 0..ctx.iterations {
        for j in (1..=dims.ny()).rev() {
            for i in (1..=dims.nx()).rev() {
                let idx = dims.index(i, j);
                x[idx] =
                    (x[idx - 1] + x[idx + 1] + x[idx - stride] + x[idx + stride] + x0[idx]) * 0.25;
            }
        }
        ctx.boundary.apply(bound, x, dims);
    }
}

/// Implicit diffusion of `x0` into `x` with coefficient `diff`.
pub fn diffuse(ctx: &StepContext, bound: Bound, x: &mut [f32], x0: &[f32], diff: f32) {
    let a = ctx.dt * diff * (ctx.dims.nx() * ctx.dims.ny()) as f32;
    linear_solve(ctx, bound, x, x0, a, 1.0 + 4.0 * a);
}
