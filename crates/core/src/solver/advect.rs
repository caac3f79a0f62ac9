//! Semi-Lagrangian advection
//!
//! Each interior cell traces its centre backwards through the velocity field
//! for one time step and bilinearly samples the previous field there. The
//! back-traced point is clamped to `[0.5, n + 0.5]`, so samples never leave
//! the padded grid and the scheme stays unconditionally stable.

use super::StepContext;
use crate::grid::Bound;

/// Transport `d0` along `(u, v)` into `d`.
pub fn advect(ctx: &StepContext, bound: Bound, d: &mut [f32], d0: &[f32], u: &[f32], v: &[f32]) {
    let dims = ctx.dims;
    let (nx, ny) = (dims.nx(), dims.ny());
    let dt0x = ctx.dt * nx as f32;
    let dt0y = ctx.dt * ny as f32;
    let max_x = nx as f32 + 0.5;
    let max_y = ny as f32 + 0.5;

    for j in (1..=ny).rev() {
        for i in (1..=nx).rev() {
            let idx = dims.index(i, j);
            let x = (i as f32 - dt0x * u[idx]).clamp(0.5, max_x);
            let y = (j as f32 - dt0y * v[idx]).clamp(0.5, max_y);

            let i0 = x as usize;
            let j0 = y as usize;
            let s1 = x - i0 as f32;
            let s0 = 1.0 - s1;
            let t1 = y - j0 as f32;
            let t0 = 1.0 - t1;

            d[idx] = s0 * (t0 * d0[dims.index(i0, j0)] + t1 * d0[dims.index(i0, j0 + 1)])
                + s1 * (t0 * d0[dims.index(i0 + 1, j0)] + t1 * d0[dims.index(i0 + 1, j0 + 1)]);
        }
    }
    ctx.boundary.apply(bound, d, dims);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{BoundaryPolicy, GridDimensions};
    use approx::assert_relative_eq;

    fn context(n: usize, dt: f32) -> StepContext {
        StepContext::new(
            GridDimensions::new(n, n).unwrap(),
            BoundaryPolicy::default(),
            10,
            dt,
        )
    }

    #[test]
    fn test_still_fluid_keeps_field() {
        let ctx = context(8, 0.1);
        let n = ctx.dims.num_cells();
        let d0: Vec<f32> = (0..n).map(|k| (k % 7) as f32 * 0.1).collect();
        let zeros = vec![0.0; n];
        let mut d = vec![0.0; n];
        advect(&ctx, Bound::Scalar, &mut d, &d0, &zeros, &zeros);

        for j in 1..=8 {
            for i in 1..=8 {
                let idx = ctx.dims.index(i, j);
                assert_relative_eq!(d[idx], d0[idx], epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn test_whole_cell_shift() {
        // dt * nx * u = 1 moves content exactly one cell to the right
        let ctx = context(10, 0.1);
        let n = ctx.dims.num_cells();
        let mut d0 = vec![0.0; n];
        d0[ctx.dims.index(4, 5)] = 1.0;
        let u = vec![1.0; n];
        let v = vec![0.0; n];
        let mut d = vec![0.0; n];
        advect(&ctx, Bound::Scalar, &mut d, &d0, &u, &v);

        assert_relative_eq!(d[ctx.dims.index(5, 5)], 1.0, epsilon = 1e-5);
        assert_relative_eq!(d[ctx.dims.index(4, 5)], 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_huge_velocity_stays_bounded() {
        let ctx = context(6, 10.0);
        let n = ctx.dims.num_cells();
        let d0 = vec![1.0; n];
        let u = vec![1.0e6; n];
        let v = vec![-1.0e6; n];
        let mut d = vec![0.0; n];
        advect(&ctx, Bound::Scalar, &mut d, &d0, &u, &v);

        for value in &d {
            assert!(value.is_finite());
            assert!(*value <= 1.0 + 1e-6);
        }
    }
}
