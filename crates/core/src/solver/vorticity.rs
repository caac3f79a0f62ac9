//! Vorticity confinement
//!
//! Re-injects small-scale swirl lost to numerical dissipation. The force at
//! each cell points along the gradient of |curl|, rotated by the local curl.

use crate::grid::GridDimensions;

/// Half-difference curl `0.5 * (du/dy - dv/dx)` at interior cell `(i, j)`.
#[inline]
pub fn curl_at(dims: GridDimensions, u: &[f32], v: &[f32], i: usize, j: usize) -> f32 {
    let du_dy = u[dims.index(i, j + 1)] - u[dims.index(i, j - 1)];
    let dv_dx = v[dims.index(i + 1, j)] - v[dims.index(i - 1, j)];
    (du_dy - dv_dx) * 0.5
}

/// Write |curl| into `curl` for every interior cell, then the confinement
/// force into `force_u`/`force_v` for cells at least two away from the wall.
///
/// Force cells outside that ring are left untouched, so callers clear the
/// force buffers first.
pub fn vorticity_confinement(
    dims: GridDimensions,
    u: &[f32],
    v: &[f32],
    curl: &mut [f32],
    force_u: &mut [f32],
    force_v: &mut [f32],
) {
    let (nx, ny) = (dims.nx(), dims.ny());
    let stride = dims.width();

    for j in (1..=ny).rev() {
        for i in (1..=nx).rev() {
            curl[dims.index(i, j)] = curl_at(dims, u, v, i, j).abs();
        }
    }

    for j in (2..ny).rev() {
        for i in (2..nx).rev() {
            let idx = dims.index(i, j);
            let dw_dx = curl[idx + 1] - curl[idx - 1];
            let dw_dy = curl[idx + stride] - curl[idx - stride];

            // gradient left un-halved, so the normalised vector has length 2
            let length = (dw_dx * dw_dx + dw_dy * dw_dy).sqrt() + 0.000001;
            let scale = 2.0 / length;
            let dw_dx = dw_dx * scale;
            let dw_dy = dw_dy * scale;

            let w = curl_at(dims, u, v, i, j);
            force_u[idx] = dw_dy * -w;
            force_v[idx] = dw_dx * w;
        }
    }
}
