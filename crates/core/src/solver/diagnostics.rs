//! Field diagnostics
//!
//! Cheap whole-grid measures used by tests, the headless demo and host
//! applications that want to watch solver health.

use crate::grid::GridDimensions;

/// Largest absolute central-difference divergence over the interior.
///
/// Differences are scaled by the grid resolution, matching the scale of the
/// pressure solve.
pub fn max_divergence(dims: GridDimensions, u: &[f32], v: &[f32]) -> f32 {
    let stride = dims.width();
    let hx = 0.5 * dims.nx() as f32;
    let hy = 0.5 * dims.ny() as f32;
    let mut max = 0.0_f32;

    for j in 1..=dims.ny() {
        for i in 1..=dims.nx() {
            let idx = dims.index(i, j);
            let div = hx * (u[idx + 1] - u[idx - 1]) + hy * (v[idx + stride] - v[idx - stride]);
            max = max.max(div.abs());
        }
    }
    max
}

/// Mean kinetic energy `0.5 * |vel|^2` over the interior.
pub fn kinetic_energy(dims: GridDimensions, u: &[f32], v: &[f32]) -> f32 {
    let mut total = 0.0_f32;
    for j in 1..=dims.ny() {
        for i in 1..=dims.nx() {
            let idx = dims.index(i, j);
            total += 0.5 * (u[idx] * u[idx] + v[idx] * v[idx]);
        }
    }
    total / (dims.nx() * dims.ny()) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_uniform_flow_is_divergence_free() {
        let dims = GridDimensions::new(5, 5).unwrap();
        let u = vec![1.0; dims.num_cells()];
        let v = vec![-3.0; dims.num_cells()];
        assert_eq!(max_divergence(dims, &u, &v), 0.0);
        assert_relative_eq!(kinetic_energy(dims, &u, &v), 5.0);
    }

    #[test]
    fn test_linear_expansion() {
        // u = x / nx has du/dx = 1 everywhere
        let dims = GridDimensions::new(4, 4).unwrap();
        let mut u = vec![0.0; dims.num_cells()];
        for j in 0..dims.height() {
            for i in 0..dims.width() {
                u[dims.index(i, j)] = i as f32 / 4.0;
            }
        }
        let v = vec![0.0; dims.num_cells()];
        assert_relative_eq!(max_divergence(dims, &u, &v), 1.0);
    }
}
