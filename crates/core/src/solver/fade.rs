//! End-of-step decay and field statistics
//!
//! The fade pass runs over every padded cell once: it clears the staging
//! buffers for the next batch of injections, clamps and decays color, snaps
//! denormal-sized values to zero and gathers the averages renderers use to
//! auto-adjust exposure.

use serde::{Deserialize, Serialize};

use crate::grid::FieldStore;

/// Magnitudes below this are flushed to exactly zero.
pub const ZERO_THRESHOLD: f32 = 1e-9;

/// Whole-grid statistics refreshed at the end of every step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FluidStats {
    /// Mean per-cell max channel value, after clamping to `[0, 1]`
    pub avg_density: f32,
    /// Mean squared velocity magnitude
    pub avg_speed: f32,
    /// `1 / (1 + mean squared deviation)`, in `(0, 1]`
    pub uniformity: f32,
}

impl Default for FluidStats {
    fn default() -> Self {
        Self {
            avg_density: 0.0,
            avg_speed: 0.0,
            uniformity: 1.0,
        }
    }
}

/// Running sums behind [`FluidStats`].
///
/// Deviation is taken against the running density sum at the time each cell
/// is visited, which is what existing renderers were tuned against.
#[derive(Debug, Default)]
struct StatsAccumulator {
    density_sum: f32,
    speed_sum: f32,
    deviation_sum: f32,
}

impl StatsAccumulator {
    #[inline]
    fn push(&mut self, density: f32, speed_sq: f32) {
        self.speed_sum += speed_sq;
        self.density_sum += density;
        let deviation = density - self.density_sum;
        self.deviation_sum += deviation * deviation;
    }

    fn finish(self, num_cells: usize) -> FluidStats {
        let inv = 1.0 / num_cells as f32;
        FluidStats {
            avg_density: self.density_sum * inv,
            avg_speed: self.speed_sum * inv,
            uniformity: 1.0 / (1.0 + self.deviation_sum * inv),
        }
    }
}

#[inline]
fn snap(value: f32) -> f32 {
    if value.abs() < ZERO_THRESHOLD {
        0.0
    } else {
        value
    }
}

/// Decay color by `fade_speed`, clear staging buffers and return fresh stats.
///
/// `fade_speed` is expected in `[0, 1]`. When `snap_curl` is set the curl
/// buffer is flushed along with the velocity.
pub fn fade(store: &mut FieldStore, fade_speed: f32, snap_curl: bool) -> FluidStats {
    let hold = 1.0 - fade_speed;
    let num_cells = store.dims().num_cells();
    let mut stats = StatsAccumulator::default();

    for idx in (0..num_cells).rev() {
        store.u_old[idx] = 0.0;
        store.v_old[idx] = 0.0;

        let u = store.u[idx];
        let v = store.v[idx];

        let mut density = 0.0_f32;
        for channel in &mut store.colors {
            channel.staging[idx] = 0.0;
            let clamped = channel.value[idx].clamp(0.0, 1.0);
            density = density.max(clamped);
            channel.value[idx] = snap(clamped * hold);
        }
        stats.push(density, u * u + v * v);

        store.u[idx] = snap(u);
        store.v[idx] = snap(v);
        if snap_curl {
            store.curl[idx] = snap(store.curl[idx]);
        }
    }

    stats.finish(num_cells)
}

/// Statistics of the current fields without modifying them.
pub fn measure(store: &FieldStore) -> FluidStats {
    let num_cells = store.dims().num_cells();
    let mut stats = StatsAccumulator::default();

    for idx in (0..num_cells).rev() {
        let density = store
            .colors
            .iter()
            .map(|channel| channel.value[idx].clamp(0.0, 1.0))
            .fold(0.0_f32, f32::max);
        let (u, v) = (store.u[idx], store.v[idx]);
        stats.push(density, u * u + v * v);
    }

    stats.finish(num_cells)
}
