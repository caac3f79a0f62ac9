//! Field storage for the fluid grid
//!
//! Every quantity has a live buffer and a staging buffer of the same padded
//! size. Between ticks the staging buffers accumulate user-injected sources;
//! during a tick they double as scratch space for the kernels.

use serde::{Deserialize, Serialize};

use super::GridDimensions;
use crate::core_types::{Vec2, Vec3};

/// Number of color channels carried by the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Single density channel, reported as grey
    Mono,
    /// Independent red, green and blue channels
    #[default]
    Rgb,
}

impl ColorMode {
    /// Number of channel buffers this mode needs
    pub const fn channel_count(self) -> usize {
        match self {
            ColorMode::Mono => 1,
            ColorMode::Rgb => 3,
        }
    }

    /// Mode for a boolean RGB switch
    pub const fn from_rgb(rgb: bool) -> Self {
        if rgb {
            ColorMode::Rgb
        } else {
            ColorMode::Mono
        }
    }
}

/// Live and staging buffers for one color channel.
#[derive(Debug, Clone)]
pub struct ColorChannel {
    pub(crate) value: Vec<f32>,
    pub(crate) staging: Vec<f32>,
}

impl ColorChannel {
    fn new(num_cells: usize) -> Self {
        Self {
            value: vec![0.0; num_cells],
            staging: vec![0.0; num_cells],
        }
    }

    /// Live channel values
    pub fn values(&self) -> &[f32] {
        &self.value
    }

    /// Pending sources (or scratch during a tick)
    pub fn staging(&self) -> &[f32] {
        &self.staging
    }

    pub(crate) fn swap(&mut self) {
        std::mem::swap(&mut self.value, &mut self.staging);
    }
}

/// Velocity and color sampled at one cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellSample {
    /// Velocity `(u, v)`
    pub velocity: Vec2,
    /// Color; mono grids report `(d, d, d)`
    pub color: Vec3,
}

/// All per-cell arrays of the solver.
#[derive(Debug, Clone)]
pub struct FieldStore {
    dims: GridDimensions,
    mode: ColorMode,
    pub(crate) u: Vec<f32>,
    pub(crate) v: Vec<f32>,
    pub(crate) u_old: Vec<f32>,
    pub(crate) v_old: Vec<f32>,
    pub(crate) colors: Vec<ColorChannel>,
    pub(crate) curl: Vec<f32>,
}

impl FieldStore {
    /// Allocate zeroed fields for the given grid and color mode.
    pub fn new(dims: GridDimensions, mode: ColorMode) -> Self {
        let n = dims.num_cells();
        Self {
            dims,
            mode,
            u: vec![0.0; n],
            v: vec![0.0; n],
            u_old: vec![0.0; n],
            v_old: vec![0.0; n],
            colors: (0..mode.channel_count())
                .map(|_| ColorChannel::new(n))
                .collect(),
            curl: vec![0.0; n],
        }
    }

    /// Grid geometry
    pub fn dims(&self) -> GridDimensions {
        self.dims
    }

    /// Current color mode
    pub fn color_mode(&self) -> ColorMode {
        self.mode
    }

    /// Zero every array.
    pub fn clear(&mut self) {
        for field in [
            &mut self.u,
            &mut self.v,
            &mut self.u_old,
            &mut self.v_old,
            &mut self.curl,
        ] {
            field.fill(0.0);
        }
        for channel in &mut self.colors {
            channel.value.fill(0.0);
            channel.staging.fill(0.0);
        }
    }

    /// Switch color mode, discarding existing color content.
    pub fn set_color_mode(&mut self, mode: ColorMode) {
        let n = self.dims.num_cells();
        self.mode = mode;
        self.colors = (0..mode.channel_count())
            .map(|_| ColorChannel::new(n))
            .collect();
    }

    /// Horizontal velocity
    pub fn u(&self) -> &[f32] {
        &self.u
    }

    /// Vertical velocity
    pub fn v(&self) -> &[f32] {
        &self.v
    }

    /// Pending horizontal forces
    pub fn u_old(&self) -> &[f32] {
        &self.u_old
    }

    /// Pending vertical forces
    pub fn v_old(&self) -> &[f32] {
        &self.v_old
    }

    /// Color channels (one for mono, three for RGB)
    pub fn channels(&self) -> &[ColorChannel] {
        &self.colors
    }

    /// |curl| from the last vorticity pass
    pub fn curl(&self) -> &[f32] {
        &self.curl
    }

    /// Velocity at a flat index
    #[inline]
    pub fn velocity(&self, idx: usize) -> Vec2 {
        Vec2::new(self.u[idx], self.v[idx])
    }

    /// Color at a flat index
    #[inline]
    pub fn color(&self, idx: usize) -> Vec3 {
        match self.colors.as_slice() {
            [r, g, b] => Vec3::new(r.value[idx], g.value[idx], b.value[idx]),
            [d] => Vec3::repeat(d.value[idx]),
            _ => Vec3::zeros(),
        }
    }

    /// Velocity and color at a flat index
    pub fn sample(&self, idx: usize) -> CellSample {
        CellSample {
            velocity: self.velocity(idx),
            color: self.color(idx),
        }
    }

    /// Accumulate a force into the staging velocity. Cells outside the
    /// padded grid are ignored.
    pub fn add_force(&mut self, i: i32, j: i32, force: Vec2) {
        if let Some(idx) = self.checked_index(i, j) {
            self.u_old[idx] += force.x;
            self.v_old[idx] += force.y;
        }
    }

    /// Accumulate color into the staging channels. Mono grids take the red
    /// component. Cells outside the padded grid are ignored.
    pub fn add_color(&mut self, i: i32, j: i32, color: Vec3) {
        if let Some(idx) = self.checked_index(i, j) {
            for (channel, amount) in self.colors.iter_mut().zip(color.iter()) {
                channel.staging[idx] += amount;
            }
        }
    }

    /// Accumulate a scalar into every staging channel.
    pub fn add_intensity(&mut self, i: i32, j: i32, amount: f32) {
        if let Some(idx) = self.checked_index(i, j) {
            for channel in &mut self.colors {
                channel.staging[idx] += amount;
            }
        }
    }

    pub(crate) fn swap_velocity(&mut self) {
        std::mem::swap(&mut self.u, &mut self.u_old);
        std::mem::swap(&mut self.v, &mut self.v_old);
    }

    fn checked_index(&self, i: i32, j: i32) -> Option<usize> {
        self.dims
            .contains(i, j)
            .then(|| self.dims.index(i as usize, j as usize))
    }
}
