//! Padded grid geometry
//!
//! The solver works on an `nx` x `ny` interior surrounded by a one-cell border
//! ring, so every field holds `(nx + 2) * (ny + 2)` values laid out row-major
//! with `i` varying fastest.

use serde::{Deserialize, Serialize};

use crate::error::FluidError;

/// Interior cell counts of a padded simulation grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridDimensions {
    nx: usize,
    ny: usize,
}

impl GridDimensions {
    /// Create grid dimensions for an `nx` x `ny` interior.
    ///
    /// # Errors
    ///
    /// Returns [`FluidError::InvalidDimensions`] when either axis is zero or
    /// the padded cell count does not fit in `usize`.
    pub fn new(nx: usize, ny: usize) -> Result<Self, FluidError> {
        if nx == 0 || ny == 0 {
            return Err(FluidError::InvalidDimensions { nx, ny });
        }
        let padded = nx
            .checked_add(2)
            .zip(ny.checked_add(2))
            .and_then(|(w, h)| w.checked_mul(h));
        if padded.is_none() {
            return Err(FluidError::InvalidDimensions { nx, ny });
        }
        Ok(Self { nx, ny })
    }

    /// Interior cells along x
    #[inline]
    pub const fn nx(&self) -> usize {
        self.nx
    }

    /// Interior cells along y
    #[inline]
    pub const fn ny(&self) -> usize {
        self.ny
    }

    /// Padded width (`nx + 2`)
    #[inline]
    pub const fn width(&self) -> usize {
        self.nx + 2
    }

    /// Padded height (`ny + 2`)
    #[inline]
    pub const fn height(&self) -> usize {
        self.ny + 2
    }

    /// Total padded cell count
    #[inline]
    pub const fn num_cells(&self) -> usize {
        self.width() * self.height()
    }

    /// Flat index of padded cell `(i, j)`.
    #[inline]
    pub const fn index(&self, i: usize, j: usize) -> usize {
        i + self.width() * j
    }

    /// Whether `(i, j)` addresses a cell of the padded grid.
    pub fn contains(&self, i: i32, j: i32) -> bool {
        i >= 0 && j >= 0 && (i as usize) < self.width() && (j as usize) < self.height()
    }

    /// Clamp signed cell coordinates into the padded range `[0, n + 1]`.
    pub fn clamp_cell(&self, i: i32, j: i32) -> (usize, usize) {
        let ci = i64::from(i).clamp(0, (self.nx + 1) as i64) as usize;
        let cj = i64::from(j).clamp(0, (self.ny + 1) as i64) as usize;
        (ci, cj)
    }

    /// Clamp signed cell coordinates into the interior range `[1, n]`.
    pub fn clamp_interior(&self, i: i32, j: i32) -> (usize, usize) {
        let ci = i64::from(i).clamp(1, self.nx as i64) as usize;
        let cj = i64::from(j).clamp(1, self.ny as i64) as usize;
        (ci, cj)
    }

    /// Map a normalized position in `[0, 1]` to an interior cell.
    ///
    /// Uses `floor(x * nx) + 1` clamped to `[1, nx]`; out-of-range and NaN
    /// inputs land on the nearest edge cell.
    pub fn cell_for_normalized(&self, x: f32, y: f32) -> (usize, usize) {
        (
            Self::normalized_axis(x, self.nx),
            Self::normalized_axis(y, self.ny),
        )
    }

    /// Flat index of the interior cell under a normalized position.
    pub fn index_for_normalized(&self, x: f32, y: f32) -> usize {
        let (i, j) = self.cell_for_normalized(x, y);
        self.index(i, j)
    }

    fn normalized_axis(t: f32, n: usize) -> usize {
        // float -> int casts saturate and map NaN to 0
        let cell = ((t * n as f32).floor() as i64).saturating_add(1);
        cell.clamp(1, n as i64) as usize
    }
}
