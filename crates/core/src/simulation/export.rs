//! Field export for renderers
//!
//! Converts the interior of the grid into pixel buffers. The border ring is
//! never exported.

use super::FluidSolver;
use crate::error::FluidError;
use crate::grid::CellSample;

/// Bytes needed by [`write_rgba8`] for an `nx` x `ny` interior.
pub fn rgba8_len(nx: usize, ny: usize) -> usize {
    nx * ny * 4
}

/// Interior cell samples in row-major order (`i` fastest, `j = 1` first).
///
/// Mono grids yield grey colors, so consumers need not care about the
/// color mode.
pub fn interior_samples(solver: &FluidSolver) -> impl Iterator<Item = CellSample> + '_ {
    let dims = solver.dims();
    (1..=dims.ny()).flat_map(move |j| {
        (1..=dims.nx()).map(move |i| solver.store().sample(dims.index(i, j)))
    })
}

/// Write the interior color field as RGBA8 (alpha 255) into `out`.
///
/// # Errors
///
/// Returns [`FluidError::BufferTooSmall`] when `out` holds fewer than
/// [`rgba8_len`] bytes.
pub fn write_rgba8(solver: &FluidSolver, out: &mut [u8]) -> Result<(), FluidError> {
    let required = rgba8_len(solver.nx(), solver.ny());
    if out.len() < required {
        return Err(FluidError::BufferTooSmall {
            required,
            provided: out.len(),
        });
    }

    for (pixel, sample) in out.chunks_exact_mut(4).zip(interior_samples(solver)) {
        pixel[0] = to_u8(sample.color.x);
        pixel[1] = to_u8(sample.color.y);
        pixel[2] = to_u8(sample.color.z);
        pixel[3] = u8::MAX;
    }
    Ok(())
}

#[inline]
fn to_u8(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}
