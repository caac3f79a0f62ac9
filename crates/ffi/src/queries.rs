use fluid_sim_core::simulation::export;
use fluid_sim_core::{CellSample, FluidSolver};

use crate::error::{DefaultFluidSimError, FluidSimErrorCode};
use crate::helpers::{result_code, track_error, with_solver};
use crate::instance::FluidSimInstance;

#[repr(C)]
/// FFI-friendly snapshot of one grid cell.
/// Keep this layout stable for C/C++/C# consumers.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FluidCellInfo {
    /// Horizontal velocity.
    pub velocity_x: f32,
    /// Vertical velocity.
    pub velocity_y: f32,
    /// Red channel (grey value on mono grids).
    pub red: f32,
    /// Green channel (grey value on mono grids).
    pub green: f32,
    /// Blue channel (grey value on mono grids).
    pub blue: f32,
}

impl From<CellSample> for FluidCellInfo {
    fn from(sample: CellSample) -> Self {
        Self {
            velocity_x: sample.velocity.x,
            velocity_y: sample.velocity.y,
            red: sample.color.x,
            green: sample.color.y,
            blue: sample.color.z,
        }
    }
}

#[repr(C)]
/// Whole-grid statistics from the last step.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FluidSimStats {
    /// Mean per-cell max channel value.
    pub avg_density: f32,
    /// Mean squared speed.
    pub avg_speed: f32,
    /// Density uniformity in (0, 1].
    pub uniformity: f32,
    /// Steps since creation or the last reset.
    pub step_count: u64,
    /// Wall-clock duration of the last step in milliseconds.
    pub last_step_ms: f64,
}

impl From<&FluidSolver> for FluidSimStats {
    fn from(solver: &FluidSolver) -> Self {
        let stats = solver.stats();
        Self {
            avg_density: stats.avg_density,
            avg_speed: stats.avg_speed,
            uniformity: stats.uniformity,
            step_count: solver.step_count(),
            last_step_ms: solver.last_step_ms(),
        }
    }
}

/// Sample velocity and color at normalized position `(x, y)`.
///
/// Returns `FluidSimErrorCode::NullPointer` if `instance` or `out_info` is null.
///
/// # Safety
/// - `instance` must be null or a live pointer returned by `fluid_sim_new`.
/// - `out_info` must be null or point to writable memory for one `FluidCellInfo`.
#[no_mangle]
pub unsafe extern "C" fn fluid_sim_get_info_at_pos(
    instance: *const FluidSimInstance,
    x: f32,
    y: f32,
    out_info: *mut FluidCellInfo,
) -> FluidSimErrorCode {
    if out_info.is_null() {
        return track_error(&DefaultFluidSimError::null_pointer("out_info"));
    }

    result_code(unsafe {
        with_solver(instance, |solver| {
            let info = FluidCellInfo::from(solver.info_at_pos(x, y));
            *out_info = info;
            Ok(())
        })
    })
}

/// Sample velocity and color at cell `(i, j)`, clamped into the padded grid.
///
/// # Safety
/// - `instance` must be null or a live pointer returned by `fluid_sim_new`.
/// - `out_info` must be null or point to writable memory for one `FluidCellInfo`.
#[no_mangle]
pub unsafe extern "C" fn fluid_sim_get_info_at_cell(
    instance: *const FluidSimInstance,
    i: i32,
    j: i32,
    out_info: *mut FluidCellInfo,
) -> FluidSimErrorCode {
    if out_info.is_null() {
        return track_error(&DefaultFluidSimError::null_pointer("out_info"));
    }

    result_code(unsafe {
        with_solver(instance, |solver| {
            let info = FluidCellInfo::from(solver.info_at_cell(i, j));
            *out_info = info;
            Ok(())
        })
    })
}

/// Read statistics from the last step.
///
/// # Safety
/// - `instance` must be null or a live pointer returned by `fluid_sim_new`.
/// - `out_stats` must be null or point to writable memory for one `FluidSimStats`.
#[no_mangle]
pub unsafe extern "C" fn fluid_sim_get_stats(
    instance: *const FluidSimInstance,
    out_stats: *mut FluidSimStats,
) -> FluidSimErrorCode {
    if out_stats.is_null() {
        return track_error(&DefaultFluidSimError::null_pointer("out_stats"));
    }

    result_code(unsafe {
        with_solver(instance, |solver| {
            *out_stats = FluidSimStats::from(solver);
            Ok(())
        })
    })
}

/// Read the interior grid size.
///
/// # Safety
/// - `instance` must be null or a live pointer returned by `fluid_sim_new`.
/// - `out_nx` and `out_ny` must be null or point to writable `u32`s.
#[no_mangle]
pub unsafe extern "C" fn fluid_sim_get_dimensions(
    instance: *const FluidSimInstance,
    out_nx: *mut u32,
    out_ny: *mut u32,
) -> FluidSimErrorCode {
    if out_nx.is_null() {
        return track_error(&DefaultFluidSimError::null_pointer("out_nx"));
    }
    if out_ny.is_null() {
        return track_error(&DefaultFluidSimError::null_pointer("out_ny"));
    }

    result_code(unsafe {
        with_solver(instance, |solver| {
            *out_nx = solver.nx() as u32;
            *out_ny = solver.ny() as u32;
            Ok(())
        })
    })
}

/// Copy the interior color field as RGBA8 (`nx * ny * 4` bytes, row-major,
/// alpha 255) into `out_pixels`.
///
/// Returns `FluidSimErrorCode::BufferTooSmall` if `len` is too small; nothing
/// is written in that case.
///
/// # Safety
/// - `instance` must be null or a live pointer returned by `fluid_sim_new`.
/// - `out_pixels` must be null or point to `len` writable bytes.
#[no_mangle]
pub unsafe extern "C" fn fluid_sim_copy_rgba8(
    instance: *const FluidSimInstance,
    out_pixels: *mut u8,
    len: usize,
) -> FluidSimErrorCode {
    if out_pixels.is_null() {
        return track_error(&DefaultFluidSimError::null_pointer("out_pixels"));
    }

    result_code(unsafe {
        with_solver(instance, |solver| {
            // SAFETY: caller guarantees `len` writable bytes at `out_pixels`.
            let pixels = std::slice::from_raw_parts_mut(out_pixels, len);
            export::write_rgba8(solver, pixels)?;
            Ok(())
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::fluid_sim_get_last_error_code;
    use crate::injection::{fluid_sim_add_color_at_pos, fluid_sim_add_force_at_pos};
    use crate::instance::{fluid_sim_config_default, fluid_sim_destroy, fluid_sim_new, FluidSimConfig};
    use crate::simulation::{
        fluid_sim_set_color_diffusion, fluid_sim_set_delta_t, fluid_sim_set_viscosity,
        fluid_sim_update,
    };
    use std::ptr;

    fn create(nx: u32, ny: u32) -> *mut FluidSimInstance {
        let mut sim: *mut FluidSimInstance = ptr::null_mut();
        let config = FluidSimConfig {
            nx,
            ny,
            dt: 0.1,
            viscosity: 0.0,
            fade_speed: 0.0,
            ..fluid_sim_config_default()
        };
        let code = unsafe { fluid_sim_new(config, &mut sim) };
        assert_eq!(code, FluidSimErrorCode::Ok);
        sim
    }

    #[test]
    fn test_step_and_query_through_c_api() {
        let sim = create(10, 10);
        unsafe {
            assert_eq!(
                fluid_sim_add_force_at_pos(sim, 0.5, 0.5, 1.0, 0.0),
                FluidSimErrorCode::Ok
            );
            assert_eq!(
                fluid_sim_add_color_at_pos(sim, 0.5, 0.5, 1.0, 0.0, 0.0),
                FluidSimErrorCode::Ok
            );
            assert_eq!(fluid_sim_update(sim), FluidSimErrorCode::Ok);

            let mut info = FluidCellInfo::default();
            assert_eq!(
                fluid_sim_get_info_at_pos(sim, 0.5, 0.5, &mut info),
                FluidSimErrorCode::Ok
            );
            assert!(info.velocity_x > 0.0);
            assert!(info.red > 0.0);

            let mut stats = FluidSimStats::default();
            assert_eq!(fluid_sim_get_stats(sim, &mut stats), FluidSimErrorCode::Ok);
            assert_eq!(stats.step_count, 1);
            assert!(stats.avg_density > 0.0);

            fluid_sim_destroy(sim);
        }
    }

    #[test]
    fn test_dimensions_and_rgba_copy() {
        let sim = create(4, 3);
        unsafe {
            let (mut nx, mut ny) = (0u32, 0u32);
            assert_eq!(
                fluid_sim_get_dimensions(sim, &mut nx, &mut ny),
                FluidSimErrorCode::Ok
            );
            assert_eq!((nx, ny), (4, 3));

            let mut small = [0u8; 8];
            assert_eq!(
                fluid_sim_copy_rgba8(sim, small.as_mut_ptr(), small.len()),
                FluidSimErrorCode::BufferTooSmall
            );

            let mut pixels = vec![0u8; 48];
            assert_eq!(
                fluid_sim_copy_rgba8(sim, pixels.as_mut_ptr(), pixels.len()),
                FluidSimErrorCode::Ok
            );
            assert_eq!(fluid_sim_get_last_error_code(), FluidSimErrorCode::Ok);
            assert!(pixels.chunks_exact(4).all(|px| px == [0, 0, 0, 255]));

            fluid_sim_destroy(sim);
        }
    }

    #[test]
    fn test_null_pointers_and_bad_values_are_reported() {
        let sim = create(4, 4);
        unsafe {
            let mut info = FluidCellInfo::default();
            assert_eq!(
                fluid_sim_get_info_at_cell(ptr::null(), 1, 1, &mut info),
                FluidSimErrorCode::NullPointer
            );
            assert_eq!(
                fluid_sim_get_info_at_cell(sim, 1, 1, ptr::null_mut()),
                FluidSimErrorCode::NullPointer
            );
            assert_eq!(fluid_sim_update(ptr::null_mut()), FluidSimErrorCode::NullPointer);
            assert_eq!(
                fluid_sim_set_viscosity(sim, f32::NAN),
                FluidSimErrorCode::InvalidParameter
            );
            assert_eq!(
                fluid_sim_get_last_error_code(),
                FluidSimErrorCode::InvalidParameter
            );
            assert_eq!(
                fluid_sim_set_delta_t(sim, -0.1),
                FluidSimErrorCode::InvalidParameter
            );
            assert_eq!(
                fluid_sim_set_color_diffusion(sim, f32::INFINITY),
                FluidSimErrorCode::InvalidParameter
            );
            assert_eq!(fluid_sim_update(sim), FluidSimErrorCode::Ok);
            assert_eq!(
                fluid_sim_get_info_at_cell(sim, 1, 1, &mut info),
                FluidSimErrorCode::Ok
            );
            assert!(info.velocity_x.is_finite());

            fluid_sim_destroy(sim);
        }
    }
}
