//! Force and color injection.
//!
//! Injections are staged and consumed by the next `fluid_sim_update`.
//! Normalized positions are clamped onto the nearest interior cell; cell
//! coordinates outside the padded grid are silently dropped.

use fluid_sim_core::{Vec2, Vec3};

use crate::error::FluidSimErrorCode;
use crate::helpers::{result_code, with_solver_mut};
use crate::instance::FluidSimInstance;

/// Stage a force at normalized position `(x, y)`.
///
/// # Safety
/// `instance` must be null or a live pointer returned by `fluid_sim_new`.
#[no_mangle]
pub unsafe extern "C" fn fluid_sim_add_force_at_pos(
    instance: *mut FluidSimInstance,
    x: f32,
    y: f32,
    force_x: f32,
    force_y: f32,
) -> FluidSimErrorCode {
    result_code(unsafe {
        with_solver_mut(instance, |solver| {
            solver.add_force_at_pos(Vec2::new(x, y), Vec2::new(force_x, force_y));
            Ok(())
        })
    })
}

/// Stage a force at cell `(i, j)`.
///
/// # Safety
/// `instance` must be null or a live pointer returned by `fluid_sim_new`.
#[no_mangle]
pub unsafe extern "C" fn fluid_sim_add_force_at_cell(
    instance: *mut FluidSimInstance,
    i: i32,
    j: i32,
    force_x: f32,
    force_y: f32,
) -> FluidSimErrorCode {
    result_code(unsafe {
        with_solver_mut(instance, |solver| {
            solver.add_force_at_cell(i, j, Vec2::new(force_x, force_y));
            Ok(())
        })
    })
}

/// Stage color at normalized position `(x, y)`. Mono grids use `r`.
///
/// # Safety
/// `instance` must be null or a live pointer returned by `fluid_sim_new`.
#[no_mangle]
pub unsafe extern "C" fn fluid_sim_add_color_at_pos(
    instance: *mut FluidSimInstance,
    x: f32,
    y: f32,
    r: f32,
    g: f32,
    b: f32,
) -> FluidSimErrorCode {
    result_code(unsafe {
        with_solver_mut(instance, |solver| {
            solver.add_color_at_pos(Vec2::new(x, y), Vec3::new(r, g, b));
            Ok(())
        })
    })
}

/// Stage color at cell `(i, j)`. Mono grids use `r`.
///
/// # Safety
/// `instance` must be null or a live pointer returned by `fluid_sim_new`.
#[no_mangle]
pub unsafe extern "C" fn fluid_sim_add_color_at_cell(
    instance: *mut FluidSimInstance,
    i: i32,
    j: i32,
    r: f32,
    g: f32,
    b: f32,
) -> FluidSimErrorCode {
    result_code(unsafe {
        with_solver_mut(instance, |solver| {
            solver.add_color_at_cell(i, j, Vec3::new(r, g, b));
            Ok(())
        })
    })
}
