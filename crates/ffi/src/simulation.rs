//! Stepping and configuration entry points.
//!
//! Every function takes the exclusive lock on the instance. All of them return
//! `FluidSimErrorCode::NullPointer` for a null instance and
//! `FluidSimErrorCode::LockPoisoned` if a previous caller panicked while
//! holding the lock.
//!
//! # Safety (applies to every function in this module)
//! `instance` must be null or a live pointer returned by `fluid_sim_new`.

use crate::error::{DefaultFluidSimError, FluidSimErrorCode};
use crate::helpers::{result_code, with_solver_mut};
use crate::instance::FluidSimInstance;

/// Advance the simulation by one time step.
///
/// # Safety
/// See the module documentation.
#[no_mangle]
pub unsafe extern "C" fn fluid_sim_update(instance: *mut FluidSimInstance) -> FluidSimErrorCode {
    result_code(unsafe {
        with_solver_mut(instance, |solver| {
            solver.update();
            Ok(())
        })
    })
}

/// Zero all fields and statistics and re-seed the color generator.
///
/// # Safety
/// See the module documentation.
#[no_mangle]
pub unsafe extern "C" fn fluid_sim_reset(instance: *mut FluidSimInstance) -> FluidSimErrorCode {
    result_code(unsafe {
        with_solver_mut(instance, |solver| {
            solver.reset();
            Ok(())
        })
    })
}

/// Fill every color channel with uniform noise and refresh statistics.
///
/// # Safety
/// See the module documentation.
#[no_mangle]
pub unsafe extern "C" fn fluid_sim_randomize_color(
    instance: *mut FluidSimInstance,
) -> FluidSimErrorCode {
    result_code(unsafe {
        with_solver_mut(instance, |solver| {
            solver.randomize_color();
            Ok(())
        })
    })
}

/// Reallocate the grid at `nx` x `ny`. All field content is lost.
///
/// Returns `FluidSimErrorCode::InvalidDimensions` when either axis is zero.
///
/// # Safety
/// See the module documentation.
#[no_mangle]
pub unsafe extern "C" fn fluid_sim_resize(
    instance: *mut FluidSimInstance,
    nx: u32,
    ny: u32,
) -> FluidSimErrorCode {
    result_code(unsafe {
        with_solver_mut(instance, |solver| {
            solver.set_size(nx as usize, ny as usize)?;
            Ok(())
        })
    })
}

/// Set the velocity diffusion coefficient (finite, >= 0).
///
/// # Safety
/// See the module documentation.
#[no_mangle]
pub unsafe extern "C" fn fluid_sim_set_viscosity(
    instance: *mut FluidSimInstance,
    viscosity: f32,
) -> FluidSimErrorCode {
    result_code(unsafe {
        with_solver_mut(instance, |solver| {
            solver.set_viscosity(viscosity)?;
            Ok(())
        })
    })
}

/// Set the color diffusion coefficient (finite, >= 0; 0 disables it).
///
/// # Safety
/// See the module documentation.
#[no_mangle]
pub unsafe extern "C" fn fluid_sim_set_color_diffusion(
    instance: *mut FluidSimInstance,
    diffusion: f32,
) -> FluidSimErrorCode {
    result_code(unsafe {
        with_solver_mut(instance, |solver| {
            solver.set_color_diffusion(diffusion)?;
            Ok(())
        })
    })
}

/// Set the time step (finite, >= 0).
///
/// # Safety
/// See the module documentation.
#[no_mangle]
pub unsafe extern "C" fn fluid_sim_set_delta_t(
    instance: *mut FluidSimInstance,
    dt: f32,
) -> FluidSimErrorCode {
    result_code(unsafe {
        with_solver_mut(instance, |solver| {
            solver.set_delta_t(dt)?;
            Ok(())
        })
    })
}

/// Set the per-step color fade. Values are clamped to [0, 1]; NaN is rejected.
///
/// # Safety
/// See the module documentation.
#[no_mangle]
pub unsafe extern "C" fn fluid_sim_set_fade_speed(
    instance: *mut FluidSimInstance,
    fade_speed: f32,
) -> FluidSimErrorCode {
    result_code(unsafe {
        with_solver_mut(instance, |solver| {
            if fade_speed.is_nan() {
                return Err(DefaultFluidSimError::invalid_parameter("fade_speed", fade_speed));
            }
            solver.set_fade_speed(fade_speed);
            Ok(())
        })
    })
}

/// Set the number of Gauss-Seidel sweeps per linear solve.
///
/// # Safety
/// See the module documentation.
#[no_mangle]
pub unsafe extern "C" fn fluid_sim_set_solver_iterations(
    instance: *mut FluidSimInstance,
    iterations: u32,
) -> FluidSimErrorCode {
    result_code(unsafe {
        with_solver_mut(instance, |solver| {
            solver.set_solver_iterations(iterations as usize);
            Ok(())
        })
    })
}

/// Set wrap-around per axis.
///
/// # Safety
/// See the module documentation.
#[no_mangle]
pub unsafe extern "C" fn fluid_sim_set_wrap(
    instance: *mut FluidSimInstance,
    wrap_x: bool,
    wrap_y: bool,
) -> FluidSimErrorCode {
    result_code(unsafe {
        with_solver_mut(instance, |solver| {
            solver.set_wrap(wrap_x, wrap_y);
            Ok(())
        })
    })
}

/// Turn vorticity confinement on or off.
///
/// # Safety
/// See the module documentation.
#[no_mangle]
pub unsafe extern "C" fn fluid_sim_enable_vorticity_confinement(
    instance: *mut FluidSimInstance,
    enabled: bool,
) -> FluidSimErrorCode {
    result_code(unsafe {
        with_solver_mut(instance, |solver| {
            solver.enable_vorticity_confinement(enabled);
            Ok(())
        })
    })
}

/// Switch between RGB and single-channel color. Changing the mode clears color.
///
/// # Safety
/// See the module documentation.
#[no_mangle]
pub unsafe extern "C" fn fluid_sim_enable_rgb(
    instance: *mut FluidSimInstance,
    rgb: bool,
) -> FluidSimErrorCode {
    result_code(unsafe {
        with_solver_mut(instance, |solver| {
            solver.enable_rgb(rgb);
            Ok(())
        })
    })
}
