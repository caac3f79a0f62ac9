use fluid_sim_core::{ColorMode, FluidParams, FluidSolver};
use std::ptr;
use std::sync::RwLock;

use crate::error::{DefaultFluidSimError, FluidSimErrorCode};
use crate::helpers::{track_error, track_result};

/// Creation parameters for a fluid simulation.
///
/// Start from `fluid_sim_config_default()` and override the fields you need.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
#[expect(clippy::struct_excessive_bools)]
pub struct FluidSimConfig {
    /// Interior cells along x (must be >= 1).
    pub nx: u32,
    /// Interior cells along y (must be >= 1).
    pub ny: u32,
    /// Time step per update.
    pub dt: f32,
    /// Velocity diffusion coefficient.
    pub viscosity: f32,
    /// Color diffusion coefficient (0 disables color diffusion).
    pub color_diffusion: f32,
    /// Fraction of color removed per step, in [0, 1].
    pub fade_speed: f32,
    /// Gauss-Seidel sweeps per linear solve.
    pub solver_iterations: u32,
    /// Three color channels (true) or one grey channel (false).
    pub rgb: bool,
    /// Enable vorticity confinement.
    pub vorticity_confinement: bool,
    /// Connect the left and right walls.
    pub wrap_x: bool,
    /// Connect the top and bottom walls.
    pub wrap_y: bool,
    /// Use `seed` for color randomization instead of OS entropy.
    pub has_seed: bool,
    /// Seed for color randomization, read only when `has_seed` is set.
    pub seed: u64,
}

impl From<&FluidSimConfig> for FluidParams {
    fn from(config: &FluidSimConfig) -> Self {
        Self {
            nx: config.nx as usize,
            ny: config.ny as usize,
            dt: config.dt,
            viscosity: config.viscosity,
            color_diffusion: config.color_diffusion,
            fade_speed: config.fade_speed,
            solver_iterations: config.solver_iterations as usize,
            color_mode: ColorMode::from_rgb(config.rgb),
            vorticity_confinement: config.vorticity_confinement,
            wrap_x: config.wrap_x,
            wrap_y: config.wrap_y,
            seed: config.has_seed.then_some(config.seed),
        }
    }
}

impl From<&FluidParams> for FluidSimConfig {
    fn from(params: &FluidParams) -> Self {
        Self {
            nx: params.nx as u32,
            ny: params.ny as u32,
            dt: params.dt,
            viscosity: params.viscosity,
            color_diffusion: params.color_diffusion,
            fade_speed: params.fade_speed,
            solver_iterations: params.solver_iterations as u32,
            rgb: params.color_mode == ColorMode::Rgb,
            vorticity_confinement: params.vorticity_confinement,
            wrap_x: params.wrap_x,
            wrap_y: params.wrap_y,
            has_seed: params.seed.is_some(),
            seed: params.seed.unwrap_or(0),
        }
    }
}

/// Default creation parameters: 100x100 RGB grid, dt 0.04, viscosity 0.0001,
/// fade 0.03, 10 solver iterations, no vorticity, no wrap.
#[no_mangle]
pub extern "C" fn fluid_sim_config_default() -> FluidSimConfig {
    FluidSimConfig::from(&FluidParams::default())
}

/// Opaque fluid simulation handle.
///
/// # Thread Safety
/// The solver is protected by an `RwLock`: queries take a shared `.read()`
/// lock and can run concurrently, while updates, injections and setters take
/// an exclusive `.write()` lock. A single step never runs on more than one
/// thread.
pub struct FluidSimInstance {
    pub(crate) solver: RwLock<FluidSolver>,
}

impl FluidSimInstance {
    /// Creates a new instance from a creation config.
    ///
    /// # Errors
    ///
    /// Returns `FluidSimErrorCode::InvalidDimensions` for an empty grid and
    /// `FluidSimErrorCode::InvalidParameter` for out-of-range scalars.
    pub(crate) fn new(config: &FluidSimConfig) -> Result<Box<Self>, DefaultFluidSimError> {
        let solver = FluidSolver::new(FluidParams::from(config))?;
        Ok(Box::new(Self {
            solver: RwLock::new(solver),
        }))
    }
}

/// Create a new fluid simulation and return it via out-parameter.
///
/// Returns
/// - `FluidSimErrorCode::Ok` (0): success, `out_instance` contains valid pointer
/// - `FluidSimErrorCode::NullPointer`: `out_instance` is null
/// - `FluidSimErrorCode::InvalidDimensions`: `nx` or `ny` is zero
/// - `FluidSimErrorCode::InvalidParameter`: a scalar is non-finite or out of range
///
/// On failure `out_instance` is set to null; call `fluid_sim_get_last_error()`
/// for a description.
///
/// # Safety
///
/// - `out_instance` must be a valid, non-null pointer to writable memory.
/// - The caller takes ownership of the returned instance and MUST call
///   `fluid_sim_destroy` exactly once.
///
/// Example (C)
/// ```c
/// FluidSimInstance* sim = NULL;
/// FluidSimConfig config = fluid_sim_config_default();
/// config.nx = 128;
/// config.ny = 128;
/// if (fluid_sim_new(config, &sim) != Ok) {
///     fprintf(stderr, "%s\n", fluid_sim_get_last_error());
///     return;
/// }
/// // ... use sim ...
/// fluid_sim_destroy(sim);
/// ```
#[no_mangle]
pub unsafe extern "C" fn fluid_sim_new(
    config: FluidSimConfig,
    out_instance: *mut *mut FluidSimInstance,
) -> FluidSimErrorCode {
    if out_instance.is_null() {
        return track_error(&DefaultFluidSimError::null_pointer("out_instance"));
    }

    match track_result(FluidSimInstance::new(&config)) {
        Ok(instance) => {
            unsafe {
                *out_instance = Box::into_raw(instance);
            }
            FluidSimErrorCode::Ok
        }
        Err(code) => {
            unsafe {
                *out_instance = ptr::null_mut();
            }
            code
        }
    }
}

/// Destroys an instance previously created by `fluid_sim_new`.
///
/// Null pointers are ignored.
///
/// # Safety
/// - The pointer MUST have been created by `fluid_sim_new`.
/// - The pointer MUST NOT have been freed already.
/// - After calling this function, the caller must not use the pointer again.
#[no_mangle]
pub unsafe extern "C" fn fluid_sim_destroy(ptr: *mut FluidSimInstance) {
    if ptr.is_null() {
        return;
    }

    // SAFETY: the pointer came from `Box::into_raw` in `fluid_sim_new` and has
    // not been freed yet, per the contract above.
    unsafe {
        drop(Box::from_raw(ptr));
    }
}
