//! The fluid solver: configuration, the per-tick stepper and the
//! injection/query surface used by hosts and renderers.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, trace};

use crate::core_types::{Vec2, Vec3};
use crate::error::FluidError;
use crate::grid::{Bound, CellSample, ColorMode, FieldStore, GridDimensions};
use crate::solver::{
    add_source, advect, check_non_negative, curl_at, diagnostics, diffuse, fade, measure,
    project, vorticity_confinement, FluidParams, FluidStats, FrameTimer, ProfilerScope,
    StepContext,
};

/// 2D stable-fluids solver on a padded grid.
///
/// Forces and colors injected between ticks are staged and consumed by the
/// next [`update`](Self::update). Queries read the live fields and never
/// mutate them.
///
/// ```rust
/// use fluid_sim_core::{FluidParams, FluidSolver, Vec2};
///
/// let params = FluidParams {
///     vorticity_confinement: true,
///     ..FluidParams::with_size(32, 32)
/// };
/// let mut solver = FluidSolver::new(params).expect("valid params");
/// solver.add_force_at_cell(16, 16, Vec2::new(0.0, 2.0));
/// solver.update();
/// assert_eq!(solver.step_count(), 1);
/// ```
#[derive(Debug)]
pub struct FluidSolver {
    store: FieldStore,
    params: FluidParams,
    stats: FluidStats,
    rng: StdRng,
    timer: FrameTimer,
    step_count: u64,
}

impl FluidSolver {
    /// Create a solver from a full parameter set.
    ///
    /// # Errors
    ///
    /// Returns the first problem reported by [`FluidParams::validate`].
    pub fn new(params: FluidParams) -> Result<Self, FluidError> {
        params.validate()?;
        let dims = params.dimensions()?;

        info!(
            "Creating fluid solver: {}x{} grid, {:?} color, {} iterations, vorticity={}",
            dims.nx(),
            dims.ny(),
            params.color_mode,
            params.solver_iterations,
            params.vorticity_confinement
        );

        Ok(Self {
            store: FieldStore::new(dims, params.color_mode),
            rng: seeded_rng(params.seed),
            params,
            stats: FluidStats::default(),
            timer: FrameTimer::new(),
            step_count: 0,
        })
    }

    /// Create a solver with default parameters on an `nx` x `ny` grid.
    ///
    /// # Errors
    ///
    /// Returns [`FluidError::InvalidDimensions`] when either axis is zero.
    pub fn setup(nx: usize, ny: usize) -> Result<Self, FluidError> {
        Self::new(FluidParams::with_size(nx, ny))
    }

    /// Reallocate every field for a new grid size. All content is lost.
    ///
    /// # Errors
    ///
    /// Returns [`FluidError::InvalidDimensions`] when either axis is zero; the
    /// solver is left unchanged in that case.
    pub fn set_size(&mut self, nx: usize, ny: usize) -> Result<&mut Self, FluidError> {
        let dims = GridDimensions::new(nx, ny)?;
        info!("Resizing fluid grid to {}x{}", nx, ny);
        self.params.nx = nx;
        self.params.ny = ny;
        self.store = FieldStore::new(dims, self.params.color_mode);
        self.stats = FluidStats::default();
        Ok(self)
    }

    /// Zero every field and statistic, and re-seed the random generator.
    pub fn reset(&mut self) {
        debug!("Resetting fluid solver after {} steps", self.step_count);
        self.store.clear();
        self.stats = FluidStats::default();
        self.rng = seeded_rng(self.params.seed);
        self.step_count = 0;
        self.timer = FrameTimer::new();
    }

    // ------------------------------------------------------------------
    // Configuration
    // ------------------------------------------------------------------

    /// Set the velocity diffusion coefficient.
    ///
    /// # Errors
    ///
    /// Returns [`FluidError::InvalidParameter`] for negative or non-finite
    /// values; the previous coefficient is kept.
    pub fn set_viscosity(&mut self, viscosity: f32) -> Result<&mut Self, FluidError> {
        check_non_negative("viscosity", viscosity)?;
        debug!("viscosity: {} -> {}", self.params.viscosity, viscosity);
        self.params.viscosity = viscosity;
        Ok(self)
    }

    /// Set the color diffusion coefficient; 0 disables color diffusion.
    ///
    /// # Errors
    ///
    /// Returns [`FluidError::InvalidParameter`] for negative or non-finite
    /// values; the previous coefficient is kept.
    pub fn set_color_diffusion(&mut self, diffusion: f32) -> Result<&mut Self, FluidError> {
        check_non_negative("color_diffusion", diffusion)?;
        debug!("color_diffusion: {} -> {}", self.params.color_diffusion, diffusion);
        self.params.color_diffusion = diffusion;
        Ok(self)
    }

    /// Set the time step.
    ///
    /// # Errors
    ///
    /// Returns [`FluidError::InvalidParameter`] for negative or non-finite
    /// values; the previous time step is kept.
    pub fn set_delta_t(&mut self, dt: f32) -> Result<&mut Self, FluidError> {
        check_non_negative("dt", dt)?;
        debug!("dt: {} -> {}", self.params.dt, dt);
        self.params.dt = dt;
        Ok(self)
    }

    /// Set the per-step color fade, clamped to `[0, 1]`.
    pub fn set_fade_speed(&mut self, fade_speed: f32) -> &mut Self {
        let clamped = if fade_speed.is_nan() {
            0.0
        } else {
            fade_speed.clamp(0.0, 1.0)
        };
        debug!("fade_speed: {} -> {}", self.params.fade_speed, clamped);
        self.params.fade_speed = clamped;
        self
    }

    /// Set the number of Gauss-Seidel sweeps per linear solve.
    pub fn set_solver_iterations(&mut self, iterations: usize) -> &mut Self {
        debug!(
            "solver_iterations: {} -> {}",
            self.params.solver_iterations, iterations
        );
        self.params.solver_iterations = iterations;
        self
    }

    /// Switch between three RGB channels and a single grey channel.
    /// Changing the mode discards all color content.
    pub fn enable_rgb(&mut self, rgb: bool) -> &mut Self {
        let mode = ColorMode::from_rgb(rgb);
        if mode != self.params.color_mode {
            debug!("color mode: {:?} -> {:?}", self.params.color_mode, mode);
            self.params.color_mode = mode;
            self.store.set_color_mode(mode);
        }
        self
    }

    /// Turn vorticity confinement on or off.
    pub fn enable_vorticity_confinement(&mut self, enabled: bool) -> &mut Self {
        debug!("vorticity_confinement: {}", enabled);
        self.params.vorticity_confinement = enabled;
        self
    }

    /// Set wrap-around per axis.
    pub fn set_wrap(&mut self, wrap_x: bool, wrap_y: bool) -> &mut Self {
        debug!("wrap: x={} y={}", wrap_x, wrap_y);
        self.params.wrap_x = wrap_x;
        self.params.wrap_y = wrap_y;
        self
    }

    /// Current parameters
    pub fn params(&self) -> &FluidParams {
        &self.params
    }

    /// Velocity diffusion coefficient
    pub fn viscosity(&self) -> f32 {
        self.params.viscosity
    }

    /// Color diffusion coefficient
    pub fn color_diffusion(&self) -> f32 {
        self.params.color_diffusion
    }

    /// Time step
    pub fn delta_t(&self) -> f32 {
        self.params.dt
    }

    /// Per-step color fade
    pub fn fade_speed(&self) -> f32 {
        self.params.fade_speed
    }

    /// Gauss-Seidel sweeps per linear solve
    pub fn solver_iterations(&self) -> usize {
        self.params.solver_iterations
    }

    /// Whether the grid carries three color channels
    pub fn is_rgb(&self) -> bool {
        self.params.color_mode == ColorMode::Rgb
    }

    /// Whether vorticity confinement runs each step
    pub fn vorticity_confinement_enabled(&self) -> bool {
        self.params.vorticity_confinement
    }

    /// Wrap-around switches `(x, y)`
    pub fn wrap(&self) -> (bool, bool) {
        (self.params.wrap_x, self.params.wrap_y)
    }

    // ------------------------------------------------------------------
    // Stepping
    // ------------------------------------------------------------------

    /// Advance the simulation by one time step.
    pub fn update(&mut self) {
        let scope = ProfilerScope::new("fluid_update");
        let ctx = self.step_context();
        let dt = ctx.dt;
        let store = &mut self.store;

        add_source(&mut store.u, &store.u_old, dt);
        add_source(&mut store.v, &store.v_old, dt);

        if self.params.vorticity_confinement {
            // staged forces are already in u/v; they must not be added again on
            // the cells confinement leaves untouched
            store.u_old.fill(0.0);
            store.v_old.fill(0.0);
            vorticity_confinement(
                ctx.dims,
                &store.u,
                &store.v,
                &mut store.curl,
                &mut store.u_old,
                &mut store.v_old,
            );
            add_source(&mut store.u, &store.u_old, dt);
            add_source(&mut store.v, &store.v_old, dt);
        }

        store.swap_velocity();
        diffuse(&ctx, Bound::VelocityX, &mut store.u, &store.u_old, self.params.viscosity);
        diffuse(&ctx, Bound::VelocityY, &mut store.v, &store.v_old, self.params.viscosity);
        project(&ctx, &mut store.u, &mut store.v, &mut store.u_old, &mut store.v_old);

        store.swap_velocity();
        advect(&ctx, Bound::VelocityX, &mut store.u, &store.u_old, &store.u_old, &store.v_old);
        advect(&ctx, Bound::VelocityY, &mut store.v, &store.v_old, &store.u_old, &store.v_old);
        project(&ctx, &mut store.u, &mut store.v, &mut store.u_old, &mut store.v_old);

        let color_diffusion = self.params.color_diffusion;
        let diffuse_color = color_diffusion != 0.0 && dt != 0.0;
        for channel in &mut store.colors {
            add_source(&mut channel.value, &channel.staging, dt);
            channel.swap();
            if diffuse_color {
                diffuse(&ctx, Bound::Scalar, &mut channel.value, &channel.staging, color_diffusion);
                channel.swap();
            }
            advect(&ctx, Bound::Scalar, &mut channel.value, &channel.staging, &store.u, &store.v);
        }

        self.stats = fade(
            store,
            self.params.fade_speed,
            self.params.vorticity_confinement,
        );
        self.step_count += 1;

        let elapsed = scope.elapsed_ms();
        self.timer.record(elapsed);
        trace!(
            "step {}: avg_density={:.4} avg_speed={:.6} uniformity={:.4}",
            self.step_count,
            self.stats.avg_density,
            self.stats.avg_speed,
            self.stats.uniformity
        );
    }

    fn step_context(&self) -> StepContext {
        StepContext::new(
            self.store.dims(),
            self.params.boundary(),
            self.params.solver_iterations,
            self.params.dt,
        )
    }

    /// Fill every color channel, live and staged, with uniform noise in
    /// `[0, 1)` and refresh the statistics.
    pub fn randomize_color(&mut self) {
        for channel in &mut self.store.colors {
            for (value, staged) in channel.value.iter_mut().zip(channel.staging.iter_mut()) {
                let sample: f32 = self.rng.random();
                *value = sample;
                *staged = sample;
            }
        }
        self.stats = measure(&self.store);
        debug!(
            "Randomized color: avg_density={:.4}",
            self.stats.avg_density
        );
    }

    // ------------------------------------------------------------------
    // Injection
    // ------------------------------------------------------------------

    /// Stage a force at the cell under normalized position `pos`.
    pub fn add_force_at_pos(&mut self, pos: Vec2, force: Vec2) {
        let (i, j) = self.dims().cell_for_normalized(pos.x, pos.y);
        self.store.add_force(i as i32, j as i32, force);
    }

    /// Stage a force at cell `(i, j)`. Cells outside the padded grid are ignored.
    pub fn add_force_at_cell(&mut self, i: i32, j: i32, force: Vec2) {
        self.store.add_force(i, j, force);
    }

    /// Stage color at the cell under normalized position `pos`.
    pub fn add_color_at_pos(&mut self, pos: Vec2, color: Vec3) {
        let (i, j) = self.dims().cell_for_normalized(pos.x, pos.y);
        self.store.add_color(i as i32, j as i32, color);
    }

    /// Stage color at cell `(i, j)`. Cells outside the padded grid are ignored.
    pub fn add_color_at_cell(&mut self, i: i32, j: i32, color: Vec3) {
        self.store.add_color(i, j, color);
    }

    /// Stage the same amount on every color channel under `pos`.
    pub fn add_intensity_at_pos(&mut self, pos: Vec2, amount: f32) {
        let (i, j) = self.dims().cell_for_normalized(pos.x, pos.y);
        self.store.add_intensity(i as i32, j as i32, amount);
    }

    /// Stage the same amount on every color channel at cell `(i, j)`.
    pub fn add_intensity_at_cell(&mut self, i: i32, j: i32, amount: f32) {
        self.store.add_intensity(i, j, amount);
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Velocity and color at cell `(i, j)`, clamped into the padded grid.
    pub fn info_at_cell(&self, i: i32, j: i32) -> CellSample {
        let (ci, cj) = self.dims().clamp_cell(i, j);
        self.store.sample(self.dims().index(ci, cj))
    }

    /// Velocity and color at a normalized position.
    pub fn info_at_pos(&self, x: f32, y: f32) -> CellSample {
        self.store.sample(self.dims().index_for_normalized(x, y))
    }

    /// Velocity at a normalized position.
    pub fn velocity_at_pos(&self, x: f32, y: f32) -> Vec2 {
        self.store.velocity(self.dims().index_for_normalized(x, y))
    }

    /// Velocity at cell `(i, j)`, clamped into the padded grid.
    pub fn velocity_at_cell(&self, i: i32, j: i32) -> Vec2 {
        self.info_at_cell(i, j).velocity
    }

    /// Color at a normalized position.
    pub fn color_at_pos(&self, x: f32, y: f32) -> Vec3 {
        self.store.color(self.dims().index_for_normalized(x, y))
    }

    /// Color at cell `(i, j)`, clamped into the padded grid.
    pub fn color_at_cell(&self, i: i32, j: i32) -> Vec3 {
        self.info_at_cell(i, j).color
    }

    /// Signed curl at cell `(i, j)`, clamped into the interior.
    pub fn curl_at_cell(&self, i: i32, j: i32) -> f32 {
        let dims = self.dims();
        let (ci, cj) = dims.clamp_interior(i, j);
        curl_at(dims, &self.store.u, &self.store.v, ci, cj)
    }

    /// Largest absolute divergence over the interior.
    pub fn max_divergence(&self) -> f32 {
        diagnostics::max_divergence(self.dims(), &self.store.u, &self.store.v)
    }

    /// Mean kinetic energy over the interior.
    pub fn kinetic_energy(&self) -> f32 {
        diagnostics::kinetic_energy(self.dims(), &self.store.u, &self.store.v)
    }

    // ------------------------------------------------------------------
    // Introspection
    // ------------------------------------------------------------------

    /// Statistics from the last step (or `randomize_color`)
    pub fn stats(&self) -> FluidStats {
        self.stats
    }

    /// Mean clamped per-cell max channel value
    pub fn avg_density(&self) -> f32 {
        self.stats.avg_density
    }

    /// Mean squared speed
    pub fn avg_speed(&self) -> f32 {
        self.stats.avg_speed
    }

    /// Uniformity of the density field in `(0, 1]`
    pub fn uniformity(&self) -> f32 {
        self.stats.uniformity
    }

    /// Grid geometry
    pub fn dims(&self) -> GridDimensions {
        self.store.dims()
    }

    /// Interior cells along x
    pub fn nx(&self) -> usize {
        self.store.dims().nx()
    }

    /// Interior cells along y
    pub fn ny(&self) -> usize {
        self.store.dims().ny()
    }

    /// Padded width (`nx + 2`)
    pub fn width(&self) -> usize {
        self.store.dims().width()
    }

    /// Padded height (`ny + 2`)
    pub fn height(&self) -> usize {
        self.store.dims().height()
    }

    /// Padded cell count
    pub fn num_cells(&self) -> usize {
        self.store.dims().num_cells()
    }

    /// Steps run since construction or the last reset
    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    /// Wall-clock duration of the last step
    pub fn last_step_ms(&self) -> f64 {
        self.timer.last_frame_time_ms()
    }

    /// Raw field storage
    pub fn store(&self) -> &FieldStore {
        &self.store
    }
}

fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}
