//! Numerical kernels of the stable-fluids step
//!
//! Every kernel works on flat padded slices described by a
//! [`GridDimensions`](crate::grid::GridDimensions) and refreshes the border
//! ring through the [`BoundaryPolicy`](crate::grid::BoundaryPolicy) carried
//! in a [`StepContext`]. The stepper in [`crate::simulation`] chains them.
//!
//! - [`linear_solve`] / [`diffuse`]: Gauss-Seidel relaxation
//! - [`advect`]: semi-Lagrangian transport
//! - [`project`]: pressure projection
//! - [`vorticity_confinement`]: swirl re-injection
//! - [`fade`]: decay, staging cleanup and statistics

pub mod advect;
mod context;
pub mod diagnostics;
pub mod fade;
pub mod linear;
mod params;
pub mod profiler;
pub mod project;
mod source;
pub mod vorticity;

// Re-exports
pub use advect::advect;
pub use context::StepContext;
pub use fade::{fade, measure, FluidStats};
pub use linear::{diffuse, linear_solve};
pub use params::FluidParams;
pub(crate) use params::check_non_negative;
pub use profiler::{FrameTimer, ProfilerScope};
pub use project::project;
pub use source::add_source;
pub use vorticity::{curl_at, vorticity_confinement};
