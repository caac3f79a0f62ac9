//! Fluid simulation driver
//!
//! [`FluidSolver`] owns the field store and runs the per-tick pipeline built
//! from the kernels in [`crate::solver`]. The [`export`] module turns the
//! resulting fields into renderer-friendly buffers.

pub mod export;
mod fluid_solver;

pub use fluid_solver::FluidSolver;
