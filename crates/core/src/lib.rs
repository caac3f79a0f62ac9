//! Fluid Simulation Core Library
//!
//! A real-time 2D fluid solver following Jos Stam's "Stable Fluids" scheme:
//! semi-Lagrangian advection, implicit diffusion and pressure projection on a
//! padded grid, with optional vorticity confinement and per-axis wrap-around.
//!
//! ## Step pipeline
//!
//! Each call to [`FluidSolver::update`] runs:
//! - source injection (forces and colors staged since the previous tick)
//! - optional vorticity confinement
//! - velocity diffusion, projection, self-advection, projection
//! - color sourcing, optional diffusion and advection
//! - fade/decay with statistics for renderers
//!
//! ## Example
//!
//! ```rust
//! use fluid_sim_core::{FluidSolver, Vec2, Vec3};
//!
//! let mut solver = FluidSolver::setup(64, 64).expect("valid grid");
//! solver.add_force_at_pos(Vec2::new(0.5, 0.5), Vec2::new(1.0, 0.0));
//! solver.add_color_at_pos(Vec2::new(0.5, 0.5), Vec3::new(1.0, 0.0, 0.0));
//! solver.update();
//!
//! let sample = solver.info_at_pos(0.5, 0.5);
//! assert!(sample.velocity.x > 0.0);
//! ```

// Core types and utilities
pub mod core_types;
pub mod error;

// Grid storage and edge handling
pub mod grid;

// Numerical kernels
pub mod solver;

// Stepper and public solver surface
pub mod simulation;

// Re-export core types
pub use core_types::{Vec2, Vec3};
pub use error::FluidError;

// Re-export grid types
pub use grid::{Bound, BoundaryPolicy, CellSample, ColorMode, FieldStore, GridDimensions};

// Re-export solver types
pub use solver::{FluidParams, FluidStats};

// Re-export simulation types
pub use simulation::FluidSolver;
