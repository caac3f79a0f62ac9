//! Core types and utilities

pub mod vec;

pub use vec::{Vec2, Vec3};
