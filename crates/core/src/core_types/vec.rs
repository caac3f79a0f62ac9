//! Vector type aliases for field samples.

use nalgebra::{Vector2, Vector3};

/// 2D vector type for velocities, forces and normalized positions.
///
/// This is a simple alias for `nalgebra::Vector2<f32>`; `x` runs along the
/// grid's `i` axis and `y` along its `j` axis.
pub type Vec2 = Vector2<f32>;

/// 3D vector type used for RGB color samples and injections.
pub type Vec3 = Vector3<f32>;
