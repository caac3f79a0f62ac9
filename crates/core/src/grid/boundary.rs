//! Border-ring rules
//!
//! After every kernel pass the one-cell ring around the interior is rewritten
//! from the adjacent interior row/column. A field tagged as the x (or y)
//! velocity component is mirrored with a sign flip on the x (or y) walls so
//! the normal component vanishes at the wall. A wrapped axis instead copies
//! from the opposite side with no flip. Corners always take the average of
//! their two neighbours on the ring.

use serde::{Deserialize, Serialize};

use super::GridDimensions;

/// Which quantity a field carries, for the purpose of border handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// Density/color/pressure: plain copy on every wall
    Scalar,
    /// Horizontal velocity: negated on the left/right walls
    VelocityX,
    /// Vertical velocity: negated on the top/bottom walls
    VelocityY,
}

impl Bound {
    /// Classic numeric tag (0 scalar, 1 x component, 2 y component)
    pub const fn tag(self) -> u8 {
        match self {
            Bound::Scalar => 0,
            Bound::VelocityX => 1,
            Bound::VelocityY => 2,
        }
    }
}

/// Per-axis wrap-around switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BoundaryPolicy {
    /// Left and right walls connect to each other
    pub wrap_x: bool,
    /// Top and bottom walls connect to each other
    pub wrap_y: bool,
}

impl BoundaryPolicy {
    /// Create a policy with the given wrap switches.
    pub const fn new(wrap_x: bool, wrap_y: bool) -> Self {
        Self { wrap_x, wrap_y }
    }

    /// Rewrite the border ring of `field` according to `bound`.
    pub fn apply(&self, bound: Bound, field: &mut [f32], dims: GridDimensions) {
        let (nx, ny) = (dims.nx(), dims.ny());
        debug_assert_eq!(field.len(), dims.num_cells());

        let flip_x = bound == Bound::VelocityX && !self.wrap_x;
        let (left_src, right_src) = if self.wrap_x { (nx, 1) } else { (1, nx) };
        for j in 1..=ny {
            let left = field[dims.index(left_src, j)];
            let right = field[dims.index(right_src, j)];
            field[dims.index(0, j)] = if flip_x { -left } else { left };
            field[dims.index(nx + 1, j)] = if flip_x { -right } else { right };
        }

        let flip_y = bound == Bound::VelocityY && !self.wrap_y;
        let (bottom_src, top_src) = if self.wrap_y { (ny, 1) } else { (1, ny) };
        for i in 1..=nx {
            let bottom = field[dims.index(i, bottom_src)];
            let top = field[dims.index(i, top_src)];
            field[dims.index(i, 0)] = if flip_y { -bottom } else { bottom };
            field[dims.index(i, ny + 1)] = if flip_y { -top } else { top };
        }

        field[dims.index(0, 0)] = 0.5 * (field[dims.index(1, 0)] + field[dims.index(0, 1)]);
        field[dims.index(0, ny + 1)] =
            0.5 * (field[dims.index(1, ny + 1)] + field[dims.index(0, ny)]);
        field[dims.index(nx + 1, 0)] =
            0.5 * (field[dims.index(nx, 0)] + field[dims.index(nx + 1, 1)]);
        field[dims.index(nx + 1, ny + 1)] =
            0.5 * (field[dims.index(nx, ny + 1)] + field[dims.index(nx + 1, ny)]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(dims: GridDimensions) -> Vec<f32> {
        (0..dims.num_cells()).map(|k| k as f32 + 1.0).collect()
    }

    #[test]
    fn test_reflect_flips_normal_component() {
        let dims = GridDimensions::new(4, 3).unwrap();
        let policy = BoundaryPolicy::default();
        let mut u = ramp(dims);
        policy.apply(Bound::VelocityX, &mut u, dims);

        for j in 1..=3 {
            assert_eq!(u[dims.index(0, j)], -u[dims.index(1, j)]);
            assert_eq!(u[dims.index(5, j)], -u[dims.index(4, j)]);
        }
        // tangential walls copy without flip
        for i in 1..=4 {
            assert_eq!(u[dims.index(i, 0)], u[dims.index(i, 1)]);
            assert_eq!(u[dims.index(i, 4)], u[dims.index(i, 3)]);
        }
    }

    #[test]
    fn test_reflect_vertical_component() {
        let dims = GridDimensions::new(3, 3).unwrap();
        let mut v = ramp(dims);
        BoundaryPolicy::default().apply(Bound::VelocityY, &mut v, dims);

        for i in 1..=3 {
            assert_eq!(v[dims.index(i, 0)], -v[dims.index(i, 1)]);
            assert_eq!(v[dims.index(i, 4)], -v[dims.index(i, 3)]);
        }
        for j in 1..=3 {
            assert_eq!(v[dims.index(0, j)], v[dims.index(1, j)]);
        }
    }

    #[test]
    fn test_wrap_copies_opposite_side() {
        let dims = GridDimensions::new(5, 4).unwrap();
        let policy = BoundaryPolicy::new(true, true);
        let mut u = ramp(dims);
        policy.apply(Bound::VelocityX, &mut u, dims);

        for j in 1..=4 {
            assert_eq!(u[dims.index(0, j)], u[dims.index(5, j)]);
            assert_eq!(u[dims.index(6, j)], u[dims.index(1, j)]);
        }
        for i in 1..=5 {
            assert_eq!(u[dims.index(i, 0)], u[dims.index(i, 4)]);
            assert_eq!(u[dims.index(i, 5)], u[dims.index(i, 1)]);
        }
    }

    #[test]
    fn test_mixed_wrap_keeps_reflection_on_other_axis() {
        let dims = GridDimensions::new(4, 4).unwrap();
        let policy = BoundaryPolicy::new(true, false);
        let mut v = ramp(dims);
        policy.apply(Bound::VelocityY, &mut v, dims);

        assert_eq!(v[dims.index(0, 2)], v[dims.index(4, 2)]);
        assert_eq!(v[dims.index(2, 0)], -v[dims.index(2, 1)]);
    }

    #[test]
    fn test_corners_average_neighbours() {
        let dims = GridDimensions::new(3, 3).unwrap();
        let mut d = ramp(dims);
        BoundaryPolicy::default().apply(Bound::Scalar, &mut d, dims);

        let expect = 0.5 * (d[dims.index(1, 0)] + d[dims.index(0, 1)]);
        assert_eq!(d[dims.index(0, 0)], expect);
        let expect = 0.5 * (d[dims.index(3, 4)] + d[dims.index(4, 3)]);
        assert_eq!(d[dims.index(4, 4)], expect);
    }

    #[test]
    fn test_tags() {
        assert_eq!(Bound::Scalar.tag(), 0);
        assert_eq!(Bound::VelocityX.tag(), 1);
        assert_eq!(Bound::VelocityY.tag(), 2);
    }
}
