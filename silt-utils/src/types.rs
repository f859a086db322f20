// Wrapper types making it harder to accidentally use the wrong underlying type.

use std::fmt;

use crate::math::Vector3;

/// A block position.
///
/// In this world the z axis is the height axis; the x/y plane is the
/// horizontal plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockPos(pub Vector3<i32>);

impl BlockPos {
    /// Creates a block position from its coordinates.
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self(Vector3::new(x, y, z))
    }

    /// Returns this position offset by the given deltas.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self(Vector3::new(self.0.x + dx, self.0.y + dy, self.0.z + dz))
    }

    /// The four orthogonal neighbors in the horizontal plane (±x and ±y at
    /// the same z).
    #[must_use]
    pub const fn plane_adjacent(self) -> [Self; 4] {
        [
            self.offset(-1, 0, 0),
            self.offset(1, 0, 0),
            self.offset(0, -1, 0),
            self.offset(0, 1, 0),
        ]
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
