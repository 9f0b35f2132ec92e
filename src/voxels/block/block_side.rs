//! # Block Side Module
//!
//! This module defines the six faces of a voxel block, the direction each one
//! points in, and which of them cross a horizontal chunk boundary.

use cgmath::Vector3;

/// Represents the six possible faces of a voxel block.
///
/// Each variant is assigned a stable integer value so it can index per-face
/// tables such as [`super::BLOCK_TYPE_TO_ATLAS_TILES`].
///
/// The order is: [FRONT, BACK, BOTTOM, TOP, LEFT, RIGHT]
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum BlockSide {
    /// The front face (facing positive Z)
    FRONT = 0,

    /// The back face (facing negative Z)
    BACK = 1,

    /// The bottom face (facing negative Y)
    BOTTOM = 2,

    /// The top face (facing positive Y)
    TOP = 3,

    /// The left face (facing negative X)
    LEFT = 4,

    /// The right face (facing positive X)
    RIGHT = 5,
}

impl BlockSide {
    /// The four sides that can cross into a neighboring chunk, in neighbor-slot order.
    pub const HORIZONTAL: [BlockSide; 4] = [
        BlockSide::FRONT,
        BlockSide::BACK,
        BlockSide::LEFT,
        BlockSide::RIGHT,
    ];

    /// Returns an array containing all six block faces in a consistent order.
    ///
    /// The order is: [FRONT, BACK, BOTTOM, TOP, LEFT, RIGHT]
    pub fn all() -> [BlockSide; 6] {
        [
            BlockSide::FRONT,
            BlockSide::BACK,
            BlockSide::BOTTOM,
            BlockSide::TOP,
            BlockSide::LEFT,
            BlockSide::RIGHT,
        ]
    }

    /// Unit step from a cell to the cell on the other side of this face.
    pub fn offset(self) -> Vector3<i32> {
        match self {
            BlockSide::FRONT => Vector3::new(0, 0, 1),
            BlockSide::BACK => Vector3::new(0, 0, -1),
            BlockSide::BOTTOM => Vector3::new(0, -1, 0),
            BlockSide::TOP => Vector3::new(0, 1, 0),
            BlockSide::LEFT => Vector3::new(-1, 0, 0),
            BlockSide::RIGHT => Vector3::new(1, 0, 0),
        }
    }

    /// Outward unit normal, as stored in vertices.
    pub fn normal(self) -> [f32; 3] {
        let offset = self.offset();
        [offset.x as f32, offset.y as f32, offset.z as f32]
    }

    /// The face pointing the other way.
    pub fn opposite(self) -> BlockSide {
        match self {
            BlockSide::FRONT => BlockSide::BACK,
            BlockSide::BACK => BlockSide::FRONT,
            BlockSide::BOTTOM => BlockSide::TOP,
            BlockSide::TOP => BlockSide::BOTTOM,
            BlockSide::LEFT => BlockSide::RIGHT,
            BlockSide::RIGHT => BlockSide::LEFT,
        }
    }

    /// Index into a chunk's neighbor slots, or `None` for TOP and BOTTOM.
    pub fn horizontal_slot(self) -> Option<usize> {
        match self {
            BlockSide::FRONT => Some(0),
            BlockSide::BACK => Some(1),
            BlockSide::LEFT => Some(2),
            BlockSide::RIGHT => Some(3),
            BlockSide::BOTTOM | BlockSide::TOP => None,
        }
    }

    /// The face a ray enters when it steps along `axis` (0 = x, 1 = y, 2 = z).
    ///
    /// A ray moving in the positive direction enters through the negative face.
    ///
    /// # Panics
    /// Panics if `axis` is not 0, 1 or 2.
    pub fn entered_along(axis: usize, positive: bool) -> BlockSide {
        match (axis, positive) {
            (0, true) => BlockSide::LEFT,
            (0, false) => BlockSide::RIGHT,
            (1, true) => BlockSide::BOTTOM,
            (1, false) => BlockSide::TOP,
            (2, true) => BlockSide::BACK,
            (2, false) => BlockSide::FRONT,
            _ => panic!("axis {axis} is not one of x, y, z"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_offsets_cancel() {
        for side in BlockSide::all() {
            assert_eq!(side.offset() + side.opposite().offset(), Vector3::new(0, 0, 0));
            assert_eq!(side.opposite().opposite(), side);
        }
    }

    #[test]
    fn horizontal_slots_are_distinct() {
        let slots: Vec<usize> = BlockSide::HORIZONTAL
            .iter()
            .filter_map(|side| side.horizontal_slot())
            .collect();
        assert_eq!(slots, vec![0, 1, 2, 3]);
        assert_eq!(BlockSide::TOP.horizontal_slot(), None);
    }

    #[test]
    fn entered_face_points_back_at_the_ray() {
        assert_eq!(BlockSide::entered_along(2, true), BlockSide::BACK);
        assert_eq!(BlockSide::entered_along(1, false), BlockSide::TOP);
    }
}
