//! One textured quad per visible block side.

use cgmath::Point3;

use crate::voxels::block::{
    atlas_origin, block_side::BlockSide, block_type::BlockType, ATLAS_TILE_SIZE,
};

use super::vertex::Vertex;

/// Represents a single unit quad on one side of a voxel.
///
/// A face is defined by four corner points (lower-left, lower-right,
/// upper-right, upper-left) as seen from outside the block, so that walking
/// the corners in that order is counter-clockwise around the outward normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    /// Lower-left corner of the face in chunk coordinates
    pub ll: Point3<usize>,
    /// Lower-right corner of the face in chunk coordinates
    pub lr: Point3<usize>,
    /// Upper-right corner of the face in chunk coordinates
    pub ur: Point3<usize>,
    /// Upper-left corner of the face in chunk coordinates
    pub ul: Point3<usize>,
    /// The block the face belongs to, used for texture mapping
    pub block_type: BlockType,
    /// Which side of the block this face represents
    pub block_side: BlockSide,
}

impl Face {
    /// Creates the face of the voxel at `(i, j, k)` on `block_side`.
    ///
    /// # Arguments
    /// * `i`, `j`, `k` - The coordinates of the voxel in chunk space
    /// * `block_type` - The type of the block, used for texture mapping
    /// * `block_side` - Which side of the block this face represents
    pub fn new(i: usize, j: usize, k: usize, block_type: BlockType, block_side: BlockSide) -> Self {
        let p = |x: usize, y: usize, z: usize| Point3::new(i + x, j + y, k + z);
        let (ll, lr, ur, ul) = match block_side {
            BlockSide::FRONT => (p(0, 0, 1), p(1, 0, 1), p(1, 1, 1), p(0, 1, 1)),
            BlockSide::BACK => (p(1, 0, 0), p(0, 0, 0), p(0, 1, 0), p(1, 1, 0)),
            BlockSide::BOTTOM => (p(0, 0, 0), p(1, 0, 0), p(1, 0, 1), p(0, 0, 1)),
            BlockSide::TOP => (p(0, 1, 1), p(1, 1, 1), p(1, 1, 0), p(0, 1, 0)),
            BlockSide::LEFT => (p(0, 0, 0), p(0, 0, 1), p(0, 1, 1), p(0, 1, 0)),
            BlockSide::RIGHT => (p(1, 0, 1), p(1, 0, 0), p(1, 1, 0), p(1, 1, 1)),
        };
        Face {
            ll,
            lr,
            ur,
            ul,
            block_type,
            block_side,
        }
    }

    /// Generates the four vertices of the face in ll, lr, ur, ul order.
    ///
    /// The atlas tile is stretched over the quad with its lower-left corner on `ll`.
    pub fn vertices(&self) -> [Vertex; 4] {
        let [u, v] = atlas_origin(self.block_type, self.block_side);
        let s = ATLAS_TILE_SIZE;
        [
            Vertex::new(self.ll, self.block_side, [u, v]),
            Vertex::new(self.lr, self.block_side, [u + s, v]),
            Vertex::new(self.ur, self.block_side, [u + s, v + s]),
            Vertex::new(self.ul, self.block_side, [u, v + s]),
        ]
    }
}
