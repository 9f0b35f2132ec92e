//! # Block Type Module
//!
//! This module defines the closed set of block types stored in a chunk and the
//! material properties the mesher and carver need from them.

use num_derive::FromPrimitive;

use super::BlockTypeSize;

/// Enumerates all possible block types in the voxel world.
///
/// Each variant is stored as a single byte in the chunk array. The
/// `FromPrimitive` derive allows decoding that byte back into the enum.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, FromPrimitive)]
pub enum BlockType {
    /// No solid and no liquid. The value of every freshly allocated cell.
    #[default]
    EMPTY = 0,

    /// Grass-topped soil; the top, sides and bottom use different atlas tiles.
    GRASS,

    /// Plain soil, found below grass.
    DIRT,

    /// Bedrock of the mountains and everything below the stone cutoff.
    STONE,

    /// Snow cover.
    SNOW,

    /// Molten rock carved by lava rivers. Rendered opaque.
    LAVA,

    /// Liquid water. Rendered into the transparent buffer.
    WATER,

    /// Frozen water. Rendered into the transparent buffer.
    ICE,
}

/// How much a block lets the faces behind it show through.
///
/// Ordered from most open to most closed; a face is visible when its neighbor
/// has a strictly lower opacity than the block itself.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Opacity {
    /// Nothing there.
    Open,
    /// Water and ice.
    Translucent,
    /// Everything else.
    Opaque,
}

impl BlockType {
    /// Every block type, in storage order.
    pub const ALL: [BlockType; 8] = [
        BlockType::EMPTY,
        BlockType::GRASS,
        BlockType::DIRT,
        BlockType::STONE,
        BlockType::SNOW,
        BlockType::LAVA,
        BlockType::WATER,
        BlockType::ICE,
    ];

    /// Converts a stored `BlockTypeSize` back into a `BlockType`.
    ///
    /// # Returns
    /// `None` if the byte does not name a block type.
    pub fn from_int(btype: BlockTypeSize) -> Option<Self> {
        num::FromPrimitive::from_u8(btype)
    }

    /// The opacity class used for face culling.
    pub fn opacity(self) -> Opacity {
        match self {
            BlockType::EMPTY => Opacity::Open,
            BlockType::WATER | BlockType::ICE => Opacity::Translucent,
            _ => Opacity::Opaque,
        }
    }

    /// `true` for the empty block.
    #[inline]
    pub fn is_empty(self) -> bool {
        self == BlockType::EMPTY
    }

    /// `true` for blocks the player can be submerged in.
    pub fn is_liquid(self) -> bool {
        matches!(self, BlockType::WATER | BlockType::LAVA)
    }

    /// `true` when faces of this block belong in the transparent mesh buffer.
    pub fn is_translucent(self) -> bool {
        self.opacity() == Opacity::Translucent
    }

    /// `true` for blocks that stop player movement.
    pub fn is_solid(self) -> bool {
        !self.is_empty() && !self.is_liquid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_storage_byte() {
        for block_type in BlockType::ALL {
            assert_eq!(
                BlockType::from_int(block_type as BlockTypeSize),
                Some(block_type)
            );
        }
        assert_eq!(BlockType::from_int(200), None);
    }

    #[test]
    fn empty_is_the_default() {
        assert_eq!(BlockType::default(), BlockType::EMPTY);
        assert_eq!(BlockType::EMPTY as BlockTypeSize, 0);
    }

    #[test]
    fn opacity_orders_open_translucent_opaque() {
        assert!(BlockType::EMPTY.opacity() < BlockType::WATER.opacity());
        assert!(BlockType::ICE.opacity() < BlockType::STONE.opacity());
        assert_eq!(BlockType::LAVA.opacity(), Opacity::Opaque);
        assert!(BlockType::LAVA.is_liquid() && !BlockType::LAVA.is_solid());
    }
}
