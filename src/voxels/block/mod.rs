//! # Block Module
//!
//! This module provides the block-level vocabulary of the voxel world: block
//! type definitions, block face handling and the texture atlas lookup used by
//! the mesher.

use block_side::BlockSide;
use block_type::BlockType;

pub mod block_side;
pub mod block_type;

/// The underlying integer type used to represent block types in memory.
pub type BlockTypeSize = u8;

/// Number of tiles along each edge of the texture atlas.
pub const ATLAS_TILES_PER_ROW: u8 = 16;

/// Width and height of one atlas tile in UV units.
pub const ATLAS_TILE_SIZE: f32 = 1.0 / ATLAS_TILES_PER_ROW as f32;

/// Maps each block type to the atlas tile (column, row) used for each face.
///
/// The outer array is indexed by `BlockType` as a `usize`.
/// The inner array is indexed by `BlockSide` as a `usize`:
/// [Front, Back, Bottom, Top, Left, Right]
///
/// Rows are counted upward from the bottom of the atlas, matching UV space.
pub static BLOCK_TYPE_TO_ATLAS_TILES: [[(u8, u8); 6]; 8] = [
    [(0, 0); 6],                                                  // EMPTY (never meshed)
    [(3, 15), (3, 15), (2, 15), (8, 13), (3, 15), (3, 15)],       // GRASS (top: 8,13 bottom: dirt)
    [(2, 15); 6],                                                 // DIRT
    [(1, 15); 6],                                                 // STONE
    [(2, 11); 6],                                                 // SNOW
    [(13, 1); 6],                                                 // LAVA
    [(13, 3); 6],                                                 // WATER
    [(3, 11); 6],                                                 // ICE
];

/// Returns the UV of the lower-left corner of the atlas tile for one face of a block.
pub fn atlas_origin(block_type: BlockType, side: BlockSide) -> [f32; 2] {
    let (column, row) = BLOCK_TYPE_TO_ATLAS_TILES[block_type as usize][side as usize];
    [
        column as f32 * ATLAS_TILE_SIZE,
        row as f32 * ATLAS_TILE_SIZE,
    ]
}
