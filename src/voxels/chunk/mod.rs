//! # Chunk Module
//!
//! This module provides the `Chunk` struct: a dense 16x256x16 column of blocks
//! with non-owning links to its four horizontal neighbors.
//!
//! ## Storage
//!
//! Blocks live in a single boxed slice of one-byte [`BlockType`]s (64 KiB per
//! chunk), indexed `x + 16 * y + 16 * 256 * z`. The storage is split out into
//! [`ChunkBlocks`] so a generation worker can fill a detached block array and
//! hand it back to the owning thread without ever touching the chunk itself.
//!
//! ## Neighbor Links
//!
//! A chunk records the spatial keys of its neighbors, never references to
//! them. The world index resolves those keys when meshing, and clears the slot
//! on both sides when a chunk is removed, so a link can never dangle.
//!
//! ## Performance Characteristics
//! - **Block Lookup**: O(1), bounds checked
//! - **Memory Usage**: 64 KiB of blocks plus a few words of bookkeeping

use cgmath::{EuclideanSpace, Point3, Vector3};

use super::block::block_side::BlockSide;
use super::block::block_type::BlockType;
use super::coords::{to_key, ChunkKey, CHUNK_HEIGHT, CHUNK_WIDTH};
use crate::meshing::{self, ChunkMeshes};
use chunk_iteration::ChunkBlockIterator;

pub mod chunk_iteration;

/// Width and depth of a chunk as a `usize`.
pub const CHUNK_DIMENSION: usize = CHUNK_WIDTH as usize;
/// Height of a chunk as a `usize`.
pub const CHUNK_COLUMN_HEIGHT: usize = CHUNK_HEIGHT as usize;
/// The number of blocks in one horizontal layer of a chunk.
pub const CHUNK_LAYER_SIZE: usize = CHUNK_DIMENSION * CHUNK_DIMENSION;
/// The total number of blocks in a chunk.
pub const CHUNK_VOLUME: usize = CHUNK_LAYER_SIZE * CHUNK_COLUMN_HEIGHT;

/// The resolved neighbors of a chunk, indexed by [`BlockSide::horizontal_slot`].
pub type ChunkNeighbors<'a> = [Option<&'a Chunk>; 4];

/// A chunk-sized array of blocks, detached from any chunk.
#[derive(Clone, PartialEq, Eq)]
pub struct ChunkBlocks {
    cells: Box<[BlockType]>,
}

impl std::fmt::Debug for ChunkBlocks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChunkBlocks")
            .field("non_empty", &self.iter().count())
            .finish()
    }
}

impl Default for ChunkBlocks {
    fn default() -> Self {
        Self::new()
    }
}

impl ChunkBlocks {
    /// Creates an array with every cell EMPTY.
    pub fn new() -> Self {
        ChunkBlocks {
            cells: vec![BlockType::EMPTY; CHUNK_VOLUME].into_boxed_slice(),
        }
    }

    /// Flat index of a local cell.
    ///
    /// # Panics
    /// Panics if the coordinates are out of bounds.
    #[inline]
    fn index(x: usize, y: usize, z: usize) -> usize {
        assert!(
            x < CHUNK_DIMENSION && y < CHUNK_COLUMN_HEIGHT && z < CHUNK_DIMENSION,
            "chunk cell ({x}, {y}, {z}) is outside 16x256x16"
        );
        x + CHUNK_DIMENSION * y + CHUNK_LAYER_SIZE * z
    }

    /// Gets the block at the specified chunk-relative coordinates.
    ///
    /// # Panics
    /// Panics if the coordinates are out of bounds.
    #[inline]
    pub fn get(&self, x: usize, y: usize, z: usize) -> BlockType {
        self.cells[Self::index(x, y, z)]
    }

    /// Sets the block at the specified chunk-relative coordinates.
    ///
    /// # Panics
    /// Panics if the coordinates are out of bounds.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, z: usize, block_type: BlockType) {
        self.cells[Self::index(x, y, z)] = block_type;
    }

    /// Iterates over every non-empty cell in storage order.
    pub fn iter(&self) -> ChunkBlockIterator<'_> {
        ChunkBlockIterator::new(self)
    }

    pub(crate) fn cells(&self) -> &[BlockType] {
        &self.cells
    }
}

/// Represents a 16x256x16 column of voxel blocks in the world.
///
/// Chunks are the unit of storage and meshing. Each chunk knows its world
/// origin, its spatial key and the keys of its linked neighbors.
pub struct Chunk {
    /// World coordinates of the chunk's lower-left corner (y is always 0).
    origin: Point3<i32>,
    key: ChunkKey,
    blocks: ChunkBlocks,
    /// Neighbor keys indexed by [`BlockSide::horizontal_slot`].
    neighbors: [Option<ChunkKey>; 4],
    /// Set whenever this chunk's blocks or a neighbor's boundary blocks change.
    dirty: bool,
}

impl std::fmt::Debug for Chunk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chunk")
            .field("origin", &self.origin)
            .field("neighbors", &self.neighbors)
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl Chunk {
    /// Creates a new, completely empty chunk.
    ///
    /// # Arguments
    /// * `origin_x`, `origin_z` - World coordinates of the lower-left column;
    ///   both must be multiples of the chunk width
    pub fn new(origin_x: i32, origin_z: i32) -> Self {
        debug_assert!(
            origin_x.rem_euclid(CHUNK_WIDTH) == 0 && origin_z.rem_euclid(CHUNK_WIDTH) == 0,
            "chunk origin ({origin_x}, {origin_z}) is not chunk aligned"
        );
        Chunk {
            origin: Point3::new(origin_x, 0, origin_z),
            key: to_key(origin_x.div_euclid(CHUNK_WIDTH), origin_z.div_euclid(CHUNK_WIDTH)),
            blocks: ChunkBlocks::new(),
            neighbors: [None; 4],
            dirty: true,
        }
    }

    /// World coordinates of the chunk's lower-left corner.
    pub fn origin(&self) -> Point3<i32> {
        self.origin
    }

    /// The chunk's origin as an offset vector, as handed to mesh sinks.
    pub fn world_offset(&self) -> Vector3<i32> {
        self.origin.to_vec()
    }

    /// The chunk's spatial key in the world index.
    pub fn key(&self) -> ChunkKey {
        self.key
    }

    /// Gets the block at the specified chunk-relative coordinates.
    ///
    /// # Panics
    /// Panics if the coordinates are out of bounds.
    pub fn get_block(&self, x: usize, y: usize, z: usize) -> BlockType {
        self.blocks.get(x, y, z)
    }

    /// Sets the block at the specified chunk-relative coordinates and marks the chunk dirty.
    ///
    /// # Panics
    /// Panics if the coordinates are out of bounds.
    pub fn set_block(&mut self, x: usize, y: usize, z: usize, block_type: BlockType) {
        self.blocks.set(x, y, z, block_type);
        self.dirty = true;
    }

    /// Read access to the whole block array.
    pub fn blocks(&self) -> &ChunkBlocks {
        &self.blocks
    }

    /// Swaps in a freshly generated block array.
    pub fn replace_blocks(&mut self, blocks: ChunkBlocks) {
        self.blocks = blocks;
        self.dirty = true;
    }

    /// Iterates over every non-empty block with its local position.
    pub fn iter_blocks(&self) -> ChunkBlockIterator<'_> {
        self.blocks.iter()
    }

    /// Key of the neighbor linked on `side`, if any.
    ///
    /// Always `None` for TOP and BOTTOM.
    pub fn neighbor(&self, side: BlockSide) -> Option<ChunkKey> {
        side.horizontal_slot().and_then(|slot| self.neighbors[slot])
    }

    /// Establishes the bidirectional link between this chunk and `other`.
    ///
    /// `other` becomes this chunk's neighbor on `side`, and this chunk becomes
    /// `other`'s neighbor on the opposite side. Both chunks are marked dirty,
    /// since faces along the shared boundary may now be culled.
    ///
    /// # Panics
    /// Panics if `side` is TOP or BOTTOM.
    pub fn link_neighbor(&mut self, other: &mut Chunk, side: BlockSide) {
        let slot = side
            .horizontal_slot()
            .unwrap_or_else(|| panic!("chunks only link horizontally, not {side:?}"));
        let back_slot = side
            .opposite()
            .horizontal_slot()
            .unwrap_or_else(|| panic!("chunks only link horizontally, not {side:?}"));
        debug_assert_eq!(
            other.origin,
            self.origin + side.offset() * CHUNK_WIDTH,
            "linked chunk is not adjacent on {side:?}"
        );

        self.neighbors[slot] = Some(other.key);
        other.neighbors[back_slot] = Some(self.key);
        self.dirty = true;
        other.dirty = true;
    }

    /// Clears the neighbor slot on `side`.
    ///
    /// The world index clears the matching slot on the other chunk.
    pub fn unlink_neighbor(&mut self, side: BlockSide) {
        if let Some(slot) = side.horizontal_slot() {
            self.neighbors[slot] = None;
            self.dirty = true;
        }
    }

    /// `true` when the cached meshes of this chunk are stale.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Flags the cached meshes of this chunk as stale.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Builds the opaque and transparent meshes of this chunk.
    ///
    /// Faces on a horizontal boundary are culled against `neighbors`; a
    /// missing neighbor is treated as open air.
    pub fn build_meshes(&self, neighbors: &ChunkNeighbors) -> ChunkMeshes {
        meshing::build_chunk_meshes(self, neighbors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_chunk_is_empty() {
        let chunk = Chunk::new(32, -16);
        assert_eq!(chunk.iter_blocks().count(), 0);
        assert_eq!(chunk.origin(), Point3::new(32, 0, -16));
        assert_eq!(chunk.key(), to_key(2, -1));
    }

    #[test]
    fn set_then_get() {
        let mut chunk = Chunk::new(0, 0);
        chunk.set_block(15, 255, 15, BlockType::SNOW);
        chunk.set_block(0, 0, 0, BlockType::STONE);
        assert_eq!(chunk.get_block(15, 255, 15), BlockType::SNOW);
        assert_eq!(chunk.get_block(0, 0, 0), BlockType::STONE);
        assert_eq!(chunk.get_block(1, 0, 0), BlockType::EMPTY);
    }

    #[test]
    #[should_panic(expected = "outside 16x256x16")]
    fn out_of_range_read_panics() {
        let chunk = Chunk::new(0, 0);
        chunk.get_block(16, 0, 0);
    }

    #[test]
    #[should_panic(expected = "outside 16x256x16")]
    fn out_of_range_write_panics() {
        let mut chunk = Chunk::new(0, 0);
        chunk.set_block(0, 256, 0, BlockType::DIRT);
    }

    #[test]
    fn linking_is_symmetric() {
        let mut a = Chunk::new(0, 0);
        let mut b = Chunk::new(16, 0);
        a.link_neighbor(&mut b, BlockSide::RIGHT);
        assert_eq!(a.neighbor(BlockSide::RIGHT), Some(b.key()));
        assert_eq!(b.neighbor(BlockSide::LEFT), Some(a.key()));
        assert_eq!(a.neighbor(BlockSide::LEFT), None);
        assert_eq!(a.neighbor(BlockSide::TOP), None);
    }

    #[test]
    fn writes_mark_dirty() {
        let mut chunk = Chunk::new(0, 0);
        chunk.clear_dirty();
        assert!(!chunk.is_dirty());
        chunk.set_block(3, 4, 5, BlockType::DIRT);
        assert!(chunk.is_dirty());
    }
}
