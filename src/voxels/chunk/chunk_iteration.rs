//! # Chunk Iteration Module
//!
//! This module provides an iterator over the non-empty blocks of a chunk.
//!
//! Terrain chunks are mostly air above the surface and mostly buried below
//! it, so the mesher only cares about the cells that actually hold something.
//! The iterator walks the flat block array in storage order (x fastest, then
//! y, then z), skips EMPTY cells and recovers each cell's local position from
//! its flat index.

use cgmath::Point3;

use crate::voxels::block::block_type::BlockType;

use super::{ChunkBlocks, CHUNK_DIMENSION, CHUNK_LAYER_SIZE};

/// An iterator over all non-empty blocks in a chunk.
pub struct ChunkBlockIterator<'a> {
    /// The chunk's flat cell array
    cells: &'a [BlockType],
    /// Flat index of the next cell to inspect
    current_offset: usize,
}

impl<'a> ChunkBlockIterator<'a> {
    /// Creates a new `ChunkBlockIterator` positioned before the first cell.
    pub fn new(blocks: &'a ChunkBlocks) -> Self {
        ChunkBlockIterator {
            cells: blocks.cells(),
            current_offset: 0,
        }
    }

    /// Converts a flat index back into local chunk coordinates.
    fn position_of(offset: usize) -> Point3<usize> {
        Point3::new(
            offset % CHUNK_DIMENSION,
            (offset % CHUNK_LAYER_SIZE) / CHUNK_DIMENSION,
            offset / CHUNK_LAYER_SIZE,
        )
    }
}

impl Iterator for ChunkBlockIterator<'_> {
    type Item = (Point3<usize>, BlockType);

    fn next(&mut self) -> Option<Self::Item> {
        while self.current_offset < self.cells.len() {
            let offset = self.current_offset;
            self.current_offset += 1;

            let block_type = self.cells[offset];
            if !block_type.is_empty() {
                return Some((Self::position_of(offset), block_type));
            }
        }
        None
    }
}
