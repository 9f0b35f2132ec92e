//! Mesh generation for voxel chunks.
//!
//! This module converts a chunk's block data into GPU-friendly vertex and
//! index buffers. Every exposed unit face becomes its own quad; there is no
//! greedy merging.
//!
//! # Architecture
//! - [`Face`]: one unit quad with its corners, block type and side
//! - [`ChunkMesh`]: vertices plus triangle indices
//! - [`ChunkMeshes`]: the opaque and transparent meshes of one chunk
//! - [`MeshSink`]: where [`crate::voxels::terrain::Terrain::draw`] delivers meshes
//!
//! # Face Culling
//! A face is emitted when the cell on its other side is strictly more open
//! than the block itself (see [`crate::voxels::block::block_type::Opacity`]). Stone next to water shows its
//! face, water next to stone does not, and water next to water shows nothing.
//! Cells across a horizontal chunk boundary are read from the neighbor chunk;
//! a missing neighbor, or a cell above or below the world, counts as empty.
//!
//! # Performance Considerations
//! - O(non-empty cells) with O(1) neighbor lookups
//! - Buried cells still get six neighbor checks; nothing is cached between builds

mod face;
mod mesh;
mod vertex;

pub use face::Face;
pub use mesh::*;
pub use vertex::{Vertex, VertexAttribute};

use cgmath::Point3;
use log::trace;
use web_time::Instant;

use crate::voxels::{
    block::{block_side::BlockSide, block_type::BlockType},
    chunk::{Chunk, ChunkNeighbors, CHUNK_COLUMN_HEIGHT, CHUNK_DIMENSION},
};

/// Looks up the block across `side` of a local cell.
///
/// # Returns
/// The adjacent block, or EMPTY if it lies above or below the world or in a
/// chunk that is not linked.
fn adjacent_block(
    chunk: &Chunk,
    neighbors: &ChunkNeighbors,
    position: Point3<usize>,
    side: BlockSide,
) -> BlockType {
    let offset = side.offset();
    let x = position.x as i32 + offset.x;
    let y = position.y as i32 + offset.y;
    let z = position.z as i32 + offset.z;

    if y < 0 || y >= CHUNK_COLUMN_HEIGHT as i32 {
        return BlockType::EMPTY;
    }

    let width = CHUNK_DIMENSION as i32;
    if (0..width).contains(&x) && (0..width).contains(&z) {
        return chunk.get_block(x as usize, y as usize, z as usize);
    }

    let neighbor = side
        .horizontal_slot()
        .and_then(|slot| neighbors[slot]);
    match neighbor {
        Some(neighbor) => neighbor.get_block(
            x.rem_euclid(width) as usize,
            y as usize,
            z.rem_euclid(width) as usize,
        ),
        None => BlockType::EMPTY,
    }
}

/// Builds the opaque and transparent meshes of a chunk.
///
/// # Arguments
/// * `chunk` - The chunk to mesh
/// * `neighbors` - The chunk's resolved neighbors, indexed by horizontal slot
pub fn build_chunk_meshes(chunk: &Chunk, neighbors: &ChunkNeighbors) -> ChunkMeshes {
    let start = Instant::now();
    let mut meshes = ChunkMeshes::default();

    for (position, block_type) in chunk.iter_blocks() {
        let target = if block_type.is_translucent() {
            &mut meshes.transparent
        } else {
            &mut meshes.opaque
        };

        for side in BlockSide::all() {
            let adjacent = adjacent_block(chunk, neighbors, position, side);
            if adjacent.opacity() < block_type.opacity() {
                target.push_face(&Face::new(
                    position.x, position.y, position.z, block_type, side,
                ));
            }
        }
    }

    trace!(
        "Meshed chunk at {:?}: {} opaque / {} transparent faces in {:?}",
        chunk.origin(),
        meshes.opaque.face_count(),
        meshes.transparent.face_count(),
        start.elapsed()
    );

    meshes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lone_block_has_six_faces() {
        let mut chunk = Chunk::new(0, 0);
        chunk.set_block(5, 100, 5, BlockType::DIRT);
        let meshes = chunk.build_meshes(&[None; 4]);
        assert_eq!(meshes.opaque.face_count(), 6);
        assert_eq!(meshes.opaque.vertices.len(), 24);
        assert_eq!(meshes.opaque.indices.len(), 36);
        assert!(meshes.transparent.is_empty());
    }

    #[test]
    fn touching_blocks_hide_shared_faces() {
        let mut chunk = Chunk::new(0, 0);
        chunk.set_block(5, 100, 5, BlockType::DIRT);
        chunk.set_block(6, 100, 5, BlockType::STONE);
        let meshes = chunk.build_meshes(&[None; 4]);
        assert_eq!(meshes.opaque.face_count(), 10);
    }

    #[test]
    fn stone_shows_through_water_but_not_the_reverse() {
        let mut chunk = Chunk::new(0, 0);
        chunk.set_block(5, 100, 5, BlockType::STONE);
        chunk.set_block(5, 101, 5, BlockType::WATER);
        let meshes = chunk.build_meshes(&[None; 4]);
        // stone: all six faces, including the one under the water
        assert_eq!(meshes.opaque.face_count(), 6);
        // water: every face but the one resting on stone
        assert_eq!(meshes.transparent.face_count(), 5);
    }

    #[test]
    fn world_floor_and_ceiling_are_open() {
        let mut chunk = Chunk::new(0, 0);
        chunk.set_block(0, 0, 0, BlockType::STONE);
        chunk.set_block(0, 255, 0, BlockType::STONE);
        let meshes = chunk.build_meshes(&[None; 4]);
        assert_eq!(meshes.opaque.face_count(), 12);
    }

    #[test]
    fn linked_neighbor_culls_boundary_faces() {
        let mut left = Chunk::new(0, 0);
        let mut right = Chunk::new(16, 0);
        left.link_neighbor(&mut right, BlockSide::RIGHT);
        left.set_block(15, 10, 3, BlockType::STONE);
        right.set_block(0, 10, 3, BlockType::STONE);

        let mut neighbors: ChunkNeighbors = [None; 4];
        neighbors[BlockSide::RIGHT.horizontal_slot().unwrap_or(3)] = Some(&right);
        let meshes = left.build_meshes(&neighbors);
        assert_eq!(meshes.opaque.face_count(), 5);

        let unlinked = left.build_meshes(&[None; 4]);
        assert_eq!(unlinked.opaque.face_count(), 6);
    }
}
