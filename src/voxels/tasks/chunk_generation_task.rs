//! # Chunk Generation Task
//!
//! This module defines the `ChunkGenerationTask`, which fills one chunk's
//! blocks from the height field on a worker thread. The task is scheduled
//! sixteen times per zone when the terrain requests that zone.

use std::sync::Arc;

use log::trace;

use crate::{
    task_management::task::{Task, TaskResult},
    voxels::{chunk::ChunkBlocks, generator::TerrainGenerator, terrain::Terrain},
};

/// A task that generates the blocks of one chunk.
///
/// The task never sees the world index. It fills a detached [`ChunkBlocks`]
/// and the result installs it into the already-allocated chunk.
pub struct ChunkGenerationTask {
    /// The shared, read-only height field
    generator: Arc<TerrainGenerator>,
    /// World x of the chunk's lower-left column
    origin_x: i32,
    /// World z of the chunk's lower-left column
    origin_z: i32,
}

impl ChunkGenerationTask {
    /// Creates a new chunk generation task.
    ///
    /// # Arguments
    /// * `generator` - The terrain's height field
    /// * `origin_x`, `origin_z` - World origin of the chunk to fill
    pub fn new(generator: Arc<TerrainGenerator>, origin_x: i32, origin_z: i32) -> Self {
        ChunkGenerationTask {
            generator,
            origin_x,
            origin_z,
        }
    }
}

impl Task for ChunkGenerationTask {
    fn process(&self) -> Box<dyn TaskResult + Send> {
        let mut blocks = ChunkBlocks::new();
        self.generator
            .fill_chunk(&mut blocks, self.origin_x, self.origin_z);
        trace!(
            "Filled chunk ({}, {}) on {:?}",
            self.origin_x,
            self.origin_z,
            std::thread::current().name()
        );

        Box::new(ChunkGenerationTaskResult {
            origin_x: self.origin_x,
            origin_z: self.origin_z,
            blocks,
        })
    }
}

/// The generated blocks of one chunk, waiting to be installed.
pub struct ChunkGenerationTaskResult {
    origin_x: i32,
    origin_z: i32,
    blocks: ChunkBlocks,
}

impl TaskResult for ChunkGenerationTaskResult {
    /// Installs the blocks into the terrain.
    ///
    /// Installing the last chunk of a zone runs the zone's carver, which
    /// happens synchronously, so no follow-up tasks are produced.
    fn handle_result(self: Box<Self>, terrain: &mut Terrain) -> Vec<Box<dyn Task + Send>> {
        terrain.install_generated_blocks(self.origin_x, self.origin_z, self.blocks);
        Vec::new()
    }
}
