//! # Terrain Module
//!
//! This module provides the `Terrain` struct: the sparse world index that
//! owns every chunk, tracks which zones have been generated, and hands chunk
//! meshes to a renderer.
//!
//! ## Architecture
//!
//! Chunks are stored by spatial key in a hash map, so the world is unbounded
//! in x and z and only allocated where generation has reached. Chunks refer
//! to their neighbors by key; the terrain resolves those keys whenever a
//! chunk is meshed.
//!
//! ## Zone Generation
//!
//! Generation happens a zone (4x4 chunks) at a time:
//!
//! 1. `ensure_zone_generated` allocates and links the zone's sixteen empty
//!    chunks and publishes one [`ChunkGenerationTask`] per chunk
//! 2. Workers fill detached block arrays from the height field
//! 3. `process_generation` (non-blocking) or `finish_generation` (blocking)
//!    installs finished arrays on the owning thread
//! 4. When the last chunk of a zone is installed, the river carver runs over
//!    the zone and the zone becomes [`ZoneState::Generated`]
//!
//! A zone is requested at most once, so repeated calls are cheap no-ops.
//!
//! ## Meshing
//!
//! Meshes are built lazily by `draw` and kept in an LRU cache. A chunk is
//! rebuilt when it is dirty (its blocks, or a neighbor's boundary blocks,
//! changed) or when its meshes were evicted.

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::Arc;

use cgmath::Point3;
use log::{debug, info, warn};
use lru::LruCache;

use crate::config::WorldConfig;
use crate::error::WorldError;
use crate::meshing::{ChunkMeshes, MeshSink};
use crate::physics::grid_march::BlockQuery;
use crate::task_management::{task::TaskResult, TaskManager};

use super::block::block_side::BlockSide;
use super::block::block_type::BlockType;
use super::carver::RiverCarver;
use super::chunk::{Chunk, ChunkBlocks, ChunkNeighbors, CHUNK_DIMENSION};
use super::coords::{
    block_containing, chunk_grid, chunk_key_at, chunk_origin, to_key, zone_grid, zone_key_at,
    zone_key_origin, zone_origin, ChunkKey, ZoneKey, CHUNK_HEIGHT, CHUNK_WIDTH, ZONE_CHUNKS,
    ZONE_WIDTH,
};
use super::generator::TerrainGenerator;
use super::tasks::chunk_generation_task::ChunkGenerationTask;

/// Generation progress of one zone.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ZoneState {
    /// Never requested.
    Unrequested,
    /// Chunks allocated, fill tasks outstanding.
    Generating {
        /// Fill tasks that have not reported yet.
        pending: usize,
    },
    /// Filled and carved.
    Generated,
}

/// What a call to `process_generation` or `finish_generation` completed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Chunks whose generated blocks were installed, in install order.
    pub filled_chunks: Vec<ChunkKey>,
    /// Zones that were carved and became [`ZoneState::Generated`].
    pub completed_zones: Vec<ZoneKey>,
}

impl GenerationReport {
    /// `true` when nothing was installed or completed.
    pub fn is_empty(&self) -> bool {
        self.filled_chunks.is_empty() && self.completed_zones.is_empty()
    }
}

/// The fluid surrounding a point, for camera effects.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Medium {
    /// Empty or solid cell.
    Air,
    /// Inside a water block.
    Water,
    /// Inside a lava block.
    Lava,
}

/// Chunk-local coordinates of world column `(x, z)`.
fn local_column(x: i32, z: i32) -> (usize, usize) {
    (
        x.rem_euclid(CHUNK_WIDTH) as usize,
        z.rem_euclid(CHUNK_WIDTH) as usize,
    )
}

/// The voxel world index.
pub struct Terrain {
    chunks: HashMap<ChunkKey, Chunk>,
    zones: HashMap<ZoneKey, ZoneState>,
    config: WorldConfig,
    generator: Arc<TerrainGenerator>,
    carver: Arc<RiverCarver>,
    task_manager: TaskManager,
    mesh_cache: LruCache<ChunkKey, ChunkMeshes>,
    report: GenerationReport,
}

impl std::fmt::Debug for Terrain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Terrain")
            .field("chunks", &self.chunks.len())
            .field("zones", &self.zones.len())
            .field("cached_meshes", &self.mesh_cache.len())
            .finish()
    }
}

impl Terrain {
    /// Creates an empty terrain and starts its generation workers.
    pub fn new(config: WorldConfig) -> Self {
        let capacity =
            NonZeroUsize::new(config.mesh_cache_capacity).unwrap_or(NonZeroUsize::MIN);
        let workers = config.worker_count();

        info!(
            "Creating terrain (seed {}, zone radius {}, {} workers)",
            config.seed, config.zone_radius, workers
        );

        Terrain {
            chunks: HashMap::new(),
            zones: HashMap::new(),
            generator: Arc::new(TerrainGenerator::new(config.generator.clone())),
            carver: Arc::new(RiverCarver::new(config.carver.clone(), config.seed)),
            task_manager: TaskManager::new(workers),
            mesh_cache: LruCache::new(capacity),
            report: GenerationReport::default(),
            config,
        }
    }

    /// The configuration the terrain was built with.
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// The height field new zones are filled from.
    pub fn generator(&self) -> &TerrainGenerator {
        &self.generator
    }

    /// Number of allocated chunks.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Iterates over every allocated chunk in no particular order.
    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.values()
    }

    /// `true` if a chunk is allocated for world column `(x, z)`.
    pub fn has_chunk_at(&self, x: i32, z: i32) -> bool {
        self.chunks.contains_key(&chunk_key_at(x, z))
    }

    /// The chunk containing world column `(x, z)`.
    pub fn chunk_at(&self, x: i32, z: i32) -> Result<&Chunk, WorldError> {
        self.chunks
            .get(&chunk_key_at(x, z))
            .ok_or(WorldError::NoChunk { x, z })
    }

    /// Mutable access to the chunk containing world column `(x, z)`.
    ///
    /// Writing through the returned chunk marks it dirty but does not dirty
    /// its neighbors; use [`Terrain::set_block_at`] for boundary edits.
    pub fn chunk_at_mut(&mut self, x: i32, z: i32) -> Result<&mut Chunk, WorldError> {
        self.chunks
            .get_mut(&chunk_key_at(x, z))
            .ok_or(WorldError::NoChunk { x, z })
    }

    /// The block at world coordinates `(x, y, z)`.
    ///
    /// Cells above or below the world are EMPTY.
    ///
    /// # Errors
    /// [`WorldError::NoChunk`] if the column has no chunk.
    pub fn block_at(&self, x: i32, y: i32, z: i32) -> Result<BlockType, WorldError> {
        let chunk = self.chunk_at(x, z)?;
        if !(0..CHUNK_HEIGHT).contains(&y) {
            return Ok(BlockType::EMPTY);
        }
        let (lx, lz) = local_column(x, z);
        Ok(chunk.get_block(lx, y as usize, lz))
    }

    /// Writes the block at world coordinates `(x, y, z)`.
    ///
    /// Writes above or below the world are dropped. A write on a chunk's edge
    /// also dirties the neighbor across that edge.
    ///
    /// # Errors
    /// [`WorldError::NoChunk`] if the column has no chunk.
    pub fn set_block_at(
        &mut self,
        x: i32,
        y: i32,
        z: i32,
        block_type: BlockType,
    ) -> Result<(), WorldError> {
        let chunk = self.chunk_at_mut(x, z)?;
        if !(0..CHUNK_HEIGHT).contains(&y) {
            warn!("Ignoring write of {block_type:?} outside the world at ({x}, {y}, {z})");
            return Ok(());
        }

        let (lx, lz) = local_column(x, z);
        chunk.set_block(lx, y as usize, lz, block_type);

        let last = CHUNK_DIMENSION - 1;
        let mut touched = [None; 2];
        if lx == 0 {
            touched[0] = chunk.neighbor(BlockSide::LEFT);
        } else if lx == last {
            touched[0] = chunk.neighbor(BlockSide::RIGHT);
        }
        if lz == 0 {
            touched[1] = chunk.neighbor(BlockSide::BACK);
        } else if lz == last {
            touched[1] = chunk.neighbor(BlockSide::FRONT);
        }

        for key in touched.into_iter().flatten() {
            if let Some(neighbor) = self.chunks.get_mut(&key) {
                neighbor.mark_dirty();
            }
        }
        Ok(())
    }

    /// Height of the topmost non-empty cell in column `(x, z)`, if any.
    pub fn highest_block_at(&self, x: i32, z: i32) -> Result<Option<i32>, WorldError> {
        let chunk = self.chunk_at(x, z)?;
        let (lx, lz) = local_column(x, z);
        Ok((0..CHUNK_HEIGHT)
            .rev()
            .find(|&y| !chunk.get_block(lx, y as usize, lz).is_empty()))
    }

    /// Allocates an empty chunk for column `(x, z)` and links it to every
    /// existing horizontal neighbor.
    ///
    /// Returns the existing chunk if one is already allocated.
    pub fn create_chunk_at(&mut self, x: i32, z: i32) -> &mut Chunk {
        let key = chunk_key_at(x, z);
        let (origin_x, origin_z) = chunk_origin(x, z);

        if !self.chunks.contains_key(&key) {
            let mut chunk = Chunk::new(origin_x, origin_z);
            for side in BlockSide::HORIZONTAL {
                let offset = side.offset() * CHUNK_WIDTH;
                let neighbor_key = chunk_key_at(origin_x + offset.x, origin_z + offset.z);
                if let Some(neighbor) = self.chunks.get_mut(&neighbor_key) {
                    chunk.link_neighbor(neighbor, side);
                }
            }
            self.chunks.insert(key, chunk);
        }

        self.chunks
            .entry(key)
            .or_insert_with(|| Chunk::new(origin_x, origin_z))
    }

    /// Drops the chunk for column `(x, z)` and clears the links pointing at it.
    ///
    /// # Returns
    /// The removed chunk, or `None` if nothing was allocated there.
    pub fn remove_chunk_at(&mut self, x: i32, z: i32) -> Option<Chunk> {
        let key = chunk_key_at(x, z);
        let chunk = self.chunks.remove(&key)?;

        for side in BlockSide::HORIZONTAL {
            let Some(neighbor_key) = chunk.neighbor(side) else {
                continue;
            };
            if let Some(neighbor) = self.chunks.get_mut(&neighbor_key) {
                neighbor.unlink_neighbor(side.opposite());
            }
        }
        self.mesh_cache.pop(&key);
        debug!("Removed chunk at {:?}", chunk.origin());
        Some(chunk)
    }

    /// Resolves the neighbor keys of `chunk` into references.
    pub fn neighbors_of(&self, chunk: &Chunk) -> ChunkNeighbors<'_> {
        let mut neighbors: ChunkNeighbors = [None; 4];
        for side in BlockSide::HORIZONTAL {
            if let (Some(slot), Some(key)) = (side.horizontal_slot(), chunk.neighbor(side)) {
                neighbors[slot] = self.chunks.get(&key);
            }
        }
        neighbors
    }

    /// Generation progress of the zone containing world column `(x, z)`.
    pub fn zone_state(&self, x: i32, z: i32) -> ZoneState {
        self.zones
            .get(&zone_key_at(x, z))
            .copied()
            .unwrap_or(ZoneState::Unrequested)
    }

    /// Requests generation of every zone within `zone_radius` of the zone
    /// containing `position`, then installs whatever generation has finished.
    pub fn expand_around_focus(&mut self, position: Point3<f32>) -> GenerationReport {
        let cell = block_containing(position);
        let (focus_x, focus_z) = (zone_grid(cell.x), zone_grid(cell.z));
        let radius = self.config.zone_radius.max(0);

        for dz in -radius..=radius {
            for dx in -radius..=radius {
                self.ensure_zone_generated((focus_x + dx) * ZONE_WIDTH, (focus_z + dz) * ZONE_WIDTH);
            }
        }

        self.process_generation()
    }

    /// Requests generation of the zone containing world column `(x, z)`.
    ///
    /// # Returns
    /// `true` if this call dispatched the zone, `false` if it was already
    /// generating or generated.
    pub fn ensure_zone_generated(&mut self, x: i32, z: i32) -> bool {
        let key = zone_key_at(x, z);
        if self.zones.contains_key(&key) {
            return false;
        }

        let (origin_x, origin_z) = zone_origin(x, z);
        let chunk_count = (ZONE_CHUNKS * ZONE_CHUNKS) as usize;
        self.zones
            .insert(key, ZoneState::Generating { pending: chunk_count });
        debug!("Generating zone ({origin_x}, {origin_z})");

        for cz in 0..ZONE_CHUNKS {
            for cx in 0..ZONE_CHUNKS {
                let chunk_x = origin_x + cx * CHUNK_WIDTH;
                let chunk_z = origin_z + cz * CHUNK_WIDTH;
                self.create_chunk_at(chunk_x, chunk_z);
                self.task_manager.publish_task(Box::new(ChunkGenerationTask::new(
                    Arc::clone(&self.generator),
                    chunk_x,
                    chunk_z,
                )));
            }
        }
        true
    }

    /// Installs generated blocks into the chunk at `(origin_x, origin_z)` and
    /// advances its zone, carving the zone once its last chunk arrives.
    pub(crate) fn install_generated_blocks(
        &mut self,
        origin_x: i32,
        origin_z: i32,
        blocks: ChunkBlocks,
    ) {
        let key = chunk_key_at(origin_x, origin_z);
        match self.chunks.get_mut(&key) {
            Some(chunk) => {
                chunk.replace_blocks(blocks);
                let neighbors: Vec<ChunkKey> = BlockSide::HORIZONTAL
                    .iter()
                    .filter_map(|side| chunk.neighbor(*side))
                    .collect();
                for neighbor_key in neighbors {
                    if let Some(neighbor) = self.chunks.get_mut(&neighbor_key) {
                        neighbor.mark_dirty();
                    }
                }
                self.report.filled_chunks.push(key);
            }
            None => warn!("Discarding generated blocks for removed chunk ({origin_x}, {origin_z})"),
        }

        let zone_key = zone_key_at(origin_x, origin_z);
        let finished = match self.zones.get_mut(&zone_key) {
            Some(ZoneState::Generating { pending }) => {
                *pending = pending.saturating_sub(1);
                *pending == 0
            }
            _ => false,
        };
        if finished {
            self.finish_zone(zone_key);
        }
    }

    fn finish_zone(&mut self, zone_key: ZoneKey) {
        let (origin_x, origin_z) = zone_key_origin(zone_key);
        if self.config.carver.enabled {
            let carver = Arc::clone(&self.carver);
            if let Err(e) = carver.carve_zone(self, origin_x, origin_z) {
                warn!("Carving zone ({origin_x}, {origin_z}) failed: {e}");
            }
        }
        self.zones.insert(zone_key, ZoneState::Generated);
        self.report.completed_zones.push(zone_key);
        info!("Zone ({origin_x}, {origin_z}) generated");
    }

    fn apply_results(&mut self, results: Vec<Box<dyn TaskResult + Send>>) {
        for result in results {
            for task in result.handle_result(self) {
                self.task_manager.publish_task(task);
            }
        }
    }

    /// Installs every finished generation result without blocking.
    pub fn process_generation(&mut self) -> GenerationReport {
        let results = self.task_manager.collect_completed_tasks();
        self.apply_results(results);
        std::mem::take(&mut self.report)
    }

    /// Blocks until every requested zone is generated.
    pub fn finish_generation(&mut self) -> GenerationReport {
        loop {
            let results = self.task_manager.wait_for_completed_tasks();
            if results.is_empty() {
                break;
            }
            self.apply_results(results);
        }
        std::mem::take(&mut self.report)
    }

    /// `true` while generation tasks are queued or running.
    pub fn is_generating(&self) -> bool {
        !self.task_manager.is_idle()
    }

    /// Makes sure the meshes of `key` are current and cached.
    ///
    /// # Returns
    /// Whether the meshes had to be rebuilt.
    fn refresh_meshes(&mut self, key: ChunkKey) -> bool {
        let Some(chunk) = self.chunks.get(&key) else {
            return false;
        };
        if !chunk.is_dirty() && self.mesh_cache.contains(&key) {
            return false;
        }

        let meshes = chunk.build_meshes(&self.neighbors_of(chunk));
        self.mesh_cache.put(key, meshes);
        if let Some(chunk) = self.chunks.get_mut(&key) {
            chunk.clear_dirty();
        }
        true
    }

    /// Submits the meshes of every allocated chunk overlapping
    /// `[x_min, x_max) x [z_min, z_max)` to `sink`.
    ///
    /// Dirty or uncached chunks are remeshed first.
    ///
    /// # Returns
    /// The number of chunks submitted.
    pub fn draw(
        &mut self,
        x_min: i32,
        x_max: i32,
        z_min: i32,
        z_max: i32,
        sink: &mut impl MeshSink,
    ) -> usize {
        let mut submitted = 0;
        let mut rebuilt = 0;

        let mut grid_z = chunk_grid(z_min);
        while grid_z * CHUNK_WIDTH < z_max {
            let mut grid_x = chunk_grid(x_min);
            while grid_x * CHUNK_WIDTH < x_max {
                let key = to_key(grid_x, grid_z);
                grid_x += 1;

                let Some(offset) = self.chunks.get(&key).map(Chunk::world_offset) else {
                    continue;
                };
                if self.refresh_meshes(key) {
                    rebuilt += 1;
                }
                if let Some(meshes) = self.mesh_cache.get(&key) {
                    sink.submit(offset, meshes);
                    submitted += 1;
                }
            }
            grid_z += 1;
        }

        if rebuilt > 0 {
            debug!("Rebuilt {rebuilt} chunk mesh(es) while drawing {submitted}");
        }
        submitted
    }

    /// The fluid at a world position, for tinting a camera submerged in it.
    pub fn medium_at(&self, position: Point3<f32>) -> Result<Medium, WorldError> {
        let cell = block_containing(position);
        Ok(match self.block_at(cell.x, cell.y, cell.z)? {
            BlockType::WATER => Medium::Water,
            BlockType::LAVA => Medium::Lava,
            _ => Medium::Air,
        })
    }

    /// Origin of the chunk under a world position.
    pub fn chunk_origin_of(position: Point3<f32>) -> (i32, i32) {
        let cell = block_containing(position);
        chunk_origin(cell.x, cell.z)
    }

    /// Origin of the zone under a world position.
    pub fn zone_origin_of(position: Point3<f32>) -> (i32, i32) {
        let cell = block_containing(position);
        zone_origin(cell.x, cell.z)
    }
}

impl BlockQuery for Terrain {
    fn block_at(&self, x: i32, y: i32, z: i32) -> Result<BlockType, WorldError> {
        Terrain::block_at(self, x, y, z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CarverConfig;

    fn quiet_terrain() -> Terrain {
        Terrain::new(WorldConfig {
            generation_threads: 1,
            carver: CarverConfig {
                enabled: false,
                ..CarverConfig::default()
            },
            ..WorldConfig::default()
        })
    }

    #[test]
    fn block_at_without_a_chunk_is_an_error() {
        let terrain = quiet_terrain();
        let err = terrain.block_at(5, 100, -7).unwrap_err();
        assert!(matches!(err, WorldError::NoChunk { x: 5, z: -7 }), "got {err:?}");
    }

    #[test]
    fn writes_outside_the_world_are_dropped() {
        let mut terrain = quiet_terrain();
        terrain.create_chunk_at(0, 0);
        terrain.set_block_at(1, 256, 1, BlockType::STONE).expect("chunk exists");
        terrain.set_block_at(1, -1, 1, BlockType::STONE).expect("chunk exists");
        assert_eq!(terrain.chunk_at(0, 0).map(|c| c.iter_blocks().count()).ok(), Some(0));
        assert_eq!(terrain.block_at(1, 300, 1).ok(), Some(BlockType::EMPTY));
    }

    #[test]
    fn negative_columns_land_in_the_right_chunk() {
        let mut terrain = quiet_terrain();
        terrain.create_chunk_at(-1, -1);
        terrain.set_block_at(-1, 10, -16, BlockType::SNOW).expect("chunk exists");
        let chunk = terrain.chunk_at(-16, -1).expect("same chunk");
        assert_eq!(chunk.origin(), Point3::new(-16, 0, -16));
        assert_eq!(chunk.get_block(15, 10, 0), BlockType::SNOW);
        assert!(!terrain.has_chunk_at(0, -1));
    }

    #[test]
    fn create_links_existing_neighbors_both_ways() {
        let mut terrain = quiet_terrain();
        terrain.create_chunk_at(0, 0);
        terrain.create_chunk_at(16, 0);
        terrain.create_chunk_at(0, -16);

        let center = terrain.chunk_at(0, 0).expect("allocated");
        assert_eq!(center.neighbor(BlockSide::RIGHT), Some(chunk_key_at(16, 0)));
        assert_eq!(center.neighbor(BlockSide::BACK), Some(chunk_key_at(0, -16)));
        assert_eq!(center.neighbor(BlockSide::LEFT), None);

        let right = terrain.chunk_at(16, 0).expect("allocated");
        assert_eq!(right.neighbor(BlockSide::LEFT), Some(center.key()));
        let back = terrain.chunk_at(0, -16).expect("allocated");
        assert_eq!(back.neighbor(BlockSide::FRONT), Some(center.key()));
    }

    #[test]
    fn remove_clears_the_reverse_links() {
        let mut terrain = quiet_terrain();
        terrain.create_chunk_at(0, 0);
        terrain.create_chunk_at(16, 0);
        assert!(terrain.remove_chunk_at(5, 5).is_some());
        assert!(terrain.remove_chunk_at(5, 5).is_none());
        let right = terrain.chunk_at(16, 0).expect("still allocated");
        assert_eq!(right.neighbor(BlockSide::LEFT), None);
    }

    #[test]
    fn boundary_writes_dirty_the_neighbor() {
        let mut terrain = quiet_terrain();
        terrain.create_chunk_at(0, 0);
        terrain.create_chunk_at(16, 0);
        let mut sink = |_: cgmath::Vector3<i32>, _: &ChunkMeshes| {};
        assert_eq!(terrain.draw(0, 32, 0, 16, &mut sink), 2);
        assert!(!terrain.chunk_at(16, 0).map(Chunk::is_dirty).unwrap_or(true));

        terrain.set_block_at(15, 50, 3, BlockType::DIRT).expect("chunk exists");
        assert!(terrain.chunk_at(16, 0).map(Chunk::is_dirty).unwrap_or(false));
    }

    #[test]
    fn zone_state_tracks_requests() {
        let mut terrain = quiet_terrain();
        assert_eq!(terrain.zone_state(10, 10), ZoneState::Unrequested);
        assert!(terrain.ensure_zone_generated(10, 10));
        assert!(!terrain.ensure_zone_generated(63, 0));
        assert!(matches!(terrain.zone_state(0, 0), ZoneState::Generating { .. }));
        assert_eq!(terrain.chunk_count(), 16);

        let report = terrain.finish_generation();
        assert_eq!(report.filled_chunks.len(), 16);
        assert_eq!(report.completed_zones, vec![zone_key_at(0, 0)]);
        assert_eq!(terrain.zone_state(32, 32), ZoneState::Generated);
        assert!(!terrain.is_generating());
    }

    #[test]
    fn medium_reports_liquids() {
        let mut terrain = quiet_terrain();
        terrain.create_chunk_at(0, 0);
        terrain.set_block_at(2, 130, 2, BlockType::WATER).expect("chunk exists");
        terrain.set_block_at(3, 130, 2, BlockType::LAVA).expect("chunk exists");
        assert_eq!(terrain.medium_at(Point3::new(2.5, 130.9, 2.1)).ok(), Some(Medium::Water));
        assert_eq!(terrain.medium_at(Point3::new(3.5, 130.2, 2.9)).ok(), Some(Medium::Lava));
        assert_eq!(terrain.medium_at(Point3::new(4.5, 130.2, 2.9)).ok(), Some(Medium::Air));
    }

    #[test]
    fn origin_readouts_floor_negative_positions() {
        let p = Point3::new(-0.5, 140.0, 70.25);
        assert_eq!(Terrain::chunk_origin_of(p), (-16, 64));
        assert_eq!(Terrain::zone_origin_of(p), (-64, 64));
    }

    #[test]
    fn highest_block_finds_the_surface() {
        let mut terrain = quiet_terrain();
        terrain.create_chunk_at(0, 0);
        assert_eq!(terrain.highest_block_at(4, 4).ok(), Some(None));
        terrain.set_block_at(4, 10, 4, BlockType::STONE).expect("chunk exists");
        terrain.set_block_at(4, 70, 4, BlockType::GRASS).expect("chunk exists");
        assert_eq!(terrain.highest_block_at(4, 4).ok(), Some(Some(70)));
    }
}
