#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel Terrain
//!
//! The world core of a Minecraft-style voxel game: procedural terrain
//! generation, chunk storage, face-culled meshing and ray queries, with no
//! windowing or GPU code of its own.
//!
//! ## Key Modules
//!
//! * `voxels` - Blocks, chunks, the world index, the height field and the river carver
//! * `meshing` - Converts chunks into opaque and transparent vertex/index buffers
//! * `physics` - Grid ray marching, block targeting and player collision
//! * `task_management` - The worker pool chunk generation runs on
//! * `hash_noise` - The hash-based noise functions the height field samples
//! * `config` / `error` - Constructor-time configuration and the error type
//!
//! ## Architecture
//!
//! The world is split into zones of 4x4 chunks. A harness calls
//! `Terrain::expand_around_focus` with the player's position every frame;
//! zones that come into range are filled on worker threads, carved on the
//! owning thread, and meshed lazily the first time `Terrain::draw` reaches
//! them. Rendering is left to whatever [`meshing::MeshSink`] the harness
//! passes in.
//!
//! ## Usage
//!
//! ```no_run
//! use cgmath::Point3;
//! use voxel_terrain::{config::WorldConfig, voxels::terrain::Terrain};
//!
//! let mut terrain = Terrain::new(WorldConfig::default());
//! terrain.expand_around_focus(Point3::new(0.0, 160.0, 0.0));
//! terrain.finish_generation();
//!
//! let mut quads = 0;
//! terrain.draw(-64, 64, -64, 64, &mut |_origin, meshes: &voxel_terrain::meshing::ChunkMeshes| {
//!     quads += meshes.opaque.face_count();
//! });
//! ```
//!
//! ## Performance Considerations
//!
//! * One byte per block; a chunk is 64 KiB
//! * Spatial keys make chunk lookup a single hash probe
//! * Chunk generation runs on all available cores
//! * Meshes are only rebuilt for chunks whose blocks changed, and kept in an LRU cache

use cgmath::{Point3, Vector3};
use log::{error, info};
use std::collections::HashMap;
use web_time::Instant;

pub mod config;
pub mod error;
pub mod hash_noise;
pub mod meshing;
pub mod physics;
pub mod task_management;
pub mod voxels;

use config::WorldConfig;
use meshing::{ChunkMeshes, DrawKind, RenderPass};
use physics::{
    editing::{target_block, DEFAULT_REACH},
    player::Player,
};
use voxels::terrain::Terrain;

/// Simulated frame length of the headless demo.
const DEMO_TICK: f32 = 1.0 / 60.0;

/// Runs a headless demo: generates the zones around the origin, draws them
/// through a counting sink from both render passes, then drops a player onto
/// the surface.
///
/// Logging goes to stdout and is filtered by `RUST_LOG`.
pub fn run() {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");
    let start = Instant::now();

    let config = WorldConfig {
        zone_radius: 1,
        ..WorldConfig::default()
    };
    let mut terrain = Terrain::new(config);

    let focus = Point3::new(32.0, 160.0, 32.0);
    terrain.expand_around_focus(focus);
    let report = terrain.finish_generation();
    info!(
        "Generated {} chunks in {} zones in {:?}",
        report.filled_chunks.len(),
        report.completed_zones.len(),
        start.elapsed()
    );

    for pass in [RenderPass::PlayerView, RenderPass::LightView] {
        let mut quads: HashMap<DrawKind, usize> = HashMap::new();
        let mut sink = |_origin: Vector3<i32>, meshes: &ChunkMeshes| {
            for kind in pass.draw_kinds() {
                *quads.entry(*kind).or_default() += meshes.get(*kind).face_count();
            }
        };
        let drawn = terrain.draw(-64, 128, -64, 128, &mut sink);
        info!("{pass:?}: {drawn} chunks, quads {quads:?}");
    }

    let (spawn_x, spawn_z) = (focus.x as i32, focus.z as i32);
    let surface = match terrain.highest_block_at(spawn_x, spawn_z) {
        Ok(surface) => surface.unwrap_or(0),
        Err(e) => {
            error!("Spawn column is not generated: {e}");
            return;
        }
    };

    let mut player = Player::new(Point3::new(focus.x + 0.5, surface as f32 + 3.0, focus.z + 0.5));
    player.flight_mode = false;
    for _ in 0..180 {
        if let Err(e) = player.tick(DEMO_TICK, &terrain) {
            error!("Player left the generated world: {e}");
            return;
        }
    }
    info!("Player settled at {:?}", player.position);

    match target_block(
        player.camera_position(),
        Vector3::new(0.0, -1.0, 0.0),
        DEFAULT_REACH,
        &terrain,
    ) {
        Ok(Some(target)) => info!("Looking down at {:?} ({:?} face)", target.cell, target.side),
        Ok(None) => info!("Nothing within reach below the player"),
        Err(e) => error!("Targeting failed: {e}"),
    }

    match terrain.medium_at(player.camera_position()) {
        Ok(medium) => info!("Camera is in {medium:?}"),
        Err(e) => error!("Camera is outside the world: {e}"),
    }
}
