//! # World Configuration
//!
//! Constructor-time constants for the terrain core. Every field has a default,
//! so an embedding harness can deserialize a partial JSON document and only
//! override what it cares about:
//!
//! ```no_run
//! use voxel_terrain::config::WorldConfig;
//!
//! let config = WorldConfig::from_json_str(r#"{ "seed": 7, "zone_radius": 1 }"#).unwrap();
//! assert_eq!(config.zone_radius, 1);
//! ```
//!
//! Chunk extent and zone size are compile-time constants and are not part of
//! the configuration (see [`crate::voxels::coords`]).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::WorldError;

/// Top-level configuration for a [`crate::voxels::terrain::Terrain`].
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    /// Seed mixed into every per-zone carver RNG.
    pub seed: u64,
    /// Number of zones generated on each side of the focal zone.
    pub zone_radius: i32,
    /// Worker threads used for chunk generation. `0` picks the available parallelism.
    pub generation_threads: usize,
    /// Maximum number of chunk meshes kept between draw calls.
    pub mesh_cache_capacity: usize,
    /// Height-field and column fill parameters.
    pub generator: GeneratorConfig,
    /// River/lava carver parameters.
    pub carver: CarverConfig,
}

impl Default for WorldConfig {
    fn default() -> Self {
        WorldConfig {
            seed: 0,
            zone_radius: 2,
            generation_threads: 0,
            mesh_cache_capacity: 512,
            generator: GeneratorConfig::default(),
            carver: CarverConfig::default(),
        }
    }
}

impl WorldConfig {
    /// Parses a configuration from a JSON document.
    ///
    /// Missing fields fall back to their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, WorldError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, WorldError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Resolves `generation_threads`, substituting the machine's parallelism for `0`.
    pub fn worker_count(&self) -> usize {
        if self.generation_threads > 0 {
            return self.generation_threads;
        }
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    }
}

/// Parameters of the terrain height field.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct GeneratorConfig {
    /// World units per noise unit for the grassland and mountain fields.
    pub world_scale: f32,
    /// World units per noise unit for the biome blend sample.
    pub biome_scale: f32,
    /// Lowest grassland surface.
    pub grassland_base: f32,
    /// Vertical range of the grassland field above its base.
    pub grassland_range: f32,
    /// Exponent applied to the Worley sample before scaling.
    pub grassland_exponent: f32,
    /// Lowest mountain surface.
    pub mountain_base: f32,
    /// Vertical range of the mountain field above its base.
    pub mountain_range: f32,
    /// Cells written below each surface block.
    pub fill_depth: i32,
    /// Column fill never writes below this height.
    pub fill_floor: i32,
    /// Cells at or below this height are always stone.
    pub stone_cutoff: i32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            world_scale: 64.0,
            biome_scale: 512.0,
            grassland_base: 128.0,
            grassland_range: 16.0,
            grassland_exponent: 0.9,
            mountain_base: 150.0,
            mountain_range: 105.0,
            fill_depth: 64,
            fill_floor: 0,
            stone_cutoff: 128,
        }
    }
}

/// Parameters of the L-system river/lava carver.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct CarverConfig {
    /// Disables carving entirely when `false`.
    pub enabled: bool,
    /// Grammar expansion passes applied to the axiom.
    pub iterations: usize,
    /// Height of the segment centers the turtle walks along.
    pub center_height: f32,
    /// Cells at or below this height become liquid when carved.
    pub liquid_level: i32,
    /// Distance covered by each advance.
    pub step_length: f32,
    /// Capsule radius of the trunk.
    pub radius: f32,
    /// Radius multiplier applied to a branch started right after a pop.
    pub branch_taper: f32,
    /// Lower clamp for tapered radii.
    pub min_radius: f32,
    /// Base turn applied by each rotation symbol, in degrees.
    pub rotation_degrees: f32,
    /// Maximum noise jitter added to each turn, in degrees.
    pub jitter_degrees: f32,
    /// Probability that a zone carves lava instead of water.
    pub lava_chance: f32,
}

impl Default for CarverConfig {
    fn default() -> Self {
        CarverConfig {
            enabled: true,
            iterations: 2,
            center_height: 135.0,
            liquid_level: 128,
            step_length: 10.0,
            radius: 12.0,
            branch_taper: 0.6,
            min_radius: 4.0,
            rotation_degrees: 20.0,
            jitter_degrees: 15.0,
            lava_chance: 0.2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = WorldConfig::from_json_str(r#"{ "seed": 42, "carver": { "iterations": 1 } }"#)
            .expect("partial config should parse");
        assert_eq!(config.seed, 42);
        assert_eq!(config.carver.iterations, 1);
        assert_eq!(config.carver.liquid_level, 128);
        assert_eq!(config.generator, GeneratorConfig::default());
        assert_eq!(config.zone_radius, 2);
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = WorldConfig::from_json_str("{ seed: ").unwrap_err();
        assert!(matches!(err, WorldError::Config(_)), "got {err:?}");
    }

    #[test]
    fn explicit_worker_count_wins() {
        let config = WorldConfig {
            generation_threads: 3,
            ..WorldConfig::default()
        };
        assert_eq!(config.worker_count(), 3);
        assert!(WorldConfig::default().worker_count() >= 1);
    }
}
