//! # Terrain Generator
//!
//! Height-field and biome-blend functions that decide, for a world column
//! `(x, z)`, how high the surface is and what it is made of.
//!
//! ## Biomes
//!
//! * **Grassland** - low rolling plateaus shaped by Worley noise
//! * **Mountains** - tall ridges from domain-warped Perlin noise
//!
//! A third, much lower-frequency Perlin sample decides how much of each biome
//! a column gets. The sample is pushed through `smoothstep(0.25, 0.75, ..)` so
//! most of the world is clearly one biome or the other, with a short
//! transition band between them.
//!
//! ## Thread Safety
//!
//! Every height function is a pure function of its inputs. [`TerrainGenerator::fill_column`]
//! writes into a caller-owned [`ChunkBlocks`], so workers can fill different
//! chunks in parallel without sharing any state.

use cgmath::Vector2;

use crate::config::GeneratorConfig;
use crate::hash_noise::{mix, perlin, smoothstep, worley};

use super::block::block_type::BlockType;
use super::chunk::{ChunkBlocks, CHUNK_DIMENSION};
use super::coords::CHUNK_HEIGHT;

/// Lower edge of the biome transition band.
pub const BLEND_EDGE_LOW: f32 = 0.25;
/// Upper edge of the biome transition band.
pub const BLEND_EDGE_HIGH: f32 = 0.75;

/// Highest cell index a column can reach.
const MAX_SURFACE: i32 = CHUNK_HEIGHT - 1;

/// The surface of one world column.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ColumnSample {
    /// Height of the topmost filled cell
    pub height: i32,
    /// Block placed on the surface
    pub block_type: BlockType,
}

/// Procedural height field for the whole world.
#[derive(Clone, Debug, Default)]
pub struct TerrainGenerator {
    config: GeneratorConfig,
}

impl TerrainGenerator {
    /// Creates a generator from its configuration.
    pub fn new(config: GeneratorConfig) -> Self {
        TerrainGenerator { config }
    }

    /// The parameters this generator was built with.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    fn scaled(x: i32, z: i32, scale: f32) -> Vector2<f32> {
        Vector2::new(x as f32 / scale, z as f32 / scale)
    }

    /// Surface height of the grassland biome at `(x, z)`.
    pub fn grassland_height(&self, x: i32, z: i32) -> i32 {
        let c = &self.config;
        let uv = Self::scaled(x, z, c.world_scale);
        let height = worley(uv).max(0.0).powf(c.grassland_exponent) * c.grassland_range
            + c.grassland_base;
        (height as i32).clamp(0, MAX_SURFACE)
    }

    /// Surface height of the mountain biome at `(x, z)`.
    ///
    /// The coordinate is warped by a Perlin offset before the ridged sample, and
    /// the result is kept within `[mountain_base, 255]`.
    pub fn mountain_height(&self, x: i32, z: i32) -> i32 {
        let c = &self.config;
        let uv = Self::scaled(x, z, c.world_scale);
        let offset = Vector2::new(perlin(uv), perlin(uv + Vector2::new(6.5, 6.5)));

        let mut y = perlin((uv + offset) * 2.0) * 0.5 + 0.5;
        y = 1.0 - y.abs();

        let height = y * c.mountain_range + c.mountain_base;
        (height as i32).clamp(c.mountain_base as i32, MAX_SURFACE)
    }

    /// How mountainous column `(x, z)` is, from 0 (grassland) to 1 (mountains).
    pub fn biome_weight(&self, x: i32, z: i32) -> f32 {
        let uv = Self::scaled(x, z, self.config.biome_scale);
        let n = perlin(uv) * 0.5 + 0.5;
        smoothstep(BLEND_EDGE_LOW, BLEND_EDGE_HIGH, n)
    }

    /// Blends the two biomes into the final surface of column `(x, z)`.
    pub fn blend(&self, x: i32, z: i32) -> ColumnSample {
        let grass = self.grassland_height(x, z);
        let mountain = self.mountain_height(x, z);
        let weight = self.biome_weight(x, z);

        let height = mix(grass as f32, mountain as f32, weight) as i32;
        let block_type = if weight >= 0.5 {
            BlockType::STONE
        } else {
            BlockType::GRASS
        };

        ColumnSample {
            height: height.clamp(0, MAX_SURFACE),
            block_type,
        }
    }

    /// Writes one column of a chunk, from `height` downward.
    ///
    /// The surface cell gets `block_type`; a grass column turns to dirt below
    /// its surface, and every cell at or below the stone cutoff is stone. The
    /// column stops `fill_depth` cells below the surface or at `fill_floor`,
    /// whichever is higher.
    ///
    /// # Panics
    /// Panics if `x` or `z` is outside the chunk.
    pub fn fill_column(
        &self,
        blocks: &mut ChunkBlocks,
        x: usize,
        height: i32,
        z: usize,
        block_type: BlockType,
    ) {
        let c = &self.config;
        let top = height.clamp(0, MAX_SURFACE);
        let bottom = (top - c.fill_depth).max(c.fill_floor).max(0);

        for y in (bottom..=top).rev() {
            let cell = if y <= c.stone_cutoff {
                BlockType::STONE
            } else if y < top && block_type == BlockType::GRASS {
                BlockType::DIRT
            } else {
                block_type
            };
            blocks.set(x, y as usize, z, cell);
        }
    }

    /// Generates the blocks of the chunk whose lower-left column is `(origin_x, origin_z)`.
    pub fn fill_chunk(&self, blocks: &mut ChunkBlocks, origin_x: i32, origin_z: i32) {
        for z in 0..CHUNK_DIMENSION {
            for x in 0..CHUNK_DIMENSION {
                let sample = self.blend(origin_x + x as i32, origin_z + z as i32);
                self.fill_column(blocks, x, sample.height, z, sample.block_type);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator() -> TerrainGenerator {
        TerrainGenerator::new(GeneratorConfig::default())
    }

    #[test]
    fn heights_are_deterministic() {
        let g = generator();
        for (x, z) in [(0, 0), (-37, 912), (4096, -4096), (17, 17)] {
            assert_eq!(g.grassland_height(x, z), g.grassland_height(x, z));
            assert_eq!(g.mountain_height(x, z), g.mountain_height(x, z));
            assert_eq!(g.blend(x, z), g.blend(x, z));
            assert_eq!(g.biome_weight(x, z).to_bits(), g.biome_weight(x, z).to_bits());
        }
    }

    #[test]
    fn heights_stay_in_their_bands() {
        let g = generator();
        for i in -40..40 {
            let (x, z) = (i * 13, i * -29);
            let grass = g.grassland_height(x, z);
            assert!((128..=255).contains(&grass), "grassland {grass}");
            let mountain = g.mountain_height(x, z);
            assert!((150..=255).contains(&mountain), "mountain {mountain}");
            let blended = g.blend(x, z);
            assert!(blended.height >= grass.min(mountain) && blended.height <= grass.max(mountain));
        }
    }

    #[test]
    fn fill_column_layers_grass_dirt_stone() {
        let g = generator();
        let mut blocks = ChunkBlocks::new();
        g.fill_column(&mut blocks, 3, 140, 4, BlockType::GRASS);

        assert_eq!(blocks.get(3, 140, 4), BlockType::GRASS);
        assert_eq!(blocks.get(3, 139, 4), BlockType::DIRT);
        assert_eq!(blocks.get(3, 129, 4), BlockType::DIRT);
        assert_eq!(blocks.get(3, 128, 4), BlockType::STONE);
        assert_eq!(blocks.get(3, 140 - 64, 4), BlockType::STONE);
        assert_eq!(blocks.get(3, 140 - 65, 4), BlockType::EMPTY);
        assert_eq!(blocks.get(3, 141, 4), BlockType::EMPTY);
        assert_eq!(blocks.get(2, 140, 4), BlockType::EMPTY);
    }

    #[test]
    fn fill_column_respects_the_floor() {
        let g = TerrainGenerator::new(GeneratorConfig {
            fill_depth: 500,
            fill_floor: 10,
            ..GeneratorConfig::default()
        });
        let mut blocks = ChunkBlocks::new();
        g.fill_column(&mut blocks, 0, 200, 0, BlockType::STONE);
        assert_eq!(blocks.get(0, 10, 0), BlockType::STONE);
        assert_eq!(blocks.get(0, 9, 0), BlockType::EMPTY);
    }

    #[test]
    fn fill_chunk_puts_every_surface_where_blend_says() {
        let g = generator();
        let mut blocks = ChunkBlocks::new();
        g.fill_chunk(&mut blocks, -16, 32);
        for (x, z) in [(0usize, 0usize), (15, 15), (7, 3)] {
            let sample = g.blend(-16 + x as i32, 32 + z as i32);
            let surface = blocks.get(x, sample.height as usize, z);
            assert!(!surface.is_empty());
            if sample.height < MAX_SURFACE {
                assert_eq!(blocks.get(x, sample.height as usize + 1, z), BlockType::EMPTY);
            }
        }
    }
}
