//! # World Coordinates
//!
//! Conversions between world block coordinates, chunk and zone grids, and the
//! 64-bit spatial keys the world index is hashed by.
//!
//! ## Spatial Keys
//!
//! A key packs a grid x coordinate into the upper 32 bits and a grid z
//! coordinate into the lower 32 bits. The z half is stored as its raw
//! two's-complement bits, so the packing is a bijection over every `(i32, i32)`
//! pair, negatives included. Chunk keys and zone keys use the same packing on
//! their respective grids.
//!
//! ## Floor Division
//!
//! World coordinates are mapped to grid cells with Euclidean division, so
//! world x = -1 lands in chunk -1 rather than chunk 0.

use cgmath::Point3;

/// Width and depth of a chunk in blocks.
pub const CHUNK_WIDTH: i32 = 16;
/// Height of a chunk (and of the world) in blocks.
pub const CHUNK_HEIGHT: i32 = 256;
/// Number of chunks along each edge of a zone.
pub const ZONE_CHUNKS: i32 = 4;
/// Width and depth of a zone in blocks.
pub const ZONE_WIDTH: i32 = CHUNK_WIDTH * ZONE_CHUNKS;

/// Packed chunk-grid coordinate identifying one chunk.
pub type ChunkKey = i64;
/// Packed zone-grid coordinate identifying one zone.
pub type ZoneKey = i64;

/// Packs two grid coordinates into one key.
#[inline]
pub fn to_key(x: i32, z: i32) -> i64 {
    ((x as i64) << 32) | (z as u32 as i64)
}

/// Unpacks a key produced by [`to_key`].
#[inline]
pub fn key_to_coords(key: i64) -> (i32, i32) {
    ((key >> 32) as i32, key as i32)
}

/// Chunk-grid coordinate containing world coordinate `v`.
#[inline]
pub fn chunk_grid(v: i32) -> i32 {
    v.div_euclid(CHUNK_WIDTH)
}

/// Zone-grid coordinate containing world coordinate `v`.
#[inline]
pub fn zone_grid(v: i32) -> i32 {
    v.div_euclid(ZONE_WIDTH)
}

/// Key of the chunk containing world column `(x, z)`.
pub fn chunk_key_at(x: i32, z: i32) -> ChunkKey {
    to_key(chunk_grid(x), chunk_grid(z))
}

/// Key of the zone containing world column `(x, z)`.
pub fn zone_key_at(x: i32, z: i32) -> ZoneKey {
    to_key(zone_grid(x), zone_grid(z))
}

/// World coordinates of the lower-left column of the chunk containing `(x, z)`.
pub fn chunk_origin(x: i32, z: i32) -> (i32, i32) {
    (chunk_grid(x) * CHUNK_WIDTH, chunk_grid(z) * CHUNK_WIDTH)
}

/// World coordinates of the lower-left column of the zone containing `(x, z)`.
pub fn zone_origin(x: i32, z: i32) -> (i32, i32) {
    (zone_grid(x) * ZONE_WIDTH, zone_grid(z) * ZONE_WIDTH)
}

/// World origin of the chunk identified by `key`.
pub fn chunk_key_origin(key: ChunkKey) -> (i32, i32) {
    let (cx, cz) = key_to_coords(key);
    (cx * CHUNK_WIDTH, cz * CHUNK_WIDTH)
}

/// World origin of the zone identified by `key`.
pub fn zone_key_origin(key: ZoneKey) -> (i32, i32) {
    let (zx, zz) = key_to_coords(key);
    (zx * ZONE_WIDTH, zz * ZONE_WIDTH)
}

/// The block cell containing a continuous world position.
pub fn block_containing(position: Point3<f32>) -> Point3<i32> {
    Point3::new(
        position.x.floor() as i32,
        position.y.floor() as i32,
        position.z.floor() as i32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_round_trips_extremes() {
        let samples = [
            (0, 0),
            (1, -1),
            (-1, 1),
            (-1, -1),
            (i32::MIN, i32::MAX),
            (i32::MAX, i32::MIN),
            (i32::MIN, i32::MIN),
            (12345, -67890),
        ];
        for (x, z) in samples {
            assert_eq!(key_to_coords(to_key(x, z)), (x, z), "({x}, {z})");
        }
    }

    #[test]
    fn key_round_trips_random_pairs() {
        let mut rng = fastrand::Rng::with_seed(0x5eed);
        for _ in 0..10_000 {
            let (x, z) = (rng.i32(..), rng.i32(..));
            assert_eq!(key_to_coords(to_key(x, z)), (x, z));
        }
    }

    #[test]
    fn distinct_pairs_get_distinct_keys() {
        assert_ne!(to_key(0, -1), to_key(-1, 0));
        assert_ne!(to_key(1, 0), to_key(0, 1));
    }

    #[test]
    fn negative_coordinates_floor() {
        assert_eq!(chunk_grid(-1), -1);
        assert_eq!(chunk_grid(-16), -1);
        assert_eq!(chunk_grid(-17), -2);
        assert_eq!(chunk_grid(15), 0);
        assert_eq!(chunk_origin(-1, 17), (-16, 16));
        assert_eq!(zone_origin(-1, 63), (-64, 0));
        assert_eq!(zone_origin(64, -65), (64, -128));
    }

    #[test]
    fn positions_map_to_containing_cells() {
        assert_eq!(block_containing(Point3::new(-0.5, 3.99, 0.0)), Point3::new(-1, 3, 0));
    }
}
