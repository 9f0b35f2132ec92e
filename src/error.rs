//! # World Errors
//!
//! Recoverable failures surfaced by the world index, the ray march and
//! configuration loading.
//!
//! Contract violations (a local cell index outside a chunk's fixed extent)
//! are not represented here: they panic inside [`crate::voxels::chunk::Chunk`]
//! because no correct caller can produce them.

use thiserror::Error;

/// Errors produced by the voxel world core.
#[derive(Error, Debug)]
pub enum WorldError {
    /// A query or write addressed a column whose chunk was never allocated.
    ///
    /// The coordinates are the world block coordinates of the request.
    #[error("no chunk allocated for column ({x}, {z})")]
    NoChunk {
        /// World x coordinate of the request
        x: i32,
        /// World z coordinate of the request
        z: i32,
    },

    /// The grid march could not select a stepping axis.
    ///
    /// Only reachable with a zero-length or non-finite ray.
    #[error("ray march found no stepping axis (zero or non-finite ray)")]
    DegenerateRay,

    /// A configuration document could not be parsed.
    #[error("invalid world configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// A configuration file could not be read.
    #[error("failed to read world configuration: {0}")]
    Io(#[from] std::io::Error),
}
