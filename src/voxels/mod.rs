//! # Voxel World
//!
//! Everything that stores or produces blocks:
//!
//! - [`block`]: block types, faces and the texture atlas
//! - [`chunk`]: fixed-size block columns with neighbor links
//! - [`coords`]: world, chunk and zone coordinates and spatial keys
//! - [`generator`]: the biome-blended height field
//! - [`carver`]: the L-system river carver
//! - [`terrain`]: the world index that ties them together
//! - [`tasks`]: background work scheduled by the terrain

pub mod block;
pub mod carver;
pub mod chunk;
pub mod coords;
pub mod generator;
pub mod tasks;
pub mod terrain;
