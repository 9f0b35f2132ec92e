//! Ray queries against the voxel grid and the things built on them: block
//! targeting and editing, and a colliding player body.

pub mod editing;
pub mod grid_march;
pub mod player;
