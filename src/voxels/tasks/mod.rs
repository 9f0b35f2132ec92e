//! # Voxel Task System
//!
//! Tasks related to voxel world generation. They run on the terrain's worker
//! pool so zone generation never stalls the owning thread.

pub mod chunk_generation_task;
