//! # Task System Core Traits
//!
//! This module defines the two halves of a unit of background work.
//!
//! ## Task Lifecycle
//! 1. A `Task` is created and scheduled via `TaskManager::publish_task()`
//! 2. The task's `process()` method is called on a worker thread
//! 3. The task returns a boxed `TaskResult`
//! 4. The owning thread drains the result and calls `handle_result()` with the terrain
//! 5. The result can apply itself to the terrain and spawn follow-up tasks
//!
//! ## Thread Safety
//! - `Task` must be `Send` to be transferred to a worker
//! - `TaskResult` must be `Send` to be transferred back to the owning thread
//! - Tasks own all of their inputs; they never reach into the terrain

use crate::voxels::terrain::Terrain;

/// A unit of work that runs on a worker thread.
///
/// Tasks should be self-contained: everything `process()` needs is moved into
/// the task when it is created.
pub trait Task: Send {
    /// Performs the work and packages the outcome.
    ///
    /// Runs on a worker thread. Must not block on the owning thread.
    fn process(&self) -> Box<dyn TaskResult + Send>;
}

/// The outcome of a `Task`, applied on the owning thread.
pub trait TaskResult: Send {
    /// Applies the result to the terrain.
    ///
    /// # Returns
    /// Follow-up tasks to publish (may be empty).
    fn handle_result(self: Box<Self>, terrain: &mut Terrain) -> Vec<Box<dyn Task + Send>>;
}
