//! # Task Management System
//!
//! This module provides a small worker pool for running chunk generation off
//! the owning thread.
//!
//! ## Architecture Overview
//!
//! - `TaskManager`: owns the workers, distributes tasks and collects results
//! - `Task`: a unit of work executed on a worker thread
//! - `TaskResult`: the outcome of a task, applied back on the owning thread
//! - `TaskChannel`: the channel pair between the owning thread and one worker
//!
//! Workers never touch shared world state. A task carries its inputs in, and
//! its result carries the produced data out over the worker's result channel.
//! The owning thread drains those channels and applies each result itself, so
//! the world index needs no locks.
//!
//! ## Task Lifecycle
//! 1. Tasks are published via `TaskManager::publish_task()`
//! 2. The manager hands them to free workers round-robin, queueing the rest
//! 3. Workers process tasks and send back results
//! 4. The owning thread drains results with `collect_completed_tasks()` (non-blocking)
//!    or `wait_for_completed_tasks()` (blocking)
//! 5. Applying a result can publish follow-up tasks
//!
//! ## Performance Considerations
//! - **Task Granularity**: one task per chunk keeps each unit a few milliseconds
//! - **Memory**: each task owns its data; results move a 64 KiB block array, no copies
//! - **Blocking**: nothing in a task waits on the owning thread, so the pool cannot deadlock

pub mod task;

use log::{error, info};
use std::collections::VecDeque;
use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::thread::{self, JoinHandle};
use task::{Task, TaskResult};

/// A communication channel between the owning thread and a worker thread.
///
/// # Fields
/// - `task_sender`: Sends tasks from the owning thread to the worker
/// - `result_receiver`: Receives task results from the worker
/// - `num_tasks_in_flight`: Tasks sent but not yet answered
/// - `alive`: Cleared once the worker hangs up (it panicked)
/// - `_worker`: Handle to the worker thread
#[derive(Debug)]
pub struct TaskChannel {
    task_sender: Sender<Box<dyn Task + Send>>,
    result_receiver: Receiver<Box<dyn TaskResult + Send>>,
    num_tasks_in_flight: usize,
    alive: bool,
    _worker: JoinHandle<()>,
}

/// Manages a pool of worker threads and coordinates task execution.
///
/// Dropping the manager closes every task channel; idle workers then exit on
/// their own.
pub struct TaskManager {
    channels: Vec<TaskChannel>,
    queued_tasks: VecDeque<Box<dyn Task + Send>>,
    current_channel: usize,
}

/// Maximum number of tasks that can be in flight per worker channel.
///
/// Keeping this at 1 leaves the rest in the shared queue, so an idle worker
/// never waits behind a busy one.
pub const MAX_TASKS_IN_FLIGHT: usize = 1;

impl TaskManager {
    /// Creates a new `TaskManager` with the specified number of worker threads.
    ///
    /// A manager with zero workers only queues tasks.
    ///
    /// # Panics
    /// Panics if the underlying thread creation fails.
    pub fn new(num_workers: usize) -> Self {
        let mut channels = Vec::with_capacity(num_workers);

        for worker_index in 0..num_workers {
            let (task_tx, task_rx) = channel::<Box<dyn Task + Send>>();
            let (result_tx, result_rx) = channel::<Box<dyn TaskResult + Send>>();

            let task_closure = move || {
                while let Ok(task) = task_rx.recv() {
                    let result = task.process();
                    if result_tx.send(result).is_err() {
                        break;
                    }
                }
            };

            let worker = thread::Builder::new()
                .name(format!("terrain-worker-{worker_index}"))
                .spawn(task_closure)
                .unwrap_or_else(|e| panic!("failed to spawn terrain worker: {e}"));

            channels.push(TaskChannel {
                task_sender: task_tx,
                result_receiver: result_rx,
                num_tasks_in_flight: 0,
                alive: true,
                _worker: worker,
            });
        }

        info!("Started {} terrain worker(s)", channels.len());

        TaskManager {
            channels,
            queued_tasks: VecDeque::new(),
            current_channel: 0,
        }
    }

    /// Number of worker threads the manager was started with.
    pub fn num_workers(&self) -> usize {
        self.channels.len()
    }

    /// Tasks currently being processed by workers.
    pub fn tasks_in_flight(&self) -> usize {
        self.channels.iter().map(|c| c.num_tasks_in_flight).sum()
    }

    /// Tasks waiting for a free worker.
    pub fn queued_len(&self) -> usize {
        self.queued_tasks.len()
    }

    /// `true` when nothing is queued or in flight.
    pub fn is_idle(&self) -> bool {
        self.queued_tasks.is_empty() && self.tasks_in_flight() == 0
    }

    /// Attempts to send a task to a specific worker channel.
    ///
    /// # Returns
    /// - `Ok(())` if the task was handed to the worker
    /// - `Err(task)` if the worker has hung up, returning the task for requeueing
    fn try_send_task(
        &mut self,
        task: Box<dyn Task + Send>,
        channel_idx: usize,
    ) -> Result<(), Box<dyn Task + Send>> {
        let channel = &mut self.channels[channel_idx];
        match channel.task_sender.send(task) {
            Ok(_) => {
                channel.num_tasks_in_flight += 1;
                Ok(())
            }
            Err(task) => {
                channel.alive = false;
                Err(task.0)
            }
        }
    }

    /// Finds a live worker channel with room for another task, round-robin
    /// from the last used channel.
    fn find_available_channel(&self) -> Option<usize> {
        let len = self.channels.len();
        (0..len)
            .map(|step| (self.current_channel + step) % len)
            .find(|&idx| {
                let channel = &self.channels[idx];
                channel.alive && channel.num_tasks_in_flight < MAX_TASKS_IN_FLIGHT
            })
    }

    /// Publishes a new task for execution.
    ///
    /// # Returns
    /// - `true` if the task was immediately handed to a worker
    /// - `false` if the task was queued because all workers are busy
    pub fn publish_task(&mut self, task: Box<dyn Task + Send>) -> bool {
        let Some(channel_idx) = self.find_available_channel() else {
            self.queued_tasks.push_back(task);
            return false;
        };

        match self.try_send_task(task, channel_idx) {
            Ok(_) => {
                self.current_channel = (channel_idx + 1) % self.channels.len();
                true
            }
            Err(task) => {
                self.queued_tasks.push_back(task);
                false
            }
        }
    }

    /// Hands queued tasks to free workers, oldest first, until either runs out.
    pub fn process_queued_tasks(&mut self) {
        while let Some(channel_idx) = self.find_available_channel() {
            let Some(task) = self.queued_tasks.pop_front() else {
                return;
            };
            match self.try_send_task(task, channel_idx) {
                Ok(_) => self.current_channel = (channel_idx + 1) % self.channels.len(),
                Err(task) => self.queued_tasks.push_front(task),
            }
        }
    }

    /// Records that a worker hung up with work outstanding.
    fn mark_disconnected(channel: &mut TaskChannel) {
        if channel.alive {
            error!(
                "Terrain worker disconnected with {} task(s) in flight",
                channel.num_tasks_in_flight
            );
        }
        channel.alive = false;
        channel.num_tasks_in_flight = 0;
    }

    /// Drains every result that is already available, without blocking.
    ///
    /// Freed workers are immediately given queued tasks.
    pub fn collect_completed_tasks(&mut self) -> Vec<Box<dyn TaskResult + Send>> {
        let mut results = Vec::new();
        for channel in &mut self.channels {
            loop {
                match channel.result_receiver.try_recv() {
                    Ok(result) => {
                        channel.num_tasks_in_flight -= 1;
                        results.push(result);
                    }
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        Self::mark_disconnected(channel);
                        break;
                    }
                }
            }
        }

        self.process_queued_tasks();
        results
    }

    /// Blocks until at least one result is available, then drains everything ready.
    ///
    /// # Returns
    /// The drained results, or an empty vector if there is no outstanding work
    /// (or no live worker left to do it).
    pub fn wait_for_completed_tasks(&mut self) -> Vec<Box<dyn TaskResult + Send>> {
        self.process_queued_tasks();

        loop {
            let results = self.collect_completed_tasks();
            if !results.is_empty() {
                return results;
            }

            let Some(busy) = self
                .channels
                .iter()
                .position(|c| c.alive && c.num_tasks_in_flight > 0)
            else {
                if !self.queued_tasks.is_empty() {
                    error!(
                        "{} terrain task(s) stranded with no live worker",
                        self.queued_tasks.len()
                    );
                }
                return results;
            };

            let channel = &mut self.channels[busy];
            match channel.result_receiver.recv() {
                Ok(result) => {
                    channel.num_tasks_in_flight -= 1;
                    let mut results = vec![result];
                    results.extend(self.collect_completed_tasks());
                    return results;
                }
                Err(_) => Self::mark_disconnected(channel),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WorldConfig;
    use crate::voxels::terrain::Terrain;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingTask {
        counter: Arc<AtomicUsize>,
    }

    struct CountingResult;

    impl Task for CountingTask {
        fn process(&self) -> Box<dyn TaskResult + Send> {
            self.counter.fetch_add(1, Ordering::SeqCst);
            Box::new(CountingResult)
        }
    }

    impl TaskResult for CountingResult {
        fn handle_result(self: Box<Self>, _terrain: &mut Terrain) -> Vec<Box<dyn Task + Send>> {
            Vec::new()
        }
    }

    #[test]
    fn every_published_task_runs_once() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut manager = TaskManager::new(2);

        for _ in 0..10 {
            manager.publish_task(Box::new(CountingTask {
                counter: Arc::clone(&counter),
            }));
        }
        assert!(manager.queued_len() >= 8, "only two workers can take a task at once");

        let mut received = 0;
        loop {
            let results = manager.wait_for_completed_tasks();
            if results.is_empty() {
                break;
            }
            received += results.len();
        }

        assert_eq!(received, 10);
        assert_eq!(counter.load(Ordering::SeqCst), 10);
        assert!(manager.is_idle());
    }

    #[test]
    fn zero_workers_only_queue() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut manager = TaskManager::new(0);
        assert!(!manager.publish_task(Box::new(CountingTask {
            counter: Arc::clone(&counter),
        })));
        assert_eq!(manager.queued_len(), 1);
        assert!(manager.wait_for_completed_tasks().is_empty());
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn results_apply_to_a_terrain() {
        let mut terrain = Terrain::new(WorldConfig {
            generation_threads: 1,
            ..WorldConfig::default()
        });
        let mut manager = TaskManager::new(1);
        manager.publish_task(Box::new(CountingTask {
            counter: Arc::new(AtomicUsize::new(0)),
        }));
        for result in manager.wait_for_completed_tasks() {
            assert!(result.handle_result(&mut terrain).is_empty());
        }
    }
}
