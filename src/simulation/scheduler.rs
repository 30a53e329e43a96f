//! Worker pool driving one generation at a time.
//!
//! Each worker is a long-lived thread parked on its own command channel. A generation is a
//! round of messages: the scheduler sends every worker a job carrying a shared handle on
//! the frozen generation N and an owned output buffer, each worker fills the buffer with its
//! slice of generation N+1 and sends it back on the shared report channel. Receiving one
//! report per dispatched job is the barrier; only then is N+1 assembled and sorted.
//!
//! A worker that panics mid-job still reports, without output, and then exits. The generation
//! it was part of fails with `WorkerDisconnected` instead of stalling.
use std::ops::Range;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use log::{debug, error, warn};

use crate::particles::{Particle, RuleSet};
use crate::simulation::update_partition;
use crate::spatial::{GenerationPair, SpatialIndex};
use crate::utils::{split_evenly, SimulationError};

/// Computes one slice of generation N+1; [`update_partition`] outside of tests.
pub(crate) type PartitionKernel = fn(&SpatialIndex, &RuleSet, f32, Range<usize>, &mut Vec<Particle>);

/// Everything a worker needs to compute its slice of one generation.
struct StepJob {
    generation: Arc<SpatialIndex>,
    rules: Arc<RuleSet>,
    friction: f32,
    slots: Range<usize>,
    output: Vec<Particle>,
}

enum WorkerCommand {
    Step(StepJob),
    Shutdown,
}

struct WorkerReport {
    worker: usize,
    slots: Range<usize>,
    /// `None` if the kernel panicked.
    output: Option<Vec<Particle>>,
}

struct Worker {
    commands: Sender<WorkerCommand>,
    thread: Option<JoinHandle<()>>,
    /// Set once the worker has reported a panic; it exits right after.
    failed: bool,
}

fn run_worker(
    id: usize,
    kernel: PartitionKernel,
    commands: Receiver<WorkerCommand>,
    reports: Sender<WorkerReport>,
) {
    while let Ok(command) = commands.recv() {
        let job = match command {
            WorkerCommand::Step(job) => job,
            WorkerCommand::Shutdown => break,
        };

        let StepJob { generation, rules, friction, slots, mut output } = job;
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            kernel(&generation, &rules, friction, slots.clone(), &mut output)
        }));
        // Release the shared handles before reporting, so the scheduler owns them again
        // once the last report arrives.
        drop(generation);
        drop(rules);

        let failed = outcome.is_err();
        if failed {
            error!("Particle worker {} panicked while updating slots {:?}", id, slots);
        }
        let output = if failed { None } else { Some(output) };
        if reports.send(WorkerReport { worker: id, slots, output }).is_err() || failed {
            break;
        }
    }
    debug!("Particle worker {} exiting", id);
}

/// Fixed-size pool of update workers with a static partition of the particle array.
///
/// The partition is derived from the population size and re-derived only when that size
/// changes. Dropping the scheduler tells every worker to stop and joins them all.
pub struct UpdateScheduler {
    workers: Vec<Worker>,
    reports: Receiver<WorkerReport>,
    partitions: Vec<Range<usize>>,
    partitioned_len: Option<usize>,
    buffers: Vec<Vec<Particle>>,
}

impl UpdateScheduler {
    /// Spawns `worker_count` workers. A count of zero is clamped to one.
    ///
    /// # Errors
    /// Returns `SimulationError::Io` if a thread cannot be spawned; workers started so far
    /// are shut down again.
    pub fn new(worker_count: usize) -> Result<Self, SimulationError> {
        Self::with_kernel(worker_count, update_partition)
    }

    pub(crate) fn with_kernel(worker_count: usize, kernel: PartitionKernel) -> Result<Self, SimulationError> {
        let worker_count = if worker_count == 0 {
            warn!("Worker count of 0 requested, using 1");
            1
        } else {
            worker_count
        };

        let (report_sender, reports) = mpsc::channel();
        let mut scheduler = UpdateScheduler {
            workers: Vec::with_capacity(worker_count),
            reports,
            partitions: Vec::new(),
            partitioned_len: None,
            buffers: vec![Vec::new(); worker_count],
        };

        for id in 0..worker_count {
            let (command_sender, commands) = mpsc::channel();
            let reports = report_sender.clone();
            let thread = thread::Builder::new()
                .name(format!("particle-worker-{}", id))
                .spawn(move || run_worker(id, kernel, commands, reports))?;
            scheduler.workers.push(Worker {
                commands: command_sender,
                thread: Some(thread),
                failed: false,
            });
        }

        debug!("Started {} particle workers", worker_count);
        Ok(scheduler)
    }

    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    /// Slot ranges currently assigned to each worker. Empty until the first generation.
    pub fn partitions(&self) -> &[Range<usize>] {
        &self.partitions
    }

    fn repartition(&mut self, len: usize) {
        self.partitions = split_evenly(len, self.workers.len());
        self.partitioned_len = Some(len);
        debug!("Partitioned {} particles across {} workers", len, self.workers.len());
    }

    /// Computes the next generation into `generations` and swaps it in.
    ///
    /// # Errors
    /// Returns `SimulationError::WorkerDisconnected` if a worker panicked during this
    /// generation or had already exited. Every outstanding report is still collected, and the
    /// generation pair is left unswapped.
    pub fn advance(
        &mut self,
        generations: &mut GenerationPair,
        rules: &Arc<RuleSet>,
        friction: f32,
    ) -> Result<(), SimulationError> {
        let len = generations.current().len();
        if self.partitioned_len != Some(len) {
            self.repartition(len);
        }

        let generation = generations.share_current();
        let mut outstanding = Vec::with_capacity(self.workers.len());
        let mut failed_worker = None;
        for (id, (worker, slots)) in self.workers.iter().zip(&self.partitions).enumerate() {
            if slots.is_empty() {
                continue;
            }
            if worker.failed {
                failed_worker.get_or_insert(id);
                continue;
            }
            let job = StepJob {
                generation: Arc::clone(&generation),
                rules: Arc::clone(rules),
                friction,
                slots: slots.clone(),
                output: std::mem::take(&mut self.buffers[id]),
            };
            // Jobs already sent still have to be collected, so a dead worker is not an early return.
            if worker.commands.send(WorkerCommand::Step(job)).is_err() {
                failed_worker.get_or_insert(id);
                continue;
            }
            outstanding.push(id);
        }
        drop(generation);

        let next = generations.next_mut();
        while let Some(&waiting_on) = outstanding.first() {
            // Every live worker holds a report sender, so this only fails once all have exited.
            let report = self
                .reports
                .recv()
                .map_err(|_| SimulationError::WorkerDisconnected(waiting_on))?;
            outstanding.retain(|&id| id != report.worker);
            match report.output {
                Some(output) => {
                    next[report.slots].copy_from_slice(&output);
                    self.buffers[report.worker] = output;
                }
                None => {
                    self.workers[report.worker].failed = true;
                    failed_worker.get_or_insert(report.worker);
                }
            }
        }
        if let Some(worker) = failed_worker {
            return Err(SimulationError::WorkerDisconnected(worker));
        }

        generations.swap();
        Ok(())
    }
}

impl Drop for UpdateScheduler {
    fn drop(&mut self) {
        for worker in &self.workers {
            // A worker that already exited has nothing left to stop.
            let _ = worker.commands.send(WorkerCommand::Shutdown);
        }
        for (id, worker) in self.workers.iter_mut().enumerate() {
            if let Some(thread) = worker.thread.take() {
                if thread.join().is_err() {
                    error!("Particle worker {} panicked", id);
                }
            }
        }
        debug!("Stopped {} particle workers", self.workers.len());
    }
}
