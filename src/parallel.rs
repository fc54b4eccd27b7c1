//! The external parallel-executor contract (spec §5, §6) and a bundled
//! `rayon`-backed implementation, grounded in the teacher's own use of
//! `rayon::ThreadPoolBuilder`/`par_bridge` for its upscaling and resample
//! pools.

use crate::error::ScaleError;

/// A unit of work submitted to the parallelizer. Chunk tasks return
/// `Result<(), ScaleError>`; the dispatcher (spec §4.6, §7) collects the
/// first error after every submitted task has completed.
pub type Task<'a> = Box<dyn FnOnce() -> Result<(), ScaleError> + Send + 'a>;

/// External collaborator that runs a batch of independent tasks, blocking
/// the caller until all of them finish.
///
/// Implementations must treat every task as independent and safe to run
/// concurrently with any other submitted task; the engine only ever
/// submits tasks that write to disjoint destination rows.
pub trait Parallelizer: Sync {
    /// Runs every task in `tasks`, returning only once all have completed.
    /// Returns the first `Err` observed, if any, after every task has
    /// terminated -- a failing task must not prevent the others from
    /// running to completion.
    fn execute_and_wait(&self, tasks: Vec<Task<'_>>) -> Result<(), ScaleError>;
}

/// The default [`Parallelizer`], backed by rayon's global thread pool via
/// `rayon::scope`. Tasks are spawned into the scope and the scope itself
/// provides the "all submitted chunks have completed" barrier spec §5
/// requires before `drawScaledRect` returns.
#[derive(Debug, Default, Clone, Copy)]
pub struct RayonParallelizer;

impl Parallelizer for RayonParallelizer {
    fn execute_and_wait(&self, tasks: Vec<Task<'_>>) -> Result<(), ScaleError> {
        use std::sync::Mutex;

        let first_err: Mutex<Option<ScaleError>> = Mutex::new(None);

        rayon::scope(|scope| {
            for task in tasks {
                let first_err = &first_err;
                scope.spawn(move |_| {
                    if let Err(e) = task() {
                        let mut slot = first_err.lock().unwrap_or_else(|e| e.into_inner());
                        if slot.is_none() {
                            *slot = Some(e);
                        }
                    }
                });
            }
        });

        match first_err.into_inner().unwrap_or_else(|e| e.into_inner()) {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// A single-threaded parallelizer that runs every task inline, in order.
/// Used by tests that need deterministic, easy-to-reason-about execution
/// and by embedders with no thread pool of their own (spec's "1 worker"
/// case from property 7, parallel determinism).
#[derive(Debug, Default, Clone, Copy)]
pub struct InlineParallelizer;

impl Parallelizer for InlineParallelizer {
    fn execute_and_wait(&self, tasks: Vec<Task<'_>>) -> Result<(), ScaleError> {
        let mut first_err = None;
        for task in tasks {
            if let Err(e) = task() {
                if first_err.is_none() {
                    first_err = Some(e);
                }
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
