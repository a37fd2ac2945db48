//! Type-erased unit of work owned by the queue until a worker claims it.

use crate::panic_handler::PanicHandler;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static TASK_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a submitted task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

impl TaskId {
    pub(crate) fn next() -> Self {
        TaskId(TASK_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task-{}", self.0)
    }
}

/// The worker passes its panic handler in, so failures are caught on the worker side.
type Job = Box<dyn FnOnce(&PanicHandler) -> bool + Send + 'static>;

pub(crate) struct Task {
    pub(crate) id: TaskId,
    job: Job,
}

impl Task {
    /// `job` returns `true` when the body completed without panicking.
    pub(crate) fn new<F>(id: TaskId, job: F) -> Self
    where
        F: FnOnce(&PanicHandler) -> bool + Send + 'static,
    {
        Task {
            id,
            job: Box::new(job),
        }
    }

    /// Consumes the task, so it can run at most once.
    pub(crate) fn run(self, handler: &PanicHandler) -> bool {
        (self.job)(handler)
    }
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task").field("id", &self.id).finish()
    }
}
