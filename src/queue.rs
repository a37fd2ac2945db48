//! Shared FIFO of pending tasks.
//!
//! One mutex guards both the buffer and the pool state, so a worker can never
//! observe `Stopping` while a task it should drain is still invisible to it.

use crate::errors::PoolError;
use crate::task::Task;
use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolState {
    Running,
    Stopping,
}

#[derive(Debug)]
struct QueueInner {
    tasks: VecDeque<Task>,
    state: PoolState,
    // queued + currently executing
    in_flight: usize,
}

#[derive(Debug)]
pub(crate) struct TaskQueue {
    inner: Mutex<QueueInner>,
    available: Condvar,
    idle: Condvar,
}

impl TaskQueue {
    pub(crate) fn new() -> Self {
        Self {
            inner: Mutex::new(QueueInner {
                tasks: VecDeque::new(),
                state: PoolState::Running,
                in_flight: 0,
            }),
            available: Condvar::new(),
            idle: Condvar::new(),
        }
    }

    /// Appends to the tail and wakes one waiting worker.
    /// On a stopped queue the task is dropped unexecuted.
    pub(crate) fn push(&self, task: Task) -> Result<(), PoolError> {
        {
            let mut inner = self.inner.lock();
            if inner.state == PoolState::Stopping {
                return Err(PoolError::PoolStopped);
            }
            inner.tasks.push_back(task);
            inner.in_flight += 1;
        }
        self.available.notify_one();
        Ok(())
    }

    /// Blocks until a task is available. `None` means the queue is stopping
    /// and fully drained, so the worker should exit.
    pub(crate) fn pop_blocking(&self) -> Option<Task> {
        let mut inner = self.inner.lock();
        loop {
            if let Some(task) = inner.tasks.pop_front() {
                return Some(task);
            }
            if inner.state == PoolState::Stopping {
                return None;
            }
            self.available.wait(&mut inner);
        }
    }

    /// Called by a worker once a popped task has finished.
    pub(crate) fn task_done(&self) {
        let mut inner = self.inner.lock();
        inner.in_flight = inner.in_flight.saturating_sub(1);
        if inner.in_flight == 0 {
            self.idle.notify_all();
        }
    }

    pub(crate) fn wait_idle(&self) {
        let mut inner = self.inner.lock();
        while inner.in_flight > 0 {
            self.idle.wait(&mut inner);
        }
    }

    /// Moves the queue to `Stopping` and wakes every worker.
    /// Returns `true` only for the call that made the transition.
    pub(crate) fn close(&self) -> bool {
        let transitioned = {
            let mut inner = self.inner.lock();
            let was_running = inner.state == PoolState::Running;
            inner.state = PoolState::Stopping;
            was_running
        };
        self.available.notify_all();
        transitioned
    }

    pub(crate) fn state(&self) -> PoolState {
        self.inner.lock().state
    }

    pub(crate) fn len(&self) -> usize {
        self.inner.lock().tasks.len()
    }
}
