use crossbeam::utils::CachePadded;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolMetrics {
    pub active_tasks: usize,
    pub idle_workers: usize,
    pub queued_tasks: usize,
    pub total_submitted: usize,
    pub completed_tasks: usize,
    pub failed_tasks: usize,
}

impl PoolMetrics {
    pub fn utilization(&self) -> f64 {
        if self.active_tasks + self.idle_workers == 0 {
            return 0.0;
        }
        self.active_tasks as f64 / (self.active_tasks + self.idle_workers) as f64
    }

    pub fn success_rate(&self) -> f64 {
        let total = self.completed_tasks + self.failed_tasks;
        if total == 0 {
            return 1.0;
        }
        self.completed_tasks as f64 / total as f64
    }

    pub fn finished_tasks(&self) -> usize {
        self.completed_tasks + self.failed_tasks
    }
}

/// Счетчики пула, обновляются воркерами без блокировок
#[derive(Debug, Default)]
pub(crate) struct Counters {
    pub(crate) active: CachePadded<AtomicUsize>,
    pub(crate) idle: CachePadded<AtomicUsize>,
    pub(crate) submitted: CachePadded<AtomicUsize>,
    pub(crate) completed: CachePadded<AtomicUsize>,
    pub(crate) failed: CachePadded<AtomicUsize>,
}

impl Counters {
    pub(crate) fn snapshot(&self, queued_tasks: usize) -> PoolMetrics {
        PoolMetrics {
            active_tasks: self.active.load(Ordering::Relaxed),
            idle_workers: self.idle.load(Ordering::Relaxed),
            queued_tasks,
            total_submitted: self.submitted.load(Ordering::Relaxed),
            completed_tasks: self.completed.load(Ordering::Relaxed),
            failed_tasks: self.failed.load(Ordering::Relaxed),
        }
    }
}
