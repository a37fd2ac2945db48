// worker thread loop
use crate::model::Counters;
use crate::panic_handler::PanicHandler;
use crate::queue::TaskQueue;
use crate::task::Task;
use std::sync::atomic::Ordering;
use std::sync::Arc;

pub type WorkerId = usize;

pub(crate) struct Worker {
    pub(crate) id: WorkerId,
    queue: Arc<TaskQueue>,
    panic_handler: Arc<PanicHandler>,
    counters: Arc<Counters>,
}

impl Worker {
    pub(crate) fn new(
        id: WorkerId,
        queue: Arc<TaskQueue>,
        panic_handler: Arc<PanicHandler>,
        counters: Arc<Counters>,
    ) -> Self {
        Self {
            id,
            queue,
            panic_handler,
            counters,
        }
    }

    // Idle -> Executing -> Idle ... until the queue hands back the shutdown sentinel
    pub(crate) fn run(self) {
        tracing::debug!(worker = self.id, "worker started");

        loop {
            self.counters.idle.fetch_add(1, Ordering::Relaxed);
            let next = self.queue.pop_blocking();
            self.counters.idle.fetch_sub(1, Ordering::Relaxed);

            match next {
                Some(task) => self.execute(task),
                None => break,
            }
        }

        tracing::debug!(worker = self.id, "worker terminated");
    }

    fn execute(&self, task: Task) {
        let id = task.id;
        self.counters.active.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(worker = self.id, task = %id, "executing task");

        if task.run(&self.panic_handler) {
            self.counters.completed.fetch_add(1, Ordering::Relaxed);
        } else {
            self.counters.failed.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(worker = self.id, task = %id, "task failed");
        }

        self.counters.active.fetch_sub(1, Ordering::Relaxed);
        self.queue.task_done();
    }
}
