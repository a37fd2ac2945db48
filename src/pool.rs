use super::{
    config::Config,
    errors::PoolError,
    handle::{self, ResultHandle},
    model::{Counters, PoolMetrics},
    panic_handler::PanicHandler,
    queue::{PoolState, TaskQueue},
    task::{Task, TaskId},
    worker::{Worker, WorkerId},
};
use parking_lot::{Condvar, Mutex};
use std::{
    fmt, io, mem,
    sync::{atomic::Ordering, Arc},
    thread::{self, JoinHandle, ThreadId},
};

struct WorkerHandle {
    id: WorkerId,
    thread: JoinHandle<()>,
}

/// Пул потоков фиксированного размера с общей FIFO-очередью.
///
/// Workers are spawned up front and live until [`shutdown`](Self::shutdown),
/// which also runs on drop. Shutdown drains: every task accepted by
/// [`submit`](Self::submit) executes before the workers exit.
///
/// The pool is not `Clone`; wrap it in an `Arc` to share it between threads.
/// Neither `shutdown` nor dropping the last owner should be relied on from
/// inside a task running on this pool: the workers cannot join themselves,
/// so such a call only closes the queue.
pub struct ThreadPool {
    queue: Arc<TaskQueue>,
    workers: Mutex<Vec<WorkerHandle>>,
    worker_threads: Vec<ThreadId>,
    // set by the shutdown call that joined the workers
    terminated: Mutex<bool>,
    terminated_cv: Condvar,
    counters: Arc<Counters>,
    panic_handler: Arc<PanicHandler>,
    config: Config,
}

impl ThreadPool {
    /// A worker count of zero is clamped to one.
    pub fn new(num_threads: usize) -> Result<Self, PoolError> {
        let config = Config {
            num_threads: num_threads.max(1),
            ..Default::default()
        };
        Self::with_config(config)
    }

    pub fn with_config(config: Config) -> Result<Self, PoolError> {
        config.validate()?;
        Self::spawn_with(config, |name, stack_size, worker| {
            let mut builder = thread::Builder::new().name(name);
            if let Some(stack_size) = stack_size {
                builder = builder.stack_size(stack_size);
            }
            builder.spawn(move || worker.run())
        })
    }

    // Spawns the workers through `spawn`; on failure the workers created so far
    // are stopped and joined before the error is returned.
    fn spawn_with<S>(config: Config, mut spawn: S) -> Result<Self, PoolError>
    where
        S: FnMut(String, Option<usize>, Worker) -> io::Result<JoinHandle<()>>,
    {
        let queue = Arc::new(TaskQueue::new());
        let counters = Arc::new(Counters::default());
        let panic_handler = Arc::new(PanicHandler::new(config.panic_strategy));
        let mut workers = Vec::with_capacity(config.num_threads);

        for id in 0..config.num_threads {
            let worker = Worker::new(id, queue.clone(), panic_handler.clone(), counters.clone());
            match spawn(config.thread_name(id), config.stack_size, worker) {
                Ok(thread) => workers.push(WorkerHandle { id, thread }),
                Err(err) => {
                    tracing::error!(worker = id, error = %err, "failed to spawn worker, rolling back");
                    queue.close();
                    for handle in workers {
                        let _ = handle.thread.join();
                    }
                    return Err(err.into());
                }
            }
        }

        tracing::debug!(
            workers = config.num_threads,
            prefix = %config.thread_name_prefix,
            "thread pool started"
        );

        let worker_threads = workers.iter().map(|w| w.thread.thread().id()).collect();

        Ok(Self {
            queue,
            workers: Mutex::new(workers),
            worker_threads,
            terminated: Mutex::new(false),
            terminated_cv: Condvar::new(),
            counters,
            panic_handler,
            config,
        })
    }

    /// Queues `f` and returns a handle to its outcome without blocking.
    ///
    /// A panic inside `f` is caught by the worker and surfaces as
    /// [`PoolError::TaskFailure`] on the handle. After shutdown has begun this
    /// fails with [`PoolError::PoolStopped`] and no handle is created.
    pub fn submit<F, T>(&self, f: F) -> Result<ResultHandle<T>, PoolError>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let id = TaskId::next();
        let (completer, handle) = handle::pair(id);

        let task = Task::new(id, move |panic_handler: &PanicHandler| {
            let outcome = panic_handler
                .execute(f)
                .map_err(|info| PoolError::TaskFailure(info.message));
            let succeeded = outcome.is_ok();
            completer.complete(outcome);
            succeeded
        });

        self.counters.submitted.fetch_add(1, Ordering::Relaxed);
        if let Err(err) = self.queue.push(task) {
            self.counters.submitted.fetch_sub(1, Ordering::Relaxed);
            tracing::warn!(task = %id, "submit rejected: pool is stopping");
            return Err(err);
        }

        tracing::trace!(task = %id, "task queued");
        Ok(handle)
    }

    /// Blocks until every accepted task has finished.
    pub fn wait_idle(&self) {
        self.queue.wait_idle();
    }

    /// Stops accepting tasks, lets the workers drain the queue, and blocks
    /// until every worker has terminated. Concurrent or repeated calls wait for
    /// the same termination; a call from a pool worker only closes the queue.
    pub fn shutdown(&self) {
        if self.queue.close() {
            tracing::info!(queued = self.queue.len(), "thread pool shutting down");
        }

        if self.worker_threads.contains(&thread::current().id()) {
            tracing::warn!("shutdown called from a pool worker; workers left to exit on their own");
            return;
        }

        let workers = mem::take(&mut *self.workers.lock());
        if workers.is_empty() {
            // another caller owns the joins
            let mut terminated = self.terminated.lock();
            while !*terminated {
                self.terminated_cv.wait(&mut terminated);
            }
            return;
        }

        for worker in workers {
            if worker.thread.join().is_err() {
                tracing::error!(worker = worker.id, "worker thread panicked");
            }
        }

        *self.terminated.lock() = true;
        self.terminated_cv.notify_all();
        tracing::debug!("all workers terminated");
    }

    pub fn is_running(&self) -> bool {
        self.queue.state() == PoolState::Running
    }

    pub fn state(&self) -> PoolState {
        self.queue.state()
    }

    pub fn num_threads(&self) -> usize {
        self.config.num_threads
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    #[inline]
    pub fn metrics(&self) -> PoolMetrics {
        self.counters.snapshot(self.queue.len())
    }

    pub fn panic_count(&self) -> usize {
        self.panic_handler.panic_count()
    }
}

impl Drop for ThreadPool {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl fmt::Debug for ThreadPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThreadPool")
            .field("num_threads", &self.config.num_threads)
            .field("state", &self.state())
            .field("metrics", &self.metrics())
            .finish()
    }
}
