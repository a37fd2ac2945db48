use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

/// What the worker does after catching a panic from a task body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanicStrategy {
    /// Record the failure in the handle only.
    Isolate,
    #[default]
    LogAndContinue,
}

/// Граница воркера: паника задачи не выходит за пределы потока
#[derive(Debug)]
pub struct PanicHandler {
    strategy: PanicStrategy,
    caught: AtomicUsize,
}

impl PanicHandler {
    pub fn new(strategy: PanicStrategy) -> Self {
        Self {
            strategy,
            caught: AtomicUsize::new(0),
        }
    }

    /// Runs a task body, turning an unwind into a `CaughtPanic`.
    pub fn execute<F, R>(&self, body: F) -> Result<R, CaughtPanic>
    where
        F: FnOnce() -> R,
    {
        catch_unwind(AssertUnwindSafe(body)).map_err(|payload| {
            self.caught.fetch_add(1, Ordering::Relaxed);
            let caught = CaughtPanic {
                message: payload_message(payload.as_ref()),
                worker: thread::current().name().map(str::to_owned),
            };

            if self.strategy == PanicStrategy::LogAndContinue {
                tracing::warn!(
                    worker = caught.worker.as_deref().unwrap_or("unnamed"),
                    message = %caught.message,
                    "task panicked"
                );
            }
            caught
        })
    }

    pub fn panic_count(&self) -> usize {
        self.caught.load(Ordering::Relaxed)
    }

    pub fn strategy(&self) -> PanicStrategy {
        self.strategy
    }
}

impl Default for PanicHandler {
    fn default() -> Self {
        Self::new(PanicStrategy::default())
    }
}

/// A panic stopped at the worker boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaughtPanic {
    pub message: String,
    /// Name of the worker thread the task was running on.
    pub worker: Option<String>,
}

// `panic!` payloads are `&'static str` for literals and `String` once formatted
fn payload_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}
