use super::{
    errors::{PoolError, TaskResult},
    task::TaskId,
};
use futures::task::AtomicWaker;
use parking_lot::{Condvar, Mutex, MutexGuard};
use std::{
    fmt,
    future::{Future, IntoFuture},
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};

/// Single-writer slot shared by a `Completer` and its `ResultHandle`.
struct Slot<T> {
    outcome: Mutex<Option<TaskResult<T>>>,
    ready: Condvar,
    waker: AtomicWaker,
}

impl<T> Slot<T> {
    fn fulfil(&self, outcome: TaskResult<T>) {
        {
            let mut guard = self.outcome.lock();
            if guard.is_some() {
                return;
            }
            *guard = Some(outcome);
        }
        self.ready.notify_all();
        self.waker.wake();
    }

    fn wait(&self) -> MutexGuard<'_, Option<TaskResult<T>>> {
        let mut guard = self.outcome.lock();
        while guard.is_none() {
            self.ready.wait(&mut guard);
        }
        guard
    }
}

/// Creates the writer/reader pair for one task.
pub(crate) fn pair<T>(id: TaskId) -> (Completer<T>, ResultHandle<T>) {
    let slot = Arc::new(Slot {
        outcome: Mutex::new(None),
        ready: Condvar::new(),
        waker: AtomicWaker::new(),
    });
    (
        Completer {
            slot: Some(slot.clone()),
        },
        ResultHandle { id, slot },
    )
}

/// Write side of a result slot, moved into the task.
/// Dropping it unfulfilled resolves the handle to `NotExecuted`.
pub(crate) struct Completer<T> {
    slot: Option<Arc<Slot<T>>>,
}

impl<T> Completer<T> {
    pub(crate) fn complete(mut self, outcome: TaskResult<T>) {
        if let Some(slot) = self.slot.take() {
            slot.fulfil(outcome);
        }
    }
}

impl<T> Drop for Completer<T> {
    fn drop(&mut self) {
        if let Some(slot) = self.slot.take() {
            slot.fulfil(Err(PoolError::NotExecuted));
        }
    }
}

/// Handle на результат задачи, отданной в пул.
///
/// Blocking callers use [`get`](Self::get) or [`join`](Self::join); async
/// callers can `.await` the handle (which consumes it) and apply their own timeout.
pub struct ResultHandle<T> {
    id: TaskId,
    slot: Arc<Slot<T>>,
}

impl<T> ResultHandle<T> {
    #[inline]
    pub fn id(&self) -> TaskId {
        self.id
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.slot.outcome.lock().is_some()
    }

    /// Blocks until the task has run and returns its outcome by value.
    pub fn join(self) -> TaskResult<T> {
        self.slot
            .wait()
            .take()
            .unwrap_or(Err(PoolError::NotExecuted))
    }
}

impl<T: Clone> ResultHandle<T> {
    /// Blocks until the task has run. The outcome is cached, so repeated
    /// calls return the same value without re-running anything.
    pub fn get(&self) -> TaskResult<T> {
        self.slot
            .wait()
            .clone()
            .unwrap_or(Err(PoolError::NotExecuted))
    }

    /// Non-blocking poll: `None` while the task is still queued or running.
    pub fn try_get(&self) -> Option<TaskResult<T>> {
        self.slot.outcome.lock().clone()
    }
}

impl<T> IntoFuture for ResultHandle<T> {
    type Output = TaskResult<T>;
    type IntoFuture = ResultFuture<T>;

    fn into_future(self) -> Self::IntoFuture {
        ResultFuture { handle: self }
    }
}

/// Future returned by awaiting a [`ResultHandle`]. It owns the handle, so the
/// outcome it takes out of the slot can never be read through the handle again.
pub struct ResultFuture<T> {
    handle: ResultHandle<T>,
}

impl<T> ResultFuture<T> {
    pub fn id(&self) -> TaskId {
        self.handle.id
    }
}

impl<T> Future for ResultFuture<T> {
    type Output = TaskResult<T>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let slot = &self.get_mut().handle.slot;
        slot.waker.register(cx.waker());
        match slot.outcome.lock().take() {
            Some(outcome) => Poll::Ready(outcome),
            None => Poll::Pending,
        }
    }
}

impl<T> fmt::Debug for ResultFuture<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ResultFuture").field(&self.handle).finish()
    }
}

impl<T> fmt::Debug for ResultHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResultHandle")
            .field("id", &self.id)
            .field("finished", &self.is_finished())
            .finish()
    }
}

/// Blocks on every handle and returns the outcomes in submission order.
pub fn join_all<T, I>(handles: I) -> Vec<TaskResult<T>>
where
    I: IntoIterator<Item = ResultHandle<T>>,
{
    handles.into_iter().map(ResultHandle::join).collect()
}
