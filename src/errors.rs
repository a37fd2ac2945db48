/// Outcome stored in a [`ResultHandle`](crate::handle::ResultHandle).
pub type TaskResult<T> = Result<T, PoolError>;

#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone)]
pub enum PoolError {
    /// Submission attempted after shutdown began.
    #[error("submit on a stopped thread pool")]
    PoolStopped,

    /// The task body panicked while running on a worker.
    #[error("task failed: {0}")]
    TaskFailure(String),

    #[error("failed to spawn worker thread: {0}")]
    ThreadCreation(String),

    /// The task was discarded before any worker ran it.
    #[error("task was never executed")]
    NotExecuted,

    #[error("config error: {0}")]
    Config(String),
}

impl PoolError {
    pub fn config<S: Into<String>>(msg: S) -> Self {
        PoolError::Config(msg.into())
    }

    pub fn is_task_failure(&self) -> bool {
        matches!(self, PoolError::TaskFailure(_))
    }
}

impl From<std::io::Error> for PoolError {
    fn from(err: std::io::Error) -> Self {
        PoolError::ThreadCreation(err.to_string())
    }
}
