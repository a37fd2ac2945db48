//! Пул потоков фиксированного размера для блокирующих и CPU-bound задач
//!
//! # Features
//! - Fixed worker count chosen at construction
//! - One shared FIFO queue guarded by a mutex and condition variable
//! - Per-task result handles: blocking `get`/`join` or `.await`
//! - Panics are contained in the failing task's handle
//! - Draining shutdown: every accepted task runs before workers exit
//!
//! ```no_run
//! use worker_pool::ThreadPool;
//!
//! let pool = ThreadPool::new(4)?;
//! let handles: Vec<_> = (0..8)
//!     .map(|i| pool.submit(move || i * i))
//!     .collect::<Result<_, _>>()?;
//!
//! for handle in handles {
//!     println!("{:?}", handle.get());
//! }
//! pool.shutdown();
//! # Ok::<(), worker_pool::PoolError>(())
//! ```

pub mod config;
pub mod errors;
pub mod handle;
pub mod model;
pub mod panic_handler;
pub mod pool;
pub mod queue;
pub mod task;
mod worker;

pub use config::{Config, ConfigBuilder};
pub use errors::{PoolError, TaskResult};
pub use handle::{join_all, ResultFuture, ResultHandle};
pub use model::PoolMetrics;
pub use panic_handler::PanicStrategy;
pub use pool::ThreadPool;
pub use queue::PoolState;
pub use task::TaskId;
