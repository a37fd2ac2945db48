use parking_lot::Mutex;
use std::{sync::Arc, thread, time::Duration};
use tracing_subscriber::EnvFilter;
use worker_pool::{PoolError, ThreadPool};

fn main() -> Result<(), PoolError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let workers = match num_cpus::get() {
        0 => 4,
        n => n,
    };
    let pool = ThreadPool::new(workers)?;

    // owned by the caller, only serialises the demo output
    let stdout_lock = Arc::new(Mutex::new(()));

    let handles = (0..8)
        .map(|i: u64| {
            let stdout_lock = stdout_lock.clone();
            pool.submit(move || {
                {
                    let _guard = stdout_lock.lock();
                    println!("Task {} executing on thread {:?}", i, thread::current().id());
                }
                thread::sleep(Duration::from_millis(200));
                i * i
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    for handle in handles {
        println!("Result: {}", handle.get()?);
    }

    pool.shutdown();
    Ok(())
}
