#[cfg(test)]
mod tests {
    use worker_pool::{
        errors::PoolError,
        handle::join_all,
        pool::ThreadPool,
        Config,
    };
    use std::{
        sync::Arc,
        thread,
        time::{Duration, Instant},
    };

    fn measure<F, T>(name: &str, f: F) -> T
    where
        F: FnOnce() -> T,
    {
        let start = Instant::now();
        let result = f();
        let elapsed = start.elapsed();
        println!("✓ {}: {:?}", name, elapsed);
        result
    }

    #[test]
    fn load_test_1_parallel_sleepers() {
        println!("\n=== LOAD TEST 1: 100 tasks x 1ms on 2 workers ===");
        let pool = ThreadPool::new(2).unwrap();

        let start = Instant::now();
        let handles: Vec<_> = (0..100usize)
            .map(|i| {
                pool.submit(move || {
                    let begin = Instant::now();
                    thread::sleep(Duration::from_millis(1));
                    (i, begin.elapsed())
                })
                .unwrap()
            })
            .collect();

        let results = join_all(handles);
        let wall = start.elapsed();

        let mut busy = Duration::ZERO;
        for (expected, result) in results.into_iter().enumerate() {
            let (index, took) = result.unwrap();
            assert_eq!(index, expected);
            busy += took;
        }

        println!("  wall: {:?}, summed task time: {:?}", wall, busy);
        assert!(
            wall < busy.mul_f64(0.85),
            "two workers should overlap sleeps: wall {:?} vs serial {:?}",
            wall,
            busy
        );
        assert!(wall < Duration::from_secs(5));
    }

    #[test]
    fn load_test_2_small_fast_tasks() {
        println!("\n=== LOAD TEST 2: 10k tiny tasks ===");
        let pool = ThreadPool::with_config(Config::cpu_bound()).unwrap();

        let sum = measure("10k tasks", || {
            let handles: Vec<_> = (0..10_000u64)
                .map(|x| pool.submit(move || x * 2).unwrap())
                .collect();
            join_all(handles)
                .into_iter()
                .map(|r| r.unwrap())
                .sum::<u64>()
        });

        assert_eq!(sum, 2 * (0..10_000u64).sum::<u64>());
        let metrics = pool.metrics();
        assert_eq!(metrics.total_submitted, 10_000);
        println!("  success rate: {:.1}%", metrics.success_rate() * 100.0);
    }

    #[test]
    fn load_test_3_concurrent_submitters() {
        println!("\n=== LOAD TEST 3: 8 submitting threads ===");
        let pool = Arc::new(ThreadPool::new(4).unwrap());

        let submitters: Vec<_> = (0..8u64)
            .map(|t| {
                let pool = pool.clone();
                thread::spawn(move || {
                    let handles: Vec<_> = (0..500u64)
                        .map(|i| pool.submit(move || t * 1_000 + i).unwrap())
                        .collect();
                    join_all(handles)
                        .into_iter()
                        .map(|r| r.unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        for (t, submitter) in submitters.into_iter().enumerate() {
            let values = submitter.join().unwrap();
            let expected: Vec<u64> = (0..500).map(|i| t as u64 * 1_000 + i).collect();
            assert_eq!(values, expected);
        }

        pool.wait_idle();
        assert_eq!(pool.metrics().completed_tasks, 4_000);
    }

    #[test]
    fn load_test_4_shutdown_races_submitters() {
        println!("\n=== LOAD TEST 4: shutdown while submitting ===");
        let pool = Arc::new(ThreadPool::new(3).unwrap());

        let submitters: Vec<_> = (0..4)
            .map(|_| {
                let pool = pool.clone();
                thread::spawn(move || {
                    let mut accepted = Vec::new();
                    let mut rejected = 0usize;
                    for i in 0..2_000u32 {
                        match pool.submit(move || i) {
                            Ok(handle) => accepted.push((i, handle)),
                            Err(PoolError::PoolStopped) => rejected += 1,
                            Err(other) => panic!("unexpected error: {}", other),
                        }
                    }
                    (accepted, rejected)
                })
            })
            .collect();

        thread::sleep(Duration::from_millis(2));
        pool.shutdown();

        let mut total_accepted = 0;
        for submitter in submitters {
            let (accepted, rejected) = submitter.join().unwrap();
            total_accepted += accepted.len();
            assert_eq!(accepted.len() + rejected, 2_000);
            // every accepted task ran during the drain
            for (i, handle) in accepted {
                assert_eq!(handle.get(), Ok(i));
            }
        }

        println!("  accepted before shutdown: {}", total_accepted);
        assert_eq!(pool.metrics().total_submitted, total_accepted);
    }
}
