use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;
use worker_pool::{join_all, Config, ThreadPool};

// Benchmark 1: submit + get overhead for trivial tasks
fn bench_submit_overhead(c: &mut Criterion) {
    let mut group = c.benchmark_group("submit_overhead");
    let pool = ThreadPool::with_config(Config::cpu_bound()).unwrap();

    for size in [100, 1000, 10000] {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("get_each", size), &size, |b, &size| {
            b.iter(|| {
                let handles: Vec<_> = (0..size)
                    .map(|i| pool.submit(move || black_box(i)).unwrap())
                    .collect();

                for handle in handles {
                    black_box(handle.join().unwrap());
                }
            });
        });

        group.bench_with_input(BenchmarkId::new("wait_idle", size), &size, |b, &size| {
            b.iter(|| {
                for i in 0..size {
                    let _ = pool.submit(move || black_box(i)).unwrap();
                }
                pool.wait_idle();
            });
        });
    }

    group.finish();
}

// Benchmark 2: CPU-bound work across pool sizes
fn bench_cpu_bound(c: &mut Criterion) {
    let mut group = c.benchmark_group("cpu_bound");
    let max_threads = num_cpus::get().max(1);

    for threads in [1, 2, max_threads] {
        let pool = ThreadPool::new(threads).unwrap();

        group.bench_with_input(BenchmarkId::new("fib_25", threads), &threads, |b, _| {
            b.iter(|| {
                let handles: Vec<_> = (0..64)
                    .map(|_| pool.submit(|| fib(black_box(25))).unwrap())
                    .collect();
                black_box(join_all(handles));
            });
        });
    }

    group.finish();
}

fn fib(n: u64) -> u64 {
    if n < 2 {
        n
    } else {
        fib(n - 1) + fib(n - 2)
    }
}

criterion_group!(benches, bench_submit_overhead, bench_cpu_bound);
criterion_main!(benches);
