//! Pool vs heap allocation benchmarks
//!
//! Compares the arena front-end against per-request system heap allocation

use arena_pool::allocator::{ElementAllocator, HeapAllocator, PoolAllocator, PoolConfig};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

#[derive(Clone, Copy)]
#[allow(dead_code)]
struct Node {
    key: u64,
    left: u32,
    right: u32,
}

/// Benchmark a single-element allocate/deallocate cycle
fn bench_single_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_cycle");

    // Free list recycles the same slot every iteration
    group.bench_function("pool_recycling", |b| {
        let allocator = PoolAllocator::<Node>::with_config(PoolConfig::recycling(1024)).unwrap();

        b.iter(|| unsafe {
            let span = allocator.allocate(1).unwrap();
            allocator.deallocate(span.cast(), 1);
            black_box(span);
        });
    });

    // System heap (baseline)
    group.bench_function("heap", |b| {
        let allocator = HeapAllocator::<Node>::new();

        b.iter(|| unsafe {
            let span = allocator.allocate(1).unwrap();
            allocator.deallocate(span.cast(), 1);
            black_box(span);
        });
    });

    group.finish();
}

/// Benchmark building many nodes, then dropping the whole set
fn bench_bulk_nodes(c: &mut Criterion) {
    let mut group = c.benchmark_group("bulk_nodes");

    for count in [100usize, 1_000, 10_000] {
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("pool", count), &count, |b, &count| {
            b.iter(|| {
                let allocator = PoolAllocator::<Node>::with_config(PoolConfig::production()).unwrap();
                for key in 0..count {
                    let slot = allocator.allocate(1).unwrap().cast::<Node>();
                    unsafe {
                        allocator.construct(
                            slot,
                            Node {
                                key: key as u64,
                                left: 0,
                                right: 0,
                            },
                        );
                    }
                    black_box(slot);
                }
                // pool teardown releases every block at once
            });
        });

        group.bench_with_input(BenchmarkId::new("pool_reserved", count), &count, |b, &count| {
            b.iter(|| {
                let allocator = PoolAllocator::<Node>::with_config(PoolConfig::production()).unwrap();
                allocator.reserve(count).unwrap();
                for _ in 0..count {
                    black_box(allocator.allocate(1).unwrap());
                }
            });
        });

        group.bench_with_input(BenchmarkId::new("heap", count), &count, |b, &count| {
            let allocator = HeapAllocator::<Node>::new();
            b.iter(|| {
                let mut slots = Vec::with_capacity(count);
                for key in 0..count {
                    let slot = allocator.allocate(1).unwrap().cast::<Node>();
                    unsafe {
                        allocator.construct(
                            slot,
                            Node {
                                key: key as u64,
                                left: 0,
                                right: 0,
                            },
                        );
                    }
                    slots.push(slot);
                }
                for slot in slots {
                    unsafe { allocator.deallocate(slot, 1) };
                }
            });
        });
    }

    group.finish();
}

/// Benchmark growth cost across chunk sizes
fn bench_chunk_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("chunk_sizes");
    group.throughput(Throughput::Elements(4_096));

    for chunk in [16usize, 256, 4_096] {
        group.bench_with_input(BenchmarkId::from_parameter(chunk), &chunk, |b, &chunk| {
            b.iter(|| {
                let config = PoolConfig::default().with_chunk_size(chunk);
                let allocator = PoolAllocator::<u64>::with_config(config).unwrap();
                for _ in 0..4_096 {
                    black_box(allocator.allocate(1).unwrap());
                }
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_single_cycle, bench_bulk_nodes, bench_chunk_sizes);
criterion_main!(benches);
