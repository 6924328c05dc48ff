//! Weak cache and memo cell benchmarks
//!
//! Measures the read-mostly paths the algebra layer hits on every space
//! lookup and every derived-value access.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use lattice_memory::{CleanupPolicy, LazyMemoCell, PairKey, WeakCache, WeakCacheConfig};
use std::hint::black_box;
use std::sync::Arc;

/// Benchmark lookups against caches of growing size
fn bench_cache_hits(c: &mut Criterion) {
    let mut group = c.benchmark_group("weak_cache_hit");

    for slots in [8_usize, 64, 512] {
        for policy in [CleanupPolicy::EveryOperation, CleanupPolicy::OnDeadSlot] {
            let cache = WeakCache::<PairKey<&'static str, usize>, String>::with_config(
                WeakCacheConfig::new().with_cleanup(policy),
            )
            .unwrap();
            let held: Vec<Arc<String>> = (0..slots)
                .map(|dim| {
                    let value = Arc::new(format!("space-{dim}"));
                    cache.put_if_absent(PairKey::of("integer", dim), Arc::clone(&value));
                    value
                })
                .collect();

            group.bench_with_input(
                BenchmarkId::new(format!("{policy:?}"), slots),
                &slots,
                |b, &slots| {
                    b.iter(|| black_box(cache.get(&PairKey::of("integer", slots / 2))));
                },
            );
            drop(held);
        }
    }

    group.finish();
}

/// Benchmark the bound fast path of the memo cell
fn bench_memo_fast_path(c: &mut Criterion) {
    let cell = LazyMemoCell::new();
    cell.get_or_compute(|| "rendered".to_string());

    c.bench_function("memo_cell_bound", |b| {
        b.iter(|| black_box(cell.get_or_compute(|| unreachable!())));
    });

    c.bench_function("memo_cell_cold", |b| {
        b.iter(|| {
            let cell = LazyMemoCell::new();
            black_box(cell.get_or_compute(|| 42_u64))
        });
    });
}

criterion_group!(benches, bench_cache_hits, bench_memo_fast_path);
criterion_main!(benches);
