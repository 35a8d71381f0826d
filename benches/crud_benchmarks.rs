use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use std::collections::{BTreeMap, BTreeSet, BinaryHeap};
use std::hint::black_box;

use ordtree::order::{Natural, Reverse};
use ordtree::{AvlSet, IndexedHeap, OrderStatisticTree, OrderedMap, RbSet, SegmentOps, SegmentTree, Strategy};

const N: usize = 10_000;

// ─── Helper functions to generate key sequences ─────────────────────────────

fn ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).collect()
}

fn reverse_ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).rev().collect()
}

fn random_keys(n: usize) -> Vec<i64> {
    // Use a simple LCG for deterministic pseudo-random sequence
    let mut keys = Vec::with_capacity(n);
    let mut x: u64 = 12345;
    for _ in 0..n {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
        keys.push((x >> 33) as i64);
    }
    keys
}

fn key_orders() -> [(&'static str, Vec<i64>); 3] {
    [("ordered", ordered_keys(N)), ("reverse", reverse_ordered_keys(N)), ("random", random_keys(N))]
}

// ─── Set Benchmarks ─────────────────────────────────────────────────────────

fn bench_set_insert(c: &mut Criterion) {
    for (order, keys) in key_orders() {
        let mut group = c.benchmark_group(format!("set_insert_{order}"));

        group.bench_function(BenchmarkId::new("AvlSet", N), |b| {
            b.iter(|| {
                let mut set = AvlSet::new();
                for &k in &keys {
                    set.insert(k);
                }
                set
            });
        });

        group.bench_function(BenchmarkId::new("RbSet", N), |b| {
            b.iter(|| {
                let mut set = RbSet::new();
                for &k in &keys {
                    set.insert(k);
                }
                set
            });
        });

        group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
            b.iter(|| {
                let mut set = BTreeSet::new();
                for &k in &keys {
                    set.insert(k);
                }
                set
            });
        });

        group.finish();
    }
}

fn bench_set_contains(c: &mut Criterion) {
    let avl: AvlSet<i64> = ordered_keys(N).into_iter().collect();
    let rb: RbSet<i64> = ordered_keys(N).into_iter().collect();
    let bt: BTreeSet<i64> = ordered_keys(N).into_iter().collect();

    for (order, keys) in key_orders() {
        let mut group = c.benchmark_group(format!("set_contains_{order}"));

        group.bench_function(BenchmarkId::new("AvlSet", N), |b| {
            b.iter(|| keys.iter().filter(|k| avl.contains(k)).count());
        });

        group.bench_function(BenchmarkId::new("RbSet", N), |b| {
            b.iter(|| keys.iter().filter(|k| rb.contains(k)).count());
        });

        group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
            b.iter(|| keys.iter().filter(|k| bt.contains(k)).count());
        });

        group.finish();
    }
}

fn bench_set_remove(c: &mut Criterion) {
    for (order, keys) in key_orders() {
        let mut group = c.benchmark_group(format!("set_remove_{order}"));

        group.bench_function(BenchmarkId::new("AvlSet", N), |b| {
            b.iter_batched(
                || keys.iter().copied().collect::<AvlSet<i64>>(),
                |mut set| {
                    for k in &keys {
                        set.remove(k);
                    }
                    set
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_function(BenchmarkId::new("RbSet", N), |b| {
            b.iter_batched(
                || keys.iter().copied().collect::<RbSet<i64>>(),
                |mut set| {
                    for k in &keys {
                        set.remove(k);
                    }
                    set
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
            b.iter_batched(
                || keys.iter().copied().collect::<BTreeSet<i64>>(),
                |mut set| {
                    for k in &keys {
                        set.remove(k);
                    }
                    set
                },
                BatchSize::SmallInput,
            );
        });

        group.finish();
    }
}

fn bench_set_cursor_remove(c: &mut Criterion) {
    let keys = random_keys(N);
    let mut group = c.benchmark_group("set_cursor_remove_odd");

    group.bench_function(BenchmarkId::new("RbSet", N), |b| {
        b.iter_batched(
            || keys.iter().copied().collect::<RbSet<i64>>(),
            |mut set| {
                let mut cursor = set.cursor_front_mut();
                while let Some(&k) = cursor.key() {
                    if k % 2 == 1 {
                        cursor.remove();
                    } else {
                        cursor.advance();
                    }
                }
                set
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter_batched(
            || keys.iter().copied().collect::<BTreeSet<i64>>(),
            |mut set| {
                set.retain(|k| k % 2 != 1);
                set
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

// ─── Map Benchmarks ─────────────────────────────────────────────────────────

fn bench_map_insert_get(c: &mut Criterion) {
    let keys = random_keys(N);
    let mut group = c.benchmark_group("map_insert_then_get_random");

    for strategy in [Strategy::Avl, Strategy::RedBlack] {
        group.bench_function(BenchmarkId::new(format!("OrderedMap/{strategy}"), N), |b| {
            b.iter(|| {
                let mut map = OrderedMap::with_strategy(strategy, Natural);
                for &k in &keys {
                    map.insert(k, k);
                }
                keys.iter().filter_map(|k| map.get(k)).fold(0i64, |sum, &v| sum.wrapping_add(v))
            });
        });
    }

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| {
            let mut map = BTreeMap::new();
            for &k in &keys {
                map.insert(k, k);
            }
            keys.iter().filter_map(|k| map.get(k)).fold(0i64, |sum, &v| sum.wrapping_add(v))
        });
    });

    group.finish();
}

// ─── Order Statistics ───────────────────────────────────────────────────────

fn bench_select(c: &mut Criterion) {
    let tree: OrderStatisticTree<i64> = random_keys(N).into_iter().collect();
    let sorted: Vec<i64> = tree.iter().copied().collect();
    let mut group = c.benchmark_group("select_every_rank");

    group.bench_function(BenchmarkId::new("OrderStatisticTree", N), |b| {
        b.iter(|| (0..tree.len()).filter_map(|r| tree.select(r)).fold(0i64, |sum, &k| sum.wrapping_add(k)));
    });

    group.bench_function(BenchmarkId::new("BTreeSet::iter().nth", 256), |b| {
        let set: BTreeSet<i64> = sorted.iter().copied().collect();
        b.iter(|| (0..256).filter_map(|r| set.iter().nth(r * 37)).fold(0i64, |sum, &k| sum.wrapping_add(k)));
    });

    group.finish();
}

// ─── Heap ───────────────────────────────────────────────────────────────────

fn bench_heap_push_pop(c: &mut Criterion) {
    let keys = random_keys(N);
    let mut group = c.benchmark_group("heap_push_pop_random");

    group.bench_function(BenchmarkId::new("IndexedHeap", N), |b| {
        b.iter(|| {
            let mut heap = IndexedHeap::with_priority(Reverse(Natural));
            for &k in &keys {
                heap.push(k);
            }
            while let Some(k) = heap.pop() {
                black_box(k);
            }
        });
    });

    group.bench_function(BenchmarkId::new("BinaryHeap", N), |b| {
        b.iter(|| {
            let mut heap = BinaryHeap::new();
            for &k in &keys {
                heap.push(k);
            }
            while let Some(k) = heap.pop() {
                black_box(k);
            }
        });
    });

    group.finish();
}

// ─── Segment Tree ───────────────────────────────────────────────────────────

struct AddSum;

impl SegmentOps for AddSum {
    type Value = i64;
    type Lazy = i64;

    fn identity(&self) -> i64 {
        0
    }

    fn merge(&self, left: &i64, right: &i64) -> i64 {
        left.wrapping_add(*right)
    }

    fn apply(&self, value: &i64, add: &i64, len: usize) -> i64 {
        value.wrapping_add(add.wrapping_mul(len as i64))
    }

    fn compose(&self, older: &i64, newer: &i64) -> i64 {
        older.wrapping_add(*newer)
    }
}

fn bench_segment_tree(c: &mut Criterion) {
    let keys = random_keys(N);
    let mut group = c.benchmark_group("segment_tree_update_fold");

    group.bench_function(BenchmarkId::new("SegmentTree", N), |b| {
        b.iter_batched(
            || SegmentTree::from_vec(vec![0; N], AddSum),
            |mut tree| {
                let mut sum = 0i64;
                for pair in keys.chunks_exact(2) {
                    let (l, r) = (pair[0] as usize % N, pair[1] as usize % N);
                    let range = l.min(r)..l.max(r);
                    tree.update(range.clone(), 1);
                    sum = sum.wrapping_add(tree.fold(range));
                }
                sum
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

// ─── Criterion Groups ───────────────────────────────────────────────────────

criterion_group!(set_benches, bench_set_insert, bench_set_contains, bench_set_remove, bench_set_cursor_remove,);

criterion_group!(map_benches, bench_map_insert_get,);

criterion_group!(order_statistic_benches, bench_select,);

criterion_group!(other_benches, bench_heap_push_pop, bench_segment_tree,);

criterion_main!(set_benches, map_benches, order_statistic_benches, other_benches,);
