use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use probe_strip::{ProbeSet, WideStr, WideStrOps};
use std::time::Duration;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn key(n: u64) -> String {
    format!("k{:016x}", n)
}

fn bench_insert_fresh_100k(c: &mut Criterion) {
    c.bench_function("probe_set::insert_fresh_100k", |b| {
        b.iter_batched(
            ProbeSet::<String>::new,
            |s| {
                for x in lcg(1).take(100_000) {
                    let _ = s.insert(key(x)).unwrap();
                }
                black_box(s)
            },
            BatchSize::SmallInput,
        )
    });
}

// Removal leaves dummies behind; reinserting reuses them.
fn bench_churn_10k(c: &mut Criterion) {
    c.bench_function("probe_set::remove_reinsert_10k_on_100k", |b| {
        b.iter_batched(
            || {
                let s = ProbeSet::new();
                let keys: Vec<String> = lcg(5).take(100_000).map(key).collect();
                for k in &keys {
                    let _ = s.insert(k.clone()).unwrap();
                }
                let picked: Vec<String> = keys.into_iter().step_by(10).collect();
                (s, picked)
            },
            |(s, picked)| {
                for k in &picked {
                    let _ = s.remove(k).unwrap();
                }
                for k in picked {
                    let _ = s.insert(k).unwrap();
                }
                black_box(s)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_contains_hit_10k(c: &mut Criterion) {
    c.bench_function("probe_set::contains_hit_10k_on_100k", |b| {
        let s = ProbeSet::new();
        let keys: Vec<_> = lcg(7).take(100_000).map(key).collect();
        for k in &keys {
            let _ = s.insert(k.clone()).unwrap();
        }
        let n = keys.len();
        let mut st = 0x9e3779b97f4a7c15u64;
        let queries: Vec<String> = (0..10_000)
            .map(|_| {
                st = st.wrapping_mul(2862933555777941757).wrapping_add(3037000493);
                keys[(st as usize) % n].clone()
            })
            .collect();
        b.iter(|| {
            for k in &queries {
                black_box(s.contains(k).unwrap());
            }
        })
    });
}

fn bench_contains_miss_10k(c: &mut Criterion) {
    c.bench_function("probe_set::contains_miss_10k_on_100k", |b| {
        let s = ProbeSet::new();
        for x in lcg(11).take(100_000) {
            let _ = s.insert(key(x)).unwrap();
        }
        let mut miss = lcg(0xdead_beef);
        b.iter(|| {
            for _ in 0..10_000 {
                let k = key(miss.next().unwrap());
                black_box(s.contains(&k).unwrap());
            }
        })
    });
}

// Exact-string keys resolve without the equality callback.
fn bench_wide_str_hit_10k(c: &mut Criterion) {
    c.bench_function("probe_set::wide_str_hit_10k_on_100k", |b| {
        let s = ProbeSet::with_ops(WideStrOps);
        let keys: Vec<String> = lcg(13).take(100_000).map(key).collect();
        for k in &keys {
            let _ = s.insert(WideStr::from(k.as_str())).unwrap();
        }
        let queries: Vec<WideStr> = keys
            .iter()
            .step_by(10)
            .map(|k| WideStr::from(k.as_str()))
            .collect();
        b.iter(|| {
            for q in &queries {
                black_box(s.contains(q).unwrap());
            }
        })
    });
}

fn bench_keys_100k(c: &mut Criterion) {
    c.bench_function("probe_set::keys_100k", |b| {
        let s = ProbeSet::new();
        for x in lcg(999).take(100_000) {
            let _ = s.insert(x).unwrap();
        }
        b.iter(|| {
            let mut sum = 0u64;
            for k in s.keys() {
                sum = sum.wrapping_add(*k);
            }
            black_box(sum)
        })
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(12)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1))
}

criterion_group! {
    name = benches_insert;
    config = bench_config();
    targets = bench_insert_fresh_100k, bench_churn_10k
}
criterion_group! {
    name = benches_lookup;
    config = bench_config();
    targets = bench_contains_hit_10k,
              bench_contains_miss_10k,
              bench_wide_str_hit_10k,
              bench_keys_100k
}
criterion_main!(benches_insert, benches_lookup);
