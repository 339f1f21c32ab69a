// Copyright 2025 the Huefill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use huefill_index::{AnyFinder, Color, Edge, Finder, FinderKind};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

fn gen_random_edges(count: u32, seed: u64) -> Vec<Edge> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            let c = Color::new(rng.random(), rng.random(), rng.random());
            Edge::new(i % 1024, i / 1024, c)
        })
        .collect()
}

/// A shuffled `levels³` lattice, the shape of a real palette.
fn gen_palette(levels: u16, seed: u64) -> Vec<Color> {
    let d = f32::from(levels - 1);
    let mut out = Vec::with_capacity(usize::from(levels).pow(3));
    for r in 0..levels {
        for g in 0..levels {
            for b in 0..levels {
                out.push(Color::new(
                    f32::from(r) / d,
                    f32::from(g) / d,
                    f32::from(b) / d,
                ));
            }
        }
    }
    out.shuffle(&mut StdRng::seed_from_u64(seed));
    out
}

fn filled(kind: FinderKind, edges: &[Edge]) -> AnyFinder {
    let mut f = AnyFinder::new(kind);
    for e in edges {
        f.insert(*e);
    }
    f
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");
    for &n in &[1_000_u32, 20_000] {
        let edges = gen_random_edges(n, 0xCAFE_F00D);
        group.throughput(Throughput::Elements(u64::from(n)));
        for kind in FinderKind::ALL {
            group.bench_function(format!("{kind}_n{n}"), |b| {
                b.iter_batched(
                    || AnyFinder::new(kind),
                    |mut f| {
                        for e in &edges {
                            f.insert(*e);
                        }
                        black_box(f.len());
                    },
                    BatchSize::SmallInput,
                );
            });
        }
    }
    group.finish();
}

fn bench_nearest(c: &mut Criterion) {
    let mut group = c.benchmark_group("nearest");
    let queries: Vec<Color> = gen_random_edges(256, 0xBADC_0FFE)
        .into_iter()
        .map(|e| e.color)
        .collect();
    for &n in &[1_000_u32, 20_000] {
        let edges = gen_random_edges(n, 0xDEAD_BEEF);
        group.throughput(Throughput::Elements(queries.len() as u64));
        for kind in FinderKind::ALL {
            let f = filled(kind, &edges);
            group.bench_function(format!("{kind}_n{n}"), |b| {
                b.iter(|| {
                    for q in &queries {
                        black_box(f.nearest(*q));
                    }
                });
            });
        }
    }
    group.finish();
}

/// Query, insert, and occasionally retire, the way the growth loop drives a finder.
fn bench_growth_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("growth_churn");
    let palette = gen_palette(24, 7);
    group.throughput(Throughput::Elements(palette.len() as u64));
    for kind in FinderKind::ALL {
        if kind == FinderKind::Linear {
            // Quadratic; too slow to be interesting at this size.
            continue;
        }
        group.bench_function(kind.name(), |b| {
            b.iter_batched(
                || (AnyFinder::new(kind), StdRng::seed_from_u64(1)),
                |(mut f, mut rng)| {
                    let mut live = vec![Edge::new(0, 0, palette[0])];
                    f.insert(live[0]);
                    for (i, c) in (1_u32..).zip(&palette[1..]) {
                        black_box(f.nearest(*c));
                        let e = Edge::new(i % 1024, i / 1024, *c);
                        f.insert(e);
                        live.push(e);
                        if i % 4 == 0 {
                            let old = live.swap_remove(rng.random_range(0..live.len()));
                            f.remove(old);
                        }
                    }
                    black_box(f.len());
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_insert, bench_nearest, bench_growth_churn);
criterion_main!(benches);
