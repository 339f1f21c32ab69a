// Copyright 2025 the Huefill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![cfg(feature = "compare_rstar")]

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use huefill_index::{Color, Finder, KdTree, Octree};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use rstar::RTree;

fn gen_random_colors(count: usize, seed: u64) -> Vec<Color> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| Color::new(rng.random(), rng.random(), rng.random()))
        .collect()
}

fn to_rstar_points(v: &[Color]) -> Vec<[f32; 3]> {
    v.iter().map(|c| [c.r, c.g, c.b]).collect()
}

fn insert_all<F: Finder>(mut f: F, colors: &[Color]) -> F {
    for (i, c) in (0_u32..).zip(colors) {
        f.insert(huefill_index::Edge::new(i, 0, *c));
    }
    f
}

fn bench_nearest_external_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("nearest_external_compare");
    let queries = gen_random_colors(256, 0xFACE);
    for &n in &[4_096_usize, 32_768] {
        let colors = gen_random_colors(n, 0x5EED);
        group.throughput(Throughput::Elements(n as u64));

        group.bench_function(format!("kdtree_build_query_n{n}"), |b| {
            b.iter_batched(
                KdTree::new,
                |f| {
                    let f = insert_all(f, &colors);
                    for q in &queries {
                        black_box(f.nearest(*q));
                    }
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_function(format!("octree_build_query_n{n}"), |b| {
            b.iter_batched(
                Octree::new,
                |f| {
                    let f = insert_all(f, &colors);
                    for q in &queries {
                        black_box(f.nearest(*q));
                    }
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_function(format!("rstar_build_query_n{n}"), |b| {
            b.iter_batched(
                || to_rstar_points(&colors),
                |points| {
                    let mut tree = RTree::new();
                    for p in points {
                        tree.insert(p);
                    }
                    for q in &queries {
                        black_box(tree.nearest_neighbor(&[q.r, q.g, q.b]));
                    }
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_nearest_external_compare);
criterion_main!(benches);
