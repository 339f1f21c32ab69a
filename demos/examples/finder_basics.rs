// Copyright 2025 the Huefill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Finder basics.
//!
//! Fill every backend with the same random colors, then show that they agree on the
//! nearest distance and how deep each tree grew.
//!
//! Run:
//! - `cargo run -p huefill_demos --example finder_basics`

use huefill_index::{Color, Edge, Finder, KdTree, LinearScan, Octree};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn main() {
    let mut rng = StdRng::seed_from_u64(2025);
    let mut linear = LinearScan::new();
    let mut octree = Octree::new();
    let mut kdtree = KdTree::new();
    for i in 0..10_000 {
        let e = Edge::new(i % 100, i / 100, Color::new(rng.random(), rng.random(), rng.random()));
        linear.insert(e);
        octree.insert(e);
        kdtree.insert(e);
    }
    println!("octree depth {}, kd-tree depth {}", octree.depth(), kdtree.depth());

    for _ in 0..5 {
        let q = Color::new(rng.random(), rng.random(), rng.random());
        let finders: [&dyn Finder; 3] = [&linear, &octree, &kdtree];
        let distances: Vec<_> = finders
            .iter()
            .filter_map(|f| f.nearest(q))
            .map(|n| n.distance)
            .collect();
        println!("query ({:.3}, {:.3}, {:.3}): {distances:?}", q.r, q.g, q.b);
    }
}
