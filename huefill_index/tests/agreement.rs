// Copyright 2025 the Huefill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Replays one randomized insert/remove/query script against every backend.

use huefill_index::{AnyFinder, Color, Edge, Finder, FinderKind, KdTree, LinearScan, Octree};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

fn random_color(rng: &mut StdRng) -> Color {
    Color::new(rng.random(), rng.random(), rng.random())
}

/// Small leaves so a few thousand edges exercise deep trees and many coalesces.
fn small_leaf_finders() -> Vec<Box<dyn Finder>> {
    vec![
        Box::new(LinearScan::new()),
        Box::new(Octree::with_leaf_capacity(4)),
        Box::new(KdTree::with_leaf_capacity(4)),
    ]
}

fn default_finders() -> Vec<Box<dyn Finder>> {
    FinderKind::ALL
        .into_iter()
        .map(|k| Box::new(AnyFinder::new(k)) as Box<dyn Finder>)
        .collect()
}

fn assert_same_distance(finders: &[Box<dyn Finder>], q: Color) {
    let hits: Vec<_> = finders.iter().map(|f| f.nearest(q)).collect();
    let base = hits[0].expect("linear scan is non-empty");
    for (f, hit) in finders.iter().zip(&hits) {
        let hit = hit.unwrap_or_else(|| panic!("{f:?} returned nothing"));
        assert!(
            (hit.distance - base.distance).abs() <= 1e-6,
            "{f:?}: {} vs {}",
            hit.distance,
            base.distance
        );
        assert!(
            (hit.edge.color.dist(&q) - hit.distance).abs() <= 1e-6,
            "{f:?} reported a distance that does not match its edge"
        );
    }
}

fn churn(finders: &mut [Box<dyn Finder>], seed: u64, steps: usize) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut live: Vec<Edge> = Vec::new();
    let mut next_x = 0_u32;
    for step in 0..steps {
        let roll: f32 = rng.random();
        if live.is_empty() || roll < 0.6 {
            let e = Edge::new(next_x, 0, random_color(&mut rng));
            next_x += 1;
            for f in finders.iter_mut() {
                assert!(f.insert(e), "{f:?} rejected an in-domain color");
            }
            live.push(e);
        } else {
            let i = rng.random_range(0..live.len());
            let e = live.swap_remove(i);
            for f in finders.iter_mut() {
                assert!(f.remove(e), "{f:?} lost edge {e:?}");
            }
        }
        for f in finders.iter() {
            assert_eq!(f.len(), live.len(), "{f:?} at step {step}");
        }
        if !live.is_empty() && step % 7 == 0 {
            assert_same_distance(finders, random_color(&mut rng));
        }
    }
}

#[test]
fn backends_agree_under_churn() {
    let mut finders = small_leaf_finders();
    churn(&mut finders, 0x5EED, 4000);
}

#[test]
fn default_capacities_agree_under_churn() {
    let mut finders = default_finders();
    churn(&mut finders, 42, 6000);
}

#[test]
fn every_live_edge_is_its_own_nearest() {
    let mut rng = StdRng::seed_from_u64(3);
    let edges: Vec<Edge> = (0..1500)
        .map(|i| Edge::new(i, i, random_color(&mut rng)))
        .collect();
    for mut f in small_leaf_finders() {
        for e in &edges {
            assert!(f.insert(*e));
        }
        for e in edges.iter().skip(1).step_by(2) {
            assert!(f.remove(*e));
        }
        assert_eq!(f.len(), 750);
        for e in edges.iter().step_by(2) {
            let hit = f.nearest(e.color).unwrap();
            assert_eq!(hit.distance, 0.0, "{f:?}");
            assert!(hit.edge.same_position(e), "{f:?}");
        }
    }
}

#[test]
fn palette_growth_pattern() {
    // The shape of the real workload: a shuffled lattice of colors, each query followed
    // by an insert, with older edges retired.
    let steps = 16_u16;
    let mut palette: Vec<Color> = (0..steps * steps * steps)
        .map(|i| {
            let d = f32::from(steps - 1);
            Color::new(
                f32::from(i / (steps * steps)) / d,
                f32::from(i / steps % steps) / d,
                f32::from(i % steps) / d,
            )
        })
        .collect();
    let mut rng = StdRng::seed_from_u64(11);
    palette.shuffle(&mut rng);

    let mut finders = default_finders();
    let seed = Edge::new(0, 0, palette[0]);
    for f in finders.iter_mut() {
        assert!(f.insert(seed));
    }
    let mut placed = vec![seed];
    for (i, c) in palette.iter().enumerate().skip(1) {
        assert_same_distance(&finders, *c);
        let x = u32::try_from(i).unwrap();
        let e = Edge::new(x % 64, x / 64, *c);
        for f in finders.iter_mut() {
            assert!(f.insert(e));
        }
        placed.push(e);
        if i % 3 == 0 {
            let old = placed.swap_remove(rng.random_range(0..placed.len()));
            for f in finders.iter_mut() {
                assert!(f.remove(old));
            }
        }
    }
    for f in &finders {
        assert_eq!(f.len(), placed.len());
    }
}

#[test]
fn remove_of_absent_edge_is_reported_by_linear_and_octree() {
    let absent = Edge::new(9, 9, Color::new(0.3, 0.3, 0.3));
    let mut linear = LinearScan::new();
    let mut octree = Octree::new();
    assert!(!linear.remove(absent));
    assert!(!octree.remove(absent));
    assert!(linear.insert(Edge::new(1, 1, absent.color)));
    assert!(octree.insert(Edge::new(1, 1, absent.color)));
    assert!(!linear.remove(absent));
    assert!(!octree.remove(absent));
}
