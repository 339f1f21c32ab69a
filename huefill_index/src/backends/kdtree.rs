// Copyright 2025 the Huefill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! K-d tree backend splitting on color channels in rotation.
//!
//! A leaf that reaches `leaf_capacity` edges is split at its median under
//! [`Edge::cmp_rotated`] for the node's axis. The median and everything below it
//! go to the low child, the rest to the high child, and both children split on
//! the next axis. The node keeps a copy of the median as its pivot. That copy is
//! only read for comparisons; the edge itself stays a member of the low child.
//!
//! Nodes are never merged back. Removal walks the same path insertion took, so it
//! only works for edges that are actually present; see [`KdTree`]'s `remove`.

use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt::Debug;

use crate::finder::{Finder, Nearest};
use crate::types::{Axis, Color, Edge, closer, scan_closest};

/// Default number of edges a leaf holds before splitting.
pub const KDTREE_LEAF_CAPACITY: usize = 64;

/// Smallest leaf capacity that still shrinks the low half on every split.
const MIN_LEAF_CAPACITY: usize = 3;

/// K-d tree backend over the closed unit color cube.
#[derive(Clone)]
pub struct KdTree {
    leaf_capacity: usize,
    arena: Vec<Node>,
}

#[derive(Clone)]
struct Node {
    axis: Axis,
    /// Edges in this subtree.
    count: usize,
    kind: Kind,
}

#[derive(Clone)]
enum Kind {
    Leaf(Vec<Edge>),
    Internal {
        pivot: Edge,
        low: NodeIdx,
        high: NodeIdx,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
struct NodeIdx(usize);

impl NodeIdx {
    const ROOT: Self = Self(0);

    const fn get(self) -> usize {
        self.0
    }
}

impl Node {
    fn leaf(axis: Axis, edges: Vec<Edge>) -> Self {
        Self {
            axis,
            count: edges.len(),
            kind: Kind::Leaf(edges),
        }
    }
}

impl KdTree {
    /// Create an empty tree whose root splits on red.
    pub fn new() -> Self {
        Self::with_leaf_capacity(KDTREE_LEAF_CAPACITY)
    }

    /// Create an empty tree whose leaves split once they hold `leaf_capacity` edges.
    ///
    /// Capacities below 3 are raised to 3.
    pub fn with_leaf_capacity(leaf_capacity: usize) -> Self {
        Self {
            leaf_capacity: leaf_capacity.max(MIN_LEAF_CAPACITY),
            arena: alloc::vec![Node::leaf(Axis::R, Vec::new())],
        }
    }

    /// Number of node levels; `1` when the root is a leaf.
    pub fn depth(&self) -> usize {
        self.depth_at(NodeIdx::ROOT)
    }

    /// Number of nodes, leaves included.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    fn depth_at(&self, idx: NodeIdx) -> usize {
        match &self.arena[idx.get()].kind {
            Kind::Leaf(_) => 1,
            Kind::Internal { low, high, .. } => 1 + self.depth_at(*low).max(self.depth_at(*high)),
        }
    }

    /// Split a full leaf at its median.
    fn split(&mut self, idx: NodeIdx) {
        let axis = self.arena[idx.get()].axis;
        let Kind::Leaf(mut edges) =
            core::mem::replace(&mut self.arena[idx.get()].kind, Kind::Leaf(Vec::new()))
        else {
            unreachable!("only leaves are split");
        };
        edges.sort_unstable_by(|a, b| a.cmp_rotated(b, axis));
        let median = edges.len() / 2;
        let pivot = edges[median];
        let high_edges = edges.split_off(median + 1);
        log::trace!(
            "kd-tree split on {axis:?}: {} low, {} high",
            edges.len(),
            high_edges.len()
        );

        let low = NodeIdx(self.arena.len());
        self.arena.push(Node::leaf(axis.next(), edges));
        let high = NodeIdx(self.arena.len());
        self.arena.push(Node::leaf(axis.next(), high_edges));
        self.arena[idx.get()].kind = Kind::Internal { pivot, low, high };
    }

    /// Child to visit for `edge` below an internal node, or `None` at a leaf.
    fn child_for(&self, idx: NodeIdx, edge: &Edge) -> Option<NodeIdx> {
        let node = &self.arena[idx.get()];
        match &node.kind {
            Kind::Leaf(_) => None,
            Kind::Internal { pivot, low, high } => match edge.cmp_rotated(pivot, node.axis) {
                Ordering::Greater => Some(*high),
                _ => Some(*low),
            },
        }
    }

    fn nearest_at(&self, idx: NodeIdx, target: &Color) -> Option<(Edge, f32)> {
        let node = &self.arena[idx.get()];
        let (pivot, low, high) = match &node.kind {
            Kind::Leaf(edges) => return scan_closest(edges, target),
            Kind::Internal { pivot, low, high } => (pivot, *low, *high),
        };
        let (near, far) = match target.cmp_rotated(&pivot.color, node.axis) {
            Ordering::Greater => (high, low),
            _ => (low, high),
        };
        let best = self.nearest_at(near, target);
        let plane = (target.channel(node.axis) - pivot.color.channel(node.axis)).abs();
        match best {
            Some((_, d2)) if d2 < plane * plane => best,
            _ => closer(best, self.nearest_at(far, target)),
        }
    }
}

impl Default for KdTree {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for KdTree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("KdTree")
            .field("leaf_capacity", &self.leaf_capacity)
            .field("len", &self.len())
            .field("nodes", &self.arena.len())
            .finish_non_exhaustive()
    }
}

impl Finder for KdTree {
    /// Returns `false` if any channel is outside `[0, 1]` or NaN.
    fn insert(&mut self, edge: Edge) -> bool {
        if !edge.color.is_in_unit_cube() {
            return false;
        }
        let mut idx = NodeIdx::ROOT;
        loop {
            if let Some(child) = self.child_for(idx, &edge) {
                self.arena[idx.get()].count += 1;
                idx = child;
                continue;
            }
            let capacity = self.leaf_capacity;
            let node = &mut self.arena[idx.get()];
            if let Kind::Leaf(edges) = &mut node.kind
                && edges.len() < capacity
            {
                edges.push(edge);
                node.count += 1;
                return true;
            }
            // Full leaf: split, then route from this node again.
            self.split(idx);
        }
    }

    /// Returns `false` only for colors outside the unit cube, which can never have
    /// been inserted.
    ///
    /// # Panics
    ///
    /// Panics if no edge sits at `edge`'s position along the path its color selects.
    /// Only remove edges that were inserted, with the color they were inserted with,
    /// and not removed since. The other backends report this case as `false`.
    fn remove(&mut self, edge: Edge) -> bool {
        if !edge.color.is_in_unit_cube() {
            return false;
        }
        // Counts are decremented on the way down; a miss below panics anyway.
        let mut idx = NodeIdx::ROOT;
        while let Some(child) = self.child_for(idx, &edge) {
            self.arena[idx.get()].count -= 1;
            idx = child;
        }
        let node = &mut self.arena[idx.get()];
        let Kind::Leaf(edges) = &mut node.kind else {
            unreachable!("descent ends at a leaf");
        };
        let Some(i) = edges.iter().position(|e| e.same_position(&edge)) else {
            panic!(
                "kd-tree remove: no edge at ({}, {}) on its search path",
                edge.x, edge.y
            );
        };
        edges.swap_remove(i);
        node.count -= 1;
        true
    }

    fn nearest(&self, target: Color) -> Option<Nearest> {
        if self.is_empty() {
            return None;
        }
        self.nearest_at(NodeIdx::ROOT, &target)
            .map(Nearest::from_dist2)
    }

    fn len(&self) -> usize {
        self.arena[NodeIdx::ROOT.get()].count
    }

    fn clear(&mut self) {
        self.arena.clear();
        self.arena.push(Node::leaf(Axis::R, Vec::new()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_edges(rng: &mut StdRng, n: u32) -> Vec<Edge> {
        (0..n)
            .map(|i| {
                let c = Color::new(rng.random(), rng.random(), rng.random());
                Edge::new(i % 97, i / 97, c)
            })
            .collect()
    }

    /// Every edge reachable below `idx`.
    fn collect(t: &KdTree, idx: NodeIdx, out: &mut Vec<Edge>) {
        match &t.arena[idx.get()].kind {
            Kind::Leaf(edges) => out.extend_from_slice(edges),
            Kind::Internal { low, high, .. } => {
                collect(t, *low, out);
                collect(t, *high, out);
            }
        }
    }

    /// Check pivot ordering and counts for the subtree at `idx`; returns its size.
    fn check(t: &KdTree, idx: NodeIdx) -> usize {
        let node = &t.arena[idx.get()];
        let size = match &node.kind {
            Kind::Leaf(edges) => edges.len(),
            Kind::Internal { pivot, low, high } => {
                let (mut lo, mut hi) = (Vec::new(), Vec::new());
                collect(t, *low, &mut lo);
                collect(t, *high, &mut hi);
                for e in &lo {
                    assert_ne!(e.cmp_rotated(pivot, node.axis), Ordering::Greater);
                }
                for e in &hi {
                    assert_eq!(e.cmp_rotated(pivot, node.axis), Ordering::Greater);
                }
                assert_eq!(t.arena[low.get()].axis, node.axis.next());
                assert_eq!(t.arena[high.get()].axis, node.axis.next());
                check(t, *low) + check(t, *high)
            }
        };
        assert_eq!(node.count, size, "stored count must match subtree");
        size
    }

    #[test]
    fn split_keeps_median_in_low_child() {
        let mut t = KdTree::with_leaf_capacity(4);
        for i in 0..5 {
            let v = i as f32 / 8.0;
            assert!(t.insert(Edge::new(i, 0, Color::new(v, 0.5, 0.5))));
        }
        let Kind::Internal { pivot, low, high } = &t.arena[0].kind else {
            panic!("root must have split");
        };
        // Sorted reds 0, 1/8, 2/8, 3/8: median index 2.
        assert_eq!(pivot.x, 2);
        let Kind::Leaf(lo) = &t.arena[low.get()].kind else {
            panic!("low child is a leaf");
        };
        assert_eq!(lo.len(), 3);
        assert!(lo.iter().any(|e| e.same_position(pivot)));
        assert_eq!(t.arena[high.get()].count, 2);
        assert_eq!(t.len(), 5);
    }

    #[test]
    fn partition_holds_after_random_inserts_and_removes() {
        let mut rng = StdRng::seed_from_u64(7);
        let edges = random_edges(&mut rng, 2000);
        let mut t = KdTree::with_leaf_capacity(8);
        for e in &edges {
            assert!(t.insert(*e));
        }
        assert_eq!(check(&t, NodeIdx::ROOT), edges.len());
        for e in edges.iter().step_by(3) {
            assert!(t.remove(*e));
        }
        let more = random_edges(&mut rng, 500)
            .into_iter()
            .map(|e| Edge::new(e.x + 1000, e.y, e.color));
        for e in more {
            assert!(t.insert(e));
        }
        assert_eq!(check(&t, NodeIdx::ROOT), t.len());
    }

    #[test]
    fn removal_keeps_every_count_in_step() {
        let mut rng = StdRng::seed_from_u64(21);
        let edges = random_edges(&mut rng, 300);
        let mut t = KdTree::with_leaf_capacity(4);
        for e in &edges {
            assert!(t.insert(*e));
        }
        assert!(t.depth() > 3, "tree should be several levels deep");
        for (n, e) in edges.iter().enumerate() {
            assert!(t.remove(*e));
            assert_eq!(check(&t, NodeIdx::ROOT), edges.len() - n - 1);
        }
        assert!(t.is_empty());
        assert!(t.nearest(Color::new(0.5, 0.5, 0.5)).is_none());
        assert!(t.insert(edges[0]));
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn equal_colors_split_by_position() {
        let mut t = KdTree::with_leaf_capacity(4);
        let c = Color::new(0.5, 0.5, 0.5);
        for x in 0..40 {
            assert!(t.insert(Edge::new(x, 0, c)));
        }
        check(&t, NodeIdx::ROOT);
        for x in (0..40).rev() {
            assert!(t.remove(Edge::new(x, 0, c)));
        }
        assert!(t.is_empty());
    }

    #[test]
    fn rejects_out_of_domain() {
        let mut t = KdTree::new();
        assert!(!t.insert(Edge::new(0, 0, Color::new(0.0, 1.5, 0.0))));
        assert!(!t.insert(Edge::new(0, 0, Color::new(f32::NAN, 0.0, 0.0))));
        assert!(t.insert(Edge::new(0, 0, Color::new(1.0, 1.0, 1.0))));
        assert!(!t.remove(Edge::new(0, 0, Color::new(0.0, 1.5, 0.0))));
        assert_eq!(t.len(), 1);
    }

    #[test]
    #[should_panic(expected = "kd-tree remove: no edge at (3, 4)")]
    fn removing_absent_edge_panics() {
        let mut t = KdTree::new();
        assert!(t.insert(Edge::new(0, 0, Color::new(0.2, 0.2, 0.2))));
        t.remove(Edge::new(3, 4, Color::new(0.2, 0.2, 0.2)));
    }

    #[test]
    fn pruning_still_crosses_close_planes() {
        let mut t = KdTree::with_leaf_capacity(3);
        // Root splits on red at 0.5; the closest edge to the query lives on the far side.
        for (i, r) in [0.1_f32, 0.5, 0.9, 0.52].into_iter().enumerate() {
            assert!(t.insert(Edge::new(i as u32, 0, Color::new(r, 0.0, 0.0))));
        }
        let hit = t.nearest(Color::new(0.49, 0.0, 0.0)).unwrap();
        assert_eq!(hit.edge.x, 1);
        let hit = t.nearest(Color::new(0.515, 0.0, 0.0)).unwrap();
        assert_eq!(hit.edge.x, 3);
    }
}
