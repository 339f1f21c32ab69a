// Copyright 2025 the Huefill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Octree backend over the color cube.
//!
//! Leaves hold up to `leaf_capacity` edges. A full leaf splits into eight equal
//! octants on the next insert. An internal node whose subtree shrinks back to
//! `leaf_capacity` edges coalesces into a leaf again, so depth follows the live
//! point density rather than the insertion history.
//!
//! Queries run in two phases:
//!
//! 1. Descend through every node whose cube contains the query and take the best
//!    edge found there. This is only a candidate: a closer edge may sit in a
//!    neighboring cube.
//! 2. Search again with that candidate's distance as a radius, visiting every node
//!    whose cube grown by the radius still contains the query.
//!
//! If phase 1 finds nothing, a radius doubling from [`FALLBACK_RADIUS`] stands in
//! for it until some edge is in reach, and phase 2 then runs with that edge's distance.

use alloc::vec::Vec;
use core::fmt::Debug;

use crate::finder::{Finder, Nearest};
#[cfg(not(feature = "std"))]
use crate::float::FloatFuncs;
use crate::types::{Axis, Color, Edge, closer, scan_closest};

/// Default number of edges a leaf holds before splitting.
pub const OCTREE_LEAF_CAPACITY: usize = 32;

/// Starting radius for the search used when the containment pass finds nothing.
pub const FALLBACK_RADIUS: f32 = 0.1;

/// Upper bound of the root cube on every channel.
///
/// Slightly above `1.0` so a full-intensity channel is inside the half-open cube.
pub const DOMAIN_HIGH: f32 = 1.0 + f32::EPSILON;

/// Octree backend with split-on-overflow and coalesce-on-underflow.
#[derive(Clone)]
pub struct Octree {
    leaf_capacity: usize,
    arena: Vec<Node>,
    free: Vec<NodeIdx>,
}

#[derive(Clone)]
struct Node {
    cube: Cube,
    /// Edges in this subtree.
    count: usize,
    kind: Kind,
}

#[derive(Clone)]
enum Kind {
    Leaf(Vec<Edge>),
    Internal([NodeIdx; 8]),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
struct NodeIdx(usize);

impl NodeIdx {
    const ROOT: Self = Self(0);

    const fn get(self) -> usize {
        self.0
    }
}

/// Half-open axis-aligned cube `[low, high)` in color space.
#[derive(Copy, Clone, Debug, PartialEq)]
struct Cube {
    low: [f32; 3],
    high: [f32; 3],
}

impl Cube {
    fn domain() -> Self {
        Self {
            low: [0.0; 3],
            high: [DOMAIN_HIGH; 3],
        }
    }

    fn contains(&self, c: &Color) -> bool {
        self.reaches(c, 0.0)
    }

    /// True if `c` lies inside this cube grown by `radius` on every side.
    fn reaches(&self, c: &Color, radius: f32) -> bool {
        Axis::ALL.iter().enumerate().all(|(i, &axis)| {
            let v = c.channel(axis);
            v >= self.low[i] - radius && v < self.high[i] + radius
        })
    }

    /// True if halving every axis yields octants of non-zero width.
    fn is_divisible(&self) -> bool {
        (0..3).all(|i| {
            let mid = self.low[i] + (self.high[i] - self.low[i]) / 2.0;
            self.low[i] < mid && mid < self.high[i]
        })
    }

    /// Octant `n`: bit 2 selects the upper red half, bit 1 green, bit 0 blue.
    ///
    /// Child bounds meet exactly at the midpoint, so the eight octants partition the cube.
    fn octant(&self, n: usize) -> Self {
        let mut low = self.low;
        let mut high = self.high;
        for i in 0..3 {
            let mid = self.low[i] + (self.high[i] - self.low[i]) / 2.0;
            if n & (0b100 >> i) != 0 {
                low[i] = mid;
            } else {
                high[i] = mid;
            }
        }
        Self { low, high }
    }
}

impl Node {
    fn leaf(cube: Cube) -> Self {
        Self {
            cube,
            count: 0,
            kind: Kind::Leaf(Vec::new()),
        }
    }
}

impl Octree {
    /// Create an empty octree over `[0, 1 + ε)³`.
    pub fn new() -> Self {
        Self::with_leaf_capacity(OCTREE_LEAF_CAPACITY)
    }

    /// Create an empty octree whose leaves split once they hold `leaf_capacity` edges.
    pub fn with_leaf_capacity(leaf_capacity: usize) -> Self {
        Self {
            leaf_capacity: leaf_capacity.max(1),
            arena: alloc::vec![Node::leaf(Cube::domain())],
            free: Vec::new(),
        }
    }

    /// Number of node levels; `1` when the root is a leaf.
    pub fn depth(&self) -> usize {
        self.depth_at(NodeIdx::ROOT)
    }

    /// Number of live nodes, leaves included.
    pub fn node_count(&self) -> usize {
        self.arena.len() - self.free.len()
    }

    fn depth_at(&self, idx: NodeIdx) -> usize {
        match &self.arena[idx.get()].kind {
            Kind::Leaf(_) => 1,
            Kind::Internal(children) => {
                1 + children
                    .iter()
                    .map(|&c| self.depth_at(c))
                    .max()
                    .unwrap_or(0)
            }
        }
    }

    fn alloc(&mut self, cube: Cube) -> NodeIdx {
        if let Some(idx) = self.free.pop() {
            self.arena[idx.get()] = Node::leaf(cube);
            idx
        } else {
            self.arena.push(Node::leaf(cube));
            NodeIdx(self.arena.len() - 1)
        }
    }

    /// Turn a leaf into an internal node and redistribute its edges into the octants.
    fn split(&mut self, idx: NodeIdx) {
        let cube = self.arena[idx.get()].cube;
        let Kind::Leaf(edges) =
            core::mem::replace(&mut self.arena[idx.get()].kind, Kind::Leaf(Vec::new()))
        else {
            unreachable!("only leaves are split");
        };
        let children: [NodeIdx; 8] = core::array::from_fn(|n| self.alloc(cube.octant(n)));
        self.arena[idx.get()].kind = Kind::Internal(children);
        log::trace!("octree split: {} edges into 8 octants", edges.len());
        for edge in edges {
            let placed = children.iter().any(|&c| self.insert_at(c, edge));
            debug_assert!(placed, "octants must cover their parent cube");
        }
    }

    /// Gather every edge below `idx` back into it and release its descendants.
    fn coalesce(&mut self, idx: NodeIdx) {
        let Kind::Internal(children) =
            core::mem::replace(&mut self.arena[idx.get()].kind, Kind::Leaf(Vec::new()))
        else {
            return;
        };
        let mut edges = Vec::with_capacity(self.leaf_capacity);
        for c in children {
            self.drain_into(c, &mut edges);
        }
        debug_assert_eq!(
            edges.len(),
            self.arena[idx.get()].count,
            "coalesce must keep every edge"
        );
        log::trace!("octree coalesce: {} edges", edges.len());
        self.arena[idx.get()].kind = Kind::Leaf(edges);
    }

    fn drain_into(&mut self, idx: NodeIdx, out: &mut Vec<Edge>) {
        let kind = core::mem::replace(&mut self.arena[idx.get()].kind, Kind::Leaf(Vec::new()));
        match kind {
            Kind::Leaf(edges) => out.extend(edges),
            Kind::Internal(children) => {
                for c in children {
                    self.drain_into(c, out);
                }
            }
        }
        self.arena[idx.get()].count = 0;
        self.free.push(idx);
    }

    fn insert_at(&mut self, idx: NodeIdx, edge: Edge) -> bool {
        let node = &self.arena[idx.get()];
        if !node.cube.contains(&edge.color) {
            return false;
        }
        // Edges sharing one color can never be separated; past float resolution the
        // leaf just keeps growing.
        if matches!(&node.kind, Kind::Leaf(edges) if edges.len() >= self.leaf_capacity)
            && node.cube.is_divisible()
        {
            self.split(idx);
        }
        let node = &mut self.arena[idx.get()];
        let children = match &mut node.kind {
            Kind::Leaf(edges) => {
                edges.push(edge);
                node.count += 1;
                return true;
            }
            Kind::Internal(children) => *children,
        };
        let inserted = children.iter().any(|&c| self.insert_at(c, edge));
        if inserted {
            self.arena[idx.get()].count += 1;
        }
        inserted
    }

    fn remove_at(&mut self, idx: NodeIdx, edge: &Edge) -> bool {
        let node = &mut self.arena[idx.get()];
        if !node.cube.contains(&edge.color) {
            return false;
        }
        let children = match &mut node.kind {
            Kind::Leaf(edges) => {
                let Some(i) = edges.iter().position(|e| e.same_position(edge)) else {
                    return false;
                };
                edges.swap_remove(i);
                node.count -= 1;
                return true;
            }
            Kind::Internal(children) => *children,
        };
        if !children.iter().any(|&c| self.remove_at(c, edge)) {
            return false;
        }
        let node = &mut self.arena[idx.get()];
        node.count -= 1;
        if node.count <= self.leaf_capacity {
            self.coalesce(idx);
        }
        true
    }

    /// Best edge and squared distance among the nodes whose cube, grown by `radius`,
    /// contains `target`. A zero radius gives the containment-only pass.
    fn search(&self, idx: NodeIdx, target: &Color, radius: f32) -> Option<(Edge, f32)> {
        let node = &self.arena[idx.get()];
        if node.count == 0 || !node.cube.reaches(target, radius) {
            return None;
        }
        match &node.kind {
            Kind::Leaf(edges) => scan_closest(edges, target),
            Kind::Internal(children) => children
                .iter()
                .fold(None, |best, &c| closer(best, self.search(c, target, radius))),
        }
    }

    /// Radius search with a doubling radius, for queries whose containing cubes are empty.
    ///
    /// The hit is only a bound: the caller repeats the search with its distance.
    fn grow_until_hit(&self, target: &Color) -> Option<(Edge, f32)> {
        let mut radius = FALLBACK_RADIUS;
        loop {
            if let Some(hit) = self.search(NodeIdx::ROOT, target, radius) {
                return Some(hit);
            }
            if !radius.is_finite() {
                // Only reachable for a NaN query.
                return None;
            }
            radius *= 2.0;
        }
    }
}

impl Default for Octree {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for Octree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Octree")
            .field("leaf_capacity", &self.leaf_capacity)
            .field("len", &self.len())
            .field("live_nodes", &self.node_count())
            .field("arena_nodes", &self.arena.len())
            .finish_non_exhaustive()
    }
}

impl Finder for Octree {
    /// Returns `false` if any channel lies outside `[0, 1 + ε)`.
    fn insert(&mut self, edge: Edge) -> bool {
        self.insert_at(NodeIdx::ROOT, edge)
    }

    /// The edge's color must match the one it was inserted with; it is used to locate
    /// the leaf.
    fn remove(&mut self, edge: Edge) -> bool {
        self.remove_at(NodeIdx::ROOT, &edge)
    }

    fn nearest(&self, target: Color) -> Option<Nearest> {
        if self.is_empty() {
            return None;
        }
        let candidate = self
            .search(NodeIdx::ROOT, &target, 0.0)
            .or_else(|| self.grow_until_hit(&target))?;
        // The rounded root can fall just short of the candidate's own cube.
        let best = closer(
            self.search(NodeIdx::ROOT, &target, candidate.1.sqrt()),
            Some(candidate),
        );
        best.map(Nearest::from_dist2)
    }

    fn len(&self) -> usize {
        self.arena[NodeIdx::ROOT.get()].count
    }

    fn clear(&mut self) {
        self.arena.clear();
        self.arena.push(Node::leaf(Cube::domain()));
        self.free.clear();
    }
}
