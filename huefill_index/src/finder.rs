// Copyright 2025 the Huefill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The nearest-color contract shared by every backend.

use core::fmt::Debug;

#[cfg(not(feature = "std"))]
use crate::float::FloatFuncs;
use crate::types::{Color, Edge};

/// Result of a [`Finder::nearest`] query.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Nearest {
    /// The stored edge whose color is closest to the query.
    pub edge: Edge,
    /// Euclidean distance between that edge's color and the query.
    pub distance: f32,
}

impl Nearest {
    pub(crate) fn from_dist2((edge, d2): (Edge, f32)) -> Self {
        Self {
            edge,
            distance: d2.sqrt(),
        }
    }
}

/// A dynamic set of edges that answers exact nearest-color queries.
///
/// A finder never holds two edges at the same position. Callers are expected to
/// remove edges with the same color they were inserted with.
///
/// When several edges are equally close, each backend keeps the first one it visits.
/// Backends agree on the distance but not necessarily on which edge is returned.
pub trait Finder: Debug {
    /// Add an edge. Returns `false` if its color lies outside the backend's domain.
    fn insert(&mut self, edge: Edge) -> bool;

    /// Remove the edge at `edge`'s position. Returns `false` if nothing was removed.
    ///
    /// See the backend docs: [`KdTree`](crate::KdTree) treats a missing edge as a
    /// broken caller contract and panics instead.
    fn remove(&mut self, edge: Edge) -> bool;

    /// The stored edge closest to `target`, or `None` when the finder is empty.
    fn nearest(&self, target: Color) -> Option<Nearest>;

    /// Number of stored edges.
    fn len(&self) -> usize;

    /// True if no edges are stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every edge.
    fn clear(&mut self);
}
