// Copyright 2025 the Huefill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Linear-scan backend. No pruning at all; the baseline the trees are checked against.

use alloc::vec::Vec;
use core::fmt::Debug;

use crate::finder::{Finder, Nearest};
use crate::types::{Color, Edge, scan_closest};

/// Initial capacity reserved by [`LinearScan::new`].
const INITIAL_CAPACITY: usize = 4096;

/// Unordered vector of edges, scanned in full for every query.
#[derive(Clone)]
pub struct LinearScan {
    edges: Vec<Edge>,
}

impl LinearScan {
    /// Create an empty backend with room for a few thousand edges.
    pub fn new() -> Self {
        Self {
            edges: Vec::with_capacity(INITIAL_CAPACITY),
        }
    }

    /// Stored edges in scan order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }
}

impl Default for LinearScan {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for LinearScan {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LinearScan")
            .field("len", &self.edges.len())
            .field("capacity", &self.edges.capacity())
            .finish_non_exhaustive()
    }
}

impl Finder for LinearScan {
    fn insert(&mut self, edge: Edge) -> bool {
        self.edges.push(edge);
        true
    }

    fn remove(&mut self, edge: Edge) -> bool {
        match self.edges.iter().position(|e| e.same_position(&edge)) {
            Some(i) => {
                self.edges.swap_remove(i);
                true
            }
            None => false,
        }
    }

    fn nearest(&self, target: Color) -> Option<Nearest> {
        scan_closest(&self.edges, &target).map(Nearest::from_dist2)
    }

    fn len(&self) -> usize {
        self.edges.len()
    }

    fn clear(&mut self) {
        self.edges.clear();
    }
}
