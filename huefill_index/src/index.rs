// Copyright 2025 the Huefill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend selection at construction time.

use core::fmt;
use core::str::FromStr;

use crate::backends::kdtree::KdTree;
use crate::backends::linear::LinearScan;
use crate::backends::octree::Octree;
use crate::finder::{Finder, Nearest};
use crate::types::{Color, Edge};

/// Which backend to build.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum FinderKind {
    /// [`LinearScan`].
    Linear,
    /// [`Octree`].
    Octree,
    /// [`KdTree`].
    #[default]
    KdTree,
}

impl FinderKind {
    /// Every backend, in the order used by [`fmt::Display`] listings.
    pub const ALL: [Self; 3] = [Self::Linear, Self::Octree, Self::KdTree];

    /// Short lowercase name, as accepted by [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Octree => "octree",
            Self::KdTree => "kdtree",
        }
    }
}

impl fmt::Display for FinderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown backend name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownFinderKind;

impl fmt::Display for UnknownFinderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unknown finder, expected one of: linear, octree, kdtree")
    }
}

impl core::error::Error for UnknownFinderKind {}

impl FromStr for FinderKind {
    type Err = UnknownFinderKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linear" | "naive" => Ok(Self::Linear),
            "octree" => Ok(Self::Octree),
            "kdtree" | "kd-tree" => Ok(Self::KdTree),
            _ => Err(UnknownFinderKind),
        }
    }
}

/// One of the three backends, dispatched by `match`.
///
/// Pick the variant once with [`AnyFinder::new`]; callers then only see [`Finder`].
#[derive(Clone, Debug)]
pub enum AnyFinder {
    /// Linear scan.
    Linear(LinearScan),
    /// Octree.
    Octree(Octree),
    /// K-d tree.
    KdTree(KdTree),
}

impl AnyFinder {
    /// Create an empty backend of the given kind.
    pub fn new(kind: FinderKind) -> Self {
        match kind {
            FinderKind::Linear => Self::Linear(LinearScan::new()),
            FinderKind::Octree => Self::Octree(Octree::new()),
            FinderKind::KdTree => Self::KdTree(KdTree::new()),
        }
    }

    /// Which backend this is.
    pub const fn kind(&self) -> FinderKind {
        match self {
            Self::Linear(_) => FinderKind::Linear,
            Self::Octree(_) => FinderKind::Octree,
            Self::KdTree(_) => FinderKind::KdTree,
        }
    }

    fn as_dyn(&self) -> &dyn Finder {
        match self {
            Self::Linear(f) => f,
            Self::Octree(f) => f,
            Self::KdTree(f) => f,
        }
    }

    fn as_dyn_mut(&mut self) -> &mut dyn Finder {
        match self {
            Self::Linear(f) => f,
            Self::Octree(f) => f,
            Self::KdTree(f) => f,
        }
    }
}

impl Default for AnyFinder {
    fn default() -> Self {
        Self::new(FinderKind::default())
    }
}

impl From<FinderKind> for AnyFinder {
    fn from(kind: FinderKind) -> Self {
        Self::new(kind)
    }
}

impl Finder for AnyFinder {
    fn insert(&mut self, edge: Edge) -> bool {
        self.as_dyn_mut().insert(edge)
    }

    fn remove(&mut self, edge: Edge) -> bool {
        self.as_dyn_mut().remove(edge)
    }

    fn nearest(&self, target: Color) -> Option<Nearest> {
        self.as_dyn().nearest(target)
    }

    fn len(&self) -> usize {
        self.as_dyn().len()
    }

    fn clear(&mut self) {
        self.as_dyn_mut().clear();
    }
}
