// Copyright 2025 the Huefill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Huefill Index: exact nearest-color search over a changing set of colored pixels.
//!
//! The index stores [`Edge`]s (a pixel position plus the color painted there) and answers
//! "which stored edge has the color closest to this one?" while edges are inserted and
//! removed between queries. It is the hot loop of the `huefill` image generator, which grows
//! an image outward from seed pixels, one palette color at a time.
//!
//! - Insert and remove edges; a position is never stored twice.
//! - Query the nearest stored color by Euclidean distance over red, green and blue.
//! - Choose a backend once at construction; consumers only see the [`Finder`] trait.
//!
//! # Example
//!
//! ```rust
//! use huefill_index::{AnyFinder, Color, Edge, Finder, FinderKind};
//!
//! let mut finder = AnyFinder::new(FinderKind::KdTree);
//! finder.insert(Edge::new(0, 0, Color::new(0.0, 0.0, 0.0)));
//! finder.insert(Edge::new(10, 10, Color::new(1.0, 1.0, 1.0)));
//! finder.insert(Edge::new(5, 5, Color::new(0.5, 0.5, 0.5)));
//!
//! let hit = finder.nearest(Color::new(0.4, 0.4, 0.4)).unwrap();
//! assert_eq!((hit.edge.x, hit.edge.y), (5, 5));
//! assert!((hit.distance - 0.1 * 3.0_f32.sqrt()).abs() < 1e-5);
//!
//! // A fully surrounded pixel is dropped from the frontier.
//! assert!(finder.remove(hit.edge));
//! assert_eq!(finder.len(), 2);
//! ```
//!
//! ## Choosing a backend
//!
//! - [`LinearScan`]: scans everything. Trivially correct; fine for a few thousand edges.
//! - [`Octree`]: eight-way cube splits that coalesce again as edges leave. Depth follows
//!   the live density of colors. Domain `[0, 1 + ε)` per channel.
//! - [`KdTree`] (default): median splits rotating through red, green and blue. Usually the
//!   fastest for shuffled palettes. Domain `[0, 1]` per channel. Its `remove` panics on a
//!   missing edge instead of returning `false`.
//!
//! All three return the same distance for every query. When several edges tie, which one
//! is returned depends on the backend.
//!
//! ### Float semantics
//!
//! Colors are `f32`. The trees reject NaN and out-of-domain channels on insert.
//!
//! ## Features
//!
//! - `std` (default): use the standard library's float functions.
//! - `libm`: use [`libm`](https://docs.rs/libm) instead, for `no_std` targets.

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod backends;
pub mod finder;
mod float;
pub mod index;
pub mod types;

pub use backends::kdtree::{KDTREE_LEAF_CAPACITY, KdTree};
pub use backends::linear::LinearScan;
pub use backends::octree::{OCTREE_LEAF_CAPACITY, Octree};
pub use finder::{Finder, Nearest};
pub use index::{AnyFinder, FinderKind, UnknownFinderKind};
pub use types::{Axis, Color, Edge};
