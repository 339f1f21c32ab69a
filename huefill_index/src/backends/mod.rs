// Copyright 2025 the Huefill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend implementations of [`Finder`](crate::Finder).
//!
//! - `linear`: unordered vector, full scan per query.
//! - `octree`: eight-way split of the color cube, coalesced again as it empties.
//! - `kdtree`: median splits on red, green and blue in turn.
//!
//! Pruning note
//! ------------
//! Both trees only skip a subtree when every point in it is provably farther than
//! the best candidate so far. The octree compares the query against cube bounds
//! grown by the candidate distance; the k-d tree compares the candidate distance
//! with the query's distance to the splitting plane. Neither is approximate.

pub mod kdtree;
pub mod linear;
pub mod octree;
