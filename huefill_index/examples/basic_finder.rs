// Copyright 2025 the Huefill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Basic usage of Huefill Index: insert, query, retire.

use huefill_index::{Color, Edge, Finder, Octree};

fn main() {
    let mut finder = Octree::new();
    finder.insert(Edge::new(0, 0, Color::new(0.9, 0.1, 0.1)));
    finder.insert(Edge::new(1, 0, Color::new(0.1, 0.9, 0.1)));
    let blue = Edge::new(2, 0, Color::new(0.1, 0.1, 0.9));
    finder.insert(blue);

    let hit = finder.nearest(Color::new(0.2, 0.2, 0.7));
    println!("nearest to a dull blue: {hit:?}");

    // Once a pixel has no free neighbors it leaves the frontier.
    finder.remove(blue);
    let hit = finder.nearest(Color::new(0.2, 0.2, 0.7));
    println!("after retiring the blue pixel: {hit:?}");
    println!("{finder:?}");
}
