// Copyright 2025 the Huefill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Color and edge types shared by every backend.

use core::cmp::Ordering;

#[cfg(not(feature = "std"))]
use crate::float::FloatFuncs;

/// A linear-space color.
///
/// Only `r`, `g` and `b` take part in distance and ordering. `a` is carried
/// along so a pixel buffer can use alpha `0` as its "empty" marker.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Color {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Opacity; always `1.0` for placed colors.
    pub a: f32,
}

impl Color {
    /// Fully transparent black, used to mark unpainted pixels.
    pub const TRANSPARENT: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    /// Create an opaque color from linear channel values.
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create an opaque color from perceptual values by raising each channel to `gamma`.
    pub fn from_gamma(r: f32, g: f32, b: f32, gamma: f32) -> Self {
        Self::new(r.powf(gamma), g.powf(gamma), b.powf(gamma))
    }

    /// Value of one color channel.
    #[inline]
    pub const fn channel(&self, axis: Axis) -> f32 {
        match axis {
            Axis::R => self.r,
            Axis::G => self.g,
            Axis::B => self.b,
        }
    }

    /// Squared Euclidean distance over the three color channels.
    #[inline]
    pub fn dist2(&self, other: &Self) -> f32 {
        let dr = self.r - other.r;
        let dg = self.g - other.g;
        let db = self.b - other.b;
        dr * dr + dg * dg + db * db
    }

    /// Euclidean distance over the three color channels.
    #[inline]
    pub fn dist(&self, other: &Self) -> f32 {
        self.dist2(other).sqrt()
    }

    /// True if every channel is finite and within `[0, 1]`.
    pub fn is_in_unit_cube(&self) -> bool {
        [self.r, self.g, self.b]
            .iter()
            .all(|v| (0.0..=1.0).contains(v))
    }

    /// Lexicographic ordering by red, then green, then blue.
    pub fn cmp_rgb(&self, other: &Self) -> Ordering {
        self.cmp_rotated(other, Axis::R)
    }

    /// Lexicographic ordering starting at `axis` and wrapping around.
    ///
    /// For `Axis::G` the order is green, blue, red. NaN channels compare as equal.
    pub fn cmp_rotated(&self, other: &Self, axis: Axis) -> Ordering {
        let mut a = axis;
        for _ in 0..3 {
            match self.channel(a).partial_cmp(&other.channel(a)) {
                Some(Ordering::Equal) | None => a = a.next(),
                Some(ord) => return ord,
            }
        }
        Ordering::Equal
    }
}

/// A color channel used as a splitting axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Red.
    R,
    /// Green.
    G,
    /// Blue.
    B,
}

impl Axis {
    /// All axes in cyclic order.
    pub const ALL: [Self; 3] = [Self::R, Self::G, Self::B];

    /// The following axis, wrapping from blue back to red.
    #[inline]
    pub const fn next(self) -> Self {
        match self {
            Self::R => Self::G,
            Self::G => Self::B,
            Self::B => Self::R,
        }
    }
}

/// A placed pixel on the growth frontier: its position and the color painted there.
///
/// Two edges at the same position are the same edge, whatever their colors.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Edge {
    /// Pixel column.
    pub x: u32,
    /// Pixel row.
    pub y: u32,
    /// Color painted at `(x, y)`.
    pub color: Color,
}

impl Edge {
    /// Create an edge.
    pub const fn new(x: u32, y: u32, color: Color) -> Self {
        Self { x, y, color }
    }

    /// True if both edges sit on the same pixel.
    #[inline]
    pub const fn same_position(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }

    /// [`Color::cmp_rotated`] on the colors, then row, then column.
    ///
    /// Falling back to position makes this a total order over edges with distinct
    /// positions, so equal colors still land on a single, reproducible side of a split.
    pub fn cmp_rotated(&self, other: &Self, axis: Axis) -> Ordering {
        self.color
            .cmp_rotated(&other.color, axis)
            .then_with(|| (self.y, self.x).cmp(&(other.y, other.x)))
    }
}

/// Exhaustive scan returning the closest edge and its squared distance.
///
/// On ties the first edge in slice order wins.
pub(crate) fn scan_closest(edges: &[Edge], target: &Color) -> Option<(Edge, f32)> {
    let (first, rest) = edges.split_first()?;
    let mut best = (*first, first.color.dist2(target));
    for e in rest {
        let d2 = e.color.dist2(target);
        if d2 < best.1 {
            best = (*e, d2);
        }
    }
    Some(best)
}

/// Keep `current` unless `candidate` is strictly closer.
#[inline]
pub(crate) fn closer(
    current: Option<(Edge, f32)>,
    candidate: Option<(Edge, f32)>,
) -> Option<(Edge, f32)> {
    match (current, candidate) {
        (Some(cur), Some(cand)) if cand.1 < cur.1 => Some(cand),
        (None, cand) => cand,
        (cur, _) => cur,
    }
}
