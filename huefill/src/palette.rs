// Copyright 2025 the Huefill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The exhaustive color palette.

use huefill_index::Color;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::error::GrowError;

/// Largest supported bits per channel (a 24-bit palette).
pub const MAX_DEPTH: u32 = 8;

/// Order in which palette colors are handed out.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PaletteOrder {
    /// Uniformly shuffled.
    #[default]
    Shuffled,
    /// Descending red, then green, then blue.
    Sorted,
}

/// Every color of a `depth`-bit-per-channel cube, consumed from the back.
#[derive(Clone, Debug)]
pub struct ColorSet {
    depth: u32,
    colors: Vec<Color>,
}

impl ColorSet {
    /// Enumerate all `2^(3·depth)` colors, each channel mapped through `gamma`.
    pub fn new(depth: u32, gamma: f32) -> Result<Self, GrowError> {
        if !(1..=MAX_DEPTH).contains(&depth) {
            return Err(GrowError::InvalidDepth(depth));
        }
        let levels = 1_u16 << depth;
        let den = f32::from(levels - 1);
        let mut colors = Vec::with_capacity(1 << (3 * depth));
        for r in 0..levels {
            for g in 0..levels {
                for b in 0..levels {
                    colors.push(Color::from_gamma(
                        f32::from(r) / den,
                        f32::from(g) / den,
                        f32::from(b) / den,
                        gamma,
                    ));
                }
            }
        }
        Ok(Self { depth, colors })
    }

    /// Bits per channel.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Colors not yet handed out.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// True once every color has been handed out.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Shuffle the remaining colors.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.colors.shuffle(rng);
    }

    /// Sort so that colors come out in descending [`Color::cmp_rgb`] order.
    pub fn sort(&mut self) {
        self.colors.sort_by(Color::cmp_rgb);
    }

    /// Apply `order`.
    pub fn arrange<R: Rng + ?Sized>(&mut self, order: PaletteOrder, rng: &mut R) {
        match order {
            PaletteOrder::Shuffled => self.shuffle(rng),
            PaletteOrder::Sorted => self.sort(),
        }
    }

    /// Take the next color.
    pub fn pop(&mut self) -> Option<Color> {
        self.colors.pop()
    }
}
