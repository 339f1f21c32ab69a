// Copyright 2025 the Huefill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Growth configuration and the small value types the command line parses into it.

use std::collections::HashSet;
use std::str::FromStr;

use huefill_index::FinderKind;

use crate::error::{GrowError, ParseError};
use crate::palette::{MAX_DEPTH, PaletteOrder};

/// Everything that determines a run.
#[derive(Clone, Debug, PartialEq)]
pub struct GrowConfig {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Palette bits per channel; the palette holds `2^(3·depth)` colors.
    pub depth: u32,
    /// Exponent mapping palette values to linear space, and back on output.
    pub gamma: f32,
    /// RNG seed; a random one is drawn when `None`.
    pub seed: Option<u64>,
    /// Seed pixels. The image center is used when empty.
    pub starts: Vec<StartPoint>,
    /// Nearest-color backend.
    pub finder: FinderKind,
    /// Palette ordering.
    pub order: PaletteOrder,
    /// Emit a frame every this many palette colors; `0` disables frames.
    pub frame_interval: usize,
}

impl Default for GrowConfig {
    fn default() -> Self {
        Self {
            width: 512,
            height: 512,
            depth: 6,
            gamma: 2.2,
            seed: None,
            starts: Vec::new(),
            finder: FinderKind::default(),
            order: PaletteOrder::default(),
            frame_interval: 0,
        }
    }
}

impl GrowConfig {
    /// Check every field that can make a run fail up front.
    pub fn validate(&self) -> Result<(), GrowError> {
        if self.width == 0 || self.height == 0 {
            return Err(GrowError::InvalidSize {
                width: self.width,
                height: self.height,
            });
        }
        if !(1..=MAX_DEPTH).contains(&self.depth) {
            return Err(GrowError::InvalidDepth(self.depth));
        }
        if !(self.gamma.is_finite() && self.gamma > 0.0) {
            return Err(GrowError::InvalidGamma(self.gamma));
        }
        let mut seen = HashSet::new();
        for &StartPoint { x, y } in &self.starts {
            if x >= self.width || y >= self.height {
                return Err(GrowError::StartOutOfBounds {
                    x,
                    y,
                    width: self.width,
                    height: self.height,
                });
            }
            if !seen.insert((x, y)) {
                return Err(GrowError::DuplicateStart { x, y });
            }
        }
        Ok(())
    }

    /// The configured start points, or the image center when none were given.
    pub fn start_points(&self) -> Vec<StartPoint> {
        if self.starts.is_empty() {
            vec![StartPoint {
                x: self.width / 2,
                y: self.height / 2,
            }]
        } else {
            self.starts.clone()
        }
    }

    /// Apply a parsed `--size`.
    pub fn with_size(mut self, size: SizeSpec) -> Self {
        self.width = size.width;
        self.height = size.height;
        self.depth = size.depth;
        self
    }
}

/// `WIDTH:HEIGHT:DEPTH`, for example `512:512:6`. Any non-digit works as the separator.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SizeSpec {
    /// Image width.
    pub width: u32,
    /// Image height.
    pub height: u32,
    /// Palette bits per channel.
    pub depth: u32,
}

impl FromStr for SizeSpec {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseError::Size(s.to_owned());
        match parse_numbers(s).ok_or_else(err)?[..] {
            [width, height, depth] => Ok(Self {
                width,
                height,
                depth,
            }),
            _ => Err(err()),
        }
    }
}

/// A seed pixel, `X,Y`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct StartPoint {
    /// Column.
    pub x: u32,
    /// Row.
    pub y: u32,
}

impl FromStr for StartPoint {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseError::Start(s.to_owned());
        match parse_numbers(s).ok_or_else(err)?[..] {
            [x, y] => Ok(Self { x, y }),
            _ => Err(err()),
        }
    }
}

/// Parse a hexadecimal seed, with or without a `0x` prefix.
pub fn parse_seed(s: &str) -> Result<u64, ParseError> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    u64::from_str_radix(digits, 16).map_err(|_| ParseError::Seed(s.to_owned()))
}

/// Decimal numbers separated by single non-digit characters.
fn parse_numbers(s: &str) -> Option<Vec<u32>> {
    s.split(|c: char| !c.is_ascii_digit())
        .map(|part| part.parse().ok())
        .collect()
}
