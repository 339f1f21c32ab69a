// Copyright 2025 the Huefill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pixel buffer and image encoding.

use std::io::Write;

use huefill_index::Color;
use image::codecs::png::PngEncoder;
use image::codecs::pnm::{PnmEncoder, PnmSubtype, SampleEncoding};
use image::{ExtendedColorType, ImageEncoder, Rgb, RgbImage};

use crate::error::GrowError;

bitflags::bitflags! {
    /// The 8-connected neighborhood of a pixel, in row-major order.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Neighbors: u8 {
        /// Up and left.
        const NW = 1 << 0;
        /// Up.
        const N  = 1 << 1;
        /// Up and right.
        const NE = 1 << 2;
        /// Left.
        const W  = 1 << 3;
        /// Right.
        const E  = 1 << 4;
        /// Down and left.
        const SW = 1 << 5;
        /// Down.
        const S  = 1 << 6;
        /// Down and right.
        const SE = 1 << 7;
    }
}

impl Neighbors {
    /// `(dx, dy)` for each flag, indexed by bit position.
    const OFFSETS: [(i64, i64); 8] = [
        (-1, -1),
        (0, -1),
        (1, -1),
        (-1, 0),
        (1, 0),
        (-1, 1),
        (0, 1),
        (1, 1),
    ];

    /// Number of neighbors in the set.
    pub fn count(self) -> usize {
        self.bits().count_ones() as usize
    }

    /// Positions of the neighbors in the set around `(x, y)`, in row-major order.
    ///
    /// Neighbors that would fall off the `u32` grid are skipped.
    pub fn positions_around(self, x: u32, y: u32) -> impl Iterator<Item = (u32, u32)> {
        self.iter().filter_map(move |flag| {
            let (dx, dy) = Self::OFFSETS[flag.bits().trailing_zeros() as usize];
            let nx = u32::try_from(i64::from(x) + dx).ok()?;
            let ny = u32::try_from(i64::from(y) + dy).ok()?;
            Some((nx, ny))
        })
    }
}

/// Output encodings.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ImageFormat {
    /// Binary PPM (P6). Several may be concatenated into one stream.
    #[default]
    Ppm,
    /// PNG.
    Png,
}

impl ImageFormat {
    /// PNG for a `.png` extension (any case), PPM otherwise.
    pub fn from_path(path: &std::path::Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("png") => Self::Png,
            _ => Self::Ppm,
        }
    }
}

/// A `width × height` grid of linear-space colors. Unpainted pixels are transparent.
#[derive(Clone, Debug)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl Canvas {
    /// Create a fully unpainted canvas.
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            pixels: vec![Color::TRANSPARENT; len],
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    /// Color at `(x, y)`, or `None` outside the canvas.
    pub fn get(&self, x: u32, y: u32) -> Option<Color> {
        self.offset(x, y).map(|i| self.pixels[i])
    }

    /// Paint `(x, y)`. Out-of-bounds writes are ignored.
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        if let Some(i) = self.offset(x, y) {
            self.pixels[i] = color;
        }
    }

    /// True if `(x, y)` is on the canvas and still unpainted.
    pub fn is_vacant(&self, x: u32, y: u32) -> bool {
        self.get(x, y).is_some_and(|c| c.a == 0.0)
    }

    /// The unpainted neighbors of `(x, y)`.
    pub fn vacant_neighbors(&self, x: u32, y: u32) -> Neighbors {
        let mut free = Neighbors::empty();
        for flag in Neighbors::all().iter() {
            if let Some((nx, ny)) = flag.positions_around(x, y).next()
                && self.is_vacant(nx, ny)
            {
                free |= flag;
            }
        }
        free
    }

    /// Number of painted pixels.
    pub fn painted(&self) -> usize {
        self.pixels.iter().filter(|c| c.a != 0.0).count()
    }

    /// Convert to 8-bit sRGB-ish values by undoing `gamma`.
    pub fn to_rgb8(&self, gamma: f32) -> RgbImage {
        let inv = 1.0 / gamma;
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Channel values are in [0, 255]; the float-to-int cast saturates."
        )]
        let quantize = |v: f32| (v.powf(inv) * 255.0) as u8;
        RgbImage::from_fn(self.width, self.height, |x, y| {
            let c = self.pixels[y as usize * self.width as usize + x as usize];
            Rgb([quantize(c.r), quantize(c.g), quantize(c.b)])
        })
    }

    /// Encode the canvas to `out`.
    pub fn encode<W: Write>(
        &self,
        out: W,
        format: ImageFormat,
        gamma: f32,
    ) -> Result<(), GrowError> {
        let rgb = self.to_rgb8(gamma);
        match format {
            ImageFormat::Ppm => PnmEncoder::new(out)
                .with_subtype(PnmSubtype::Pixmap(SampleEncoding::Binary))
                .write_image(rgb.as_raw(), self.width, self.height, ExtendedColorType::Rgb8)?,
            ImageFormat::Png => PngEncoder::new(out).write_image(
                rgb.as_raw(),
                self.width,
                self.height,
                ExtendedColorType::Rgb8,
            )?,
        }
        Ok(())
    }
}
