// Copyright 2025 the Huefill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Huefill: grow an image in which every pixel has a distinct color.
//!
//! Every color of a `depth`-bit-per-channel cube is placed exactly once. Starting from one or
//! more seed pixels, each new color is painted next to the already-painted frontier pixel whose
//! color is nearest to it, so the image grows outward as smooth, organic color fields.
//!
//! The nearest-color query is answered by [`huefill_index`]; pick a backend with
//! [`GrowConfig::finder`].
//!
//! ## API overview
//!
//! - [`GrowConfig`]: size, palette depth, gamma, seed, start pixels, finder and frame interval.
//! - [`Grower`]: the growth loop. [`Grower::step`] places one color, [`Grower::run`] places them all.
//! - [`Canvas`]: the pixel buffer, encodable as PPM or PNG.
//! - [`ColorSet`]: the exhaustive palette.
//! - [`ImageWriter`]: writes video frames and the final image to one stream.
//!
//! ## Example
//!
//! ```
//! use huefill::{GrowConfig, Grower, SizeSpec};
//!
//! let config = GrowConfig {
//!     seed: Some(0x1234),
//!     ..GrowConfig::default().with_size(SizeSpec { width: 16, height: 16, depth: 4 })
//! };
//! let mut grower = Grower::new(config).unwrap();
//! grower.run(|_| Ok(())).unwrap();
//! assert_eq!(grower.remaining_pixels(), 0);
//! assert_eq!(grower.canvas().painted(), 256);
//! ```

pub mod canvas;
pub mod config;
pub mod error;
pub mod grow;
pub mod output;
pub mod palette;

pub use canvas::{Canvas, ImageFormat, Neighbors};
pub use config::{GrowConfig, SizeSpec, StartPoint, parse_seed};
pub use error::{GrowError, ParseError};
pub use grow::Grower;
pub use output::ImageWriter;
pub use palette::{ColorSet, MAX_DEPTH, PaletteOrder};

pub use huefill_index;
