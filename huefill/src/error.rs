// Copyright 2025 the Huefill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.

use huefill_index::FinderKind;
use thiserror::Error;

/// Errors raised while configuring, growing, or writing an image.
#[derive(Debug, Error)]
pub enum GrowError {
    /// Width or height is zero.
    #[error("image dimensions must be non-zero, got {width}x{height}")]
    InvalidSize {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },

    /// Bits per channel outside `1..=8`.
    #[error("color depth must be between 1 and 8 bits per channel, got {0}")]
    InvalidDepth(u32),

    /// Gamma is zero, negative, or not finite.
    #[error("gamma must be finite and positive, got {0}")]
    InvalidGamma(f32),

    /// A start point lies outside the image.
    #[error("start point ({x}, {y}) lies outside the {width}x{height} image")]
    StartOutOfBounds {
        /// Start column.
        x: u32,
        /// Start row.
        y: u32,
        /// Image width.
        width: u32,
        /// Image height.
        height: u32,
    },

    /// The same start point was given twice.
    #[error("start point ({x}, {y}) given more than once")]
    DuplicateStart {
        /// Start column.
        x: u32,
        /// Start row.
        y: u32,
    },

    /// The finder refused a color outside its domain.
    #[error("{finder} finder rejected the color placed at ({x}, {y})")]
    Rejected {
        /// Backend in use.
        finder: FinderKind,
        /// Pixel column.
        x: u32,
        /// Pixel row.
        y: u32,
    },

    /// Every frontier pixel was retired while empty pixels remain.
    #[error("frontier is empty with {pixels} pixels left to fill")]
    FrontierExhausted {
        /// Pixels still unpainted.
        pixels: u64,
    },

    /// Intermediate frames were requested for a format that cannot be concatenated.
    #[error("video frames can only be written as PPM")]
    FramesRequirePpm,

    /// Image encoding failed.
    #[error(transparent)]
    Image(#[from] image::ImageError),

    /// Writing the output failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Errors raised while parsing command-line values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// `--size` was not `WIDTH:HEIGHT:DEPTH`.
    #[error("expected WIDTH:HEIGHT:DEPTH, got {0:?}")]
    Size(String),

    /// `--start` was not `X,Y`.
    #[error("expected X,Y, got {0:?}")]
    Start(String),

    /// `--seed` was not a hexadecimal `u64`.
    #[error("expected a hexadecimal seed, got {0:?}")]
    Seed(String),
}
