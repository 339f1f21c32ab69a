// Copyright 2025 the Huefill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The growth loop.
//!
//! Each step pops the next palette color, asks the finder for the frontier pixel whose
//! color is nearest, and paints a random vacant neighbor of that pixel. Frontier pixels
//! that turn out to be fully surrounded are retired from the finder on the way.

use core::fmt;

use huefill_index::{AnyFinder, Edge, Finder};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::canvas::Canvas;
use crate::config::GrowConfig;
use crate::error::GrowError;
use crate::palette::ColorSet;

/// Colors between progress messages.
const PROGRESS_INTERVAL: usize = 4096;

/// Grows one image from a [`GrowConfig`].
pub struct Grower {
    config: GrowConfig,
    canvas: Canvas,
    palette: ColorSet,
    finder: AnyFinder,
    rng: StdRng,
    seed: u64,
    pixels_left: u64,
}

impl fmt::Debug for Grower {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grower")
            .field("seed", &self.seed)
            .field("finder", &self.finder)
            .field("remaining_colors", &self.palette.len())
            .field("remaining_pixels", &self.pixels_left)
            .finish_non_exhaustive()
    }
}

impl Grower {
    /// Validate `config`, build the palette and place the start pixels.
    pub fn new(config: GrowConfig) -> Result<Self, GrowError> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(rand::random);
        log::info!(
            "growing {}x{} from {} bits per channel with the {} finder, seed {seed:x}",
            config.width,
            config.height,
            config.depth,
            config.finder,
        );

        let mut rng = StdRng::seed_from_u64(seed);
        let mut palette = ColorSet::new(config.depth, config.gamma)?;
        palette.arrange(config.order, &mut rng);
        let pixels = u64::from(config.width) * u64::from(config.height);
        if pixels != palette.len() as u64 {
            log::warn!(
                "{} palette colors for {pixels} pixels; the run stops when either runs out",
                palette.len()
            );
        }

        let mut grower = Self {
            canvas: Canvas::new(config.width, config.height),
            finder: AnyFinder::new(config.finder),
            palette,
            rng,
            seed,
            pixels_left: pixels,
            config,
        };
        for start in grower.config.start_points() {
            let Some(color) = grower.palette.pop() else {
                break;
            };
            grower.paint(Edge::new(start.x, start.y, color))?;
        }
        Ok(grower)
    }

    fn paint(&mut self, edge: Edge) -> Result<(), GrowError> {
        if !self.finder.insert(edge) {
            return Err(GrowError::Rejected {
                finder: self.finder.kind(),
                x: edge.x,
                y: edge.y,
            });
        }
        self.canvas.set(edge.x, edge.y, edge.color);
        self.pixels_left -= 1;
        Ok(())
    }

    /// Place the next palette color.
    ///
    /// Returns `Ok(false)` once the palette or the canvas is exhausted.
    pub fn step(&mut self) -> Result<bool, GrowError> {
        if self.pixels_left == 0 {
            return Ok(false);
        }
        let Some(color) = self.palette.pop() else {
            return Ok(false);
        };
        loop {
            let Some(hit) = self.finder.nearest(color) else {
                return Err(GrowError::FrontierExhausted {
                    pixels: self.pixels_left,
                });
            };
            let Edge { x, y, .. } = hit.edge;
            let free = self.canvas.vacant_neighbors(x, y);
            let pick = (!free.is_empty()).then(|| self.rng.random_range(0..free.count()));
            let Some((nx, ny)) = pick.and_then(|i| free.positions_around(x, y).nth(i)) else {
                // Fully surrounded.
                let removed = self.finder.remove(hit.edge);
                debug_assert!(removed, "nearest returned an edge the finder cannot remove");
                continue;
            };
            self.paint(Edge::new(nx, ny, color))?;
            return Ok(true);
        }
    }

    /// Step until done, handing the canvas to `on_frame` before each color whose
    /// remaining count is a multiple of [`GrowConfig::frame_interval`].
    ///
    /// No frame is emitted once the palette or the canvas is used up; the finished image
    /// is the caller's to write.
    pub fn run<F>(&mut self, mut on_frame: F) -> Result<(), GrowError>
    where
        F: FnMut(&Canvas) -> Result<(), GrowError>,
    {
        let interval = self.config.frame_interval;
        let mut placed = 0_usize;
        loop {
            let left = self.palette.len();
            if interval != 0 && left != 0 && self.pixels_left != 0 && left % interval == 0 {
                on_frame(&self.canvas)?;
            }
            if !self.step()? {
                break;
            }
            placed += 1;
            if placed % PROGRESS_INTERVAL == 0 {
                log::debug!(
                    "{placed} colors placed, {} to go, {} frontier pixels",
                    self.palette.len(),
                    self.finder.len()
                );
            }
        }
        log::info!(
            "done: {placed} colors placed, {} pixels unpainted",
            self.pixels_left
        );
        Ok(())
    }

    /// Palette colors not yet placed.
    pub fn remaining_colors(&self) -> usize {
        self.palette.len()
    }

    /// Pixels not yet painted.
    pub fn remaining_pixels(&self) -> u64 {
        self.pixels_left
    }

    /// The image so far.
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// The frontier.
    pub fn finder(&self) -> &AnyFinder {
        &self.finder
    }

    /// The seed actually in use, whether configured or drawn.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The validated configuration.
    pub fn config(&self) -> &GrowConfig {
        &self.config
    }

    /// Take the finished image.
    pub fn into_canvas(self) -> Canvas {
        self.canvas
    }
}
