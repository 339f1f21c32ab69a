// Copyright 2025 the Huefill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Writes frames and the final image to one stream.

use std::io::Write;

use crate::canvas::{Canvas, ImageFormat};
use crate::error::GrowError;

/// An output stream plus the encoding applied to every image written to it.
///
/// PPM images can be concatenated, so intermediate frames are only allowed for PPM.
#[derive(Debug)]
pub struct ImageWriter<W: Write> {
    out: W,
    format: ImageFormat,
    gamma: f32,
    frames: usize,
}

impl<W: Write> ImageWriter<W> {
    /// Create a writer. `with_frames` asks for intermediate frames, which PNG cannot hold.
    pub fn new(out: W, format: ImageFormat, gamma: f32, with_frames: bool) -> Result<Self, GrowError> {
        if with_frames && format != ImageFormat::Ppm {
            return Err(GrowError::FramesRequirePpm);
        }
        Ok(Self {
            out,
            format,
            gamma,
            frames: 0,
        })
    }

    /// Append an intermediate frame.
    pub fn write_frame(&mut self, canvas: &Canvas) -> Result<(), GrowError> {
        if self.format != ImageFormat::Ppm {
            return Err(GrowError::FramesRequirePpm);
        }
        canvas.encode(&mut self.out, self.format, self.gamma)?;
        self.frames += 1;
        log::trace!("wrote frame {}", self.frames);
        Ok(())
    }

    /// Frames written so far.
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Write the finished image, flush, and hand back the stream.
    pub fn finish(mut self, canvas: &Canvas) -> Result<W, GrowError> {
        canvas.encode(&mut self.out, self.format, self.gamma)?;
        self.out.flush()?;
        Ok(self.out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn png_refuses_frames() {
        assert!(matches!(
            ImageWriter::new(Vec::new(), ImageFormat::Png, 2.2, true),
            Err(GrowError::FramesRequirePpm)
        ));
        let mut w = ImageWriter::new(Vec::new(), ImageFormat::Png, 2.2, false).unwrap();
        assert!(w.write_frame(&Canvas::new(1, 1)).is_err());
    }

    #[test]
    fn ppm_frames_concatenate() {
        let canvas = Canvas::new(2, 2);
        let mut w = ImageWriter::new(Vec::new(), ImageFormat::Ppm, 2.2, true).unwrap();
        w.write_frame(&canvas).unwrap();
        w.write_frame(&canvas).unwrap();
        assert_eq!(w.frames(), 2);
        let bytes = w.finish(&canvas).unwrap();
        let headers = bytes.windows(2).filter(|p| p == b"P6").count();
        assert_eq!(headers, 3);
    }
}
