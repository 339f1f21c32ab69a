// Copyright 2025 the Huefill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grow a small image.
//!
//! Grows a 64x64 image from the full 4-bit palette with each backend and writes
//! `grow_small_<finder>.png` to the current directory.
//!
//! Run:
//! - `cargo run -p huefill_demos --example grow_small`

use std::fs::File;
use std::io::BufWriter;
use std::time::Instant;

use huefill::huefill_index::FinderKind;
use huefill::{GrowConfig, GrowError, Grower, ImageFormat, SizeSpec, StartPoint};

fn main() -> Result<(), GrowError> {
    for finder in FinderKind::ALL {
        let config = GrowConfig {
            seed: Some(0x00C0_FFEE),
            finder,
            starts: vec![StartPoint { x: 16, y: 16 }, StartPoint { x: 48, y: 48 }],
            ..GrowConfig::default().with_size(SizeSpec {
                width: 64,
                height: 64,
                depth: 4,
            })
        };
        let gamma = config.gamma;
        let started = Instant::now();
        let mut grower = Grower::new(config)?;
        grower.run(|_| Ok(()))?;
        println!("{finder}: {:.2?}", started.elapsed());

        let out = BufWriter::new(File::create(format!("grow_small_{finder}.png"))?);
        grower.canvas().encode(out, ImageFormat::Png, gamma)?;
    }
    Ok(())
}
