// Copyright 2025 the Huefill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Command-line front end: grow an image and write it as PPM or PNG.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::{ArgGroup, Parser};
use huefill::huefill_index::FinderKind;
use huefill::{
    GrowConfig, GrowError, Grower, ImageFormat, ImageWriter, PaletteOrder, SizeSpec, StartPoint,
    parse_seed,
};

#[derive(Debug, Parser)]
#[command(version, about)]
#[command(group(ArgGroup::new("backend").args(["finder", "naive", "octree", "kd_tree"])))]
struct Args {
    /// Output file. `-` writes PPM to standard output; a `.png` extension selects PNG.
    #[arg(short, long, default_value = "-")]
    output: PathBuf,

    /// Image size and palette bits per channel, as WIDTH:HEIGHT:DEPTH.
    #[arg(short, long, default_value = "512:512:6")]
    size: SizeSpec,

    /// Hexadecimal RNG seed. Random when omitted.
    #[arg(short = 'S', long, value_parser = parse_seed)]
    seed: Option<u64>,

    /// Write a video frame every N colors (PPM only).
    #[arg(short = 'n', long, value_name = "N", default_value_t = 0)]
    frames: usize,

    /// Seed pixel as X,Y. May be repeated; defaults to the image center.
    #[arg(short = 'p', long = "start", value_name = "X,Y")]
    starts: Vec<StartPoint>,

    /// Nearest-color backend: linear, octree or kdtree.
    #[arg(short, long)]
    finder: Option<FinderKind>,

    /// Shorthand for `--finder linear`.
    #[arg(short = 'N', long)]
    naive: bool,

    /// Shorthand for `--finder octree`.
    #[arg(short = 'O', long)]
    octree: bool,

    /// Shorthand for `--finder kdtree`.
    #[arg(short = 'K', long)]
    kd_tree: bool,

    /// Gamma of the palette and of the output encoding.
    #[arg(short, long, default_value_t = 2.2)]
    gamma: f32,

    /// Hand out colors in sorted order instead of shuffled.
    #[arg(long)]
    sorted: bool,

    /// Log progress.
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn finder_kind(&self) -> FinderKind {
        if self.naive {
            FinderKind::Linear
        } else if self.octree {
            FinderKind::Octree
        } else if self.kd_tree {
            FinderKind::KdTree
        } else {
            self.finder.unwrap_or_default()
        }
    }
}

impl From<&Args> for GrowConfig {
    fn from(args: &Args) -> Self {
        Self {
            seed: args.seed,
            starts: args.starts.clone(),
            gamma: args.gamma,
            finder: args.finder_kind(),
            order: if args.sorted {
                PaletteOrder::Sorted
            } else {
                PaletteOrder::Shuffled
            },
            frame_interval: args.frames,
            ..Self::default().with_size(args.size)
        }
    }
}

fn grow_into<W: Write>(grower: &mut Grower, out: W, format: ImageFormat) -> Result<(), GrowError> {
    let gamma = grower.config().gamma;
    let with_frames = grower.config().frame_interval != 0;
    let mut writer = ImageWriter::new(out, format, gamma, with_frames)?;
    grower.run(|canvas| writer.write_frame(canvas))?;
    if with_frames {
        log::info!("wrote {} frames", writer.frames());
    }
    writer.finish(grower.canvas())?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let started = Instant::now();
    let mut grower = Grower::new(GrowConfig::from(&args)).context("invalid configuration")?;

    if args.output == Path::new("-") {
        let out = BufWriter::new(io::stdout().lock());
        grow_into(&mut grower, out, ImageFormat::Ppm).context("writing to standard output")?;
    } else {
        let file = File::create(&args.output)
            .with_context(|| format!("creating {}", args.output.display()))?;
        let format = ImageFormat::from_path(&args.output);
        grow_into(&mut grower, BufWriter::new(file), format)
            .with_context(|| format!("writing {}", args.output.display()))?;
    }

    log::info!(
        "seed {:x}, finished in {:.2?}",
        grower.seed(),
        started.elapsed()
    );
    Ok(())
}
