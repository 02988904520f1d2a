// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! phasm-scrub - strip DCT-domain payloads from an image's chroma.
//!
//! Reads an image, low-pass filters the selected YCbCr channels block by
//! block, and writes the result next to the input (`photo.jpg` →
//! `photo_mod.jpg`) unless `--output` is given.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, ValueEnum};

use phasm_scrub::image_io::{self, DEFAULT_JPEG_QUALITY, DEFAULT_OUTPUT_SUFFIX};
use phasm_scrub::{ChannelSet, ConfigOverrides, RetentionPolicy, ScrubConfig};

/// Output encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// From the output extension; unknown or missing extensions get JPEG
    Auto,
    /// Always JPEG at --quality, whatever the extension
    Jpeg,
}

/// Destroy hidden data in an image's color channels
///
/// Every 8x8 block of the selected channels is transformed with a DCT,
/// high-frequency coefficients are zeroed, and the block is rebuilt.
#[derive(Parser)]
#[command(name = "phasm-scrub")]
#[command(version)]
#[command(about = "Low-pass filter image chroma in the DCT domain to destroy steganographic payloads")]
struct Cli {
    /// Input image (prompted for when omitted)
    input: Option<PathBuf>,

    /// Output path (default: input path with --suffix before the extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Suffix for the derived output path
    #[arg(long, default_value = DEFAULT_OUTPUT_SUFFIX)]
    suffix: String,

    /// Retention policy: low-block(k), low-block, dc-only or keep-all
    #[arg(short, long)]
    policy: Option<RetentionPolicy>,

    /// Channels to filter, e.g. "1,2" or "cb,cr" (0/y = luma)
    #[arg(short, long)]
    channels: Option<ChannelSet>,

    /// Transform raw 0..255 values instead of recentering around zero
    #[arg(long)]
    no_level_shift: bool,

    /// JPEG output quality (1-100)
    #[arg(short, long, default_value_t = DEFAULT_JPEG_QUALITY,
          value_parser = clap::value_parser!(u8).range(1..=100))]
    quality: u8,

    /// Output encoding
    #[arg(long, value_enum, default_value_t = OutputFormat::Auto)]
    format: OutputFormat,

    /// TOML config file with channels, policy and level_shift
    #[arg(long)]
    config: Option<PathBuf>,

    /// Worker threads for block processing (default: one per core)
    #[arg(long)]
    threads: Option<usize>,
}

impl Cli {
    /// Defaults, overridden by the config file, overridden by flags.
    fn scrub_config(&self) -> Result<ScrubConfig> {
        let overrides = ConfigOverrides {
            channels: self.channels,
            policy: self.policy,
            level_shift: self.no_level_shift.then_some(false),
        };
        let config = overrides.resolve(self.config.as_deref()).with_context(|| match &self.config {
            Some(path) => format!("invalid configuration (config file {})", path.display()),
            None => "invalid configuration".to_string(),
        })?;
        Ok(config)
    }
}

fn prompt_for_input() -> Result<PathBuf> {
    print!("Enter the path to the image: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let path = line.trim();
    if path.is_empty() {
        bail!("no input path given");
    }
    Ok(PathBuf::from(path))
}

fn init_threads(threads: Option<usize>) -> Result<()> {
    let Some(n) = threads else { return Ok(()) };
    #[cfg(feature = "parallel")]
    rayon::ThreadPoolBuilder::new()
        .num_threads(n)
        .build_global()
        .map_err(|e| anyhow!("rayon init failed: {e}"))?;
    #[cfg(not(feature = "parallel"))]
    if n > 1 {
        return Err(anyhow!("built without the `parallel` feature; --threads {n} unavailable"));
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    init_threads(cli.threads)?;
    let config = cli.scrub_config()?;

    let input = match &cli.input {
        Some(path) => path.clone(),
        None => prompt_for_input()?,
    };
    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| image_io::derive_output_path(&input, &cli.suffix));

    let planes = image_io::load_planes(&input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    tracing::info!(
        input = %input.display(),
        width = planes[0].width(),
        height = planes[0].height(),
        channels = %config.channels,
        policy = %config.policy,
        "scrubbing"
    );

    let scrubbed = phasm_scrub::process(&planes, &config)?;

    let saved = match cli.format {
        OutputFormat::Auto => image_io::save_planes(&scrubbed, &output, cli.quality),
        OutputFormat::Jpeg => image_io::save_jpeg(&scrubbed, &output, cli.quality),
    };
    saved.with_context(|| format!("failed to write {}", output.display()))?;
    println!("Image saved to {}.", output.display());
    Ok(())
}
