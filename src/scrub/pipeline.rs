// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Block-wise low-pass pipeline.
//!
//! For every selected channel and every full 8×8 block:
//! level shift → forward DCT → retention mask → inverse DCT → clip/round →
//! write back at the same origin. Blocks are independent and write disjoint
//! pixels. With the `parallel` feature each 8-row band of a plane is handed
//! to a Rayon worker; without it the same band routine runs sequentially.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::plane::{
    read_band_block, write_band_block, BlockOrigin, Channel, ChannelPlane, Planes, BLOCK_AREA,
    BLOCK_SIZE,
};

use super::config::ScrubConfig;
use super::error::Result;
use super::policy::RetentionPolicy;
use super::reconstruct::{reconstruct_block, unshift_block};
use super::transform::{forward_dct, inverse_dct, shift_block};

/// Run the transform chain on one block, stopping before clip/round.
///
/// The result is in pixel units (level shift already undone), so it can be
/// fed straight back into [`forward_dct`] to inspect what survived.
pub fn lowpass_block(
    pixels: &[u8; BLOCK_AREA],
    policy: &RetentionPolicy,
    level_shift: bool,
) -> [f64; BLOCK_AREA] {
    let mut coeffs = forward_dct(&shift_block(pixels, level_shift));
    policy.apply(&mut coeffs);
    let mut spatial = inverse_dct(&coeffs);
    unshift_block(&mut spatial, level_shift);
    spatial
}

/// Full per-block chain: pixels in, filtered pixels out.
pub fn filter_block(
    pixels: &[u8; BLOCK_AREA],
    policy: &RetentionPolicy,
    level_shift: bool,
) -> [u8; BLOCK_AREA] {
    let mut coeffs = forward_dct(&shift_block(pixels, level_shift));
    policy.apply(&mut coeffs);
    reconstruct_block(&inverse_dct(&coeffs), level_shift)
}

/// Filter the block of `plane` at `origin` without modifying the plane.
///
/// This is the schedulable unit of work: it reads exactly the 8×8 region
/// at `origin` and returns its replacement.
///
/// `policy` must already be valid (see [`RetentionPolicy::validate`]);
/// [`process`] and [`process_in_place`] check this once per run. Debug
/// builds assert it here.
pub fn process_block(
    plane: &ChannelPlane,
    origin: BlockOrigin,
    policy: &RetentionPolicy,
    level_shift: bool,
) -> [u8; BLOCK_AREA] {
    debug_assert!(policy.validate().is_ok(), "unvalidated retention policy {policy}");
    filter_block(&plane.block(origin), policy, level_shift)
}

/// Filter every full block of one 8-row band in place.
fn scrub_band(band: &mut [u8], width: usize, policy: &RetentionPolicy, level_shift: bool) {
    for bc in 0..width / BLOCK_SIZE {
        let pixels = read_band_block(band, width, bc);
        let filtered = filter_block(&pixels, policy, level_shift);
        write_band_block(band, width, bc, &filtered);
    }
}

/// Filter every full block of `plane` in place.
///
/// Pixels outside the block-aligned region are left as they are.
pub fn scrub_plane(plane: &mut ChannelPlane, policy: &RetentionPolicy, level_shift: bool) {
    let grid = plane.grid();
    if grid.total_blocks() == 0 {
        return;
    }
    let width = plane.width();
    let band_len = width * BLOCK_SIZE;
    let covered = &mut plane.data_mut()[..grid.blocks_tall() * band_len];

    #[cfg(feature = "parallel")]
    covered
        .par_chunks_mut(band_len)
        .for_each(|band| scrub_band(band, width, policy, level_shift));
    #[cfg(not(feature = "parallel"))]
    covered
        .chunks_mut(band_len)
        .for_each(|band| scrub_band(band, width, policy, level_shift));
}

/// Apply `config` to `planes` in place.
///
/// The configuration is validated first; on error no pixel is modified.
pub fn process_in_place(planes: &mut Planes, config: &ScrubConfig) -> Result<()> {
    config.validate()?;
    tracing::debug!(
        channels = %config.channels,
        policy = %config.policy,
        level_shift = config.level_shift,
        "scrubbing planes"
    );

    for channel in config.channels.iter() {
        let plane = &mut planes[channel.index()];
        log_plane(channel, plane);
        scrub_plane(plane, &config.policy, config.level_shift);
    }
    Ok(())
}

/// Apply `config` to a copy of `planes` and return the copy.
///
/// Channels outside `config.channels` are returned byte-identical.
pub fn process(planes: &Planes, config: &ScrubConfig) -> Result<Planes> {
    config.validate()?;
    let mut out = planes.clone();
    process_in_place(&mut out, config)?;
    Ok(out)
}

fn log_plane(channel: Channel, plane: &ChannelPlane) {
    let grid = plane.grid();
    tracing::debug!(
        %channel,
        width = plane.width(),
        height = plane.height(),
        blocks = grid.total_blocks(),
        "scrubbing channel"
    );
    let trailing_rows = plane.height() - grid.covered_height();
    let trailing_cols = plane.width() - grid.covered_width();
    if trailing_rows > 0 || trailing_cols > 0 {
        tracing::debug!(%channel, trailing_rows, trailing_cols, "unaligned edge left untouched");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plane::ChannelSet;

    fn textured(width: usize, height: usize) -> ChannelPlane {
        ChannelPlane::from_fn(width, height, |r, c| ((r * 31 + c * 17 + (r * c) % 7 * 13) % 256) as u8)
    }

    #[test]
    fn keep_all_is_identity() {
        let plane = textured(24, 16);
        for level_shift in [true, false] {
            let mut out = plane.clone();
            scrub_plane(&mut out, &RetentionPolicy::KeepAll, level_shift);
            assert_eq!(out, plane);
        }
    }

    #[test]
    fn process_block_matches_scrub_plane() {
        let plane = textured(16, 16);
        let policy = RetentionPolicy::LowBlock { k: 3 };
        let mut scrubbed = plane.clone();
        scrub_plane(&mut scrubbed, &policy, true);
        for origin in plane.grid().origins() {
            assert_eq!(process_block(&plane, origin, &policy, true), scrubbed.block(origin));
        }
    }

    #[test]
    fn process_block_leaves_plane_alone() {
        let plane = textured(16, 16);
        let copy = plane.clone();
        let _ = process_block(&plane, BlockOrigin { row: 8, col: 8 }, &RetentionPolicy::DcOnly, true);
        assert_eq!(plane, copy);
    }

    #[test]
    fn lowpass_and_filter_agree() {
        let plane = textured(8, 8);
        let pixels = plane.block(BlockOrigin { row: 0, col: 0 });
        let policy = RetentionPolicy::LowBlock { k: 4 };
        let real = lowpass_block(&pixels, &policy, false);
        let rounded = filter_block(&pixels, &policy, false);
        for i in 0..BLOCK_AREA {
            assert_eq!(rounded[i], crate::scrub::reconstruct::to_pixel(real[i]));
        }
    }

    #[test]
    fn invalid_config_touches_nothing() {
        let mut planes = [textured(16, 16), textured(16, 16), textured(16, 16)];
        let before = planes.clone();
        let config = ScrubConfig {
            channels: ChannelSet::ALL,
            policy: RetentionPolicy::LowBlock { k: 0 },
            level_shift: true,
        };
        assert!(process_in_place(&mut planes, &config).is_err());
        assert_eq!(planes, before);
        assert!(process(&planes, &config).is_err());
    }

    #[test]
    fn empty_channel_set_is_noop() {
        let planes = [textured(16, 16), textured(16, 16), textured(16, 16)];
        let config = ScrubConfig {
            channels: ChannelSet::EMPTY,
            ..ScrubConfig::default()
        };
        assert_eq!(process(&planes, &config).unwrap(), planes);
    }

    #[test]
    fn tiny_plane_is_untouched() {
        let plane = textured(7, 5);
        let mut out = plane.clone();
        scrub_plane(&mut out, &RetentionPolicy::DcOnly, true);
        assert_eq!(out, plane);
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "unvalidated retention policy")]
    fn process_block_rejects_zero_threshold_in_debug() {
        let plane = textured(8, 8);
        let _ = process_block(&plane, BlockOrigin { row: 0, col: 0 }, &RetentionPolicy::LowBlock { k: 0 }, true);
    }
}
