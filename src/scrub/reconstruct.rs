// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Spatial block → 8-bit pixels.
//!
//! Order of operations: undo the level shift, clip to [0, 255], round.
//! Rounding is half-up with a small tolerance band: anything within
//! [`ROUND_TOLERANCE`] below an exact `.5` is treated as the tie, so
//! floating-point noise in the transform cannot flip a tie downward. A
//! block whose mean is exactly 127.5 therefore always becomes 128.

use crate::plane::BLOCK_AREA;

use super::transform::LEVEL_SHIFT;

/// Width of the band below `.5` that still rounds up.
pub const ROUND_TOLERANCE: f64 = 1e-6;

/// Clip to [0, 255] and round half up.
pub fn to_pixel(v: f64) -> u8 {
    let clipped = v.clamp(0.0, 255.0);
    (clipped + 0.5 + ROUND_TOLERANCE).floor().min(255.0) as u8
}

/// Undo the level shift in place.
pub fn unshift_block(values: &mut [f64; BLOCK_AREA], level_shift: bool) {
    if level_shift {
        for v in values.iter_mut() {
            *v += LEVEL_SHIFT;
        }
    }
}

/// Convert an inverse-transformed block back to pixels.
pub fn reconstruct_block(spatial: &[f64; BLOCK_AREA], level_shift: bool) -> [u8; BLOCK_AREA] {
    let mut values = *spatial;
    unshift_block(&mut values, level_shift);
    values.map(to_pixel)
}
