// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Full-range JFIF (BT.601) RGB ↔ YCbCr conversion.

use super::error::{PlaneError, Result};
use super::{ChannelPlane, Planes};

fn to_u8(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

/// Convert one RGB pixel to (Y, Cb, Cr).
pub fn rgb_to_ycbcr(r: u8, g: u8, b: u8) -> (u8, u8, u8) {
    let (r, g, b) = (r as f64, g as f64, b as f64);
    let y = 0.299 * r + 0.587 * g + 0.114 * b;
    let cb = 128.0 - 0.168736 * r - 0.331264 * g + 0.5 * b;
    let cr = 128.0 + 0.5 * r - 0.418688 * g - 0.081312 * b;
    (to_u8(y), to_u8(cb), to_u8(cr))
}

/// Convert one (Y, Cb, Cr) pixel to RGB.
pub fn ycbcr_to_rgb(y: u8, cb: u8, cr: u8) -> (u8, u8, u8) {
    let y = y as f64;
    let cb = cb as f64 - 128.0;
    let cr = cr as f64 - 128.0;
    let r = y + 1.402 * cr;
    let g = y - 0.344136 * cb - 0.714136 * cr;
    let b = y + 1.772 * cb;
    (to_u8(r), to_u8(g), to_u8(b))
}

/// Split an interleaved RGB8 buffer into Y, Cb, Cr planes.
///
/// Fails with [`PlaneError::BufferSize`] unless `rgb.len() == width * height * 3`.
pub fn rgb_to_planes(rgb: &[u8], width: usize, height: usize) -> Result<Planes> {
    let n = width * height;
    if rgb.len() != n * 3 {
        return Err(PlaneError::BufferSize {
            width,
            height,
            expected: n * 3,
            actual: rgb.len(),
        });
    }
    let mut y = Vec::with_capacity(n);
    let mut cb = Vec::with_capacity(n);
    let mut cr = Vec::with_capacity(n);
    for px in rgb.chunks_exact(3) {
        let (yy, bb, rr) = rgb_to_ycbcr(px[0], px[1], px[2]);
        y.push(yy);
        cb.push(bb);
        cr.push(rr);
    }
    Ok([
        ChannelPlane { width, height, data: y },
        ChannelPlane { width, height, data: cb },
        ChannelPlane { width, height, data: cr },
    ])
}

/// Interleave Y, Cb, Cr planes back into an RGB8 buffer.
///
/// Returns `None` if the planes do not share dimensions.
pub fn planes_to_rgb(planes: &Planes) -> Option<Vec<u8>> {
    let [y, cb, cr] = planes;
    let dims = (y.width, y.height);
    if (cb.width, cb.height) != dims || (cr.width, cr.height) != dims {
        return None;
    }
    let mut rgb = Vec::with_capacity(y.data.len() * 3);
    for ((&yy, &bb), &rr) in y.data.iter().zip(&cb.data).zip(&cr.data) {
        let (r, g, b) = ycbcr_to_rgb(yy, bb, rr);
        rgb.extend_from_slice(&[r, g, b]);
    }
    Some(rgb)
}
