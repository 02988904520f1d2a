// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Orthonormal 8×8 DCT-II / DCT-III pair and level shift.
//!
//! Both directions are separable: a 1D transform over every row, a
//! transpose, the 1D transform over every row again, and a transpose back.
//! With `C(0) = 1/sqrt(8)` and `C(u>0) = 1/2` the pair is orthonormal, so
//! `inverse_dct(forward_dct(b))` reproduces `b` up to rounding and the DC
//! coefficient equals `8 * mean`.

use std::sync::OnceLock;

use crate::plane::{BLOCK_AREA, BLOCK_SIZE};

/// Offset subtracted before the forward transform when level shift is on.
pub const LEVEL_SHIFT: f64 = 128.0;

/// Pre-computed 8×8 cosine table.
/// `COSINE[u][x] = cos((2*x + 1) * u * PI / 16)`
static COSINE: OnceLock<[[f64; BLOCK_SIZE]; BLOCK_SIZE]> = OnceLock::new();

/// Normalization constants: C(0) = 1/sqrt(8), C(u>0) = 1/2.
static NORM: OnceLock<[f64; BLOCK_SIZE]> = OnceLock::new();

fn cosine_table() -> &'static [[f64; BLOCK_SIZE]; BLOCK_SIZE] {
    COSINE.get_or_init(|| {
        let mut table = [[0.0f64; BLOCK_SIZE]; BLOCK_SIZE];
        for (u, row) in table.iter_mut().enumerate() {
            for (x, v) in row.iter_mut().enumerate() {
                *v = ((2 * x + 1) as f64 * u as f64 * std::f64::consts::PI / 16.0).cos();
            }
        }
        table
    })
}

fn norm_table() -> &'static [f64; BLOCK_SIZE] {
    NORM.get_or_init(|| {
        let mut n = [0.5f64; BLOCK_SIZE];
        n[0] = 1.0 / (8.0f64).sqrt();
        n
    })
}

/// Widen a pixel block to f64, subtracting 128 when `level_shift` is set.
pub fn shift_block(pixels: &[u8; BLOCK_AREA], level_shift: bool) -> [f64; BLOCK_AREA] {
    let offset = if level_shift { LEVEL_SHIFT } else { 0.0 };
    pixels.map(|p| p as f64 - offset)
}

fn transpose(m: &mut [f64; BLOCK_AREA]) {
    for r in 0..BLOCK_SIZE {
        for c in r + 1..BLOCK_SIZE {
            m.swap(r * BLOCK_SIZE + c, c * BLOCK_SIZE + r);
        }
    }
}

/// 1D DCT-II over every row in place.
fn dct_rows(m: &mut [f64; BLOCK_AREA]) {
    let cos = cosine_table();
    let c = norm_table();
    for row in m.chunks_exact_mut(BLOCK_SIZE) {
        let mut out = [0.0f64; BLOCK_SIZE];
        for (u, o) in out.iter_mut().enumerate() {
            let sum: f64 = row.iter().zip(&cos[u]).map(|(x, k)| x * k).sum();
            *o = c[u] * sum;
        }
        row.copy_from_slice(&out);
    }
}

/// 1D DCT-III (inverse of `dct_rows`) over every row in place.
fn idct_rows(m: &mut [f64; BLOCK_AREA]) {
    let cos = cosine_table();
    let c = norm_table();
    for row in m.chunks_exact_mut(BLOCK_SIZE) {
        let mut out = [0.0f64; BLOCK_SIZE];
        for (x, o) in out.iter_mut().enumerate() {
            *o = (0..BLOCK_SIZE).map(|u| c[u] * row[u] * cos[u][x]).sum();
        }
        row.copy_from_slice(&out);
    }
}

/// 8×8 forward DCT: spatial block → coefficients (row-major, DC at index 0).
pub fn forward_dct(block: &[f64; BLOCK_AREA]) -> [f64; BLOCK_AREA] {
    let mut m = *block;
    // Horizontal pass, then vertical pass via transpose.
    dct_rows(&mut m);
    transpose(&mut m);
    dct_rows(&mut m);
    transpose(&mut m);
    m
}

/// 8×8 inverse DCT: coefficients → spatial block.
pub fn inverse_dct(coeffs: &[f64; BLOCK_AREA]) -> [f64; BLOCK_AREA] {
    let mut m = *coeffs;
    // Vertical pass first, mirroring the forward order.
    transpose(&mut m);
    idct_rows(&mut m);
    transpose(&mut m);
    idct_rows(&mut m);
    m
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp() -> [f64; BLOCK_AREA] {
        std::array::from_fn(|i| ((i * 37) % 256) as f64)
    }

    #[test]
    fn roundtrip_is_identity() {
        let block = ramp();
        let back = inverse_dct(&forward_dct(&block));
        for i in 0..BLOCK_AREA {
            assert!(
                (block[i] - back[i]).abs() < 1e-9,
                "Mismatch at index {i}: expected {}, got {}",
                block[i],
                back[i]
            );
        }
    }

    #[test]
    fn dc_is_eight_times_mean() {
        let block = ramp();
        let mean = block.iter().sum::<f64>() / 64.0;
        let coeffs = forward_dct(&block);
        assert!((coeffs[0] - 8.0 * mean).abs() < 1e-9);
    }

    #[test]
    fn energy_preserved() {
        let block = ramp();
        let coeffs = forward_dct(&block);
        let e_spatial: f64 = block.iter().map(|v| v * v).sum();
        let e_freq: f64 = coeffs.iter().map(|v| v * v).sum();
        assert!((e_spatial - e_freq).abs() / e_spatial < 1e-12);
    }

    #[test]
    fn flat_block_has_only_dc() {
        let coeffs = forward_dct(&[100.0; BLOCK_AREA]);
        assert!((coeffs[0] - 800.0).abs() < 1e-9);
        for (i, &c) in coeffs.iter().enumerate().skip(1) {
            assert!(c.abs() < 1e-9, "AC coefficient {i} = {c}");
        }
    }

    #[test]
    fn horizontal_pattern_lands_in_row_zero() {
        // Pixels vary only along columns → energy only in horizontal frequencies.
        let block: [f64; BLOCK_AREA] = std::array::from_fn(|i| if i % 8 < 4 { 10.0 } else { -10.0 });
        let coeffs = forward_dct(&block);
        for r in 1..BLOCK_SIZE {
            for c in 0..BLOCK_SIZE {
                assert!(coeffs[r * 8 + c].abs() < 1e-9, "({r},{c}) = {}", coeffs[r * 8 + c]);
            }
        }
        assert!(coeffs[1].abs() > 1.0);
    }

    #[test]
    fn single_coefficient_inverse() {
        let mut coeffs = [0.0f64; BLOCK_AREA];
        coeffs[0] = 16.0;
        let pixels = inverse_dct(&coeffs);
        // DC contribution = C(0) * C(0) * 16 = 16 / 8 = 2
        for &p in &pixels {
            assert!((p - 2.0).abs() < 1e-12);
        }
    }

    #[test]
    fn level_shift_toggle() {
        let pixels = [0u8, 128, 255, 1, 2, 3, 4, 5].repeat(8);
        let pixels: [u8; BLOCK_AREA] = pixels.try_into().unwrap();
        let shifted = shift_block(&pixels, true);
        let raw = shift_block(&pixels, false);
        assert_eq!(shifted[0], -128.0);
        assert_eq!(shifted[1], 0.0);
        assert_eq!(shifted[2], 127.0);
        assert_eq!(raw[2], 255.0);
    }
}
