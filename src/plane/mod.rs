// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Channel planes and block addressing.
//!
//! A [`ChannelPlane`] stores one 8-bit channel in row-major order. Three of
//! them, ordered Y, Cb, Cr, make up [`Planes`]. Block access goes through
//! [`BlockGrid`], which only ever yields fully in-bounds 8×8 blocks.

pub mod channel;
pub mod color;
pub mod error;
pub mod grid;

pub use channel::{Channel, ChannelSet};
pub use error::PlaneError;
pub use grid::{BlockGrid, BlockOrigin, BLOCK_AREA, BLOCK_SIZE};

use error::Result;

/// The three planes of an image, ordered Y, Cb, Cr.
pub type Planes = [ChannelPlane; 3];

/// One 8-bit channel of an image.
///
/// Pixels are stored row-major: index = row * width + col.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelPlane {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl ChannelPlane {
    /// Create a plane filled with `value`.
    pub fn filled(width: usize, height: usize, value: u8) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    /// Wrap an existing row-major buffer.
    pub fn from_vec(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        let expected = width * height;
        if data.len() != expected {
            return Err(PlaneError::BufferSize {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { width, height, data })
    }

    /// Build a plane by evaluating `f(row, col)` for every pixel.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> u8) -> Self {
        let mut data = Vec::with_capacity(width * height);
        for row in 0..height {
            for col in 0..width {
                data.push(f(row, col));
            }
        }
        Self { width, height, data }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.data[self.index(row, col)]
    }

    pub fn set(&mut self, row: usize, col: usize, value: u8) {
        let idx = self.index(row, col);
        self.data[idx] = value;
    }

    /// The full-block grid over this plane.
    pub fn grid(&self) -> BlockGrid {
        BlockGrid::new(self.width, self.height)
    }

    /// Copy the 8×8 block at `origin` out of the plane (row-major).
    pub fn block(&self, origin: BlockOrigin) -> [u8; BLOCK_AREA] {
        self.check_block(origin);
        let mut block = [0u8; BLOCK_AREA];
        for (r, dst) in block.chunks_exact_mut(BLOCK_SIZE).enumerate() {
            let start = self.index(origin.row + r, origin.col);
            dst.copy_from_slice(&self.data[start..start + BLOCK_SIZE]);
        }
        block
    }

    /// Overwrite exactly the 8×8 region at `origin`.
    pub fn set_block(&mut self, origin: BlockOrigin, block: &[u8; BLOCK_AREA]) {
        self.check_block(origin);
        for (r, src) in block.chunks_exact(BLOCK_SIZE).enumerate() {
            let start = self.index(origin.row + r, origin.col);
            self.data[start..start + BLOCK_SIZE].copy_from_slice(src);
        }
    }

    /// Raw read-only access to all pixels.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Raw mutable access to all pixels.
    ///
    /// Rows of blocks occupy contiguous `8 * width` byte bands, which is
    /// what the parallel pipeline splits on.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    fn index(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.height, "row {row} >= {}", self.height);
        debug_assert!(col < self.width, "col {col} >= {}", self.width);
        row * self.width + col
    }

    fn check_block(&self, origin: BlockOrigin) {
        debug_assert!(origin.row % BLOCK_SIZE == 0 && origin.col % BLOCK_SIZE == 0);
        debug_assert!(origin.row + BLOCK_SIZE <= self.height);
        debug_assert!(origin.col + BLOCK_SIZE <= self.width);
    }
}

/// Copy block `bc` out of an 8-row band of a plane with the given width.
pub(crate) fn read_band_block(band: &[u8], width: usize, bc: usize) -> [u8; BLOCK_AREA] {
    let x0 = bc * BLOCK_SIZE;
    let mut block = [0u8; BLOCK_AREA];
    for (r, dst) in block.chunks_exact_mut(BLOCK_SIZE).enumerate() {
        let start = r * width + x0;
        dst.copy_from_slice(&band[start..start + BLOCK_SIZE]);
    }
    block
}

/// Write block `bc` into an 8-row band of a plane with the given width.
pub(crate) fn write_band_block(band: &mut [u8], width: usize, bc: usize, block: &[u8; BLOCK_AREA]) {
    let x0 = bc * BLOCK_SIZE;
    for (r, src) in block.chunks_exact(BLOCK_SIZE).enumerate() {
        let start = r * width + x0;
        band[start..start + BLOCK_SIZE].copy_from_slice(src);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plane_get_set() {
        let mut plane = ChannelPlane::filled(10, 9, 7);
        assert_eq!(plane.width(), 10);
        assert_eq!(plane.height(), 9);
        assert_eq!(plane.get(8, 9), 7);

        plane.set(3, 4, 42);
        assert_eq!(plane.get(3, 4), 42);
        assert_eq!(plane.get(4, 3), 7);
    }

    #[test]
    fn from_vec_checks_length() {
        assert!(ChannelPlane::from_vec(4, 4, vec![0; 16]).is_ok());
        assert_eq!(
            ChannelPlane::from_vec(4, 4, vec![0; 15]),
            Err(PlaneError::BufferSize { width: 4, height: 4, expected: 16, actual: 15 })
        );
    }

    #[test]
    fn block_read_write() {
        let mut plane = ChannelPlane::from_fn(16, 16, |r, c| (r * 16 + c) as u8);
        let origin = BlockOrigin::from_block_index(1, 0);
        let blk = plane.block(origin);
        assert_eq!(blk[0], plane.get(8, 0));
        assert_eq!(blk[63], plane.get(15, 7));

        let before = plane.clone();
        plane.set_block(origin, &[200u8; BLOCK_AREA]);
        for r in 0..16 {
            for c in 0..16 {
                if origin.contains(r, c) {
                    assert_eq!(plane.get(r, c), 200);
                } else {
                    assert_eq!(plane.get(r, c), before.get(r, c), "({r},{c}) touched");
                }
            }
        }
    }

    #[test]
    fn band_block_matches_plane_block() {
        let plane = ChannelPlane::from_fn(24, 16, |r, c| (r * 3 + c * 5) as u8);
        let band = &plane.data()[8 * 24..16 * 24];
        let from_band = read_band_block(band, 24, 2);
        assert_eq!(from_band, plane.block(BlockOrigin::from_block_index(1, 2)));

        let mut copy = plane.clone();
        let width = copy.width();
        let band = &mut copy.data_mut()[0..8 * width];
        write_band_block(band, width, 1, &[9u8; BLOCK_AREA]);
        assert_eq!(copy.block(BlockOrigin::from_block_index(0, 1)), [9u8; BLOCK_AREA]);
        assert_eq!(copy.block(BlockOrigin::from_block_index(0, 0)), plane.block(BlockOrigin::from_block_index(0, 0)));
    }
}
