// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Block partitioning of a plane into origin-aligned 8×8 tiles.
//!
//! Only full blocks are ever addressed. For a plane of `H × W` pixels the
//! grid is `H / 8` blocks tall and `W / 8` blocks wide; the trailing
//! `H % 8` rows and `W % 8` columns are outside the grid and are never
//! read or written by the block pipeline.

/// Edge length of a block in pixels.
pub const BLOCK_SIZE: usize = 8;

/// Number of samples in one block.
pub const BLOCK_AREA: usize = BLOCK_SIZE * BLOCK_SIZE;

/// Top-left pixel coordinate of a block. Both fields are multiples of 8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockOrigin {
    pub row: usize,
    pub col: usize,
}

impl BlockOrigin {
    /// Origin of the block at block-row `br`, block-column `bc`.
    pub fn from_block_index(br: usize, bc: usize) -> Self {
        Self {
            row: br * BLOCK_SIZE,
            col: bc * BLOCK_SIZE,
        }
    }

    /// True when `(row, col)` lies inside this block.
    pub fn contains(&self, row: usize, col: usize) -> bool {
        (self.row..self.row + BLOCK_SIZE).contains(&row)
            && (self.col..self.col + BLOCK_SIZE).contains(&col)
    }
}

/// The set of full blocks covering a `width × height` plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockGrid {
    /// Number of 8×8 blocks horizontally.
    blocks_wide: usize,
    /// Number of 8×8 blocks vertically.
    blocks_tall: usize,
}

impl BlockGrid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            blocks_wide: width / BLOCK_SIZE,
            blocks_tall: height / BLOCK_SIZE,
        }
    }

    pub fn blocks_wide(&self) -> usize {
        self.blocks_wide
    }

    pub fn blocks_tall(&self) -> usize {
        self.blocks_tall
    }

    /// Total number of blocks.
    pub fn total_blocks(&self) -> usize {
        self.blocks_wide * self.blocks_tall
    }

    /// Width in pixels of the block-aligned region.
    pub fn covered_width(&self) -> usize {
        self.blocks_wide * BLOCK_SIZE
    }

    /// Height in pixels of the block-aligned region.
    pub fn covered_height(&self) -> usize {
        self.blocks_tall * BLOCK_SIZE
    }

    /// Block origins in row-major order.
    pub fn origins(&self) -> impl Iterator<Item = BlockOrigin> {
        let wide = self.blocks_wide;
        (0..self.blocks_tall)
            .flat_map(move |br| (0..wide).map(move |bc| BlockOrigin::from_block_index(br, bc)))
    }
}
