// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Coefficient retention policies.
//!
//! A policy is a predicate over the (row, col) position of a DCT
//! coefficient. Masking zeroes every coefficient the predicate rejects.
//! Row index is vertical frequency, column index horizontal frequency, and
//! (0, 0) is the DC term. Every policy keeps DC, so a flat block is never
//! altered.

use std::fmt;
use std::str::FromStr;

use crate::plane::{BLOCK_AREA, BLOCK_SIZE};

use super::error::{Result, ScrubError};

/// Default side of the retained low-frequency square.
pub const DEFAULT_LOW_BLOCK: usize = 6;

/// Which DCT coefficients survive masking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RetentionPolicy {
    /// Keep the `k × k` low-frequency corner: `row < k && col < k`.
    LowBlock { k: usize },
    /// Keep only the DC term; the block collapses to its mean.
    DcOnly,
    /// Keep everything. The transform pair then reproduces its input.
    KeepAll,
}

impl RetentionPolicy {
    /// `low-block(k)`, rejecting thresholds outside 1..=8.
    pub fn low_block(k: usize) -> Result<Self> {
        let policy = Self::LowBlock { k };
        policy.validate()?;
        Ok(policy)
    }

    /// Check the threshold of a `LowBlock` policy.
    ///
    /// `k = 0` would discard DC; `k > 8` addresses coefficients that do not exist.
    pub fn validate(&self) -> Result<()> {
        match *self {
            Self::LowBlock { k } if k == 0 || k > BLOCK_SIZE => Err(ScrubError::InvalidThreshold(k)),
            _ => Ok(()),
        }
    }

    /// True if the coefficient at `(row, col)` is kept.
    pub fn retains(&self, row: usize, col: usize) -> bool {
        match *self {
            Self::LowBlock { k } => row < k && col < k,
            Self::DcOnly => row == 0 && col == 0,
            Self::KeepAll => true,
        }
    }

    /// Zero every rejected coefficient of a row-major 8×8 matrix.
    pub fn apply(&self, coeffs: &mut [f64; BLOCK_AREA]) {
        if *self == Self::KeepAll {
            return;
        }
        for (i, c) in coeffs.iter_mut().enumerate() {
            if !self.retains(i / BLOCK_SIZE, i % BLOCK_SIZE) {
                *c = 0.0;
            }
        }
    }

    /// Number of coefficients kept per block.
    pub fn retained_count(&self) -> usize {
        (0..BLOCK_AREA)
            .filter(|&i| self.retains(i / BLOCK_SIZE, i % BLOCK_SIZE))
            .count()
    }
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self::LowBlock { k: DEFAULT_LOW_BLOCK }
    }
}

impl fmt::Display for RetentionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LowBlock { k } => write!(f, "low-block({k})"),
            Self::DcOnly => f.write_str("dc-only"),
            Self::KeepAll => f.write_str("keep-all"),
        }
    }
}

impl FromStr for RetentionPolicy {
    type Err = ScrubError;

    /// Parses `low-block(k)`, `low-block`, `dc-only` or `keep-all`.
    fn from_str(s: &str) -> Result<Self> {
        let text = s.trim().to_ascii_lowercase();
        match text.as_str() {
            "dc-only" => return Ok(Self::DcOnly),
            "keep-all" => return Ok(Self::KeepAll),
            "low-block" => return Ok(Self::default()),
            _ => {}
        }
        let k = text
            .strip_prefix("low-block(")
            .and_then(|rest| rest.strip_suffix(')'))
            .and_then(|k| k.trim().parse::<usize>().ok())
            .ok_or_else(|| ScrubError::UnknownPolicy(s.to_string()))?;
        Self::low_block(k)
    }
}
