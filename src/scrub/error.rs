// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Error types for the scrub pipeline.
//!
//! [`ScrubError`] covers configuration problems. The pipeline itself cannot
//! fail once a configuration has been validated: out-of-range pixel values
//! are clipped, unaligned edges are skipped.

use thiserror::Error;

use crate::plane::PlaneError;

/// Errors raised while building or validating a scrub configuration.
#[derive(Debug, Error)]
pub enum ScrubError {
    /// A channel index or name was invalid.
    #[error(transparent)]
    Plane(#[from] PlaneError),
    /// Policy text did not match any known policy.
    #[error("unknown retention policy: {0:?} (expected low-block(k), dc-only or keep-all)")]
    UnknownPolicy(String),
    /// `low-block(k)` with `k` outside 1..=8.
    #[error("low-block threshold {0} out of range (expected 1..=8)")]
    InvalidThreshold(usize),
    /// The TOML config file could not be parsed.
    #[error("invalid config file: {0}")]
    ConfigParse(#[from] toml::de::Error),
    /// The config file could not be read.
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ScrubError>;
