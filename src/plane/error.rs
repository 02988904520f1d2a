// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Error types for plane construction and channel addressing.

use thiserror::Error;

/// Errors that can occur while building planes or naming channels.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaneError {
    /// Pixel buffer length does not match `width * height`.
    #[error("pixel buffer has {actual} bytes, expected {expected} for {width}x{height}")]
    BufferSize {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },
    /// Channel index outside {0, 1, 2}.
    #[error("channel index {0} out of range (expected 0, 1 or 2)")]
    ChannelOutOfRange(usize),
    /// Channel name not recognised.
    #[error("unknown channel name: {0:?}")]
    UnknownChannel(String),
}

pub type Result<T> = std::result::Result<T, PlaneError>;
