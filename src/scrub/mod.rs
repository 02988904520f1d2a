// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Transform-domain scrubbing of YCbCr planes.
//!
//! Each full 8×8 block of each selected channel is moved into the DCT
//! domain, masked by a [`RetentionPolicy`], and brought back. Payloads that
//! live in the discarded coefficients do not survive. Nothing here tries to
//! detect a payload; every block is filtered the same way.
//!
//! The default configuration keeps the 6×6 low-frequency corner of both
//! chroma channels and leaves luma alone. `dc-only` flattens every block
//! to its mean and is the most destructive setting.

pub mod config;
pub mod error;
pub mod pipeline;
pub mod policy;
pub mod reconstruct;
pub mod transform;

pub use config::{ConfigOverrides, ScrubConfig};
pub use error::ScrubError;
pub use pipeline::{filter_block, lowpass_block, process, process_block, process_in_place, scrub_plane};
pub use policy::{RetentionPolicy, DEFAULT_LOW_BLOCK};
