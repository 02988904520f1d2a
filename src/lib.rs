// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! # phasm-scrub
//!
//! Destroys frequency-domain steganographic payloads hidden in an image's
//! color-difference channels. Each full 8×8 block of the selected YCbCr
//! planes is transformed with an orthonormal DCT, high-frequency
//! coefficients are zeroed by a [`RetentionPolicy`], and the block is
//! transformed back, clipped and rounded.
//!
//! - **`low-block(k)`** (default `k = 6`): keep the `k × k` low-frequency
//!   corner. Coarse chroma survives, fine embedded modifications do not.
//! - **`dc-only`**: keep the block mean only. Maximally destructive.
//!
//! The block pipeline ([`scrub`]) is pure: it touches no files or images.
//! It uses `rayon` for optional parallelism, `tracing` for diagnostics,
//! `thiserror` for its error types and `serde`/`toml` for config files.
//! File decode/encode (`image`) and RGB↔YCbCr conversion live in
//! [`image_io`] and [`plane::color`].
//!
//! # Quick start
//!
//! ```rust,ignore
//! use phasm_scrub::{image_io, process, ScrubConfig};
//!
//! let planes = image_io::load_planes("photo.jpg").unwrap();
//! let clean = process(&planes, &ScrubConfig::default()).unwrap();
//! image_io::save_planes(&clean, "photo_mod.jpg", 75).unwrap();
//! ```

pub mod image_io;
pub mod plane;
pub mod scrub;

pub use image_io::{
    decode_planes, derive_output_path, encode_jpeg, load_planes, output_format, save_jpeg,
    save_planes, ImageIoError, DEFAULT_JPEG_QUALITY, DEFAULT_OUTPUT_SUFFIX,
};
pub use plane::{BlockGrid, BlockOrigin, Channel, ChannelPlane, ChannelSet, PlaneError, Planes};
pub use plane::{BLOCK_AREA, BLOCK_SIZE};
pub use scrub::{
    process, process_block, process_in_place, ConfigOverrides, RetentionPolicy, ScrubConfig,
    ScrubError,
};
