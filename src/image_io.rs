// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Image file ↔ YCbCr planes.
//!
//! Decoding accepts anything the `image` crate reads; alpha is dropped.
//! Encoding picks the format from the output extension. JPEG is written at
//! a caller-chosen quality, other writable formats losslessly. A missing or
//! unrecognised extension is written as JPEG, so the output is always
//! recompressed unless the caller names a lossless format explicitly.

use std::ffi::OsString;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat, RgbImage};
use thiserror::Error;

use crate::plane::color::{planes_to_rgb, rgb_to_planes};
use crate::plane::{PlaneError, Planes};

/// JPEG quality used when none is given.
pub const DEFAULT_JPEG_QUALITY: u8 = 75;

/// Suffix inserted before the extension of derived output paths.
pub const DEFAULT_OUTPUT_SUFFIX: &str = "_mod";

/// Errors from reading or writing image files.
#[derive(Debug, Error)]
pub enum ImageIoError {
    #[error("cannot decode image: {0}")]
    Decode(#[source] image::ImageError),
    #[error("cannot encode image: {0}")]
    Encode(#[source] image::ImageError),
    #[error("invalid pixel buffer: {0}")]
    Plane(#[from] PlaneError),
    #[error("JPEG quality {0} out of range (expected 1..=100)")]
    InvalidQuality(u8),
    #[error("planes differ in size; cannot interleave to RGB")]
    PlaneMismatch,
    #[error("image too large: {width}x{height}")]
    TooLarge { width: usize, height: usize },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ImageIoError>;

fn image_to_planes(image: DynamicImage) -> Result<Planes> {
    let rgb = image.to_rgb8();
    let (width, height) = rgb.dimensions();
    Ok(rgb_to_planes(rgb.as_raw(), width as usize, height as usize)?)
}

fn planes_to_image(planes: &Planes) -> Result<RgbImage> {
    let width = planes[0].width();
    let height = planes[0].height();
    let rgb = planes_to_rgb(planes).ok_or(ImageIoError::PlaneMismatch)?;
    let too_large = || ImageIoError::TooLarge { width, height };
    let w = u32::try_from(width).map_err(|_| too_large())?;
    let h = u32::try_from(height).map_err(|_| too_large())?;
    RgbImage::from_raw(w, h, rgb).ok_or(ImageIoError::PlaneMismatch)
}

fn check_quality(quality: u8) -> Result<()> {
    if (1..=100).contains(&quality) {
        Ok(())
    } else {
        Err(ImageIoError::InvalidQuality(quality))
    }
}

/// Decode an image file into Y, Cb, Cr planes.
pub fn load_planes(path: impl AsRef<Path>) -> Result<Planes> {
    let image = image::open(path.as_ref()).map_err(ImageIoError::Decode)?;
    tracing::debug!(
        path = %path.as_ref().display(),
        width = image.width(),
        height = image.height(),
        "decoded image"
    );
    image_to_planes(image)
}

/// Decode in-memory image bytes into Y, Cb, Cr planes.
pub fn decode_planes(bytes: &[u8]) -> Result<Planes> {
    let image = image::load_from_memory(bytes).map_err(ImageIoError::Decode)?;
    image_to_planes(image)
}

fn write_jpeg<W: Write>(writer: W, planes: &Planes, quality: u8) -> Result<()> {
    check_quality(quality)?;
    let rgb = planes_to_image(planes)?;
    JpegEncoder::new_with_quality(writer, quality)
        .encode_image(&rgb)
        .map_err(ImageIoError::Encode)
}

/// Encode planes as a JPEG byte stream.
pub fn encode_jpeg(planes: &Planes, quality: u8) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    write_jpeg(&mut out, planes, quality)?;
    Ok(out)
}

/// Encode planes to `path` as JPEG regardless of its extension.
pub fn save_jpeg(planes: &Planes, path: impl AsRef<Path>, quality: u8) -> Result<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    write_jpeg(&mut writer, planes, quality)?;
    writer.flush()?;
    tracing::debug!(path = %path.display(), quality, "encoded JPEG");
    Ok(())
}

/// Format `save_planes` will use for `path`.
///
/// The extension decides when the `image` crate can write that format;
/// anything else, including no extension at all, falls back to JPEG.
pub fn output_format(path: &Path) -> ImageFormat {
    match ImageFormat::from_path(path) {
        Ok(format) if format.writing_enabled() => format,
        _ => ImageFormat::Jpeg,
    }
}

/// Encode planes to `path`, choosing the format with [`output_format`].
///
/// `quality` applies to JPEG output only.
pub fn save_planes(planes: &Planes, path: impl AsRef<Path>, quality: u8) -> Result<()> {
    let path = path.as_ref();
    let format = output_format(path);
    if format == ImageFormat::Jpeg {
        return save_jpeg(planes, path, quality);
    }
    planes_to_image(planes)?
        .save_with_format(path, format)
        .map_err(ImageIoError::Encode)?;
    tracing::debug!(path = %path.display(), ?format, "encoded image");
    Ok(())
}

/// Insert `suffix` between the file stem and the extension.
///
/// `dir/photo.jpg` → `dir/photo_mod.jpg`; a path without an extension just
/// gets the suffix appended.
pub fn derive_output_path(input: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = input.file_stem().map(OsString::from).unwrap_or_default();
    name.push(suffix);
    if let Some(ext) = input.extension() {
        name.push(".");
        name.push(ext);
    }
    input.with_file_name(name)
}
