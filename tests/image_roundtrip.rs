// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! File-level tests: decode → scrub → encode through real image formats.

use phasm_scrub::image_io::{self, ImageIoError};
use phasm_scrub::{process, Channel, ChannelPlane, Planes, RetentionPolicy, ScrubConfig};
use tempfile::tempdir;

fn gray_planes(width: usize, height: usize) -> Planes {
    [
        ChannelPlane::from_fn(width, height, |r, c| ((r * 7 + c * 3) % 256) as u8),
        ChannelPlane::filled(width, height, 128),
        ChannelPlane::filled(width, height, 128),
    ]
}

#[test]
fn png_roundtrip_of_gray_is_exact() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("gray.png");
    let planes = gray_planes(20, 12);

    image_io::save_planes(&planes, &path, 75).unwrap();
    let back = image_io::load_planes(&path).unwrap();
    assert_eq!(back, planes);
}

#[test]
fn jpeg_file_written_with_derived_name() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("photo.jpg");
    let planes = gray_planes(32, 24);
    image_io::save_planes(&planes, &input, 95).unwrap();

    let loaded = image_io::load_planes(&input).unwrap();
    let scrubbed = process(&loaded, &ScrubConfig::default()).unwrap();
    let output = image_io::derive_output_path(&input, "_mod");
    image_io::save_planes(&scrubbed, &output, 75).unwrap();

    assert_eq!(output, dir.path().join("photo_mod.jpg"));
    let bytes = std::fs::read(&output).unwrap();
    assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
    let reread = image_io::decode_planes(&bytes).unwrap();
    assert_eq!(reread[0].width(), 32);
    assert_eq!(reread[0].height(), 24);
}

#[test]
fn dc_only_chroma_survives_lossless_save() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("flat.png");
    // Gray image with a chroma checkerboard hidden in Cr.
    let mut planes = gray_planes(16, 16);
    planes[2] = ChannelPlane::from_fn(16, 16, |r, c| if (r + c) % 2 == 0 { 120 } else { 136 });

    let config = ScrubConfig {
        policy: RetentionPolicy::DcOnly,
        ..ScrubConfig::default()
    };
    let scrubbed = process(&planes, &config).unwrap();
    assert!(scrubbed[Channel::ChromaRed.index()].data().iter().all(|&p| p == 128));
    image_io::save_planes(&scrubbed, &path, 75).unwrap();
    assert!(path.exists());
}

#[test]
fn extensionless_output_falls_back_to_jpeg() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("photo");
    let output = image_io::derive_output_path(&input, "_mod");
    assert_eq!(output, dir.path().join("photo_mod"));

    let scrubbed = process(&gray_planes(24, 16), &ScrubConfig::default()).unwrap();
    image_io::save_planes(&scrubbed, &output, 75).unwrap();

    let bytes = std::fs::read(&output).unwrap();
    assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
    let reread = image_io::decode_planes(&bytes).unwrap();
    assert_eq!(reread[0].width(), 24);
    assert_eq!(reread[0].height(), 16);
}

#[test]
fn unknown_extension_falls_back_to_jpeg() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out.notaformat");
    image_io::save_planes(&gray_planes(8, 8), &path, 75).unwrap();
    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
}

#[test]
fn save_jpeg_ignores_png_extension() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("forced.png");
    image_io::save_jpeg(&gray_planes(16, 8), &path, 60).unwrap();
    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
}

#[test]
fn missing_input_surfaces_decode_error() {
    let dir = tempdir().unwrap();
    let err = image_io::load_planes(dir.path().join("missing.jpg")).unwrap_err();
    assert!(matches!(err, ImageIoError::Decode(_)));
}
