/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use imgio_bmp::{BmpDecoder, BmpEncodeErrors, BmpEncoder};
use nanorand::{Rng, WyRand};
use zune_core::colorspace::ColorSpace;

fn random_bytes(len: usize) -> Vec<u8> {
    let mut rng = WyRand::new_seed(0xb17);
    (0..len).map(|_| rng.generate::<u8>()).collect()
}

fn round_trip(width: usize, height: usize, colorspace: ColorSpace) {
    let data = random_bytes(width * height * colorspace.num_components());
    let mut sink = vec![];
    let written = BmpEncoder::new(&mut sink)
        .encode(width, height, colorspace, &data)
        .unwrap();
    assert_eq!(written, sink.len());

    let mut decoder = BmpDecoder::new(&sink[..]);
    let decoded = decoder.decode().unwrap();

    assert_eq!(decoder.dimensions(), Some((width, height)));
    assert_eq!(decoder.colorspace(), Some(colorspace));
    assert_eq!(decoded, data);
}

#[test]
fn test_rgb_round_trip() {
    // odd width forces row padding
    round_trip(7, 5, ColorSpace::RGB);
}

#[test]
fn test_rgba_round_trip() {
    round_trip(3, 4, ColorSpace::RGBA);
}

#[test]
fn test_luma_round_trip() {
    round_trip(13, 2, ColorSpace::Luma);
}

#[test]
fn test_headers() {
    let mut sink = vec![];
    BmpEncoder::new(&mut sink)
        .encode(1, 1, ColorSpace::RGB, &[1, 2, 3])
        .unwrap();

    assert_eq!(&sink[0..2], b"BM");
    assert_eq!(sink.len(), 14 + 40 + 4);
    // data offset
    assert_eq!(&sink[10..14], &54_u32.to_le_bytes());
    // bits per pixel
    assert_eq!(&sink[28..30], &24_u16.to_le_bytes());
    assert_eq!(&sink[54..], &[3, 2, 1, 0]);
}

#[test]
fn test_unsupported_colorspace() {
    let mut sink = vec![];
    let result = BmpEncoder::new(&mut sink).encode(1, 1, ColorSpace::LumaA, &[0, 0]);

    assert!(matches!(
        result,
        Err(BmpEncodeErrors::UnsupportedColorspace(ColorSpace::LumaA))
    ));
}

#[test]
fn test_mismatched_length() {
    let mut sink = vec![];
    let result = BmpEncoder::new(&mut sink).encode(2, 2, ColorSpace::RGB, &[0; 11]);

    assert!(matches!(result, Err(BmpEncodeErrors::MismatchedLength(12, 11))));
}
