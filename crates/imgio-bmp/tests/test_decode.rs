/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use imgio_bmp::{probe_bmp, BmpDecoder, BmpDecoderErrors};
use zune_core::colorspace::ColorSpace;
use zune_core::options::DecoderOptions;

/// Build a bitmap with a 40 byte info header
fn bitmap(
    width: i32, height: i32, bpp: u16, compression: u32, palette: &[[u8; 4]], extra: &[u8],
    pixels: &[u8]
) -> Vec<u8> {
    let offset = 14 + 40 + extra.len() + palette.len() * 4;
    let mut out = vec![];
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&((offset + pixels.len()) as u32).to_le_bytes());
    out.extend_from_slice(&0_u32.to_le_bytes());
    out.extend_from_slice(&(offset as u32).to_le_bytes());
    out.extend_from_slice(&40_u32.to_le_bytes());
    out.extend_from_slice(&width.to_le_bytes());
    out.extend_from_slice(&height.to_le_bytes());
    out.extend_from_slice(&1_u16.to_le_bytes());
    out.extend_from_slice(&bpp.to_le_bytes());
    out.extend_from_slice(&compression.to_le_bytes());
    out.extend_from_slice(&(pixels.len() as u32).to_le_bytes());
    out.extend_from_slice(&[0; 8]);
    out.extend_from_slice(&(palette.len() as u32).to_le_bytes());
    out.extend_from_slice(&0_u32.to_le_bytes());
    out.extend_from_slice(extra);
    for entry in palette {
        out.extend_from_slice(entry);
    }
    out.extend_from_slice(pixels);
    out
}

#[test]
fn test_probe() {
    let data = bitmap(1, 1, 24, 0, &[], &[], &[0; 4]);
    assert!(probe_bmp(&data));
    assert!(!probe_bmp(b"P6 1 1 255\n"));
}

#[test]
fn test_24_bit_bottom_up() {
    // two rows, each padded to four bytes, last row first
    let pixels = [
        0, 0, 255, 0, // bottom row, red
        255, 0, 0, 0 // top row, blue
    ];
    let data = bitmap(1, 2, 24, 0, &[], &[], &pixels);
    let mut decoder = BmpDecoder::new(&data[..]);
    let out = decoder.decode().unwrap();

    assert_eq!(decoder.dimensions(), Some((1, 2)));
    assert_eq!(decoder.colorspace(), Some(ColorSpace::RGB));
    assert_eq!(out, [0, 0, 255, 255, 0, 0]);
}

#[test]
fn test_negative_height_is_top_down() {
    let pixels = [0, 0, 255, 0, 255, 0, 0, 0];
    let data = bitmap(1, -2, 24, 0, &[], &[], &pixels);
    let out = BmpDecoder::new(&data[..]).decode().unwrap();

    assert_eq!(out, [255, 0, 0, 0, 0, 255]);
}

#[test]
fn test_gray_palette_gives_luma() {
    let palette = [[0, 0, 0, 0], [255, 255, 255, 0]];
    // 1 bit, 3 pixels: 1 0 1
    let data = bitmap(3, 1, 1, 0, &palette, &[], &[0b1010_0000, 0, 0, 0]);
    let mut decoder = BmpDecoder::new(&data[..]);
    let out = decoder.decode().unwrap();

    assert_eq!(decoder.colorspace(), Some(ColorSpace::Luma));
    assert_eq!(out, [255, 0, 255]);
}

#[test]
fn test_color_palette_gives_rgb() {
    // BGR0 entries
    let palette = [[255, 0, 0, 0], [0, 255, 0, 0]];
    let data = bitmap(2, 1, 4, 0, &palette, &[], &[0x10, 0, 0, 0]);
    let mut decoder = BmpDecoder::new(&data[..]);
    let out = decoder.decode().unwrap();

    assert_eq!(decoder.colorspace(), Some(ColorSpace::RGB));
    assert_eq!(out, [0, 255, 0, 0, 0, 255]);
}

#[test]
fn test_16_bit_default_masks() {
    // 0x7C00 is pure red in 5-5-5
    let data = bitmap(1, 1, 16, 0, &[], &[], &[0x00, 0x7C, 0, 0]);
    let out = BmpDecoder::new(&data[..]).decode().unwrap();

    assert_eq!(out, [255, 0, 0]);
}

#[test]
fn test_16_bit_bitfields_565() {
    let mut masks = vec![];
    for mask in [0xF800_u32, 0x07E0, 0x001F] {
        masks.extend_from_slice(&mask.to_le_bytes());
    }
    // pure green in 5-6-5
    let data = bitmap(1, 1, 16, 3, &[], &masks, &[0xE0, 0x07, 0, 0]);
    let out = BmpDecoder::new(&data[..]).decode().unwrap();

    assert_eq!(out, [0, 255, 0]);
}

#[test]
fn test_32_bit_zero_alpha_is_opaque() {
    let data = bitmap(2, 1, 32, 0, &[], &[], &[1, 2, 3, 0, 4, 5, 6, 0]);
    let mut decoder = BmpDecoder::new(&data[..]);
    let out = decoder.decode().unwrap();

    assert_eq!(decoder.colorspace(), Some(ColorSpace::RGBA));
    assert_eq!(out, [3, 2, 1, 255, 6, 5, 4, 255]);
}

#[test]
fn test_32_bit_alpha_is_kept() {
    let data = bitmap(2, 1, 32, 0, &[], &[], &[1, 2, 3, 0, 4, 5, 6, 128]);
    let out = BmpDecoder::new(&data[..]).decode().unwrap();

    assert_eq!(out, [3, 2, 1, 0, 6, 5, 4, 128]);
}

#[test]
fn test_core_header() {
    let mut data = vec![];
    data.extend_from_slice(b"BM");
    data.extend_from_slice(&0_u32.to_le_bytes());
    data.extend_from_slice(&0_u32.to_le_bytes());
    data.extend_from_slice(&26_u32.to_le_bytes());
    data.extend_from_slice(&12_u32.to_le_bytes());
    data.extend_from_slice(&1_u16.to_le_bytes());
    data.extend_from_slice(&1_u16.to_le_bytes());
    data.extend_from_slice(&1_u16.to_le_bytes());
    data.extend_from_slice(&24_u16.to_le_bytes());
    data.extend_from_slice(&[30, 20, 10, 0]);

    let out = BmpDecoder::new(&data[..]).decode().unwrap();
    assert_eq!(out, [10, 20, 30]);
}

#[test]
fn test_gap_before_pixels_is_skipped() {
    let mut data = bitmap(1, 1, 24, 0, &[], &[], &[]);
    // move the data offset four bytes further and insert a gap
    let offset = u32::from_le_bytes([data[10], data[11], data[12], data[13]]) + 4;
    data[10..14].copy_from_slice(&offset.to_le_bytes());
    data.extend_from_slice(&[0xAA; 4]);
    data.extend_from_slice(&[3, 2, 1, 0]);

    let out = BmpDecoder::new(&data[..]).decode().unwrap();
    assert_eq!(out, [1, 2, 3]);
}

#[test]
fn test_rle_is_rejected() {
    let palette = [[0, 0, 0, 0]; 2];
    let data = bitmap(1, 1, 8, 1, &palette, &[], &[1, 0, 0, 1]);
    let result = BmpDecoder::new(&data[..]).decode();

    assert!(matches!(result, Err(BmpDecoderErrors::GenericStatic(_))));
}

#[test]
fn test_invalid_magic() {
    let result = BmpDecoder::new(&b"MB\0\0\0\0\0\0\0\0\0\0\0\0"[..]).decode();
    assert!(matches!(result, Err(BmpDecoderErrors::InvalidMagicBytes)));
}

#[test]
fn test_truncated_pixels() {
    let data = bitmap(4, 4, 24, 0, &[], &[], &[0; 8]);
    let result = BmpDecoder::new(&data[..]).decode();

    assert!(matches!(result, Err(BmpDecoderErrors::IoErrors(_))));
}

#[test]
fn test_limits() {
    let data = bitmap(10, 1, 24, 0, &[], &[], &[0; 32]);
    let options = DecoderOptions::default().set_max_width(5);
    let result = BmpDecoder::new_with_options(&data[..], options).decode();

    assert!(matches!(
        result,
        Err(BmpDecoderErrors::TooLargeDimensions("width", 5, 10))
    ));
}
