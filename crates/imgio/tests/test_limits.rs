/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use imgio::zune_core::options::DecoderOptions;
use imgio::{load_with_options, Image, ImageErrors, ImageFormat};
use imgio_bmp::BmpDecoderErrors;
use imgio_pnm::PnmDecodeErrors;
use rgb::RGB;

fn wide_image() -> Image<RGB<u8>> {
    Image::from_fn(16, 2, |x, y| RGB::new((x * 15) as u8, (y * 100) as u8, 3))
}

fn narrow_options() -> DecoderOptions {
    DecoderOptions::default().set_max_width(8)
}

#[test]
fn test_pnm_width_limit() {
    let data = wide_image().write_to_vec(ImageFormat::PNM).unwrap();
    let mut image = Image::<RGB<u8>>::default();

    let result = load_with_options(&mut image, &mut &data[..], narrow_options());
    assert!(matches!(
        result,
        Err(ImageErrors::PnmDecode(PnmDecodeErrors::LargeDimensions(8, 16)))
    ));
}

#[test]
fn test_bmp_width_limit() {
    let data = wide_image().write_to_vec(ImageFormat::BMP).unwrap();
    let mut image = Image::<RGB<u8>>::default();

    let result = load_with_options(&mut image, &mut &data[..], narrow_options());
    assert!(matches!(
        result,
        Err(ImageErrors::BmpDecode(BmpDecoderErrors::TooLargeDimensions(..)))
    ));
}

#[cfg(feature = "tiff")]
#[test]
fn test_tiff_width_limit() {
    let data = wide_image().write_to_vec(ImageFormat::TIFF).unwrap();
    let mut image = Image::<RGB<u8>>::default();

    let result = load_with_options(&mut image, &mut &data[..], narrow_options());
    assert!(matches!(result, Err(ImageErrors::TiffDecode(_))));
}

#[test]
fn test_limit_is_inclusive() {
    let source = wide_image();
    let data = source.write_to_vec(ImageFormat::PNM).unwrap();
    let options = DecoderOptions::default().set_max_width(16).set_max_height(2);

    let decoded = Image::<RGB<u8>>::read_with_options(&mut &data[..], options).unwrap();
    assert_eq!(decoded, source);
}

#[test]
fn test_open_with_options_applies_limits() {
    let path = std::env::temp_dir().join(format!("imgio-{}-limits.bmp", std::process::id()));
    wide_image().save(&path).unwrap();

    let result = Image::<RGB<u8>>::open_with_options(&path, narrow_options());
    std::fs::remove_file(&path).unwrap();

    assert!(matches!(result, Err(ImageErrors::BmpDecode(_))));
}
