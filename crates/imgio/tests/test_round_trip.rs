/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use imgio::{load, pnm_load, pnm_save, save, Image, ImageErrors, ImageFormat, Pixel};
use nanorand::{Rng, WyRand};
use rgb::{RGB, RGBA};

fn random_image<P: Pixel>(width: usize, height: usize, seed: u64) -> Image<P> {
    let mut rng = WyRand::new_seed(seed);
    let mut channels = [0_u16; 4];

    Image::from_fn(width, height, |_, _| {
        for c in channels.iter_mut() {
            *c = rng.generate::<u16>();
        }
        P::from_channels(&channels)
    })
}

fn round_trip<P: Pixel + PartialEq + std::fmt::Debug>(image: &Image<P>, format: ImageFormat) -> Image<P> {
    let mut encoded = vec![];
    save(image, &mut encoded, format).unwrap();

    let mut decoded = Image::default();
    load(&mut decoded, &mut &encoded[..]).unwrap();
    decoded
}

#[test]
fn test_pnm_exact() {
    let gray = random_image::<u8>(17, 9, 1);
    assert_eq!(round_trip(&gray, ImageFormat::PNM), gray);

    let wide = random_image::<u16>(5, 8, 2);
    assert_eq!(round_trip(&wide, ImageFormat::PNM), wide);

    let rgb = random_image::<RGB<u8>>(7, 7, 3);
    assert_eq!(round_trip(&rgb, ImageFormat::PNM), rgb);

    let rgba = random_image::<RGBA<u16>>(4, 3, 4);
    assert_eq!(round_trip(&rgba, ImageFormat::PNM), rgba);
}

#[test]
fn test_pnm_float() {
    let image = Image::<f32>::from_fn(10, 10, |x, y| (x + y) as f32 / 18.0);
    let decoded = round_trip(&image, ImageFormat::PNM);

    for (a, b) in image.pixels().iter().zip(decoded.pixels()) {
        assert!((a - b).abs() < 1e-4, "{a} != {b}");
    }
}

#[test]
fn test_bmp_exact() {
    let gray = random_image::<u8>(13, 3, 5);
    assert_eq!(round_trip(&gray, ImageFormat::BMP), gray);

    let rgb = random_image::<RGB<u8>>(6, 5, 6);
    assert_eq!(round_trip(&rgb, ImageFormat::BMP), rgb);

    let rgba = random_image::<RGBA<u8>>(3, 3, 7);
    assert_eq!(round_trip(&rgba, ImageFormat::BMP), rgba);
}

#[cfg(feature = "tiff")]
#[test]
fn test_tiff_exact() {
    let gray = random_image::<u8>(16, 4, 8);
    assert_eq!(round_trip(&gray, ImageFormat::TIFF), gray);

    let wide = random_image::<u16>(3, 9, 9);
    assert_eq!(round_trip(&wide, ImageFormat::TIFF), wide);

    let rgb = random_image::<RGB<u8>>(8, 8, 10);
    assert_eq!(round_trip(&rgb, ImageFormat::TIFF), rgb);

    let rgba = random_image::<RGBA<u16>>(5, 2, 11);
    assert_eq!(round_trip(&rgba, ImageFormat::TIFF), rgba);
}

#[cfg(feature = "jpeg")]
#[test]
fn test_jpeg_within_tolerance() {
    let image = Image::<RGB<u8>>::from_fn(32, 24, |x, y| {
        RGB::new((x * 8) as u8, (y * 10) as u8, 128)
    });
    let decoded = round_trip(&image, ImageFormat::JPEG);

    assert_eq!(decoded.dimensions(), (32, 24));
    for (a, b) in image.pixels().iter().zip(decoded.pixels()) {
        assert!(a.r.abs_diff(b.r) <= 16, "{a:?} vs {b:?}");
        assert!(a.g.abs_diff(b.g) <= 16, "{a:?} vs {b:?}");
        assert!(a.b.abs_diff(b.b) <= 16, "{a:?} vs {b:?}");
    }

    let gray = Image::<u8>::from_fn(16, 16, |x, _| (x * 16) as u8);
    let decoded = round_trip(&gray, ImageFormat::JPEG);
    for (a, b) in gray.pixels().iter().zip(decoded.pixels()) {
        assert!(a.abs_diff(*b) <= 16, "{a} vs {b}");
    }
}

#[test]
fn test_conversion_on_load() {
    // stored as 8 bit gray, loaded as RGBA
    let gray = Image::<u8>::from_fn(4, 1, |x, _| (x * 60) as u8);
    let mut encoded = vec![];
    save(&gray, &mut encoded, ImageFormat::BMP).unwrap();

    let mut color = Image::<RGBA<u8>>::default();
    load(&mut color, &mut &encoded[..]).unwrap();

    assert_eq!(color.get(2, 0), Some(&RGBA::new(120, 120, 120, 255)));
}

#[test]
fn test_images_back_to_back() {
    let first = random_image::<u8>(3, 3, 12);
    let second = random_image::<RGB<u8>>(2, 5, 13);

    let mut stream = vec![];
    pnm_save(&first, &mut stream).unwrap();
    save(&second, &mut stream, ImageFormat::BMP).unwrap();

    let mut reader = &stream[..];
    let mut a = Image::<u8>::default();
    let mut b = Image::<RGB<u8>>::default();

    pnm_load(&mut a, &mut reader).unwrap();
    load(&mut b, &mut reader).unwrap();

    assert_eq!(a, first);
    assert_eq!(b, second);
    assert!(matches!(
        load(&mut a, &mut reader),
        Err(ImageErrors::EofBeforeImage)
    ));
}

#[test]
fn test_encode_counts_bytes() {
    let image = random_image::<RGB<u8>>(4, 4, 14);

    for format in [ImageFormat::PNM, ImageFormat::BMP, ImageFormat::PS, ImageFormat::EPS] {
        let mut sink = vec![];
        let written = image.encode(format, &mut sink).unwrap();
        assert_eq!(written, sink.len(), "{format:?}");
    }
}
