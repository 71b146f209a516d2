/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use imgio::{
    load, save, write_eps_footer, write_eps_header, write_eps_header_for, Image, ImageErrors,
    ImageFormat
};
use rgb::{RGB, RGBA};

#[test]
fn test_header_and_footer_form_a_document() {
    let mut doc = vec![];
    write_eps_header(&mut doc, 10, 20).unwrap();
    write_eps_footer(&mut doc).unwrap();
    let doc = String::from_utf8(doc).unwrap();

    assert!(doc.starts_with("%!PS-Adobe-3.0 EPSF-3.0\n"));
    assert!(doc.contains("%%BoundingBox: 0 0 10 20\n"));
    assert!(doc.trim_end().ends_with("%%EOF"));
}

#[test]
fn test_header_overloads_agree() {
    let image = Image::<RGB<u8>>::new(33, 7);

    let mut from_size = vec![];
    write_eps_header(&mut from_size, 33, 7).unwrap();

    let mut from_tuple = vec![];
    write_eps_header_for(&mut from_tuple, &(33_usize, 7_usize)).unwrap();

    let mut from_image = vec![];
    write_eps_header_for(&mut from_image, &image).unwrap();

    assert_eq!(from_size, from_tuple);
    assert_eq!(from_size, from_image);
}

#[test]
fn test_figure_with_annotations() {
    let image = Image::<u8>::from_fn(4, 4, |x, y| ((x + y) * 30) as u8);

    let mut doc = vec![];
    write_eps_header_for(&mut doc, &image).unwrap();
    save(&image, &mut doc, ImageFormat::PS).unwrap();
    doc.extend_from_slice(b".5 .5 translate 0 0 moveto 3 3 lineto stroke\n");
    write_eps_footer(&mut doc).unwrap();

    let doc = String::from_utf8(doc).unwrap();
    let image_at = doc.find("image\n").unwrap();
    let annotation_at = doc.find("lineto").unwrap();

    assert!(doc.contains("/DeviceGray setcolorspace"));
    assert!(image_at < annotation_at);
    assert!(doc.ends_with("%%EOF\n"));
}

#[test]
fn test_eps_drops_alpha() {
    let image = Image::<RGBA<u8>>::new(2, 2);
    let doc = image.write_to_vec(ImageFormat::EPS).unwrap();
    let doc = String::from_utf8(doc).unwrap();

    assert!(doc.contains("/DeviceRGB setcolorspace"));
    assert!(doc.contains("%%BoundingBox: 0 0 2 2\n"));
}

#[test]
fn test_postscript_cannot_be_loaded() {
    let bytes = Image::<u8>::new(1, 1).write_to_vec(ImageFormat::EPS).unwrap();
    let mut image = Image::<u8>::default();

    assert!(matches!(
        load(&mut image, &mut &bytes[..]),
        Err(ImageErrors::UnsupportedImageType(b'%'))
    ));
}
