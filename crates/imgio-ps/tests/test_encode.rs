/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use imgio_ps::{write_eps_footer, write_eps_header, EpsEncoder, PsEncodeErrors, PsEncoder};
use nanorand::{Rng, WyRand};
use zune_core::colorspace::ColorSpace;

/// Decode the ASCII85 data following the `image` operator
fn decode_ascii85(body: &str) -> Vec<u8> {
    let start = body.find("image\n").unwrap() + "image\n".len();
    let end = body[start..].find("~>").unwrap() + start;
    let mut out = vec![];
    let mut group = vec![];

    for c in body[start..end].bytes().filter(|c| !c.is_ascii_whitespace()) {
        if c == b'z' {
            out.extend_from_slice(&[0; 4]);
            continue;
        }
        group.push(c - b'!');
        if group.len() == 5 {
            let value = group.iter().fold(0_u32, |acc, &d| acc * 85 + u32::from(d));
            out.extend_from_slice(&value.to_be_bytes());
            group.clear();
        }
    }
    if !group.is_empty() {
        let n = group.len() - 1;
        group.resize(5, b'u' - b'!');
        let value = group.iter().fold(0_u32, |acc, &d| acc * 85 + u32::from(d));
        out.extend_from_slice(&value.to_be_bytes()[..n]);
    }
    out
}

#[test]
fn test_ps_body_rgb() {
    let mut rng = WyRand::new_seed(85);
    let data: Vec<u8> = (0..5 * 3 * 3).map(|_| rng.generate::<u8>()).collect();

    let mut sink = vec![];
    PsEncoder::new(&mut sink)
        .encode(5, 3, ColorSpace::RGB, &data)
        .unwrap();
    let body = String::from_utf8(sink).unwrap();

    assert!(body.starts_with("gsave\n/DeviceRGB setcolorspace\n"));
    assert!(body.contains("/Width 5\n"));
    assert!(body.contains("/Height 3\n"));
    assert!(body.contains("/BitsPerComponent 8\n"));
    assert!(body.ends_with("~>\ngrestore\n"));
    assert_eq!(decode_ascii85(&body), data);
}

#[test]
fn test_ps_body_gray() {
    let data = [0, 0, 0, 0, 1, 2, 3];
    let mut sink = vec![];
    PsEncoder::new(&mut sink)
        .encode(7, 1, ColorSpace::Luma, &data)
        .unwrap();
    let body = String::from_utf8(sink).unwrap();

    assert!(body.contains("/DeviceGray setcolorspace"));
    assert!(body.contains("/Decode [0 1]"));
    assert_eq!(decode_ascii85(&body), data);
}

#[test]
fn test_alpha_is_rejected() {
    let mut sink = vec![];
    let result = PsEncoder::new(&mut sink).encode(1, 1, ColorSpace::RGBA, &[0; 4]);

    assert!(matches!(
        result,
        Err(PsEncodeErrors::UnsupportedColorspace(ColorSpace::RGBA))
    ));
}

#[test]
fn test_header_then_footer_is_complete_document() {
    let mut sink = vec![];
    write_eps_header(&mut sink, 640, 480).unwrap();
    write_eps_footer(&mut sink).unwrap();
    let doc = String::from_utf8(sink).unwrap();

    assert!(doc.starts_with("%!PS-Adobe-3.0 EPSF-3.0\n"));
    assert!(doc.contains("%%BoundingBox: 0 0 640 480\n"));
    assert!(doc.contains("%%EndComments\n"));
    assert!(doc.contains("0 480 translate\n1 -1 scale\n"));
    assert!(doc.ends_with("showpage\n%%EOF\n"));
    assert_eq!(doc.matches("gsave").count(), doc.matches("grestore").count());
}

#[test]
fn test_eps_figure() {
    let mut sink = vec![];
    EpsEncoder::new(&mut sink)
        .encode(2, 2, ColorSpace::Luma, &[0, 64, 128, 255])
        .unwrap();
    let doc = String::from_utf8(sink).unwrap();

    assert!(doc.starts_with("%!PS-Adobe-3.0 EPSF-3.0\n"));
    assert!(doc.contains("image\n"));
    assert!(doc.ends_with("%%EOF\n"));
    assert_eq!(doc.matches("gsave").count(), 2);
    assert_eq!(doc.matches("grestore").count(), 2);
    assert_eq!(decode_ascii85(&doc), [0, 64, 128, 255]);
}
