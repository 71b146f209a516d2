/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Conversion between codec output and typed images
use std::borrow::Cow;

use log::trace;
use zune_core::bit_depth::BitDepth;
use zune_core::colorspace::ColorSpace;

use crate::errors::ImageErrors;
use crate::image::Image;
use crate::pixel::{Component, Pixel};

/// Interleaved samples as produced or consumed by a codec
#[derive(Clone, Debug, PartialEq)]
pub enum Samples {
    U8(Vec<u8>),
    U16(Vec<u16>)
}

impl Samples {
    pub fn len(&self) -> usize {
        match self {
            Samples::U8(data) => data.len(),
            Samples::U16(data) => data.len()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub const fn depth(&self) -> BitDepth {
        match self {
            Samples::U8(_) => BitDepth::Eight,
            Samples::U16(_) => BitDepth::Sixteen
        }
    }

    fn get(&self, index: usize) -> u16 {
        match self {
            Samples::U8(data) => data[index].to_u16(),
            Samples::U16(data) => data[index]
        }
    }
}

/// A decoded image in the codec's own representation
///
/// Colorspace is one of `Luma`, `LumaA`, `RGB` or `RGBA`
#[derive(Clone, Debug, PartialEq)]
pub struct RawImage {
    width:      usize,
    height:     usize,
    colorspace: ColorSpace,
    samples:    Samples
}

impl RawImage {
    /// Create a raw image, checking that the number of samples
    /// matches dimensions and colorspace
    pub fn new(
        width: usize, height: usize, colorspace: ColorSpace, samples: Samples
    ) -> Result<RawImage, ImageErrors> {
        let expected = width
            .saturating_mul(height)
            .saturating_mul(colorspace.num_components());

        if expected != samples.len() {
            return Err(ImageErrors::DimensionsMisMatch(expected, samples.len()));
        }
        Ok(RawImage {
            width,
            height,
            colorspace,
            samples
        })
    }

    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub const fn colorspace(&self) -> ColorSpace {
        self.colorspace
    }

    pub const fn depth(&self) -> BitDepth {
        self.samples.depth()
    }

    pub const fn samples(&self) -> &Samples {
        &self.samples
    }

    /// Samples as 8 bit values, scaling down 16 bit ones
    pub fn to_u8(&self) -> Cow<'_, [u8]> {
        match &self.samples {
            Samples::U8(data) => Cow::Borrowed(data.as_slice()),
            Samples::U16(data) => Cow::Owned(data.iter().map(|&v| u8::from_u16(v)).collect())
        }
    }

    /// Convert into `image`, resizing it to fit
    ///
    /// Colors are mapped to `P::COLORSPACE`, gray from color uses
    /// luminance weights, alpha is dropped or filled opaque.
    pub fn into_image<P: Pixel>(self, image: &mut Image<P>) {
        let channels = self.colorspace.num_components();

        trace!(
            "Converting {:?} {:?} to {:?}",
            self.colorspace,
            self.depth(),
            P::COLORSPACE
        );
        image.resize(self.width, self.height);

        let mut out = [0_u16; 4];

        for (i, pixel) in image.pixels_mut().iter_mut().enumerate() {
            let mut source = [0_u16; 4];
            for (c, value) in source.iter_mut().take(channels).enumerate() {
                *value = self.samples.get(i * channels + c);
            }
            convert_channels(self.colorspace, &source, P::COLORSPACE, &mut out);
            *pixel = P::from_channels(&out);
        }
    }

    /// Convert `image` into `colorspace` with samples of `depth`
    ///
    /// Any depth other than [`BitDepth::Sixteen`] gives 8 bit samples
    pub fn from_image<P: Pixel>(image: &Image<P>, colorspace: ColorSpace, depth: BitDepth) -> RawImage {
        let (width, height) = image.dimensions();
        let channels = colorspace.num_components();
        let mut values = Vec::with_capacity(width * height * channels);

        let mut source = [0_u16; 4];
        let mut out = [0_u16; 4];

        for pixel in image.pixels() {
            pixel.write_channels(&mut source);
            convert_channels(P::COLORSPACE, &source, colorspace, &mut out);
            values.extend_from_slice(&out[..channels]);
        }
        let samples = if depth == BitDepth::Sixteen {
            Samples::U16(values)
        } else {
            Samples::U8(values.into_iter().map(u8::from_u16).collect())
        };
        RawImage {
            width,
            height,
            colorspace,
            samples
        }
    }
}

const fn is_gray(colorspace: ColorSpace) -> bool {
    matches!(colorspace, ColorSpace::Luma | ColorSpace::LumaA)
}

fn alpha(colorspace: ColorSpace, source: &[u16; 4]) -> u16 {
    match colorspace {
        ColorSpace::LumaA => source[1],
        ColorSpace::RGBA => source[3],
        _ => u16::MAX
    }
}

fn luminance(r: u16, g: u16, b: u16) -> u16 {
    let value = 0.299 * f32::from(r) + 0.587 * f32::from(g) + 0.114 * f32::from(b);
    (value + 0.5).min(65535.0) as u16
}

/// Map 16 bit channel values between colorspaces
fn convert_channels(from: ColorSpace, source: &[u16; 4], to: ColorSpace, out: &mut [u16; 4]) {
    let (r, g, b) = if is_gray(from) {
        (source[0], source[0], source[0])
    } else {
        (source[0], source[1], source[2])
    };
    let gray = || if is_gray(from) { source[0] } else { luminance(r, g, b) };

    match to {
        ColorSpace::Luma => out[0] = gray(),
        ColorSpace::LumaA => {
            out[0] = gray();
            out[1] = alpha(from, source);
        }
        ColorSpace::RGB => {
            out[..3].copy_from_slice(&[r, g, b]);
        }
        _ => {
            out.copy_from_slice(&[r, g, b, alpha(from, source)]);
        }
    }
}
