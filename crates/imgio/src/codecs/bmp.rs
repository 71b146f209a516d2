/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Windows bitmap encoder and decoder glue
use std::io::{Read, Write};

use imgio_bmp::BmpEncoder as BmpEnc;
pub use imgio_bmp::{BmpDecoder, BmpDecoderErrors, BmpEncodeErrors};
use zune_core::bit_depth::BitDepth;
use zune_core::colorspace::ColorSpace;

use crate::codecs::ImageFormat;
use crate::convert::{RawImage, Samples};
use crate::errors::ImageErrors;
use crate::traits::{DecoderTrait, EncoderTrait};

/// Writes 8 bit gray, 24 bit RGB or 32 bit RGBA bitmaps
#[derive(Copy, Clone, Default)]
pub struct BmpEncoder;

impl BmpEncoder {
    pub fn new() -> BmpEncoder {
        BmpEncoder
    }
}

impl EncoderTrait for BmpEncoder {
    fn name(&self) -> &'static str {
        "BMP Encoder"
    }

    fn encode_inner<W: Write>(&mut self, image: &RawImage, sink: &mut W) -> Result<usize, ImageErrors> {
        let (width, height) = image.dimensions();
        let data = image.to_u8();

        Ok(BmpEnc::new(sink).encode(width, height, image.colorspace(), &data)?)
    }

    fn supported_colorspaces(&self) -> &'static [ColorSpace] {
        &[ColorSpace::Luma, ColorSpace::RGB, ColorSpace::RGBA]
    }

    fn format(&self) -> ImageFormat {
        ImageFormat::BMP
    }

    fn supported_bit_depth(&self) -> &'static [BitDepth] {
        &[BitDepth::Eight]
    }
}

impl<R: Read> DecoderTrait for BmpDecoder<R> {
    fn decode(&mut self) -> Result<RawImage, ImageErrors> {
        let pixels = BmpDecoder::decode(self)?;

        let (width, height) = BmpDecoder::dimensions(self).unwrap_or_default();
        let colorspace = self.colorspace().unwrap_or(ColorSpace::Unknown);

        RawImage::new(width, height, colorspace, Samples::U8(pixels))
    }

    fn dimensions(&self) -> Option<(usize, usize)> {
        BmpDecoder::dimensions(self)
    }

    fn out_colorspace(&self) -> ColorSpace {
        self.colorspace().unwrap_or(ColorSpace::Unknown)
    }

    fn name(&self) -> &'static str {
        "BMP Decoder"
    }
}
