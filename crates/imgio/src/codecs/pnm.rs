/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Portable anymap encoder and decoder glue
use std::io::{BufRead, Write};

use imgio_pnm::PnmEncoder as PnmEnc;
pub use imgio_pnm::{PnmDecodeErrors, PnmDecoder, PnmEncodeErrors, PnmSamples};
use zune_core::bit_depth::BitDepth;
use zune_core::colorspace::ColorSpace;

use crate::codecs::ImageFormat;
use crate::convert::{RawImage, Samples};
use crate::errors::ImageErrors;
use crate::traits::{DecoderTrait, EncoderTrait};

/// Writes P5, P6 or P7 (for images with alpha) files
#[derive(Copy, Clone, Default)]
pub struct PnmEncoder;

impl PnmEncoder {
    pub fn new() -> PnmEncoder {
        PnmEncoder
    }
}

impl EncoderTrait for PnmEncoder {
    fn name(&self) -> &'static str {
        "PNM Encoder"
    }

    fn encode_inner<W: Write>(&mut self, image: &RawImage, sink: &mut W) -> Result<usize, ImageErrors> {
        let (width, height) = image.dimensions();
        let colorspace = image.colorspace();
        let mut encoder = PnmEnc::new(sink);

        let written = match image.samples() {
            Samples::U8(data) => encoder.encode_u8(width, height, colorspace, data)?,
            Samples::U16(data) => encoder.encode_u16(width, height, colorspace, data)?
        };
        Ok(written)
    }

    fn supported_colorspaces(&self) -> &'static [ColorSpace] {
        &[
            ColorSpace::Luma,  // p5
            ColorSpace::RGB,   // p6
            ColorSpace::LumaA, // p7
            ColorSpace::RGBA   // p7
        ]
    }

    fn format(&self) -> ImageFormat {
        ImageFormat::PNM
    }

    fn supported_bit_depth(&self) -> &'static [BitDepth] {
        &[BitDepth::Eight, BitDepth::Sixteen]
    }
}

impl<R: BufRead> DecoderTrait for PnmDecoder<R> {
    fn decode(&mut self) -> Result<RawImage, ImageErrors> {
        let pixels = PnmDecoder::decode(self)?;

        let (width, height) = self.dimensions().unwrap_or_default();
        let colorspace = self.colorspace().unwrap_or(ColorSpace::Unknown);

        let samples = match pixels {
            PnmSamples::U8(data) => Samples::U8(data),
            PnmSamples::U16(data) => Samples::U16(data)
        };
        RawImage::new(width, height, colorspace, samples)
    }

    fn dimensions(&self) -> Option<(usize, usize)> {
        PnmDecoder::dimensions(self)
    }

    fn out_colorspace(&self) -> ColorSpace {
        self.colorspace().unwrap_or(ColorSpace::Unknown)
    }

    fn name(&self) -> &'static str {
        "PNM Decoder"
    }
}
