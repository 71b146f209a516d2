/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! PostScript and EPS writers
use std::io::Write;

use imgio_ps::{EpsEncoder as EpsEnc, PsEncoder as PsEnc};
use zune_core::bit_depth::BitDepth;
use zune_core::colorspace::ColorSpace;

use crate::codecs::ImageFormat;
use crate::convert::RawImage;
use crate::errors::ImageErrors;
use crate::traits::EncoderTrait;

/// Writes a bare PostScript image body
///
/// See [`write_eps_header`](crate::write_eps_header) for building a figure around it
#[derive(Copy, Clone, Default)]
pub struct PsEncoder;

impl PsEncoder {
    pub fn new() -> PsEncoder {
        PsEncoder
    }
}

/// Writes a complete Encapsulated PostScript figure
#[derive(Copy, Clone, Default)]
pub struct EpsEncoder;

impl EpsEncoder {
    pub fn new() -> EpsEncoder {
        EpsEncoder
    }
}

impl EncoderTrait for PsEncoder {
    fn name(&self) -> &'static str {
        "PS Encoder"
    }

    fn encode_inner<W: Write>(&mut self, image: &RawImage, sink: &mut W) -> Result<usize, ImageErrors> {
        let (width, height) = image.dimensions();
        let mut output = vec![];

        PsEnc::new(&mut output).encode(width, height, image.colorspace(), &image.to_u8())?;
        sink.write_all(&output)?;

        Ok(output.len())
    }

    fn supported_colorspaces(&self) -> &'static [ColorSpace] {
        &[ColorSpace::Luma, ColorSpace::RGB]
    }

    fn format(&self) -> ImageFormat {
        ImageFormat::PS
    }

    fn supported_bit_depth(&self) -> &'static [BitDepth] {
        &[BitDepth::Eight]
    }
}

impl EncoderTrait for EpsEncoder {
    fn name(&self) -> &'static str {
        "EPS Encoder"
    }

    fn encode_inner<W: Write>(&mut self, image: &RawImage, sink: &mut W) -> Result<usize, ImageErrors> {
        let (width, height) = image.dimensions();
        let mut output = vec![];

        EpsEnc::new(&mut output).encode(width, height, image.colorspace(), &image.to_u8())?;
        sink.write_all(&output)?;

        Ok(output.len())
    }

    fn supported_colorspaces(&self) -> &'static [ColorSpace] {
        &[ColorSpace::Luma, ColorSpace::RGB]
    }

    fn format(&self) -> ImageFormat {
        ImageFormat::EPS
    }

    fn supported_bit_depth(&self) -> &'static [BitDepth] {
        &[BitDepth::Eight]
    }
}
