/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

#![cfg(feature = "tiff")]
//! TIFF support through the `tiff` crate
//!
//! The `tiff` crate needs a seekable stream, so data is buffered
//! in memory in both directions.
use std::io::{Cursor, Write};

use log::trace;
use tiff::decoder::{Decoder, DecodingResult};
use tiff::encoder::{colortype, TiffEncoder as TiffEnc};
use tiff::{ColorType, TiffError};
use zune_core::bit_depth::BitDepth;
use zune_core::colorspace::ColorSpace;
use zune_core::options::DecoderOptions;

use crate::codecs::ImageFormat;
use crate::convert::{RawImage, Samples};
use crate::errors::{ImageErrors, ImgEncodeErrors};
use crate::traits::{DecoderTrait, EncoderTrait};

/// Decodes 8 and 16 bit gray, gray alpha, RGB and RGBA TIFF images
pub struct TiffDecoder {
    inner:      Decoder<Cursor<Vec<u8>>>,
    options:    DecoderOptions,
    dimensions: Option<(usize, usize)>,
    colorspace: ColorSpace
}

impl TiffDecoder {
    pub fn new_with_options(data: Vec<u8>, options: DecoderOptions) -> Result<TiffDecoder, ImageErrors> {
        Ok(TiffDecoder {
            inner: Decoder::new(Cursor::new(data))?,
            options,
            dimensions: None,
            colorspace: ColorSpace::Unknown
        })
    }

    fn decode_headers(&mut self) -> Result<(), ImageErrors> {
        let (width, height) = self.inner.dimensions()?;
        let (width, height) = (width as usize, height as usize);

        if width > self.options.max_width() || height > self.options.max_height() {
            return Err(ImageErrors::TiffDecode(format!(
                "Image dimensions {width}x{height} exceed configured limits {}x{}",
                self.options.max_width(),
                self.options.max_height()
            )));
        }
        self.colorspace = match self.inner.colortype()? {
            ColorType::Gray(8 | 16) => ColorSpace::Luma,
            ColorType::GrayA(8 | 16) => ColorSpace::LumaA,
            ColorType::RGB(8 | 16) => ColorSpace::RGB,
            ColorType::RGBA(8 | 16) => ColorSpace::RGBA,
            other => {
                return Err(ImageErrors::TiffDecode(format!(
                    "Unsupported color type {other:?}"
                )))
            }
        };
        self.dimensions = Some((width, height));
        Ok(())
    }
}

impl DecoderTrait for TiffDecoder {
    fn decode(&mut self) -> Result<RawImage, ImageErrors> {
        self.decode_headers()?;

        let (width, height) = self.dimensions.unwrap_or_default();

        let samples = match self.inner.read_image()? {
            DecodingResult::U8(data) => Samples::U8(data),
            DecodingResult::U16(data) => Samples::U16(data),
            _ => {
                return Err(ImageErrors::TiffDecode(
                    "Only 8 and 16 bit integer samples are supported".to_string()
                ))
            }
        };
        trace!("TIFF decoded {width}x{height} {:?}", self.colorspace);

        RawImage::new(width, height, self.colorspace, samples)
    }

    fn dimensions(&self) -> Option<(usize, usize)> {
        self.dimensions
    }

    fn out_colorspace(&self) -> ColorSpace {
        self.colorspace
    }

    fn name(&self) -> &'static str {
        "TIFF Decoder"
    }
}

/// Writes uncompressed 8 or 16 bit gray, RGB and RGBA TIFF images
#[derive(Copy, Clone, Default)]
pub struct TiffEncoder;

impl TiffEncoder {
    pub fn new() -> TiffEncoder {
        TiffEncoder
    }
}

impl EncoderTrait for TiffEncoder {
    fn name(&self) -> &'static str {
        "TIFF Encoder"
    }

    fn encode_inner<W: Write>(&mut self, image: &RawImage, sink: &mut W) -> Result<usize, ImageErrors> {
        let (width, height) = image.dimensions();
        let too_large = || {
            ImgEncodeErrors::Generic(format!("Dimensions {width}x{height} too large for TIFF"))
        };
        let w = u32::try_from(width).map_err(|_| too_large())?;
        let h = u32::try_from(height).map_err(|_| too_large())?;

        let mut cursor = Cursor::new(Vec::new());
        {
            let mut encoder = TiffEnc::new(&mut cursor).map_err(encode_error)?;

            let result = match (image.colorspace(), image.samples()) {
                (ColorSpace::Luma, Samples::U8(d)) => encoder.write_image::<colortype::Gray8>(w, h, d),
                (ColorSpace::Luma, Samples::U16(d)) => encoder.write_image::<colortype::Gray16>(w, h, d),
                (ColorSpace::RGB, Samples::U8(d)) => encoder.write_image::<colortype::RGB8>(w, h, d),
                (ColorSpace::RGB, Samples::U16(d)) => encoder.write_image::<colortype::RGB16>(w, h, d),
                (ColorSpace::RGBA, Samples::U8(d)) => encoder.write_image::<colortype::RGBA8>(w, h, d),
                (ColorSpace::RGBA, Samples::U16(d)) => encoder.write_image::<colortype::RGBA16>(w, h, d),
                (colorspace, _) => {
                    return Err(ImgEncodeErrors::Generic(format!(
                        "Cannot write {colorspace:?} as TIFF"
                    ))
                    .into())
                }
            };
            result.map_err(encode_error)?;
        }
        let output = cursor.into_inner();
        sink.write_all(&output)?;

        Ok(output.len())
    }

    /// Gray with alpha is written as RGBA
    fn supported_colorspaces(&self) -> &'static [ColorSpace] {
        &[ColorSpace::Luma, ColorSpace::RGB, ColorSpace::RGBA]
    }

    fn format(&self) -> ImageFormat {
        ImageFormat::TIFF
    }

    fn supported_bit_depth(&self) -> &'static [BitDepth] {
        &[BitDepth::Eight, BitDepth::Sixteen]
    }
}

fn encode_error(error: TiffError) -> ImageErrors {
    ImageErrors::EncodeErrors(ImgEncodeErrors::ImageEncodeErrors(format!("tiff: {error}")))
}

impl From<TiffError> for ImageErrors {
    fn from(error: TiffError) -> Self {
        ImageErrors::TiffDecode(format!("{error}"))
    }
}
