/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

#![cfg(feature = "jpeg")]
//! JPEG support, decoding through `zune-jpeg` and encoding through `jpeg-encoder`
use std::io::Write;

use jpeg_encoder::{ColorType, EncodingError};
use log::trace;
use zune_core::bit_depth::BitDepth;
use zune_core::bytestream::ZCursor;
use zune_core::colorspace::ColorSpace;
use zune_core::options::DecoderOptions;
use zune_jpeg::errors::DecodeErrors;

use crate::codecs::ImageFormat;
use crate::convert::{RawImage, Samples};
use crate::errors::{ImageErrors, ImgEncodeErrors};
use crate::traits::{DecoderTrait, EncoderTrait};

/// Quality every image is written with
pub const JPEG_QUALITY: u8 = 95;

/// Decodes a JPEG held in memory
pub struct JpegDecoder {
    inner:      zune_jpeg::JpegDecoder<ZCursor<Vec<u8>>>,
    colorspace: ColorSpace
}

impl JpegDecoder {
    pub fn new_with_options(data: Vec<u8>, options: DecoderOptions) -> JpegDecoder {
        JpegDecoder {
            inner:      zune_jpeg::JpegDecoder::new_with_options(ZCursor::new(data), options),
            colorspace: ColorSpace::Unknown
        }
    }
}

impl DecoderTrait for JpegDecoder {
    fn decode(&mut self) -> Result<RawImage, ImageErrors> {
        let pixels = self.inner.decode()?;

        let (width, height) = self.inner.dimensions().unwrap_or_default();
        // gray images may be expanded to RGB by the decoder, the
        // buffer length tells what was produced
        let channels = pixels.len() / (width * height).max(1);

        let colorspace = match channels {
            1 => ColorSpace::Luma,
            3 => ColorSpace::RGB,
            4 => ColorSpace::RGBA,
            _ => {
                return Err(ImageErrors::JpegDecode(format!(
                    "Unexpected number of components {channels}"
                )))
            }
        };
        trace!("JPEG decoded {width}x{height} {colorspace:?}");
        self.colorspace = colorspace;

        RawImage::new(width, height, colorspace, Samples::U8(pixels))
    }

    fn dimensions(&self) -> Option<(usize, usize)> {
        self.inner.dimensions()
    }

    fn out_colorspace(&self) -> ColorSpace {
        self.colorspace
    }

    fn name(&self) -> &'static str {
        "JPEG Decoder"
    }
}

/// Writes baseline JPEG files at a fixed quality of 95
#[derive(Copy, Clone, Default)]
pub struct JpegEncoder;

impl JpegEncoder {
    pub fn new() -> JpegEncoder {
        JpegEncoder
    }
}

impl EncoderTrait for JpegEncoder {
    fn name(&self) -> &'static str {
        "JPEG Encoder"
    }

    fn encode_inner<W: Write>(&mut self, image: &RawImage, sink: &mut W) -> Result<usize, ImageErrors> {
        let (width, height) = image.dimensions();

        let too_large = || {
            ImgEncodeErrors::Generic(format!(
                "Dimensions {width}x{height} too large for JPEG, maximum is 65535"
            ))
        };
        let width = u16::try_from(width).map_err(|_| too_large())?;
        let height = u16::try_from(height).map_err(|_| too_large())?;

        let color_type = match image.colorspace() {
            ColorSpace::Luma => ColorType::Luma,
            _ => ColorType::Rgb
        };
        let data = image.to_u8();
        let mut output = vec![];

        jpeg_encoder::Encoder::new(&mut output, JPEG_QUALITY).encode(
            &data,
            width,
            height,
            color_type
        )?;
        sink.write_all(&output)?;

        Ok(output.len())
    }

    fn supported_colorspaces(&self) -> &'static [ColorSpace] {
        &[ColorSpace::Luma, ColorSpace::RGB]
    }

    fn format(&self) -> ImageFormat {
        ImageFormat::JPEG
    }

    fn supported_bit_depth(&self) -> &'static [BitDepth] {
        &[BitDepth::Eight]
    }
}

impl From<DecodeErrors> for ImageErrors {
    fn from(from: DecodeErrors) -> Self {
        ImageErrors::JpegDecode(format!("{from:?}"))
    }
}

impl From<EncodingError> for ImageErrors {
    fn from(error: EncodingError) -> Self {
        ImageErrors::EncodeErrors(ImgEncodeErrors::ImageEncodeErrors(format!(
            "jpeg: {error:?}"
        )))
    }
}
