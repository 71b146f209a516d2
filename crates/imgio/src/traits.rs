/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Traits implemented by the codecs the dispatcher routes to
use std::io::Write;

use log::trace;
use zune_core::bit_depth::BitDepth;
use zune_core::colorspace::ColorSpace;

use crate::codecs::ImageFormat;
use crate::convert::RawImage;
use crate::depth::default_depth;
use crate::errors::ImageErrors;
use crate::image::Image;
use crate::pixel::Pixel;

/// An image decoder
pub trait DecoderTrait {
    /// Decode the image into its native representation
    fn decode(&mut self) -> Result<RawImage, ImageErrors>;

    /// Image dimensions, `None` if not known yet
    fn dimensions(&self) -> Option<(usize, usize)>;

    /// Colorspace of the decoded image
    fn out_colorspace(&self) -> ColorSpace;

    fn name(&self) -> &'static str;
}

/// An image encoder
pub trait EncoderTrait {
    fn name(&self) -> &'static str;

    /// Encode an image already converted to one of
    /// [`supported_colorspaces`](Self::supported_colorspaces) and
    /// [`supported_bit_depth`](Self::supported_bit_depth)
    fn encode_inner<W: Write>(&mut self, image: &RawImage, sink: &mut W) -> Result<usize, ImageErrors>;

    fn supported_colorspaces(&self) -> &'static [ColorSpace];

    fn format(&self) -> ImageFormat;

    fn supported_bit_depth(&self) -> &'static [BitDepth];

    /// Depth `P` is written with
    ///
    /// Encoders supporting 16 bits follow [`default_depth`], others write 8 bits
    fn default_depth<P: Pixel>(&self) -> BitDepth {
        if self.supported_bit_depth().contains(&BitDepth::Sixteen) {
            default_depth::<P>()
        } else {
            BitDepth::Eight
        }
    }

    /// Colorspace an image in `colorspace` is written as
    ///
    /// Alpha is kept where the encoder can store it, otherwise dropped
    fn default_colorspace(&self, colorspace: ColorSpace) -> ColorSpace {
        let supported = self.supported_colorspaces();

        let candidates: &[ColorSpace] = match colorspace {
            ColorSpace::LumaA => &[ColorSpace::LumaA, ColorSpace::RGBA, ColorSpace::Luma],
            ColorSpace::RGBA => &[ColorSpace::RGBA, ColorSpace::RGB],
            ColorSpace::Luma => &[ColorSpace::Luma, ColorSpace::RGB],
            _ => &[ColorSpace::RGB]
        };
        candidates
            .iter()
            .copied()
            .find(|c| supported.contains(c))
            .unwrap_or(ColorSpace::RGB)
    }

    /// Convert `image` to what the encoder accepts and write it to `sink`
    ///
    /// Returns the number of bytes written
    fn encode<P: Pixel, W: Write>(&mut self, image: &Image<P>, sink: &mut W) -> Result<usize, ImageErrors> {
        let colorspace = self.default_colorspace(P::COLORSPACE);
        let depth = self.default_depth::<P>();

        trace!(
            "{}: writing {:?} as {:?} {colorspace:?} {depth:?}",
            self.name(),
            P::COLORSPACE,
            self.format()
        );
        let raw = RawImage::from_image(image, colorspace, depth);

        self.encode_inner(&raw, sink)
    }
}
