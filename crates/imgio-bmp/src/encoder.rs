/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::io::Write;

use log::trace;
use zune_core::colorspace::ColorSpace;

use crate::common::{FILE_HEADER_SIZE, INFO_HEADER_SIZE};
use crate::BmpEncodeErrors;

/// 72 DPI expressed in pixels per metre
const PIXELS_PER_METRE: u32 = 2835;

/// A BMP encoder
///
/// Writes uncompressed bottom-up bitmaps with a BITMAPINFOHEADER
///
/// | Colorspace | Stored as                   |
/// |------------|-----------------------------|
/// | Luma       | 8 bit with a gray palette   |
/// | RGB        | 24 bit BGR                  |
/// | RGBA       | 32 bit BGRA                 |
pub struct BmpEncoder<'a, W: Write> {
    writer: &'a mut W
}

impl<'a, W: Write> BmpEncoder<'a, W> {
    pub fn new(writer: &'a mut W) -> BmpEncoder<'a, W> {
        BmpEncoder { writer }
    }

    /// Encode interleaved 8 bit pixels
    ///
    /// Returns the number of bytes written
    pub fn encode(
        &mut self, width: usize, height: usize, colorspace: ColorSpace, data: &[u8]
    ) -> Result<usize, BmpEncodeErrors> {
        let bits_per_pixel: u32 = match colorspace {
            ColorSpace::Luma => 8,
            ColorSpace::RGB => 24,
            ColorSpace::RGBA => 32,
            _ => return Err(BmpEncodeErrors::UnsupportedColorspace(colorspace))
        };
        let channels = colorspace.num_components();

        let expected = width
            .checked_mul(height)
            .and_then(|x| x.checked_mul(channels))
            .ok_or(BmpEncodeErrors::TooLargeDimensions(width, height))?;

        if expected != data.len() {
            return Err(BmpEncodeErrors::MismatchedLength(expected, data.len()));
        }
        let too_large = || BmpEncodeErrors::TooLargeDimensions(width, height);

        let w = i32::try_from(width).map_err(|_| too_large())?;
        let h = i32::try_from(height).map_err(|_| too_large())?;

        let stride = (width as u64 * u64::from(bits_per_pixel)).div_ceil(32) * 4;
        let palette_size: u32 = if colorspace == ColorSpace::Luma { 256 * 4 } else { 0 };
        let data_offset = FILE_HEADER_SIZE + INFO_HEADER_SIZE + palette_size;

        let image_size = u32::try_from(stride * height as u64).map_err(|_| too_large())?;
        let file_size = image_size.checked_add(data_offset).ok_or_else(too_large)?;

        trace!("Writing {width}x{height} {bits_per_pixel} bpp bitmap, {file_size} bytes");

        // file header
        self.writer.write_all(b"BM")?;
        self.writer.write_all(&file_size.to_le_bytes())?;
        self.writer.write_all(&0_u32.to_le_bytes())?;
        self.writer.write_all(&data_offset.to_le_bytes())?;
        // info header
        self.writer.write_all(&INFO_HEADER_SIZE.to_le_bytes())?;
        self.writer.write_all(&w.to_le_bytes())?;
        self.writer.write_all(&h.to_le_bytes())?;
        self.writer.write_all(&1_u16.to_le_bytes())?;
        self.writer.write_all(&(bits_per_pixel as u16).to_le_bytes())?;
        self.writer.write_all(&0_u32.to_le_bytes())?;
        self.writer.write_all(&image_size.to_le_bytes())?;
        self.writer.write_all(&PIXELS_PER_METRE.to_le_bytes())?;
        self.writer.write_all(&PIXELS_PER_METRE.to_le_bytes())?;

        let colors_used: u32 = if palette_size == 0 { 0 } else { 256 };
        self.writer.write_all(&colors_used.to_le_bytes())?;
        self.writer.write_all(&0_u32.to_le_bytes())?;

        if palette_size != 0 {
            let palette: Vec<u8> = (0..=255_u8).flat_map(|v| [v, v, v, 0]).collect();
            self.writer.write_all(&palette)?;
        }

        let mut row = vec![0_u8; stride as usize];

        if width > 0 {
            for src in data.chunks_exact(width * channels).rev() {
                match colorspace {
                    ColorSpace::RGB => {
                        for (dst, pix) in row.chunks_exact_mut(3).zip(src.chunks_exact(3)) {
                            dst.copy_from_slice(&[pix[2], pix[1], pix[0]]);
                        }
                    }
                    ColorSpace::RGBA => {
                        for (dst, pix) in row.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
                            dst.copy_from_slice(&[pix[2], pix[1], pix[0], pix[3]]);
                        }
                    }
                    _ => row[..src.len()].copy_from_slice(src)
                }
                self.writer.write_all(&row)?;
            }
        }
        Ok(file_size as usize)
    }
}
