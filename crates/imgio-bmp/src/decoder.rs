/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

// BMP has been extended multiple times, the decoder understands the following
// layouts.
//
// - WinBMPv2 (OS/2 core header): 12 byte info header, 16 bit dimensions and a
//   BGR palette of 2^bpp entries.
// - WinBMPv3: 40 byte info header, BGR0 palette of `colors_used` entries
//   (or 2^bpp when zero), BITFIELDS masks follow the header for 16/32 bpp.
// - WinBMPv4/v5: 108/124 byte headers carry the masks inside the header.
//
// A positive height means rows are stored bottom-up, negative top-down.
// 32 bpp images without masks are treated as BGRA, unless every alpha byte is
// zero in which case the image is treated as opaque.

use std::io::{self, Read};

use log::{trace, warn};
use zune_core::colorspace::ColorSpace;
use zune_core::options::DecoderOptions;

use crate::common::{BitField, BmpCompression, PaletteEntry, FILE_HEADER_SIZE};
use crate::BmpDecoderErrors;

/// Probe some bytes to see
/// if they consist of a BMP image
pub fn probe_bmp(bytes: &[u8]) -> bool {
    if let Some(magic_bytes) = bytes.get(0..2) {
        if magic_bytes == b"BM" {
            // skip file_size   -> 4
            // skip reserved    -> 4
            // skip data offset -> 4
            // read sz
            if let Some(sz) = bytes.get(14) {
                return matches!(*sz, 12 | 40 | 52 | 56 | 64 | 108 | 124);
            }
        }
    }
    false
}

/// A BMP decoder.
///
/// The decoder reads from any [`Read`] implementation and outputs
/// 8 bit pixels in `Luma`, `RGB` or `RGBA` layout, rows ordered top to bottom.
///
/// ```no_run
/// use imgio_bmp::BmpDecoder;
///
/// fn main() -> Result<(), imgio_bmp::BmpDecoderErrors> {
///     let file = std::fs::File::open("image.bmp")?;
///     let mut decoder = BmpDecoder::new(std::io::BufReader::new(file));
///     let pixels = decoder.decode()?;
///     let (w, h) = decoder.dimensions().unwrap();
///     println!("{w}x{h} {:?} -> {} bytes", decoder.colorspace(), pixels.len());
///     Ok(())
/// }
/// ```
pub struct BmpDecoder<R: Read> {
    reader:          R,
    options:         DecoderOptions,
    width:           usize,
    height:          usize,
    flip_vertically: bool,
    depth:           u16,
    comp:            BmpCompression,
    bitfields:       [BitField; 4],
    palette:         Vec<PaletteEntry>,
    data_offset:     u32,
    position:        usize,
    colorspace:      ColorSpace,
    decoded_headers: bool
}

impl<R: Read> BmpDecoder<R> {
    /// Create a new bmp decoder that reads data from
    /// `reader`
    pub fn new(reader: R) -> BmpDecoder<R> {
        BmpDecoder::new_with_options(reader, DecoderOptions::default())
    }

    /// Create a new decoder instance with specified options
    pub fn new_with_options(reader: R, options: DecoderOptions) -> BmpDecoder<R> {
        BmpDecoder {
            reader,
            options,
            width: 0,
            height: 0,
            flip_vertically: false,
            depth: 0,
            comp: BmpCompression::RGB,
            bitfields: [BitField::default(); 4],
            palette: vec![],
            data_offset: 0,
            position: 0,
            colorspace: ColorSpace::Unknown,
            decoded_headers: false
        }
    }

    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<(), BmpDecoderErrors> {
        self.reader.read_exact(buf)?;
        self.position += buf.len();
        Ok(())
    }

    fn read_u16(&mut self) -> Result<u16, BmpDecoderErrors> {
        let mut buf = [0; 2];
        self.read_bytes(&mut buf)?;
        Ok(u16::from_le_bytes(buf))
    }

    fn read_u32(&mut self) -> Result<u32, BmpDecoderErrors> {
        let mut buf = [0; 4];
        self.read_bytes(&mut buf)?;
        Ok(u32::from_le_bytes(buf))
    }

    /// Decode headers stored in the bmp file and store
    /// information in the decode context
    ///
    /// After calling this, most information fields will be filled
    /// except the actual decoding bytes
    pub fn decode_headers(&mut self) -> Result<(), BmpDecoderErrors> {
        if self.decoded_headers {
            return Ok(());
        }
        let mut magic = [0; 2];
        self.read_bytes(&mut magic)?;

        if &magic != b"BM" {
            return Err(BmpDecoderErrors::InvalidMagicBytes);
        }
        // file size and reserved bytes
        let _ = self.read_u32()?;
        let _ = self.read_u32()?;

        self.data_offset = self.read_u32()?;

        let ihsize = self.read_u32()?;

        let (width, height, palette_entry_size, colors_used);

        match ihsize {
            12 => {
                width = i64::from(self.read_u16()?);
                height = i64::from(self.read_u16()?);

                if self.read_u16()? != 1 {
                    return Err(BmpDecoderErrors::GenericStatic("Invalid number of planes"));
                }
                self.depth = self.read_u16()?;
                self.comp = BmpCompression::RGB;
                palette_entry_size = 3;
                colors_used = 0;
            }
            40 | 52 | 56 | 64 | 108 | 124 => {
                width = i64::from(self.read_u32()? as i32);
                height = i64::from(self.read_u32()? as i32);

                if self.read_u16()? != 1 {
                    return Err(BmpDecoderErrors::GenericStatic("Invalid number of planes"));
                }
                self.depth = self.read_u16()?;

                let compression = self.read_u32()?;

                self.comp = BmpCompression::from_u32(compression).ok_or_else(|| {
                    BmpDecoderErrors::Generic(format!("Unsupported compression {compression}"))
                })?;
                // image size, x and y resolution
                let _ = self.read_u32()?;
                let _ = self.read_u32()?;
                let _ = self.read_u32()?;

                colors_used = self.read_u32()?;
                // important colors
                let _ = self.read_u32()?;

                palette_entry_size = 4;

                let mut extra = vec![0; (ihsize - 40) as usize];
                self.read_bytes(&mut extra)?;

                if self.comp == BmpCompression::BITFIELDS {
                    let mut masks = [0_u32; 4];

                    if ihsize == 40 {
                        masks[0] = self.read_u32()?;
                        masks[1] = self.read_u32()?;
                        masks[2] = self.read_u32()?;
                    } else {
                        for (mask, chunk) in masks.iter_mut().zip(extra.chunks_exact(4)) {
                            *mask = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
                        }
                    }
                    for (field, mask) in self.bitfields.iter_mut().zip(masks) {
                        *field = BitField::new(mask);
                    }
                }
            }
            _ => {
                return Err(BmpDecoderErrors::GenericStatic(
                    "Unknown information header size"
                ));
            }
        }

        if width <= 0 {
            return Err(BmpDecoderErrors::GenericStatic(
                "Width is zero or negative, invalid image"
            ));
        }
        if height == 0 {
            return Err(BmpDecoderErrors::GenericStatic(
                "Height is zero, invalid image"
            ));
        }
        self.flip_vertically = height > 0;
        self.width = width as usize;
        self.height = height.unsigned_abs() as usize;

        if self.height > self.options.max_height() {
            return Err(BmpDecoderErrors::TooLargeDimensions(
                "height",
                self.options.max_height(),
                self.height
            ));
        }
        if self.width > self.options.max_width() {
            return Err(BmpDecoderErrors::TooLargeDimensions(
                "width",
                self.options.max_width(),
                self.width
            ));
        }

        trace!("Width: {}", self.width);
        trace!("Height: {}", self.height);
        trace!("Bit depth: {}", self.depth);
        trace!("Compression: {:?}", self.comp);

        if matches!(self.comp, BmpCompression::RLE4 | BmpCompression::RLE8) {
            return Err(BmpDecoderErrors::GenericStatic(
                "RLE compressed bitmaps are not supported"
            ));
        }

        self.colorspace = match self.depth {
            1 | 4 | 8 => {
                let max_entries = 1_usize << self.depth;
                let entries = if colors_used == 0 {
                    max_entries
                } else {
                    colors_used as usize
                };
                if entries > 256 {
                    return Err(BmpDecoderErrors::Generic(format!(
                        "Palette has {entries} entries, more than 256"
                    )));
                }
                if entries > max_entries {
                    warn!("Palette has {entries} entries, only {max_entries} are addressable");
                }
                let mut raw = vec![0; entries * palette_entry_size];
                self.read_bytes(&mut raw)?;

                self.palette = raw
                    .chunks_exact(palette_entry_size)
                    .map(|entry| PaletteEntry {
                        blue:  entry[0],
                        green: entry[1],
                        red:   entry[2]
                    })
                    .collect();

                if self.palette.iter().all(PaletteEntry::is_gray) {
                    ColorSpace::Luma
                } else {
                    ColorSpace::RGB
                }
            }
            24 => {
                if self.comp == BmpCompression::BITFIELDS {
                    return Err(BmpDecoderErrors::GenericStatic(
                        "Bitfields are not valid for 24 bit images"
                    ));
                }
                ColorSpace::RGB
            }
            16 | 32 => {
                if self.comp == BmpCompression::RGB {
                    if self.depth == 16 {
                        self.bitfields = [
                            BitField::new(0x7C00),
                            BitField::new(0x03E0),
                            BitField::new(0x001F),
                            BitField::new(0)
                        ];
                        ColorSpace::RGB
                    } else {
                        ColorSpace::RGBA
                    }
                } else if self.bitfields[3].is_present() {
                    ColorSpace::RGBA
                } else {
                    ColorSpace::RGB
                }
            }
            depth => {
                return Err(BmpDecoderErrors::Generic(format!(
                    "Unsupported bit depth {depth}"
                )));
            }
        };
        trace!("Colorspace: {:?}", self.colorspace);

        if ihsize == 12 && self.data_offset == 0 {
            self.data_offset = self.position as u32;
        }
        if (self.data_offset as usize) < self.position
            || self.data_offset < FILE_HEADER_SIZE + ihsize
        {
            return Err(BmpDecoderErrors::GenericStatic(
                "Pixel data offset points inside the headers"
            ));
        }
        self.decoded_headers = true;
        Ok(())
    }

    /// Return the image dimensions as (width, height)
    /// or `None` if headers haven't been decoded
    pub const fn dimensions(&self) -> Option<(usize, usize)> {
        if !self.decoded_headers {
            return None;
        }
        Some((self.width, self.height))
    }

    /// Return the colorspace the decoder outputs
    /// or `None` if headers haven't been decoded
    pub const fn colorspace(&self) -> Option<ColorSpace> {
        if !self.decoded_headers {
            return None;
        }
        Some(self.colorspace)
    }

    /// Bits per pixel as stored in the file
    pub const fn bits_per_pixel(&self) -> u16 {
        self.depth
    }

    /// Return the number of bytes needed to hold the decoded image
    pub fn output_buf_size(&self) -> Option<usize> {
        self.width
            .checked_mul(self.height)?
            .checked_mul(self.colorspace.num_components())
    }

    /// Decode the image returning interleaved 8 bit pixels
    pub fn decode(&mut self) -> Result<Vec<u8>, BmpDecoderErrors> {
        self.decode_headers()?;

        let skip = (self.data_offset as usize).saturating_sub(self.position);
        if skip > 0 {
            trace!("Skipping {skip} bytes to pixel data");
            let skipped = io::copy(&mut (&mut self.reader).take(skip as u64), &mut io::sink())?;
            if skipped != skip as u64 {
                return Err(BmpDecoderErrors::GenericStatic(
                    "Stream ended before pixel data"
                ));
            }
            self.position += skip;
        }

        let channels = self.colorspace.num_components();
        let out_size = self
            .output_buf_size()
            .ok_or(BmpDecoderErrors::OverFlowOccurred)?;
        let out_stride = self.width * channels;

        let stride = (self.width * usize::from(self.depth))
            .checked_add(31)
            .ok_or(BmpDecoderErrors::OverFlowOccurred)?
            / 32
            * 4;

        let mut out = vec![0_u8; out_size];
        let mut row = vec![0_u8; stride];
        let mut saw_alpha = false;

        for row_index in 0..self.height {
            self.read_bytes(&mut row)?;

            let y = if self.flip_vertically {
                self.height - 1 - row_index
            } else {
                row_index
            };
            let dest = &mut out[y * out_stride..(y + 1) * out_stride];

            match self.depth {
                1 | 4 | 8 => self.expand_palette(&row, dest),
                24 => {
                    for (pix, src) in dest.chunks_exact_mut(3).zip(row.chunks_exact(3)) {
                        pix.copy_from_slice(&[src[2], src[1], src[0]]);
                    }
                }
                32 if self.comp == BmpCompression::RGB => {
                    for (pix, src) in dest.chunks_exact_mut(4).zip(row.chunks_exact(4)) {
                        pix.copy_from_slice(&[src[2], src[1], src[0], src[3]]);
                        saw_alpha |= src[3] != 0;
                    }
                }
                16 => {
                    for (pix, src) in dest.chunks_exact_mut(channels).zip(row.chunks_exact(2)) {
                        let value = u32::from(u16::from_le_bytes([src[0], src[1]]));
                        self.expand_bitfields(value, pix);
                    }
                }
                _ => {
                    for (pix, src) in dest.chunks_exact_mut(channels).zip(row.chunks_exact(4)) {
                        let value = u32::from_le_bytes([src[0], src[1], src[2], src[3]]);
                        self.expand_bitfields(value, pix);
                    }
                }
            }
        }

        if self.depth == 32 && self.comp == BmpCompression::RGB && !saw_alpha {
            trace!("All alpha values are zero, treating image as opaque");
            out.chunks_exact_mut(4).for_each(|pix| pix[3] = 255);
        }
        Ok(out)
    }

    fn expand_palette(&self, row: &[u8], dest: &mut [u8]) {
        let depth = usize::from(self.depth);
        let per_byte = 8 / depth;
        let mask = ((1_u16 << depth) - 1) as u8;
        let channels = self.colorspace.num_components();

        for (x, pix) in dest.chunks_exact_mut(channels).enumerate() {
            let byte = row[x / per_byte];
            let shift = 8 - depth * (x % per_byte + 1);
            let index = usize::from((byte >> shift) & mask);
            // out of range indices are drawn black
            let entry = self.palette.get(index).copied().unwrap_or_default();

            if channels == 1 {
                pix[0] = entry.red;
            } else {
                pix.copy_from_slice(&[entry.red, entry.green, entry.blue]);
            }
        }
    }

    fn expand_bitfields(&self, value: u32, pix: &mut [u8]) {
        for (out, field) in pix.iter_mut().zip(self.bitfields.iter()) {
            *out = field.extract(value);
        }
    }
}
