/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::io::{self, BufRead};

use log::trace;
use zune_core::bit_depth::BitDepth;
use zune_core::colorspace::ColorSpace;
use zune_core::options::DecoderOptions;

use crate::errors::PnmDecodeErrors;
use crate::PnmVersion;

/// Longest header keyword or tuple type we are willing to buffer
const MAX_TOKEN_LENGTH: usize = 64;

/// Decoded samples
///
/// Images with a maximum value above 255 are returned as [`PnmSamples::U16`],
/// everything else as [`PnmSamples::U8`]. Samples are interleaved in the
/// order of the image colorspace.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PnmSamples {
    U8(Vec<u8>),
    U16(Vec<u16>)
}

impl PnmSamples {
    pub fn len(&self) -> usize {
        match self {
            PnmSamples::U8(data) => data.len(),
            PnmSamples::U16(data) => data.len()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An instance of a PNM decoder
///
/// # Example
/// ```
/// use imgio_pnm::{PnmDecoder, PnmSamples};
///
/// let mut decoder = PnmDecoder::new(&b"P5 2 1 255 \x00\xff"[..]);
/// let pixels = decoder.decode().unwrap();
///
/// assert_eq!(decoder.dimensions(), Some((2, 1)));
/// assert_eq!(pixels, PnmSamples::U8(vec![0, 255]));
/// ```
pub struct PnmDecoder<R: BufRead> {
    reader:          R,
    options:         DecoderOptions,
    version:         PnmVersion,
    width:           usize,
    height:          usize,
    max_value:       u16,
    colorspace:      ColorSpace,
    bit_depth:       BitDepth,
    decoded_headers: bool
}

impl<R: BufRead> PnmDecoder<R> {
    /// Create a new decoder with default options
    pub fn new(reader: R) -> PnmDecoder<R> {
        PnmDecoder::new_with_options(reader, DecoderOptions::default())
    }

    /// Create a new decoder that respects the limits in `options`
    pub fn new_with_options(reader: R, options: DecoderOptions) -> PnmDecoder<R> {
        PnmDecoder {
            reader,
            options,
            version: PnmVersion::P5,
            width: 0,
            height: 0,
            max_value: 255,
            colorspace: ColorSpace::Unknown,
            bit_depth: BitDepth::Eight,
            decoded_headers: false
        }
    }

    /// Read the image header and store the information in the decoder
    ///
    /// Calling this more than once is a no-op.
    pub fn decode_headers(&mut self) -> Result<(), PnmDecodeErrors> {
        if self.decoded_headers {
            return Ok(());
        }
        let mut magic = [0_u8; 2];
        self.reader.read_exact(&mut magic)?;

        if magic[0] != b'P' {
            return Err(PnmDecodeErrors::InvalidMagicBytes(magic));
        }
        self.version =
            PnmVersion::from_digit(magic[1]).ok_or(PnmDecodeErrors::InvalidMagicBytes(magic))?;

        if self.version == PnmVersion::P7 {
            self.decode_pam_header()?;
        } else {
            self.decode_pnm_header()?;
        }
        self.check_dimensions()?;

        self.bit_depth = if self.max_value > 255 {
            BitDepth::Sixteen
        } else {
            BitDepth::Eight
        };

        trace!("Version: {}", self.version);
        trace!("Width: {}, height: {}", self.width, self.height);
        trace!("Colorspace: {:?}", self.colorspace);
        trace!("Max value: {}", self.max_value);

        self.decoded_headers = true;
        Ok(())
    }

    /// Header for P1 to P6, whitespace separated width, height and (except bitmaps) maximum value
    fn decode_pnm_header(&mut self) -> Result<(), PnmDecodeErrors> {
        self.colorspace = match self.version {
            PnmVersion::P3 | PnmVersion::P6 => ColorSpace::RGB,
            _ => ColorSpace::Luma
        };
        self.width = read_integer(&mut self.reader)?;
        self.height = read_integer(&mut self.reader)?;

        self.max_value = if self.version.is_bitmap() {
            1
        } else {
            read_max_value(&mut self.reader)?
        };

        if !self.version.is_ascii() {
            // a single whitespace separates the header from the raster
            match read_byte(&mut self.reader)? {
                Some(byte) if byte.is_ascii_whitespace() => {}
                Some(byte) => {
                    let msg = format!(
                        "Expected whitespace after the header but found '{}'",
                        byte as char
                    );
                    return Err(PnmDecodeErrors::InvalidHeader(msg));
                }
                None => {
                    return Err(PnmDecodeErrors::GenericStatic(
                        "Stream ended before the image data"
                    ))
                }
            }
        }
        Ok(())
    }

    fn decode_pam_header(&mut self) -> Result<(), PnmDecodeErrors> {
        let mut width = None;
        let mut height = None;
        let mut depth = None;
        let mut max_value = None;
        let mut tuple_type = None;

        loop {
            skip_spaces(&mut self.reader)?;

            let token = read_token(&mut self.reader)?;

            match token.as_slice() {
                b"WIDTH" => width = Some(read_integer(&mut self.reader)?),
                b"HEIGHT" => height = Some(read_integer(&mut self.reader)?),
                b"DEPTH" => depth = Some(read_integer(&mut self.reader)?),
                b"MAXVAL" => max_value = Some(read_max_value(&mut self.reader)?),
                b"TUPLTYPE" => {
                    skip_spaces(&mut self.reader)?;
                    tuple_type = Some(read_token(&mut self.reader)?);
                }
                b"ENDHDR" => {
                    // the raster starts on the line after ENDHDR
                    while let Some(byte) = read_byte(&mut self.reader)? {
                        if byte == b'\n' {
                            break;
                        }
                    }
                    break;
                }
                b"" => return Err(PnmDecodeErrors::GenericStatic("No more bytes")),
                _ => {
                    let msg = format!(
                        "Unknown/unsupported header declaration {}",
                        String::from_utf8_lossy(&token)
                    );
                    return Err(PnmDecodeErrors::InvalidHeader(msg));
                }
            }
        }
        let (Some(width), Some(height), Some(depth), Some(max_value)) =
            (width, height, depth, max_value)
        else {
            return Err(PnmDecodeErrors::GenericStatic(
                "Not all expected headers were found"
            ));
        };

        let colorspace = match tuple_type.as_deref() {
            Some(b"GRAYSCALE") | Some(b"BLACKANDWHITE") => ColorSpace::Luma,
            Some(b"GRAYSCALE_ALPHA") | Some(b"BLACKANDWHITE_ALPHA") => ColorSpace::LumaA,
            Some(b"RGB") => ColorSpace::RGB,
            Some(b"RGB_ALPHA") => ColorSpace::RGBA,
            Some(other) => {
                let msg = format!(
                    "Unknown/unsupported tuple type {}",
                    String::from_utf8_lossy(other)
                );
                return Err(PnmDecodeErrors::InvalidHeader(msg));
            }
            None => match depth {
                1 => ColorSpace::Luma,
                2 => ColorSpace::LumaA,
                3 => ColorSpace::RGB,
                4 => ColorSpace::RGBA,
                _ => {
                    let msg = format!("Depth {depth} is not between 1 and 4");
                    return Err(PnmDecodeErrors::InvalidHeader(msg));
                }
            }
        };
        if colorspace.num_components() != depth {
            let msg = format!("Depth {depth} does not match tuple type {colorspace:?}");
            return Err(PnmDecodeErrors::InvalidHeader(msg));
        }

        self.width = width;
        self.height = height;
        self.max_value = max_value;
        self.colorspace = colorspace;

        Ok(())
    }

    fn check_dimensions(&self) -> Result<(), PnmDecodeErrors> {
        if self.width == 0 || self.height == 0 {
            let msg = format!("Invalid dimensions {}x{}", self.width, self.height);
            return Err(PnmDecodeErrors::InvalidHeader(msg));
        }
        if self.width > self.options.max_width() {
            return Err(PnmDecodeErrors::LargeDimensions(
                self.options.max_width(),
                self.width
            ));
        }
        if self.height > self.options.max_height() {
            return Err(PnmDecodeErrors::LargeDimensions(
                self.options.max_height(),
                self.height
            ));
        }
        Ok(())
    }

    /// Return image dimensions or none if headers aren't decoded
    pub const fn dimensions(&self) -> Option<(usize, usize)> {
        if self.decoded_headers {
            Some((self.width, self.height))
        } else {
            None
        }
    }

    /// Return the image colorspace or none if headers aren't decoded
    pub const fn colorspace(&self) -> Option<ColorSpace> {
        if self.decoded_headers {
            Some(self.colorspace)
        } else {
            None
        }
    }

    /// Return the depth of the decoded samples or none if headers aren't decoded
    pub const fn bit_depth(&self) -> Option<BitDepth> {
        if self.decoded_headers {
            Some(self.bit_depth)
        } else {
            None
        }
    }

    /// Return the anymap variant or none if headers aren't decoded
    pub const fn version(&self) -> Option<PnmVersion> {
        if self.decoded_headers {
            Some(self.version)
        } else {
            None
        }
    }

    /// Return the maximum sample value declared in the header
    pub const fn max_value(&self) -> Option<u16> {
        if self.decoded_headers {
            Some(self.max_value)
        } else {
            None
        }
    }

    /// Return the underlying reader, positioned after the last byte of the image
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Decode the image returning its samples
    ///
    /// Bitmaps (P1, P4) are expanded to 8 bit grayscale with black as 0 and white as 255.
    pub fn decode(&mut self) -> Result<PnmSamples, PnmDecodeErrors> {
        self.decode_headers()?;

        let size = self
            .width
            .checked_mul(self.height)
            .and_then(|x| x.checked_mul(self.colorspace.num_components()))
            .ok_or(PnmDecodeErrors::OverFlowOccurred)?;

        match self.version {
            PnmVersion::P1 => self.decode_ascii_bitmap(size),
            PnmVersion::P4 => self.decode_binary_bitmap(),
            PnmVersion::P2 | PnmVersion::P3 => self.decode_ascii(size),
            PnmVersion::P5 | PnmVersion::P6 | PnmVersion::P7 => self.decode_binary(size)
        }
    }

    fn decode_ascii_bitmap(&mut self, size: usize) -> Result<PnmSamples, PnmDecodeErrors> {
        let mut pixels = Vec::with_capacity(size);

        for _ in 0..size {
            skip_spaces(&mut self.reader)?;

            match read_byte(&mut self.reader)? {
                Some(b'0') => pixels.push(255),
                Some(b'1') => pixels.push(0),
                Some(byte) => {
                    let msg = format!("Invalid bitmap value '{}'", byte as char);
                    return Err(PnmDecodeErrors::Generic(msg));
                }
                None => {
                    return Err(PnmDecodeErrors::GenericStatic(
                        "Stream ended before all pixels were read"
                    ))
                }
            }
        }
        Ok(PnmSamples::U8(pixels))
    }

    fn decode_binary_bitmap(&mut self) -> Result<PnmSamples, PnmDecodeErrors> {
        // rows are padded to a whole byte
        let stride = self.width.div_ceil(8);
        let mut row = vec![0_u8; stride];
        let mut pixels = Vec::with_capacity(self.width * self.height);

        for _ in 0..self.height {
            self.reader.read_exact(&mut row)?;

            for x in 0..self.width {
                let bit = (row[x / 8] >> (7 - (x % 8))) & 1;
                pixels.push(if bit == 1 { 0 } else { 255 });
            }
        }
        Ok(PnmSamples::U8(pixels))
    }

    fn decode_ascii(&mut self, size: usize) -> Result<PnmSamples, PnmDecodeErrors> {
        let mut samples = Vec::with_capacity(size);

        for _ in 0..size {
            let value = read_integer(&mut self.reader)?;

            if value > usize::from(self.max_value) {
                return Err(PnmDecodeErrors::SampleOutOfRange(self.max_value, value));
            }
            samples.push(value as u16);
        }

        if self.bit_depth == BitDepth::Sixteen {
            rescale_u16(&mut samples, self.max_value);
            Ok(PnmSamples::U16(samples))
        } else {
            let mut data = samples.into_iter().map(|x| x as u8).collect::<Vec<u8>>();
            rescale_u8(&mut data, self.max_value);
            Ok(PnmSamples::U8(data))
        }
    }

    fn decode_binary(&mut self, size: usize) -> Result<PnmSamples, PnmDecodeErrors> {
        if self.bit_depth == BitDepth::Sixteen {
            let mut bytes = vec![0_u8; size.checked_mul(2).ok_or(PnmDecodeErrors::OverFlowOccurred)?];
            self.reader.read_exact(&mut bytes)?;

            // 16 bit samples are big endian
            let mut data = bytes
                .chunks_exact(2)
                .map(|x| u16::from_be_bytes([x[0], x[1]]))
                .collect::<Vec<u16>>();

            rescale_u16(&mut data, self.max_value);
            Ok(PnmSamples::U16(data))
        } else {
            let mut data = vec![0_u8; size];
            self.reader.read_exact(&mut data)?;

            rescale_u8(&mut data, self.max_value);
            Ok(PnmSamples::U8(data))
        }
    }
}

/// Stretch samples with a maximum below 255 to the full 8 bit range
fn rescale_u8(data: &mut [u8], max_value: u16) {
    if max_value == 255 {
        return;
    }
    let max = u32::from(max_value);

    for sample in data.iter_mut() {
        let value = u32::from(*sample).min(max);
        *sample = ((value * 255 + max / 2) / max) as u8;
    }
}

/// Stretch samples with a maximum below 65535 to the full 16 bit range
fn rescale_u16(data: &mut [u16], max_value: u16) {
    if max_value == u16::MAX {
        return;
    }
    let max = u64::from(max_value);

    for sample in data.iter_mut() {
        let value = u64::from(*sample).min(max);
        *sample = ((value * 65535 + max / 2) / max) as u16;
    }
}

fn peek_byte<R: BufRead>(reader: &mut R) -> Result<Option<u8>, PnmDecodeErrors> {
    loop {
        match reader.fill_buf() {
            Ok(buf) => return Ok(buf.first().copied()),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(PnmDecodeErrors::IoErrors(e))
        }
    }
}

fn read_byte<R: BufRead>(reader: &mut R) -> Result<Option<u8>, PnmDecodeErrors> {
    let byte = peek_byte(reader)?;

    if byte.is_some() {
        reader.consume(1);
    }
    Ok(byte)
}

/// Skip all whitespace characters and comments
/// until one hits a character that isn't a space or
/// we reach eof
fn skip_spaces<R: BufRead>(reader: &mut R) -> Result<(), PnmDecodeErrors> {
    while let Some(byte) = peek_byte(reader)? {
        if byte == b'#' {
            // skip the whole comment
            while let Some(byte) = read_byte(reader)? {
                if byte == b'\n' || byte == b'\r' {
                    break;
                }
            }
        } else if byte.is_ascii_whitespace() {
            reader.consume(1);
        } else {
            break;
        }
    }
    Ok(())
}

fn read_integer<R: BufRead>(reader: &mut R) -> Result<usize, PnmDecodeErrors> {
    skip_spaces(reader)?;

    let mut value = 0_usize;
    let mut digits = 0;

    while let Some(byte) = peek_byte(reader)? {
        if !byte.is_ascii_digit() {
            break;
        }
        value = value
            .checked_mul(10)
            .and_then(|x| x.checked_add(usize::from(byte - b'0')))
            .ok_or(PnmDecodeErrors::OverFlowOccurred)?;

        digits += 1;
        reader.consume(1);
    }
    if digits == 0 {
        return match peek_byte(reader)? {
            Some(byte) => {
                let msg = format!("Expected a number but found '{}'", byte as char);
                Err(PnmDecodeErrors::InvalidHeader(msg))
            }
            None => Err(PnmDecodeErrors::GenericStatic(
                "Stream ended while reading a number"
            ))
        };
    }
    Ok(value)
}

fn read_max_value<R: BufRead>(reader: &mut R) -> Result<u16, PnmDecodeErrors> {
    let max_value = read_integer(reader)?;

    if max_value == 0 || max_value > usize::from(u16::MAX) {
        let msg = format!("MAX value {max_value} is not between 1 and 65535");
        return Err(PnmDecodeErrors::InvalidHeader(msg));
    }
    Ok(max_value as u16)
}

/// Return all bytes preceding a whitespace, without consuming the whitespace
fn read_token<R: BufRead>(reader: &mut R) -> Result<Vec<u8>, PnmDecodeErrors> {
    let mut token = Vec::new();

    while let Some(byte) = peek_byte(reader)? {
        if byte.is_ascii_whitespace() {
            break;
        }
        if token.len() == MAX_TOKEN_LENGTH {
            return Err(PnmDecodeErrors::GenericStatic("Header token too long"));
        }
        token.push(byte);
        reader.consume(1);
    }
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rescale_maps_max_value_to_full_range() {
        let mut data = [0, 1, 3];
        rescale_u8(&mut data, 3);
        assert_eq!(data, [0, 85, 255]);

        let mut wide = [0, 512, 1023];
        rescale_u16(&mut wide, 1023);
        assert_eq!(wide, [0, 32800, 65535]);
    }

    #[test]
    fn comments_are_skipped_between_numbers() {
        let mut reader = &b"# a comment\n  12 # trailing\n34"[..];
        assert_eq!(read_integer(&mut reader).unwrap(), 12);
        assert_eq!(read_integer(&mut reader).unwrap(), 34);
    }

    #[test]
    fn read_integer_rejects_garbage() {
        let mut reader = &b"  x"[..];
        assert!(matches!(
            read_integer(&mut reader),
            Err(PnmDecodeErrors::InvalidHeader(_))
        ));
    }
}
