/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::io::Write;

use zune_core::colorspace::ColorSpace;

use crate::errors::PnmEncodeErrors;
use crate::PnmVersion;

/// A PNM encoder
///
/// Grayscale images are written as `P5`, RGB as `P6` and
/// images carrying alpha as `P7` (PAM).
///
/// # Example
/// ```
/// use imgio_pnm::PnmEncoder;
/// use zune_core::colorspace::ColorSpace;
///
/// let mut sink = vec![];
/// PnmEncoder::new(&mut sink)
///     .encode_u8(2, 1, ColorSpace::Luma, &[0, 255])
///     .unwrap();
///
/// assert_eq!(&sink[..], b"P5\n2 1\n255\n\x00\xff");
/// ```
pub struct PnmEncoder<'a, W: Write> {
    writer: &'a mut W
}

impl<'a, W: Write> PnmEncoder<'a, W> {
    /// Create a new PNM encoder that writes to `writer`
    pub fn new(writer: &'a mut W) -> PnmEncoder<'a, W> {
        Self { writer }
    }

    fn write_headers(
        &mut self, width: usize, height: usize, colorspace: ColorSpace, max_val: u16
    ) -> Result<usize, PnmEncodeErrors> {
        let version = version_for_colorspace(colorspace)
            .ok_or(PnmEncodeErrors::UnsupportedColorspace(colorspace))?;

        let header = match version {
            PnmVersion::P7 => {
                let tuple_type = convert_tuple_type_to_pam(colorspace)
                    .ok_or(PnmEncodeErrors::UnsupportedColorspace(colorspace))?;

                format!(
                    "P7\nWIDTH {}\nHEIGHT {}\nDEPTH {}\nMAXVAL {}\nTUPLTYPE {}\nENDHDR\n",
                    width,
                    height,
                    colorspace.num_components(),
                    max_val,
                    tuple_type
                )
            }
            _ => format!("{version}\n{width} {height}\n{max_val}\n")
        };
        self.writer.write_all(header.as_bytes())?;

        Ok(header.len())
    }

    fn check_length(
        width: usize, height: usize, colorspace: ColorSpace, found: usize
    ) -> Result<(), PnmEncodeErrors> {
        let expected = width
            .checked_mul(height)
            .and_then(|x| x.checked_mul(colorspace.num_components()))
            .ok_or(PnmEncodeErrors::Static("Image dimensions overflow"))?;

        if expected != found {
            return Err(PnmEncodeErrors::MismatchedLength(expected, found));
        }
        Ok(())
    }

    /// Encode `data` as an 8 bit image, returning the number of bytes written
    pub fn encode_u8(
        &mut self, width: usize, height: usize, colorspace: ColorSpace, data: &[u8]
    ) -> Result<usize, PnmEncodeErrors> {
        Self::check_length(width, height, colorspace, data.len())?;

        let header_size = self.write_headers(width, height, colorspace, 255)?;
        self.writer.write_all(data)?;

        Ok(header_size + data.len())
    }

    /// Encode `data` as a 16 bit image, returning the number of bytes written
    pub fn encode_u16(
        &mut self, width: usize, height: usize, colorspace: ColorSpace, data: &[u16]
    ) -> Result<usize, PnmEncodeErrors> {
        Self::check_length(width, height, colorspace, data.len())?;

        let header_size = self.write_headers(width, height, colorspace, u16::MAX)?;

        // netpbm stores 16 bit samples as big endian
        let owned_data = data
            .iter()
            .flat_map(|x| x.to_be_bytes())
            .collect::<Vec<u8>>();

        self.writer.write_all(&owned_data)?;

        Ok(header_size + owned_data.len())
    }
}

/// Return the anymap variant used to store `colorspace`, if any
pub fn version_for_colorspace(colorspace: ColorSpace) -> Option<PnmVersion> {
    match colorspace {
        ColorSpace::Luma => Some(PnmVersion::P5),
        ColorSpace::RGB => Some(PnmVersion::P6),
        ColorSpace::RGBA | ColorSpace::LumaA => Some(PnmVersion::P7),
        _ => None
    }
}

fn convert_tuple_type_to_pam(colorspace: ColorSpace) -> Option<&'static str> {
    match colorspace {
        ColorSpace::Luma => Some("GRAYSCALE"),
        ColorSpace::RGB => Some("RGB"),
        ColorSpace::LumaA => Some("GRAYSCALE_ALPHA"),
        ColorSpace::RGBA => Some("RGB_ALPHA"),
        _ => None
    }
}
