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

use crate::{write_eps_footer, write_eps_header, Ascii85Writer, PsEncodeErrors};

/// Writes a bare PostScript image body
///
/// The body draws the raster in the current coordinate system, one unit
/// per pixel, first row at `y = 0`. It saves and restores the graphics state
/// around itself.
pub struct PsEncoder<'a, W: Write> {
    writer: &'a mut W
}

impl<'a, W: Write> PsEncoder<'a, W> {
    pub fn new(writer: &'a mut W) -> PsEncoder<'a, W> {
        PsEncoder { writer }
    }

    /// Encode interleaved 8 bit `Luma` or `RGB` samples
    pub fn encode(
        &mut self, width: usize, height: usize, colorspace: ColorSpace, data: &[u8]
    ) -> Result<(), PsEncodeErrors> {
        let (device, decode) = match colorspace {
            ColorSpace::Luma => ("/DeviceGray", "[0 1]"),
            ColorSpace::RGB => ("/DeviceRGB", "[0 1 0 1 0 1]"),
            _ => return Err(PsEncodeErrors::UnsupportedColorspace(colorspace))
        };
        let expected = width
            .saturating_mul(height)
            .saturating_mul(colorspace.num_components());

        if expected != data.len() {
            return Err(PsEncodeErrors::MismatchedLength(expected, data.len()));
        }
        trace!("Writing {width}x{height} {colorspace:?} PostScript image");

        write!(
            self.writer,
            "gsave\n\
             {device} setcolorspace\n\
             <<\n\
             /ImageType 1\n\
             /Width {width}\n\
             /Height {height}\n\
             /BitsPerComponent 8\n\
             /Decode {decode}\n\
             /ImageMatrix [1 0 0 1 0 0]\n\
             /DataSource currentfile /ASCII85Decode filter\n\
             >>\n\
             image\n"
        )?;

        let mut ascii = Ascii85Writer::new(&mut *self.writer);
        ascii.write_all(data)?;
        ascii.finish()?;

        self.writer.write_all(b"grestore\n")?;
        Ok(())
    }
}

/// Writes a complete Encapsulated PostScript figure
///
/// This is the EPS header, the PostScript body and the EPS footer
pub struct EpsEncoder<'a, W: Write> {
    writer: &'a mut W
}

impl<'a, W: Write> EpsEncoder<'a, W> {
    pub fn new(writer: &'a mut W) -> EpsEncoder<'a, W> {
        EpsEncoder { writer }
    }

    /// Encode interleaved 8 bit `Luma` or `RGB` samples
    pub fn encode(
        &mut self, width: usize, height: usize, colorspace: ColorSpace, data: &[u8]
    ) -> Result<(), PsEncodeErrors> {
        write_eps_header(self.writer, width, height)?;
        PsEncoder::new(self.writer).encode(width, height, colorspace, data)?;
        write_eps_footer(self.writer)?;
        Ok(())
    }
}
