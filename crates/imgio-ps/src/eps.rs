/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::io::{self, Write};

/// Write an EPS header for a figure of `width` x `height` pixels
///
/// The header flips the y axis so that pixel `(x, y)` maps to document
/// position `(x, y)` with the origin at the top left.
///
/// Typical use is to write the header, a PostScript image body, any
/// annotations and finally the footer from [`write_eps_footer`].
pub fn write_eps_header<W: Write>(writer: &mut W, width: usize, height: usize) -> io::Result<()> {
    write!(
        writer,
        "%!PS-Adobe-3.0 EPSF-3.0\n\
         %%Creator: imgio\n\
         %%BoundingBox: 0 0 {width} {height}\n\
         %%LanguageLevel: 2\n\
         %%EndComments\n\
         gsave\n\
         0 {height} translate\n\
         1 -1 scale\n"
    )
}

/// Write the footer closing a document started with [`write_eps_header`]
pub fn write_eps_footer<W: Write>(writer: &mut W) -> io::Result<()> {
    writer.write_all(b"grestore\nshowpage\n%%EOF\n")
}
