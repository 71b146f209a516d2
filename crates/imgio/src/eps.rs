/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Helpers for building EPS figures around a PostScript image
//!
//! ```no_run
//! use std::io::Write;
//! use imgio::{write_eps_footer, write_eps_header_for, Image, ImageFormat};
//!
//! fn main() -> Result<(), imgio::ImageErrors> {
//!     let image = Image::<u8>::from_fn(64, 64, |x, y| (x ^ y) as u8);
//!     let mut figure = std::fs::File::create("figure.eps")?;
//!
//!     write_eps_header_for(&mut figure, &image)?;
//!     image.encode(ImageFormat::PS, &mut figure)?;
//!     // annotate pixel centres
//!     writeln!(figure, ".5 .5 translate 1 0 0 setrgbcolor 10 10 moveto 50 50 lineto stroke")?;
//!     write_eps_footer(&mut figure)?;
//!     Ok(())
//! }
//! ```
use std::io::{self, Write};

pub use imgio_ps::{write_eps_footer, write_eps_header};

use crate::image::Image;

/// Anything with a size an EPS header can be written for
pub trait Dimensions {
    /// Return `(width, height)`
    fn dimensions(&self) -> (usize, usize);
}

impl Dimensions for (usize, usize) {
    fn dimensions(&self) -> (usize, usize) {
        *self
    }
}

impl<P: Copy + Default> Dimensions for Image<P> {
    fn dimensions(&self) -> (usize, usize) {
        Image::dimensions(self)
    }
}

/// Write an EPS header sized for `item`, an image or a `(width, height)` pair
pub fn write_eps_header_for<W: Write, D: Dimensions + ?Sized>(writer: &mut W, item: &D) -> io::Result<()> {
    let (width, height) = item.dimensions();
    write_eps_header(writer, width, height)
}
