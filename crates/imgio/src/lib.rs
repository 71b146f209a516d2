/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Generic image file input and output
//!
//! The library detects the format of a stream from its first byte, decodes it and
//! converts the pixels into whatever pixel type the destination [`Image`] holds.
//! Saving goes the other way, either to an explicit [`ImageFormat`] or to one inferred
//! from a file name.
//!
//! # Example
//! ```no_run
//! use imgio::{Image, ImageFormat};
//! use rgb::RGB;
//!
//! fn main() -> Result<(), imgio::ImageErrors> {
//!     // whatever the file stores, it's loaded as 8 bit RGB
//!     let image = Image::<RGB<u8>>::open("input.bmp")?;
//!     // saved as a 16 bit P6 file
//!     image.save("output.ppm")?;
//!     // and as a BMP, whatever the name says
//!     image.save_to("output.img", ImageFormat::BMP)?;
//!     Ok(())
//! }
//! ```
//!
//! # Features
//! - `jpeg`: JPEG decoding and encoding, enabled by default
//! - `tiff`: TIFF decoding and encoding, enabled by default
pub use zune_core;

pub use crate::codecs::{
    load, load_path, load_with_options, pnm_load, pnm_save, save, save_path, save_to_path,
    sniff, ImageFormat
};
pub use crate::convert::{RawImage, Samples};
pub use crate::depth::{default_depth, prefers_high_depth};
pub use crate::eps::{write_eps_footer, write_eps_header, write_eps_header_for, Dimensions};
pub use crate::errors::{ImageErrors, ImgEncodeErrors};
pub use crate::image::Image;
pub use crate::pixel::{pixel_traits, Component, Pixel, PixelTraits};

pub mod codecs;
mod convert;
mod depth;
mod eps;
pub mod errors;
mod image;
mod pixel;
pub mod traits;
