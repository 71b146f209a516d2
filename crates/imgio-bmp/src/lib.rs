/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! A Windows bitmap decoder and encoder
//!
//! # Supported formats
//! - Decoding: paletted images (1, 4 and 8 bits), 16 and 32 bit images with or
//!   without bitfield masks, 24 bit images, bottom-up and top-down row order
//! - Encoding: 8 bit grayscale (with a gray palette), 24 bit RGB and 32 bit RGBA
//!
//! # Unsupported formats
//! - RLE compressed images
//! - Embedded PNG and JPEGs
pub use crate::decoder::{probe_bmp, BmpDecoder};
pub use crate::encoder::BmpEncoder;
pub use crate::errors::{BmpDecoderErrors, BmpEncodeErrors};

mod common;
mod decoder;
mod encoder;
mod errors;
