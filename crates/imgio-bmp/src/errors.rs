/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fmt::{Debug, Display, Formatter};
use std::io;

use zune_core::colorspace::ColorSpace;

/// BMP errors that can occur during decoding
#[non_exhaustive]
pub enum BmpDecoderErrors {
    /// The file/bytes do not start with `BM`
    InvalidMagicBytes,
    /// Generic message
    GenericStatic(&'static str),
    /// Generic allocated message
    Generic(String),
    /// Too large dimensions for a given width or
    /// height
    TooLargeDimensions(&'static str, usize, usize),
    /// A calculation overflowed
    OverFlowOccurred,
    IoErrors(io::Error)
}

impl Debug for BmpDecoderErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidMagicBytes => {
                writeln!(f, "Invalid magic bytes, file does not start with BM")
            }
            Self::GenericStatic(header) => writeln!(f, "{}", header),
            Self::TooLargeDimensions(dimension, expected, found) => {
                writeln!(
                    f,
                    "Too large dimensions for {dimension} , {found} exceeds {expected}"
                )
            }
            Self::Generic(message) => writeln!(f, "{}", message),
            Self::OverFlowOccurred => writeln!(f, "Overflow occurred"),
            Self::IoErrors(err) => writeln!(f, "{:?}", err)
        }
    }
}

impl Display for BmpDecoderErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl std::error::Error for BmpDecoderErrors {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::IoErrors(err) => Some(err),
            _ => None
        }
    }
}

impl From<io::Error> for BmpDecoderErrors {
    fn from(value: io::Error) -> Self {
        BmpDecoderErrors::IoErrors(value)
    }
}

/// BMP errors that can occur during encoding
pub enum BmpEncodeErrors {
    /// The colorspace cannot be represented
    UnsupportedColorspace(ColorSpace),
    /// Data length did not match the dimensions, (expected, found)
    MismatchedLength(usize, usize),
    /// The image is too large to be described by BMP headers
    TooLargeDimensions(usize, usize),
    IoErrors(io::Error)
}

impl Debug for BmpEncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedColorspace(colorspace) => {
                writeln!(f, "Colorspace {colorspace:?} cannot be stored in a BMP file")
            }
            Self::MismatchedLength(expected, found) => {
                writeln!(
                    f,
                    "Data length does not match image dimensions, expected {expected} but found {found}"
                )
            }
            Self::TooLargeDimensions(width, height) => {
                writeln!(f, "Dimensions {width}x{height} too large for BMP")
            }
            Self::IoErrors(err) => writeln!(f, "{err}")
        }
    }
}

impl Display for BmpEncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl std::error::Error for BmpEncodeErrors {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::IoErrors(err) => Some(err),
            _ => None
        }
    }
}

impl From<io::Error> for BmpEncodeErrors {
    fn from(value: io::Error) -> Self {
        BmpEncodeErrors::IoErrors(value)
    }
}
