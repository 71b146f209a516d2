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

/// Errors that can occur when decoding a PNM file
pub enum PnmDecodeErrors {
    /// The first two bytes were not `P` followed by a digit between 1 and 7
    InvalidMagicBytes([u8; 2]),
    Generic(String),
    GenericStatic(&'static str),
    InvalidHeader(String),
    /// A dimension exceeded the configured limit, (limit, found)
    LargeDimensions(usize, usize),
    /// A sample was larger than the maximum value declared in the header, (max, found)
    SampleOutOfRange(u16, usize),
    /// A size calculation overflowed
    OverFlowOccurred,
    IoErrors(io::Error)
}

impl Debug for PnmDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidMagicBytes(magic) => {
                writeln!(
                    f,
                    "Invalid magic bytes {:?}, expected P1 to P7",
                    String::from_utf8_lossy(magic)
                )
            }
            Self::Generic(val) => writeln!(f, "{val}"),
            Self::GenericStatic(val) => writeln!(f, "{val}"),
            Self::InvalidHeader(val) => {
                writeln!(f, "Invalid header, reason: {val}")
            }
            Self::LargeDimensions(expected, found) => {
                writeln!(
                    f,
                    "Too large dimensions, expected a value less than {expected} but found {found}"
                )
            }
            Self::SampleOutOfRange(max, found) => {
                writeln!(f, "Sample {found} exceeds the maximum value {max}")
            }
            Self::OverFlowOccurred => writeln!(f, "Overflow occurred"),
            Self::IoErrors(err) => writeln!(f, "{err}")
        }
    }
}

impl Display for PnmDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl std::error::Error for PnmDecodeErrors {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::IoErrors(err) => Some(err),
            _ => None
        }
    }
}

impl From<io::Error> for PnmDecodeErrors {
    fn from(err: io::Error) -> Self {
        PnmDecodeErrors::IoErrors(err)
    }
}

/// Errors occurring during encoding
pub enum PnmEncodeErrors {
    Static(&'static str),
    /// The colorspace has no anymap representation
    UnsupportedColorspace(ColorSpace),
    /// Data length did not match the dimensions, (expected, found)
    MismatchedLength(usize, usize),
    IOErrors(io::Error)
}

impl Debug for PnmEncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PnmEncodeErrors::Static(errors) => writeln!(f, "{errors}"),
            PnmEncodeErrors::UnsupportedColorspace(colorspace) => {
                writeln!(f, "Colorspace {colorspace:?} cannot be stored in a PNM file")
            }
            PnmEncodeErrors::MismatchedLength(expected, found) => {
                writeln!(
                    f,
                    "Data length does not match image dimensions, expected {expected} but found {found}"
                )
            }
            PnmEncodeErrors::IOErrors(err) => writeln!(f, "{err}")
        }
    }
}

impl Display for PnmEncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl std::error::Error for PnmEncodeErrors {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::IOErrors(err) => Some(err),
            _ => None
        }
    }
}

impl From<io::Error> for PnmEncodeErrors {
    fn from(err: io::Error) -> Self {
        PnmEncodeErrors::IOErrors(err)
    }
}
