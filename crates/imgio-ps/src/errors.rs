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

/// Errors that can occur when writing PostScript
pub enum PsEncodeErrors {
    /// Only Luma and RGB can be drawn with `image`
    UnsupportedColorspace(ColorSpace),
    /// Data length did not match the dimensions, (expected, found)
    MismatchedLength(usize, usize),
    IoErrors(io::Error)
}

impl Debug for PsEncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedColorspace(colorspace) => {
                writeln!(f, "Cannot write colorspace {colorspace:?} as PostScript")
            }
            Self::MismatchedLength(expected, found) => {
                writeln!(
                    f,
                    "Data length does not match image dimensions, expected {expected} but found {found}"
                )
            }
            Self::IoErrors(err) => writeln!(f, "{err}")
        }
    }
}

impl Display for PsEncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl std::error::Error for PsEncodeErrors {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::IoErrors(err) => Some(err),
            _ => None
        }
    }
}

impl From<io::Error> for PsEncodeErrors {
    fn from(value: io::Error) -> Self {
        PsEncodeErrors::IoErrors(value)
    }
}
