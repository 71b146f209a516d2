/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! A portable anymap decoder and encoder
//!
//! # Supported formats
//! - Decoding: `P1` to `P6` (ascii and binary bitmaps, graymaps and pixmaps) and `P7` (PAM)
//!   with any maximum value up to 65535
//! - Encoding: `P5`, `P6` and `P7` at 8 or 16 bits per sample
//!
//! Samples whose maximum value is not 255 or 65535 are rescaled to the full
//! 8 or 16 bit range during decoding.
//!
//! The decoder reads from any [`BufRead`](std::io::BufRead) and consumes exactly
//! the bytes belonging to one image, so several images can be stored back to back
//! in one stream.
pub use crate::decoder::{PnmDecoder, PnmSamples};
pub use crate::encoder::{version_for_colorspace, PnmEncoder};
pub use crate::errors::{PnmDecodeErrors, PnmEncodeErrors};

mod decoder;
mod encoder;
mod errors;

/// The different anymap variants, identified by the digit after the `P` magic byte
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PnmVersion {
    /// ASCII bitmap
    P1,
    /// ASCII graymap
    P2,
    /// ASCII pixmap
    P3,
    /// Binary bitmap
    P4,
    /// Binary graymap
    P5,
    /// Binary pixmap
    P6,
    /// Portable arbitrary map
    P7
}

impl PnmVersion {
    pub fn from_digit(digit: u8) -> Option<PnmVersion> {
        match digit {
            b'1' => Some(PnmVersion::P1),
            b'2' => Some(PnmVersion::P2),
            b'3' => Some(PnmVersion::P3),
            b'4' => Some(PnmVersion::P4),
            b'5' => Some(PnmVersion::P5),
            b'6' => Some(PnmVersion::P6),
            b'7' => Some(PnmVersion::P7),
            _ => None
        }
    }

    /// Whether samples are stored as ascii decimal numbers
    pub const fn is_ascii(self) -> bool {
        matches!(self, PnmVersion::P1 | PnmVersion::P2 | PnmVersion::P3)
    }

    /// Whether the format stores one bit per pixel
    pub const fn is_bitmap(self) -> bool {
        matches!(self, PnmVersion::P1 | PnmVersion::P4)
    }
}

impl std::fmt::Display for PnmVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let digit = match self {
            Self::P1 => 1,
            Self::P2 => 2,
            Self::P3 => 3,
            Self::P4 => 4,
            Self::P5 => 5,
            Self::P6 => 6,
            Self::P7 => 7
        };
        write!(f, "P{digit}")
    }
}
