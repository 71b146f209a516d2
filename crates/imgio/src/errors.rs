/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Errors possible during image loading and saving
use std::fmt::{Debug, Display, Formatter};
use std::io;
use std::path::PathBuf;

use imgio_bmp::{BmpDecoderErrors, BmpEncodeErrors};
use imgio_pnm::{PnmDecodeErrors, PnmEncodeErrors};
use imgio_ps::PsEncodeErrors;

use crate::codecs::ImageFormat;

/// All possible image errors that can occur.
pub enum ImageErrors {
    /// A file could not be opened, `intent` is either
    /// `"for reading"` or `"for writing"`
    OpenError {
        path:   PathBuf,
        intent: &'static str,
        source: io::Error
    },
    /// The stream failed before producing any data
    StreamNotReadable(io::Error),
    /// The stream ended before an image started
    EofBeforeImage,
    /// The first byte doesn't belong to any format the library
    /// was compiled with
    UnsupportedImageType(u8),
    PnmDecode(PnmDecodeErrors),
    BmpDecode(BmpDecoderErrors),
    JpegDecode(String),
    TiffDecode(String),
    /// The format can only be written
    ImageDecoderNotImplemented(ImageFormat),
    EncodeErrors(ImgEncodeErrors),
    /// Number of pixels doesn't match the dimensions, (expected, found)
    DimensionsMisMatch(usize, usize),
    IoErrors(io::Error)
}

/// Errors that may occur during encoding
pub enum ImgEncodeErrors {
    Pnm(PnmEncodeErrors),
    Bmp(BmpEncodeErrors),
    Ps(PsEncodeErrors),
    /// Errors from external encoders
    ImageEncodeErrors(String),
    Generic(String)
}

impl Debug for ImageErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OpenError {
                path,
                intent,
                source
            } => {
                writeln!(
                    f,
                    "Could not open {} {intent}: {source} (os error {:?})",
                    path.display(),
                    source.raw_os_error()
                )
            }
            Self::StreamNotReadable(err) => {
                writeln!(f, "Stream could not be read: {err}")
            }
            Self::EofBeforeImage => {
                writeln!(f, "End of stream encountered before an image")
            }
            Self::UnsupportedImageType(byte) => {
                writeln!(f, "Unsupported image type, first byte is {byte:#04x}")
            }
            Self::PnmDecode(err) => writeln!(f, "pnm: {err:?}"),
            Self::BmpDecode(err) => writeln!(f, "bmp: {err:?}"),
            Self::JpegDecode(err) => writeln!(f, "jpeg: {err}"),
            Self::TiffDecode(err) => writeln!(f, "tiff: {err}"),
            Self::ImageDecoderNotImplemented(format) => {
                writeln!(f, "A decoder for {format:?} is not implemented")
            }
            Self::EncodeErrors(err) => writeln!(f, "Encoding failed: {err:?}"),
            Self::DimensionsMisMatch(expected, found) => {
                writeln!(
                    f,
                    "Dimensions mismatch, expected {expected} pixels but found {found}"
                )
            }
            Self::IoErrors(err) => writeln!(f, "I/O error: {err}")
        }
    }
}

impl Display for ImageErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl std::error::Error for ImageErrors {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::OpenError { source, .. } => Some(source),
            Self::StreamNotReadable(err) | Self::IoErrors(err) => Some(err),
            Self::PnmDecode(err) => Some(err),
            Self::BmpDecode(err) => Some(err),
            Self::EncodeErrors(err) => Some(err),
            _ => None
        }
    }
}

impl Debug for ImgEncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pnm(err) => writeln!(f, "pnm: {err:?}"),
            Self::Bmp(err) => writeln!(f, "bmp: {err:?}"),
            Self::Ps(err) => writeln!(f, "ps: {err:?}"),
            Self::ImageEncodeErrors(err) => writeln!(f, "{err}"),
            Self::Generic(err) => writeln!(f, "{err}")
        }
    }
}

impl Display for ImgEncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl std::error::Error for ImgEncodeErrors {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Pnm(err) => Some(err),
            Self::Bmp(err) => Some(err),
            Self::Ps(err) => Some(err),
            _ => None
        }
    }
}

impl From<io::Error> for ImageErrors {
    fn from(value: io::Error) -> Self {
        ImageErrors::IoErrors(value)
    }
}

impl From<ImgEncodeErrors> for ImageErrors {
    fn from(value: ImgEncodeErrors) -> Self {
        ImageErrors::EncodeErrors(value)
    }
}

impl From<PnmDecodeErrors> for ImageErrors {
    fn from(value: PnmDecodeErrors) -> Self {
        ImageErrors::PnmDecode(value)
    }
}

impl From<BmpDecoderErrors> for ImageErrors {
    fn from(value: BmpDecoderErrors) -> Self {
        ImageErrors::BmpDecode(value)
    }
}

impl From<PnmEncodeErrors> for ImageErrors {
    fn from(value: PnmEncodeErrors) -> Self {
        ImageErrors::EncodeErrors(ImgEncodeErrors::Pnm(value))
    }
}

impl From<BmpEncodeErrors> for ImageErrors {
    fn from(value: BmpEncodeErrors) -> Self {
        ImageErrors::EncodeErrors(ImgEncodeErrors::Bmp(value))
    }
}

impl From<PsEncodeErrors> for ImageErrors {
    fn from(value: PsEncodeErrors) -> Self {
        ImageErrors::EncodeErrors(ImgEncodeErrors::Ps(value))
    }
}
