/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Entry point for all supported codecs the library understands
//!
//! Loading looks at the first byte of a stream to decide on a format,
//! decodes it and converts the result into the pixel type of the
//! destination image, whatever the file stores.
//!
//! Saving converts the image into something the chosen format can store.
//! Formats that can store 8 or 16 bit samples (PNM and TIFF) pick the depth from the
//! pixel type, see [`default_depth`](crate::default_depth).
//!
//! | Format | First byte | Suffix | Decode | Encode                      |
//! |--------|------------|--------|--------|-----------------------------|
//! | PNM    | `P`        | other  | yes    | P5, P6, P7; 8 or 16 bit     |
//! | JPEG   | `0xFF`     | `jpg`  | yes    | gray or RGB, quality 95     |
//! | TIFF   | `I`        | none   | yes    | gray, RGB, RGBA; 8 or 16 bit |
//! | BMP    | `B`        | `bmp`  | yes    | gray, RGB, RGBA             |
//! | PS     |            | `ps`   | no     | gray or RGB                 |
//! | EPS    |            | `eps`  | no     | gray or RGB                 |
//!
//! JPEG and TIFF are behind the `jpeg` and `tiff` features.
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use log::{debug, trace};
use zune_core::options::DecoderOptions;

use crate::codecs::bmp::BmpDecoder;
use crate::codecs::pnm::PnmDecoder;
use crate::errors::ImageErrors;
use crate::image::Image;
use crate::pixel::Pixel;
use crate::traits::{DecoderTrait, EncoderTrait};

pub mod bmp;
pub mod jpeg;
pub mod pnm;
pub mod ps;
pub mod tiff;

/// All supported image formats
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ImageFormat {
    /// Portable anymap, PBM, PGM, PPM and PAM
    PNM,
    /// Joint Photographic Experts Group
    #[cfg(feature = "jpeg")]
    JPEG,
    /// Tagged Image File Format
    #[cfg(feature = "tiff")]
    TIFF,
    /// Windows Bitmap Files
    BMP,
    /// A bare PostScript image
    PS,
    /// Encapsulated PostScript figure
    EPS
}

impl ImageFormat {
    /// Map the first byte of a file to the format starting with it
    pub fn from_magic_byte(byte: u8) -> Option<ImageFormat> {
        match byte {
            b'P' => Some(ImageFormat::PNM),
            #[cfg(feature = "jpeg")]
            0xFF => Some(ImageFormat::JPEG),
            #[cfg(feature = "tiff")]
            b'I' => Some(ImageFormat::TIFF),
            b'B' => Some(ImageFormat::BMP),
            _ => None
        }
    }

    /// Format an extension maps to, `None` for extensions
    /// without a dedicated format
    ///
    /// Matching is case sensitive, see [`from_path_suffix`](Self::from_path_suffix)
    pub fn encoder_for_extension<P: AsRef<str>>(extension: P) -> Option<ImageFormat> {
        match extension.as_ref() {
            "jpg" => {
                #[cfg(feature = "jpeg")]
                {
                    Some(ImageFormat::JPEG)
                }
                #[cfg(not(feature = "jpeg"))]
                {
                    None
                }
            }
            "ps" => Some(ImageFormat::PS),
            "eps" => Some(ImageFormat::EPS),
            "bmp" => Some(ImageFormat::BMP),
            _ => None
        }
    }

    /// Infer the format to save `path` with from the text after its final `.`
    ///
    /// The suffix is compared case insensitively. Anything unrecognised,
    /// including no suffix at all, is PNM.
    ///
    /// ```
    /// use imgio::ImageFormat;
    ///
    /// assert_eq!(ImageFormat::from_path_suffix("figure.EPS"), ImageFormat::EPS);
    /// assert_eq!(ImageFormat::from_path_suffix("frame"), ImageFormat::PNM);
    /// assert_eq!(ImageFormat::from_path_suffix("frame."), ImageFormat::PNM);
    /// ```
    pub fn from_path_suffix<P: AsRef<Path>>(path: P) -> ImageFormat {
        let name = path.as_ref().to_string_lossy();

        let suffix = match name.rfind('.') {
            Some(pos) => name[pos + 1..].to_ascii_lowercase(),
            None => String::new()
        };
        ImageFormat::encoder_for_extension(suffix).unwrap_or(ImageFormat::PNM)
    }

    /// Return true if images of this format can be loaded
    pub const fn has_decoder(&self) -> bool {
        !matches!(self, ImageFormat::PS | ImageFormat::EPS)
    }

    pub fn decoder<'a, R>(&self, reader: R) -> Result<Box<dyn DecoderTrait + 'a>, ImageErrors>
    where
        R: BufRead + 'a
    {
        self.decoder_with_options(reader, DecoderOptions::default())
    }

    /// Create a decoder reading from `reader`
    ///
    /// PNM and BMP decode straight from the stream, JPEG and TIFF read
    /// the rest of the stream into memory first.
    pub fn decoder_with_options<'a, R>(
        &self, reader: R, options: DecoderOptions
    ) -> Result<Box<dyn DecoderTrait + 'a>, ImageErrors>
    where
        R: BufRead + 'a
    {
        match self {
            ImageFormat::PNM => Ok(Box::new(PnmDecoder::new_with_options(reader, options))),
            ImageFormat::BMP => Ok(Box::new(BmpDecoder::new_with_options(reader, options))),
            #[cfg(feature = "jpeg")]
            ImageFormat::JPEG => {
                let data = read_all(reader)?;
                Ok(Box::new(jpeg::JpegDecoder::new_with_options(data, options)))
            }
            #[cfg(feature = "tiff")]
            ImageFormat::TIFF => {
                let data = read_all(reader)?;
                Ok(Box::new(tiff::TiffDecoder::new_with_options(data, options)?))
            }
            ImageFormat::PS | ImageFormat::EPS => {
                Err(ImageErrors::ImageDecoderNotImplemented(*self))
            }
        }
    }

    /// Encode `image` in this format, returning the number of bytes written
    pub fn encode<P: Pixel, W: Write>(&self, image: &Image<P>, sink: &mut W) -> Result<usize, ImageErrors> {
        match self {
            ImageFormat::PNM => pnm::PnmEncoder::new().encode(image, sink),
            #[cfg(feature = "jpeg")]
            ImageFormat::JPEG => jpeg::JpegEncoder::new().encode(image, sink),
            #[cfg(feature = "tiff")]
            ImageFormat::TIFF => tiff::TiffEncoder::new().encode(image, sink),
            ImageFormat::BMP => bmp::BmpEncoder::new().encode(image, sink),
            ImageFormat::PS => ps::PsEncoder::new().encode(image, sink),
            ImageFormat::EPS => ps::EpsEncoder::new().encode(image, sink)
        }
    }
}

#[cfg(any(feature = "jpeg", feature = "tiff"))]
fn read_all<R: BufRead>(mut reader: R) -> Result<Vec<u8>, ImageErrors> {
    let mut data = vec![];
    reader.read_to_end(&mut data)?;
    Ok(data)
}

/// Look at the next byte of `reader` and return the format it starts
///
/// Nothing is consumed from the stream.
///
/// # Errors
/// - [`StreamNotReadable`](ImageErrors::StreamNotReadable): reading failed
/// - [`EofBeforeImage`](ImageErrors::EofBeforeImage): the stream is empty
/// - [`UnsupportedImageType`](ImageErrors::UnsupportedImageType): the byte starts
///   no format the library was compiled with
pub fn sniff<R: BufRead + ?Sized>(reader: &mut R) -> Result<ImageFormat, ImageErrors> {
    let first = loop {
        match reader.fill_buf() {
            Ok(buf) => break buf.first().copied(),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(ImageErrors::StreamNotReadable(e))
        }
    };
    let byte = first.ok_or(ImageErrors::EofBeforeImage)?;

    ImageFormat::from_magic_byte(byte).ok_or(ImageErrors::UnsupportedImageType(byte))
}

/// Load an image from a stream, resizing `image` to fit
///
/// The format is detected from the stream contents and pixels are converted
/// to `P`. On failure `image` is valid but its contents are unspecified.
///
/// ```no_run
/// use imgio::{load, Image};
/// use rgb::RGB;
///
/// let mut image = Image::<RGB<u8>>::default();
/// let mut stream = std::io::stdin().lock();
/// load(&mut image, &mut stream).unwrap();
/// ```
pub fn load<P: Pixel, R: BufRead>(image: &mut Image<P>, reader: &mut R) -> Result<(), ImageErrors> {
    load_with_options(image, reader, DecoderOptions::default())
}

/// Load an image from a stream with custom decoder options
pub fn load_with_options<P: Pixel, R: BufRead>(
    image: &mut Image<P>, reader: &mut R, options: DecoderOptions
) -> Result<(), ImageErrors> {
    let format = sniff(reader)?;
    debug!("Detected {format:?} image");

    let mut decoder = format.decoder_with_options(&mut *reader, options)?;
    trace!("Decoding with {}", decoder.name());

    let raw = decoder.decode()?;
    trace!(
        "{}: decoded {:?} {:?}",
        decoder.name(),
        decoder.dimensions(),
        decoder.out_colorspace()
    );
    raw.into_image(image);

    Ok(())
}

/// Load an image from a file
///
/// The file is closed before returning
pub fn load_path<P: Pixel, Q: AsRef<Path>>(image: &mut Image<P>, path: Q) -> Result<(), ImageErrors> {
    load(image, &mut open_for_reading(path.as_ref())?)
}

fn open_for_reading(path: &Path) -> Result<BufReader<File>, ImageErrors> {
    let file = File::open(path).map_err(|source| ImageErrors::OpenError {
        path: path.to_path_buf(),
        intent: "for reading",
        source
    })?;
    Ok(BufReader::new(file))
}

/// Kept for callers of the older name, identical to [`load`]
pub fn pnm_load<P: Pixel, R: BufRead>(image: &mut Image<P>, reader: &mut R) -> Result<(), ImageErrors> {
    load(image, reader)
}

/// Save an image to a stream in `format`
pub fn save<P: Pixel, W: Write>(image: &Image<P>, writer: &mut W, format: ImageFormat) -> Result<(), ImageErrors> {
    let written = format.encode(image, writer)?;
    trace!("Wrote {written} bytes as {format:?}");
    Ok(())
}

/// Save an image to a file in `format`
///
/// The file is created or truncated, and closed before returning
pub fn save_to_path<P: Pixel, Q: AsRef<Path>>(
    image: &Image<P>, path: Q, format: ImageFormat
) -> Result<(), ImageErrors> {
    let path = path.as_ref();
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
        .map_err(|source| ImageErrors::OpenError {
            path: path.to_path_buf(),
            intent: "for writing",
            source
        })?;
    let mut writer = BufWriter::new(file);

    save(image, &mut writer, format)?;
    writer.flush()?;

    Ok(())
}

/// Save an image to a file, the format is inferred from the path
///
/// See [`ImageFormat::from_path_suffix`]
pub fn save_path<P: Pixel, Q: AsRef<Path>>(image: &Image<P>, path: Q) -> Result<(), ImageErrors> {
    let format = ImageFormat::from_path_suffix(path.as_ref());
    save_to_path(image, path, format)
}

/// Kept for callers of the older name, saves as PNM
pub fn pnm_save<P: Pixel, W: Write>(image: &Image<P>, writer: &mut W) -> Result<(), ImageErrors> {
    save(image, writer, ImageFormat::PNM)
}

// load and save options
impl<P: Pixel> Image<P> {
    /// Open an image file of any supported format
    pub fn open<Q: AsRef<Path>>(path: Q) -> Result<Image<P>, ImageErrors> {
        let mut image = Image::default();
        load_path(&mut image, path)?;
        Ok(image)
    }

    /// Open an image file with custom decoder options
    ///
    /// ```no_run
    /// use imgio::Image;
    /// use zune_core::options::DecoderOptions;
    ///
    /// let options = DecoderOptions::default().set_max_width(100);
    /// let image = Image::<u8>::open_with_options("small.pgm", options);
    /// ```
    pub fn open_with_options<Q: AsRef<Path>>(
        path: Q, options: DecoderOptions
    ) -> Result<Image<P>, ImageErrors> {
        Self::read_with_options(&mut open_for_reading(path.as_ref())?, options)
    }

    /// Read an image of any supported format from a stream
    pub fn read<R: BufRead>(reader: &mut R) -> Result<Image<P>, ImageErrors> {
        Self::read_with_options(reader, DecoderOptions::default())
    }

    pub fn read_with_options<R: BufRead>(
        reader: &mut R, options: DecoderOptions
    ) -> Result<Image<P>, ImageErrors> {
        let mut image = Image::default();
        load_with_options(&mut image, reader, options)?;
        Ok(image)
    }

    /// Save the image, inferring the format from the extension
    pub fn save<Q: AsRef<Path>>(&self, path: Q) -> Result<(), ImageErrors> {
        save_path(self, path)
    }

    /// Save the image to a file in `format`
    pub fn save_to<Q: AsRef<Path>>(&self, path: Q, format: ImageFormat) -> Result<(), ImageErrors> {
        save_to_path(self, path, format)
    }

    /// Encode the image into `sink`, returning the number of bytes written
    pub fn encode<W: Write>(&self, format: ImageFormat, sink: &mut W) -> Result<usize, ImageErrors> {
        format.encode(self, sink)
    }

    /// Encode the image returning a vector containing the result
    pub fn write_to_vec(&self, format: ImageFormat) -> Result<Vec<u8>, ImageErrors> {
        let mut sink = vec![];
        self.encode(format, &mut sink)?;
        Ok(sink)
    }
}
