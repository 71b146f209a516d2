/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! A PostScript image writer
//!
//! Two outputs are supported
//!
//! - A bare PostScript image body ([`PsEncoder`]), drawing the raster in pixel units,
//!   meant to be embedded into a larger document
//! - A complete Encapsulated PostScript figure ([`EpsEncoder`])
//!
//! A figure with annotations can be made by writing [`write_eps_header`], the image body,
//! any other PostScript drawing commands and finally [`write_eps_footer`].
//!
//! After the header, pixel `(x, y)` maps to document position `(x, y)` with the origin at
//! the top left corner of pixel `(0, 0)` and the y axis growing downwards.
//! To align drawing with pixel centres, write `.5 .5 translate` after the image.
//!
//! Samples are 8 bit, encoded in ASCII85, only `Luma` and `RGB` layouts can be written.
pub use crate::ascii85::Ascii85Writer;
pub use crate::encoder::{EpsEncoder, PsEncoder};
pub use crate::eps::{write_eps_footer, write_eps_header};
pub use crate::errors::PsEncodeErrors;

mod ascii85;
mod encoder;
mod eps;
mod errors;
