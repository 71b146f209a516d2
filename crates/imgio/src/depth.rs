/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Choosing between 8 and 16 bit output for formats that support both
use zune_core::bit_depth::BitDepth;

use crate::pixel::{Pixel, PixelTraits};

/// Whether a pixel type should be written with 16 bit samples
///
/// Multi component pixels always prefer 16 bits, single component
/// pixels only when they carry more than 8 significant bits.
pub const fn prefers_high_depth(traits: PixelTraits) -> bool {
    traits.components > 1 || traits.bits_used > 8
}

/// The depth PNM and TIFF encoders write `P` with
pub const fn default_depth<P: Pixel>() -> BitDepth {
    if prefers_high_depth(P::TRAITS) {
        BitDepth::Sixteen
    } else {
        BitDepth::Eight
    }
}
