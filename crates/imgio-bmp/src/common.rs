/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

/// Size of the `BM` file header
pub(crate) const FILE_HEADER_SIZE: u32 = 14;
/// Size of a BITMAPINFOHEADER
pub(crate) const INFO_HEADER_SIZE: u32 = 40;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BmpCompression {
    RGB,
    RLE8,
    RLE4,
    BITFIELDS
}

impl BmpCompression {
    pub fn from_u32(num: u32) -> Option<BmpCompression> {
        match num {
            0 => Some(BmpCompression::RGB),
            1 => Some(BmpCompression::RLE8),
            2 => Some(BmpCompression::RLE4),
            3 => Some(BmpCompression::BITFIELDS),
            _ => None
        }
    }
}

/// A single palette entry
#[derive(Clone, Copy, Default, Debug, Eq, PartialEq)]
pub(crate) struct PaletteEntry {
    pub red:   u8,
    pub green: u8,
    pub blue:  u8
}

impl PaletteEntry {
    pub const fn is_gray(&self) -> bool {
        self.red == self.green && self.green == self.blue
    }
}

/// A color mask as found in 16 and 32 bit images
#[derive(Clone, Copy, Default, Debug)]
pub(crate) struct BitField {
    mask:  u32,
    shift: u32,
    max:   u64
}

impl BitField {
    pub fn new(mask: u32) -> BitField {
        if mask == 0 {
            return BitField::default();
        }
        let shift = mask.trailing_zeros();
        let bits = (mask >> shift).trailing_ones();

        BitField {
            mask,
            shift,
            max: (1_u64 << bits) - 1
        }
    }

    pub const fn is_present(&self) -> bool {
        self.mask != 0
    }

    /// Extract the masked value and scale it to the 8 bit range
    pub fn extract(&self, pixel: u32) -> u8 {
        if self.max == 0 {
            return 0;
        }
        let value = (u64::from(pixel & self.mask) >> self.shift).min(self.max);

        ((value * 255 + self.max / 2) / self.max) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::BitField;

    #[test]
    fn five_bit_fields_scale_to_full_range() {
        let red = BitField::new(0x7C00);

        assert_eq!(red.extract(0x7C00), 255);
        assert_eq!(red.extract(0x0000), 0);
        assert_eq!(red.extract(0x4000), 132);
    }

    #[test]
    fn empty_mask_yields_zero() {
        let alpha = BitField::new(0);

        assert!(!alpha.is_present());
        assert_eq!(alpha.extract(u32::MAX), 0);
    }
}
