/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Pixel types images can be loaded into and saved from
//!
//! A pixel is made of one or more components of the same [`Component`] type,
//! laid out in a [`ColorSpace`]. Channel values travel between pixels and codecs
//! as 16 bit numbers spanning the full `0..=65535` range, each component type
//! scales to and from that range.
//!
//! Downstream crates can implement [`Pixel`] and [`Component`] for their own types.
use rgb::{RGB, RGBA};
use zune_core::colorspace::ColorSpace;

/// Static description of a pixel type
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct PixelTraits {
    /// Number of components in a pixel
    pub components: usize,
    /// Whether the component type is an integer
    pub integral:   bool,
    /// Number of significant bits in a component
    pub bits_used:  u32
}

/// A single channel value
pub trait Component: Copy + Default + 'static {
    const INTEGRAL: bool;
    const BITS_USED: u32;

    /// Scale to the full 16 bit range
    fn to_u16(self) -> u16;
    /// Scale from the full 16 bit range
    fn from_u16(value: u16) -> Self;
}

impl Component for u8 {
    const INTEGRAL: bool = true;
    const BITS_USED: u32 = 8;

    fn to_u16(self) -> u16 {
        u16::from(self) * 257
    }
    fn from_u16(value: u16) -> Self {
        ((u32::from(value) + 128) / 257) as u8
    }
}

impl Component for u16 {
    const INTEGRAL: bool = true;
    const BITS_USED: u32 = 16;

    fn to_u16(self) -> u16 {
        self
    }
    fn from_u16(value: u16) -> Self {
        value
    }
}

/// Floats are expected to be in `[0.0, 1.0]`, values outside are clamped
impl Component for f32 {
    const INTEGRAL: bool = false;
    const BITS_USED: u32 = 24;

    fn to_u16(self) -> u16 {
        (self.clamp(0.0, 1.0) * 65535.0 + 0.5) as u16
    }
    fn from_u16(value: u16) -> Self {
        f32::from(value) / 65535.0
    }
}

/// A pixel type
pub trait Pixel: Copy + Default + 'static {
    type Component: Component;

    /// Layout of the components
    const COLORSPACE: ColorSpace;
    /// Number of components, must match `COLORSPACE`
    const CHANNELS: usize;

    const TRAITS: PixelTraits = PixelTraits {
        components: Self::CHANNELS,
        integral:   <Self::Component as Component>::INTEGRAL,
        bits_used:  <Self::Component as Component>::BITS_USED
    };

    /// Build a pixel from 16 bit channel values laid out in `COLORSPACE`
    fn from_channels(channels: &[u16]) -> Self;

    /// Write 16 bit channel values laid out in `COLORSPACE` into `out`
    fn write_channels(&self, out: &mut [u16]);
}

/// Return the static description of `P`
pub const fn pixel_traits<P: Pixel>() -> PixelTraits {
    P::TRAITS
}

macro_rules! gray_pixel {
    ($($ty:ty),*) => {
        $(
            impl Pixel for $ty {
                type Component = $ty;

                const COLORSPACE: ColorSpace = ColorSpace::Luma;
                const CHANNELS: usize = 1;

                fn from_channels(channels: &[u16]) -> Self {
                    <$ty>::from_u16(channels[0])
                }

                fn write_channels(&self, out: &mut [u16]) {
                    out[0] = self.to_u16();
                }
            }
        )*
    };
}

gray_pixel!(u8, u16, f32);

impl<T: Component> Pixel for RGB<T> {
    type Component = T;

    const COLORSPACE: ColorSpace = ColorSpace::RGB;
    const CHANNELS: usize = 3;

    fn from_channels(channels: &[u16]) -> Self {
        RGB::new(
            T::from_u16(channels[0]),
            T::from_u16(channels[1]),
            T::from_u16(channels[2])
        )
    }

    fn write_channels(&self, out: &mut [u16]) {
        out[0] = self.r.to_u16();
        out[1] = self.g.to_u16();
        out[2] = self.b.to_u16();
    }
}

impl<T: Component> Pixel for RGBA<T> {
    type Component = T;

    const COLORSPACE: ColorSpace = ColorSpace::RGBA;
    const CHANNELS: usize = 4;

    fn from_channels(channels: &[u16]) -> Self {
        RGBA::new(
            T::from_u16(channels[0]),
            T::from_u16(channels[1]),
            T::from_u16(channels[2]),
            T::from_u16(channels[3])
        )
    }

    fn write_channels(&self, out: &mut [u16]) {
        out[0] = self.r.to_u16();
        out[1] = self.g.to_u16();
        out[2] = self.b.to_u16();
        out[3] = self.a.to_u16();
    }
}

#[cfg(test)]
mod tests {
    use rgb::{RGB, RGBA};

    use super::{pixel_traits, Component, PixelTraits};

    #[test]
    fn u8_scaling_is_lossless() {
        for v in 0..=255_u8 {
            assert_eq!(u8::from_u16(v.to_u16()), v);
        }
        assert_eq!(255_u8.to_u16(), u16::MAX);
    }

    #[test]
    fn float_clamps() {
        assert_eq!(2.0_f32.to_u16(), u16::MAX);
        assert_eq!((-1.0_f32).to_u16(), 0);
        assert_eq!(f32::from_u16(u16::MAX), 1.0);
    }

    #[test]
    fn descriptors() {
        assert_eq!(
            pixel_traits::<u8>(),
            PixelTraits {
                components: 1,
                integral:   true,
                bits_used:  8
            }
        );
        assert_eq!(pixel_traits::<RGB<u16>>().components, 3);
        assert!(!pixel_traits::<RGBA<f32>>().integral);
        assert_eq!(pixel_traits::<f32>().bits_used, 24);
    }
}
