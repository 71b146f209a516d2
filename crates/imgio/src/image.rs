/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The in-memory image representation
use std::slice::ChunksExact;

use crate::errors::ImageErrors;

/// An owned two dimensional grid of pixels
///
/// Pixels are stored in row major order, the first pixel being the top left.
/// Decoders resize the image to fit what they read, so an image
/// to load into can start out empty via [`Image::default`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Image<P> {
    width:  usize,
    height: usize,
    pixels: Vec<P>
}

impl<P: Copy + Default> Image<P> {
    /// Create an image filled with the default pixel
    pub fn new(width: usize, height: usize) -> Image<P> {
        Image {
            width,
            height,
            pixels: vec![P::default(); width * height]
        }
    }

    /// Create an image from a function called with the `(x, y)`
    /// coordinate of every pixel
    ///
    /// # Example
    /// ```
    /// use imgio::Image;
    /// // horizontal gradient
    /// let image = Image::<u8>::from_fn(256, 10, |x, _| x as u8);
    /// assert_eq!(image.get(255, 3), Some(&255));
    /// ```
    pub fn from_fn<F>(width: usize, height: usize, mut func: F) -> Image<P>
    where
        F: FnMut(usize, usize) -> P
    {
        let mut pixels = Vec::with_capacity(width * height);

        for y in 0..height {
            for x in 0..width {
                pixels.push(func(x, y));
            }
        }
        Image {
            width,
            height,
            pixels
        }
    }

    /// Create an image from row major pixels
    ///
    /// Returns an error if the number of pixels isn't `width * height`
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<P>) -> Result<Image<P>, ImageErrors> {
        let expected = width.saturating_mul(height);

        if expected != pixels.len() {
            return Err(ImageErrors::DimensionsMisMatch(expected, pixels.len()));
        }
        Ok(Image {
            width,
            height,
            pixels
        })
    }

    /// Return the image dimensions as `(width, height)`
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn pixels(&self) -> &[P] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [P] {
        &mut self.pixels
    }

    pub fn into_pixels(self) -> Vec<P> {
        self.pixels
    }

    /// Iterate over rows from top to bottom
    pub fn rows(&self) -> ChunksExact<'_, P> {
        // chunks_exact panics on zero
        self.pixels.chunks_exact(self.width.max(1))
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&P> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(y * self.width + x)
    }

    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut P> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get_mut(y * self.width + x)
    }

    /// Set a pixel, returning false if `(x, y)` lies outside the image
    pub fn set(&mut self, x: usize, y: usize, pixel: P) -> bool {
        match self.get_mut(x, y) {
            Some(p) => {
                *p = pixel;
                true
            }
            None => false
        }
    }

    /// Change the dimensions of the image
    ///
    /// Pixel contents after a resize are unspecified
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.pixels.resize(width * height, P::default());
    }
}

#[cfg(test)]
mod tests {
    use super::Image;
    use crate::errors::ImageErrors;

    #[test]
    fn from_fn_is_row_major() {
        let image = Image::from_fn(3, 2, |x, y| (y * 3 + x) as u8);

        assert_eq!(image.pixels(), &[0, 1, 2, 3, 4, 5]);
        assert_eq!(image.rows().nth(1), Some(&[3_u8, 4, 5][..]));
        assert_eq!(image.get(2, 1), Some(&5));
        assert_eq!(image.get(3, 0), None);
    }

    #[test]
    fn from_pixels_checks_length() {
        let result = Image::from_pixels(2, 2, vec![0_u8; 3]);
        assert!(matches!(result, Err(ImageErrors::DimensionsMisMatch(4, 3))));
    }

    #[test]
    fn resize() {
        let mut image = Image::<u16>::default();
        image.resize(4, 5);

        assert_eq!(image.dimensions(), (4, 5));
        assert_eq!(image.pixels().len(), 20);
        assert!(image.set(3, 4, 7));
        assert!(!image.set(4, 4, 7));
    }
}
