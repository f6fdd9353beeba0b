// THEORY:
// A `BinaryMask` is a `PixelBuffer<bool>`: one bit of foreground/background state
// per pixel, laid out exactly like the colour image it was derived from. `true` is
// foreground (white), `false` is background (black).
//
// Masks always own their samples. Deriving a mask from an image copies the
// foreground test into a new buffer; inverting produces a new mask and leaves the
// receiver untouched. The same shape is used for the transient visited-set of the
// blob expander.

use crate::core_modules::pixel::pixel::Pixel;
use crate::core_modules::pixel_buffer::{Image, PixelBuffer};

pub type BinaryMask = PixelBuffer<bool>;

impl BinaryMask {
    /// An all-background mask with the given dimensions.
    pub fn empty(width: u32, height: u32) -> Self {
        Self::filled(width, height, false)
    }

    /// Foreground wherever the image is not pure black.
    pub fn from_image(image: &Image) -> Self {
        image.map(|pixel| pixel.is_foreground())
    }

    pub fn invert(&self) -> Self {
        self.map(|value| !value)
    }

    /// Renders the mask as an opaque black and white image.
    pub fn to_image(&self) -> Image {
        self.map(|value| if value { Pixel::white() } else { Pixel::black() })
    }

    pub fn count_foreground(&self) -> usize {
        self.pixels().iter().filter(|&&value| value).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_image() -> Image {
        let mut image = Image::filled(3, 2, Pixel::black());
        image.set(0, 0, Pixel::new(12, 0, 0, 255)).unwrap();
        image.set(2, 1, Pixel::new(0, 0, 1, 0)).unwrap();
        image.set(1, 1, Pixel::new(0, 0, 0, 200)).unwrap();
        image
    }

    #[test]
    fn foreground_is_anything_not_pure_black() {
        let mask = BinaryMask::from_image(&sample_image());
        assert!(mask.get(0, 0).unwrap());
        assert!(mask.get(2, 1).unwrap());
        assert!(!mask.get(1, 1).unwrap());
        assert!(!mask.get(1, 0).unwrap());
        assert_eq!(mask.count_foreground(), 2);
    }

    #[test]
    fn mask_is_a_copy_of_the_image_state() {
        let mut image = sample_image();
        let mask = BinaryMask::from_image(&image);
        image.set(1, 0, Pixel::white()).unwrap();
        assert!(!mask.get(1, 0).unwrap());
    }

    #[test]
    fn invert_flips_every_value_without_mutating() {
        let mask = BinaryMask::from_image(&sample_image());
        let inverted = mask.invert();
        for y in 0..2 {
            for x in 0..3 {
                assert_ne!(mask.get(x, y).unwrap(), inverted.get(x, y).unwrap());
            }
        }
        assert_eq!(mask.count_foreground(), 2);
        assert_eq!(inverted.count_foreground(), 4);
    }

    #[test]
    fn to_image_paints_white_on_black() {
        let mask = BinaryMask::from_image(&sample_image());
        let image = mask.to_image();
        assert_eq!(image.get(0, 0).unwrap(), Pixel::white());
        assert_eq!(image.get(1, 0).unwrap(), Pixel::black());
        assert_eq!(BinaryMask::from_image(&image), mask);
    }
}
