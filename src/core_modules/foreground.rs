// THEORY:
// `ForegroundSource` is the seam between the pixel storage layers and the blob
// search. The expander and the scan driver only need three things from their input:
// its dimensions and a bounds-checked foreground test. Colour images answer the
// test with "not pure black", evaluated directly on the source samples; binary
// masks answer it with their stored bit. Both go through the same search code.

use crate::core_modules::binary_mask::BinaryMask;
use crate::core_modules::pixel_buffer::Image;
use crate::error::Result;

pub trait ForegroundSource {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Fails with `OutOfBounds` for coordinates outside the source.
    fn is_foreground(&self, x: i32, y: i32) -> Result<bool>;

    fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}

impl ForegroundSource for Image {
    fn width(&self) -> u32 {
        Image::width(self)
    }

    fn height(&self) -> u32 {
        Image::height(self)
    }

    fn is_foreground(&self, x: i32, y: i32) -> Result<bool> {
        Ok(self.get(x, y)?.is_foreground())
    }
}

impl ForegroundSource for BinaryMask {
    fn width(&self) -> u32 {
        BinaryMask::width(self)
    }

    fn height(&self) -> u32 {
        BinaryMask::height(self)
    }

    fn is_foreground(&self, x: i32, y: i32) -> Result<bool> {
        self.get(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_modules::pixel::pixel::Pixel;

    #[test]
    fn image_and_mask_agree() {
        let mut image = Image::filled(4, 4, Pixel::black());
        image.set(1, 2, Pixel::new(0, 40, 0, 255)).unwrap();
        let mask = BinaryMask::from_image(&image);

        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(
                    image.is_foreground(x, y).unwrap(),
                    mask.is_foreground(x, y).unwrap()
                );
            }
        }
    }

    #[test]
    fn foreground_test_is_bounds_checked() {
        let image = Image::filled(2, 2, Pixel::white());
        assert!(image.is_foreground(2, 0).is_err());
        assert!(ForegroundSource::is_empty(&Image::filled(0, 5, Pixel::white())));
    }
}
