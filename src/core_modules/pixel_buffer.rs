// THEORY:
// The `PixelBuffer` is the storage layer shared by colour images and binary masks.
// It owns a flat, row-major vector of samples whose rows are stored bottom to top
// (storage row 0 is the bottom image row), which is the layout camera textures
// arrive in. Every caller, however, addresses pixels with a top-left origin.
//
// Key architectural principles:
// 1.  **One Mapping**: `index_of` is the only place that translates a top-left
//     `(x, y)` into a storage index (`width * (height - y - 1) + x`). Nothing else
//     does index arithmetic on the raw vector.
// 2.  **Fail Fast**: Out-of-range coordinates are a defect in the caller's scan or
//     neighbour logic, so accessors return `BlobError::OutOfBounds` instead of
//     clamping.
// 3.  **Fixed Shape**: `pixels.len() == width * height` is checked on construction
//     and the dimensions are never mutated afterwards.

use crate::core_modules::pixel::pixel::{CHANNELS, Pixel};
use crate::error::{BlobError, Result};

/// Flat, bottom-to-top row-major storage of per-pixel values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer<T> {
    width: u32,
    height: u32,
    pixels: Vec<T>,
}

/// A colour frame. The blob engine only ever reads it.
pub type Image = PixelBuffer<Pixel>;

impl<T: Copy> PixelBuffer<T> {
    /// Wraps an existing bottom-to-top sample vector.
    pub fn from_raw(width: u32, height: u32, pixels: Vec<T>) -> Result<Self> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(BlobError::BufferSizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Creates a buffer with every sample set to `value`.
    pub fn filled(width: u32, height: u32, value: T) -> Self {
        Self {
            width,
            height,
            pixels: vec![value; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// The raw samples in storage order (bottom row first).
    pub fn pixels(&self) -> &[T] {
        &self.pixels
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as i64) < self.width as i64 && (y as i64) < self.height as i64
    }

    /// Maps a top-left origin coordinate onto the bottom-to-top storage index.
    pub fn index_of(&self, x: i32, y: i32) -> Result<usize> {
        if !self.contains(x, y) {
            return Err(BlobError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        let skip_rows = self.height as usize - y as usize - 1;
        Ok(self.width as usize * skip_rows + x as usize)
    }

    pub fn get(&self, x: i32, y: i32) -> Result<T> {
        let index = self.index_of(x, y)?;
        Ok(self.pixels[index])
    }

    pub fn set(&mut self, x: i32, y: i32, value: T) -> Result<()> {
        let index = self.index_of(x, y)?;
        self.pixels[index] = value;
        Ok(())
    }

    /// Builds a new buffer of the same shape by mapping every sample.
    pub fn map<U: Copy>(&self, f: impl Fn(T) -> U) -> PixelBuffer<U> {
        PixelBuffer {
            width: self.width,
            height: self.height,
            pixels: self.pixels.iter().map(|&sample| f(sample)).collect(),
        }
    }

    pub(crate) fn same_shape<U>(&self, other: &PixelBuffer<U>) -> Result<()> {
        if self.width != other.width || self.height != other.height {
            return Err(BlobError::DimensionMismatch {
                expected_width: self.width,
                expected_height: self.height,
                width: other.width,
                height: other.height,
            });
        }
        Ok(())
    }
}

impl Image {
    /// Builds an image from a top-to-bottom RGBA8 byte buffer, the layout most
    /// camera and decoder APIs hand out.
    pub fn from_rgba_bytes(width: u32, height: u32, bytes: &[u8]) -> Result<Self> {
        let expected = width as usize * height as usize * CHANNELS;
        if bytes.len() != expected {
            return Err(BlobError::BufferSizeMismatch {
                expected,
                actual: bytes.len(),
            });
        }
        if expected == 0 {
            return Self::from_raw(width, height, Vec::new());
        }

        let row_bytes = width as usize * CHANNELS;
        let pixels = bytes
            .chunks_exact(row_bytes)
            .rev()
            .flat_map(|row| row.chunks_exact(CHANNELS))
            .map(|px| Pixel::new(px[0], px[1], px[2], px[3]))
            .collect();
        Self::from_raw(width, height, pixels)
    }

    pub fn from_rgba_image(image: &image::RgbaImage) -> Result<Self> {
        Self::from_rgba_bytes(image.width(), image.height(), image.as_raw())
    }

    /// Converts back into a top-to-bottom `image::RgbaImage`.
    pub fn to_rgba_image(&self) -> Result<image::RgbaImage> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * CHANNELS);
        if !self.pixels.is_empty() {
            for row in self.pixels.chunks_exact(self.width as usize).rev() {
                for pixel in row {
                    bytes.extend_from_slice(&[pixel.red, pixel.green, pixel.blue, pixel.alpha]);
                }
            }
        }
        let actual = bytes.len();
        image::RgbaImage::from_raw(self.width, self.height, bytes).ok_or(
            BlobError::BufferSizeMismatch {
                expected: self.pixels.len() * CHANNELS,
                actual,
            },
        )
    }
}
