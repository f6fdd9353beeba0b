// THEORY:
// The `Pixel` module is the most fundamental unit of the blob engine. It is a
// "dumb" data container for a single RGBA sample as delivered by the upstream
// camera/filter stage.
//
// Key architectural principles:
// 1.  **Single Colour Interpretation**: The blob layers only ever ask one question
//     of a pixel: "is it pure black?". Upstream filters (threshold, colour distance,
//     dilation) are expected to have zeroed the background already, so any sample
//     with a non-zero red, green or blue channel is foreground. Alpha never
//     participates.
// 2.  **Interop at the Edge**: Conversions from raw bytes and from the `image`
//     crate's `Rgba<u8>` live here so that the buffer layers never deal with
//     byte offsets.

pub mod pixel {
    pub type Byte = u8;
    pub type Channel = Byte;

    pub const CHANNELS: usize = 4;

    /// A "dumb" data container representing a single RGBA pixel.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Pixel {
        /// The red channel value (0-255).
        pub red: Channel,
        /// The green channel value (0-255).
        pub green: Channel,
        /// The blue channel value (0-255).
        pub blue: Channel,
        /// The alpha (transparency) channel value (0-255).
        pub alpha: Channel,
    }

    impl Pixel {
        pub const fn new(red: Channel, green: Channel, blue: Channel, alpha: Channel) -> Self {
            Pixel {
                red,
                green,
                blue,
                alpha,
            }
        }

        pub const fn black() -> Self {
            Pixel::new(0, 0, 0, 255)
        }

        pub const fn white() -> Self {
            Pixel::new(255, 255, 255, 255)
        }

        /// True when all three colour channels are zero. Alpha is ignored.
        #[inline]
        pub fn is_black(&self) -> bool {
            self.red == 0 && self.green == 0 && self.blue == 0
        }

        /// The inverse of `is_black`: anything with colour is foreground.
        #[inline]
        pub fn is_foreground(&self) -> bool {
            !self.is_black()
        }
    }

    impl TryFrom<&[Byte]> for Pixel {
        type Error = crate::error::BlobError;

        fn try_from(bytes: &[Byte]) -> Result<Self, Self::Error> {
            if bytes.len() != CHANNELS {
                return Err(crate::error::BlobError::BufferSizeMismatch {
                    expected: CHANNELS,
                    actual: bytes.len(),
                });
            }
            Ok(Pixel::new(bytes[0], bytes[1], bytes[2], bytes[3]))
        }
    }

    impl From<image::Rgba<u8>> for Pixel {
        fn from(rgba: image::Rgba<u8>) -> Self {
            let [red, green, blue, alpha] = rgba.0;
            Pixel::new(red, green, blue, alpha)
        }
    }

    impl From<Pixel> for image::Rgba<u8> {
        fn from(pixel: Pixel) -> Self {
            image::Rgba([pixel.red, pixel.green, pixel.blue, pixel.alpha])
        }
    }
}
