// THEORY:
// Filters are the upstream collaborators of the blob engine: thresholding, colour
// distance, grayscale conversion, dilation. They are all stateless per-pixel (or
// per-neighbourhood) transforms that zero out background before the scan runs.
// The engine does not ship any of them; it only defines the seams a caller plugs
// them into, so the pipeline can sequence them ahead of the `BlobFinder`.
//
// Filters never mutate their input and always return a buffer of the same
// dimensions.

use crate::core_modules::binary_mask::BinaryMask;
use crate::core_modules::pixel_buffer::Image;
use crate::error::Result;

/// A colour-to-colour transform applied to a frame before blob detection.
pub trait ImageFilter: Send + Sync {
    fn apply(&self, image: &Image) -> Result<Image>;
}

/// A mask-to-mask transform, e.g. a morphological dilation that merges fragments.
pub trait MaskFilter: Send + Sync {
    fn apply(&self, mask: &BinaryMask) -> Result<BinaryMask>;
}
