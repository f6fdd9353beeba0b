// THEORY:
// This file is the entry point for the `blob_vision` library crate. It exposes the
// blob engine that turns a filtered camera frame into a list of bounding boxes
// around its connected foreground regions.
//
// The `core_modules` hold the engine itself (pixel storage, masks, bounding boxes,
// the breadth-first expander and the scan driver). `pipeline` is the single-frame
// API that sequences upstream filters in front of the scan, and `parallel_pipeline`
// analyzes independent frames concurrently on a tokio worker pool.

pub mod core_modules;
pub mod error;
pub mod pipeline;
pub mod parallel_pipeline;

pub use core_modules::binary_mask::BinaryMask;
pub use core_modules::blob_finder::BlobFinder;
pub use core_modules::bounding_box::{BoundingBox, Point};
pub use core_modules::foreground::ForegroundSource;
pub use core_modules::pixel::pixel::Pixel;
pub use core_modules::pixel_buffer::{Image, PixelBuffer};
pub use error::{BlobError, Result};
