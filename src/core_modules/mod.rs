pub mod pixel;
pub mod pixel_buffer;
pub mod binary_mask;
pub mod bounding_box;
pub mod foreground;
pub mod blob_expander;
pub mod blob_finder;
pub mod filter;
