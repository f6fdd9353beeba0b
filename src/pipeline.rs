// THEORY:
// The `pipeline` module is the top-level, single-frame API of the blob engine. It
// sequences whatever upstream filters the caller registered, hands the result to
// the `BlobFinder`, and packages the boxes into a `FrameAnalysis`.
//
// Data flow for one frame:
//   Image -> image filters -> (mask filters, if any) -> BlobFinder -> FrameAnalysis
//
// Without mask filters the finder scans the (filtered) colour image directly, so the
// foreground test is evaluated on the source samples. Once a mask filter is
// registered the frame is reduced to a `BinaryMask` first and the mask is scanned.

use crate::core_modules::binary_mask::BinaryMask;
use crate::core_modules::blob_finder::BlobFinder;
use crate::core_modules::filter::{ImageFilter, MaskFilter};
use crate::core_modules::pixel_buffer::Image;
use crate::error::{BlobError, Result};

// Re-export key data structures for the public API.
pub use crate::core_modules::bounding_box::{BoundingBox, Point};

/// Configuration for the VisionPipeline, allowing for tunable behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Boxes narrower than this (corner difference) are dropped.
    pub min_blob_width: i32,
    /// Boxes shorter than this (corner difference) are dropped.
    pub min_blob_height: i32,
    /// Number of frames the `ParallelPipeline` analyzes concurrently.
    pub worker_count: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            min_blob_width: 0,
            min_blob_height: 0,
            worker_count: num_cpus::get(),
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<()> {
        if self.min_blob_width < 0 || self.min_blob_height < 0 {
            return Err(BlobError::InvalidConfiguration(format!(
                "minimum blob size must be non-negative, got {}x{}",
                self.min_blob_width, self.min_blob_height
            )));
        }
        if self.worker_count == 0 {
            return Err(BlobError::InvalidConfiguration(
                "worker_count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// The result of analyzing a single frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameAnalysis {
    pub frame_id: u64,
    pub image_width: u32,
    pub image_height: u32,
    /// Surviving boxes in discovery order.
    pub blobs: Vec<BoundingBox>,
}

/// The main, top-level struct for the blob engine.
pub struct VisionPipeline {
    config: PipelineConfig,
    finder: BlobFinder,
    image_filters: Vec<Box<dyn ImageFilter>>,
    mask_filters: Vec<Box<dyn MaskFilter>>,
    frames_processed: u64,
}

impl VisionPipeline {
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        let finder = BlobFinder::new(config.min_blob_width, config.min_blob_height)?;
        Ok(Self {
            config,
            finder,
            image_filters: Vec::new(),
            mask_filters: Vec::new(),
            frames_processed: 0,
        })
    }

    /// Appends a colour filter; filters run in registration order.
    pub fn with_image_filter<F>(mut self, filter: F) -> Self
    where
        F: ImageFilter + 'static,
    {
        self.image_filters.push(Box::new(filter));
        self
    }

    /// Appends a mask filter; mask filters run after all colour filters.
    pub fn with_mask_filter<F>(mut self, filter: F) -> Self
    where
        F: MaskFilter + 'static,
    {
        self.mask_filters.push(Box::new(filter));
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn finder(&self) -> &BlobFinder {
        &self.finder
    }

    pub fn frames_processed(&self) -> u64 {
        self.frames_processed
    }

    /// Analyzes the next frame and assigns it a sequential frame id.
    pub fn process_frame(&mut self, image: &Image) -> Result<FrameAnalysis> {
        let analysis = self.analyze(self.frames_processed, image)?;
        self.frames_processed += 1;
        Ok(analysis)
    }

    /// Convenience entry for top-to-bottom RGBA8 camera buffers.
    pub fn process_rgba_frame(&mut self, width: u32, height: u32, frame_buffer: &[u8]) -> Result<FrameAnalysis> {
        let image = Image::from_rgba_bytes(width, height, frame_buffer)?;
        self.process_frame(&image)
    }

    /// Runs filters and the blob scan for one frame. Takes `&self`, so independent
    /// frames may be analyzed from several threads at once.
    pub fn analyze(&self, frame_id: u64, image: &Image) -> Result<FrameAnalysis> {
        let mut filtered: Option<Image> = None;
        for filter in &self.image_filters {
            let next = filter.apply(filtered.as_ref().unwrap_or(image))?;
            image.same_shape(&next)?;
            filtered = Some(next);
        }
        let frame = filtered.as_ref().unwrap_or(image);

        let blobs = if self.mask_filters.is_empty() {
            self.finder.process(frame)?
        } else {
            let mut mask = BinaryMask::from_image(frame);
            for filter in &self.mask_filters {
                let next = filter.apply(&mask)?;
                mask.same_shape(&next)?;
                mask = next;
            }
            self.finder.process(&mask)?
        };

        Ok(FrameAnalysis {
            frame_id,
            image_width: image.width(),
            image_height: image.height(),
            blobs,
        })
    }
}
