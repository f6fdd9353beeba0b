// THEORY:
// The `BlobFinder` is the scan driver of the blob layer. It walks a frame once, row
// by row from the top, and launches the `BlobExpander` from every foreground pixel
// that is not already covered by a box it has found. After the scan it drops boxes
// that are smaller than the configured minimum size.
//
// Key properties:
// 1.  **Containment Skip**: Before a coordinate is tested it is checked against every
//     box discovered so far. A blob is therefore never discovered twice, and a
//     separate blob that lies entirely inside another blob's bounding box is never
//     investigated at all. Downstream consumers rely on this one-box-per-region
//     simplification.
// 2.  **Discovery Order**: Boxes are returned in the order their seeds were met:
//     top to bottom, then left to right.
// 3.  **Sequential by Construction**: Each expansion consults the boxes produced by
//     the previous ones, so expansions within one frame never run concurrently.
//     Independent frames may be processed in parallel (see `parallel_pipeline`).
// 4.  **Stateless Between Frames**: The finder holds only its size limits; every
//     call allocates its own result list.

use crate::core_modules::blob_expander::blob_expander::expand_blob;
use crate::core_modules::bounding_box::{BoundingBox, Point};
use crate::core_modules::foreground::ForegroundSource;
use crate::error::{BlobError, Result};
use tracing::debug;

/// Scans a frame for blobs and filters them by size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BlobFinder {
    /// Minimum box width (corner difference). 0 disables the check.
    min_width: i32,
    /// Minimum box height (corner difference). 0 disables the check.
    min_height: i32,
}

impl BlobFinder {
    pub fn new(min_width: i32, min_height: i32) -> Result<Self> {
        Ok(Self {
            min_width: validate_min_size("min_width", min_width)?,
            min_height: validate_min_size("min_height", min_height)?,
        })
    }

    pub fn min_width(&self) -> i32 {
        self.min_width
    }

    pub fn min_height(&self) -> i32 {
        self.min_height
    }

    pub fn set_min_width(&mut self, min_width: i32) -> Result<()> {
        self.min_width = validate_min_size("min_width", min_width)?;
        Ok(())
    }

    pub fn set_min_height(&mut self, min_height: i32) -> Result<()> {
        self.min_height = validate_min_size("min_height", min_height)?;
        Ok(())
    }

    /// Finds every blob in `source` and returns the boxes that pass the size filter.
    /// A zero-area source yields an empty list.
    pub fn process<S>(&self, source: &S) -> Result<Vec<BoundingBox>>
    where
        S: ForegroundSource + ?Sized,
    {
        if source.is_empty() {
            return Ok(Vec::new());
        }

        let width = clamp_dimension(source.width());
        let height = clamp_dimension(source.height());
        let mut boxes: Vec<BoundingBox> = Vec::new();

        for y in 0..height {
            for x in 0..width {
                if boxes.iter().any(|bbox| bbox.contains_coordinate(x, y)) {
                    continue;
                }

                if source.is_foreground(x, y)? {
                    let blob = expand_blob(source, Point::new(x, y))?;
                    debug!(
                        left = blob.left(),
                        top = blob.top(),
                        right = blob.right(),
                        bottom = blob.bottom(),
                        "found blob"
                    );
                    boxes.push(blob);
                }
            }
        }

        Ok(self.filter_by_size(boxes))
    }

    /// Keeps the boxes whose width and height reach the configured minimums.
    pub fn filter_by_size(&self, mut boxes: Vec<BoundingBox>) -> Vec<BoundingBox> {
        let found = boxes.len();
        boxes.retain(|bbox| bbox.width() >= self.min_width && bbox.height() >= self.min_height);

        if boxes.len() != found {
            debug!(
                removed = found - boxes.len(),
                min_width = self.min_width,
                min_height = self.min_height,
                "dropped undersized blobs"
            );
        }
        boxes
    }
}

fn validate_min_size(name: &str, value: i32) -> Result<i32> {
    if value < 0 {
        return Err(BlobError::InvalidConfiguration(format!(
            "{name} must be non-negative, got {value}"
        )));
    }
    Ok(value)
}

fn clamp_dimension(dimension: u32) -> i32 {
    i32::try_from(dimension).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_modules::binary_mask::BinaryMask;
    use crate::core_modules::pixel::pixel::Pixel;
    use crate::core_modules::pixel_buffer::Image;

    fn image_with(width: u32, height: u32, foreground: &[(i32, i32)]) -> Image {
        let mut image = Image::filled(width, height, Pixel::black());
        for &(x, y) in foreground {
            image.set(x, y, Pixel::new(200, 30, 30, 255)).unwrap();
        }
        image
    }

    #[test]
    fn negative_minimums_are_rejected() {
        assert!(matches!(
            BlobFinder::new(-1, 0),
            Err(BlobError::InvalidConfiguration(_))
        ));
        assert!(BlobFinder::new(0, -3).is_err());

        let mut finder = BlobFinder::default();
        assert!(finder.set_min_width(-2).is_err());
        assert!(finder.set_min_height(-2).is_err());
        assert_eq!(finder, BlobFinder::default());
    }

    #[test]
    fn all_black_image_has_no_blobs() {
        let image = image_with(7, 5, &[]);
        assert!(BlobFinder::default().process(&image).unwrap().is_empty());
    }

    #[test]
    fn zero_area_image_has_no_blobs() {
        let image = Image::filled(0, 10, Pixel::white());
        assert!(BlobFinder::default().process(&image).unwrap().is_empty());
    }

    #[test]
    fn single_pixel_at_origin() {
        let image = image_with(3, 3, &[(0, 0)]);
        let boxes = BlobFinder::default().process(&image).unwrap();
        assert_eq!(boxes, vec![BoundingBox::at(0, 0)]);
    }

    #[test]
    fn solid_square_is_one_blob() {
        let image = image_with(5, 5, &[(1, 1), (2, 1), (1, 2), (2, 2)]);
        let boxes = BlobFinder::default().process(&image).unwrap();
        assert_eq!(boxes.len(), 1);
        assert_eq!(boxes[0].top_left(), Point::new(1, 1));
        assert_eq!(boxes[0].bottom_right(), Point::new(2, 2));
        assert_eq!(boxes[0].width(), 1);
        assert_eq!(boxes[0].height(), 1);
    }

    #[test]
    fn diagonal_neighbours_form_one_blob() {
        let image = image_with(4, 4, &[(0, 0), (1, 1)]);
        let boxes = BlobFinder::default().process(&image).unwrap();
        assert_eq!(boxes.len(), 1);
        assert_eq!(boxes[0].bottom_right(), Point::new(1, 1));
    }

    #[test]
    fn separated_pixels_form_two_blobs_in_scan_order() {
        let image = image_with(5, 5, &[(4, 0), (0, 2)]);
        let boxes = BlobFinder::default().process(&image).unwrap();
        assert_eq!(boxes, vec![BoundingBox::at(4, 0), BoundingBox::at(0, 2)]);
    }

    #[test]
    fn blob_inside_another_box_is_not_discovered() {
        // A hollow ring with an unconnected dot in its centre.
        let mut foreground = Vec::new();
        for i in 0..5 {
            foreground.extend([(i, 0), (i, 4), (0, i), (4, i)]);
        }
        foreground.push((2, 2));
        let image = image_with(5, 5, &foreground);

        let boxes = BlobFinder::default().process(&image).unwrap();
        assert_eq!(boxes.len(), 1);
        assert_eq!(boxes[0].bottom_right(), Point::new(4, 4));
    }

    #[test]
    fn size_filter_uses_corner_difference() {
        let image = image_with(8, 8, &[(0, 0), (4, 4), (5, 4), (4, 5), (5, 5)]);

        let all = BlobFinder::default().process(&image).unwrap();
        assert_eq!(all.len(), 2);

        let filtered = BlobFinder::new(1, 1).unwrap().process(&image).unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].top_left(), Point::new(4, 4));

        let none = BlobFinder::new(2, 0).unwrap().process(&image).unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn minimums_larger_than_the_image_remove_everything() {
        let image = Image::filled(4, 4, Pixel::white());
        let boxes = BlobFinder::new(100, 100).unwrap().process(&image).unwrap();
        assert!(boxes.is_empty());
    }

    #[test]
    fn mask_and_image_scans_agree() {
        let image = image_with(6, 6, &[(0, 0), (1, 0), (3, 3), (5, 5)]);
        let mask = BinaryMask::from_image(&image);
        let finder = BlobFinder::default();
        assert_eq!(finder.process(&image).unwrap(), finder.process(&mask).unwrap());
    }
}
