// THEORY:
// The `BoundingBox` is the output unit of the blob engine: an axis-aligned rectangle
// tracked by its top-left and bottom-right corners in top-left origin pixel
// coordinates.
//
// A box is born as a degenerate point at a blob's seed and grows by absorbing every
// coordinate the expander discovers. Each axis is absorbed independently with a
// min/max, so a coordinate that only extends one axis is never lost.
//
// Dimensions follow the corner-difference convention: `width = right - left` and
// `height = bottom - top`. A single pixel is 0x0, a 2x2 square is 1x1. Size
// filtering in the `BlobFinder` uses the same numbers.

/// A simple struct to represent a 2D pixel coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoundingBox {
    top_left: Point,
    bottom_right: Point,
}

impl BoundingBox {
    /// A degenerate box covering exactly one coordinate.
    pub fn at(x: i32, y: i32) -> Self {
        let point = Point::new(x, y);
        Self {
            top_left: point,
            bottom_right: point,
        }
    }

    /// Builds a box from any two opposite corners.
    pub fn from_corners(a: Point, b: Point) -> Self {
        let mut bbox = Self::at(a.x, a.y);
        bbox.absorb(b.x, b.y);
        bbox
    }

    /// Grows the box so that it includes `(x, y)`.
    pub fn absorb(&mut self, x: i32, y: i32) {
        self.top_left.x = self.top_left.x.min(x);
        self.bottom_right.x = self.bottom_right.x.max(x);
        self.top_left.y = self.top_left.y.min(y);
        self.bottom_right.y = self.bottom_right.y.max(y);
    }

    /// Inclusive on all four edges.
    pub fn contains_coordinate(&self, x: i32, y: i32) -> bool {
        x >= self.top_left.x
            && x <= self.bottom_right.x
            && y >= self.top_left.y
            && y <= self.bottom_right.y
    }

    pub fn top_left(&self) -> Point {
        self.top_left
    }

    pub fn bottom_right(&self) -> Point {
        self.bottom_right
    }

    pub fn left(&self) -> i32 {
        self.top_left.x
    }

    pub fn top(&self) -> i32 {
        self.top_left.y
    }

    pub fn right(&self) -> i32 {
        self.bottom_right.x
    }

    pub fn bottom(&self) -> i32 {
        self.bottom_right.y
    }

    pub fn width(&self) -> i32 {
        self.bottom_right.x - self.top_left.x
    }

    pub fn height(&self) -> i32 {
        self.bottom_right.y - self.top_left.y
    }

    pub fn surface_area(&self) -> i64 {
        self.width() as i64 * self.height() as i64
    }

    /// Centre of the box, halves rounded away from zero.
    pub fn mid_point(&self) -> Point {
        let half_width = (self.width() as f64 / 2.0).round() as i32;
        let half_height = (self.height() as f64 / 2.0).round() as i32;
        Point::new(self.top_left.x + half_width, self.top_left.y + half_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_as_a_single_point() {
        let bbox = BoundingBox::at(3, 4);
        assert_eq!(bbox.top_left(), Point::new(3, 4));
        assert_eq!(bbox.bottom_right(), Point::new(3, 4));
        assert_eq!(bbox.width(), 0);
        assert_eq!(bbox.height(), 0);
        assert!(bbox.contains_coordinate(3, 4));
        assert!(!bbox.contains_coordinate(4, 4));
    }

    #[test]
    fn absorb_grows_in_every_direction() {
        let mut bbox = BoundingBox::at(5, 5);
        bbox.absorb(2, 6);
        bbox.absorb(7, 1);
        assert_eq!(bbox.top_left(), Point::new(2, 1));
        assert_eq!(bbox.bottom_right(), Point::new(7, 6));
        assert_eq!(bbox.width(), 5);
        assert_eq!(bbox.height(), 5);
    }

    #[test]
    fn absorb_tracks_each_axis_independently() {
        let mut bbox = BoundingBox::at(0, 0);
        bbox.absorb(4, 0);
        // x lies between the bounds, y still has to extend downward.
        bbox.absorb(2, 3);
        assert_eq!(bbox.bottom_right(), Point::new(4, 3));
        assert_eq!(bbox.top_left(), Point::new(0, 0));
    }

    #[test]
    fn absorbing_an_interior_point_changes_nothing() {
        let mut bbox = BoundingBox::from_corners(Point::new(0, 0), Point::new(4, 4));
        let before = bbox;
        bbox.absorb(2, 2);
        assert_eq!(bbox, before);
    }

    #[test]
    fn from_corners_normalizes_order() {
        let bbox = BoundingBox::from_corners(Point::new(6, 1), Point::new(2, 8));
        assert_eq!(bbox.top_left(), Point::new(2, 1));
        assert_eq!(bbox.bottom_right(), Point::new(6, 8));
    }

    #[test]
    fn containment_is_inclusive() {
        let bbox = BoundingBox::from_corners(Point::new(1, 1), Point::new(3, 2));
        assert!(bbox.contains_coordinate(1, 1));
        assert!(bbox.contains_coordinate(3, 2));
        assert!(bbox.contains_coordinate(2, 1));
        assert!(!bbox.contains_coordinate(0, 1));
        assert!(!bbox.contains_coordinate(3, 3));
    }

    #[test]
    fn area_and_mid_point_use_corner_difference() {
        let bbox = BoundingBox::from_corners(Point::new(2, 4), Point::new(5, 8));
        assert_eq!(bbox.surface_area(), 12);
        assert_eq!(bbox.mid_point(), Point::new(4, 6));
    }
}
