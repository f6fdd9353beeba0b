// THEORY:
// The `BlobExpander` is the engine of the blob layer. Given one foreground seed it
// discovers the full 8-connected component around it and returns the bounding box
// of everything it reached.
//
// Key architectural principles & algorithm steps:
// 1.  **Private Visited-Set**: Every expansion allocates its own `BinaryMask`-shaped
//     visited-set sized to the source. It is never shared across blobs and is
//     dropped as soon as the box is final.
// 2.  **Mark on Enqueue**: A coordinate is marked visited the moment it is added to
//     a frontier, not when it is later expanded. Two frontier members that share a
//     neighbour can therefore never enqueue it twice.
// 3.  **Frontier Rounds**: The search is breadth-first in rounds. Each round first
//     absorbs every frontier coordinate into the box, then collects the unvisited
//     foreground neighbours of the whole frontier into the next one. There is no
//     per-pixel recursion, so large foreground regions cannot exhaust the stack.
// 4.  **Termination**: The visited-set strictly grows every round and the source is
//     finite. The worst case touches each pixel once: O(width * height) per blob.

use crate::core_modules::binary_mask::BinaryMask;
use crate::core_modules::bounding_box::{BoundingBox, Point};
use crate::core_modules::foreground::ForegroundSource;
use crate::error::Result;

pub mod blob_expander {
    use super::*;
    use tracing::trace;

    /// Offsets (dx, dy) of the 8 neighbours, clockwise starting straight up.
    pub const NEIGHBORHOOD: [(i32, i32); 8] = [
        (0, -1),
        (1, -1),
        (1, 0),
        (1, 1),
        (0, 1),
        (-1, 1),
        (-1, 0),
        (-1, -1),
    ];

    /// Grows a bounding box over the 8-connected foreground component containing `seed`.
    pub fn expand_blob<S>(source: &S, seed: Point) -> Result<BoundingBox>
    where
        S: ForegroundSource + ?Sized,
    {
        let mut visited = BinaryMask::empty(source.width(), source.height());
        visited.set(seed.x, seed.y, true)?;

        let mut bbox = BoundingBox::at(seed.x, seed.y);
        let mut frontier = unseen_foreground_neighbors(seed, source, &mut visited)?;
        let mut rounds = 0usize;

        while !frontier.is_empty() {
            for point in &frontier {
                bbox.absorb(point.x, point.y);
            }

            let mut next_frontier = Vec::new();
            for point in &frontier {
                next_frontier.extend(unseen_foreground_neighbors(*point, source, &mut visited)?);
            }

            frontier = next_frontier;
            rounds += 1;
        }

        trace!(seed_x = seed.x, seed_y = seed.y, rounds, "blob expansion finished");
        Ok(bbox)
    }

    /// Collects the in-bounds, unvisited foreground neighbours of `point` and marks
    /// each of them visited.
    fn unseen_foreground_neighbors<S>(
        point: Point,
        source: &S,
        visited: &mut BinaryMask,
    ) -> Result<Vec<Point>>
    where
        S: ForegroundSource + ?Sized,
    {
        let mut neighbors = Vec::with_capacity(NEIGHBORHOOD.len());

        for (dx, dy) in NEIGHBORHOOD {
            let (Some(nx), Some(ny)) = (point.x.checked_add(dx), point.y.checked_add(dy)) else {
                continue;
            };
            if !visited.contains(nx, ny) {
                continue;
            }

            if !visited.get(nx, ny)? && source.is_foreground(nx, ny)? {
                visited.set(nx, ny, true)?;
                neighbors.push(Point::new(nx, ny));
            }
        }

        Ok(neighbors)
    }
}
