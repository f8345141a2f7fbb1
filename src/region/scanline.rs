//! Scanline region
//!
//! Stores every united rectangle as-is and computes the union area on query:
//! compress the distinct x-coordinates, sweep the vertical strips between
//! consecutive x values, and merge the y-intervals of the rectangles active
//! in each strip. Overlap handling costs O(strips * rects log rects) instead
//! of the quadratic decomposition the basic region pays per `unite`, which
//! wins once a frame accumulates many overlapping areas.

use super::Region;
use crate::geometry::Rect;

#[derive(Debug, Default)]
pub struct ScanlineRegion {
    rects: Vec<Rect>,
}

impl ScanlineRegion {
    pub fn new() -> Self {
        ScanlineRegion { rects: Vec::new() }
    }
}

impl Region for ScanlineRegion {
    fn unite(&mut self, rect: Rect) {
        if rect.is_empty() {
            return;
        }
        self.rects.push(rect);
    }

    fn area(&self) -> f64 {
        if self.rects.is_empty() {
            return 0.0;
        }

        let mut xs: Vec<f32> = Vec::with_capacity(self.rects.len() * 2);
        for r in &self.rects {
            xs.push(r.left);
            xs.push(r.right);
        }
        xs.sort_by(f32::total_cmp);
        xs.dedup();

        let mut total = 0.0f64;
        let mut intervals: Vec<(f32, f32)> = Vec::new();
        for pair in xs.windows(2) {
            let (x0, x1) = (pair[0], pair[1]);
            let strip_width = (x1 - x0) as f64;
            if strip_width <= 0.0 {
                continue;
            }

            // y-intervals of the rects spanning this strip, merged.
            intervals.clear();
            intervals.extend(
                self.rects
                    .iter()
                    .filter(|r| r.left < x1 && r.right > x0)
                    .map(|r| (r.top, r.bottom)),
            );
            if intervals.is_empty() {
                continue;
            }
            intervals.sort_by(|a, b| a.0.total_cmp(&b.0));

            let mut covered = 0.0f64;
            let (mut lo, mut hi) = intervals[0];
            for &(top, bottom) in &intervals[1..] {
                if top > hi {
                    covered += (hi - lo) as f64;
                    lo = top;
                    hi = bottom;
                } else if bottom > hi {
                    hi = bottom;
                }
            }
            covered += (hi - lo) as f64;

            total += strip_width * covered;
        }
        total
    }

    fn clear(&mut self) {
        self.rects.clear();
    }

    fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }
}
