//! Disjoint-rectangle region
//!
//! Invariant: `rects` is pairwise disjoint and its union equals the union of
//! everything ever passed to `unite`. Each `unite` subtracts the already
//! covered portion from the incoming rect and stores only the remainder, so
//! `area()` is a plain sum.

use super::Region;
use crate::geometry::Rect;

#[derive(Debug, Default)]
pub struct BasicRegion {
    rects: Vec<Rect>,
}

impl BasicRegion {
    pub fn new() -> Self {
        BasicRegion { rects: Vec::new() }
    }

    /// The disjoint set, exposed for tests and diagnostics.
    pub fn rects(&self) -> &[Rect] {
        &self.rects
    }
}

/// Split `piece` around `clip`, keeping only the parts outside it. Produces
/// at most four strips: full-width above and below the clip, and the left
/// and right slivers of the middle band.
fn subtract(piece: Rect, clip: &Rect, out: &mut Vec<Rect>) {
    if !piece.overlaps(clip) {
        out.push(piece);
        return;
    }

    if clip.top > piece.top {
        out.push(Rect::new(piece.left, piece.top, piece.right, clip.top));
    }
    if clip.bottom < piece.bottom {
        out.push(Rect::new(piece.left, clip.bottom, piece.right, piece.bottom));
    }

    let band_top = piece.top.max(clip.top);
    let band_bottom = piece.bottom.min(clip.bottom);
    if clip.left > piece.left {
        out.push(Rect::new(piece.left, band_top, clip.left, band_bottom));
    }
    if clip.right < piece.right {
        out.push(Rect::new(clip.right, band_top, piece.right, band_bottom));
    }
}

impl Region for BasicRegion {
    fn unite(&mut self, rect: Rect) {
        if rect.is_empty() {
            return;
        }

        // Carve away everything already covered; what survives is new area.
        let mut pending = vec![rect];
        for existing in &self.rects {
            let mut remaining = Vec::new();
            for piece in pending {
                subtract(piece, existing, &mut remaining);
            }
            pending = remaining;
            if pending.is_empty() {
                return;
            }
        }
        self.rects.extend(pending);
    }

    fn area(&self) -> f64 {
        self.rects.iter().map(Rect::area).sum()
    }

    fn clear(&mut self) {
        self.rects.clear();
    }

    fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_disjoint(region: &BasicRegion) {
        let rects = region.rects();
        for (i, a) in rects.iter().enumerate() {
            for b in &rects[i + 1..] {
                assert!(!a.overlaps(b), "overlapping pieces {:?} and {:?}", a, b);
            }
        }
    }

    #[test]
    fn disjoint_rects_sum() {
        let mut r = BasicRegion::new();
        r.unite(Rect::new(0.0, 0.0, 10.0, 10.0));
        r.unite(Rect::new(20.0, 0.0, 30.0, 10.0));
        assert_eq!(r.area(), 200.0);
        assert_disjoint(&r);
    }

    #[test]
    fn overlap_is_not_double_counted() {
        let mut r = BasicRegion::new();
        r.unite(Rect::new(0.0, 0.0, 100.0, 100.0));
        r.unite(Rect::new(0.0, 50.0, 100.0, 150.0));
        assert_eq!(r.area(), 15000.0);
        assert_disjoint(&r);
    }

    #[test]
    fn contained_rect_adds_nothing() {
        let mut r = BasicRegion::new();
        r.unite(Rect::new(0.0, 0.0, 100.0, 100.0));
        r.unite(Rect::new(25.0, 25.0, 75.0, 75.0));
        assert_eq!(r.area(), 10000.0);
        assert_eq!(r.rects().len(), 1);
    }

    #[test]
    fn enclosing_rect_absorbs_pieces() {
        let mut r = BasicRegion::new();
        r.unite(Rect::new(25.0, 25.0, 75.0, 75.0));
        r.unite(Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(r.area(), 10000.0);
        assert_disjoint(&r);
    }

    #[test]
    fn cross_shape() {
        // Vertical and horizontal bars crossing: 2 * 300 - 100 overlap.
        let mut r = BasicRegion::new();
        r.unite(Rect::new(10.0, 0.0, 20.0, 30.0));
        r.unite(Rect::new(0.0, 10.0, 30.0, 20.0));
        assert_eq!(r.area(), 500.0);
        assert_disjoint(&r);
    }

    #[test]
    fn repeated_unite_is_idempotent() {
        let mut r = BasicRegion::new();
        r.unite(Rect::new(5.0, 5.0, 15.0, 15.0));
        let once = r.area();
        r.unite(Rect::new(5.0, 5.0, 15.0, 15.0));
        assert_eq!(r.area(), once);
    }

    #[test]
    fn degenerate_unite_is_noop() {
        let mut r = BasicRegion::new();
        r.unite(Rect::new(10.0, 10.0, 10.0, 50.0));
        r.unite(Rect::new(50.0, 50.0, 10.0, 10.0));
        assert!(r.is_empty());
        assert_eq!(r.area(), 0.0);
    }

    #[test]
    fn touching_rects_keep_exact_area() {
        let mut r = BasicRegion::new();
        r.unite(Rect::new(0.0, 0.0, 10.0, 10.0));
        r.unite(Rect::new(10.0, 0.0, 20.0, 10.0));
        assert_eq!(r.area(), 200.0);
    }
}
