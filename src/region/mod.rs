//! Region abstraction: the union area of a set of rectangles
//!
//! Two interchangeable implementations share the [`Region`] contract. The
//! [`BasicRegion`] keeps a pairwise-disjoint rectangle set and is the right
//! choice for the common frame with a handful of moved areas. The
//! [`ScanlineRegion`] computes area with coordinate compression and a strip
//! sweep, which scales better when a frame accumulates many overlapping
//! rectangles. Both must report the same area for the same sequence of
//! `unite` calls; the tracker picks one via [`RegionImpl`] at construction.

pub mod basic;
pub mod scanline;

pub use basic::BasicRegion;
pub use scanline::ScanlineRegion;

use crate::geometry::Rect;
use serde::{Deserialize, Serialize};

/// A mutable area accumulator over axis-aligned rectangles.
///
/// `area()` always equals the true area of the union of every rectangle ever
/// passed to `unite` since the last `clear`, with no double counting of
/// overlaps. Uniting an empty rect is a no-op.
pub trait Region: std::fmt::Debug + Send {
    /// Add a rectangle to the covered area.
    fn unite(&mut self, rect: Rect);

    /// The exact area of the union of all united rectangles.
    fn area(&self) -> f64;

    /// Reset to the empty region.
    fn clear(&mut self);

    /// True when nothing with positive area has been united.
    fn is_empty(&self) -> bool;
}

/// Selects which `Region` implementation a tracker uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RegionImpl {
    /// Disjoint-rectangle decomposition; favors the sparse common case.
    #[default]
    Basic,
    /// Coordinate-compression sweep; favors dense frames.
    Scanline,
}

pub(crate) fn new_region(which: RegionImpl) -> Box<dyn Region> {
    match which {
        RegionImpl::Basic => Box::new(BasicRegion::new()),
        RegionImpl::Scanline => Box::new(ScanlineRegion::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_builds_both_variants() {
        for which in [RegionImpl::Basic, RegionImpl::Scanline] {
            let mut region = new_region(which);
            assert!(region.is_empty());
            region.unite(Rect::new(0.0, 0.0, 10.0, 10.0));
            assert_eq!(region.area(), 100.0);
            region.clear();
            assert!(region.is_empty());
            assert_eq!(region.area(), 0.0);
        }
    }
}
