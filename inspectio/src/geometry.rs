//! Bounding boxes and set predicates between components.
//!
//! Membership tests go through [`PixelSet`], a hash set of pixel indices, so
//! intersection and containment cost O(|scanned component|) instead of a
//! linear search per pixel.

use hashbrown::HashSet;

use crate::labeling::Component;

/// Axis-aligned bounding box with inclusive `usize` bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Aabb {
    pub x_min: usize,
    pub x_max: usize,
    pub y_min: usize,
    pub y_max: usize,
}

impl Aabb {
    #[inline]
    pub const fn new(x_min: usize, x_max: usize, y_min: usize, y_max: usize) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// Inverted box that any [`Aabb::include`] call collapses onto the point.
    #[inline]
    pub const fn empty() -> Self {
        Self {
            x_min: usize::MAX,
            x_max: 0,
            y_min: usize::MAX,
            y_max: 0,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x_min > self.x_max || self.y_min > self.y_max
    }

    #[inline]
    pub fn include(&mut self, x: usize, y: usize) {
        self.x_min = self.x_min.min(x);
        self.x_max = self.x_max.max(x);
        self.y_min = self.y_min.min(y);
        self.y_max = self.y_max.max(y);
    }

    /// Number of columns covered.
    #[inline]
    pub const fn width(&self) -> usize {
        self.x_max.saturating_sub(self.x_min) + 1
    }

    /// Number of rows covered.
    #[inline]
    pub const fn height(&self) -> usize {
        self.y_max.saturating_sub(self.y_min) + 1
    }

    #[inline]
    pub const fn area(&self) -> usize {
        self.width() * self.height()
    }

    /// Integer center `((min + max) / 2)` on each axis.
    ///
    /// This is the box center, not an area-weighted centroid.
    #[inline]
    pub const fn center(&self) -> (usize, usize) {
        (
            (self.x_min + self.x_max) / 2,
            (self.y_min + self.y_max) / 2,
        )
    }
}

/// Bounding box of `component` in a raster of the given width.
///
/// Returns [`Aabb::empty`] for a component without pixels.
pub fn bounding_box(component: &Component, width: usize) -> Aabb {
    let mut bbox = Aabb::empty();
    for &idx in &component.pixels {
        bbox.include(idx % width, idx / width);
    }
    bbox
}

/// Hashed pixel membership of one component.
///
/// Build once per component when it is tested against many others.
#[derive(Debug, Clone, Default)]
pub struct PixelSet {
    pixels: HashSet<usize>,
}

impl PixelSet {
    pub fn from_component(component: &Component) -> Self {
        Self {
            pixels: component.pixels.iter().copied().collect(),
        }
    }

    #[inline]
    pub fn contains_pixel(&self, idx: usize) -> bool {
        self.pixels.contains(&idx)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Whether any pixel of `other` is a member.
    pub fn intersects(&self, other: &Component) -> bool {
        other.pixels.iter().any(|idx| self.pixels.contains(idx))
    }

    /// Whether every pixel of `inner` is a member.
    pub fn contains(&self, inner: &Component) -> bool {
        inner.pixels.iter().all(|idx| self.pixels.contains(idx))
    }
}

impl From<&Component> for PixelSet {
    fn from(component: &Component) -> Self {
        Self::from_component(component)
    }
}

/// Whether `a` and `b` share at least one pixel.
///
/// Hashes the smaller component and scans the larger, so the result does not
/// depend on argument order.
pub fn intersects(a: &Component, b: &Component) -> bool {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    PixelSet::from_component(small).intersects(large)
}

/// Whether every pixel of `inner` belongs to `outer`.
///
/// An empty `inner` is trivially contained.
pub fn contains(outer: &Component, inner: &Component) -> bool {
    if inner.len() > outer.len() {
        return false;
    }
    PixelSet::from_component(outer).contains(inner)
}

/// Whether the bounding-box centers of `outer` and `inner` differ by at most
/// `tolerance` pixels on each axis independently.
pub fn centered_within(outer: &Component, inner: &Component, tolerance: usize, width: usize) -> bool {
    let (ox, oy) = bounding_box(outer, width).center();
    let (ix, iy) = bounding_box(inner, width).center();
    ox.abs_diff(ix) <= tolerance && oy.abs_diff(iy) <= tolerance
}
