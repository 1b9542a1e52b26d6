//! Connected component labeling over equal-intensity regions.
//!
//! Every sample of the raster is assigned to exactly one [`Component`]: the
//! maximal 4-connected region of samples sharing its intensity. Background is
//! not special here, it is labeled like any other region.
//!
//! Labels are handed out in raster-scan order of each region's first pixel,
//! starting at 0. Regions are grown with an explicit worklist, so a single
//! component covering the whole image costs heap, not call stack.


use crate::common::{Buffer2, Raster};
use crate::constants::{BACKGROUND_LABEL, MIN_INTENSITY};
use crate::error::Result;
use crate::geometry::Aabb;

// ============================================================================
// LabelMap
// ============================================================================

/// Per-pixel label scratch buffer, parallel to a raster.
///
/// Owned by the caller and reused across labeling passes. Each call to
/// [`label_components`] resets it to [`LabelMap::UNVISITED`] before scanning,
/// so labels from a previous pass are never observed.
#[derive(Debug, Clone)]
pub struct LabelMap {
    labels: Buffer2<u32>,
}

impl LabelMap {
    /// Sentinel for pixels not yet claimed by a component.
    pub const UNVISITED: u32 = u32::MAX;

    pub fn new(width: usize, height: usize) -> Self {
        Self {
            labels: Buffer2::new_filled(width, height, Self::UNVISITED),
        }
    }

    /// Label map sized to match `raster`.
    pub fn for_raster(raster: &Raster) -> Self {
        Self::new(raster.width(), raster.height())
    }

    /// Reset every entry to [`LabelMap::UNVISITED`].
    pub fn reset(&mut self) {
        self.labels.fill(Self::UNVISITED);
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.labels.width()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.labels.height()
    }

    /// Raw labels, row-major.
    #[inline]
    pub fn labels(&self) -> &[u32] {
        self.labels.pixels()
    }

    #[inline]
    pub(crate) fn buffer(&self) -> &Buffer2<u32> {
        &self.labels
    }
}

impl std::ops::Index<usize> for LabelMap {
    type Output = u32;

    #[inline]
    fn index(&self, idx: usize) -> &Self::Output {
        &self.labels[idx]
    }
}

// ============================================================================
// Component
// ============================================================================

/// A maximal 4-connected region of equal intensity.
///
/// Produced fresh by each labeling pass. Any later mutation of the raster
/// (threshold, morphology, hole filling) leaves it stale until relabeled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    pub label: u32,
    pub intensity: u8,
    /// Linear pixel indices in discovery order.
    pub pixels: Vec<usize>,
}

impl Component {
    #[inline]
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Whether this component is the conventional background (label 0).
    #[inline]
    pub fn is_background(&self) -> bool {
        self.label == BACKGROUND_LABEL
    }

    /// Whether this component is a hole, i.e. a region of minimum intensity.
    #[inline]
    pub fn is_hole(&self) -> bool {
        self.intensity == MIN_INTENSITY
    }

    /// Bounding box of the member pixels in a raster of the given width.
    pub fn bounding_box(&self, width: usize) -> Aabb {
        crate::geometry::bounding_box(self, width)
    }
}

// ============================================================================
// Labeling
// ============================================================================

/// Partition `raster` into equal-intensity 4-connected components.
///
/// `labels` must have the raster's dimensions; it is reset before the scan and
/// holds the final label of every pixel afterwards. Components are returned in
/// label order.
pub fn label_components(raster: &Raster, labels: &mut LabelMap) -> Result<Vec<Component>> {
    raster.ensure_not_empty()?;
    raster.ensure_same_size(labels.buffer(), "label map")?;

    labels.reset();

    let width = raster.width();
    let height = raster.height();
    let samples = raster.pixels();
    let label_buf = labels.labels.pixels_mut();

    let mut components = Vec::new();
    let mut stack: Vec<usize> = Vec::new();

    for seed in 0..samples.len() {
        if label_buf[seed] != LabelMap::UNVISITED {
            continue;
        }

        let label = components.len() as u32;
        let intensity = samples[seed];
        let mut pixels = Vec::new();

        label_buf[seed] = label;
        stack.push(seed);

        while let Some(idx) = stack.pop() {
            pixels.push(idx);
            let x = idx % width;
            let y = idx / width;

            let mut visit = |n: usize| {
                if label_buf[n] == LabelMap::UNVISITED && samples[n] == intensity {
                    label_buf[n] = label;
                    stack.push(n);
                }
            };

            if x > 0 {
                visit(idx - 1);
            }
            if x + 1 < width {
                visit(idx + 1);
            }
            if y > 0 {
                visit(idx - width);
            }
            if y + 1 < height {
                visit(idx + width);
            }
        }

        components.push(Component {
            label,
            intensity,
            pixels,
        });
    }

    tracing::trace!(
        "Labeled {} components in {}x{} raster",
        components.len(),
        width,
        height
    );

    Ok(components)
}

/// Convenience wrapper allocating a fresh [`LabelMap`].
pub fn label_components_fresh(raster: &Raster) -> Result<(Vec<Component>, LabelMap)> {
    let mut labels = LabelMap::for_raster(raster);
    let components = label_components(raster, &mut labels)?;
    Ok((components, labels))
}
