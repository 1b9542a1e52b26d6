//! Component-level raster edits: band selection, size filtering, painting.
//!
//! All functions take components from a previous labeling pass and write
//! through their pixel indices. The components are stale afterwards.

use crate::common::Raster;
use crate::constants::{MAX_INTENSITY, MIN_INTENSITY};
use crate::labeling::Component;

/// Keep one intensity band: components of exactly `intensity` become
/// foreground, everything else background.
pub fn filter_by_intensity(raster: &mut Raster, components: &[Component], intensity: u8) {
    for component in components {
        let value = if component.intensity == intensity {
            MAX_INTENSITY
        } else {
            MIN_INTENSITY
        };
        paint(raster, component, value);
    }
}

/// Erase non-background components with fewer than `min_size` pixels.
///
/// Returns how many components were erased.
pub fn remove_small_components(raster: &mut Raster, components: &[Component], min_size: usize) -> usize {
    let mut removed = 0;
    for component in components {
        if component.is_background() || component.len() >= min_size {
            continue;
        }
        paint(raster, component, MIN_INTENSITY);
        removed += 1;
    }
    removed
}

/// Set every pixel of `component` to `value`.
#[inline]
pub fn paint(raster: &mut Raster, component: &Component, value: u8) {
    for &idx in &component.pixels {
        raster[idx] = value;
    }
}
