//! Hole detection and filling.
//!
//! A hole is a component of [`MIN_INTENSITY`] other than the background, i.e.
//! a background-valued region enclosed by foreground.

use crate::common::Raster;
use crate::constants::MAX_INTENSITY;
use crate::error::Result;
use crate::labeling::{Component, LabelMap};

/// Promote every hole in `components` to foreground.
///
/// The background component is skipped. Returns the filled holes so callers
/// can inspect them later, e.g. to check that a drilled hole sits in the
/// middle of its soldering island. `components` must come from labeling the
/// current state of `raster`.
pub fn fill_holes(raster: &mut Raster, components: &[Component]) -> Vec<Component> {
    let mut holes = Vec::new();
    for component in components {
        if component.is_background() || !component.is_hole() {
            continue;
        }
        for &idx in &component.pixels {
            raster[idx] = MAX_INTENSITY;
        }
        holes.push(component.clone());
    }
    tracing::trace!("Filled {} holes", holes.len());
    holes
}

/// Set every pixel not owned by `background_label` to foreground.
///
/// Used when background cannot be told apart from holes by intensity alone:
/// everything except the one designated region becomes foreground.
pub fn fill_non_background(raster: &mut Raster, labels: &LabelMap, background_label: u32) -> Result<()> {
    raster.ensure_same_size(labels.buffer(), "label map")?;
    for (px, &label) in raster.pixels_mut().iter_mut().zip(labels.labels()) {
        if label != background_label {
            *px = MAX_INTENSITY;
        }
    }
    Ok(())
}
