//! Inspection pipelines built on the labeling and morphology primitives.
//!
//! Each pipeline rewrites its input raster in place into an annotated result
//! and returns a report. A stage selector can stop a run early, leaving the
//! intermediate mask of that stage in the raster instead.

pub mod bottles;
pub mod circuit_board;
pub mod fish;

use crate::constants::MAX_INTENSITY;
use crate::labeling::Component;

/// Keep the foreground objects of a binary labeling: non-background
/// components of [`MAX_INTENSITY`].
pub(crate) fn foreground(components: Vec<Component>) -> Vec<Component> {
    components
        .into_iter()
        .filter(|c| !c.is_background() && c.intensity == MAX_INTENSITY)
        .collect()
}
