//! Shared intensity and labeling constants.

/// Background sample value of a binarized raster.
pub const MIN_INTENSITY: u8 = 0;

/// Foreground sample value of a binarized raster.
pub const MAX_INTENSITY: u8 = 255;

/// Sample value used to annotate flagged defects and measurements.
///
/// Sits between [`MIN_INTENSITY`] and [`MAX_INTENSITY`] so annotations stay
/// visible on both background and foreground.
pub const HIGHLIGHT_INTENSITY: u8 = 128;

/// Label conventionally owned by the background region.
///
/// Labels are assigned in raster-scan order, so label 0 is whatever region
/// contains the top-left pixel. Pipelines treat it as background; nothing in
/// the labeler guarantees it.
pub const BACKGROUND_LABEL: u32 = 0;
