//! Intensity thresholding.
//!
//! Both variants operate in place and are total: a cutoff outside the sample
//! range simply yields an all-foreground or all-background raster.

use crate::common::Raster;
use crate::constants::{MAX_INTENSITY, MIN_INTENSITY};

/// Binarize: samples strictly above `cutoff` become [`MAX_INTENSITY`],
/// everything else [`MIN_INTENSITY`].
pub fn binarize(raster: &mut Raster, cutoff: i32) {
    for px in raster.pixels_mut() {
        *px = if i32::from(*px) > cutoff {
            MAX_INTENSITY
        } else {
            MIN_INTENSITY
        };
    }
}

/// Suppress bright samples: values strictly above `cutoff` become
/// [`MIN_INTENSITY`], all others are left untouched.
///
/// Used to knock out a bright background while keeping the remaining
/// intensities for a later [`binarize`].
pub fn reverse_binarize(raster: &mut Raster, cutoff: i32) {
    for px in raster.pixels_mut() {
        if i32::from(*px) > cutoff {
            *px = MIN_INTENSITY;
        }
    }
}
