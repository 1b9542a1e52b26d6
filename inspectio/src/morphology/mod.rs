//! Binary morphology on 8-bit rasters.
//!
//! Foreground is exactly [`MAX_INTENSITY`]; every other sample counts as
//! background. Both operators read the current raster and build the result in
//! a separate buffer that is committed only after the full pass.
//!
//! # Border policy
//!
//! Erosion requires the full kernel area to be foreground, and samples outside
//! the raster never count. A region touching the border therefore loses every
//! pixel whose window leaves the image, even if the region is solid. This
//! matches the inspection pipelines' tuning and is kept deliberately.


use crate::common::{Buffer2, Raster};
use crate::constants::{MAX_INTENSITY, MIN_INTENSITY};
use crate::error::{Error, Result};

/// Erode with a `kernel_width` x `kernel_height` rectangle.
///
/// Half extents are `kernel_width / 2` and `kernel_height / 2`; for even sizes
/// the window is one sample wider than the kernel while the required count
/// stays `kernel_width * kernel_height`.
pub fn erode(raster: &mut Raster, kernel_width: usize, kernel_height: usize) -> Result<()> {
    if kernel_width == 0 || kernel_height == 0 {
        return Err(Error::InvalidKernel {
            width: kernel_width,
            height: kernel_height,
        });
    }
    if raster.is_empty() {
        return Ok(());
    }

    let width = raster.width();
    let height = raster.height();
    let half_x = kernel_width / 2;
    let half_y = kernel_height / 2;
    let required = kernel_width * kernel_height;

    let integral = foreground_integral(raster);
    let mut output = vec![MIN_INTENSITY; width * height];

    for y in 0..height {
        let y0 = y.saturating_sub(half_y);
        let y1 = (y + half_y).min(height - 1);
        for x in 0..width {
            let x0 = x.saturating_sub(half_x);
            let x1 = (x + half_x).min(width - 1);
            if window_sum(&integral, x0, x1, y0, y1) >= required {
                output[y * width + x] = MAX_INTENSITY;
            }
        }
    }

    raster.pixels_mut().copy_from_slice(&output);
    Ok(())
}

/// Dilate with a `square_width` x `square_width` square.
///
/// Every foreground sample spreads foreground to the in-bounds neighbors
/// within `(square_width - 1) / 2` on both axes. All other samples become
/// background.
pub fn dilate(raster: &mut Raster, square_width: usize) -> Result<()> {
    if square_width == 0 {
        return Err(Error::InvalidKernel {
            width: square_width,
            height: square_width,
        });
    }
    if raster.is_empty() {
        return Ok(());
    }

    let width = raster.width();
    let height = raster.height();
    let radius = (square_width - 1) / 2;

    // Separable: horizontal spread into a row mask, then vertical spread.
    let mut horizontal = vec![false; width * height];
    for y in 0..height {
        let row = &raster.pixels()[y * width..(y + 1) * width];
        let out = &mut horizontal[y * width..(y + 1) * width];
        for (x, &v) in row.iter().enumerate() {
            if v == MAX_INTENSITY {
                let x0 = x.saturating_sub(radius);
                let x1 = (x + radius).min(width - 1);
                out[x0..=x1].fill(true);
            }
        }
    }

    let mut output = vec![MIN_INTENSITY; width * height];
    for y in 0..height {
        for x in 0..width {
            if horizontal[y * width + x] {
                let y0 = y.saturating_sub(radius);
                let y1 = (y + radius).min(height - 1);
                for yy in y0..=y1 {
                    output[yy * width + x] = MAX_INTENSITY;
                }
            }
        }
    }

    raster.pixels_mut().copy_from_slice(&output);
    Ok(())
}

/// Summed-area table of foreground samples with a zero guard row/column.
fn foreground_integral(raster: &Raster) -> Buffer2<usize> {
    let width = raster.width();
    let height = raster.height();
    let mut integral = Buffer2::new_default(width + 1, height + 1);

    for y in 0..height {
        let mut row_sum = 0usize;
        for x in 0..width {
            if raster[(x, y)] == MAX_INTENSITY {
                row_sum += 1;
            }
            integral[(x + 1, y + 1)] = integral[(x + 1, y)] + row_sum;
        }
    }

    integral
}

/// Foreground count in the inclusive window `[x0, x1] x [y0, y1]`.
#[inline]
fn window_sum(integral: &Buffer2<usize>, x0: usize, x1: usize, y0: usize, y1: usize) -> usize {
    integral[(x1 + 1, y1 + 1)] + integral[(x0, y0)] - integral[(x0, y1 + 1)] - integral[(x1 + 1, y0)]
}
