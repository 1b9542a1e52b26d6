//! Bottle fill-level inspection.
//!
//! Expects bright empty glass, mid-gray liquid and a dark backdrop. The
//! liquid surface of every bottle is compared against a target row in the
//! bottleneck, with a tolerance band above and below.


use strum_macros::{Display, EnumIter};

use crate::common::Raster;
use crate::config::BottlesConfig;
use crate::error::Result;
use crate::filter::{paint, remove_small_components};
use crate::geometry::{Aabb, PixelSet};
use crate::holes::fill_holes;
use crate::labeling::{label_components, Component, LabelMap};
use crate::morphology::{dilate, erode};
use crate::threshold::{binarize, reverse_binarize};

use super::foreground;

/// Where [`inspect_bottles`] stops.
#[derive(Debug, Display, EnumIter, Copy, Clone, Default, PartialEq, Eq)]
pub enum BottlesStage {
    /// Leave the cleaned liquid mask in the raster.
    LiquidSegmentation,
    /// Full run with liquids colored by fill status.
    #[default]
    Inspection,
}

#[derive(Debug, Display, Copy, Clone, PartialEq, Eq)]
pub enum FillStatus {
    Correct,
    Underfilled,
    Overfilled,
    LiquidNotFound,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BottleInspection {
    pub label: u32,
    pub bbox: Aabb,
    /// Topmost liquid row, if a liquid was found in the bottle.
    pub liquid_top: Option<usize>,
    pub status: FillStatus,
}

#[derive(Debug, Clone, Default)]
pub struct BottlesReport {
    pub stage: BottlesStage,
    pub specks_removed: usize,
    pub fragments_removed: usize,
    pub liquid_count: usize,
    pub bottles: Vec<BottleInspection>,
}

impl BottlesReport {
    pub fn count(&self, status: FillStatus) -> usize {
        self.bottles.iter().filter(|b| b.status == status).count()
    }
}

/// Run the bottle inspection up to `stage`.
///
/// For [`BottlesStage::Inspection`] the raster ends up as the bottle mask
/// with each bottle's liquid painted by status (highlight when correct,
/// [`BottlesConfig::underfilled_intensity`] or
/// [`BottlesConfig::overfilled_intensity`] otherwise) and the two band rows
/// drawn at the highlight intensity.
pub fn inspect_bottles(raster: &mut Raster, config: &BottlesConfig, stage: BottlesStage) -> Result<BottlesReport> {
    config.validate()?;
    raster.ensure_not_empty()?;

    let width = raster.width();
    let mut labels = LabelMap::for_raster(raster);
    let mut report = BottlesReport {
        stage,
        ..Default::default()
    };

    // Step 1: Liquid mask from the mid-gray band
    let mut liquid = raster.clone();
    reverse_binarize(&mut liquid, config.backdrop_cutoff);
    binarize(&mut liquid, config.liquid_cutoff);
    let components = label_components(&liquid, &mut labels)?;
    report.specks_removed = remove_small_components(&mut liquid, &components, config.speck_min_size);

    // Step 2: Opening, then drop fragments it left behind
    erode(&mut liquid, config.erosion_kernel, config.erosion_kernel)?;
    dilate(&mut liquid, config.dilation_width)?;
    let components = label_components(&liquid, &mut labels)?;
    report.fragments_removed = remove_small_components(&mut liquid, &components, config.liquid_min_size);
    let components = label_components(&liquid, &mut labels)?;
    fill_holes(&mut liquid, &components);
    let liquids = foreground(label_components(&liquid, &mut labels)?);
    report.liquid_count = liquids.len();
    tracing::debug!(
        "Liquid mask: {} liquids, {} specks and {} fragments removed",
        liquids.len(),
        report.specks_removed,
        report.fragments_removed
    );

    if stage == BottlesStage::LiquidSegmentation {
        raster.copy_from(&liquid)?;
        return Ok(report);
    }

    // Step 3: Bottles
    binarize(raster, config.bottle_cutoff);
    let components = label_components(raster, &mut labels)?;
    fill_holes(raster, &components);
    let bottles = foreground(label_components(raster, &mut labels)?);

    // Step 4: Fill levels
    for bottle in &bottles {
        let set = PixelSet::from_component(bottle);
        let inspection = match liquids.iter().find(|l| set.intersects(l)) {
            Some(liquid) => inspect_fill(raster, bottle, liquid, config),
            None => {
                tracing::warn!("Bottle {}: liquid not found", bottle.label);
                BottleInspection {
                    label: bottle.label,
                    bbox: bottle.bounding_box(width),
                    liquid_top: None,
                    status: FillStatus::LiquidNotFound,
                }
            }
        };
        report.bottles.push(inspection);
    }

    draw_row(raster, config.fill_band_bottom(), config.highlight_intensity);
    draw_row(raster, config.fill_band_top(), config.highlight_intensity);

    tracing::info!(
        "Bottles: {} inspected, {} underfilled, {} overfilled, {} without liquid",
        report.bottles.len(),
        report.count(FillStatus::Underfilled),
        report.count(FillStatus::Overfilled),
        report.count(FillStatus::LiquidNotFound)
    );

    Ok(report)
}

fn inspect_fill(raster: &mut Raster, bottle: &Component, liquid: &Component, config: &BottlesConfig) -> BottleInspection {
    let width = raster.width();
    let top = liquid.bounding_box(width).y_min;
    let row = top as i64;

    let status = if row > config.fill_band_bottom() {
        tracing::warn!("Bottle {}: underfilled, liquid top at row {}", bottle.label, top);
        paint(raster, liquid, config.underfilled_intensity);
        FillStatus::Underfilled
    } else if row < config.fill_band_top() {
        tracing::warn!("Bottle {}: overfilled, liquid top at row {}", bottle.label, top);
        paint(raster, liquid, config.overfilled_intensity);
        FillStatus::Overfilled
    } else {
        paint(raster, liquid, config.highlight_intensity);
        FillStatus::Correct
    };

    BottleInspection {
        label: bottle.label,
        bbox: bottle.bounding_box(width),
        liquid_top: Some(top),
        status,
    }
}

/// Paint a full row; rows outside the raster are skipped.
fn draw_row(raster: &mut Raster, row: i64, value: u8) {
    if row < 0 || row >= raster.height() as i64 {
        return;
    }
    let y = row as usize;
    for x in 0..raster.width() {
        raster[(x, y)] = value;
    }
}
