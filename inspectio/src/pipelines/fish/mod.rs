//! FISH (fluorescence in-situ hybridization) signal counting.
//!
//! Cells are segmented from the DAPI (blue) channel. Acridine (red) and FITC
//! (green) signals are segmented independently and attributed to every cell
//! they overlap.


use std::fmt;

use strum_macros::{Display, EnumIter};

use crate::common::Raster;
use crate::config::FishConfig;
use crate::constants::BACKGROUND_LABEL;
use crate::error::Result;
use crate::filter::paint;
use crate::geometry::PixelSet;
use crate::holes::fill_non_background;
use crate::labeling::{label_components, LabelMap};
use crate::morphology::{dilate, erode};
use crate::threshold::binarize;

use super::foreground;

/// Where [`count_fish_signals`] stops. Counting has no intermediate
/// checkpoint, so there is a single terminal stage.
#[derive(Debug, Display, EnumIter, Copy, Clone, Default, PartialEq, Eq)]
pub enum FishStage {
    #[default]
    SignalCount,
}

/// Signals overlapping one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellSignals {
    pub label: u32,
    pub acridine: usize,
    pub fitc: usize,
}

impl CellSignals {
    /// Acridine to FITC ratio, `None` when the cell has no FITC signal.
    pub fn ratio(&self) -> Option<f32> {
        (self.fitc > 0).then(|| self.acridine as f32 / self.fitc as f32)
    }
}

impl fmt::Display for CellSignals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Cell {}: {} acridine, {} FITC, ratio ",
            self.label, self.acridine, self.fitc
        )?;
        match self.ratio() {
            Some(ratio) => write!(f, "{ratio:.3}"),
            None => f.write_str("N/A"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FishReport {
    pub stage: FishStage,
    pub cells: Vec<CellSignals>,
    /// Acridine signals in the whole image, inside a cell or not.
    pub acridine_signal_count: usize,
    /// FITC signals in the whole image, inside a cell or not.
    pub fitc_signal_count: usize,
}

impl FishReport {
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Sum of per-cell acridine counts. A signal spanning two cells counts
    /// for both.
    pub fn total_acridine(&self) -> usize {
        self.cells.iter().map(|c| c.acridine).sum()
    }

    /// Sum of per-cell FITC counts.
    pub fn total_fitc(&self) -> usize {
        self.cells.iter().map(|c| c.fitc).sum()
    }
}

/// Segment cells and count the signals overlapping each one.
///
/// All three channels are binarized in place. The blue channel ends up as
/// the cell mask; if [`FishConfig::highlight_cell`] names a cell, the FITC
/// signals overlapping it are painted onto that mask at the highlight
/// intensity.
pub fn count_fish_signals(
    red: &mut Raster,
    green: &mut Raster,
    blue: &mut Raster,
    config: &FishConfig,
    stage: FishStage,
) -> Result<FishReport> {
    config.validate()?;
    blue.ensure_not_empty()?;
    blue.ensure_same_size(red, "acridine channel")?;
    blue.ensure_same_size(green, "FITC channel")?;

    let mut labels = LabelMap::for_raster(blue);
    let mut report = FishReport {
        stage,
        ..Default::default()
    };

    // Step 1: Cells from DAPI
    binarize(blue, config.dapi_cutoff);
    erode(blue, config.erosion_kernel, config.erosion_kernel)?;
    dilate(blue, config.dilation_width)?;
    label_components(blue, &mut labels)?;
    fill_non_background(blue, &labels, BACKGROUND_LABEL)?;
    let cells = foreground(label_components(blue, &mut labels)?);

    // Step 2: Signals
    binarize(red, config.acridine_cutoff);
    let acridine = foreground(label_components(red, &mut labels)?);
    binarize(green, config.fitc_cutoff);
    let fitc = foreground(label_components(green, &mut labels)?);
    report.acridine_signal_count = acridine.len();
    report.fitc_signal_count = fitc.len();
    tracing::debug!(
        "Segmented {} cells, {} acridine and {} FITC signals",
        cells.len(),
        acridine.len(),
        fitc.len()
    );

    // Step 3: Attribute signals to cells
    for cell in &cells {
        let set = PixelSet::from_component(cell);
        let highlight = config.highlight_cell == Some(cell.label);

        let acridine_count = acridine.iter().filter(|s| set.intersects(s)).count();
        let mut fitc_count = 0;
        for signal in fitc.iter().filter(|s| set.intersects(s)) {
            fitc_count += 1;
            if highlight {
                paint(blue, signal, config.highlight_intensity);
            }
        }

        let signals = CellSignals {
            label: cell.label,
            acridine: acridine_count,
            fitc: fitc_count,
        };
        tracing::info!("{}", signals);
        report.cells.push(signals);
    }

    tracing::info!(
        "FISH: {} cells, {} acridine and {} FITC signals inside cells",
        report.cell_count(),
        report.total_acridine(),
        report.total_fitc()
    );

    Ok(report)
}
