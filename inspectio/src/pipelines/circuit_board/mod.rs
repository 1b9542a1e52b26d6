//! Circuit board trace and soldering island inspection.
//!
//! The input holds copper at [`CircuitBoardConfig::wire_intensity`] and other
//! mounted parts at [`CircuitBoardConfig::other_component_intensity`]. The run
//! reports wires that do not connect at least two things, and soldering
//! islands that are misshapen or whose drilled hole is missing or off-center.
//! Problems are painted at the highlight intensity onto the copper mask.
//!
//! Pipeline stages:
//! 1. Optional salt-and-pepper suppression
//! 2. Other-component mask (band select, dilation)
//! 3. Copper mask with holes filled; every copper component is a wire net
//! 4. Trace stripping, leaving soldering islands and connector remnants
//! 5. Wire connectivity, connector removal, island shape and hole checks

#[cfg(test)]
mod tests;

use std::f64::consts::PI;

use strum_macros::{Display, EnumIter};

use crate::common::Raster;
use crate::config::CircuitBoardConfig;
use crate::constants::{MAX_INTENSITY, MIN_INTENSITY};
use crate::denoise::remove_salt_and_pepper;
use crate::error::Result;
use crate::filter::{filter_by_intensity, paint};
use crate::geometry::{centered_within, Aabb, PixelSet};
use crate::holes::fill_holes;
use crate::labeling::{label_components, Component, LabelMap};
use crate::morphology::dilate;

use super::foreground;

/// Where [`inspect_circuit_board`] stops.
#[derive(Debug, Display, EnumIter, Copy, Clone, Default, PartialEq, Eq)]
pub enum CircuitBoardStage {
    /// Leave the hole-filled copper mask in the raster.
    WireSegmentation,
    /// Leave the soldering islands, traces and connectors removed.
    IslandSegmentation,
    /// Full run with defects highlighted.
    #[default]
    Inspection,
}

#[derive(Debug, Display, Copy, Clone, PartialEq, Eq)]
pub enum IslandShape {
    Circular,
    Rectangular,
    Defective,
}

#[derive(Debug, Display, Copy, Clone, PartialEq, Eq)]
pub enum HoleStatus {
    Centered,
    OffCenter,
    Missing,
}

/// Connectivity of one copper net.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireVerdict {
    pub label: u32,
    pub pixel_count: usize,
    /// Soldering islands, connector remnants and other components touched.
    pub connections: usize,
    pub connected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IslandVerdict {
    pub label: u32,
    pub bbox: Aabb,
    pub shape: IslandShape,
    pub hole: HoleStatus,
}

impl IslandVerdict {
    #[inline]
    pub fn is_correct(&self) -> bool {
        self.shape != IslandShape::Defective && self.hole == HoleStatus::Centered
    }
}

/// Counts and verdicts from one run.
///
/// Fields belonging to stages after the requested one stay empty.
#[derive(Debug, Clone, Default)]
pub struct CircuitBoardReport {
    pub stage: CircuitBoardStage,
    pub other_component_count: usize,
    pub hole_count: usize,
    pub wire_count: usize,
    pub connectors_removed: usize,
    pub wires: Vec<WireVerdict>,
    pub islands: Vec<IslandVerdict>,
}

impl CircuitBoardReport {
    pub fn bad_wire_count(&self) -> usize {
        self.wires.iter().filter(|w| !w.connected).count()
    }

    pub fn island_count(&self) -> usize {
        self.islands.len()
    }

    pub fn defective_island_count(&self) -> usize {
        self.islands.iter().filter(|i| !i.is_correct()).count()
    }
}

/// Run the circuit board inspection up to `stage`.
///
/// `raster` is overwritten with the mask of the last stage run. For
/// [`CircuitBoardStage::Inspection`] that is the soldering island mask with
/// bad wire nets, misshapen islands and off-center holes painted at the
/// highlight intensity.
pub fn inspect_circuit_board(
    raster: &mut Raster,
    config: &CircuitBoardConfig,
    stage: CircuitBoardStage,
) -> Result<CircuitBoardReport> {
    config.validate()?;
    raster.ensure_not_empty()?;

    let width = raster.width();
    let mut labels = LabelMap::for_raster(raster);
    let mut report = CircuitBoardReport {
        stage,
        ..Default::default()
    };

    // Step 1: Noise
    if config.denoise {
        remove_salt_and_pepper(raster);
    }

    // Step 2: Other components, grown so that wires ending next to them touch
    let mut others = raster.clone();
    let components = label_components(&others, &mut labels)?;
    filter_by_intensity(&mut others, &components, config.other_component_intensity);
    dilate(&mut others, config.other_component_dilation)?;
    let other_components = foreground(label_components(&others, &mut labels)?);
    report.other_component_count = other_components.len();

    // Step 3: Copper nets
    let components = label_components(raster, &mut labels)?;
    filter_by_intensity(raster, &components, config.wire_intensity);
    let components = label_components(raster, &mut labels)?;
    let holes = fill_holes(raster, &components);
    let wires = foreground(label_components(raster, &mut labels)?);
    report.hole_count = holes.len();
    report.wire_count = wires.len();
    tracing::debug!(
        "Found {} wire nets, {} holes, {} other components",
        wires.len(),
        holes.len(),
        other_components.len()
    );

    if stage == CircuitBoardStage::WireSegmentation {
        return Ok(report);
    }

    // Step 4: Strip traces
    let erased = remove_wires(raster, config.wire_max_thickness);
    tracing::debug!("Stripped {} trace pixels", erased);
    let attachments = foreground(label_components(raster, &mut labels)?);

    // Step 5a: Wire connectivity against islands, connectors and other parts
    report.wires = wires
        .iter()
        .map(|wire| {
            let set = PixelSet::from_component(wire);
            let connections = attachments
                .iter()
                .chain(other_components.iter())
                .filter(|c| set.intersects(c))
                .count();
            WireVerdict {
                label: wire.label,
                pixel_count: wire.len(),
                connections,
                connected: connections >= config.min_wire_connections,
            }
        })
        .collect();

    // Step 5b: Connector remnants are too small to be soldering islands
    for attachment in &attachments {
        if attachment.len() < config.soldering_island_min_size {
            paint(raster, attachment, MIN_INTENSITY);
            report.connectors_removed += 1;
        }
    }
    let islands = foreground(label_components(raster, &mut labels)?);

    if stage == CircuitBoardStage::IslandSegmentation {
        return Ok(report);
    }

    // Step 5c: Islands
    for island in &islands {
        let set = PixelSet::from_component(island);
        let shape = classify_island_shape(island, width);
        if shape == IslandShape::Defective {
            tracing::warn!("Soldering island {} is misshapen", island.label);
            paint(raster, island, config.highlight_intensity);
        }

        let mut hole = HoleStatus::Missing;
        for inner in holes.iter().filter(|h| set.contains(h)) {
            if centered_within(island, inner, config.hole_center_tolerance, width) {
                if hole == HoleStatus::Missing {
                    hole = HoleStatus::Centered;
                }
            } else {
                hole = HoleStatus::OffCenter;
                paint(raster, inner, config.highlight_intensity);
            }
        }
        match hole {
            HoleStatus::Missing => {
                tracing::warn!("Soldering island {} has no hole", island.label)
            }
            HoleStatus::OffCenter => {
                tracing::warn!("Soldering island {} has an off-center hole", island.label)
            }
            HoleStatus::Centered => {}
        }

        report.islands.push(IslandVerdict {
            label: island.label,
            bbox: island.bounding_box(width),
            shape,
            hole,
        });
    }

    // Step 5d: Bad wires
    for (wire, verdict) in wires.iter().zip(&report.wires) {
        if !verdict.connected {
            tracing::warn!(
                "Wire net {} touches {} components",
                verdict.label,
                verdict.connections
            );
            paint(raster, wire, config.highlight_intensity);
        }
    }

    tracing::info!(
        "Circuit board: {} wire nets ({} bad), {} soldering islands ({} defective)",
        report.wire_count,
        report.bad_wire_count(),
        report.island_count(),
        report.defective_island_count()
    );

    Ok(report)
}

/// Strip thin traces from a binary copper mask in place.
///
/// Scanning from `(1, 1)` in raster order, a foreground pixel with background
/// directly above starts a vertical run; if background (or the image edge)
/// follows within `max_thickness` samples below, the whole run is erased.
/// The same test runs horizontally with background directly to the left.
/// Runs thicker than `max_thickness` in both directions survive, so solid
/// islands keep their shape while traces of at most that width disappear.
///
/// Erasing is sequential, so earlier erasures are visible to later tests.
/// Returns the number of pixels erased.
pub fn remove_wires(raster: &mut Raster, max_thickness: usize) -> usize {
    let width = raster.width();
    let height = raster.height();
    let mut erased = 0;

    for y in 1..height {
        for x in 1..width {
            if raster[(x, y)] != MAX_INTENSITY {
                continue;
            }

            if raster[(x, y - 1)] == MIN_INTENSITY
                && run_ends_within(raster, x, y, (0, 1), max_thickness)
            {
                let mut yy = y;
                while yy < height && raster[(x, yy)] == MAX_INTENSITY {
                    raster[(x, yy)] = MIN_INTENSITY;
                    erased += 1;
                    yy += 1;
                }
            }

            if raster[(x, y)] == MAX_INTENSITY
                && raster[(x - 1, y)] == MIN_INTENSITY
                && run_ends_within(raster, x, y, (1, 0), max_thickness)
            {
                let mut xx = x;
                while xx < width && raster[(xx, y)] == MAX_INTENSITY {
                    raster[(xx, y)] = MIN_INTENSITY;
                    erased += 1;
                    xx += 1;
                }
            }
        }
    }

    erased
}

/// Whether background, or the image edge, appears within `max_len` steps of
/// `(x, y)` along `step`.
fn run_ends_within(raster: &Raster, x: usize, y: usize, step: (usize, usize), max_len: usize) -> bool {
    (1..=max_len).any(|k| {
        let nx = x + k * step.0;
        let ny = y + k * step.1;
        nx >= raster.width() || ny >= raster.height() || raster[(nx, ny)] == MIN_INTENSITY
    })
}

/// Classify a soldering island by its bounding box and pixel count.
///
/// Circular when the box is square within 10% of its width and the area is
/// within 10% of the inscribed disk's. Otherwise rectangular when the island
/// fills its box exactly, else defective.
pub fn classify_island_shape(island: &Component, width: usize) -> IslandShape {
    let bbox = island.bounding_box(width);
    let dx = bbox.width() as f64;
    let dy = bbox.height() as f64;
    let area = island.len() as f64;
    let radius = dx / 2.0;

    if (dx - dy).abs() < dx / 10.0 && (area - PI * radius * radius).abs() < area / 10.0 {
        IslandShape::Circular
    } else if bbox.area() == island.len() {
        IslandShape::Rectangular
    } else {
        IslandShape::Defective
    }
}

/// Whether a soldering island is circular or rectangular.
#[inline]
pub fn is_soldering_island_correct(island: &Component, width: usize) -> bool {
    classify_island_shape(island, width) != IslandShape::Defective
}
