//! Inspectio - connected-component analysis for 8-bit grayscale rasters.
//!
//! This library provides:
//! - Connected component labeling over equal-intensity regions
//! - Set predicates between components (intersection, containment, centering)
//! - Binary morphology (rectangular erosion, square dilation)
//! - Hole filling and component-level raster edits
//! - Three inspection pipelines: circuit boards, bottle fill levels, FISH
//!   signal counting
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use inspectio::{inspect_bottles, BottlesConfig, BottlesStage, Raster};
//!
//! let mut raster = Raster::from_pixels(width, height, pixels)?;
//! let report = inspect_bottles(&mut raster, &BottlesConfig::default(), BottlesStage::Inspection)?;
//!
//! for bottle in &report.bottles {
//!     println!("Bottle {}: {}", bottle.label, bottle.status);
//! }
//! ```

pub mod common;
pub mod config;
pub mod constants;
mod denoise;
mod error;
mod filter;
pub mod geometry;
mod holes;
pub mod labeling;
pub mod morphology;
pub mod pipelines;
mod threshold;

#[cfg(test)]
pub(crate) mod testing;

// ============================================================================
// Core types
// ============================================================================

pub use common::{Buffer2, Raster};
pub use error::{Error, Result};
pub use geometry::{Aabb, PixelSet};
pub use labeling::{label_components, label_components_fresh, Component, LabelMap};

// ============================================================================
// Primitives
// ============================================================================

pub use denoise::remove_salt_and_pepper;
pub use filter::{filter_by_intensity, paint, remove_small_components};
pub use geometry::{bounding_box, centered_within, contains, intersects};
pub use holes::{fill_holes, fill_non_background};
pub use morphology::{dilate, erode};
pub use threshold::{binarize, reverse_binarize};

// ============================================================================
// Pipelines
// ============================================================================

pub use config::{BottlesConfig, CircuitBoardConfig, FishConfig};
pub use pipelines::bottles::{inspect_bottles, BottleInspection, BottlesReport, BottlesStage, FillStatus};
pub use pipelines::circuit_board::{
    classify_island_shape, inspect_circuit_board, is_soldering_island_correct, remove_wires, CircuitBoardReport,
    CircuitBoardStage, HoleStatus, IslandShape, IslandVerdict, WireVerdict,
};
pub use pipelines::fish::{count_fish_signals, CellSignals, FishReport, FishStage};
