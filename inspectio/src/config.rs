//! Configuration for the inspection pipelines.
//!
//! One flat struct per pipeline. Defaults carry the tuning the pipelines were
//! built against; every struct can be loaded from YAML, with missing fields
//! falling back to the defaults.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::constants::HIGHLIGHT_INTENSITY;
use crate::error::{Error, Result};

// ============================================================================
// Circuit board
// ============================================================================

/// Circuit board trace and soldering island inspection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CircuitBoardConfig {
    /// Run the salt-and-pepper filter before segmentation.
    pub denoise: bool,
    /// Intensity of copper (traces and soldering islands) in the input.
    pub wire_intensity: u8,
    /// Intensity of other mounted components (connectors, pads).
    pub other_component_intensity: u8,
    /// Dilation square applied to the other-component mask.
    pub other_component_dilation: usize,
    /// Thickest run, in pixels, still treated as a wire when stripping traces.
    pub wire_max_thickness: usize,
    /// Components left after trace removal with fewer pixels are connectors,
    /// not soldering islands.
    pub soldering_island_min_size: usize,
    /// Components a wire must touch to count as connected.
    pub min_wire_connections: usize,
    /// Allowed hole/island center offset per axis, in pixels.
    pub hole_center_tolerance: usize,
    pub highlight_intensity: u8,
}

impl Default for CircuitBoardConfig {
    fn default() -> Self {
        Self {
            denoise: true,
            wire_intensity: 255,
            other_component_intensity: 96,
            other_component_dilation: 3,
            wire_max_thickness: 5,
            soldering_island_min_size: 60,
            min_wire_connections: 2,
            hole_center_tolerance: 1,
            highlight_intensity: HIGHLIGHT_INTENSITY,
        }
    }
}

impl CircuitBoardConfig {
    pub fn validate(&self) -> Result<()> {
        ensure_kernel("other_component_dilation", self.other_component_dilation)?;
        ensure_positive("wire_max_thickness", self.wire_max_thickness)?;
        if self.wire_intensity == self.other_component_intensity {
            return Err(Error::InvalidConfig {
                field: "other_component_intensity",
                reason: format!(
                    "must differ from wire_intensity ({})",
                    self.wire_intensity
                ),
            });
        }
        Ok(())
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = parse_yaml(yaml)?;
        config.validate()?;
        Ok(config)
    }
}

// ============================================================================
// Bottles
// ============================================================================

/// Bottle liquid fill-level inspection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BottlesConfig {
    /// Samples brighter than this are bright backdrop and are suppressed
    /// before the liquid threshold.
    pub backdrop_cutoff: i32,
    /// Threshold separating liquid from empty glass after backdrop removal.
    pub liquid_cutoff: i32,
    /// Threshold separating bottles from backdrop in the input image.
    pub bottle_cutoff: i32,
    /// Speck removal before noise closing.
    pub speck_min_size: usize,
    /// Liquid fragment removal after the opening.
    pub liquid_min_size: usize,
    pub erosion_kernel: usize,
    pub dilation_width: usize,
    /// First row of the bottleneck.
    pub bottleneck_start: i64,
    /// Last row of the bottleneck.
    pub bottleneck_end: i64,
    /// Rows above the target level still accepted.
    pub liquid_error_top: i64,
    /// Rows below the target level still accepted.
    pub liquid_error_bottom: i64,
    pub highlight_intensity: u8,
    pub underfilled_intensity: u8,
    pub overfilled_intensity: u8,
}

impl Default for BottlesConfig {
    fn default() -> Self {
        Self {
            backdrop_cutoff: 190,
            liquid_cutoff: 20,
            bottle_cutoff: 20,
            speck_min_size: 10,
            liquid_min_size: 10,
            erosion_kernel: 3,
            dilation_width: 3,
            bottleneck_start: 64,
            bottleneck_end: 89,
            liquid_error_top: 3,
            liquid_error_bottom: 3,
            highlight_intensity: HIGHLIGHT_INTENSITY,
            underfilled_intensity: 200,
            overfilled_intensity: 50,
        }
    }
}

impl BottlesConfig {
    /// Target row of the liquid surface: the middle of the bottleneck.
    #[inline]
    pub fn liquid_limit(&self) -> i64 {
        (self.bottleneck_start + self.bottleneck_end) / 2
    }

    /// Highest accepted liquid top row (smallest y).
    #[inline]
    pub fn fill_band_top(&self) -> i64 {
        self.liquid_limit() - self.liquid_error_top
    }

    /// Lowest accepted liquid top row (largest y).
    #[inline]
    pub fn fill_band_bottom(&self) -> i64 {
        self.liquid_limit() + self.liquid_error_bottom
    }

    pub fn validate(&self) -> Result<()> {
        ensure_kernel("erosion_kernel", self.erosion_kernel)?;
        ensure_kernel("dilation_width", self.dilation_width)?;
        if self.bottleneck_start > self.bottleneck_end {
            return Err(Error::InvalidConfig {
                field: "bottleneck_start",
                reason: format!(
                    "{} is below bottleneck_end {}",
                    self.bottleneck_start, self.bottleneck_end
                ),
            });
        }
        if self.liquid_error_top < 0 || self.liquid_error_bottom < 0 {
            return Err(Error::InvalidConfig {
                field: "liquid_error_top",
                reason: "fill tolerances must be non-negative".to_string(),
            });
        }
        Ok(())
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = parse_yaml(yaml)?;
        config.validate()?;
        Ok(config)
    }
}

// ============================================================================
// FISH
// ============================================================================

/// Fluorescence in-situ hybridization cell and signal counting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FishConfig {
    /// DAPI (blue) nucleus threshold.
    pub dapi_cutoff: i32,
    /// Acridine (red) signal threshold.
    pub acridine_cutoff: i32,
    /// FITC (green) signal threshold.
    pub fitc_cutoff: i32,
    pub erosion_kernel: usize,
    pub dilation_width: usize,
    /// Paint the FITC signals of this cell label onto the blue channel.
    pub highlight_cell: Option<u32>,
    pub highlight_intensity: u8,
}

impl Default for FishConfig {
    fn default() -> Self {
        Self {
            dapi_cutoff: 20,
            acridine_cutoff: 130,
            fitc_cutoff: 30,
            erosion_kernel: 5,
            dilation_width: 5,
            highlight_cell: None,
            highlight_intensity: HIGHLIGHT_INTENSITY,
        }
    }
}

impl FishConfig {
    pub fn validate(&self) -> Result<()> {
        ensure_kernel("erosion_kernel", self.erosion_kernel)?;
        ensure_kernel("dilation_width", self.dilation_width)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = parse_yaml(yaml)?;
        config.validate()?;
        Ok(config)
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn parse_yaml<T: DeserializeOwned + 'static>(yaml: &str) -> Result<T> {
    serde_yml::from_str(yaml).map_err(|e| Error::ConfigParse(e.to_string()))
}

fn ensure_kernel(field: &'static str, size: usize) -> Result<()> {
    if size == 0 {
        return Err(Error::InvalidConfig {
            field,
            reason: "kernel size must be at least 1".to_string(),
        });
    }
    Ok(())
}

fn ensure_positive(field: &'static str, value: usize) -> Result<()> {
    if value == 0 {
        return Err(Error::InvalidConfig {
            field,
            reason: "must be positive".to_string(),
        });
    }
    Ok(())
}
