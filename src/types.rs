//! Geometry and configuration types for the grid.
//!
//! This module provides the plain 2D geometry carried through the API and a
//! serializable configuration with minimal complexity.

use serde::de::Error;
use serde::{Deserialize, Serialize};

use crate::cell::CellCoord;

/// A 2D position.
///
/// # Examples
///
/// ```
/// use broadgrid::Point2;
///
/// let p = Point2::new(120.0, -48.5);
/// assert_eq!(p.x, 120.0);
/// assert!(p.is_finite());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2 {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
}

impl Point2 {
    /// Create a new position from x and y coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Whether both coordinates are finite (not NaN or infinite).
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Width/height extent of an axis-aligned rectangle.
///
/// Negative components are accepted and normalized by swapping the rectangle
/// bounds, so `(origin, extent)` describes the same footprint as
/// `(origin + extent, -extent)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent2 {
    /// Width along the x axis
    pub w: f64,
    /// Height along the y axis
    pub h: f64,
}

impl Extent2 {
    /// Create a new extent from width and height.
    pub fn new(w: f64, h: f64) -> Self {
        Self { w, h }
    }

    /// Whether both components are finite (not NaN or infinite).
    pub fn is_finite(&self) -> bool {
        self.w.is_finite() && self.h.is_finite()
    }
}

/// Grid configuration
///
/// This configuration is designed to be easily serializable and loadable
/// from JSON while keeping complexity minimal.
///
/// # Example
///
/// ```rust
/// use broadgrid::Config;
///
/// // Create default config
/// let config = Config::default();
///
/// // Load from JSON
/// let json = r#"{
///     "cell_size": 32.0,
///     "max_cells": 4096
/// }"#;
/// let config: Config = serde_json::from_str(json).unwrap();
/// assert_eq!(config.cell_size, 32.0);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Side length of one square grid cell, in world units (default: 64)
    ///
    /// The dominant tuning knob: smaller cells give tighter candidate sets
    /// but more buckets; larger cells give cheaper queries but a coarser
    /// false-positive rate.
    #[serde(default = "Config::default_cell_size")]
    pub cell_size: f64,

    /// Upper bound on materialized cells (None means unbounded)
    ///
    /// When set, a mutation that would create buckets past the bound fails
    /// with `CapacityExceeded` and leaves the index untouched.
    #[serde(default)]
    pub max_cells: Option<usize>,
}

impl Config {
    const fn default_cell_size() -> f64 {
        64.0
    }

    /// Create a configuration with the given cell size.
    pub fn with_cell_size(cell_size: f64) -> Self {
        assert!(
            cell_size.is_finite() && cell_size > 0.0,
            "Cell size must be positive and finite"
        );

        Self {
            cell_size,
            max_cells: None,
        }
    }

    /// Bound the number of cells the index may materialize.
    pub fn with_max_cells(mut self, limit: usize) -> Self {
        assert!(limit > 0, "Cell limit must be greater than zero");
        self.max_cells = Some(limit);
        self
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if !self.cell_size.is_finite() {
            return Err("Cell size must be finite (not NaN or infinity)".to_string());
        }

        if self.cell_size <= 0.0 {
            return Err("Cell size must be positive".to_string());
        }

        if let Some(limit) = self.max_cells
            && limit == 0
        {
            return Err("Cell limit must be greater than zero".to_string());
        }

        Ok(())
    }

    /// Load configuration from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: Config = serde_json::from_str(json)?;
        if let Err(e) = config.validate() {
            return Err(Error::custom(e));
        }
        Ok(config)
    }

    /// Save configuration as JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cell_size: Self::default_cell_size(),
            max_cells: None,
        }
    }
}

/// Statistics for a single grid cell.
#[derive(Debug, Clone)]
pub struct CellStats {
    /// The quantized coordinate of this cell
    pub coord: CellCoord,
    /// Number of identifiers in this cell's bucket
    pub entry_count: usize,
}

/// Overall statistics for the grid.
#[derive(Debug, Clone)]
pub struct GridStats {
    /// Total number of materialized cells (including empty ones)
    pub cell_count: usize,
    /// Number of cells whose bucket is non-empty
    pub occupied_cells: usize,
    /// Total entries across all cells (an identifier spanning several cells
    /// is counted once per cell)
    pub total_entries: usize,
    /// Average entries per materialized cell
    pub avg_entries_per_cell: f64,
    /// Cell side length of the grid
    pub cell_size: f64,
    /// Per-cell statistics, most occupied first
    pub cells: Vec<CellStats>,
}
