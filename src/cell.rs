//! Cell coordinates and position quantization.

use serde::{Deserialize, Serialize};

use crate::types::Point2;

/// Discrete coordinate of one square grid cell.
///
/// Two positions quantize to the same `CellCoord` iff their coordinates,
/// divided by the cell size, floor to the same integer on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellCoord {
    /// Cell column (floored x / cell size)
    pub x: i32,
    /// Cell row (floored y / cell size)
    pub y: i32,
}

impl CellCoord {
    /// Create a cell coordinate from its column and row.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Quantize a position given the precomputed inverse cell size.
    pub(crate) fn quantize(p: Point2, inv_cell_size: f64) -> Self {
        Self {
            x: (p.x * inv_cell_size).floor() as i32,
            y: (p.y * inv_cell_size).floor() as i32,
        }
    }
}
