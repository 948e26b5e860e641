//! Uniform-grid spatial hash for 2D broad-phase proximity filtering.
//!
//! ```rust
//! use broadgrid::{Extent2, Point2, SpatialHash};
//!
//! let mut grid: SpatialHash<u64> = SpatialHash::new(64.0);
//! grid.insert_point(1, Point2::new(20.0, 20.0))?;
//! grid.insert_rect(2, Point2::new(100.0, 100.0), Extent2::new(80.0, 40.0))?;
//!
//! let hits = grid.query_rect(Point2::new(0.0, 0.0), Extent2::new(200.0, 200.0));
//! assert_eq!(hits.len(), 2);
//! # Ok::<(), broadgrid::GridError>(())
//! ```

pub mod cell;
pub mod error;
pub mod grid;
pub mod types;
pub mod validation;

pub use cell::CellCoord;
pub use error::{GridError, Result};
pub use grid::{QueryResults, SpatialHash};
pub use types::{CellStats, Config, Extent2, GridStats, Point2};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{Config, Extent2, GridError, Point2, Result, SpatialHash};

    pub use crate::{CellCoord, CellStats, GridStats, QueryResults};
}
