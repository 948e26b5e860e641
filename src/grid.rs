//! The uniform-grid spatial hash.
//!
//! This module provides the index structure that accelerates broad-phase
//! proximity filtering: positions quantize to square cells, each cell owns a
//! set of caller-supplied identifiers, and queries union the cells a shape
//! touches into a reusable result buffer.

use std::hash::Hash;

use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use crate::cell::CellCoord;
use crate::error::{GridError, Result};
use crate::types::{CellStats, Config, Extent2, GridStats, Point2};
use crate::validation::{validate_extent, validate_position};

/// Set of target identifiers stored in one grid cell.
type Bucket<T> = FxHashSet<T>;

/// Transient list of cells touched by one operation.
type CellSpan = SmallVec<[CellCoord; 16]>;

/// Borrowed view over the identifiers matched by the most recent query.
///
/// The view borrows the index's internal result buffer, so it stays valid
/// exactly until the next query or mutation on the same index; the borrow
/// checker rejects code that holds it longer. Call [`QueryResults::to_vec`]
/// to copy matches out when they must be retained.
#[derive(Debug)]
pub struct QueryResults<'a, T> {
    hits: &'a FxHashSet<T>,
}

impl<'a, T: Eq + Hash + Clone> QueryResults<'a, T> {
    /// Number of matched identifiers.
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    /// Whether the query matched nothing.
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Whether a specific identifier was matched.
    pub fn contains(&self, id: &T) -> bool {
        self.hits.contains(id)
    }

    /// Iterate over the matched identifiers (no meaningful order).
    pub fn iter(&self) -> std::collections::hash_set::Iter<'a, T> {
        self.hits.iter()
    }

    /// Copy the matched identifiers out of the index.
    pub fn to_vec(&self) -> Vec<T> {
        self.hits.iter().cloned().collect()
    }
}

impl<'a, T> IntoIterator for QueryResults<'a, T> {
    type Item = &'a T;
    type IntoIter = std::collections::hash_set::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.hits.iter()
    }
}

/// A uniform-grid spatial hash over 2D positions.
///
/// # Architecture
///
/// The index maintains a flat two-level structure:
/// 1. Top level: `FxHashMap<CellCoord, Bucket>`
/// 2. Bottom level: `Bucket`, a hash set of identifiers
///
/// ```text
/// SpatialHash
/// ├─ cells: FxHashMap<CellCoord, FxHashSet<T>>
/// │  ├─ (0, 0)  -> {40, 100}
/// │  ├─ (1, 1)  -> {80}
/// │  └─ (2, -3) -> {}            // created by a mutation, never pruned
/// ├─ results: FxHashSet<T>       // reused by every query
/// └─ cell_size: 64.0
/// ```
///
/// Buckets are created lazily by the first mutation touching a cell and
/// persist (possibly empty) until [`SpatialHash::clear`] or drop. Queries
/// never materialize buckets.
///
/// # Thread Safety
///
/// This structure is not thread-safe. Wrap it in a lock or give each worker
/// its own instance for concurrent use.
///
/// # Examples
///
/// ```rust
/// use broadgrid::{Point2, SpatialHash};
///
/// let mut grid: SpatialHash<u32> = SpatialHash::new(64.0);
/// grid.insert_point(7, Point2::new(20.0, 20.0))?;
///
/// let hits = grid.query_point(Point2::new(10.0, 10.0));
/// assert!(hits.contains(&7));
/// # Ok::<(), broadgrid::GridError>(())
/// ```
pub struct SpatialHash<T> {
    /// Map of cell coordinate -> bucket for that cell
    cells: FxHashMap<CellCoord, Bucket<T>>,

    /// Reusable result buffer, cleared and refilled by every query
    results: Bucket<T>,

    cell_size: f64,
    inv_cell_size: f64,
    max_cells: Option<usize>,
}

impl<T: Eq + Hash + Clone> SpatialHash<T> {
    /// Create a new grid with the given cell size.
    ///
    /// The cell size is fixed for the lifetime of the instance. Pick it
    /// near the magnitude of your typical query footprint.
    ///
    /// # Panics
    ///
    /// Panics if `cell_size` is not positive and finite. Use
    /// [`SpatialHash::with_config`] for a fallible constructor.
    pub fn new(cell_size: f64) -> Self {
        assert!(
            cell_size.is_finite() && cell_size > 0.0,
            "Cell size must be positive and finite"
        );

        Self {
            cells: FxHashMap::default(),
            results: Bucket::default(),
            cell_size,
            inv_cell_size: cell_size.recip(),
            max_cells: None,
        }
    }

    /// Create a grid from a validated configuration.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use broadgrid::{Config, SpatialHash};
    ///
    /// let config = Config::with_cell_size(32.0).with_max_cells(4096);
    /// let grid: SpatialHash<u64> = SpatialHash::with_config(config)?;
    /// assert_eq!(grid.cell_size(), 32.0);
    /// # Ok::<(), broadgrid::GridError>(())
    /// ```
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().map_err(GridError::InvalidConfig)?;

        let mut grid = Self::new(config.cell_size);
        grid.max_cells = config.max_cells;
        Ok(grid)
    }

    /// Get the cell side length of this grid.
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Get the number of materialized cells (empty buckets included).
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Get the total number of entries across all cells.
    ///
    /// An identifier inserted over a multi-cell footprint is counted once
    /// per cell it occupies.
    pub fn entry_count(&self) -> usize {
        self.cells.values().map(|bucket| bucket.len()).sum()
    }

    /// Whether the grid holds no entries at all.
    pub fn is_empty(&self) -> bool {
        self.cells.values().all(|bucket| bucket.is_empty())
    }

    /// Quantize a position to the coordinate of the cell containing it.
    pub fn cell_of(&self, position: Point2) -> CellCoord {
        CellCoord::quantize(position, self.inv_cell_size)
    }

    /// Insert an identifier at a single point.
    ///
    /// The identifier lands in exactly one bucket. Re-inserting the same
    /// identifier at a position in the same cell is a no-op.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if the position is non-finite; `CapacityExceeded` if
    /// a new bucket would grow the grid past its configured cell limit.
    /// On error the grid is unchanged.
    pub fn insert_point(&mut self, id: T, position: Point2) -> Result<()> {
        validate_position(&position)?;

        let coord = self.cell_of(position);
        self.ensure_capacity_for(std::slice::from_ref(&coord))?;

        self.cells.entry(coord).or_default().insert(id);
        Ok(())
    }

    /// Insert an identifier over a rectangular footprint.
    ///
    /// The identifier is added to every cell overlapping the rectangle
    /// `(origin, size)`, bounds inclusive. This is the same span that
    /// [`SpatialHash::remove_rect`] and [`SpatialHash::query_rect`] cover,
    /// so a matching remove leaves no stale entries.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use broadgrid::{Extent2, Point2, SpatialHash};
    ///
    /// let mut grid: SpatialHash<u32> = SpatialHash::new(100.0);
    /// grid.insert_rect(1, Point2::new(50.0, 50.0), Extent2::new(100.0, 100.0))?;
    ///
    /// // The footprint spans cells (0,0) through (1,1).
    /// assert_eq!(grid.cell_count(), 4);
    /// # Ok::<(), broadgrid::GridError>(())
    /// ```
    pub fn insert_rect(&mut self, id: T, origin: Point2, size: Extent2) -> Result<()> {
        validate_position(&origin)?;
        validate_extent(&size)?;

        let span = self.rect_span(origin, size);
        self.ensure_capacity_for(&span)?;

        for coord in span {
            self.cells.entry(coord).or_default().insert(id.clone());
        }
        Ok(())
    }

    /// Remove an identifier from the cell containing a point.
    ///
    /// Removing an identifier that is not present is a silent no-op.
    ///
    /// # Returns
    ///
    /// `true` if the identifier was found and removed, `false` otherwise.
    pub fn remove_point(&mut self, id: &T, position: Point2) -> bool {
        if !position.is_finite() {
            log::warn!("Rejecting point removal with non-finite position");
            return false;
        }

        let coord = self.cell_of(position);
        match self.cells.get_mut(&coord) {
            Some(bucket) => bucket.remove(id),
            None => false,
        }
    }

    /// Remove an identifier from every cell of a rectangular footprint.
    ///
    /// Covers the same cell span as [`SpatialHash::insert_rect`] for the
    /// same geometry. Removing with geometry different from the insert
    /// leaves the identifier in cells outside the removal footprint; the
    /// index cannot validate that contract for the caller.
    ///
    /// # Returns
    ///
    /// `true` if the identifier was removed from at least one cell.
    pub fn remove_rect(&mut self, id: &T, origin: Point2, size: Extent2) -> bool {
        if !origin.is_finite() || !size.is_finite() {
            log::warn!("Rejecting rect removal with non-finite geometry");
            return false;
        }

        let mut removed = false;
        for coord in self.rect_span(origin, size) {
            if let Some(bucket) = self.cells.get_mut(&coord) {
                removed |= bucket.remove(id);
            }
        }
        removed
    }

    /// Check whether an identifier is present in the cell containing a point.
    pub fn contains_at(&self, id: &T, position: Point2) -> bool {
        if !position.is_finite() {
            return false;
        }

        self.cells
            .get(&self.cell_of(position))
            .is_some_and(|bucket| bucket.contains(id))
    }

    /// Find every identifier in the cell containing a point.
    ///
    /// A cell that was never materialized yields an empty result.
    pub fn query_point(&mut self, position: Point2) -> QueryResults<'_, T> {
        self.results.clear();

        if !position.is_finite() {
            log::warn!("Rejecting point query with non-finite position");
            return QueryResults { hits: &self.results };
        }

        let coord = self.cell_of(position);
        if let Some(bucket) = self.cells.get(&coord) {
            self.results.extend(bucket.iter().cloned());
        }
        QueryResults { hits: &self.results }
    }

    /// Find every identifier in cells overlapping a rectangle.
    ///
    /// The span is inclusive on both bounds. Identifiers occupying several
    /// touched cells appear once; the result buffer is a set.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use broadgrid::{Extent2, Point2, SpatialHash};
    ///
    /// let mut grid: SpatialHash<&str> = SpatialHash::new(100.0);
    /// grid.insert_point("a", Point2::new(20.0, 20.0))?;
    /// grid.insert_point("b", Point2::new(220.0, 20.0))?;
    ///
    /// let hits = grid.query_rect(Point2::new(0.0, 0.0), Extent2::new(100.0, 100.0));
    /// assert!(hits.contains(&"a"));
    /// assert!(!hits.contains(&"b"));
    /// # Ok::<(), broadgrid::GridError>(())
    /// ```
    pub fn query_rect(&mut self, origin: Point2, size: Extent2) -> QueryResults<'_, T> {
        self.results.clear();

        if !origin.is_finite() || !size.is_finite() {
            log::warn!("Rejecting rect query with non-finite geometry");
            return QueryResults { hits: &self.results };
        }

        for coord in self.rect_span(origin, size) {
            if let Some(bucket) = self.cells.get(&coord) {
                self.results.extend(bucket.iter().cloned());
            }
        }
        QueryResults { hits: &self.results }
    }

    /// Find every identifier in cells crossed by a line segment.
    ///
    /// The walk runs in cell-index space and visits each cell the segment
    /// passes through, in any direction. Reversed, vertical, and
    /// single-cell segments are all supported.
    pub fn query_line(&mut self, start: Point2, end: Point2) -> QueryResults<'_, T> {
        self.results.clear();

        if !start.is_finite() || !end.is_finite() {
            log::warn!("Rejecting line query with non-finite endpoint");
            return QueryResults { hits: &self.results };
        }

        for coord in self.line_span(start, end) {
            if let Some(bucket) = self.cells.get(&coord) {
                self.results.extend(bucket.iter().cloned());
            }
        }
        QueryResults { hits: &self.results }
    }

    /// Drop every bucket and entry, keeping the configuration.
    pub fn clear(&mut self) {
        self.cells.clear();
        self.results.clear();
    }

    /// Get statistics about the grid's cells and occupancy.
    pub fn stats(&self) -> GridStats {
        let cell_count = self.cells.len();
        let occupied_cells = self
            .cells
            .values()
            .filter(|bucket| !bucket.is_empty())
            .count();
        let total_entries: usize = self.cells.values().map(|bucket| bucket.len()).sum();

        let avg_entries_per_cell = if cell_count > 0 {
            total_entries as f64 / cell_count as f64
        } else {
            0.0
        };

        let mut cells: Vec<CellStats> = self
            .cells
            .iter()
            .map(|(coord, bucket)| CellStats {
                coord: *coord,
                entry_count: bucket.len(),
            })
            .collect();

        // Sort by entry count descending
        cells.sort_by(|a, b| b.entry_count.cmp(&a.entry_count));

        GridStats {
            cell_count,
            occupied_cells,
            total_entries,
            avg_entries_per_cell,
            cell_size: self.cell_size,
            cells,
        }
    }

    // ========================================================================
    // Private helper methods
    // ========================================================================

    /// Fail a mutation up front if creating its missing buckets would grow
    /// the grid past the configured cell limit.
    fn ensure_capacity_for(&self, coords: &[CellCoord]) -> Result<()> {
        let Some(limit) = self.max_cells else {
            return Ok(());
        };

        let missing = coords
            .iter()
            .filter(|coord| !self.cells.contains_key(*coord))
            .count();

        if self.cells.len() + missing > limit {
            return Err(GridError::CapacityExceeded {
                current: self.cells.len(),
                limit,
            });
        }
        Ok(())
    }

    /// Enumerate every cell overlapping a rectangle, bounds inclusive.
    ///
    /// Shared by insertion, removal, and querying so all three cover the
    /// identical footprint. Negative extents are normalized by swapping
    /// the bounds.
    fn rect_span(&self, origin: Point2, size: Extent2) -> CellSpan {
        let (x0, x1) = if size.w >= 0.0 {
            (origin.x, origin.x + size.w)
        } else {
            (origin.x + size.w, origin.x)
        };
        let (y0, y1) = if size.h >= 0.0 {
            (origin.y, origin.y + size.h)
        } else {
            (origin.y + size.h, origin.y)
        };

        let min = self.cell_of(Point2::new(x0, y0));
        let max = self.cell_of(Point2::new(x1, y1));

        let mut span = CellSpan::new();
        for y in min.y..=max.y {
            for x in min.x..=max.x {
                span.push(CellCoord::new(x, y));
            }
        }
        span
    }

    /// Enumerate every cell a segment passes through.
    ///
    /// Both endpoints are scaled into cell-index space, then the walk steps
    /// from the start cell to the end cell, crossing whichever cell boundary
    /// (vertical or horizontal) the segment reaches first. Each step moves
    /// one cell closer to the end cell, so the walk takes exactly the
    /// Manhattan cell distance between the endpoint cells.
    fn line_span(&self, start: Point2, end: Point2) -> CellSpan {
        let sx = start.x * self.inv_cell_size;
        let sy = start.y * self.inv_cell_size;
        let ex = end.x * self.inv_cell_size;
        let ey = end.y * self.inv_cell_size;

        let mut cx = sx.floor() as i32;
        let mut cy = sy.floor() as i32;
        let end_cx = ex.floor() as i32;
        let end_cy = ey.floor() as i32;

        let dx = ex - sx;
        let dy = ey - sy;
        let step_x: i32 = if dx >= 0.0 { 1 } else { -1 };
        let step_y: i32 = if dy >= 0.0 { 1 } else { -1 };

        // Fraction of the segment travelled when the next vertical or
        // horizontal boundary is crossed, and the per-cell increments.
        let mut t_next_x = if dx > 0.0 {
            ((cx + 1) as f64 - sx) / dx
        } else if dx < 0.0 {
            (cx as f64 - sx) / dx
        } else {
            f64::INFINITY
        };
        let mut t_next_y = if dy > 0.0 {
            ((cy + 1) as f64 - sy) / dy
        } else if dy < 0.0 {
            (cy as f64 - sy) / dy
        } else {
            f64::INFINITY
        };
        let t_step_x = if dx != 0.0 {
            (1.0 / dx).abs()
        } else {
            f64::INFINITY
        };
        let t_step_y = if dy != 0.0 {
            (1.0 / dy).abs()
        } else {
            f64::INFINITY
        };

        let steps = u64::from(cx.abs_diff(end_cx)) + u64::from(cy.abs_diff(end_cy));

        let mut span = CellSpan::new();
        span.push(CellCoord::new(cx, cy));
        for _ in 0..steps {
            if t_next_x <= t_next_y {
                cx += step_x;
                t_next_x += t_step_x;
            } else {
                cy += step_y;
                t_next_y += t_step_y;
            }
            span.push(CellCoord::new(cx, cy));
        }
        span
    }
}

impl<T: Eq + Hash + Clone> Default for SpatialHash<T> {
    fn default() -> Self {
        Self::new(Config::default().cell_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid() {
        let grid: SpatialHash<u32> = SpatialHash::new(64.0);
        assert_eq!(grid.cell_size(), 64.0);
        assert_eq!(grid.cell_count(), 0);
        assert_eq!(grid.entry_count(), 0);
        assert!(grid.is_empty());
    }

    #[test]
    #[should_panic(expected = "Cell size must be positive and finite")]
    fn test_invalid_cell_size() {
        let _: SpatialHash<u32> = SpatialHash::new(-1.0);
    }

    #[test]
    fn test_point_membership_lifecycle() {
        let mut grid: SpatialHash<u32> = SpatialHash::new(64.0);

        grid.insert_point(40, Point2::new(20.0, 20.0)).unwrap();
        grid.insert_point(80, Point2::new(100.0, 100.0)).unwrap();

        let hits = grid.query_point(Point2::new(10.0, 10.0));
        assert_eq!(hits.len(), 1);
        assert!(hits.contains(&40));

        grid.insert_point(100, Point2::new(40.0, 40.0)).unwrap();
        let hits = grid.query_point(Point2::new(10.0, 10.0));
        assert_eq!(hits.len(), 2);
        assert!(hits.contains(&40));
        assert!(hits.contains(&100));

        assert!(grid.remove_point(&100, Point2::new(40.0, 40.0)));
        let hits = grid.query_point(Point2::new(10.0, 10.0));
        assert_eq!(hits.len(), 1);
        assert!(hits.contains(&40));
    }

    #[test]
    fn test_duplicate_insert_absorbed() {
        let mut grid: SpatialHash<u32> = SpatialHash::new(64.0);

        grid.insert_point(1, Point2::new(10.0, 10.0)).unwrap();
        grid.insert_point(1, Point2::new(20.0, 20.0)).unwrap();

        assert_eq!(grid.query_point(Point2::new(0.0, 0.0)).len(), 1);
        assert_eq!(grid.entry_count(), 1);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut grid: SpatialHash<u32> = SpatialHash::new(64.0);

        assert!(!grid.remove_point(&1, Point2::new(10.0, 10.0)));

        grid.insert_point(1, Point2::new(10.0, 10.0)).unwrap();
        assert!(!grid.remove_point(&2, Point2::new(10.0, 10.0)));
        assert!(grid.contains_at(&1, Point2::new(10.0, 10.0)));
    }

    #[test]
    fn test_rect_membership_lifecycle() {
        let mut grid: SpatialHash<u32> = SpatialHash::new(100.0);

        grid.insert_rect(1, Point2::new(50.0, 50.0), Extent2::new(100.0, 100.0))
            .unwrap();
        let hits = grid.query_rect(Point2::new(0.0, 0.0), Extent2::new(150.0, 150.0));
        assert_eq!(hits.len(), 1);

        grid.insert_rect(2, Point2::new(150.0, 150.0), Extent2::new(100.0, 100.0))
            .unwrap();
        let hits = grid.query_rect(Point2::new(0.0, 0.0), Extent2::new(100.0, 100.0));
        assert_eq!(hits.len(), 2);

        assert!(grid.remove_rect(&2, Point2::new(150.0, 150.0), Extent2::new(100.0, 100.0)));
        let hits = grid.query_rect(Point2::new(0.0, 0.0), Extent2::new(100.0, 100.0));
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_rect_footprints_symmetric() {
        let mut grid: SpatialHash<u32> = SpatialHash::new(64.0);

        let origin = Point2::new(-30.0, 17.0);
        let size = Extent2::new(200.0, 330.0);

        grid.insert_rect(9, origin, size).unwrap();
        assert!(grid.remove_rect(&9, origin, size));
        assert!(grid.is_empty());
        assert_eq!(grid.entry_count(), 0);
    }

    #[test]
    fn test_negative_extent_normalized() {
        let mut grid: SpatialHash<u32> = SpatialHash::new(64.0);

        grid.insert_rect(1, Point2::new(100.0, 100.0), Extent2::new(-100.0, -100.0))
            .unwrap();
        let hits = grid.query_rect(Point2::new(0.0, 0.0), Extent2::new(100.0, 100.0));
        assert_eq!(hits.len(), 1);

        assert!(grid.remove_rect(&1, Point2::new(0.0, 0.0), Extent2::new(100.0, 100.0)));
        assert!(grid.is_empty());
    }

    #[test]
    fn test_line_crossing_queries() {
        let mut grid: SpatialHash<u32> = SpatialHash::new(100.0);

        grid.insert_point(10, Point2::new(250.0, 250.0)).unwrap();

        let hits = grid.query_line(Point2::new(0.0, 250.0), Point2::new(300.0, 250.0));
        assert_eq!(hits.len(), 1);
        assert!(hits.contains(&10));

        // Vertical segment
        let hits = grid.query_line(Point2::new(250.0, -50.0), Point2::new(250.0, 200.0));
        assert_eq!(hits.len(), 1);

        // Reversed direction covers the same cells
        let hits = grid.query_line(Point2::new(300.0, 250.0), Point2::new(0.0, 250.0));
        assert_eq!(hits.len(), 1);

        // Degenerate segment queries one cell
        let hits = grid.query_line(Point2::new(250.0, 250.0), Point2::new(250.0, 250.0));
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_line_span_diagonal() {
        let grid: SpatialHash<u32> = SpatialHash::new(10.0);

        let span = grid.line_span(Point2::new(5.0, 5.0), Point2::new(25.0, 25.0));
        assert_eq!(span.first(), Some(&CellCoord::new(0, 0)));
        assert_eq!(span.last(), Some(&CellCoord::new(2, 2)));
        // Manhattan distance of 4 plus the start cell.
        assert_eq!(span.len(), 5);
    }

    #[test]
    fn test_queries_do_not_materialize_cells() {
        let mut grid: SpatialHash<u32> = SpatialHash::new(64.0);

        grid.query_point(Point2::new(10.0, 10.0));
        grid.query_rect(Point2::new(0.0, 0.0), Extent2::new(500.0, 500.0));
        grid.query_line(Point2::new(0.0, 0.0), Point2::new(500.0, 500.0));

        assert_eq!(grid.cell_count(), 0);
    }

    #[test]
    fn test_query_idempotent() {
        let mut grid: SpatialHash<u32> = SpatialHash::new(64.0);

        grid.insert_point(1, Point2::new(10.0, 10.0)).unwrap();
        grid.insert_point(2, Point2::new(20.0, 20.0)).unwrap();

        let first = grid.query_point(Point2::new(0.0, 0.0)).to_vec();
        let second = grid.query_point(Point2::new(0.0, 0.0)).to_vec();
        assert_eq!(first.len(), second.len());
        for id in &first {
            assert!(second.contains(id));
        }
    }

    #[test]
    fn test_buckets_persist_after_removal() {
        let mut grid: SpatialHash<u32> = SpatialHash::new(64.0);

        grid.insert_point(1, Point2::new(10.0, 10.0)).unwrap();
        grid.remove_point(&1, Point2::new(10.0, 10.0));

        // The bucket stays materialized, just empty.
        assert_eq!(grid.cell_count(), 1);
        assert!(grid.is_empty());
    }

    #[test]
    fn test_capacity_limit() {
        let config = Config::with_cell_size(64.0).with_max_cells(2);
        let mut grid: SpatialHash<u32> = SpatialHash::with_config(config).unwrap();

        grid.insert_point(1, Point2::new(0.0, 0.0)).unwrap();
        grid.insert_point(2, Point2::new(100.0, 0.0)).unwrap();

        let err = grid.insert_point(3, Point2::new(200.0, 0.0)).unwrap_err();
        assert!(matches!(
            err,
            GridError::CapacityExceeded { current: 2, limit: 2 }
        ));

        // Existing cells still accept entries.
        grid.insert_point(3, Point2::new(10.0, 10.0)).unwrap();
        assert_eq!(grid.cell_count(), 2);
    }

    #[test]
    fn test_capacity_failure_leaves_state_unchanged() {
        let config = Config::with_cell_size(100.0).with_max_cells(2);
        let mut grid: SpatialHash<u32> = SpatialHash::with_config(config).unwrap();

        // A 2x2-cell footprint cannot fit; nothing may be inserted.
        let err = grid
            .insert_rect(1, Point2::new(50.0, 50.0), Extent2::new(100.0, 100.0))
            .unwrap_err();
        assert!(matches!(err, GridError::CapacityExceeded { .. }));
        assert_eq!(grid.cell_count(), 0);
        assert!(grid.is_empty());
    }

    #[test]
    fn test_non_finite_mutation_rejected() {
        let mut grid: SpatialHash<u32> = SpatialHash::new(64.0);

        assert!(
            grid.insert_point(1, Point2::new(f64::NAN, 0.0))
                .is_err()
        );
        assert!(
            grid.insert_rect(1, Point2::new(0.0, 0.0), Extent2::new(f64::INFINITY, 1.0))
                .is_err()
        );
        assert_eq!(grid.cell_count(), 0);
    }

    #[test]
    fn test_non_finite_query_yields_empty() {
        let mut grid: SpatialHash<u32> = SpatialHash::new(64.0);
        grid.insert_point(1, Point2::new(0.0, 0.0)).unwrap();

        assert!(grid.query_point(Point2::new(f64::NAN, 0.0)).is_empty());
        assert!(
            grid.query_rect(Point2::new(0.0, 0.0), Extent2::new(f64::NAN, 1.0))
                .is_empty()
        );
        assert!(
            grid.query_line(Point2::new(0.0, 0.0), Point2::new(f64::INFINITY, 0.0))
                .is_empty()
        );
    }

    #[test]
    fn test_clear() {
        let mut grid: SpatialHash<u32> = SpatialHash::new(64.0);

        grid.insert_point(1, Point2::new(10.0, 10.0)).unwrap();
        grid.insert_point(2, Point2::new(100.0, 100.0)).unwrap();

        grid.clear();

        assert_eq!(grid.cell_count(), 0);
        assert!(grid.is_empty());
        assert!(grid.query_point(Point2::new(10.0, 10.0)).is_empty());
    }

    #[test]
    fn test_stats() {
        let mut grid: SpatialHash<u32> = SpatialHash::new(64.0);

        grid.insert_point(1, Point2::new(10.0, 10.0)).unwrap();
        grid.insert_point(2, Point2::new(20.0, 20.0)).unwrap();
        grid.insert_point(3, Point2::new(100.0, 100.0)).unwrap();

        let stats = grid.stats();
        assert_eq!(stats.cell_count, 2);
        assert_eq!(stats.occupied_cells, 2);
        assert_eq!(stats.total_entries, 3);
        assert_eq!(stats.cell_size, 64.0);
        // Most occupied cell first.
        assert_eq!(stats.cells[0].entry_count, 2);
    }

    #[test]
    fn test_generic_identifier_types() {
        let mut grid: SpatialHash<String> = SpatialHash::new(64.0);

        grid.insert_point("player".to_string(), Point2::new(10.0, 10.0))
            .unwrap();
        let hits = grid.query_point(Point2::new(0.0, 0.0));
        assert!(hits.contains(&"player".to_string()));
    }
}
