//! Validation for mutation geometry.

use crate::error::{GridError, Result};
use crate::types::{Extent2, Point2};

/// Validates a position has finite coordinates.
///
/// # Examples
///
/// ```
/// use broadgrid::validation::validate_position;
/// use broadgrid::Point2;
///
/// // Valid position
/// let p = Point2::new(120.0, -48.5);
/// assert!(validate_position(&p).is_ok());
///
/// // Non-finite coordinate
/// let invalid = Point2::new(f64::NAN, 0.0);
/// assert!(validate_position(&invalid).is_err());
/// ```
pub fn validate_position(p: &Point2) -> Result<()> {
    if !p.x.is_finite() {
        return Err(GridError::InvalidInput(format!(
            "Position x must be finite, got: {}",
            p.x
        )));
    }

    if !p.y.is_finite() {
        return Err(GridError::InvalidInput(format!(
            "Position y must be finite, got: {}",
            p.y
        )));
    }

    Ok(())
}

/// Validates a rectangle extent has finite components.
///
/// Negative components are allowed; the grid normalizes them by swapping
/// the rectangle bounds.
pub fn validate_extent(e: &Extent2) -> Result<()> {
    if !e.w.is_finite() {
        return Err(GridError::InvalidInput(format!(
            "Extent width must be finite, got: {}",
            e.w
        )));
    }

    if !e.h.is_finite() {
        return Err(GridError::InvalidInput(format!(
            "Extent height must be finite, got: {}",
            e.h
        )));
    }

    Ok(())
}
