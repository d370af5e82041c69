//! Parameters shared by every page of a conversion run.
//!
//! Defaults follow the values that work on typical engraved scores rendered
//! at 100 dpi. If ordinary slurs or beams are picked up as staff lines, raise
//! `min_staff_width`; if real staff lines are missed, lower it.

use crate::error::PageError;
use crate::staff::Direction;
use serde::{Deserialize, Serialize};

/// Default fraction of the page width a staff line must span.
pub const DEFAULT_MIN_STAFF_WIDTH: f64 = 0.6;
/// Default intensity below which a pixel is considered black.
pub const DEFAULT_BLACK_THRESHOLD: u8 = 64;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClefParams {
    /// Minimum fraction of the page width that a black run must exceed for
    /// its row to count as part of a staff line. Must lie in `(0, 1)`.
    #[serde(rename = "minStaffWidthFraction", alias = "min_staff_width")]
    pub min_staff_width: f64,
    /// Pixels strictly darker than this are black.
    #[serde(alias = "black_threshold")]
    pub black_threshold: u8,
    /// Which clef the staves are converted to.
    pub direction: Direction,
}

impl Default for ClefParams {
    fn default() -> Self {
        Self {
            min_staff_width: DEFAULT_MIN_STAFF_WIDTH,
            black_threshold: DEFAULT_BLACK_THRESHOLD,
            direction: Direction::default(),
        }
    }
}

impl ClefParams {
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn validate(&self) -> Result<(), PageError> {
        let w = self.min_staff_width;
        if !(w.is_finite() && w > 0.0 && w < 1.0) {
            return Err(PageError::InvalidParams(format!(
                "minStaffWidthFraction must lie in (0, 1), got {w}"
            )));
        }
        Ok(())
    }
}
