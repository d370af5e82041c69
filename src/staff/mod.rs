//! Staff detection and clef relocation on a single page.
//!
//! Stages, each consuming the previous stage's output:
//! - [`detect`] – scan rows of the original image for long horizontal black
//!   runs and fix the page bookends from the first qualifying run.
//! - [`grouping`] – merge contiguous rows into lines, chunk lines into staves
//!   of five.
//! - [`geometry`] – page-wide line thickness and space height.
//! - [`transform`] – erase the clef-side line with neighbour-aware
//!   anti-aliasing and draw its replacement one space beyond the staff.
//!
//! All detection queries go through [`BlackMask`], which only ever reads the
//! original page. The working page is mutated by [`transform`] alone.

pub mod detect;
pub mod geometry;
pub mod grouping;
pub mod transform;

pub use detect::{detect_staff_rows, StaffRows};
pub use geometry::{estimate_geometry, StaffGeometry};
pub use grouping::{group_lines, group_staves};
pub use transform::{draw_line, erase_line, transform_staff};

use crate::image::ImageU8;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Number of lines in one staff.
pub const LINES_PER_STAFF: usize = 5;

/// Which clef the staves are converted to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    /// Erase the bottom line, add a line above the staff.
    #[default]
    #[serde(alias = "treble-to-bass")]
    TrebleToBass,
    /// Erase the top line, add a line below the staff.
    #[serde(alias = "bass-to-treble")]
    BassToTreble,
}

impl Direction {
    /// Line removed from the staff.
    pub fn source_line(self, staff: &Staff) -> &StaffLine {
        match self {
            Direction::TrebleToBass => staff.last(),
            Direction::BassToTreble => staff.first(),
        }
    }

    /// Outer edge row of the line opposite the erased one.
    pub fn anchor_row(self, staff: &Staff) -> usize {
        match self {
            Direction::TrebleToBass => staff.first().top,
            Direction::BassToTreble => staff.last().bottom,
        }
    }

    /// Row step pointing away from the staff on the anchor side.
    pub fn step(self) -> isize {
        match self {
            Direction::TrebleToBass => -1,
            Direction::BassToTreble => 1,
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            Direction::TrebleToBass => Direction::BassToTreble,
            Direction::BassToTreble => Direction::TrebleToBass,
        }
    }

    /// Name of the target clef, used for output file suffixes.
    pub fn target_clef(self) -> &'static str {
        match self {
            Direction::TrebleToBass => "bass",
            Direction::BassToTreble => "treble",
        }
    }
}

impl std::str::FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "treble-to-bass" | "treble_to_bass" | "bass" => Ok(Direction::TrebleToBass),
            "bass-to-treble" | "bass_to_treble" | "treble" => Ok(Direction::BassToTreble),
            other => Err(format!(
                "unknown direction '{other}' (expected treble-to-bass or bass-to-treble)"
            )),
        }
    }
}

/// Vertically contiguous block of qualifying rows, `top..=bottom`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct StaffLine {
    pub top: usize,
    pub bottom: usize,
}

impl StaffLine {
    pub fn new(top: usize, bottom: usize) -> Self {
        debug_assert!(top <= bottom);
        Self { top, bottom }
    }

    /// Number of rows in the line.
    #[inline]
    pub fn thickness(&self) -> usize {
        self.bottom - self.top + 1
    }

    #[inline]
    pub fn rows(&self) -> RangeInclusive<usize> {
        self.top..=self.bottom
    }

    #[inline]
    pub fn contains(&self, row: usize) -> bool {
        self.rows().contains(&row)
    }

    /// Mean row index of the line.
    #[inline]
    pub fn mean_row(&self) -> f64 {
        (self.top + self.bottom) as f64 / 2.0
    }
}

/// Five consecutive staff lines, top to bottom.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Staff {
    pub lines: [StaffLine; LINES_PER_STAFF],
}

impl Staff {
    pub fn first(&self) -> &StaffLine {
        &self.lines[0]
    }

    pub fn last(&self) -> &StaffLine {
        &self.lines[LINES_PER_STAFF - 1]
    }

    /// Quarter of the distance between the outer lines' centres.
    pub fn space_height(&self) -> f64 {
        (self.last().mean_row() - self.first().mean_row()) / (LINES_PER_STAFF - 1) as f64
    }
}

/// Inclusive column bounds of the first detected staff line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Bookends {
    pub left: usize,
    pub right: usize,
}

/// Black predicate over the original page.
///
/// Rows outside the page are never black, so neighbour lookups above the
/// first row or below the last row need no special casing by callers.
#[derive(Clone, Copy, Debug)]
pub struct BlackMask<'a> {
    image: ImageU8<'a>,
    threshold: u8,
}

impl<'a> BlackMask<'a> {
    pub fn new(image: ImageU8<'a>, threshold: u8) -> Self {
        Self { image, threshold }
    }

    #[inline]
    pub fn image(&self) -> &ImageU8<'a> {
        &self.image
    }

    #[inline]
    pub fn is_black_px(&self, value: u8) -> bool {
        value < self.threshold
    }

    #[inline]
    pub fn is_black(&self, x: usize, y: isize) -> bool {
        self.image
            .get_checked(x, y)
            .is_some_and(|v| self.is_black_px(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn staff(tops: [usize; 5], thickness: usize) -> Staff {
        Staff {
            lines: tops.map(|t| StaffLine::new(t, t + thickness - 1)),
        }
    }

    #[test]
    fn direction_picks_opposite_sides() {
        let s = staff([10, 20, 30, 40, 50], 2);
        assert_eq!(Direction::TrebleToBass.source_line(&s).top, 50);
        assert_eq!(Direction::TrebleToBass.anchor_row(&s), 10);
        assert_eq!(Direction::BassToTreble.source_line(&s).top, 10);
        assert_eq!(Direction::BassToTreble.anchor_row(&s), 51);
        assert_eq!(Direction::TrebleToBass.step(), -1);
        assert_eq!(Direction::TrebleToBass.reversed(), Direction::BassToTreble);
    }

    #[test]
    fn direction_parses_cli_spellings() {
        assert_eq!("treble-to-bass".parse::<Direction>(), Ok(Direction::TrebleToBass));
        assert_eq!("BASS_TO_TREBLE".parse::<Direction>(), Ok(Direction::BassToTreble));
        assert!("sideways".parse::<Direction>().is_err());
    }

    #[test]
    fn staff_space_height_uses_line_centres() {
        let s = staff([100, 110, 120, 130, 140], 3);
        assert_eq!(s.space_height(), 10.0);
        assert_eq!(s.first().mean_row(), 101.0);
        assert_eq!(s.last().thickness(), 3);
    }

    #[test]
    fn black_mask_treats_outside_rows_as_white() {
        let data = [0u8, 63, 64, 255];
        let img = ImageU8::from_packed(2, 2, &data).unwrap();
        let mask = BlackMask::new(img, 64);
        assert!(mask.is_black(0, 0));
        assert!(mask.is_black(1, 0));
        assert!(!mask.is_black(0, 1));
        assert!(!mask.is_black(0, -1));
        assert!(!mask.is_black(0, 2));
    }
}
