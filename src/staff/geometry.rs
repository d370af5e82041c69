//! Page-wide staff geometry.
//!
//! One thickness and one space height are applied to every staff on the page,
//! even when individual staves differ slightly. Rounding is half-to-even.
use super::Staff;
use crate::error::PageError;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffGeometry {
    /// Mean number of rows per staff line.
    pub line_thickness: usize,
    /// Mean distance between adjacent staff lines, in rows.
    pub space_height: usize,
}

pub fn estimate_geometry(staves: &[Staff]) -> Result<StaffGeometry, PageError> {
    if staves.is_empty() {
        return Err(PageError::InvalidStaffLineCount { lines: 0 });
    }
    let lines = staves.iter().flat_map(|s| s.lines.iter());
    let (rows, count) = lines.fold((0usize, 0usize), |(rows, n), line| {
        (rows + line.thickness(), n + 1)
    });
    let line_thickness = round_to_usize(rows as f64 / count as f64);

    let spaces: f64 = staves.iter().map(Staff::space_height).sum();
    let space_height = round_to_usize(spaces / staves.len() as f64);

    Ok(StaffGeometry {
        line_thickness,
        space_height,
    })
}

#[inline]
fn round_to_usize(v: f64) -> usize {
    v.round_ties_even().max(0.0) as usize
}
