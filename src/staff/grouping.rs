//! Rows → lines → staves.
//!
//! Rows arrive in ascending page order, so lines and staves come out top to
//! bottom and every five consecutive lines form one staff. Inter-staff spacing
//! is not checked: five unrelated long rows (a thick rule, say) would be
//! grouped as a staff.
use super::{Staff, StaffLine, LINES_PER_STAFF};
use crate::error::PageError;
use log::debug;

/// Merge runs of consecutive row indices into lines.
///
/// Repeated indices are ignored; any gap larger than one row starts a new line.
pub fn group_lines(rows: &[usize]) -> Vec<StaffLine> {
    let mut lines: Vec<StaffLine> = Vec::new();
    for &row in rows {
        match lines.last_mut() {
            Some(line) if row == line.bottom + 1 => line.bottom = row,
            Some(line) if row <= line.bottom => {}
            _ => lines.push(StaffLine::new(row, row)),
        }
    }
    lines
}

/// Group rows into staves of exactly five lines.
pub fn group_staves(rows: &[usize]) -> Result<Vec<Staff>, PageError> {
    let lines = group_lines(rows);
    if lines.is_empty() || lines.len() % LINES_PER_STAFF != 0 {
        return Err(PageError::InvalidStaffLineCount { lines: lines.len() });
    }
    let staves: Vec<Staff> = lines
        .chunks_exact(LINES_PER_STAFF)
        .map(|chunk| Staff {
            lines: [chunk[0], chunk[1], chunk[2], chunk[3], chunk[4]],
        })
        .collect();
    debug!("grouped {} lines into {} staves", lines.len(), staves.len());
    Ok(staves)
}
