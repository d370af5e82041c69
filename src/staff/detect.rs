//! Row scan for long horizontal black runs.
//!
//! A row qualifies as soon as any uninterrupted black run extends more than
//! `min_staff_width × width` columns past its start; the rest of that row is
//! not examined. The first qualifying row of the page additionally follows
//! its run to the last black pixel to fix the page [`Bookends`].
use super::{BlackMask, Bookends};
use crate::error::PageError;
use crate::image::ImageView;
use log::debug;
use serde::Serialize;

/// Qualifying rows of a page in ascending order, plus its bookends.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StaffRows {
    pub rows: Vec<usize>,
    pub bookends: Bookends,
}

/// Scan `mask`'s image top to bottom for staff-line rows.
pub fn detect_staff_rows(
    mask: &BlackMask<'_>,
    min_staff_width: f64,
) -> Result<StaffRows, PageError> {
    let image = mask.image();
    let min_extent = min_staff_width * image.width() as f64;

    let mut rows = Vec::new();
    let mut bookends: Option<Bookends> = None;
    for (y, row) in image.rows().enumerate() {
        let Some((start, x)) = qualifying_run(row, min_extent, mask) else {
            continue;
        };
        rows.push(y);
        if bookends.is_none() {
            let right = run_end(row, x, mask);
            debug!("bookends fixed on row {y}: {start}..={right}");
            bookends = Some(Bookends { left: start, right });
        }
    }

    if rows.is_empty() {
        return Err(PageError::NoStaffLinesFound);
    }
    let bookends = bookends.ok_or(PageError::BookendsUndetermined)?;
    debug!("detected {} staff-line rows", rows.len());
    Ok(StaffRows { rows, bookends })
}

/// Start column and the column at which the first long-enough run qualified.
fn qualifying_run(row: &[u8], min_extent: f64, mask: &BlackMask<'_>) -> Option<(usize, usize)> {
    let mut start: Option<usize> = None;
    for (x, &px) in row.iter().enumerate() {
        if !mask.is_black_px(px) {
            start = None;
            continue;
        }
        let s = *start.get_or_insert(x);
        if (x - s) as f64 > min_extent {
            return Some((s, x));
        }
    }
    None
}

/// Last column of the uninterrupted black run containing `from`.
fn run_end(row: &[u8], from: usize, mask: &BlackMask<'_>) -> usize {
    let extra = row[from..]
        .iter()
        .skip(1)
        .take_while(|&&px| mask.is_black_px(px))
        .count();
    from + extra
}
