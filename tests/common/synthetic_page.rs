use clef_shift::image::{GrayImageU8, ImageViewMut, BLACK, WHITE};

/// Geometry of one synthetic five-line staff.
#[derive(Clone, Copy, Debug)]
pub struct StaffLayout {
    /// Row of the top line's first row.
    pub top: usize,
    /// Distance between the first rows of adjacent lines.
    pub spacing: usize,
    /// Rows per line.
    pub thickness: usize,
    /// Inclusive column span of every line.
    pub columns: (usize, usize),
}

impl StaffLayout {
    /// First row of line `i` (0 = top).
    pub fn line_top(&self, i: usize) -> usize {
        self.top + i * self.spacing
    }
}

/// White page with the given staves drawn in pure black.
pub fn staff_page(width: usize, height: usize, staves: &[StaffLayout]) -> GrayImageU8 {
    assert!(width > 0 && height > 0, "page dimensions must be positive");
    let mut page = GrayImageU8::filled(width, height, WHITE);
    for staff in staves {
        let (left, right) = staff.columns;
        for i in 0..5 {
            for t in 0..staff.thickness {
                page.row_mut(staff.line_top(i) + t)[left..=right].fill(BLACK);
            }
        }
    }
    page
}

/// `count` evenly spaced full-width staves starting at `first_top`.
pub fn even_staves(
    width: usize,
    count: usize,
    first_top: usize,
    spacing: usize,
    thickness: usize,
    gap: usize,
) -> Vec<StaffLayout> {
    (0..count)
        .map(|k| StaffLayout {
            top: first_top + k * (4 * spacing + gap),
            spacing,
            thickness,
            columns: (0, width - 1),
        })
        .collect()
}

/// Black vertical stroke at column `x` covering rows `rows`.
pub fn vertical_mark(page: &mut GrayImageU8, x: usize, rows: std::ops::Range<usize>) {
    for y in rows {
        page.set(x, y, BLACK);
    }
}
