//! Pixel edits that move a staff from one clef to the other.
//!
//! Erasure reads only the original page (through [`BlackMask`]) and writes
//! only the rows of the erased line. Drawing writes `line_thickness` rows one
//! space beyond the anchor line, clipped to the page bookends.
use super::{BlackMask, Bookends, Direction, Staff, StaffGeometry, StaffLine};
use crate::image::{GrayImageU8, ImageView, ImageViewMut, BLACK, WHITE};

/// Gray step applied per black neighbour when erasing.
const NEIGHBOUR_SHADE: u8 = 128;

/// Erase `line` from `working`, keeping ink that continues across it.
///
/// Each row of the line looks up its own neighbours (the rows just above and
/// below it) in the original page, skipping neighbours that belong to the
/// line. Zero black neighbours paint white, one paints mid-gray, two leave
/// the pixel as it is. Inner rows of a thick line have no outside
/// neighbours and always turn white.
pub fn erase_line(working: &mut GrayImageU8, mask: &BlackMask<'_>, line: &StaffLine) {
    let width = working.width().min(mask.image().w);
    let height = working.height();
    let outside_black = |x: usize, y: isize| {
        let inside = y >= 0 && line.contains(y as usize);
        !inside && mask.is_black(x, y)
    };

    for y in line.rows().filter(|&y| y < height) {
        let above = y as isize - 1;
        let below = y as isize + 1;
        let row = working.row_mut(y);
        for (x, px) in row.iter_mut().enumerate().take(width) {
            let count = outside_black(x, above) as u8 + outside_black(x, below) as u8;
            if count < 2 {
                *px = WHITE - count * NEIGHBOUR_SHADE;
            }
        }
    }
}

/// Paint a `geometry.line_thickness`-row black line starting one space
/// beyond `anchor` in `direction`, spanning the bookend columns.
///
/// Rows that fall outside the page are skipped.
pub fn draw_line(
    working: &mut GrayImageU8,
    anchor: usize,
    direction: Direction,
    geometry: &StaffGeometry,
    bookends: &Bookends,
) {
    let height = working.height() as isize;
    let width = working.width();
    if width == 0 || bookends.left >= width {
        return;
    }
    let right = bookends.right.min(width - 1);
    let step = direction.step();
    for i in 0..geometry.line_thickness {
        let y = anchor as isize + step * (geometry.space_height + i) as isize;
        if !(0..height).contains(&y) {
            continue;
        }
        working.row_mut(y as usize)[bookends.left..=right].fill(BLACK);
    }
}

/// Erase the clef-side line of `staff` and draw its replacement.
pub fn transform_staff(
    working: &mut GrayImageU8,
    mask: &BlackMask<'_>,
    staff: &Staff,
    geometry: &StaffGeometry,
    bookends: &Bookends,
    direction: Direction,
) {
    erase_line(working, mask, direction.source_line(staff));
    draw_line(
        working,
        direction.anchor_row(staff),
        direction,
        geometry,
        bookends,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_with_rows(w: usize, h: usize, rows: &[usize]) -> GrayImageU8 {
        let mut page = GrayImageU8::filled(w, h, WHITE);
        for &y in rows {
            page.row_mut(y).fill(BLACK);
        }
        page
    }

    #[test]
    fn erase_without_neighbours_paints_white() {
        let original = page_with_rows(20, 10, &[4, 5]);
        let mut working = original.clone();
        let mask = BlackMask::new(original.as_view(), 64);
        erase_line(&mut working, &mask, &StaffLine::new(4, 5));
        assert!(working.row(4).iter().all(|&v| v == WHITE));
        assert!(working.row(5).iter().all(|&v| v == WHITE));
    }

    #[test]
    fn erase_keeps_vertical_strokes_and_greys_edges() {
        let mut original = page_with_rows(20, 10, &[5]);
        // Vertical stroke through the line at x = 7.
        for y in 2..9 {
            original.set(7, y, BLACK);
        }
        // Stem ending on the line from above at x = 12.
        for y in 2..5 {
            original.set(12, y, BLACK);
        }
        let mut working = original.clone();
        let mask = BlackMask::new(original.as_view(), 64);
        erase_line(&mut working, &mask, &StaffLine::new(5, 5));

        assert_eq!(working.get(7, 5), BLACK);
        assert_eq!(working.get(12, 5), 127);
        for x in (0..20).filter(|&x| x != 7 && x != 12) {
            assert_eq!(working.get(x, 5), WHITE, "column {x}");
        }
        // Neighbouring rows stay untouched.
        assert_eq!(working.row(4), original.row(4));
        assert_eq!(working.row(6), original.row(6));
    }

    #[test]
    fn thick_line_rows_only_see_their_outer_neighbour() {
        let mut original = page_with_rows(12, 20, &[10, 11]);
        for y in 6..16 {
            original.set(5, y, BLACK);
        }
        let mut working = original.clone();
        let mask = BlackMask::new(original.as_view(), 64);
        erase_line(&mut working, &mask, &StaffLine::new(10, 11));

        assert_eq!(working.get(5, 10), 127);
        assert_eq!(working.get(5, 11), 127);
        assert_eq!(working.get(4, 10), WHITE);
        assert_eq!(working.get(4, 11), WHITE);
        assert_eq!(working.row(9), original.row(9));
        assert_eq!(working.row(12), original.row(12));
    }

    #[test]
    fn middle_rows_of_thick_line_turn_white() {
        let mut original = page_with_rows(12, 20, &[8, 9, 10]);
        for y in 4..15 {
            original.set(3, y, BLACK);
        }
        let mut working = original.clone();
        let mask = BlackMask::new(original.as_view(), 64);
        erase_line(&mut working, &mask, &StaffLine::new(8, 10));

        assert_eq!(working.get(3, 8), 127);
        assert_eq!(working.get(3, 9), WHITE);
        assert_eq!(working.get(3, 10), 127);
        assert!(working.row(9).iter().all(|&v| v == WHITE));
    }

    #[test]
    fn erase_reads_original_not_working() {
        let original = page_with_rows(8, 6, &[1, 2, 3]);
        // Working copy already had the row above cleared.
        let mut working = original.clone();
        working.row_mut(1).fill(WHITE);
        let mask = BlackMask::new(original.as_view(), 64);
        erase_line(&mut working, &mask, &StaffLine::new(2, 2));
        assert!(working.row(2).iter().all(|&v| v == BLACK));
    }

    #[test]
    fn erase_on_first_row_ignores_outside_page() {
        let original = page_with_rows(6, 4, &[0, 1]);
        let mut working = original.clone();
        let mask = BlackMask::new(original.as_view(), 64);
        erase_line(&mut working, &mask, &StaffLine::new(0, 0));
        assert!(working.row(0).iter().all(|&v| v == 127));
    }

    #[test]
    fn draw_goes_up_for_treble_to_bass() {
        let mut working = GrayImageU8::filled(30, 60, WHITE);
        let geometry = StaffGeometry {
            line_thickness: 2,
            space_height: 10,
        };
        let bookends = Bookends { left: 5, right: 24 };
        draw_line(&mut working, 40, Direction::TrebleToBass, &geometry, &bookends);
        for y in 0..60 {
            let expect_line = y == 30 || y == 29;
            for x in 0..30 {
                let inside = expect_line && (5..=24).contains(&x);
                assert_eq!(working.get(x, y) == BLACK, inside, "({x}, {y})");
            }
        }
    }

    #[test]
    fn draw_goes_down_for_bass_to_treble_and_clips() {
        let mut working = GrayImageU8::filled(10, 12, WHITE);
        let geometry = StaffGeometry {
            line_thickness: 3,
            space_height: 5,
        };
        let bookends = Bookends { left: 0, right: 40 };
        draw_line(&mut working, 5, Direction::BassToTreble, &geometry, &bookends);
        assert!(working.row(10).iter().all(|&v| v == BLACK));
        assert!(working.row(11).iter().all(|&v| v == BLACK));
        assert!(working.row(9).iter().all(|&v| v == WHITE));
    }
}
