//! Page pipeline: staff detection followed by clef relocation.
//!
//! Overview
//! - Scans the original page row by row for black runs wider than a fraction
//!   of the page width and fixes the horizontal bookends on the first hit.
//! - Merges contiguous rows into lines and chunks lines into five-line staves,
//!   rejecting pages whose line count is not a multiple of five.
//! - Estimates one line thickness and one space height for the whole page.
//! - For every staff, erases the clef-side line (keeping ink that crosses it)
//!   and draws a replacement one space beyond the opposite outer line.
//!
//! Modules
//! - [`params`] – configuration shared by all pages of a run.
//! - `pipeline` – the [`ClefShifter`] implementation.

pub mod params;
mod pipeline;

pub use params::{ClefParams, DEFAULT_BLACK_THRESHOLD, DEFAULT_MIN_STAFF_WIDTH};
pub use pipeline::{ClefShifter, PageOutput};
