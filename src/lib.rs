#![doc = include_str!("../README.md")]

pub mod config;
pub mod detector;
pub mod diagnostics;
pub mod document;
pub mod error;
pub mod image;
pub mod staff;

// --- High-level re-exports -------------------------------------------------

pub use crate::detector::{ClefParams, ClefShifter, PageOutput};
pub use crate::diagnostics::{DocumentReport, PageReport};
pub use crate::error::{DocumentError, PageError};
pub use crate::staff::Direction;

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use clef_shift::prelude::*;
///
/// # fn main() -> Result<(), PageError> {
/// let (w, h) = (850usize, 1100usize);
/// let page = GrayImageU8::filled(w, h, 255);
///
/// let shifter = ClefShifter::new(ClefParams {
///     direction: Direction::BassToTreble,
///     ..Default::default()
/// })?;
///
/// let shifted = shifter.process(page.as_view())?;
/// println!("{}x{}", shifted.width(), shifted.height());
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::{GrayImageU8, ImageU8};
    pub use crate::{ClefParams, ClefShifter, Direction, PageError};
}
