//! Per-page pipeline driving detection and transformation end-to-end.
//!
//! The [`ClefShifter`] exposes a simple API: feed the original grayscale page
//! and get back a transformed copy. The original is only ever read; the
//! returned buffer is a fresh copy owned by the caller.
//!
//! Typical usage:
//! ```no_run
//! use clef_shift::{ClefParams, ClefShifter};
//! use clef_shift::image::ImageU8;
//!
//! # fn example(page: ImageU8) -> Result<(), clef_shift::PageError> {
//! let shifter = ClefShifter::new(ClefParams::default())?;
//! let output = shifter.process_with_diagnostics(page)?;
//! println!("staves: {}", output.report.staves.len());
//! # Ok(())
//! # }
//! ```
use super::params::ClefParams;
use crate::diagnostics::{PageReport, TimingBreakdown};
use crate::error::PageError;
use crate::image::{GrayImageU8, ImageU8};
use crate::staff::{
    detect_staff_rows, estimate_geometry, group_staves, transform_staff, BlackMask,
};
use log::{debug, warn};
use std::time::Instant;

/// Transformed page together with what was detected on it.
#[derive(Clone, Debug)]
pub struct PageOutput {
    pub image: GrayImageU8,
    pub report: PageReport,
}

/// Staff detector and clef transformer for single pages.
#[derive(Clone, Debug)]
pub struct ClefShifter {
    params: ClefParams,
}

impl ClefShifter {
    /// Create a shifter, rejecting parameters outside their valid range.
    pub fn new(params: ClefParams) -> Result<Self, PageError> {
        params.validate()?;
        Ok(Self { params })
    }

    /// Run the pipeline on one page, returning only the transformed image.
    pub fn process(&self, original: ImageU8<'_>) -> Result<GrayImageU8, PageError> {
        self.process_with_diagnostics(original).map(|out| out.image)
    }

    /// Run the pipeline and return both the image and a detailed report.
    pub fn process_with_diagnostics(
        &self,
        original: ImageU8<'_>,
    ) -> Result<PageOutput, PageError> {
        let (width, height) = (original.w, original.h);
        debug!("ClefShifter::process start w={width} h={height}");
        let total_start = Instant::now();
        let mut timing = TimingBreakdown::default();
        let mask = BlackMask::new(original, self.params.black_threshold);

        let stage = Instant::now();
        let found = detect_staff_rows(&mask, self.params.min_staff_width)?;
        timing.push("detect", elapsed_ms(stage));

        let stage = Instant::now();
        let staves = group_staves(&found.rows)?;
        timing.push("group", elapsed_ms(stage));

        let stage = Instant::now();
        let geometry = estimate_geometry(&staves)?;
        timing.push("geometry", elapsed_ms(stage));
        debug!(
            "geometry: staves={} line_thickness={} space_height={}",
            staves.len(),
            geometry.line_thickness,
            geometry.space_height
        );
        if geometry.space_height <= geometry.line_thickness {
            warn!(
                "space height {} does not exceed line thickness {}; staves are likely misdetected",
                geometry.space_height, geometry.line_thickness
            );
        }

        let stage = Instant::now();
        let mut working = GrayImageU8::from_view(&original);
        for staff in &staves {
            transform_staff(
                &mut working,
                &mask,
                staff,
                &geometry,
                &found.bookends,
                self.params.direction,
            );
        }
        timing.push("transform", elapsed_ms(stage));
        timing.total_ms = elapsed_ms(total_start);

        let report = PageReport {
            width,
            height,
            direction: self.params.direction,
            bookends: found.bookends,
            geometry,
            staves,
            timing,
        };
        Ok(PageOutput {
            image: working,
            report,
        })
    }
}

fn elapsed_ms(since: Instant) -> f64 {
    since.elapsed().as_secs_f64() * 1000.0
}
