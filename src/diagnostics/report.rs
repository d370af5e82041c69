use super::TimingBreakdown;
use crate::staff::{Bookends, Direction, Staff, StaffGeometry};
use serde::Serialize;

/// What the pipeline detected on one page.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageReport {
    pub width: usize,
    pub height: usize,
    pub direction: Direction,
    pub bookends: Bookends,
    pub geometry: StaffGeometry,
    pub staves: Vec<Staff>,
    pub timing: TimingBreakdown,
}

impl PageReport {
    pub fn line_count(&self) -> usize {
        self.staves.iter().map(|s| s.lines.len()).sum()
    }
}

/// Page reports of one converted document plus document-level timings
/// (rasterization, page processing, serialization).
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentReport {
    pub pages: Vec<PageReport>,
    pub timing: TimingBreakdown,
}

impl DocumentReport {
    pub fn staff_count(&self) -> usize {
        self.pages.iter().map(|p| p.staves.len()).sum()
    }
}
