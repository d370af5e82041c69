//! Diagnostics data model returned alongside transformed pages.
//!
//! [`PageReport`] records what the pipeline found on one page (bookends,
//! staves, geometry) and how long each stage took. [`DocumentReport`] collects
//! the page reports of one converted document and is what the command-line
//! tool writes as JSON.

pub mod report;
pub mod timing;

pub use report::{DocumentReport, PageReport};
pub use timing::{StageTiming, TimingBreakdown};
