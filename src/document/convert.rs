//! Whole-document conversion: rasterize, shift every page, serialize.
//!
//! Any page failure aborts the document; nothing is written for it.
use super::{PageRasterizer, PageSerializer};
use crate::detector::{ClefShifter, PageOutput};
use crate::diagnostics::{DocumentReport, PageReport, TimingBreakdown};
use crate::error::DocumentError;
use crate::image::GrayImageU8;
use crate::staff::Direction;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Run the page pipeline over every page, failing on the first bad page.
///
/// With the `parallel` feature pages are processed concurrently; each page
/// owns its working buffer, so no state is shared between them.
pub fn process_pages(
    shifter: &ClefShifter,
    pages: &[GrayImageU8],
) -> Result<Vec<PageOutput>, DocumentError> {
    let run = |(index, page): (usize, &GrayImageU8)| {
        shifter
            .process_with_diagnostics(page.as_view())
            .map_err(|source| DocumentError::Page { index, source })
    };
    #[cfg(feature = "parallel")]
    {
        pages.par_iter().enumerate().map(run).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        pages.iter().enumerate().map(run).collect()
    }
}

/// Sibling path with the target clef inserted before the extension:
/// `song.pdf` → `song.bass.pdf`.
pub fn output_path(input: &Path, direction: Direction) -> PathBuf {
    let clef = direction.target_clef();
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match input.extension() {
        Some(ext) => format!("{stem}.{clef}.{}", ext.to_string_lossy()),
        None => format!("{stem}.{clef}"),
    };
    input.with_file_name(name)
}

/// Rasterizer + page pipeline + serializer.
pub struct DocumentConverter<R, S> {
    shifter: ClefShifter,
    rasterizer: R,
    serializer: S,
}

impl<R: PageRasterizer, S: PageSerializer> DocumentConverter<R, S> {
    pub fn new(shifter: ClefShifter, rasterizer: R, serializer: S) -> Self {
        Self {
            shifter,
            rasterizer,
            serializer,
        }
    }

    /// Convert already rasterized pages into serialized output bytes.
    pub fn convert_pages(
        &self,
        pages: &[GrayImageU8],
    ) -> Result<(Vec<u8>, DocumentReport), DocumentError> {
        let mut timing = TimingBreakdown::default();
        self.convert_pages_timed(pages, &mut timing)
            .map(|(bytes, pages)| (bytes, DocumentReport { pages, timing }))
    }

    /// Convert an in-memory PDF.
    pub fn convert_bytes(&self, pdf: &[u8]) -> Result<(Vec<u8>, DocumentReport), DocumentError> {
        let total = Instant::now();
        let mut timing = TimingBreakdown::default();

        let stage = Instant::now();
        let pages = self.rasterizer.rasterize_bytes(pdf)?;
        timing.push("rasterize", elapsed_ms(stage));

        let (bytes, reports) = self.convert_pages_timed(&pages, &mut timing)?;
        timing.total_ms = elapsed_ms(total);
        Ok((
            bytes,
            DocumentReport {
                pages: reports,
                timing,
            },
        ))
    }

    /// Convert `input` and write the result to `output`.
    ///
    /// The output file is only created once every page has been converted.
    pub fn convert_file(&self, input: &Path, output: &Path) -> Result<DocumentReport, DocumentError> {
        let total = Instant::now();
        let mut timing = TimingBreakdown::default();

        let stage = Instant::now();
        let pages = self.rasterizer.rasterize_path(input)?;
        timing.push("rasterize", elapsed_ms(stage));

        let (bytes, reports) = self.convert_pages_timed(&pages, &mut timing)?;
        fs::write(output, bytes).map_err(|e| DocumentError::io(output, e))?;
        timing.total_ms = elapsed_ms(total);

        info!(
            "{} -> {}: {} pages, {} staves, {:.1} ms",
            input.display(),
            output.display(),
            reports.len(),
            reports.iter().map(|p| p.staves.len()).sum::<usize>(),
            timing.total_ms
        );
        Ok(DocumentReport {
            pages: reports,
            timing,
        })
    }

    fn convert_pages_timed(
        &self,
        pages: &[GrayImageU8],
        timing: &mut TimingBreakdown,
    ) -> Result<(Vec<u8>, Vec<PageReport>), DocumentError> {
        if pages.is_empty() {
            return Err(DocumentError::EmptyDocument);
        }
        let stage = Instant::now();
        let outputs = process_pages(&self.shifter, pages)?;
        timing.push("process", elapsed_ms(stage));

        let (images, reports): (Vec<GrayImageU8>, Vec<_>) =
            outputs.into_iter().map(|o| (o.image, o.report)).unzip();

        let stage = Instant::now();
        let bytes = self.serializer.serialize(&images)?;
        timing.push("serialize", elapsed_ms(stage));
        Ok((bytes, reports))
    }
}

fn elapsed_ms(since: Instant) -> f64 {
    since.elapsed().as_secs_f64() * 1000.0
}
