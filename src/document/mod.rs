//! Document-level plumbing around the page pipeline.
//!
//! Rasterizing a PDF and writing pages back into a PDF are external concerns;
//! they sit behind the [`PageRasterizer`] and [`PageSerializer`] traits so the
//! page pipeline only ever sees in-memory gray buffers.
//!
//! - [`poppler`] – rasterizer adapter shelling out to poppler's `pdftoppm`.
//! - [`pdf`] – serializer writing one Flate-compressed gray image per page.
//! - [`convert`] – [`DocumentConverter`] tying the three together.

pub mod convert;
pub mod pdf;
pub mod poppler;

pub use convert::{output_path, process_pages, DocumentConverter};
pub use pdf::PdfWriter;
pub use poppler::PopplerRasterizer;

use crate::error::DocumentError;
use crate::image::GrayImageU8;
use std::path::Path;

/// Resolution used for both rasterization and serialization unless overridden.
pub const DEFAULT_DPI: u32 = 100;

/// Turns a PDF document into ordered grayscale page images.
pub trait PageRasterizer {
    fn rasterize_path(&self, path: &Path) -> Result<Vec<GrayImageU8>, DocumentError>;
    fn rasterize_bytes(&self, pdf: &[u8]) -> Result<Vec<GrayImageU8>, DocumentError>;
}

/// Turns ordered page images back into a single document.
pub trait PageSerializer {
    fn serialize(&self, pages: &[GrayImageU8]) -> Result<Vec<u8>, DocumentError>;
}
