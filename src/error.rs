//! Error types for page- and document-level processing.
//!
//! Every variant is terminal: a page that fails any stage produces no output
//! image, and a document with a failing page produces no output file.
use std::path::PathBuf;
use thiserror::Error;

/// Failure of the per-page detection and transformation pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageError {
    /// No row held a black run wider than the configured staff width.
    #[error("no staff lines found")]
    NoStaffLinesFound,
    /// The horizontal extent of the first staff could not be fixed.
    #[error("unable to determine staff bookends")]
    BookendsUndetermined,
    /// Detected lines do not partition into five-line staves.
    #[error("number of staff lines ({lines}) not divisible by 5")]
    InvalidStaffLineCount { lines: usize },
    #[error("invalid parameters: {0}")]
    InvalidParams(String),
}

/// Failure while converting a whole document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("page {}: {source}", .index + 1)]
    Page {
        /// Zero-based page index.
        index: usize,
        #[source]
        source: PageError,
    },
    #[error("document has no pages")]
    EmptyDocument,
    #[error("rasterization failed: {0}")]
    Rasterize(String),
    #[error("serialization failed: {0}")]
    Serialize(String),
    #[error("i/o error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DocumentError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// The page-level cause, when the failure came from the pipeline.
    pub fn page_error(&self) -> Option<(usize, &PageError)> {
        match self {
            Self::Page { index, source } => Some((*index, source)),
            _ => None,
        }
    }
}
