//! Rasterizer backed by poppler's `pdftoppm`.
//!
//! Pages are rendered as 8-bit gray PNGs into a temporary directory and loaded
//! back in page order.
use super::{PageRasterizer, DEFAULT_DPI};
use crate::error::DocumentError;
use crate::image::io::load_grayscale_image;
use crate::image::GrayImageU8;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

const PAGE_PREFIX: &str = "page";

#[derive(Clone, Debug)]
pub struct PopplerRasterizer {
    program: PathBuf,
    dpi: u32,
}

impl Default for PopplerRasterizer {
    fn default() -> Self {
        Self::new(DEFAULT_DPI)
    }
}

impl PopplerRasterizer {
    pub fn new(dpi: u32) -> Self {
        Self {
            program: PathBuf::from("pdftoppm"),
            dpi,
        }
    }

    /// Use a specific `pdftoppm` executable instead of the one on `PATH`.
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }
}

impl PageRasterizer for PopplerRasterizer {
    fn rasterize_path(&self, path: &Path) -> Result<Vec<GrayImageU8>, DocumentError> {
        let dir = tempfile::tempdir().map_err(|e| DocumentError::io(std::env::temp_dir(), e))?;
        let prefix = dir.path().join(PAGE_PREFIX);
        debug!(
            "rasterizing {} at {} dpi into {}",
            path.display(),
            self.dpi,
            dir.path().display()
        );

        let output = Command::new(&self.program)
            .arg("-r")
            .arg(self.dpi.to_string())
            .arg("-gray")
            .arg("-png")
            .arg(path)
            .arg(&prefix)
            .output()
            .map_err(|e| {
                DocumentError::Rasterize(format!(
                    "failed to run {}: {e}",
                    self.program.display()
                ))
            })?;
        if !output.status.success() {
            return Err(DocumentError::Rasterize(format!(
                "{} exited with {}: {}",
                self.program.display(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let files = rendered_pages(dir.path())?;
        if files.is_empty() {
            return Err(DocumentError::EmptyDocument);
        }
        files
            .iter()
            .map(|(_, file)| load_grayscale_image(file).map_err(DocumentError::Rasterize))
            .collect()
    }

    fn rasterize_bytes(&self, pdf: &[u8]) -> Result<Vec<GrayImageU8>, DocumentError> {
        let dir = tempfile::tempdir().map_err(|e| DocumentError::io(std::env::temp_dir(), e))?;
        let path = dir.path().join("input.pdf");
        fs::write(&path, pdf).map_err(|e| DocumentError::io(&path, e))?;
        self.rasterize_path(&path)
    }
}

/// `pdftoppm` output files in `dir`, ordered by page number.
fn rendered_pages(dir: &Path) -> Result<Vec<(u32, PathBuf)>, DocumentError> {
    let entries = fs::read_dir(dir).map_err(|e| DocumentError::io(dir, e))?;
    let mut pages = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| DocumentError::io(dir, e))?.path();
        if let Some(number) = page_number(&path) {
            pages.push((number, path));
        }
    }
    pages.sort_by_key(|(number, _)| *number);
    Ok(pages)
}

/// Parse `page-07.png` style names produced by `pdftoppm`.
fn page_number(path: &Path) -> Option<u32> {
    if path.extension()? != "png" {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    stem.strip_prefix(PAGE_PREFIX)?
        .strip_prefix('-')?
        .parse()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_numbers_parse_from_pdftoppm_names() {
        assert_eq!(page_number(Path::new("/tmp/x/page-1.png")), Some(1));
        assert_eq!(page_number(Path::new("/tmp/x/page-012.png")), Some(12));
        assert_eq!(page_number(Path::new("/tmp/x/page-3.ppm")), None);
        assert_eq!(page_number(Path::new("/tmp/x/input.pdf")), None);
    }

    #[test]
    fn rendered_pages_sort_numerically() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["page-10.png", "page-2.png", "page-1.png", "input.pdf"] {
            fs::write(dir.path().join(name), b"").unwrap();
        }
        let numbers: Vec<u32> = rendered_pages(dir.path())
            .unwrap()
            .into_iter()
            .map(|(n, _)| n)
            .collect();
        assert_eq!(numbers, vec![1, 2, 10]);
    }

    #[test]
    fn missing_program_is_a_rasterize_error() {
        let rasterizer =
            PopplerRasterizer::default().with_program("/nonexistent/clef-shift/pdftoppm");
        let err = rasterizer.rasterize_bytes(b"%PDF-1.4").unwrap_err();
        assert!(matches!(err, DocumentError::Rasterize(_)), "{err}");
    }
}
