//! Minimal PDF writer for gray page images.
//!
//! Each page becomes one 8-bit DeviceGray image XObject scaled to the full
//! page. The image data is the IDAT payload of the page's PNG encoding, which
//! is already a zlib stream with PNG row filters, so it is embedded as-is with
//! `/FlateDecode` and PNG predictor parameters.
use super::{PageSerializer, DEFAULT_DPI};
use crate::error::DocumentError;
use crate::image::io::encode_grayscale_png;
use crate::image::GrayImageU8;
use log::debug;

const PNG_SIGNATURE: &[u8; 8] = b"\x89PNG\r\n\x1a\n";
const POINTS_PER_INCH: f64 = 72.0;

const CATALOG_ID: usize = 1;
const PAGES_ID: usize = 2;
const OBJECTS_PER_PAGE: usize = 3;

#[derive(Clone, Copy, Debug)]
pub struct PdfWriter {
    dpi: u32,
}

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new(DEFAULT_DPI)
    }
}

impl PdfWriter {
    pub fn new(dpi: u32) -> Self {
        Self { dpi }
    }

    fn points(&self, pixels: usize) -> f64 {
        pixels as f64 * POINTS_PER_INCH / self.dpi.max(1) as f64
    }
}

impl PageSerializer for PdfWriter {
    fn serialize(&self, pages: &[GrayImageU8]) -> Result<Vec<u8>, DocumentError> {
        if pages.is_empty() {
            return Err(DocumentError::EmptyDocument);
        }
        let page_id = |i: usize| PAGES_ID + 1 + i * OBJECTS_PER_PAGE;

        let mut out = ObjectWriter::new();
        out.raw(b"%PDF-1.4\n%\xe2\xe3\xcf\xd3\n");

        out.object(
            CATALOG_ID,
            format!("<< /Type /Catalog /Pages {PAGES_ID} 0 R >>").as_bytes(),
        );
        let kids: Vec<String> = (0..pages.len())
            .map(|i| format!("{} 0 R", page_id(i)))
            .collect();
        out.object(
            PAGES_ID,
            format!(
                "<< /Type /Pages /Kids [{}] /Count {} >>",
                kids.join(" "),
                pages.len()
            )
            .as_bytes(),
        );

        for (i, page) in pages.iter().enumerate() {
            let (id, contents_id, image_id) = (page_id(i), page_id(i) + 1, page_id(i) + 2);
            let (w_pt, h_pt) = (self.points(page.width()), self.points(page.height()));

            out.object(
                id,
                format!(
                    "<< /Type /Page /Parent {PAGES_ID} 0 R /MediaBox [0 0 {w_pt:.2} {h_pt:.2}] \
                     /Resources << /XObject << /Im0 {image_id} 0 R >> >> /Contents {contents_id} 0 R >>"
                )
                .as_bytes(),
            );

            let contents = format!("q {w_pt:.2} 0 0 {h_pt:.2} 0 0 cm /Im0 Do Q");
            out.stream(contents_id, "", contents.as_bytes());

            let png = encode_grayscale_png(page).map_err(DocumentError::Serialize)?;
            let idat = png_idat(&png).map_err(DocumentError::Serialize)?;
            let w = page.width();
            out.stream(
                image_id,
                &format!(
                    "/Type /XObject /Subtype /Image /Width {w} /Height {} /ColorSpace /DeviceGray \
                     /BitsPerComponent 8 /Filter /FlateDecode \
                     /DecodeParms << /Predictor 15 /Colors 1 /BitsPerComponent 8 /Columns {w} >> ",
                    page.height()
                ),
                &idat,
            );
        }

        let bytes = out.finish(CATALOG_ID);
        debug!("serialized {} pages into {} bytes", pages.len(), bytes.len());
        Ok(bytes)
    }
}

/// Byte buffer that records object offsets for the cross-reference table.
struct ObjectWriter {
    buf: Vec<u8>,
    offsets: Vec<(usize, usize)>,
}

impl ObjectWriter {
    fn new() -> Self {
        Self {
            buf: Vec::new(),
            offsets: Vec::new(),
        }
    }

    fn raw(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    fn object(&mut self, id: usize, body: &[u8]) {
        self.offsets.push((id, self.buf.len()));
        self.raw(format!("{id} 0 obj\n").as_bytes());
        self.raw(body);
        self.raw(b"\nendobj\n");
    }

    /// Stream object; `dict_entries` is spliced into the stream dictionary.
    fn stream(&mut self, id: usize, dict_entries: &str, data: &[u8]) {
        let mut body =
            format!("<< {dict_entries}/Length {} >>\nstream\n", data.len()).into_bytes();
        body.extend_from_slice(data);
        body.extend_from_slice(b"\nendstream");
        self.object(id, &body);
    }

    fn finish(mut self, root: usize) -> Vec<u8> {
        self.offsets.sort_by_key(|(id, _)| *id);
        let size = self.offsets.len() + 1;
        let xref_at = self.buf.len();
        self.raw(format!("xref\n0 {size}\n0000000000 65535 f \n").as_bytes());
        let entries: String = self
            .offsets
            .iter()
            .map(|(_, offset)| format!("{offset:010} 00000 n \n"))
            .collect();
        self.raw(entries.as_bytes());
        self.raw(
            format!("trailer\n<< /Size {size} /Root {root} 0 R >>\nstartxref\n{xref_at}\n%%EOF\n")
                .as_bytes(),
        );
        self.buf
    }
}

/// Concatenated IDAT payload of an 8-bit gray, non-interlaced PNG.
fn png_idat(png: &[u8]) -> Result<Vec<u8>, String> {
    let body = png
        .strip_prefix(PNG_SIGNATURE.as_slice())
        .ok_or_else(|| "missing PNG signature".to_string())?;
    let mut idat = Vec::new();
    let mut pos = 0usize;
    while pos + 8 <= body.len() {
        let len = u32::from_be_bytes([body[pos], body[pos + 1], body[pos + 2], body[pos + 3]])
            as usize;
        let kind = &body[pos + 4..pos + 8];
        let data_end = pos + 8 + len;
        if data_end + 4 > body.len() {
            return Err("truncated PNG chunk".to_string());
        }
        let data = &body[pos + 8..data_end];
        match kind {
            b"IHDR" => {
                // bit depth, color type, interlace
                if len < 13 || data[8] != 8 || data[9] != 0 || data[12] != 0 {
                    return Err("expected 8-bit gray non-interlaced PNG".to_string());
                }
            }
            b"IDAT" => idat.extend_from_slice(data),
            b"IEND" => return Ok(idat),
            _ => {}
        }
        pos = data_end + 4;
    }
    Err("PNG ended without IEND".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
        haystack.windows(needle.len()).position(|w| w == needle)
    }

    #[test]
    fn idat_is_extracted_from_gray_png() {
        let page = GrayImageU8::filled(16, 8, 200);
        let png = encode_grayscale_png(&page).unwrap();
        let idat = png_idat(&png).unwrap();
        // zlib header: deflate method, window size nibble <= 7.
        assert_eq!(idat[0] & 0x0f, 8);
        assert!(png_idat(b"not a png").is_err());
    }

    #[test]
    fn writes_one_page_object_per_image() {
        let pages = vec![
            GrayImageU8::filled(50, 100, 255),
            GrayImageU8::filled(50, 100, 0),
        ];
        let pdf = PdfWriter::new(100).serialize(&pages).unwrap();
        assert!(pdf.starts_with(b"%PDF-1.4"));
        assert!(pdf.ends_with(b"%%EOF\n"));
        assert!(find(&pdf, b"/Count 2").is_some());
        assert!(find(&pdf, b"/Kids [3 0 R 6 0 R]").is_some());
        assert!(find(&pdf, b"/MediaBox [0 0 36.00 72.00]").is_some());
        assert!(find(&pdf, b"/Columns 50").is_some());
    }

    #[test]
    fn xref_offsets_point_at_objects() {
        let pages = vec![GrayImageU8::filled(10, 10, 128)];
        let pdf = PdfWriter::default().serialize(&pages).unwrap();
        let xref = find(&pdf, b"xref\n").unwrap();
        let table = std::str::from_utf8(&pdf[xref..]).unwrap();
        let offsets: Vec<usize> = table
            .lines()
            .skip(3)
            .take_while(|l| l.ends_with(" n "))
            .map(|l| l[..10].parse().unwrap())
            .collect();
        assert_eq!(offsets.len(), 5);
        for (i, offset) in offsets.iter().enumerate() {
            let header = format!("{} 0 obj", i + 1);
            assert!(pdf[*offset..].starts_with(header.as_bytes()), "object {}", i + 1);
        }
        let startxref = find(&pdf, b"startxref\n").unwrap() + "startxref\n".len();
        let tail = std::str::from_utf8(&pdf[startxref..]).unwrap();
        assert_eq!(tail.lines().next().unwrap().parse::<usize>().unwrap(), xref);
    }

    #[test]
    fn empty_document_is_rejected() {
        assert!(matches!(
            PdfWriter::default().serialize(&[]),
            Err(DocumentError::EmptyDocument)
        ));
    }
}
