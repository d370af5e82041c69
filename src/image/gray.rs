//! Owned 8-bit grayscale page buffer in row-major layout (stride == width).
//!
//! This is the unit the rasterizer produces, the transformer mutates and the
//! serializer consumes. Detection always goes through a borrowed
//! [`ImageU8`] of a separate, untouched buffer.
use super::{ImageU8, ImageView, ImageViewMut};

/// Intensity of fully white pixels.
pub const WHITE: u8 = 255;
/// Intensity of fully black pixels.
pub const BLACK: u8 = 0;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrayImageU8 {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl GrayImageU8 {
    /// Construct an owned grayscale buffer given raw bytes.
    ///
    /// Returns `None` when `data.len() != width * height`.
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Option<Self> {
        (data.len() == width * height).then_some(Self {
            width,
            height,
            data,
        })
    }

    /// A page filled with a single intensity.
    pub fn filled(width: usize, height: usize, value: u8) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    /// Copy a borrowed view into a fresh, tightly packed buffer.
    pub fn from_view(view: &ImageU8<'_>) -> Self {
        let mut data = Vec::with_capacity(view.w * view.h);
        for row in view.rows() {
            data.extend_from_slice(row);
        }
        Self {
            width: view.w,
            height: view.h,
            data,
        }
    }

    /// Image width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.width + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: u8) {
        let i = y * self.width + x;
        self.data[i] = v;
    }

    /// Backing storage in row-major order.
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Borrow as a read-only `ImageU8` view
    pub fn as_view(&self) -> ImageU8<'_> {
        ImageU8 {
            w: self.width,
            h: self.height,
            stride: self.width,
            data: &self.data,
        }
    }
}

impl ImageView for GrayImageU8 {
    type Pixel = u8;

    #[inline]
    fn width(&self) -> usize {
        self.width
    }
    #[inline]
    fn height(&self) -> usize {
        self.height
    }
    #[inline]
    fn stride(&self) -> usize {
        self.width
    }
    #[inline]
    fn row(&self, y: usize) -> &[u8] {
        let start = y * self.width;
        &self.data[start..start + self.width]
    }
}

impl ImageViewMut for GrayImageU8 {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [u8] {
        let start = y * self.width;
        &mut self.data[start..start + self.width]
    }
}
