/// Borrowed 8-bit grayscale view (0 = black, 255 = white).
#[derive(Clone, Copy, Debug)]
pub struct ImageU8<'a> {
    pub w: usize,
    pub h: usize,
    pub stride: usize, // bytes between rows
    pub data: &'a [u8],
}

impl<'a> ImageU8<'a> {
    /// Wrap a tightly packed buffer. Returns `None` when `data` is too short.
    pub fn from_packed(w: usize, h: usize, data: &'a [u8]) -> Option<Self> {
        (data.len() >= w * h).then_some(Self {
            w,
            h,
            stride: w,
            data,
        })
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.stride + x]
    }

    /// Pixel lookup with signed row coordinates; out-of-page reads yield `None`.
    #[inline]
    pub fn get_checked(&self, x: usize, y: isize) -> Option<u8> {
        if y < 0 || y as usize >= self.h || x >= self.w {
            return None;
        }
        Some(self.get(x, y as usize))
    }
}

impl<'a> crate::image::traits::ImageView for ImageU8<'a> {
    type Pixel = u8;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn stride(&self) -> usize {
        self.stride
    }
    #[inline]
    fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
}
