//! 8-bit grayscale buffers: a borrowed strided view and an owned buffer.
//!
//! Rows are stored top to bottom, so `(x, y)` addresses column `x` of image
//! row `y` with row 0 at the top.

use image::GrayImage;

#[derive(Clone, Copy, Debug)]
pub struct ImageU8<'a> {
    pub w: usize,
    pub h: usize,
    pub stride: usize, // bytes between rows
    pub data: &'a [u8],
}

impl<'a> ImageU8<'a> {
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.stride + x]
    }

    #[inline]
    pub fn row(&self, y: usize) -> &'a [u8] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }

    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// Iterate over every pixel in row-major order, skipping stride padding.
    pub fn pixels(&self) -> impl Iterator<Item = u8> + '_ {
        (0..self.h).flat_map(move |y| self.row(y).iter().copied())
    }

    /// Smallest and largest intensity, `None` for an empty view.
    pub fn min_max(&self) -> Option<(u8, u8)> {
        self.pixels().fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }

    /// Mean intensity; zero for an empty view.
    pub fn mean(&self) -> f64 {
        let n = self.w * self.h;
        if n == 0 {
            return 0.0;
        }
        let sum: u64 = self.pixels().map(u64::from).sum();
        sum as f64 / n as f64
    }

    /// Population standard deviation of the intensities.
    pub fn std_dev(&self) -> f64 {
        let n = self.w * self.h;
        if n == 0 {
            return 0.0;
        }
        let mean = self.mean();
        let var = self
            .pixels()
            .map(|v| {
                let d = v as f64 - mean;
                d * d
            })
            .sum::<f64>()
            / n as f64;
        var.sqrt()
    }

    pub fn to_owned(&self) -> GrayImageU8 {
        let mut data = Vec::with_capacity(self.w * self.h);
        for y in 0..self.h {
            data.extend_from_slice(self.row(y));
        }
        GrayImageU8::new(self.w, self.h, data)
    }
}

/// Owned 8-bit grayscale buffer (stride == width).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrayImageU8 {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl GrayImageU8 {
    /// Construct an owned grayscale buffer given raw row-major bytes.
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Self {
        assert_eq!(
            data.len(),
            width * height,
            "buffer length must equal width * height"
        );
        Self {
            width,
            height,
            data,
        }
    }

    /// Buffer of the given size with every pixel set to `value`.
    pub fn filled(width: usize, height: usize, value: u8) -> Self {
        Self::new(width, height, vec![value; width * height])
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
        self.data[y * self.width + x] = v;
    }

    pub fn row_mut(&mut self, y: usize) -> &mut [u8] {
        let start = y * self.width;
        &mut self.data[start..start + self.width]
    }

    pub fn data(&self) -> &[u8] {
        &self.data
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

    /// Copy into an `image` crate buffer for use with `imageproc` routines.
    pub fn to_luma(&self) -> GrayImage {
        GrayImage::from_raw(self.width as u32, self.height as u32, self.data.clone())
            .unwrap_or_else(|| GrayImage::new(self.width as u32, self.height as u32))
    }
}

impl From<GrayImage> for GrayImageU8 {
    fn from(img: GrayImage) -> Self {
        let width = img.width() as usize;
        let height = img.height() as usize;
        Self::new(width, height, img.into_raw())
    }
}
