//! Whole-image intensity operations used around the pipeline stages.

use super::{GrayImageU8, ImageU8};
use imageproc::morphology::{grayscale_open, Mask};

/// Linearly stretch `[min, max]` onto `[0, 255]`, truncating to integers.
///
/// Constant images are returned unchanged.
pub fn normalize(img: ImageU8) -> GrayImageU8 {
    let Some((lo, hi)) = img.min_max() else {
        return img.to_owned();
    };
    if lo == hi {
        return img.to_owned();
    }
    let span = (hi - lo) as f64;
    let data = img
        .pixels()
        .map(|v| ((v - lo) as f64 * 255.0 / span) as u8)
        .collect();
    GrayImageU8::new(img.w, img.h, data)
}

/// Morphological closing of the dark ink with a square kernel.
///
/// Ink is dark on a light background, so closing the ink is a minimum
/// filter followed by a maximum filter on intensities, which is a grayscale
/// opening of the intensity image. Fills bright gaps narrower than the kernel
/// inside strokes. The square has side `2 * (kernel / 2) + 1`; `kernel <= 1`
/// is the identity.
pub fn close(img: ImageU8, kernel: usize) -> GrayImageU8 {
    let src = img.to_owned();
    if kernel <= 1 || img.is_empty() {
        return src;
    }
    let radius = (kernel / 2).min(u8::MAX as usize) as u8;
    GrayImageU8::from(grayscale_open(&src.to_luma(), &Mask::square(radius)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_stretches_to_full_range() {
        let img = GrayImageU8::new(3, 1, vec![50, 100, 150]);
        let out = normalize(img.as_view());
        assert_eq!(out.data(), &[0, 127, 255]);
    }

    #[test]
    fn normalize_leaves_constant_image() {
        let img = GrayImageU8::filled(4, 4, 90);
        assert_eq!(normalize(img.as_view()), img);
    }

    #[test]
    fn closing_with_unit_kernel_is_identity() {
        let img = GrayImageU8::new(3, 2, vec![0, 255, 3, 9, 200, 100]);
        assert_eq!(close(img.as_view(), 1), img);
    }

    #[test]
    fn closing_removes_bright_pinhole_in_dark_stroke() {
        // 5x3 dark stroke on white with one bright pixel in its middle.
        let mut img = GrayImageU8::filled(11, 9, 255);
        for x in 3..8 {
            for y in 3..6 {
                img.set(x, y, 0);
            }
        }
        img.set(5, 4, 255);
        let out = close(img.as_view(), 3);
        assert_eq!(out.get(5, 4), 0);
        assert_eq!(out.get(3, 3), 0);
        assert_eq!(out.get(2, 2), 255);
        assert_eq!(out.get(0, 0), 255);
    }
}
