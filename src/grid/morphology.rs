//! Binary morphology with 1-pixel-thick line kernels.
//!
//! Masks are `GrayImageU8` buffers holding 0 (background) or 255 (ink).
//! The erosions and dilations skip out-of-image taps, so lines touching the
//! border survive an opening.

use crate::image::{GrayImageU8, ImageU8};
use image::{GrayImage, Luma};
use imageproc::morphology::{grayscale_dilate, grayscale_erode, Mask};

pub(crate) const INK: u8 = 255;

/// Longest structuring element a [`Mask`] can hold.
const MAX_KERNEL_LEN: usize = 511;

/// Orientation and length of a line structuring element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum LineKernel {
    Horizontal(usize),
    Vertical(usize),
}

impl LineKernel {
    fn len(self) -> usize {
        match self {
            LineKernel::Horizontal(n) | LineKernel::Vertical(n) => n.clamp(1, MAX_KERNEL_LEN),
        }
    }

    /// Line mask anchored at its middle element.
    fn mask(self) -> Mask {
        let len = self.len();
        let anchor = (len / 2) as u8;
        match self {
            LineKernel::Horizontal(_) => {
                Mask::from_image(&GrayImage::from_pixel(len as u32, 1, Luma([INK])), anchor, 0)
            }
            LineKernel::Vertical(_) => {
                Mask::from_image(&GrayImage::from_pixel(1, len as u32, Luma([INK])), 0, anchor)
            }
        }
    }
}

/// Inverted binarisation: pixels at or below `level` become ink.
pub(crate) fn binarize_inverted(img: ImageU8, level: u8) -> GrayImageU8 {
    let data = img
        .pixels()
        .map(|v| if v <= level { INK } else { 0 })
        .collect();
    GrayImageU8::new(img.w, img.h, data)
}

/// Morphological opening repeated as `iterations` erosions followed by
/// `iterations` dilations.
pub(crate) fn open(mask: &GrayImageU8, kernel: LineKernel, iterations: usize) -> GrayImageU8 {
    let element = kernel.mask();
    let mut cur = mask.to_luma();
    for _ in 0..iterations {
        cur = grayscale_erode(&cur, &element);
    }
    for _ in 0..iterations {
        cur = grayscale_dilate(&cur, &element);
    }
    GrayImageU8::from(cur)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask_from_rows(rows: &[&str]) -> GrayImageU8 {
        let h = rows.len();
        let w = rows[0].len();
        let data = rows
            .iter()
            .flat_map(|r| r.bytes().map(|b| if b == b'#' { INK } else { 0 }))
            .collect();
        GrayImageU8::new(w, h, data)
    }

    #[test]
    fn opening_keeps_long_runs_only() {
        let mask = mask_from_rows(&["..######..", "...##.....", "##########"]);
        let opened = open(&mask, LineKernel::Horizontal(5), 1);
        let expected = mask_from_rows(&["..######..", "..........", "##########"]);
        assert_eq!(opened, expected);
    }

    #[test]
    fn iterations_tighten_selectivity() {
        let mask = mask_from_rows(&[".#######..", ".........."]);
        assert_eq!(open(&mask, LineKernel::Horizontal(5), 1), mask);
        let twice = open(&mask, LineKernel::Horizontal(5), 3);
        assert!(twice.data().iter().all(|&v| v == 0));
    }

    #[test]
    fn vertical_kernel_works_on_columns() {
        let mask = mask_from_rows(&["#.", "#.", "##", "#.", "#."]);
        let opened = open(&mask, LineKernel::Vertical(3), 1);
        let expected = mask_from_rows(&["#.", "#.", "#.", "#.", "#."]);
        assert_eq!(opened, expected);
    }

    #[test]
    fn border_lines_survive_opening() {
        let mask = mask_from_rows(&["######", "......"]);
        assert_eq!(open(&mask, LineKernel::Horizontal(40), 3), mask);
    }

    #[test]
    fn binarize_marks_dark_pixels_as_ink() {
        let img = GrayImageU8::new(3, 1, vec![10, 128, 250]);
        let mask = binarize_inverted(img.as_view(), 128);
        assert_eq!(mask.data(), &[INK, INK, 0]);
    }
}
