//! Grid-line suppression.
//!
//! Long straight horizontal and vertical structures (grid lines, frame
//! borders) are isolated with a morphological opening and painted over in the
//! background color:
//! 1. Otsu-binarise the image, inverted so ink is foreground.
//! 2. Open the mask with a wide, 1-pixel-tall line element, several times.
//!    Only straight runs longer than the element survive; a curve bends away
//!    within a few pixels and is removed from the mask.
//! 3. Trace the outer contours of what remains and redraw them on a copy of
//!    the image with a short stroke in the background color.
//! 4. Repeat with a tall, 1-pixel-wide element for vertical lines.
//!
//! The source image is never modified. An image without qualifying lines is
//! returned unchanged.

mod morphology;

use crate::image::{GrayImageU8, ImageU8};
use image::Luma;
use imageproc::contours::{find_contours, BorderType};
use imageproc::contrast::otsu_level;
use imageproc::drawing::draw_filled_circle_mut;
use log::debug;
use morphology::{binarize_inverted, open, LineKernel};
use serde::{Deserialize, Serialize};

/// Knobs for [`suppress`].
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct GridParams {
    /// Skip suppression entirely when false.
    pub enabled: bool,
    /// Length of the line structuring element in pixels.
    pub kernel_len: usize,
    /// Number of erosions (then dilations) in each opening.
    pub iterations: usize,
    /// Stroke width used when erasing a contour.
    pub stroke: u32,
    /// Intensity painted over detected lines.
    pub background: u8,
}

impl Default for GridParams {
    fn default() -> Self {
        Self {
            enabled: true,
            kernel_len: 40,
            iterations: 3,
            stroke: 2,
            background: 255,
        }
    }
}

/// Number of line contours erased per orientation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridStats {
    pub horizontal: usize,
    pub vertical: usize,
}

/// Remove horizontal and vertical grid lines, returning a new image.
pub fn suppress(img: ImageU8, params: &GridParams) -> GrayImageU8 {
    suppress_with_stats(img, params).0
}

/// As [`suppress`], also reporting how many line contours were erased.
pub fn suppress_with_stats(img: ImageU8, params: &GridParams) -> (GrayImageU8, GridStats) {
    let mut stats = GridStats::default();
    let flat = match img.min_max() {
        Some((lo, hi)) => lo == hi,
        None => true,
    };
    if !params.enabled || flat {
        return (img.to_owned(), stats);
    }

    let source = img.to_owned();
    let level = otsu_level(&source.to_luma());
    let mask = binarize_inverted(img, level);
    let mut canvas = source.to_luma();

    stats.horizontal = erase_lines(
        &mask,
        LineKernel::Horizontal(params.kernel_len),
        params,
        &mut canvas,
    );
    stats.vertical = erase_lines(
        &mask,
        LineKernel::Vertical(params.kernel_len),
        params,
        &mut canvas,
    );
    debug!(
        "grid suppression: otsu_level={} horizontal={} vertical={}",
        level, stats.horizontal, stats.vertical
    );
    (GrayImageU8::from(canvas), stats)
}

fn erase_lines(
    mask: &GrayImageU8,
    kernel: LineKernel,
    params: &GridParams,
    canvas: &mut image::GrayImage,
) -> usize {
    let lines = open(mask, kernel, params.iterations);
    if lines.data().iter().all(|&v| v == 0) {
        return 0;
    }
    let radius = (params.stroke / 2) as i32;
    let color = Luma([params.background]);
    let mut erased = 0;
    for contour in find_contours::<i32>(&padded(&lines)) {
        if contour.border_type != BorderType::Outer {
            continue;
        }
        for p in &contour.points {
            let (x, y) = (p.x - 1, p.y - 1);
            if radius == 0 {
                if x >= 0 && y >= 0 && (x as u32) < canvas.width() && (y as u32) < canvas.height() {
                    canvas.put_pixel(x as u32, y as u32, color);
                }
            } else {
                draw_filled_circle_mut(canvas, (x, y), radius, color);
            }
        }
        erased += 1;
    }
    erased
}

/// Copy of `mask` inside a one-pixel empty frame so that lines touching the
/// image border still get a closed outer contour.
fn padded(mask: &GrayImageU8) -> image::GrayImage {
    let (w, h) = (mask.width() as u32, mask.height() as u32);
    let mut out = image::GrayImage::new(w + 2, h + 2);
    for y in 0..h {
        for x in 0..w {
            let v = mask.get(x as usize, y as usize);
            if v != 0 {
                out.put_pixel(x + 1, y + 1, Luma([v]));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests;
