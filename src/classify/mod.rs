//! Background and trajectory color classification.
//!
//! A coarse intensity histogram is built over `[0, max]`. Bins that hold
//! fewer pixels than a fraction of the image width are discarded: a real
//! background, axis, or curve color spans a large share of at least one
//! image dimension, while anti-aliasing halos and text do not. The most
//! populated surviving bin is the background; surviving bins markedly darker
//! than it are trajectory candidates, most prevalent first.

mod histogram;

use crate::error::TraceError;
use crate::image::ImageU8;
use histogram::IntensityHistogram;
use log::debug;
use serde::{Deserialize, Serialize};

/// Knobs for [`classify`].
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierParams {
    /// Number of histogram bins spanning `[0, max]`.
    pub bins: usize,
    /// Bins below `min_bin_fraction * width` pixels are ignored.
    pub min_bin_fraction: f64,
    /// Backgrounds darker than this are rejected.
    pub min_background: u8,
    /// Candidates must satisfy `intensity / background < darkness_ratio`.
    pub darkness_ratio: f64,
}

impl Default for ClassifierParams {
    fn default() -> Self {
        Self {
            bins: 25,
            min_bin_fraction: 0.75,
            min_background: 128,
            darkness_ratio: 0.5,
        }
    }
}

/// Background intensity plus candidate trajectory intensities.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorStats {
    pub background: u8,
    /// Most prevalent first.
    pub candidates: Vec<u8>,
}

impl ColorStats {
    /// The color traced unless the caller overrides it.
    pub fn primary(&self) -> Option<u8> {
        self.candidates.first().copied()
    }
}

/// Classify the image into background and trajectory colors.
pub fn classify(img: ImageU8, params: &ClassifierParams) -> Result<ColorStats, TraceError> {
    let (_, max) = img.min_max().ok_or(TraceError::EmptyImage)?;
    let mut hist = IntensityHistogram::from_pixels(img.pixels(), params.bins.max(1), max);
    let min_count = (img.w as f64 * params.min_bin_fraction).floor() as u64;
    hist.suppress_below(min_count);

    let ranked = hist.ranked();
    let background = ranked.first().map(|&(_, c)| c).unwrap_or(0);
    if background < params.min_background {
        return Err(TraceError::DarkBackground {
            intensity: background,
            minimum: params.min_background,
        });
    }

    let candidates: Vec<u8> = ranked
        .iter()
        .filter(|&&(count, c)| count > 0 && (c as f64 / background as f64) < params.darkness_ratio)
        .map(|&(_, c)| c)
        .collect();
    debug!(
        "classify: background={} candidates={:?} min_bin_count={}",
        background, candidates, min_count
    );
    Ok(ColorStats {
        background,
        candidates,
    })
}
