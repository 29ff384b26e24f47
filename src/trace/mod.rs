//! Trajectory tracing by color band matching.
//!
//! Every pixel whose intensity falls within a narrow band around the
//! trajectory color is a candidate. Candidates are grouped by column, each
//! column is reduced to one row with a two-pass median, and the resulting
//! `(column, row)` pairs are mapped through the calibration into data space.

mod median;

use crate::calibration::AffineTransform;
use crate::error::TraceError;
use crate::image::ImageU8;
use crate::types::{DataPoint, Trajectory};
use log::{debug, info};
use median::column_row;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Acceptance band around the trajectory color.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceParams {
    /// Intensities down to `color - band_below` are accepted.
    pub band_below: u8,
    /// Intensities up to `color + band_above` are accepted.
    pub band_above: u8,
}

impl Default for TraceParams {
    fn default() -> Self {
        Self {
            band_below: 3,
            band_above: 2,
        }
    }
}

impl TraceParams {
    /// Inclusive `[low, high]` intensity band, clamped to `[0, 255]`.
    pub fn band(&self, color: u8) -> (u8, u8) {
        (
            color.saturating_sub(self.band_below),
            color.saturating_add(self.band_above),
        )
    }
}

/// Candidate rows per populated column, in column order.
pub fn collect_columns(img: &ImageU8, low: u8, high: u8) -> BTreeMap<usize, Vec<usize>> {
    let mut columns: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for y in 0..img.h {
        for (x, &v) in img.row(y).iter().enumerate() {
            if (low..=high).contains(&v) {
                columns.entry(x).or_default().push(y);
            }
        }
    }
    columns
}

/// Trace the curve drawn in `color` and map it into data coordinates.
pub fn trace(
    img: ImageU8,
    color: u8,
    transform: &AffineTransform,
    params: &TraceParams,
) -> Result<Trajectory, TraceError> {
    let (min, max) = img.min_max().ok_or(TraceError::EmptyImage)?;
    if color < min || color > max {
        return Err(TraceError::ColorOutOfRange { color, min, max });
    }
    info!("Extracting trajectory for color {color}");

    let (low, high) = params.band(color);
    let columns = collect_columns(&img, low, high);
    if columns.is_empty() {
        return Err(TraceError::EmptyTrajectory { low, high });
    }

    let points: Vec<DataPoint> = columns
        .iter()
        .filter_map(|(&x, rows)| {
            column_row(rows).map(|row| transform.image_to_data(x as f64, row, img.h))
        })
        .collect();
    debug!(
        "trace: band=[{low}, {high}] columns={} points={}",
        columns.len(),
        points.len()
    );
    Ok(Trajectory::from_points(points))
}

#[cfg(test)]
mod tests;
