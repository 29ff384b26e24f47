//! Per-axis least-squares calibration between data values and pixels.

use super::CorrespondenceSet;
use crate::error::{Axis, TraceError};
use crate::types::DataPoint;
use log::{debug, warn};
use nalgebra::{Matrix2, Vector2};
use serde::Serialize;

const EPS: f64 = 1e-12;

/// 1-D linear model `pixel = scale * data + offset`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct AxisFit {
    pub scale: f64,
    pub offset: f64,
}

impl AxisFit {
    #[inline]
    pub fn to_pixel(&self, data: f64) -> f64 {
        self.scale * data + self.offset
    }

    #[inline]
    pub fn to_data(&self, pixel: f64) -> f64 {
        (pixel - self.offset) / self.scale
    }
}

/// Independent linear models for both axes, in the plot frame (y up).
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct AffineTransform {
    pub x: AxisFit,
    pub y: AxisFit,
}

impl AffineTransform {
    /// Map a plot-frame pixel location to data coordinates.
    pub fn to_data(&self, px: f64, py: f64) -> DataPoint {
        DataPoint::new(self.x.to_data(px), self.y.to_data(py))
    }

    /// Map a data point to its plot-frame pixel location.
    pub fn to_pixel(&self, p: DataPoint) -> [f64; 2] {
        [self.x.to_pixel(p.x), self.y.to_pixel(p.y)]
    }

    /// Map an image column/row (row 0 at the top) of an image `height` rows
    /// tall to data coordinates.
    pub fn image_to_data(&self, column: f64, row: f64, height: usize) -> DataPoint {
        self.to_data(column, height as f64 - row)
    }
}

/// Ordinary least-squares fit of `pixel = scale * data + offset`.
fn fit_axis(data: &[f64], pixels: &[f64], axis: Axis) -> Result<AxisFit, TraceError> {
    let n = data.len() as f64;
    let mean = data.iter().sum::<f64>() / n;
    let spread = data.iter().map(|d| (d - mean).abs()).fold(0.0, f64::max);
    if spread <= EPS {
        return Err(TraceError::DegenerateAxis { axis });
    }

    let mut normal = Matrix2::<f64>::zeros();
    let mut rhs = Vector2::<f64>::zeros();
    for (&d, &p) in data.iter().zip(pixels.iter()) {
        let row = Vector2::new(d, 1.0);
        normal += row * row.transpose();
        rhs += row * p;
    }
    let inv = normal
        .try_inverse()
        .ok_or(TraceError::DegenerateAxis { axis })?;
    let sol = inv * rhs;
    let fit = AxisFit {
        scale: sol[0],
        offset: sol[1],
    };
    if !fit.scale.is_finite() || fit.scale.abs() <= EPS || !fit.offset.is_finite() {
        return Err(TraceError::DegenerateAxis { axis });
    }
    Ok(fit)
}

/// Fit the pixel↔data transform for both axes from the correspondence set.
pub fn calibrate(set: &CorrespondenceSet) -> Result<AffineTransform, TraceError> {
    let (dx, dy): (Vec<f64>, Vec<f64>) = set.data().iter().map(|d| (d.x, d.y)).unzip();
    let (px, py): (Vec<f64>, Vec<f64>) = set
        .pixels()
        .iter()
        .map(|p| (p.x as f64, p.y as f64))
        .unzip();
    let transform = AffineTransform {
        x: fit_axis(&dx, &px, Axis::X)?,
        y: fit_axis(&dy, &py, Axis::Y)?,
    };
    debug!("calibrate: {:?}", transform);
    Ok(transform)
}

/// How well the fitted transform reproduces its own correspondences.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalibrationResiduals {
    /// `[dx, dy]` in pixels per correspondence (predicted minus observed).
    pub per_point: Vec<[f64; 2]>,
    pub max_abs_px: f64,
}

impl CalibrationResiduals {
    pub fn compute(transform: &AffineTransform, set: &CorrespondenceSet) -> Self {
        let per_point: Vec<[f64; 2]> = set
            .data()
            .iter()
            .zip(set.pixels().iter())
            .map(|(d, p)| {
                let [u, v] = transform.to_pixel(*d);
                [u - p.x as f64, v - p.y as f64]
            })
            .collect();
        let max_abs_px = per_point
            .iter()
            .flat_map(|r| r.iter().map(|v| v.abs()))
            .fold(0.0, f64::max);
        Self {
            per_point,
            max_abs_px,
        }
    }

    /// Indices of correspondences whose residual exceeds `tolerance_px`.
    pub fn outliers(&self, tolerance_px: f64) -> Vec<usize> {
        self.per_point
            .iter()
            .enumerate()
            .filter(|(_, r)| r[0].abs() > tolerance_px || r[1].abs() > tolerance_px)
            .map(|(i, _)| i)
            .collect()
    }

    /// Log a warning for every correspondence beyond `tolerance_px`.
    pub fn warn_outliers(&self, set: &CorrespondenceSet, tolerance_px: f64) {
        for i in self.outliers(tolerance_px) {
            let r = self.per_point[i];
            warn!(
                "reference {} -> {} deviates from the fitted axes by ({:.2}, {:.2}) px",
                set.data()[i],
                set.pixels()[i],
                r[0],
                r[1]
            );
        }
    }
}
