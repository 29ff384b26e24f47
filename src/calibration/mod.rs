//! Axis calibration from reference correspondences.
//!
//! A correspondence pairs a value printed on an axis (data space) with the
//! pixel where it appears. Pixel locations are expressed in the *plot frame*:
//! x grows to the right and y grows upward from the bottom image edge, so a
//! row index `r` of an image `h` rows tall sits at plot-frame `y = h - r`.
//! Callers usually measure locations in image coordinates (row 0 at the top),
//! the default [`LocationFrame`]; they are converted with
//! [`CorrespondenceSet::to_plot_frame`] before fitting.
//!
//! - [`calibrate`] fits `pixel = scale * data + offset` per axis by least
//!   squares; with more than the minimum three points the residuals act as a
//!   consistency check ([`CalibrationResiduals`]).
//! - [`resolve_origin`] splits the locations into horizontal-axis and
//!   vertical-axis members by colinearity and returns the pixel origin used to
//!   erase the axis margins.

mod fit;
mod origin;

pub use fit::{calibrate, AffineTransform, AxisFit, CalibrationResiduals};
pub use origin::{
    resolve_origin, split_axes, AxisSplit, HORIZONTAL_TOLERANCE_DEG, MIN_HORIZONTAL_SEPARATION_PX,
};

use crate::error::TraceError;
use crate::labels::AxisReference;
use crate::types::{DataPoint, Point};
use serde::{Deserialize, Serialize};

/// Minimum number of correspondences for an affine calibration.
pub const MIN_CORRESPONDENCES: usize = 3;

/// Coordinate convention of caller-supplied pixel locations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationFrame {
    /// y measured upward from the bottom image edge.
    Plot,
    /// Image rows, row 0 at the top.
    #[default]
    Image,
}

/// Parallel sequences of data values and their pixel locations.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrespondenceSet {
    data: Vec<DataPoint>,
    pixels: Vec<Point>,
}

impl CorrespondenceSet {
    pub fn new(data: Vec<DataPoint>, pixels: Vec<Point>) -> Result<Self, TraceError> {
        if data.len() != pixels.len() {
            return Err(TraceError::MismatchedCorrespondences {
                data: data.len(),
                pixels: pixels.len(),
            });
        }
        if data.len() < MIN_CORRESPONDENCES {
            return Err(TraceError::TooFewCorrespondences {
                needed: MIN_CORRESPONDENCES,
                got: data.len(),
            });
        }
        Ok(Self { data, pixels })
    }

    /// Parse `"x,y"` strings for both sequences.
    pub fn parse<S: AsRef<str>>(data: &[S], pixels: &[S]) -> Result<Self, TraceError> {
        let data = data
            .iter()
            .map(|s| s.as_ref().parse())
            .collect::<Result<Vec<DataPoint>, _>>()?;
        let pixels = pixels
            .iter()
            .map(|s| s.as_ref().parse())
            .collect::<Result<Vec<Point>, _>>()?;
        Self::new(data, pixels)
    }

    /// Build from the references produced by an
    /// [`AxisLabelDetector`](crate::labels::AxisLabelDetector).
    ///
    /// Only the centre and value of each reference are used. Centres are in
    /// image coordinates; the result is in the plot frame.
    pub fn from_references(refs: &[AxisReference], image_height: usize) -> Result<Self, TraceError> {
        let data = refs.iter().map(|r| r.value).collect();
        let pixels = refs
            .iter()
            .map(|r| Point::from_f64(r.center[0], r.center[1]))
            .collect();
        Ok(Self::new(data, pixels)?.to_plot_frame(image_height))
    }

    /// Reinterpret image-coordinate locations as plot-frame locations.
    pub fn to_plot_frame(&self, image_height: usize) -> Self {
        let h = image_height as i32;
        Self {
            data: self.data.clone(),
            pixels: self
                .pixels
                .iter()
                .map(|p| Point::new(p.x, h - p.y))
                .collect(),
        }
    }

    /// Convert from `frame` into the plot frame.
    pub fn in_plot_frame(&self, frame: LocationFrame, image_height: usize) -> Self {
        match frame {
            LocationFrame::Plot => self.clone(),
            LocationFrame::Image => self.to_plot_frame(image_height),
        }
    }

    pub fn data(&self) -> &[DataPoint] {
        &self.data
    }

    pub fn pixels(&self) -> &[Point] {
        &self.pixels
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
