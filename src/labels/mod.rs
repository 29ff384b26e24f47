//! Axis label detection.
//!
//! Recognising text in a figure is delegated to an [`AxisLabelDetector`].
//! The bundled [`JsonLabelDetector`] consumes text boxes produced by an
//! external OCR pass; [`StaticLabels`] hands out fixed references and is
//! what tests and callers with known calibration points use.
//!
//! Whatever the source, [`geometry::references_from_labels`] reduces the
//! numeric labels to three reference points: the origin, the next tick on the
//! x axis and the next tick on the y axis.

pub mod geometry;

use crate::error::TraceError;
use crate::image::ImageU8;
use crate::types::DataPoint;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub use geometry::{references_from_labels, LabelLines};

/// A recognised piece of text with its quadrilateral in image coordinates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextBox {
    pub corners: [[f64; 2]; 4],
    pub text: String,
}

/// A text box whose content parsed as a number.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AxisLabel {
    pub corners: [[f64; 2]; 4],
    pub center: [f64; 2],
    pub value: f64,
}

impl AxisLabel {
    pub fn from_corners(corners: [[f64; 2]; 4], value: f64) -> Self {
        Self {
            corners,
            center: geometry::box_center(&corners),
            value,
        }
    }

    /// `None` unless the text is a plain number.
    pub fn from_text_box(text_box: &TextBox) -> Option<Self> {
        let value: f64 = text_box.text.trim().parse().ok()?;
        value
            .is_finite()
            .then(|| Self::from_corners(text_box.corners, value))
    }
}

/// A tick position (image coordinates) paired with its data value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AxisReference {
    pub corners: [[f64; 2]; 4],
    pub center: [f64; 2],
    pub value: DataPoint,
}

/// Source of calibration references for a figure.
pub trait AxisLabelDetector {
    fn detect(&self, image: ImageU8<'_>) -> Result<Vec<AxisReference>, TraceError>;
}

/// Fixed references, independent of the image.
#[derive(Clone, Debug, Default)]
pub struct StaticLabels {
    pub references: Vec<AxisReference>,
}

impl StaticLabels {
    pub fn new(references: Vec<AxisReference>) -> Self {
        Self { references }
    }
}

impl AxisLabelDetector for StaticLabels {
    fn detect(&self, _image: ImageU8<'_>) -> Result<Vec<AxisReference>, TraceError> {
        Ok(self.references.clone())
    }
}

/// Reads OCR text boxes from a JSON array of `{ "corners": [[x, y]; 4], "text": "..." }`.
#[derive(Clone, Debug)]
pub struct JsonLabelDetector {
    path: PathBuf,
    pixel_tolerance: f64,
}

impl JsonLabelDetector {
    pub fn new(path: impl Into<PathBuf>, pixel_tolerance: u32) -> Self {
        Self {
            path: path.into(),
            pixel_tolerance: f64::from(pixel_tolerance),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load_text_boxes(&self) -> Result<Vec<TextBox>, TraceError> {
        let data = fs::read_to_string(&self.path).map_err(|e| {
            TraceError::LabelSource(format!("failed to read {}: {e}", self.path.display()))
        })?;
        parse_text_boxes(&data)
    }
}

pub fn parse_text_boxes(json: &str) -> Result<Vec<TextBox>, TraceError> {
    serde_json::from_str(json)
        .map_err(|e| TraceError::LabelSource(format!("invalid text boxes: {e}")))
}

/// Keeps the numeric boxes and reduces them to references.
pub fn references_from_text_boxes(
    boxes: &[TextBox],
    pixel_tolerance: f64,
) -> Result<Vec<AxisReference>, TraceError> {
    let labels: Vec<AxisLabel> = boxes.iter().filter_map(AxisLabel::from_text_box).collect();
    log::debug!(
        "{} of {} text boxes are numeric labels",
        labels.len(),
        boxes.len()
    );
    references_from_labels(&labels, pixel_tolerance)
}

impl AxisLabelDetector for JsonLabelDetector {
    fn detect(&self, _image: ImageU8<'_>) -> Result<Vec<AxisReference>, TraceError> {
        let boxes = self.load_text_boxes()?;
        references_from_text_boxes(&boxes, self.pixel_tolerance)
    }
}
