//! Error taxonomy shared by every pipeline stage.
//!
//! All failures are fatal for the run that produced them: the pipeline is a
//! deterministic single pass, so nothing is retried and nothing degrades to a
//! partial result.

use std::fmt;

/// Which data axis a calibration failure refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => f.write_str("x"),
            Axis::Y => f.write_str("y"),
        }
    }
}

/// Reasons why a digitisation run may abort.
#[derive(Clone, Debug, PartialEq)]
pub enum TraceError {
    /// Fewer correspondences than an affine calibration needs.
    TooFewCorrespondences { needed: usize, got: usize },
    /// Data values and pixel locations have different lengths.
    MismatchedCorrespondences { data: usize, pixels: usize },
    /// Fewer than two pixel locations lie on a common horizontal line.
    TooFewHorizontalPoints { found: usize },
    /// Every pixel location was claimed by the horizontal axis.
    NoVerticalPoints,
    /// The data values along one axis do not constrain a linear map.
    DegenerateAxis { axis: Axis },
    /// The lowest x-axis and y-axis labels sit on the same row.
    ParallelLabelLines,
    /// The dominant intensity is darker than the supported minimum.
    DarkBackground { intensity: u8, minimum: u8 },
    /// The image carries no usable contrast.
    FlatImage { min: u8, mean: f64, max: u8 },
    /// The image has no pixels at all.
    EmptyImage,
    /// The classifier found no color darker than the background.
    NoTrajectoryColor { background: u8 },
    /// No pixel fell inside the acceptance band.
    EmptyTrajectory { low: u8, high: u8 },
    /// Trajectory color outside the intensity range of the image.
    ColorOutOfRange { color: u8, min: u8, max: u8 },
    /// A coordinate string or sequence could not be parsed.
    InvalidPoint(String),
    Io(String),
    Config(String),
    LabelSource(String),
}

impl fmt::Display for TraceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceError::TooFewCorrespondences { needed, got } => {
                write!(f, "too few correspondences: need {needed}, got {got}")
            }
            TraceError::MismatchedCorrespondences { data, pixels } => write!(
                f,
                "correspondence lengths differ: {data} data points vs {pixels} pixel locations"
            ),
            TraceError::TooFewHorizontalPoints { found } => write!(
                f,
                "must have at least two colinear (horizontal) points, found {found}"
            ),
            TraceError::NoVerticalPoints => {
                f.write_str("must have at least one point off the horizontal axis")
            }
            TraceError::DegenerateAxis { axis } => write!(
                f,
                "degenerate {axis} axis: reference values do not determine a linear map"
            ),
            TraceError::ParallelLabelLines => {
                f.write_str("axis label lines are parallel; cannot project an origin")
            }
            TraceError::DarkBackground { intensity, minimum } => write!(
                f,
                "background intensity {intensity} is dark (< {minimum}); only light backgrounds are supported"
            ),
            TraceError::FlatImage { min, mean, max } => write!(
                f,
                "no meaningful data in image (min={min} mean={mean:.3} max={max})"
            ),
            TraceError::EmptyImage => f.write_str("image has zero pixels"),
            TraceError::NoTrajectoryColor { background } => write!(
                f,
                "no candidate trajectory color darker than background {background}"
            ),
            TraceError::EmptyTrajectory { low, high } => write!(
                f,
                "empty trajectory: no pixel with intensity in [{low}, {high}]"
            ),
            TraceError::ColorOutOfRange { color, min, max } => {
                write!(f, "{color} is outside the range: [{min}, {max}]")
            }
            TraceError::InvalidPoint(msg) => write!(f, "invalid point: {msg}"),
            TraceError::Io(msg) => f.write_str(msg),
            TraceError::Config(msg) => write!(f, "configuration error: {msg}"),
            TraceError::LabelSource(msg) => write!(f, "axis label source: {msg}"),
        }
    }
}

impl std::error::Error for TraceError {}
