#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod diagnostics;
pub mod error;
pub mod image;
pub mod pipeline;
pub mod types;

// Stage modules, usable on their own.
pub mod calibration;
pub mod classify;
pub mod config;
pub mod grid;
pub mod labels;
pub mod trace;

// --- High-level re-exports -------------------------------------------------

// Main entry points: digitizer + results.
pub use crate::calibration::{CorrespondenceSet, LocationFrame};
pub use crate::error::TraceError;
pub use crate::pipeline::{Digitizer, PipelineParams};
pub use crate::types::{DataPoint, Point, Trajectory};

// Per-run diagnostics returned by the digitizer.
pub use crate::diagnostics::{DigitizeReport, DigitizeTrace};

// Label detection capability.
pub use crate::labels::{AxisLabelDetector, AxisReference, JsonLabelDetector, StaticLabels};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use figure_trace::prelude::*;
///
/// # fn main() -> Result<(), TraceError> {
/// let (w, h) = (200usize, 150usize);
/// let gray = vec![255u8; w * h];
/// let img = ImageU8 { w, h, stride: w, data: &gray };
///
/// let refs = CorrespondenceSet::parse(&["0,0", "10,0", "0,5"], &["20,20", "180,20", "20,130"])?;
/// let trajectory = Digitizer::new(PipelineParams::default()).run(img, &refs)?;
/// for p in &trajectory {
///     println!("{} {}", p.x, p.y);
/// }
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::{GrayImageU8, ImageU8};
    pub use crate::{CorrespondenceSet, Digitizer, PipelineParams, Trajectory, TraceError};
}

// --- Stage-level API (for tools & advanced users) --------------------------

pub mod stages {
    pub use crate::calibration::{calibrate, resolve_origin, split_axes, AffineTransform};
    pub use crate::classify::{classify, ClassifierParams, ColorStats};
    pub use crate::grid::{suppress, suppress_with_stats, GridParams, GridStats};
    pub use crate::pipeline::erase_axes;
    pub use crate::trace::{collect_columns, trace, TraceParams};
}
