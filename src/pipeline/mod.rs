//! End-to-end digitisation of a figure.
//!
//! The [`Digitizer`] composes the stages in a fixed order:
//!
//! 1. normalise the input, optionally closing small gaps in the ink;
//! 2. suppress grid lines and normalise again;
//! 3. classify background and trajectory colors;
//! 4. calibrate the axes, locate the origin and paint the axes and their
//!    labels out with the background color;
//! 5. normalise and trace the trajectory color.
//!
//! Typical usage:
//! ```no_run
//! use figure_trace::{CorrespondenceSet, Digitizer, PipelineParams};
//! use figure_trace::image::io::load_grayscale_image;
//! use std::path::Path;
//!
//! # fn example() -> Result<(), figure_trace::TraceError> {
//! let img = load_grayscale_image(Path::new("figure.png"))?;
//! let refs = CorrespondenceSet::parse(&["0,0", "10,0", "0,5"], &["40,170", "240,170", "40,70"])?;
//! let trajectory = Digitizer::new(PipelineParams::default()).run(img.as_view(), &refs)?;
//! println!("{} points", trajectory.len());
//! # Ok(())
//! # }
//! ```

use crate::calibration::{
    calibrate, resolve_origin, AffineTransform, CalibrationResiduals, CorrespondenceSet,
    LocationFrame,
};
use crate::classify::{classify, ClassifierParams, ColorStats};
use crate::diagnostics::{elapsed_ms, DigitizeReport, DigitizeTrace, InputDescriptor, TimingBreakdown};
use crate::error::TraceError;
use crate::grid::{suppress_with_stats, GridParams, GridStats};
use crate::image::{close, normalize, GrayImageU8, ImageU8};
use crate::labels::AxisLabelDetector;
use crate::trace::{trace, TraceParams};
use crate::types::{Point, Trajectory};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Parameters of a digitizer run.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineParams {
    /// Pixel tolerance for label geometry and the calibration residual check.
    pub pixel_tolerance: u32,
    pub classifier: ClassifierParams,
    pub grid: GridParams,
    pub trace: TraceParams,
    /// Extra columns/rows erased beyond the axis origin.
    pub axis_margin: u32,
    /// Apply a morphological closing before grid suppression.
    pub preprocess: bool,
    pub preprocess_kernel: usize,
    /// Trace this intensity instead of the first classified candidate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trajectory_color: Option<u8>,
    /// Frame in which caller supplied pixel locations are expressed.
    pub location_frame: LocationFrame,
}

impl Default for PipelineParams {
    fn default() -> Self {
        Self {
            pixel_tolerance: 1,
            classifier: ClassifierParams::default(),
            grid: GridParams::default(),
            trace: TraceParams::default(),
            axis_margin: 3,
            preprocess: false,
            preprocess_kernel: 3,
            trajectory_color: None,
            location_frame: LocationFrame::Image,
        }
    }
}

/// Paint every column left of the y axis and every row below the x axis
/// (plus `margin`) with `background`. `origin` is in the plot frame.
pub fn erase_axes(img: &mut GrayImageU8, origin: Point, margin: u32, background: u8) {
    let (w, h) = (img.width() as i64, img.height() as i64);
    let margin = i64::from(margin);
    let first_kept_col = (i64::from(origin.x) + margin).clamp(0, w) as usize;
    let first_erased_row = (h - i64::from(origin.y) - margin).clamp(0, h) as usize;
    for y in 0..img.height() {
        let row = img.row_mut(y);
        if y >= first_erased_row {
            row.fill(background);
        } else {
            row[..first_kept_col].fill(background);
        }
    }
    debug!(
        "erase_axes: origin={} margin={} cols<{} rows>={}",
        origin, margin, first_kept_col, first_erased_row
    );
}

fn require_contrast(img: ImageU8) -> Result<(), TraceError> {
    let (min, max) = img.min_max().ok_or(TraceError::EmptyImage)?;
    let mean = img.mean();
    if (min as f64) < mean && mean < (max as f64) {
        Ok(())
    } else {
        Err(TraceError::FlatImage { min, mean, max })
    }
}

/// Composes the pipeline stages with one parameter set.
#[derive(Clone, Debug, Default)]
pub struct Digitizer {
    params: PipelineParams,
}

impl Digitizer {
    pub fn new(params: PipelineParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &PipelineParams {
        &self.params
    }

    /// Extract the trajectory. `refs` pixel locations are read in the
    /// configured [`LocationFrame`], image rows unless set to `Plot`.
    pub fn run(&self, img: ImageU8, refs: &CorrespondenceSet) -> Result<Trajectory, TraceError> {
        Ok(self.run_with_diagnostics(img, refs)?.trajectory)
    }

    /// As [`run`](Self::run), also describing what every stage decided.
    pub fn run_with_diagnostics(
        &self,
        img: ImageU8,
        refs: &CorrespondenceSet,
    ) -> Result<DigitizeReport, TraceError> {
        let refs = refs.in_plot_frame(self.params.location_frame, img.h);
        self.execute(img, &refs)
    }

    /// Obtain the references from `detector` instead of the caller.
    pub fn run_with_detector<D: AxisLabelDetector + ?Sized>(
        &self,
        img: ImageU8,
        detector: &D,
    ) -> Result<DigitizeReport, TraceError> {
        let labels = detector.detect(img)?;
        let refs = CorrespondenceSet::from_references(&labels, img.h)?;
        info!("Detected {} axis references", refs.len());
        self.execute(img, &refs)
    }

    /// Steps 1 and 2 only: the normalised, grid-free image.
    pub fn clean(&self, img: ImageU8) -> Result<GrayImageU8, TraceError> {
        Ok(self.clean_with_stats(img)?.0)
    }

    fn clean_with_stats(&self, img: ImageU8) -> Result<(GrayImageU8, GridStats), TraceError> {
        if img.is_empty() {
            return Err(TraceError::EmptyImage);
        }
        let mut work = normalize(img);
        if self.params.preprocess {
            work = close(work.as_view(), self.params.preprocess_kernel);
        }
        let (suppressed, stats) = suppress_with_stats(work.as_view(), &self.params.grid);
        let cleaned = normalize(suppressed.as_view());
        require_contrast(cleaned.as_view())?;
        Ok((cleaned, stats))
    }

    fn calibrate(
        &self,
        refs: &CorrespondenceSet,
    ) -> Result<(AffineTransform, CalibrationResiduals, Point), TraceError> {
        let transform = calibrate(refs)?;
        let residuals = CalibrationResiduals::compute(&transform, refs);
        residuals.warn_outliers(refs, f64::from(self.params.pixel_tolerance));
        let origin = resolve_origin(refs.pixels())?;
        Ok((transform, residuals, origin))
    }

    fn pick_color(&self, colors: &ColorStats) -> Result<u8, TraceError> {
        self.params
            .trajectory_color
            .or_else(|| colors.primary())
            .ok_or(TraceError::NoTrajectoryColor {
                background: colors.background,
            })
    }

    /// `refs` are already in the plot frame.
    fn execute(&self, img: ImageU8, refs: &CorrespondenceSet) -> Result<DigitizeReport, TraceError> {
        let total_start = Instant::now();
        let mut timings = TimingBreakdown::default();

        let start = Instant::now();
        let (cleaned, grid) = self.clean_with_stats(img)?;
        timings.push("clean", elapsed_ms(start));

        let start = Instant::now();
        let colors = classify(cleaned.as_view(), &self.params.classifier)?;
        timings.push("classify", elapsed_ms(start));
        info!(
            "Background {} with candidates {:?}",
            colors.background, colors.candidates
        );

        let start = Instant::now();
        let (transform, residuals, origin) = self.calibrate(refs)?;
        let mut erased = cleaned;
        erase_axes(&mut erased, origin, self.params.axis_margin, colors.background);
        if erased.as_view().std_dev() == 0.0 {
            let view = erased.as_view();
            let (min, max) = view.min_max().ok_or(TraceError::EmptyImage)?;
            return Err(TraceError::FlatImage {
                min,
                mean: view.mean(),
                max,
            });
        }
        timings.push("calibrate", elapsed_ms(start));

        let start = Instant::now();
        let color = self.pick_color(&colors)?;
        let normalized = normalize(erased.as_view());
        let trajectory = trace(normalized.as_view(), color, &transform, &self.params.trace)?;
        timings.push("trace", elapsed_ms(start));
        timings.total_ms = elapsed_ms(total_start);

        let trace = DigitizeTrace {
            input: InputDescriptor {
                width: img.w,
                height: img.h,
            },
            preprocessed: self.params.preprocess,
            grid,
            colors,
            transform,
            residuals,
            origin,
            trajectory_color: color,
            color_overridden: self.params.trajectory_color.is_some(),
            columns_traced: trajectory.len(),
            timings,
        };
        info!("{}", trace.summary());
        Ok(DigitizeReport { trajectory, trace })
    }
}
