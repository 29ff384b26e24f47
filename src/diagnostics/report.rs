use super::TimingBreakdown;
use crate::calibration::{AffineTransform, CalibrationResiduals};
use crate::classify::ColorStats;
use crate::grid::GridStats;
use crate::types::{Point, Trajectory};
use serde::Serialize;

/// Result produced by [`Digitizer::run_with_diagnostics`](crate::Digitizer).
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DigitizeReport {
    pub trajectory: Trajectory,
    pub trace: DigitizeTrace,
}

/// What every stage of a run decided.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DigitizeTrace {
    pub input: InputDescriptor,
    pub preprocessed: bool,
    pub grid: GridStats,
    pub colors: ColorStats,
    pub transform: AffineTransform,
    pub residuals: CalibrationResiduals,
    /// Plot-frame pixel origin of the axes.
    pub origin: Point,
    pub trajectory_color: u8,
    pub color_overridden: bool,
    pub columns_traced: usize,
    pub timings: TimingBreakdown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
}

impl DigitizeTrace {
    /// One-line human readable summary.
    pub fn summary(&self) -> String {
        format!(
            "{}x{} bg={} color={}{} origin={} columns={} max_residual={:.2}px total={:.1}ms",
            self.input.width,
            self.input.height,
            self.colors.background,
            self.trajectory_color,
            if self.color_overridden { " (override)" } else { "" },
            self.origin,
            self.columns_traced,
            self.residuals.max_abs_px,
            self.timings.total_ms
        )
    }
}
