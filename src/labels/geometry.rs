//! Turning recognised numeric axis labels into reference correspondences.
//!
//! Labels are grouped into the row of x-axis labels and the column of y-axis
//! labels. The tick positions are then projected: an x-axis label fixes a
//! pixel column, a y-axis label fixes a pixel row, and the lowest-valued
//! label of each axis together define the origin.

use super::{AxisLabel, AxisReference};
use crate::error::TraceError;
use crate::types::DataPoint;

fn bounds(corners: &[[f64; 2]; 4]) -> [f64; 4] {
    let mut b = [f64::MAX, f64::MAX, f64::MIN, f64::MIN];
    for c in corners {
        b[0] = b[0].min(c[0]);
        b[1] = b[1].min(c[1]);
        b[2] = b[2].max(c[0]);
        b[3] = b[3].max(c[1]);
    }
    b
}

/// Centre of the bounding rectangle, truncated to whole pixels.
pub fn box_center(corners: &[[f64; 2]; 4]) -> [f64; 2] {
    let [x0, y0, x1, y1] = bounds(corners);
    [((x0 + x1) / 2.0).trunc(), ((y0 + y1) / 2.0).trunc()]
}

fn same_box(a: &AxisLabel, b: &AxisLabel, tolerance: f64) -> bool {
    a.corners.iter().zip(b.corners.iter()).all(|(p, q)| {
        (p[0] - q[0]).abs() <= tolerance && (p[1] - q[1]).abs() <= tolerance
    })
}

fn overlaps(a: &AxisLabel, b: &AxisLabel) -> bool {
    let [ax0, ay0, ax1, ay1] = bounds(&a.corners);
    let [bx0, by0, bx1, by1] = bounds(&b.corners);
    ax1 >= bx0 && ax0 <= bx1 && ay1 >= by0 && ay0 <= by1
}

/// Drop repeated detections of the same box, then boxes overlapping a kept one.
pub fn dedup_labels(labels: &[AxisLabel], tolerance: f64) -> Vec<AxisLabel> {
    let mut unique: Vec<AxisLabel> = Vec::with_capacity(labels.len());
    for l in labels {
        if !unique.iter().any(|u| same_box(l, u, tolerance)) {
            unique.push(l.clone());
        }
    }
    let mut separate: Vec<AxisLabel> = Vec::with_capacity(unique.len());
    for l in unique {
        if !separate.iter().any(|s| overlaps(&l, s)) {
            separate.push(l);
        }
    }
    separate
}

/// Labels split into the x-axis row and the y-axis column.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LabelLines {
    pub x_axis: Vec<AxisLabel>,
    pub y_axis: Vec<AxisLabel>,
}

/// Walk labels in order; neighbours on a common row belong to the x axis,
/// neighbours on a common column to the y axis.
pub fn separate_lines(labels: &[AxisLabel], tolerance: f64) -> LabelLines {
    let mut lines = LabelLines::default();
    let push = |line: &mut Vec<AxisLabel>, l: &AxisLabel| {
        if !line.contains(l) {
            line.push(l.clone());
        }
    };
    for pair in labels.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        if (a.center[1] - b.center[1]).abs() <= tolerance {
            push(&mut lines.x_axis, a);
            push(&mut lines.x_axis, b);
        } else if (a.center[0] - b.center[0]).abs() <= tolerance {
            push(&mut lines.y_axis, a);
            push(&mut lines.y_axis, b);
        }
    }
    lines
}

/// Project label positions onto tick positions and pair them with values.
///
/// Returns `[origin, next x-axis tick, next y-axis tick]`.
pub fn project_references(lines: &LabelLines, tolerance: f64) -> Result<Vec<AxisReference>, TraceError> {
    let by_value = |line: &[AxisLabel]| {
        let mut sorted = line.to_vec();
        sorted.sort_by(|a, b| a.value.total_cmp(&b.value));
        sorted
    };
    let xs = by_value(&lines.x_axis);
    let ys = by_value(&lines.y_axis);
    if xs.len() < 2 || ys.len() < 2 {
        return Err(TraceError::LabelSource(format!(
            "need two labels per axis, found {} on x and {} on y",
            xs.len(),
            ys.len()
        )));
    }
    let (x0, y0) = (&xs[0], &ys[0]);
    if (x0.center[1] - y0.center[1]).abs() <= tolerance {
        return Err(TraceError::ParallelLabelLines);
    }

    let origin = AxisReference {
        corners: x0.corners,
        center: [x0.center[0], y0.center[1]],
        value: DataPoint::new(x0.value, y0.value),
    };
    let x_tick = AxisReference {
        corners: xs[1].corners,
        center: [xs[1].center[0], y0.center[1]],
        value: DataPoint::new(xs[1].value, y0.value),
    };
    let y_tick = AxisReference {
        corners: ys[1].corners,
        center: [x0.center[0], ys[1].center[1]],
        value: DataPoint::new(x0.value, ys[1].value),
    };
    Ok(vec![origin, x_tick, y_tick])
}

/// Full post-processing chain from raw labels to three references.
pub fn references_from_labels(
    labels: &[AxisLabel],
    tolerance: f64,
) -> Result<Vec<AxisReference>, TraceError> {
    let mut sorted = labels.to_vec();
    sorted.sort_by(|a, b| a.corners[0][0].total_cmp(&b.corners[0][0]));
    let unique = dedup_labels(&sorted, tolerance);
    let lines = separate_lines(&unique, tolerance);
    project_references(&lines, tolerance)
}
