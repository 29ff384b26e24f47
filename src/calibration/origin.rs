//! Origin resolution from an unordered set of reference pixel locations.
//!
//! The locations carry no axis labels, so colinearity is the only structural
//! signal: any pair that is nearly horizontal belongs to the horizontal axis,
//! everything else to the vertical axis.

use crate::error::TraceError;
use crate::types::Point;
use log::debug;

/// Pairs closer than this horizontally are never tested for colinearity.
pub const MIN_HORIZONTAL_SEPARATION_PX: i32 = 2;
/// Maximum deviation from horizontal for a pair to share the x axis.
pub const HORIZONTAL_TOLERANCE_DEG: f64 = 5.0;

/// Reference locations split by the axis they lie on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AxisSplit {
    pub horizontal: Vec<Point>,
    pub vertical: Vec<Point>,
}

/// Tag every location as a horizontal-axis or vertical-axis member.
///
/// Locations are compared by value, so duplicates count once.
pub fn split_axes(locations: &[Point]) -> AxisSplit {
    let mut unique: Vec<Point> = Vec::with_capacity(locations.len());
    for p in locations {
        if !unique.contains(p) {
            unique.push(*p);
        }
    }

    let max_slope = HORIZONTAL_TOLERANCE_DEG.to_radians().tan();
    let mut is_horizontal = vec![false; unique.len()];
    for i in 0..unique.len() {
        for j in (i + 1)..unique.len() {
            let (a, b) = (unique[i], unique[j]);
            let dx = b.x - a.x;
            if dx.abs() <= MIN_HORIZONTAL_SEPARATION_PX {
                continue;
            }
            let slope = (b.y - a.y) as f64 / dx as f64;
            if slope.abs() < max_slope {
                is_horizontal[i] = true;
                is_horizontal[j] = true;
            }
        }
    }

    let (horizontal, vertical): (Vec<_>, Vec<_>) = unique
        .iter()
        .zip(is_horizontal.iter())
        .partition(|(_, &h)| h);
    AxisSplit {
        horizontal: horizontal.into_iter().map(|(p, _)| *p).collect(),
        vertical: vertical.into_iter().map(|(p, _)| *p).collect(),
    }
}

/// Compute the pixel origin of the axes.
///
/// `x` is the mean x of the vertical-axis members, `y` the mean y of the
/// horizontal-axis members, both truncated toward zero.
pub fn resolve_origin(locations: &[Point]) -> Result<Point, TraceError> {
    let split = split_axes(locations);
    if split.horizontal.len() < 2 {
        return Err(TraceError::TooFewHorizontalPoints {
            found: split.horizontal.len(),
        });
    }
    if split.vertical.is_empty() {
        return Err(TraceError::NoVerticalPoints);
    }
    let origin_x = mean(split.vertical.iter().map(|p| p.x));
    let origin_y = mean(split.horizontal.iter().map(|p| p.y));
    let origin = Point::from_f64(origin_x, origin_y);
    debug!(
        "resolve_origin: horizontal={:?} vertical={:?} -> {}",
        split.horizontal, split.vertical, origin
    );
    Ok(origin)
}

fn mean(values: impl Iterator<Item = i32>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v as f64, n + 1));
    sum / n.max(1) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(raw: &[(i32, i32)]) -> Vec<Point> {
        raw.iter().map(|&p| Point::from(p)).collect()
    }

    #[test]
    fn origin_of_wide_figure() {
        let origin = resolve_origin(&pts(&[(81, 69), (1779, 68), (81, 449)])).expect("origin");
        assert_eq!(origin, Point::new(81, 68));
    }

    #[test]
    fn origin_ignores_near_vertical_pairs() {
        let origin = resolve_origin(&pts(&[(23, 26), (140, 23), (22, 106)])).expect("origin");
        assert_eq!(origin, Point::new(22, 24));
    }

    #[test]
    fn origin_of_exactly_aligned_points() {
        let origin = resolve_origin(&pts(&[(2, 12), (897, 12), (2, 183)])).expect("origin");
        assert_eq!(origin, Point::new(2, 12));
    }

    #[test]
    fn order_does_not_matter() {
        let origin = resolve_origin(&pts(&[(2, 183), (897, 12), (2, 12)])).expect("origin");
        assert_eq!(origin, Point::new(2, 12));
    }

    #[test]
    fn more_points_on_each_axis_are_averaged() {
        let split = split_axes(&pts(&[(10, 10), (60, 11), (110, 10), (9, 60), (11, 110)]));
        assert_eq!(split.horizontal.len(), 3);
        assert_eq!(split.vertical, pts(&[(9, 60), (11, 110)]));
        let origin = resolve_origin(&pts(&[(10, 10), (60, 11), (110, 10), (9, 60), (11, 110)]))
            .expect("origin");
        assert_eq!(origin, Point::new(10, 10));
    }

    #[test]
    fn no_colinear_pair_is_degenerate() {
        let err = resolve_origin(&pts(&[(0, 0), (50, 50), (100, 100)])).unwrap_err();
        assert_eq!(err, TraceError::TooFewHorizontalPoints { found: 0 });
    }

    #[test]
    fn all_points_on_one_line_is_degenerate() {
        let err = resolve_origin(&pts(&[(0, 0), (50, 1), (100, 0)])).unwrap_err();
        assert_eq!(err, TraceError::NoVerticalPoints);
    }

    #[test]
    fn duplicates_count_once() {
        let split = split_axes(&pts(&[(0, 0), (0, 0), (40, 0), (0, 40)]));
        assert_eq!(split.horizontal, pts(&[(0, 0), (40, 0)]));
        assert_eq!(split.vertical, pts(&[(0, 40)]));
    }
}
