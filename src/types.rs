//! Value types shared by the calibration and tracing stages.
//!
//! Pixel space and data space are kept apart at the type level: [`Point`] is
//! an integer pixel location, [`DataPoint`] a value in the plot's own
//! coordinate system.

use crate::error::TraceError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Integer pixel location.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Build from floating coordinates, truncating toward zero.
    pub fn from_f64(x: f64, y: f64) -> Self {
        Self::new(x as i32, y as i32)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl FromStr for Point {
    type Err = TraceError;

    /// Parses `"x,y"`; fractional parts are truncated.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let [x, y] = parse_pair(s)?;
        Ok(Self::from_f64(x, y))
    }
}

impl TryFrom<&[f64]> for Point {
    type Error = TraceError;

    fn try_from(coords: &[f64]) -> Result<Self, Self::Error> {
        let [x, y] = pair_from_slice(coords)?;
        Ok(Self::from_f64(x, y))
    }
}

impl From<[i32; 2]> for Point {
    fn from(p: [i32; 2]) -> Self {
        Self::new(p[0], p[1])
    }
}

impl From<(i32, i32)> for Point {
    fn from(p: (i32, i32)) -> Self {
        Self::new(p.0, p.1)
    }
}

impl IntoIterator for Point {
    type Item = i32;
    type IntoIter = std::array::IntoIter<i32, 2>;

    fn into_iter(self) -> Self::IntoIter {
        [self.x, self.y].into_iter()
    }
}

/// Location in the plot's native data coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
}

impl DataPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for DataPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl FromStr for DataPoint {
    type Err = TraceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let [x, y] = parse_pair(s)?;
        Ok(Self::new(x, y))
    }
}

impl TryFrom<&[f64]> for DataPoint {
    type Error = TraceError;

    fn try_from(coords: &[f64]) -> Result<Self, Self::Error> {
        let [x, y] = pair_from_slice(coords)?;
        Ok(Self::new(x, y))
    }
}

impl From<(f64, f64)> for DataPoint {
    fn from(p: (f64, f64)) -> Self {
        Self::new(p.0, p.1)
    }
}

impl IntoIterator for DataPoint {
    type Item = f64;
    type IntoIter = std::array::IntoIter<f64, 2>;

    fn into_iter(self) -> Self::IntoIter {
        [self.x, self.y].into_iter()
    }
}

fn parse_pair(s: &str) -> Result<[f64; 2], TraceError> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 2 {
        return Err(TraceError::InvalidPoint(format!(
            "expected 'x,y', got '{s}'"
        )));
    }
    let parse = |p: &str| {
        p.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| TraceError::InvalidPoint(format!("'{p}' is not a number in '{s}'")))
    };
    Ok([parse(parts[0])?, parse(parts[1])?])
}

fn pair_from_slice(coords: &[f64]) -> Result<[f64; 2], TraceError> {
    match coords {
        [x, y] if x.is_finite() && y.is_finite() => Ok([*x, *y]),
        _ => Err(TraceError::InvalidPoint(format!(
            "expected two finite coordinates, got {coords:?}"
        ))),
    }
}

/// Recovered curve: data points sorted ascending by x, one per traced column.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Trajectory {
    points: Vec<DataPoint>,
}

impl Trajectory {
    /// Sorts `points` by x (ties by y) and freezes them.
    pub fn from_points(mut points: Vec<DataPoint>) -> Self {
        points.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
        Self { points }
    }

    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DataPoint> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a DataPoint;
    type IntoIter = std::slice::Iter<'a, DataPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn point_parses_and_truncates() {
        let p: Point = "50, 60.9".parse().expect("point");
        assert_eq!(p, Point::new(50, 60));
        let q = Point::try_from(&[3.7, -2.2][..]).expect("slice");
        assert_eq!(q, Point::new(3, -2));
        assert_eq!(q.into_iter().collect::<Vec<_>>(), vec![3, -2]);
    }

    #[test]
    fn point_rejects_malformed_input() {
        assert!(matches!(
            "1,2,3".parse::<Point>(),
            Err(TraceError::InvalidPoint(_))
        ));
        assert!("a,2".parse::<Point>().is_err());
        assert!(Point::try_from(&[1.0][..]).is_err());
    }

    #[test]
    fn point_hashes_by_value() {
        let set: HashSet<Point> = [Point::new(1, 2), Point::new(1, 2), Point::new(2, 1)]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 2);
        assert_eq!(Point::new(81, 68).to_string(), "(81, 68)");
    }

    #[test]
    fn data_point_keeps_fraction() {
        let d: DataPoint = "0.25,-1.5".parse().expect("data point");
        assert_eq!(d, DataPoint::new(0.25, -1.5));
    }

    #[test]
    fn trajectory_sorts_by_x() {
        let traj = Trajectory::from_points(vec![
            DataPoint::new(2.0, 0.0),
            DataPoint::new(-1.0, 5.0),
            DataPoint::new(0.5, 1.0),
        ]);
        let xs: Vec<f64> = traj.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![-1.0, 0.5, 2.0]);
    }
}
