use crate::calibration::CorrespondenceSet;
use crate::error::TraceError;
use crate::pipeline::PipelineParams;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Trajectory text file; defaults to the input file name plus `.traj.csv`.
    pub trajectory: Option<PathBuf>,
    pub report: Option<PathBuf>,
    pub debug_dir: Option<PathBuf>,
}

/// Settings of one `figure-trace` invocation. Command line flags take
/// precedence over every field.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub input: Option<PathBuf>,
    /// Reference data values as `"x,y"` strings.
    pub data_points: Vec<String>,
    /// Pixel locations matching `data_points`, same format.
    pub locations: Vec<String>,
    /// OCR text boxes to derive references from when no points are given.
    pub labels: Option<PathBuf>,
    pub output: OutputConfig,
    pub params: PipelineParams,
}

impl RuntimeConfig {
    /// `None` when the file names no reference points at all.
    pub fn correspondences(&self) -> Result<Option<CorrespondenceSet>, TraceError> {
        if self.data_points.is_empty() && self.locations.is_empty() {
            return Ok(None);
        }
        CorrespondenceSet::parse(&self.data_points, &self.locations).map(Some)
    }
}

pub fn parse_config(contents: &str) -> Result<RuntimeConfig, TraceError> {
    serde_json::from_str(contents).map_err(|e| TraceError::Config(e.to_string()))
}

pub fn load_config(path: &Path) -> Result<RuntimeConfig, TraceError> {
    let contents = fs::read_to_string(path).map_err(|e| {
        TraceError::Config(format!("Failed to read config {}: {e}", path.display()))
    })?;
    parse_config(&contents).map_err(|err| match err {
        TraceError::Config(msg) => {
            TraceError::Config(format!("Failed to parse config {}: {msg}", path.display()))
        }
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::LocationFrame;

    #[test]
    fn full_config_is_parsed() {
        let config = parse_config(
            r#"{
                "input": "figure.png",
                "data_points": ["0,0", "10,0", "0,5"],
                "locations": ["40,30", "240,30", "40,130"],
                "output": {"trajectory": "out/figure.txt", "debug_dir": "out/debug"},
                "params": {"pixel_tolerance": 2, "location_frame": "plot", "trajectory_color": 12}
            }"#,
        )
        .expect("config");
        assert_eq!(config.input, Some(PathBuf::from("figure.png")));
        assert_eq!(config.output.debug_dir, Some(PathBuf::from("out/debug")));
        assert_eq!(config.output.report, None);
        assert_eq!(config.params.pixel_tolerance, 2);
        assert_eq!(config.params.location_frame, LocationFrame::Plot);
        assert_eq!(config.params.trajectory_color, Some(12));
        let refs = config.correspondences().expect("refs").expect("some");
        assert_eq!(refs.len(), 3);
    }

    #[test]
    fn empty_object_uses_defaults() {
        let config = parse_config("{}").expect("config");
        assert!(config.input.is_none());
        assert!(config.correspondences().expect("refs").is_none());
        assert_eq!(config.params.axis_margin, 3);
        assert_eq!(config.params.location_frame, LocationFrame::Image);
    }

    #[test]
    fn mismatched_points_are_reported() {
        let config = parse_config(r#"{"data_points": ["0,0"], "locations": []}"#).expect("config");
        assert!(config.correspondences().is_err());
    }

    #[test]
    fn unreadable_file_is_a_config_error() {
        let err = load_config(Path::new("/nonexistent/figure-trace.json")).unwrap_err();
        assert!(matches!(err, TraceError::Config(_)));
    }

    #[test]
    fn files_and_strings_parse_alike() {
        let dir = std::env::temp_dir().join(format!("figure-trace-config-{}", std::process::id()));
        fs::create_dir_all(&dir).expect("temp dir");

        let good = dir.join("good.json");
        let text = r#"{"input": "scan.png", "params": {"axis_margin": 5}}"#;
        fs::write(&good, text).expect("write");
        let loaded = load_config(&good).expect("load");
        let parsed = parse_config(text).expect("parse");
        assert_eq!(loaded.input, parsed.input);
        assert_eq!(loaded.params.axis_margin, 5);

        let bad = dir.join("bad.json");
        fs::write(&bad, r#"{"params": {"axis_margin": "wide"}}"#).expect("write");
        let err = load_config(&bad).unwrap_err();
        let msg = match err {
            TraceError::Config(msg) => msg,
            other => panic!("expected a config error, got {other:?}"),
        };
        assert!(msg.starts_with("Failed to parse config"), "{msg}");
        assert!(msg.contains("bad.json"), "{msg}");
        assert!(!msg.contains("configuration error"), "{msg}");

        fs::remove_dir_all(&dir).ok();
    }
}
