use figure_trace::calibration::CorrespondenceSet;
use figure_trace::image::io::load_grayscale_image;
use figure_trace::labels::{references_from_text_boxes, JsonLabelDetector};
use serde::Serialize;
use std::env;
use std::path::Path;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let mut args = env::args().skip(1);
    let labels_path = args.next().ok_or_else(usage)?;
    let image_path = args.next().ok_or_else(usage)?;
    let tolerance: u32 = match args.next() {
        Some(v) => v
            .parse()
            .map_err(|e| format!("Invalid pixel tolerance {v}: {e}"))?,
        None => 1,
    };

    let gray = load_grayscale_image(Path::new(&image_path)).map_err(|e| e.to_string())?;
    let detector = JsonLabelDetector::new(&labels_path, tolerance);
    let boxes = detector.load_text_boxes().map_err(|e| e.to_string())?;
    let references =
        references_from_text_boxes(&boxes, f64::from(tolerance)).map_err(|e| e.to_string())?;
    let plot = CorrespondenceSet::from_references(&references, gray.height())
        .map_err(|e| e.to_string())?;
    // the row flip is its own inverse; `figure-trace` reads image rows by default
    let set = plot.to_plot_frame(gray.height());

    let summary = LabelSummary {
        text_boxes: boxes.len(),
        image_height: gray.height(),
        data_points: set.data().iter().map(|p| format!("{},{}", p.x, p.y)).collect(),
        locations: set.pixels().iter().map(|p| format!("{},{}", p.x, p.y)).collect(),
    };
    let json = serde_json::to_string_pretty(&summary).map_err(|e| e.to_string())?;
    println!("{json}");
    Ok(())
}

fn usage() -> String {
    "Usage: trace_labels <labels.json> <image> [pixel_tolerance]".to_string()
}

/// Correspondences in image coordinates, ready for `figure-trace -p/-l`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LabelSummary {
    text_boxes: usize,
    image_height: usize,
    data_points: Vec<String>,
    locations: Vec<String>,
}
