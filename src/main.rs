use clap::Parser;
use figure_trace::calibration::{CorrespondenceSet, LocationFrame};
use figure_trace::config::{load_config, RuntimeConfig};
use figure_trace::image::io::{load_grayscale_image, save_grayscale_u8, write_json_file, write_trajectory};
use figure_trace::{Digitizer, JsonLabelDetector, TraceError};
use log::info;
use std::path::{Path, PathBuf};

/// Recover the data points behind a plotted curve.
#[derive(Parser, Debug)]
#[command(name = "figure-trace")]
#[command(about = "Convert a figure image into (x, y) data points", long_about = None)]
struct Args {
    /// Figure image (any format the image crate decodes)
    input: Option<PathBuf>,

    /// Reference data value as `x,y`; repeat for every reference
    #[arg(short = 'p', long = "point", allow_hyphen_values = true)]
    points: Vec<String>,

    /// Pixel location `x,y` of the matching reference value
    #[arg(short = 'l', long = "location", allow_hyphen_values = true)]
    locations: Vec<String>,

    /// OCR text boxes (JSON) to derive references from
    #[arg(long)]
    labels: Option<PathBuf>,

    /// Pixel tolerance for label geometry and calibration checks
    #[arg(long)]
    pixel_tolerance: Option<u32>,

    /// Close small gaps in the curve before grid suppression
    #[arg(long)]
    preprocess: bool,

    /// Trace this intensity instead of the detected one
    #[arg(long)]
    color: Option<u8>,

    /// Locations are already in the plot frame (y up from the bottom edge)
    #[arg(long)]
    plot_frame: bool,

    /// JSON runtime configuration; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Trajectory output, one `x y` pair per line
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write the run report as JSON
    #[arg(long)]
    report: Option<PathBuf>,

    /// Save the cleaned image and the report here
    #[arg(long)]
    debug_dir: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(err) = run(Args::parse()) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), TraceError> {
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => RuntimeConfig::default(),
    };

    let input = args
        .input
        .clone()
        .or_else(|| config.input.clone())
        .ok_or_else(|| TraceError::Config("no input image given".to_string()))?;

    let mut params = config.params.clone();
    if let Some(tolerance) = args.pixel_tolerance {
        params.pixel_tolerance = tolerance;
    }
    if args.preprocess {
        params.preprocess = true;
    }
    if args.color.is_some() {
        params.trajectory_color = args.color;
    }
    if args.plot_frame {
        params.location_frame = LocationFrame::Plot;
    }
    let pixel_tolerance = params.pixel_tolerance;

    let refs = if args.points.is_empty() && args.locations.is_empty() {
        config.correspondences()?
    } else {
        Some(CorrespondenceSet::parse(&args.points, &args.locations)?)
    };
    let labels = args.labels.clone().or_else(|| config.labels.clone());

    let gray = load_grayscale_image(&input)?;
    info!("Loaded {} ({}x{})", input.display(), gray.width(), gray.height());
    let digitizer = Digitizer::new(params);

    let report = match (refs, labels) {
        (Some(refs), _) => digitizer.run_with_diagnostics(gray.as_view(), &refs)?,
        (None, Some(path)) => {
            let detector = JsonLabelDetector::new(path, pixel_tolerance);
            info!("Reading axis labels from {}", detector.path().display());
            digitizer.run_with_detector(gray.as_view(), &detector)?
        }
        (None, None) => {
            return Err(TraceError::Config(
                "give reference points with -p/-l or a labels file".to_string(),
            ))
        }
    };

    let output = args
        .output
        .clone()
        .or_else(|| config.output.trajectory.clone())
        .unwrap_or_else(|| default_output(&input));
    write_trajectory(&output, &report.trajectory)?;
    println!(
        "Saved {} points to {}",
        report.trajectory.len(),
        output.display()
    );

    if let Some(path) = args.report.as_ref().or(config.output.report.as_ref()) {
        write_json_file(path, &report)?;
        println!("Saved report to {}", path.display());
    }

    if let Some(dir) = args.debug_dir.as_ref().or(config.output.debug_dir.as_ref()) {
        let cleaned = digitizer.clean(gray.as_view())?;
        save_grayscale_u8(&cleaned, &dir.join("cleaned.png"))?;
        write_json_file(&dir.join("report.json"), &report)?;
        println!("Saved debug output to {}", dir.display());
    }

    Ok(())
}

/// `<input file name>.traj.csv` next to the input.
fn default_output(input: &Path) -> PathBuf {
    let mut name = input.as_os_str().to_owned();
    name.push(".traj.csv");
    PathBuf::from(name)
}
