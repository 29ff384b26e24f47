use figure_trace::image::GrayImageU8;

pub const WIDTH: usize = 300;
pub const HEIGHT: usize = 200;

/// Image row of the x axis and image column of the y axis.
pub const AXIS_ROW: usize = 170;
pub const AXIS_COL: usize = 30;

/// Pixels per data unit along x and y.
pub const PX_PER_X: f64 = 25.0;
pub const PX_PER_Y: f64 = 150.0;

/// The plotted function, data space.
pub fn curve(x: f64) -> f64 {
    0.5 + 0.4 * (2.0 * std::f64::consts::PI * x / 5.0).sin()
}

pub fn column_to_x(col: usize) -> f64 {
    (col as f64 - AXIS_COL as f64) / PX_PER_X
}

/// A plotted figure: white paper, light grey grid, black axes, and a two
/// pixel thick curve in `ink` for columns 40..=280. The second pixel sits
/// above the sampled row so the column median lands on the sample.
pub fn plotted_figure(ink: u8) -> GrayImageU8 {
    assert!(ink < 100, "curve ink must be dark");
    let mut img = GrayImageU8::filled(WIDTH, HEIGHT, 255);

    for col in (80..=280).step_by(50) {
        for row in 20..AXIS_ROW {
            img.set(col, row, 200);
        }
    }
    for row in [50, 95, 140] {
        for col in AXIS_COL..=280 {
            img.set(col, row, 200);
        }
    }

    for col in AXIS_COL..290 {
        img.set(col, AXIS_ROW, 0);
    }
    for row in 10..=AXIS_ROW {
        img.set(AXIS_COL, row, 0);
    }

    for col in 40..=280 {
        let y = curve(column_to_x(col));
        let row = (AXIS_ROW as f64 - y * PX_PER_Y).round() as usize;
        img.set(col, row, ink);
        img.set(col, row - 1, ink);
    }
    img
}

/// Image-frame locations of data (0, 0), (10, 0) and (0, 1).
pub fn axis_references() -> (Vec<&'static str>, Vec<&'static str>) {
    (vec!["0,0", "10,0", "0,1"], vec!["30,170", "280,170", "30,20"])
}

/// OCR output for the figure: tick labels plus an axis title.
pub fn text_boxes_json() -> String {
    let rect = |cx: i32, cy: i32, text: &str| {
        format!(
            r#"{{"corners": [[{x0}, {y0}], [{x1}, {y0}], [{x1}, {y1}], [{x0}, {y1}]], "text": "{text}"}}"#,
            x0 = cx - 5,
            x1 = cx + 5,
            y0 = cy - 4,
            y1 = cy + 4,
        )
    };
    let boxes = [
        rect(15, 170, "0"),
        rect(15, 95, "0.5"),
        rect(30, 185, "0"),
        rect(80, 185, "2"),
        rect(150, 196, "time"),
    ];
    format!("[{}]", boxes.join(", "))
}
