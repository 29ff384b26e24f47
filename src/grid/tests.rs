use super::*;

/// White canvas with a 1-px sine curve; consecutive samples are joined
/// vertically so the curve is 8-connected.
fn sine_image(w: usize, h: usize) -> GrayImageU8 {
    let mut img = GrayImageU8::filled(w, h, 255);
    let mut prev: Option<usize> = None;
    for x in 0..w {
        let y = (h as f64 / 2.0 + (h as f64 / 4.0) * (x as f64 / 20.0).sin()).round() as usize;
        let (lo, hi) = match prev {
            Some(p) if p < y => (p + 1, y),
            Some(p) if p > y => (y, p - 1),
            _ => (y, y),
        };
        for yy in lo..=hi {
            img.set(x, yy, 0);
        }
        prev = Some(y);
    }
    img
}

fn dark_pixels(img: &GrayImageU8) -> usize {
    img.data().iter().filter(|&&v| v < 128).count()
}

#[test]
fn curve_only_image_is_untouched() {
    let img = sine_image(200, 120);
    let once = suppress(img.as_view(), &GridParams::default());
    assert_eq!(once, img);
    let twice = suppress(once.as_view(), &GridParams::default());
    assert_eq!(dark_pixels(&twice), dark_pixels(&once));
    assert_eq!(twice, once);
}

#[test]
fn removes_horizontal_and_vertical_grid_lines() {
    let mut img = sine_image(200, 150);
    let original = img.clone();
    for x in 0..200 {
        img.set(x, 75, 0);
    }
    for y in 0..150 {
        img.set(100, y, 0);
    }

    let (clean, stats) = suppress_with_stats(img.as_view(), &GridParams::default());
    assert!(stats.horizontal >= 1, "{stats:?}");
    assert!(stats.vertical >= 1, "{stats:?}");
    assert!((0..200).all(|x| clean.get(x, 75) == 255));
    assert!((0..150).all(|y| clean.get(100, y) == 255));

    // The curve survives away from the erased lines.
    for x in (0..96).chain(105..200) {
        for y in (0..72).chain(79..150) {
            assert_eq!(clean.get(x, y), original.get(x, y), "pixel ({x}, {y})");
        }
    }
    // The input buffer is left as it was.
    assert_eq!(img.get(10, 75), 0);
}

#[test]
fn short_segments_are_not_grid_lines() {
    let mut img = GrayImageU8::filled(200, 100, 255);
    for x in 20..60 {
        img.set(x, 30, 0);
    }
    let clean = suppress(img.as_view(), &GridParams::default());
    assert_eq!(clean, img);
}

#[test]
fn flat_and_disabled_inputs_pass_through() {
    let flat = GrayImageU8::filled(50, 50, 255);
    assert_eq!(suppress(flat.as_view(), &GridParams::default()), flat);

    let mut img = GrayImageU8::filled(200, 50, 255);
    for x in 0..200 {
        img.set(x, 10, 0);
    }
    let params = GridParams {
        enabled: false,
        ..GridParams::default()
    };
    assert_eq!(suppress(img.as_view(), &params), img);
}
