use super::*;
use crate::calibration::AxisFit;
use crate::image::GrayImageU8;

fn identity_transform() -> AffineTransform {
    AffineTransform {
        x: AxisFit {
            scale: 1.0,
            offset: 0.0,
        },
        y: AxisFit {
            scale: 1.0,
            offset: 0.0,
        },
    }
}

/// One-pixel-wide diagonal from the bottom-left towards the top-right.
fn diagonal(w: usize, h: usize) -> GrayImageU8 {
    let mut img = GrayImageU8::filled(w, h, 255);
    for x in 0..w.min(h) {
        img.set(x, h - 1 - x, 0);
    }
    img
}

#[test]
fn band_is_clamped() {
    let params = TraceParams::default();
    assert_eq!(params.band(0), (0, 2));
    assert_eq!(params.band(100), (97, 102));
    assert_eq!(params.band(254), (251, 255));
}

#[test]
fn diagonal_yields_one_point_per_column() {
    let img = diagonal(50, 60);
    let traj = trace(img.as_view(), 0, &identity_transform(), &TraceParams::default())
        .expect("trajectory");
    assert_eq!(traj.len(), 50);
    for pair in traj.points().windows(2) {
        assert!(pair[1].x > pair[0].x);
    }
    for p in traj.iter() {
        // Row h-1-x maps to plot-frame y = x + 1.
        assert!((p.y - (p.x + 1.0)).abs() < 1e-9, "{p}");
    }
}

#[test]
fn calibration_is_applied() {
    let img = diagonal(20, 20);
    let transform = AffineTransform {
        x: AxisFit {
            scale: 10.0,
            offset: 5.0,
        },
        y: AxisFit {
            scale: -2.0,
            offset: 4.0,
        },
    };
    let traj = trace(img.as_view(), 0, &transform, &TraceParams::default()).expect("trajectory");
    let first = traj.points()[0];
    assert!((first.x - (-0.5)).abs() < 1e-12);
    // Row 19 of 20 -> plot y = 1 -> (1 - 4) / -2.
    assert!((first.y - 1.5).abs() < 1e-12);
}

#[test]
fn antialiased_halo_is_absorbed_by_band() {
    let mut img = GrayImageU8::filled(10, 10, 255);
    img.set(4, 5, 40);
    img.set(4, 6, 42);
    img.set(4, 7, 37);
    img.set(4, 8, 36); // outside [37, 42]
    let traj = trace(img.as_view(), 40, &identity_transform(), &TraceParams::default())
        .expect("trajectory");
    assert_eq!(traj.len(), 1);
    // Candidates 5, 6, 7 -> median 6 -> keep 6, 7 -> 6.5 -> plot y 3.5.
    assert!((traj.points()[0].y - 3.5).abs() < 1e-12);
}

#[test]
fn color_outside_image_range_is_fatal() {
    let mut img = GrayImageU8::filled(5, 5, 200);
    img.set(0, 0, 50);
    let err = trace(img.as_view(), 10, &identity_transform(), &TraceParams::default())
        .unwrap_err();
    assert_eq!(
        err,
        TraceError::ColorOutOfRange {
            color: 10,
            min: 50,
            max: 200
        }
    );
}

#[test]
fn empty_band_is_fatal() {
    let mut img = GrayImageU8::filled(5, 5, 255);
    img.set(2, 2, 0);
    let err = trace(img.as_view(), 128, &identity_transform(), &TraceParams::default())
        .unwrap_err();
    assert_eq!(err, TraceError::EmptyTrajectory { low: 125, high: 130 });
}
