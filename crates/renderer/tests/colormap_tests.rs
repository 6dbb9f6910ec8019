//! Tests for color ramp construction and the ramp registry.

use std::io::Write;

use analyst_common::{AnalystError, RenderStyle};
use renderer::colormap::{
    boarding_ramp, builtin_ramps, ramp_for_style, ColorRampSet, DIFFERENCE_POINTS, MASK_POINTS,
    RAMP_SIZE, TEMPORAL_POINTS, TRANSPARENT_POINTS,
};
use renderer::{ColorRamp, ColorRampError, ControlPoint};

fn ramp(style: RenderStyle) -> &'static ColorRamp {
    ramp_for_style(style).unwrap()
}

// ============================================================================
// Interpolation tests
// ============================================================================

#[test]
fn test_two_point_ramp_stops_before_last_index() {
    let ramp = ColorRamp::interpolated(&[
        ControlPoint::new(0, 0, 0, 0, 0),
        ControlPoint::new(4, 100, 200, 40, 255),
    ])
    .unwrap();

    assert_eq!(ramp.entry(0), [0, 0, 0, 0]);
    assert_eq!(ramp.entry(1), [25, 50, 10, 63]);
    assert_eq!(ramp.entry(3), [75, 150, 30, 191]);
    // The last control point is an endpoint only.
    assert_eq!(ramp.entry(4), [0, 0, 0, 0]);
}

#[test]
fn test_falling_channel_rounds_down() {
    let ramp = ColorRamp::interpolated(&[
        ControlPoint::new(0, 0, 0, 0, 10),
        ControlPoint::new(3, 0, 0, 0, 0),
    ])
    .unwrap();

    // delta = -3.33: 10 + floor(-3.33) = 6, 10 + floor(-6.67) = 3
    assert_eq!(ramp.entry(1)[3], 6);
    assert_eq!(ramp.entry(2)[3], 3);
}

#[test]
fn test_negative_indices_wrap() {
    let ramp = ColorRamp::interpolated(&[
        ControlPoint::new(-2, 10, 10, 10, 10),
        ControlPoint::new(2, 50, 50, 50, 50),
    ])
    .unwrap();

    assert_eq!(ramp.entry(254), [10, 10, 10, 10]);
    assert_eq!(ramp.color(-1), [20, 20, 20, 20]);
    assert_eq!(ramp.entry(0), [30, 30, 30, 30]);
    assert_eq!(ramp.entry(1), [40, 40, 40, 40]);
}

#[test]
fn test_equal_indices_jump() {
    let ramp = ColorRamp::interpolated(&[
        ControlPoint::new(0, 0, 0, 0, 0),
        ControlPoint::new(2, 0, 0, 0, 0),
        ControlPoint::new(2, 200, 0, 0, 255),
        ControlPoint::new(4, 200, 0, 0, 255),
    ])
    .unwrap();

    assert_eq!(ramp.entry(1), [0, 0, 0, 0]);
    assert_eq!(ramp.entry(2), [200, 0, 0, 255]);
    assert_eq!(ramp.entry(3), [200, 0, 0, 255]);
}

#[test]
fn test_interpolation_is_deterministic() {
    let a = ColorRamp::interpolated(TEMPORAL_POINTS).unwrap();
    let b = ColorRamp::interpolated(TEMPORAL_POINTS).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.len(), RAMP_SIZE);
    assert_eq!(a.entries().len(), RAMP_SIZE);
}

// ============================================================================
// Validation tests
// ============================================================================

#[test]
fn test_rejects_single_point() {
    let err = ColorRamp::interpolated(&[ControlPoint::new(0, 1, 2, 3, 4)]).unwrap_err();
    assert_eq!(err, ColorRampError::TooFewPoints(1));
    assert!(ColorRamp::interpolated(&[]).is_err());
}

#[test]
fn test_rejects_decreasing_index() {
    let err = ColorRamp::interpolated(&[
        ControlPoint::new(0, 0, 0, 0, 0),
        ControlPoint::new(10, 0, 0, 0, 0),
        ControlPoint::new(5, 0, 0, 0, 0),
    ])
    .unwrap_err();

    assert_eq!(
        err,
        ColorRampError::NonIncreasingIndex {
            position: 2,
            previous: 10,
            index: 5,
        }
    );
}

#[test]
fn test_rejects_out_of_range_index() {
    let err = ColorRamp::interpolated(&[
        ControlPoint::new(-129, 0, 0, 0, 0),
        ControlPoint::new(0, 0, 0, 0, 0),
    ])
    .unwrap_err();
    assert_eq!(err, ColorRampError::IndexOutOfRange(-129));
}

#[test]
fn test_rejects_span_wider_than_table() {
    let err = ColorRamp::interpolated(&[
        ControlPoint::new(-128, 0, 0, 0, 0),
        ControlPoint::new(200, 0, 0, 0, 0),
    ])
    .unwrap_err();
    assert_eq!(err, ColorRampError::SpanTooWide(328));

    // Exactly one full table is fine.
    assert!(ColorRamp::interpolated(&[
        ControlPoint::new(-128, 0, 0, 0, 0),
        ControlPoint::new(128, 0, 0, 0, 0),
    ])
    .is_ok());
}

// ============================================================================
// Built-in ramp tests
// ============================================================================

#[test]
fn test_temporal_ramp_entries() {
    let ramp = ramp(RenderStyle::Temporal);

    assert_eq!(ramp.entry(0), [100, 100, 100, 0]);
    assert_eq!(ramp.entry(15), [0, 140, 0, 10]);
    assert_eq!(ramp.entry(29), [0, 140, 0, 84]);
    assert_eq!(ramp.entry(120), [100, 100, 100, 195]);
    assert_eq!(ramp.entry(121), [0, 0, 0, 0]);
    // Unreachable sentinel.
    assert_eq!(ramp.color(-128), [100, 100, 100, 200]);
    // 200 + floor(-1.5625 * 127)
    assert_eq!(ramp.entry(255), [100, 100, 100, 1]);
}

#[test]
fn test_difference_ramp_entries() {
    let ramp = ramp(RenderStyle::Difference);

    assert_eq!(ramp.entry(128), [0, 0, 0, 0]);
    assert_eq!(ramp.entry(129), [150, 0, 0, 80]);
    // 80 + floor(-5.33 * 14)
    assert_eq!(ramp.entry(255), [150, 150, 0, 5]);
    assert_eq!(ramp.entry(0), [0, 0, 0, 0]);
    assert_eq!(ramp.entry(1), [0, 0, 10, 5]);
    assert_eq!(ramp.entry(126), [50, 150, 50, 99]);
    assert_eq!(ramp.entry(127), [0, 0, 0, 0]);
}

#[test]
fn test_mask_and_transparent_ramps() {
    let mask = ramp(RenderStyle::Mask);
    assert_eq!(mask.entry(0), [0, 0, 0, 255]);
    assert_eq!(mask.entry(30), [0, 0, 0, 127]);
    assert_eq!(mask.entry(60), [0, 0, 0, 0]);
    assert_eq!(mask.color(-128), [0, 0, 0, 0]);

    let transparent = ramp(RenderStyle::Transparent);
    assert_eq!(transparent.color(-128), [0, 0, 0, 255]);
    assert_eq!(transparent.entry(30), [0, 0, 0, 127]);
    assert_eq!(transparent.entry(90), [0, 0, 0, 0]);
}

#[test]
fn test_boarding_ramp() {
    let ramp = boarding_ramp();
    assert_eq!(ramp.entry(0), [0, 255, 0, 80]);
    assert_eq!(ramp.entry(1), [0, 0, 255, 80]);
    assert_eq!(ramp.entry(2), [255, 255, 0, 80]);
    assert_eq!(ramp.entry(3), [255, 0, 0, 80]);
    assert_eq!(ramp.entry(4), [0, 0, 0, 80]);
    assert_eq!(ramp.entry(255), [0, 0, 0, 0]);
}

#[test]
fn test_builtin_registry() {
    assert!(builtin_ramps().get(RenderStyle::Gray).is_none());
    for style in RenderStyle::ALL {
        if style != RenderStyle::Gray {
            assert!(ramp_for_style(style).is_some(), "missing ramp for {}", style);
        }
    }
    // The registry is built once and shared.
    assert!(std::ptr::eq(builtin_ramps(), builtin_ramps()));

    let rebuilt = ColorRampSet::builtin();
    assert_eq!(
        rebuilt.get(RenderStyle::Difference),
        Some(&ColorRamp::interpolated(DIFFERENCE_POINTS).unwrap())
    );
    for points in [TRANSPARENT_POINTS, MASK_POINTS] {
        assert_eq!(ColorRamp::interpolated(points).unwrap().len(), RAMP_SIZE);
    }
}

// ============================================================================
// Ramp file tests
// ============================================================================

#[test]
fn test_ramp_file_overrides_style() {
    let json = r#"{
        "version": "2.0",
        "ramps": {
            "mask": [[0, 255, 0, 0, 255], [10, 255, 0, 0, 0]]
        }
    }"#;
    let set = ColorRampSet::from_json(json).unwrap();

    assert_eq!(set.get(RenderStyle::Mask).unwrap().entry(0), [255, 0, 0, 255]);
    // Styles not in the file keep their built-in ramps.
    assert_eq!(
        set.get(RenderStyle::Temporal),
        builtin_ramps().get(RenderStyle::Temporal)
    );
}

#[test]
fn test_ramp_file_rejects_bad_ramp() {
    let json = r#"{"ramps": {"temporal": [[10, 0, 0, 0, 0], [5, 0, 0, 0, 0]]}}"#;
    let err = ColorRampSet::from_json(json).unwrap_err();
    assert!(matches!(err, AnalystError::ColorRampError(_)));
}

#[test]
fn test_ramp_file_rejects_unknown_style() {
    let json = r#"{"ramps": {"plasma": [[0, 0, 0, 0, 0], [5, 0, 0, 0, 0]]}}"#;
    let err = ColorRampSet::from_json(json).unwrap_err();
    assert!(matches!(err, AnalystError::StyleNotFound(_)));
}

#[test]
fn test_ramp_file_from_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"ramps": {{"gray": [[0, 0, 0, 0, 255], [255, 255, 255, 255, 255]]}}}}"#
    )
    .unwrap();

    let set = ColorRampSet::from_file(file.path()).unwrap();
    let gray = set.get(RenderStyle::Gray).unwrap();
    assert_eq!(gray.entry(0), [0, 0, 0, 255]);
    assert_eq!(gray.entry(128), [128, 128, 128, 255]);
}

#[test]
fn test_ramp_file_missing() {
    let err = ColorRampSet::from_file("/nonexistent/ramps.json").unwrap_err();
    assert!(matches!(err, AnalystError::InternalError(_)));
}
