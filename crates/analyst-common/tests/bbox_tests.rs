//! Tests for BoundingBox parsing and validation.

use analyst_common::bbox::{BboxParseError, BoundingBox};

// ============================================================================
// Parse tests
// ============================================================================

#[test]
fn test_parse_bbox_integer() {
    let bbox = BoundingBox::parse("0,0,100,100").unwrap();
    assert_eq!(bbox, BoundingBox::new(0.0, 0.0, 100.0, 100.0));
}

#[test]
fn test_parse_bbox_web_mercator() {
    let bbox =
        BoundingBox::parse("-13672000.5,5690000,-13662000,5700000.25").unwrap();
    assert_eq!(bbox.min_x, -13672000.5);
    assert_eq!(bbox.max_y, 5700000.25);
}

#[test]
fn test_parse_bbox_scientific_notation() {
    let bbox = BoundingBox::parse("-1.5e3,2e2,1.5e3,4e2").unwrap();
    assert_eq!(bbox.min_x, -1500.0);
    assert_eq!(bbox.max_y, 400.0);
}

#[test]
fn test_parse_bbox_whitespace() {
    let bbox = BoundingBox::parse(" 1, 2 ,3 , 4").unwrap();
    assert_eq!(bbox, BoundingBox::new(1.0, 2.0, 3.0, 4.0));
}

#[test]
fn test_parse_bbox_invalid_format_too_few() {
    let result = BoundingBox::parse("0,0,10");
    assert!(matches!(result, Err(BboxParseError::InvalidFormat(_))));
}

#[test]
fn test_parse_bbox_invalid_format_too_many() {
    let result = BoundingBox::parse("0,0,10,10,5");
    assert!(matches!(result, Err(BboxParseError::InvalidFormat(_))));
}

#[test]
fn test_parse_bbox_invalid_number() {
    let result = BoundingBox::parse("0,zero,10,10");
    assert!(matches!(result, Err(BboxParseError::InvalidNumber(n)) if n == "zero"));
}

#[test]
fn test_parse_bbox_empty_string() {
    assert!(BoundingBox::parse("").is_err());
}

// ============================================================================
// Dimension and validation tests
// ============================================================================

#[test]
fn test_bbox_width_and_height() {
    let bbox = BoundingBox::new(-10.0, -5.0, 10.0, 5.0);
    assert_eq!(bbox.width(), 20.0);
    assert_eq!(bbox.height(), 10.0);
}

#[test]
fn test_validate_accepts_regular_box() {
    assert!(BoundingBox::new(-122.7, 45.4, -122.5, 45.6).validate().is_ok());
}

#[test]
fn test_validate_rejects_zero_area() {
    let flat = BoundingBox::new(0.0, 5.0, 10.0, 5.0);
    assert!(matches!(
        flat.validate(),
        Err(BboxParseError::Empty { height, .. }) if height == 0.0
    ));
}

#[test]
fn test_validate_rejects_infinite() {
    let bbox = BoundingBox::new(0.0, 0.0, f64::INFINITY, 1.0);
    assert!(matches!(bbox.validate(), Err(BboxParseError::NotFinite)));
}

// ============================================================================
// contains_point tests
// ============================================================================

#[test]
fn test_bbox_contains_point_inside_and_edge() {
    let bbox = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
    assert!(bbox.contains_point(5.0, 5.0));
    assert!(bbox.contains_point(0.0, 10.0));
    assert!(!bbox.contains_point(10.1, 5.0));
}
