//! Pixel encoding: travel time in seconds to a signed byte.
//!
//! Every encoded pixel is either a minute value in `[-120, 120]` or the
//! [`UNREACHABLE`] sentinel.

use analyst_common::{LinearCombination, RenderStyle};

use crate::sample::{Sample, Surface, UNREACHABLE_SECONDS};

/// Pixel value for "no reachable or encodable value"; table entry 128.
pub const UNREACHABLE: i8 = i8::MIN;

/// Lowest encodable minute value.
pub const MIN_MINUTES: i64 = -120;

/// Highest encodable minute value.
pub const MAX_MINUTES: i64 = 120;

/// Encode one sample against one surface.
///
/// Absent samples and unreachable evaluations (`None` or
/// [`UNREACHABLE_SECONDS`]) become [`UNREACHABLE`]. Boarding
/// renders only mark coverage, so every present sample encodes to 0.
pub fn encode_pixel<S: Surface + ?Sized>(
    sample: Option<&Sample>,
    surface: &S,
    style: RenderStyle,
) -> i8 {
    let Some(sample) = sample else {
        return UNREACHABLE;
    };
    if style == RenderStyle::BoardingCount {
        return 0;
    }
    match reached(surface.eval(sample)) {
        Some(seconds) => encode_seconds(seconds),
        None => UNREACHABLE,
    }
}

/// Drop the [`UNREACHABLE_SECONDS`] sentinel from a surface evaluation.
fn reached(seconds: Option<i64>) -> Option<i64> {
    seconds.filter(|&s| s != UNREACHABLE_SECONDS)
}

/// Whole minutes (truncated toward zero), clamped to the encodable range.
pub fn encode_seconds(seconds: i64) -> i8 {
    (seconds / 60).clamp(MIN_MINUTES, MAX_MINUTES) as i8
}

/// Encode `(k1 * a + k2 * b) / 60 + intercept` minutes at one sample.
///
/// Unreachable on either surface makes the pixel unreachable.
pub fn encode_combination<A, B>(
    sample: Option<&Sample>,
    surface_a: &A,
    surface_b: &B,
    combination: &LinearCombination,
) -> i8
where
    A: Surface + ?Sized,
    B: Surface + ?Sized,
{
    let Some(sample) = sample else {
        return UNREACHABLE;
    };
    match (reached(surface_a.eval(sample)), reached(surface_b.eval(sample))) {
        (Some(a), Some(b)) => encode_minutes(
            (combination.k1 * a as f64 + combination.k2 * b as f64) / 60.0
                + combination.intercept,
        ),
        _ => UNREACHABLE,
    }
}

/// Clamp fractional minutes and truncate toward zero.
pub fn encode_minutes(minutes: f64) -> i8 {
    if minutes.is_nan() {
        return UNREACHABLE;
    }
    minutes.clamp(MIN_MINUTES as f64, MAX_MINUTES as f64) as i8
}
