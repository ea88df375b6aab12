//! Collinearity grouping.
//!
//! Segments share a group when their orientations agree within the angular
//! tolerance and they cross the same axis within the distance tolerance.

use super::binning::first_fit;
use super::types::AnnotatedSegment;

fn intercepts_within(a: Option<f64>, b: Option<f64>, tolerance: f64) -> bool {
    matches!((a, b), (Some(a), Some(b)) if (a - b).abs() <= tolerance)
}

/// True when `a` and `b` lie on approximately the same infinite line.
pub fn is_collinear(
    a: &AnnotatedSegment,
    b: &AnnotatedSegment,
    angle_tolerance: f64,
    distance_tolerance: f64,
) -> bool {
    if (a.angle - b.angle).abs() > angle_tolerance {
        return false;
    }
    intercepts_within(a.y_intercept, b.y_intercept, distance_tolerance)
        || intercepts_within(a.x_intercept, b.x_intercept, distance_tolerance)
}

/// Group segments into collinearity groups with first-fit binning.
///
/// Returns index lists into `segments`. Every index appears in exactly one
/// group. Membership depends on input order.
pub fn group_collinear(
    segments: &[AnnotatedSegment],
    angle_tolerance: f64,
    distance_tolerance: f64,
) -> Vec<Vec<usize>> {
    first_fit(segments, |member, candidate| {
        is_collinear(member, candidate, angle_tolerance, distance_tolerance)
    })
}
