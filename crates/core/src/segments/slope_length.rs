//! Slope/length similarity grouping.
//!
//! Unlike the consolidation path nothing is merged: segments with similar
//! orientation and proportionally similar length are binned together so a
//! caller can look for repeated structure (rows of equal rules, box sides).

use super::binning::first_fit;
use super::types::AnnotatedSegment;

/// True when `a` and `b` have close orientation and proportionally close length.
pub fn is_similar_slope_length(
    a: &AnnotatedSegment,
    b: &AnnotatedSegment,
    angle_tolerance: f64,
    proportional_tolerance: f64,
) -> bool {
    let longest = a.length.abs().max(b.length.abs());
    (a.angle - b.angle).abs() < angle_tolerance
        && (a.length - b.length).abs() < proportional_tolerance * longest
}

/// Group segments by orientation and length with first-fit binning.
pub fn group_slope_length(
    segments: &[AnnotatedSegment],
    angle_tolerance: f64,
    proportional_tolerance: f64,
) -> Vec<Vec<usize>> {
    first_fit(segments, |member, candidate| {
        is_similar_slope_length(member, candidate, angle_tolerance, proportional_tolerance)
    })
}
