//! Segment annotation: orientation, length, axis intercepts and rank.
//!
//! Orientation comes from one of two branches. Mostly horizontal segments
//! (`|dx| > |dy|`) use `asin(dy / len)`, which lands in (-π/4, π/4). The rest
//! use `acos(dx / len)`, which lands in [π/4, 3π/4]. The intercept windows
//! below are expressed against that combined range.

use std::f64::consts::{FRAC_PI_8, PI};

use tracing::warn;

use crate::error::{InvalidReason, Result, SegmentError};

use super::types::{AnnotatedSegment, InvalidSegmentPolicy, RawSegment};

/// Open window in which a segment is steep enough to carry an x intercept.
const X_INTERCEPT_WINDOW: (f64, f64) = (FRAC_PI_8, 7.0 * FRAC_PI_8);

/// Open window around horizontal in which a y intercept is computed.
const Y_INTERCEPT_LOW_WINDOW: (f64, f64) = (-3.0 * FRAC_PI_8, 3.0 * FRAC_PI_8);

/// Upper y intercept window, closed at the top of the reachable range.
const Y_INTERCEPT_HIGH_WINDOW: (f64, f64) = (5.0 * FRAC_PI_8, PI);

/// Annotated segments plus the input indices that were skipped.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Annotation {
    pub segments: Vec<AnnotatedSegment>,
    pub skipped: Vec<usize>,
}

/// Orientation of a segment with deltas `dx`, `dy` and length `length > 0`.
pub(crate) fn segment_angle(dx: f64, dy: f64, length: f64) -> f64 {
    if dx.abs() > dy.abs() {
        (dy / length).asin()
    } else {
        (dx / length).acos()
    }
}

fn has_x_intercept(angle: f64) -> bool {
    angle > X_INTERCEPT_WINDOW.0 && angle < X_INTERCEPT_WINDOW.1
}

fn has_y_intercept(angle: f64) -> bool {
    (angle > Y_INTERCEPT_LOW_WINDOW.0 && angle < Y_INTERCEPT_LOW_WINDOW.1)
        || (angle > Y_INTERCEPT_HIGH_WINDOW.0 && angle <= Y_INTERCEPT_HIGH_WINDOW.1)
}

/// Annotate one segment, giving it `rank`.
///
/// Fails with [`SegmentError::InvalidSegment`] (reporting `rank` as the index)
/// for zero-length segments and segments with non-finite coordinates.
pub fn annotate_segment(raw: RawSegment, rank: usize) -> Result<AnnotatedSegment> {
    if !raw.is_finite() {
        return Err(SegmentError::InvalidSegment {
            index: rank,
            reason: InvalidReason::NonFinite,
        });
    }
    let dx = raw.dx();
    let dy = raw.dy();
    let length = raw.length();
    if length <= 0.0 || !length.is_finite() {
        return Err(SegmentError::InvalidSegment {
            index: rank,
            reason: if length <= 0.0 {
                InvalidReason::ZeroLength
            } else {
                InvalidReason::NonFinite
            },
        });
    }

    let angle = segment_angle(dx, dy, length);
    let x_intercept = has_x_intercept(angle).then(|| raw.x0 - raw.y0 * (dx / dy));
    let y_intercept = has_y_intercept(angle).then(|| raw.y0 - raw.x0 * (dy / dx));

    Ok(AnnotatedSegment::new(
        angle,
        length,
        raw,
        x_intercept,
        y_intercept,
        rank,
    ))
}

/// Annotate a sequence of segments, ranking them by input position.
pub fn annotate_segments(raw: &[RawSegment], policy: InvalidSegmentPolicy) -> Result<Annotation> {
    annotate_segments_from(raw, 0, policy)
}

/// Annotate a batch appended after `rank_offset` previously annotated segments.
///
/// Ranks continue from `rank_offset`, so two batches annotated this way never
/// share a rank. Skipped indices are reported in the same numbering.
pub fn annotate_segments_from(
    raw: &[RawSegment],
    rank_offset: usize,
    policy: InvalidSegmentPolicy,
) -> Result<Annotation> {
    let mut annotation = Annotation {
        segments: Vec::with_capacity(raw.len()),
        skipped: Vec::new(),
    };
    for (i, seg) in raw.iter().enumerate() {
        match annotate_segment(*seg, rank_offset + i) {
            Ok(annotated) => annotation.segments.push(annotated),
            Err(SegmentError::InvalidSegment { index, reason })
                if policy == InvalidSegmentPolicy::Skip =>
            {
                warn!(index, %reason, "skipping invalid segment");
                annotation.skipped.push(index);
            }
            Err(e) => return Err(e),
        }
    }
    Ok(annotation)
}
