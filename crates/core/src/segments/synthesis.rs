//! Line synthesis: one bounding segment per adjacency cluster.

use std::f64::consts::{FRAC_PI_2, PI};

use super::types::{AnnotatedSegment, ConsolidatedSegment, RawSegment};

/// True when an orientation points into the first or third quadrant, i.e.
/// (0, π/2) ∪ (π, 3π/2) ∪ (-π, -π/2).
pub(crate) fn rises_with_x(angle: f64) -> bool {
    let folded = angle.rem_euclid(PI);
    folded > 0.0 && folded < FRAC_PI_2
}

/// Axis-aligned bounds of a growing cluster plus the orientation of the
/// member added last.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct ClusterBounds {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
    pub last_angle: f64,
}

impl ClusterBounds {
    pub fn new(seg: &AnnotatedSegment) -> Self {
        let s = seg.segment;
        Self {
            x_min: s.x0.min(s.x1),
            y_min: s.y0.min(s.y1),
            x_max: s.x0.max(s.x1),
            y_max: s.y0.max(s.y1),
            last_angle: seg.angle,
        }
    }

    pub fn extend(&mut self, seg: &AnnotatedSegment) {
        let s = seg.segment;
        self.x_min = self.x_min.min(s.x0.min(s.x1));
        self.y_min = self.y_min.min(s.y0.min(s.y1));
        self.x_max = self.x_max.max(s.x0.max(s.x1));
        self.y_max = self.y_max.max(s.y0.max(s.y1));
        self.last_angle = seg.angle;
    }

    /// Bounds over `members` (indices into `segments`), in member order.
    pub fn over(segments: &[AnnotatedSegment], members: &[usize]) -> Option<Self> {
        let (first, rest) = members.split_first()?;
        let mut bounds = Self::new(&segments[*first]);
        for &m in rest {
            bounds.extend(&segments[m]);
        }
        Some(bounds)
    }

    pub fn has_extent(&self) -> bool {
        self.x_max > self.x_min || self.y_max > self.y_min
    }

    /// The box diagonal matching the last member's orientation.
    pub fn diagonal(&self) -> Option<RawSegment> {
        if !self.has_extent() {
            return None;
        }
        Some(if rises_with_x(self.last_angle) {
            RawSegment::new(self.x_min, self.y_min, self.x_max, self.y_max)
        } else {
            RawSegment::new(self.x_min, self.y_max, self.x_max, self.y_min)
        })
    }
}

/// Reduce one cluster to its bounding segment.
///
/// `members` are indices into `segments` in processing order; `total` is the
/// size of the original input. Returns None when the members span no area
/// and no length.
pub fn synthesize_cluster(
    segments: &[AnnotatedSegment],
    members: &[usize],
    total: usize,
) -> Option<ConsolidatedSegment> {
    let segment = ClusterBounds::over(segments, members)?.diagonal()?;
    let aggregate_rank = members
        .iter()
        .map(|&m| total.saturating_sub(segments[m].rank()))
        .sum();
    let first_rank = members.iter().map(|&m| segments[m].rank()).min()?;
    Some(ConsolidatedSegment {
        segment,
        aggregate_rank,
        first_rank,
    })
}
