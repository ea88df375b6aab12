//! Segment types and pipeline settings.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SegmentError};
use crate::utils::Point;

// Default constants
pub(crate) const DEFAULT_ANGLE_TOLERANCE: f64 = 2.0 * std::f64::consts::PI / 180.0;
pub(crate) const DEFAULT_DISTANCE_TOLERANCE: f64 = 3.0;
pub(crate) const DEFAULT_PROPORTIONAL_TOLERANCE: f64 = 0.1;

/// A line segment as four ordered coordinates `(x0, y0, x1, y1)`.
///
/// Serialized as a plain `[x0, y0, x1, y1]` array.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct RawSegment {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl RawSegment {
    pub const fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn start(&self) -> Point {
        (self.x0, self.y0)
    }

    pub fn end(&self) -> Point {
        (self.x1, self.y1)
    }

    pub fn endpoints(&self) -> [Point; 2] {
        [self.start(), self.end()]
    }

    pub fn dx(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn dy(&self) -> f64 {
        self.y1 - self.y0
    }

    pub fn length(&self) -> f64 {
        self.dx().hypot(self.dy())
    }

    pub fn is_finite(&self) -> bool {
        self.x0.is_finite() && self.y0.is_finite() && self.x1.is_finite() && self.y1.is_finite()
    }
}

impl From<[f64; 4]> for RawSegment {
    fn from(c: [f64; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }
}

impl From<(f64, f64, f64, f64)> for RawSegment {
    fn from((x0, y0, x1, y1): (f64, f64, f64, f64)) -> Self {
        Self::new(x0, y0, x1, y1)
    }
}

impl From<RawSegment> for [f64; 4] {
    fn from(s: RawSegment) -> Self {
        [s.x0, s.y0, s.x1, s.y1]
    }
}

/// A raw segment with its orientation, length, axis intercepts and rank.
///
/// The rank is the segment's position in the input sequence. It is fixed
/// when the segment is annotated and can only be read afterwards.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AnnotatedSegment {
    /// Orientation in radians, see [`annotate_segment`](super::annotate_segment).
    pub angle: f64,
    pub length: f64,
    pub segment: RawSegment,
    /// Where the extended line crosses `y = 0`; set for mostly vertical segments.
    pub x_intercept: Option<f64>,
    /// Where the extended line crosses `x = 0`; set for mostly horizontal segments.
    pub y_intercept: Option<f64>,
    rank: usize,
}

impl AnnotatedSegment {
    pub(crate) fn new(
        angle: f64,
        length: f64,
        segment: RawSegment,
        x_intercept: Option<f64>,
        y_intercept: Option<f64>,
        rank: usize,
    ) -> Self {
        Self {
            angle,
            length,
            segment,
            x_intercept,
            y_intercept,
            rank,
        }
    }

    pub fn rank(&self) -> usize {
        self.rank
    }
}

/// The bounding segment synthesized from one adjacency cluster.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ConsolidatedSegment {
    pub segment: RawSegment,
    /// Sum of `N - rank` over the cluster members.
    pub aggregate_rank: usize,
    /// Lowest member rank; breaks ties between equal aggregate ranks.
    pub first_rank: usize,
}

/// What to do with segments that cannot be annotated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidSegmentPolicy {
    /// Log and drop the segment, keep processing the rest.
    #[default]
    Skip,
    /// Fail the whole call.
    Reject,
}

/// Tolerances and behavior switches for consolidation and grouping.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentSettings {
    /// Maximum orientation difference, in radians.
    pub angle_tolerance: f64,
    /// Maximum intercept difference and endpoint gap, in coordinate units.
    pub distance_tolerance: f64,
    /// Maximum length difference relative to the longer segment.
    /// Only the slope/length grouping uses it.
    pub proportional_tolerance: f64,
    pub invalid_policy: InvalidSegmentPolicy,
    /// Merge independent collinearity groups on the rayon pool.
    pub parallel: bool,
    /// Consolidated segments shorter than this are dropped.
    pub min_output_length: f64,
}

impl Default for SegmentSettings {
    fn default() -> Self {
        Self {
            angle_tolerance: DEFAULT_ANGLE_TOLERANCE,
            distance_tolerance: DEFAULT_DISTANCE_TOLERANCE,
            proportional_tolerance: DEFAULT_PROPORTIONAL_TOLERANCE,
            invalid_policy: InvalidSegmentPolicy::Skip,
            parallel: true,
            min_output_length: 0.0,
        }
    }
}

impl SegmentSettings {
    pub fn new(
        angle_tolerance: f64,
        distance_tolerance: f64,
        proportional_tolerance: f64,
    ) -> Self {
        Self {
            angle_tolerance,
            distance_tolerance,
            proportional_tolerance,
            ..Self::default()
        }
    }

    pub fn with_angle_tolerance(mut self, radians: f64) -> Self {
        self.angle_tolerance = radians;
        self
    }

    pub fn with_distance_tolerance(mut self, distance: f64) -> Self {
        self.distance_tolerance = distance;
        self
    }

    pub fn with_proportional_tolerance(mut self, ratio: f64) -> Self {
        self.proportional_tolerance = ratio;
        self
    }

    pub fn with_invalid_policy(mut self, policy: InvalidSegmentPolicy) -> Self {
        self.invalid_policy = policy;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_min_output_length(mut self, length: f64) -> Self {
        self.min_output_length = length;
        self
    }

    /// Checks the tolerances the consolidation path depends on.
    pub fn validate_consolidation(&self) -> Result<()> {
        require_positive("angle_tolerance", self.angle_tolerance)?;
        require_positive("distance_tolerance", self.distance_tolerance)?;
        if !self.min_output_length.is_finite() || self.min_output_length < 0.0 {
            return Err(SegmentError::Configuration(format!(
                "min_output_length must be a finite non-negative number, got {}",
                self.min_output_length
            )));
        }
        Ok(())
    }

    /// Checks the tolerances the slope/length grouping depends on.
    pub fn validate_grouping(&self) -> Result<()> {
        require_positive("angle_tolerance", self.angle_tolerance)?;
        require_positive("proportional_tolerance", self.proportional_tolerance)
    }
}

fn require_positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SegmentError::Configuration(format!(
            "{} must be a finite positive number, got {}",
            name, value
        )))
    }
}

/// Pipeline counters for one consolidation call.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ConsolidationReport {
    pub input_segments: usize,
    /// Input indices of segments dropped as invalid.
    pub skipped: Vec<usize>,
    pub collinear_groups: usize,
    pub adjacency_clusters: usize,
    /// Pending merges that actually joined two clusters.
    pub merges_resolved: usize,
    pub output_segments: usize,
}

/// Consolidated segments together with the counters that produced them.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Consolidation {
    pub segments: Vec<RawSegment>,
    pub report: ConsolidationReport,
}

/// Pipeline counters for one slope/length grouping call.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct GroupingReport {
    pub input_segments: usize,
    pub skipped: Vec<usize>,
    pub groups: usize,
}

/// Slope/length groups together with their counters.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Grouping {
    pub groups: Vec<Vec<AnnotatedSegment>>,
    pub report: GroupingReport,
}
