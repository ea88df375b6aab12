//! Line segment consolidation and grouping.
//!
//! Raw detections flow through annotation, collinearity grouping, adjacency
//! merging, line synthesis and rank ordering to produce consolidated
//! segments. The slope/length grouping shares the annotation stage but stops
//! after binning.

mod adjacency;
mod annotate;
mod binning;
mod collinear;
mod pipeline;
mod ranking;
mod slope_length;
mod synthesis;
mod types;

// Re-export public types
pub use adjacency::AdjacencyMerge;
pub use annotate::Annotation;
pub use types::{
    AnnotatedSegment, ConsolidatedSegment, Consolidation, ConsolidationReport, Grouping,
    GroupingReport, InvalidSegmentPolicy, RawSegment, SegmentSettings,
};

// Re-export stage functions
pub use adjacency::{is_adjacent, merge_adjacent};
pub use annotate::{annotate_segment, annotate_segments, annotate_segments_from};
pub use collinear::{group_collinear, is_collinear};
pub use ranking::{compare_consolidated, order_by_rank};
pub use slope_length::{group_slope_length, is_similar_slope_length};
pub use synthesis::synthesize_cluster;

// Re-export public API functions
pub use pipeline::{
    consolidate_segments, consolidate_segments_with_report, group_segments_by_slope_length,
    group_segments_by_slope_length_with_report,
};
