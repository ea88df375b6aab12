//! lineweld - consolidation and grouping of fragmented 2D line segments.
//!
//! Line detectors run on noisy or dashed document imagery report many short
//! pieces of what is really one rule. This crate turns those pieces back into
//! long representative segments, or bins them by orientation and length for
//! block-structure analysis. It does no image processing of its own.

pub mod error;
pub mod segments;
pub mod utils;

pub use error::{InvalidReason, Result, SegmentError};
pub use segments::{
    AnnotatedSegment, Consolidation, ConsolidationReport, Grouping, GroupingReport,
    InvalidSegmentPolicy, RawSegment, SegmentSettings, consolidate_segments,
    consolidate_segments_with_report, group_segments_by_slope_length,
    group_segments_by_slope_length_with_report,
};
