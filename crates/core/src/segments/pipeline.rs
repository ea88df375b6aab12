//! Consolidation and grouping entry points.

use rayon::prelude::*;
use tracing::debug;

use crate::error::Result;

use super::adjacency::merge_adjacent;
use super::annotate::annotate_segments;
use super::binning::collect_bins;
use super::collinear::group_collinear;
use super::ranking::order_by_rank;
use super::slope_length::group_slope_length;
use super::synthesis::synthesize_cluster;
use super::types::{
    AnnotatedSegment, Consolidation, ConsolidatedSegment, ConsolidationReport, Grouping,
    GroupingReport, RawSegment, SegmentSettings,
};

/// Result of merging and synthesizing one collinearity group.
struct GroupOutcome {
    consolidated: Vec<ConsolidatedSegment>,
    clusters: usize,
    merges: usize,
}

fn consolidate_group(
    segments: &[AnnotatedSegment],
    group: &[usize],
    total: usize,
    settings: &SegmentSettings,
) -> GroupOutcome {
    let merge = merge_adjacent(segments, group, settings.distance_tolerance);
    let consolidated = merge
        .clusters
        .iter()
        .filter_map(|members| synthesize_cluster(segments, members, total))
        .filter(|c| c.segment.length() >= settings.min_output_length)
        .collect();
    GroupOutcome {
        consolidated,
        clusters: merge.clusters.len(),
        merges: merge.merges,
    }
}

/// Consolidate fragmented segments into long representative segments.
///
/// Segments are grouped by shared line, merged where they touch, replaced by
/// one bounding segment per merged cluster, and returned ordered so clusters
/// holding early input segments come first.
pub fn consolidate_segments(
    raw: &[RawSegment],
    settings: &SegmentSettings,
) -> Result<Vec<RawSegment>> {
    consolidate_segments_with_report(raw, settings).map(|c| c.segments)
}

/// Like [`consolidate_segments`], also returning per-stage counters.
pub fn consolidate_segments_with_report(
    raw: &[RawSegment],
    settings: &SegmentSettings,
) -> Result<Consolidation> {
    settings.validate_consolidation()?;

    let annotation = annotate_segments(raw, settings.invalid_policy)?;
    let segments = annotation.segments.as_slice();
    let total = raw.len();

    let groups = group_collinear(
        segments,
        settings.angle_tolerance,
        settings.distance_tolerance,
    );
    debug!(
        segments = segments.len(),
        skipped = annotation.skipped.len(),
        groups = groups.len(),
        "collinearity grouping done"
    );

    let outcomes: Vec<GroupOutcome> = if settings.parallel {
        groups
            .par_iter()
            .map(|group| consolidate_group(segments, group, total, settings))
            .collect()
    } else {
        groups
            .iter()
            .map(|group| consolidate_group(segments, group, total, settings))
            .collect()
    };

    let mut report = ConsolidationReport {
        input_segments: total,
        skipped: annotation.skipped,
        collinear_groups: groups.len(),
        ..ConsolidationReport::default()
    };
    let mut consolidated = Vec::new();
    for outcome in outcomes {
        report.adjacency_clusters += outcome.clusters;
        report.merges_resolved += outcome.merges;
        consolidated.extend(outcome.consolidated);
    }

    let segments = order_by_rank(consolidated);
    report.output_segments = segments.len();
    debug!(
        clusters = report.adjacency_clusters,
        merges = report.merges_resolved,
        output = report.output_segments,
        "consolidation done"
    );

    Ok(Consolidation { segments, report })
}

/// Group segments by similar orientation and length, without merging.
pub fn group_segments_by_slope_length(
    raw: &[RawSegment],
    settings: &SegmentSettings,
) -> Result<Vec<Vec<AnnotatedSegment>>> {
    group_segments_by_slope_length_with_report(raw, settings).map(|g| g.groups)
}

/// Like [`group_segments_by_slope_length`], also returning counters.
pub fn group_segments_by_slope_length_with_report(
    raw: &[RawSegment],
    settings: &SegmentSettings,
) -> Result<Grouping> {
    settings.validate_grouping()?;

    let annotation = annotate_segments(raw, settings.invalid_policy)?;
    let bins = group_slope_length(
        &annotation.segments,
        settings.angle_tolerance,
        settings.proportional_tolerance,
    );
    let groups = collect_bins(&annotation.segments, &bins);
    debug!(
        segments = annotation.segments.len(),
        groups = groups.len(),
        "slope/length grouping done"
    );

    Ok(Grouping {
        report: GroupingReport {
            input_segments: raw.len(),
            skipped: annotation.skipped,
            groups: groups.len(),
        },
        groups,
    })
}
