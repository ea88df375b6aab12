//! Final ordering of consolidated segments.

use std::cmp::Ordering;

use itertools::Itertools;

use super::types::{ConsolidatedSegment, RawSegment};

/// Descending aggregate rank, then ascending first rank.
pub fn compare_consolidated(a: &ConsolidatedSegment, b: &ConsolidatedSegment) -> Ordering {
    b.aggregate_rank
        .cmp(&a.aggregate_rank)
        .then_with(|| a.first_rank.cmp(&b.first_rank))
}

/// Stable-sort consolidated segments by rank and strip the rank data.
pub fn order_by_rank(segments: Vec<ConsolidatedSegment>) -> Vec<RawSegment> {
    segments
        .into_iter()
        .sorted_by(compare_consolidated)
        .map(|c| c.segment)
        .collect()
}
