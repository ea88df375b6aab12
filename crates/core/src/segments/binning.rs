//! First-fit binning of annotated segments.
//!
//! Both the collinearity and the slope/length grouping assign each segment to
//! the first existing bin holding a compatible member. Bins are index lists
//! into the annotated slice, in creation order, members in insertion order.

use super::types::AnnotatedSegment;

/// Bin `segments` with first-fit, `matches(member, candidate)` deciding
/// compatibility.
pub(crate) fn first_fit<F>(segments: &[AnnotatedSegment], matches: F) -> Vec<Vec<usize>>
where
    F: Fn(&AnnotatedSegment, &AnnotatedSegment) -> bool,
{
    let mut bins: Vec<Vec<usize>> = Vec::new();
    for (idx, candidate) in segments.iter().enumerate() {
        let slot = bins
            .iter()
            .position(|bin| bin.iter().any(|&m| matches(&segments[m], candidate)));
        match slot {
            Some(b) => bins[b].push(idx),
            None => bins.push(vec![idx]),
        }
    }
    bins
}

/// Materialize index bins as owned segment groups.
pub(crate) fn collect_bins(
    segments: &[AnnotatedSegment],
    bins: &[Vec<usize>],
) -> Vec<Vec<AnnotatedSegment>> {
    bins.iter()
        .map(|bin| bin.iter().map(|&i| segments[i].clone()).collect())
        .collect()
}
