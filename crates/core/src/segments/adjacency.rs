//! Adjacency merging inside one collinearity group.
//!
//! Clusters grow incrementally. Each candidate is compared against the
//! bounding line of every cluster built so far; a candidate touching several
//! clusters joins the first and links the rest. Links are resolved after the
//! whole group has been seen, so chains A-B, B-C collapse into one cluster.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::trace;

use crate::utils::{DisjointSet, distance, projects_within};

use super::synthesis::ClusterBounds;
use super::types::{AnnotatedSegment, RawSegment};

/// Clusters produced from one collinearity group.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AdjacencyMerge {
    /// Index lists into the annotated slice, members in group order.
    pub clusters: Vec<Vec<usize>>,
    /// Pending merges that joined two previously separate clusters.
    pub merges: usize,
}

/// True when `candidate` touches the `reference` line within `tolerance`.
///
/// Touching means an endpoint of either segment projects inside the other's
/// span close to it, or two endpoints lie within `tolerance` of each other.
pub fn is_adjacent(candidate: &RawSegment, reference: &RawSegment, tolerance: f64) -> bool {
    let cand = candidate.endpoints();
    let refs = reference.endpoints();
    let projects = cand
        .iter()
        .any(|&p| projects_within(p, refs[0], refs[1], tolerance))
        || refs
            .iter()
            .any(|&p| projects_within(p, cand[0], cand[1], tolerance));
    projects
        || cand
            .iter()
            .any(|&p| refs.iter().any(|&q| distance(p, q) <= tolerance))
}

struct Cluster {
    /// Positions within the group, ascending until merges are resolved.
    positions: Vec<usize>,
    bounds: ClusterBounds,
}

/// Split one collinearity group into adjacency clusters.
///
/// `group` holds indices into `segments`. Every index of `group` ends up in
/// exactly one output cluster; clusters are emitted in the order their
/// earliest part was created.
pub fn merge_adjacent(
    segments: &[AnnotatedSegment],
    group: &[usize],
    distance_tolerance: f64,
) -> AdjacencyMerge {
    let mut clusters: Vec<Cluster> = Vec::new();
    let mut pending: Vec<(usize, usize)> = Vec::new();

    for (pos, &idx) in group.iter().enumerate() {
        let candidate = &segments[idx];
        let matched: SmallVec<[usize; 4]> = clusters
            .iter()
            .enumerate()
            .filter(|(_, c)| {
                c.bounds.diagonal().is_some_and(|line| {
                    is_adjacent(&candidate.segment, &line, distance_tolerance)
                })
            })
            .map(|(ci, _)| ci)
            .collect();

        match matched.split_first() {
            None => clusters.push(Cluster {
                positions: vec![pos],
                bounds: ClusterBounds::new(candidate),
            }),
            Some((&first, rest)) => {
                let target = &mut clusters[first];
                target.positions.push(pos);
                target.bounds.extend(candidate);
                pending.extend(rest.iter().map(|&other| (first, other)));
            }
        }
    }

    let mut sets = DisjointSet::new(clusters.len());
    let merges = pending
        .iter()
        .filter(|&&(a, b)| sets.union(a, b))
        .count();
    if merges > 0 {
        trace!(
            clusters = clusters.len(),
            pending = pending.len(),
            merges,
            "resolved adjacency merges"
        );
    }

    let mut slot_of_root: FxHashMap<usize, usize> = FxHashMap::default();
    let mut resolved: Vec<Vec<usize>> = Vec::new();
    for (ci, cluster) in clusters.into_iter().enumerate() {
        let root = sets.find(ci);
        let slot = *slot_of_root.entry(root).or_insert_with(|| {
            resolved.push(Vec::new());
            resolved.len() - 1
        });
        resolved[slot].extend(cluster.positions);
    }

    let clusters = resolved
        .into_iter()
        .filter(|positions| !positions.is_empty())
        .map(|mut positions| {
            positions.sort_unstable();
            positions.into_iter().map(|p| group[p]).collect()
        })
        .collect();

    AdjacencyMerge { clusters, merges }
}
