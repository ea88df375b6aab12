//! Miscellaneous routines shared by the segment pipeline.
//!
//! Provides:
//! - Geometric primitives (Point) and planar distance/projection helpers
//! - A disjoint-set forest used to resolve transitive cluster merges

/// Small epsilon for floating-point comparisons.
pub const EPSILON: f64 = 1e-9;

/// A 2D point (x, y).
pub type Point = (f64, f64);

/// Compares two floats for approximate equality.
#[inline]
pub fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}

/// Euclidean distance between two points.
#[inline]
pub fn distance(p: Point, q: Point) -> f64 {
    (q.0 - p.0).hypot(q.1 - p.1)
}

/// Projects `p` onto the line through `a` and `b`.
///
/// Returns the line parameter `t` (0 at `a`, 1 at `b`) of the foot of the
/// perpendicular and the perpendicular distance from `p` to the line.
/// Returns None when `a` and `b` coincide.
pub fn project_point(p: Point, a: Point, b: Point) -> Option<(f64, f64)> {
    let dx = b.0 - a.0;
    let dy = b.1 - a.1;
    let len_sq = dx * dx + dy * dy;
    if len_sq <= 0.0 {
        return None;
    }
    let t = ((p.0 - a.0) * dx + (p.1 - a.1) * dy) / len_sq;
    let foot = (a.0 + t * dx, a.1 + t * dy);
    Some((t, distance(p, foot)))
}

/// True when `p` projects inside the span of segment `a`-`b` and lies within
/// `tolerance` of it.
pub fn projects_within(p: Point, a: Point, b: Point, tolerance: f64) -> bool {
    match project_point(p, a, b) {
        Some((t, dist)) => (0.0..=1.0).contains(&t) && dist <= tolerance,
        None => false,
    }
}

/// Disjoint-set forest with path compression.
///
/// Roots always carry the smallest index of their set, so iterating elements
/// in index order visits each set first through its earliest member.
#[derive(Debug, Clone)]
pub struct DisjointSet {
    parent: Vec<usize>,
}

impl DisjointSet {
    /// Creates `n` singleton sets.
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Returns the representative of `x`, compressing the path on the way.
    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut node = x;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }
        root
    }

    /// Joins the sets containing `a` and `b`.
    ///
    /// Returns false if they were already the same set.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return false;
        }
        let (keep, absorb) = if ra < rb { (ra, rb) } else { (rb, ra) };
        self.parent[absorb] = keep;
        true
    }
}
