//! Candidate adjacency from a point set.
//!
//! The optimizer only needs an undirected edge list. Triangulators hand back a
//! half-edge mesh; [`mesh_edges`] flattens it.

use crate::geometry::Vector2;
use crate::problem::Edge;

/// Triangle mesh in half-edge form.
///
/// Half-edge `i` starts at vertex `triangles[i]` and ends at the start of
/// [`next_halfedge`]`(i)`. `halfedges[i]` is the opposite half-edge in the
/// neighbouring triangle, or `None` on the convex hull.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HalfEdgeMesh {
    /// Start vertex of every half-edge, three per triangle.
    pub triangles: Vec<usize>,
    /// Opposite half-edge of every half-edge.
    pub halfedges: Vec<Option<usize>>,
}

/// Index of the half-edge following `i` within its triangle.
#[must_use]
pub fn next_halfedge(i: usize) -> usize {
    if i % 3 == 2 {
        i - 2
    } else {
        i + 1
    }
}

/// Produces a half-edge mesh over a point set.
pub trait Triangulate {
    /// Triangulate `points`; fewer than three or collinear points give an empty mesh.
    fn triangulate(&self, points: &[Vector2]) -> HalfEdgeMesh;
}

/// Delaunay triangulation backed by the `delaunator` crate.
#[derive(Clone, Copy, Debug, Default)]
pub struct Delaunay;

impl Triangulate for Delaunay {
    fn triangulate(&self, points: &[Vector2]) -> HalfEdgeMesh {
        let points: Vec<delaunator::Point> = points
            .iter()
            .map(|p| delaunator::Point { x: p.x, y: p.y })
            .collect();
        let triangulation = delaunator::triangulate(&points);
        HalfEdgeMesh {
            triangles: triangulation.triangles,
            halfedges: triangulation
                .halfedges
                .into_iter()
                .map(|pair| (pair != delaunator::EMPTY).then_some(pair))
                .collect(),
        }
    }
}

/// Every interior edge of the mesh exactly once.
///
/// A half-edge is kept when its opposite index is not smaller. Hull half-edges have
/// no opposite and are skipped, so members only join points that share two triangles.
///
/// # Examples
/// ```
/// use trussopt::{mesh_edges, HalfEdgeMesh};
///
/// // Two triangles sharing the diagonal 0-2; the four outer sides are hull.
/// let square = HalfEdgeMesh {
///     triangles: vec![0, 1, 2, 2, 3, 0],
///     halfedges: vec![None, None, Some(5), None, None, Some(2)],
/// };
/// assert_eq!(mesh_edges(&square), vec![(2, 0)]);
/// ```
#[must_use]
pub fn mesh_edges(mesh: &HalfEdgeMesh) -> Vec<Edge> {
    mesh.halfedges
        .iter()
        .enumerate()
        .filter(|&(i, pair)| pair.is_some_and(|j| j >= i))
        .map(|(i, _)| (mesh.triangles[i], mesh.triangles[next_halfedge(i)]))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::geometry::vector;

    fn undirected(edges: &[Edge]) -> HashSet<(usize, usize)> {
        edges.iter().map(|&(a, b)| (a.min(b), a.max(b))).collect()
    }

    #[test]
    fn next_halfedge_wraps_within_triangle() {
        assert_eq!(next_halfedge(0), 1);
        assert_eq!(next_halfedge(2), 0);
        assert_eq!(next_halfedge(5), 3);
    }

    #[test]
    fn shared_edges_are_kept_once() {
        // Two triangles sharing the diagonal 0-2 of a unit square.
        let mesh = HalfEdgeMesh {
            triangles: vec![0, 1, 2, 2, 3, 0],
            halfedges: vec![None, None, Some(5), None, None, Some(2)],
        };
        let edges = mesh_edges(&mesh);
        assert_eq!(edges.len(), 1);
        assert_eq!(undirected(&edges), HashSet::from([(0, 2)]));
    }

    #[test]
    fn hull_only_mesh_has_no_edges() {
        let single = HalfEdgeMesh {
            triangles: vec![0, 1, 2],
            halfedges: vec![None, None, None],
        };
        assert!(mesh_edges(&single).is_empty());
    }

    #[test]
    fn fan_keeps_spokes_and_drops_rim() {
        // Centre 0 surrounded by 1, 2, 3; the rim 1-2-3 is the hull.
        let mesh = HalfEdgeMesh {
            triangles: vec![0, 1, 2, 0, 2, 3, 0, 3, 1],
            halfedges: vec![
                Some(8),
                None,
                Some(3),
                Some(2),
                None,
                Some(6),
                Some(5),
                None,
                Some(0),
            ],
        };
        let edges = mesh_edges(&mesh);
        assert_eq!(edges.len(), 3);
        assert_eq!(undirected(&edges), HashSet::from([(0, 1), (0, 2), (0, 3)]));
    }

    #[test]
    fn delaunay_square_keeps_only_the_diagonal() {
        let points = [
            vector(0.0, 0.0),
            vector(10.0, 0.0),
            vector(10.0, 11.0),
            vector(0.0, 10.0),
        ];
        let mesh = Delaunay.triangulate(&points);
        assert_eq!(mesh.triangles.len(), 6);
        assert_eq!(mesh.halfedges.iter().filter(|pair| pair.is_none()).count(), 4);
        let edges = mesh_edges(&mesh);
        assert_eq!(edges.len(), 1);
        let (a, b) = edges[0];
        assert!(a != b);
    }

    #[test]
    fn delaunay_triangle_has_no_interior_edges() {
        let points = [vector(50.0, 200.0), vector(50.0, 600.0), vector(750.0, 400.0)];
        let mesh = Delaunay.triangulate(&points);
        assert_eq!(mesh.triangles.len(), 3);
        assert!(mesh_edges(&mesh).is_empty());
    }

    #[test]
    fn degenerate_inputs_give_no_edges() {
        assert!(mesh_edges(&Delaunay.triangulate(&[])).is_empty());
        let two = [vector(0.0, 0.0), vector(1.0, 1.0)];
        assert!(mesh_edges(&Delaunay.triangulate(&two)).is_empty());
        let collinear = [vector(0.0, 0.0), vector(1.0, 1.0), vector(2.0, 2.0)];
        assert!(mesh_edges(&Delaunay.triangulate(&collinear)).is_empty());
    }
}
