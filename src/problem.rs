//! Plain description of a truss problem, independent of how it was built.

use serde::{Deserialize, Serialize};

use crate::errors::{AnalysisError, ReferenceKind};
use crate::geometry::Vector2;

/// A member connecting two vertex ids.
pub type Edge = (usize, usize);

/// A support force at a vertex acting along a fixed unit direction.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Reaction {
    /// Vertex the support acts on.
    pub vertex: usize,
    /// Unit direction of the unknown support force.
    pub direction: Vector2,
}

impl Reaction {
    /// Create a reaction at `vertex` along `direction`.
    #[must_use]
    pub const fn new(vertex: usize, direction: Vector2) -> Self {
        Self { vertex, direction }
    }
}

/// An external force applied at a vertex.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Load {
    /// Vertex the force is applied to.
    pub vertex: usize,
    /// Applied force.
    pub force: Vector2,
}

impl Load {
    /// Create a load of `force` at `vertex`.
    #[must_use]
    pub const fn new(vertex: usize, force: Vector2) -> Self {
        Self { vertex, force }
    }
}

/// Vertices, members, supports and loads of a pin-jointed truss.
///
/// The order of `edges` and `reactions` fixes the column order of the equilibrium
/// matrix and therefore the order of the solution vector.
///
/// # Examples
/// ```
/// use trussopt::{vector, Reaction, TrussProblem};
///
/// let problem = TrussProblem {
///     vertices: vec![vector(0.0, 0.0), vector(1.0, 0.0)],
///     edges: vec![(0, 1)],
///     reactions: vec![Reaction::new(0, vector(1.0, 0.0))],
///     loads: vec![],
/// };
/// assert_eq!(problem.unknown_count(), 2);
/// assert!(problem.validate().is_ok());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TrussProblem {
    /// Vertex positions; the index is the vertex id.
    pub vertices: Vec<Vector2>,
    /// Members as pairs of vertex ids.
    #[serde(default)]
    pub edges: Vec<Edge>,
    /// Support reactions.
    #[serde(default)]
    pub reactions: Vec<Reaction>,
    /// Applied loads.
    #[serde(default)]
    pub loads: Vec<Load>,
}

impl TrussProblem {
    /// Number of equilibrium equations, two per vertex.
    #[must_use]
    pub fn equation_count(&self) -> usize {
        2 * self.vertices.len()
    }

    /// Number of unknowns: one tension per edge plus one magnitude per reaction.
    #[must_use]
    pub fn unknown_count(&self) -> usize {
        self.edges.len() + self.reactions.len()
    }

    /// Check that every edge, reaction and load refers to an existing vertex.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidReference`] for the first offending entry.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        let vertex_count = self.vertices.len();
        let check = |kind, index, vertex| {
            if vertex < vertex_count {
                Ok(())
            } else {
                Err(AnalysisError::InvalidReference {
                    kind,
                    index,
                    vertex,
                    vertex_count,
                })
            }
        };
        for (index, &(a, b)) in self.edges.iter().enumerate() {
            check(ReferenceKind::Edge, index, a)?;
            check(ReferenceKind::Edge, index, b)?;
        }
        for (index, reaction) in self.reactions.iter().enumerate() {
            check(ReferenceKind::Reaction, index, reaction.vertex)?;
        }
        for (index, load) in self.loads.iter().enumerate() {
            check(ReferenceKind::Load, index, load.vertex)?;
        }
        Ok(())
    }

    /// Length of every member in edge order.
    #[must_use]
    pub fn edge_lengths(&self) -> Vec<f64> {
        edge_lengths(&self.vertices, &self.edges)
    }
}

/// Length of each edge between the given points.
#[must_use]
pub fn edge_lengths(points: &[Vector2], edges: &[Edge]) -> Vec<f64> {
    edges
        .iter()
        .map(|&(a, b)| points[a].distance(points[b]))
        .collect()
}
