//! Assembly of the equilibrium matrix and load vector.
//!
//! Rows come in pairs, the x and y force balance at each vertex. Columns hold one
//! unknown each: member tensions first in edge order, then reaction magnitudes in
//! reaction order.

use nalgebra::{DMatrix, DVector};

use crate::geometry::Vector2;
use crate::problem::{Edge, Load, Reaction, TrussProblem};

/// Write a force direction into the two rows of `vertex` at `column`.
fn set_component(matrix: &mut DMatrix<f64>, vertex: usize, column: usize, value: Vector2) {
    matrix[(2 * vertex, column)] = value.x;
    matrix[(2 * vertex + 1, column)] = value.y;
}

/// Assemble the `2 * vertices` by `edges + reactions` equilibrium matrix.
///
/// Every vertex id must be in range and no edge may have zero length.
///
/// # Examples
/// ```
/// use trussopt::{equilibrium_matrix, vector, Reaction};
///
/// let vertices = [vector(0.0, 0.0), vector(2.0, 0.0)];
/// let matrix = equilibrium_matrix(&vertices, &[(0, 1)], &[Reaction::new(1, vector(0.0, 1.0))]);
/// assert_eq!(matrix.shape(), (4, 2));
/// assert_eq!(matrix[(0, 0)], 1.0);
/// assert_eq!(matrix[(2, 0)], -1.0);
/// assert_eq!(matrix[(3, 1)], 1.0);
/// ```
#[must_use]
pub fn equilibrium_matrix(
    vertices: &[Vector2],
    edges: &[Edge],
    reactions: &[Reaction],
) -> DMatrix<f64> {
    let height = 2 * vertices.len();
    let width = edges.len() + reactions.len();
    let mut matrix = DMatrix::zeros(height, width);

    // Tension pulls each endpoint toward the other one.
    for (column, &(a, b)) in edges.iter().enumerate() {
        let unit = (vertices[b] - vertices[a]).unit();
        set_component(&mut matrix, a, column, unit);
        set_component(&mut matrix, b, column, -unit);
    }

    for (offset, reaction) in reactions.iter().enumerate() {
        let column = edges.len() + offset;
        set_component(&mut matrix, reaction.vertex, column, reaction.direction);
    }

    matrix
}

/// Assemble the right-hand side: the negated sum of applied loads at each vertex.
///
/// # Examples
/// ```
/// use trussopt::{load_vector, vector, Load};
///
/// let load = load_vector(2, &[Load::new(1, vector(3.0, -4.0))]);
/// assert_eq!(load.as_slice(), &[0.0, 0.0, -3.0, 4.0]);
/// ```
#[must_use]
pub fn load_vector(vertex_count: usize, loads: &[Load]) -> DVector<f64> {
    let mut vector = DVector::zeros(2 * vertex_count);
    for load in loads {
        vector[2 * load.vertex] -= load.force.x;
        vector[2 * load.vertex + 1] -= load.force.y;
    }
    vector
}

/// Assemble both sides of the equilibrium system for a problem.
#[must_use]
pub fn assemble(problem: &TrussProblem) -> (DMatrix<f64>, DVector<f64>) {
    (
        equilibrium_matrix(&problem.vertices, &problem.edges, &problem.reactions),
        load_vector(problem.vertices.len(), &problem.loads),
    )
}
