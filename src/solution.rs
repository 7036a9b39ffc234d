//! Interpretation of solved equilibrium systems.

use nalgebra::DVector;
use serde::Serialize;
use tracing::debug;

use crate::errors::AnalysisError;
use crate::geometry::Vector2;
use crate::matrix::assemble;
use crate::problem::{Edge, Reaction, TrussProblem};
use crate::solver::{residual, solve};

/// Relative tolerance on the equilibrium residual of an accepted solution.
pub const EQUILIBRIUM_TOLERANCE: f64 = 1.0e-6;

/// Member tensions and support reactions of a solved truss.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TrussSolution {
    /// Signed tension per edge, in edge order. Positive values are tensile.
    pub tensions: Vec<f64>,
    /// Accumulated reaction per vertex; `None` where no support acts.
    pub reactions: Vec<Option<Vector2>>,
}

impl TrussSolution {
    /// Largest absolute member tension, or zero for a truss without members.
    #[must_use]
    pub fn max_force(&self) -> f64 {
        self.tensions
            .iter()
            .fold(0.0, |max: f64, tension| max.max(tension.abs()))
    }

    /// Vector sum of every support reaction.
    #[must_use]
    pub fn total_reaction(&self) -> Vector2 {
        self.reactions
            .iter()
            .flatten()
            .fold(Vector2::ZERO, |sum, &reaction| sum + reaction)
    }
}

/// Outcome of analysing a truss.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum Analysis {
    /// The structure carries the loads.
    Solved(TrussSolution),
    /// No equilibrium solution exists; every tension and reaction is absent.
    Unsolvable,
}

impl Analysis {
    /// The solution, if there is one.
    #[must_use]
    pub fn solution(&self) -> Option<&TrussSolution> {
        match self {
            Analysis::Solved(solution) => Some(solution),
            Analysis::Unsolvable => None,
        }
    }

    /// Member tensions, if solved.
    #[must_use]
    pub fn tensions(&self) -> Option<&[f64]> {
        self.solution().map(|solution| solution.tensions.as_slice())
    }

    /// Largest absolute member tension, if solved.
    #[must_use]
    pub fn max_force(&self) -> Option<f64> {
        self.solution().map(TrussSolution::max_force)
    }

    /// Whether a solution was found.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        matches!(self, Analysis::Solved(_))
    }
}

/// Map a raw solution vector onto per-edge tensions and per-vertex reactions.
///
/// `solution` must hold one entry per edge followed by one entry per reaction.
///
/// # Examples
/// ```
/// use nalgebra::DVector;
/// use trussopt::{interpret, vector, Reaction};
///
/// let raw = DVector::from_column_slice(&[5.0, 2.0, -3.0]);
/// let reactions = [
///     Reaction::new(1, vector(1.0, 0.0)),
///     Reaction::new(1, vector(0.0, 1.0)),
/// ];
/// let solution = interpret(&raw, 2, &[(0, 1)], &reactions);
/// assert_eq!(solution.tensions, vec![5.0]);
/// assert_eq!(solution.reactions[0], None);
/// assert_eq!(solution.reactions[1], Some(vector(2.0, -3.0)));
/// ```
#[must_use]
pub fn interpret(
    solution: &DVector<f64>,
    vertex_count: usize,
    edges: &[Edge],
    reactions: &[Reaction],
) -> TrussSolution {
    let tensions = solution.iter().take(edges.len()).copied().collect();
    let mut accumulated = vec![None; vertex_count];
    for (offset, reaction) in reactions.iter().enumerate() {
        let force = reaction.direction * solution[edges.len() + offset];
        let total = accumulated[reaction.vertex].get_or_insert(Vector2::ZERO);
        *total += force;
    }
    TrussSolution {
        tensions,
        reactions: accumulated,
    }
}

/// Solve a truss problem for member tensions and support reactions.
///
/// Singular systems, empty systems and solutions that do not restore equilibrium
/// are reported as [`Analysis::Unsolvable`].
///
/// # Errors
///
/// Returns [`AnalysisError::InvalidReference`] when an edge, reaction or load names a
/// vertex outside the problem.
///
/// # Examples
/// ```
/// use trussopt::{analyze, vector, Load, TrussProblem};
///
/// // A lone bar with no supports cannot resist a load.
/// let problem = TrussProblem {
///     vertices: vec![vector(0.0, 0.0), vector(1.0, 0.0)],
///     edges: vec![(0, 1)],
///     reactions: vec![],
///     loads: vec![Load::new(1, vector(0.0, -10.0))],
/// };
/// assert!(!analyze(&problem)?.is_solved());
/// # Ok::<(), trussopt::AnalysisError>(())
/// ```
pub fn analyze(problem: &TrussProblem) -> Result<Analysis, AnalysisError> {
    problem.validate()?;
    let (matrix, load) = assemble(problem);
    let raw = match solve(&matrix, &load) {
        Ok(raw) => raw,
        Err(error) => {
            debug!(%error, "truss has no solution");
            return Ok(Analysis::Unsolvable);
        }
    };

    let scale = load.amax().max(1.0);
    let error = residual(&matrix, &raw, &load);
    // Written so that a NaN residual also fails.
    if !(error <= EQUILIBRIUM_TOLERANCE * scale) {
        debug!(residual = error, "solution does not satisfy equilibrium");
        return Ok(Analysis::Unsolvable);
    }

    Ok(Analysis::Solved(interpret(
        &raw,
        problem.vertices.len(),
        &problem.edges,
        &problem.reactions,
    )))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::errors::ReferenceKind;
    use crate::geometry::vector;
    use crate::problem::Load;

    fn three_bar() -> TrussProblem {
        TrussProblem {
            vertices: vec![vector(0.0, 0.0), vector(1.0, 0.0), vector(1.0, 1.0)],
            edges: vec![(0, 1), (1, 2), (2, 0)],
            reactions: vec![
                Reaction::new(0, Vector2::UNIT_X),
                Reaction::new(0, Vector2::UNIT_Y),
                Reaction::new(1, Vector2::UNIT_Y),
            ],
            loads: vec![Load::new(2, vector(100.0, 0.0))],
        }
    }

    #[test]
    fn three_bar_truss_matches_hand_calculation() {
        let analysis = analyze(&three_bar()).expect("valid problem");
        let solution = analysis.solution().expect("determinate truss solves");

        assert_relative_eq!(solution.tensions[0], 0.0, epsilon = 1.0e-9);
        assert_relative_eq!(solution.tensions[1], -100.0, epsilon = 1.0e-9);
        assert_relative_eq!(
            solution.tensions[2],
            100.0 * std::f64::consts::SQRT_2,
            epsilon = 1.0e-9
        );

        let pin = solution.reactions[0].expect("pin reaction");
        let roller = solution.reactions[1].expect("roller reaction");
        assert_relative_eq!(pin.x, -100.0, epsilon = 1.0e-9);
        assert_relative_eq!(pin.y, -100.0, epsilon = 1.0e-9);
        assert_relative_eq!(roller.x, 0.0);
        assert_relative_eq!(roller.y, 100.0, epsilon = 1.0e-9);
        assert_eq!(solution.reactions[2], None);

        let total = solution.total_reaction();
        assert_relative_eq!(total.x, -100.0, epsilon = 1.0e-9);
        assert_relative_eq!(total.y, 0.0, epsilon = 1.0e-9);
        assert_relative_eq!(
            solution.max_force(),
            100.0 * std::f64::consts::SQRT_2,
            epsilon = 1.0e-9
        );
    }

    #[test]
    fn free_floating_bar_is_unsolvable() {
        let problem = TrussProblem {
            vertices: vec![vector(0.0, 0.0), vector(1.0, 0.0)],
            edges: vec![(0, 1)],
            reactions: vec![],
            loads: vec![Load::new(1, vector(0.0, 50.0))],
        };
        let analysis = analyze(&problem).expect("valid problem");
        assert_eq!(analysis, Analysis::Unsolvable);
        assert_eq!(analysis.tensions(), None);
        assert_eq!(analysis.max_force(), None);
    }

    #[test]
    fn consistent_overdetermined_system_solves() {
        // Two collinear bars pulled along their axis: six equations, five unknowns.
        let problem = TrussProblem {
            vertices: vec![vector(0.0, 0.0), vector(1.0, 0.0), vector(2.0, 0.0)],
            edges: vec![(0, 1), (1, 2)],
            reactions: vec![
                Reaction::new(0, Vector2::UNIT_X),
                Reaction::new(0, Vector2::UNIT_Y),
                Reaction::new(2, Vector2::UNIT_Y),
            ],
            loads: vec![Load::new(2, vector(10.0, 0.0))],
        };
        let analysis = analyze(&problem).expect("valid problem");
        let tensions = analysis.tensions().expect("axial load is carried");
        assert_relative_eq!(tensions[0], 10.0, epsilon = 1.0e-9);
        assert_relative_eq!(tensions[1], 10.0, epsilon = 1.0e-9);
    }

    #[test]
    fn indeterminate_truss_uses_minimum_norm() {
        // Two identical bars in parallel share the load evenly.
        let problem = TrussProblem {
            vertices: vec![vector(0.0, 0.0), vector(1.0, 0.0)],
            edges: vec![(0, 1), (0, 1)],
            reactions: vec![
                Reaction::new(0, Vector2::UNIT_X),
                Reaction::new(0, Vector2::UNIT_Y),
                Reaction::new(1, Vector2::UNIT_Y),
            ],
            loads: vec![Load::new(1, vector(8.0, 0.0))],
        };
        let analysis = analyze(&problem).expect("valid problem");
        let tensions = analysis.tensions().expect("indeterminate truss solves");
        assert_relative_eq!(tensions[0], 4.0, epsilon = 1.0e-9);
        assert_relative_eq!(tensions[1], 4.0, epsilon = 1.0e-9);
    }

    #[test]
    fn unsupported_vertices_give_unsolvable_not_zero() {
        let problem = TrussProblem {
            vertices: vec![vector(0.0, 0.0)],
            ..TrussProblem::default()
        };
        assert_eq!(analyze(&problem), Ok(Analysis::Unsolvable));
        assert_eq!(analyze(&TrussProblem::default()), Ok(Analysis::Unsolvable));
    }

    #[test]
    fn invalid_references_are_fatal() {
        let mut problem = three_bar();
        problem.loads.push(Load::new(9, vector(1.0, 1.0)));
        let error = analyze(&problem).expect_err("stale vertex rejected");
        assert_eq!(
            error,
            AnalysisError::InvalidReference {
                kind: ReferenceKind::Load,
                index: 1,
                vertex: 9,
                vertex_count: 3,
            }
        );
    }
}
