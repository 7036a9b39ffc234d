//! Stochastic topology search.
//!
//! Each [`Optimizer::tick`] proposes a point layout, triangulates it, solves the
//! resulting truss and keeps the layout only if it rates strictly better than the
//! best one so far. The last [`ANCHOR_COUNT`] points of every layout are the
//! upper support, the lower support and the load point, in that order, and are
//! never moved.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{info, trace};

use crate::config::OptimizerConfig;
use crate::errors::AnalysisError;
use crate::geometry::{vector, Vector2};
use crate::problem::{Edge, Load, Reaction, TrussProblem};
use crate::solution::analyze;
use crate::triangulation::{mesh_edges, Delaunay, Triangulate};

/// Number of fixed points at the end of every layout.
pub const ANCHOR_COUNT: usize = 3;

/// A rated point layout.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Candidate {
    /// Interior points followed by the three anchors.
    pub points: Vec<Vector2>,
    /// Triangulated members.
    pub edges: Vec<Edge>,
    /// Fitness; `+∞` when unsolvable.
    pub rating: f64,
}

impl Candidate {
    /// The empty candidate every search starts from.
    #[must_use]
    pub fn unrated() -> Self {
        Self {
            points: Vec::new(),
            edges: Vec::new(),
            rating: f64::INFINITY,
        }
    }

    /// Whether this candidate has a finite rating.
    #[must_use]
    pub fn is_rated(&self) -> bool {
        self.rating.is_finite()
    }
}

/// Search progress carried from one tick to the next.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OptimizerState {
    /// Best candidate accepted so far.
    pub best: Candidate,
    /// Ticks run since the last reset.
    pub ticks: u64,
    /// Ticks that replaced `best`.
    pub accepted: u64,
}

impl Default for OptimizerState {
    fn default() -> Self {
        Self {
            best: Candidate::unrated(),
            ticks: 0,
            accepted: 0,
        }
    }
}

impl OptimizerState {
    /// Forget the best candidate so the next tick starts from a fresh layout.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Result of a single tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TickOutcome {
    /// The candidate replaced the best one.
    Accepted {
        /// Rating of the new best candidate.
        rating: f64,
    },
    /// The candidate was discarded.
    Rejected {
        /// Rating of the discarded candidate.
        rating: f64,
    },
}

impl TickOutcome {
    /// Whether the tick improved the best candidate.
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, TickOutcome::Accepted { .. })
    }
}

/// Random search over triangulated point layouts.
///
/// The configuration is expected to pass [`OptimizerConfig::validate`]; an empty
/// sampling region or a probability outside `[0, 1]` panics when sampled.
///
/// # Examples
/// ```
/// use trussopt::{Optimizer, OptimizerConfig, OptimizerState};
///
/// let config = OptimizerConfig {
///     seed: Some(3),
///     ..OptimizerConfig::default()
/// };
/// let mut optimizer = Optimizer::new(config);
/// let mut state = OptimizerState::default();
/// optimizer.run(&mut state, 50)?;
/// assert_eq!(state.ticks, 50);
/// assert!(state.best.rating >= 0.0);
/// # Ok::<(), trussopt::AnalysisError>(())
/// ```
#[derive(Debug)]
pub struct Optimizer<T = Delaunay> {
    /// Search parameters.
    config: OptimizerConfig,
    /// Source of candidate adjacency.
    triangulator: T,
    /// Random number generator for proposals.
    rng: StdRng,
}

impl Optimizer<Delaunay> {
    /// Create an optimizer using Delaunay triangulation.
    #[must_use]
    pub fn new(config: OptimizerConfig) -> Self {
        Self::with_triangulator(config, Delaunay)
    }
}

impl<T: Triangulate> Optimizer<T> {
    /// Create an optimizer with a custom triangulator.
    #[must_use]
    pub fn with_triangulator(config: OptimizerConfig, triangulator: T) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            config,
            triangulator,
            rng,
        }
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Run one propose, rate, accept-or-reject step against `state`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError`] when the triangulator produces edges that refer to
    /// points outside the layout. `state` is left untouched in that case.
    pub fn tick(&mut self, state: &mut OptimizerState) -> Result<TickOutcome, AnalysisError> {
        let points = self.propose(&state.best);
        let candidate = self.rate(points)?;
        state.ticks += 1;

        let rating = candidate.rating;
        if rating < state.best.rating {
            info!(
                tick = state.ticks,
                rating,
                points = candidate.points.len(),
                edges = candidate.edges.len(),
                "accepted better truss"
            );
            state.best = candidate;
            state.accepted += 1;
            Ok(TickOutcome::Accepted { rating })
        } else {
            trace!(tick = state.ticks, rating, "rejected candidate");
            Ok(TickOutcome::Rejected { rating })
        }
    }

    /// Run `ticks` consecutive ticks and return how many were accepted.
    ///
    /// # Errors
    ///
    /// Stops at the first tick that fails; see [`Optimizer::tick`].
    pub fn run(&mut self, state: &mut OptimizerState, ticks: u64) -> Result<u64, AnalysisError> {
        let mut accepted = 0;
        for _ in 0..ticks {
            if self.tick(state)?.is_accepted() {
                accepted += 1;
            }
        }
        Ok(accepted)
    }

    /// Next layout to try: a fresh one until something has been accepted, then a
    /// mutation of `best`.
    pub fn propose(&mut self, best: &Candidate) -> Vec<Vector2> {
        if best.is_rated() && best.points.len() >= ANCHOR_COUNT {
            self.mutate(&best.points)
        } else {
            self.generate()
        }
    }

    /// Fresh random interior points followed by the anchors.
    pub fn generate(&mut self) -> Vec<Vector2> {
        let mut points: Vec<Vector2> = (0..self.config.interior_points)
            .map(|_| self.random_interior_point())
            .collect();
        points.extend(self.anchors());
        points
    }

    /// Jitter, and occasionally delete or insert, the interior points of `points`.
    ///
    /// The trailing anchors are copied unchanged.
    pub fn mutate(&mut self, points: &[Vector2]) -> Vec<Vector2> {
        let split = points.len().saturating_sub(ANCHOR_COUNT);
        let half = self.config.jitter / 2.0;
        let mut mutated: Vec<Vector2> = points[..split]
            .iter()
            .map(|&point| point + vector(self.jitter(half), self.jitter(half)))
            .collect();

        if !mutated.is_empty() && self.rng.gen_bool(self.config.delete_probability) {
            let index = self.rng.gen_range(0..mutated.len());
            mutated.remove(index);
        }

        let total = mutated.len() + ANCHOR_COUNT;
        if total < self.config.max_points && self.rng.gen_bool(self.config.insert_probability) {
            let count = self.config.insert_count.min(self.config.max_points - total);
            let inserted: Vec<Vector2> = (0..count).map(|_| self.random_interior_point()).collect();
            mutated.splice(0..0, inserted);
        }

        mutated.extend_from_slice(&points[split..]);
        mutated
    }

    /// Triangulate, solve and score a layout.
    ///
    /// A layout too short to hold the anchors rates `+∞`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidReference`] when the triangulator names a point
    /// that is not part of `points`.
    pub fn rate(&self, points: Vec<Vector2>) -> Result<Candidate, AnalysisError> {
        if points.len() < ANCHOR_COUNT {
            return Ok(Candidate {
                points,
                ..Candidate::unrated()
            });
        }
        let edges = mesh_edges(&self.triangulator.triangulate(&points));
        let problem = build_problem(&points, &edges, self.config.load);
        let analysis = analyze(&problem)?;
        let rating = self
            .config
            .fitness
            .evaluate(&points, &edges, analysis.tensions());
        Ok(Candidate {
            points,
            edges,
            rating,
        })
    }

    /// The three anchors in their fixed order.
    fn anchors(&self) -> [Vector2; ANCHOR_COUNT] {
        [
            self.config.upper_support,
            self.config.lower_support,
            self.config.load_point,
        ]
    }

    /// Uniform point inside the sampling region.
    fn random_interior_point(&mut self) -> Vector2 {
        let region = self.config.region;
        vector(
            self.rng.gen_range(region.min.x..region.max.x),
            self.rng.gen_range(region.min.y..region.max.y),
        )
    }

    /// Uniform offset in `[-half, half]`.
    fn jitter(&mut self, half: f64) -> f64 {
        if half > 0.0 {
            self.rng.gen_range(-half..=half)
        } else {
            0.0
        }
    }
}

/// Truss problem for a layout whose last three points are the anchors.
///
/// The upper support is pinned, the lower support rolls vertically and `load` acts
/// on the load point.
///
/// # Panics
///
/// Panics when `points` holds fewer than [`ANCHOR_COUNT`] entries.
///
/// # Examples
/// ```
/// use trussopt::{build_problem, vector};
///
/// let points = [vector(0.0, 0.0), vector(0.0, 2.0), vector(2.0, 1.0)];
/// let problem = build_problem(&points, &[(0, 1), (1, 2), (2, 0)], vector(0.0, -5.0));
/// assert_eq!(problem.reactions.len(), 3);
/// assert_eq!(problem.loads[0].vertex, 2);
/// ```
#[must_use]
pub fn build_problem(points: &[Vector2], edges: &[Edge], load: Vector2) -> TrussProblem {
    assert!(
        points.len() >= ANCHOR_COUNT,
        "layout of {} points cannot hold the {ANCHOR_COUNT} anchors",
        points.len()
    );
    let n = points.len();
    let (upper, lower, load_point) = (n - 3, n - 2, n - 1);
    TrussProblem {
        vertices: points.to_vec(),
        edges: edges.to_vec(),
        reactions: vec![
            Reaction::new(upper, Vector2::UNIT_X),
            Reaction::new(upper, Vector2::UNIT_Y),
            Reaction::new(lower, Vector2::UNIT_X),
        ],
        loads: vec![Load::new(load_point, load)],
    }
}
