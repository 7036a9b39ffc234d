//! Scalar ratings of candidate trusses. Lower is better.

use serde::{Deserialize, Serialize};

use crate::geometry::Vector2;
use crate::problem::{edge_lengths, Edge};

/// Weight of the longest member in [`FitnessPolicy::ForceAndGeometry`].
const LONGEST_MEMBER_WEIGHT: f64 = 2.0;
/// Weight of the total member length in [`FitnessPolicy::ForceAndGeometry`].
const TOTAL_LENGTH_WEIGHT: f64 = 0.01;

/// How a solved candidate is scored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FitnessPolicy {
    /// Root of the summed squared tensions.
    #[default]
    ForceRms,
    /// Peak tension plus weighted longest and total member length.
    ForceAndGeometry,
}

impl FitnessPolicy {
    /// Rate a candidate; `tensions` is `None` when the truss could not be solved.
    ///
    /// Unsolvable candidates always rate `+∞`.
    ///
    /// # Examples
    /// ```
    /// use trussopt::{vector, FitnessPolicy};
    ///
    /// let points = [vector(0.0, 0.0), vector(3.0, 4.0)];
    /// let rating = FitnessPolicy::ForceRms.evaluate(&points, &[(0, 1)], Some(&[-2.0]));
    /// assert_eq!(rating, 2.0);
    /// assert_eq!(FitnessPolicy::ForceRms.evaluate(&points, &[(0, 1)], None), f64::INFINITY);
    /// ```
    #[must_use]
    pub fn evaluate(self, points: &[Vector2], edges: &[Edge], tensions: Option<&[f64]>) -> f64 {
        let Some(tensions) = tensions else {
            return f64::INFINITY;
        };
        let rating = match self {
            FitnessPolicy::ForceRms => force_rms(tensions),
            FitnessPolicy::ForceAndGeometry => force_and_geometry(points, edges, tensions),
        };
        if rating.is_nan() {
            f64::INFINITY
        } else {
            rating
        }
    }
}

/// `sqrt(Σ tᵢ²)`
fn force_rms(tensions: &[f64]) -> f64 {
    tensions.iter().map(|t| t * t).sum::<f64>().sqrt()
}

/// `max|tᵢ| + 2 max(lᵢ) + 0.01 Σ lᵢ`
fn force_and_geometry(points: &[Vector2], edges: &[Edge], tensions: &[f64]) -> f64 {
    let peak_force = tensions.iter().fold(0.0, |max: f64, t| max.max(t.abs()));
    let lengths = edge_lengths(points, edges);
    let longest = lengths.iter().fold(0.0, |max: f64, &l| max.max(l));
    let total: f64 = lengths.iter().sum();
    peak_force + LONGEST_MEMBER_WEIGHT * longest + TOTAL_LENGTH_WEIGHT * total
}
