//! Configuration for the topology search.
//!
//! Values not present in a configuration file keep their defaults, which reproduce
//! an 800 by 800 drawing area with two supports on the left and a load on the right.
//!
//! ```toml
//! interior_points = 5
//! jitter = 4.0
//! fitness = "force-and-geometry"
//! seed = 7
//!
//! [load]
//! x = 0.0
//! y = 250.0
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::fitness::FitnessPolicy;
use crate::geometry::{vector, Vector2};

/// Axis-aligned rectangle in which fresh interior points are sampled.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Region {
    /// Lower-left corner.
    pub min: Vector2,
    /// Upper-right corner.
    pub max: Vector2,
}

impl Region {
    /// Whether `point` lies inside the region, edges included.
    #[must_use]
    pub fn contains(&self, point: Vector2) -> bool {
        (self.min.x..=self.max.x).contains(&point.x) && (self.min.y..=self.max.y).contains(&point.y)
    }
}

impl Default for Region {
    fn default() -> Self {
        Self {
            min: vector(100.0, 100.0),
            max: vector(700.0, 700.0),
        }
    }
}

/// Tunable parameters of [`Optimizer`](crate::Optimizer).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Number of random interior points in a fresh candidate.
    pub interior_points: usize,
    /// Sampling area for new interior points.
    pub region: Region,
    /// Anchor carrying the pin support.
    pub upper_support: Vector2,
    /// Anchor restrained horizontally only.
    pub lower_support: Vector2,
    /// Anchor the load is applied to.
    pub load_point: Vector2,
    /// Force applied at `load_point`.
    pub load: Vector2,
    /// Width of the uniform jitter added to each interior coordinate per mutation.
    pub jitter: f64,
    /// Chance per mutation of deleting one interior point.
    pub delete_probability: f64,
    /// Chance per mutation of inserting new interior points.
    pub insert_probability: f64,
    /// Number of points inserted when an insertion happens.
    pub insert_count: usize,
    /// Upper bound on the total point count, anchors included.
    pub max_points: usize,
    /// Scoring policy.
    pub fitness: FitnessPolicy,
    /// Seed for the random number generator; drawn from the OS when absent.
    pub seed: Option<u64>,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            interior_points: 3,
            region: Region::default(),
            upper_support: vector(50.0, 200.0),
            lower_support: vector(50.0, 600.0),
            load_point: vector(750.0, 400.0),
            load: vector(0.0, 100.0),
            jitter: 10.0,
            delete_probability: 0.1,
            insert_probability: 0.1,
            insert_count: 1,
            max_points: 20,
            fitness: FitnessPolicy::ForceRms,
            seed: None,
        }
    }
}

impl OptimizerConfig {
    /// Check that every value is in range.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first out-of-range value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |message: String| Err(ConfigError::Invalid(message));
        for (name, probability) in [
            ("delete_probability", self.delete_probability),
            ("insert_probability", self.insert_probability),
        ] {
            if !(0.0..=1.0).contains(&probability) {
                return invalid(format!("{name} must lie in [0, 1] (received {probability})"));
            }
        }
        if !(self.jitter.is_finite() && self.jitter >= 0.0) {
            return invalid(format!(
                "jitter must be finite and non-negative (received {})",
                self.jitter
            ));
        }
        if !(self.region.min.x < self.region.max.x && self.region.min.y < self.region.max.y) {
            return invalid("region min must lie strictly below and left of max".to_owned());
        }
        if self.max_points <= crate::optimizer::ANCHOR_COUNT {
            return invalid(format!(
                "max_points must exceed the {} anchors (received {})",
                crate::optimizer::ANCHOR_COUNT,
                self.max_points
            ));
        }
        if self.insert_count == 0 {
            return invalid("insert_count must be at least 1".to_owned());
        }
        Ok(())
    }

    /// Parse and validate a TOML configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and [`ConfigError::Invalid`]
    /// for out-of-range values.
    ///
    /// # Examples
    /// ```
    /// use trussopt::{FitnessPolicy, OptimizerConfig};
    ///
    /// let config = OptimizerConfig::from_toml("fitness = \"force-and-geometry\"")?;
    /// assert_eq!(config.fitness, FitnessPolicy::ForceAndGeometry);
    /// assert_eq!(config.max_points, 20);
    /// # Ok::<(), trussopt::ConfigError>(())
    /// ```
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the file cannot be read, otherwise as
    /// [`OptimizerConfig::from_toml`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }
}
