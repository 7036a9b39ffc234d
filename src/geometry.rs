//! Fundamental geometric types for truss modelling.

use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use nalgebra as na;
use serde::{Deserialize, Serialize};

/// Two dimensional vector used both as a position and as a direction or force.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector2 {
    /// Component along the global X axis.
    pub x: f64,
    /// Component along the global Y axis.
    pub y: f64,
}

impl Vector2 {
    /// The zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0);
    /// Unit vector along the global X axis.
    pub const UNIT_X: Self = Self::new(1.0, 0.0);
    /// Unit vector along the global Y axis.
    pub const UNIT_Y: Self = Self::new(0.0, 1.0);

    /// Create a [`Vector2`] with explicit components.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Dot product.
    #[must_use]
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Scalar (z component of the) cross product.
    ///
    /// # Examples
    /// ```
    /// use trussopt::Vector2;
    ///
    /// assert_eq!(Vector2::UNIT_X.cross(Vector2::UNIT_Y), 1.0);
    /// ```
    #[must_use]
    pub fn cross(self, other: Self) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Euclidean length.
    #[must_use]
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        (other - self).length()
    }

    /// Vector of unit length pointing the same way.
    ///
    /// The zero vector has no direction and yields non-finite components.
    ///
    /// # Examples
    /// ```
    /// use trussopt::vector;
    ///
    /// let unit = vector(3.0, 4.0).unit();
    /// assert!((unit.x - 0.6).abs() < 1.0e-12);
    /// assert!((unit.y - 0.8).abs() < 1.0e-12);
    /// ```
    #[must_use]
    pub fn unit(self) -> Self {
        self / self.length()
    }

    /// Counter-clockwise perpendicular of the same length.
    ///
    /// # Examples
    /// ```
    /// use trussopt::{vector, Vector2};
    ///
    /// assert_eq!(Vector2::UNIT_X.normal(), Vector2::UNIT_Y);
    /// assert_eq!(vector(3.0, 4.0).normal(), vector(-4.0, 3.0));
    /// ```
    #[must_use]
    pub fn normal(self) -> Self {
        Self::new(-self.y, self.x)
    }

    /// Projection of `self` onto the line spanned by `onto`.
    ///
    /// Projecting onto the zero vector yields non-finite components.
    ///
    /// # Examples
    /// ```
    /// use trussopt::vector;
    ///
    /// let projected = vector(3.0, 4.0).project(vector(2.0, 0.0));
    /// assert_eq!(projected, vector(3.0, 0.0));
    /// ```
    #[must_use]
    pub fn project(self, onto: Self) -> Self {
        onto * (self.dot(onto) / onto.dot(onto))
    }

    /// Convert into an algebraic vector.
    #[must_use]
    pub fn to_vector(self) -> na::Vector2<f64> {
        na::Vector2::new(self.x, self.y)
    }

    /// Whether both components are finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<na::Vector2<f64>> for Vector2 {
    fn from(value: na::Vector2<f64>) -> Self {
        Self::new(value.x, value.y)
    }
}

impl From<Vector2> for na::Vector2<f64> {
    fn from(value: Vector2) -> Self {
        value.to_vector()
    }
}

impl From<(f64, f64)> for Vector2 {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl Add for Vector2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vector2 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Vector2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Vector2 {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Mul<f64> for Vector2 {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f64> for Vector2 {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Vector2 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

/// Convenience helper for creating [`Vector2`] instances.
///
/// # Examples
/// ```
/// use trussopt::vector;
///
/// let load = vector(100.0, 0.0);
/// assert_eq!(load.x, 100.0);
/// ```
#[must_use]
pub const fn vector(x: f64, y: f64) -> Vector2 {
    Vector2::new(x, y)
}
