//! Point and vector types
//!
//! Both wrap `DVec2` but are kept apart: a `Point` is a place on the green, a
//! `Vector` is a direction or displacement. Mixing them goes through the typed
//! operators below (`Point + Vector`, `Point - Point`), never `Point + Point`.

use std::ops::{Add, Mul, Neg, Sub};

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Absolute position
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Point(pub DVec2);

/// Direction or displacement
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vector(pub DVec2);

impl Point {
    pub const ORIGIN: Self = Self(DVec2::ZERO);

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self(DVec2::new(x, y))
    }

    #[inline]
    pub fn x(self) -> f64 {
        self.0.x
    }

    #[inline]
    pub fn y(self) -> f64 {
        self.0.y
    }

    /// Distance to another point
    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        (self - other).magnitude()
    }
}

impl Vector {
    pub const ZERO: Self = Self(DVec2::ZERO);

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self(DVec2::new(x, y))
    }

    #[inline]
    pub fn x(self) -> f64 {
        self.0.x
    }

    #[inline]
    pub fn y(self) -> f64 {
        self.0.y
    }

    #[inline]
    pub fn dot(self, other: Vector) -> f64 {
        self.0.dot(other.0)
    }

    /// 2D scalar cross product: `a.x * b.y - a.y * b.x`
    #[inline]
    pub fn cross(self, other: Vector) -> f64 {
        self.0.perp_dot(other.0)
    }

    #[inline]
    pub fn magnitude(self) -> f64 {
        self.0.length()
    }

    /// Unit vector in the same direction, or `None` for a zero vector
    #[inline]
    pub fn normalize(self) -> Option<Vector> {
        self.0.try_normalize().map(Vector)
    }

    /// Rotate by -90°: `(x, y) -> (y, -x)`
    ///
    /// For an edge of a clockwise polygon (screen coordinates, y down) this
    /// points away from the interior.
    #[inline]
    pub fn perpendicular(self) -> Vector {
        Vector::new(self.0.y, -self.0.x)
    }

    /// Reflect off a surface: `v - 2(v·n)n`
    ///
    /// `normal` must be unit length.
    #[inline]
    pub fn reflect(self, normal: Vector) -> Vector {
        self - normal * (2.0 * self.dot(normal))
    }
}

impl Add<Vector> for Point {
    type Output = Point;

    #[inline]
    fn add(self, rhs: Vector) -> Point {
        Point(self.0 + rhs.0)
    }
}

impl Sub for Point {
    type Output = Vector;

    #[inline]
    fn sub(self, rhs: Point) -> Vector {
        Vector(self.0 - rhs.0)
    }
}

impl Add for Vector {
    type Output = Vector;

    #[inline]
    fn add(self, rhs: Vector) -> Vector {
        Vector(self.0 + rhs.0)
    }
}

impl Sub for Vector {
    type Output = Vector;

    #[inline]
    fn sub(self, rhs: Vector) -> Vector {
        Vector(self.0 - rhs.0)
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;

    #[inline]
    fn mul(self, rhs: f64) -> Vector {
        Vector(self.0 * rhs)
    }
}

impl Neg for Vector {
    type Output = Vector;

    #[inline]
    fn neg(self) -> Vector {
        Vector(-self.0)
    }
}
