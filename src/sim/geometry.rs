//! Ray queries against the green and the hole
//!
//! Every query casts a ray from the ball centre along its (unit) direction
//! and reports how far along the ray the boundary lies. Distances are in ray
//! units, which equal pixels because trajectories always pass a unit direction.

use serde::{Deserialize, Serialize};

use super::vector::{Point, Vector};
use crate::error::SimError;

/// Half-line from `origin` along `direction`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Point,
    pub direction: Vector,
}

impl Ray {
    pub fn new(origin: Point, direction: Vector) -> Self {
        Self { origin, direction }
    }

    /// Point at parameter `t` along the ray
    #[inline]
    pub fn at(&self, t: f64) -> Point {
        self.origin + self.direction * t
    }
}

/// Circle (the hole's capture area)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
}

/// Closed polygon, clockwise in screen coordinates (y down)
///
/// The last vertex connects back to the first. Construction rejects fewer
/// than three vertices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Point>", into = "Vec<Point>")]
pub struct Polygon {
    vertices: Vec<Point>,
}

impl Polygon {
    pub fn new(vertices: Vec<Point>) -> Result<Self, SimError> {
        if vertices.len() < 3 {
            return Err(SimError::DegeneratePolygon(vertices.len()));
        }
        Ok(Self { vertices })
    }

    /// Polygon from a fixed vertex list, checked at compile time
    pub fn from_array<const N: usize>(vertices: [Point; N]) -> Self {
        const { assert!(N >= 3, "polygon needs at least 3 vertices") };
        Self {
            vertices: vertices.to_vec(),
        }
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Edges as `(start, end)` pairs, closing back to the first vertex
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Vertex average (the centroid for regular shapes)
    pub fn vertex_centroid(&self) -> Point {
        let sum = self
            .vertices
            .iter()
            .fold(Vector::ZERO, |acc, &p| acc + (p - Point::ORIGIN));
        Point::ORIGIN + sum * (1.0 / self.vertices.len() as f64)
    }
}

impl TryFrom<Vec<Point>> for Polygon {
    type Error = SimError;

    fn try_from(vertices: Vec<Point>) -> Result<Self, Self::Error> {
        Polygon::new(vertices)
    }
}

impl From<Polygon> for Vec<Point> {
    fn from(poly: Polygon) -> Self {
        poly.vertices
    }
}

/// Nearest wall along a ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallHit {
    /// Distance from the ray origin to the wall
    pub distance: f64,
    /// Unit normal of the wall, pointing away from the green
    pub normal: Vector,
}

/// Intersect a ray with the segment `start..end`
///
/// Solves `origin + t·direction = start + u·(end - start)`. Accepts `t >= 0`
/// and `u` in `[0, 1)`; the open end keeps a vertex shared by two edges from
/// being counted twice. Parallel segments never intersect.
pub fn ray_segment_intersect(ray: &Ray, start: Point, end: Point) -> Option<WallHit> {
    let edge = end - start;
    let denom = ray.direction.cross(edge);
    if denom == 0.0 {
        return None;
    }

    let to_start = start - ray.origin;
    let u = to_start.cross(ray.direction) / denom;
    if !(0.0..1.0).contains(&u) {
        return None;
    }

    let t = to_start.cross(edge) / denom;
    if t < 0.0 {
        return None;
    }

    let normal = edge.normalize()?.perpendicular();
    Some(WallHit { distance: t, normal })
}

/// Nearest wall of `poly` along `ray`
///
/// The first edge (in vertex order) wins exact distance ties. A ray starting
/// inside a closed polygon always hits a wall, so finding none means the
/// caller broke that invariant and is reported as `SimError::NoWallHit`.
pub fn polygon_bounce(poly: &Polygon, ray: &Ray) -> Result<WallHit, SimError> {
    let mut best: Option<WallHit> = None;
    for (start, end) in poly.edges() {
        if let Some(hit) = ray_segment_intersect(ray, start, end) {
            if best.is_none_or(|b| hit.distance < b.distance) {
                best = Some(hit);
            }
        }
    }

    best.ok_or(SimError::NoWallHit {
        origin: ray.origin,
        direction: ray.direction,
    })
}

/// Distance along `ray` to its closest approach to `circle.center`
///
/// Returns `Some(0.0)` when the origin is already inside the circle, and
/// `None` when the ray passes wider than the radius or the circle lies
/// behind the origin. `ray.direction` must be unit length.
pub fn circle_intersect_distance(circle: &Circle, ray: &Ray) -> Option<f64> {
    let to_center = circle.center - ray.origin;
    if to_center.magnitude() <= circle.radius {
        return Some(0.0);
    }

    let leg = to_center.dot(ray.direction);
    if leg < 0.0 {
        return None;
    }

    let perpendicular = to_center.cross(ray.direction).abs();
    (perpendicular < circle.radius).then_some(leg)
}
