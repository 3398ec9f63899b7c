//! Static course description
//!
//! Everything a trajectory needs besides its own start state: the green,
//! the hole, and the rolling constants.

use serde::{Deserialize, Serialize};

use super::geometry::{Circle, Polygon};
use super::vector::Point;
use crate::consts::*;
use crate::error::SimError;

/// How far the ball must roll toward the hole before it drops
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallDistance {
    /// Until the ball centre reaches the closest approach to the hole centre
    #[default]
    Center,
    /// As `Center`, shortened by the ball radius (the ball edge leads)
    BallEdge,
}

/// The hole
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hole {
    pub center: Point,
    /// Ball drops when its path passes closer than this to `center`
    pub capture_radius: f64,
    /// Drawn radius
    pub radius: f64,
}

impl Default for Hole {
    fn default() -> Self {
        Self {
            center: Point::new(HOLE_POS.0, HOLE_POS.1),
            capture_radius: BALL_RADIUS,
            radius: HOLE_RADIUS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Course {
    /// Walls, clockwise in screen coordinates
    pub green: Polygon,
    pub ball_radius: f64,
    /// Half the rolling deceleration (<= 0; 0 rolls forever)
    pub resistance: f64,
    /// Drag length to push speed
    pub boost_factor: f64,
    /// `None` for a course without a hole
    pub hole: Option<Hole>,
    /// Where the ball sits before the first push and after a reset
    pub start: Point,
    /// Fraction of speed kept after hitting a wall
    pub restitution: f64,
    pub fall_distance: FallDistance,
}

impl Default for Course {
    fn default() -> Self {
        Self {
            green: default_green(),
            ball_radius: BALL_RADIUS,
            resistance: RESISTANCE,
            boost_factor: BOOST_FACTOR,
            hole: Some(Hole::default()),
            start: Point::new(START_POS.0, START_POS.1),
            restitution: 1.0,
            fall_distance: FallDistance::Center,
        }
    }
}

impl Course {
    /// Capture circle of the hole, if there is one
    pub fn target(&self) -> Option<Circle> {
        self.hole.map(|hole| Circle {
            center: hole.center,
            radius: hole.capture_radius,
        })
    }

    pub fn validate(&self) -> Result<(), SimError> {
        if !(self.ball_radius > 0.0) {
            return Err(SimError::InvalidSetting(format!(
                "course ball_radius must be positive, got {}",
                self.ball_radius
            )));
        }
        if !(self.resistance <= 0.0) {
            return Err(SimError::InvalidSetting(format!(
                "course resistance must be <= 0, got {}",
                self.resistance
            )));
        }
        if !(self.restitution > 0.0 && self.restitution <= 1.0) {
            return Err(SimError::InvalidSetting(format!(
                "course restitution must be in (0, 1], got {}",
                self.restitution
            )));
        }
        if let Some(hole) = self.hole {
            if !(hole.capture_radius > 0.0) {
                return Err(SimError::InvalidSetting(format!(
                    "hole capture_radius must be positive, got {}",
                    hole.capture_radius
                )));
            }
        }
        Ok(())
    }
}

/// The built-in putting green
fn default_green() -> Polygon {
    Polygon::from_array([
        Point::new(12.0, 248.0),
        Point::new(183.0, 12.0),
        Point::new(384.0, 107.0),
        Point::new(497.0, 253.0),
        Point::new(528.0, 453.0),
        Point::new(915.0, 488.0),
        Point::new(1232.0, 428.0),
        Point::new(1275.0, 275.0),
        Point::new(1088.0, 225.0),
        Point::new(1144.0, 12.0),
        Point::new(1521.0, 80.0),
        Point::new(1672.0, 363.0),
        Point::new(1458.0, 708.0),
        Point::new(769.0, 678.0),
        Point::new(271.0, 671.0),
        Point::new(22.0, 355.0),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_course_is_valid() {
        let course = Course::default();
        assert!(course.validate().is_ok());
        assert_eq!(course.green.vertices().len(), 16);
        assert_eq!(course.green.vertices()[0], Point::new(12.0, 248.0));
        assert_eq!(course.green.vertices()[15], Point::new(22.0, 355.0));
        let target = course.target().unwrap();
        assert_eq!(target.radius, BALL_RADIUS);
    }

    #[test]
    fn test_validate_rejects_positive_resistance() {
        let course = Course {
            resistance: 5.0,
            ..Default::default()
        };
        assert!(matches!(course.validate(), Err(SimError::InvalidSetting(_))));
    }

    #[test]
    fn test_validate_rejects_bad_restitution() {
        for restitution in [0.0, 1.5, f64::NAN] {
            let course = Course {
                restitution,
                ..Default::default()
            };
            assert!(course.validate().is_err(), "restitution {restitution}");
        }
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let course: Course = serde_json::from_str(r#"{"ball_radius": 10.0, "hole": null}"#).unwrap();
        assert_eq!(course.ball_radius, 10.0);
        assert!(course.hole.is_none());
        assert_eq!(course.resistance, RESISTANCE);
        assert_eq!(course.fall_distance, FallDistance::Center);
    }

    #[test]
    fn test_fall_distance_names() {
        let mode: FallDistance = serde_json::from_str(r#""ball_edge""#).unwrap();
        assert_eq!(mode, FallDistance::BallEdge);
    }
}
