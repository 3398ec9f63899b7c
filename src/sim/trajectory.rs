//! Ball trajectories on the green
//!
//! A `Trajectory` describes the ball's motion from its creation time onward:
//! a straight line from `p0` along `direction`, with the distance rolled given
//! by a decelerating `Signal`. On construction it predicts the next wall
//! bounce and the fall into the hole, if either happens before the ball stops.
//!
//! Trajectories are immutable. A push, bounce or fall produces a new one.

use serde::{Deserialize, Serialize};

use super::course::{Course, FallDistance};
use super::geometry::{Ray, circle_intersect_distance, polygon_bounce};
use super::signal::Signal;
use super::vector::{Point, Vector};
use crate::consts::TIME_QUANTUM;
use crate::error::SimError;

/// Predicted wall contact
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounce {
    /// Absolute time of contact
    pub time: f64,
    /// Ball centre at contact
    pub point: Point,
    /// Velocity leaving the wall
    pub reflection: Vector,
}

/// Predicted drop into the hole
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fall {
    pub time: f64,
    /// Where the ball comes to rest (the hole centre)
    pub point: Point,
}

/// Whichever prediction fires first
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PredictedEvent {
    Bounce(Bounce),
    Fall(Fall),
}

impl PredictedEvent {
    pub fn time(&self) -> f64 {
        match self {
            PredictedEvent::Bounce(b) => b.time,
            PredictedEvent::Fall(f) => f.time,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    /// Start position
    pub p0: Point,
    /// Start velocity
    pub v0: Vector,
    /// Unit direction of travel (zero when at rest)
    pub direction: Vector,
    /// Distance along `direction` over time
    pub signal: Signal,
    /// Time the ball rolls to a stop (infinite without resistance)
    pub stop_time: f64,
    pub bounce: Option<Bounce>,
    pub fall: Option<Fall>,
}

impl Trajectory {
    /// Motion starting at `t0` from `p0` with velocity `v0`
    ///
    /// Fails only if `p0` is outside the green, in which case no wall can be
    /// found ahead of the ball.
    pub fn new(t0: f64, p0: Point, v0: Vector, course: &Course) -> Result<Self, SimError> {
        let Some(direction) = v0.normalize() else {
            return Ok(Self::at_rest(t0, p0));
        };

        let speed = v0.magnitude();
        let signal = Signal::new(t0, course.resistance, speed, 0.0);
        let stop_time = match signal.when_velocity_zero() {
            Some(t) if t >= t0 => t,
            _ => f64::INFINITY,
        };
        // Nothing happens to a ball that has already stopped
        let before_stop = |t: &f64| *t <= stop_time;

        let ray = Ray::new(p0, direction);

        let fall = course.target().and_then(|target| {
            let distance = circle_intersect_distance(&target, &ray)?;
            let time = match course.fall_distance {
                FallDistance::BallEdge if distance > course.ball_radius => {
                    signal.when(distance - course.ball_radius)
                }
                // Edge already over the hole; a ball starting inside it (distance 0) does not drop
                FallDistance::BallEdge if distance > 0.0 => Some(t0 + TIME_QUANTUM),
                _ => signal.when(distance),
            }
            .filter(before_stop)?;
            Some(Fall {
                time,
                point: target.center,
            })
        });

        let hit = polygon_bounce(&course.green, &ray)?;
        // The ball's edge touches the wall, not its centre
        let distance = hit.distance - course.ball_radius;
        let bounce_time = if distance > 0.0 {
            signal.when(distance)
        } else {
            // Already touching the wall ahead (a corner right after a bounce)
            Some(t0 + TIME_QUANTUM)
        };
        let bounce = bounce_time.filter(before_stop).map(|time| {
            let incident = direction * signal.velocity_at(time);
            Bounce {
                time,
                point: ray.at(distance.max(0.0)),
                reflection: incident.reflect(hit.normal) * course.restitution,
            }
        });

        // A wall in the way blocks the shot
        let fall = match (bounce, fall) {
            (Some(b), Some(f)) if b.time < f.time => None,
            (_, fall) => fall,
        };

        log::debug!(
            "trajectory t0={t0:.3} p0=({:.1}, {:.1}) speed={speed:.1} stop={stop_time:.3} bounce={:?} fall={:?}",
            p0.x(),
            p0.y(),
            bounce.map(|b| b.time),
            fall.map(|f| f.time),
        );

        Ok(Self {
            p0,
            v0,
            direction,
            signal,
            stop_time,
            bounce,
            fall,
        })
    }

    /// Ball sitting still at `p0` from `t0` onward
    pub fn at_rest(t0: f64, p0: Point) -> Self {
        Self {
            p0,
            v0: Vector::ZERO,
            direction: Vector::ZERO,
            signal: Signal::new(t0, 0.0, 0.0, 0.0),
            stop_time: t0,
            bounce: None,
            fall: None,
        }
    }

    /// Creation time
    #[inline]
    pub fn t0(&self) -> f64 {
        self.signal.t0
    }

    /// Ball position at time `t` (frozen from `stop_time` on)
    pub fn pos_at(&self, t: f64) -> Point {
        let t = t.min(self.stop_time);
        self.p0 + self.direction * self.signal.position_at(t)
    }

    /// Ball velocity at time `t`
    pub fn velocity_at(&self, t: f64) -> Vector {
        if self.is_at_rest(t) {
            return Vector::ZERO;
        }
        self.direction * self.signal.velocity_at(t)
    }

    pub fn is_at_rest(&self, t: f64) -> bool {
        t >= self.stop_time
    }

    /// Earliest predicted event; a fall wins a tie with a bounce
    pub fn next_event(&self) -> Option<PredictedEvent> {
        match (self.bounce, self.fall) {
            (Some(b), Some(f)) if b.time < f.time => Some(PredictedEvent::Bounce(b)),
            (_, Some(f)) => Some(PredictedEvent::Fall(f)),
            (Some(b), None) => Some(PredictedEvent::Bounce(b)),
            (None, None) => None,
        }
    }
}
