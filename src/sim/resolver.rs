//! Event resolution
//!
//! Decides which stimulus replaces the current trajectory when several are
//! due at the same instant. Priority is fall > push > bounce, and once the
//! ball has fallen nothing moves it until a reset.

use super::course::Course;
use super::trajectory::Trajectory;
use super::vector::{Point, Vector};
use crate::error::SimError;

/// A user push: the ball at `position` is given velocity `impulse` at `time`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Push {
    pub time: f64,
    pub position: Point,
    pub impulse: Vector,
}

impl Push {
    /// Push from a rubber-band drag released at `release`
    ///
    /// The ball flies away from the release point, `boost` times the drag length.
    pub fn from_release(time: f64, ball: Point, release: Point, boost: f64) -> Self {
        Self {
            time,
            position: ball,
            impulse: (ball - release) * boost,
        }
    }
}

/// Stimuli due at one instant
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Stimuli {
    pub push: Option<Push>,
    /// The current trajectory's bounce is due
    pub bounce: bool,
    /// The current trajectory's fall is due
    pub fall: bool,
}

/// Outcome of resolving one instant
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    Fell(Trajectory),
    Pushed(Trajectory),
    Bounced(Trajectory),
    /// Nothing applies (ball already in the hole, or no matching prediction)
    Ignored,
}

/// Pick the winning stimulus and build the next trajectory
///
/// Reads only `current` and `finished`; the caller commits the result.
pub fn resolve(
    current: &Trajectory,
    finished: bool,
    stimuli: &Stimuli,
    course: &Course,
) -> Result<Transition, SimError> {
    if finished {
        return Ok(Transition::Ignored);
    }

    if stimuli.fall {
        if let Some(fall) = current.fall {
            return Ok(Transition::Fell(Trajectory::at_rest(fall.time, fall.point)));
        }
    }

    if let Some(push) = stimuli.push {
        let next = Trajectory::new(push.time, push.position, push.impulse, course)?;
        return Ok(Transition::Pushed(next));
    }

    if stimuli.bounce {
        if let Some(bounce) = current.bounce {
            let next = Trajectory::new(bounce.time, bounce.point, bounce.reflection, course)?;
            return Ok(Transition::Bounced(next));
        }
    }

    Ok(Transition::Ignored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::course::Hole;
    use crate::sim::geometry::Polygon;

    fn course() -> Course {
        Course {
            green: Polygon::new(vec![
                Point::new(0.0, 0.0),
                Point::new(100.0, 0.0),
                Point::new(100.0, 100.0),
                Point::new(0.0, 100.0),
            ])
            .unwrap(),
            ball_radius: 10.0,
            resistance: 0.0,
            hole: Some(Hole {
                center: Point::new(50.0, 20.0),
                capture_radius: 10.0,
                radius: 12.0,
            }),
            ..Default::default()
        }
    }

    /// Rolling right toward the wall, hole far off the path
    fn rolling(course: &Course) -> Trajectory {
        Trajectory::new(0.0, Point::new(50.0, 50.0), Vector::new(20.0, 0.0), course).unwrap()
    }

    #[test]
    fn test_push_from_release() {
        let push = Push::from_release(1.0, Point::new(10.0, 10.0), Point::new(5.0, 10.0), 4.0);
        assert_eq!(push.impulse, Vector::new(20.0, 0.0));
        assert_eq!(push.position, Point::new(10.0, 10.0));
    }

    #[test]
    fn test_push_beats_bounce() {
        let course = course();
        let current = rolling(&course);
        let bounce_time = current.bounce.unwrap().time;
        let push = Push {
            time: bounce_time,
            position: current.pos_at(bounce_time),
            impulse: Vector::new(0.0, 5.0),
        };
        let stimuli = Stimuli {
            push: Some(push),
            bounce: true,
            fall: false,
        };
        match resolve(&current, false, &stimuli, &course).unwrap() {
            Transition::Pushed(next) => assert_eq!(next.v0, Vector::new(0.0, 5.0)),
            other => panic!("expected push, got {other:?}"),
        }
    }

    #[test]
    fn test_bounce_builds_reflected_trajectory() {
        let course = course();
        let current = rolling(&course);
        let stimuli = Stimuli {
            bounce: true,
            ..Default::default()
        };
        match resolve(&current, false, &stimuli, &course).unwrap() {
            Transition::Bounced(next) => {
                assert!((next.t0() - 2.0).abs() < 1e-9);
                assert!((next.p0.x() - 90.0).abs() < 1e-9);
                assert!((next.direction - Vector::new(-1.0, 0.0)).magnitude() < 1e-9);
            }
            other => panic!("expected bounce, got {other:?}"),
        }
    }

    #[test]
    fn test_fall_beats_push() {
        let course = course();
        // Rolling straight up into the hole
        let current =
            Trajectory::new(0.0, Point::new(50.0, 60.0), Vector::new(0.0, -20.0), &course).unwrap();
        let fall = current.fall.unwrap();
        let stimuli = Stimuli {
            push: Some(Push {
                time: fall.time,
                position: current.pos_at(fall.time),
                impulse: Vector::new(5.0, 0.0),
            }),
            bounce: false,
            fall: true,
        };
        match resolve(&current, false, &stimuli, &course).unwrap() {
            Transition::Fell(next) => {
                assert_eq!(next.p0, Point::new(50.0, 20.0));
                assert_eq!(next.pos_at(100.0), Point::new(50.0, 20.0));
                assert!(next.next_event().is_none());
            }
            other => panic!("expected fall, got {other:?}"),
        }
    }

    #[test]
    fn test_finished_ignores_everything() {
        let course = course();
        let current = rolling(&course);
        let stimuli = Stimuli {
            push: Some(Push {
                time: 1.0,
                position: current.pos_at(1.0),
                impulse: Vector::new(1.0, 1.0),
            }),
            bounce: true,
            fall: true,
        };
        assert_eq!(resolve(&current, true, &stimuli, &course).unwrap(), Transition::Ignored);
    }

    #[test]
    fn test_due_flag_without_prediction_is_ignored() {
        let course = course();
        let current = Trajectory::at_rest(0.0, Point::new(50.0, 50.0));
        let stimuli = Stimuli {
            push: None,
            bounce: true,
            fall: true,
        };
        assert_eq!(resolve(&current, false, &stimuli, &course).unwrap(), Transition::Ignored);
    }
}
