//! Game state and the committed trajectory register
//!
//! `GameState` holds the one trajectory every observer reads. It only changes
//! through `commit`, which swaps in a transition computed from the previous
//! committed value, so nothing ever sees a half-built trajectory.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::course::Course;
use super::resolver::Transition;
use super::tick::Release;
use super::trajectory::Trajectory;
use super::vector::{Point, Vector};

/// Coarse motion phase reported to the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball in motion
    Running,
    /// Ball at rest, in the hole, or out of play
    Stopped,
}

/// Things that happened during a tick, in order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Reset,
    Pushed { time: f64, velocity: Vector },
    Bounced { time: f64, point: Point },
    Fell { time: f64 },
    PhaseChanged(GamePhase),
}

/// Emits a phase only when it differs from the last one observed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseTracker {
    last: Option<GamePhase>,
}

impl PhaseTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `phase`; returns it if it is a change
    pub fn observe(&mut self, phase: GamePhase) -> Option<GamePhase> {
        if self.last == Some(phase) {
            return None;
        }
        self.last = Some(phase);
        Some(phase)
    }

    pub fn current(&self) -> Option<GamePhase> {
        self.last
    }
}

/// Complete putting state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub course: Course,
    /// Committed trajectory
    trajectory: Trajectory,
    /// Ball has dropped into the hole
    finished: bool,
    pub phase: PhaseTracker,
    /// Releases received but not yet applied, oldest first
    pub pending_releases: VecDeque<Release>,
    /// Number of committed transitions
    pub transactions: u64,
}

impl GameState {
    /// Ball at rest on the course start position at time 0
    pub fn new(course: Course) -> Self {
        let trajectory = Trajectory::at_rest(0.0, course.start);
        Self {
            course,
            trajectory,
            finished: false,
            phase: PhaseTracker::new(),
            pending_releases: VecDeque::new(),
            transactions: 0,
        }
    }

    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Ball position at time `t`
    pub fn ball_at(&self, t: f64) -> Point {
        self.trajectory.pos_at(t)
    }

    /// Phase at time `t`
    pub fn phase_at(&self, t: f64) -> GamePhase {
        if self.finished || self.trajectory.is_at_rest(t) {
            GamePhase::Stopped
        } else {
            GamePhase::Running
        }
    }

    /// Swap in the next trajectory
    ///
    /// Returns the event describing the change, `None` for `Ignored`.
    pub fn commit(&mut self, transition: Transition) -> Option<GameEvent> {
        let (next, event) = match transition {
            Transition::Ignored => return None,
            Transition::Fell(next) => {
                self.finished = true;
                let event = GameEvent::Fell { time: next.t0() };
                (next, event)
            }
            Transition::Pushed(next) => {
                let event = GameEvent::Pushed {
                    time: next.t0(),
                    velocity: next.v0,
                };
                (next, event)
            }
            Transition::Bounced(next) => {
                let event = GameEvent::Bounced {
                    time: next.t0(),
                    point: next.p0,
                };
                (next, event)
            }
        };
        self.trajectory = next;
        self.transactions += 1;
        Some(event)
    }

    /// Put the ball back on the start position at time `t`
    ///
    /// Releases still waiting from earlier ticks are dropped.
    pub fn reset(&mut self, t: f64) {
        self.trajectory = Trajectory::at_rest(t, self.course.start);
        self.finished = false;
        self.pending_releases.clear();
        self.transactions += 1;
    }
}
