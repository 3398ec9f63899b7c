//! Free-fall arena
//!
//! A ball thrown sideways in a box under gravity. Each axis has a linear
//! velocity signal and the position signal obtained by integrating it.
//! Hitting a wall replaces the velocity signal (reversed, scaled by
//! restitution) and the position continues from where it was.
//!
//! With restitution below one the floor bounces shrink until the next one is
//! closer than the time quantum; the ball then drops through the floor and
//! the arena reports `Stopped`.

use serde::{Deserialize, Serialize};

use super::signal::Signal;
use super::state::{GameEvent, GamePhase, PhaseTracker};
use super::vector::Point;
use crate::consts::*;
use crate::error::SimError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaSettings {
    pub width: f64,
    pub height: f64,
    pub ball_radius: f64,
    /// Outline width, kept clear of the walls too
    pub ball_border: f64,
    /// Initial horizontal speed (px/s, positive is right)
    pub speed_x: f64,
    /// Downward acceleration (px/s²)
    pub gravity: f64,
    pub restitution: f64,
}

impl Default for ArenaSettings {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
            ball_radius: ARENA_BALL_RADIUS,
            ball_border: ARENA_BALL_BORDER,
            speed_x: ARENA_SPEED_X,
            gravity: GRAVITY,
            restitution: RESTITUTION,
        }
    }
}

impl ArenaSettings {
    /// Leftmost ball centre
    pub fn left_wall(&self) -> f64 {
        self.ball_radius + self.ball_border
    }

    pub fn right_wall(&self) -> f64 {
        self.width - self.ball_radius - self.ball_border
    }

    pub fn floor(&self) -> f64 {
        self.height - self.ball_radius - self.ball_border
    }

    /// Starting height of the ball centre
    pub fn roof(&self) -> f64 {
        self.ball_radius + self.ball_border
    }

    pub fn validate(&self) -> Result<(), SimError> {
        if !(self.ball_radius > 0.0) {
            return Err(SimError::InvalidSetting(format!(
                "arena ball_radius must be positive, got {}",
                self.ball_radius
            )));
        }
        if !(self.right_wall() > self.left_wall() && self.floor() > self.roof()) {
            return Err(SimError::InvalidSetting(format!(
                "arena {}x{} is too small for a ball of radius {}",
                self.width, self.height, self.ball_radius
            )));
        }
        if !(self.restitution > 0.0 && self.restitution <= 1.0) {
            return Err(SimError::InvalidSetting(format!(
                "arena restitution must be in (0, 1], got {}",
                self.restitution
            )));
        }
        Ok(())
    }
}

/// Which way a bounce turns the ball
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

/// Ball in the free-fall arena
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arena {
    pub settings: ArenaSettings,
    vel_x: Signal,
    vel_y: Signal,
    pos_x: Signal,
    pos_y: Signal,
    pub phase: PhaseTracker,
}

impl Arena {
    /// Ball launched from the top-left corner at time `t0`
    pub fn new(settings: ArenaSettings, t0: f64) -> Result<Self, SimError> {
        settings.validate()?;

        let gravity = Signal::new(t0, 0.0, 0.0, settings.gravity);
        let vel_x = Signal::new(t0, 0.0, 0.0, settings.speed_x);
        let vel_y = gravity.integrate(0.0)?;
        let pos_x = vel_x.integrate(settings.left_wall())?;
        let pos_y = vel_y.integrate(settings.roof())?;

        Ok(Self {
            settings,
            vel_x,
            vel_y,
            pos_x,
            pos_y,
            phase: PhaseTracker::new(),
        })
    }

    /// Ball centre at time `t`
    pub fn position_at(&self, t: f64) -> Point {
        Point::new(self.pos_x.position_at(t), self.pos_y.position_at(t))
    }

    /// Phase at time `t`: stopped once the ball has dropped well below the floor
    pub fn phase_at(&self, t: f64) -> GamePhase {
        if self.pos_y.position_at(t) > self.settings.floor() + 2.0 * self.settings.ball_radius {
            GamePhase::Stopped
        } else {
            GamePhase::Running
        }
    }

    /// Earliest wall contact; the left wall wins a tie with the right
    fn next_bounce(&self) -> Option<(f64, Axis)> {
        let left = self.pos_x.when(self.settings.left_wall());
        let right = self.pos_x.when(self.settings.right_wall());
        let x = match (left, right) {
            (Some(l), Some(r)) => Some(l.min(r)),
            (l, r) => l.or(r),
        };
        let y = self.pos_y.when(self.settings.floor());

        match (x, y) {
            (Some(tx), Some(ty)) if ty < tx => Some((ty, Axis::Y)),
            (Some(tx), _) => Some((tx, Axis::X)),
            (None, Some(ty)) => Some((ty, Axis::Y)),
            (None, None) => None,
        }
    }

    /// Reverse one axis at time `t`
    fn bounce(&mut self, t: f64, axis: Axis) -> Result<(), SimError> {
        let restitution = self.settings.restitution;
        let (vel, pos) = match axis {
            Axis::X => (&mut self.vel_x, &mut self.pos_x),
            Axis::Y => (&mut self.vel_y, &mut self.pos_y),
        };
        let next = Signal::new(t, vel.a, vel.b, -vel.position_at(t) * restitution);
        *pos = pos.continue_with(&next)?;
        *vel = next;
        Ok(())
    }

    /// Apply every bounce due by `now`, then report a phase change
    pub fn advance(&mut self, now: f64) -> Result<Vec<GameEvent>, SimError> {
        let mut events = Vec::new();

        let mut applied = 0;
        while let Some((t, axis)) = self.next_bounce().filter(|&(t, _)| t <= now) {
            if applied == MAX_EVENTS_PER_TICK {
                log::warn!("Arena event cap reached at t={t:.6}; deferring the rest to the next tick");
                break;
            }
            applied += 1;

            self.bounce(t, axis)?;
            let point = self.position_at(t);
            log::debug!("Arena bounce {axis:?} at t={t:.6} ({:.1}, {:.1})", point.x(), point.y());
            events.push(GameEvent::Bounced { time: t, point });
        }

        if let Some(changed) = self.phase.observe(self.phase_at(now)) {
            log::info!("Arena phase -> {changed:?}");
            events.push(GameEvent::PhaseChanged(changed));
        }

        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_launch_signals() {
        let arena = Arena::new(ArenaSettings::default(), 0.0).unwrap();
        assert_eq!(arena.position_at(0.0), Point::new(26.0, 26.0));
        // One second later: 350 px right, 600 px down
        assert_eq!(arena.position_at(1.0), Point::new(376.0, 626.0));
    }

    #[test]
    fn test_first_floor_bounce() {
        let settings = ArenaSettings::default();
        let mut arena = Arena::new(settings, 0.0).unwrap();
        // 600 t² = floor - roof
        let expected = ((settings.floor() - settings.roof()) / 600.0).sqrt();
        let events = arena.advance(expected + 0.01).unwrap();
        match events[0] {
            GameEvent::Bounced { time, point } => {
                assert!((time - expected).abs() < 1e-9);
                assert!((point.y() - settings.floor()).abs() < 1e-6);
            }
            ref other => panic!("expected bounce, got {other:?}"),
        }
        // Heading back up at 95% of the impact speed
        let impact = 1200.0 * expected;
        assert!((arena.vel_y.position_at(expected) + impact * 0.95).abs() < 1e-6);
        assert_eq!(events.last(), Some(&GameEvent::PhaseChanged(GamePhase::Running)));
    }

    #[test]
    fn test_side_wall_reverses_x() {
        let settings = ArenaSettings {
            gravity: 0.0,
            restitution: 1.0,
            ..Default::default()
        };
        let mut arena = Arena::new(settings, 0.0).unwrap();
        let span = settings.right_wall() - settings.left_wall();
        let t_right = span / settings.speed_x;
        arena.advance(t_right + 1.0).unwrap();
        let x = arena.position_at(t_right + 1.0).x();
        assert!((x - (settings.right_wall() - settings.speed_x)).abs() < 1e-6);
    }

    #[test]
    fn test_ball_eventually_drops_through_floor() {
        let mut arena = Arena::new(ArenaSettings::default(), 0.0).unwrap();
        let mut stopped_at = None;
        let mut changes = 0;
        for frame in 1..=(90 * 60) {
            let now = frame as f64 * FRAME_DT;
            for event in arena.advance(now).unwrap() {
                if let GameEvent::PhaseChanged(phase) = event {
                    changes += 1;
                    if phase == GamePhase::Stopped {
                        stopped_at = Some(now);
                    }
                }
            }
            if stopped_at.is_some() {
                break;
            }
        }
        assert!(stopped_at.is_some(), "arena ball never stopped");
        // Running once, then Stopped once
        assert_eq!(changes, 2);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let settings = ArenaSettings {
            width: 40.0,
            ..Default::default()
        };
        assert!(matches!(Arena::new(settings, 0.0), Err(SimError::InvalidSetting(_))));
    }
}
