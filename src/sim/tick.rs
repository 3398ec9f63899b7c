//! Event-driven tick
//!
//! The driver calls `tick` with the current time and whatever input arrived
//! since the last call. Every stimulus due by then (the user's release and the
//! committed trajectory's predicted bounce/fall) is applied in time order, one
//! transaction per instant, until nothing more is due.

use serde::{Deserialize, Serialize};

use super::resolver::{Push, Stimuli, resolve};
use super::state::{GameEvent, GameState};
use super::vector::Point;
use crate::consts::MAX_EVENTS_PER_TICK;
use crate::error::SimError;

/// Mouse release: the ball is pushed away from `point` at `time`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Release {
    pub time: f64,
    pub point: Point,
}

/// Input gathered since the previous tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub release: Option<Release>,
    /// Put the ball back on the start position
    pub reset: bool,
}

/// Advance the game state to time `now`
///
/// On an invariant violation the failing transaction is not committed and the
/// error is returned; transactions committed earlier in the tick stay.
///
/// A release that is not reached before the event cap stays queued on the
/// state and is applied by a later tick.
pub fn tick(state: &mut GameState, input: &TickInput, now: f64) -> Result<Vec<GameEvent>, SimError> {
    let mut events = Vec::new();

    if input.reset {
        state.reset(now);
        log::info!("Reset at t={now:.3}");
        events.push(GameEvent::Reset);
    }

    if let Some(release) = input.release {
        state.pending_releases.push_back(release);
    }
    let mut applied = 0;

    loop {
        let release = state.pending_releases.front().copied();
        let current = state.trajectory();
        let predicted = current.next_event().map(|e| e.time()).filter(|&t| t <= now);
        // A release cannot act before the committed trajectory began
        let release_time = release.map(|r| r.time.max(current.t0()));

        let instant = match (predicted, release_time) {
            (Some(p), Some(r)) => p.min(r),
            (Some(p), None) => p,
            (None, Some(r)) => r,
            (None, None) => break,
        };

        if applied == MAX_EVENTS_PER_TICK {
            log::warn!(
                "Event cap reached at t={instant:.6}; deferring the rest ({} releases queued) to the next tick",
                state.pending_releases.len()
            );
            break;
        }
        applied += 1;

        let push = match (release, release_time) {
            (Some(r), Some(t)) if t <= instant => {
                let ball = current.pos_at(t);
                Some(Push::from_release(t, ball, r.point, state.course.boost_factor))
            }
            _ => None,
        };
        let stimuli = Stimuli {
            push,
            bounce: current.bounce.is_some_and(|b| b.time <= instant),
            fall: current.fall.is_some_and(|f| f.time <= instant),
        };

        let result = resolve(current, state.is_finished(), &stimuli, &state.course);
        if stimuli.push.is_some() {
            state.pending_releases.pop_front();
        }
        let transition = match result {
            Ok(transition) => transition,
            Err(err) => {
                log::error!("Transaction at t={instant:.6} aborted: {err}");
                return Err(err);
            }
        };

        if let Some(event) = state.commit(transition) {
            match &event {
                GameEvent::Fell { time } => log::info!("Ball dropped at t={time:.3}"),
                GameEvent::Pushed { time, velocity } => log::info!(
                    "Push at t={time:.3} velocity=({:.1}, {:.1})",
                    velocity.x(),
                    velocity.y()
                ),
                _ => log::debug!("{event:?}"),
            }
            events.push(event);
        } else if stimuli.push.is_some() {
            log::debug!("Push at t={instant:.3} ignored");
        }
    }

    let phase = state.phase_at(now);
    if let Some(changed) = state.phase.observe(phase) {
        log::info!("Phase -> {changed:?}");
        events.push(GameEvent::PhaseChanged(changed));
    }

    Ok(events)
}
