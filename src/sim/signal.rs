//! Quadratic motion signals
//!
//! A `Signal` is one scalar quantity as a closed-form function of time:
//! `value(t) = a·(t - t0)² + b·(t - t0) + c`, valid for `t >= t0`.
//!
//! Used for position (distance rolled along a direction, or one axis of the
//! arena ball) and for velocity. A velocity signal with `a == 0` integrates
//! into a position signal, which is how the arena ball gets gravity.

use serde::{Deserialize, Serialize};

use crate::consts::TIME_QUANTUM;
use crate::error::SimError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    /// Creation time; the signal is undefined before it
    pub t0: f64,
    /// Half the constant acceleration
    pub a: f64,
    /// Rate at `t0`
    pub b: f64,
    /// Value at `t0`
    pub c: f64,
}

impl Signal {
    pub fn new(t0: f64, a: f64, b: f64, c: f64) -> Self {
        Self { t0, a, b, c }
    }

    /// Value at time `t`
    #[inline]
    pub fn position_at(&self, t: f64) -> f64 {
        let x = t - self.t0;
        self.a * x * x + self.b * x + self.c
    }

    /// Derivative at time `t`
    #[inline]
    pub fn velocity_at(&self, t: f64) -> f64 {
        let x = t - self.t0;
        2.0 * self.a * x + self.b
    }

    /// Earliest future time at which the value reaches `target`
    ///
    /// Roots closer to `t0` than `TIME_QUANTUM` are ignored so a signal that
    /// starts on the target does not report "now" as the next event.
    pub fn when(&self, target: f64) -> Option<f64> {
        let c = self.c - target;

        let x = if self.a == 0.0 {
            if self.b == 0.0 {
                return None;
            }
            Some(-c / self.b).filter(|&x| x >= TIME_QUANTUM)
        } else {
            let discriminant = self.b * self.b - 4.0 * self.a * c;
            if discriminant < 0.0 {
                return None;
            }
            let root = discriminant.sqrt();
            let x1 = (-self.b + root) / (2.0 * self.a);
            let x2 = (-self.b - root) / (2.0 * self.a);
            [x1, x2]
                .into_iter()
                .filter(|&x| x >= TIME_QUANTUM)
                .min_by(f64::total_cmp)
        };

        x.map(|x| self.t0 + x)
    }

    /// Time at which the derivative is zero, `None` without acceleration
    pub fn when_velocity_zero(&self) -> Option<f64> {
        (self.a != 0.0).then(|| self.t0 - 0.5 * self.b / self.a)
    }

    /// Integrate a linear velocity signal into a position signal
    ///
    /// `self` must have `a == 0`; the result starts at `initial`.
    pub fn integrate(&self, initial: f64) -> Result<Signal, SimError> {
        if self.a != 0.0 {
            return Err(SimError::NonConstantAcceleration);
        }
        Ok(Signal::new(self.t0, self.b / 2.0, self.c, initial))
    }

    /// Position signal that follows `self` up to `velocity.t0`, then `velocity`
    ///
    /// Keeps position continuous when the velocity law is replaced (a bounce).
    pub fn continue_with(&self, velocity: &Signal) -> Result<Signal, SimError> {
        velocity.integrate(self.position_at(velocity.t0))
    }
}
