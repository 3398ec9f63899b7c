//! Putt Sim - closed-form ball motion on a putting green
//!
//! Core modules:
//! - `sim`: Pure prediction (vector math, geometry, signals, trajectories, event resolution)
//! - `settings`: Data-driven course and arena configuration
//! - `error`: Crate error type

pub mod error;
pub mod settings;
pub mod sim;

pub use error::SimError;
pub use settings::Settings;

/// Simulation configuration constants
pub mod consts {
    /// Driver frame step for the native demo (60 Hz)
    pub const FRAME_DT: f64 = 1.0 / 60.0;
    /// Maximum stimuli committed in a single tick before deferring to the next one
    pub const MAX_EVENTS_PER_TICK: u32 = 64;

    /// Smallest elapsed time accepted as a future event (seconds)
    pub const TIME_QUANTUM: f64 = 0.000_001;

    /// Course defaults
    pub const BALL_RADIUS: f64 = 20.0;
    /// Rolling resistance (half the deceleration, px/s²)
    pub const RESISTANCE: f64 = -70.0;
    /// Drag-to-velocity multiplier for a push
    pub const BOOST_FACTOR: f64 = 4.0;
    pub const HOLE_POS: (f64, f64) = (1400.0, 270.0);
    pub const HOLE_RADIUS: f64 = BALL_RADIUS + 4.0;
    pub const START_POS: (f64, f64) = (200.0, 200.0);

    /// Arena defaults
    pub const ARENA_WIDTH: f64 = 1680.0;
    pub const ARENA_HEIGHT: f64 = 720.0;
    pub const ARENA_BALL_RADIUS: f64 = 25.0;
    pub const ARENA_BALL_BORDER: f64 = 1.0;
    pub const ARENA_SPEED_X: f64 = 350.0;
    pub const GRAVITY: f64 = 1200.0;
    /// Fraction of speed kept after an arena bounce
    pub const RESTITUTION: f64 = 0.95;
}
