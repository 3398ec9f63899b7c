//! Deterministic simulation module
//!
//! All motion logic lives here. This module must be pure and deterministic:
//! - Motion is closed-form in time, never stepped
//! - Time and input arrive as parameters (no clocks, no globals)
//! - State changes only by committing a freshly built trajectory
//! - No rendering or platform dependencies

pub mod arena;
pub mod course;
pub mod geometry;
pub mod resolver;
pub mod signal;
pub mod state;
pub mod tick;
pub mod trajectory;
pub mod vector;

pub use arena::{Arena, ArenaSettings};
pub use course::{Course, FallDistance, Hole};
pub use geometry::{
    Circle, Polygon, Ray, WallHit, circle_intersect_distance, polygon_bounce, ray_segment_intersect,
};
pub use resolver::{Push, Stimuli, Transition, resolve};
pub use signal::Signal;
pub use state::{GameEvent, GamePhase, GameState, PhaseTracker};
pub use tick::{Release, TickInput, tick};
pub use trajectory::{Bounce, Fall, PredictedEvent, Trajectory};
pub use vector::{Point, Vector};

/// Result alias for fallible simulation calls
pub type Result<T> = std::result::Result<T, crate::error::SimError>;
