//! Crate error type
//!
//! Only invariant violations and configuration problems are errors. A missing
//! prediction (target never reached) is an `Option`, not a `SimError`.

use thiserror::Error;

use crate::sim::{Point, Vector};

#[derive(Debug, Error)]
pub enum SimError {
    /// A ray cast from inside the green found no wall.
    #[error("no wall hit for ray from {origin:?} along {direction:?}; origin is outside the green")]
    NoWallHit { origin: Point, direction: Vector },

    #[error("polygon needs at least 3 vertices, got {0}")]
    DegeneratePolygon(usize),

    /// Integrating would need a cubic term.
    #[error("cannot integrate a signal with a quadratic term")]
    NonConstantAcceleration,

    #[error("invalid setting: {0}")]
    InvalidSetting(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
