//! Errors raised while configuring a dead-wheel tracker.
//!
//! Construction is the only fallible step of the odometry pipeline. Once a
//! [`PositionTracker`](super::tracker::PositionTracker) exists, every update
//! and read succeeds.

use thiserror::Error;

/// Reasons a tracker configuration can be rejected.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum OdomError {
    /// The two mounting angles are equal modulo 180°, so both wheels measure
    /// travel along the same body axis and the x/y transform has no solution.
    #[error(
        "tracking wheels mounted at {angle0_deg}° and {angle1_deg}° are parallel; \
         body displacement cannot be resolved"
    )]
    DegenerateGeometry {
        /// Mounting angle of wheel 0 in degrees, as supplied.
        angle0_deg: f64,
        /// Mounting angle of wheel 1 in degrees, as supplied.
        angle1_deg: f64,
    },

    /// The wheel radius is zero, negative, or not a finite number.
    #[error("tracking wheel radius must be finite and positive, got {0}")]
    InvalidWheelRadius(f64),

    /// An encoder resolution is zero, negative, or not a finite number.
    #[error("encoder resolution must be finite and positive, got {0} counts per revolution")]
    InvalidResolution(f64),

    /// A mounting angle is NaN or infinite.
    #[error("tracking wheel mounting angle must be finite, got {0}°")]
    NonFiniteAngle(f64),
}
