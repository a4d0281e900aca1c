//! Dead-wheel odometry for robot position estimation.
//!
//! This module tracks the robot's field position from two unpowered tracking
//! wheels and an externally supplied heading. Unlike the usual vertical +
//! horizontal layout, the wheels may sit at any two angles as long as they
//! are not parallel.
//!
//! # Module Structure
//!
//! - **[`algorithm`]**: The wheel-to-body transform and heading rotation.
//! - **[`devices`]**: Encoder and heading source traits plus adapters.
//! - **[`error`]**: Configuration errors.
//! - **[`tracker`]**: The [`PositionTracker`] itself.
//! - **[`task`]** (`vexide` feature): Periodic background tracking.
//!
//! # How It Works
//!
//! Each update reads both wheel encoders, converts the change in angle to
//! rolled distance, and solves for the body-frame `(dx, dy)` that produced
//! it. The heading rotates that step into the field frame, where it is added
//! to a running total. Reported positions apply a per-axis calibration
//! factor and the starting origin on top of the total.
//!
//! # Hardware Requirements
//!
//! - **Two tracking wheels** of the same radius, not parallel to each other.
//! - **A heading source** such as an inertial sensor.
//!
//! Rotation between samples is not compensated, and neither is the drift
//! from turning in place when the wheels are away from the rotation centre.
//! Sample fast relative to how quickly the robot turns.
//!
//! # Example
//!
//! ```ignore
//! use deadwheel::motion::odom::{PositionTracker, devices::SharedEncoder};
//!
//! let (wheel0, wheel1) = (SharedEncoder::new(), SharedEncoder::new());
//! let mut tracker = PositionTracker::new(19.0, wheel0.clone(), 90.0, wheel1.clone(), 0.0)?;
//!
//! wheel0.set(std::f64::consts::FRAC_PI_4);
//! tracker.update(0.0);
//! assert!((tracker.y() - 14.923).abs() < 1e-3);
//! ```

/// Wheel-to-body transform and heading rotation.
pub mod algorithm;

/// Encoder and heading sources.
pub mod devices;

/// Configuration errors.
pub mod error;

/// Periodic background tracking on vexide.
#[cfg(feature = "vexide")]
pub mod task;

/// The dead-wheel position tracker.
pub mod tracker;

pub use error::OdomError;
pub use tracker::{Position, PositionTracker, TrackerConfig};
