//! Motion tracking.
//!
//! Currently this holds the dead-wheel odometry in [`odom`]. Sensors are
//! consumed through traits, so the same code runs on a V5 brain (with the
//! `vexide` feature) and on a desktop for testing.

/// Dead-wheel odometry.
///
/// Provides the [`PositionTracker`](odom::PositionTracker) struct for
/// tracking the robot's field position with two tracking wheels mounted at
/// arbitrary angles and an external heading.
pub mod odom;
