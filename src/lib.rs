//! # Deadwheel
//!
//! Deadwheel is a dead-reckoning position tracker for robots with two
//! unpowered tracking wheels ("dead wheels"). The wheels may be mounted at
//! any two angles on the chassis, orthogonal or not, as long as they are not
//! parallel. It provides:
//!
//! - **Odometry**: Turns encoder readings plus a heading into a field-frame
//!   position, with an adjustable origin and per-axis calibration.
//! - **Sensor Adapters**: Traits for encoders and heading sources, with host
//!   adapters and, behind the `vexide` feature, V5 rotation sensors, ADI
//!   optical encoders and the inertial sensor.
//! - **Logging**: A console and file logger for debugging and telemetry.
//!
//! ## Quick Start
//!
//! ```ignore
//! use deadwheel::motion::odom::{PositionTracker, devices::SharedEncoder};
//!
//! let (wheel0, wheel1) = (SharedEncoder::new(), SharedEncoder::new());
//!
//! // 19 mm wheels, wheel 0 rolling along body +y, wheel 1 along body +x
//! let mut tracker = PositionTracker::new(19.0, wheel0.clone(), 90.0, wheel1.clone(), 0.0)?;
//! tracker.set_origin(250.0, 250.0);
//!
//! loop {
//!     wheel0.set(read_encoder_0());
//!     wheel1.set(read_encoder_1());
//!     tracker.update(gyro_heading_radians());
//!     println!("x: {:.2}, y: {:.2}", tracker.x(), tracker.y());
//! }
//! ```
//!
//! ## Modules
//!
//! - [`motion`]: Dead-wheel odometry.
//! - [`fs`]: Filesystem utilities including logging.

/// Filesystem utilities module.
///
/// Contains logging functionality for recording odometry telemetry and
/// debug information to a file.
pub mod fs;

/// Motion tracking module.
///
/// Provides the dead-wheel odometry tracker, its sensor traits and, with the
/// `vexide` feature, a periodic background tracking task.
pub mod motion;
