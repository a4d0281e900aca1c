//! Dead-wheel position tracker.
//!
//! This module provides the [`PositionTracker`] struct which turns the
//! readings of two tracking wheels, mounted at any two non-parallel angles,
//! into a field-frame position.
//!
//! # Example
//!
//! ```ignore
//! use deadwheel::motion::odom::{devices::SharedEncoder, tracker::PositionTracker};
//!
//! let (wheel0, wheel1) = (SharedEncoder::new(), SharedEncoder::new());
//!
//! // 19 mm wheels, wheel 0 rolling along +y, wheel 1 along +x
//! let mut tracker = PositionTracker::new(19.0, wheel0.clone(), 90.0, wheel1.clone(), 0.0)?;
//! tracker.set_origin(250.0, 250.0);
//!
//! // Called from a periodic task with the current gyro heading
//! tracker.update(heading);
//! println!("x: {:.2}, y: {:.2}", tracker.x(), tracker.y());
//! ```

use log::{trace, warn};

use super::{
    algorithm::{body_displacement, is_degenerate, rotate_vec, transform_coefficient, wheel_travel},
    devices::{EncoderSource, HeadingSource},
    error::OdomError,
};

/// A field-frame position in the tracker's length unit.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    /// The x-coordinate.
    pub x: f64,
    /// The y-coordinate.
    pub y: f64,
}

impl Position {
    /// Creates a new Position.
    pub fn new(x: f64, y: f64) -> Self { Self { x, y } }
}

/// Physical layout of a pair of tracking wheels.
///
/// Angles are in degrees, measured counter-clockwise from body +x to the
/// direction the wheel rolls when its encoder counts up. The radius sets the
/// length unit of every position the tracker reports.
///
/// # Example
///
/// ```ignore
/// use deadwheel::motion::odom::tracker::TrackerConfig;
///
/// // Two 1.375" omni wheels in an X pattern
/// let config = TrackerConfig::new(1.375, 45.0, 135.0);
/// config.validate()?;
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackerConfig {
    /// Radius shared by both tracking wheels.
    pub wheel_radius:     f64,
    /// Mounting angle of wheel 0 in degrees.
    pub mount_angle0_deg: f64,
    /// Mounting angle of wheel 1 in degrees.
    pub mount_angle1_deg: f64,
}

impl TrackerConfig {
    /// Creates a new TrackerConfig.
    ///
    /// # Arguments
    ///
    /// * `wheel_radius` - Radius shared by both tracking wheels.
    /// * `mount_angle0_deg` - Mounting angle of wheel 0 in degrees.
    /// * `mount_angle1_deg` - Mounting angle of wheel 1 in degrees.
    pub fn new(wheel_radius: f64, mount_angle0_deg: f64, mount_angle1_deg: f64) -> Self {
        Self {
            wheel_radius,
            mount_angle0_deg,
            mount_angle1_deg,
        }
    }

    /// Checks that the layout can be turned into a tracker.
    ///
    /// # Errors
    ///
    /// - [`OdomError::InvalidWheelRadius`] if the radius is not finite and positive.
    /// - [`OdomError::NonFiniteAngle`] if either angle is NaN or infinite.
    /// - [`OdomError::DegenerateGeometry`] if the angles are equal modulo 180°.
    ///
    /// "Equal" means `|sin(θ1 − θ0)|` is below
    /// [`GEOMETRY_EPSILON`](super::algorithm::GEOMETRY_EPSILON) (1e-9), so mounts
    /// within about 5.7e-8° of parallel, or of anti-parallel, are rejected too.
    pub fn validate(&self) -> Result<(), OdomError> {
        if !(self.wheel_radius.is_finite() && self.wheel_radius > 0.0) {
            return Err(OdomError::InvalidWheelRadius(self.wheel_radius));
        }
        for angle in [self.mount_angle0_deg, self.mount_angle1_deg] {
            if !angle.is_finite() {
                return Err(OdomError::NonFiniteAngle(angle));
            }
        }
        let (theta0, theta1) = self.mount_angles();
        if is_degenerate(theta0, theta1) || !transform_coefficient(theta0, theta1).is_finite() {
            return Err(OdomError::DegenerateGeometry {
                angle0_deg: self.mount_angle0_deg,
                angle1_deg: self.mount_angle1_deg,
            });
        }
        Ok(())
    }

    fn mount_angles(&self) -> (f64, f64) {
        (self.mount_angle0_deg.to_radians(), self.mount_angle1_deg.to_radians())
    }
}

impl Default for TrackerConfig {
    /// 19 mm wheels, wheel 0 along +y and wheel 1 along +x.
    fn default() -> Self { Self::new(19.0, 90.0, 0.0) }
}

/// Two-wheel dead-reckoning position tracker.
///
/// Holds the wheel geometry, the last encoder readings, and the running
/// field-frame displacement. Each [`update`](Self::update) adds the motion
/// since the previous call; the reported position is
/// `origin + accumulated × calibration` per axis.
///
/// The tracker assumes the robot turns little between updates. Rotation
/// during a sample interval is not compensated, so call `update` often.
///
/// # Example
///
/// ```ignore
/// use deadwheel::motion::odom::tracker::{PositionTracker, TrackerConfig};
///
/// let mut tracker = PositionTracker::from_config(TrackerConfig::default(), wheel0, wheel1)?;
/// tracker.set_calibration(1.0, 1.1);
///
/// loop {
///     tracker.update(gyro_heading());
///     sleep(Duration::from_millis(50)).await;
/// }
/// ```
pub struct PositionTracker<A, B = A> {
    encoder0:      A,
    encoder1:      B,
    wheel_radius:  f64,
    theta0:        f64,
    theta1:        f64,
    coefficient:   f64,
    accumulated_x: f64,
    accumulated_y: f64,
    last_angle:    [f64; 2],
    origin_x:      f64,
    origin_y:      f64,
    calib_x:       f64,
    calib_y:       f64,
}

impl<A: EncoderSource, B: EncoderSource> PositionTracker<A, B> {
    /// Creates a new PositionTracker at the origin.
    ///
    /// Both encoder baselines start at zero, so the first update measures
    /// travel from a zero reading.
    ///
    /// # Arguments
    ///
    /// * `wheel_radius` - Radius shared by both tracking wheels.
    /// * `encoder0` - The encoder on wheel 0.
    /// * `mount_angle0_deg` - Angle from body +x to wheel 0's positive rolling direction, in degrees.
    /// * `encoder1` - The encoder on wheel 1.
    /// * `mount_angle1_deg` - Angle from body +x to wheel 1's positive rolling direction, in degrees.
    ///
    /// # Errors
    ///
    /// See [`TrackerConfig::validate`].
    pub fn new(
        wheel_radius: f64,
        encoder0: A,
        mount_angle0_deg: f64,
        encoder1: B,
        mount_angle1_deg: f64,
    ) -> Result<Self, OdomError> {
        Self::from_config(
            TrackerConfig::new(wheel_radius, mount_angle0_deg, mount_angle1_deg),
            encoder0,
            encoder1,
        )
    }

    /// Creates a new PositionTracker from a [`TrackerConfig`].
    ///
    /// # Errors
    ///
    /// See [`TrackerConfig::validate`].
    pub fn from_config(config: TrackerConfig, encoder0: A, encoder1: B) -> Result<Self, OdomError> {
        if let Err(e) = config.validate() {
            warn!("Tracker Configuration Rejected: {}", e);
            return Err(e);
        }
        let (theta0, theta1) = config.mount_angles();
        Ok(Self {
            encoder0,
            encoder1,
            wheel_radius: config.wheel_radius,
            theta0,
            theta1,
            coefficient: transform_coefficient(theta0, theta1),
            accumulated_x: 0.0,
            accumulated_y: 0.0,
            last_angle: [0.0; 2],
            origin_x: 0.0,
            origin_y: 0.0,
            calib_x: 1.0,
            calib_y: 1.0,
        })
    }

    /// Reads both encoders and adds the motion since the last call.
    ///
    /// # Arguments
    ///
    /// * `heading` - Field-to-body rotation in radians for this sample,
    ///   including any fixed starting offset.
    pub fn update(&mut self, heading: f64) {
        let current = [self.encoder0.angle(), self.encoder1.angle()];
        let travel0 = wheel_travel(self.wheel_radius, current[0], self.last_angle[0]);
        let travel1 = wheel_travel(self.wheel_radius, current[1], self.last_angle[1]);

        let (dx, dy) = body_displacement(self.coefficient, self.theta0, self.theta1, travel0, travel1);
        let (field_dx, field_dy) = rotate_vec(dx, dy, heading);
        self.accumulated_x += field_dx;
        self.accumulated_y += field_dy;
        self.last_angle = current;

        trace!("odom step ({:.4}, {:.4}) at heading {:.4}", field_dx, field_dy, heading);
    }

    /// Reads `heading` and calls [`update`](Self::update) with it.
    pub fn update_with_heading_source<H: HeadingSource + ?Sized>(&mut self, heading: &mut H) {
        let h = heading.heading();
        self.update(h);
    }

    /// Clears the accumulated displacement and takes the current encoder
    /// readings as the new baseline. Origin and calibration are kept.
    pub fn reset(&mut self) {
        self.last_angle = [self.encoder0.angle(), self.encoder1.angle()];
        self.accumulated_x = 0.0;
        self.accumulated_y = 0.0;
    }
}

impl<A, B> PositionTracker<A, B> {
    /// Field-frame x: `origin_x + accumulated_x × calib_x`.
    pub fn x(&self) -> f64 { self.origin_x + self.accumulated_x * self.calib_x }

    /// Field-frame y: `origin_y + accumulated_y × calib_y`.
    pub fn y(&self) -> f64 { self.origin_y + self.accumulated_y * self.calib_y }

    /// Both coordinates as a [`Position`].
    pub fn position(&self) -> Position { Position::new(self.x(), self.y()) }

    /// Raw field-frame displacement since construction (or the last
    /// [`reset`](Self::reset)), before origin and calibration.
    pub fn accumulated(&self) -> (f64, f64) { (self.accumulated_x, self.accumulated_y) }

    /// Sets the field-frame starting position.
    ///
    /// This does not clear the accumulated displacement, so it is meant to be
    /// called before the first update or right after [`reset`](Self::reset).
    pub fn set_origin(&mut self, x: f64, y: f64) {
        self.origin_x = x;
        self.origin_y = y;
    }

    /// Sets per-axis scale factors applied to the accumulated displacement
    /// when the position is read. Both default to `1.0`.
    pub fn set_calibration(&mut self, calib_x: f64, calib_y: f64) {
        self.calib_x = calib_x;
        self.calib_y = calib_y;
    }

    /// The precomputed `1 / sin(θ1 − θ0)`.
    pub fn transform_coefficient(&self) -> f64 { self.coefficient }

    /// The tracking wheel radius.
    pub fn wheel_radius(&self) -> f64 { self.wheel_radius }

    /// Mounting angles of wheel 0 and wheel 1, in radians.
    pub fn mount_angles(&self) -> (f64, f64) { (self.theta0, self.theta1) }
}
