//! Sensor abstractions consumed by the odometry tracker.
//!
//! The tracker never talks to hardware directly. It reads cumulative wheel
//! angles through [`EncoderSource`] and, optionally, a heading through
//! [`HeadingSource`]. This module provides:
//!
//! - **EncoderSource / HeadingSource**: The two collaborator traits.
//! - **FnEncoder / TickEncoder / SharedEncoder**: Host-side encoder adapters
//!   for closures, raw tick counters, and values pushed from elsewhere.
//! - **MountedHeading**: Adds a fixed field-to-body offset to a live
//!   rotation reading.
//! - **TrackingSensor / ImuHeading** (`vexide` feature): Adapters for V5
//!   rotation sensors, ADI optical encoders, and the inertial sensor.
//!
//! # Example
//!
//! ```ignore
//! use deadwheel::motion::odom::devices::{SharedEncoder, TickEncoder};
//!
//! // AMT102 quadrature encoder at 2048 counts per revolution
//! let wheel0 = TickEncoder::new(|| encoder_a.count(), 2048.0)?;
//!
//! // A value another task writes into
//! let wheel1 = SharedEncoder::new();
//! wheel1.set(0.25);
//! ```

use std::{cell::Cell, f64::consts::TAU, rc::Rc};

use log::warn;

use super::error::OdomError;

/// A source of cumulative wheel rotation in radians.
///
/// The value must be unwrapped (it keeps growing past one revolution) and
/// reading it twice without wheel motion must return the same value. If the
/// underlying device can fail, the implementation decides what to return;
/// the tracker has no failure path of its own.
pub trait EncoderSource {
    /// Returns the current cumulative rotation in radians.
    fn angle(&mut self) -> f64;
}

impl<T: EncoderSource + ?Sized> EncoderSource for &mut T {
    fn angle(&mut self) -> f64 { (**self).angle() }
}

impl<T: EncoderSource + ?Sized> EncoderSource for Box<T> {
    fn angle(&mut self) -> f64 { (**self).angle() }
}

/// A source of the field-to-body rotation angle in radians.
///
/// Counter-clockwise positive, any real value.
pub trait HeadingSource {
    /// Returns the current heading in radians.
    fn heading(&mut self) -> f64;
}

impl<T: HeadingSource + ?Sized> HeadingSource for &mut T {
    fn heading(&mut self) -> f64 { (**self).heading() }
}

impl<T: HeadingSource + ?Sized> HeadingSource for Box<T> {
    fn heading(&mut self) -> f64 { (**self).heading() }
}

/// An encoder backed by a closure returning radians.
///
/// # Example
///
/// ```ignore
/// let mut readings = vec![0.0, 0.5, 1.0].into_iter();
/// let encoder = FnEncoder::new(move || readings.next().unwrap_or(1.0));
/// ```
pub struct FnEncoder<F>(F);

impl<F: FnMut() -> f64> FnEncoder<F> {
    /// Wraps a closure as an [`EncoderSource`].
    pub fn new(read: F) -> Self { Self(read) }
}

impl<F: FnMut() -> f64> EncoderSource for FnEncoder<F> {
    fn angle(&mut self) -> f64 { (self.0)() }
}

/// Converts a tick count to radians for an encoder with `resolution`
/// counts per revolution.
pub fn ticks_to_radians(ticks: i64, resolution: f64) -> f64 { ticks as f64 * TAU / resolution }

/// An encoder that reports raw quadrature counts.
///
/// Wraps a tick counter with its resolution (counts per wheel revolution)
/// and presents the cumulative angle in radians.
///
/// # Example
///
/// ```ignore
/// use deadwheel::motion::odom::devices::TickEncoder;
///
/// let encoder = TickEncoder::new(move || counter.load(Ordering::Relaxed), 2048.0)?;
/// ```
pub struct TickEncoder<F> {
    read_ticks: F,
    /// Counts per wheel revolution.
    resolution: f64,
}

impl<F: FnMut() -> i64> TickEncoder<F> {
    /// Creates a new TickEncoder.
    ///
    /// # Arguments
    ///
    /// * `read_ticks` - Returns the cumulative tick count.
    /// * `resolution` - Counts per wheel revolution (e.g. 2048 for an AMT102).
    ///
    /// # Errors
    ///
    /// Returns [`OdomError::InvalidResolution`] if `resolution` is not finite and positive.
    pub fn new(read_ticks: F, resolution: f64) -> Result<Self, OdomError> {
        if !(resolution.is_finite() && resolution > 0.0) {
            let e = OdomError::InvalidResolution(resolution);
            warn!("Tick Encoder Rejected: {}", e);
            return Err(e);
        }
        Ok(Self {
            read_ticks,
            resolution,
        })
    }

    /// Counts per wheel revolution.
    pub fn resolution(&self) -> f64 { self.resolution }
}

impl<F: FnMut() -> i64> EncoderSource for TickEncoder<F> {
    fn angle(&mut self) -> f64 { ticks_to_radians((self.read_ticks)(), self.resolution) }
}

/// An encoder whose angle is written from elsewhere.
///
/// Clones share the same reading, so one handle can be given to the tracker
/// while another is updated by a driver or a test.
#[derive(Debug, Clone, Default)]
pub struct SharedEncoder {
    radians: Rc<Cell<f64>>,
}

impl SharedEncoder {
    /// Creates a SharedEncoder reading zero.
    pub fn new() -> Self { Self::default() }

    /// Stores a new cumulative angle in radians.
    pub fn set(&self, radians: f64) { self.radians.set(radians) }

    /// Adds to the stored angle.
    pub fn advance(&self, radians: f64) { self.radians.set(self.radians.get() + radians) }

    /// The currently stored angle.
    pub fn get(&self) -> f64 { self.radians.get() }
}

impl EncoderSource for SharedEncoder {
    fn angle(&mut self) -> f64 { self.radians.get() }
}

/// Adds the initial field-to-body offset to a live rotation reading.
///
/// A gyro reports rotation since it was zeroed, while the tracker needs the
/// full field-to-body angle. If the robot starts square to the field but
/// rotated a quarter turn, the offset is `π/2`.
///
/// # Example
///
/// ```ignore
/// use std::f64::consts::FRAC_PI_2;
/// use deadwheel::motion::odom::devices::MountedHeading;
///
/// let heading = MountedHeading::new(imu_heading, FRAC_PI_2);
/// ```
pub struct MountedHeading<H> {
    /// The live rotation source.
    pub rotation: H,
    /// Field-to-body angle at start, in radians.
    pub offset:   f64,
}

impl<H: HeadingSource> MountedHeading<H> {
    /// Creates a new MountedHeading.
    ///
    /// # Arguments
    ///
    /// * `rotation` - Rotation of the body since start, in radians.
    /// * `offset` - Field-to-body angle at start, in radians.
    pub fn new(rotation: H, offset: f64) -> Self { Self { rotation, offset } }
}

impl<H: HeadingSource> HeadingSource for MountedHeading<H> {
    fn heading(&mut self) -> f64 { self.offset + self.rotation.heading() }
}

/// A heading backed by a closure returning radians.
pub struct FnHeading<F>(F);

impl<F: FnMut() -> f64> FnHeading<F> {
    /// Wraps a closure as a [`HeadingSource`].
    pub fn new(read: F) -> Self { Self(read) }
}

impl<F: FnMut() -> f64> HeadingSource for FnHeading<F> {
    fn heading(&mut self) -> f64 { (self.0)() }
}

/// Converts a clockwise gyro yaw in degrees (0..360, as reported by a
/// BNO055 in NDOF mode) into a counter-clockwise heading in radians.
pub fn heading_from_clockwise_yaw(yaw_deg: f64) -> f64 { (360.0 - yaw_deg).to_radians() }

#[cfg(feature = "vexide")]
pub use self::v5::{ImuHeading, SensorDevice, TrackingSensor};

#[cfg(feature = "vexide")]
mod v5 {
    use log::warn;
    use vexide::{
        adi::encoder::AdiOpticalEncoder,
        smart::{PortError, imu::InertialSensor, rotation::RotationSensor},
    };

    use super::{EncoderSource, HeadingSource};

    /// The physical encoder behind a [`TrackingSensor`].
    pub enum SensorDevice {
        /// An ADI (3-wire) optical shaft encoder.
        AdiOpticalEncoder(AdiOpticalEncoder),
        /// A V5 rotation sensor (high-resolution encoder).
        RotationSensor(RotationSensor),
    }

    /// A V5 tracking wheel encoder.
    ///
    /// Read failures are logged and answered with the last good angle, so
    /// a disconnected sensor freezes its wheel instead of jumping to zero.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use deadwheel::motion::odom::devices::TrackingSensor;
    /// use vexide::prelude::*;
    ///
    /// let sensor = TrackingSensor::new_rotation_sensor(
    ///     RotationSensor::new(peripherals.port_5, Direction::Forward)
    /// );
    /// ```
    pub struct TrackingSensor {
        device:    SensorDevice,
        last_good: f64,
    }

    impl TrackingSensor {
        /// Creates a new TrackingSensor from an ADI optical encoder.
        pub fn new_adi_optical_encoder(encoder: AdiOpticalEncoder) -> Self {
            Self {
                device:    SensorDevice::AdiOpticalEncoder(encoder),
                last_good: 0.0,
            }
        }

        /// Creates a new TrackingSensor from a V5 rotation sensor.
        pub fn new_rotation_sensor(sensor: RotationSensor) -> Self {
            Self {
                device:    SensorDevice::RotationSensor(sensor),
                last_good: 0.0,
            }
        }

        /// Resets the sensor position to zero.
        ///
        /// # Errors
        ///
        /// Returns a [`PortError`] if the sensor is disconnected or encounters an error.
        pub fn reset_position(&mut self) -> Result<(), PortError> {
            match &mut self.device {
                SensorDevice::AdiOpticalEncoder(encoder) => encoder.reset_position()?,
                SensorDevice::RotationSensor(sensor) => sensor.reset_position()?,
            }
            self.last_good = 0.0;
            Ok(())
        }
    }

    impl EncoderSource for TrackingSensor {
        fn angle(&mut self) -> f64 {
            let reading = match &mut self.device {
                SensorDevice::AdiOpticalEncoder(encoder) => encoder.position().map_err(|e| {
                    warn!("ADI Optical Encoder Position Error: {}", e);
                }),
                SensorDevice::RotationSensor(sensor) => sensor.position().map_err(|e| {
                    warn!("Rotation Sensor Position Error: {}", e);
                }),
            };
            if let Ok(angle) = reading {
                self.last_good = angle.as_radians();
            }
            self.last_good
        }
    }

    /// Heading from a V5 inertial sensor.
    ///
    /// The IMU reports rotation clockwise-positive; this flips it to the
    /// counter-clockwise convention the tracker uses. Wrap it in
    /// [`MountedHeading`](super::MountedHeading) to add a starting offset.
    pub struct ImuHeading {
        imu:       InertialSensor,
        last_good: f64,
    }

    impl ImuHeading {
        /// Creates a new ImuHeading. The sensor should already be calibrated.
        pub fn new(imu: InertialSensor) -> Self { Self { imu, last_good: 0.0 } }
    }

    impl HeadingSource for ImuHeading {
        fn heading(&mut self) -> f64 {
            match self.imu.rotation() {
                Ok(rotation) => self.last_good = -rotation.as_radians(),
                Err(e) => warn!("IMU Error: {}", e),
            }
            self.last_good
        }
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI};

    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn ticks_convert_to_radians() {
        assert_abs_diff_eq!(ticks_to_radians(2048, 2048.0), TAU, epsilon = 1e-12);
        assert_abs_diff_eq!(ticks_to_radians(-512, 2048.0), -FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn tick_encoder_reads_counter() {
        let mut ticks = 0;
        let mut encoder = TickEncoder::new(
            move || {
                ticks += 1024;
                ticks
            },
            2048.0,
        )
        .expect("positive resolution");
        assert_abs_diff_eq!(encoder.angle(), PI, epsilon = 1e-12);
        assert_abs_diff_eq!(encoder.angle(), TAU, epsilon = 1e-12);
    }

    #[test]
    fn tick_encoder_rejects_bad_resolution() {
        for resolution in [0.0, -2048.0, f64::INFINITY] {
            assert_eq!(
                TickEncoder::new(|| 5, resolution).err(),
                Some(OdomError::InvalidResolution(resolution))
            );
        }
        assert!(matches!(
            TickEncoder::new(|| 5, f64::NAN),
            Err(OdomError::InvalidResolution(r)) if r.is_nan()
        ));
    }

    #[test]
    fn shared_encoder_clones_see_updates() {
        let writer = SharedEncoder::new();
        let mut reader = writer.clone();
        assert_eq!(reader.angle(), 0.0);
        writer.set(1.5);
        writer.advance(0.5);
        assert_eq!(reader.angle(), 2.0);
        assert_eq!(reader.angle(), 2.0);
    }

    #[test]
    fn boxed_and_borrowed_encoders_delegate() {
        let mut inner = FnEncoder::new(|| 0.75);
        assert_eq!((&mut inner).angle(), 0.75);
        let mut boxed: Box<dyn EncoderSource> = Box::new(inner);
        assert_eq!(boxed.angle(), 0.75);
    }

    #[test]
    fn mounted_heading_adds_offset() {
        let mut heading = MountedHeading::new(FnHeading::new(|| 0.25), FRAC_PI_2);
        assert_abs_diff_eq!(heading.heading(), FRAC_PI_2 + 0.25);
    }

    #[test]
    fn clockwise_yaw_is_flipped() {
        assert_abs_diff_eq!(heading_from_clockwise_yaw(0.0), TAU, epsilon = 1e-12);
        assert_abs_diff_eq!(heading_from_clockwise_yaw(90.0), 1.5 * PI, epsilon = 1e-12);
        assert_abs_diff_eq!(heading_from_clockwise_yaw(270.0), FRAC_PI_2, epsilon = 1e-12);
    }
}
