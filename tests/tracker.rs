use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use approx::assert_abs_diff_eq;
use deadwheel::motion::odom::{
    OdomError, Position, PositionTracker,
    devices::{FnEncoder, FnHeading, MountedHeading, SharedEncoder, TickEncoder},
};

fn tracker(
    radius: f64,
    angle0: f64,
    angle1: f64,
) -> (PositionTracker<SharedEncoder>, SharedEncoder, SharedEncoder) {
    let (e0, e1) = (SharedEncoder::new(), SharedEncoder::new());
    let t = PositionTracker::new(radius, e0.clone(), angle0, e1.clone(), angle1)
        .expect("valid wheel layout");
    (t, e0, e1)
}

/// Encoder angles that produce body motion `(dx, dy)` for the given layout.
fn wheel_angles(radius: f64, angle0: f64, angle1: f64, dx: f64, dy: f64) -> (f64, f64) {
    let (t0, t1) = (angle0.to_radians(), angle1.to_radians());
    (
        (dx * t0.cos() + dy * t0.sin()) / radius,
        (dx * t1.cos() + dy * t1.sin()) / radius,
    )
}

#[test]
fn reference_rig_first_sample() {
    let (mut t, e0, e1) = tracker(19.0, 90.0, 0.0);
    e0.set(FRAC_PI_4);
    e1.set(0.0);
    t.update(0.0);

    // k = -1, dx = travel1 = 0, dy = travel0 = 19π/4
    assert_abs_diff_eq!(t.x(), 0.0, epsilon = 1e-6);
    assert_abs_diff_eq!(t.y(), 14.922565, epsilon = 1e-6);
}

#[test]
fn orthogonal_translation_swaps_axes() {
    let (mut t, e0, e1) = tracker(19.0, 90.0, 0.0);
    let (d0, d1) = (12.5, -3.75);
    e0.set(d0 / 19.0);
    e1.set(d1 / 19.0);
    t.update(0.0);

    let (x, y) = t.accumulated();
    assert_abs_diff_eq!(x, d1, epsilon = 1e-9);
    assert_abs_diff_eq!(y, d0, epsilon = 1e-9);
}

#[test]
fn skewed_wheels_recover_translation() {
    let (radius, a0, a1) = (1.375, 45.0, 135.0);
    let (mut t, e0, e1) = tracker(radius, a0, a1);
    let (r0, r1) = wheel_angles(radius, a0, a1, 6.0, -2.0);
    e0.set(r0);
    e1.set(r1);
    t.update(0.0);
    assert_abs_diff_eq!(t.x(), 6.0, epsilon = 1e-9);
    assert_abs_diff_eq!(t.y(), -2.0, epsilon = 1e-9);
}

#[test]
fn steps_accumulate_in_field_frame() {
    let (radius, a0, a1) = (2.0, 30.0, -60.0);
    let (mut t, e0, e1) = tracker(radius, a0, a1);

    // Forward 10 facing +x, then forward 10 facing +y
    let (r0, r1) = wheel_angles(radius, a0, a1, 10.0, 0.0);
    e0.advance(r0);
    e1.advance(r1);
    t.update(0.0);
    e0.advance(r0);
    e1.advance(r1);
    t.update(FRAC_PI_2);

    assert_abs_diff_eq!(t.x(), 10.0, epsilon = 1e-9);
    assert_abs_diff_eq!(t.y(), 10.0, epsilon = 1e-9);
}

#[test]
fn heading_does_not_change_step_length() {
    let (radius, a0, a1) = (1.0, 20.0, 110.0);
    let (dx, dy) = (3.0, 4.0);
    let (r0, r1) = wheel_angles(radius, a0, a1, dx, dy);
    for step in 0..24 {
        let heading = -2.0 * PI + step as f64 * 0.57;
        let (mut t, e0, e1) = tracker(radius, a0, a1);
        e0.set(r0);
        e1.set(r1);
        t.update(heading);
        let (x, y) = t.accumulated();
        assert_abs_diff_eq!(x.hypot(y), 5.0, epsilon = 1e-9);
    }
}

#[test]
fn zero_motion_is_idempotent() {
    let (mut t, e0, e1) = tracker(19.0, 75.0, -15.0);
    e0.set(1.2);
    e1.set(-0.4);
    t.update(0.7);
    let before = t.position();
    for heading in [0.0, 1.0, -3.0, 42.0] {
        t.update(heading);
        assert_eq!(t.position(), before);
    }
}

#[test]
fn origin_and_calibration_apply_at_read_time() {
    let (mut t, e0, e1) = tracker(19.0, 90.0, 0.0);
    let settings = [
        ((0.0, 0.0), (1.0, 1.0)),
        ((250.0, 250.0), (1.0, 1.1)),
        ((-12.0, 3.5), (0.95, 1.0)),
        ((0.0, 100.0), (2.0, 0.5)),
    ];
    for (i, ((ox, oy), (cx, cy))) in settings.into_iter().enumerate() {
        e0.advance(0.1 * (i as f64 + 1.0));
        e1.advance(-0.05);
        t.update(0.2 * i as f64);

        let stored = t.accumulated();
        t.set_origin(ox, oy);
        t.set_calibration(cx, cy);
        assert_eq!(t.accumulated(), stored);
        assert_eq!(t.x(), ox + stored.0 * cx);
        assert_eq!(t.y(), oy + stored.1 * cy);
        assert_eq!(
            t.position(),
            Position::new(ox + stored.0 * cx, oy + stored.1 * cy)
        );
    }
}

#[test]
fn reads_before_update_give_origin() {
    let (mut t, ..) = tracker(19.0, 90.0, 0.0);
    t.set_calibration(3.0, 3.0);
    t.set_origin(1.0, 2.0);
    assert_eq!(t.position(), Position::new(1.0, 2.0));
}

#[test]
fn parallel_wheels_are_rejected() {
    for (a0, a1) in [(45.0, 45.0), (0.0, 180.0), (30.0, 390.0), (-90.0, 90.0)] {
        let result = PositionTracker::new(19.0, SharedEncoder::new(), a0, SharedEncoder::new(), a1);
        assert_eq!(
            result.err(),
            Some(OdomError::DegenerateGeometry {
                angle0_deg: a0,
                angle1_deg: a1,
            })
        );
    }
}

#[test]
fn bad_radius_is_rejected() {
    let result = PositionTracker::new(-1.0, SharedEncoder::new(), 90.0, SharedEncoder::new(), 0.0);
    assert_eq!(result.err(), Some(OdomError::InvalidWheelRadius(-1.0)));
}

#[test]
fn scripted_encoders_and_mounted_heading() {
    // Wheel 1 rolls along body +x: 0, 1, 1, 3 radians
    let mut script = vec![3.0, 1.0, 1.0, 0.0];
    let e1 = FnEncoder::new(move || script.pop().unwrap_or(3.0));
    let e0 = TickEncoder::new(|| 0, 2048.0).expect("positive resolution");
    let mut t = PositionTracker::new(1.0, e0, 90.0, e1, 0.0).expect("valid wheel layout");

    // Robot starts rotated a quarter turn on the field and never turns
    let mut heading = MountedHeading::new(FnHeading::new(|| 0.0), FRAC_PI_2);
    for _ in 0..4 {
        t.update_with_heading_source(&mut heading);
    }
    assert_abs_diff_eq!(t.x(), 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(t.y(), 3.0, epsilon = 1e-9);
}

#[test]
fn zero_resolution_encoder_never_reaches_tracker() {
    // 5 ticks over a zero resolution would be an infinite angle
    assert_eq!(
        TickEncoder::new(|| 5, 0.0).err(),
        Some(OdomError::InvalidResolution(0.0))
    );

    let e0 = TickEncoder::new(|| 512, 2048.0).expect("positive resolution");
    let mut t = PositionTracker::new(19.0, e0, 90.0, SharedEncoder::new(), 0.0)
        .expect("valid wheel layout");
    t.update(0.0);
    assert!(t.x().is_finite() && t.y().is_finite());
    assert_abs_diff_eq!(t.y(), 19.0 * FRAC_PI_2, epsilon = 1e-9);
}

#[test]
fn reset_starts_from_current_readings() {
    let (mut t, e0, e1) = tracker(19.0, 90.0, 0.0);
    e0.set(5.0);
    e1.set(5.0);
    t.reset();
    t.set_origin(100.0, 100.0);
    t.update(0.0);
    assert_eq!(t.position(), Position::new(100.0, 100.0));

    e1.advance(1.0);
    t.update(0.0);
    assert_abs_diff_eq!(t.x(), 119.0, epsilon = 1e-9);
}
