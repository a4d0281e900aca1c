//! The math behind two-wheel dead reckoning.
//!
//! Each tracking wheel only sees the component of body motion along its own
//! rolling direction. With wheel `i` mounted at angle `θi` from body +x:
//!
//! ```text
//! travel0 = dx·cos θ0 + dy·sin θ0
//! travel1 = dx·cos θ1 + dy·sin θ1
//! ```
//!
//! Solving that 2×2 system gives the body displacement, which is then
//! rotated by the heading into the field frame. The solution is exact for
//! pure translation; rotation during a sample interval is not compensated.

/// Below this `|sin(θ1 − θ0)|` the wheels are treated as parallel.
pub const GEOMETRY_EPSILON: f64 = 1e-9;

/// `1 / (cos θ0·sin θ1 − sin θ0·cos θ1)`, the inverse determinant of the
/// wheel projection matrix. Infinite or huge when the wheels are parallel.
pub fn transform_coefficient(theta0: f64, theta1: f64) -> f64 {
    1.0 / (theta0.cos() * theta1.sin() - theta0.sin() * theta1.cos())
}

/// True when the two mounting angles are equal modulo π.
pub fn is_degenerate(theta0: f64, theta1: f64) -> bool {
    (theta1 - theta0).sin().abs() < GEOMETRY_EPSILON
}

/// Linear distance rolled by a wheel between two cumulative encoder angles.
pub fn wheel_travel(wheel_radius: f64, current: f64, last: f64) -> f64 {
    wheel_radius * (current - last)
}

/// Resolves the travel of both wheels into body-frame `(dx, dy)`.
pub fn body_displacement(
    coefficient: f64,
    theta0: f64,
    theta1: f64,
    travel0: f64,
    travel1: f64,
) -> (f64, f64) {
    let dx = coefficient * (travel0 * theta1.sin() - travel1 * theta0.sin());
    let dy = coefficient * (-travel0 * theta1.cos() + travel1 * theta0.cos());
    (dx, dy)
}

/// Rotates a body-frame vector counter-clockwise by `heading` radians.
pub fn rotate_vec(x: f64, y: f64, heading: f64) -> (f64, f64) {
    let (sin, cos) = heading.sin_cos();
    let new_x = x * cos - y * sin;
    let new_y = x * sin + y * cos;
    (new_x, new_y)
}
