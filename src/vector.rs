/*
 * Vector Math Module
 *
 * Small helpers shared by every steering rule. All of them are total:
 * zero-length inputs are valid and produce a zero (or unchanged) result
 * instead of NaN.
 */

use glam::DVec2;

// Euclidean length
#[inline]
pub fn magnitude(v: DVec2) -> f64 {
    (v.x * v.x + v.y * v.y).sqrt()
}

// Clamp a vector to a maximum length, leaving shorter (and zero) vectors alone
#[inline]
pub fn limit(v: DVec2, max: f64) -> DVec2 {
    let length = magnitude(v);
    if length == 0.0 || length <= max {
        return v;
    }
    v * (max / length)
}

/// Bounded correction from `velocity` toward the heading of `target`.
///
/// The target is normalized to `cruise_speed`, the current velocity is
/// subtracted, and the resulting delta is clamped to `force_limit` before
/// scaling by `weight`. A zero target carries no heading and yields zero.
pub fn steer_toward(
    target: DVec2,
    velocity: DVec2,
    cruise_speed: f64,
    force_limit: f64,
    weight: f64,
) -> DVec2 {
    let desired_length = magnitude(target);
    if desired_length == 0.0 {
        return DVec2::ZERO;
    }

    let desired = target / desired_length * cruise_speed;
    limit(desired - velocity, force_limit) * weight
}
