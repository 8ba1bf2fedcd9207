//! Scalar helpers used by gameplay code and the particle simulation.

pub const EPSILON: f32 = 1e-6;

#[inline]
pub fn clamp01(x: f32) -> f32 {
    x.clamp(0.0, 1.0)
}

/// Interpolates `a -> b` with `t` clamped to `[0, 1]`.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * clamp01(t)
}

#[inline]
pub fn lerp_unclamped(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Position of `value` between `a` and `b` as a fraction in `[0, 1]`.
///
/// Returns `0.0` for a degenerate range.
pub fn inverse_lerp(a: f32, b: f32, value: f32) -> f32 {
    if (b - a).abs() < EPSILON {
        return 0.0;
    }
    clamp01((value - a) / (b - a))
}

/// Shortest signed difference `b - a` between two angles in degrees, in `(-180, 180]`.
pub fn delta_angle(a: f32, b: f32) -> f32 {
    let diff = repeat(b - a + 180.0, 360.0) - 180.0;
    if diff == -180.0 { 180.0 } else { diff }
}

pub fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    if (target - current).abs() <= max_delta {
        return target;
    }
    current + (target - current).signum() * max_delta
}

/// Wraps `t` into `[0, length)`; negative inputs wrap from the top.
#[inline]
pub fn repeat(t: f32, length: f32) -> f32 {
    t.rem_euclid(length)
}

pub fn ping_pong(t: f32, length: f32) -> f32 {
    let t = repeat(t, length * 2.0);
    length - (t - length).abs()
}

#[inline]
pub fn approximately(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

/// Reflects `x` back into `[0, bounds]` at the edges.
pub fn mirror(x: f32, bounds: f32) -> f32 {
    if bounds <= 0.0 {
        return 0.0;
    }
    let period = bounds * 2.0;
    let t = x.abs().rem_euclid(period);
    if t > bounds { period - t } else { t }
}

#[inline]
pub fn oscillate(x: f32, amplitude: f32, frequency: f32) -> f32 {
    amplitude * (x * frequency).sin()
}

/// Gamma curve applied to `|value| / absmax`, sign preserved.
pub fn gamma(value: f32, absmax: f32, gamma: f32) -> f32 {
    if absmax == 0.0 {
        return 0.0;
    }
    value.signum() * (value.abs() / absmax).powf(gamma) * absmax
}

#[inline]
pub fn barycentric(a: f32, b: f32, c: f32, u: f32, v: f32) -> f32 {
    a + (b - a) * u + (c - a) * v
}
