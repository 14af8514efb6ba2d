use glam::{Vec2, Vec3};
use std::f32::consts::TAU;

/// Lengths below this are treated as zero when normalizing.
pub const MIN_DISTANCE: f32 = 1.0e-6;

/// Hash a float to [0,1).
pub fn hash11(p: f32) -> f32 {
    let mut p = (p * 0.1031).fract();
    p *= p + 33.33;
    p *= p + p;
    p.fract().abs()
}

/// Hash two floats to [0,1).
pub fn hash12(x: f32, y: f32) -> f32 {
    let p3x = (x * 0.1031).fract();
    let p3y = (y * 0.1031).fract();
    let p3z = (x * 0.1031).fract();
    let dot_val = p3x * (p3y + 33.33) + p3y * (p3z + 33.33) + p3z * (p3x + 33.33);
    let p3x = p3x + dot_val;
    let p3y = p3y + dot_val;
    let p3z = p3z + dot_val;
    ((p3x + p3y) * p3z).fract().abs()
}

/// Clamp to [0,1], mapping NaN to 0.
#[inline]
pub fn clamp01(x: f32) -> f32 {
    if x.is_nan() {
        0.0
    } else {
        x.clamp(0.0, 1.0)
    }
}

/// Deterministic unit vector keyed by `seed`, used wherever a direction is
/// needed but the geometric one has zero length.
pub fn substitute_direction(seed: u32) -> Vec3 {
    let s = seed as f32 + 1.0;
    let z = hash11(s * 17.13) * 2.0 - 1.0;
    let angle = hash12(s * 3.7, s * 11.9) * TAU;
    let ring = (1.0 - z * z).max(0.0).sqrt();
    Vec3::new(ring * angle.cos(), ring * angle.sin(), z)
}

/// Planar counterpart of [`substitute_direction`].
pub fn substitute_direction_2d(seed: u32) -> Vec2 {
    let angle = hash11((seed as f32 + 1.0) * 29.71) * TAU;
    Vec2::new(angle.cos(), angle.sin())
}

/// Normalize `v`, or fall back to the seeded substitute direction.
#[inline]
pub fn normalize_or_substitute(v: Vec3, seed: u32) -> Vec3 {
    let len = v.length();
    if len > MIN_DISTANCE && len.is_finite() {
        v / len
    } else {
        substitute_direction(seed)
    }
}

/// Scale `v` down so its length does not exceed `max`.
#[inline]
pub fn cap_speed(v: Vec3, max: f32) -> Vec3 {
    let speed = v.length();
    if speed > max {
        v * (max / speed)
    } else {
        v
    }
}

/// Frame-rate independent drag: `drag` is the multiplier per 60 Hz frame.
#[inline]
pub fn drag_factor(drag: f32, dt: f32) -> f32 {
    drag.powf(dt * 60.0)
}
