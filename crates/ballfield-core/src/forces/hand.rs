use glam::{Vec2, Vec3};

use crate::config::HandConfig;
use crate::math::{clamp01, drag_factor, substitute_direction_2d, MIN_DISTANCE};

/// Where the tracker parks the last pointer position while the hand is
/// inactive. The first sample after re-entry is differenced against it.
pub const HAND_SENTINEL: Vec2 = Vec2::splat(999.0);

/// Pointer state carried between frames.
#[derive(Clone, Debug)]
pub struct HandField {
    last_position: Vec2,
    speed: f32,
}

impl Default for HandField {
    fn default() -> Self {
        Self {
            last_position: HAND_SENTINEL,
            speed: 0.0,
        }
    }
}

/// Field parameters for one frame, derived from pointer position and speed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandSample {
    pub center: Vec2,
    /// Force multiplier, 1.0 for slow movement up to `1 + boost_gain`.
    pub boost: f32,
    /// Field radius before adding the particle radius.
    pub radius: f32,
}

/// Effect of the hand on one particle.
pub struct HandForceResult {
    /// Velocity to add.
    pub vel_add: Vec3,
    /// Multiply velocity by this (1.0 = no change).
    pub vel_scale: f32,
}

impl Default for HandForceResult {
    fn default() -> Self {
        Self {
            vel_add: Vec3::ZERO,
            vel_scale: 1.0,
        }
    }
}

impl HandField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed this frame's pointer position (`None` when outside the
    /// interactive region or cancelled by a scroll gesture).
    ///
    /// Returns the field to apply this frame, or `None` when inactive.
    /// Entering from the sentinel reads as a fast swipe, so the first
    /// sample after re-entry gets the full boost.
    pub fn update(
        &mut self,
        pointer: Option<Vec2>,
        dt: f32,
        config: &HandConfig,
    ) -> Option<HandSample> {
        let Some(pos) = pointer.filter(|p| p.is_finite()) else {
            self.reset();
            return None;
        };

        self.speed = if dt > 0.0 {
            pos.distance(self.last_position) / dt
        } else {
            0.0
        };
        self.last_position = pos;

        let ramp = speed_ramp(self.speed, config);
        Some(HandSample {
            center: pos,
            boost: 1.0 + ramp * config.boost_gain,
            radius: config.radius * (1.0 + ramp * config.reach_gain),
        })
    }

    /// Estimated pointer speed in world units per second.
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Last pointer sample, or [`HAND_SENTINEL`] while inactive.
    pub fn last_position(&self) -> Vec2 {
        self.last_position
    }

    pub fn is_tracking(&self) -> bool {
        self.last_position != HAND_SENTINEL
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Dead-zone then quadratic ramp: slow movement stays gentle, fast swipes
/// saturate at 1.
pub fn speed_ramp(speed: f32, config: &HandConfig) -> f32 {
    let u = clamp01((speed - config.deadzone) / (config.max_speed - config.deadzone));
    u * u
}

/// Repulsion of one particle by the hand, evaluated in the XY plane.
///
/// `seed` picks a stable push direction when the pointer sits exactly on
/// the particle center.
pub fn compute_hand_force(
    position: Vec3,
    radius: f32,
    seed: u32,
    dt: f32,
    sample: &HandSample,
    config: &HandConfig,
) -> HandForceResult {
    let offset = position.truncate() - sample.center;
    let dist = offset.length();
    let reach = sample.radius + radius;
    if dist >= reach {
        return HandForceResult::default();
    }

    let normal = if dist > MIN_DISTANCE {
        offset / dist
    } else {
        substitute_direction_2d(seed)
    };
    let t = clamp01(1.0 - dist / reach);
    let strength = config.strength * sample.boost * t * t;

    HandForceResult {
        vel_add: (normal * strength * dt).extend(0.0),
        vel_scale: drag_factor(config.damping, dt),
    }
}
