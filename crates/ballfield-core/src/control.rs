//! Helpers for hosts that turn page scroll into the field's control scalar.

use crate::math::clamp01;

/// Tick factor the follower assumes, independent of the real frame time.
const TICK: f32 = 0.016;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollConfig {
    pub follow_speed: f32,
    /// Largest change per tick.
    pub max_step: f32,
    /// Progress range mapped onto control 0..1.
    pub scatter_start: f32,
    pub scatter_end: f32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            follow_speed: 12.0,
            max_step: 0.03,
            scatter_start: 0.0,
            scatter_end: 0.28,
        }
    }
}

/// Exponential follower with a per-tick step limit.
#[derive(Clone, Debug)]
pub struct ProgressFilter {
    config: ScrollConfig,
    target: f32,
    current: f32,
}

impl ProgressFilter {
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            config,
            target: 0.0,
            current: 0.0,
        }
    }

    /// Record the raw scroll progress, clamped to [0,1].
    pub fn set_target(&mut self, raw: f32) {
        self.target = clamp01(raw);
    }

    /// Advance one tick and return the smoothed progress.
    pub fn tick(&mut self) -> f32 {
        let diff = self.target - self.current;
        let step = (diff.abs() * self.config.follow_speed * TICK).min(self.config.max_step);
        self.current += step.copysign(diff);
        if diff.abs() < 1.0e-4 {
            self.current = self.target;
        }
        self.current
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn reset(&mut self) {
        self.target = 0.0;
        self.current = 0.0;
    }

    /// Control scalar for the current smoothed progress.
    pub fn control(&self) -> f32 {
        scatter_from_progress(self.current, &self.config)
    }
}

/// Linear remap of `v` from `[a, b]` onto `[0, 1]`, unclamped.
pub fn remap(v: f32, a: f32, b: f32) -> f32 {
    (v - a) / (b - a)
}

/// Map scroll progress onto the field's control scalar.
pub fn scatter_from_progress(progress: f32, config: &ScrollConfig) -> f32 {
    clamp01(remap(progress, config.scatter_start, config.scatter_end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remap_is_unclamped() {
        assert_eq!(remap(5.0, 0.0, 10.0), 0.5);
        assert_eq!(remap(0.36, 0.36, 0.46), 0.0);
        assert!((remap(15.0, 0.0, 10.0) - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_tick_holds_at_target() {
        let mut filter = ProgressFilter::new(ScrollConfig::default());
        assert_eq!(filter.tick(), 0.0);
        assert_eq!(filter.control(), 0.0);
    }
}
