use crate::config::PhaseConfig;
use crate::math::clamp01;

/// Behavior selected for the current frame.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Mode {
    /// Particles are pulled into a tight cluster around the center.
    Cluster,
    /// Particles are pushed radially outward and eventually deactivated.
    Scatter,
}

/// Output of [`PhaseController::update`] for one frame.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct PhaseFrame {
    pub mode: Mode,
    /// Clamped control scalar, used as the scatter intensity.
    pub intensity: f32,
    /// True while the post-reversal window forces clustering.
    pub returning: bool,
}

/// Hysteretic cluster/scatter selector.
///
/// The mode is not stored; it is recomputed every frame from the clamped
/// control scalar and the reversal countdown. Any drop in the control scalar
/// arms a window of `return_frames` frames (counting the drop frame) during
/// which the field re-clusters no matter what the scalar says, so reversing
/// mid-burst never lets particles keep flying outward.
#[derive(Clone, Debug)]
pub struct PhaseController {
    config: PhaseConfig,
    previous: f32,
    return_frames_remaining: u32,
}

impl PhaseController {
    pub fn new(config: PhaseConfig) -> Self {
        Self {
            config,
            previous: 0.0,
            return_frames_remaining: 0,
        }
    }

    pub fn update(&mut self, control: f32) -> PhaseFrame {
        let s = clamp01(control);
        let delta = s - self.previous;

        self.return_frames_remaining = self.return_frames_remaining.saturating_sub(1);
        if delta < -self.config.reversal_epsilon {
            if self.return_frames_remaining == 0 {
                log::debug!("control reversed ({:.4} -> {:.4}), forcing cluster", self.previous, s);
            }
            self.return_frames_remaining = self.config.return_frames;
        }
        self.previous = s;

        let returning = self.return_frames_remaining > 0;
        let mode = if s < self.config.cluster_threshold || returning {
            Mode::Cluster
        } else {
            Mode::Scatter
        };

        PhaseFrame {
            mode,
            intensity: s,
            returning,
        }
    }

    pub fn return_frames_remaining(&self) -> u32 {
        self.return_frames_remaining
    }

    pub fn previous_control(&self) -> f32 {
        self.previous
    }

    pub fn reset(&mut self) {
        self.previous = 0.0;
        self.return_frames_remaining = 0;
    }
}
