use anyhow::ensure;
use glam::Vec3;

/// Tunables for the cluster/scatter state machine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhaseConfig {
    /// Control values below this always cluster.
    pub cluster_threshold: f32,
    /// A per-frame drop larger than this counts as a reversal.
    pub reversal_epsilon: f32,
    /// Frames of forced clustering after a reversal (~1/3 s at 60 Hz).
    pub return_frames: u32,
}

impl Default for PhaseConfig {
    fn default() -> Self {
        Self {
            cluster_threshold: 0.02,
            reversal_epsilon: 0.0005,
            return_frames: 20,
        }
    }
}

/// Tunables for the pointer ("hand") force field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandConfig {
    pub radius: f32,
    pub strength: f32,
    /// Per-60Hz-frame velocity multiplier for particles inside the field.
    pub damping: f32,
    /// Pointer speed (world units / s) below which no boost is applied.
    pub deadzone: f32,
    /// Pointer speed at which the boost saturates. At the default of 18 u/s
    /// and 60 Hz, any pointer moving 0.3 units or more per frame is already
    /// at full boost, so a 0.5 unit/frame drag and a 5 unit jump push equally.
    pub max_speed: f32,
    pub boost_gain: f32,
    pub reach_gain: f32,
}

impl Default for HandConfig {
    fn default() -> Self {
        Self {
            radius: 2.2,
            strength: 10.5,
            damping: 0.85,
            deadzone: 2.0,
            max_speed: 18.0,
            boost_gain: 2.8,
            reach_gain: 0.45,
        }
    }
}

/// Every constant the ball field needs, fixed for the lifetime of a solver.
///
/// Velocities are expressed in world units per 60 Hz frame; the integrator
/// scales them by `dt * 60` when advancing positions.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldConfig {
    pub particle_count: usize,
    /// Every `accent_every`-th particle is Accent, giving `count / accent_every` accents.
    pub accent_every: usize,
    pub radius_min: f32,
    pub radius_max: f32,
    pub center: Vec3,
    pub spawn_fraction: f32,
    pub spawn_speed: f32,
    pub cluster_radius: f32,
    pub gravity: f32,
    pub return_gravity_scale: f32,
    pub drag_cluster: f32,
    pub drag_return: f32,
    pub drag_scatter: f32,
    pub boundary_bounce: f32,
    pub restitution: f32,
    pub collision_passes: u32,
    pub outward_force: f32,
    pub max_speed_cluster: f32,
    pub max_speed_scatter: f32,
    pub kill_radius: f32,
    pub dt_min: f32,
    pub dt_max: f32,
    pub phase: PhaseConfig,
    pub hand: HandConfig,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            particle_count: 46,
            accent_every: 3,
            radius_min: 0.48,
            radius_max: 0.95,
            center: Vec3::ZERO,
            spawn_fraction: 0.55,
            spawn_speed: 0.12,
            cluster_radius: 5.2,
            gravity: 0.22,
            return_gravity_scale: 1.8,
            drag_cluster: 0.985,
            drag_return: 0.965,
            drag_scatter: 0.997,
            boundary_bounce: 0.85,
            restitution: 0.72,
            collision_passes: 1,
            outward_force: 6.5,
            max_speed_cluster: 1.7,
            max_speed_scatter: 12.0,
            kill_radius: 20.0,
            dt_min: 0.008,
            dt_max: 0.03,
            phase: PhaseConfig::default(),
            hand: HandConfig::default(),
        }
    }
}

impl FieldConfig {
    /// Reject configurations that would make the simulation meaningless or unstable.
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(self.particle_count >= 1, "particle_count must be >= 1, got 0");
        ensure!(self.accent_every >= 1, "accent_every must be >= 1");
        ensure!(
            self.radius_min.is_finite() && self.radius_max.is_finite(),
            "radius range must be finite, got [{}, {}]",
            self.radius_min,
            self.radius_max
        );
        ensure!(
            self.radius_min > 0.0,
            "radius_min must be positive, got {}",
            self.radius_min
        );
        ensure!(
            self.radius_min <= self.radius_max,
            "radius range is inverted: min {} > max {}",
            self.radius_min,
            self.radius_max
        );
        ensure!(self.center.is_finite(), "center must be finite");
        ensure!(
            (0.0..=1.0).contains(&self.spawn_fraction),
            "spawn_fraction must lie in [0, 1], got {}",
            self.spawn_fraction
        );
        ensure!(
            self.spawn_speed >= 0.0 && self.spawn_speed.is_finite(),
            "spawn_speed must be a finite non-negative number"
        );
        ensure!(
            self.cluster_radius > 0.0 && self.cluster_radius.is_finite(),
            "cluster_radius must be positive, got {}",
            self.cluster_radius
        );
        ensure!(
            self.kill_radius > self.cluster_radius && self.kill_radius.is_finite(),
            "kill_radius ({}) must exceed cluster_radius ({})",
            self.kill_radius,
            self.cluster_radius
        );
        for (name, value) in [
            ("gravity", self.gravity),
            ("return_gravity_scale", self.return_gravity_scale),
            ("phase.reversal_epsilon", self.phase.reversal_epsilon),
            ("hand.strength", self.hand.strength),
            ("hand.deadzone", self.hand.deadzone),
            ("hand.boost_gain", self.hand.boost_gain),
            ("hand.reach_gain", self.hand.reach_gain),
        ] {
            ensure!(
                value >= 0.0 && value.is_finite(),
                "{name} must be a finite non-negative number, got {value}"
            );
        }
        for (name, drag) in [
            ("drag_cluster", self.drag_cluster),
            ("drag_return", self.drag_return),
            ("drag_scatter", self.drag_scatter),
            ("boundary_bounce", self.boundary_bounce),
            ("hand.damping", self.hand.damping),
        ] {
            ensure!(
                drag > 0.0 && drag <= 1.0,
                "{name} must lie in (0, 1], got {drag}"
            );
        }
        ensure!(
            (0.0..=1.0).contains(&self.restitution),
            "restitution must lie in [0, 1], got {}",
            self.restitution
        );
        ensure!(
            self.outward_force >= 0.0 && self.outward_force.is_finite(),
            "outward_force must be a finite non-negative number"
        );
        for (name, value) in [
            ("max_speed_cluster", self.max_speed_cluster),
            ("max_speed_scatter", self.max_speed_scatter),
            ("hand.radius", self.hand.radius),
            ("hand.max_speed", self.hand.max_speed),
        ] {
            ensure!(
                value > 0.0 && value.is_finite(),
                "{name} must be a finite positive number, got {value}"
            );
        }
        ensure!(
            self.dt_min > 0.0 && self.dt_min <= self.dt_max && self.dt_max.is_finite(),
            "dt range must satisfy 0 < dt_min <= dt_max, got [{}, {}]",
            self.dt_min,
            self.dt_max
        );
        ensure!(
            (0.0..1.0).contains(&self.phase.cluster_threshold),
            "phase.cluster_threshold must lie in [0, 1)"
        );
        ensure!(
            self.hand.max_speed > self.hand.deadzone,
            "hand.max_speed ({}) must exceed hand.deadzone ({})",
            self.hand.max_speed,
            self.hand.deadzone
        );
        Ok(())
    }

    /// Number of Accent-class particles this config produces.
    pub fn accent_count(&self) -> usize {
        self.particle_count / self.accent_every.max(1)
    }

    /// Clamp a raw frame delta into the stable range. NaN maps to `dt_min`.
    pub fn clamp_dt(&self, dt: f32) -> f32 {
        if dt.is_nan() {
            return self.dt_min;
        }
        dt.clamp(self.dt_min, self.dt_max)
    }
}
