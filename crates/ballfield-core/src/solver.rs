use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::FieldConfig;
use crate::constraints::contact::resolve_collisions;
use crate::forces::hand::HandField;
use crate::integrator::{integrate_cluster, integrate_scatter};
use crate::math::clamp01;
use crate::output::InstanceRecord;
use crate::particle::{ColorClass, ParticleStore};
use crate::phase::{Mode, PhaseController};

/// Everything the simulation consumes for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameInput {
    /// Scatter control in [0,1]; clamped, NaN treated as 0.
    pub control: f32,
    /// Pointer position on the z = 0 plane, or `None` when the hand is inactive.
    pub pointer: Option<Vec2>,
    /// Seconds since the previous frame; clamped to the configured range.
    pub dt: f32,
}

impl FrameInput {
    pub fn new(control: f32, pointer: Option<Vec2>, dt: f32) -> Self {
        Self { control, pointer, dt }
    }
}

/// Diagnostics for one step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepReport {
    pub mode: Mode,
    pub returning: bool,
    /// Clamped dt actually integrated.
    pub dt: f32,
    pub contacts: usize,
    pub deactivated: usize,
    pub active: usize,
}

/// The two-phase ball field.
///
/// Each [`Solver::step`] runs the phase controller, then the integrator for
/// the selected mode, then (in cluster mode only) the collision resolver.
/// The store is only handed out immutably between steps.
pub struct Solver {
    particles: ParticleStore,
    config: FieldConfig,
    phase: PhaseController,
    hand: HandField,
    rng: StdRng,
    mode: Mode,
}

impl Solver {
    /// Build a solver from `config`, seeding spawn randomness with `seed`.
    pub fn new(config: FieldConfig, seed: u64) -> anyhow::Result<Self> {
        let mut rng = StdRng::seed_from_u64(seed);
        let particles = ParticleStore::create(&config, &mut rng)?;

        log::info!(
            "ball field created: {} particles ({} accent), seed {}",
            particles.len(),
            particles.count_of(ColorClass::Accent),
            seed
        );

        Ok(Self {
            particles,
            phase: PhaseController::new(config.phase),
            hand: HandField::new(),
            config,
            rng,
            mode: Mode::Cluster,
        })
    }

    /// Advance the simulation by one frame.
    pub fn step(&mut self, input: FrameInput) -> StepReport {
        let dt = self.config.clamp_dt(input.dt);
        let frame = self.phase.update(input.control);
        if frame.mode != self.mode {
            log::debug!(
                "mode {:?} -> {:?} (control {:.3})",
                self.mode,
                frame.mode,
                frame.intensity
            );
            self.mode = frame.mode;
        }

        let hand = self.hand.update(input.pointer, dt, &self.config.hand);

        let active_before = self.particles.active_count();
        let mut contacts = 0;
        let mut deactivated = 0;
        match frame.mode {
            Mode::Cluster => {
                integrate_cluster(
                    &mut self.particles,
                    &self.config,
                    dt,
                    frame.returning,
                    hand.as_ref(),
                );
                contacts = resolve_collisions(
                    &mut self.particles,
                    self.config.restitution,
                    self.config.collision_passes,
                );
                log::trace!("resolved {} contacts", contacts);
            }
            Mode::Scatter => {
                deactivated =
                    integrate_scatter(&mut self.particles, &self.config, dt, frame.intensity);
            }
        }

        let active = active_before - deactivated;
        if deactivated > 0 && active == 0 {
            log::debug!("ball field fully dispersed");
        }

        StepReport {
            mode: frame.mode,
            returning: frame.returning,
            dt,
            contacts,
            deactivated,
            active,
        }
    }

    /// Respawn every particle and clear phase and hand state.
    pub fn reset(&mut self) {
        self.particles.respawn(&self.config, &mut self.rng);
        self.phase.reset();
        self.hand.reset();
        self.mode = Mode::Cluster;
        log::info!("ball field reset");
    }

    /// Respawn a fully dispersed field once `control` is back below the
    /// cluster threshold. Returns whether a reset happened.
    ///
    /// Stepping never reactivates particles; hosts call this before a step
    /// so scrolling back to the top re-forms the field.
    pub fn revive_if_returned(&mut self, control: f32) -> bool {
        if !self.is_dispersed() || clamp01(control) >= self.config.phase.cluster_threshold {
            return false;
        }
        self.reset();
        true
    }

    pub fn particles(&self) -> &ParticleStore {
        &self.particles
    }

    /// Direct mutable access, for hosts and tests that place particles by hand.
    pub fn particles_mut(&mut self) -> &mut ParticleStore {
        &mut self.particles
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Mode chosen by the most recent step.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn phase(&self) -> &PhaseController {
        &self.phase
    }

    pub fn hand(&self) -> &HandField {
        &self.hand
    }

    /// True once every particle has left the field.
    pub fn is_dispersed(&self) -> bool {
        self.particles.active_count() == 0
    }

    /// Per-particle output for the renderer.
    pub fn instances(&self) -> impl Iterator<Item = InstanceRecord> + '_ {
        self.particles.iter().map(InstanceRecord::from)
    }
}
