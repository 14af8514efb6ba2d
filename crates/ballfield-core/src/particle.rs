use glam::Vec3;
use rand::Rng;

use crate::config::FieldConfig;

/// Which instanced mesh a particle is drawn with.
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ColorClass {
    Primary = 0,
    Accent = 1,
}

/// One simulated sphere.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    /// Cleared once the particle scatters past the kill radius.
    pub active: bool,
    pub radius: f32,
    pub position: Vec3,
    pub velocity: Vec3,
    pub color: ColorClass,
    /// Index into the instance buffer of `color`. Unique per class, never reassigned.
    pub render_slot: u32,
}

impl Particle {
    /// Volume proxy used as mass.
    #[inline]
    pub fn mass(&self) -> f32 {
        self.radius * self.radius * self.radius
    }

    #[inline]
    pub fn inv_mass(&self) -> f32 {
        1.0 / self.mass()
    }
}

/// Fixed-size particle storage. Particles are never removed, only deactivated,
/// so indices and render slots stay stable for the renderer.
pub struct ParticleStore {
    particles: Vec<Particle>,
    primary_count: usize,
    accent_count: usize,
}

impl ParticleStore {
    /// Create `config.particle_count` particles with radii drawn from the
    /// configured range and randomized spawn positions around the center.
    pub fn create<R: Rng>(config: &FieldConfig, rng: &mut R) -> anyhow::Result<Self> {
        config.validate()?;
        let count = config.particle_count;

        let mut primary_slot = 0u32;
        let mut accent_slot = 0u32;
        let mut particles = Vec::with_capacity(count);
        for i in 0..count {
            let color = if i % config.accent_every == config.accent_every - 1 {
                ColorClass::Accent
            } else {
                ColorClass::Primary
            };
            let render_slot = match color {
                ColorClass::Primary => {
                    primary_slot += 1;
                    primary_slot - 1
                }
                ColorClass::Accent => {
                    accent_slot += 1;
                    accent_slot - 1
                }
            };
            particles.push(Particle {
                active: true,
                radius: rng.gen_range(config.radius_min..=config.radius_max),
                position: config.center,
                velocity: Vec3::ZERO,
                color,
                render_slot,
            });
        }

        let mut store = Self {
            particles,
            primary_count: primary_slot as usize,
            accent_count: accent_slot as usize,
        };
        store.respawn(config, rng);
        Ok(store)
    }

    /// Re-draw positions and velocities and reactivate every particle.
    /// Radii, color classes and render slots are kept.
    pub fn respawn<R: Rng>(&mut self, config: &FieldConfig, rng: &mut R) {
        let spawn_radius = config.cluster_radius * config.spawn_fraction;
        let v = config.spawn_speed;
        for p in &mut self.particles {
            let mut dir = Vec3::new(
                rng.gen_range(-1.0..=1.0),
                rng.gen_range(-1.0..=1.0),
                rng.gen_range(-1.0..=1.0),
            );
            if dir.length_squared() < 1.0e-6 {
                dir = Vec3::X;
            }
            let dist = rng.gen_range(0.0..=spawn_radius);
            p.position = config.center + dir.normalize() * dist;
            p.velocity = if v > 0.0 {
                Vec3::new(
                    rng.gen_range(-v..=v),
                    rng.gen_range(-v..=v),
                    rng.gen_range(-v..=v),
                )
            } else {
                Vec3::ZERO
            };
            p.active = true;
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<&Particle> {
        self.particles.get(i)
    }

    pub fn get_mut(&mut self, i: usize) -> Option<&mut Particle> {
        self.particles.get_mut(i)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Particle> {
        self.particles.iter()
    }

    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }

    pub fn as_mut_slice(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    /// Visit every active particle with its store index.
    pub fn for_each_active<F: FnMut(usize, &Particle)>(&self, mut f: F) {
        for (i, p) in self.particles.iter().enumerate() {
            if p.active {
                f(i, p);
            }
        }
    }

    /// Mutable variant of [`Self::for_each_active`].
    pub fn for_each_active_mut<F: FnMut(usize, &mut Particle)>(&mut self, mut f: F) {
        for (i, p) in self.particles.iter_mut().enumerate() {
            if p.active {
                f(i, p);
            }
        }
    }

    /// Two distinct particles borrowed mutably at once. Requires `i < j`.
    pub fn pair_mut(&mut self, i: usize, j: usize) -> (&mut Particle, &mut Particle) {
        assert!(i < j, "pair_mut requires i < j (got {i}, {j})");
        let (head, tail) = self.particles.split_at_mut(j);
        (&mut head[i], &mut tail[0])
    }

    pub fn active_count(&self) -> usize {
        self.particles.iter().filter(|p| p.active).count()
    }

    pub fn count_of(&self, color: ColorClass) -> usize {
        match color {
            ColorClass::Primary => self.primary_count,
            ColorClass::Accent => self.accent_count,
        }
    }
}
