//! Per-frame velocity and position update for both field modes.
//!
//! Velocities are in world units per 60 Hz frame, so positions advance by
//! `velocity * dt * 60` and drag is raised to the power `dt * 60`.

use glam::Vec3;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::config::FieldConfig;
use crate::forces::hand::{compute_hand_force, HandSample};
use crate::math::{cap_speed, drag_factor, normalize_or_substitute};
use crate::particle::{Particle, ParticleStore};

/// Pull every active particle toward the center, apply the hand field, and
/// keep the cluster inside `cluster_radius` with a soft bounce.
///
/// `returning` strengthens gravity and drag so a reversed scatter reforms
/// quickly.
pub fn integrate_cluster(
    store: &mut ParticleStore,
    config: &FieldConfig,
    dt: f32,
    returning: bool,
    hand: Option<&HandSample>,
) {
    let pull = if returning {
        config.gravity * config.return_gravity_scale
    } else {
        config.gravity
    };
    let drag = drag_factor(
        if returning {
            config.drag_return
        } else {
            config.drag_cluster
        },
        dt,
    );

    let step = |(i, p): (usize, &mut Particle)| {
        if !p.active {
            return;
        }
        let mut vel = p.velocity;

        if let Some(sample) = hand {
            let result =
                compute_hand_force(p.position, p.radius, i as u32, dt, sample, &config.hand);
            vel += result.vel_add;
            vel *= result.vel_scale;
        }

        vel += (config.center - p.position) * pull * dt;
        vel *= drag;
        vel = cap_speed(vel, config.max_speed_cluster);

        let mut pos = p.position + vel * dt * 60.0;
        let offset = pos - config.center;
        let dist = offset.length();
        if dist > config.cluster_radius {
            pos = config.center + offset * (config.cluster_radius / dist);
            vel *= config.boundary_bounce;
        }

        p.position = pos;
        p.velocity = vel;
    };

    #[cfg(feature = "parallel")]
    store.as_mut_slice().par_iter_mut().enumerate().for_each(step);

    #[cfg(not(feature = "parallel"))]
    store.as_mut_slice().iter_mut().enumerate().for_each(step);
}

/// Push every active particle radially outward with a force proportional to
/// `intensity`, deactivating particles that pass `kill_radius`.
///
/// Returns how many particles were deactivated this frame.
pub fn integrate_scatter(
    store: &mut ParticleStore,
    config: &FieldConfig,
    dt: f32,
    intensity: f32,
) -> usize {
    let drag = drag_factor(config.drag_scatter, dt);
    let push = config.outward_force * intensity * dt;

    let step = |(i, p): (usize, &mut Particle)| -> usize {
        if !p.active {
            return 0;
        }
        let dir = normalize_or_substitute(p.position - config.center, i as u32);

        let mut vel = p.velocity + dir * push;
        vel *= drag;
        vel = cap_speed(vel, config.max_speed_scatter);

        p.position += vel * dt * 60.0;
        p.velocity = vel;

        if p.position.distance(config.center) > config.kill_radius {
            p.active = false;
            1
        } else {
            0
        }
    };

    #[cfg(feature = "parallel")]
    let killed: usize = store.as_mut_slice().par_iter_mut().enumerate().map(step).sum();

    #[cfg(not(feature = "parallel"))]
    let killed: usize = store.as_mut_slice().iter_mut().enumerate().map(step).sum();

    killed
}

/// Mean distance from `center` over active particles (0 when none are active).
pub fn mean_distance(store: &ParticleStore, center: Vec3) -> f32 {
    let mut sum = 0.0;
    let mut n = 0usize;
    store.for_each_active(|_, p| {
        sum += p.position.distance(center);
        n += 1;
    });
    if n == 0 {
        0.0
    } else {
        sum / n as f32
    }
}

/// Mean speed over active particles, in world units per 60 Hz frame.
pub fn mean_speed(store: &ParticleStore) -> f32 {
    let mut sum = 0.0;
    let mut n = 0usize;
    store.for_each_active(|_, p| {
        sum += p.velocity.length();
        n += 1;
    });
    if n == 0 {
        0.0
    } else {
        sum / n as f32
    }
}
