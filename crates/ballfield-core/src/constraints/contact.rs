use glam::Vec3;

use crate::particle::{Particle, ParticleStore};

/// A detected overlap between two particles.
#[derive(Clone, Debug)]
pub struct Contact {
    pub normal: Vec3,     // contact normal (A->B, normalized)
    pub penetration: f32, // overlap depth (positive = overlapping)
}

/// Sphere-sphere overlap test. Returns `None` when the spheres do not touch
/// or their centers coincide (no usable normal).
pub fn detect_contact(a: &Particle, b: &Particle) -> Option<Contact> {
    let diff = b.position - a.position;
    let dist = diff.length();
    let min_dist = a.radius + b.radius;
    if dist <= 0.0 || dist >= min_dist || !dist.is_finite() {
        return None;
    }
    Some(Contact {
        normal: diff / dist,
        penetration: min_dist - dist,
    })
}

/// Separate an overlapping pair and exchange a normal impulse.
///
/// Mass is `radius³`. The positional correction is split by inverse mass so
/// the heavier sphere moves less. No impulse is applied to a separating pair.
pub fn resolve_contact(a: &mut Particle, b: &mut Particle, contact: &Contact, restitution: f32) {
    let inv_a = a.inv_mass();
    let inv_b = b.inv_mass();
    let inv_sum = inv_a + inv_b;
    let n = contact.normal;

    a.position -= n * contact.penetration * (inv_a / inv_sum);
    b.position += n * contact.penetration * (inv_b / inv_sum);

    let vel_along_normal = (b.velocity - a.velocity).dot(n);
    if vel_along_normal > 0.0 {
        return;
    }

    let j = -(1.0 + restitution) * vel_along_normal / inv_sum;
    let impulse = n * j;
    a.velocity -= impulse * inv_a;
    b.velocity += impulse * inv_b;
}

/// Gauss-Seidel sweep over every unordered pair of active particles,
/// repeated `passes` times. Returns the number of contacts resolved.
///
/// A single pass does not converge for dense piles.
pub fn resolve_collisions(store: &mut ParticleStore, restitution: f32, passes: u32) -> usize {
    let count = store.len();
    let mut resolved = 0;
    for _pass in 0..passes {
        for i in 0..count {
            for j in (i + 1)..count {
                let (a, b) = store.pair_mut(i, j);
                if !a.active || !b.active {
                    continue;
                }
                if let Some(contact) = detect_contact(a, b) {
                    resolve_contact(a, b, &contact, restitution);
                    resolved += 1;
                }
            }
        }
    }
    resolved
}
