//! Cosmetic particle pool: thrust puffs, impact sparks, explosion bursts.
//!
//! Particles never affect gameplay. Radius and alpha are *derived* from the
//! remaining-lifetime fraction on read — gameplay code never mutates them
//! directly, so a particle's visual fade needs no per-tick bookkeeping beyond
//! the age counter.

use crate::constants::*;
use crate::pool::{Active, Pool};
use bevy::prelude::Vec2;
use rand::rngs::StdRng;
use rand::Rng;

/// One short-lived visual particle slot.
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Total lifetime in seconds.
    pub lifetime: f32,
    /// Seconds alive so far; the slot is released when `age >= lifetime`.
    pub age: f32,
    /// Base colour (sRGB components, 0–1). Alpha is derived, not stored.
    pub color: (f32, f32, f32),
    pub active: bool,
}

impl Default for Particle {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            lifetime: 0.0,
            age: 0.0,
            color: (1.0, 1.0, 1.0),
            active: false,
        }
    }
}

impl Active for Particle {
    fn is_active(&self) -> bool {
        self.active
    }
    fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}

impl Particle {
    /// Remaining-lifetime fraction, 1.0 at birth → 0.0 at expiry.
    pub fn life_frac(&self) -> f32 {
        if self.lifetime <= 0.0 {
            return 0.0;
        }
        (1.0 - self.age / self.lifetime).max(0.0)
    }

    /// Render radius, shrinking linearly with remaining life.
    pub fn radius(&self) -> f32 {
        PARTICLE_BASE_RADIUS * self.life_frac()
    }

    /// Render alpha: quadratic ease-out — bright at birth, rapid fade at end.
    pub fn alpha(&self) -> f32 {
        self.life_frac().powi(2)
    }
}

/// Age every particle, move it, and release expired slots.
pub fn particles_step(particles: &mut Pool<Particle>, dt: f32) {
    let mut expired = Vec::new();
    for (idx, p) in particles.iter_active_mut() {
        p.age += dt;
        if p.age >= p.lifetime {
            expired.push(idx);
            continue;
        }
        // Velocity is units/tick, same unscaled model as every other body.
        p.pos += p.vel;
    }
    for idx in expired {
        particles.release(idx);
    }
}

/// Emit `count` particles radially from `pos` with randomized speed, heading,
/// and lifetime. Silently emits fewer when the pool is exhausted.
pub fn emit_burst(
    particles: &mut Pool<Particle>,
    pos: Vec2,
    count: usize,
    color: (f32, f32, f32),
    rng: &mut StdRng,
) {
    for _ in 0..count {
        let Some((_, slot)) = particles.acquire() else {
            return;
        };
        let angle = rng.gen_range(0.0..std::f32::consts::TAU);
        let speed = rng.gen_range(PARTICLE_MIN_SPEED..PARTICLE_MAX_SPEED);
        *slot = Particle {
            pos,
            vel: Vec2::new(angle.cos(), angle.sin()) * speed,
            lifetime: rng.gen_range(PARTICLE_MIN_LIFE..PARTICLE_MAX_LIFE),
            age: 0.0,
            color,
            active: true,
        };
    }
}

/// Emit a single exhaust puff behind a body moving along `facing`.
pub fn emit_thrust(
    particles: &mut Pool<Particle>,
    pos: Vec2,
    facing: Vec2,
    color: (f32, f32, f32),
    rng: &mut StdRng,
) {
    let Some((_, slot)) = particles.acquire() else {
        return;
    };
    let jitter = Vec2::new(rng.gen_range(-0.4..0.4), rng.gen_range(-0.4..0.4));
    *slot = Particle {
        pos,
        vel: -facing * rng.gen_range(0.5..1.5) + jitter,
        lifetime: rng.gen_range(0.15..0.4),
        age: 0.0,
        color,
        active: true,
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn particles_expire_and_release_their_slot() {
        let mut pool: Pool<Particle> = Pool::new(8);
        let mut rng = StdRng::seed_from_u64(7);
        emit_burst(&mut pool, Vec2::ZERO, 4, (1.0, 1.0, 1.0), &mut rng);
        assert_eq!(pool.active_count(), 4);

        // Longest possible lifetime is PARTICLE_MAX_LIFE.
        particles_step(&mut pool, PARTICLE_MAX_LIFE + 0.1);
        assert_eq!(pool.active_count(), 0);
    }

    #[test]
    fn burst_into_full_pool_is_silently_truncated() {
        let mut pool: Pool<Particle> = Pool::new(3);
        let mut rng = StdRng::seed_from_u64(7);
        emit_burst(&mut pool, Vec2::ZERO, 10, (1.0, 1.0, 1.0), &mut rng);
        assert_eq!(pool.active_count(), 3);
    }

    #[test]
    fn radius_and_alpha_derive_from_remaining_life() {
        let p = Particle {
            lifetime: 1.0,
            age: 0.5,
            active: true,
            ..Default::default()
        };
        assert!((p.life_frac() - 0.5).abs() < 1e-6);
        assert!((p.radius() - PARTICLE_BASE_RADIUS * 0.5).abs() < 1e-6);
        assert!((p.alpha() - 0.25).abs() < 1e-6);
    }
}
