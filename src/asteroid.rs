//! Asteroid subsystem: wave spawning, size-tiered splitting, scoring.
//!
//! Asteroids come in three size tiers. A hit deactivates the rock; tiers
//! above 1 spawn exactly two children one tier smaller at the parent's
//! position. The wave's remaining-asteroid counter tracks only *terminal*
//! destructions (size-1 rocks removed outright), never split events — so a
//! wave's remaining count equals the number of size-1 deaths still owed.

use crate::body::{heading, KineticBody};
use crate::constants::*;
use crate::pool::{Active, Pool};
use bevy::prelude::Vec2;
use rand::rngs::StdRng;
use rand::Rng;

/// One asteroid slot.
#[derive(Debug, Clone, Copy, Default)]
pub struct Asteroid {
    pub body: KineticBody,
    /// Size tier: 1 (small), 2 (medium), 3 (large). Radius = 20 × size.
    pub size: u32,
}

impl Active for Asteroid {
    fn is_active(&self) -> bool {
        self.body.active
    }
    fn set_active(&mut self, active: bool) {
        self.body.active = active;
    }
}

impl Asteroid {
    /// Damage this rock deals to the ship on contact.
    pub fn ship_damage(&self) -> f32 {
        self.size as f32 * ASTEROID_DAMAGE_PER_SIZE
    }

    /// Score awarded for destroying this rock.
    pub fn score(&self) -> u32 {
        let tier = (self.size as usize).clamp(1, 3);
        ASTEROID_SCORE[tier - 1]
    }
}

fn random_velocity(rng: &mut StdRng) -> Vec2 {
    let angle_deg = rng.gen_range(0.0..360.0);
    heading(angle_deg) * rng.gen_range(ASTEROID_MIN_SPEED..ASTEROID_MAX_SPEED)
}

/// Spawn `count` large (size-3) asteroids at wave start.
///
/// Positions are chosen uniformly in bounds and rejection-sampled until at
/// least [`SAFE_SPAWN_DIST`] from the ship. Returns how many were actually
/// placed (fewer when the pool fills up).
pub fn spawn_wave_asteroids(
    asteroids: &mut Pool<Asteroid>,
    count: u32,
    ship_pos: Vec2,
    rng: &mut StdRng,
) -> u32 {
    let mut placed = 0;
    for _ in 0..count {
        let radius = 3.0 * ASTEROID_RADIUS_PER_SIZE;
        let pos = loop {
            let candidate = Vec2::new(
                rng.gen_range(radius..ARENA_WIDTH - radius),
                rng.gen_range(radius..ARENA_HEIGHT - radius),
            );
            if candidate.distance(ship_pos) >= SAFE_SPAWN_DIST {
                break candidate;
            }
        };
        let Some((_, slot)) = asteroids.acquire() else {
            break;
        };
        *slot = Asteroid {
            body: KineticBody {
                pos,
                vel: random_velocity(rng),
                angle_deg: 0.0,
                radius,
                active: true,
            },
            size: 3,
        };
        placed += 1;
    }
    placed
}

/// Resolve a hit on the asteroid in slot `idx`.
///
/// The rock is deactivated. Tiers above 1 spawn exactly two size−1 children
/// at the parent position with independent random headings (no
/// distance-from-ship constraint); a size-1 rock is removed outright and
/// decrements `remaining` exactly once. Returns the score for the hit, or
/// `None` for an inactive/out-of-range slot.
pub fn split_asteroid(
    asteroids: &mut Pool<Asteroid>,
    idx: usize,
    remaining: &mut u32,
    rng: &mut StdRng,
) -> Option<u32> {
    let (pos, size, score) = match asteroids.get(idx) {
        Some(a) if a.body.active => (a.body.pos, a.size, a.score()),
        _ => return None,
    };
    asteroids.release(idx);

    if size > 1 {
        let child_size = size - 1;
        for _ in 0..2 {
            let Some((_, slot)) = asteroids.acquire() else {
                break; // pool full: child dropped, expected under load
            };
            *slot = Asteroid {
                body: KineticBody {
                    pos,
                    vel: random_velocity(rng),
                    angle_deg: 0.0,
                    radius: child_size as f32 * ASTEROID_RADIUS_PER_SIZE,
                    active: true,
                },
                size: child_size,
            };
        }
    } else {
        *remaining = remaining.saturating_sub(1);
    }

    Some(score)
}
