//! Collectible power-ups dropped by dying enemies.

use crate::body::KineticBody;
use crate::constants::*;
use crate::pool::{Active, Pool};
use bevy::prelude::Vec2;
use rand::rngs::StdRng;
use rand::Rng;

/// What a pickup grants. Unknown values fall back to `Health` when decoded
/// from anything untrusted; within the sim the enum is exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PowerUpKind {
    #[default]
    Health,
    Life,
    Shotgun,
    Grenade,
}

/// One power-up slot. No velocity in typical use: drops sit where the enemy
/// died until collected or expired.
#[derive(Debug, Clone, Copy, Default)]
pub struct PowerUp {
    pub body: KineticBody,
    pub kind: PowerUpKind,
    /// Seconds until the drop despawns uncollected.
    pub lifetime: f32,
    /// Free-running phase for the render layer's bob/pulse animation.
    pub anim_phase: f32,
}

impl Active for PowerUp {
    fn is_active(&self) -> bool {
        self.body.active
    }
    fn set_active(&mut self, active: bool) {
        self.body.active = active;
    }
}

fn random_kind(rng: &mut StdRng) -> PowerUpKind {
    match rng.gen_range(0..100u32) {
        0..=39 => PowerUpKind::Health,
        40..=49 => PowerUpKind::Life,
        50..=74 => PowerUpKind::Shotgun,
        _ => PowerUpKind::Grenade,
    }
}

/// Roll a drop at `pos` with probability `chance`. Exhausted pool or a failed
/// roll both mean no drop.
pub fn maybe_drop(powerups: &mut Pool<PowerUp>, pos: Vec2, chance: f32, rng: &mut StdRng) {
    if rng.gen_range(0.0..1.0) >= chance {
        return;
    }
    let kind = random_kind(rng);
    let Some((_, slot)) = powerups.acquire() else {
        return;
    };
    *slot = PowerUp {
        body: KineticBody {
            pos,
            vel: Vec2::ZERO,
            angle_deg: 0.0,
            radius: POWERUP_RADIUS,
            active: true,
        },
        kind,
        lifetime: POWERUP_LIFETIME,
        anim_phase: 0.0,
    };
}

/// Age drops and advance their animation phase; expire stale ones.
pub fn powerups_step(powerups: &mut Pool<PowerUp>, dt: f32) {
    let mut expired = Vec::new();
    for (idx, p) in powerups.iter_active_mut() {
        p.lifetime -= dt;
        p.anim_phase = (p.anim_phase + dt * 4.0) % std::f32::consts::TAU;
        if p.lifetime <= 0.0 {
            expired.push(idx);
        }
    }
    for idx in expired {
        powerups.release(idx);
    }
}
