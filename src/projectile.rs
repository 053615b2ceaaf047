//! Projectile pools: player bullets and the shared enemy-bullet pool.
//!
//! The enemy-bullet pool also carries grenades and their fragments, including
//! grenades the *player* fires — the `from_player` flag decides who a bullet
//! hurts, so one pool and one detonation path serve both sides.

use crate::body::{heading, KineticBody};
use crate::constants::*;
use crate::particlefx::{emit_burst, Particle};
use crate::pool::{Active, Pool};
use crate::session::AudioCue;
use bevy::prelude::Vec2;
use rand::rngs::StdRng;

// ── Player bullets ────────────────────────────────────────────────────────────

/// One player bullet slot. Fixed radius, fixed speed.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bullet {
    pub body: KineticBody,
}

impl Active for Bullet {
    fn is_active(&self) -> bool {
        self.body.active
    }
    fn set_active(&mut self, active: bool) {
        self.body.active = active;
    }
}

/// Spawn a player bullet travelling along `angle_deg`. Returns `false` when
/// the pool is exhausted (the shot is dropped, not queued).
pub fn fire_bullet(bullets: &mut Pool<Bullet>, pos: Vec2, angle_deg: f32) -> bool {
    let Some((_, slot)) = bullets.acquire() else {
        return false;
    };
    slot.body = KineticBody {
        pos,
        vel: heading(angle_deg) * BULLET_SPEED,
        angle_deg,
        radius: BULLET_RADIUS,
        active: true,
    };
    true
}

// ── Enemy bullets, grenades, fragments ────────────────────────────────────────

/// Wire-level kind tag for the shared pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BulletKind {
    #[default]
    Normal,
    Grenade,
}

/// One slot of the shared enemy-bullet pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnemyBullet {
    pub body: KineticBody,
    pub damage: f32,
    pub kind: BulletKind,
    /// Detonation countdown in seconds; meaningful only for grenades.
    pub fuse: f32,
    /// Guards against double detonation when a fuse expiry and a collision
    /// land on the same tick.
    pub exploded: bool,
    /// Player-fired rounds hurt enemies; enemy-fired rounds hurt the ship.
    pub from_player: bool,
}

impl Active for EnemyBullet {
    fn is_active(&self) -> bool {
        self.body.active
    }
    fn set_active(&mut self, active: bool) {
        self.body.active = active;
    }
}

/// Spawn a plain direct-fire round into the shared pool.
pub fn fire_shot(
    pool: &mut Pool<EnemyBullet>,
    pos: Vec2,
    angle_deg: f32,
    speed: f32,
    damage: f32,
    from_player: bool,
) {
    let Some((_, slot)) = pool.acquire() else {
        return;
    };
    *slot = EnemyBullet {
        body: KineticBody {
            pos,
            vel: heading(angle_deg) * speed,
            angle_deg,
            radius: BULLET_RADIUS,
            active: true,
        },
        damage,
        kind: BulletKind::Normal,
        fuse: 0.0,
        exploded: false,
        from_player,
    };
}

/// Spawn a timed-detonation grenade. It explodes when its fuse runs out *or*
/// immediately on any collision (asteroid, ship, enemy, or bounds exit).
pub fn fire_grenade(
    pool: &mut Pool<EnemyBullet>,
    pos: Vec2,
    angle_deg: f32,
    damage: f32,
    from_player: bool,
) {
    let Some((_, slot)) = pool.acquire() else {
        return;
    };
    *slot = EnemyBullet {
        body: KineticBody {
            pos,
            vel: heading(angle_deg) * GRENADE_SPEED,
            angle_deg,
            radius: GRENADE_RADIUS,
            active: true,
        },
        damage,
        kind: BulletKind::Grenade,
        fuse: GRENADE_FUSE,
        exploded: false,
        from_player,
    };
}

/// Detonate the grenade in slot `idx`: release it and spawn a radial burst of
/// damaging fragments in 8 fixed compass directions plus cosmetic particles.
/// No-op for non-grenades, already-exploded slots, or bad indices.
pub fn detonate_grenade(
    pool: &mut Pool<EnemyBullet>,
    idx: usize,
    particles: &mut Pool<Particle>,
    rng: &mut StdRng,
    cues: &mut Vec<AudioCue>,
) {
    let (pos, from_player) = match pool.get_mut(idx) {
        Some(g) if g.body.active && g.kind == BulletKind::Grenade && !g.exploded => {
            g.exploded = true;
            (g.body.pos, g.from_player)
        }
        _ => return,
    };
    pool.release(idx);

    for i in 0..GRENADE_FRAGMENTS {
        let angle_deg = i as f32 * (360.0 / GRENADE_FRAGMENTS as f32);
        let Some((_, slot)) = pool.acquire() else {
            break; // pool full: partial burst, silently dropped
        };
        *slot = EnemyBullet {
            body: KineticBody {
                pos,
                vel: heading(angle_deg) * FRAGMENT_SPEED,
                angle_deg,
                radius: FRAGMENT_RADIUS,
                active: true,
            },
            damage: FRAGMENT_DAMAGE,
            kind: BulletKind::Normal,
            fuse: 0.0,
            exploded: false,
            from_player,
        };
    }

    emit_burst(particles, pos, EXPLOSION_PARTICLES, (1.0, 0.6, 0.1), rng);
    cues.push(AudioCue::EnemyExplode);
}

/// Tick grenade fuses; detonate any that run out this frame.
pub fn enemy_bullets_step(
    pool: &mut Pool<EnemyBullet>,
    particles: &mut Pool<Particle>,
    dt: f32,
    rng: &mut StdRng,
    cues: &mut Vec<AudioCue>,
) {
    let mut expired = Vec::new();
    for (idx, b) in pool.iter_active_mut() {
        if b.kind == BulletKind::Grenade {
            b.fuse -= dt;
            if b.fuse <= 0.0 {
                expired.push(idx);
            }
        }
    }
    for idx in expired {
        detonate_grenade(pool, idx, particles, rng, cues);
    }
}
