//! Movement integration, arena boundary policies, and collision resolution.
//!
//! Boundary policy is per entity kind: the ship and enemies are blocked at
//! the walls (blocked axis zeroed, tangential speed damped), asteroids
//! reflect, plain projectiles deactivate, and grenades detonate on exit.
//! All velocities are in units per tick, so integration is a bare `pos += vel`
//! with no dt scaling.

use crate::asteroid::{split_asteroid, Asteroid};
use crate::body::collides;
use crate::constants::*;
use crate::enemy::{damage_enemy, Enemy};
use crate::particlefx::{emit_burst, Particle};
use crate::player::{apply_powerup, damage_player, DamageResult, PlayerShip};
use crate::pool::Pool;
use crate::powerup::PowerUp;
use crate::projectile::{detonate_grenade, Bullet, BulletKind, EnemyBullet};
use crate::session::AudioCue;
use bevy::prelude::Vec2;
use rand::rngs::StdRng;

// ── Boundary policies ─────────────────────────────────────────────────────────

/// Clamp a blocked body (ship, enemy) inside the arena. A clamped axis loses
/// its velocity outright; the tangential component is damped so wall scrapes
/// bleed speed.
fn clamp_blocked(pos: &mut Vec2, vel: &mut Vec2, radius: f32) {
    let mut hit_x = false;
    let mut hit_y = false;
    if pos.x < radius {
        pos.x = radius;
        hit_x = true;
    } else if pos.x > ARENA_WIDTH - radius {
        pos.x = ARENA_WIDTH - radius;
        hit_x = true;
    }
    if pos.y < radius {
        pos.y = radius;
        hit_y = true;
    } else if pos.y > ARENA_HEIGHT - radius {
        pos.y = ARENA_HEIGHT - radius;
        hit_y = true;
    }
    if hit_x {
        vel.x = 0.0;
        vel.y *= EDGE_DAMPING;
    }
    if hit_y {
        vel.y = 0.0;
        vel.x *= EDGE_DAMPING;
    }
}

/// Reflect a bouncing body (asteroid) off the walls.
fn reflect_bounds(pos: &mut Vec2, vel: &mut Vec2, radius: f32) {
    if pos.x < radius {
        pos.x = radius;
        vel.x = vel.x.abs();
    } else if pos.x > ARENA_WIDTH - radius {
        pos.x = ARENA_WIDTH - radius;
        vel.x = -vel.x.abs();
    }
    if pos.y < radius {
        pos.y = radius;
        vel.y = vel.y.abs();
    } else if pos.y > ARENA_HEIGHT - radius {
        pos.y = ARENA_HEIGHT - radius;
        vel.y = -vel.y.abs();
    }
}

fn out_of_bounds(pos: Vec2) -> bool {
    pos.x < 0.0 || pos.x > ARENA_WIDTH || pos.y < 0.0 || pos.y > ARENA_HEIGHT
}

/// Move every entity kind one tick and apply its boundary policy.
#[allow(clippy::too_many_arguments)]
pub fn integrate_and_bounds(
    ship: &mut PlayerShip,
    bullets: &mut Pool<Bullet>,
    asteroids: &mut Pool<Asteroid>,
    enemies: &mut Pool<Enemy>,
    enemy_bullets: &mut Pool<EnemyBullet>,
    particles: &mut Pool<Particle>,
    rng: &mut StdRng,
    cues: &mut Vec<AudioCue>,
) {
    ship.body.pos += ship.body.vel;
    clamp_blocked(&mut ship.body.pos, &mut ship.body.vel, ship.body.radius);

    for (_, e) in enemies.iter_active_mut() {
        e.body.pos += e.body.vel;
        clamp_blocked(&mut e.body.pos, &mut e.body.vel, e.body.radius);
    }

    for (_, a) in asteroids.iter_active_mut() {
        a.body.pos += a.body.vel;
        reflect_bounds(&mut a.body.pos, &mut a.body.vel, a.body.radius);
    }

    let mut gone = Vec::new();
    for (idx, b) in bullets.iter_active_mut() {
        b.body.pos += b.body.vel;
        if out_of_bounds(b.body.pos) {
            gone.push(idx);
        }
    }
    for idx in gone {
        bullets.release(idx);
    }

    // Grenades detonate on bounds exit; plain rounds just vanish.
    let mut exited = Vec::new();
    for (idx, b) in enemy_bullets.iter_active_mut() {
        b.body.pos += b.body.vel;
        if out_of_bounds(b.body.pos) {
            exited.push((idx, b.kind));
        }
    }
    for (idx, kind) in exited {
        match kind {
            BulletKind::Grenade => detonate_grenade(enemy_bullets, idx, particles, rng, cues),
            BulletKind::Normal => enemy_bullets.release(idx),
        }
    }

    let mut escaped = Vec::new();
    for (idx, p) in particles.iter_active() {
        if out_of_bounds(p.pos) {
            escaped.push(idx);
        }
    }
    for idx in escaped {
        particles.release(idx);
    }
}

// ── Asteroid ↔ asteroid elastic response ─────────────────────────────────────

/// Resolve overlapping asteroid pairs with an elastic impulse along the
/// contact normal. Mass equals the size tier; coincident centers fall back to
/// an arbitrary fixed normal so the math never divides by zero.
pub fn resolve_asteroid_bounce(asteroids: &mut Pool<Asteroid>) {
    let indices: Vec<usize> = asteroids.iter_active().map(|(idx, _)| idx).collect();

    for i in 0..indices.len() {
        for j in (i + 1)..indices.len() {
            let (ia, ib) = (indices[i], indices[j]);
            let (a, b) = match (asteroids.get(ia), asteroids.get(ib)) {
                (Some(a), Some(b)) if a.body.active && b.body.active => (*a, *b),
                _ => continue,
            };
            if !collides(&a.body, &b.body) {
                continue;
            }

            let offset = b.body.pos - a.body.pos;
            let dist = offset.length();
            let normal = if dist > CONTACT_EPSILON {
                offset / dist
            } else {
                Vec2::X
            };

            let inv_ma = 1.0 / a.size as f32;
            let inv_mb = 1.0 / b.size as f32;

            let rel_normal = (b.body.vel - a.body.vel).dot(normal);
            let mut va = a.body.vel;
            let mut vb = b.body.vel;
            if rel_normal < 0.0 {
                let impulse = -(1.0 + ASTEROID_RESTITUTION) * rel_normal / (inv_ma + inv_mb);
                va -= normal * (impulse * inv_ma);
                vb += normal * (impulse * inv_mb);
            }

            // De-overlap weighted by inverse mass so the lighter rock gives way.
            let overlap = (a.body.radius + b.body.radius - dist).max(0.0) + CONTACT_EPSILON;
            let total = inv_ma + inv_mb;
            let pa = a.body.pos - normal * (overlap * inv_ma / total);
            let pb = b.body.pos + normal * (overlap * inv_mb / total);

            if let Some(slot) = asteroids.get_mut(ia) {
                slot.body.vel = va;
                slot.body.pos = pa;
            }
            if let Some(slot) = asteroids.get_mut(ib) {
                slot.body.vel = vb;
                slot.body.pos = pb;
            }
        }
    }
}

// ── Combat resolution ─────────────────────────────────────────────────────────

/// Mutable session counters the combat pass updates.
pub struct CombatOutcome {
    pub score: u32,
    pub game_over: bool,
}

/// Resolve all cross-kind contacts for this tick: projectiles against rocks
/// and enemies, rocks against the ship and enemies, enemy fire against the
/// ship, contact rams, and pickups. Returns score gained and whether the
/// last life was lost.
#[allow(clippy::too_many_arguments)]
pub fn resolve_combat(
    ship: &mut PlayerShip,
    bullets: &mut Pool<Bullet>,
    asteroids: &mut Pool<Asteroid>,
    enemies: &mut Pool<Enemy>,
    enemy_bullets: &mut Pool<EnemyBullet>,
    powerups: &mut Pool<PowerUp>,
    particles: &mut Pool<Particle>,
    asteroids_remaining: &mut u32,
    health: &mut f32,
    lives: &mut u32,
    rng: &mut StdRng,
    cues: &mut Vec<AudioCue>,
) -> CombatOutcome {
    let mut outcome = CombatOutcome {
        score: 0,
        game_over: false,
    };

    // Player bullets against asteroids and enemies.
    let bullet_indices: Vec<usize> = bullets.iter_active().map(|(idx, _)| idx).collect();
    for bi in bullet_indices {
        let Some(bullet) = bullets.get(bi).copied() else {
            continue;
        };
        if !bullet.body.active {
            continue;
        }

        let mut spent = false;
        let asteroid_hit = asteroids
            .iter_active()
            .find(|(_, a)| collides(&bullet.body, &a.body))
            .map(|(idx, _)| idx);
        if let Some(ai) = asteroid_hit {
            emit_burst(particles, bullet.body.pos, IMPACT_PARTICLES, (0.8, 0.8, 0.8), rng);
            cues.push(AudioCue::AsteroidHit);
            if let Some(score) = split_asteroid(asteroids, ai, asteroids_remaining, rng) {
                outcome.score += score;
            }
            spent = true;
        }

        if !spent {
            let enemy_hit = enemies
                .iter_active()
                .find(|(_, e)| collides(&bullet.body, &e.body))
                .map(|(idx, _)| idx);
            if let Some(ei) = enemy_hit {
                emit_burst(particles, bullet.body.pos, IMPACT_PARTICLES, (1.0, 0.5, 0.2), rng);
                if let Some(score) =
                    damage_enemy(enemies, ei, BULLET_DAMAGE, false, powerups, particles, rng, cues)
                {
                    outcome.score += score;
                }
                spent = true;
            }
        }

        if spent {
            bullets.release(bi);
        }
    }

    // Shared enemy-bullet pool: grenades, fragments, and scout fire. The
    // from_player flag decides which side each round can hurt.
    let eb_indices: Vec<usize> = enemy_bullets.iter_active().map(|(idx, _)| idx).collect();
    for bi in eb_indices {
        let Some(round) = enemy_bullets.get(bi).copied() else {
            continue;
        };
        if !round.body.active {
            continue;
        }

        // Rocks stop everything.
        let asteroid_hit = asteroids
            .iter_active()
            .find(|(_, a)| collides(&round.body, &a.body))
            .map(|(idx, _)| idx);
        if let Some(ai) = asteroid_hit {
            if round.from_player {
                emit_burst(particles, round.body.pos, IMPACT_PARTICLES, (0.8, 0.8, 0.8), rng);
                cues.push(AudioCue::AsteroidHit);
                if let Some(score) = split_asteroid(asteroids, ai, asteroids_remaining, rng) {
                    outcome.score += score;
                }
            }
            match round.kind {
                BulletKind::Grenade => detonate_grenade(enemy_bullets, bi, particles, rng, cues),
                BulletKind::Normal => enemy_bullets.release(bi),
            }
            continue;
        }

        if round.from_player {
            let enemy_hit = enemies
                .iter_active()
                .find(|(_, e)| collides(&round.body, &e.body))
                .map(|(idx, _)| idx);
            if let Some(ei) = enemy_hit {
                if let Some(score) =
                    damage_enemy(enemies, ei, round.damage, false, powerups, particles, rng, cues)
                {
                    outcome.score += score;
                }
                match round.kind {
                    BulletKind::Grenade => {
                        detonate_grenade(enemy_bullets, bi, particles, rng, cues)
                    }
                    BulletKind::Normal => enemy_bullets.release(bi),
                }
            }
        } else if collides(&round.body, &ship.body) {
            match damage_player(ship, health, lives, round.damage, cues) {
                DamageResult::GameOver => outcome.game_over = true,
                DamageResult::Absorbed => {
                    // Invulnerable ships still soak the round.
                }
                _ => {}
            }
            match round.kind {
                BulletKind::Grenade => detonate_grenade(enemy_bullets, bi, particles, rng, cues),
                BulletKind::Normal => enemy_bullets.release(bi),
            }
        }
    }

    // Asteroids ramming the ship: damage scales with size, the rock splits,
    // and no score is awarded for the collision.
    let ram = asteroids
        .iter_active()
        .find(|(_, a)| collides(&a.body, &ship.body))
        .map(|(idx, a)| (idx, a.ship_damage(), a.body.pos));
    if let Some((ai, dmg, pos)) = ram {
        emit_burst(particles, pos, IMPACT_PARTICLES, (1.0, 0.4, 0.4), rng);
        if damage_player(ship, health, lives, dmg, cues) == DamageResult::GameOver {
            outcome.game_over = true;
        }
        split_asteroid(asteroids, ai, asteroids_remaining, rng);
    }

    // Asteroids grinding enemies: half the ship-contact damage, kill score
    // halved inside damage_enemy.
    let enemy_indices: Vec<usize> = enemies.iter_active().map(|(idx, _)| idx).collect();
    for ei in enemy_indices {
        let Some(enemy) = enemies.get(ei).copied() else {
            continue;
        };
        if !enemy.body.active {
            continue;
        }
        let grind = asteroids
            .iter_active()
            .find(|(_, a)| collides(&a.body, &enemy.body))
            .map(|(idx, a)| (idx, a.ship_damage() * ASTEROID_ENEMY_DAMAGE_FACTOR));
        if let Some((ai, dmg)) = grind {
            if let Some(score) =
                damage_enemy(enemies, ei, dmg, true, powerups, particles, rng, cues)
            {
                outcome.score += score;
            }
            split_asteroid(asteroids, ai, asteroids_remaining, rng);
            continue;
        }

        // Contact ram against the ship: the ship takes the class's contact
        // damage and the enemy is shoved back out so a single brush cannot
        // drain health every tick.
        if collides(&enemy.body, &ship.body) {
            let params = enemy.class.params();
            if damage_player(ship, health, lives, params.contact_damage, cues)
                == DamageResult::GameOver
            {
                outcome.game_over = true;
            }
            let offset = enemy.body.pos - ship.body.pos;
            let dist = offset.length();
            let normal = if dist > CONTACT_EPSILON {
                offset / dist
            } else {
                Vec2::X
            };
            let clearance = ship.body.radius + enemy.body.radius + CONTACT_EPSILON;
            if let Some(slot) = enemies.get_mut(ei) {
                slot.body.pos = ship.body.pos + normal * clearance;
                slot.body.vel = normal * slot.class.params().max_speed;
            }
        }
    }

    // Pickups.
    let grab = powerups
        .iter_active()
        .find(|(_, p)| collides(&p.body, &ship.body))
        .map(|(idx, p)| (idx, p.kind));
    if let Some((pi, kind)) = grab {
        powerups.release(pi);
        apply_powerup(ship, kind, health, lives, cues);
    }

    outcome
}
