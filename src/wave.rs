//! Wave director: round progression, spawn quotas, and enemy spawn gating.
//!
//! A wave is *clear* when both the asteroid and enemy pools are fully
//! inactive AND the wave's enemy spawn quota has been fully issued — a quota
//! still owed keeps the wave alive even with an empty arena. Clearing starts
//! a fixed transition delay (the "wave complete" message window), after which
//! the next wave begins with fresh quotas.

use crate::asteroid::{spawn_wave_asteroids, Asteroid};
use crate::constants::*;
use crate::enemy::{spawn_enemy, Enemy, EnemyClass};
use crate::pool::Pool;
use bevy::prelude::Vec2;
use rand::rngs::StdRng;
use rand::Rng;

/// Director phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WavePhase {
    /// Asteroids/enemies present or still queued to spawn.
    #[default]
    Active,
    /// Wave cleared; counting down to the next round.
    Transition,
}

/// Per-wave bookkeeping owned by the session.
#[derive(Debug, Clone, Copy)]
pub struct WaveDirector {
    pub wave: u32,
    pub phase: WavePhase,
    /// Terminal (size-1) destructions still owed this wave. Decremented by
    /// the asteroid subsystem only on terminal kills, never on splits.
    pub asteroids_remaining: u32,
    /// Enemies issued so far against this wave's quota.
    pub enemies_spawned: u32,
    pub enemy_quota: u32,
    /// Seconds left in the transition window.
    pub transition_timer: f32,
    /// Countdown to the next permitted enemy spawn.
    pub enemy_spawn_timer: f32,
}

impl Default for WaveDirector {
    fn default() -> Self {
        Self {
            wave: 1,
            phase: WavePhase::Active,
            asteroids_remaining: 0,
            enemies_spawned: 0,
            enemy_quota: 0,
            transition_timer: 0.0,
            enemy_spawn_timer: 0.0,
        }
    }
}

impl WaveDirector {
    /// True while the "wave complete" message should be shown.
    pub fn in_transition(&self) -> bool {
        self.phase == WavePhase::Transition
    }
}

// ── Quota rules (pure) ────────────────────────────────────────────────────────

/// Asteroid quota for wave `w`: `min(capacity, base + inc×(w−1))`.
pub fn asteroid_quota(wave: u32) -> u32 {
    (WAVE_ASTEROID_BASE + WAVE_ASTEROID_INC * wave.saturating_sub(1)).min(N_ASTEROIDS as u32)
}

/// Enemy quota for wave `w`: zero before the enemy start wave, then
/// `base + inc×(w − start)` capped at the pool size.
pub fn enemy_quota(wave: u32) -> u32 {
    if wave < ENEMY_START_WAVE {
        return 0;
    }
    (WAVE_ENEMY_BASE + WAVE_ENEMY_INC * (wave - ENEMY_START_WAVE)).min(N_ENEMIES as u32)
}

/// Probability that the next spawn is a Tank, ramping with the wave number
/// once past the unlock wave and capped at 50 %.
pub fn tank_probability(wave: u32) -> f32 {
    if wave < TANK_UNLOCK_WAVE {
        return 0.0;
    }
    (TANK_PROB_PER_WAVE * (wave - TANK_UNLOCK_WAVE + 1) as f32).min(TANK_PROB_CAP)
}

/// Wave-scaled enemy spawn interval plus random jitter.
fn spawn_interval(wave: u32, rng: &mut StdRng) -> f32 {
    let base = (ENEMY_SPAWN_BASE_SECS - ENEMY_SPAWN_WAVE_SPEEDUP * wave.saturating_sub(1) as f32)
        .max(ENEMY_SPAWN_MIN_SECS);
    base + rng.gen_range(0.0..ENEMY_SPAWN_JITTER_SECS)
}

// ── Wave lifecycle ────────────────────────────────────────────────────────────

/// Terminal destructions owed by one freshly spawned rock of `size`:
/// each split doubles the count, so size s owes 2^(s−1).
fn terminal_count(size: u32) -> u32 {
    1 << (size.saturating_sub(1))
}

/// Reset pools and counters for the director's current wave number and
/// populate the arena.
pub fn start_wave(
    director: &mut WaveDirector,
    asteroids: &mut Pool<Asteroid>,
    enemies: &mut Pool<Enemy>,
    ship_pos: Vec2,
    rng: &mut StdRng,
) {
    asteroids.clear();
    enemies.clear();

    let placed = spawn_wave_asteroids(asteroids, asteroid_quota(director.wave), ship_pos, rng);
    director.phase = WavePhase::Active;
    director.asteroids_remaining = placed * terminal_count(3);
    director.enemies_spawned = 0;
    director.enemy_quota = enemy_quota(director.wave);
    director.transition_timer = 0.0;
    director.enemy_spawn_timer = spawn_interval(director.wave, rng);
}

/// Pick an enemy spawn position along the arena edge, rejection-sampled away
/// from the ship.
fn edge_spawn_pos(ship_pos: Vec2, rng: &mut StdRng) -> Vec2 {
    loop {
        let candidate = match rng.gen_range(0..4u32) {
            0 => Vec2::new(rng.gen_range(0.0..ARENA_WIDTH), ARENA_HEIGHT - 30.0),
            1 => Vec2::new(rng.gen_range(0.0..ARENA_WIDTH), 30.0),
            2 => Vec2::new(30.0, rng.gen_range(0.0..ARENA_HEIGHT)),
            _ => Vec2::new(ARENA_WIDTH - 30.0, rng.gen_range(0.0..ARENA_HEIGHT)),
        };
        if candidate.distance(ship_pos) >= SAFE_SPAWN_DIST {
            return candidate;
        }
    }
}

/// Advance the director one tick: gate enemy spawns, detect wave clear, and
/// run the transition countdown into the next wave.
pub fn wave_step(
    director: &mut WaveDirector,
    asteroids: &mut Pool<Asteroid>,
    enemies: &mut Pool<Enemy>,
    ship_pos: Vec2,
    dt: f32,
    rng: &mut StdRng,
) {
    match director.phase {
        WavePhase::Active => {
            // At most one spawn per timer expiry, only while quota remains.
            if director.enemies_spawned < director.enemy_quota {
                director.enemy_spawn_timer -= dt;
                if director.enemy_spawn_timer <= 0.0 {
                    director.enemy_spawn_timer = spawn_interval(director.wave, rng);
                    let class = if rng.gen_range(0.0..1.0) < tank_probability(director.wave) {
                        EnemyClass::Tank
                    } else {
                        EnemyClass::Scout
                    };
                    let pos = edge_spawn_pos(ship_pos, rng);
                    if spawn_enemy(enemies, class, pos, rng).is_some() {
                        director.enemies_spawned += 1;
                    }
                }
            }

            let quota_issued = director.enemies_spawned >= director.enemy_quota;
            if quota_issued && asteroids.active_count() == 0 && enemies.active_count() == 0 {
                director.phase = WavePhase::Transition;
                director.transition_timer = WAVE_TRANSITION_DELAY;
            }
        }
        WavePhase::Transition => {
            director.transition_timer -= dt;
            if director.transition_timer <= 0.0 {
                director.wave += 1;
                start_wave(director, asteroids, enemies, ship_pos, rng);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(2024)
    }

    #[test]
    fn asteroid_quota_grows_linearly_and_caps_at_capacity() {
        assert_eq!(asteroid_quota(1), WAVE_ASTEROID_BASE);
        assert_eq!(asteroid_quota(2), WAVE_ASTEROID_BASE + WAVE_ASTEROID_INC);
        assert_eq!(asteroid_quota(5), WAVE_ASTEROID_BASE + 4 * WAVE_ASTEROID_INC);
        assert_eq!(asteroid_quota(1000), N_ASTEROIDS as u32);
    }

    #[test]
    fn enemy_quota_is_zero_before_the_start_wave() {
        for w in 1..ENEMY_START_WAVE {
            assert_eq!(enemy_quota(w), 0);
        }
        assert_eq!(enemy_quota(ENEMY_START_WAVE), WAVE_ENEMY_BASE);
        assert_eq!(
            enemy_quota(ENEMY_START_WAVE + 3),
            WAVE_ENEMY_BASE + 3 * WAVE_ENEMY_INC
        );
        assert_eq!(enemy_quota(1000), N_ENEMIES as u32);
    }

    #[test]
    fn tank_probability_unlocks_then_caps() {
        for w in 1..TANK_UNLOCK_WAVE {
            assert_eq!(tank_probability(w), 0.0);
        }
        assert!(tank_probability(TANK_UNLOCK_WAVE) > 0.0);
        assert_eq!(tank_probability(1000), TANK_PROB_CAP);
    }

    #[test]
    fn start_wave_populates_the_arena_and_counters() {
        let mut director = WaveDirector::default();
        let mut asteroids: Pool<Asteroid> = Pool::new(N_ASTEROIDS);
        let mut enemies: Pool<Enemy> = Pool::new(N_ENEMIES);
        let mut rng = rng();
        let ship = Vec2::new(ARENA_WIDTH / 2.0, ARENA_HEIGHT / 2.0);

        start_wave(&mut director, &mut asteroids, &mut enemies, ship, &mut rng);
        assert_eq!(asteroids.active_count() as u32, asteroid_quota(1));
        // Every size-3 rock owes four terminal destructions.
        assert_eq!(director.asteroids_remaining, asteroid_quota(1) * 4);
        assert_eq!(director.enemy_quota, enemy_quota(1));
        assert_eq!(director.enemies_spawned, 0);
    }

    #[test]
    fn cleared_wave_transitions_after_the_delay() {
        let mut director = WaveDirector::default();
        let mut asteroids: Pool<Asteroid> = Pool::new(N_ASTEROIDS);
        let mut enemies: Pool<Enemy> = Pool::new(N_ENEMIES);
        let mut rng = rng();
        let ship = Vec2::new(ARENA_WIDTH / 2.0, ARENA_HEIGHT / 2.0);

        start_wave(&mut director, &mut asteroids, &mut enemies, ship, &mut rng);
        asteroids.clear(); // simulate the player clearing the rocks

        // Wave 1 owes no enemies, so the wave is clear on the next tick.
        wave_step(&mut director, &mut asteroids, &mut enemies, ship, 0.016, &mut rng);
        assert!(director.in_transition());

        // The delay elapses; wave 2 begins with a bigger quota.
        wave_step(
            &mut director,
            &mut asteroids,
            &mut enemies,
            ship,
            WAVE_TRANSITION_DELAY + 0.01,
            &mut rng,
        );
        assert_eq!(director.wave, 2);
        assert_eq!(director.phase, WavePhase::Active);
        assert_eq!(asteroids.active_count() as u32, asteroid_quota(2));
        assert_eq!(director.enemy_quota, enemy_quota(2));
    }

    #[test]
    fn unissued_enemy_quota_blocks_wave_clear() {
        let mut director = WaveDirector {
            wave: ENEMY_START_WAVE,
            ..Default::default()
        };
        let mut asteroids: Pool<Asteroid> = Pool::new(N_ASTEROIDS);
        let mut enemies: Pool<Enemy> = Pool::new(N_ENEMIES);
        let mut rng = rng();
        let ship = Vec2::new(ARENA_WIDTH / 2.0, ARENA_HEIGHT / 2.0);

        start_wave(&mut director, &mut asteroids, &mut enemies, ship, &mut rng);
        assert!(director.enemy_quota > 0);
        asteroids.clear();

        // Arena is empty, but the quota has not been issued yet.
        wave_step(&mut director, &mut asteroids, &mut enemies, ship, 0.016, &mut rng);
        assert_eq!(director.phase, WavePhase::Active);

        // Let the spawn timer run down: an enemy appears, still Active.
        let mut guard = 0;
        while director.enemies_spawned < director.enemy_quota {
            wave_step(&mut director, &mut asteroids, &mut enemies, ship, 0.5, &mut rng);
            guard += 1;
            assert!(guard < 1000, "spawn gating never issued the quota");
        }
        assert!(enemies.active_count() > 0);
        assert_eq!(director.phase, WavePhase::Active);

        // Once the spawned enemies die, the wave can clear.
        enemies.clear();
        wave_step(&mut director, &mut asteroids, &mut enemies, ship, 0.016, &mut rng);
        assert!(director.in_transition());
    }

    #[test]
    fn spawn_gating_issues_at_most_one_enemy_per_expiry() {
        let mut director = WaveDirector {
            wave: ENEMY_START_WAVE + 5,
            ..Default::default()
        };
        let mut asteroids: Pool<Asteroid> = Pool::new(N_ASTEROIDS);
        let mut enemies: Pool<Enemy> = Pool::new(N_ENEMIES);
        let mut rng = rng();
        let ship = Vec2::new(ARENA_WIDTH / 2.0, ARENA_HEIGHT / 2.0);

        start_wave(&mut director, &mut asteroids, &mut enemies, ship, &mut rng);
        assert!(director.enemy_quota >= 2);

        // A huge dt can still only issue a single spawn.
        wave_step(&mut director, &mut asteroids, &mut enemies, ship, 60.0, &mut rng);
        assert_eq!(director.enemies_spawned, 1);
    }
}
