//! Headless end-to-end scenarios driving [`GameSession`] tick by tick.
//!
//! No Bevy app is involved: the session is plain data, so these tests build
//! one, feed it input snapshots, and assert on the resulting state — the same
//! way the fixed-tick driver uses it in the running game.

use bevy::prelude::Vec2;
use rockstorm::constants::*;
use rockstorm::player::{DamageResult, PlayerInput, WeaponKind};
use rockstorm::powerup::PowerUpKind;
use rockstorm::session::{AudioCue, GameSession};
use rockstorm::wave::asteroid_quota;

const DT: f32 = 1.0 / TICK_RATE as f32;

fn idle() -> PlayerInput {
    PlayerInput::default()
}

/// Clearing every rock on an enemy-free wave walks the director through the
/// transition window into wave 2 with a bigger field.
#[test]
fn clearing_wave_one_advances_to_wave_two() {
    let mut session = GameSession::new(11);
    assert_eq!(session.wave.wave, 1);

    // Clear the field directly; wave 1 owes no enemies.
    session.asteroids.clear();
    session.update(&idle(), DT);
    assert!(session.wave.in_transition(), "empty arena starts the delay");

    // The banner window holds for its full duration.
    let ticks = (WAVE_TRANSITION_DELAY / DT) as usize;
    for _ in 0..ticks.saturating_sub(2) {
        session.update(&idle(), DT);
        assert_eq!(session.wave.wave, 1);
    }
    for _ in 0..4 {
        session.update(&idle(), DT);
    }

    assert_eq!(session.wave.wave, 2);
    assert!(!session.wave.in_transition());
    assert_eq!(
        session.asteroids.active_count() as u32,
        asteroid_quota(2),
        "wave 2 spawns its own quota"
    );
}

/// Losing the last life ends the run on that exact tick and freezes the
/// session.
#[test]
fn last_life_ends_the_session() {
    let mut session = GameSession::new(23);
    session.lives = 1;
    session.health = 1.0;
    session.ship.invuln_timer = 0.0;

    // Park a rock on top of the ship.
    session.asteroids.clear();
    let (_, slot) = session.asteroids.acquire().unwrap();
    slot.body.pos = session.ship.body.pos;
    slot.body.vel = Vec2::ZERO;
    slot.body.radius = ASTEROID_RADIUS_PER_SIZE;
    slot.body.active = true;
    slot.size = 1;

    let cues = session.update(&idle(), DT);
    assert!(session.game_over);
    assert_eq!(session.lives, 0);
    assert!(cues.contains(&AudioCue::ShipHit));

    // Further updates are inert.
    let score = session.score;
    assert!(session.update(&idle(), DT).is_empty());
    assert_eq!(session.score, score);
}

/// A non-final hit respawns the ship at the arena center with an
/// invulnerability window instead of ending the run.
#[test]
fn losing_a_life_respawns_with_invulnerability() {
    let mut session = GameSession::new(31);
    session.health = 1.0;
    session.ship.invuln_timer = 0.0;
    session.ship.body.pos = Vec2::new(100.0, 100.0);

    session.asteroids.clear();
    let (_, slot) = session.asteroids.acquire().unwrap();
    slot.body.pos = Vec2::new(100.0, 100.0);
    slot.body.vel = Vec2::ZERO;
    slot.body.radius = ASTEROID_RADIUS_PER_SIZE;
    slot.body.active = true;
    slot.size = 1;

    session.update(&idle(), DT);
    assert!(!session.game_over);
    assert_eq!(session.lives, START_LIVES - 1);
    assert_eq!(session.health, MAX_HEALTH);
    assert!(session.ship.is_invulnerable());
    assert_eq!(
        session.ship.body.pos,
        Vec2::new(ARENA_WIDTH / 2.0, ARENA_HEIGHT / 2.0)
    );
}

/// Walking over a shotgun drop swaps the weapon; emptying it reverts to the
/// cannon automatically.
#[test]
fn shotgun_pickup_swaps_and_reverts_when_empty() {
    let mut session = GameSession::new(47);
    session.asteroids.clear(); // keep the arena quiet
    session.lives = 100; // whatever wanders in later must not end the run

    let (_, slot) = session.powerups.acquire().unwrap();
    slot.body.pos = session.ship.body.pos;
    slot.body.radius = POWERUP_RADIUS;
    slot.body.active = true;
    slot.kind = PowerUpKind::Shotgun;
    slot.lifetime = POWERUP_LIFETIME;

    let cues = session.update(&idle(), DT);
    assert!(cues.contains(&AudioCue::Pickup));
    assert_eq!(session.ship.weapons.selected, WeaponKind::Shotgun);
    assert_eq!(session.ship.weapons.shotgun_ammo, SHOTGUN_AMMO);

    // Empty the magazine: each trigger pull costs one shell and sprays a
    // full fan of pellets.
    let fire = PlayerInput {
        fire_held: true,
        aim_deg: 0.0,
        ..Default::default()
    };
    let mut guard = 0;
    while session.ship.weapons.selected == WeaponKind::Shotgun {
        session.update(&fire, DT);
        guard += 1;
        assert!(guard < 10_000, "shotgun never reverted");
    }
    assert_eq!(session.ship.weapons.selected, WeaponKind::Normal);
    assert_eq!(session.ship.weapons.shotgun_ammo, 0);
}

/// Pool capacities and counters stay inside their bounds across a long
/// mixed-input soak.
#[test]
fn soak_run_keeps_every_invariant() {
    let mut session = GameSession::new(2026);
    let mut last_score = 0;

    for tick in 0..3600 {
        let input = PlayerInput {
            thrust: if tick % 7 < 4 { 1.0 } else { 0.0 },
            strafe: if tick % 11 < 5 { 1.0 } else { -1.0 },
            aim_deg: (tick as f32 * 2.3) % 360.0,
            fire_held: tick % 3 != 0,
            reload_pressed: tick % 500 == 0,
        };
        session.update(&input, DT);
        if session.game_over {
            break;
        }

        assert!(session.asteroids.active_count() <= N_ASTEROIDS);
        assert!(session.enemies.active_count() <= N_ENEMIES);
        assert!(session.enemy_bullets.active_count() <= N_ENEMY_BULLETS);
        assert!(session.health <= MAX_HEALTH);
        assert!(session.score >= last_score, "score never decreases");
        last_score = session.score;

        let pos = session.ship.body.pos;
        assert!(pos.x >= 0.0 && pos.x <= ARENA_WIDTH);
        assert!(pos.y >= 0.0 && pos.y <= ARENA_HEIGHT);
        assert!(pos.x.is_finite() && pos.y.is_finite());
    }
}

/// An invulnerable ship absorbs contact damage outright.
#[test]
fn invulnerability_absorbs_damage() {
    let mut session = GameSession::new(3);
    session.ship.invuln_timer = INVULN_DURATION;

    let mut cues = Vec::new();
    let result = rockstorm::player::damage_player(
        &mut session.ship,
        &mut session.health,
        &mut session.lives,
        50.0,
        &mut cues,
    );
    assert_eq!(result, DamageResult::Absorbed);
    assert_eq!(session.health, MAX_HEALTH);
    assert!(cues.is_empty(), "absorbed hits make no sound");
}
