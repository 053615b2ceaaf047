//! Player subsystem: twin-stick ship movement, the three weapons, the reload
//! state machine, and damage/respawn handling.
//!
//! The ship is a singleton owned by the session for its entire lifetime — it
//! is never pooled, only repositioned on respawn. Facing tracks the aim
//! direction independently of the movement axes, so the ship can strafe and
//! shoot in different directions.

use crate::body::{heading, KineticBody};
use crate::constants::*;
use crate::particlefx::{emit_thrust, Particle};
use crate::pool::Pool;
use crate::powerup::PowerUpKind;
use crate::projectile::{fire_bullet, fire_grenade, Bullet, EnemyBullet};
use crate::session::AudioCue;
use bevy::prelude::Vec2;
use rand::rngs::StdRng;
use rand::Rng;

// ── Input ─────────────────────────────────────────────────────────────────────

/// Per-tick input snapshot handed to the simulation by the shell.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayerInput {
    /// Forward/backward axis, −1..1.
    pub thrust: f32,
    /// Right/left strafe axis, −1..1.
    pub strafe: f32,
    /// Aim angle in degrees (0 = up, clockwise), from the pointer position.
    pub aim_deg: f32,
    /// Sustained-fire button held this tick.
    pub fire_held: bool,
    /// Manual reload requested this tick.
    pub reload_pressed: bool,
}

// ── Weapons ───────────────────────────────────────────────────────────────────

/// The player's three weapon kinds. Shotgun and Grenade are acquired via
/// power-ups, replace the active weapon, and revert implicitly to Normal when
/// their independent ammo runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeaponKind {
    #[default]
    Normal,
    Shotgun,
    Grenade,
}

/// Weapon selection, per-weapon ammo, the shot cooldown, and the reload
/// state machine.
#[derive(Debug, Clone, Copy)]
pub struct WeaponState {
    pub selected: WeaponKind,
    pub normal_ammo: u32,
    pub shotgun_ammo: u32,
    pub grenade_ammo: u32,
    /// Seconds until the next shot is allowed.
    pub cooldown: f32,
    pub reloading: bool,
    pub reload_timer: f32,
}

impl Default for WeaponState {
    fn default() -> Self {
        Self {
            selected: WeaponKind::Normal,
            normal_ammo: NORMAL_AMMO,
            shotgun_ammo: 0,
            grenade_ammo: 0,
            cooldown: 0.0,
            reloading: false,
            reload_timer: 0.0,
        }
    }
}

impl WeaponState {
    fn start_reload(&mut self, cues: &mut Vec<AudioCue>) {
        self.reloading = true;
        self.reload_timer = RELOAD_DURATION;
        cues.push(AudioCue::ReloadStart);
    }
}

// ── Ship ──────────────────────────────────────────────────────────────────────

/// The player ship and everything that respawns with it.
#[derive(Debug, Clone, Copy)]
pub struct PlayerShip {
    pub body: KineticBody,
    pub weapons: WeaponState,
    /// Remaining invulnerability after a respawn (seconds).
    pub invuln_timer: f32,
    /// Countdown to the next visibility flip while invulnerable.
    pub blink_timer: f32,
    /// Render-layer visibility; toggles while blinking, true otherwise.
    pub visible: bool,
}

impl Default for PlayerShip {
    fn default() -> Self {
        Self {
            body: KineticBody {
                pos: arena_center(),
                vel: Vec2::ZERO,
                angle_deg: 0.0,
                radius: SHIP_RADIUS,
                active: true,
            },
            weapons: WeaponState::default(),
            invuln_timer: 0.0,
            blink_timer: 0.0,
            visible: true,
        }
    }
}

pub fn arena_center() -> Vec2 {
    Vec2::new(ARENA_WIDTH / 2.0, ARENA_HEIGHT / 2.0)
}

impl PlayerShip {
    pub fn is_invulnerable(&self) -> bool {
        self.invuln_timer > 0.0
    }
}

// ── Per-tick update ───────────────────────────────────────────────────────────

/// Advance the ship one tick: timers, aim, acceleration, friction, firing.
/// Movement integration and boundary blocking happen in the physics step.
#[allow(clippy::too_many_arguments)]
pub fn player_step(
    ship: &mut PlayerShip,
    input: &PlayerInput,
    bullets: &mut Pool<Bullet>,
    enemy_bullets: &mut Pool<EnemyBullet>,
    particles: &mut Pool<Particle>,
    dt: f32,
    rng: &mut StdRng,
    cues: &mut Vec<AudioCue>,
) {
    // Timers.
    ship.weapons.cooldown = (ship.weapons.cooldown - dt).max(0.0);

    if ship.weapons.reloading {
        ship.weapons.reload_timer -= dt;
        if ship.weapons.reload_timer <= 0.0 {
            ship.weapons.reloading = false;
            ship.weapons.normal_ammo = NORMAL_AMMO;
            cues.push(AudioCue::ReloadFinish);
        }
    }

    if ship.invuln_timer > 0.0 {
        ship.invuln_timer -= dt;
        ship.blink_timer -= dt;
        if ship.blink_timer <= 0.0 {
            ship.visible = !ship.visible;
            ship.blink_timer += BLINK_PERIOD;
        }
        if ship.invuln_timer <= 0.0 {
            ship.visible = true;
        }
    }

    // Facing tracks aim, decoupled from the movement axes.
    ship.body.angle_deg = input.aim_deg;

    // Thrust and strafe accelerate along/perpendicular to facing.
    let forward = heading(input.aim_deg);
    let right = heading(input.aim_deg + 90.0);
    ship.body.vel += forward * SHIP_ACCEL * input.thrust.clamp(-1.0, 1.0)
        + right * SHIP_STRAFE_ACCEL * input.strafe.clamp(-1.0, 1.0);

    // Clamp speed post-acceleration, then decay continuously.
    let speed = ship.body.vel.length();
    if speed > SHIP_MAX_SPEED {
        ship.body.vel *= SHIP_MAX_SPEED / speed;
    }
    ship.body.vel *= SHIP_FRICTION.powf(dt * TICK_RATE as f32);

    if input.thrust.abs() > 0.1 {
        let exhaust_dir = if input.thrust > 0.0 { forward } else { -forward };
        emit_thrust(
            particles,
            ship.body.pos - exhaust_dir * SHIP_RADIUS,
            exhaust_dir,
            (0.4, 0.7, 1.0),
            rng,
        );
    }

    // Manual reload: only when not already reloading and the magazine is not
    // full. Only the normal weapon reloads.
    if input.reload_pressed
        && ship.weapons.selected == WeaponKind::Normal
        && !ship.weapons.reloading
        && ship.weapons.normal_ammo < NORMAL_AMMO
    {
        ship.weapons.start_reload(cues);
    }

    if input.fire_held {
        fire_weapon(ship, bullets, enemy_bullets, rng, cues);
    }
}

/// Fire the selected weapon if the cooldown and reload state allow it.
/// While reloading this is a no-op and ammo is unchanged.
pub fn fire_weapon(
    ship: &mut PlayerShip,
    bullets: &mut Pool<Bullet>,
    enemy_bullets: &mut Pool<EnemyBullet>,
    rng: &mut StdRng,
    cues: &mut Vec<AudioCue>,
) {
    if ship.weapons.reloading || ship.weapons.cooldown > 0.0 {
        return;
    }

    let aim = ship.body.angle_deg;
    let muzzle = ship.body.pos + heading(aim) * (SHIP_RADIUS + BULLET_RADIUS);

    match ship.weapons.selected {
        WeaponKind::Normal => {
            if ship.weapons.normal_ammo == 0 {
                return;
            }
            fire_bullet(bullets, muzzle, aim);
            ship.weapons.normal_ammo -= 1;
            ship.weapons.cooldown = NORMAL_COOLDOWN;
            cues.push(AudioCue::Shot);

            // Emptying the magazine auto-triggers the blocking reload.
            if ship.weapons.normal_ammo == 0 {
                ship.weapons.start_reload(cues);
            }
        }
        WeaponKind::Shotgun => {
            if ship.weapons.shotgun_ammo == 0 {
                ship.weapons.selected = WeaponKind::Normal;
                return;
            }
            // Pellets fan evenly across the spread arc with a touch of
            // per-pellet scatter.
            let step = SHOTGUN_SPREAD_DEG / (SHOTGUN_PELLETS - 1) as f32;
            for i in 0..SHOTGUN_PELLETS {
                let offset = -SHOTGUN_SPREAD_DEG / 2.0 + step * i as f32;
                let scatter = rng.gen_range(-2.0..2.0);
                fire_bullet(bullets, muzzle, aim + offset + scatter);
            }
            ship.weapons.shotgun_ammo -= 1;
            ship.weapons.cooldown = SHOTGUN_COOLDOWN;
            cues.push(AudioCue::Shot);

            if ship.weapons.shotgun_ammo == 0 {
                ship.weapons.selected = WeaponKind::Normal;
            }
        }
        WeaponKind::Grenade => {
            if ship.weapons.grenade_ammo == 0 {
                ship.weapons.selected = WeaponKind::Normal;
                return;
            }
            fire_grenade(enemy_bullets, muzzle, aim, GRENADE_DAMAGE, true);
            ship.weapons.grenade_ammo -= 1;
            ship.weapons.cooldown = GRENADE_COOLDOWN;
            cues.push(AudioCue::Shot);

            if ship.weapons.grenade_ammo == 0 {
                ship.weapons.selected = WeaponKind::Normal;
            }
        }
    }
}

// ── Damage & death ────────────────────────────────────────────────────────────

/// What happened to the ship when damage was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageResult {
    /// Invulnerability window absorbed the hit.
    Absorbed,
    /// Health reduced; ship survives.
    Hit,
    /// A life was consumed; ship respawned at the arena center.
    LifeLost,
    /// Last life gone; the session is over on this exact tick.
    GameOver,
}

/// Apply `amount` damage to the ship, consuming a life and respawning with
/// an invulnerability window when health is exhausted.
pub fn damage_player(
    ship: &mut PlayerShip,
    health: &mut f32,
    lives: &mut u32,
    amount: f32,
    cues: &mut Vec<AudioCue>,
) -> DamageResult {
    if ship.is_invulnerable() {
        return DamageResult::Absorbed;
    }

    *health -= amount;
    cues.push(AudioCue::ShipHit);
    if *health > 0.0 {
        return DamageResult::Hit;
    }

    *lives = lives.saturating_sub(1);
    if *lives == 0 {
        return DamageResult::GameOver;
    }

    // Respawn: reposition the singleton ship, never recycle it.
    ship.body.pos = arena_center();
    ship.body.vel = Vec2::ZERO;
    *health = MAX_HEALTH;
    ship.invuln_timer = INVULN_DURATION;
    ship.blink_timer = BLINK_PERIOD;
    ship.visible = true;
    DamageResult::LifeLost
}

/// Apply a collected power-up. Weapon pickups replace the active weapon and
/// cancel an in-flight reload.
pub fn apply_powerup(
    ship: &mut PlayerShip,
    kind: PowerUpKind,
    health: &mut f32,
    lives: &mut u32,
    cues: &mut Vec<AudioCue>,
) {
    match kind {
        PowerUpKind::Health => {
            *health = (*health + HEALTH_PICKUP_AMOUNT).min(MAX_HEALTH);
        }
        PowerUpKind::Life => {
            *lives += 1;
        }
        PowerUpKind::Shotgun => {
            ship.weapons.selected = WeaponKind::Shotgun;
            ship.weapons.shotgun_ammo = SHOTGUN_AMMO;
            ship.weapons.reloading = false;
        }
        PowerUpKind::Grenade => {
            ship.weapons.selected = WeaponKind::Grenade;
            ship.weapons.grenade_ammo = GRENADE_AMMO;
            ship.weapons.reloading = false;
        }
    }
    cues.push(AudioCue::Pickup);
}
