//! Centralised gameplay and simulation constants.
//!
//! All tuneable values live here so they can be found, reasoned-about, and
//! modified in one place without source-diving across multiple modules.
//! `src/config.rs` mirrors the gameplay subset of these as a runtime-tunable
//! [`crate::config::GameConfig`] resource; this file remains the
//! authoritative default source.
//!
//! Pool capacities and the tick rate are deliberately *not* mirrored into the
//! config: pools are allocated once at session creation and never resized.

// ── Arena ─────────────────────────────────────────────────────────────────────

/// Playfield width (world units). The arena is bounded: nothing wraps.
pub const ARENA_WIDTH: f32 = 1280.0;

/// Playfield height (world units).
pub const ARENA_HEIGHT: f32 = 720.0;

/// Fixed simulation tick rate (Hz). Body velocities are expressed in
/// units/tick; `dt` feeds only timers and the friction exponent.
pub const TICK_RATE: f64 = 60.0;

// ── Pool capacities ───────────────────────────────────────────────────────────

/// Player bullet pool capacity.
pub const N_BULLETS: usize = 64;

/// Asteroid pool capacity. Also the hard cap on any wave's asteroid quota.
pub const N_ASTEROIDS: usize = 64;

/// Enemy ship pool capacity.
pub const N_ENEMIES: usize = 12;

/// Enemy bullet pool capacity (shared by grenades, fragments, and
/// player-fired grenades).
pub const N_ENEMY_BULLETS: usize = 96;

/// Cosmetic particle pool capacity.
pub const N_PARTICLES: usize = 512;

/// Power-up pool capacity.
pub const N_POWERUPS: usize = 8;

// ── Ship ──────────────────────────────────────────────────────────────────────

/// Ship collision radius (world units).
pub const SHIP_RADIUS: f32 = 14.0;

/// Forward/backward thrust acceleration (units/tick²).
pub const SHIP_ACCEL: f32 = 0.25;

/// Sideways strafe acceleration (units/tick²).
pub const SHIP_STRAFE_ACCEL: f32 = 0.2;

/// Post-acceleration speed clamp (units/tick).
pub const SHIP_MAX_SPEED: f32 = 6.0;

/// Multiplicative velocity decay per tick at the nominal tick rate.
/// Applied as `FRICTION^(dt·TICK_RATE)` so slow frames decay proportionally.
pub const SHIP_FRICTION: f32 = 0.97;

/// Velocity damping applied when the ship or an enemy is blocked at the
/// arena edge.
pub const EDGE_DAMPING: f32 = 0.5;

/// Maximum health.
pub const MAX_HEALTH: f32 = 100.0;

/// Lives at session start.
pub const START_LIVES: u32 = 3;

/// Post-respawn invulnerability window (seconds).
pub const INVULN_DURATION: f32 = 3.0;

/// Ship visibility toggle period while invulnerable (seconds).
pub const BLINK_PERIOD: f32 = 0.15;

// ── Player weapons ────────────────────────────────────────────────────────────

/// Normal weapon magazine size.
pub const NORMAL_AMMO: u32 = 30;

/// Minimum interval between normal shots (seconds).
pub const NORMAL_COOLDOWN: f32 = 0.12;

/// Blocking reload duration (seconds). Ammo refills fully on completion.
pub const RELOAD_DURATION: f32 = 1.5;

/// Player bullet muzzle speed (units/tick).
pub const BULLET_SPEED: f32 = 10.0;

/// Player bullet collision radius.
pub const BULLET_RADIUS: f32 = 4.0;

/// Damage a player bullet deals to an enemy.
pub const BULLET_DAMAGE: f32 = 10.0;

/// Shotgun pickup ammo grant.
pub const SHOTGUN_AMMO: u32 = 12;

/// Pellets per shotgun shot.
pub const SHOTGUN_PELLETS: u32 = 6;

/// Total shotgun spread arc (degrees).
pub const SHOTGUN_SPREAD_DEG: f32 = 30.0;

/// Minimum interval between shotgun shots (seconds).
pub const SHOTGUN_COOLDOWN: f32 = 0.5;

/// Grenade pickup ammo grant.
pub const GRENADE_AMMO: u32 = 5;

/// Minimum interval between grenade shots (seconds).
pub const GRENADE_COOLDOWN: f32 = 0.8;

// ── Grenades (shared by player and Tank) ──────────────────────────────────────

/// Grenade muzzle speed (units/tick). Slow and heavy.
pub const GRENADE_SPEED: f32 = 3.0;

/// Grenade collision radius.
pub const GRENADE_RADIUS: f32 = 7.0;

/// Detonation countdown (seconds). Any collision detonates immediately.
pub const GRENADE_FUSE: f32 = 1.3;

/// Direct-contact damage of an unexploded grenade.
pub const GRENADE_DAMAGE: f32 = 25.0;

/// Fragment count on detonation: one per fixed compass direction.
pub const GRENADE_FRAGMENTS: usize = 8;

/// Fragment muzzle speed (units/tick).
pub const FRAGMENT_SPEED: f32 = 5.0;

/// Fragment collision radius.
pub const FRAGMENT_RADIUS: f32 = 3.0;

/// Damage a fragment deals on hit.
pub const FRAGMENT_DAMAGE: f32 = 8.0;

// ── Asteroids ─────────────────────────────────────────────────────────────────

/// Collision radius per size tier: radius = 20 × size.
pub const ASTEROID_RADIUS_PER_SIZE: f32 = 20.0;

/// Damage dealt to the ship per size tier: a size-3 rock hits for 30.
pub const ASTEROID_DAMAGE_PER_SIZE: f32 = 10.0;

/// Fraction of the ship-damage value dealt to enemies on asteroid impact.
pub const ASTEROID_ENEMY_DAMAGE_FACTOR: f32 = 0.5;

/// Initial speed range for freshly spawned or split asteroids (units/tick).
pub const ASTEROID_MIN_SPEED: f32 = 0.5;
pub const ASTEROID_MAX_SPEED: f32 = 2.5;

/// Asteroid-asteroid restitution coefficient for the elastic bounce.
pub const ASTEROID_RESTITUTION: f32 = 0.8;

/// Distance floor used before normalizing a contact normal. Tie-break for
/// exactly-coincident centers.
pub const CONTACT_EPSILON: f32 = 0.01;

/// Wave-start asteroids must spawn at least this far from the ship.
pub const SAFE_SPAWN_DIST: f32 = 200.0;

/// Score for destroying an asteroid, indexed by size tier (1, 2, 3).
/// Small rocks are worth the most.
pub const ASTEROID_SCORE: [u32; 3] = [100, 50, 20];

// ── Enemies ───────────────────────────────────────────────────────────────────

/// Hysteresis band around the attack distance: beyond `HOLD_FAR ×` attack
/// distance an enemy approaches, below `HOLD_NEAR ×` it retreats. The band
/// between the two prevents transition oscillation at the boundary.
pub const HOLD_NEAR: f32 = 0.6;
pub const HOLD_FAR: f32 = 1.3;

/// Exponential blend factor for steering: new velocity =
/// `(1 − STEER_BLEND)·old + STEER_BLEND·target` per tick.
pub const STEER_BLEND: f32 = 0.1;

/// An asteroid repels an enemy when closer than
/// `AVOID_RADIUS_FACTOR × enemy_radius + asteroid_radius`.
pub const AVOID_RADIUS_FACTOR: f32 = 5.0;

/// Extra avoidance weight for a Tank holding position.
pub const TANK_HOLD_AVOID_MULT: f32 = 2.0;

/// Seconds between random heading changes while wandering (base; a random
/// fraction of itself is added on each reset).
pub const WANDER_RETARGET_SECS: f32 = 2.0;

/// Wander movement speed as a fraction of the class max speed.
pub const WANDER_SPEED_FACTOR: f32 = 0.4;

/// Chance per tick of a thrust puff while wandering.
pub const WANDER_THRUST_CHANCE: f32 = 0.08;

// ── Scout flocking ────────────────────────────────────────────────────────────

/// Grouping scouts within this distance of each other form an ad hoc group.
pub const SCOUT_GROUP_RADIUS: f32 = 160.0;

/// Separation force activates below this distance, with quadratic falloff.
pub const SCOUT_SEPARATION_RADIUS: f32 = 48.0;

/// Cohesion vector weight in the blended steering target.
pub const SCOUT_COHESION_WEIGHT: f32 = 0.4;

/// Separation vector weight in the blended steering target.
pub const SCOUT_SEPARATION_WEIGHT: f32 = 0.8;

/// Angular offset between orbiting scouts of one group (degrees).
pub const SCOUT_ORBIT_SPREAD_DEG: f32 = 40.0;

// ── Enemy fire control ────────────────────────────────────────────────────────

/// Shots per scout burst.
pub const BURST_COUNT: u32 = 3;

/// Interval between shots within a burst (seconds).
pub const BURST_DELAY: f32 = 0.12;

/// Base cooldown between bursts (seconds).
pub const BURST_COOLDOWN: f32 = 1.8;

/// Additional random cooldown per other group member (seconds, upper bound).
/// Staggers fire among a group instead of lockstep salvos.
pub const BURST_GROUP_JITTER: f32 = 0.35;

/// Scout bullet speed (units/tick).
pub const SCOUT_BULLET_SPEED: f32 = 5.0;

/// Scout bullet damage.
pub const SCOUT_BULLET_DAMAGE: f32 = 10.0;

/// Scout aim deviation: ±this many degrees of random error per shot.
pub const SCOUT_AIM_JITTER_DEG: f32 = 10.0;

/// Tank grenade damage (direct hit, before detonation).
pub const TANK_GRENADE_DAMAGE: f32 = 20.0;

// ── Power-ups ─────────────────────────────────────────────────────────────────

/// Power-up collision radius.
pub const POWERUP_RADIUS: f32 = 12.0;

/// Seconds before an uncollected power-up despawns.
pub const POWERUP_LIFETIME: f32 = 10.0;

/// Drop chance on Tank death.
pub const TANK_DROP_CHANCE: f32 = 0.5;

/// Drop chance on Scout death.
pub const SCOUT_DROP_CHANCE: f32 = 0.25;

/// Health restored by a Health power-up.
pub const HEALTH_PICKUP_AMOUNT: f32 = 35.0;

// ── Waves ─────────────────────────────────────────────────────────────────────

/// Asteroid quota for wave W: `min(N_ASTEROIDS, BASE + INC×(W−1))`.
pub const WAVE_ASTEROID_BASE: u32 = 4;
pub const WAVE_ASTEROID_INC: u32 = 2;

/// First wave on which enemies spawn. Earlier waves have a zero enemy quota.
pub const ENEMY_START_WAVE: u32 = 2;

/// Enemy quota for wave W ≥ ENEMY_START_WAVE:
/// `BASE + INC×(W − ENEMY_START_WAVE)`, capped at the pool size.
pub const WAVE_ENEMY_BASE: u32 = 1;
pub const WAVE_ENEMY_INC: u32 = 1;

/// "Wave complete" message delay before the next wave starts (seconds).
pub const WAVE_TRANSITION_DELAY: f32 = 3.0;

/// Base enemy spawn interval (seconds); shrinks as waves progress.
pub const ENEMY_SPAWN_BASE_SECS: f32 = 6.0;

/// Random jitter added to each spawn interval (seconds, upper bound).
pub const ENEMY_SPAWN_JITTER_SECS: f32 = 2.0;

/// Per-wave reduction of the spawn interval (seconds).
pub const ENEMY_SPAWN_WAVE_SPEEDUP: f32 = 0.4;

/// Floor for the enemy spawn interval (seconds).
pub const ENEMY_SPAWN_MIN_SECS: f32 = 1.5;

/// First wave on which Tanks can spawn.
pub const TANK_UNLOCK_WAVE: u32 = 3;

/// Tank spawn probability ramp per wave past the unlock wave.
pub const TANK_PROB_PER_WAVE: f32 = 0.1;

/// Tank spawn probability cap.
pub const TANK_PROB_CAP: f32 = 0.5;

// ── Particles ─────────────────────────────────────────────────────────────────

/// Particles emitted by a small impact (bullet hit, thrust puff burst).
pub const IMPACT_PARTICLES: usize = 8;

/// Particles emitted when an enemy dies or a grenade detonates.
pub const EXPLOSION_PARTICLES: usize = 24;

/// Particle lifetime range (seconds).
pub const PARTICLE_MIN_LIFE: f32 = 0.3;
pub const PARTICLE_MAX_LIFE: f32 = 0.9;

/// Particle emission speed range (units/tick).
pub const PARTICLE_MIN_SPEED: f32 = 0.5;
pub const PARTICLE_MAX_SPEED: f32 = 3.0;

/// Base radius of a freshly emitted particle; shrinks with remaining life.
pub const PARTICLE_BASE_RADIUS: f32 = 3.0;
